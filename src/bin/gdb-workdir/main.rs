use std::{path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use gdb_workdir::{
    init_logging, load_settings, resolve, LaunchPlan, LoadedSettings, ResolutionContext, Segment,
    Template,
};

/// gdb-workdir: resolve the working directory of a GDB/MI debugging session
#[derive(Parser, Debug)]
#[command(
    name = "gdb-workdir",
    version,
    about = "Resolve ${home}/${project_path:..}/${folder:..} working-directory templates"
)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve a template given on the command line
    Resolve(ResolveCmd),
    /// Resolve the configured `workingdir` setting
    Workdir,
    /// Print the gdb command line and the directory it would run in
    LaunchPlan,
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Settings file; if omitted, auto-discovers gdb-workdir.{toml,yaml,yml,json}
    #[arg(long = "config", value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Per-view settings; `sublimegdb_<key>` entries override the settings file
    #[arg(long = "view-settings", value_name = "FILE", global = true)]
    view_settings: Option<PathBuf>,

    /// Home directory used for ${home} (defaults to $HOME)
    #[arg(long = "home", value_name = "DIR", global = true)]
    home: Option<String>,

    /// Project roots searched by ${project_path:..}, in order (replaces configured roots)
    #[arg(long = "project-root", value_name = "DIR", action = ArgAction::Append, global = true)]
    project_roots: Vec<PathBuf>,

    /// File currently being debugged
    #[arg(long = "current-file", value_name = "FILE", global = true)]
    current_file: Option<PathBuf>,

    /// Print how each token was resolved
    #[arg(long = "diagnostics", action = ArgAction::SetTrue, default_value_t = false, global = true)]
    diagnostics: bool,
}

#[derive(Args, Debug)]
struct ResolveCmd {
    #[arg(value_name = "TEMPLATE")]
    template: String,
}

fn main() -> ExitCode {
    match real_main() {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(1)
        }
    }
}

fn real_main() -> Result<()> {
    let cli = Cli::parse();
    let loaded = load_settings(
        cli.common.config.as_deref(),
        cli.common.view_settings.as_deref(),
    )?;
    let _log_guard = init_logging(&loaded.settings)?;
    let ctx = build_context(&cli.common, &loaded)?;

    match cli.command {
        Commands::Resolve(cmd) => run_resolve(&cmd.template, &ctx, cli.common.diagnostics),
        Commands::Workdir => run_resolve(&loaded.settings.workingdir, &ctx, cli.common.diagnostics),
        Commands::LaunchPlan => {
            let plan = LaunchPlan::from_settings(&loaded.settings, &ctx)?;
            println!("{}", plan);
            println!("cwd: {}", plan.cwd.display());
            println!("exec: {}", plan.exec_cmd);
            Ok(())
        }
    }
}

// Effective values: CLI > settings > environment defaults.
fn build_context(common: &CommonArgs, loaded: &LoadedSettings) -> Result<ResolutionContext> {
    let roots = if !common.project_roots.is_empty() {
        common.project_roots.clone()
    } else {
        loaded.project_root_dirs()?
    };
    let mut ctx = match &common.home {
        Some(h) => ResolutionContext::new(h.clone()).with_project_roots(roots),
        None => ResolutionContext::from_env(roots),
    };
    if let Some(f) = &common.current_file {
        ctx = ctx.with_current_file(f.clone());
    }
    Ok(ctx)
}

fn run_resolve(template: &str, ctx: &ResolutionContext, diagnostics: bool) -> Result<()> {
    if diagnostics {
        print_diagnostics(template, ctx);
    }
    println!("{}", resolve(template, ctx));
    Ok(())
}

fn print_diagnostics(template: &str, ctx: &ResolutionContext) {
    eprintln!("template: {}", template);
    eprintln!("home: {:?}", ctx.home_dir());
    if !ctx.project_roots().is_empty() {
        eprintln!(
            "project roots: {}",
            ctx.project_roots()
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    if let Some(f) = ctx.current_file() {
        eprintln!("current file: {}", f.display());
    }
    let parsed = Template::parse(template);
    if parsed.is_literal() {
        eprintln!("no tokens; template used as-is");
        return;
    }
    for seg in parsed.segments() {
        match seg {
            Segment::Token(t) => {
                let src = t.to_string();
                eprintln!("  {} -> {}", src, resolve(&src, ctx));
            }
            Segment::Unknown(body) => eprintln!("  ${{{}}} (unrecognised, kept)", body),
            Segment::Literal(_) => {}
        }
    }
}
