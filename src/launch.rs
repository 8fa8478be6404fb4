use std::fmt;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use anyhow::{anyhow, Result};
use tracing::info;

use crate::context::ResolutionContext;
use crate::resolve::resolve_to_path;
use crate::settings::GdbSettings;

pub const GDB_PROGRAM: &str = "gdb";

/// How the debugger process would be started: `gdb --interpreter=mi EXE`
/// inside the resolved working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    /// MI command issued once the session is up.
    pub exec_cmd: String,
}

impl LaunchPlan {
    pub fn from_settings(settings: &GdbSettings, ctx: &ResolutionContext) -> Result<Self> {
        let executable = settings
            .executable
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| anyhow!("no executable configured (set `executable`)"))?;
        let cwd = resolve_to_path(&settings.workingdir, ctx);
        info!(
            template = %settings.workingdir,
            cwd = %cwd.display(),
            "resolved debugger working directory"
        );
        Ok(Self {
            program: GDB_PROGRAM.to_string(),
            args: vec!["--interpreter=mi".to_string(), executable.to_string()],
            cwd,
            exec_cmd: settings.exec_cmd.clone(),
        })
    }

    /// Configured but not spawned; stdin/stdout are piped for the MI channel.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .current_dir(&self.cwd)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped());
        cmd
    }
}

impl fmt::Display for LaunchPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for a in &self.args {
            write!(f, " {}", a)?;
        }
        Ok(())
    }
}
