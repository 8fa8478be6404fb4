use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config as cfg;
use serde::Deserialize;

/// Prefix under which per-view settings override the global ones.
pub const VIEW_PREFIX: &str = "sublimegdb_";

const ENV_PREFIX: &str = "GDB_WORKDIR";

/// Separates entries of list-valued environment overrides, as in `PATH`.
pub const ENV_LIST_SEPARATOR: &str = ":";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GdbSettings {
    /// Template for the debugger's working directory.
    pub workingdir: String,
    pub executable: Option<String>,
    /// First MI command sent once gdb is up.
    pub exec_cmd: String,
    pub debug: bool,
    pub debug_file: PathBuf,
    /// Directories (or glob patterns) searched by `${project_path:...}`.
    pub project_roots: Vec<String>,
}

impl Default for GdbSettings {
    fn default() -> Self {
        Self {
            workingdir: "/tmp".to_string(),
            executable: None,
            exec_cmd: "-exec-run".to_string(),
            debug: false,
            debug_file: PathBuf::from("/tmp/sublimegdb.txt"),
            project_roots: Vec::new(),
        }
    }
}

impl GdbSettings {
    /// Expand `project_roots` into concrete directories, relative entries
    /// taken from `base`. Glob entries contribute their matching directories
    /// in sorted order; plain entries are kept whether or not they exist.
    pub fn project_root_dirs(&self, base: Option<&Path>) -> Result<Vec<PathBuf>> {
        let mut out = Vec::new();
        for raw in &self.project_roots {
            let p = resolve_pathbuf(base, raw);
            if !is_glob(raw) {
                out.push(p);
                continue;
            }
            let pattern = p.to_string_lossy();
            let mut hits: Vec<PathBuf> = glob::glob(&pattern)
                .with_context(|| format!("bad project root pattern: {}", raw))?
                .flatten()
                .filter(|d| d.is_dir())
                .collect();
            hits.sort();
            out.extend(hits);
        }
        Ok(out)
    }
}

/// Settings plus the location they were read from.
pub struct LoadedSettings {
    pub settings: GdbSettings,
    /// Directory of the settings file, if one was found.
    pub dir: Option<PathBuf>,
}

impl LoadedSettings {
    pub fn project_root_dirs(&self) -> Result<Vec<PathBuf>> {
        self.settings.project_root_dirs(self.dir.as_deref())
    }
}

/// Load settings from `explicit`, or from the first `gdb-workdir.*` file in the
/// current directory. `view` names an optional per-view settings file whose
/// `sublimegdb_`-prefixed keys win over everything else.
pub fn load_settings(explicit: Option<&Path>, view: Option<&Path>) -> Result<LoadedSettings> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => discover()?,
    };

    let mut builder = cfg::Config::builder();
    if let Some(p) = &path {
        builder = builder.add_source(file_source(p));
    }
    builder = builder.add_source(
        cfg::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(ENV_LIST_SEPARATOR)
            .with_list_parse_key("project_roots"),
    );
    if let Some(v) = view {
        for (key, value) in read_view_overrides(v)? {
            builder = builder.set_override(key, value)?;
        }
    }

    let what = path
        .as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    let settings = builder
        .build()
        .with_context(|| format!("failed to load settings from {}", what))?
        .try_deserialize::<GdbSettings>()
        .with_context(|| format!("failed to parse settings from {}", what))?;
    let dir = path
        .as_deref()
        .and_then(Path::parent)
        .map(|p| p.to_path_buf());
    Ok(LoadedSettings { settings, dir })
}

fn discover() -> Result<Option<PathBuf>> {
    let cwd = std::env::current_dir()?;
    let candidates = [
        "gdb-workdir.toml",
        "gdb-workdir.yaml",
        "gdb-workdir.yml",
        "gdb-workdir.json",
    ];
    Ok(candidates
        .iter()
        .map(|name| cwd.join(name))
        .find(|p| p.is_file()))
}

/// Keys of the view file that carry [`VIEW_PREFIX`], with the prefix removed.
fn read_view_overrides(path: &Path) -> Result<Vec<(String, cfg::Value)>> {
    let raw = cfg::Config::builder()
        .add_source(file_source(path))
        .build()
        .and_then(|c| c.try_deserialize::<HashMap<String, cfg::Value>>())
        .with_context(|| format!("failed to read view settings at {}", path.display()))?;
    let mut out: Vec<(String, cfg::Value)> = raw
        .into_iter()
        .filter_map(|(k, v)| k.strip_prefix(VIEW_PREFIX).map(|k| (k.to_string(), v)))
        .collect();
    out.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(out)
}

// Sublime-style `*.sublime-settings` files are JSON under another extension.
fn file_source(path: &Path) -> cfg::File<cfg::FileSourceFile, cfg::FileFormat> {
    let known = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("toml" | "yaml" | "yml" | "json" | "json5" | "ini" | "ron")
    );
    let file = cfg::File::from(path);
    if known {
        file
    } else {
        file.format(cfg::FileFormat::Json)
    }
}

fn is_glob(s: &str) -> bool {
    s.contains(['*', '?', '['])
}

pub fn resolve_pathbuf(base: Option<&Path>, value: &str) -> PathBuf {
    let p = Path::new(value);
    if p.is_absolute() {
        p.to_path_buf()
    } else if let Some(b) = base {
        b.join(p)
    } else {
        p.to_path_buf()
    }
}
