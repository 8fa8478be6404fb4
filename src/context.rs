use std::path::{Path, PathBuf};

/// Everything a template may refer to, captured up front so that resolution
/// never consults process-wide state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionContext {
    home_dir: String,
    project_roots: Vec<PathBuf>,
    current_file: Option<PathBuf>,
}

impl ResolutionContext {
    pub fn new(home_dir: impl Into<String>) -> Self {
        Self {
            home_dir: home_dir.into(),
            ..Self::default()
        }
    }

    /// Snapshot `HOME` (or `USERPROFILE`) from the environment. An unset
    /// variable leaves the home directory empty.
    pub fn from_env(project_roots: Vec<PathBuf>) -> Self {
        let home_dir = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .unwrap_or_default();
        Self {
            home_dir,
            project_roots,
            current_file: None,
        }
    }

    pub fn with_project_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.project_roots.push(root.into());
        self
    }

    pub fn with_project_roots<I, P>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.project_roots.extend(roots.into_iter().map(Into::into));
        self
    }

    pub fn with_current_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.current_file = Some(file.into());
        self
    }

    pub fn home_dir(&self) -> &str {
        &self.home_dir
    }

    /// Roots in search order.
    pub fn project_roots(&self) -> &[PathBuf] {
        &self.project_roots
    }

    pub fn current_file(&self) -> Option<&Path> {
        self.current_file.as_deref()
    }
}
