mod context;
mod launch;
mod logging;
mod resolve;
mod settings;
mod template;

pub use context::ResolutionContext;
pub use launch::{LaunchPlan, GDB_PROGRAM};
pub use logging::init_logging;
pub use resolve::{parent_dir, resolve, resolve_to_path, PathResolver};
pub use settings::{
    load_settings, resolve_pathbuf, GdbSettings, LoadedSettings, ENV_LIST_SEPARATOR, VIEW_PREFIX,
};
pub use template::{Segment, Template, Token};
