#![allow(dead_code)]

use std::path::PathBuf;

use gdb_workdir::*;

pub fn manifest_path(rel: &str) -> String {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    root.join(rel).to_string_lossy().into_owned()
}

pub fn fixture(rel: &str) -> PathBuf {
    PathBuf::from(manifest_path(&format!("tests/fixtures/{}", rel)))
}

/// Roots `projects/a` then `projects/b`; only `b` holds `main.cpp`.
pub fn projects_ctx() -> ResolutionContext {
    ResolutionContext::new("/home/alice")
        .with_project_root(fixture("projects/a"))
        .with_project_root(fixture("projects/b"))
}
