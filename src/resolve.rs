use std::path::{is_separator, PathBuf};

use tracing::{debug, trace};

use crate::context::ResolutionContext;
use crate::template::{Segment, Template, Token};

/// Resolve a working-directory template against `ctx`.
///
/// Lookup misses degrade to the literal text of the token argument; nothing
/// here returns an error.
pub fn resolve(template: &str, ctx: &ResolutionContext) -> String {
    PathResolver::new(ctx).render(&Template::parse(template))
}

pub struct PathResolver<'a> {
    ctx: &'a ResolutionContext,
}

impl<'a> PathResolver<'a> {
    pub fn new(ctx: &'a ResolutionContext) -> Self {
        Self { ctx }
    }

    pub fn render(&self, template: &Template) -> String {
        let mut out = String::new();
        for seg in template.segments() {
            match seg {
                Segment::Literal(s) => out.push_str(s),
                Segment::Unknown(body) => {
                    debug!(token = %body, "leaving unrecognised token as-is");
                    out.push_str("${");
                    out.push_str(body);
                    out.push('}');
                }
                Segment::Token(t) => out.push_str(&self.substitute(t)),
            }
        }
        out
    }

    fn substitute(&self, token: &Token) -> String {
        match token {
            Token::Home => {
                if self.ctx.home_dir().is_empty() {
                    debug!("home directory unknown, substituting empty string");
                }
                self.ctx.home_dir().to_string()
            }
            Token::ProjectPath(name) => match self.find_in_project(name) {
                Some(p) => {
                    debug!(file = %name, path = %p.display(), "project file found");
                    p.to_string_lossy().into_owned()
                }
                None => {
                    debug!(file = %name, "project file not found, keeping name");
                    name.clone()
                }
            },
            Token::Folder(inner) => {
                let path = self.render(inner);
                parent_dir(&path).to_string()
            }
        }
    }

    /// First `root/name` that exists, trying roots in registration order.
    pub fn find_in_project(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() {
            return None;
        }
        for root in self.ctx.project_roots() {
            let candidate = root.join(name);
            // I/O errors count as a miss
            let found = candidate.try_exists().unwrap_or(false);
            trace!(candidate = %candidate.display(), found, "probing project root");
            if found {
                return Some(candidate);
            }
        }
        None
    }
}

/// Directory part of `path`, `dirname`-style: trailing separators of the head
/// are dropped, a root stays a root, and a bare name comes back unchanged.
pub fn parent_dir(path: &str) -> &str {
    let Some(idx) = path.rfind(is_separator) else {
        return path;
    };
    let head = &path[..=idx];
    let trimmed = head.trim_end_matches(is_separator);
    if trimmed.is_empty() {
        head
    } else {
        trimmed
    }
}

pub fn resolve_to_path(template: &str, ctx: &ResolutionContext) -> PathBuf {
    PathBuf::from(resolve(template, ctx))
}
