use std::env;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::path::PathExpander;

/// In-memory state carried across commands: the current working directory.
///
/// `current_dir` is always an existing absolute directory path; only a
/// successful [`Session::enter`] replaces it.
pub struct Session {
    current_dir: PathBuf,
    expander: PathExpander,
}

impl Session {
    /// Starts a session at the process's working directory.
    pub fn new() -> io::Result<Self> {
        Ok(Session {
            current_dir: env::current_dir()?,
            expander: PathExpander::new(),
        })
    }

    /// Starts a session rooted at an explicit directory without touching the
    /// process working directory.
    pub fn at(dir: &Path) -> io::Result<Self> {
        Ok(Session {
            current_dir: fs::canonicalize(dir)?,
            expander: PathExpander::new(),
        })
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    /// Moves the session into `path`, canonicalizing it and keeping the
    /// process working directory in sync for child processes. On failure the
    /// session is left where it was.
    pub fn enter(&mut self, path: &Path) -> io::Result<()> {
        let canonical = fs::canonicalize(path)?;
        env::set_current_dir(&canonical)?;
        self.current_dir = canonical;
        Ok(())
    }

    /// Resolves a directory argument: empty means the current directory,
    /// `~` expands to home, relative paths resolve against the current
    /// directory, absolute paths are used as-is. The result is lexically
    /// normalized; nothing is checked against the filesystem.
    pub fn resolve_dir(&self, directory: &str) -> PathBuf {
        if directory.is_empty() {
            return self.current_dir.clone();
        }

        let expanded = self.expander.expand(directory);
        let joined = if expanded.is_absolute() {
            expanded
        } else {
            self.current_dir.join(expanded)
        };

        normalize(&joined)
    }

    /// Resolves a `directory` + `filename` pair the same way `resolve_dir`
    /// does. An absolute `filename` wins over the directory part.
    pub fn resolve_file(&self, directory: &str, filename: &str) -> PathBuf {
        normalize(&self.resolve_dir(directory).join(filename))
    }
}

/// Lexically collapses `.` and `..` components without consulting the
/// filesystem. `..` at the root of an absolute path is dropped.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::RootDir | Component::Prefix(_) => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() && !out.has_root() {
                    out.push("..");
                }
            }
            Component::Normal(part) => out.push(part),
        }
    }

    if out.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        out
    }
}
