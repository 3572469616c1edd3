use std::{
    fs,
    path::{Path, PathBuf},
};

use rustyline::completion::Pair;

/// Completes filesystem paths relative to the process working directory,
/// which the session keeps in sync with its own current directory.
#[derive(Clone, Default)]
pub struct PathCompleter;

impl PathCompleter {
    pub fn new() -> Self {
        Self
    }

    pub fn complete_path(&self, incomplete: &str) -> Vec<Pair> {
        let (dir_to_search, file_prefix) = split_input(incomplete);

        let mut matches = Vec::new();
        if let Ok(entries) = fs::read_dir(&dir_to_search) {
            for entry in entries.filter_map(Result::ok) {
                let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                    continue;
                };
                if !name.starts_with(&file_prefix) {
                    continue;
                }
                matches.push(render(&name, &entry.path(), &dir_to_search));
            }
        }

        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }
}

fn split_input(incomplete: &str) -> (PathBuf, String) {
    if incomplete.is_empty() {
        return (PathBuf::from("."), String::new());
    }
    if incomplete.ends_with('/') {
        return (PathBuf::from(incomplete), String::new());
    }

    let path = Path::new(incomplete);
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => (
            parent.to_path_buf(),
            path.file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("")
                .to_string(),
        ),
        _ => (PathBuf::from("."), incomplete.to_string()),
    }
}

fn render(name: &str, full_path: &Path, dir_to_search: &Path) -> Pair {
    let shown = if dir_to_search == Path::new(".") {
        name.to_string()
    } else {
        dir_to_search.join(name).to_string_lossy().into_owned()
    };

    if full_path.is_dir() {
        Pair {
            display: format!("{}/", shown),
            replacement: format!("{}/", shown),
        }
    } else {
        Pair {
            display: shown.clone(),
            replacement: format!("{} ", shown),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_bare_name() {
        let (dir, prefix) = split_input("no");
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(prefix, "no");
    }

    #[test]
    fn test_split_nested() {
        let (dir, prefix) = split_input("sub/inn");
        assert_eq!(dir, PathBuf::from("sub"));
        assert_eq!(prefix, "inn");
    }

    #[test]
    fn test_split_trailing_slash() {
        let (dir, prefix) = split_input("sub/");
        assert_eq!(dir, PathBuf::from("sub/"));
        assert_eq!(prefix, "");
    }
}
