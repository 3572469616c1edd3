use std::path::Path;

use super::{Command, CommandError};
use crate::core::session::Session;

const CD_USAGE: &str = "Usage: cd {directory}\n       cd ..";

#[derive(Clone)]
pub struct CdCommand;

impl Default for CdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CdCommand {
    pub fn new() -> Self {
        Self
    }

    fn enter(session: &mut Session, target: &Path, shown: &str) -> Result<String, CommandError> {
        session.enter(target).map_err(|e| match e.kind() {
            std::io::ErrorKind::PermissionDenied => {
                CommandError::PermissionDenied(format!("entering '{}'", shown))
            }
            _ => CommandError::NotFound(format!("Directory '{}' not found", shown)),
        })?;
        Ok(format!(
            "Changed to directory: {}",
            session.current_dir().display()
        ))
    }
}

impl Command for CdCommand {
    fn execute(&self, session: &mut Session, args: &[String]) -> Result<String, CommandError> {
        let Some(target) = args.first() else {
            return Err(CommandError::Usage(CD_USAGE));
        };

        if target == ".." {
            // Root detection: a path without a parent is the root.
            let parent = session.current_dir().parent().map(Path::to_path_buf);
            return match parent {
                Some(parent) => Self::enter(session, &parent, ".."),
                None => Ok("Already at root directory".to_string()),
            };
        }

        let resolved = session.resolve_dir(target);
        if !resolved.is_dir() {
            return Err(CommandError::NotFound(format!(
                "Directory '{}' not found",
                target
            )));
        }

        Self::enter(session, &resolved, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_cd_without_argument_is_usage_error() {
        let tmp = tempdir().unwrap();
        let mut session = Session::at(tmp.path()).unwrap();

        let result = CdCommand::new().execute(&mut session, &[]);
        assert!(matches!(result, Err(CommandError::Usage(_))));
    }

    #[test]
    fn test_cd_relative_subdirectory() {
        let tmp = tempdir().unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        let mut session = Session::at(tmp.path()).unwrap();

        let output = CdCommand::new()
            .execute(&mut session, &["sub".to_string()])
            .unwrap();

        assert!(output.starts_with("Changed to directory:"));
        assert_eq!(
            session.current_dir(),
            fs::canonicalize(tmp.path().join("sub")).unwrap()
        );
    }

    #[test]
    fn test_cd_dotdot_moves_to_parent() {
        let tmp = tempdir().unwrap();
        let sub = tmp.path().join("sub");
        fs::create_dir(&sub).unwrap();
        let mut session = Session::at(&sub).unwrap();

        CdCommand::new()
            .execute(&mut session, &["..".to_string()])
            .unwrap();

        assert_eq!(session.current_dir(), fs::canonicalize(tmp.path()).unwrap());
    }

    #[test]
    fn test_cd_dotdot_at_root_reports_and_stays() {
        let mut session = Session::at(std::path::Path::new("/")).unwrap();

        let output = CdCommand::new()
            .execute(&mut session, &["..".to_string()])
            .unwrap();

        assert_eq!(output, "Already at root directory");
        assert_eq!(session.current_dir(), std::path::Path::new("/"));
    }

    #[test]
    fn test_cd_missing_directory() {
        let tmp = tempdir().unwrap();
        let mut session = Session::at(tmp.path()).unwrap();
        let before = session.current_dir().to_path_buf();

        let result = CdCommand::new().execute(&mut session, &["nope".to_string()]);
        assert!(matches!(result, Err(CommandError::NotFound(_))));
        assert_eq!(session.current_dir(), before);
    }

    #[test]
    fn test_cd_file_is_not_found() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("plain.txt"), "x").unwrap();
        let mut session = Session::at(tmp.path()).unwrap();

        let result = CdCommand::new().execute(&mut session, &["plain.txt".to_string()]);
        assert!(matches!(result, Err(CommandError::NotFound(_))));
    }

    #[test]
    fn test_cd_absolute_path() {
        let tmp = tempdir().unwrap();
        let mut session = Session::at(tmp.path()).unwrap();

        let target = fs::canonicalize(tmp.path()).unwrap();
        let shown = target.to_string_lossy().into_owned();
        CdCommand::new()
            .execute(&mut session, &[shown])
            .unwrap();

        assert_eq!(session.current_dir(), target);
    }
}
