use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Output;

use super::{Command, CommandError};
use crate::core::session::Session;
use crate::process::ProcessRunner;

const GUYTHON_USAGE: &str = "Usage: guython {script_file.gy/.guy} [args]\n       guython -c \"code to execute\"";
const GUYTHON_ENV: &str = "GUYTHON_HOME";
const GUYTHON_BIN: &str = "guython";

/// Delegates to the external Guython interpreter. The interpreter is not
/// part of this crate; this command only locates, launches, and reports on
/// it, blocking until the child exits.
#[derive(Clone)]
pub struct GuythonCommand {
    runner: ProcessRunner,
}

impl Default for GuythonCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl GuythonCommand {
    pub fn new() -> Self {
        Self {
            runner: ProcessRunner::new(),
        }
    }
}

/// Resolution order: `GUYTHON_HOME` (the executable itself, or a directory
/// containing one named `guython`), then the first `guython` on `PATH`.
fn locate_interpreter() -> Option<PathBuf> {
    if let Some(configured) = env::var_os(GUYTHON_ENV) {
        let configured = PathBuf::from(configured);
        let candidate = if configured.is_dir() {
            configured.join(GUYTHON_BIN)
        } else {
            configured
        };
        if candidate.is_file() {
            return Some(candidate);
        }
        return None;
    }

    let path_var = env::var_os("PATH")?;
    for dir in env::split_paths(&path_var) {
        let candidate = dir.join(GUYTHON_BIN);
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}

fn format_report(output: &Output) -> String {
    let mut sections: Vec<String> = Vec::new();

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.trim().is_empty() {
        sections.push(format!("Output:\n{}\n{}", "-".repeat(20), stdout.trim()));
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        sections.push(format!("Errors:\n{}\n{}", "-".repeat(20), stderr.trim()));
    }

    if !output.status.success() {
        let code = output.status.code().unwrap_or(-1);
        sections.push(format!("Process exited with code: {}", code));
    }

    if sections.is_empty() {
        "Script executed successfully (no output)".to_string()
    } else {
        sections.join("\n\n")
    }
}

impl Command for GuythonCommand {
    fn execute(&self, session: &mut Session, args: &[String]) -> Result<String, CommandError> {
        if args.is_empty() {
            return Err(CommandError::Usage(GUYTHON_USAGE));
        }

        let Some(interpreter) = locate_interpreter() else {
            return Err(CommandError::NotFound(format!(
                "Guython interpreter not found\nPlease install Guython or point {} at it",
                GUYTHON_ENV
            )));
        };

        let child_args: Vec<OsString> = if args[0] == "-c" {
            if args.len() < 2 {
                return Err(CommandError::InvalidArgument(
                    "No code provided for -c option".to_string(),
                ));
            }
            vec![OsString::from("-c"), OsString::from(args[1..].join(" "))]
        } else {
            let script = session.resolve_file("", &args[0]);
            if !script.exists() {
                return Err(CommandError::NotFound(format!(
                    "Script file '{}' not found",
                    args[0]
                )));
            }
            let mut child_args = vec![script.into_os_string()];
            child_args.extend(args[1..].iter().map(OsString::from));
            child_args
        };

        let output = self
            .runner
            .run_captured(&interpreter, &child_args, session.current_dir())?;
        Ok(format_report(&output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::process::ExitStatusExt;
    use std::process::ExitStatus;
    use tempfile::tempdir;

    #[test]
    fn test_usage_without_arguments() {
        let tmp = tempdir().unwrap();
        let mut session = Session::at(tmp.path()).unwrap();

        let result = GuythonCommand::new().execute(&mut session, &[]);
        assert!(matches!(result, Err(CommandError::Usage(_))));
    }

    #[test]
    fn test_interpreter_lookup() {
        // Sequential on purpose: both cases mutate GUYTHON_HOME.
        let tmp = tempdir().unwrap();
        let fake = tmp.path().join(GUYTHON_BIN);
        fs::write(&fake, "#!/bin/sh\n").unwrap();

        env::set_var(GUYTHON_ENV, tmp.path());
        assert_eq!(locate_interpreter(), Some(fake.clone()));

        env::set_var(GUYTHON_ENV, &fake);
        assert_eq!(locate_interpreter(), Some(fake));

        env::set_var(GUYTHON_ENV, tmp.path().join("missing"));
        assert_eq!(locate_interpreter(), None);

        env::remove_var(GUYTHON_ENV);
    }

    #[test]
    fn test_report_sections() {
        let ok = Output {
            status: ExitStatus::from_raw(0),
            stdout: b"hello\n".to_vec(),
            stderr: Vec::new(),
        };
        let report = format_report(&ok);
        assert!(report.starts_with("Output:"));
        assert!(report.contains("hello"));

        let failed = Output {
            status: ExitStatus::from_raw(256),
            stdout: Vec::new(),
            stderr: b"boom\n".to_vec(),
        };
        let report = format_report(&failed);
        assert!(report.contains("Errors:"));
        assert!(report.contains("boom"));
        assert!(report.contains("Process exited with code: 1"));

        let silent = Output {
            status: ExitStatus::from_raw(0),
            stdout: Vec::new(),
            stderr: Vec::new(),
        };
        assert_eq!(
            format_report(&silent),
            "Script executed successfully (no output)"
        );
    }
}
