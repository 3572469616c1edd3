use std::fmt;

mod executor;
pub mod signal;

pub use executor::ProcessRunner;

#[derive(Debug)]
pub enum ProcessError {
    /// The interpreter path resolved but could not be executed.
    LaunchFailed(String),
    SignalError(String),
    Other(String),
}

impl From<std::io::Error> for ProcessError {
    fn from(e: std::io::Error) -> Self {
        ProcessError::Other(e.to_string())
    }
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::LaunchFailed(msg) => {
                write!(f, "Could not execute Guython interpreter at {}", msg)
            }
            ProcessError::SignalError(msg) => write!(f, "Signal error: {}", msg),
            ProcessError::Other(msg) => write!(f, "Process error: {}", msg),
        }
    }
}
