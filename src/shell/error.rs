use std::fmt;
use std::time::Duration;

/// Errors that can occur in shell and filesystem primitives
#[derive(Debug)]
pub enum ShellError {
    /// Spawning or reading a child process failed
    CommandFailed {
        command: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Command did not finish within the allowed time
    Timeout { command: String, timeout: Duration },

    /// A filesystem primitive failed
    Filesystem {
        path: String,
        operation: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An ini file could not be parsed
    IniParse {
        path: String,
        line: usize,
        reason: String,
    },

    /// Hostname lookup failed
    Hostname { reason: String },

    /// The mock shell received a command it had no expectation for
    UnexpectedCommand { command: String },

    /// Mock verification found expectations that never ran
    UnmetExpectations { commands: Vec<String> },
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellError::CommandFailed { command, .. } => {
                write!(f, "Command failed: {}", command)
            }
            ShellError::Timeout { command, timeout } => {
                write!(f, "Command '{}' timed out after {:?}", command, timeout)
            }
            ShellError::Filesystem {
                path, operation, ..
            } => {
                write!(f, "Filesystem {} failed for path: {}", operation, path)
            }
            ShellError::IniParse { path, line, reason } => {
                write!(f, "Failed to parse {} at line {}: {}", path, line, reason)
            }
            ShellError::Hostname { reason } => {
                write!(f, "Hostname lookup failed: {}", reason)
            }
            ShellError::UnexpectedCommand { command } => {
                write!(f, "Command not expected: {}", command)
            }
            ShellError::UnmetExpectations { commands } => {
                write!(f, "Some MockShell commands not run: {:?}", commands)
            }
        }
    }
}

impl std::error::Error for ShellError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShellError::CommandFailed { source, .. } => Some(source.as_ref()),
            ShellError::Filesystem { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl ShellError {
    /// Create a command error
    pub fn command_failed(
        command: &str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ShellError::CommandFailed {
            command: command.to_string(),
            source: Box::new(source),
        }
    }

    /// Create a timeout error
    pub fn timeout(command: &str, timeout: Duration) -> Self {
        ShellError::Timeout {
            command: command.to_string(),
            timeout,
        }
    }

    /// Create a filesystem error
    pub fn filesystem(
        path: &str,
        operation: &str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ShellError::Filesystem {
            path: path.to_string(),
            operation: operation.to_string(),
            source: Box::new(source),
        }
    }

    /// Create an ini parse error
    pub fn ini_parse(path: &str, line: usize, reason: &str) -> Self {
        ShellError::IniParse {
            path: path.to_string(),
            line,
            reason: reason.to_string(),
        }
    }

    /// Create a hostname error
    pub fn hostname(reason: &str) -> Self {
        ShellError::Hostname {
            reason: reason.to_string(),
        }
    }

    /// Create an unexpected command error
    pub fn unexpected_command(command: &str) -> Self {
        ShellError::UnexpectedCommand {
            command: command.to_string(),
        }
    }
}

/// Result type alias for shell operations
pub type ShellResult<T> = Result<T, ShellError>;
