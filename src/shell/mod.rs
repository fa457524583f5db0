//! OS shell and filesystem primitives behind a mockable seam

pub mod error;
pub mod ini;
pub mod local;
pub mod mock;


// Re-export commonly used items
pub use error::{ShellError, ShellResult};
pub use ini::IniValue;
pub use local::LocalShell;
pub use mock::MockShell;

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// What a finished command reported: every output line, the last line on its
/// own, and the exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub lines: Vec<String>,
    pub last_line: String,
    pub exit_code: i32,
}

impl CommandOutput {
    pub fn new(lines: Vec<String>, exit_code: i32) -> Self {
        let last_line = lines.last().cloned().unwrap_or_default();
        Self {
            lines,
            last_line,
            exit_code,
        }
    }

    /// Whether the command exited with status zero.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Abstraction over OS shell and file primitives to enable testing without
/// touching the real system
#[async_trait]
pub trait Shell {
    /// Run `command` through `sh -c`. A non-zero exit status is reported in
    /// the output, not as an error.
    async fn execute(&self, command: &str) -> ShellResult<CommandOutput>;

    /// Like [`Shell::execute`], but gives up after `timeout`.
    async fn execute_with_timeout(
        &self,
        command: &str,
        timeout: Duration,
    ) -> ShellResult<CommandOutput>;

    fn file_exists(&self, path: &str) -> bool;

    fn read_file(&self, path: &str) -> ShellResult<String>;

    fn write_file(&self, path: &str, data: &str) -> ShellResult<()>;

    /// Create a directory with the given unix mode, creating parents when
    /// `recursive` is set.
    fn make_directory(&self, path: &str, mode: u32, recursive: bool) -> ShellResult<()>;

    fn remove_file(&self, path: &str) -> ShellResult<()>;

    /// Create the file if it does not exist, leaving existing contents alone.
    fn touch(&self, path: &str) -> ShellResult<()>;

    /// Create a fresh temporary directory and return its path. The directory
    /// persists after this call returns.
    fn create_temp_directory(&self) -> ShellResult<String>;

    /// Parse an ini file into a structured mapping. With `process_sections`,
    /// keys nest under their `[section]`; otherwise the result is flat.
    fn parse_ini_file(
        &self,
        path: &str,
        process_sections: bool,
    ) -> ShellResult<HashMap<String, IniValue>>;

    fn hostname(&self) -> ShellResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_output_last_line() {
        let output = CommandOutput::new(vec!["one".to_string(), "two".to_string()], 0);
        assert_eq!(output.last_line, "two");
        assert!(output.success());
    }

    #[test]
    fn test_command_output_empty() {
        let output = CommandOutput::new(vec![], 1);
        assert_eq!(output.last_line, "");
        assert!(!output.success());
    }
}
