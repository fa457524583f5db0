use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use super::error::{ShellError, ShellResult};
use super::ini::{self, IniValue};
use super::{CommandOutput, Shell};

/// A single scripted command the mock expects to run
#[derive(Debug, Clone)]
struct Expectation {
    command: String,
    output: CommandOutput,
}

/// In-memory state, behind a mutex so the trait's `&self` methods can mutate it
#[derive(Debug, Default)]
struct MockState {
    files: HashMap<String, String>,
    directories: HashSet<String>,
    expectations: VecDeque<Expectation>,
    temp_counter: u32,
}

/// Deterministic [`Shell`] for tests: scripted command output and an
/// in-memory filesystem, no real OS access.
///
/// Expected commands are registered up front with
/// [`MockShell::expect_execute`] and consumed as they run, matched by command
/// string regardless of call order. [`MockShell::verify`] fails when any
/// registered command never ran.
#[derive(Debug)]
pub struct MockShell {
    state: Mutex<MockState>,
    hostname: String,
}

impl Default for MockShell {
    fn default() -> Self {
        Self::new()
    }
}

impl MockShell {
    pub fn new() -> Self {
        Self::with_hostname("mockhost")
    }

    pub fn with_hostname(hostname: &str) -> Self {
        Self {
            state: Mutex::new(MockState::default()),
            hostname: hostname.to_string(),
        }
    }

    /// Register a command the test expects to run, with its scripted output.
    /// Chainable; each expectation is consumed by exactly one execution.
    pub fn expect_execute(&self, command: &str, lines: &[&str], exit_code: i32) -> &Self {
        let lines: Vec<String> = lines.iter().map(|s| s.to_string()).collect();
        self.lock().expectations.push_back(Expectation {
            command: command.to_string(),
            output: CommandOutput::new(lines, exit_code),
        });
        self
    }

    /// Seed a file into the in-memory filesystem without going through
    /// [`Shell::write_file`].
    pub fn seed_file(&self, path: &str, data: &str) -> &Self {
        self.lock().files.insert(path.to_string(), data.to_string());
        self
    }

    /// Fails with [`ShellError::UnmetExpectations`] when any expected command
    /// was never run.
    pub fn verify(&self) -> ShellResult<()> {
        let state = self.lock();
        if state.expectations.is_empty() {
            Ok(())
        } else {
            Err(ShellError::UnmetExpectations {
                commands: state
                    .expectations
                    .iter()
                    .map(|e| e.command.clone())
                    .collect(),
            })
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn not_mocked(path: &str, operation: &str) -> ShellError {
        ShellError::filesystem(
            path,
            operation,
            io::Error::new(io::ErrorKind::NotFound, "path not mocked"),
        )
    }
}

#[async_trait]
impl Shell for MockShell {
    async fn execute(&self, command: &str) -> ShellResult<CommandOutput> {
        let mut state = self.lock();
        let position = state
            .expectations
            .iter()
            .position(|e| e.command == command);
        match position.and_then(|idx| state.expectations.remove(idx)) {
            Some(expectation) => Ok(expectation.output),
            None => Err(ShellError::unexpected_command(command)),
        }
    }

    async fn execute_with_timeout(
        &self,
        command: &str,
        _timeout: Duration,
    ) -> ShellResult<CommandOutput> {
        self.execute(command).await
    }

    fn file_exists(&self, path: &str) -> bool {
        let state = self.lock();
        state.files.contains_key(path) || state.directories.contains(path)
    }

    fn read_file(&self, path: &str) -> ShellResult<String> {
        self.lock()
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| Self::not_mocked(path, "read"))
    }

    fn write_file(&self, path: &str, data: &str) -> ShellResult<()> {
        self.lock().files.insert(path.to_string(), data.to_string());
        Ok(())
    }

    fn make_directory(&self, path: &str, _mode: u32, recursive: bool) -> ShellResult<()> {
        let mut state = self.lock();
        if recursive {
            let ancestors: Vec<String> = Path::new(path)
                .ancestors()
                .filter(|p| !p.as_os_str().is_empty() && *p != Path::new("/"))
                .map(|p| p.to_string_lossy().into_owned())
                .collect();
            for dir in ancestors.into_iter().rev() {
                state.directories.insert(dir);
            }
        } else {
            if let Some(parent) = Path::new(path).parent() {
                let parent_known = parent.as_os_str().is_empty()
                    || parent == Path::new("/")
                    || state
                        .directories
                        .contains(parent.to_string_lossy().as_ref());
                if !parent_known {
                    return Err(Self::not_mocked(path, "mkdir"));
                }
            }
            state.directories.insert(path.to_string());
        }
        Ok(())
    }

    fn remove_file(&self, path: &str) -> ShellResult<()> {
        self.lock()
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| Self::not_mocked(path, "unlink"))
    }

    fn touch(&self, path: &str) -> ShellResult<()> {
        self.lock()
            .files
            .entry(path.to_string())
            .or_insert_with(String::new);
        Ok(())
    }

    fn create_temp_directory(&self) -> ShellResult<String> {
        let mut state = self.lock();
        state.temp_counter += 1;
        let path = format!("/tmp/mock-temp-{}", state.temp_counter);
        state.directories.insert(path.clone());
        Ok(path)
    }

    fn parse_ini_file(
        &self,
        path: &str,
        process_sections: bool,
    ) -> ShellResult<HashMap<String, IniValue>> {
        let content = self.read_file(path)?;
        ini::parse_ini(path, &content, process_sections)
    }

    fn hostname(&self) -> ShellResult<String> {
        Ok(self.hostname.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_execute() {
        let shell = MockShell::new();
        shell.expect_execute("whoami", &["p diddy"], 0);

        let output = shell.execute("whoami").await.unwrap();
        assert_eq!(output.lines, vec!["p diddy"]);
        assert_eq!(output.last_line, "p diddy");
        assert_eq!(output.exit_code, 0);

        shell.verify().unwrap();
    }

    #[tokio::test]
    async fn test_expectation_consumed_once() {
        let shell = MockShell::new();
        shell.expect_execute("ls", &["file1"], 0);

        assert!(shell.execute("ls").await.is_ok());
        let second = shell.execute("ls").await;
        assert!(matches!(second, Err(ShellError::UnexpectedCommand { .. })));
    }

    #[tokio::test]
    async fn test_unexpected_command() {
        let shell = MockShell::new();

        let result = shell.execute("rm -rf /").await;
        assert!(matches!(result, Err(ShellError::UnexpectedCommand { .. })));
    }

    #[test]
    fn test_verify_reports_unrun_commands() {
        let shell = MockShell::new();
        shell.expect_execute("ls", &[], 0);

        let err = shell.verify().unwrap_err();
        if let ShellError::UnmetExpectations { commands } = err {
            assert_eq!(commands, vec!["ls".to_string()]);
        } else {
            panic!("Expected UnmetExpectations");
        }
    }

    #[test]
    fn test_in_memory_file_lifecycle() {
        let shell = MockShell::new();
        let path = "/fake/file.txt";

        assert!(!shell.file_exists(path));
        shell.touch(path).unwrap();
        assert!(shell.file_exists(path));
        assert_eq!(shell.read_file(path).unwrap(), "");

        shell.write_file(path, "data").unwrap();
        assert_eq!(shell.read_file(path).unwrap(), "data");

        // Touch leaves existing contents alone
        shell.touch(path).unwrap();
        assert_eq!(shell.read_file(path).unwrap(), "data");

        shell.remove_file(path).unwrap();
        assert!(!shell.file_exists(path));
    }

    #[test]
    fn test_remove_missing_file_errors() {
        let shell = MockShell::new();
        assert!(shell.remove_file("/no/such/file").is_err());
    }

    #[test]
    fn test_mkdir_recursive_creates_parents() {
        let shell = MockShell::new();
        shell.make_directory("/a/b/c", 0o777, true).unwrap();

        assert!(shell.file_exists("/a"));
        assert!(shell.file_exists("/a/b"));
        assert!(shell.file_exists("/a/b/c"));
    }

    #[test]
    fn test_mkdir_non_recursive_needs_parent() {
        let shell = MockShell::new();

        assert!(shell.make_directory("/a/b", 0o777, false).is_err());

        shell.make_directory("/a", 0o777, false).unwrap();
        shell.make_directory("/a/b", 0o777, false).unwrap();
        assert!(shell.file_exists("/a/b"));
    }

    #[test]
    fn test_temp_directories_are_distinct() {
        let shell = MockShell::new();
        let first = shell.create_temp_directory().unwrap();
        let second = shell.create_temp_directory().unwrap();

        assert_ne!(first, second);
        assert!(shell.file_exists(&first));
        assert!(shell.file_exists(&second));
    }

    #[test]
    fn test_hostname() {
        let shell = MockShell::with_hostname("worker-1");
        assert_eq!(shell.hostname().unwrap(), "worker-1");
    }
}
