use async_trait::async_trait;
use log::debug;
use std::collections::HashMap;
use std::fs;
use std::os::unix::fs::DirBuilderExt;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time;

use super::error::{ShellError, ShellResult};
use super::ini::{self, IniValue};
use super::{CommandOutput, Shell};

/// Real shell implementation passing straight through to the OS
pub struct LocalShell;

#[async_trait]
impl Shell for LocalShell {
    async fn execute(&self, command: &str) -> ShellResult<CommandOutput> {
        debug!("executing: {}", command);
        let output = Command::new("sh")
            .arg("-c")
            .arg(command)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| ShellError::command_failed(command, e))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let lines: Vec<String> = stdout.lines().map(str::to_string).collect();
        // Terminated-by-signal has no code
        let exit_code = output.status.code().unwrap_or(-1);
        Ok(CommandOutput::new(lines, exit_code))
    }

    async fn execute_with_timeout(
        &self,
        command: &str,
        timeout: Duration,
    ) -> ShellResult<CommandOutput> {
        match time::timeout(timeout, self.execute(command)).await {
            Ok(result) => result,
            Err(_) => Err(ShellError::timeout(command, timeout)),
        }
    }

    fn file_exists(&self, path: &str) -> bool {
        Path::new(path).exists()
    }

    fn read_file(&self, path: &str) -> ShellResult<String> {
        fs::read_to_string(path).map_err(|e| ShellError::filesystem(path, "read", e))
    }

    fn write_file(&self, path: &str, data: &str) -> ShellResult<()> {
        debug!("writing {} bytes to {}", data.len(), path);
        fs::write(path, data).map_err(|e| ShellError::filesystem(path, "write", e))
    }

    fn make_directory(&self, path: &str, mode: u32, recursive: bool) -> ShellResult<()> {
        debug!("mkdir {} (mode {:o}, recursive {})", path, mode, recursive);
        let mut builder = fs::DirBuilder::new();
        builder.recursive(recursive).mode(mode);
        builder
            .create(path)
            .map_err(|e| ShellError::filesystem(path, "mkdir", e))
    }

    fn remove_file(&self, path: &str) -> ShellResult<()> {
        debug!("unlinking {}", path);
        fs::remove_file(path).map_err(|e| ShellError::filesystem(path, "unlink", e))
    }

    fn touch(&self, path: &str) -> ShellResult<()> {
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map(|_| ())
            .map_err(|e| ShellError::filesystem(path, "touch", e))
    }

    fn create_temp_directory(&self) -> ShellResult<String> {
        let dir = tempfile::Builder::new()
            .prefix("shell-")
            .tempdir()
            .map_err(|e| ShellError::filesystem("/tmp", "mktempdir", e))?;
        // Hand ownership to the caller, the directory outlives the handle
        let path = dir.keep();
        Ok(path.to_string_lossy().into_owned())
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
        let name =
            nix::unistd::gethostname().map_err(|e| ShellError::hostname(&e.to_string()))?;
        Ok(name.to_string_lossy().into_owned())
    }
}
