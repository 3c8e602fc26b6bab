use crate::error::{AddVersionError, Result};
use std::path::Path;
use std::process::Command;

/// Runs external verification commands
pub trait CommandRunner {
    /// Run `command` in `dir`, blocking until it exits
    ///
    /// # Returns
    /// * `Ok(())` if the command exits with status 0
    /// * `Err` if it cannot be started or exits with any other status
    fn run(&self, command: &str, dir: &Path) -> Result<()>;
}

/// Executes commands through the platform shell, sharing our stdout/stderr
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str, dir: &Path) -> Result<()> {
        if command.trim().is_empty() {
            return Err(AddVersionError::external_command("no command configured"));
        }

        let mut cmd = if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C");
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg("-c");
            cmd
        };

        let status = cmd.arg(command).current_dir(dir).status().map_err(|e| {
            AddVersionError::external_command(format!("Failed to execute '{}': {}", command, e))
        })?;

        if !status.success() {
            return Err(AddVersionError::external_command(format!(
                "'{}' failed with exit code {}",
                command,
                status
                    .code()
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "none (terminated by signal)".to_string())
            )));
        }

        Ok(())
    }
}
