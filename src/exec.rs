// External command execution with per-call timeouts

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("{0}")]
    CommandFailed(String),

    #[error("{0} timed out after {1:?}")]
    Timeout(String, Duration),

    #[error("failed to run {0}: {1}")]
    Spawn(String, #[source] std::io::Error),
}

/// Seam for shelling out to systemctl/journalctl; tests substitute a
/// scripted implementation.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `program` with `args` and returns stdout. A non-zero exit is an
    /// error carrying trimmed stderr (stdout as fallback).
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<String, ExecError>;
}

pub struct SystemCommandRunner;

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<String, ExecError> {
        let mut cmd = Command::new(program);
        cmd.args(args).stdin(Stdio::null()).kill_on_drop(true);

        let label = display_command(program, args);
        tracing::debug!("exec: {}", label);

        let output = tokio::time::timeout(timeout, cmd.output())
            .await
            .map_err(|_| ExecError::Timeout(label.clone(), timeout))?
            .map_err(|e| ExecError::Spawn(label.clone(), e))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let msg = stderr.trim();
            let msg = if msg.is_empty() { stdout.trim() } else { msg };
            let msg = if msg.is_empty() {
                format!("command failed: {}", label)
            } else {
                msg.to_string()
            };
            return Err(ExecError::CommandFailed(msg));
        }
        Ok(stdout)
    }
}

fn display_command(program: &str, args: &[&str]) -> String {
    let mut s = String::from(program);
    for a in args {
        s.push(' ');
        s.push_str(a);
    }
    s
}
