// Shared test helpers: a scripted CommandRunner

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use unitview::exec::{CommandRunner, ExecError};

/// CommandRunner returning canned stdout keyed by the full command line.
/// Unscripted commands fail, so tests also prove which commands ran.
#[derive(Default)]
pub struct ScriptedRunner {
    responses: HashMap<String, Result<String, String>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, command_line: &str, stdout: &str) -> Self {
        self.responses
            .insert(command_line.to_string(), Ok(stdout.to_string()));
        self
    }

    pub fn fail(mut self, command_line: &str, message: &str) -> Self {
        self.responses
            .insert(command_line.to_string(), Err(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        _timeout: Duration,
    ) -> Result<String, ExecError> {
        let mut key = String::from(program);
        for a in args {
            key.push(' ');
            key.push_str(a);
        }
        self.calls.lock().unwrap().push(key.clone());
        match self.responses.get(&key) {
            Some(Ok(out)) => Ok(out.clone()),
            Some(Err(msg)) => Err(ExecError::CommandFailed(msg.clone())),
            None => Err(ExecError::CommandFailed(format!(
                "unscripted command: {key}"
            ))),
        }
    }
}
