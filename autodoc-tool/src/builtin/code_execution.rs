//! Runs source code through a local interpreter subprocess.
//!
//! The tool never fails from the agent's point of view: spawn errors, non-zero exits, and
//! timeouts all come back as `Execution failed:` text.

use autodoc_core::{Result, Tool, ToolContext};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

pub const DEFAULT_INTERPRETER: &str = "python3";
pub const DEFAULT_EXECUTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Outcome of one execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    Success(String),
    Failure(String),
}

impl ExecutionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionOutcome::Success(_))
    }

    /// Text handed back to the model.
    pub fn render(&self) -> String {
        match self {
            ExecutionOutcome::Success(output) => format!("Execution successful:\n{}", output),
            ExecutionOutcome::Failure(detail) => format!("Execution failed:\n{}", detail),
        }
    }
}

pub struct CodeExecutionTool {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CodeExecutionTool {
    /// Python 3 reading the program from stdin.
    pub fn new() -> Self {
        Self::with_interpreter(DEFAULT_INTERPRETER, ["-"])
    }

    /// Any interpreter that reads its program from stdin.
    pub fn with_interpreter<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            timeout: DEFAULT_EXECUTION_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub async fn run(&self, code: &str) -> ExecutionOutcome {
        match tokio::time::timeout(self.timeout, self.spawn_and_wait(code)).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(e)) => {
                ExecutionOutcome::Failure(format!("could not run {}: {}", self.program, e))
            }
            Err(_) => ExecutionOutcome::Failure(format!(
                "timed out after {} seconds",
                self.timeout.as_secs_f64()
            )),
        }
    }

    async fn spawn_and_wait(&self, code: &str) -> std::io::Result<ExecutionOutcome> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            // The program may exit before reading all of its input.
            match stdin.write_all(code.as_bytes()).await {
                Err(e) if e.kind() != std::io::ErrorKind::BrokenPipe => return Err(e),
                _ => {}
            }
            drop(stdin);
        }

        let output = child.wait_with_output().await?;
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if output.status.success() {
            Ok(ExecutionOutcome::Success(stdout))
        } else if stderr.trim().is_empty() {
            let detail = format!("process exited with {}\n{}", output.status, stdout);
            Ok(ExecutionOutcome::Failure(detail))
        } else {
            Ok(ExecutionOutcome::Failure(stderr))
        }
    }
}

impl Default for CodeExecutionTool {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CodeExecutionTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeExecutionTool")
            .field("program", &self.program)
            .field("args", &self.args)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[async_trait]
impl Tool for CodeExecutionTool {
    fn name(&self) -> &str {
        "execute_code"
    }

    fn description(&self) -> &str {
        "Execute Python code and return the output. Use print() to see results."
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(json!({
            "type": "object",
            "properties": {
                "code": {
                    "type": "string",
                    "description": "Python source code to execute"
                }
            },
            "required": ["code"]
        }))
    }

    async fn execute(&self, _ctx: Arc<dyn ToolContext>, args: Value) -> Result<Value> {
        #[derive(Deserialize)]
        struct Args {
            code: String,
        }

        let outcome = match serde_json::from_value::<Args>(args) {
            Ok(args) => {
                tracing::info!(program = %self.program, bytes = args.code.len(), "executing code");
                self.run(&args.code).await
            }
            Err(e) => ExecutionOutcome::Failure(format!("invalid arguments: {}", e)),
        };

        if !outcome.is_success() {
            tracing::debug!(program = %self.program, "code execution reported failure");
        }
        Ok(Value::String(outcome.render()))
    }
}
