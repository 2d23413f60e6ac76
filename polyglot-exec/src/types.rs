use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Code execution request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRequest {
    /// Language id or alias, resolved through the registry
    pub language: String,
    /// Source code to execute
    pub source: String,
    /// Input fed to the program's stdin during the run phase
    #[serde(default)]
    pub stdin: Option<String>,
}

impl ExecutionRequest {
    pub fn new(language: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            source: source.into(),
            stdin: None,
        }
    }

    pub fn with_stdin(mut self, stdin: impl Into<String>) -> Self {
        self.stdin = Some(stdin.into());
        self
    }
}

/// Execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Success,
    CompileError,
    RuntimeError,
    ConfigurationError,
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExecutionStatus::Success => "success",
            ExecutionStatus::CompileError => "compile_error",
            ExecutionStatus::RuntimeError => "runtime_error",
            ExecutionStatus::ConfigurationError => "configuration_error",
        };
        f.write_str(s)
    }
}

/// Final outcome of one request, the only value that outlives it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub status: ExecutionStatus,
    /// Trimmed program output on success, a prefixed diagnostic otherwise
    pub text: String,
}

impl ExecutionResult {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            status: ExecutionStatus::Success,
            text: text.into(),
        }
    }

    pub fn compile_error(diagnostic: &str) -> Self {
        Self {
            status: ExecutionStatus::CompileError,
            text: format!("Compilation error: {}", diagnostic),
        }
    }

    pub fn runtime_error(diagnostic: &str) -> Self {
        Self {
            status: ExecutionStatus::RuntimeError,
            text: format!("Execution error: {}", diagnostic),
        }
    }

    pub fn configuration_error(reason: impl fmt::Display) -> Self {
        Self {
            status: ExecutionStatus::ConfigurationError,
            text: format!("Configuration error: {}", reason),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ExecutionStatus::Success
    }
}

/// Raw result of a single supervised process
#[derive(Debug, Clone, Default)]
pub struct ProcessOutcome {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was killed by a signal
    pub exit_code: Option<i32>,
    /// Terminating signal, if any
    pub signal: Option<i32>,
    pub timed_out: bool,
    /// Set when either stream exceeded the capture cap
    pub truncated: bool,
    pub elapsed: Duration,
}

impl ProcessOutcome {
    pub fn success(&self) -> bool {
        !self.timed_out && self.exit_code == Some(0)
    }
}
