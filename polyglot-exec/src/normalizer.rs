//! Turns raw process outcomes into the text handed back to the caller.

use std::fmt;
use std::time::Duration;

use crate::types::{ExecutionResult, ProcessOutcome};

pub const NO_OUTPUT: &str = "No output";
pub const TRUNCATION_NOTICE: &str = "[output truncated]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Compile,
    Run,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Compile => f.write_str("compilation"),
            Phase::Run => f.write_str("execution"),
        }
    }
}

/// Trimmed stdout, else trimmed stderr, else [`NO_OUTPUT`].
pub fn success_text(outcome: &ProcessOutcome) -> String {
    let stdout = outcome.stdout.trim();
    let stderr = outcome.stderr.trim();
    let text = if !stdout.is_empty() {
        stdout
    } else if !stderr.is_empty() {
        stderr
    } else {
        NO_OUTPUT
    };

    if outcome.truncated {
        format!("{}\n{}", text, TRUNCATION_NOTICE)
    } else {
        text.to_string()
    }
}

/// Failure diagnostic: stderr first, since that is where compilers and
/// runtimes report; otherwise a message describing how the process ended.
pub fn failure_diagnostic(
    outcome: &ProcessOutcome,
    phase: Phase,
    program: &str,
    timeout: Duration,
) -> String {
    let stderr = outcome.stderr.trim();
    let stdout = outcome.stdout.trim();

    if outcome.timed_out {
        let message = format!("{} timed out after {:?}", phase, timeout);
        return if stderr.is_empty() {
            message
        } else {
            format!("{}\n{}", message, stderr)
        };
    }

    if !stderr.is_empty() {
        return stderr.to_string();
    }

    let mut message = match (outcome.exit_code, outcome.signal) {
        (Some(code), _) => format!("`{}` exited with code {}", program, code),
        (None, Some(signal)) => format!("`{}` terminated by signal {}", program, signal),
        (None, None) => format!("`{}` failed", program),
    };
    // some compilers (tsc, dotnet build) report errors on stdout
    if !stdout.is_empty() {
        message.push('\n');
        message.push_str(stdout);
    }
    message
}

/// Classify a finished phase. `None` means the phase succeeded and the
/// runner should move on.
pub fn phase_failure(
    outcome: &ProcessOutcome,
    phase: Phase,
    program: &str,
    timeout: Duration,
) -> Option<ExecutionResult> {
    if outcome.success() {
        return None;
    }
    let diagnostic = failure_diagnostic(outcome, phase, program, timeout);
    Some(match phase {
        Phase::Compile => ExecutionResult::compile_error(&diagnostic),
        Phase::Run => ExecutionResult::runtime_error(&diagnostic),
    })
}
