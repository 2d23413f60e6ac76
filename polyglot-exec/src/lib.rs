//! # Polyglot execution engine
//!
//! Compiles (when needed) and runs single-file programs in 18 languages, each
//! request inside its own throwaway directory, with a wall-clock timeout on
//! every phase and normalized text output.
//!
//! ```no_run
//! # async fn demo() -> polyglot_exec::Result<()> {
//! use polyglot_exec::{EngineConfig, Runner};
//!
//! let runner = Runner::new(EngineConfig::default())?;
//! let result = runner.execute("python", r#"print("Hello from Python!")"#).await;
//! assert_eq!(result.text, "Hello from Python!");
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod languages;
mod normalizer;
mod runner;
mod supervisor;
mod template;
mod types;
mod workspace;

#[cfg(test)]
mod tests;

pub use config::{EngineConfig, ResourceLimits, TimeoutOverride};
pub use error::Error;
pub use languages::{
    Registry, RunnerSpec, SupportFile, DEFAULT_COMPILE_TIMEOUT, DEFAULT_RUN_TIMEOUT,
};
pub use normalizer::{Phase, NO_OUTPUT};
pub use runner::Runner;
pub use supervisor::Supervisor;
pub use template::{CommandTemplate, ExpandedCommand, TemplateContext};
pub use types::{ExecutionRequest, ExecutionResult, ExecutionStatus, ProcessOutcome};
pub use workspace::Workspace;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;
