use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::{
    config::EngineConfig,
    error::Error,
    languages::{Registry, RunnerSpec},
    normalizer::{self, Phase},
    supervisor::Supervisor,
    template::CommandTemplate,
    types::{ExecutionRequest, ExecutionResult, ProcessOutcome},
    workspace::Workspace,
    Result,
};

/// Lifecycle of one request. Terminal states are carried by the returned
/// [`ExecutionResult`]'s status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Idle,
    SourceWritten,
    Compiled,
    Ran,
    Cleaned,
}

/// Drives execution requests through the registry's runner specs.
///
/// Holds no per-request state; clones share the registry and config and can
/// serve requests concurrently.
#[derive(Debug, Clone)]
pub struct Runner {
    registry: Arc<Registry>,
    config: Arc<EngineConfig>,
    supervisor: Supervisor,
}

impl Runner {
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_registry(config, Registry::builtin())
    }

    pub fn with_registry(config: EngineConfig, registry: Registry) -> Result<Self> {
        config.validate()?;
        for language in config.timeouts.keys() {
            if !registry.specs().iter().any(|spec| spec.id == language.as_str()) {
                return Err(Error::Config(format!(
                    "timeouts configured for unknown language: {}",
                    language
                )));
            }
        }

        Ok(Self {
            supervisor: Supervisor::new(&config),
            registry: Arc::new(registry),
            config: Arc::new(config),
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// `execute(language, source)`: the engine's boundary operation.
    pub async fn execute(&self, language: &str, source: &str) -> ExecutionResult {
        self.run(&ExecutionRequest::new(language, source)).await
    }

    /// Run one request to a terminal state. Never fails: every error is
    /// folded into the returned result.
    pub async fn run(&self, request: &ExecutionRequest) -> ExecutionResult {
        let started = Instant::now();
        let result = self.run_request(request).await;
        info!(
            "Execution of {} finished with {} in {:?}",
            request.language,
            result.status,
            started.elapsed()
        );
        result
    }

    async fn run_request(&self, request: &ExecutionRequest) -> ExecutionResult {
        let spec = match self.registry.spec_for(&request.language) {
            Ok(spec) => spec,
            Err(e) => return ExecutionResult::configuration_error(e),
        };
        if let Err(e) = spec.check_tools() {
            return ExecutionResult::configuration_error(e);
        }

        let mut workspace = match Workspace::allocate(spec, &self.config.temp_root).await {
            Ok(workspace) => workspace,
            Err(e) => return ExecutionResult::configuration_error(e),
        };

        let result = self.drive(spec, &workspace, request).await;

        workspace.release().await;
        debug!("workspace {}: {:?}", workspace.id(), RunState::Cleaned);
        result
    }

    async fn drive(
        &self,
        spec: &RunnerSpec,
        workspace: &Workspace,
        request: &ExecutionRequest,
    ) -> ExecutionResult {
        if let Err(e) = workspace.write_source(spec, &request.source).await {
            return ExecutionResult::configuration_error(e);
        }
        transition(workspace, RunState::Idle, RunState::SourceWritten);

        let (compile_timeout, run_timeout) = self.timeouts_for(spec);

        if let Some(compile) = &spec.compile {
            if let Err(failed) = self
                .phase(Phase::Compile, compile, spec, workspace, compile_timeout, None)
                .await
            {
                return failed;
            }
            transition(workspace, RunState::SourceWritten, RunState::Compiled);
        }

        let outcome = match self
            .phase(
                Phase::Run,
                &spec.run,
                spec,
                workspace,
                run_timeout,
                request.stdin.as_deref(),
            )
            .await
        {
            Ok(outcome) => outcome,
            Err(failed) => return failed,
        };
        let previous = if spec.is_compiled() {
            RunState::Compiled
        } else {
            RunState::SourceWritten
        };
        transition(workspace, previous, RunState::Ran);

        ExecutionResult::success(normalizer::success_text(&outcome))
    }

    /// One supervised process. `Err` carries the terminal result of a failed phase.
    async fn phase(
        &self,
        phase: Phase,
        template: &CommandTemplate,
        spec: &RunnerSpec,
        workspace: &Workspace,
        timeout: Duration,
        stdin: Option<&str>,
    ) -> std::result::Result<ProcessOutcome, ExecutionResult> {
        let command = template
            .expand(&workspace.template_context())
            .map_err(ExecutionResult::configuration_error)?;
        debug!("{} {} phase: {}", spec.id, phase, command);

        let outcome = self
            .supervisor
            .run(&command, workspace.root(), timeout, stdin, spec.env)
            .await
            .map_err(|e| match (phase, template.toolchain_program()) {
                // the toolchain was on PATH a moment ago but would not start
                (_, Some(_)) => ExecutionResult::configuration_error(e),
                (Phase::Compile, None) => ExecutionResult::compile_error(&e.to_string()),
                (Phase::Run, None) => ExecutionResult::runtime_error(&e.to_string()),
            })?;

        match normalizer::phase_failure(&outcome, phase, &command.program, timeout) {
            Some(failed) => {
                debug!("{} {} phase failed: {}", spec.id, phase, failed.text);
                Err(failed)
            }
            None => Ok(outcome),
        }
    }

    fn timeouts_for(&self, spec: &RunnerSpec) -> (Duration, Duration) {
        let mut compile = spec.compile_timeout;
        let mut run = spec.run_timeout;
        if let Some(custom) = self.config.timeout_override(spec.id) {
            if let Some(secs) = custom.compile {
                compile = Duration::from_secs(secs);
            }
            if let Some(secs) = custom.run {
                run = Duration::from_secs(secs);
            }
        }
        (compile, run)
    }
}

fn transition(workspace: &Workspace, from: RunState, to: RunState) {
    debug!("workspace {}: {:?} -> {:?}", workspace.id(), from, to);
}
