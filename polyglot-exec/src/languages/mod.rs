//! Language registry: one declarative [`RunnerSpec`] per supported language.

mod dotnet;
mod interpreted;
mod jvm;
mod native;
mod typescript;

use std::time::Duration;
use tracing::debug;
use which::which;

use crate::{error::Error, template::CommandTemplate, Result};

pub const DEFAULT_COMPILE_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_RUN_TIMEOUT: Duration = Duration::from_secs(5);

/// A fixed auxiliary file written next to the source (project files and the like)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportFile {
    pub name: &'static str,
    pub contents: &'static str,
}

/// How to compile and run one language
#[derive(Debug, Clone, Copy)]
pub struct RunnerSpec {
    pub id: &'static str,
    pub aliases: &'static [&'static str],
    pub display_name: &'static str,
    /// File name of the source inside the request directory
    pub source_file: &'static str,
    /// Text written before the user's source
    pub source_prelude: Option<&'static str>,
    pub support_files: &'static [SupportFile],
    /// Directories created before the compile phase
    pub scratch_dirs: &'static [&'static str],
    /// Environment set for both phases, on top of the engine's
    pub env: &'static [(&'static str, &'static str)],
    pub compile: Option<CommandTemplate>,
    pub run: CommandTemplate,
    pub compile_timeout: Duration,
    pub run_timeout: Duration,
    /// Files or directories produced by compilation, relative to the request directory
    pub artifacts: &'static [&'static str],
}

impl RunnerSpec {
    /// A language run straight from source.
    pub const fn interpreter(
        id: &'static str,
        display_name: &'static str,
        source_file: &'static str,
        run: &'static [&'static str],
    ) -> Self {
        Self {
            id,
            aliases: &[],
            display_name,
            source_file,
            source_prelude: None,
            support_files: &[],
            scratch_dirs: &[],
            env: &[],
            compile: None,
            run: CommandTemplate::new(run),
            compile_timeout: DEFAULT_COMPILE_TIMEOUT,
            run_timeout: DEFAULT_RUN_TIMEOUT,
            artifacts: &[],
        }
    }

    /// A language with a separate build step.
    pub const fn compiled(
        id: &'static str,
        display_name: &'static str,
        source_file: &'static str,
        compile: &'static [&'static str],
        run: &'static [&'static str],
        artifacts: &'static [&'static str],
    ) -> Self {
        Self {
            compile: Some(CommandTemplate::new(compile)),
            artifacts,
            ..Self::interpreter(id, display_name, source_file, run)
        }
    }

    pub fn is_compiled(&self) -> bool {
        self.compile.is_some()
    }

    pub fn matches(&self, language: &str) -> bool {
        self.id.eq_ignore_ascii_case(language)
            || self
                .aliases
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(language))
    }

    pub fn description(&self) -> String {
        if self.is_compiled() {
            format!(
                "Compiles and executes given {} code and returns the output.",
                self.display_name
            )
        } else {
            format!(
                "Executes given {} code and returns the output.",
                self.display_name
            )
        }
    }

    /// Programs that must be on `PATH` for this spec to work.
    pub fn required_tools(&self) -> Vec<&'static str> {
        let mut tools: Vec<&'static str> = self
            .compile
            .iter()
            .chain(std::iter::once(&self.run))
            .filter_map(CommandTemplate::toolchain_program)
            .collect();
        tools.dedup();
        tools
    }

    pub fn check_tools(&self) -> Result<()> {
        for tool in self.required_tools() {
            if which(tool).is_err() {
                debug!("{}: `{}` not found on PATH", self.id, tool);
                return Err(Error::ToolchainMissing {
                    language: self.id.to_string(),
                    program: tool.to_string(),
                });
            }
        }
        Ok(())
    }
}

static BUILTIN: [RunnerSpec; 18] = [
    interpreted::PYTHON,
    interpreted::JAVASCRIPT,
    interpreted::RUBY,
    interpreted::PHP,
    interpreted::BASH,
    interpreted::PERL,
    interpreted::LUA,
    jvm::JAVA,
    native::C,
    native::CPP,
    native::GO,
    native::RUST,
    dotnet::CSHARP,
    jvm::KOTLIN,
    jvm::SCALA,
    native::HASKELL,
    typescript::TYPESCRIPT,
    native::SWIFT,
];

/// Read-only lookup table from language id to spec
#[derive(Debug, Clone)]
pub struct Registry {
    specs: Vec<RunnerSpec>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Registry {
    pub fn builtin() -> Self {
        Self::new(BUILTIN.to_vec())
    }

    pub fn new(specs: Vec<RunnerSpec>) -> Self {
        Self { specs }
    }

    pub fn spec_for(&self, language: &str) -> Result<&RunnerSpec> {
        let language = language.trim();
        self.specs
            .iter()
            .find(|spec| spec.matches(language))
            .ok_or_else(|| Error::UnsupportedLanguage(language.to_string()))
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.specs.iter().map(|spec| spec.id)
    }

    pub fn specs(&self) -> &[RunnerSpec] {
        &self.specs
    }
}

#[cfg(test)]
pub(crate) fn skip_if_not_available(tools: &[&str]) -> bool {
    let missing: Vec<_> = tools
        .iter()
        .filter(|tool| which(**tool).is_err())
        .map(|s| (*s).to_string())
        .collect();

    if !missing.is_empty() {
        eprintln!("Skipping test: {} not available", missing.join(", "));
        return true;
    }
    false
}
