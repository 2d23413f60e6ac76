//! Argument-vector command templates.
//!
//! Each element of a template is expanded on its own, so user-controlled
//! paths never pass through a shell. Recognised placeholders are `{source}`
//! (absolute path of the source file) and `{workdir}` (the request directory).

use regex::{Captures, Regex};
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use crate::{error::Error, Result};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z_]*)\}").expect("placeholder pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandTemplate {
    argv: &'static [&'static str],
}

impl CommandTemplate {
    pub const fn new(argv: &'static [&'static str]) -> Self {
        Self { argv }
    }

    pub fn program(&self) -> &'static str {
        self.argv.first().copied().unwrap_or("")
    }

    /// A program that must be resolved through `PATH`, as opposed to a
    /// compiled artifact inside the workspace.
    pub fn toolchain_program(&self) -> Option<&'static str> {
        let program = self.program();
        if program.is_empty() || PLACEHOLDER.is_match(program) {
            None
        } else {
            Some(program)
        }
    }

    pub fn expand(&self, ctx: &TemplateContext<'_>) -> Result<ExpandedCommand> {
        let (program, rest) = self.argv.split_first().ok_or_else(|| Error::Template {
            template: String::new(),
            reason: "empty argument vector".to_string(),
        })?;

        let source = path_str(ctx.source, self)?;
        let workdir = path_str(ctx.workdir, self)?;

        let expand_one = |element: &str| -> Result<String> {
            let mut unknown = None;
            let expanded = PLACEHOLDER.replace_all(element, |caps: &Captures<'_>| {
                match &caps[1] {
                    "source" => source.to_string(),
                    "workdir" => workdir.to_string(),
                    other => {
                        unknown.get_or_insert_with(|| other.to_string());
                        String::new()
                    }
                }
            });
            match unknown {
                Some(name) => Err(Error::Template {
                    template: self.to_string(),
                    reason: format!("unknown placeholder {{{}}}", name),
                }),
                None => Ok(expanded.into_owned()),
            }
        };

        Ok(ExpandedCommand {
            program: expand_one(program)?,
            args: rest.iter().map(|a| expand_one(a)).collect::<Result<_>>()?,
        })
    }
}

impl fmt::Display for CommandTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.argv.join(" "))
    }
}

fn path_str<'a>(path: &'a Path, template: &CommandTemplate) -> Result<&'a str> {
    path.to_str().ok_or_else(|| Error::Template {
        template: template.to_string(),
        reason: format!("path is not valid UTF-8: {}", path.display()),
    })
}

/// Values substituted into a template
#[derive(Debug, Clone, Copy)]
pub struct TemplateContext<'a> {
    pub source: &'a Path,
    pub workdir: &'a Path,
}

/// A fully expanded command, ready to spawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ExpandedCommand {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl fmt::Display for ExpandedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
