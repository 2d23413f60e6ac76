//! Languages run directly from the source file.

use super::RunnerSpec;

pub(super) const PYTHON: RunnerSpec = RunnerSpec {
    aliases: &["py", "python3"],
    ..RunnerSpec::interpreter("python", "Python", "main.py", &["python3", "{source}"])
};

pub(super) const JAVASCRIPT: RunnerSpec = RunnerSpec {
    aliases: &["js", "node"],
    ..RunnerSpec::interpreter("javascript", "JavaScript", "main.js", &["node", "{source}"])
};

pub(super) const RUBY: RunnerSpec = RunnerSpec {
    aliases: &["rb"],
    ..RunnerSpec::interpreter("ruby", "Ruby", "script.rb", &["ruby", "{source}"])
};

pub(super) const PHP: RunnerSpec =
    RunnerSpec::interpreter("php", "PHP", "script.php", &["php", "{source}"]);

pub(super) const BASH: RunnerSpec = RunnerSpec {
    aliases: &["sh", "shell"],
    source_prelude: Some("#!/bin/bash\n"),
    ..RunnerSpec::interpreter("bash", "Bash", "script.sh", &["bash", "{source}"])
};

pub(super) const PERL: RunnerSpec = RunnerSpec {
    aliases: &["pl"],
    ..RunnerSpec::interpreter("perl", "Perl", "script.pl", &["perl", "{source}"])
};

pub(super) const LUA: RunnerSpec =
    RunnerSpec::interpreter("lua", "Lua", "script.lua", &["lua", "{source}"]);
