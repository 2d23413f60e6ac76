//! Languages compiled to a native executable that is then run directly.

use super::RunnerSpec;

pub(super) const C: RunnerSpec = RunnerSpec::compiled(
    "c",
    "C",
    "main.c",
    &["gcc", "{source}", "-o", "{workdir}/main"],
    &["{workdir}/main"],
    &["main"],
);

pub(super) const CPP: RunnerSpec = RunnerSpec {
    aliases: &["c++", "cxx"],
    ..RunnerSpec::compiled(
        "cpp",
        "C++",
        "main.cpp",
        &["g++", "{source}", "-o", "{workdir}/main"],
        &["{workdir}/main"],
        &["main"],
    )
};

pub(super) const GO: RunnerSpec = RunnerSpec {
    aliases: &["golang"],
    ..RunnerSpec::compiled(
        "go",
        "Go",
        "main.go",
        &["go", "build", "-o", "{workdir}/main", "{source}"],
        &["{workdir}/main"],
        &["main"],
    )
};

pub(super) const RUST: RunnerSpec = RunnerSpec {
    aliases: &["rs"],
    ..RunnerSpec::compiled(
        "rust",
        "Rust",
        "main.rs",
        &["rustc", "--edition", "2021", "{source}", "-o", "{workdir}/main"],
        &["{workdir}/main"],
        &["main"],
    )
};

pub(super) const HASKELL: RunnerSpec = RunnerSpec {
    aliases: &["hs"],
    ..RunnerSpec::compiled(
        "haskell",
        "Haskell",
        "Main.hs",
        &["ghc", "{source}", "-outputdir", "{workdir}", "-o", "{workdir}/Main"],
        &["{workdir}/Main"],
        &["Main", "Main.hi", "Main.o"],
    )
};

pub(super) const SWIFT: RunnerSpec = RunnerSpec::compiled(
    "swift",
    "Swift",
    "main.swift",
    &["swiftc", "{source}", "-o", "{workdir}/main"],
    &["{workdir}/main"],
    &["main"],
);
