//! JVM languages. Class files land in the request directory, which is also the
//! working directory of both phases, so the classpath is the same for both.

use std::time::Duration;

use super::RunnerSpec;

// kotlinc and scalac boot a JVM of their own before compiling anything
const JVM_COMPILER_TIMEOUT: Duration = Duration::from_secs(30);

pub(super) const JAVA: RunnerSpec = RunnerSpec::compiled(
    "java",
    "Java",
    "Main.java",
    &["javac", "-d", "{workdir}", "{source}"],
    &["java", "-cp", "{workdir}", "Main"],
    &["Main.class"],
);

pub(super) const KOTLIN: RunnerSpec = RunnerSpec {
    aliases: &["kt"],
    compile_timeout: JVM_COMPILER_TIMEOUT,
    ..RunnerSpec::compiled(
        "kotlin",
        "Kotlin",
        "main.kt",
        &["kotlinc", "{source}", "-include-runtime", "-d", "{workdir}/main.jar"],
        &["java", "-jar", "{workdir}/main.jar"],
        &["main.jar"],
    )
};

pub(super) const SCALA: RunnerSpec = RunnerSpec {
    scratch_dirs: &["classes"],
    compile_timeout: JVM_COMPILER_TIMEOUT,
    ..RunnerSpec::compiled(
        "scala",
        "Scala",
        "Main.scala",
        &["scalac", "-d", "{workdir}/classes", "{source}"],
        &["scala", "-classpath", "{workdir}/classes", "Main"],
        &["classes"],
    )
};
