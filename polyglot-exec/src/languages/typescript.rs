use super::RunnerSpec;

// tsc reports type errors on stdout; the runner falls back to stdout when
// stderr is empty.
pub(super) const TYPESCRIPT: RunnerSpec = RunnerSpec {
    aliases: &["ts"],
    ..RunnerSpec::compiled(
        "typescript",
        "TypeScript",
        "main.ts",
        &["tsc", "--outDir", "{workdir}", "{source}"],
        &["node", "{workdir}/main.js"],
        &["main.js"],
    )
};
