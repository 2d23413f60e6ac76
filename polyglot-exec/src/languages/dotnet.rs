use std::time::Duration;

use super::{RunnerSpec, SupportFile};

const PROJECT: SupportFile = SupportFile {
    name: "Program.csproj",
    contents: r#"<Project Sdk="Microsoft.NET.Sdk">
  <PropertyGroup>
    <OutputType>Exe</OutputType>
    <TargetFramework>net8.0</TargetFramework>
    <AssemblyName>Program</AssemblyName>
    <ImplicitUsings>enable</ImplicitUsings>
  </PropertyGroup>
</Project>
"#,
};

pub(super) const CSHARP: RunnerSpec = RunnerSpec {
    aliases: &["cs", "c#"],
    support_files: &[PROJECT],
    env: &[("DOTNET_CLI_TELEMETRY_OPTOUT", "1"), ("DOTNET_NOLOGO", "1")],
    compile_timeout: Duration::from_secs(15),
    run_timeout: Duration::from_secs(10),
    ..RunnerSpec::compiled(
        "csharp",
        "C#",
        "Program.cs",
        &["dotnet", "build", "{workdir}", "--nologo", "-o", "{workdir}/bin"],
        &["dotnet", "{workdir}/bin/Program.dll"],
        &["bin", "obj"],
    )
};
