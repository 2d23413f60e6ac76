pub mod defaults {
    use crate::{config::TimeoutOverride, EngineConfig, Runner};
    use std::path::Path;
    use tempfile::TempDir;

    pub fn test_config(temp_root: &Path) -> EngineConfig {
        EngineConfig {
            temp_root: temp_root.to_path_buf(),
            ..EngineConfig::default()
        }
    }

    pub fn setup_test_runner(temp: &TempDir) -> Runner {
        Runner::new(test_config(temp.path())).expect("default config is valid")
    }

    /// A runner whose run phase gives up after one second, for loop tests.
    pub fn setup_impatient_runner(temp: &TempDir) -> Runner {
        let mut config = test_config(temp.path());
        for spec in crate::Registry::builtin().specs() {
            config.timeouts.insert(
                spec.id.to_string(),
                TimeoutOverride {
                    compile: None,
                    run: Some(1),
                },
            );
        }
        Runner::new(config).expect("timeout overrides are valid")
    }
}

pub mod checks {
    use crate::{ExecutionStatus, Registry};
    use std::path::Path;

    pub fn assert_workspace_clean(temp_root: &Path) {
        let leftovers: Vec<_> = std::fs::read_dir(temp_root)
            .expect("temp root exists")
            .map(|e| e.map(|e| e.path()))
            .collect();
        assert!(leftovers.is_empty(), "leftover files: {:?}", leftovers);
    }

    pub fn assert_status(actual: ExecutionStatus, expected: ExecutionStatus, text: &str) {
        assert_eq!(actual, expected, "unexpected status, text: {}", text);
    }

    /// `true` when the language's toolchain is missing and the test should be skipped
    pub fn skip_language(language: &str) -> bool {
        let registry = Registry::builtin();
        let spec = registry.spec_for(language).expect("registered language");
        crate::languages::skip_if_not_available(&spec.required_tools())
    }
}
