//! Engine configuration, loadable from TOML.
//!
//! ```toml
//! temp_root = "/var/tmp/polyglot"
//! max_output_bytes = 1048576
//! teardown_grace = 2
//!
//! [limits]
//! cpu_time = 240
//! file_size = 67108864
//!
//! [timeouts.kotlin]
//! compile = 60
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{error::Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Directory under which per-request workspaces are created
    pub temp_root: PathBuf,
    /// Capture cap per stream; bytes beyond it are discarded
    pub max_output_bytes: usize,
    /// How long to wait for pipes to drain after a kill
    #[serde(with = "duration_serde")]
    pub teardown_grace: Duration,
    /// Extra environment variables for every child process
    pub env: BTreeMap<String, String>,
    pub limits: ResourceLimits,
    /// Per-language timeout overrides, keyed by language id
    pub timeouts: BTreeMap<String, TimeoutOverride>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            temp_root: std::env::temp_dir(),
            max_output_bytes: 1024 * 1024,
            teardown_grace: Duration::from_secs(2),
            env: BTreeMap::new(),
            limits: ResourceLimits::default(),
            timeouts: BTreeMap::new(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_output_bytes == 0 {
            return Err(Error::Config("max_output_bytes must be positive".into()));
        }
        for (language, timeouts) in &self.timeouts {
            if timeouts.compile == Some(0) || timeouts.run == Some(0) {
                return Err(Error::Config(format!(
                    "timeouts for {} must be positive",
                    language
                )));
            }
        }
        Ok(())
    }

    /// Override for `language`, if one was configured.
    pub fn timeout_override(&self, language: &str) -> Option<&TimeoutOverride> {
        self.timeouts.get(language)
    }
}

/// Limits applied with `setrlimit` in every child before exec
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResourceLimits {
    /// Maximum CPU time (seconds), summed over every thread of the child.
    /// Multi-threaded compilers (kotlinc, scalac, dotnet) spend several CPU
    /// seconds per wall second, so this must sit well above the longest
    /// phase timeout or they die of SIGXCPU before the timeout fires.
    pub cpu_time: u64,
    /// Maximum size of any file the child writes (bytes)
    pub file_size: u64,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            cpu_time: 240,
            file_size: 64 * 1024 * 1024, // 64MB, room for statically linked binaries
        }
    }
}

/// Phase timeouts in seconds; absent fields keep the registry default
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimeoutOverride {
    #[serde(default)]
    pub compile: Option<u64>,
    #[serde(default)]
    pub run: Option<u64>,
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
