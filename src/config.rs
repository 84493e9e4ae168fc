//! Benchmark configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`RIGID4_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use rigid4_math::Vec4;

use crate::chains::Chain;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Timing configuration
    #[serde(default)]
    pub bench: BenchConfig,
    /// Cross-chain verification configuration
    #[serde(default)]
    pub verify: VerifyConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`RIGID4_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // RIGID4_BENCH__TRIALS=1000 -> bench.trials = 1000
        figment = figment.merge(Env::prefixed("RIGID4_").split("__"));

        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the benchmark cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bench.trials == 0 {
            return Err(ConfigError::invalid("bench.trials must be at least 1"));
        }
        if self.bench.chains.is_empty() {
            return Err(ConfigError::invalid("bench.chains must name at least one chain"));
        }
        if !(self.verify.tolerance.is_finite() && self.verify.tolerance > 0.0) {
            return Err(ConfigError::invalid(format!(
                "verify.tolerance must be a positive number, got {}",
                self.verify.tolerance
            )));
        }
        Ok(())
    }
}

/// Timing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Trials per chain
    pub trials: usize,
    /// Chains to time, in order
    pub chains: Vec<Chain>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            trials: 50_000,
            chains: Chain::ALL.to_vec(),
        }
    }
}

/// Cross-chain verification configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyConfig {
    /// Check that all chains agree before timing them
    pub enabled: bool,
    /// Allowed difference, relative to the result's magnitude
    pub tolerance: f32,
    /// Points and directions [x, y, z, w] to push through each chain
    pub probe_points: Vec<[f32; 4]>,
}

impl VerifyConfig {
    /// Probe points as vectors
    pub fn points(&self) -> Vec<Vec4> {
        self.probe_points.iter().copied().map(Vec4::from).collect()
    }
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tolerance: 1e-4,
            probe_points: vec![
                [0.0, 0.0, 0.0, 1.0],
                [1.0, 2.0, 3.0, 1.0],
                [-5.0, 0.5, 10.0, 1.0],
                [0.0, 1.0, 0.0, 0.0],
            ],
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Print each chain's composed matrix
    pub print_results: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            print_results: false,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    /// A setting that parsed but cannot be used
    pub fn invalid(message: impl Into<String>) -> Self {
        ConfigError {
            message: message.into(),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
