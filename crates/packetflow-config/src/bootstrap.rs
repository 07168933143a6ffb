use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::paths::Paths;

/// Process-wide bootstrap configuration: the env/file-driven settings
/// read once at startup.
/// Loaded once at startup; unlike [`crate::ConfigRecord`] this is not
/// versioned or hot-reloadable — restart the process to pick up changes,
/// matching `kimberlite-config::KimberliteConfig`'s role.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    pub health_check_interval_ms: u64,
    pub metrics_collection_interval_ms: u64,
    pub retention_period_ms: u64,
    pub business_hours_start: u32,
    pub business_hours_end: u32,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            health_check_interval_ms: 30_000,
            metrics_collection_interval_ms: 60_000,
            retention_period_ms: 3_600_000,
            business_hours_start: 9,
            business_hours_end: 17,
        }
    }
}

impl BootstrapConfig {
    /// Loads from default locations: built-in defaults → user config file
    /// → project `packetflow.toml` → project `packetflow.local.toml` →
    /// `PACKETFLOW_*` environment variables, in ascending precedence —
    /// the same five-source layering `kimberlite-config::ConfigLoader`
    /// performs (minus CLI args, which the core does not parse itself).
    pub fn load() -> Result<Self, ConfigError> {
        let project_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::load_from_dir(&project_dir)
    }

    pub fn load_from_dir(project_dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let project_dir = project_dir.as_ref();
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&Self::default())?);

        let paths = Paths::new();
        if let Ok(user_config_file) = paths.user_config_file() {
            if user_config_file.exists() {
                builder = builder.add_source(
                    config::File::from(user_config_file)
                        .required(false)
                        .format(config::FileFormat::Toml),
                );
            }
        }

        let project_config_file = Paths::project_config_file(project_dir);
        if project_config_file.exists() {
            builder = builder.add_source(
                config::File::from(project_config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        let local_config_file = Paths::local_config_file(project_dir);
        if local_config_file.exists() {
            builder = builder.add_source(
                config::File::from(local_config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        builder = builder.add_source(
            config::Environment::with_prefix("PACKETFLOW")
                .separator("_")
                .try_parsing(true),
        );

        let built = builder.build()?;
        Ok(built.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec_values() {
        let cfg = BootstrapConfig::default();
        assert_eq!(cfg.health_check_interval_ms, 30_000);
        assert_eq!(cfg.metrics_collection_interval_ms, 60_000);
        assert_eq!(cfg.retention_period_ms, 3_600_000);
        assert_eq!(cfg.business_hours_start, 9);
        assert_eq!(cfg.business_hours_end, 17);
    }

    #[test]
    fn project_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("packetflow.toml"),
            "health_check_interval_ms = 5000\n",
        )
        .unwrap();

        let cfg = BootstrapConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(cfg.health_check_interval_ms, 5000);
        assert_eq!(cfg.metrics_collection_interval_ms, 60_000);
    }
}
