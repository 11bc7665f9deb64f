//! Configuration file loader with multi-source merging

use super::file_config::{ConfigError, FileConfig};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_FILES: [&str; 2] = ["stamp-quorum.toml", ".stamp-quorum.toml"];

/// Environment variables and the config keys they set
const ENV_KEYS: [(&str, &str); 3] = [
    ("VOTABLE_POWER_THRESHOLD", "thresholds.power"),
    ("VOTABLE_MAJORITY_THRESHOLD", "thresholds.majority"),
    ("STAMP_CONCLUDE_IN_HOURS", "sweep.conclude_in_hours"),
];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./stamp-quorum.toml` or `./.stamp-quorum.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/stamp-quorum/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, ConfigError> {
        Self::extract(Self::figment(
            Self::global_config_path().as_deref(),
            config_path.map(PathBuf::as_path),
        ))
    }

    /// Defaults and environment only (for --no-config)
    pub fn load_without_files() -> Result<FileConfig, ConfigError> {
        Self::extract(
            Figment::new()
                .merge(Serialized::defaults(FileConfig::default()))
                .merge(Self::env()),
        )
    }

    fn figment(global: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = global
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Self::env())
    }

    fn env() -> Env {
        let names: Vec<&str> = ENV_KEYS.iter().map(|(name, _)| *name).collect();
        Env::raw().only(&names).map(|key| {
            ENV_KEYS
                .iter()
                .find(|(name, _)| key == *name)
                .map(|(_, path)| (*path).into())
                .unwrap_or_else(|| key.as_str().into())
        })
    }

    fn extract(figment: Figment) -> Result<FileConfig, ConfigError> {
        figment
            .extract()
            .map_err(|e| ConfigError::Load(e.to_string()))
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/stamp-quorum/config.toml if set,
    /// otherwise falls back to ~/.config/stamp-quorum/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("stamp-quorum").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(explicit: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");

        let set: Vec<&str> = ENV_KEYS
            .iter()
            .map(|(name, _)| *name)
            .filter(|name| std::env::var_os(name).is_some())
            .collect();
        if set.is_empty() {
            println!("  [     ] Env:     {}", ENV_KEYS.map(|(name, _)| name).join(", "));
        } else {
            println!("  [FOUND] Env:     {}", set.join(", "));
        }

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:5}] Config:  {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./stamp-quorum.toml or ./.stamp-quorum.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults (no thresholds)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("stamp-quorum"));
    }

    #[test]
    fn test_project_file_is_loaded() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "stamp-quorum.toml",
                "[thresholds]\npower = 10\nmajority = 75\n",
            )?;
            let config = ConfigLoader::extract(ConfigLoader::figment(None, None)).unwrap();
            assert_eq!(config.thresholds.power, Some(10));
            assert_eq!(config.thresholds.majority, Some(75));
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file_overrides_project_file() {
        Jail::expect_with(|jail| {
            jail.create_file(".stamp-quorum.toml", "[thresholds]\npower = 10\nmajority = 75\n")?;
            jail.create_file("custom.toml", "[thresholds]\nmajority = 90\n")?;
            let config = ConfigLoader::extract(ConfigLoader::figment(
                None,
                Some(Path::new("custom.toml")),
            ))
            .unwrap();
            assert_eq!(config.thresholds.power, Some(10));
            assert_eq!(config.thresholds.majority, Some(90));
            Ok(())
        });
    }

    #[test]
    fn test_global_file_is_lowest_file_priority() {
        Jail::expect_with(|jail| {
            jail.create_file("global.toml", "[thresholds]\npower = 1\nmajority = 51\n")?;
            jail.create_file("stamp-quorum.toml", "[thresholds]\npower = 20\n")?;
            let config = ConfigLoader::extract(ConfigLoader::figment(
                Some(Path::new("global.toml")),
                None,
            ))
            .unwrap();
            assert_eq!(config.thresholds.power, Some(20));
            assert_eq!(config.thresholds.majority, Some(51));
            Ok(())
        });
    }

    #[test]
    fn test_legacy_env_names_override_files() {
        Jail::expect_with(|jail| {
            jail.create_file("stamp-quorum.toml", "[thresholds]\npower = 10\nmajority = 75\n")?;
            jail.set_env("VOTABLE_POWER_THRESHOLD", "25");
            jail.set_env("VOTABLE_MAJORITY_THRESHOLD", "80");
            jail.set_env("STAMP_CONCLUDE_IN_HOURS", "48");
            let config = ConfigLoader::extract(ConfigLoader::figment(None, None)).unwrap();
            assert_eq!(config.thresholds.power, Some(25));
            assert_eq!(config.thresholds.majority, Some(80));
            assert_eq!(config.sweep.conclude_in_hours, Some(48));
            Ok(())
        });
    }

    #[test]
    fn test_without_files_reads_env() {
        Jail::expect_with(|jail| {
            jail.create_file("stamp-quorum.toml", "[thresholds]\npower = 10\n")?;
            jail.set_env("VOTABLE_MAJORITY_THRESHOLD", "60");
            let config = ConfigLoader::load_without_files().unwrap();
            assert_eq!(config.thresholds.power, None);
            assert_eq!(config.thresholds.majority, Some(60));
            Ok(())
        });
    }

    #[test]
    fn test_overflowing_env_conclude_age_is_invalid() {
        Jail::expect_with(|jail| {
            jail.set_env("VOTABLE_POWER_THRESHOLD", "10");
            jail.set_env("VOTABLE_MAJORITY_THRESHOLD", "75");
            jail.set_env("STAMP_CONCLUDE_IN_HOURS", "9223372036854775807");
            let config = ConfigLoader::load_without_files().unwrap();
            assert!(matches!(
                config.engine_config(),
                Err(ConfigError::Invalid {
                    field: "sweep.conclude_in_hours",
                    ..
                })
            ));
            Ok(())
        });
    }

    #[test]
    fn test_malformed_file_is_load_error() {
        Jail::expect_with(|jail| {
            jail.create_file("stamp-quorum.toml", "[thresholds]\npower = \"many\"\n")?;
            let err = ConfigLoader::extract(ConfigLoader::figment(None, None)).unwrap_err();
            assert!(matches!(err, ConfigError::Load(_)));
            Ok(())
        });
    }
}
