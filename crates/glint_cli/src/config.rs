//! Glint configuration file handling

use anyhow::{Context, Result};
use glint_effects::EffectsConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked up inside a directory
pub const CONFIG_FILE: &str = "glint.toml";

/// Resolve a file or directory argument to the config file path
pub fn config_path(path: &Path) -> PathBuf {
    if path.is_file() {
        path.to_path_buf()
    } else {
        path.join(CONFIG_FILE)
    }
}

/// Load configuration (looks for glint.toml)
///
/// An explicit path must exist. Without one, `./glint.toml` is used when
/// present and the built-in defaults otherwise.
pub fn load(path: Option<&Path>) -> Result<EffectsConfig> {
    let config_path = match path {
        Some(path) => {
            let config_path = config_path(path);
            if !config_path.exists() {
                anyhow::bail!(
                    "No {} found in {}. Run `glint init` to create one.",
                    CONFIG_FILE,
                    path.display()
                );
            }
            config_path
        }
        None => {
            let local = PathBuf::from(CONFIG_FILE);
            if !local.exists() {
                tracing::debug!("No {} in working directory, using defaults", CONFIG_FILE);
                return Ok(EffectsConfig::default());
            }
            local
        }
    };

    EffectsConfig::load(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))
}

/// Write a default glint.toml into `dir`
pub fn init(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE);
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let content = EffectsConfig::default()
        .to_toml()
        .context("Failed to serialize config")?;
    fs::write(&config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    Ok(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_then_load_round_trips_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let written = init(dir.path(), false).unwrap();
        assert_eq!(written, dir.path().join(CONFIG_FILE));

        let config = load(Some(dir.path())).unwrap();
        assert_eq!(config, EffectsConfig::default());

        // A file path works as well as its directory
        let config = load(Some(&written)).unwrap();
        assert_eq!(config, EffectsConfig::default());
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        init(dir.path(), false).unwrap();
        assert!(init(dir.path(), false).is_err());
        assert!(init(dir.path(), true).is_ok());
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(Some(dir.path())).unwrap_err();
        assert!(err.to_string().contains("glint init"));
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "[text]\nsequential = true\nreveal_direction = \"center\"\n",
        )
        .unwrap();

        let config = load(Some(dir.path())).unwrap();
        assert!(config.text.sequential);
        assert_eq!(config.text.speed_ms, 50.0);
        assert_eq!(config.spark.spark_count, 8);
    }

    #[test]
    fn malformed_config_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "[spark\n").unwrap();

        let err = load(Some(dir.path())).unwrap_err();
        assert!(format!("{err:#}").contains(CONFIG_FILE));
    }
}
