use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::PodReportError;
use crate::manifest::MANIFEST_FILE;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub viewer: ViewerConfig,
    pub generate: GenerateConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Directory path or `http(s)://` base URL the reports are read from.
    pub source: String,
    pub manifest: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateConfig {
    pub kubectl: String,
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub filter: String,
    pub json: bool,
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub config_path: PathBuf,
    /// Log file of the interactive viewer when `logging.file` is unset.
    pub log_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn default_config() -> Self {
        Self {
            viewer: ViewerConfig {
                source: "output".to_string(),
                manifest: MANIFEST_FILE.to_string(),
            },
            generate: GenerateConfig {
                kubectl: "kubectl".to_string(),
                output_dir: PathBuf::from("output"),
            },
            logging: LoggingConfig {
                filter: "info".to_string(),
                json: false,
                file: None,
            },
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        let output = toml::to_string_pretty(self).context("render config TOML")?;
        Ok(output)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("read config at {}", path.display()))?;
        Self::from_toml_str(&contents)
    }

    /// Loads `path` when it exists, otherwise falls back to the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default_config());
        }
        Self::load(path)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create config dir {}", parent.display()))?;
        }
        let contents = self.to_toml_string()?;
        fs::write(path, contents).with_context(|| format!("write config at {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), PodReportError> {
        if self.viewer.source.trim().is_empty() {
            return Err(PodReportError::InvalidConfig(
                "viewer.source must not be empty".to_string(),
            ));
        }
        if self.viewer.manifest.trim().is_empty() {
            return Err(PodReportError::InvalidConfig(
                "viewer.manifest must not be empty".to_string(),
            ));
        }
        if self.generate.kubectl.trim().is_empty() {
            return Err(PodReportError::InvalidConfig(
                "generate.kubectl must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl ConfigPaths {
    pub fn resolve() -> Result<Self> {
        let project_dirs = ProjectDirs::from("io", "podreport", "podreport")
            .ok_or_else(|| anyhow::anyhow!("unable to determine project directories"))?;
        let config_dir = project_dirs.config_dir();
        Ok(Self {
            config_path: config_dir.join("config.toml"),
            log_path: project_dirs.data_dir().join("podreport.log"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = Config::default_config();
        let rendered = config.to_toml_string().unwrap();
        let parsed = Config::from_toml_str(&rendered).unwrap();
        assert_eq!(parsed.viewer.source, "output");
        assert_eq!(parsed.viewer.manifest, MANIFEST_FILE);
        assert_eq!(parsed.generate.kubectl, "kubectl");
        assert!(parsed.logging.file.is_none());
    }

    #[test]
    fn rejects_empty_manifest_name() {
        let mut config = Config::default_config();
        config.viewer.manifest = "  ".to_string();
        let rendered = config.to_toml_string().unwrap();
        let err = Config::from_toml_str(&rendered).unwrap_err();
        assert!(format!("{err:#}").contains("viewer.manifest"));
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.generate.output_dir, PathBuf::from("output"));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default_config();
        config.viewer.source = "https://reports.example.com/output/".to_string();
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.viewer.source, "https://reports.example.com/output/");
    }
}
