use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub github: GithubConfig,
    pub paths: PathsConfig,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub api_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub templates: PathBuf,
    pub output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            templates: PathBuf::from("templates"),
            output: PathBuf::from("output"),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config.paths.templates, PathBuf::from("templates"));
        assert_eq!(config.paths.output, PathBuf::from("output"));
        assert!(config.github.owner.is_none());
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config: Config = toml::from_str(
            r#"
            [github]
            owner = "acme"
            repo = "widgets"

            [paths]
            output = "site"
            "#,
        )
        .unwrap();

        assert_eq!(config.github.owner.as_deref(), Some("acme"));
        assert_eq!(config.github.repo.as_deref(), Some("widgets"));
        assert_eq!(config.paths.output, PathBuf::from("site"));
        assert_eq!(config.paths.templates, PathBuf::from("templates"));
    }

    #[test]
    fn load_reports_the_path_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports.toml");
        std::fs::write(&path, "[paths\n").unwrap();

        let err = Config::load(&path).unwrap_err();

        assert!(err.to_string().contains("reports.toml"));
    }
}
