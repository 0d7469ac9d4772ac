use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::cli::OutputFormat;
use crate::constants::{ALL_LANGUAGES, APP_NAME, DEFAULT_TOPIC_PREVIEW, ENV_PREFIX, LOCAL_CONFIG_PATH};
use crate::render::RenderOptions;
use crate::utils::DevhubError;
use crate::view::{LanguageFilter, SortKey, ViewParameters};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Initial view parameters
    #[serde(default)]
    pub view: ViewConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Starting point for the search/sort/filter state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Sort order (updated, stars, forks, name)
    pub sort: SortKey,
    /// Language filter ("All" or an exact language)
    pub language: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            sort: SortKey::default(),
            language: ALL_LANGUAGES.to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format (text, json, markdown)
    pub format: OutputFormat,
    /// Colorize text output
    pub color: bool,
    /// Topics listed per repository before collapsing into "+N"
    pub topic_preview: usize,
    /// List at most this many repositories
    pub max_repositories: Option<usize>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: true,
            topic_preview: DEFAULT_TOPIC_PREVIEW,
            max_repositories: None,
        }
    }
}

impl Config {
    /// View parameters from config, with any command-line values on top
    pub fn view_parameters(
        &self,
        search: Option<&str>,
        language: Option<&str>,
        sort: Option<&str>,
    ) -> std::result::Result<ViewParameters, DevhubError> {
        let sort = match sort {
            Some(key) => key.parse()?,
            None => self.view.sort,
        };
        Ok(ViewParameters {
            search: search.unwrap_or_default().to_string(),
            language: LanguageFilter::parse(language.unwrap_or(self.view.language.as_str())),
            sort,
        })
    }

    /// Render options from config, with any command-line values on top
    pub fn render_options(
        &self,
        format: Option<OutputFormat>,
        limit: Option<usize>,
        no_color: bool,
    ) -> RenderOptions {
        RenderOptions {
            format: format.unwrap_or(self.output.format),
            color: self.output.color && !no_color,
            topic_preview: self.output.topic_preview,
            limit: limit.or(self.output.max_repositories),
        }
    }
}

/// Load configuration from multiple sources
pub fn load_config() -> Result<Config> {
    let config_dir = get_config_dir()?;
    let global_config = config_dir.join("config.toml");
    let local_config = PathBuf::from(LOCAL_CONFIG_PATH);

    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    if global_config.exists() {
        debug!("Using global config {}", global_config.display());
        figment = figment.merge(Toml::file(&global_config));
    }

    if local_config.exists() {
        debug!("Using local config {}", local_config.display());
        figment = figment.merge(Toml::file(&local_config));
    }

    extract(figment)
}

/// Load configuration from one explicit file (plus environment overrides)
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        anyhow::bail!("Config file not found: {}", path.display());
    }
    let figment = Figment::from(Serialized::defaults(Config::default())).merge(Toml::file(path));
    extract(figment)
}

fn extract(figment: Figment) -> Result<Config> {
    // DEVHUB_VIEW__SORT=stars -> view.sort
    figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .context("Failed to load configuration")
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", APP_NAME) {
        Ok(proj_dirs.config_dir().to_path_buf())
    } else {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .context("Could not determine home directory")?;
        Ok(PathBuf::from(home).join(".config").join(APP_NAME))
    }
}

/// Save configuration to file
pub fn save_config(config: &Config, path: Option<PathBuf>) -> Result<()> {
    let path = match path {
        Some(p) => p,
        None => get_config_dir()?.join("config.toml"),
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let toml_string = toml::to_string_pretty(config)?;
    std::fs::write(&path, toml_string)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(())
}

/// Create a default configuration file if it doesn't exist
pub fn init_config() -> Result<()> {
    let config_file = get_config_dir()?.join("config.toml");

    if !config_file.exists() {
        save_config(&Config::default(), Some(config_file.clone()))?;
        info!("Created default configuration at {}", config_file.display());
        println!("Created default configuration at: {}", config_file.display());
    }

    let local_example = PathBuf::from(format!("{}.example", LOCAL_CONFIG_PATH));
    if !local_example.exists() {
        if let Some(parent) = local_example.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let example_config = r#"# DevHub Project Configuration
# This file overrides global settings for this directory

[view]
sort = "stars"
language = "All"

[output]
format = "text"
color = true
topic_preview = 3
# max_repositories = 20
"#;
        std::fs::write(&local_example, example_config)?;
        println!("Created example configuration at: {}", local_example.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.view.sort = SortKey::Forks;
        config.view.language = "Rust".to_string();
        config.output.format = OutputFormat::Json;
        config.output.max_repositories = Some(10);

        save_config(&config, Some(path.clone())).unwrap();
        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[view]\nsort = \"by-name\"\nlanguage = \"Go\"\n").unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.view.sort, SortKey::Name);
        assert_eq!(loaded.output, OutputConfig::default());
    }

    #[test]
    fn test_unknown_sort_key_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[view]\nsort = \"popularity\"\nlanguage = \"All\"\n").unwrap();

        assert!(load_config_from(&path).is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(load_config_from(Path::new("/no/such/devhub.toml")).is_err());
    }

    #[test]
    fn test_view_parameters_overrides() {
        let mut config = Config::default();
        config.view.sort = SortKey::Stars;
        config.view.language = "Go".to_string();

        let params = config.view_parameters(None, None, None).unwrap();
        assert_eq!(params.sort, SortKey::Stars);
        assert_eq!(params.language, LanguageFilter::Only("Go".to_string()));
        assert_eq!(params.search, "");

        let params = config
            .view_parameters(Some("cli"), Some("All"), Some("name"))
            .unwrap();
        assert_eq!(params.sort, SortKey::Name);
        assert_eq!(params.language, LanguageFilter::All);
        assert_eq!(params.search, "cli");

        assert!(config.view_parameters(None, None, Some("size")).is_err());
    }

    #[test]
    fn test_render_options_overrides() {
        let mut config = Config::default();
        config.output.max_repositories = Some(25);

        let options = config.render_options(None, None, false);
        assert_eq!(options.format, OutputFormat::Text);
        assert!(options.color);
        assert_eq!(options.limit, Some(25));

        let options = config.render_options(Some(OutputFormat::Json), Some(5), true);
        assert_eq!(options.format, OutputFormat::Json);
        assert!(!options.color);
        assert_eq!(options.limit, Some(5));
    }
}
