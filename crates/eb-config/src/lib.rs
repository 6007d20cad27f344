//! Configuration management for block decorators.
//!
//! Parses `blocks.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories. Every section is
//! optional; omitted keys fall back to the conventions of the authoring
//! system (`section` wrappers, `data-tab-label`, `showall`, and so on).
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [tabs]
//! id_prefix = "tabs"
//! show_all_label = "All"
//!
//! [teaser]
//! ctas_class = "teaser-ctas"
//!
//! [instrumentation]
//! prefixes = ["data-aue-", "data-richtext-"]
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the label of the synthesized show-all tab.
    pub show_all_label: Option<String>,
    /// Override the tab id namespace base.
    pub tabs_id_prefix: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "blocks.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Page-level block discovery.
    pub page: PageConfig,
    /// Tab-list decorator settings.
    pub tabs: TabsConfig,
    /// Teaser decorator settings.
    pub teaser: TeaserConfig,
    /// Instrumentation metadata carried across DOM moves.
    pub instrumentation: InstrumentationConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Page-level block discovery configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Class marking an element as a decoratable block.
    pub block_class: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            block_class: "block".to_owned(),
        }
    }
}

/// Tab-list decorator configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TabsConfig {
    /// Base of the per-list id namespace (`tabs` yields `tabs-1`, `tabs-2`, ...).
    pub id_prefix: String,
    /// Class of the section wrapper enclosing the block and its panels.
    pub section_class: String,
    /// Dataset key carrying a panel section's tab label (`tabLabel` reads
    /// `data-tab-label`).
    pub label_attribute: String,
    /// Block class that requests a leading "show all" tab.
    pub show_all_class: String,
    /// Label of the synthesized show-all tab.
    pub show_all_label: String,
    /// Class added to every converted tab panel.
    pub panel_class: String,
}

impl Default for TabsConfig {
    fn default() -> Self {
        Self {
            id_prefix: "tabs".to_owned(),
            section_class: "section".to_owned(),
            label_attribute: "tabLabel".to_owned(),
            show_all_class: "showall".to_owned(),
            show_all_label: "All".to_owned(),
            panel_class: "hidden".to_owned(),
        }
    }
}

/// Teaser decorator configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TeaserConfig {
    /// Class added to the media child.
    pub media_class: String,
    /// Class added to the content child.
    pub content_class: String,
    /// Class of the generated call-to-action list.
    pub ctas_class: String,
    /// Class of the paragraph holding a call-to-action button.
    pub button_container_class: String,
}

impl Default for TeaserConfig {
    fn default() -> Self {
        Self {
            media_class: "teaser-media".to_owned(),
            content_class: "teaser-content".to_owned(),
            ctas_class: "teaser-ctas".to_owned(),
            button_container_class: "button-container".to_owned(),
        }
    }
}

/// Instrumentation metadata configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct InstrumentationConfig {
    /// Attribute name prefixes moved from a source element to its replacement.
    pub prefixes: Vec<String>,
}

impl Default for InstrumentationConfig {
    fn default() -> Self {
        Self {
            prefixes: vec!["data-aue-".to_owned(), "data-richtext-".to_owned()],
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a class-like token: non-empty and free of whitespace.
fn require_token(value: &str, field: &str) -> Result<(), ConfigError> {
    require_non_empty(value, field)?;
    if value.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "{field} must not contain whitespace"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `blocks.toml` in current directory and parents,
    /// falling back to defaults.
    ///
    /// CLI settings are applied last and take precedence over file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(label) = &settings.show_all_label {
            self.tabs.show_all_label.clone_from(label);
        }
        if let Some(prefix) = &settings.tabs_id_prefix {
            self.tabs.id_prefix.clone_from(prefix);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_token(&self.page.block_class, "page.block_class")?;
        self.validate_tabs()?;
        self.validate_teaser()?;
        self.validate_instrumentation()?;
        Ok(())
    }

    fn validate_tabs(&self) -> Result<(), ConfigError> {
        let tabs = &self.tabs;
        require_token(&tabs.id_prefix, "tabs.id_prefix")?;
        require_token(&tabs.section_class, "tabs.section_class")?;
        require_token(&tabs.label_attribute, "tabs.label_attribute")?;
        require_token(&tabs.show_all_class, "tabs.show_all_class")?;
        require_non_empty(&tabs.show_all_label, "tabs.show_all_label")?;
        require_token(&tabs.panel_class, "tabs.panel_class")?;

        // Panel ids read "{id_prefix}-{n}-panel-{slug}"; keep the marker unambiguous
        if tabs.id_prefix.contains("-panel-") || tabs.id_prefix.ends_with("-panel") {
            return Err(ConfigError::Validation(
                "tabs.id_prefix cannot contain \"-panel-\" or end with \"-panel\"".to_owned(),
            ));
        }

        Ok(())
    }

    fn validate_teaser(&self) -> Result<(), ConfigError> {
        let teaser = &self.teaser;
        require_token(&teaser.media_class, "teaser.media_class")?;
        require_token(&teaser.content_class, "teaser.content_class")?;
        require_token(&teaser.ctas_class, "teaser.ctas_class")?;
        require_token(&teaser.button_container_class, "teaser.button_container_class")?;
        Ok(())
    }

    fn validate_instrumentation(&self) -> Result<(), ConfigError> {
        for prefix in &self.instrumentation.prefixes {
            require_token(prefix, "instrumentation.prefixes")?;
        }
        Ok(())
    }
}
