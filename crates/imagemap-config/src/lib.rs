//! Configuration management for imagemap.
//!
//! Parses `imagemap.toml` with serde and discovers the file in the current
//! directory or its parents. CLI settings can be applied during load via
//! [`CliSettings`].
//!
//! ```toml
//! [scripts]
//! jquery_url = "https://cdn.example.com/jquery.min.js"
//! mapster_url = "https://cdn.example.com/jquery.imagemapster.min.js"
//!
//! [panel]
//! default_description = "Click a highlighted part for details."
//! height = 200
//!
//! [highlight]
//! fill_opacity = 0.2
//! fill_color = "00ff00"
//!
//! [attachments]
//! dir = "attachments"
//! url_prefix = "${ATTACHMENT_URL:-/attachments}"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `${VAR}` and `${VAR:-default}` are expanded in `scripts.jquery_url`,
//! `scripts.mapster_url` and `attachments.url_prefix`.

mod expand;

use std::path::{Path, PathBuf};

use imagemap_renderer::{
    DEFAULT_DESCRIPTION, DEFAULT_JQUERY_URL, DEFAULT_MAPSTER_URL, HighlightStyle, TemplateOptions,
};
use serde::Deserialize;

/// CLI settings that override configuration file values.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override attachments directory.
    pub attachments_dir: Option<PathBuf>,
    /// Override attachment URL prefix.
    pub url_prefix: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "imagemap.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Script locations.
    pub scripts: ScriptsConfig,
    /// Description panel.
    pub panel: PanelConfig,
    /// Highlight style.
    pub highlight: HighlightConfig,
    /// Attachment settings (paths are relative strings from TOML).
    attachments: AttachmentsConfigRaw,

    /// Resolved attachment settings (set after loading).
    #[serde(skip)]
    pub attachments_resolved: AttachmentsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Script locations.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ScriptsConfig {
    /// DOM-query library.
    pub jquery_url: String,
    /// Image map interaction library.
    pub mapster_url: String,
}

impl Default for ScriptsConfig {
    fn default() -> Self {
        Self {
            jquery_url: DEFAULT_JQUERY_URL.to_owned(),
            mapster_url: DEFAULT_MAPSTER_URL.to_owned(),
        }
    }
}

/// Description panel configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Text shown while no area is selected.
    pub default_description: String,
    /// Panel height in pixels.
    pub height: u32,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            default_description: DEFAULT_DESCRIPTION.to_owned(),
            height: 200,
        }
    }
}

/// Highlight style configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Fill opacity (0.0 to 1.0).
    pub fill_opacity: f64,
    /// Fill colour as six hex digits.
    pub fill_color: String,
    /// Whether to draw an outline.
    pub stroke: bool,
    /// Outline colour as six hex digits.
    pub stroke_color: String,
    /// Outline opacity (0.0 to 1.0).
    pub stroke_opacity: f64,
    /// Outline width in pixels.
    pub stroke_width: u32,
    /// Whether selecting an area deselects the others.
    pub single_select: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        let style = HighlightStyle::default();
        Self {
            fill_opacity: style.fill_opacity,
            fill_color: style.fill_color,
            stroke: style.stroke,
            stroke_color: style.stroke_color,
            stroke_opacity: style.stroke_opacity,
            stroke_width: style.stroke_width,
            single_select: style.single_select,
        }
    }
}

/// Raw attachment configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct AttachmentsConfigRaw {
    dir: Option<String>,
    url_prefix: Option<String>,
}

/// Resolved attachment configuration.
#[derive(Debug, Default)]
pub struct AttachmentsConfig {
    /// Root directory holding one subdirectory per page.
    pub dir: PathBuf,
    /// URL prefix under which attachments are served.
    pub url_prefix: String,
}

/// Default attachment URL prefix.
const DEFAULT_URL_PREFIX: &str = "/attachments";

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
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`attachments.url_prefix`").
        field: String,
        /// Error message.
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require an opacity within `0.0..=1.0`.
fn require_unit_interval(value: f64, field: &str) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::Validation(format!(
            "{field} must be between 0.0 and 1.0"
        )));
    }
    Ok(())
}

/// Require a colour written as six hex digits.
fn require_hex_color(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.len() != 6 || !value.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ConfigError::Validation(format!(
            "{field} must be six hex digits (e.g. \"00ff00\")"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `imagemap.toml` in the current directory and its parents, falling
    /// back to defaults.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
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
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Template options for the renderer.
    #[must_use]
    pub fn template_options(&self) -> TemplateOptions {
        TemplateOptions {
            jquery_url: self.scripts.jquery_url.clone(),
            mapster_url: self.scripts.mapster_url.clone(),
            default_description: self.panel.default_description.clone(),
            panel_height: self.panel.height,
            highlight: HighlightStyle {
                fill_opacity: self.highlight.fill_opacity,
                fill_color: self.highlight.fill_color.clone(),
                stroke: self.highlight.stroke,
                stroke_color: self.highlight.stroke_color.clone(),
                stroke_opacity: self.highlight.stroke_opacity,
                stroke_width: self.highlight.stroke_width,
                single_select: self.highlight.single_select,
            },
        }
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(dir) = &settings.attachments_dir {
            self.attachments_resolved.dir.clone_from(dir);
        }
        if let Some(prefix) = &settings.url_prefix {
            self.attachments_resolved.url_prefix.clone_from(prefix);
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

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            scripts: ScriptsConfig::default(),
            panel: PanelConfig::default(),
            highlight: HighlightConfig::default(),
            attachments: AttachmentsConfigRaw::default(),
            attachments_resolved: AttachmentsConfig {
                dir: base.join("attachments"),
                url_prefix: DEFAULT_URL_PREFIX.to_owned(),
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
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
        self.validate_scripts()?;
        self.validate_panel()?;
        self.validate_highlight()?;
        Ok(())
    }

    fn validate_scripts(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.scripts.jquery_url, "scripts.jquery_url")?;
        require_non_empty(&self.scripts.mapster_url, "scripts.mapster_url")?;
        Ok(())
    }

    fn validate_panel(&self) -> Result<(), ConfigError> {
        if self.panel.height == 0 {
            return Err(ConfigError::Validation(
                "panel.height must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_highlight(&self) -> Result<(), ConfigError> {
        const MAX_STROKE_WIDTH: u32 = 100;

        let highlight = &self.highlight;
        require_unit_interval(highlight.fill_opacity, "highlight.fill_opacity")?;
        require_unit_interval(highlight.stroke_opacity, "highlight.stroke_opacity")?;
        require_hex_color(&highlight.fill_color, "highlight.fill_color")?;
        require_hex_color(&highlight.stroke_color, "highlight.stroke_color")?;
        if highlight.stroke_width > MAX_STROKE_WIDTH {
            return Err(ConfigError::Validation(format!(
                "highlight.stroke_width cannot exceed {MAX_STROKE_WIDTH}"
            )));
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.scripts.jquery_url = expand::expand_env(&self.scripts.jquery_url, "scripts.jquery_url")?;
        self.scripts.mapster_url =
            expand::expand_env(&self.scripts.mapster_url, "scripts.mapster_url")?;

        if let Some(ref prefix) = self.attachments.url_prefix {
            self.attachments.url_prefix =
                Some(expand::expand_env(prefix, "attachments.url_prefix")?);
        }

        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.attachments_resolved = AttachmentsConfig {
            dir: config_dir.join(self.attachments.dir.as_deref().unwrap_or("attachments")),
            url_prefix: self
                .attachments
                .url_prefix
                .clone()
                .unwrap_or_else(|| DEFAULT_URL_PREFIX.to_owned()),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.scripts.jquery_url, DEFAULT_JQUERY_URL);
        assert_eq!(config.panel.height, 200);
        assert_eq!(
            config.attachments_resolved.dir,
            PathBuf::from("/test/attachments")
        );
        assert_eq!(config.attachments_resolved.url_prefix, "/attachments");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_template_options_match_renderer() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.template_options(), TemplateOptions::default());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.scripts.mapster_url, DEFAULT_MAPSTER_URL);
        assert_eq!(config.highlight.fill_color, "00ff00");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[scripts]
jquery_url = "/static/jquery.js"
mapster_url = "/static/mapster.js"

[panel]
default_description = "Pick a part"
height = 150

[highlight]
fill_opacity = 0.5
fill_color = "ff0000"
stroke = false
stroke_color = "0000ff"
stroke_opacity = 1.0
stroke_width = 2
single_select = false
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let options = config.template_options();
        assert_eq!(options.jquery_url, "/static/jquery.js");
        assert_eq!(options.mapster_url, "/static/mapster.js");
        assert_eq!(options.default_description, "Pick a part");
        assert_eq!(options.panel_height, 150);
        assert_eq!(
            options.highlight,
            HighlightStyle {
                fill_opacity: 0.5,
                fill_color: "ff0000".to_owned(),
                stroke: false,
                stroke_color: "0000ff".to_owned(),
                stroke_opacity: 1.0,
                stroke_width: 2,
                single_select: false,
            }
        );
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[attachments]
dir = "files"
url_prefix = "https://wiki.example.com/files"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(
            config.attachments_resolved.dir,
            PathBuf::from("/project/files")
        );
        assert_eq!(
            config.attachments_resolved.url_prefix,
            "https://wiki.example.com/files"
        );
    }

    #[test]
    fn test_resolve_paths_defaults() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(
            config.attachments_resolved.dir,
            PathBuf::from("/project/attachments")
        );
        assert_eq!(config.attachments_resolved.url_prefix, "/attachments");
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings {
            attachments_dir: Some(PathBuf::from("/elsewhere")),
            ..Default::default()
        });
        assert_eq!(config.attachments_resolved.dir, PathBuf::from("/elsewhere"));
        assert_eq!(config.attachments_resolved.url_prefix, "/attachments");

        config.apply_cli_settings(&CliSettings {
            url_prefix: Some("/files".to_owned()),
            ..Default::default()
        });
        assert_eq!(config.attachments_resolved.url_prefix, "/files");
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("IMAGEMAP_CFG_TEST_HOST", "files.example.com");
        }
        let toml = r#"
[scripts]
jquery_url = "https://${IMAGEMAP_CFG_TEST_HOST}/jquery.js"

[attachments]
url_prefix = "https://${IMAGEMAP_CFG_TEST_HOST}/att"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();
        config.resolve_paths(Path::new("/p"));
        assert_eq!(
            config.scripts.jquery_url,
            "https://files.example.com/jquery.js"
        );
        assert_eq!(
            config.attachments_resolved.url_prefix,
            "https://files.example.com/att"
        );
        unsafe {
            std::env::remove_var("IMAGEMAP_CFG_TEST_HOST");
        }
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/imagemap.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[attachments]\ndir = \"att\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.attachments_resolved.dir, temp_dir.path().join("att"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_applies_cli_settings_last() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[attachments]\nurl_prefix = \"/from-file\"\n").unwrap();

        let settings = CliSettings {
            url_prefix: Some("/from-cli".to_owned()),
            ..Default::default()
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();
        assert_eq!(config.attachments_resolved.url_prefix, "/from-cli");
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[panel]\nheight = 0\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_reports_toml_errors() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[panel\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    // Validation tests

    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_empty_script_url() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.scripts.mapster_url = String::new();
        assert_validation_error(&config, &["scripts.mapster_url", "empty"]);
    }

    #[test]
    fn test_validate_panel_height_zero() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.panel.height = 0;
        assert_validation_error(&config, &["panel.height"]);
    }

    #[test]
    fn test_validate_opacity_range() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.highlight.fill_opacity = 1.5;
        assert_validation_error(&config, &["highlight.fill_opacity", "1.0"]);

        let mut config = Config::default_with_base(Path::new("/test"));
        config.highlight.stroke_opacity = -0.1;
        assert_validation_error(&config, &["highlight.stroke_opacity"]);
    }

    #[test]
    fn test_validate_colors() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.highlight.fill_color = "#00ff00".to_owned();
        assert_validation_error(&config, &["highlight.fill_color", "hex"]);

        let mut config = Config::default_with_base(Path::new("/test"));
        config.highlight.stroke_color = "black".to_owned();
        assert_validation_error(&config, &["highlight.stroke_color"]);
    }

    #[test]
    fn test_validate_stroke_width() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.highlight.stroke_width = 500;
        assert_validation_error(&config, &["stroke_width", "100"]);
    }
}
