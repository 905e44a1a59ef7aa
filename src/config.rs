//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/nestline/nestline.toml`
//! 3. Local config: `<project_dir>/.nestline.toml`
//! 4. Environment variables: `NESTLINE_*` prefix
//!
//! Command line flags are applied on top by the CLI layer.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{OrderMode, DEFAULT_MARKER};

/// Unified configuration for nestline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory holding `<number>_<label>.txt` case files (default: cases)
    pub cases_dir: PathBuf,
    /// Character repeated once per depth level (default: '-')
    pub marker: char,
    /// Sibling order for output
    pub order: OrderMode,
    /// Print box-drawing trees instead of marker outlines
    pub tree: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cases_dir: PathBuf::from("cases"),
            marker: DEFAULT_MARKER,
            order: OrderMode::Document,
            tree: false,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub cases_dir: Option<PathBuf>,
    pub marker: Option<char>,
    pub order: Option<OrderMode>,
    pub tree: Option<bool>,
}

/// Get the XDG config directory for nestline.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "nestline").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("nestline.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".nestline.toml")
}

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

fn single_char(value: &str) -> Result<char, ApplicationError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ApplicationError::Config {
            message: format!("marker must be a single character, got {:?}", value),
        }),
    }
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            cases_dir: overlay
                .cases_dir
                .clone()
                .unwrap_or_else(|| self.cases_dir.clone()),
            marker: overlay.marker.unwrap_or(self.marker),
            order: overlay.order.unwrap_or(self.order),
            tree: overlay.tree.unwrap_or(self.tree),
        }
    }

    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.cases_dir.to_string_lossy().as_ref());
        self.cases_dir = PathBuf::from(expanded);
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional project directory for local config
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = project_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply NESTLINE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("NESTLINE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("cases_dir") {
            settings.cases_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("marker") {
            settings.marker = single_char(&val)?;
        }
        if let Ok(val) = config.get_string("order") {
            settings.order = match val.to_lowercase().as_str() {
                "document" => OrderMode::Document,
                "alphabetical" => OrderMode::Alphabetical,
                other => {
                    return Err(ApplicationError::Config {
                        message: format!("unknown order: {}", other),
                    })
                }
            };
        }
        if let Ok(val) = config.get_bool("tree") {
            settings.tree = val;
        }

        Ok(settings)
    }

    /// Case directory, resolved against `project_dir` when relative.
    pub fn cases_dir_in(&self, project_dir: &Path) -> PathBuf {
        if self.cases_dir.is_absolute() {
            self.cases_dir.clone()
        } else {
            project_dir.join(&self.cases_dir)
        }
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }

    /// Commented template written by `config init`.
    pub fn template() -> String {
        format!(
            "# nestline configuration\n\
             \n\
             # Directory with <number>_<label>.txt case files\n\
             cases_dir = \"cases\"\n\
             \n\
             # Character repeated once per depth level\n\
             marker = \"{}\"\n\
             \n\
             # Sibling order: \"document\" or \"alphabetical\"\n\
             order = \"document\"\n\
             \n\
             # Box-drawing trees instead of marker outlines\n\
             tree = false\n",
            DEFAULT_MARKER
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_template_when_parsing_then_equals_defaults() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();

        let settings = Settings::default().merge_with(&raw);

        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn given_partial_overlay_when_merging_then_unspecified_fields_are_kept() {
        let raw: RawSettings = toml::from_str("order = \"alphabetical\"\nmarker = \"*\"").unwrap();

        let settings = Settings::default().merge_with(&raw);

        assert_eq!(settings.order, OrderMode::Alphabetical);
        assert_eq!(settings.marker, '*');
        assert_eq!(settings.cases_dir, PathBuf::from("cases"));
        assert!(!settings.tree);
    }

    #[test]
    fn given_multi_char_marker_when_converting_then_config_error() {
        assert!(single_char("ab").is_err());
        assert!(single_char("").is_err());
        assert_eq!(single_char("#").unwrap(), '#');
    }

    #[test]
    fn given_relative_cases_dir_when_resolving_then_joined_to_project() {
        let settings = Settings::default();
        assert_eq!(
            settings.cases_dir_in(Path::new("/work")),
            PathBuf::from("/work/cases")
        );
    }

    #[test]
    fn given_settings_when_serializing_then_round_trips_through_toml() {
        let settings = Settings {
            tree: true,
            ..Settings::default()
        };

        let text = settings.to_toml().unwrap();
        let back: Settings = toml::from_str(&text).unwrap();

        assert_eq!(back, settings);
    }
}
