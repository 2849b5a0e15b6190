//! Launch parameters and settings file handling.
//! Settings come from an optional JSON or YAML file and are overridden
//! field by field by the command line before they become a [`RunConfig`].

use crate::constants::DEFAULT_PHOTO_EXTENSION;
use crate::error::{Error, Result};
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Parameters of one generation run.
///
/// Unset optional values are empty. [`crate::launcher::Launcher::new`]
/// validates and normalizes a config before anything runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunConfig {
    /// Semicolon-delimited input table
    pub input: PathBuf,
    /// Logo copied into every output directory
    pub logo: PathBuf,
    /// Templates copied and filled in for every row
    pub templates: Vec<PathBuf>,
    /// Root under which the per-row directories are created
    pub target_dir: PathBuf,
    /// Directory holding one photo per account name
    pub photo_dir: PathBuf,
    /// Code page or encoding label; empty selects the default
    pub encoding: String,
    /// Extension appended to the account name to find the photo
    pub photo_extension: String,
    /// Replace files that already exist in an output directory
    pub overwrite: bool,
}

impl RunConfig {
    pub fn new<P: Into<PathBuf>>(input: P, templates: Vec<PathBuf>) -> Self {
        Self {
            input: input.into(),
            templates,
            photo_extension: DEFAULT_PHOTO_EXTENSION.to_string(),
            ..Self::default()
        }
    }
}

/// Values read from a settings file or the command line.
///
/// Every field is optional. The aliases accept the key names of the
/// `appsettings.json` files of earlier releases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(alias = "InputConfigPath")]
    pub input: Option<String>,
    #[serde(alias = "CompanyLogoPath")]
    pub logo: Option<String>,
    #[serde(alias = "TemplatePathes")]
    pub templates: Vec<String>,
    #[serde(alias = "TargetDirectory")]
    pub target_dir: Option<String>,
    #[serde(alias = "AccountImageDirectory")]
    pub photo_dir: Option<String>,
    #[serde(alias = "DefaultEncoding")]
    pub encoding: Option<String>,
    #[serde(alias = "DefaultImageFileType")]
    pub photo_extension: Option<String>,
    #[serde(alias = "OverwriteExisting")]
    pub overwrite: Option<bool>,
}

impl Settings {
    /// Overlays `overrides` on top of `self`.
    ///
    /// A value set in `overrides` wins; a non-empty template list replaces
    /// the whole list.
    pub fn merge(self, overrides: Settings) -> Settings {
        Settings {
            input: overrides.input.or(self.input),
            logo: overrides.logo.or(self.logo),
            templates: if overrides.templates.is_empty() {
                self.templates
            } else {
                overrides.templates
            },
            target_dir: overrides.target_dir.or(self.target_dir),
            photo_dir: overrides.photo_dir.or(self.photo_dir),
            encoding: overrides.encoding.or(self.encoding),
            photo_extension: overrides.photo_extension.or(self.photo_extension),
            overwrite: overrides.overwrite.or(self.overwrite),
        }
    }

    /// Whether the values a run cannot do without are present.
    pub fn is_complete(&self) -> bool {
        self.input.as_deref().is_some_and(|input| !input.is_empty()) && !self.templates.is_empty()
    }

    pub fn into_run_config(self) -> RunConfig {
        RunConfig {
            input: self.input.map(PathBuf::from).unwrap_or_default(),
            logo: self.logo.map(PathBuf::from).unwrap_or_default(),
            templates: self.templates.into_iter().map(PathBuf::from).collect(),
            target_dir: self.target_dir.map(PathBuf::from).unwrap_or_default(),
            photo_dir: self.photo_dir.map(PathBuf::from).unwrap_or_default(),
            encoding: self.encoding.unwrap_or_default(),
            photo_extension: self
                .photo_extension
                .unwrap_or_else(|| DEFAULT_PHOTO_EXTENSION.to_string()),
            overwrite: self.overwrite.unwrap_or(false),
        }
    }
}

/// Parses settings content, trying JSON first and YAML second.
///
/// # Errors
/// * `Error::ConfigError` if the content is neither
pub fn parse_settings(content: &str) -> Result<Settings> {
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }
    match serde_json::from_str(content) {
        Ok(settings) => Ok(settings),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid settings format: {e}"))),
    }
}

/// Loads settings from an explicit file, or from the first of
/// `settings_files` found in `search_dir`.
///
/// # Returns
/// * Default settings when no file is named and none is found
///
/// # Errors
/// * `Error::ConfigError` if an explicitly named file does not exist
/// * `Error::ConfigError` if the file content is invalid
pub fn load_settings<P: AsRef<Path>>(
    explicit: Option<&Path>,
    search_dir: P,
    settings_files: &[&str],
) -> Result<Settings> {
    let path = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(Error::ConfigError(format!(
                    "Settings file not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => match settings_files
            .iter()
            .map(|file| search_dir.as_ref().join(file))
            .find(|candidate| candidate.is_file())
        {
            Some(path) => path,
            None => {
                debug!("No settings file found (tried: {})", settings_files.join(", "));
                return Ok(Settings::default());
            }
        },
    };

    debug!("Loading settings from {}", path.display());
    let content = std::fs::read_to_string(&path).map_err(Error::IoError)?;
    parse_settings(&content)
}
