use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures while locating or reading the preset file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to locate '{}'", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file '{}'", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file '{}': {message}", .path.display())]
    Invalid { path: PathBuf, message: String },
}

/// A named bundle of packages and template files.
///
/// Every field is optional in the config file and defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Preset {
    pub dev_dependencies: Vec<String>,
    pub dependencies: Vec<String>,
    pub files: Vec<String>,
}

impl Preset {
    pub fn package_count(&self) -> usize {
        self.dev_dependencies.len() + self.dependencies.len()
    }
}

/// The presets available to an invocation, keyed by case-sensitive name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PresetConfig {
    #[serde(default)]
    presets: BTreeMap<String, Preset>,
}

impl PresetConfig {
    /// Load presets from `path`.
    ///
    /// `.toml` files are read as TOML; anything else is read as JSON.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let parsed = if is_toml {
            Self::from_toml_str(&contents)
        } else {
            Self::from_json_str(&contents)
        };

        parsed.map_err(|message| ConfigError::Invalid {
            path: path.to_path_buf(),
            message,
        })
    }

    fn from_json_str(contents: &str) -> Result<Self, String> {
        serde_json::from_str(contents).map_err(|err| err.to_string())
    }

    fn from_toml_str(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|err| err.message().to_string())
    }

    pub fn from_presets(presets: impl IntoIterator<Item = (String, Preset)>) -> Self {
        Self {
            presets: presets.into_iter().collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.presets.get(name)
    }

    /// Presets sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Preset)> {
        self.presets.iter().map(|(name, preset)| (name.as_str(), preset))
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}
