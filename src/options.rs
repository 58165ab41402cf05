use std::fs;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use serde::Deserialize;
use thiserror::Error;

use crate::model::AreaId;

/// Configuration options supplied when building an [`crate::AreaGraph`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GraphOptions {
    /// Entry area used when a caller does not name one.
    pub home_area_id: Option<AreaId>,
    /// Separator placed between a folder and a file name.
    pub path_separator: String,
    /// Alias given to the global root area.
    pub root_alias: Option<String>,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            home_area_id: None,
            path_separator: MAIN_SEPARATOR.to_string(),
            root_alias: Some("global".to_string()),
        }
    }
}

impl GraphOptions {
    /// Creates options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the home area.
    pub fn home_area_id(mut self, id: AreaId) -> Self {
        self.home_area_id = Some(id);
        self
    }

    /// Sets the folder/file separator.
    pub fn path_separator(mut self, separator: impl Into<String>) -> Self {
        self.path_separator = separator.into();
        self
    }

    /// Sets the alias of the global root; `None` leaves it unnamed.
    pub fn root_alias(mut self, alias: Option<String>) -> Self {
        self.root_alias = alias;
        self
    }

    /// Parses options from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, OptionsError> {
        toml::from_str(text).map_err(|source| OptionsError::Parse {
            message: source.to_string(),
        })
    }

    /// Reads options from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, OptionsError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| OptionsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| OptionsError::ParseFile {
            path: path.to_path_buf(),
            message: source.to_string(),
        })
    }
}

/// Errors raised while loading [`GraphOptions`].
#[derive(Debug, Error)]
pub enum OptionsError {
    /// The options file could not be read.
    #[error("failed to read options file {path:?}: {source}")]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The options text is not valid TOML for [`GraphOptions`].
    #[error("failed to parse options: {message}")]
    Parse {
        /// Parser diagnostic.
        message: String,
    },
    /// The options file is not valid TOML for [`GraphOptions`].
    #[error("failed to parse options file {path:?}: {message}")]
    ParseFile {
        /// File that failed to parse.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },
}
