//! Engineer directory configuration.
//!
//! The extractors need to know which category and level each engineer is
//! contracted at; the timesheets themselves do not say. That mapping is
//! supplied by configuration as a YAML document of the form:
//!
//! ```yaml
//! Suraj Negi:
//!   category: offshore
//!   level: service_field
//! Ankit Modi:
//!   category: onshore
//!   level: service_field
//! ```
//!
//! Unknown category or level values fail loading; they never default.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::{Category, EngineerLevel};

/// One engineer's contracted category and level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineerProfile {
    /// The deployment category the engineer bills under.
    pub category: Category,
    /// The engineer's contracted level.
    pub level: EngineerLevel,
}

/// The engineer name → profile lookup used during timesheet extraction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineerDirectory {
    engineers: HashMap<String, EngineerProfile>,
}

impl EngineerDirectory {
    /// Loads a directory from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigNotFound`] if the file is missing and
    /// [`EngineError::ConfigParseError`] for malformed YAML or unknown
    /// category/level values.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml(&content).map_err(|e| match e {
            EngineError::ConfigParseError { message, .. } => EngineError::ConfigParseError {
                path: path_str,
                message,
            },
            other => other,
        })
    }

    /// Parses a directory from YAML text.
    pub fn from_yaml(yaml: &str) -> EngineResult<Self> {
        let engineers: HashMap<String, EngineerProfile> =
            serde_yaml::from_str(yaml).map_err(|e| EngineError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;
        Ok(Self { engineers })
    }

    /// Looks up an engineer by exact name.
    pub fn lookup(&self, name: &str) -> Option<&EngineerProfile> {
        self.engineers.get(name)
    }

    /// Iterates over all known engineer names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.engineers.keys().map(String::as_str)
    }

    /// Returns true if the directory has no entries.
    pub fn is_empty(&self) -> bool {
        self.engineers.is_empty()
    }
}

impl FromIterator<(String, EngineerProfile)> for EngineerDirectory {
    fn from_iter<T: IntoIterator<Item = (String, EngineerProfile)>>(iter: T) -> Self {
        Self {
            engineers: iter.into_iter().collect(),
        }
    }
}
