// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::PersistenceError;
use grade_assign_domain::{GradeSetting, Preference, Teacher};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The JSON document a store can be seeded from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedData {
    /// The roster.
    #[serde(default)]
    pub teachers: Vec<Teacher>,
    /// Preference submissions, any year.
    #[serde(default)]
    pub preferences: Vec<Preference>,
    /// Grade settings, any year.
    #[serde(default)]
    pub settings: Vec<GradeSetting>,
}

impl SeedData {
    /// Parses a seed document.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::SerializationError` if the JSON does not
    /// match the seed shape (including out-of-range grades).
    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a seed file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path: &Path = path.as_ref();
        let contents: String = std::fs::read_to_string(path).map_err(|e| {
            PersistenceError::InitializationError(format!(
                "Failed to read seed file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json(&contents)
    }
}
