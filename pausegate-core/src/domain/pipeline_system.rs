//! Pipeline system registry
//!
//! A pipeline system is a named group of pipelines that are paused and resumed
//! together. The registry is built once from configuration and never mutated.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when validating a registry
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Pipeline system name cannot be empty")]
    EmptySystemName,

    #[error("Pipeline system name '{0}' contains characters not allowed in object keys")]
    InvalidSystemName(String),

    #[error("Pipeline system '{0}' lists an empty pipeline name")]
    EmptyPipelineName(String),
}

/// Immutable mapping of pipeline system name to its ordered pipeline names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PipelineSystemRegistry {
    systems: BTreeMap<String, Vec<String>>,
}

impl PipelineSystemRegistry {
    pub fn new(systems: BTreeMap<String, Vec<String>>) -> Self {
        Self { systems }
    }

    /// The registry used when no systems file is configured
    pub fn builtin() -> Self {
        let edxapp = [
            "edxapp_release_advancer",
            "prerelease_edxapp_materials_latest",
            "edxapp_cut_release_candidate",
        ]
        .map(String::from)
        .to_vec();

        Self::new(BTreeMap::from([("edxapp".to_string(), edxapp)]))
    }

    /// Pipelines belonging to `system`, in configured order
    pub fn pipelines_for(&self, system: &str) -> Option<&[String]> {
        self.systems.get(system).map(Vec::as_slice)
    }

    pub fn contains(&self, system: &str) -> bool {
        self.systems.contains_key(system)
    }

    pub fn system_names(&self) -> impl Iterator<Item = &str> {
        self.systems.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.systems
            .iter()
            .map(|(name, pipelines)| (name.as_str(), pipelines.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Comma-separated system names, for operator-facing messages
    pub fn describe_known(&self) -> String {
        self.system_names().collect::<Vec<_>>().join(", ")
    }

    /// Checks that every name can be embedded in an object key.
    pub fn validate(&self) -> Result<(), RegistryError> {
        for (name, pipelines) in &self.systems {
            if name.trim().is_empty() {
                return Err(RegistryError::EmptySystemName);
            }
            if name.contains('/') || name.chars().any(char::is_whitespace) {
                return Err(RegistryError::InvalidSystemName(name.clone()));
            }
            if pipelines.iter().any(|p| p.trim().is_empty()) {
                return Err(RegistryError::EmptyPipelineName(name.clone()));
            }
        }
        Ok(())
    }
}

impl FromIterator<(String, Vec<String>)> for PipelineSystemRegistry {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
