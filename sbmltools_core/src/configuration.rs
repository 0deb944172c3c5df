//! Caller supplied settings for a conversion run
//!
//! Nothing here is process-wide: a [`Configuration`] is built by the caller and handed to the
//! converter or importer, so independent runs never share state.
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Reactions to flag as biomass objectives
    pub biomass_identifiers: BTreeSet<String>,
    /// External compartment id to canonical compartment id, wins over the letter scheme
    pub compartment_overrides: IndexMap<String, String>,
    /// Naming convention handed to the reference lookup
    pub rename_strategy: Option<String>,
    /// pH given to every compartment
    pub compartment_ph: f64,
    /// Electrical potential given to every compartment
    pub compartment_potential: f64,
    /// Database reference written for compounds the lookup could not resolve
    pub unresolved_reference: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            biomass_identifiers: BTreeSet::new(),
            compartment_overrides: IndexMap::new(),
            rename_strategy: None,
            compartment_ph: 7.3,
            compartment_potential: 1.0,
            unresolved_reference: String::from("cpd00000"),
        }
    }
}

impl Configuration {
    pub fn from_json_str(json: &str) -> Result<Configuration, ConfigurationError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Configuration, ConfigurationError> {
        let data = fs::read_to_string(path)?;
        Configuration::from_json_str(&data)
    }

    pub fn with_biomass_identifiers<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.biomass_identifiers = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_compartment_overrides(mut self, overrides: IndexMap<String, String>) -> Self {
        self.compartment_overrides = overrides;
        self
    }

    pub fn with_rename_strategy(mut self, strategy: &str) -> Self {
        self.rename_strategy = Some(strategy.to_string());
        self
    }
}

/// A curated pairing of model compartments with a KBase compartment
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompartmentMapping {
    pub kbase_compartment_id: Option<String>,
    #[serde(default)]
    pub model_compartment_id: Vec<String>,
}

/// Turn curated mappings into an override map of `first model id -> kbase id`.
///
/// Entries without a KBase id or without any model id are skipped.
pub fn compartment_overrides_from_mappings(
    mappings: &[CompartmentMapping],
) -> IndexMap<String, String> {
    mappings
        .iter()
        .filter_map(|mapping| {
            let to = mapping.kbase_compartment_id.as_ref()?;
            let from = mapping.model_compartment_id.first()?;
            Some((from.clone(), to.clone()))
        })
        .collect()
}

/// Split a comma separated list of biomass reaction ids, trimming and dropping blanks
pub fn parse_biomass_identifiers(text: &str) -> BTreeSet<String> {
    text.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect()
}

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Unable to read configuration file")]
    UnableToRead(#[from] std::io::Error),
    #[error("Unable to parse configuration: {0}")]
    UnableToParse(#[from] serde_json::Error),
}
