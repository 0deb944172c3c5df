//! This module provides the compartment struct of a converted model
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// A cellular location, identified by its internal id (`a0`, `b0`, ...)
#[derive(Builder, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelCompartment {
    /// Internal identifier assigned by the compartment translation
    pub id: String,
    /// Identifier used by the source document
    pub external_id: String,
    /// Human readable label, `"undefined"` when the source had none
    #[builder(default = "String::from(\"undefined\")")]
    pub label: String,
    /// Numeric suffix of the internal id
    #[builder(default = "0")]
    pub index: u32,
    #[builder(default = "7.3")]
    pub ph: f64,
    #[builder(default = "1.0")]
    pub potential: f64,
}
