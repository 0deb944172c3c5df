//! This module provides the compound struct, a species placed in a model compartment

use std::fmt::{Display, Formatter};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Link from a model compound to a curated biochemistry database entry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseReference {
    /// Canonical reference returned by the lookup
    Resolved(String),
    /// No reference found, holds the placeholder written in its place
    Unresolved(String),
}

impl DatabaseReference {
    pub fn is_resolved(&self) -> bool {
        matches!(self, DatabaseReference::Resolved(_))
    }

    /// The reference text, the placeholder for unresolved compounds
    pub fn reference(&self) -> &str {
        match self {
            DatabaseReference::Resolved(r) | DatabaseReference::Unresolved(r) => r,
        }
    }
}

impl Display for DatabaseReference {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reference())
    }
}

/// Represents a compound
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelCompound {
    /// Species id of the source document, reused verbatim
    pub id: String,
    /// Internal id of the compartment holding the compound
    pub compartment_ref: String,
    /// Human Readable name of the compound
    #[builder(default = "String::from(\"undefined\")")]
    pub name: String,
    /// Electrical charge of the compound
    #[builder(default = "0.0")]
    pub charge: f64,
    /// Chemical Formula of the compound, empty when unknown
    #[builder(default = "String::new()")]
    pub formula: String,
    #[builder(default = "DatabaseReference::Unresolved(String::from(\"cpd00000\"))")]
    pub database_ref: DatabaseReference,
}
