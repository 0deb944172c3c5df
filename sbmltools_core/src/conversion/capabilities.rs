//! Capabilities the conversion consumes from its surroundings
//!
//! Each is a single-method trait with a blanket implementation for closures, so callers can
//! hand in either a full client or a plain function. Retrying, caching and transport are the
//! implementor's business.
use indexmap::IndexMap;
use thiserror::Error;

use crate::metabolic_model::model::Model;

/// Resolve a model-local species id to a canonical biochemistry database reference
pub trait ReferenceLookup {
    /// `rename_strategy` selects the target naming convention, when the caller configured one
    fn lookup(&self, external_id: &str, rename_strategy: Option<&str>) -> Option<String>;
}

impl<F> ReferenceLookup for F
where
    F: Fn(&str, Option<&str>) -> Option<String>,
{
    fn lookup(&self, external_id: &str, rename_strategy: Option<&str>) -> Option<String> {
        self(external_id, rename_strategy)
    }
}

/// A fixed species id to reference table, ignores the rename strategy
#[derive(Clone, Debug, Default)]
pub struct ReferenceTable(pub IndexMap<String, String>);

impl ReferenceLookup for ReferenceTable {
    fn lookup(&self, external_id: &str, _rename_strategy: Option<&str>) -> Option<String> {
        self.0.get(external_id).cloned()
    }
}

/// Map a raw locus tag from a gene association to the identifier used downstream.
///
/// Returning `None` or a blank string drops the gene.
pub trait GeneNormalizer {
    fn normalize(&self, gene: &str) -> Option<String>;
}

impl<F> GeneNormalizer for F
where
    F: Fn(&str) -> Option<String>,
{
    fn normalize(&self, gene: &str) -> Option<String> {
        self(gene)
    }
}

/// Persist a finished model, returning an opaque reference to the stored object
pub trait ModelStore {
    fn save(&self, name: &str, model: &Model) -> Result<String, StoreError>;
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("Unable to save model {name}: {reason}")]
pub struct StoreError {
    pub name: String,
    pub reason: String,
}
