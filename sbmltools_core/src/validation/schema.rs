//! Tables of recognized attribute names and how serious their absence is
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::validation::message::Severity;

/// Recognized field names of one entity type mapped to the severity of a missing value.
///
/// Attributes that are not in the table are ignored, the source format keeps growing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeSchema {
    fields: IndexMap<String, Severity>,
}

impl AttributeSchema {
    pub fn new() -> Self {
        AttributeSchema::default()
    }

    /// Build a schema from `(field, severity)` pairs
    pub fn from_fields(fields: &[(&str, Severity)]) -> Self {
        AttributeSchema {
            fields: fields
                .iter()
                .map(|(name, severity)| (name.to_string(), *severity))
                .collect(),
        }
    }

    /// Add or replace a recognized field
    pub fn insert(&mut self, field: &str, severity: Severity) {
        self.fields.insert(field.to_string(), severity);
    }

    pub fn severity(&self, field: &str) -> Option<Severity> {
        self.fields.get(field).copied()
    }

    pub fn is_recognized(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Recognized fields whose absence must be reported, in table order
    pub fn reportable(&self) -> impl Iterator<Item = (&str, Severity)> {
        self.fields
            .iter()
            .filter(|(_, severity)| **severity != Severity::None)
            .map(|(name, severity)| (name.as_str(), *severity))
    }

    /// Species attributes
    pub fn species() -> Self {
        AttributeSchema::from_fields(&[
            ("speciesType", Severity::None),
            ("charge", Severity::None),
            ("constant", Severity::None),
            ("metaid", Severity::None),
            ("hasOnlySubstanceUnits", Severity::None),
            ("sboTerm", Severity::None),
            ("boundaryCondition", Severity::None),
            ("chemicalFormula", Severity::None),
            ("initialAmount", Severity::None),
            ("name", Severity::None),
            ("compartment", Severity::Warn),
            ("id", Severity::Critical),
            ("initialConcentration", Severity::None),
        ])
    }

    /// Reaction-level attributes
    pub fn reaction() -> Self {
        AttributeSchema::from_fields(&[
            ("upperFluxBound", Severity::None),
            ("fast", Severity::None),
            ("metaid", Severity::None),
            ("reversible", Severity::None),
            ("sboTerm", Severity::None),
            ("name", Severity::None),
            ("lowerFluxBound", Severity::None),
            ("id", Severity::Critical),
        ])
    }

    /// Attributes of each reactant/product entry
    pub fn participant() -> Self {
        AttributeSchema::from_fields(&[
            ("stoichiometry", Severity::None),
            ("constant", Severity::None),
            ("species", Severity::Critical),
            ("metaid", Severity::None),
            ("sboTerm", Severity::None),
        ])
    }
}

/// The three schemas consulted when validating a document
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationSchema {
    pub species: AttributeSchema,
    pub reaction: AttributeSchema,
    pub participant: AttributeSchema,
}

impl Default for ValidationSchema {
    fn default() -> Self {
        ValidationSchema {
            species: AttributeSchema::species(),
            reaction: AttributeSchema::reaction(),
            participant: AttributeSchema::participant(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn species_schema_reports_only_compartment_and_id() {
        let schema = AttributeSchema::species();
        let reportable: Vec<_> = schema.reportable().collect();
        assert_eq!(
            reportable,
            vec![("compartment", Severity::Warn), ("id", Severity::Critical)]
        );
        assert!(schema.is_recognized("initialConcentration"));
        assert!(!schema.is_recognized("fbc:charge"));
    }

    #[test]
    fn insert_overrides_severity() {
        let mut schema = AttributeSchema::reaction();
        schema.insert("name", Severity::Warn);
        assert_eq!(schema.severity("name"), Some(Severity::Warn));
        assert_eq!(schema.severity("lowerFluxBound"), Some(Severity::None));
    }
}
