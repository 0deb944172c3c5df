//! The intermediate, already XML-parsed form of an SBML document
//!
//! A reader outside this crate fills these structures; every attribute is kept as a raw string
//! exactly as found in the source, so nothing here is validated or typed yet.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Attribute keys under which a gene association may be stored when the reader did not lift
/// it into [`ParsedReaction::gene_association`]
const GENE_ASSOCIATION_KEYS: [&str; 3] =
    ["GENE_ASSOCIATION", "GENE ASSOCIATION", "geneAssociation"];

fn non_blank(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// One model read from a source file
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SbmlDocument {
    /// Identifier declared by the model element, if any
    #[serde(default)]
    pub model_id: Option<String>,
    /// Where the document was retrieved from
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub compartments: Vec<ParsedCompartment>,
    #[serde(default)]
    pub species: Vec<ParsedSpecies>,
    #[serde(default)]
    pub reactions: Vec<ParsedReaction>,
}

/// A compartment element
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCompartment {
    pub external_id: String,
    #[serde(default)]
    pub display_name: String,
}

impl ParsedCompartment {
    pub fn new(external_id: &str, display_name: &str) -> Self {
        ParsedCompartment {
            external_id: external_id.to_string(),
            display_name: display_name.to_string(),
        }
    }
}

/// A species element
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedSpecies {
    pub external_id: String,
    #[serde(default)]
    pub compartment_external_id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
}

impl ParsedSpecies {
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// External id of the species' compartment, from the lifted field or else the
    /// `compartment` attribute
    pub fn compartment(&self) -> Option<&str> {
        non_blank(&self.compartment_external_id).or_else(|| self.attribute("compartment"))
    }
}

/// A reactant or product entry of a reaction
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeciesReference {
    pub species: String,
    /// Raw stoichiometry text, `None` when the attribute is absent
    #[serde(default)]
    pub stoichiometry: Option<String>,
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
}

impl SpeciesReference {
    pub fn new(species: &str, stoichiometry: Option<&str>) -> Self {
        SpeciesReference {
            species: species.to_string(),
            stoichiometry: stoichiometry.map(str::to_string),
            attributes: IndexMap::new(),
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Raw stoichiometry text, from the lifted field or else the `stoichiometry` attribute
    pub fn stoichiometry_text(&self) -> Option<&str> {
        self.stoichiometry
            .as_deref()
            .and_then(non_blank)
            .or_else(|| self.attribute("stoichiometry"))
    }
}

/// A reaction element
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedReaction {
    pub external_id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub reactants: Vec<SpeciesReference>,
    #[serde(default)]
    pub products: Vec<SpeciesReference>,
    #[serde(default)]
    pub gene_association: Option<String>,
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
}

impl ParsedReaction {
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// The gene association text, from the dedicated field or from a notes-style attribute
    pub fn gene_rule(&self) -> Option<&str> {
        self.gene_association.as_deref().or_else(|| {
            GENE_ASSOCIATION_KEYS
                .iter()
                .find_map(|key| self.attribute(key))
        })
    }
}
