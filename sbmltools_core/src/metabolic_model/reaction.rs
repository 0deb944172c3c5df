//! This module provides a struct for representing reactions
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Which way a reaction may carry flux
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Reverse,
    Reversible,
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Direction::Forward => ">",
            Direction::Reverse => "<",
            Direction::Reversible => "=",
        };
        write!(f, "{}", symbol)
    }
}

/// A compound taking part in a reaction.
///
/// Consumed compounds have a negative coefficient, produced ones a positive coefficient.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReactionReagent {
    pub compound_ref: String,
    pub coefficient: f64,
}

impl ReactionReagent {
    pub fn new(compound_ref: &str, coefficient: f64) -> Self {
        ReactionReagent {
            compound_ref: compound_ref.to_string(),
            coefficient,
        }
    }
}

/// Represents a reaction in the converted model
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelReaction {
    /// Reaction id of the source document
    pub id: String,
    /// Human-readable reaction name
    #[builder(default = "String::from(\"undefined\")")]
    pub name: String,
    #[builder(default = "Direction::Reversible")]
    pub direction: Direction,
    /// Internal id of the compartment the reaction is assigned to
    pub compartment_ref: String,
    /// Reactants then products, in document order. A species appearing on both sides keeps
    /// both entries.
    #[builder(default = "Vec::new()")]
    pub reagents: Vec<ReactionReagent>,
    /// Genes referenced by the gene association
    #[builder(default = "BTreeSet::new()")]
    pub gene_set: BTreeSet<String>,
    /// The gene association text as found in the source
    #[builder(default = "None")]
    pub gene_rule: Option<String>,
}

impl ModelReaction {
    /// Reagents consuming a compound
    pub fn reactants(&self) -> impl Iterator<Item = &ReactionReagent> {
        self.reagents.iter().filter(|r| r.coefficient < 0.0)
    }

    /// Reagents producing a compound
    pub fn products(&self) -> impl Iterator<Item = &ReactionReagent> {
        self.reagents.iter().filter(|r| r.coefficient > 0.0)
    }

    /// Sum of the coefficients of every reagent entry for `compound_ref`
    pub fn net_coefficient(&self, compound_ref: &str) -> f64 {
        self.reagents
            .iter()
            .filter(|r| r.compound_ref == compound_ref)
            .map(|r| r.coefficient)
            .sum()
    }
}
