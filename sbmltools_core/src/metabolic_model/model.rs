//! This module provides the Model struct for representing an entire converted metabolic model
use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::metabolic_model::biomass::Biomass;
use crate::metabolic_model::compartment::ModelCompartment;
use crate::metabolic_model::compound::ModelCompound;
use crate::metabolic_model::reaction::ModelReaction;

/// Represents a Genome Scale Metabolic Model ready for flux balance analysis
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Id associated with the Model
    pub id: String,
    /// Where the source document came from
    pub source_url: Option<String>,
    /// Map of internal compartment ids to compartments
    pub compartments: IndexMap<String, ModelCompartment>,
    /// Map of compound ids to compounds
    pub compounds: IndexMap<String, ModelCompound>,
    /// Map of reaction ids to reactions
    pub reactions: IndexMap<String, ModelReaction>,
    /// Reactions flagged as biomass objectives, they also remain in `reactions`
    pub biomasses: Vec<Biomass>,
}

impl Model {
    pub fn new_empty(id: &str) -> Self {
        Model {
            id: id.to_string(),
            source_url: None,
            compartments: IndexMap::new(),
            compounds: IndexMap::new(),
            reactions: IndexMap::new(),
            biomasses: Vec::new(),
        }
    }

    /// Add a compartment to the model, keyed by its internal id
    pub fn add_compartment(&mut self, compartment: ModelCompartment) {
        let id = compartment.id.clone();
        self.compartments.insert(id, compartment);
    }

    /// Add a compound to the model, returning the compound it replaced if the id was taken
    pub fn add_compound(&mut self, compound: ModelCompound) -> Option<ModelCompound> {
        let id = compound.id.clone();
        self.compounds.insert(id, compound)
    }

    /// Add a reaction to the model, returning the reaction it replaced if the id was taken
    pub fn add_reaction(&mut self, reaction: ModelReaction) -> Option<ModelReaction> {
        let id = reaction.id.clone();
        self.reactions.insert(id, reaction)
    }

    /// Every gene referenced by any reaction
    pub fn genes(&self) -> BTreeSet<String> {
        self.reactions
            .values()
            .flat_map(|r| r.gene_set.iter().cloned())
            .collect()
    }

    pub fn biomass_ids(&self) -> Vec<&str> {
        self.biomasses.iter().map(|b| b.id.as_str()).collect()
    }
}
