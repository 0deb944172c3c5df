//! Biomass objective entries
use serde::{Deserialize, Serialize};

use crate::metabolic_model::reaction::{ModelReaction, ReactionReagent};

/// A reaction flagged as the growth objective, with the compounds it is made of
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Biomass {
    pub id: String,
    pub name: String,
    pub compounds: Vec<ReactionReagent>,
}

impl From<&ModelReaction> for Biomass {
    fn from(reaction: &ModelReaction) -> Self {
        Biomass {
            id: reaction.id.clone(),
            name: reaction.name.clone(),
            compounds: reaction.reagents.clone(),
        }
    }
}
