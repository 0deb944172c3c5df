use thiserror::Error;

use crate::metabolic_model::compartment::ModelCompartmentBuilderError;
use crate::metabolic_model::compound::ModelCompoundBuilderError;
use crate::metabolic_model::reaction::ModelReactionBuilderError;

/// Problems that make a converted model internally inconsistent, the run is aborted and no
/// partial model is returned
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Species {species} refers to compartment `{compartment}` which is not declared")]
    UnresolvedCompartmentReference { species: String, compartment: String },
    #[error(
        "{required} compartments need an internal id but only {capacity} letters are available"
    )]
    CompartmentCapacityExceeded { required: usize, capacity: usize },
    #[error("Internal compartment id {internal_id} would be assigned twice")]
    DuplicateInternalCompartment { internal_id: String },
    #[error("Unable to build compartment")]
    UnableToBuildCompartment(#[from] ModelCompartmentBuilderError),
    #[error("Unable to build compound")]
    UnableToBuildCompound(#[from] ModelCompoundBuilderError),
    #[error("Unable to build reaction")]
    UnableToBuildReaction(#[from] ModelReactionBuilderError),
}
