//! Turning a parsed document into a [`Model`](crate::metabolic_model::model::Model)
pub mod capabilities;
pub mod compartment_mapper;
pub mod converter;
pub mod error;
pub mod report;

pub use capabilities::{GeneNormalizer, ModelStore, ReferenceLookup, ReferenceTable, StoreError};
pub use compartment_mapper::{
    build_compartment_translation, CompartmentEntry, CompartmentMapper, CompartmentTranslation,
};
pub use converter::ModelConverter;
pub use error::ConversionError;
pub use report::ConversionReport;

use crate::configuration::Configuration;
use crate::document::SbmlDocument;
use crate::metabolic_model::model::Model;

/// Convert `document` with `translation`, without a reference lookup or gene normalizer
pub fn convert(
    document: &SbmlDocument,
    translation: &CompartmentTranslation,
    configuration: &Configuration,
) -> Result<(Model, ConversionReport), ConversionError> {
    ModelConverter::new(configuration).convert(document, translation)
}
