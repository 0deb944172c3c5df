//! Build the typed model from a validated document and its compartment translation
use std::collections::HashSet;

use tracing::{debug, warn};

use crate::configuration::Configuration;
use crate::conversion::capabilities::{GeneNormalizer, ReferenceLookup};
use crate::conversion::compartment_mapper::{build_compartment_translation, CompartmentTranslation};
use crate::conversion::error::ConversionError;
use crate::conversion::report::ConversionReport;
use crate::document::{ParsedReaction, ParsedSpecies, SbmlDocument, SpeciesReference};
use crate::io::gpr_parse::extract_genes_with_messages;
use crate::metabolic_model::biomass::Biomass;
use crate::metabolic_model::compartment::ModelCompartmentBuilder;
use crate::metabolic_model::compound::{DatabaseReference, ModelCompound, ModelCompoundBuilder};
use crate::metabolic_model::model::Model;
use crate::metabolic_model::reaction::{
    Direction, ModelReaction, ModelReactionBuilder, ReactionReagent,
};
use crate::utils::text::{is_blank, or_undefined, parse_finite};
use crate::validation::message::{MessageKind, MessageLog, Severity};
use crate::validation::schema::ValidationSchema;
use crate::validation::validator::validate;

/// Model id used when neither the caller nor the document provides one
pub const DEFAULT_MODEL_ID: &str = "model";

/// Which side of a reaction a species reference sits on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Role {
    Reactant,
    Product,
}

/// Converts parsed documents into [`Model`]s.
///
/// The reference lookup and gene normalizer are optional capabilities supplied by the caller,
/// the converter calls each at most once per species or gene and does no I/O of its own.
pub struct ModelConverter<'a> {
    configuration: &'a Configuration,
    lookup: Option<&'a dyn ReferenceLookup>,
    normalizer: Option<&'a dyn GeneNormalizer>,
    model_id: Option<String>,
}

impl<'a> ModelConverter<'a> {
    pub fn new(configuration: &'a Configuration) -> Self {
        ModelConverter {
            configuration,
            lookup: None,
            normalizer: None,
            model_id: None,
        }
    }

    pub fn with_reference_lookup(mut self, lookup: &'a dyn ReferenceLookup) -> Self {
        self.lookup = Some(lookup);
        self
    }

    pub fn with_gene_normalizer(mut self, normalizer: &'a dyn GeneNormalizer) -> Self {
        self.normalizer = Some(normalizer);
        self
    }

    /// Id given to the converted model, otherwise the document's own id is used
    pub fn with_model_id(mut self, model_id: &str) -> Self {
        self.model_id = Some(model_id.trim().to_string());
        self
    }

    pub fn has_reference_lookup(&self) -> bool {
        self.lookup.is_some()
    }

    /// Validate, translate compartments and convert `document` in one go.
    ///
    /// Validation messages come first in the report, followed by conversion messages.
    pub fn run(
        &self,
        document: &SbmlDocument,
        schema: &ValidationSchema,
    ) -> Result<(Model, ConversionReport), ConversionError> {
        debug!("validate");
        let mut log = MessageLog::new();
        log.extend(validate(document, schema));
        let overrides = &self.configuration.compartment_overrides;
        let translation = build_compartment_translation(
            &document.compartments,
            (!overrides.is_empty()).then_some(overrides),
        )?;
        self.convert_with_log(document, &translation, log)
    }

    /// Convert `document` using an already built compartment translation
    pub fn convert(
        &self,
        document: &SbmlDocument,
        translation: &CompartmentTranslation,
    ) -> Result<(Model, ConversionReport), ConversionError> {
        self.convert_with_log(document, translation, MessageLog::new())
    }

    /// Convert `document`, appending messages to `log` which then moves into the report
    pub fn convert_with_log(
        &self,
        document: &SbmlDocument,
        translation: &CompartmentTranslation,
        mut log: MessageLog,
    ) -> Result<(Model, ConversionReport), ConversionError> {
        let mut model = Model::new_empty(&self.resolve_model_id(document));
        model.source_url = document.source_url.clone();

        for (external_id, entry) in translation.iter() {
            let compartment = ModelCompartmentBuilder::default()
                .id(entry.internal_id.clone())
                .external_id(external_id.to_string())
                .label(entry.label.clone())
                .index(entry.index)
                .ph(self.configuration.compartment_ph)
                .potential(self.configuration.compartment_potential)
                .build()?;
            model.add_compartment(compartment);
        }
        let mut seen_compartments = HashSet::new();
        for compartment in &document.compartments {
            if !seen_compartments.insert(compartment.external_id.as_str()) {
                log.record(
                    Severity::Warn,
                    MessageKind::DuplicateDeclaration,
                    "compartment",
                    &compartment.external_id,
                );
            }
        }

        let mut resolved_references = 0;
        for species in &document.species {
            if is_blank(Some(&species.external_id)) {
                record_missing_identifier(&mut log, &species.external_id, "species");
                continue;
            }
            if model.compounds.contains_key(&species.external_id) {
                warn!(
                    "species {} declared more than once, keeping the first",
                    species.external_id
                );
                log.record(
                    Severity::Warn,
                    MessageKind::DuplicateDeclaration,
                    "species",
                    &species.external_id,
                );
                continue;
            }
            let compound = self.convert_species(species, translation, &mut log)?;
            if compound.database_ref.is_resolved() {
                resolved_references += 1;
            }
            model.add_compound(compound);
        }

        let declared: HashSet<&str> = document
            .species
            .iter()
            .map(|s| s.external_id.as_str())
            .collect();
        for reaction in &document.reactions {
            if is_blank(Some(&reaction.external_id)) {
                record_missing_identifier(&mut log, &reaction.external_id, "reaction");
                continue;
            }
            if model.reactions.contains_key(&reaction.external_id) {
                warn!(
                    "reaction {} declared more than once, keeping the first",
                    reaction.external_id
                );
                log.record(
                    Severity::Warn,
                    MessageKind::DuplicateDeclaration,
                    "reaction",
                    &reaction.external_id,
                );
                continue;
            }
            let converted =
                self.convert_reaction(reaction, &model, translation, &declared, &mut log)?;
            if self.configuration.biomass_identifiers.contains(&converted.id) {
                model.biomasses.push(Biomass::from(&converted));
            }
            model.add_reaction(converted);
        }

        for biomass_id in &self.configuration.biomass_identifiers {
            if !model.reactions.contains_key(biomass_id) {
                log.record(Severity::Warn, MessageKind::UnknownBiomass, "biomass", biomass_id);
            }
        }

        debug!(
            model = model.id.as_str(),
            compounds = model.compounds.len(),
            reactions = model.reactions.len(),
            biomass = model.biomasses.len(),
            messages = log.len(),
            "converted model"
        );
        let report = ConversionReport::new(
            &model,
            document.species.len(),
            document.reactions.len(),
            resolved_references,
            log,
        );
        Ok((model, report))
    }

    fn resolve_model_id(&self, document: &SbmlDocument) -> String {
        self.model_id
            .clone()
            .filter(|id| !id.is_empty())
            .or_else(|| document.model_id.clone().filter(|id| !id.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_MODEL_ID.to_string())
    }

    // region Species

    fn convert_species(
        &self,
        species: &ParsedSpecies,
        translation: &CompartmentTranslation,
        log: &mut MessageLog,
    ) -> Result<ModelCompound, ConversionError> {
        let compartment = species.compartment().unwrap_or_default();
        let compartment_ref = translation.to_internal(compartment).ok_or_else(|| {
            ConversionError::UnresolvedCompartmentReference {
                species: species.external_id.clone(),
                compartment: compartment.to_string(),
            }
        })?;

        let name = if species.display_name.trim().is_empty() {
            species.attribute("name").unwrap_or_default()
        } else {
            species.display_name.as_str()
        };

        let charge = match species.attribute("charge") {
            Some(raw) if !raw.trim().is_empty() => parse_finite(raw).unwrap_or_else(|| {
                log.record(
                    Severity::Warn,
                    MessageKind::InvalidAttribute,
                    "charge",
                    &format!("{}: {}", species.external_id, raw),
                );
                0.0
            }),
            _ => 0.0,
        };

        let formula = species
            .attribute("chemicalFormula")
            .or_else(|| species.attribute("formula"))
            .map(|f| f.trim().to_string())
            .unwrap_or_default();

        Ok(ModelCompoundBuilder::default()
            .id(species.external_id.clone())
            .compartment_ref(compartment_ref.to_string())
            .name(or_undefined(name))
            .charge(charge)
            .formula(formula)
            .database_ref(self.database_reference(&species.external_id))
            .build()?)
    }

    fn database_reference(&self, external_id: &str) -> DatabaseReference {
        let rename = self.configuration.rename_strategy.as_deref();
        self.lookup
            .and_then(|lookup| lookup.lookup(external_id, rename))
            .filter(|reference| !reference.trim().is_empty())
            .map(DatabaseReference::Resolved)
            .unwrap_or_else(|| {
                DatabaseReference::Unresolved(self.configuration.unresolved_reference.clone())
            })
    }

    // endregion Species

    // region Reactions

    fn convert_reaction(
        &self,
        reaction: &ParsedReaction,
        model: &Model,
        translation: &CompartmentTranslation,
        declared: &HashSet<&str>,
        log: &mut MessageLog,
    ) -> Result<ModelReaction, ConversionError> {
        let mut reagents = Vec::with_capacity(reaction.reactants.len() + reaction.products.len());
        let participants = reaction
            .reactants
            .iter()
            .map(|r| (r, Role::Reactant))
            .chain(reaction.products.iter().map(|p| (p, Role::Product)));
        for (participant, role) in participants {
            if !declared.contains(participant.species.as_str()) {
                log.record(
                    Severity::Warn,
                    MessageKind::UnknownSpecies,
                    "species",
                    &format!("{}/{}", reaction.external_id, participant.species),
                );
            }
            if let Some(coefficient) = coefficient(reaction, participant, role, log) {
                reagents.push(ReactionReagent::new(&participant.species, coefficient));
            }
        }

        let (gene_set, gene_messages) = extract_genes_with_messages(
            reaction.gene_rule(),
            self.normalizer,
            &reaction.external_id,
        );
        log.extend(gene_messages);

        let name = if reaction.display_name.trim().is_empty() {
            reaction.attribute("name").unwrap_or_default()
        } else {
            reaction.display_name.as_str()
        };

        Ok(ModelReactionBuilder::default()
            .id(reaction.external_id.clone())
            .name(or_undefined(name))
            .direction(direction(reaction, log))
            .compartment_ref(reaction_compartment(reaction, &reagents, model, translation))
            .reagents(reagents)
            .gene_set(gene_set)
            .gene_rule(reaction.gene_rule().map(str::to_string))
            .build()?)
    }

    // endregion Reactions
}

/// Skipped entity without an id, unless validation already reported its blank `id`
fn record_missing_identifier(log: &mut MessageLog, blank_id: &str, entity: &str) {
    if !log.contains(Severity::Critical, "id", blank_id) {
        log.record(Severity::Critical, MessageKind::MissingIdentifier, "id", entity);
    }
}

/// Signed coefficient of one participant, `None` when the reagent has to be dropped.
///
/// A missing stoichiometry counts as 1. Reactants are stored negative and products positive,
/// whatever sign the source used. Only a value that is not a number drops the reagent, a zero
/// is kept with a warning.
fn coefficient(
    reaction: &ParsedReaction,
    participant: &SpeciesReference,
    role: Role,
    log: &mut MessageLog,
) -> Option<f64> {
    let context = || format!("{}/{}", reaction.external_id, participant.species);
    let magnitude = match participant.stoichiometry_text() {
        None => 1.0,
        Some(raw) if raw.trim().is_empty() => 1.0,
        Some(raw) => match parse_finite(raw) {
            Some(value) => value,
            None => {
                log.record(
                    Severity::Critical,
                    MessageKind::MalformedStoichiometry,
                    "stoichiometry",
                    &format!("{}: {}", context(), raw),
                );
                return None;
            }
        },
    };
    if magnitude <= 0.0 {
        log.record(
            Severity::Warn,
            MessageKind::NonPositiveStoichiometry,
            "stoichiometry",
            &format!("{}: {}", context(), magnitude),
        );
    }
    let magnitude = magnitude.abs();
    Some(match role {
        Role::Reactant => -magnitude,
        Role::Product => magnitude,
    })
}

/// Reversibility from the `reversible` attribute, reversible unless stated otherwise
fn direction(reaction: &ParsedReaction, log: &mut MessageLog) -> Direction {
    let raw = match reaction.attribute("reversible") {
        Some(raw) if !raw.trim().is_empty() => raw.trim(),
        _ => return Direction::Reversible,
    };
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" => Direction::Reversible,
        "false" | "0" => {
            if runs_in_reverse(reaction) {
                Direction::Reverse
            } else {
                Direction::Forward
            }
        }
        _ => {
            log.record(
                Severity::Warn,
                MessageKind::InvalidAttribute,
                "reversible",
                &format!("{}: {}", reaction.external_id, raw),
            );
            Direction::Reversible
        }
    }
}

/// An irreversible reaction whose numeric bounds only allow negative flux
fn runs_in_reverse(reaction: &ParsedReaction) -> bool {
    let lower = reaction.attribute("lowerFluxBound").and_then(parse_finite);
    let upper = reaction.attribute("upperFluxBound").and_then(parse_finite);
    matches!((lower, upper), (Some(l), Some(u)) if u <= 0.0 && l < 0.0)
}

/// The reaction's own compartment when it translates, else the compartment of its first known
/// reagent, else the first declared compartment
fn reaction_compartment(
    reaction: &ParsedReaction,
    reagents: &[ReactionReagent],
    model: &Model,
    translation: &CompartmentTranslation,
) -> String {
    reaction
        .attribute("compartment")
        .and_then(|c| translation.to_internal(c))
        .or_else(|| {
            reagents
                .iter()
                .find_map(|r| model.compounds.get(&r.compound_ref))
                .map(|compound| compound.compartment_ref.as_str())
        })
        .or_else(|| translation.internal_ids().next())
        .unwrap_or_default()
        .to_string()
}
