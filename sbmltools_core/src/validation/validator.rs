//! Check parsed species and reactions against a [`ValidationSchema`]
use tracing::debug;

use crate::document::{ParsedReaction, ParsedSpecies, SbmlDocument, SpeciesReference};
use crate::utils::text::is_blank;
use crate::validation::message::{ConversionMessage, MessageKind};
use crate::validation::schema::{AttributeSchema, ValidationSchema};

/// Validate every species and reaction of `document`.
///
/// Emits one message per missing recognized field whose severity is `Warn` or `Critical`,
/// tagged with the external id of the owning entity. Participant messages are tagged
/// `<reaction id>/<species id>`.
pub fn validate(document: &SbmlDocument, schema: &ValidationSchema) -> Vec<ConversionMessage> {
    let mut messages = Vec::new();
    for species in &document.species {
        check_species(species, &schema.species, &mut messages);
    }
    for reaction in &document.reactions {
        check_reaction(reaction, schema, &mut messages);
    }
    debug!(
        species = document.species.len(),
        reactions = document.reactions.len(),
        messages = messages.len(),
        "validated document"
    );
    messages
}

fn check_species(
    species: &ParsedSpecies,
    schema: &AttributeSchema,
    messages: &mut Vec<ConversionMessage>,
) {
    for (field, severity) in schema.reportable() {
        if is_blank(species_value(species, field)) {
            messages.push(ConversionMessage::new(
                severity,
                MessageKind::SchemaViolation,
                field,
                &species.external_id,
            ));
        }
    }
}

fn check_reaction(
    reaction: &ParsedReaction,
    schema: &ValidationSchema,
    messages: &mut Vec<ConversionMessage>,
) {
    for (field, severity) in schema.reaction.reportable() {
        if is_blank(reaction_value(reaction, field)) {
            messages.push(ConversionMessage::new(
                severity,
                MessageKind::SchemaViolation,
                field,
                &reaction.external_id,
            ));
        }
    }
    for participant in reaction.reactants.iter().chain(&reaction.products) {
        for (field, severity) in schema.participant.reportable() {
            if is_blank(participant_value(participant, field)) {
                messages.push(ConversionMessage::new(
                    severity,
                    MessageKind::SchemaViolation,
                    field,
                    &format!("{}/{}", reaction.external_id, participant.species),
                ));
            }
        }
    }
}

/// Attribute map first, then the structural fields the reader lifted out of it. Compartment
/// and stoichiometry go through the same accessors the converter uses.
fn species_value<'a>(species: &'a ParsedSpecies, field: &str) -> Option<&'a str> {
    if field == "compartment" {
        return species.compartment();
    }
    species.attribute(field).or(match field {
        "id" => Some(species.external_id.as_str()),
        "name" => Some(species.display_name.as_str()),
        _ => None,
    })
}

fn reaction_value<'a>(reaction: &'a ParsedReaction, field: &str) -> Option<&'a str> {
    reaction.attribute(field).or(match field {
        "id" => Some(reaction.external_id.as_str()),
        "name" => Some(reaction.display_name.as_str()),
        _ => None,
    })
}

fn participant_value<'a>(participant: &'a SpeciesReference, field: &str) -> Option<&'a str> {
    if field == "stoichiometry" {
        return participant.stoichiometry_text();
    }
    participant.attribute(field).or(match field {
        "species" => Some(participant.species.as_str()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ParsedCompartment;
    use crate::validation::message::Severity;
    use indexmap::IndexMap;

    fn species(id: &str, compartment: &str, attributes: &[(&str, &str)]) -> ParsedSpecies {
        ParsedSpecies {
            external_id: id.to_string(),
            compartment_external_id: compartment.to_string(),
            display_name: String::new(),
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn missing_compartment_is_a_warning() {
        let document = SbmlDocument {
            compartments: vec![ParsedCompartment::new("c0", "Cytosol")],
            species: vec![
                species("spi1", "c0", &[("id", "spi1"), ("compartment", "c0")]),
                species("spi2", "", &[("id", "spi2")]),
            ],
            ..Default::default()
        };
        let messages = validate(&document, &ValidationSchema::default());
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].severity, Severity::Warn);
        assert_eq!(messages[0].field, "compartment");
        assert_eq!(messages[0].context, "spi2");
    }

    #[test]
    fn compartment_and_stoichiometry_read_from_attributes() {
        let document = SbmlDocument {
            species: vec![species("spi1", "", &[("compartment", "c0")])],
            reactions: vec![ParsedReaction {
                external_id: "rxn1".to_string(),
                reactants: vec![SpeciesReference {
                    species: "spi1".to_string(),
                    stoichiometry: None,
                    attributes: IndexMap::from([("stoichiometry".to_string(), "2".to_string())]),
                }],
                ..Default::default()
            }],
            ..Default::default()
        };
        let mut schema = ValidationSchema::default();
        schema.participant.insert("stoichiometry", Severity::Warn);
        assert!(validate(&document, &schema).is_empty());

        let mut bare = document.clone();
        bare.species[0].attributes.clear();
        bare.reactions[0].reactants[0].attributes.clear();
        let fields: Vec<_> = validate(&bare, &schema)
            .into_iter()
            .map(|m| m.field)
            .collect();
        assert_eq!(fields, vec!["compartment", "stoichiometry"]);
    }

    #[test]
    fn missing_id_is_critical() {
        let document = SbmlDocument {
            species: vec![species("", "c0", &[("compartment", "c0")])],
            ..Default::default()
        };
        let messages = validate(&document, &ValidationSchema::default());
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].severity, Severity::Critical);
        assert_eq!(messages[0].field, "id");
    }

    #[test]
    fn unrecognized_and_informational_fields_are_ignored() {
        let document = SbmlDocument {
            species: vec![species(
                "spi1",
                "c0",
                &[("id", "spi1"), ("fbc:charge", "x"), ("compartment", "c0")],
            )],
            reactions: vec![ParsedReaction {
                external_id: "rxn1".to_string(),
                reactants: vec![SpeciesReference::new("spi1", None)],
                attributes: IndexMap::from([("id".to_string(), "rxn1".to_string())]),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(validate(&document, &ValidationSchema::default()).is_empty());
    }

    #[test]
    fn reaction_and_participant_messages() {
        let document = SbmlDocument {
            reactions: vec![ParsedReaction {
                external_id: String::new(),
                reactants: vec![SpeciesReference::new("", Some("1"))],
                ..Default::default()
            }],
            ..Default::default()
        };
        let messages = validate(&document, &ValidationSchema::default());
        let contexts: Vec<_> = messages
            .iter()
            .map(|m| (m.field.as_str(), m.context.as_str()))
            .collect();
        assert_eq!(contexts, vec![("id", ""), ("species", "/")]);
    }

    #[test]
    fn validation_does_not_mutate() {
        let document = SbmlDocument {
            species: vec![species("spi1", "", &[])],
            ..Default::default()
        };
        let before = document.clone();
        let _ = validate(&document, &ValidationSchema::default());
        assert_eq!(before, document);
    }
}
