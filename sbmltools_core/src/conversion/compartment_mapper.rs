//! Assign internal compartment ids and keep the external/internal translation
use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::conversion::error::ConversionError;
use crate::document::ParsedCompartment;
use crate::utils::text::or_undefined;

/// Letters available for automatically assigned compartment ids, in assignment order
pub const COMPARTMENT_LETTERS: [char; 7] = ['a', 'b', 'c', 'd', 'e', 'f', 'g'];

/// Translation of one declared compartment
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompartmentEntry {
    pub internal_id: String,
    pub label: String,
    pub index: u32,
}

/// Bidirectional mapping between external and internal compartment ids.
///
/// Every external id maps to exactly one internal id and internal ids are unique.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompartmentTranslation {
    entries: IndexMap<String, CompartmentEntry>,
    external: IndexMap<String, String>,
}

impl CompartmentTranslation {
    pub fn to_internal(&self, external_id: &str) -> Option<&str> {
        self.entries
            .get(external_id)
            .map(|entry| entry.internal_id.as_str())
    }

    pub fn to_external(&self, internal_id: &str) -> Option<&str> {
        self.external.get(internal_id).map(String::as_str)
    }

    pub fn entry(&self, external_id: &str) -> Option<&CompartmentEntry> {
        self.entries.get(external_id)
    }

    pub fn contains_internal(&self, internal_id: &str) -> bool {
        self.external.contains_key(internal_id)
    }

    /// Internal ids in document order
    pub fn internal_ids(&self) -> impl Iterator<Item = &str> {
        self.external.keys().map(String::as_str)
    }

    /// `(external id, entry)` pairs in document order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CompartmentEntry)> {
        self.entries.iter().map(|(ext, entry)| (ext.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(
        &mut self,
        external_id: &str,
        entry: CompartmentEntry,
    ) -> Result<(), ConversionError> {
        if self.external.contains_key(&entry.internal_id) {
            return Err(ConversionError::DuplicateInternalCompartment {
                internal_id: entry.internal_id,
            });
        }
        self.external
            .insert(entry.internal_id.clone(), external_id.to_string());
        self.entries.insert(external_id.to_string(), entry);
        Ok(())
    }
}

/// Builds a [`CompartmentTranslation`] for one document.
///
/// Compartments get the next unused letter of [`COMPARTMENT_LETTERS`] with index `0`, unless
/// the override map names a canonical id for them.
pub struct CompartmentMapper<'a> {
    overrides: Option<&'a IndexMap<String, String>>,
}

impl<'a> CompartmentMapper<'a> {
    pub fn new() -> Self {
        CompartmentMapper { overrides: None }
    }

    pub fn with_overrides(overrides: &'a IndexMap<String, String>) -> Self {
        CompartmentMapper {
            overrides: Some(overrides),
        }
    }

    fn override_for(&self, external_id: &str) -> Option<&'a String> {
        self.overrides.and_then(|o| o.get(external_id))
    }

    pub fn build(
        &self,
        compartments: &[ParsedCompartment],
    ) -> Result<CompartmentTranslation, ConversionError> {
        // Canonical ids claimed by overrides, the letter scheme must not hand them out again
        let reserved: HashSet<&str> = compartments
            .iter()
            .filter_map(|c| self.override_for(&c.external_id))
            .map(String::as_str)
            .collect();
        let available: Vec<String> = COMPARTMENT_LETTERS
            .iter()
            .map(|letter| format!("{}0", letter))
            .filter(|id| !reserved.contains(id.as_str()))
            .collect();
        let capacity = available.len();
        let mut letters = available.into_iter();

        let mut translation = CompartmentTranslation::default();
        for compartment in compartments {
            if translation.entry(&compartment.external_id).is_some() {
                warn!("compartment {} declared more than once", compartment.external_id);
                continue;
            }
            let label = or_undefined(&compartment.display_name);
            let entry = match self.override_for(&compartment.external_id) {
                Some(canonical) => CompartmentEntry {
                    internal_id: canonical.clone(),
                    label,
                    index: trailing_index(canonical),
                },
                None => match letters.next() {
                    Some(internal_id) => CompartmentEntry {
                        internal_id,
                        label,
                        index: 0,
                    },
                    None => {
                        return Err(ConversionError::CompartmentCapacityExceeded {
                            required: self.auto_assigned(compartments),
                            capacity,
                        })
                    }
                },
            };
            translation.insert(&compartment.external_id, entry)?;
        }
        debug!(compartments = translation.len(), "built compartment translation");
        Ok(translation)
    }

    /// Number of distinct compartments that need a letter
    fn auto_assigned(&self, compartments: &[ParsedCompartment]) -> usize {
        compartments
            .iter()
            .filter(|c| self.override_for(&c.external_id).is_none())
            .map(|c| c.external_id.as_str())
            .collect::<HashSet<_>>()
            .len()
    }
}

impl Default for CompartmentMapper<'_> {
    fn default() -> Self {
        CompartmentMapper::new()
    }
}

/// Build the translation for `compartments`, applying `overrides` when given
pub fn build_compartment_translation(
    compartments: &[ParsedCompartment],
    overrides: Option<&IndexMap<String, String>>,
) -> Result<CompartmentTranslation, ConversionError> {
    match overrides {
        Some(overrides) => CompartmentMapper::with_overrides(overrides).build(compartments),
        None => CompartmentMapper::new().build(compartments),
    }
}

/// Numeric suffix of a compartment id (`c0` -> 0, `m12` -> 12), 0 when there is none
fn trailing_index(id: &str) -> u32 {
    let digits = id.len() - id.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    id[id.len() - digits..].parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compartments(ids: &[&str]) -> Vec<ParsedCompartment> {
        ids.iter().map(|id| ParsedCompartment::new(id, id)).collect()
    }

    #[test]
    fn letters_follow_document_order() {
        let declared = vec![
            ParsedCompartment::new("c0", ""),
            ParsedCompartment::new("c1", "Cytosol"),
        ];
        let translation = build_compartment_translation(&declared, None).unwrap();
        assert_eq!(translation.to_internal("c0"), Some("a0"));
        assert_eq!(translation.to_internal("c1"), Some("b0"));
        assert_eq!(translation.to_external("b0"), Some("c1"));
        assert_eq!(translation.entry("c0").unwrap().label, "undefined");
        assert_eq!(translation.entry("c1").unwrap().label, "Cytosol");
    }

    #[test]
    fn seven_compartments_fit() {
        let declared = compartments(&["c", "e", "p", "m", "x", "r", "v"]);
        let translation = build_compartment_translation(&declared, None).unwrap();
        let ids: Vec<_> = translation.internal_ids().collect();
        assert_eq!(ids, vec!["a0", "b0", "c0", "d0", "e0", "f0", "g0"]);
    }

    #[test]
    fn eight_compartments_exceed_capacity() {
        let declared = compartments(&["c", "e", "p", "m", "x", "r", "v", "n"]);
        match build_compartment_translation(&declared, None) {
            Err(ConversionError::CompartmentCapacityExceeded { required, capacity }) => {
                assert_eq!(required, 8);
                assert_eq!(capacity, 7);
            }
            other => panic!("Expected capacity error, got {:?}", other),
        }
    }

    #[test]
    fn overrides_take_precedence_and_reserve_ids() {
        let declared = compartments(&["C_c", "C_e", "C_p"]);
        let overrides = IndexMap::from([("C_e".to_string(), "a0".to_string())]);
        let translation = build_compartment_translation(&declared, Some(&overrides)).unwrap();
        assert_eq!(translation.to_internal("C_c"), Some("b0"));
        assert_eq!(translation.to_internal("C_e"), Some("a0"));
        assert_eq!(translation.to_internal("C_p"), Some("c0"));
    }

    #[test]
    fn reserved_letters_shrink_capacity() {
        let declared = compartments(&["C_e", "c", "p", "m", "x", "r", "v", "n"]);
        let overrides = IndexMap::from([("C_e".to_string(), "a0".to_string())]);
        match build_compartment_translation(&declared, Some(&overrides)) {
            Err(ConversionError::CompartmentCapacityExceeded { required, capacity }) => {
                assert_eq!(required, 7);
                assert_eq!(capacity, 6);
            }
            other => panic!("Expected capacity error, got {:?}", other),
        }
    }

    #[test]
    fn override_index_comes_from_the_canonical_id() {
        let declared = compartments(&["C_m"]);
        let overrides = IndexMap::from([("C_m".to_string(), "m12".to_string())]);
        let translation = build_compartment_translation(&declared, Some(&overrides)).unwrap();
        assert_eq!(translation.entry("C_m").unwrap().index, 12);
    }

    #[test]
    fn overrides_colliding_on_one_id_fail() {
        let declared = compartments(&["C_c", "C_cyt"]);
        let overrides = IndexMap::from([
            ("C_c".to_string(), "c0".to_string()),
            ("C_cyt".to_string(), "c0".to_string()),
        ]);
        assert!(matches!(
            build_compartment_translation(&declared, Some(&overrides)),
            Err(ConversionError::DuplicateInternalCompartment { .. })
        ));
    }

    #[test]
    fn duplicate_declarations_keep_the_first() {
        let declared = vec![
            ParsedCompartment::new("c", "cytosol"),
            ParsedCompartment::new("c", "again"),
            ParsedCompartment::new("e", "extracellular"),
        ];
        let translation = build_compartment_translation(&declared, None).unwrap();
        assert_eq!(translation.len(), 2);
        assert_eq!(translation.entry("c").unwrap().label, "cytosol");
        assert_eq!(translation.to_internal("e"), Some("b0"));
    }
}
