//! Summary of one conversion run
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::metabolic_model::model::Model;
use crate::metabolic_model::reaction::ReactionReagent;
use crate::validation::message::{ConversionMessage, MessageLog, Severity};

/// Counters and messages describing a conversion, created fresh for every run and not
/// modifiable once returned
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConversionReport {
    model_id: String,
    source_url: Option<String>,
    species_count: usize,
    reaction_count: usize,
    gene_count: usize,
    resolved_references: usize,
    messages_by_severity: BTreeMap<Severity, usize>,
    messages: Vec<ConversionMessage>,
    biomass: IndexMap<String, Vec<ReactionReagent>>,
}

impl ConversionReport {
    pub(crate) fn new(
        model: &Model,
        species_count: usize,
        reaction_count: usize,
        resolved_references: usize,
        messages: MessageLog,
    ) -> Self {
        ConversionReport {
            model_id: model.id.clone(),
            source_url: model.source_url.clone(),
            species_count,
            reaction_count,
            gene_count: model.genes().len(),
            resolved_references,
            messages_by_severity: messages.counts_by_severity(),
            messages: messages.into_messages(),
            biomass: model
                .biomasses
                .iter()
                .map(|b| (b.id.clone(), b.compounds.clone()))
                .collect(),
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }

    /// Species declared in the source document
    pub fn species_count(&self) -> usize {
        self.species_count
    }

    /// Reactions declared in the source document
    pub fn reaction_count(&self) -> usize {
        self.reaction_count
    }

    /// Distinct genes across every converted reaction
    pub fn gene_count(&self) -> usize {
        self.gene_count
    }

    /// Compounds the reference lookup resolved
    pub fn resolved_references(&self) -> usize {
        self.resolved_references
    }

    /// Fraction of species with a resolved database reference
    pub fn reference_coverage(&self) -> f64 {
        if self.species_count == 0 {
            return 0.0;
        }
        self.resolved_references as f64 / self.species_count as f64
    }

    pub fn messages_by_severity(&self) -> &BTreeMap<Severity, usize> {
        &self.messages_by_severity
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.messages_by_severity
            .get(&severity)
            .copied()
            .unwrap_or(0)
    }

    /// Every message of the run, validation first, in the order they were found
    pub fn messages(&self) -> &[ConversionMessage] {
        &self.messages
    }

    /// Compound composition of each biomass reaction
    pub fn biomass(&self) -> &IndexMap<String, Vec<ReactionReagent>> {
        &self.biomass
    }

    /// Severity counts, most severe first, e.g. `CRITICAL: 1 WARN: 3`
    pub fn severity_summary(&self) -> String {
        self.messages_by_severity
            .iter()
            .rev()
            .map(|(severity, count)| format!("{}: {}", severity, count))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Display for ConversionReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Species {}, Reactions {}, {}",
            self.species_count,
            self.reaction_count,
            self.source_url.as_deref().unwrap_or("")
        )?;
        if !self.messages_by_severity.is_empty() {
            write!(f, "\n{} {}", self.model_id, self.severity_summary())?;
        }
        write!(f, "\n{} genes: {}", self.model_id, self.gene_count)?;
        if !self.biomass.is_empty() {
            let ids: Vec<&str> = self.biomass.keys().map(String::as_str).collect();
            write!(f, "\n{} biomass: [{}]", self.model_id, ids.join(", "))?;
        }
        for message in &self.messages {
            write!(f, "\n{}", message)?;
        }
        Ok(())
    }
}
