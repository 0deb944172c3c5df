//! Messages accumulated while validating and converting a document
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// How serious a reported problem is
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Informational only
    None,
    /// Recoverable, the converted model is still usable
    Warn,
    /// Required for correctness
    Critical,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Severity::None => "NONE",
            Severity::Warn => "WARN",
            Severity::Critical => "CRITICAL",
        };
        write!(f, "{}", label)
    }
}

/// Which kind of problem produced a message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKind {
    /// A recognized attribute is missing
    SchemaViolation,
    /// A gene association sub-expression could not be parsed
    MalformedExpression,
    /// A gene association referenced a numeric pseudo-gene
    NumericGene,
    /// A stoichiometry value was present but not a number
    MalformedStoichiometry,
    /// A stoichiometry value parsed but was zero or negative
    NonPositiveStoichiometry,
    /// An attribute value could not be interpreted (charge, reversibility, ...)
    InvalidAttribute,
    /// A reagent refers to a species that was never declared
    UnknownSpecies,
    /// A configured biomass identifier names no reaction
    UnknownBiomass,
    /// An entity without an identifier was skipped
    MissingIdentifier,
    /// An id was declared more than once, only the first declaration is used
    DuplicateDeclaration,
}

/// A single problem found in the source document
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConversionMessage {
    pub severity: Severity,
    pub kind: MessageKind,
    /// The attribute or field the message is about
    pub field: String,
    /// Identifier of the owning entity, or the offending text
    pub context: String,
}

impl ConversionMessage {
    pub fn new(severity: Severity, kind: MessageKind, field: &str, context: &str) -> Self {
        ConversionMessage {
            severity,
            kind,
            field: field.to_string(),
            context: context.to_string(),
        }
    }
}

impl Display for ConversionMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.field, self.context)
    }
}

/// Per-run accumulator of messages, never drops an entry
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageLog {
    messages: Vec<ConversionMessage>,
}

impl MessageLog {
    pub fn new() -> Self {
        MessageLog::default()
    }

    pub fn push(&mut self, message: ConversionMessage) {
        self.messages.push(message);
    }

    /// Record a message built from its parts
    pub fn record(&mut self, severity: Severity, kind: MessageKind, field: &str, context: &str) {
        self.push(ConversionMessage::new(severity, kind, field, context));
    }

    pub fn extend<I: IntoIterator<Item = ConversionMessage>>(&mut self, messages: I) {
        self.messages.extend(messages);
    }

    /// Whether a message of `severity` about `field` of `context` was already recorded
    pub fn contains(&self, severity: Severity, field: &str, context: &str) -> bool {
        self.messages
            .iter()
            .any(|m| m.severity == severity && m.field == field && m.context == context)
    }

    pub fn messages(&self) -> &[ConversionMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of messages of each severity, severities with no messages are absent
    pub fn counts_by_severity(&self) -> BTreeMap<Severity, usize> {
        let mut counts = BTreeMap::new();
        for message in &self.messages {
            *counts.entry(message.severity).or_insert(0) += 1;
        }
        counts
    }

    pub fn into_messages(self) -> Vec<ConversionMessage> {
        self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_keeps_all_parts() {
        let msg = ConversionMessage::new(
            Severity::Critical,
            MessageKind::SchemaViolation,
            "id",
            "spi1",
        );
        assert_eq!(format!("{}", msg), "[CRITICAL] id: spi1");
    }

    #[test]
    fn counts_by_severity() {
        let mut log = MessageLog::new();
        log.record(Severity::Warn, MessageKind::SchemaViolation, "compartment", "a");
        log.record(Severity::Warn, MessageKind::SchemaViolation, "compartment", "b");
        log.record(Severity::Critical, MessageKind::SchemaViolation, "id", "");
        let counts = log.counts_by_severity();
        assert_eq!(counts.get(&Severity::Warn), Some(&2));
        assert_eq!(counts.get(&Severity::Critical), Some(&1));
        assert_eq!(counts.get(&Severity::None), None);
        assert_eq!(log.len(), 3);
        assert!(log.contains(Severity::Critical, "id", ""));
        assert!(!log.contains(Severity::Warn, "id", ""));
    }
}
