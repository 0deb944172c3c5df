//! Import one or more parsed documents: validate, translate compartments, convert and persist
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::configuration::Configuration;
use crate::conversion::capabilities::{GeneNormalizer, ModelStore, ReferenceLookup};
use crate::conversion::converter::{ModelConverter, DEFAULT_MODEL_ID};
use crate::conversion::report::ConversionReport;
use crate::document::SbmlDocument;
use crate::validation::schema::ValidationSchema;

/// A model persisted through a [`ModelStore`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedObject {
    /// Where the model came from
    pub description: String,
    /// Reference handed back by the store
    pub reference: String,
}

/// Outcome of an import run
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportResult {
    /// Human readable summary, one entry per line
    pub message_lines: Vec<String>,
    pub objects: Vec<SavedObject>,
    /// One report per successfully converted document
    pub reports: Vec<ConversionReport>,
}

impl ImportResult {
    pub fn message(&self) -> String {
        self.message_lines.join("\n")
    }
}

/// Derive a model id from a source url: the last path segment, cut at its first `.`
///
/// # Examples
/// ```rust
/// use sbmltools_core::importer::model_id_from_url;
/// assert_eq!(
///     model_id_from_url("https://example.org/models/iML1515.xml.gz"),
///     Some("iML1515".to_string())
/// );
/// assert_eq!(model_id_from_url("https://example.org/models/"), None);
/// ```
pub fn model_id_from_url(url: &str) -> Option<String> {
    let segment = url.rsplit('/').next()?;
    let id = segment.split('.').next()?.trim();
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

/// Runs the whole pipeline over a batch of documents.
///
/// A fatal problem with one document is recorded in the result and the others still import.
pub struct SbmlImporter<'a> {
    configuration: &'a Configuration,
    schema: ValidationSchema,
    lookup: Option<&'a dyn ReferenceLookup>,
    normalizer: Option<&'a dyn GeneNormalizer>,
    store: Option<&'a dyn ModelStore>,
}

impl<'a> SbmlImporter<'a> {
    pub fn new(configuration: &'a Configuration) -> Self {
        SbmlImporter {
            configuration,
            schema: ValidationSchema::default(),
            lookup: None,
            normalizer: None,
            store: None,
        }
    }

    pub fn with_schema(mut self, schema: ValidationSchema) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_reference_lookup(mut self, lookup: &'a dyn ReferenceLookup) -> Self {
        self.lookup = Some(lookup);
        self
    }

    pub fn with_gene_normalizer(mut self, normalizer: &'a dyn GeneNormalizer) -> Self {
        self.normalizer = Some(normalizer);
        self
    }

    pub fn with_model_store(mut self, store: &'a dyn ModelStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Import `documents`, naming the model `model_name` when exactly one document is given
    pub fn import(&self, documents: &[SbmlDocument], model_name: Option<&str>) -> ImportResult {
        let mut result = ImportResult::default();
        if self.store.is_none() {
            warn!("no model store configured, converted models will not be saved");
        }
        let model_name = model_name
            .map(str::trim)
            .filter(|name| !name.is_empty() && documents.len() == 1);

        for document in documents {
            let url = document.source_url.clone().unwrap_or_default();
            let model_id = self.model_id(document, model_name);
            debug!("importing {} from {}", model_id, url);

            let mut converter = ModelConverter::new(self.configuration).with_model_id(&model_id);
            if let Some(lookup) = self.lookup {
                converter = converter.with_reference_lookup(lookup);
            }
            if let Some(normalizer) = self.normalizer {
                converter = converter.with_gene_normalizer(normalizer);
            }

            let (model, report) = match converter.run(document, &self.schema) {
                Ok(converted) => converted,
                Err(err) => {
                    warn!("unable to convert {}: {}", url, err);
                    result.message_lines.push(format!("ERROR: {} {}", url, err));
                    continue;
                }
            };

            result.message_lines.extend(self.summary_lines(&report));

            if let Some(store) = self.store {
                match store.save(&model.id, &model) {
                    Ok(reference) => {
                        info!("saved {} as {}", model.id, reference);
                        result.objects.push(SavedObject {
                            description: url.clone(),
                            reference,
                        });
                    }
                    Err(err) => {
                        warn!("{}", err);
                        result.message_lines.push(format!("ERROR: {} {}", url, err));
                    }
                }
            }
            result.reports.push(report);
        }
        result
    }

    fn model_id(&self, document: &SbmlDocument, model_name: Option<&str>) -> String {
        if let Some(name) = model_name {
            return name.to_string();
        }
        let derived = document
            .source_url
            .as_deref()
            .and_then(model_id_from_url)
            .or_else(|| document.model_id.clone().filter(|id| !id.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_MODEL_ID.to_string());
        info!("model id not given, using {}", derived);
        derived
    }

    fn summary_lines(&self, report: &ConversionReport) -> Vec<String> {
        let mut lines = vec![format!(
            "Species {}, Reactions {}, {}",
            report.species_count(),
            report.reaction_count(),
            report.source_url().unwrap_or_default()
        )];
        if !report.messages().is_empty() {
            lines.push(format!("{} {}", report.model_id(), report.severity_summary()));
        }
        if self.lookup.is_some() {
            lines.push(format!(
                "{} has_reference: {}",
                report.model_id(),
                report.reference_coverage()
            ));
            lines.push(format!("i: {}", report.resolved_references()));
        }
        if !report.biomass().is_empty() {
            let ids: Vec<&str> = report.biomass().keys().map(String::as_str).collect();
            lines.push(format!("{} biomass: {:?}", report.model_id(), ids));
        }
        lines
    }
}
