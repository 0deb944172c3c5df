//! Core rust implementation of sbmltools, a crate for converting SBML genome scale metabolic
//! models into typed models ready for flux balance analysis.
//!
//! The pipeline is validate ([`validation`]), translate compartments and convert
//! ([`conversion`]), with [`importer`] running it over a batch of documents.

pub mod configuration;
pub mod conversion;
pub mod document;
pub mod importer;
pub mod io;
pub mod metabolic_model;
pub mod validation;
mod utils;
