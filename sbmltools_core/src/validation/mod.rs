//! Attribute validation of parsed SBML documents
//!
//! Validation never mutates the document and never stops a conversion, every problem found
//! is reported as a [`ConversionMessage`] so the caller can decide whether to proceed.
pub mod message;
pub mod schema;
pub mod validator;

pub use message::{ConversionMessage, MessageKind, MessageLog, Severity};
pub use schema::{AttributeSchema, ValidationSchema};
pub use validator::validate;
