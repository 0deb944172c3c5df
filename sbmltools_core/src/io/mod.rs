//! Module for reading documents and writing converted Models
pub mod gpr_parse;
pub mod json;
