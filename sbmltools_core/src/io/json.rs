//! Module providing JSON IO for parsed documents and converted Models
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::document::SbmlDocument;
use crate::metabolic_model::model::Model;

impl SbmlDocument {
    /// Read a document an external SBML reader has dumped to JSON
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<SbmlDocument, JsonError> {
        let document_str = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) => return Err(JsonError::UnableToRead(format!("{:?}", err))),
        };
        SbmlDocument::from_json_str(&document_str)
    }

    pub fn from_json_str(json: &str) -> Result<SbmlDocument, JsonError> {
        match serde_json::from_str::<SbmlDocument>(json) {
            Ok(document) => Ok(document),
            Err(err) => Err(JsonError::UnableToParse(format!("{:?}", err))),
        }
    }
}

impl Model {
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<(), JsonError> {
        let model_string = self.to_json_string()?;
        fs::write(path, model_string)?;
        Ok(())
    }

    pub fn to_json_string(&self) -> Result<String, JsonError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Model, JsonError> {
        let model_str = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) => return Err(JsonError::UnableToRead(format!("{:?}", err))),
        };
        match serde_json::from_str::<Model>(&model_str) {
            Ok(model) => Ok(model),
            Err(err) => Err(JsonError::UnableToParse(format!("{:?}", err))),
        }
    }
}

#[derive(Error, Debug)]
pub enum JsonError {
    #[error("Unable to read file due to {0}")]
    UnableToRead(String),
    #[error("Unable to parse json due to {0}")]
    UnableToParse(String),
    #[error("Serde json error")]
    SerdeJsonError(#[from] serde_json::Error),
    #[error("Unable to write to file")]
    UnableToWrite(#[from] std::io::Error),
}
