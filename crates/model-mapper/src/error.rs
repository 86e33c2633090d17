//! Mapper error types

use crate::key::ModelKey;
use thiserror::Error;

/// Mapper errors
#[derive(Debug, Error)]
pub enum MapperError {
    #[error("Mapping already exists (source: {source_key}, destination: {destination_key})")]
    DuplicateMapping {
        source_key: ModelKey,
        destination_key: ModelKey,
    },

    #[error("Mapping not found (source: {source_key}, destination: {destination_key})")]
    MappingNotFound {
        source_key: ModelKey,
        destination_key: ModelKey,
    },

    #[error(
        "Type mismatch for mapping {source_key} -> {destination_key}: registered {registered}, requested {requested}"
    )]
    TypeMismatch {
        source_key: ModelKey,
        destination_key: ModelKey,
        registered: String,
        requested: String,
    },

    #[error("Default mapper already initialized")]
    DefaultAlreadyInitialized,

    #[error("Lock error")]
    Lock,
}

impl MapperError {
    /// The (source, destination) pair the error refers to, if any.
    pub fn keys(&self) -> Option<(&ModelKey, &ModelKey)> {
        match self {
            MapperError::DuplicateMapping {
                source_key,
                destination_key,
            }
            | MapperError::MappingNotFound {
                source_key,
                destination_key,
            }
            | MapperError::TypeMismatch {
                source_key,
                destination_key,
                ..
            } => Some((source_key, destination_key)),
            MapperError::DefaultAlreadyInitialized | MapperError::Lock => None,
        }
    }
}

/// Result type for mapper operations
pub type Result<T> = std::result::Result<T, MapperError>;
