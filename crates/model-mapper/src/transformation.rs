//! Transformation records
//!
//! A [`Transformation`] pairs a source key, a destination key and the
//! function converting one into the other. The registry stores it as a
//! [`MapFunction`], which erases `S` and `D` so that entries for different
//! types can share one table.

use crate::error::{MapperError, Result};
use crate::key::ModelKey;
use serde::{Deserialize, Serialize};
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

type ConvertFn<S, D> = Arc<dyn Fn(S) -> D + Send + Sync>;

/// A conversion function between two model keys
pub struct Transformation<S, D> {
    source: ModelKey,
    destination: ModelKey,
    convert: ConvertFn<S, D>,
}

impl<S: 'static, D: 'static> Transformation<S, D> {
    /// Create a transformation between arbitrary keys
    pub fn new<F>(source: ModelKey, destination: ModelKey, convert: F) -> Self
    where
        F: Fn(S) -> D + Send + Sync + 'static,
    {
        Self {
            source,
            destination,
            convert: Arc::new(convert),
        }
    }

    /// Create a transformation keyed by the types `S` and `D`
    pub fn between<F>(convert: F) -> Self
    where
        F: Fn(S) -> D + Send + Sync + 'static,
    {
        Self::new(ModelKey::of::<S>(), ModelKey::of::<D>(), convert)
    }

    /// Key of the value the function accepts
    pub fn source(&self) -> &ModelKey {
        &self.source
    }

    /// Key of the value the function returns
    pub fn destination(&self) -> &ModelKey {
        &self.destination
    }

    /// Run the conversion
    pub fn apply(&self, value: S) -> D {
        (self.convert)(value)
    }
}

impl<S, D> Clone for Transformation<S, D> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            destination: self.destination.clone(),
            convert: Arc::clone(&self.convert),
        }
    }
}

impl<S, D> fmt::Debug for Transformation<S, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transformation")
            .field("source", &self.source)
            .field("destination", &self.destination)
            .field("signature", &signature::<S, D>())
            .finish()
    }
}

/// A registered transformation with its value types erased
#[derive(Clone)]
pub struct MapFunction {
    source: ModelKey,
    destination: ModelKey,
    source_type: &'static str,
    destination_type: &'static str,
    convert: Arc<dyn Any + Send + Sync>,
}

impl MapFunction {
    /// Key of the value the function accepts
    pub fn source(&self) -> &ModelKey {
        &self.source
    }

    /// Key of the value the function returns
    pub fn destination(&self) -> &ModelKey {
        &self.destination
    }

    /// `"S -> D"` for the registered value types
    pub fn signature(&self) -> String {
        format!("{} -> {}", self.source_type, self.destination_type)
    }

    /// Recover the typed transformation.
    ///
    /// Fails with [`MapperError::TypeMismatch`] when the entry was registered
    /// for value types other than `S` and `D`.
    pub fn typed<S: 'static, D: 'static>(&self) -> Result<Transformation<S, D>> {
        match self.convert.downcast_ref::<ConvertFn<S, D>>() {
            Some(convert) => Ok(Transformation {
                source: self.source.clone(),
                destination: self.destination.clone(),
                convert: Arc::clone(convert),
            }),
            None => Err(MapperError::TypeMismatch {
                source_key: self.source.clone(),
                destination_key: self.destination.clone(),
                registered: self.signature(),
                requested: signature::<S, D>(),
            }),
        }
    }

    /// Serializable description of this entry
    pub fn info(&self) -> MappingInfo {
        MappingInfo {
            source: self.source.to_string(),
            destination: self.destination.to_string(),
            source_type: self.source_type.to_string(),
            destination_type: self.destination_type.to_string(),
        }
    }
}

impl<S: 'static, D: 'static> From<Transformation<S, D>> for MapFunction {
    fn from(transformation: Transformation<S, D>) -> Self {
        Self {
            source: transformation.source,
            destination: transformation.destination,
            source_type: type_name::<S>(),
            destination_type: type_name::<D>(),
            convert: Arc::new(transformation.convert),
        }
    }
}

impl fmt::Debug for MapFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapFunction")
            .field("source", &self.source)
            .field("destination", &self.destination)
            .field("signature", &self.signature())
            .finish()
    }
}

/// Description of a registered mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingInfo {
    /// Source key, as displayed
    pub source: String,

    /// Destination key, as displayed
    pub destination: String,

    /// Rust type the function accepts
    pub source_type: String,

    /// Rust type the function returns
    pub destination_type: String,
}

fn signature<S, D>() -> String {
    format!("{} -> {}", type_name::<S>(), type_name::<D>())
}
