//! Process-wide default mapper
//!
//! The free functions here forward to one [`Mapper`] created on first use,
//! so independent call sites can share a mapping table without passing it
//! around. Constructing another `Mapper` never replaces the default; use
//! [`install_default`] before first use to supply a configured one.

use crate::error::{MapperError, Result};
use crate::key::ModelKey;
use crate::mapper::Mapper;
use crate::transformation::MapFunction;
use std::sync::OnceLock;
use tracing::debug;

static DEFAULT_MAPPER: OnceLock<Mapper> = OnceLock::new();

/// The default mapper, created on first call
pub fn default_mapper() -> &'static Mapper {
    DEFAULT_MAPPER.get_or_init(|| {
        debug!("Creating default mapper");
        Mapper::new()
    })
}

/// Make `mapper` the default.
///
/// Fails with [`MapperError::DefaultAlreadyInitialized`] once the default
/// mapper exists, including when it was created implicitly by an earlier call.
pub fn install_default(mapper: Mapper) -> Result<&'static Mapper> {
    DEFAULT_MAPPER
        .set(mapper)
        .map_err(|_| MapperError::DefaultAlreadyInitialized)?;
    debug!("Installed default mapper");
    Ok(default_mapper())
}

/// [`Mapper::map`] on the default mapper
pub fn map<S: 'static, D: 'static>(
    source: &ModelKey,
    destination: &ModelKey,
    value: S,
) -> Result<D> {
    default_mapper().map(source, destination, value)
}

/// [`Mapper::register`] on the default mapper
pub fn register(transformation: impl Into<MapFunction>) -> Result<()> {
    default_mapper().register(transformation)
}

/// [`Mapper::register_many`] on the default mapper
pub fn register_many<I>(transformations: I) -> Result<()>
where
    I: IntoIterator,
    I::Item: Into<MapFunction>,
{
    default_mapper().register_many(transformations)
}

/// [`Mapper::delete_mapping`] on the default mapper
pub fn delete_mapping(source: &ModelKey, destination: &ModelKey) -> Result<bool> {
    default_mapper().delete_mapping(source, destination)
}

/// [`Mapper::clear`] on the default mapper
pub fn clear() -> Result<()> {
    default_mapper().clear()
}
