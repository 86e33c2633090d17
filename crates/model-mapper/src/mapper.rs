//! The mapping registry
//!
//! [`Mapper`] owns a two-level table: source key, then destination key, then
//! the [`MapFunction`] converting between them. At most one function exists
//! per (source, destination) pair.

use crate::config::{BatchPolicy, MapperConfig};
use crate::error::{MapperError, Result};
use crate::key::ModelKey;
use crate::transformation::{MapFunction, MappingInfo};
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;
use tracing::{debug, warn};

type MapFunctions = HashMap<ModelKey, HashMap<ModelKey, MapFunction>>;

/// Registry of conversion functions between model keys
///
/// ```
/// use model_mapper::{Mapper, Transformation};
///
/// struct Foo { name: String }
/// struct Bar { title: String }
///
/// let mapper = Mapper::new();
/// mapper
///     .register(Transformation::between(|foo: Foo| Bar { title: foo.name }))
///     .unwrap();
///
/// let bar: Bar = mapper
///     .map_between(Foo { name: "foo name".into() })
///     .unwrap();
/// assert_eq!(bar.title, "foo name");
/// ```
pub struct Mapper {
    config: MapperConfig,
    map_functions: RwLock<MapFunctions>,
}

impl Mapper {
    /// Create a mapper with the default configuration
    pub fn new() -> Self {
        Self::with_config(MapperConfig::default())
    }

    /// Create a mapper with an explicit configuration
    pub fn with_config(config: MapperConfig) -> Self {
        Self {
            config,
            map_functions: RwLock::new(HashMap::new()),
        }
    }

    /// The configuration this mapper was built with
    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Register a single transformation.
    ///
    /// Fails with [`MapperError::DuplicateMapping`] if the pair already has one;
    /// the registered function is left in place.
    pub fn register(&self, transformation: impl Into<MapFunction>) -> Result<()> {
        let map_function = transformation.into();
        let mut map_functions = self.map_functions.write().map_err(|_| MapperError::Lock)?;
        Self::insert(&mut map_functions, map_function)
    }

    /// Register several transformations.
    ///
    /// With [`BatchPolicy::Sequential`] entries are inserted in order and the
    /// first duplicate aborts the batch, leaving the earlier entries of the
    /// batch registered. With [`BatchPolicy::Atomic`] the batch is checked
    /// first and nothing is inserted on a duplicate.
    pub fn register_many<I>(&self, transformations: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<MapFunction>,
    {
        let batch: Vec<MapFunction> = transformations.into_iter().map(Into::into).collect();
        let mut map_functions = self.map_functions.write().map_err(|_| MapperError::Lock)?;

        if self.config.batch_policy == BatchPolicy::Atomic {
            Self::check_batch(&map_functions, &batch)?;
        }

        let count = batch.len();
        for map_function in batch {
            Self::insert(&mut map_functions, map_function)?;
        }

        debug!(count, "Registered mapping batch");
        Ok(())
    }

    /// Convert `value` with the function registered for `source -> destination`.
    ///
    /// The function runs after the registry lock is released, so it may map
    /// nested values through the same mapper.
    pub fn map<S: 'static, D: 'static>(
        &self,
        source: &ModelKey,
        destination: &ModelKey,
        value: S,
    ) -> Result<D> {
        let map_function = self.find_mapping(source, destination)?.ok_or_else(|| {
            MapperError::MappingNotFound {
                source_key: source.clone(),
                destination_key: destination.clone(),
            }
        })?;

        let transformation = map_function.typed::<S, D>().inspect_err(|e| {
            warn!(error = %e, "Mapping called with wrong value types");
        })?;

        if self.config.trace_mappings {
            debug!(source = %source, destination = %destination, "Mapping value");
        }

        Ok(transformation.apply(value))
    }

    /// [`Mapper::map`] keyed by the value types themselves
    pub fn map_between<S: 'static, D: 'static>(&self, value: S) -> Result<D> {
        self.map(&ModelKey::of::<S>(), &ModelKey::of::<D>(), value)
    }

    /// Remove the function for a pair. Absent pairs are ignored.
    ///
    /// Returns whether a function was removed.
    pub fn delete_mapping(&self, source: &ModelKey, destination: &ModelKey) -> Result<bool> {
        let mut map_functions = self.map_functions.write().map_err(|_| MapperError::Lock)?;
        let removed = match map_functions.get_mut(source) {
            Some(by_destination) => {
                let removed = by_destination.remove(destination).is_some();
                if by_destination.is_empty() {
                    map_functions.remove(source);
                }
                removed
            }
            None => false,
        };

        if removed {
            debug!(source = %source, destination = %destination, "Mapping deleted");
        }
        Ok(removed)
    }

    /// Remove every registered function
    pub fn clear(&self) -> Result<()> {
        let mut map_functions = self.map_functions.write().map_err(|_| MapperError::Lock)?;
        map_functions.clear();
        debug!("Mappings cleared");
        Ok(())
    }

    /// Whether a function is registered for the pair
    pub fn contains(&self, source: &ModelKey, destination: &ModelKey) -> Result<bool> {
        Ok(self.find_mapping(source, destination)?.is_some())
    }

    /// Number of registered pairs
    pub fn len(&self) -> Result<usize> {
        let map_functions = self.map_functions.read().map_err(|_| MapperError::Lock)?;
        Ok(map_functions.values().map(HashMap::len).sum())
    }

    /// Whether no pair is registered
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Describe every registered mapping, in no particular order
    pub fn mappings(&self) -> Result<Vec<MappingInfo>> {
        let map_functions = self.map_functions.read().map_err(|_| MapperError::Lock)?;
        Ok(map_functions
            .values()
            .flat_map(HashMap::values)
            .map(MapFunction::info)
            .collect())
    }

    #[cfg(test)]
    fn source_buckets(&self) -> Result<usize> {
        let map_functions = self.map_functions.read().map_err(|_| MapperError::Lock)?;
        Ok(map_functions.len())
    }

    fn find_mapping(
        &self,
        source: &ModelKey,
        destination: &ModelKey,
    ) -> Result<Option<MapFunction>> {
        let map_functions = self.map_functions.read().map_err(|_| MapperError::Lock)?;
        Ok(map_functions
            .get(source)
            .and_then(|by_destination| by_destination.get(destination))
            .cloned())
    }

    fn insert(map_functions: &mut MapFunctions, map_function: MapFunction) -> Result<()> {
        let by_destination = map_functions
            .entry(map_function.source().clone())
            .or_default();

        if by_destination.contains_key(map_function.destination()) {
            warn!(
                source = %map_function.source(),
                destination = %map_function.destination(),
                "Rejected duplicate mapping"
            );
            return Err(MapperError::DuplicateMapping {
                source_key: map_function.source().clone(),
                destination_key: map_function.destination().clone(),
            });
        }

        debug!(
            source = %map_function.source(),
            destination = %map_function.destination(),
            signature = %map_function.signature(),
            "Mapping registered"
        );
        by_destination.insert(map_function.destination().clone(), map_function);
        Ok(())
    }

    fn check_batch(map_functions: &MapFunctions, batch: &[MapFunction]) -> Result<()> {
        let mut seen = HashSet::new();
        for map_function in batch {
            let pair = (map_function.source(), map_function.destination());
            let registered = map_functions
                .get(pair.0)
                .is_some_and(|by_destination| by_destination.contains_key(pair.1));

            if registered || !seen.insert(pair) {
                warn!(
                    source = %pair.0,
                    destination = %pair.1,
                    "Rejected mapping batch with duplicate"
                );
                return Err(MapperError::DuplicateMapping {
                    source_key: pair.0.clone(),
                    destination_key: pair.1.clone(),
                });
            }
        }
        Ok(())
    }
}

impl Default for Mapper {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Mapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mapper")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
