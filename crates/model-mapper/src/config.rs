//! Configuration for the mapper

use serde::{Deserialize, Serialize};

/// Mapper configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapperConfig {
    /// How `register_many` reacts to a duplicate in the batch
    #[serde(default)]
    pub batch_policy: BatchPolicy,

    /// Emit a debug event for every `map` call
    #[serde(default)]
    pub trace_mappings: bool,
}

/// Partial-failure policy for batch registration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchPolicy {
    /// Register in order and stop at the first duplicate; entries before it stay registered
    #[default]
    Sequential,

    /// Validate the whole batch first; a duplicate registers nothing
    Atomic,
}

impl MapperConfig {
    /// Load configuration from defaults, an optional file, then `MAPPER_*` environment variables
    ///
    /// Field names follow the prefix as-is: `MAPPER_BATCH_POLICY=atomic`,
    /// `MAPPER_TRACE_MAPPINGS=true`.
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&MapperConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("MAPPER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Configuration with all-or-nothing batch registration
    pub fn atomic() -> Self {
        Self {
            batch_policy: BatchPolicy::Atomic,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MapperConfig::default();
        assert_eq!(config.batch_policy, BatchPolicy::Sequential);
        assert!(!config.trace_mappings);
    }

    #[test]
    fn test_atomic_config() {
        assert_eq!(MapperConfig::atomic().batch_policy, BatchPolicy::Atomic);
    }

    #[test]
    fn test_deserialize_with_missing_fields() {
        let config: MapperConfig = serde_json::from_str(r#"{"batch_policy":"atomic"}"#).unwrap();
        assert_eq!(config.batch_policy, BatchPolicy::Atomic);
        assert!(!config.trace_mappings);
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let config = MapperConfig::load(None).unwrap();
        assert_eq!(config, MapperConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("mapper.toml");
        std::fs::write(&path, "batch_policy = \"atomic\"\ntrace_mappings = true\n").unwrap();

        let config = MapperConfig::load(path.to_str()).unwrap();
        assert_eq!(config.batch_policy, BatchPolicy::Atomic);
        assert!(config.trace_mappings);
    }
}
