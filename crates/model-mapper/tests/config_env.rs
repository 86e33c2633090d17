//! Environment overrides for `MapperConfig::load`
//!
//! Kept in its own test binary: it mutates process environment variables.

use model_mapper::{BatchPolicy, MapperConfig};

#[test]
fn env_vars_override_defaults_and_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("mapper.toml");
    std::fs::write(&path, "trace_mappings = false\n").unwrap();

    std::env::set_var("MAPPER_BATCH_POLICY", "atomic");
    std::env::set_var("MAPPER_TRACE_MAPPINGS", "true");

    let from_env = MapperConfig::load(None);
    let over_file = MapperConfig::load(path.to_str());

    std::env::remove_var("MAPPER_BATCH_POLICY");
    std::env::remove_var("MAPPER_TRACE_MAPPINGS");

    let from_env = from_env.unwrap();
    assert_eq!(from_env.batch_policy, BatchPolicy::Atomic);
    assert!(from_env.trace_mappings);

    let over_file = over_file.unwrap();
    assert_eq!(over_file.batch_policy, BatchPolicy::Atomic);
    assert!(over_file.trace_mappings);

    assert_eq!(MapperConfig::load(None).unwrap(), MapperConfig::default());
}
