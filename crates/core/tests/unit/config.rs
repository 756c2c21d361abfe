//! Configuration Tests.
//!
//! Defaults, partial JSON documents, and the size checks `validate` applies
//! before a JIT is built.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rv32jit_core::common::ConfigError;
use rv32jit_core::config::{Config, MIN_CODE_BUFFER_SIZE};

#[test]
fn defaults_are_valid() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.general.start_pc, 0);
    assert!(!config.general.trace_blocks);
    assert!(config.extensions.fp);
    assert_eq!(config.jit.code_buffer_size, 4 * 1024 * 1024);
    assert_eq!(config.jit.block_map_entries, 4096);
    assert_eq!(config.jit.max_block_insns, 64);
    assert!(!config.jit.profile);
    assert!(config.jit.write_xor_execute);
    assert!(config.jit.fallback.op);
    assert!(config.jit.fallback.fp);
}

#[test]
fn empty_document_gives_defaults() {
    let config = Config::from_json("{}").expect("empty config");
    assert_eq!(config.jit.block_map_entries, 4096);
    assert!(config.extensions.fp);
}

#[test]
fn partial_document_overrides_only_named_fields() {
    let json = r#"{
        "general": { "trace_blocks": true },
        "jit": { "max_block_insns": 8, "fallback": { "fp": false } }
    }"#;
    let config = Config::from_json(json).expect("partial config");

    assert!(config.general.trace_blocks);
    assert_eq!(config.general.start_pc, 0);
    assert_eq!(config.jit.max_block_insns, 8);
    assert!(config.jit.fallback.op);
    assert!(!config.jit.fallback.fp);
    assert_eq!(config.jit.code_buffer_size, 4 * 1024 * 1024);
}

#[test]
fn smallest_arena_is_accepted() {
    let mut config = Config::default();
    config.jit.code_buffer_size = MIN_CODE_BUFFER_SIZE;
    assert!(config.validate().is_ok());
}

#[test]
fn undersized_arena_is_rejected() {
    let mut config = Config::default();
    config.jit.code_buffer_size = MIN_CODE_BUFFER_SIZE - 1;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::CodeBufferTooSmall(size, min))
            if size == MIN_CODE_BUFFER_SIZE - 1 && min == MIN_CODE_BUFFER_SIZE
    ));
}

#[rstest]
#[case::zero(0)]
#[case::too_small(2)]
#[case::not_power_of_two(1000)]
#[case::odd(4097)]
fn bad_map_sizes_are_rejected(#[case] entries: usize) {
    let mut config = Config::default();
    config.jit.block_map_entries = entries;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::BlockMapEntries(got, _)) if got == entries
    ));
}

#[rstest]
#[case(4)]
#[case(64)]
#[case(1 << 20)]
fn power_of_two_map_sizes_are_accepted(#[case] entries: usize) {
    let mut config = Config::default();
    config.jit.block_map_entries = entries;
    assert!(config.validate().is_ok());
}

#[test]
fn zero_block_limit_is_rejected() {
    let mut config = Config::default();
    config.jit.max_block_insns = 0;
    assert!(matches!(config.validate(), Err(ConfigError::ZeroBlockLimit)));
}

#[test]
fn from_json_validates() {
    let err = Config::from_json(r#"{ "jit": { "block_map_entries": 100 } }"#)
        .expect_err("non power of two");
    assert!(matches!(err, ConfigError::BlockMapEntries(100, _)));
}

#[rstest]
#[case::syntax("{ jit: }")]
#[case::wrong_type(r#"{ "jit": { "profile": "yes" } }"#)]
#[case::negative_size(r#"{ "jit": { "code_buffer_size": -1 } }"#)]
fn malformed_json_is_a_parse_error(#[case] json: &str) {
    let err = Config::from_json(json).expect_err("malformed");
    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(err.to_string().starts_with("failed to parse configuration"));
}
