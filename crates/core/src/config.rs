//! Configuration system for the emulator core.
//!
//! This module defines the configuration structures used to parameterize the
//! core. It provides:
//! 1. **Defaults:** Baseline values for the reset vector, arena size, and map capacity.
//! 2. **Structures:** Hierarchical config for general settings, ISA extensions, and the JIT.
//! 3. **Validation:** Rejection of sizes the translation cache cannot work with.
//!
//! Configuration is supplied as JSON by the host or built with `Config::default()`.

use serde::Deserialize;

use crate::common::ConfigError;
use crate::common::constants::{MIN_BLOCK_MAP_ENTRIES, MIN_CODE_HEADROOM};

/// Default configuration constants for the core.
mod defaults {
    /// Reset vector used when none is configured.
    pub const START_PC: u32 = 0;

    /// Code arena size (4 MiB).
    pub const CODE_BUFFER_SIZE: usize = 4 * 1024 * 1024;

    /// Block map slot count. Must be a power of two.
    pub const BLOCK_MAP_ENTRIES: usize = 4096;

    /// Maximum guest instructions compiled into one block.
    pub const MAX_BLOCK_INSNS: u32 = 64;
}

/// Smallest code arena accepted by [`Config::validate`].
pub const MIN_CODE_BUFFER_SIZE: usize = 4 * MIN_CODE_HEADROOM;

/// Root configuration structure for the core.
///
/// Every field has a default, so a partial JSON document is enough.
///
/// # Example (JSON)
///
/// ```
/// use rv32jit_core::config::Config;
///
/// let json = r#"{
///     "general": { "start_pc": 2147483648 },
///     "extensions": { "fp": false },
///     "jit": {
///         "block_map_entries": 1024,
///         "profile": true,
///         "fallback": { "op": false }
///     }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.general.start_pc, 0x8000_0000);
/// assert!(!config.extensions.fp);
/// assert_eq!(config.jit.block_map_entries, 1024);
/// assert!(config.jit.fallback.fp);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Optional ISA extensions
    #[serde(default)]
    pub extensions: ExtensionsConfig,
    /// Translation cache settings
    #[serde(default)]
    pub jit: JitConfig,
}

impl Config {
    /// Parses and validates a JSON configuration document.
    ///
    /// # Arguments
    ///
    /// * `json` - The JSON text to parse.
    ///
    /// # Returns
    ///
    /// The validated configuration, or the parse or validation error.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the JIT sizes are usable.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the arena, map, and block limit are all acceptable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let jit = &self.jit;
        if jit.code_buffer_size < MIN_CODE_BUFFER_SIZE {
            return Err(ConfigError::CodeBufferTooSmall(
                jit.code_buffer_size,
                MIN_CODE_BUFFER_SIZE,
            ));
        }
        if !jit.block_map_entries.is_power_of_two()
            || jit.block_map_entries < MIN_BLOCK_MAP_ENTRIES
        {
            return Err(ConfigError::BlockMapEntries(
                jit.block_map_entries,
                MIN_BLOCK_MAP_ENTRIES,
            ));
        }
        if jit.max_block_insns == 0 {
            return Err(ConfigError::ZeroBlockLimit);
        }
        Ok(())
    }
}

/// General settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Reset vector loaded into the PC at construction
    #[serde(default = "GeneralConfig::default_start_pc")]
    pub start_pc: u32,

    /// Log every compiled block at debug level
    #[serde(default)]
    pub trace_blocks: bool,
}

impl GeneralConfig {
    /// Returns the default starting program counter.
    fn default_start_pc() -> u32 {
        defaults::START_PC
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            start_pc: Self::default_start_pc(),
            trace_blocks: false,
        }
    }
}

/// Optional ISA extensions.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtensionsConfig {
    /// Single-precision floating point (F): adds the float register file and `fcsr`
    #[serde(default = "ExtensionsConfig::default_fp")]
    pub fp: bool,
}

impl ExtensionsConfig {
    fn default_fp() -> bool {
        true
    }
}

impl Default for ExtensionsConfig {
    fn default() -> Self {
        Self {
            fp: Self::default_fp(),
        }
    }
}

/// Translation cache settings.
#[derive(Debug, Clone, Deserialize)]
pub struct JitConfig {
    /// Code arena size in bytes (rounded up to the host page size)
    #[serde(default = "JitConfig::default_code_buffer_size")]
    pub code_buffer_size: usize,

    /// Block map slot count (power of two)
    #[serde(default = "JitConfig::default_block_map_entries")]
    pub block_map_entries: usize,

    /// Instruction cap per compiled block
    #[serde(default = "JitConfig::default_max_block_insns")]
    pub max_block_insns: u32,

    /// Keep a per-block execution counter
    #[serde(default)]
    pub profile: bool,

    /// Keep the arena either writable or executable, never both
    #[serde(default = "JitConfig::default_write_xor_execute")]
    pub write_xor_execute: bool,

    /// Opcode groups routed to the fallback handler instead of the backend
    #[serde(default)]
    pub fallback: FallbackConfig,
}

impl JitConfig {
    fn default_code_buffer_size() -> usize {
        defaults::CODE_BUFFER_SIZE
    }

    fn default_block_map_entries() -> usize {
        defaults::BLOCK_MAP_ENTRIES
    }

    fn default_max_block_insns() -> u32 {
        defaults::MAX_BLOCK_INSNS
    }

    fn default_write_xor_execute() -> bool {
        true
    }
}

impl Default for JitConfig {
    fn default() -> Self {
        Self {
            code_buffer_size: Self::default_code_buffer_size(),
            block_map_entries: Self::default_block_map_entries(),
            max_block_insns: Self::default_max_block_insns(),
            profile: false,
            write_xor_execute: Self::default_write_xor_execute(),
            fallback: FallbackConfig::default(),
        }
    }
}

/// Fallback routing for opcode groups the backend may not compile.
///
/// SYSTEM instructions always go through the fallback handler.
#[derive(Debug, Clone, Deserialize)]
pub struct FallbackConfig {
    /// Route register-register arithmetic (OP) to the handler
    #[serde(default = "FallbackConfig::default_enabled")]
    pub op: bool,

    /// Route floating-point arithmetic (OP-FP and fused multiply-add) to the handler
    #[serde(default = "FallbackConfig::default_enabled")]
    pub fp: bool,
}

impl FallbackConfig {
    fn default_enabled() -> bool {
        true
    }
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            op: Self::default_enabled(),
            fp: Self::default_enabled(),
        }
    }
}
