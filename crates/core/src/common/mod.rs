//! Common utilities and types used throughout the emulator core.
//!
//! This module provides building blocks shared across all components. It includes:
//! 1. **Constants:** Instruction sizes, alignment masks, and code-arena tuning values.
//! 2. **Error Handling:** The architectural `Trap` vocabulary and host-level error types.

/// Common constants used throughout the core.
pub mod constants;

/// Error types and trap definitions.
pub mod error;

pub use error::{BufferFull, ConfigError, JitError, MapFull, Trap};
