//! # Unit Components
//!
//! This module serves as the central hub for the core's unit tests, grouped
//! the same way the crate is: ISA decoding, CPU state, and the JIT.

/// Unit tests for configuration parsing, defaults, and validation.
pub mod config;

/// Unit tests for the CPU state, CSR protocol, traps, and the FP classifier.
pub mod core;
