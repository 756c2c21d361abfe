//! Execution units and functional components.
//!
//! The core executes no opcode semantics itself; the only unit it owns is the
//! floating-point classifier, shared by every backend and fallback handler.

/// Floating-Point Unit helpers for IEEE 754 classification.
pub mod fpu;
