//! RV32 emulator core with a block-based JIT translation cache.
//!
//! This crate implements the private core of an RV32 emulator with the following:
//! 1. **ISA:** Bit-exact field and immediate decoding for every RV32 instruction format.
//! 2. **Core:** Integer/float register files, program counter, CSR bank, and halt flag.
//! 3. **Traps:** The machine-mode exception vocabulary and trap-entry sequence.
//! 4. **JIT:** Translation blocks, the code arena, the block map, and the controller
//!    that compiles, caches, and dispatches basic blocks.
//! 5. **Support:** Configuration, I/O capability, and runtime statistics.
//!
//! Native code emission is supplied by the host through the [`jit::CodeGen`] trait;
//! opcodes the JIT does not compile are routed to a host [`jit::FallbackHandler`].

/// Common types and constants (instruction sizes, traps, host errors).
pub mod common;
/// Core configuration (extensions, JIT sizing, fallback routing).
pub mod config;
/// CPU core (architectural state, CSR protocol, traps, block dispatch, FPU classifier).
pub mod core;
/// I/O capability attached to the CPU.
pub mod io;
/// Instruction set (bit fields, decoder, opcodes, trap causes).
pub mod isa;
/// Translation cache (blocks, code buffer, block map, codegen contract, controller).
pub mod jit;
/// Runtime statistics for block compilation and dispatch.
pub mod stats;

/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Main CPU type; holds architectural state and the embedded JIT.
pub use crate::core::Cpu;
/// I/O capability trait the CPU fetches instructions through.
pub use crate::io::Io;
