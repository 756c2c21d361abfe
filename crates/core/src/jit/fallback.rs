//! Fallback handlers for instructions the JIT does not compile.
//!
//! Some opcode groups are executed by the host interpreter instead of being
//! compiled: SYSTEM always, register-register arithmetic and floating-point
//! arithmetic depending on configuration. The host supplies one
//! [`FallbackHandler`] per CPU at construction time.

use crate::config::JitConfig;
use crate::core::Cpu;
use crate::isa::instruction::InstructionBits;
use crate::isa::privileged::opcodes::OP_SYSTEM;
use crate::isa::rv32f::opcodes::{OP_FMADD, OP_FMSUB, OP_FNMADD, OP_FNMSUB, OP_FP};
use crate::isa::rv32i::opcodes::OP_REG;

/// Instruction category routed to a fallback handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FallbackKind {
    /// Register-register arithmetic (OP, including the M extension).
    Op,
    /// Floating-point arithmetic (OP-FP and the fused multiply-add group).
    Fp,
    /// SYSTEM instructions (CSR access, ECALL, EBREAK, MRET, WFI).
    System,
}

impl FallbackKind {
    /// Picks the fallback category for an instruction, if it has one under `config`.
    ///
    /// # Returns
    ///
    /// `None` if the instruction should be compiled by the backend.
    pub fn route(config: &JitConfig, inst: u32) -> Option<Self> {
        match inst.opcode() {
            OP_SYSTEM => Some(Self::System),
            OP_REG if config.fallback.op => Some(Self::Op),
            OP_FP | OP_FMADD | OP_FMSUB | OP_FNMSUB | OP_FNMADD if config.fallback.fp => {
                Some(Self::Fp)
            }
            _ => None,
        }
    }
}

/// Host interpreter entry points for uncompiled instruction categories.
///
/// Each method must fully execute `inst` against `cpu`, including advancing
/// `cpu.pc` past it or redirecting it (e.g. by raising a trap). On entry,
/// `cpu.pc` holds the instruction's own address.
pub trait FallbackHandler {
    /// Executes a register-register arithmetic instruction.
    fn op_op(&self, cpu: &mut Cpu, inst: u32);

    /// Executes a floating-point arithmetic instruction.
    fn op_fp(&self, cpu: &mut Cpu, inst: u32);

    /// Executes a SYSTEM instruction.
    fn op_system(&self, cpu: &mut Cpu, inst: u32);
}
