//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, the container for one
//! hart's architectural state. It coordinates the following:
//! 1. **State Management:** Integer registers, optional float state, PC, and CSRs.
//! 2. **Host Capabilities:** The `Io` trait object and an opaque user-data slot.
//! 3. **Translation:** The embedded [`Jit`] that compiles and caches guest blocks.
//! 4. **Lifecycle:** Construction from a [`Config`], reset, and halt.

/// Control and Status Register access protocol.
pub mod csr;

/// Block dispatch loop.
pub mod execution;

/// Trap and exception entry.
pub mod trap;

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::common::JitError;
use crate::config::Config;
use crate::core::arch::csr::{Csrs, misa_for};
use crate::core::arch::fpr::FpState;
use crate::core::arch::gpr::Gpr;
use crate::io::Io;
use crate::jit::{FallbackHandler, Jit};
use crate::stats::JitStats;

pub use self::execution::{RunExit, StepOutcome};

/// One RV32 hart.
///
/// Opcode handlers and backends manipulate the architectural fields
/// directly. The JIT is reached through [`Cpu::step_block`] and [`Cpu::run`].
pub struct Cpu {
    /// Set once the hart must stop dispatching blocks; cleared by `reset`.
    pub halt: bool,
    /// Integer register file. `x0` is not special-cased here.
    pub regs: Gpr,
    /// Program counter.
    pub pc: u32,
    /// Float register file and `fcsr`, present only with the F extension.
    pub fp: Option<FpState>,
    /// Control and Status Registers.
    pub csrs: Csrs,

    in_trap: bool,
    io: Box<dyn Io>,
    userdata: Option<Box<dyn Any>>,
    pub(crate) jit: Jit,
}

impl fmt::Debug for Cpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cpu")
            .field("halt", &self.halt)
            .field("pc", &format_args!("{:#010x}", self.pc))
            .field("regs", &self.regs)
            .field("fp", &self.fp)
            .field("csrs", &self.csrs)
            .field("in_trap", &self.in_trap)
            .field("jit", &self.jit)
            .finish_non_exhaustive()
    }
}

impl Cpu {
    /// Creates a new CPU instance.
    ///
    /// All registers start at zero, `pc` at `config.general.start_pc`, and
    /// `misa` describes the configured extensions.
    ///
    /// # Arguments
    ///
    /// * `config` - Core configuration; validated before use.
    /// * `io` - Memory and device access for this hart.
    /// * `fallback` - Handler for instructions the backend does not compile.
    ///
    /// # Returns
    ///
    /// The CPU, or an error if the configuration is invalid or the code
    /// arena could not be mapped.
    pub fn new(
        config: &Config,
        io: Box<dyn Io>,
        fallback: Rc<dyn FallbackHandler>,
    ) -> Result<Self, JitError> {
        config.validate()?;
        let jit = Jit::new(&config.jit, config.general.trace_blocks, fallback)?;
        let fp_enabled = config.extensions.fp;

        debug!(
            start_pc = config.general.start_pc,
            fp = fp_enabled,
            "cpu created"
        );

        Ok(Self {
            halt: false,
            regs: Gpr::new(),
            pc: config.general.start_pc,
            fp: fp_enabled.then(FpState::new),
            csrs: Csrs::new(misa_for(fp_enabled)),
            in_trap: false,
            io,
            userdata: None,
            jit,
        })
    }

    /// Restores the power-on state with `pc` as the reset vector.
    ///
    /// Registers and CSRs are zeroed, the halt and in-handler flags are cleared, and every
    /// compiled block is discarded. The I/O capability and user data are kept.
    pub fn reset(&mut self, pc: u32) {
        self.halt = false;
        self.in_trap = false;
        self.regs = Gpr::new();
        if let Some(fp) = self.fp.as_mut() {
            *fp = FpState::new();
        }
        self.csrs = Csrs::new(misa_for(self.fp.is_some()));
        self.pc = pc;
        self.jit.flush();
        debug!(pc, "cpu reset");
    }

    /// Stops block dispatch until the next reset.
    pub fn request_halt(&mut self) {
        if !self.halt {
            debug!(pc = self.pc, "halt requested");
        }
        self.halt = true;
    }

    /// Returns true once the hart has halted.
    pub const fn is_halted(&self) -> bool {
        self.halt
    }

    /// Returns true between trap entry and the matching `MRET`.
    pub const fn in_trap_handler(&self) -> bool {
        self.in_trap
    }

    /// The memory and device capability.
    pub fn io_mut(&mut self) -> &mut dyn Io {
        self.io.as_mut()
    }

    /// Host data attached to this hart.
    pub fn userdata(&self) -> Option<&(dyn Any + 'static)> {
        self.userdata.as_deref()
    }

    /// Host data attached to this hart, mutably.
    pub fn userdata_mut(&mut self) -> Option<&mut (dyn Any + 'static)> {
        self.userdata.as_deref_mut()
    }

    /// Attaches host data, returning whatever was attached before.
    pub fn set_userdata(&mut self, data: Box<dyn Any>) -> Option<Box<dyn Any>> {
        self.userdata.replace(data)
    }

    /// Detaches and returns the host data.
    pub fn take_userdata(&mut self) -> Option<Box<dyn Any>> {
        self.userdata.take()
    }

    /// The embedded JIT.
    pub const fn jit(&self) -> &Jit {
        &self.jit
    }

    /// The embedded JIT, mutably (for explicit flushes).
    pub const fn jit_mut(&mut self) -> &mut Jit {
        &mut self.jit
    }

    /// Translation and dispatch statistics.
    pub const fn stats(&self) -> &JitStats {
        self.jit.stats()
    }
}
