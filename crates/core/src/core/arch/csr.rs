//! Control and Status Register (CSR) definitions and storage.
//!
//! This module implements the CSR subsystem for the machine-mode RV32 core. It provides:
//! 1. **Address Definitions:** Constants for every CSR the core recognizes.
//! 2. **Typed Addresses:** The closed `Csr` enumeration; any other address is unimplemented.
//! 3. **Field Masks:** Bitmasks for `mstatus`, `misa`, and the `fcsr` views.
//! 4. **Register Storage:** The `Csrs` struct holding the backed architectural state.

/// Floating-point accrued exceptions CSR address.
pub const FFLAGS: u32 = 0x001;

/// Floating-point dynamic rounding mode CSR address.
pub const FRM: u32 = 0x002;

/// Floating-point control and status CSR address.
pub const FCSR: u32 = 0x003;

/// Machine status register CSR address.
pub const MSTATUS: u32 = 0x300;

/// Machine ISA register CSR address.
pub const MISA: u32 = 0x301;

/// Machine exception delegation register CSR address.
pub const MEDELEG: u32 = 0x302;

/// Machine interrupt delegation register CSR address.
pub const MIDELEG: u32 = 0x303;

/// Machine interrupt enable register CSR address.
pub const MIE: u32 = 0x304;

/// Machine trap vector base address register CSR address.
pub const MTVEC: u32 = 0x305;

/// Machine counter enable register CSR address.
pub const MCOUNTEREN: u32 = 0x306;

/// Machine scratch register CSR address.
pub const MSCRATCH: u32 = 0x340;

/// Machine exception program counter CSR address.
pub const MEPC: u32 = 0x341;

/// Machine cause register CSR address.
pub const MCAUSE: u32 = 0x342;

/// Machine trap value register CSR address.
pub const MTVAL: u32 = 0x343;

/// Machine interrupt pending register CSR address.
pub const MIP: u32 = 0x344;

/// Cycle counter CSR address (low 32 bits).
pub const CYCLE: u32 = 0xC00;

/// Timer CSR address (low 32 bits).
pub const TIME: u32 = 0xC01;

/// Instructions retired counter CSR address (low 32 bits).
pub const INSTRET: u32 = 0xC02;

/// Cycle counter CSR address (high 32 bits).
pub const CYCLEH: u32 = 0xC80;

/// Timer CSR address (high 32 bits).
pub const TIMEH: u32 = 0xC81;

/// Instructions retired counter CSR address (high 32 bits).
pub const INSTRETH: u32 = 0xC82;

/// Machine vendor ID CSR address.
pub const MVENDORID: u32 = 0xF11;

/// Machine architecture ID CSR address.
pub const MARCHID: u32 = 0xF12;

/// Machine implementation ID CSR address.
pub const MIMPID: u32 = 0xF13;

/// Machine hardware thread ID CSR address.
pub const MHARTID: u32 = 0xF14;

/// Machine Interrupt Enable bit in `mstatus`.
pub const MSTATUS_MIE: u32 = 1 << 3;

/// Machine Previous Interrupt Enable bit in `mstatus`.
pub const MSTATUS_MPIE: u32 = 1 << 7;

/// Bit shift for the Machine Previous Privilege field in `mstatus`.
pub const MSTATUS_MPP_SHIFT: u32 = 11;

/// Machine Previous Privilege field mask in `mstatus` (bits 11-12).
pub const MSTATUS_MPP: u32 = 3 << MSTATUS_MPP_SHIFT;

/// Machine privilege level encoding.
pub const PRIV_MACHINE: u32 = 3;

/// `misa` MXL field for a 32-bit machine (bits 30-31 = 1).
pub const MISA_XLEN_32: u32 = 1 << 30;

/// `misa` extension bit for the base integer ISA ('I').
pub const MISA_EXT_I: u32 = 1 << 8;

/// `misa` extension bit for integer multiply/divide ('M').
pub const MISA_EXT_M: u32 = 1 << 12;

/// `misa` extension bit for single-precision floating point ('F').
pub const MISA_EXT_F: u32 = 1 << 5;

/// Mask of the accrued exception flags within `fcsr` (bits 0-4).
pub const FFLAGS_MASK: u32 = 0x1F;

/// Bit shift of the rounding mode within `fcsr`.
pub const FRM_SHIFT: u32 = 5;

/// Mask of the rounding mode once shifted down (3 bits).
pub const FRM_MASK: u32 = 0x7;

/// Mask of the implemented `fcsr` bits (bits 0-7).
pub const FCSR_MASK: u32 = 0xFF;

/// Mask of the trap vector base in `mtvec`; the low two bits are the mode.
pub const MTVEC_BASE_MASK: u32 = !0x3;

/// Closed set of CSR addresses recognized by the core.
///
/// Every address not listed here is unimplemented: reads return zero and
/// writes are dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Csr {
    /// `fflags` (0x001).
    Fflags,
    /// `frm` (0x002).
    Frm,
    /// `fcsr` (0x003).
    Fcsr,
    /// `mstatus` (0x300).
    Mstatus,
    /// `misa` (0x301).
    Misa,
    /// `medeleg` (0x302).
    Medeleg,
    /// `mideleg` (0x303).
    Mideleg,
    /// `mie` (0x304).
    Mie,
    /// `mtvec` (0x305).
    Mtvec,
    /// `mcounteren` (0x306).
    Mcounteren,
    /// `mscratch` (0x340).
    Mscratch,
    /// `mepc` (0x341).
    Mepc,
    /// `mcause` (0x342).
    Mcause,
    /// `mtval` (0x343).
    Mtval,
    /// `mip` (0x344).
    Mip,
    /// `cycle` (0xC00).
    Cycle,
    /// `time` (0xC01).
    Time,
    /// `instret` (0xC02).
    Instret,
    /// `cycleh` (0xC80).
    Cycleh,
    /// `timeh` (0xC81).
    Timeh,
    /// `instreth` (0xC82).
    Instreth,
    /// `mvendorid` (0xF11).
    Mvendorid,
    /// `marchid` (0xF12).
    Marchid,
    /// `mimpid` (0xF13).
    Mimpid,
    /// `mhartid` (0xF14).
    Mhartid,
}

impl Csr {
    /// Resolves a 12-bit CSR address.
    ///
    /// # Arguments
    ///
    /// * `addr` - The CSR address from the instruction's CSR field.
    ///
    /// # Returns
    ///
    /// The typed CSR, or `None` if the address is unimplemented.
    pub const fn from_addr(addr: u32) -> Option<Self> {
        Some(match addr {
            FFLAGS => Self::Fflags,
            FRM => Self::Frm,
            FCSR => Self::Fcsr,
            MSTATUS => Self::Mstatus,
            MISA => Self::Misa,
            MEDELEG => Self::Medeleg,
            MIDELEG => Self::Mideleg,
            MIE => Self::Mie,
            MTVEC => Self::Mtvec,
            MCOUNTEREN => Self::Mcounteren,
            MSCRATCH => Self::Mscratch,
            MEPC => Self::Mepc,
            MCAUSE => Self::Mcause,
            MTVAL => Self::Mtval,
            MIP => Self::Mip,
            CYCLE => Self::Cycle,
            TIME => Self::Time,
            INSTRET => Self::Instret,
            CYCLEH => Self::Cycleh,
            TIMEH => Self::Timeh,
            INSTRETH => Self::Instreth,
            MVENDORID => Self::Mvendorid,
            MARCHID => Self::Marchid,
            MIMPID => Self::Mimpid,
            MHARTID => Self::Mhartid,
            _ => return None,
        })
    }

    /// Returns the numeric address of this CSR.
    pub const fn addr(self) -> u32 {
        match self {
            Self::Fflags => FFLAGS,
            Self::Frm => FRM,
            Self::Fcsr => FCSR,
            Self::Mstatus => MSTATUS,
            Self::Misa => MISA,
            Self::Medeleg => MEDELEG,
            Self::Mideleg => MIDELEG,
            Self::Mie => MIE,
            Self::Mtvec => MTVEC,
            Self::Mcounteren => MCOUNTEREN,
            Self::Mscratch => MSCRATCH,
            Self::Mepc => MEPC,
            Self::Mcause => MCAUSE,
            Self::Mtval => MTVAL,
            Self::Mip => MIP,
            Self::Cycle => CYCLE,
            Self::Time => TIME,
            Self::Instret => INSTRET,
            Self::Cycleh => CYCLEH,
            Self::Timeh => TIMEH,
            Self::Instreth => INSTRETH,
            Self::Mvendorid => MVENDORID,
            Self::Marchid => MARCHID,
            Self::Mimpid => MIMPID,
            Self::Mhartid => MHARTID,
        }
    }
}

impl TryFrom<u32> for Csr {
    type Error = u32;

    /// Converts an address, returning it unchanged if unimplemented.
    fn try_from(addr: u32) -> Result<Self, Self::Error> {
        Self::from_addr(addr).ok_or(addr)
    }
}

/// Container for the backed Control and Status Registers.
///
/// `cycle` is a single 64-bit counter; the `cycle`, `time`, and `instret`
/// CSR addresses are all views of it. `mbadaddr` mirrors `mtval` on trap
/// entry for hosts that still read the pre-1.10 name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Csrs {
    /// 64-bit cycle counter.
    pub cycle: u64,
    /// Machine status.
    pub mstatus: u32,
    /// Machine trap vector.
    pub mtvec: u32,
    /// Machine ISA description.
    pub misa: u32,
    /// Machine trap value.
    pub mtval: u32,
    /// Machine trap cause.
    pub mcause: u32,
    /// Machine scratch.
    pub mscratch: u32,
    /// Machine exception PC.
    pub mepc: u32,
    /// Machine interrupt pending.
    pub mip: u32,
    /// Faulting address of the last trap.
    pub mbadaddr: u32,
}

impl Csrs {
    /// Creates a zeroed CSR bank with the given `misa` value.
    ///
    /// # Arguments
    ///
    /// * `misa` - The ISA description for the configured extensions.
    pub fn new(misa: u32) -> Self {
        Self {
            misa,
            ..Self::default()
        }
    }
}

/// Computes the `misa` value for an RV32IM core, with 'F' when enabled.
///
/// # Arguments
///
/// * `fp` - Whether the floating-point register file is configured in.
pub const fn misa_for(fp: bool) -> u32 {
    let base = MISA_XLEN_32 | MISA_EXT_I | MISA_EXT_M;
    if fp { base | MISA_EXT_F } else { base }
}
