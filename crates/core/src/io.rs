//! I/O capability attached to the CPU.
//!
//! The memory and device subsystem lives outside the core. The CPU holds it
//! as an opaque `Io` trait object; the core itself only ever calls
//! [`Io::fetch_u32`] while compiling blocks. The load and store methods are
//! for opcode handlers and backends.

/// Memory access capability for one hart.
///
/// Implementations decide how addresses map to RAM and devices. None of the
/// methods can fail from the core's point of view; bus errors are the
/// implementation's concern.
pub trait Io {
    /// Fetches a 32-bit instruction word.
    fn fetch_u32(&mut self, addr: u32) -> u32;

    /// Loads a 32-bit word.
    fn read_u32(&mut self, addr: u32) -> u32;

    /// Loads a 16-bit halfword.
    fn read_u16(&mut self, addr: u32) -> u16;

    /// Loads a byte.
    fn read_u8(&mut self, addr: u32) -> u8;

    /// Stores a 32-bit word.
    fn write_u32(&mut self, addr: u32, val: u32);

    /// Stores a 16-bit halfword.
    fn write_u16(&mut self, addr: u32, val: u16);

    /// Stores a byte.
    fn write_u8(&mut self, addr: u32, val: u8);
}
