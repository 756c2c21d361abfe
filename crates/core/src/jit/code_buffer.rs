//! Code Buffer (arena) for translated blocks.
//!
//! This module implements the fixed-capacity region native code is emitted into.
//! It provides:
//! 1. **Arena:** An anonymous `mmap` mapping `[start, end)` with a bump `head`.
//! 2. **Block Table:** The headers of every block compiled since the last reset,
//!    addressed by generation-tagged [`BlockRef`]s.
//! 3. **Emission Handle:** [`CgState`], which appends bytes at `head` and is
//!    consumed by `finalize`, after which the region is read-only.
//! 4. **W^X:** Optional switching between writable and executable protection.
//!
//! There is no per-block free. `reset` rewinds `head`, drops every header,
//! and bumps the generation so outstanding handles stop resolving.

use std::io;
use std::ptr;

use tracing::warn;

use crate::common::constants::CODE_ALIGN;
use crate::common::{BufferFull, JitError};
use crate::jit::block::{Block, BlockRef, CodeRegion};

/// JIT code arena backed by mmap'd memory.
#[derive(Debug)]
pub struct CodeBuffer {
    ptr: *mut u8,
    size: usize,
    head: usize,
    blocks: Vec<Block>,
    generation: u32,
    write_xor_execute: bool,
    writable: bool,
}

impl CodeBuffer {
    /// Maps a new arena of at least `size` bytes (rounded up to the page size).
    ///
    /// # Arguments
    ///
    /// * `size` - Requested capacity in bytes.
    /// * `write_xor_execute` - Keep the arena either writable or executable.
    ///   When false the mapping is read/write/execute for its whole lifetime.
    ///
    /// # Returns
    ///
    /// The arena, or `JitError::Map` if the host refused the mapping.
    pub fn new(size: usize, write_xor_execute: bool) -> Result<Self, JitError> {
        let page = page_size();
        let size = size.max(1).div_ceil(page) * page;
        let prot = if write_xor_execute {
            libc::PROT_READ | libc::PROT_WRITE
        } else {
            libc::PROT_READ | libc::PROT_WRITE | libc::PROT_EXEC
        };

        // SAFETY: anonymous private mapping with no file backing; the result
        // is checked against MAP_FAILED before use.
        let ptr = unsafe {
            libc::mmap(
                ptr::null_mut(),
                size,
                prot,
                libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
                -1,
                0,
            )
        };

        if ptr == libc::MAP_FAILED {
            return Err(JitError::Map {
                size,
                source: io::Error::last_os_error(),
            });
        }

        Ok(Self {
            ptr: ptr.cast::<u8>(),
            size,
            head: 0,
            blocks: Vec::new(),
            generation: 0,
            write_xor_execute,
            writable: true,
        })
    }

    /// Total capacity in bytes.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.size
    }

    /// Current write cursor, as an offset from the start of the arena.
    #[inline]
    pub const fn head(&self) -> usize {
        self.head
    }

    /// Bytes left between `head` and the end of the arena.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.size - self.head
    }

    /// Number of resets performed so far.
    #[inline]
    pub const fn generation(&self) -> u32 {
        self.generation
    }

    /// Raw pointer to the start of the arena.
    #[inline]
    pub const fn base_ptr(&self) -> *const u8 {
        self.ptr.cast_const()
    }

    /// Returns true while the arena is mapped writable.
    #[inline]
    pub const fn is_writable(&self) -> bool {
        self.writable
    }

    /// Headers of every block compiled since the last reset.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Resolves a block handle.
    ///
    /// # Returns
    ///
    /// The block, or `None` if the handle predates the last reset.
    #[inline]
    pub fn block(&self, block: BlockRef) -> Option<&Block> {
        if block.generation != self.generation {
            return None;
        }
        self.blocks.get(block.index as usize)
    }

    /// Resolves a block handle mutably.
    #[inline]
    pub fn block_mut(&mut self, block: BlockRef) -> Option<&mut Block> {
        if block.generation != self.generation {
            return None;
        }
        self.blocks.get_mut(block.index as usize)
    }

    /// Stores a finalized block header and returns its handle.
    pub fn push_block(&mut self, block: Block) -> BlockRef {
        let handle = BlockRef {
            index: self.blocks.len() as u32,
            generation: self.generation,
        };
        self.blocks.push(block);
        handle
    }

    /// Returns the bytes of a code region.
    ///
    /// # Returns
    ///
    /// The bytes, or `None` if the region lies outside the emitted part of the arena.
    pub fn code(&self, region: CodeRegion) -> Option<&[u8]> {
        if region.end() > self.head {
            return None;
        }
        // SAFETY: offset..end lies below head, so it is mapped and was written.
        Some(unsafe { std::slice::from_raw_parts(self.ptr.add(region.offset), region.len) })
    }

    /// Raw pointer to the first byte of a code region.
    ///
    /// # Returns
    ///
    /// The pointer, or `None` if the region lies outside the emitted part of the arena.
    pub fn code_ptr(&self, region: CodeRegion) -> Option<*const u8> {
        if region.end() > self.head {
            return None;
        }
        // SAFETY: offset is within the mapping.
        Some(unsafe { self.ptr.add(region.offset).cast_const() })
    }

    /// Opens an emission handle at `head`.
    ///
    /// The arena must be writable; callers switch it with [`Self::make_writable`] first.
    pub fn begin(&mut self) -> CgState<'_> {
        let start = self.head;
        CgState {
            buffer: self,
            start,
            len: 0,
        }
    }

    /// Moves the write cursor back to `head`, dropping code no stored block references.
    ///
    /// Used to abandon a finalized region whose header was never pushed.
    /// The cursor never moves forward and never drops below the code of the
    /// last stored block.
    pub fn rewind(&mut self, head: usize) {
        let floor = self.blocks.last().map_or(0, |block| {
            block
                .code
                .end()
                .next_multiple_of(CODE_ALIGN)
                .min(self.size)
        });
        self.head = head.max(floor).min(self.head);
    }

    /// Discards every block and rewinds `head` to the start of the arena.
    ///
    /// All handles issued before the call stop resolving.
    pub fn reset(&mut self) {
        self.head = 0;
        self.blocks.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    /// Makes the arena writable and non-executable (no-op without W^X).
    pub fn make_writable(&mut self) -> Result<(), JitError> {
        if !self.write_xor_execute || self.writable {
            return Ok(());
        }
        self.protect(libc::PROT_READ | libc::PROT_WRITE)?;
        self.writable = true;
        Ok(())
    }

    /// Makes the arena executable and non-writable (no-op without W^X).
    pub fn make_executable(&mut self) -> Result<(), JitError> {
        if !self.write_xor_execute || !self.writable {
            return Ok(());
        }
        self.protect(libc::PROT_READ | libc::PROT_EXEC)?;
        self.writable = false;
        Ok(())
    }

    fn protect(&self, prot: libc::c_int) -> Result<(), JitError> {
        // SAFETY: ptr..ptr+size is exactly the mapping created in `new`.
        let ret = unsafe { libc::mprotect(self.ptr.cast::<libc::c_void>(), self.size, prot) };
        if ret == 0 {
            Ok(())
        } else {
            Err(JitError::Protect(io::Error::last_os_error()))
        }
    }
}

impl Drop for CodeBuffer {
    fn drop(&mut self) {
        // SAFETY: ptr..ptr+size is the mapping created in `new`, unmapped once.
        let ret = unsafe { libc::munmap(self.ptr.cast::<libc::c_void>(), self.size) };
        if ret != 0 {
            warn!(
                size = self.size,
                error = %io::Error::last_os_error(),
                "failed to unmap code buffer"
            );
        }
    }
}

/// Emission handle for one block.
///
/// Bytes are written directly into the arena starting at the `head` the
/// handle was opened at. `head` itself only moves when the handle is
/// finalized, so dropping an unfinished handle abandons its bytes.
#[derive(Debug)]
pub struct CgState<'a> {
    buffer: &'a mut CodeBuffer,
    start: usize,
    len: usize,
}

impl CgState<'_> {
    /// Appends raw native instruction bytes.
    ///
    /// # Returns
    ///
    /// `Err(BufferFull)` if the bytes would cross the end of the arena;
    /// nothing is written in that case.
    pub fn emit(&mut self, bytes: &[u8]) -> Result<(), BufferFull> {
        let at = self.start + self.len;
        if bytes.len() > self.buffer.size - at {
            return Err(BufferFull);
        }
        // SAFETY: at + bytes.len() <= size, and the source is a separate allocation.
        unsafe {
            ptr::copy_nonoverlapping(bytes.as_ptr(), self.buffer.ptr.add(at), bytes.len());
        }
        self.len += bytes.len();
        Ok(())
    }

    /// Appends one byte.
    #[inline]
    pub fn emit_u8(&mut self, val: u8) -> Result<(), BufferFull> {
        self.emit(&[val])
    }

    /// Appends a little-endian halfword.
    #[inline]
    pub fn emit_u16(&mut self, val: u16) -> Result<(), BufferFull> {
        self.emit(&val.to_le_bytes())
    }

    /// Appends a little-endian word.
    #[inline]
    pub fn emit_u32(&mut self, val: u32) -> Result<(), BufferFull> {
        self.emit(&val.to_le_bytes())
    }

    /// Appends a little-endian doubleword.
    #[inline]
    pub fn emit_u64(&mut self, val: u64) -> Result<(), BufferFull> {
        self.emit(&val.to_le_bytes())
    }

    /// Bytes emitted so far.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if nothing has been emitted yet.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes still available before the end of the arena.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.buffer.size - self.start - self.len
    }

    /// Arena offset of the first byte of this block's code.
    #[inline]
    pub const fn offset(&self) -> usize {
        self.start
    }

    /// Address the first byte of this block's code is written to.
    ///
    /// Backends use it to compute PC-relative displacements.
    #[inline]
    pub fn code_ptr(&self) -> *const u8 {
        // SAFETY: start <= size, so the result is within or one past the mapping.
        unsafe { self.buffer.ptr.add(self.start).cast_const() }
    }

    /// Closes the handle and commits the emitted bytes.
    ///
    /// `head` advances to the next [`CODE_ALIGN`] boundary after the code.
    ///
    /// # Returns
    ///
    /// The region the block's code occupies.
    pub fn finalize(self) -> CodeRegion {
        let region = CodeRegion {
            offset: self.start,
            len: self.len,
        };
        self.buffer.head = region
            .end()
            .next_multiple_of(CODE_ALIGN)
            .min(self.buffer.size);
        region
    }
}

fn page_size() -> usize {
    // SAFETY: sysconf is always safe to call.
    let page = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    usize::try_from(page).unwrap_or(4096).max(1)
}
