//! Code Buffer Tests.
//!
//! Arena sizing, bump allocation through `CgState`, exhaustion, alignment
//! of finalized regions, rewinding orphaned code, generation-checked block
//! handles, and W^X switching.

use pretty_assertions::assert_eq;
use rv32jit_core::common::BufferFull;
use rv32jit_core::common::constants::CODE_ALIGN;
use rv32jit_core::jit::{Block, CodeBuffer, CodeRegion};

fn block_at(code: CodeRegion) -> Block {
    Block {
        instructions: 1,
        pc_start: 0,
        pc_end: 4,
        predict: None,
        code,
        hit_count: None,
    }
}

#[test]
fn capacity_rounds_up_to_pages() {
    let buffer = CodeBuffer::new(1000, true).expect("arena");
    assert!(buffer.capacity() >= 1000);
    assert_eq!(buffer.capacity() % 4096, 0);
    assert_eq!(buffer.head(), 0);
    assert_eq!(buffer.remaining(), buffer.capacity());
    assert!(!buffer.base_ptr().is_null());
}

#[test]
fn finalize_commits_and_aligns_head() {
    let mut buffer = CodeBuffer::new(4096, false).expect("arena");
    let mut cg = buffer.begin();
    assert!(cg.is_empty());
    cg.emit(&[0x90, 0x90, 0xC3]).expect("emit");
    cg.emit_u32(0xDEAD_BEEF).expect("emit");
    assert_eq!(cg.len(), 7);
    let region = cg.finalize();

    assert_eq!(region, CodeRegion { offset: 0, len: 7 });
    assert_eq!(buffer.head(), CODE_ALIGN);
    assert_eq!(
        buffer.code(region),
        Some(&[0x90, 0x90, 0xC3, 0xEF, 0xBE, 0xAD, 0xDE][..])
    );
}

#[test]
fn consecutive_regions_do_not_overlap() {
    let mut buffer = CodeBuffer::new(4096, false).expect("arena");

    let mut cg = buffer.begin();
    cg.emit(&[1_u8; 20]).expect("emit");
    let first = cg.finalize();

    let mut cg = buffer.begin();
    assert_eq!(cg.offset(), 32);
    cg.emit_u64(u64::MAX).expect("emit");
    cg.emit_u16(0x1234).expect("emit");
    cg.emit_u8(0x56).expect("emit");
    let second = cg.finalize();

    assert!(first.end() <= second.offset);
    assert_eq!(second.offset % CODE_ALIGN, 0);
    assert_eq!(buffer.code(first), Some(&[1_u8; 20][..]));
    assert_eq!(buffer.code(second).map(<[u8]>::len), Some(11));
}

#[test]
fn emit_past_end_fails_without_writing() {
    let mut buffer = CodeBuffer::new(4096, false).expect("arena");
    let capacity = buffer.capacity();

    let mut cg = buffer.begin();
    cg.emit(&vec![0xAA; capacity - 4]).expect("fill");
    assert_eq!(cg.remaining(), 4);
    assert_eq!(cg.emit(&[0; 8]), Err(BufferFull));
    assert_eq!(cg.len(), capacity - 4);
    cg.emit_u32(0).expect("exact fit");
    assert_eq!(cg.emit_u8(0), Err(BufferFull));
}

#[test]
fn abandoned_handle_leaves_head_unchanged() {
    let mut buffer = CodeBuffer::new(4096, false).expect("arena");
    {
        let mut cg = buffer.begin();
        cg.emit(&[0; 64]).expect("emit");
    }
    assert_eq!(buffer.head(), 0);
}

#[test]
fn code_outside_emitted_range_is_none() {
    let buffer = CodeBuffer::new(4096, false).expect("arena");
    let region = CodeRegion { offset: 0, len: 16 };
    assert_eq!(buffer.code(region), None);
    assert_eq!(buffer.code_ptr(region), None);
}

#[test]
fn reset_invalidates_handles() {
    let mut buffer = CodeBuffer::new(4096, false).expect("arena");
    let mut cg = buffer.begin();
    cg.emit(&[0; 4]).expect("emit");
    let region = cg.finalize();
    let handle = buffer.push_block(block_at(region));
    assert_eq!(buffer.block(handle).map(|b| b.code), Some(region));
    assert_eq!(handle.generation(), 0);

    buffer.reset();

    assert_eq!(buffer.head(), 0);
    assert_eq!(buffer.generation(), 1);
    assert!(buffer.blocks().is_empty());
    assert!(buffer.block(handle).is_none());
    assert!(buffer.block_mut(handle).is_none());

    let fresh = buffer.push_block(block_at(CodeRegion::default()));
    assert_eq!(fresh.index(), handle.index());
    assert_ne!(fresh, handle);
}

#[test]
fn rewind_abandons_unreferenced_code_only() {
    let mut buffer = CodeBuffer::new(4096, false).expect("arena");

    let mut cg = buffer.begin();
    cg.emit(&[1_u8; 8]).expect("emit");
    let kept = cg.finalize();
    let _ = buffer.push_block(block_at(kept));
    let committed = buffer.head();

    let mut cg = buffer.begin();
    cg.emit(&[2_u8; 40]).expect("emit");
    let orphan = cg.finalize();
    assert!(buffer.head() > committed);

    buffer.rewind(committed);
    assert_eq!(buffer.head(), committed);
    assert_eq!(buffer.code(orphan), None);
    assert_eq!(buffer.code(kept), Some(&[1_u8; 8][..]));

    // Never below a stored block, never forward.
    buffer.rewind(0);
    assert_eq!(buffer.head(), committed);
    buffer.rewind(buffer.capacity());
    assert_eq!(buffer.head(), committed);
}

#[test]
fn write_xor_execute_toggles_protection() {
    let mut buffer = CodeBuffer::new(4096, true).expect("arena");
    assert!(buffer.is_writable());

    let mut cg = buffer.begin();
    cg.emit(&[0xC3]).expect("emit");
    let region = cg.finalize();

    buffer.make_executable().expect("mprotect rx");
    assert!(!buffer.is_writable());
    // Executable pages stay readable.
    assert_eq!(buffer.code(region), Some(&[0xC3][..]));

    buffer.make_writable().expect("mprotect rw");
    assert!(buffer.is_writable());
    let mut cg = buffer.begin();
    cg.emit(&[0x90]).expect("emit after re-enabling writes");
}

#[test]
fn without_write_xor_execute_protection_calls_are_noops() {
    let mut buffer = CodeBuffer::new(4096, false).expect("arena");
    buffer.make_executable().expect("noop");
    assert!(buffer.is_writable());
}
