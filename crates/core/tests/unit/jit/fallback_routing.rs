//! Fallback Routing Tests.
//!
//! Which opcode groups `FallbackKind::route` sends to the handler under each
//! configuration, and how the routing shows up in compiled blocks.

use crate::common::builder::instruction::{add, addi, csrrw, ebreak, fadd_s, mul, r4_type};
use crate::common::harness::{TestContext, test_config};
use rstest::rstest;
use rv32jit_core::config::JitConfig;
use rv32jit_core::isa::rv32f::opcodes::{OP_FMADD, OP_FMSUB, OP_FNMADD, OP_FNMSUB};
use rv32jit_core::jit::{FallbackKind, is_block_terminator};

fn routing(op: bool, fp: bool) -> JitConfig {
    let mut config = JitConfig::default();
    config.fallback.op = op;
    config.fallback.fp = fp;
    config
}

#[rstest]
#[case::system(csrrw(1, 0x340, 2), Some(FallbackKind::System))]
#[case::ebreak(ebreak(), Some(FallbackKind::System))]
#[case::op(add(1, 2, 3), Some(FallbackKind::Op))]
#[case::op_m(mul(1, 2, 3), Some(FallbackKind::Op))]
#[case::op_fp(fadd_s(1, 2, 3), Some(FallbackKind::Fp))]
#[case::fmadd(r4_type(OP_FMADD, 1, 0, 2, 3, 4, 0), Some(FallbackKind::Fp))]
#[case::fmsub(r4_type(OP_FMSUB, 1, 0, 2, 3, 4, 0), Some(FallbackKind::Fp))]
#[case::fnmsub(r4_type(OP_FNMSUB, 1, 0, 2, 3, 4, 0), Some(FallbackKind::Fp))]
#[case::fnmadd(r4_type(OP_FNMADD, 1, 0, 2, 3, 4, 0), Some(FallbackKind::Fp))]
#[case::op_imm(addi(1, 2, 3), None)]
fn default_routing(#[case] inst: u32, #[case] expected: Option<FallbackKind>) {
    assert_eq!(FallbackKind::route(&JitConfig::default(), inst), expected);
}

#[test]
fn disabled_groups_go_to_the_backend() {
    let config = routing(false, false);
    assert_eq!(FallbackKind::route(&config, add(1, 2, 3)), None);
    assert_eq!(FallbackKind::route(&config, fadd_s(1, 2, 3)), None);
    assert_eq!(
        FallbackKind::route(&config, csrrw(0, 0x300, 0)),
        Some(FallbackKind::System)
    );
}

#[test]
fn groups_are_independent() {
    let only_op = routing(true, false);
    assert_eq!(FallbackKind::route(&only_op, add(1, 2, 3)), Some(FallbackKind::Op));
    assert_eq!(FallbackKind::route(&only_op, fadd_s(1, 2, 3)), None);

    let only_fp = routing(false, true);
    assert_eq!(FallbackKind::route(&only_fp, add(1, 2, 3)), None);
    assert_eq!(
        FallbackKind::route(&only_fp, fadd_s(1, 2, 3)),
        Some(FallbackKind::Fp)
    );
}

#[test]
fn system_terminates_blocks_but_op_does_not() {
    assert!(is_block_terminator(ebreak()));
    assert!(!is_block_terminator(add(1, 2, 3)));
    assert!(!is_block_terminator(fadd_s(1, 2, 3)));
}

#[test]
fn op_disabled_means_backend_declines_and_block_ends() {
    // The test backend cannot compile `add`, so with OP routing off the
    // block stops before it and the PC is handed to the interpreter.
    let mut config = test_config();
    config.jit.fallback.op = false;
    let mut ctx = TestContext::with_config(&config).load_program(0, &[add(1, 2, 3)]);

    assert_eq!(
        ctx.step(),
        rv32jit_core::core::cpu::StepOutcome::Uncached { pc: 0 }
    );
    assert_eq!(ctx.cpu.stats().uncached_dispatches, 1);
    assert_eq!(ctx.handler.calls().len(), 0);
}
