use libisa::instruction::{kind::InstructionKind, Instruction};

use super::Datapath;
use crate::{
    alu::{flags::ALUFlags, AluOp},
    control::{ControlSignals, ControlUnit},
};

fn execute(datapath: &mut Datapath, kind: InstructionKind, rd: usize, rs1: usize, x: usize) {
    let instruction = Instruction::from_fields(kind, rd, rs1, x);
    let signals = ControlUnit::new().generate_signals(&instruction, datapath.flags());
    datapath.execute_cycle(&signals, &instruction);
}

#[test]
fn fetch_is_little_endian_and_wraps() {
    let mut datapath = Datapath::new();
    datapath.memory.load_program(&[0x12, 0x40], 0x10);
    datapath.pc.load(0x10);
    assert_eq!(datapath.fetch_instruction(), 0x4012);

    datapath.memory.write(0xFF, 0xF0, true);
    datapath.memory.write(0x00, 0x0A, true);
    datapath.pc.load(0xFF);
    assert_eq!(datapath.fetch_instruction(), 0x0AF0);
}

#[test]
fn load_reads_full_8_bit_address() {
    let mut datapath = Datapath::new();
    datapath.memory.write(0xA0, 42, true);

    execute(&mut datapath, InstructionKind::Load, 3, 0, 0xA0);
    assert_eq!(datapath.reg_file.read(3), 42);
}

#[test]
fn store_writes_rd() {
    let mut datapath = Datapath::new();
    datapath.reg_file.write(2, 0x77, true);

    execute(&mut datapath, InstructionKind::Store, 2, 0, 0x30);
    assert_eq!(datapath.memory.read(0x30), 0x77);
}

#[test]
fn alu_op_writes_result_and_flags() {
    let mut datapath = Datapath::new();
    datapath.reg_file.write(1, 5, true);
    datapath.reg_file.write(2, 5, true);

    execute(&mut datapath, InstructionKind::Sub, 0, 1, 2);
    assert_eq!(datapath.reg_file.read(0), 0);
    assert_eq!(datapath.flags(), ALUFlags::ZERO);
}

#[test]
fn mov_copies_and_keeps_flags() {
    let mut datapath = Datapath::new();
    datapath.reg_file.write(4, 0x80, true);
    datapath.alu.flags = ALUFlags::ZERO | ALUFlags::CARRY;

    execute(&mut datapath, InstructionKind::Mov, 5, 4, 0);
    assert_eq!(datapath.reg_file.read(5), 0x80);
    assert_eq!(datapath.flags(), ALUFlags::ZERO | ALUFlags::CARRY);
}

#[test]
fn pc_load_and_single_increment() {
    let mut datapath = Datapath::new();

    execute(&mut datapath, InstructionKind::Jmp, 0, 0, 0xC8);
    assert_eq!(datapath.pc.read(), 0xC8);

    let nop = Instruction::from_fields(InstructionKind::Nop, 0, 0, 0);
    datapath.execute_cycle(
        &ControlSignals {
            pc_inc: true,
            ..Default::default()
        },
        &nop,
    );
    assert_eq!(datapath.pc.read(), 0xC9);
}

#[test]
fn signals_drive_alu_op() {
    let mut datapath = Datapath::new();
    datapath.reg_file.write(1, 0b1100, true);
    datapath.reg_file.write(2, 0b1010, true);

    let instruction = Instruction::from_fields(InstructionKind::Add, 0, 1, 2);
    datapath.execute_cycle(
        &ControlSignals {
            reg_write: true,
            alu_op: AluOp::Xor,
            ..Default::default()
        },
        &instruction,
    );
    assert_eq!(datapath.reg_file.read(0), 0b0110);
}
