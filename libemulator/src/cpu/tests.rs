use libisa::instruction::{assembler::assemble, kind::InstructionKind, Instruction};
use proptest::prelude::*;

use super::{Cpu, CpuState};
use crate::{alu::flags::ALUFlags, control::Phase, memory::Memory};

fn instruction(kind: InstructionKind, rd: usize, rs1: usize, x: usize) -> Instruction {
    Instruction::from_fields(kind, rd, rs1, x)
}

fn cpu_with(program: &[Instruction], data: &[(u8, u8)]) -> Cpu {
    let mut cpu = Cpu::new();
    cpu.load_program(&assemble(program.iter().copied()), 0)
        .expect("program fits");

    for (addr, value) in data {
        cpu.memory_mut().write(*addr, *value, true);
    }

    cpu
}

fn countdown(counter: u8) -> Cpu {
    cpu_with(
        &[
            instruction(InstructionKind::Load, 0, 0, 0x20),
            instruction(InstructionKind::Load, 1, 0, 0x21),
            instruction(InstructionKind::Sub, 0, 0, 1),
            instruction(InstructionKind::Jnz, 0, 0, 0x04),
            instruction(InstructionKind::Halt, 0, 0, 0),
        ],
        &[(0x20, counter), (0x21, 1)],
    )
}

#[test]
fn adds_two_values_from_memory() {
    let mut cpu = cpu_with(
        &[
            instruction(InstructionKind::Load, 1, 0, 0x40),
            instruction(InstructionKind::Load, 2, 0, 0x41),
            instruction(InstructionKind::Add, 0, 1, 2),
            instruction(InstructionKind::Halt, 0, 0, 0),
        ],
        &[(0x40, 5), (0x41, 3)],
    );

    assert_eq!(cpu.run(100), 3);
    assert!(cpu.halted);
    assert_eq!(cpu.register(0), 8);
    assert_eq!(cpu.pc(), 6);
}

#[test]
fn countdown_loop_halts_at_zero() {
    let mut cpu = countdown(3);

    assert_eq!(cpu.run(100), 8);
    assert_eq!(
        cpu.state(),
        CpuState {
            pc: 8,
            flags: ALUFlags::ZERO,
            halted: true,
            cycle: 8,
        }
    );
    assert_eq!(cpu.register(0), 0);
}

#[test]
fn branch_not_taken_skips_one_instruction() {
    let mut cpu = countdown(1);

    // LOAD, LOAD, SUB leaves R0 at zero.
    for _ in 0..3 {
        assert!(cpu.step());
    }
    assert_eq!(cpu.pc(), 6);

    assert!(cpu.step());
    assert_eq!(cpu.pc(), 8);
}

#[test]
fn branch_taken_lands_on_target() {
    let mut cpu = countdown(2);

    for _ in 0..4 {
        assert!(cpu.step());
    }
    assert_eq!(cpu.pc(), 4);
}

#[test]
fn halted_cpu_stays_put() {
    let mut cpu = cpu_with(&[instruction(InstructionKind::Halt, 0, 0, 0)], &[]);

    assert!(!cpu.step());
    assert!(cpu.halted);

    for _ in 0..5 {
        assert!(!cpu.step());
        assert_eq!(cpu.pc(), 0);
    }
    assert_eq!(cpu.run(10), 0);
    assert_eq!(cpu.clock.cycle(), 0);
}

#[test]
fn jump_to_self_is_bounded_by_max_cycles() {
    let mut cpu = cpu_with(&[instruction(InstructionKind::Jmp, 0, 0, 0x00)], &[]);

    assert_eq!(cpu.run(10), 10);
    assert!(!cpu.halted);
    assert_eq!(cpu.pc(), 0);
    assert_eq!(cpu.clock.cycle(), 10);
}

#[test]
fn mov_and_store() {
    let mut cpu = cpu_with(
        &[
            instruction(InstructionKind::Load, 3, 0, 0x80),
            instruction(InstructionKind::Mov, 4, 3, 0),
            instruction(InstructionKind::Not, 5, 4, 0),
            instruction(InstructionKind::Store, 5, 0, 0x81),
            instruction(InstructionKind::Halt, 0, 0, 0),
        ],
        &[(0x80, 0x0F)],
    );

    cpu.run(100);
    assert_eq!(cpu.register(4), 0x0F);
    assert_eq!(cpu.memory().read(0x81), 0xF0);
    assert_eq!(cpu.state().flags, ALUFlags::NEGATIVE);
}

#[test]
fn nop_advances_by_a_word() {
    let mut cpu = Cpu::new();

    assert!(cpu.step());
    assert_eq!(cpu.pc(), 2);
    assert_eq!(cpu.current_instruction, Some(instruction(InstructionKind::Nop, 0, 0, 0)));
}

#[test]
fn execution_wraps_past_last_address() {
    let mut cpu = Cpu::new();
    cpu.jump(0xFE);

    assert!(cpu.step());
    assert_eq!(cpu.pc(), 0);
}

#[test]
fn reset_keeps_registers_and_memory() {
    let mut cpu = countdown(3);
    cpu.run(100);

    cpu.reset();
    assert_eq!(
        cpu.state(),
        CpuState {
            pc: 0,
            flags: ALUFlags::ZERO,
            halted: false,
            cycle: 0,
        }
    );
    assert_eq!(cpu.control.phase, Phase::Fetch);
    assert_eq!(cpu.datapath.ir, 0);
    assert_eq!(cpu.register(1), 1);
    assert_eq!(cpu.memory().read(0x20), 3);

    // Counter byte is still 3, so the program runs the same again.
    assert_eq!(cpu.run(100), 8);
}

#[test]
fn phase_returns_to_fetch_after_each_step() {
    let mut cpu = countdown(3);

    cpu.step();
    assert_eq!(cpu.control.phase, Phase::Fetch);
}

proptest! {
    #[test]
    fn execution_is_deterministic(program in proptest::collection::vec(any::<u8>(), 256)) {
        let run = || {
            let mut memory = Memory::new();
            memory.load_program(&program, 0);

            let mut cpu = Cpu::with_memory(memory);
            let executed = cpu.run(64);

            (executed, cpu.state(), cpu.registers(), cpu.memory().iter().copied().collect::<Vec<_>>())
        };

        prop_assert_eq!(run(), run());
    }

    #[test]
    fn run_never_exceeds_max_cycles(program in proptest::collection::vec(any::<u8>(), 256), max in 0usize..64) {
        let mut cpu = Cpu::new();
        cpu.load_program(&program, 0).expect("program fits");

        let executed = cpu.run(max);
        prop_assert!(executed <= max);
        prop_assert_eq!(executed, cpu.clock.cycle());
        prop_assert!(cpu.halted || executed == max);
    }
}

#[test]
fn remembers_where_the_last_instruction_came_from() {
    let mut cpu = countdown(2);

    for _ in 0..4 {
        cpu.step();
    }
    assert_eq!(cpu.current_address, 6);
    assert_eq!(cpu.current_instruction, Some(instruction(InstructionKind::Jnz, 0, 0, 0x04)));

    cpu.reset();
    assert_eq!(cpu.current_address, 0);
    assert_eq!(cpu.current_instruction, None);
}

#[test]
fn clock_pulses_once_per_completed_step() {
    let mut cpu = countdown(3);

    cpu.step();
    cpu.step();
    assert_eq!(cpu.clock.cycle(), 2);
    assert!(!cpu.clock.state());

    cpu.run(100);
    assert!(cpu.halted);
    assert_eq!(cpu.clock.cycle(), 8, "HALT does not complete a cycle");

    cpu.reset();
    assert_eq!(cpu.clock.cycle(), 0);
}
