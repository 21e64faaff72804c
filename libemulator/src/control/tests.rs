use libisa::instruction::{kind::InstructionKind, Instruction};

use super::{ControlSignals, ControlUnit, Phase};
use crate::alu::{flags::ALUFlags, AluOp};

fn signals(kind: InstructionKind, flags: ALUFlags) -> ControlSignals {
    ControlUnit::new().generate_signals(&Instruction::from_fields(kind, 1, 2, 3), flags)
}

#[test]
fn alu_instructions_write_back() {
    for (kind, op) in [
        (InstructionKind::Add, AluOp::Add),
        (InstructionKind::Sub, AluOp::Sub),
        (InstructionKind::And, AluOp::And),
        (InstructionKind::Or, AluOp::Or),
        (InstructionKind::Xor, AluOp::Xor),
        (InstructionKind::Not, AluOp::Not),
        (InstructionKind::Shl, AluOp::Shl),
        (InstructionKind::Shr, AluOp::Shr),
    ] {
        assert_eq!(
            signals(kind, ALUFlags::empty()),
            ControlSignals {
                alu_op: op,
                reg_write: true,
                ..Default::default()
            },
            "{kind}"
        );
    }
}

#[test]
fn memory_and_move() {
    assert_eq!(
        signals(InstructionKind::Load, ALUFlags::empty()),
        ControlSignals {
            mem_read: true,
            mem_to_reg: true,
            reg_write: true,
            ..Default::default()
        }
    );
    assert_eq!(
        signals(InstructionKind::Store, ALUFlags::empty()),
        ControlSignals {
            mem_write: true,
            ..Default::default()
        }
    );
    assert_eq!(
        signals(InstructionKind::Mov, ALUFlags::empty()),
        ControlSignals {
            reg_write: true,
            ..Default::default()
        }
    );
}

#[test]
fn branches_follow_zero_flag() {
    let taken = |kind, flags| signals(kind, flags).pc_load;

    assert!(taken(InstructionKind::Jmp, ALUFlags::empty()));
    assert!(taken(InstructionKind::Jmp, ALUFlags::ZERO));

    assert!(taken(InstructionKind::Jz, ALUFlags::ZERO));
    assert!(!taken(InstructionKind::Jz, ALUFlags::CARRY | ALUFlags::NEGATIVE));

    assert!(taken(InstructionKind::Jnz, ALUFlags::empty()));
    assert!(!taken(InstructionKind::Jnz, ALUFlags::ZERO | ALUFlags::OVERFLOW));
}

#[test]
fn nop_and_halt_drive_nothing() {
    for kind in [InstructionKind::Nop, InstructionKind::Halt] {
        assert_eq!(signals(kind, ALUFlags::ZERO), ControlSignals::default());
    }
}

#[test]
fn signals_do_not_leak_between_instructions() {
    let mut control = ControlUnit::new();

    control.generate_signals(
        &Instruction::from_fields(InstructionKind::Load, 0, 0, 0x10),
        ALUFlags::empty(),
    );
    let signals = control.generate_signals(
        &Instruction::from_fields(InstructionKind::Jmp, 0, 0, 0x20),
        ALUFlags::empty(),
    );

    assert_eq!(
        signals,
        ControlSignals {
            pc_load: true,
            ..Default::default()
        }
    );
    assert_eq!(control.signals, signals);
}

#[test]
fn phase_cycles_and_resets() {
    let mut control = ControlUnit::new();
    assert_eq!(control.phase, Phase::Fetch);

    assert_eq!(control.advance_phase(), Phase::Decode);
    assert_eq!(control.advance_phase(), Phase::Execute);
    assert_eq!(control.advance_phase(), Phase::Writeback);
    assert_eq!(control.advance_phase(), Phase::Fetch);

    control.advance_phase();
    control.reset();
    assert_eq!(control.phase, Phase::Fetch);
    assert_eq!(control.signals, ControlSignals::default());
}
