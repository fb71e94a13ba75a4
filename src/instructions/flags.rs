//! # Status Flag Instructions
//!
//! CLC, SEC, CLI, SEI, CLD, SED and CLV. Each sets or clears a single flag.

use crate::cpu::StatusFlags;
use crate::opcodes::{Mnemonic, Opcode};
use crate::{Cpu, ExecutionError, MemoryBus};

pub(crate) fn execute_flag<M: MemoryBus>(cpu: &mut Cpu<M>, op: Opcode) -> Result<u8, ExecutionError> {
    let (flag, value) = match op.mnemonic {
        Mnemonic::Clc => (StatusFlags::CARRY, false),
        Mnemonic::Sec => (StatusFlags::CARRY, true),
        Mnemonic::Cli => (StatusFlags::INTERRUPT_DISABLE, false),
        Mnemonic::Sei => (StatusFlags::INTERRUPT_DISABLE, true),
        Mnemonic::Cld => (StatusFlags::DECIMAL_MODE, false),
        Mnemonic::Sed => (StatusFlags::DECIMAL_MODE, true),
        Mnemonic::Clv => (StatusFlags::OVERFLOW, false),
        _ => {
            return Err(ExecutionError::UnsupportedMode {
                opcode: op.code,
                mode: op.addressing_mode,
                pc: cpu.pc,
            })
        }
    };

    cpu.flags.set(flag, value);
    Ok(op.base_cycles)
}
