//! # Branch Instructions
//!
//! This module implements the eight conditional branches (BCC, BCS, BEQ, BNE,
//! BMI, BPL, BVC, BVS).
//!
//! All branch instructions use relative addressing with a signed 8-bit offset
//! measured from the address after the two-byte instruction. A taken branch
//! costs one cycle more than the base two.

use crate::opcodes::{Mnemonic, Opcode};
use crate::{Cpu, ExecutionError, MemoryBus};

/// Executes any conditional branch.
///
/// The offset byte is always consumed. When the condition holds, the signed
/// offset is added to PC while it still points at the offset byte, so the
/// step's final increment lands on `instruction + 2 + offset`.
pub(crate) fn execute_branch<M: MemoryBus>(cpu: &mut Cpu<M>, op: Opcode) -> Result<u8, ExecutionError> {
    let offset = cpu.next_byte() as i8;

    let taken = match op.mnemonic {
        Mnemonic::Bcc => !cpu.flag_c(),
        Mnemonic::Bcs => cpu.flag_c(),
        Mnemonic::Beq => cpu.flag_z(),
        Mnemonic::Bne => !cpu.flag_z(),
        Mnemonic::Bmi => cpu.flag_n(),
        Mnemonic::Bpl => !cpu.flag_n(),
        Mnemonic::Bvc => !cpu.flag_v(),
        Mnemonic::Bvs => cpu.flag_v(),
        _ => {
            return Err(ExecutionError::UnsupportedMode {
                opcode: op.code,
                mode: op.addressing_mode,
                pc: cpu.pc,
            })
        }
    };

    if taken {
        cpu.pc = cpu.pc.wrapping_add_signed(offset as i16);
        Ok(op.base_cycles + 1)
    } else {
        Ok(op.base_cycles)
    }
}
