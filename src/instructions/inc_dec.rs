//! # Increment and Decrement Instructions
//!
//! - INC / DEC: read-modify-write on memory
//! - INX / INY / DEX / DEY: step an index register
//!
//! All wrap modulo 256 and update Z and N.

use crate::opcodes::{Mnemonic, Opcode};
use crate::{Cpu, ExecutionError, MemoryBus};

/// Executes the INC (Increment Memory) instruction.
pub(crate) fn execute_inc<M: MemoryBus>(cpu: &mut Cpu<M>, op: Opcode) -> Result<u8, ExecutionError> {
    step_memory(cpu, op, 1)
}

/// Executes the DEC (Decrement Memory) instruction.
pub(crate) fn execute_dec<M: MemoryBus>(cpu: &mut Cpu<M>, op: Opcode) -> Result<u8, ExecutionError> {
    step_memory(cpu, op, 0xFF)
}

fn step_memory<M: MemoryBus>(cpu: &mut Cpu<M>, op: Opcode, delta: u8) -> Result<u8, ExecutionError> {
    let addr = cpu.operand_address(op.addressing_mode)?;
    let result = cpu.memory.read(addr).wrapping_add(delta);
    cpu.memory.write(addr, result);
    cpu.set_zn(result);

    Ok(op.base_cycles)
}

/// Executes INX, INY, DEX or DEY.
pub(crate) fn execute_register_step<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    op: Opcode,
) -> Result<u8, ExecutionError> {
    let result = match op.mnemonic {
        Mnemonic::Inx => {
            cpu.x = cpu.x.wrapping_add(1);
            cpu.x
        }
        Mnemonic::Iny => {
            cpu.y = cpu.y.wrapping_add(1);
            cpu.y
        }
        Mnemonic::Dex => {
            cpu.x = cpu.x.wrapping_sub(1);
            cpu.x
        }
        Mnemonic::Dey => {
            cpu.y = cpu.y.wrapping_sub(1);
            cpu.y
        }
        _ => {
            return Err(ExecutionError::UnsupportedMode {
                opcode: op.code,
                mode: op.addressing_mode,
                pc: cpu.pc,
            })
        }
    };

    cpu.set_zn(result);
    Ok(op.base_cycles)
}
