//! # Shift and Rotate Instructions
//!
//! This module implements bit shift and rotate operations:
//! - ASL: Arithmetic Shift Left, bit 7 into carry
//! - LSR: Logical Shift Right, bit 0 into carry, 0 into bit 7
//! - ROL: Rotate Left through carry
//! - ROR: Rotate Right through carry
//!
//! Each works on the accumulator or on memory. The memory forms read the
//! operand twice, once for the result and once for the carry-out bit, then
//! write once. All update C, Z and N.

use crate::cpu::StatusFlags;
use crate::opcodes::Opcode;
use crate::{AddressingMode, Cpu, ExecutionError, MemoryBus};

/// Executes the ASL (Arithmetic Shift Left) instruction.
pub(crate) fn execute_asl<M: MemoryBus>(cpu: &mut Cpu<M>, op: Opcode) -> Result<u8, ExecutionError> {
    modify(cpu, op, |_, value| (value << 1, value & 0x80 != 0))
}

/// Executes the LSR (Logical Shift Right) instruction.
///
/// Bit 7 of the result is always 0, so N is always cleared.
pub(crate) fn execute_lsr<M: MemoryBus>(cpu: &mut Cpu<M>, op: Opcode) -> Result<u8, ExecutionError> {
    modify(cpu, op, |_, value| (value >> 1, value & 0x01 != 0))
}

/// Executes the ROL (Rotate Left) instruction.
pub(crate) fn execute_rol<M: MemoryBus>(cpu: &mut Cpu<M>, op: Opcode) -> Result<u8, ExecutionError> {
    modify(cpu, op, |carry, value| {
        ((value << 1) | carry as u8, value & 0x80 != 0)
    })
}

/// Executes the ROR (Rotate Right) instruction.
pub(crate) fn execute_ror<M: MemoryBus>(cpu: &mut Cpu<M>, op: Opcode) -> Result<u8, ExecutionError> {
    modify(cpu, op, |carry, value| {
        ((value >> 1) | ((carry as u8) << 7), value & 0x01 != 0)
    })
}

/// Applies `shift(carry_in, value) -> (result, carry_out)` to the accumulator
/// or the memory operand, then updates C, Z and N.
fn modify<M, F>(cpu: &mut Cpu<M>, op: Opcode, shift: F) -> Result<u8, ExecutionError>
where
    M: MemoryBus,
    F: Fn(bool, u8) -> (u8, bool),
{
    let carry_in = cpu.flag_c();

    let result = if op.addressing_mode == AddressingMode::Accumulator {
        let (result, carry_out) = shift(carry_in, cpu.a);
        cpu.a = result;
        cpu.flags.set(StatusFlags::CARRY, carry_out);
        result
    } else {
        let addr = cpu.operand_address(op.addressing_mode)?;
        let (result, _) = shift(carry_in, cpu.memory.read(addr));
        let (_, carry_out) = shift(carry_in, cpu.memory.read(addr));
        cpu.memory.write(addr, result);
        cpu.flags.set(StatusFlags::CARRY, carry_out);
        result
    };

    cpu.set_zn(result);
    Ok(op.base_cycles)
}
