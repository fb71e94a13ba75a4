//! # Stack Instructions
//!
//! PHA, PHP, PLA and PLP. The stack lives in page one (0x0100-0x01FF) and
//! grows downward; SP wraps in both directions.

use crate::cpu::StatusFlags;
use crate::opcodes::Opcode;
use crate::{Cpu, ExecutionError, MemoryBus};

/// Executes the PHA (Push Accumulator) instruction.
pub(crate) fn execute_pha<M: MemoryBus>(cpu: &mut Cpu<M>, op: Opcode) -> Result<u8, ExecutionError> {
    cpu.push(cpu.a);
    Ok(op.base_cycles)
}

/// Executes the PHP (Push Processor Status) instruction.
pub(crate) fn execute_php<M: MemoryBus>(cpu: &mut Cpu<M>, op: Opcode) -> Result<u8, ExecutionError> {
    cpu.push(cpu.flags.bits());
    Ok(op.base_cycles)
}

/// Executes the PLA (Pull Accumulator) instruction. Updates Z and N.
pub(crate) fn execute_pla<M: MemoryBus>(cpu: &mut Cpu<M>, op: Opcode) -> Result<u8, ExecutionError> {
    cpu.a = cpu.pop();
    cpu.set_zn(cpu.a);
    Ok(op.base_cycles)
}

/// Executes the PLP (Pull Processor Status) instruction.
pub(crate) fn execute_plp<M: MemoryBus>(cpu: &mut Cpu<M>, op: Opcode) -> Result<u8, ExecutionError> {
    cpu.flags = StatusFlags::from_bits_retain(cpu.pop());
    Ok(op.base_cycles)
}
