//! # Load and Store Instructions
//!
//! This module implements register loads and stores:
//! - LDA, LDX, LDY: load a register from memory (or an immediate), updating Z and N
//! - STA, STX, STY: store a register to memory; no flags change

use crate::opcodes::Opcode;
use crate::{Cpu, ExecutionError, MemoryBus};

/// Executes the LDA (Load Accumulator) instruction.
///
/// # Examples
///
/// LDA #$80 loads 0x80 into A and sets N.
pub(crate) fn execute_lda<M: MemoryBus>(cpu: &mut Cpu<M>, op: Opcode) -> Result<u8, ExecutionError> {
    cpu.a = cpu.read_operand(op.addressing_mode)?;
    cpu.set_zn(cpu.a);
    Ok(op.base_cycles)
}

/// Executes the LDX (Load X Register) instruction.
pub(crate) fn execute_ldx<M: MemoryBus>(cpu: &mut Cpu<M>, op: Opcode) -> Result<u8, ExecutionError> {
    cpu.x = cpu.read_operand(op.addressing_mode)?;
    cpu.set_zn(cpu.x);
    Ok(op.base_cycles)
}

/// Executes the LDY (Load Y Register) instruction.
pub(crate) fn execute_ldy<M: MemoryBus>(cpu: &mut Cpu<M>, op: Opcode) -> Result<u8, ExecutionError> {
    cpu.y = cpu.read_operand(op.addressing_mode)?;
    cpu.set_zn(cpu.y);
    Ok(op.base_cycles)
}

/// Executes the STA (Store Accumulator) instruction.
///
/// Writes into 0x0200-0x05FF are what light up the display.
pub(crate) fn execute_sta<M: MemoryBus>(cpu: &mut Cpu<M>, op: Opcode) -> Result<u8, ExecutionError> {
    let value = cpu.a;
    store(cpu, op, value)
}

/// Executes the STX (Store X Register) instruction.
pub(crate) fn execute_stx<M: MemoryBus>(cpu: &mut Cpu<M>, op: Opcode) -> Result<u8, ExecutionError> {
    let value = cpu.x;
    store(cpu, op, value)
}

/// Executes the STY (Store Y Register) instruction.
pub(crate) fn execute_sty<M: MemoryBus>(cpu: &mut Cpu<M>, op: Opcode) -> Result<u8, ExecutionError> {
    let value = cpu.y;
    store(cpu, op, value)
}

fn store<M: MemoryBus>(cpu: &mut Cpu<M>, op: Opcode, value: u8) -> Result<u8, ExecutionError> {
    let addr = cpu.operand_address(op.addressing_mode)?;
    cpu.memory.write(addr, value);
    Ok(op.base_cycles)
}
