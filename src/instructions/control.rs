//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - JMP: Jump to address (absolute or through a 16-bit pointer)
//! - JSR / RTS: Subroutine call and return
//! - RTI: Return from interrupt
//! - BRK: Force break, which stops execution
//!
//! Handlers leave PC one byte before the destination; the step loop's final
//! increment completes the transfer.

use log::debug;

use crate::cpu::StatusFlags;
use crate::opcodes::Opcode;
use crate::{AddressingMode, Cpu, ExecutionError, MemoryBus};

/// Executes the JMP (Jump) instruction.
///
/// Addressing modes:
/// - Absolute (0x4C): JMP $1234 - Jump to address $1234
/// - Indirect (0x6C): JMP ($1234) - Jump to the little-endian address stored at $1234/$1235
///
/// Flags affected: None
pub(crate) fn execute_jmp<M: MemoryBus>(cpu: &mut Cpu<M>, op: Opcode) -> Result<u8, ExecutionError> {
    let target = match op.addressing_mode {
        AddressingMode::Absolute | AddressingMode::Indirect => cpu.operand_address(op.addressing_mode)?,
        mode => {
            return Err(ExecutionError::UnsupportedMode {
                opcode: op.code,
                mode,
                pc: cpu.pc,
            })
        }
    };

    cpu.pc = target.wrapping_sub(1);
    Ok(op.base_cycles)
}

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// Pushes the address of the instruction's last byte (high byte first), then
/// jumps. RTS pops it and the step increment resumes after the JSR.
pub(crate) fn execute_jsr<M: MemoryBus>(cpu: &mut Cpu<M>, op: Opcode) -> Result<u8, ExecutionError> {
    let return_address = cpu.pc.wrapping_add(2);
    cpu.push((return_address >> 8) as u8);
    cpu.push(return_address as u8);

    let target = cpu.next_word();
    cpu.pc = target.wrapping_sub(1);

    Ok(op.base_cycles)
}

/// Executes the RTS (Return from Subroutine) instruction.
pub(crate) fn execute_rts<M: MemoryBus>(cpu: &mut Cpu<M>, op: Opcode) -> Result<u8, ExecutionError> {
    let lo = cpu.pop() as u16;
    let hi = cpu.pop() as u16;
    cpu.pc = (hi << 8) | lo;

    Ok(op.base_cycles)
}

/// Executes the RTI (Return from Interrupt) instruction.
///
/// Pops the status register, then the program counter.
pub(crate) fn execute_rti<M: MemoryBus>(cpu: &mut Cpu<M>, op: Opcode) -> Result<u8, ExecutionError> {
    cpu.flags = StatusFlags::from_bits_retain(cpu.pop());

    let lo = cpu.pop() as u16;
    let hi = cpu.pop() as u16;
    cpu.pc = (hi << 8) | lo;

    Ok(op.base_cycles)
}

/// Executes the BRK (Force Break) instruction.
///
/// Pushes PC (high byte, then low byte) and the status register, sets the
/// Break flag, and halts the CPU. There is no interrupt vector: a program ends
/// at its first BRK.
pub(crate) fn execute_brk<M: MemoryBus>(cpu: &mut Cpu<M>, op: Opcode) -> Result<u8, ExecutionError> {
    let pc = cpu.pc;
    cpu.push((pc >> 8) as u8);
    cpu.push(pc as u8);
    cpu.push(cpu.flags.bits());

    cpu.flags.insert(StatusFlags::BREAK);
    cpu.halted = true;
    debug!("BRK at ${:04X}", pc);

    Ok(op.base_cycles)
}
