//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic and logical operations:
//! - ADC / SBC: binary add and subtract with carry
//! - AND / ORA / EOR: bitwise logic into the accumulator
//! - CMP / CPX / CPY: register comparison
//! - BIT: bit test against the accumulator
//!
//! Decimal mode is ignored; ADC and SBC are always binary.

use crate::cpu::StatusFlags;
use crate::opcodes::Opcode;
use crate::{Cpu, ExecutionError, MemoryBus};

/// Executes the ADC (Add with Carry) instruction.
///
/// `A = A + M + C`. Carry is set when the unsigned sum exceeds 0xFF.
///
/// For overflow the carry is first added to the operand byte (wrapping), and
/// V is set when the signed sum `s = A + operand` leaves `-127..=128`.
pub(crate) fn execute_adc<M: MemoryBus>(cpu: &mut Cpu<M>, op: Opcode) -> Result<u8, ExecutionError> {
    let value = cpu.read_operand(op.addressing_mode)?;
    let carry_in = cpu.flag_c() as u16;

    let sum = cpu.a as u16 + value as u16 + carry_in;
    let operand = value.wrapping_add(carry_in as u8);
    let signed = (cpu.a as i8) as i16 + (operand as i8) as i16;

    cpu.flags.set(StatusFlags::CARRY, sum > 0xFF);
    cpu.flags.set(StatusFlags::OVERFLOW, signed > 128 || signed < -127);
    cpu.a = sum as u8;
    cpu.set_zn(cpu.a);

    Ok(op.base_cycles)
}

/// Executes the SBC (Subtract with Carry) instruction.
///
/// `A = A - M - (1 - C)`. Carry is set when no borrow occurred, i.e. the
/// unsigned difference is non-negative. Overflow folds the borrow into the
/// operand byte and applies the same signed-range test as ADC.
pub(crate) fn execute_sbc<M: MemoryBus>(cpu: &mut Cpu<M>, op: Opcode) -> Result<u8, ExecutionError> {
    let value = cpu.read_operand(op.addressing_mode)?;
    let borrow = 1 - cpu.flag_c() as i16;

    let difference = cpu.a as i16 - value as i16 - borrow;
    let operand = value.wrapping_add(borrow as u8);
    let signed = (cpu.a as i8) as i16 - (operand as i8) as i16;

    cpu.flags.set(StatusFlags::CARRY, difference >= 0);
    cpu.flags.set(StatusFlags::OVERFLOW, signed > 128 || signed < -127);
    cpu.a = difference as u8;
    cpu.set_zn(cpu.a);

    Ok(op.base_cycles)
}

/// Executes the AND (Logical AND) instruction. Updates Z and N.
pub(crate) fn execute_and<M: MemoryBus>(cpu: &mut Cpu<M>, op: Opcode) -> Result<u8, ExecutionError> {
    let value = cpu.read_operand(op.addressing_mode)?;
    cpu.a &= value;
    cpu.set_zn(cpu.a);
    Ok(op.base_cycles)
}

/// Executes the ORA (Logical Inclusive OR) instruction. Updates Z and N.
pub(crate) fn execute_ora<M: MemoryBus>(cpu: &mut Cpu<M>, op: Opcode) -> Result<u8, ExecutionError> {
    let value = cpu.read_operand(op.addressing_mode)?;
    cpu.a |= value;
    cpu.set_zn(cpu.a);
    Ok(op.base_cycles)
}

/// Executes the EOR (Exclusive OR) instruction. Updates Z and N.
pub(crate) fn execute_eor<M: MemoryBus>(cpu: &mut Cpu<M>, op: Opcode) -> Result<u8, ExecutionError> {
    let value = cpu.read_operand(op.addressing_mode)?;
    cpu.a ^= value;
    cpu.set_zn(cpu.a);
    Ok(op.base_cycles)
}

/// Executes the CMP (Compare Accumulator) instruction.
pub(crate) fn execute_cmp<M: MemoryBus>(cpu: &mut Cpu<M>, op: Opcode) -> Result<u8, ExecutionError> {
    let register = cpu.a;
    compare(cpu, op, register)
}

/// Executes the CPX (Compare X Register) instruction.
pub(crate) fn execute_cpx<M: MemoryBus>(cpu: &mut Cpu<M>, op: Opcode) -> Result<u8, ExecutionError> {
    let register = cpu.x;
    compare(cpu, op, register)
}

/// Executes the CPY (Compare Y Register) instruction.
pub(crate) fn execute_cpy<M: MemoryBus>(cpu: &mut Cpu<M>, op: Opcode) -> Result<u8, ExecutionError> {
    let register = cpu.y;
    compare(cpu, op, register)
}

/// Shared compare: C = register >= M, Z = register == M, N = bit 7 of the difference.
fn compare<M: MemoryBus>(cpu: &mut Cpu<M>, op: Opcode, register: u8) -> Result<u8, ExecutionError> {
    let value = cpu.read_operand(op.addressing_mode)?;

    cpu.flags.set(StatusFlags::CARRY, register >= value);
    cpu.set_zn(register.wrapping_sub(value));

    Ok(op.base_cycles)
}

/// Executes the BIT (Bit Test) instruction.
///
/// Z is set when `A & M` is zero. N and V are copied from bits 7 and 6 of the
/// memory operand. The accumulator is unchanged.
pub(crate) fn execute_bit<M: MemoryBus>(cpu: &mut Cpu<M>, op: Opcode) -> Result<u8, ExecutionError> {
    let value = cpu.read_operand(op.addressing_mode)?;

    cpu.flags.set(StatusFlags::ZERO, cpu.a & value == 0);
    cpu.flags.set(StatusFlags::NEGATIVE, value & 0x80 != 0);
    cpu.flags.set(StatusFlags::OVERFLOW, value & 0x40 != 0);

    Ok(op.base_cycles)
}
