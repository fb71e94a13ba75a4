//! Instruction decoder for the 6502 disassembler

use crate::disassembler::Instruction;
use crate::opcodes::OPCODE_TABLE;

/// Decode a single instruction from a byte slice
///
/// # Arguments
///
/// * `bytes` - The byte slice starting at the instruction to decode
/// * `address` - The memory address of this instruction
///
/// # Returns
///
/// Some(Instruction) if the opcode is documented and complete, None otherwise
pub fn decode_instruction(bytes: &[u8], address: u16) -> Option<Instruction> {
    if bytes.is_empty() {
        return None;
    }

    let opcode = bytes[0];
    let entry = OPCODE_TABLE[opcode as usize]?;

    // Not enough bytes left for the operands
    let size = entry.size_bytes() as usize;
    if bytes.len() < size {
        return None;
    }

    Some(Instruction {
        address,
        opcode,
        mnemonic: entry.mnemonic.as_str(),
        addressing_mode: entry.addressing_mode,
        operand_bytes: bytes[1..size].to_vec(),
        size_bytes: entry.size_bytes(),
        base_cycles: entry.base_cycles,
    })
}
