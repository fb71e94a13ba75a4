//! 6502 Disassembler Module
//!
//! Converts machine code back into assembly text. The CPU uses it for
//! instruction trace logging; tools use it to inspect assembled programs.

pub mod decoder;
pub mod formatter;

use crate::addressing::AddressingMode;

/// A single disassembled instruction with full metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// Memory address where this instruction starts
    pub address: u16,

    /// The opcode byte value (0x00-0xFF)
    pub opcode: u8,

    /// Instruction mnemonic (e.g., "LDA", "STA", "JMP"), or ".byte" for data
    pub mnemonic: &'static str,

    /// Addressing mode used by this instruction
    pub addressing_mode: AddressingMode,

    /// Operand bytes (0-2 bytes depending on addressing mode)
    pub operand_bytes: Vec<u8>,

    /// Total size in bytes (1-3 bytes: opcode + operands)
    pub size_bytes: u8,

    /// Base cycle cost (taken branches add one)
    pub base_cycles: u8,
}

/// Disassemble a byte slice into a vector of instructions
///
/// Bytes that do not start a documented, complete instruction are emitted as
/// one-byte `.byte` entries.
///
/// # Examples
///
/// ```
/// use sim6502::disassemble;
///
/// let listing = disassemble(&[0xA9, 0x05, 0x00], 0x0600);
/// assert_eq!(listing.len(), 2);
/// assert_eq!(listing[0].mnemonic, "LDA");
/// assert_eq!(listing[1].address, 0x0602);
/// ```
pub fn disassemble(bytes: &[u8], start_address: u16) -> Vec<Instruction> {
    let mut instructions = Vec::new();
    let mut offset = 0;
    let mut address = start_address;

    while offset < bytes.len() {
        let instr = decoder::decode_instruction(&bytes[offset..], address).unwrap_or(Instruction {
            address,
            opcode: bytes[offset],
            mnemonic: ".byte",
            addressing_mode: AddressingMode::Implicit,
            operand_bytes: vec![bytes[offset]],
            size_bytes: 1,
            base_cycles: 0,
        });

        offset += instr.size_bytes as usize;
        address = address.wrapping_add(instr.size_bytes as u16);
        instructions.push(instr);
    }

    instructions
}

/// Disassemble into formatted listing rows (`0600  a9 05     LDA #$05`).
pub fn disassemble_to_text(bytes: &[u8], start_address: u16) -> Vec<String> {
    disassemble(bytes, start_address)
        .iter()
        .map(formatter::format_row)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disassemble_empty() {
        assert!(disassemble(&[], 0x0600).is_empty());
    }

    #[test]
    fn test_disassemble_mixed_data() {
        let rows = disassemble_to_text(&[0xA2, 0x01, 0x02, 0xE8], 0x0600);
        assert_eq!(
            rows,
            vec![
                "0600  a2 01     LDX #$01",
                "0602  02        .byte $02",
                "0603  e8        INX",
            ]
        );
    }
}
