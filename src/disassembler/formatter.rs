//! Formatting functions for disassembled instructions

use crate::addressing::AddressingMode;
use crate::disassembler::Instruction;

/// Format a single instruction as assembly text, e.g. `LDA #$05`.
///
/// The output uses the syntax the assembler accepts, except that branch
/// operands are shown as their absolute target.
pub fn format_instruction(instr: &Instruction) -> String {
    let operand = format_operand(instr);

    if operand.is_empty() {
        instr.mnemonic.to_string()
    } else {
        format!("{} {}", instr.mnemonic, operand)
    }
}

/// Format an instruction as a listing row: address, raw bytes, then assembly.
pub fn format_row(instr: &Instruction) -> String {
    let mut raw = format!("{:02x}", instr.opcode);
    if instr.mnemonic != ".byte" {
        for byte in &instr.operand_bytes {
            raw.push_str(&format!(" {:02x}", byte));
        }
    }

    format!("{:04x}  {:<9} {}", instr.address, raw, format_instruction(instr))
}

/// Format the operand based on addressing mode
fn format_operand(instr: &Instruction) -> String {
    use AddressingMode::*;

    if instr.mnemonic == ".byte" {
        return format!("${:02X}", instr.opcode);
    }

    let byte = instr.operand_bytes.first().copied();
    let word = match instr.operand_bytes.as_slice() {
        [lo, hi, ..] => Some(u16::from_le_bytes([*lo, *hi])),
        _ => None,
    };

    let (Some(byte), word) = (byte, word) else {
        return match instr.addressing_mode {
            Implicit => String::new(),
            Accumulator => "A".to_string(),
            _ => "???".to_string(),
        };
    };

    match (instr.addressing_mode, word) {
        (Immediate, _) => format!("#${:02X}", byte),
        (ZeroPage, _) => format!("${:02X}", byte),
        (ZeroPageX, _) => format!("${:02X},X", byte),
        (ZeroPageY, _) => format!("${:02X},Y", byte),
        (IndirectX, _) => format!("(${:02X},X)", byte),
        (IndirectY, _) => format!("(${:02X}),Y", byte),
        (Relative, _) => {
            let target = instr
                .address
                .wrapping_add(2)
                .wrapping_add_signed(byte as i8 as i16);
            format!("${:04X}", target)
        }
        (Absolute, Some(addr)) => format!("${:04X}", addr),
        (AbsoluteX, Some(addr)) => format!("${:04X},X", addr),
        (AbsoluteY, Some(addr)) => format!("${:04X},Y", addr),
        (Indirect, Some(addr)) => format!("(${:04X})", addr),
        _ => "???".to_string(),
    }
}
