//! Assembler listings
//!
//! Two views of an assembled program: the hex image that
//! [`crate::load_listing`] reads back, and a source listing that lines up each
//! instruction's address and bytes with what was written.

use crate::assembler::EncodedInstruction;
use crate::memory::format_rows;

/// Hex image rows, 16 bytes per aligned row, starting at `entry_point`.
///
/// # Examples
///
/// ```
/// use sim6502::assembler::listing::hex_listing;
///
/// let rows = hex_listing(0x060E, &[0xA9, 0x05, 0x85, 0x10]);
/// assert_eq!(rows, vec!["060e: a9 05", "0610: 85 10"]);
/// ```
pub fn hex_listing(entry_point: u16, bytes: &[u8]) -> Vec<String> {
    format_rows(entry_point, bytes.iter().copied())
}

/// One row per instruction: `0600  a9 05     LDA #$05  ; line 1`.
pub fn source_listing(instructions: &[EncodedInstruction]) -> Vec<String> {
    instructions
        .iter()
        .map(|instr| {
            let raw: Vec<String> = instr.bytes.iter().map(|b| format!("{:02x}", b)).collect();
            let text = if instr.operand.is_empty() {
                instr.mnemonic.to_string()
            } else {
                format!("{} {}", instr.mnemonic, instr.operand)
            };

            format!(
                "{:04x}  {:<9} {:<14} ; line {}",
                instr.address,
                raw.join(" "),
                text,
                instr.line
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble;

    #[test]
    fn test_hex_listing_round_trips_through_loader() {
        use crate::{load_listing, FlatMemory, MemoryBus};

        let bytes: Vec<u8> = (0..40).collect();
        let rows = hex_listing(0x0600, &bytes);
        assert_eq!(rows.len(), 3);

        let mut mem = FlatMemory::new();
        assert_eq!(load_listing(&mut mem, &rows), Ok(40));
        assert_eq!(mem.read(0x0627), 39);
    }

    #[test]
    fn test_source_listing() {
        let output = assemble("start: LDA #$05\n  JMP start").unwrap();
        let rows = source_listing(&output.instructions);

        assert_eq!(rows[0], "0600  a9 05     LDA #$05       ; line 1");
        assert_eq!(rows[1], "0602  4c 00 06  JMP start      ; line 2");
    }
}
