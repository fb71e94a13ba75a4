//! # Opcode Table
//!
//! This module contains the 256-entry opcode table that the CPU dispatches
//! through and the disassembler decodes with.
//!
//! The table covers the 151 documented NMOS 6502 opcodes. The remaining 105
//! byte values have no entry (`None`); fetching one halts the CPU with
//! [`crate::ExecutionError::IllegalOpcode`].
//!
//! Each entry carries:
//! - Mnemonic tag (which handler runs)
//! - Addressing mode (how operands are resolved)
//! - Base cycle cost (documented NMOS timing, no page-crossing penalty)

use std::fmt;
use std::str::FromStr;

use crate::addressing::AddressingMode;

/// The 56 documented 6502 instruction mnemonics.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Mnemonic {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs, Clc,
    Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx, Iny, Jmp,
    Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp, Rol, Ror, Rti,
    Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay, Tsx, Txa, Txs, Tya,
}

impl Mnemonic {
    /// Every mnemonic, in alphabetical order.
    pub const ALL: [Mnemonic; 56] = {
        use Mnemonic::*;
        [
            Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs, Clc,
            Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx, Iny, Jmp,
            Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp, Rol, Ror, Rti,
            Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay, Tsx, Txa, Txs, Tya,
        ]
    };

    /// Upper-case mnemonic text, e.g. `"LDA"`.
    #[rustfmt::skip]
    pub fn as_str(self) -> &'static str {
        use Mnemonic::*;

        match self {
            Adc => "ADC", And => "AND", Asl => "ASL", Bcc => "BCC", Bcs => "BCS",
            Beq => "BEQ", Bit => "BIT", Bmi => "BMI", Bne => "BNE", Bpl => "BPL",
            Brk => "BRK", Bvc => "BVC", Bvs => "BVS", Clc => "CLC", Cld => "CLD",
            Cli => "CLI", Clv => "CLV", Cmp => "CMP", Cpx => "CPX", Cpy => "CPY",
            Dec => "DEC", Dex => "DEX", Dey => "DEY", Eor => "EOR", Inc => "INC",
            Inx => "INX", Iny => "INY", Jmp => "JMP", Jsr => "JSR", Lda => "LDA",
            Ldx => "LDX", Ldy => "LDY", Lsr => "LSR", Nop => "NOP", Ora => "ORA",
            Pha => "PHA", Php => "PHP", Pla => "PLA", Plp => "PLP", Rol => "ROL",
            Ror => "ROR", Rti => "RTI", Rts => "RTS", Sbc => "SBC", Sec => "SEC",
            Sed => "SED", Sei => "SEI", Sta => "STA", Stx => "STX", Sty => "STY",
            Tax => "TAX", Tay => "TAY", Tsx => "TSX", Txa => "TXA", Txs => "TXS",
            Tya => "TYA",
        }
    }

    /// True for the eight conditional branches.
    pub fn is_branch(self) -> bool {
        use Mnemonic::*;
        matches!(self, Bcc | Bcs | Beq | Bmi | Bne | Bpl | Bvc | Bvs)
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when text does not name a 6502 instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMnemonic(pub String);

impl fmt::Display for UnknownMnemonic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown mnemonic '{}'", self.0)
    }
}

impl std::error::Error for UnknownMnemonic {}

impl FromStr for Mnemonic {
    type Err = UnknownMnemonic;

    /// Case-insensitive parse of a three-letter mnemonic.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mnemonic::ALL
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownMnemonic(s.to_string()))
    }
}

/// A single documented opcode.
///
/// # Examples
///
/// ```
/// use sim6502::{AddressingMode, Mnemonic, OPCODE_TABLE};
///
/// let lda_imm = OPCODE_TABLE[0xA9].unwrap();
/// assert_eq!(lda_imm.mnemonic, Mnemonic::Lda);
/// assert_eq!(lda_imm.addressing_mode, AddressingMode::Immediate);
/// assert_eq!(lda_imm.base_cycles, 2);
/// assert_eq!(lda_imm.size_bytes(), 2);
///
/// assert!(OPCODE_TABLE[0x02].is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    /// The opcode byte value.
    pub code: u8,

    /// Instruction mnemonic.
    pub mnemonic: Mnemonic,

    /// Addressing mode for this opcode.
    pub addressing_mode: AddressingMode,

    /// Base cycle cost. Taken branches add one.
    pub base_cycles: u8,
}

impl Opcode {
    /// Total instruction size in bytes (opcode + operands).
    pub fn size_bytes(&self) -> u8 {
        self.addressing_mode.size_bytes()
    }
}

/// Complete 256-entry opcode table indexed by opcode byte value.
pub static OPCODE_TABLE: [Option<Opcode>; 256] = build_table();

#[rustfmt::skip]
const fn build_table() -> [Option<Opcode>; 256] {
    use AddressingMode::*;
    use Mnemonic::*;

    let mut t: [Option<Opcode>; 256] = [None; 256];

    macro_rules! op {
        ($code:expr, $m:expr, $mode:expr, $cycles:expr) => {
            t[$code] = Some(Opcode {
                code: $code as u8,
                mnemonic: $m,
                addressing_mode: $mode,
                base_cycles: $cycles,
            });
        };
    }

    // Load / store
    op!(0xA9, Lda, Immediate, 2); op!(0xA5, Lda, ZeroPage, 3); op!(0xB5, Lda, ZeroPageX, 4);
    op!(0xAD, Lda, Absolute, 4); op!(0xBD, Lda, AbsoluteX, 4); op!(0xB9, Lda, AbsoluteY, 4);
    op!(0xA1, Lda, IndirectX, 6); op!(0xB1, Lda, IndirectY, 5);
    op!(0xA2, Ldx, Immediate, 2); op!(0xA6, Ldx, ZeroPage, 3); op!(0xB6, Ldx, ZeroPageY, 4);
    op!(0xAE, Ldx, Absolute, 4); op!(0xBE, Ldx, AbsoluteY, 4);
    op!(0xA0, Ldy, Immediate, 2); op!(0xA4, Ldy, ZeroPage, 3); op!(0xB4, Ldy, ZeroPageX, 4);
    op!(0xAC, Ldy, Absolute, 4); op!(0xBC, Ldy, AbsoluteX, 4);
    op!(0x85, Sta, ZeroPage, 3); op!(0x95, Sta, ZeroPageX, 4); op!(0x8D, Sta, Absolute, 4);
    op!(0x9D, Sta, AbsoluteX, 5); op!(0x99, Sta, AbsoluteY, 5);
    op!(0x81, Sta, IndirectX, 6); op!(0x91, Sta, IndirectY, 6);
    op!(0x86, Stx, ZeroPage, 3); op!(0x96, Stx, ZeroPageY, 4); op!(0x8E, Stx, Absolute, 4);
    op!(0x84, Sty, ZeroPage, 3); op!(0x94, Sty, ZeroPageX, 4); op!(0x8C, Sty, Absolute, 4);

    // Arithmetic and logic
    op!(0x69, Adc, Immediate, 2); op!(0x65, Adc, ZeroPage, 3); op!(0x75, Adc, ZeroPageX, 4);
    op!(0x6D, Adc, Absolute, 4); op!(0x7D, Adc, AbsoluteX, 4); op!(0x79, Adc, AbsoluteY, 4);
    op!(0x61, Adc, IndirectX, 6); op!(0x71, Adc, IndirectY, 5);
    op!(0xE9, Sbc, Immediate, 2); op!(0xE5, Sbc, ZeroPage, 3); op!(0xF5, Sbc, ZeroPageX, 4);
    op!(0xED, Sbc, Absolute, 4); op!(0xFD, Sbc, AbsoluteX, 4); op!(0xF9, Sbc, AbsoluteY, 4);
    op!(0xE1, Sbc, IndirectX, 6); op!(0xF1, Sbc, IndirectY, 5);
    op!(0x29, And, Immediate, 2); op!(0x25, And, ZeroPage, 3); op!(0x35, And, ZeroPageX, 4);
    op!(0x2D, And, Absolute, 4); op!(0x3D, And, AbsoluteX, 4); op!(0x39, And, AbsoluteY, 4);
    op!(0x21, And, IndirectX, 6); op!(0x31, And, IndirectY, 5);
    op!(0x09, Ora, Immediate, 2); op!(0x05, Ora, ZeroPage, 3); op!(0x15, Ora, ZeroPageX, 4);
    op!(0x0D, Ora, Absolute, 4); op!(0x1D, Ora, AbsoluteX, 4); op!(0x19, Ora, AbsoluteY, 4);
    op!(0x01, Ora, IndirectX, 6); op!(0x11, Ora, IndirectY, 5);
    op!(0x49, Eor, Immediate, 2); op!(0x45, Eor, ZeroPage, 3); op!(0x55, Eor, ZeroPageX, 4);
    op!(0x4D, Eor, Absolute, 4); op!(0x5D, Eor, AbsoluteX, 4); op!(0x59, Eor, AbsoluteY, 4);
    op!(0x41, Eor, IndirectX, 6); op!(0x51, Eor, IndirectY, 5);
    op!(0xC9, Cmp, Immediate, 2); op!(0xC5, Cmp, ZeroPage, 3); op!(0xD5, Cmp, ZeroPageX, 4);
    op!(0xCD, Cmp, Absolute, 4); op!(0xDD, Cmp, AbsoluteX, 4); op!(0xD9, Cmp, AbsoluteY, 4);
    op!(0xC1, Cmp, IndirectX, 6); op!(0xD1, Cmp, IndirectY, 5);
    op!(0xE0, Cpx, Immediate, 2); op!(0xE4, Cpx, ZeroPage, 3); op!(0xEC, Cpx, Absolute, 4);
    op!(0xC0, Cpy, Immediate, 2); op!(0xC4, Cpy, ZeroPage, 3); op!(0xCC, Cpy, Absolute, 4);
    op!(0x24, Bit, ZeroPage, 3); op!(0x2C, Bit, Absolute, 4);

    // Shifts and rotates
    op!(0x0A, Asl, Accumulator, 2); op!(0x06, Asl, ZeroPage, 5); op!(0x16, Asl, ZeroPageX, 6);
    op!(0x0E, Asl, Absolute, 6); op!(0x1E, Asl, AbsoluteX, 7);
    op!(0x4A, Lsr, Accumulator, 2); op!(0x46, Lsr, ZeroPage, 5); op!(0x56, Lsr, ZeroPageX, 6);
    op!(0x4E, Lsr, Absolute, 6); op!(0x5E, Lsr, AbsoluteX, 7);
    op!(0x2A, Rol, Accumulator, 2); op!(0x26, Rol, ZeroPage, 5); op!(0x36, Rol, ZeroPageX, 6);
    op!(0x2E, Rol, Absolute, 6); op!(0x3E, Rol, AbsoluteX, 7);
    op!(0x6A, Ror, Accumulator, 2); op!(0x66, Ror, ZeroPage, 5); op!(0x76, Ror, ZeroPageX, 6);
    op!(0x6E, Ror, Absolute, 6); op!(0x7E, Ror, AbsoluteX, 7);

    // Increment / decrement
    op!(0xE6, Inc, ZeroPage, 5); op!(0xF6, Inc, ZeroPageX, 6);
    op!(0xEE, Inc, Absolute, 6); op!(0xFE, Inc, AbsoluteX, 7);
    op!(0xC6, Dec, ZeroPage, 5); op!(0xD6, Dec, ZeroPageX, 6);
    op!(0xCE, Dec, Absolute, 6); op!(0xDE, Dec, AbsoluteX, 7);
    op!(0xE8, Inx, Implicit, 2); op!(0xC8, Iny, Implicit, 2);
    op!(0xCA, Dex, Implicit, 2); op!(0x88, Dey, Implicit, 2);

    // Branches
    op!(0x90, Bcc, Relative, 2); op!(0xB0, Bcs, Relative, 2);
    op!(0xF0, Beq, Relative, 2); op!(0xD0, Bne, Relative, 2);
    op!(0x30, Bmi, Relative, 2); op!(0x10, Bpl, Relative, 2);
    op!(0x50, Bvc, Relative, 2); op!(0x70, Bvs, Relative, 2);

    // Control flow
    op!(0x4C, Jmp, Absolute, 3); op!(0x6C, Jmp, Indirect, 5);
    op!(0x20, Jsr, Absolute, 6); op!(0x60, Rts, Implicit, 6);
    op!(0x40, Rti, Implicit, 6); op!(0x00, Brk, Implicit, 7);
    op!(0xEA, Nop, Implicit, 2);

    // Stack
    op!(0x48, Pha, Implicit, 3); op!(0x08, Php, Implicit, 3);
    op!(0x68, Pla, Implicit, 4); op!(0x28, Plp, Implicit, 4);

    // Flags
    op!(0x18, Clc, Implicit, 2); op!(0x38, Sec, Implicit, 2);
    op!(0x58, Cli, Implicit, 2); op!(0x78, Sei, Implicit, 2);
    op!(0xD8, Cld, Implicit, 2); op!(0xF8, Sed, Implicit, 2);
    op!(0xB8, Clv, Implicit, 2);

    // Register transfers
    op!(0xAA, Tax, Implicit, 2); op!(0xA8, Tay, Implicit, 2);
    op!(0x8A, Txa, Implicit, 2); op!(0x98, Tya, Implicit, 2);
    op!(0xBA, Tsx, Implicit, 2); op!(0x9A, Txs, Implicit, 2);

    t
}

/// Finds the opcode byte for a mnemonic in a given addressing mode.
pub fn find_opcode(mnemonic: Mnemonic, mode: AddressingMode) -> Option<u8> {
    OPCODE_TABLE
        .iter()
        .flatten()
        .find(|op| op.mnemonic == mnemonic && op.addressing_mode == mode)
        .map(|op| op.code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_opcode_count() {
        let count = OPCODE_TABLE.iter().flatten().count();
        assert_eq!(count, 151);
    }

    #[test]
    fn test_entries_know_their_code() {
        for (index, entry) in OPCODE_TABLE.iter().enumerate() {
            if let Some(op) = entry {
                assert_eq!(op.code as usize, index);
                assert!((2..=7).contains(&op.base_cycles), "{:02X}", index);
            }
        }
    }

    #[test]
    fn test_every_mnemonic_has_an_opcode() {
        for m in Mnemonic::ALL {
            assert!(
                OPCODE_TABLE.iter().flatten().any(|op| op.mnemonic == m),
                "{} missing",
                m
            );
        }
    }

    #[test]
    fn test_mnemonic_parse() {
        assert_eq!("lda".parse::<Mnemonic>(), Ok(Mnemonic::Lda));
        assert_eq!("TXS".parse::<Mnemonic>(), Ok(Mnemonic::Txs));
        assert!("xyz".parse::<Mnemonic>().is_err());
        assert!(Mnemonic::Bne.is_branch());
        assert!(!Mnemonic::Jmp.is_branch());
    }

    #[test]
    fn test_corrected_entries() {
        assert_eq!(find_opcode(Mnemonic::Sbc, AddressingMode::Absolute), Some(0xED));
        assert_eq!(find_opcode(Mnemonic::Sbc, AddressingMode::AbsoluteX), Some(0xFD));
        assert_eq!(find_opcode(Mnemonic::Lsr, AddressingMode::ZeroPage), Some(0x46));
        assert_eq!(find_opcode(Mnemonic::Sta, AddressingMode::Immediate), None);
    }
}
