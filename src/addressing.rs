//! # Addressing Modes
//!
//! This module defines the addressing modes supported by the 6502 processor.
//! Each mode determines how many operand bytes follow the opcode and how the
//! CPU derives an effective address from them.
//!
//! The assembler groups the modes into twelve opcode-table columns. Relative
//! addressing shares the zero-page column: a branch operand is written like a
//! zero-page byte and only the mnemonic tells the two apart.

/// 6502 addressing mode enumeration.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implicit, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative, IndirectX, IndirectY
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// Operates directly on the accumulator register.
    ///
    /// Examples: `LSR A`, `ROL A`, `ASL A`
    Accumulator,

    /// No operand, operation implied by instruction.
    ///
    /// Examples: `CLC`, `RTS`, `NOP`
    Implicit,

    /// 8-bit constant operand in instruction.
    ///
    /// Example: `LDA #$10` or `LDA #16`
    Immediate,

    /// 8-bit address in zero page (0x00-0xFF).
    ZeroPage,

    /// Zero page address indexed by X register, wrapping within zero page.
    ZeroPageX,

    /// Zero page address indexed by Y register, wrapping within zero page.
    ZeroPageY,

    /// Signed 8-bit offset for branch instructions.
    Relative,

    /// Full 16-bit address.
    Absolute,

    /// 16-bit address indexed by X register.
    AbsoluteX,

    /// 16-bit address indexed by Y register.
    AbsoluteY,

    /// Indirect jump through 16-bit pointer. Only used by JMP.
    Indirect,

    /// Indexed indirect: `(zp + X)` then dereference.
    IndirectX,

    /// Indirect indexed: dereference `zp`, then add Y.
    IndirectY,
}

impl AddressingMode {
    /// Number of opcode-table columns used by the assembler.
    pub const COLUMNS: usize = 12;

    /// Number of operand bytes that follow the opcode.
    pub fn operand_bytes(self) -> u8 {
        use AddressingMode::*;

        match self {
            Accumulator | Implicit => 0,
            Immediate | ZeroPage | ZeroPageX | ZeroPageY | Relative | IndirectX | IndirectY => 1,
            Absolute | AbsoluteX | AbsoluteY | Indirect => 2,
        }
    }

    /// Total instruction size in bytes (opcode plus operands).
    pub fn size_bytes(self) -> u8 {
        1 + self.operand_bytes()
    }

    /// Column index into the assembler's per-mnemonic opcode row.
    ///
    /// Column order: ACC, IMP, IMM, ZP, ZPX, ZPY, ABS, ABX, ABY, IN, INX, INY.
    pub fn column(self) -> usize {
        use AddressingMode::*;

        match self {
            Accumulator => 0,
            Implicit => 1,
            Immediate => 2,
            ZeroPage | Relative => 3,
            ZeroPageX => 4,
            ZeroPageY => 5,
            Absolute => 6,
            AbsoluteX => 7,
            AbsoluteY => 8,
            Indirect => 9,
            IndirectX => 10,
            IndirectY => 11,
        }
    }

    /// Short upper-case tag used in listings and log output.
    pub fn tag(self) -> &'static str {
        use AddressingMode::*;

        match self {
            Accumulator => "ACC",
            Implicit => "IMP",
            Immediate => "IMM",
            ZeroPage => "ZP",
            ZeroPageX => "ZPX",
            ZeroPageY => "ZPY",
            Relative => "REL",
            Absolute => "ABS",
            AbsoluteX => "ABX",
            AbsoluteY => "ABY",
            Indirect => "IN",
            IndirectX => "INX",
            IndirectY => "INY",
        }
    }
}
