//! 6502 Assembler Module
//!
//! Converts assembly language source code into binary machine code.
//!
//! Assembly runs as an explicit pipeline:
//!
//! 1. [`parser::preprocess`]: trim lines, drop short lines and `;` comments
//! 2. [`resolver::collect_symbols`]: scan for `.entry`, `define` and labels
//! 3. [`resolver::size_statements`]: encode with placeholder operands to give
//!    every label its byte offset
//! 4. [`resolver::encode_statements`]: substitute real label values and emit
//!    the final bytes
//!
//! The first error aborts assembly.
//!
//! # Source Format
//!
//! ```text
//! .entry $0600          ; load address (optional, default $0600)
//! define color $05      ; whole-word text substitution
//! start:
//!     LDA #color
//!     STA $0200
//!     JMP start
//! ```

pub mod encoder;
pub mod listing;
pub mod modes;
pub mod parser;
pub mod resolver;
pub mod symbol_table;

use std::fmt;

use log::debug;

use crate::addressing::AddressingMode;
use crate::opcodes::Mnemonic;

/// Load address used when the source has no `.entry` directive.
pub const DEFAULT_ENTRY: u16 = 0x0600;

/// Complete output from assembling source code
#[derive(Debug, Clone)]
pub struct AssemblerOutput {
    /// Assembled machine code bytes
    pub bytes: Vec<u8>,

    /// Address the bytes are meant to be loaded at
    pub entry_point: u16,

    /// Hex rows (`0600: a9 05 ...`) accepted by [`crate::load_listing`]
    pub listing: Vec<String>,

    /// Every label with its absolute address
    pub labels: Vec<Symbol>,

    /// One record per emitted instruction
    pub instructions: Vec<EncodedInstruction>,
}

/// A symbol table entry mapping a label to an address
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    /// Label name (case-sensitive)
    pub name: String,

    /// Resolved memory address for this label
    pub address: u16,

    /// Source line where label was defined
    pub defined_at: usize,
}

/// An instruction after encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedInstruction {
    /// Source line (1-indexed)
    pub line: usize,

    /// Load address of the opcode byte
    pub address: u16,

    pub mnemonic: Mnemonic,

    /// Operand text as written, after whitespace removal
    pub operand: String,

    /// Addressing mode of the emitted opcode
    pub mode: AddressingMode,

    /// Opcode followed by operand bytes
    pub bytes: Vec<u8>,
}

/// An error encountered during assembly
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblerError {
    /// Error type classification
    pub error_type: ErrorType,

    /// Line number where error occurred (1-indexed)
    pub line: usize,

    /// The offending source line, trimmed
    pub source: String,

    /// Human-readable error message
    pub message: String,
}

impl AssemblerError {
    pub(crate) fn new(
        error_type: ErrorType,
        line: usize,
        source: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error_type,
            line,
            source: source.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for AssemblerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "line {}: {}: {} -> {}",
            self.line, self.error_type, self.message, self.source
        )
    }
}

impl std::error::Error for AssemblerError {}

/// Classification of assembly errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    /// Syntax error (line too short to hold an instruction)
    SyntaxError,

    /// Undefined label reference
    UndefinedLabel,

    /// Duplicate label definition
    DuplicateLabel,

    /// Invalid label name (empty or containing whitespace)
    InvalidLabel,

    /// Invalid mnemonic (not a recognized instruction)
    InvalidMnemonic,

    /// Operand text matches no addressing-mode syntax
    InvalidOperand,

    /// The mnemonic has no opcode in the operand's addressing mode
    IllegalAddressingMode,

    /// Branch target too far for a signed 8-bit offset
    RangeError,

    /// Invalid directive usage
    InvalidDirective,
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            ErrorType::SyntaxError => "syntax error",
            ErrorType::UndefinedLabel => "undefined label",
            ErrorType::DuplicateLabel => "duplicate label",
            ErrorType::InvalidLabel => "invalid label",
            ErrorType::InvalidMnemonic => "invalid mnemonic",
            ErrorType::InvalidOperand => "invalid operand",
            ErrorType::IllegalAddressingMode => "illegal addressing mode",
            ErrorType::RangeError => "branch out of range",
            ErrorType::InvalidDirective => "invalid directive",
        };
        f.write_str(text)
    }
}

/// Assemble source code into machine code
///
/// # Examples
///
/// ```
/// use sim6502::assemble;
///
/// let output = assemble("LDA #$05").unwrap();
/// assert_eq!(output.bytes, vec![0xA9, 0x05]);
/// assert_eq!(output.listing, vec!["0600: a9 05"]);
/// ```
pub fn assemble(source: &str) -> Result<AssemblerOutput, AssemblerError> {
    let lines: Vec<&str> = source.lines().collect();
    assemble_lines(&lines)
}

/// Assemble an ordered list of source lines.
pub fn assemble_lines<S: AsRef<str>>(lines: &[S]) -> Result<AssemblerOutput, AssemblerError> {
    let source_lines = parser::preprocess(lines);
    debug!("{} source lines after preprocessing", source_lines.len());

    let mut symbols = resolver::collect_symbols(source_lines)?;
    debug!(
        "entry ${:04X}, {} labels, {} variables",
        symbols.entry_point,
        symbols.table.labels().len(),
        symbols.table.variables().len()
    );

    let total = resolver::size_statements(&symbols.statements, &mut symbols.table)?;
    debug!("program size {} bytes", total);

    let instructions =
        resolver::encode_statements(&symbols.statements, &symbols.table, symbols.entry_point)?;

    let bytes: Vec<u8> = instructions
        .iter()
        .flat_map(|instr| instr.bytes.iter().copied())
        .collect();

    let labels = symbols
        .table
        .labels()
        .iter()
        .map(|label| Symbol {
            name: label.name.clone(),
            address: symbols.entry_point.wrapping_add(label.offset),
            defined_at: label.defined_at,
        })
        .collect();

    Ok(AssemblerOutput {
        listing: listing::hex_listing(symbols.entry_point, &bytes),
        bytes,
        entry_point: symbols.entry_point,
        labels,
        instructions,
    })
}
