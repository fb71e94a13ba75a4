//! Symbol collection, sizing and final encoding
//!
//! Labels are resolved in two passes over the statements. The sizing pass
//! swaps every label reference for a placeholder of the right width (`$00`
//! for branches, `$0000` for everything else) so each instruction's length,
//! and therefore each label's offset, is known. The encoding pass then swaps
//! in the real values: an absolute `entry + offset` address, or for branches
//! the signed distance from the end of the branch instruction.

use log::debug;

use crate::addressing::AddressingMode;
use crate::assembler::encoder::encode;
use crate::assembler::modes::{looks_like_label, match_operand};
use crate::assembler::parser::{
    parse_directive, parse_statement, replace_word, split_instruction, Directive, SourceLine,
    Statement,
};
use crate::assembler::symbol_table::{Label, SymbolTable};
use crate::assembler::{AssemblerError, EncodedInstruction, ErrorType, DEFAULT_ENTRY};
use crate::opcodes::{Mnemonic, OPCODE_TABLE};

/// Statements and symbols gathered from preprocessed source.
#[derive(Debug, Clone)]
pub struct CollectedSource {
    /// Non-directive lines, in source order
    pub statements: Vec<Statement>,

    /// Labels (offsets unresolved) and variables
    pub table: SymbolTable,

    pub entry_point: u16,
}

/// Scans the lines from last to first, pulling out `.entry` and `define`
/// directives and registering labels.
///
/// Duplicate labels, variables or `.entry` directives are errors.
pub fn collect_symbols(lines: Vec<SourceLine>) -> Result<CollectedSource, AssemblerError> {
    let mut entry: Option<(u16, usize)> = None;
    let mut table = SymbolTable::new();
    let mut statements = Vec::new();

    for line in lines.iter().rev() {
        match parse_directive(line)? {
            Some(Directive::Entry(address)) => {
                if let Some((_, other)) = entry {
                    return Err(AssemblerError::new(
                        ErrorType::InvalidDirective,
                        line.number,
                        line.text.as_str(),
                        format!(".entry already given at line {}", other),
                    ));
                }
                entry = Some((address, line.number));
            }
            Some(Directive::Define { name, value }) => {
                table
                    .add_variable(name.clone(), value, line.number)
                    .map_err(|existing| {
                        AssemblerError::new(
                            ErrorType::InvalidDirective,
                            line.number,
                            line.text.as_str(),
                            format!("'{}' already defined at line {}", name, existing.defined_at),
                        )
                    })?;
            }
            None => {
                let statement = parse_statement(line)?;
                if let Some(label) = &statement.label {
                    table.add_label(label.clone(), line.number).map_err(|existing| {
                        AssemblerError::new(
                            ErrorType::DuplicateLabel,
                            line.number,
                            line.text.as_str(),
                            format!(
                                "label '{}' also defined at line {}",
                                label, existing.defined_at
                            ),
                        )
                    })?;
                }
                statements.push(statement);
            }
        }
    }

    statements.reverse();
    table.sort_by_line();

    Ok(CollectedSource {
        statements,
        table,
        entry_point: entry.map_or(DEFAULT_ENTRY, |(address, _)| address),
    })
}

/// Assigns every label its byte offset. Returns the program length.
pub fn size_statements(
    statements: &[Statement],
    table: &mut SymbolTable,
) -> Result<u16, AssemblerError> {
    let mut offset: u16 = 0;

    for statement in statements {
        if let Some(label) = &statement.label {
            table.set_label_offset(label, offset);
        }

        let Some(parts) = split_parts(statement, table)? else {
            continue;
        };

        let placeholder = if parts.mnemonic.is_branch() { "$00" } else { "$0000" };
        let operand = substitute_label(&parts.operand, table, |_| Ok(placeholder.to_string()))?;
        let (_, bytes) = encode_operand(statement, parts.mnemonic, &operand)?;

        offset = offset.wrapping_add(bytes.len() as u16);
    }

    Ok(offset)
}

/// Emits the final bytes for every statement.
pub fn encode_statements(
    statements: &[Statement],
    table: &SymbolTable,
    entry_point: u16,
) -> Result<Vec<EncodedInstruction>, AssemblerError> {
    let mut instructions = Vec::new();
    let mut offset: u16 = 0;

    for statement in statements {
        let Some(parts) = split_parts(statement, table)? else {
            continue;
        };

        let operand = substitute_label(&parts.operand, table, |label| {
            if parts.mnemonic.is_branch() {
                let distance = label.offset as i32 - (offset as i32 + 2);
                if !(-128..=127).contains(&distance) {
                    return Err(AssemblerError::new(
                        ErrorType::RangeError,
                        statement.line,
                        statement.source.as_str(),
                        format!("branch to '{}' is {} bytes away", label.name, distance),
                    ));
                }
                Ok(format!("${:02x}", distance as i8 as u8))
            } else {
                Ok(format!("${:04x}", entry_point.wrapping_add(label.offset)))
            }
        })?;

        let (mode, bytes) = encode_operand(statement, parts.mnemonic, &operand)?;
        let address = entry_point.wrapping_add(offset);

        debug!(
            "{:04X}  {} {:<10} {:<3} -> {:02x?}",
            address,
            parts.mnemonic,
            parts.raw_operand,
            mode.tag(),
            bytes
        );

        offset = offset.wrapping_add(bytes.len() as u16);
        instructions.push(EncodedInstruction {
            line: statement.line,
            address,
            mnemonic: parts.mnemonic,
            operand: parts.raw_operand,
            mode,
            bytes,
        });
    }

    Ok(instructions)
}

struct Parts {
    mnemonic: Mnemonic,

    /// Operand as written, whitespace removed
    raw_operand: String,

    /// Operand with variables substituted
    operand: String,
}

/// Splits a statement's instruction and applies variable substitution.
///
/// Returns `None` for label-only lines.
fn split_parts(statement: &Statement, table: &SymbolTable) -> Result<Option<Parts>, AssemblerError> {
    if statement.body.is_empty() {
        return Ok(None);
    }

    let error = |error_type, message: String| {
        AssemblerError::new(error_type, statement.line, statement.source.as_str(), message)
    };

    let (mnemonic, raw_operand) = split_instruction(&statement.body).ok_or_else(|| {
        error(
            ErrorType::SyntaxError,
            format!("'{}' is not an instruction", statement.body),
        )
    })?;

    let mnemonic: Mnemonic = mnemonic
        .parse()
        .map_err(|e| error(ErrorType::InvalidMnemonic, format!("{}", e)))?;

    let operand = table
        .variables()
        .iter()
        .fold(raw_operand.clone(), |text, var| {
            replace_word(&text, &var.name, &var.value).unwrap_or(text)
        });

    Ok(Some(Parts {
        mnemonic,
        raw_operand,
        operand,
    }))
}

/// Replaces the first label referenced in `operand` with `value(label)`.
fn substitute_label<F>(operand: &str, table: &SymbolTable, value: F) -> Result<String, AssemblerError>
where
    F: FnOnce(&Label) -> Result<String, AssemblerError>,
{
    let Some(label) = table
        .labels()
        .iter()
        .find(|label| replace_word(operand, &label.name, "").is_some())
    else {
        return Ok(operand.to_string());
    };

    let replacement = value(label)?;
    Ok(replace_word(operand, &label.name, &replacement).unwrap_or_else(|| operand.to_string()))
}

/// Matches the operand syntax and encodes the instruction.
///
/// Returns the addressing mode of the emitted opcode, which for branches is
/// Relative and for bare shifts is Accumulator.
fn encode_operand(
    statement: &Statement,
    mnemonic: Mnemonic,
    operand: &str,
) -> Result<(AddressingMode, Vec<u8>), AssemblerError> {
    let error = |error_type, message: String| {
        AssemblerError::new(error_type, statement.line, statement.source.as_str(), message)
    };

    let lowered = operand.to_ascii_lowercase();
    let Some((mut mode, value)) = match_operand(&lowered) else {
        return Err(if looks_like_label(&lowered) {
            error(ErrorType::UndefinedLabel, format!("no label named '{}'", operand))
        } else {
            error(ErrorType::InvalidOperand, format!("cannot parse operand '{}'", operand))
        });
    };

    if mnemonic.is_branch() && mode == AddressingMode::ZeroPage {
        mode = AddressingMode::Relative;
    }

    let bytes = encode(mnemonic, mode, value).ok_or_else(|| {
        error(
            ErrorType::IllegalAddressingMode,
            format!("{} has no {} form", mnemonic, mode.tag()),
        )
    })?;

    let mode = bytes
        .first()
        .and_then(|&code| OPCODE_TABLE[code as usize])
        .map_or(mode, |op| op.addressing_mode);

    Ok((mode, bytes))
}
