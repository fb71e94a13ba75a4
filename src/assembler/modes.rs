//! Operand syntax matching
//!
//! Operand text (whitespace removed, lower-cased) is tried against an ordered
//! list of matchers; the first one that accepts the whole text decides the
//! addressing mode and the operand value.
//!
//! | Syntax      | Mode        |
//! |-------------|-------------|
//! | `a`         | Accumulator |
//! | (empty)     | Implicit    |
//! | `#$hh`      | Immediate   |
//! | `#ddd`      | Immediate (decimal, clamped to 255) |
//! | `($hh,x)`   | IndirectX   |
//! | `($hh),y`   | IndirectY   |
//! | `($hhhh)`   | Indirect    |
//! | `$hh,x`     | ZeroPageX   |
//! | `$hh,y`     | ZeroPageY   |
//! | `$hhhh,x`   | AbsoluteX   |
//! | `$hhhh,y`   | AbsoluteY   |
//! | `$hh`       | ZeroPage (Relative for branches) |
//! | `$hhhh`     | Absolute    |

use crate::addressing::AddressingMode;

/// Operand bytes decoded from the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandValue {
    None,
    Byte(u8),
    Word(u16),
}

impl OperandValue {
    /// Little-endian operand bytes.
    pub fn to_bytes(self) -> Vec<u8> {
        match self {
            OperandValue::None => Vec::new(),
            OperandValue::Byte(byte) => vec![byte],
            OperandValue::Word(word) => word.to_le_bytes().to_vec(),
        }
    }
}

type Matcher = fn(&str) -> Option<OperandValue>;

/// Matchers in priority order.
pub const MATCHERS: [(AddressingMode, Matcher); 13] = [
    (AddressingMode::Accumulator, accumulator),
    (AddressingMode::Implicit, implied),
    (AddressingMode::Immediate, immediate_hex),
    (AddressingMode::Immediate, immediate_decimal),
    (AddressingMode::IndirectX, indirect_x),
    (AddressingMode::IndirectY, indirect_y),
    (AddressingMode::Indirect, indirect),
    (AddressingMode::ZeroPageX, zero_page_x),
    (AddressingMode::ZeroPageY, zero_page_y),
    (AddressingMode::AbsoluteX, absolute_x),
    (AddressingMode::AbsoluteY, absolute_y),
    (AddressingMode::ZeroPage, zero_page),
    (AddressingMode::Absolute, absolute),
];

/// Finds the addressing mode and value for lower-cased operand text.
///
/// # Examples
///
/// ```
/// use sim6502::AddressingMode;
/// use sim6502::assembler::modes::{match_operand, OperandValue};
///
/// assert_eq!(
///     match_operand("$0200,x"),
///     Some((AddressingMode::AbsoluteX, OperandValue::Word(0x0200)))
/// );
/// assert_eq!(match_operand("#300"), Some((AddressingMode::Immediate, OperandValue::Byte(255))));
/// assert_eq!(match_operand("$123"), None);
/// ```
pub fn match_operand(operand: &str) -> Option<(AddressingMode, OperandValue)> {
    MATCHERS
        .iter()
        .find_map(|(mode, matcher)| matcher(operand).map(|value| (*mode, value)))
}

/// True when unmatched operand text reads like a label reference
/// (`name`, `name,x` or `name,y`).
pub fn looks_like_label(operand: &str) -> bool {
    let name = operand
        .strip_suffix(",x")
        .or_else(|| operand.strip_suffix(",y"))
        .unwrap_or(operand);

    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Exactly `len` hex digits.
fn hex_digits(s: &str, len: usize) -> Option<u16> {
    if s.len() != len || !s.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(s, 16).ok()
}

fn byte(s: &str) -> Option<OperandValue> {
    hex_digits(s.strip_prefix('$')?, 2).map(|v| OperandValue::Byte(v as u8))
}

fn word(s: &str) -> Option<OperandValue> {
    hex_digits(s.strip_prefix('$')?, 4).map(OperandValue::Word)
}

fn accumulator(s: &str) -> Option<OperandValue> {
    (s == "a").then_some(OperandValue::None)
}

fn implied(s: &str) -> Option<OperandValue> {
    s.is_empty().then_some(OperandValue::None)
}

fn immediate_hex(s: &str) -> Option<OperandValue> {
    let digits = s.strip_prefix("#$")?;
    (1..=2)
        .find_map(|len| hex_digits(digits, len))
        .map(|v| OperandValue::Byte(v as u8))
}

fn immediate_decimal(s: &str) -> Option<OperandValue> {
    let digits = s.strip_prefix('#')?;
    if digits.is_empty() || digits.len() > 3 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let value: u16 = digits.parse().ok()?;
    Some(OperandValue::Byte(value.min(0xFF) as u8))
}

fn indirect_x(s: &str) -> Option<OperandValue> {
    byte(s.strip_prefix('(')?.strip_suffix(",x)")?)
}

fn indirect_y(s: &str) -> Option<OperandValue> {
    byte(s.strip_prefix('(')?.strip_suffix("),y")?)
}

fn indirect(s: &str) -> Option<OperandValue> {
    word(s.strip_prefix('(')?.strip_suffix(')')?)
}

fn zero_page_x(s: &str) -> Option<OperandValue> {
    byte(s.strip_suffix(",x")?)
}

fn zero_page_y(s: &str) -> Option<OperandValue> {
    byte(s.strip_suffix(",y")?)
}

fn absolute_x(s: &str) -> Option<OperandValue> {
    word(s.strip_suffix(",x")?)
}

fn absolute_y(s: &str) -> Option<OperandValue> {
    word(s.strip_suffix(",y")?)
}

fn zero_page(s: &str) -> Option<OperandValue> {
    byte(s)
}

fn absolute(s: &str) -> Option<OperandValue> {
    word(s)
}
