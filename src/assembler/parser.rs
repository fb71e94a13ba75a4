//! Assembly source parser
//!
//! Line-level parsing: comment stripping, directive recognition, label
//! splitting, and numeric literals.

use crate::assembler::{AssemblerError, ErrorType};

/// A source line that survived preprocessing.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceLine {
    /// Line number in source file (1-indexed)
    pub number: usize,

    /// Trimmed text with any comment removed
    pub text: String,
}

/// A line that may define a label and may carry an instruction.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// Line number in source file (1-indexed)
    pub line: usize,

    /// Source text, for error reporting
    pub source: String,

    /// Label defined on this line (e.g., "loop" from "loop: DEX")
    pub label: Option<String>,

    /// Instruction text after the label; empty for a label-only line
    pub body: String,
}

/// A recognised directive line.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// `.entry $XXXX`
    Entry(u16),

    /// `define NAME VALUE`
    Define { name: String, value: String },
}

/// Trims lines, drops those shorter than three characters or starting with
/// `;`, and cuts trailing comments.
pub fn preprocess<S: AsRef<str>>(lines: &[S]) -> Vec<SourceLine> {
    lines
        .iter()
        .enumerate()
        .filter_map(|(index, line)| {
            let line = line.as_ref().trim();
            if line.len() < 3 || line.starts_with(';') {
                return None;
            }

            let text = match line.find(';') {
                Some(comment) => line[..comment].trim_end(),
                None => line,
            };

            Some(SourceLine {
                number: index + 1,
                text: text.to_string(),
            })
        })
        .collect()
}

/// Recognises `.entry` and `define` lines.
///
/// Returns `Ok(None)` for ordinary lines.
pub fn parse_directive(line: &SourceLine) -> Result<Option<Directive>, AssemblerError> {
    let text = line.text.as_str();
    let error = |message: String| {
        AssemblerError::new(ErrorType::InvalidDirective, line.number, text, message)
    };

    if text.starts_with(".entry $") {
        let parts: Vec<&str> = text.split('$').collect();
        if parts.len() != 2 {
            return Err(error("expected .entry $XXXX".to_string()));
        }

        let address = u16::from_str_radix(parts[1].trim(), 16)
            .map_err(|e| error(format!("invalid entry address: {}", e)))?;
        return Ok(Some(Directive::Entry(address)));
    }

    if text.starts_with("define") && text.len() > "define".len() {
        let parts: Vec<&str> = text
            .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '$'))
            .filter(|part| !part.is_empty())
            .collect();

        if parts.len() != 3 || parts[0] != "define" {
            return Err(error("expected define NAME VALUE".to_string()));
        }

        return Ok(Some(Directive::Define {
            name: parts[1].to_string(),
            value: parts[2].to_string(),
        }));
    }

    Ok(None)
}

/// Splits `name: body` into a statement.
///
/// Label names may not be empty or contain whitespace.
pub fn parse_statement(line: &SourceLine) -> Result<Statement, AssemblerError> {
    let (label, body) = match line.text.split_once(':') {
        Some((name, body)) => {
            if let Err(message) = validate_label(name) {
                return Err(AssemblerError::new(
                    ErrorType::InvalidLabel,
                    line.number,
                    line.text.as_str(),
                    message,
                ));
            }
            (Some(name.to_string()), body.trim())
        }
        None => (None, line.text.as_str()),
    };

    Ok(Statement {
        line: line.number,
        source: line.text.clone(),
        label,
        body: body.to_string(),
    })
}

/// Validate a label name
fn validate_label(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("label name cannot be empty".to_string());
    }

    if name.chars().any(char::is_whitespace) {
        return Err(format!("label names cannot contain spaces: '{}'", name));
    }

    Ok(())
}

/// Splits an instruction into its three-letter mnemonic and operand text.
///
/// All whitespace is removed first, so `LDA #$05`, `LDA#$05` and
/// `L D A #$05` are the same instruction.
pub fn split_instruction(body: &str) -> Option<(String, String)> {
    let compact: String = body.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.len() < 3 || !compact.is_char_boundary(3) {
        return None;
    }

    let (mnemonic, operand) = compact.split_at(3);
    Some((mnemonic.to_string(), operand.to_string()))
}

/// Replaces every whole-word occurrence of `word` in `text`.
///
/// A match must not be preceded or followed by a word character
/// (`[A-Za-z0-9_]`), and must not directly follow `$`, so hex literals are
/// never rewritten. Returns `None` when nothing matched.
pub fn replace_word(text: &str, word: &str, replacement: &str) -> Option<String> {
    if word.is_empty() {
        return None;
    }

    let is_word = |c: char| c.is_ascii_alphanumeric() || c == '_';
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    let mut prev: Option<char> = None;
    let mut replaced = false;

    while let Some(pos) = rest.find(word) {
        let before = rest[..pos].chars().next_back().or(prev);
        let after = rest[pos + word.len()..].chars().next();

        let bounded = !before.is_some_and(|c| is_word(c) || c == '$')
            && !after.is_some_and(is_word);

        out.push_str(&rest[..pos]);
        if bounded {
            out.push_str(replacement);
            replaced = true;
        } else {
            out.push_str(word);
        }

        prev = word.chars().next_back();
        rest = &rest[pos + word.len()..];
    }

    out.push_str(rest);
    replaced.then_some(out)
}
