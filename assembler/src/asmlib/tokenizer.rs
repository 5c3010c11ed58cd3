//! Splits a source line into label, mnemonic and operands.
//!
//! A source line looks like this (every part is optional):
//!
//! ```text
//! LOOP:   MVI A, 10H    ; comment
//! ```
//!
//! Tokenization never fails.  Text which is not a valid instruction
//! is still split up; it is the resolver which rejects it.


const COMMENT_START: char = ';';
const LABEL_END: char = ':';
const OPERAND_SEPARATOR: char = ',';

/// The instruction part of a source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionText<'a> {
    /// Never empty, and never contains whitespace.
    pub mnemonic: &'a str,
    /// Zero, one or two operands, each with surrounding whitespace
    /// removed.
    pub operands: Vec<&'a str>,
}

/// A source line broken into its parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenizedLine<'a> {
    pub label: Option<&'a str>,
    /// `None` for blank lines, comment-only lines and lines which
    /// only define a label.
    pub instruction: Option<InstructionText<'a>>,
}

fn strip_comment(line: &str) -> &str {
    match line.find(COMMENT_START) {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// A label is the text before a `:` which is not preceded by any
/// whitespace (ignoring leading whitespace).
fn split_label(code: &str) -> (Option<&str>, &str) {
    let code = code.trim_start();
    match code.find(|ch: char| ch == LABEL_END || ch.is_whitespace()) {
        Some(pos) if code[pos..].starts_with(LABEL_END) => {
            let label = &code[..pos];
            let rest = &code[pos + LABEL_END.len_utf8()..];
            if label.is_empty() {
                (None, rest)
            } else {
                (Some(label), rest)
            }
        }
        _ => (None, code),
    }
}

/// Only the first comma separates operands; any later comma is part
/// of the second operand.
fn split_operands(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    match text.split_once(OPERAND_SEPARATOR) {
        Some((first, second)) => vec![first.trim(), second.trim()],
        None => vec![text.trim()],
    }
}

pub fn tokenize(line: &str) -> TokenizedLine<'_> {
    let (label, rest) = split_label(strip_comment(line));
    let rest = rest.trim();
    if rest.is_empty() {
        return TokenizedLine {
            label,
            instruction: None,
        };
    }
    let (mnemonic, operand_text) = match rest.find(char::is_whitespace) {
        Some(pos) => (&rest[..pos], rest[pos..].trim_start()),
        None => (rest, ""),
    };
    TokenizedLine {
        label,
        instruction: Some(InstructionText {
            mnemonic,
            operands: split_operands(operand_text),
        }),
    }
}
