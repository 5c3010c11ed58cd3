use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::io::Error as IoError;
use std::path::PathBuf;

/// Source lines are numbered from 1.
pub type LineNumber = usize;

/// The reason one source line could not be assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineErrorKind {
    /// The opcode table has no entry for the lookup key built from
    /// the mnemonic and its operands.
    UnknownInstruction { key: String },
    /// An operand (after any label substitution and removal of the
    /// radix suffix) is not a hexadecimal number.
    MalformedNumericOperand { operand: String },
    /// An operand's value does not fit in the instruction's operand
    /// field.
    OperandOutOfRange { operand: String, limit: u16 },
    /// The instruction is known but was given the wrong number of
    /// operands.
    WrongOperandCount {
        key: String,
        expected: usize,
        got: usize,
    },
}

impl Display for LineErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            LineErrorKind::UnknownInstruction { key } => {
                write!(f, "invalid instruction: {key}")
            }
            LineErrorKind::MalformedNumericOperand { operand } => {
                write!(
                    f,
                    "operand '{operand}' is neither a known label nor a hexadecimal number"
                )
            }
            LineErrorKind::OperandOutOfRange { operand, limit } => {
                write!(
                    f,
                    "operand '{operand}' is too large; the largest allowed value is {limit:X}H"
                )
            }
            LineErrorKind::WrongOperandCount { key, expected, got } => {
                write!(f, "{key} takes {expected} operand(s) but {got} were given")
            }
        }
    }
}

impl Error for LineErrorKind {}

/// A failure to assemble a particular source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineError {
    pub line_number: LineNumber,
    pub kind: LineErrorKind,
}

impl Display for LineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "line {}: {}", self.line_number, self.kind)
    }
}

impl Error for LineError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoAction {
    Read,
    Write,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IoTarget {
    File(PathBuf),
    Stdout,
}

#[derive(Debug)]
pub struct IoFailed {
    pub action: IoAction,
    pub target: IoTarget,
    pub error: IoError,
}

impl Display for IoFailed {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        let action = match self.action {
            IoAction::Read => "reading",
            IoAction::Write => "writing",
        };
        match &self.target {
            IoTarget::File(name) => {
                write!(f, "I/O error {action} {}: {}", name.display(), self.error)
            }
            IoTarget::Stdout => write!(f, "I/O error {action} stdout: {}", self.error),
        }
    }
}

/// A failure of a whole assembler run.  Problems with individual
/// source lines do not stop the run; they are collected and reported
/// together as `LinesFailed` once the output has been written.
#[derive(Debug)]
pub enum AssemblerFailure {
    Io(IoFailed),
    LinesFailed(Vec<LineError>),
}

impl Display for AssemblerFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            AssemblerFailure::Io(e) => e.fmt(f),
            AssemblerFailure::LinesFailed(errors) => match errors.as_slice() {
                [only] => write!(f, "{only}"),
                _ => {
                    write!(f, "{} lines failed to assemble:", errors.len())?;
                    for e in errors {
                        write!(f, "\n{e}")?;
                    }
                    Ok(())
                }
            },
        }
    }
}

impl Error for AssemblerFailure {}
