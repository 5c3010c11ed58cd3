//! Maps a mnemonic and its operands onto an opcode table entry.
//!
//! The opcode table is keyed by [`InstructionForm`], and each form
//! has a canonical spelling (see [`InstructionForm`]'s `Display`
//! implementation).  The resolver decides which of the source
//! operands belong in that key:
//!
//! 1. For the immediate-load mnemonics (`MVI`, `LXI`) with at least
//!    one operand, the key is the mnemonic, the first operand and a
//!    trailing comma (`MVI A,`).
//! 2. For mnemonics whose operand (if any) is a value rather than a
//!    register, the key is the bare mnemonic (`JMP`, `ADI`, `RET`).
//! 3. Otherwise, the key is the mnemonic followed by all the operands
//!    (`MOV A,B`, `INR M`).
//!
//! Keys built from the user's text are only used in error messages.

use base::prelude::{
    opcode_table, InstructionDescriptor, InstructionForm, Mnemonic, Register, Shape,
};

use tracing::{event, Level};

use super::types::LineErrorKind;

/// An instruction that was found in the opcode table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<'a> {
    pub form: InstructionForm,
    pub descriptor: InstructionDescriptor,
    /// The operand which is encoded into the bytes following the
    /// opcode (`10H` in `MVI A, 10H`, `START` in `JMP START`).
    pub value: Option<&'a str>,
}

/// Spell the lookup key for `mnemonic` and `operands` as written by
/// the user.
#[must_use]
pub fn lookup_key(mnemonic: &str, operands: &[&str]) -> String {
    let shape = mnemonic.parse::<Mnemonic>().ok().map(Mnemonic::shape);
    match (shape, operands) {
        (Some(Shape::RegisterImmediate), [first, ..]) => format!("{mnemonic} {first},"),
        (Some(Shape::Immediate | Shape::Address | Shape::Implicit), _) | (_, []) => {
            mnemonic.to_string()
        }
        (_, [only]) => format!("{mnemonic} {only}"),
        (_, [first, second, ..]) => format!("{mnemonic} {first},{second}"),
    }
}

fn form_of(mnemonic: Mnemonic, operands: &[&str]) -> Option<InstructionForm> {
    let register = |text: &str| text.parse::<Register>().ok();
    match (mnemonic.shape(), operands) {
        (Shape::RegisterImmediate, [first, ..]) => Some(InstructionForm::Immediate {
            mnemonic,
            register: Some(register(*first)?),
        }),
        (Shape::Immediate, _) => Some(InstructionForm::Immediate {
            mnemonic,
            register: None,
        }),
        (Shape::Address, _) => Some(InstructionForm::Address(mnemonic)),
        (Shape::Implicit, _) => Some(InstructionForm::Implicit(mnemonic)),
        (Shape::Registers, [only]) => Some(InstructionForm::Register {
            mnemonic,
            first: register(*only)?,
            second: None,
        }),
        (Shape::Registers, [first, second]) => Some(InstructionForm::Register {
            mnemonic,
            first: register(*first)?,
            second: Some(register(*second)?),
        }),
        (Shape::Registers | Shape::RegisterImmediate, _) => None,
    }
}

/// Find the opcode table entry for an instruction, without checking
/// that it has the right number of operands.
///
/// # Errors
///
/// `UnknownInstruction` when there is no table entry for the key.
pub fn lookup(
    mnemonic: &str,
    operands: &[&str],
) -> Result<(InstructionForm, InstructionDescriptor), LineErrorKind> {
    mnemonic
        .parse::<Mnemonic>()
        .ok()
        .and_then(|m| form_of(m, operands))
        .and_then(|form| opcode_table().lookup(&form).map(|d| (form, d)))
        .ok_or_else(|| LineErrorKind::UnknownInstruction {
            key: lookup_key(mnemonic, operands),
        })
}

/// Find the opcode table entry for an instruction and pick out its
/// value operand.
///
/// # Errors
///
/// `UnknownInstruction` when there is no table entry for the key, and
/// `WrongOperandCount` when the instruction needs a value operand
/// which is missing.  Surplus operands (as in `RET 5`) are ignored.
pub fn resolve<'a>(mnemonic: &str, operands: &[&'a str]) -> Result<Resolved<'a>, LineErrorKind> {
    let (form, descriptor) = lookup(mnemonic, operands)?;
    let expected = form.operand_count();
    let got = operands.len();
    if got < expected {
        return Err(LineErrorKind::WrongOperandCount {
            key: form.to_string(),
            expected,
            got,
        });
    }
    if got > expected {
        event!(
            Level::WARN,
            "{form} takes {expected} operand(s); ignoring the other {}",
            got - expected
        );
    }
    Ok(Resolved {
        form,
        descriptor,
        value: form.value_operand_index().map(|i| operands[i]),
    })
}
