//! Symbolic representations of 8085 instructions.
//!
//! An 8085 instruction is one, two or three bytes long.  The first
//! byte is always the opcode.  A two-byte instruction carries an
//! 8-bit data operand in its second byte; a three-byte instruction
//! carries a 16-bit operand (an address, or 16-bit data for `LXI`)
//! in its second and third bytes, low byte first.
//!
//! Registers named by an instruction are encoded in the opcode itself
//! and so do not occupy an operand byte.  This means that `MOV A,B`
//! and `MOV A,C` are different instructions with different opcodes,
//! while `JMP 0000H` and `JMP 2050H` are the same instruction with
//! different operands.  [`InstructionForm`] captures exactly the part
//! of the source text which selects an opcode.

use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoStaticStr};

use super::register::Register;

/// The 8085 instruction mnemonics.
///
/// `RST` is not included.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    StrumDisplay,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Mnemonic {
    // Data transfer
    Mov,
    Mvi,
    Lxi,
    Lda,
    Sta,
    Lhld,
    Shld,
    Ldax,
    Stax,
    Xchg,
    // Arithmetic
    Add,
    Adc,
    Sub,
    Sbb,
    Inr,
    Dcr,
    Inx,
    Dcx,
    Dad,
    Daa,
    Adi,
    Aci,
    Sui,
    Sbi,
    // Logical
    Ana,
    Xra,
    Ora,
    Cmp,
    Ani,
    Xri,
    Ori,
    Cpi,
    Rlc,
    Rrc,
    Ral,
    Rar,
    Cma,
    Cmc,
    Stc,
    // Branch
    Jmp,
    Jnz,
    Jz,
    Jnc,
    Jc,
    Jpo,
    Jpe,
    Jp,
    Jm,
    Call,
    Cnz,
    Cz,
    Cnc,
    Cc,
    Cpo,
    Cpe,
    Cp,
    Cm,
    Ret,
    Rnz,
    Rz,
    Rnc,
    Rc,
    Rpo,
    Rpe,
    Rp,
    Rm,
    Pchl,
    // Stack, I/O and machine control
    Push,
    Pop,
    Xthl,
    Sphl,
    In,
    Out,
    Ei,
    Di,
    Hlt,
    Nop,
    Rim,
    Sim,
}

/// `Shape` describes which source operands a mnemonic takes, and
/// which of them select the opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// One or two register operands, all of which select the opcode
    /// (`MOV A,B`, `INR M`, `PUSH PSW`).
    Registers,
    /// A register (which selects the opcode) followed by a value
    /// operand (`MVI A, 10H`, `LXI H, 2050H`).
    RegisterImmediate,
    /// A single 8-bit value operand (`ADI 10H`, `OUT 01H`).
    Immediate,
    /// A single 16-bit address operand (`JMP START`, `LDA 2050H`).
    Address,
    /// No operands at all (`NOP`, `RET`, `XCHG`).
    Implicit,
}

impl Mnemonic {
    pub fn shape(self) -> Shape {
        use Mnemonic::*;
        match self {
            Mov | Add | Adc | Sub | Sbb | Ana | Xra | Ora | Cmp | Inr | Dcr | Inx | Dcx | Dad
            | Push | Pop | Ldax | Stax => Shape::Registers,
            Mvi | Lxi => Shape::RegisterImmediate,
            Adi | Aci | Sui | Sbi | Ani | Xri | Ori | Cpi | In | Out => Shape::Immediate,
            Jmp | Jnz | Jz | Jnc | Jc | Jpo | Jpe | Jp | Jm | Call | Cnz | Cz | Cnc | Cc | Cpo
            | Cpe | Cp | Cm | Lda | Sta | Lhld | Shld => Shape::Address,
            Xchg | Daa | Rlc | Rrc | Ral | Rar | Cma | Cmc | Stc | Ret | Rnz | Rz | Rnc | Rc
            | Rpo | Rpe | Rp | Rm | Pchl | Xthl | Sphl | Ei | Di | Hlt | Nop | Rim | Sim => {
                Shape::Implicit
            }
        }
    }

    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// The part of an instruction's source text which selects its
/// opcode.  Each variant carries exactly the operands which are
/// encoded into the opcode; value operands (numbers and labels) are
/// never part of an `InstructionForm`.
///
/// The `Display` implementation produces the canonical spelling of
/// the form, and `FromStr` accepts it:
///
/// | Variant     | Spelling            |
/// |-------------|---------------------|
/// | `Register`  | `MOV A,B`, `INX H`  |
/// | `Immediate` | `MVI A,`, `ADI`     |
/// | `Address`   | `JMP`               |
/// | `Implicit`  | `NOP`               |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstructionForm {
    Register {
        mnemonic: Mnemonic,
        first: Register,
        second: Option<Register>,
    },
    /// An instruction with a value operand.  When `register` is set,
    /// the source text names that register before the value (and the
    /// canonical spelling has a trailing comma in place of the value).
    Immediate {
        mnemonic: Mnemonic,
        register: Option<Register>,
    },
    Address(Mnemonic),
    Implicit(Mnemonic),
}

impl InstructionForm {
    pub fn mnemonic(&self) -> Mnemonic {
        match self {
            InstructionForm::Register { mnemonic, .. }
            | InstructionForm::Immediate { mnemonic, .. }
            | InstructionForm::Address(mnemonic)
            | InstructionForm::Implicit(mnemonic) => *mnemonic,
        }
    }

    /// The number of operands an instruction of this form has in the
    /// source text.
    pub fn operand_count(&self) -> usize {
        match self {
            InstructionForm::Register { second: None, .. }
            | InstructionForm::Immediate { register: None, .. }
            | InstructionForm::Address(_) => 1,
            InstructionForm::Register {
                second: Some(_), ..
            }
            | InstructionForm::Immediate {
                register: Some(_), ..
            } => 2,
            InstructionForm::Implicit(_) => 0,
        }
    }

    /// The position (among the source operands) of the operand which
    /// is encoded into the bytes following the opcode, if there is
    /// one.
    pub fn value_operand_index(&self) -> Option<usize> {
        match self {
            InstructionForm::Immediate {
                register: Some(_), ..
            } => Some(1),
            InstructionForm::Immediate { register: None, .. } | InstructionForm::Address(_) => {
                Some(0)
            }
            InstructionForm::Register { .. } | InstructionForm::Implicit(_) => None,
        }
    }
}

impl Display for InstructionForm {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            InstructionForm::Register {
                mnemonic,
                first,
                second: None,
            } => write!(f, "{mnemonic} {first}"),
            InstructionForm::Register {
                mnemonic,
                first,
                second: Some(second),
            } => write!(f, "{mnemonic} {first},{second}"),
            InstructionForm::Immediate {
                mnemonic,
                register: Some(register),
            } => write!(f, "{mnemonic} {register},"),
            InstructionForm::Immediate {
                mnemonic,
                register: None,
            }
            | InstructionForm::Address(mnemonic)
            | InstructionForm::Implicit(mnemonic) => write!(f, "{mnemonic}"),
        }
    }
}

/// Signals that a string is not the canonical spelling of any
/// [`InstructionForm`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormParseError(pub String);

impl Display for FormParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a valid instruction form", self.0)
    }
}

impl Error for FormParseError {}

impl FromStr for InstructionForm {
    type Err = FormParseError;

    fn from_str(s: &str) -> Result<InstructionForm, FormParseError> {
        let fail = || FormParseError(s.to_string());
        let (name, rest) = match s.split_once(' ') {
            Some((name, rest)) => (name, Some(rest)),
            None => (s, None),
        };
        let mnemonic: Mnemonic = name.parse().map_err(|_| fail())?;
        let register = |text: &str| text.parse::<Register>().map_err(|_| fail());
        match (mnemonic.shape(), rest) {
            (Shape::Address, None) => Ok(InstructionForm::Address(mnemonic)),
            (Shape::Implicit, None) => Ok(InstructionForm::Implicit(mnemonic)),
            (Shape::Immediate, None) => Ok(InstructionForm::Immediate {
                mnemonic,
                register: None,
            }),
            (Shape::RegisterImmediate, Some(rest)) => match rest.strip_suffix(',') {
                Some(reg) => Ok(InstructionForm::Immediate {
                    mnemonic,
                    register: Some(register(reg)?),
                }),
                None => Err(fail()),
            },
            (Shape::Registers, Some(rest)) => match rest.split_once(',') {
                Some((first, second)) => Ok(InstructionForm::Register {
                    mnemonic,
                    first: register(first)?,
                    second: Some(register(second)?),
                }),
                None => Ok(InstructionForm::Register {
                    mnemonic,
                    first: register(rest)?,
                    second: None,
                }),
            },
            _ => Err(fail()),
        }
    }
}

/// The length of an instruction.  There are no zero-length
/// instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum InstructionSize {
    One = 1,
    Two = 2,
    Three = 3,
}

impl InstructionSize {
    pub fn bytes(self) -> u8 {
        self as u8
    }
}

impl From<InstructionSize> for u16 {
    fn from(size: InstructionSize) -> u16 {
        u16::from(size.bytes())
    }
}

impl From<InstructionSize> for usize {
    fn from(size: InstructionSize) -> usize {
        usize::from(size.bytes())
    }
}

/// What the opcode table knows about one instruction form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstructionDescriptor {
    pub opcode: u8,
    pub size: InstructionSize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_mnemonic_names() {
        assert_eq!(Mnemonic::Mov.to_string(), "MOV");
        assert_eq!(Mnemonic::Lhld.name(), "LHLD");
        assert_eq!("mvi".parse::<Mnemonic>(), Ok(Mnemonic::Mvi));
        assert_eq!("Call".parse::<Mnemonic>(), Ok(Mnemonic::Call));
        assert!("FOO".parse::<Mnemonic>().is_err());
        assert!("RST".parse::<Mnemonic>().is_err());
    }

    #[test]
    fn test_form_spelling() {
        assert_eq!(
            InstructionForm::Register {
                mnemonic: Mnemonic::Mov,
                first: Register::A,
                second: Some(Register::B),
            }
            .to_string(),
            "MOV A,B"
        );
        assert_eq!(
            InstructionForm::Immediate {
                mnemonic: Mnemonic::Mvi,
                register: Some(Register::A),
            }
            .to_string(),
            "MVI A,"
        );
        assert_eq!(
            InstructionForm::Immediate {
                mnemonic: Mnemonic::Cpi,
                register: None,
            }
            .to_string(),
            "CPI"
        );
        assert_eq!(InstructionForm::Address(Mnemonic::Jmp).to_string(), "JMP");
    }

    #[test]
    fn test_form_parse() {
        assert_eq!(
            "INR M".parse::<InstructionForm>(),
            Ok(InstructionForm::Register {
                mnemonic: Mnemonic::Inr,
                first: Register::M,
                second: None,
            })
        );
        assert_eq!(
            "LXI SP,".parse::<InstructionForm>(),
            Ok(InstructionForm::Immediate {
                mnemonic: Mnemonic::Lxi,
                register: Some(Register::SP),
            })
        );
        assert_eq!(
            "RET".parse::<InstructionForm>(),
            Ok(InstructionForm::Implicit(Mnemonic::Ret))
        );
        // Wrong shapes for the mnemonic.
        assert!("JMP A".parse::<InstructionForm>().is_err());
        assert!("MVI A".parse::<InstructionForm>().is_err());
        assert!("MOV".parse::<InstructionForm>().is_err());
        assert!("NOP A".parse::<InstructionForm>().is_err());
        assert!("FOO A,B".parse::<InstructionForm>().is_err());
    }

    #[test]
    fn test_operand_positions() {
        let mvi = InstructionForm::Immediate {
            mnemonic: Mnemonic::Mvi,
            register: Some(Register::B),
        };
        assert_eq!(mvi.operand_count(), 2);
        assert_eq!(mvi.value_operand_index(), Some(1));

        let jmp = InstructionForm::Address(Mnemonic::Jmp);
        assert_eq!(jmp.operand_count(), 1);
        assert_eq!(jmp.value_operand_index(), Some(0));

        let nop = InstructionForm::Implicit(Mnemonic::Nop);
        assert_eq!(nop.operand_count(), 0);
        assert_eq!(nop.value_operand_index(), None);
    }

    #[test]
    fn test_every_mnemonic_has_a_shape_and_name() {
        for m in Mnemonic::iter() {
            let name = m.name();
            assert_eq!(name.parse::<Mnemonic>(), Ok(m));
            assert_eq!(name, name.to_uppercase());
            let _ = m.shape();
        }
    }

    #[test]
    fn test_instruction_size_bytes() {
        assert_eq!(InstructionSize::One.bytes(), 1);
        assert_eq!(u16::from(InstructionSize::Three), 3);
        assert_eq!(usize::from(InstructionSize::Two), 2);
    }
}
