//! The 8085 opcode table.
//!
//! Opcode values are taken from the Intel 8085AH data sheet
//! (instruction set summary table).
//!
//! Most instructions are listed individually in [`ALL_OPCODES`].
//! Instructions which carry an 8-bit register number in a 3-bit field
//! of the opcode (`MOV`, `MVI`, the accumulator arithmetic and logic
//! group, `INR` and `DCR`) are generated from [`REGISTER_FAMILIES`]
//! instead, since the table would otherwise need a hundred-odd
//! near-identical lines for them.

use std::collections::HashMap;
use std::sync::OnceLock;

use super::instruction::{InstructionDescriptor, InstructionForm, InstructionSize, Mnemonic};
use super::register::Register;

#[derive(Debug, Clone, Copy)]
struct OpcodeDef {
    form: InstructionForm,
    opcode: u8,
    size: InstructionSize,
}

const fn implicit(mnemonic: Mnemonic, opcode: u8) -> OpcodeDef {
    OpcodeDef {
        form: InstructionForm::Implicit(mnemonic),
        opcode,
        size: InstructionSize::One,
    }
}

const fn address(mnemonic: Mnemonic, opcode: u8) -> OpcodeDef {
    OpcodeDef {
        form: InstructionForm::Address(mnemonic),
        opcode,
        size: InstructionSize::Three,
    }
}

const fn immediate(mnemonic: Mnemonic, opcode: u8) -> OpcodeDef {
    OpcodeDef {
        form: InstructionForm::Immediate {
            mnemonic,
            register: None,
        },
        opcode,
        size: InstructionSize::Two,
    }
}

const fn pair(mnemonic: Mnemonic, register: Register, opcode: u8) -> OpcodeDef {
    OpcodeDef {
        form: InstructionForm::Register {
            mnemonic,
            first: register,
            second: None,
        },
        opcode,
        size: InstructionSize::One,
    }
}

const fn load_pair(register: Register, opcode: u8) -> OpcodeDef {
    OpcodeDef {
        form: InstructionForm::Immediate {
            mnemonic: Mnemonic::Lxi,
            register: Some(register),
        },
        opcode,
        size: InstructionSize::Three,
    }
}

const ALL_OPCODES: &[OpcodeDef] = &[
    // Register-pair operations.
    load_pair(Register::B, 0x01),
    load_pair(Register::D, 0x11),
    load_pair(Register::H, 0x21),
    load_pair(Register::SP, 0x31),
    pair(Mnemonic::Inx, Register::B, 0x03),
    pair(Mnemonic::Inx, Register::D, 0x13),
    pair(Mnemonic::Inx, Register::H, 0x23),
    pair(Mnemonic::Inx, Register::SP, 0x33),
    pair(Mnemonic::Dcx, Register::B, 0x0B),
    pair(Mnemonic::Dcx, Register::D, 0x1B),
    pair(Mnemonic::Dcx, Register::H, 0x2B),
    pair(Mnemonic::Dcx, Register::SP, 0x3B),
    pair(Mnemonic::Dad, Register::B, 0x09),
    pair(Mnemonic::Dad, Register::D, 0x19),
    pair(Mnemonic::Dad, Register::H, 0x29),
    pair(Mnemonic::Dad, Register::SP, 0x39),
    pair(Mnemonic::Push, Register::B, 0xC5),
    pair(Mnemonic::Push, Register::D, 0xD5),
    pair(Mnemonic::Push, Register::H, 0xE5),
    pair(Mnemonic::Push, Register::PSW, 0xF5),
    pair(Mnemonic::Pop, Register::B, 0xC1),
    pair(Mnemonic::Pop, Register::D, 0xD1),
    pair(Mnemonic::Pop, Register::H, 0xE1),
    pair(Mnemonic::Pop, Register::PSW, 0xF1),
    pair(Mnemonic::Ldax, Register::B, 0x0A),
    pair(Mnemonic::Ldax, Register::D, 0x1A),
    pair(Mnemonic::Stax, Register::B, 0x02),
    pair(Mnemonic::Stax, Register::D, 0x12),
    // Accumulator immediates and I/O.
    immediate(Mnemonic::Adi, 0xC6),
    immediate(Mnemonic::Aci, 0xCE),
    immediate(Mnemonic::Sui, 0xD6),
    immediate(Mnemonic::Sbi, 0xDE),
    immediate(Mnemonic::Ani, 0xE6),
    immediate(Mnemonic::Xri, 0xEE),
    immediate(Mnemonic::Ori, 0xF6),
    immediate(Mnemonic::Cpi, 0xFE),
    immediate(Mnemonic::In, 0xDB),
    immediate(Mnemonic::Out, 0xD3),
    // Direct addressing.
    address(Mnemonic::Lda, 0x3A),
    address(Mnemonic::Sta, 0x32),
    address(Mnemonic::Lhld, 0x2A),
    address(Mnemonic::Shld, 0x22),
    // Jumps.
    address(Mnemonic::Jmp, 0xC3),
    address(Mnemonic::Jnz, 0xC2),
    address(Mnemonic::Jz, 0xCA),
    address(Mnemonic::Jnc, 0xD2),
    address(Mnemonic::Jc, 0xDA),
    address(Mnemonic::Jpo, 0xE2),
    address(Mnemonic::Jpe, 0xEA),
    address(Mnemonic::Jp, 0xF2),
    address(Mnemonic::Jm, 0xFA),
    // Calls.
    address(Mnemonic::Call, 0xCD),
    address(Mnemonic::Cnz, 0xC4),
    address(Mnemonic::Cz, 0xCC),
    address(Mnemonic::Cnc, 0xD4),
    address(Mnemonic::Cc, 0xDC),
    address(Mnemonic::Cpo, 0xE4),
    address(Mnemonic::Cpe, 0xEC),
    address(Mnemonic::Cp, 0xF4),
    address(Mnemonic::Cm, 0xFC),
    // Returns.
    implicit(Mnemonic::Ret, 0xC9),
    implicit(Mnemonic::Rnz, 0xC0),
    implicit(Mnemonic::Rz, 0xC8),
    implicit(Mnemonic::Rnc, 0xD0),
    implicit(Mnemonic::Rc, 0xD8),
    implicit(Mnemonic::Rpo, 0xE0),
    implicit(Mnemonic::Rpe, 0xE8),
    implicit(Mnemonic::Rp, 0xF0),
    implicit(Mnemonic::Rm, 0xF8),
    // Everything else which takes no operand.
    implicit(Mnemonic::Pchl, 0xE9),
    implicit(Mnemonic::Sphl, 0xF9),
    implicit(Mnemonic::Xchg, 0xEB),
    implicit(Mnemonic::Xthl, 0xE3),
    implicit(Mnemonic::Daa, 0x27),
    implicit(Mnemonic::Cma, 0x2F),
    implicit(Mnemonic::Stc, 0x37),
    implicit(Mnemonic::Cmc, 0x3F),
    implicit(Mnemonic::Rlc, 0x07),
    implicit(Mnemonic::Rrc, 0x0F),
    implicit(Mnemonic::Ral, 0x17),
    implicit(Mnemonic::Rar, 0x1F),
    implicit(Mnemonic::Ei, 0xFB),
    implicit(Mnemonic::Di, 0xF3),
    implicit(Mnemonic::Hlt, 0x76),
    implicit(Mnemonic::Nop, 0x00),
    implicit(Mnemonic::Rim, 0x20),
    implicit(Mnemonic::Sim, 0x30),
];

/// An instruction group whose opcode is `base | (r << shift)` for
/// each 8-bit register `r`.
#[derive(Debug, Clone, Copy)]
struct RegisterFamily {
    mnemonic: Mnemonic,
    base: u8,
    shift: u8,
}

const REGISTER_FAMILIES: &[RegisterFamily] = &[
    RegisterFamily {
        mnemonic: Mnemonic::Add,
        base: 0x80,
        shift: 0,
    },
    RegisterFamily {
        mnemonic: Mnemonic::Adc,
        base: 0x88,
        shift: 0,
    },
    RegisterFamily {
        mnemonic: Mnemonic::Sub,
        base: 0x90,
        shift: 0,
    },
    RegisterFamily {
        mnemonic: Mnemonic::Sbb,
        base: 0x98,
        shift: 0,
    },
    RegisterFamily {
        mnemonic: Mnemonic::Ana,
        base: 0xA0,
        shift: 0,
    },
    RegisterFamily {
        mnemonic: Mnemonic::Xra,
        base: 0xA8,
        shift: 0,
    },
    RegisterFamily {
        mnemonic: Mnemonic::Ora,
        base: 0xB0,
        shift: 0,
    },
    RegisterFamily {
        mnemonic: Mnemonic::Cmp,
        base: 0xB8,
        shift: 0,
    },
    RegisterFamily {
        mnemonic: Mnemonic::Inr,
        base: 0x04,
        shift: 3,
    },
    RegisterFamily {
        mnemonic: Mnemonic::Dcr,
        base: 0x05,
        shift: 3,
    },
];

const MOV_BASE: u8 = 0x40;
const MVI_BASE: u8 = 0x06;

/// Maps each [`InstructionForm`] to its opcode and length.  Obtain
/// the (single, immutable) instance with [`opcode_table`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpcodeTable {
    mapping: HashMap<InstructionForm, InstructionDescriptor>,
}

static OPCODE_TABLE: OnceLock<OpcodeTable> = OnceLock::new();

impl OpcodeTable {
    fn insert(&mut self, def: OpcodeDef) {
        let descriptor = InstructionDescriptor {
            opcode: def.opcode,
            size: def.size,
        };
        if let Some(prev) = self.mapping.insert(def.form, descriptor) {
            panic!(
                "duplicate opcode table entry for {}: {descriptor:?} and {prev:?}",
                def.form
            );
        }
    }

    fn build() -> OpcodeTable {
        let mut table = OpcodeTable {
            mapping: HashMap::new(),
        };
        for def in ALL_OPCODES {
            table.insert(*def);
        }
        for (dst_code, dst) in (0u8..).zip(Register::EIGHT_BIT) {
            table.insert(OpcodeDef {
                form: InstructionForm::Immediate {
                    mnemonic: Mnemonic::Mvi,
                    register: Some(dst),
                },
                opcode: MVI_BASE | (dst_code << 3),
                size: InstructionSize::Two,
            });
            for (src_code, src) in (0u8..).zip(Register::EIGHT_BIT) {
                if dst == Register::M && src == Register::M {
                    // This encoding (0x76) is HLT.
                    continue;
                }
                table.insert(OpcodeDef {
                    form: InstructionForm::Register {
                        mnemonic: Mnemonic::Mov,
                        first: dst,
                        second: Some(src),
                    },
                    opcode: MOV_BASE | (dst_code << 3) | src_code,
                    size: InstructionSize::One,
                });
            }
            for family in REGISTER_FAMILIES {
                table.insert(OpcodeDef {
                    form: InstructionForm::Register {
                        mnemonic: family.mnemonic,
                        first: dst,
                        second: None,
                    },
                    opcode: family.base | (dst_code << family.shift),
                    size: InstructionSize::One,
                });
            }
        }
        table
    }

    /// Look up the opcode and size of an instruction form.  Returns
    /// `None` if the 8085 has no such instruction (for example `MOV
    /// M,M` or `INX A`).
    pub fn lookup(&self, form: &InstructionForm) -> Option<InstructionDescriptor> {
        self.mapping.get(form).copied()
    }

    /// Look up an instruction by the canonical spelling of its form
    /// (for example `"MOV A,B"`, `"MVI A,"` or `"JMP"`).
    pub fn lookup_key(&self, key: &str) -> Option<InstructionDescriptor> {
        key.parse::<InstructionForm>()
            .ok()
            .and_then(|form| self.lookup(&form))
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&InstructionForm, &InstructionDescriptor)> {
        self.mapping.iter()
    }
}

pub fn opcode_table() -> &'static OpcodeTable {
    OPCODE_TABLE.get_or_init(OpcodeTable::build)
}
