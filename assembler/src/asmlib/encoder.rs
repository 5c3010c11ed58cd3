//! Pass 2: turning instructions into bytes.

use std::fmt::{self, Display, Formatter};

use base::prelude::{low_byte, split_word, InstructionSize};

use super::operand::operand_value;
use super::options::AssemblerOptions;
use super::resolver::resolve;
use super::symtab::LabelTable;
use super::tokenizer::{tokenize, InstructionText};
use super::types::LineErrorKind;

/// The machine code for one instruction: the opcode followed by zero,
/// one or two operand bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedInstruction {
    bytes: Vec<u8>,
}

impl EncodedInstruction {
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Two upper-case hex digits per byte, separated by spaces.
impl Display for EncodedInstruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.bytes.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{byte:02X}")?;
        }
        Ok(())
    }
}

/// Encode an instruction.
///
/// # Errors
///
/// Any [`LineErrorKind`]; they all describe something wrong with
/// this instruction only.
pub fn encode_instruction(
    instruction: &InstructionText<'_>,
    labels: &LabelTable,
    options: &AssemblerOptions,
) -> Result<EncodedInstruction, LineErrorKind> {
    let resolved = resolve(instruction.mnemonic, &instruction.operands)?;
    let opcode = resolved.descriptor.opcode;
    let value = |limit: u16| -> Result<u16, LineErrorKind> {
        match resolved.value {
            Some(operand) => operand_value(operand, limit, labels, options.label_rendering),
            None => Err(LineErrorKind::WrongOperandCount {
                key: resolved.form.to_string(),
                expected: resolved.form.operand_count(),
                got: instruction.operands.len(),
            }),
        }
    };
    let bytes = match resolved.descriptor.size {
        InstructionSize::One => vec![opcode],
        InstructionSize::Two => {
            let n = value(u16::from(u8::MAX))?;
            vec![opcode, low_byte(n)]
        }
        InstructionSize::Three => {
            let (low, high) = split_word(value(u16::MAX)?);
            vec![opcode, low, high]
        }
    };
    Ok(EncodedInstruction { bytes })
}

/// Encode a source line.  Returns `None` if the line has no
/// instruction.
pub fn encode_line(
    line: &str,
    labels: &LabelTable,
    options: &AssemblerOptions,
) -> Option<Result<EncodedInstruction, LineErrorKind>> {
    tokenize(line)
        .instruction
        .map(|instruction| encode_instruction(&instruction, labels, options))
}

#[cfg(test)]
mod tests {
    use base::prelude::Address;

    use super::*;
    use crate::options::{AddressAdvance, LabelRendering};

    fn encode(line: &str) -> Result<String, LineErrorKind> {
        encode_with(line, &LabelTable::new(), &AssemblerOptions::default())
    }

    fn encode_with(
        line: &str,
        labels: &LabelTable,
        options: &AssemblerOptions,
    ) -> Result<String, LineErrorKind> {
        match encode_line(line, labels, options) {
            Some(result) => result.map(|encoded| encoded.to_string()),
            None => panic!("line {line:?} should contain an instruction"),
        }
    }

    #[test]
    fn test_one_byte_instructions() {
        assert_eq!(encode("MOV A,B"), Ok("78".to_string()));
        assert_eq!(encode("mov m, a"), Ok("77".to_string()));
        assert_eq!(encode("HLT"), Ok("76".to_string()));
        assert_eq!(encode("INR A"), Ok("3C".to_string()));
        assert_eq!(encode("PUSH PSW"), Ok("F5".to_string()));
        assert_eq!(encode("XCHG"), Ok("EB".to_string()));
    }

    #[test]
    fn test_immediates() {
        assert_eq!(encode("MVI A, 10H"), Ok("3E 10".to_string()));
        assert_eq!(encode("MVI B,05H"), Ok("06 05".to_string()));
        assert_eq!(encode("ADI 0FFH"), Ok("C6 FF".to_string()));
        assert_eq!(encode("OUT 01H"), Ok("D3 01".to_string()));
        assert_eq!(encode("LXI H, 2060H"), Ok("21 60 20".to_string()));
        assert_eq!(encode("LXI SP, 0FFFFH"), Ok("31 FF FF".to_string()));
    }

    #[test]
    fn test_addresses_are_little_endian() {
        assert_eq!(encode("LDA 2050H"), Ok("3A 50 20".to_string()));
        assert_eq!(encode("STA 2050H"), Ok("32 50 20".to_string()));
        assert_eq!(encode("JMP 1H"), Ok("C3 01 00".to_string()));
        assert_eq!(encode("CALL 0ABCDH"), Ok("CD CD AB".to_string()));
    }

    #[test]
    fn test_surplus_operands_on_bare_mnemonics() {
        assert_eq!(encode("RET 5"), Ok("C9".to_string()));
        assert_eq!(encode("NOP A"), Ok("00".to_string()));
        assert_eq!(encode("HLT X,Y"), Ok("76".to_string()));
    }

    #[test]
    fn test_undefined_label_is_a_literal() {
        assert_eq!(encode("JMP BEEF"), Ok("C3 EF BE".to_string()));
    }

    #[test]
    fn test_labels() {
        let mut labels = LabelTable::new();
        labels.define("START", Address::new(0));
        labels.define("LOOP", Address::new(12));
        let decimal = AssemblerOptions::default();
        let hex = AssemblerOptions {
            label_rendering: LabelRendering::Hexadecimal,
            ..AssemblerOptions::default()
        };
        assert_eq!(
            encode_with("JMP START", &labels, &decimal),
            Ok("C3 00 00".to_string())
        );
        assert_eq!(
            encode_with("JNZ LOOP", &labels, &decimal),
            Ok("C2 12 00".to_string())
        );
        assert_eq!(
            encode_with("JNZ LOOP", &labels, &hex),
            Ok("C2 0C 00".to_string())
        );
        assert_eq!(
            encode_with("JNZ LOOPH", &labels, &hex),
            Ok("C2 0C 00".to_string())
        );
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            encode("FOO A,B"),
            Err(LineErrorKind::UnknownInstruction {
                key: "FOO A,B".to_string()
            })
        );
        assert_eq!(
            encode("MVI A, 100H"),
            Err(LineErrorKind::OperandOutOfRange {
                operand: "100H".to_string(),
                limit: 0xFF,
            })
        );
        assert_eq!(
            encode("LDA 12345H"),
            Err(LineErrorKind::OperandOutOfRange {
                operand: "12345H".to_string(),
                limit: 0xFFFF,
            })
        );
        assert_eq!(
            encode("JMP NOWHERE"),
            Err(LineErrorKind::MalformedNumericOperand {
                operand: "NOWHERE".to_string()
            })
        );
        assert_eq!(
            encode("MVI A,"),
            Err(LineErrorKind::MalformedNumericOperand {
                operand: String::new()
            })
        );
        assert_eq!(
            encode("JMP"),
            Err(LineErrorKind::WrongOperandCount {
                key: "JMP".to_string(),
                expected: 1,
                got: 0,
            })
        );
    }

    #[test]
    fn test_lines_without_instructions() {
        let labels = LabelTable::new();
        let options = AssemblerOptions {
            address_advance: AddressAdvance::EncodedSize,
            ..AssemblerOptions::default()
        };
        assert_eq!(encode_line("", &labels, &options), None);
        assert_eq!(encode_line("; comment", &labels, &options), None);
        assert_eq!(encode_line("LABEL:", &labels, &options), None);
    }

    #[test]
    fn test_encoded_length_matches_table() {
        let encoded = encode_line("LXI B, 1234H", &LabelTable::new(), &AssemblerOptions::default());
        let encoded = encoded.expect("should be an instruction").expect("should encode");
        assert_eq!(encoded.len(), 3);
        assert_eq!(encoded.bytes(), &[0x01, 0x34, 0x12]);
    }
}
