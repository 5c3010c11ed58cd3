//! Runs both passes over a whole program, and handles files.

mod output;

use std::ffi::OsStr;
use std::fs::OpenOptions;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{event, span, Level};

use super::encoder::{encode_instruction, EncodedInstruction};
use super::listing::Listing;
use super::options::AssemblerOptions;
use super::symtab::{build_label_table, LabelTable};
use super::tokenizer::tokenize;
use super::types::{
    AssemblerFailure, IoAction, IoFailed, IoTarget, LineError, LineErrorKind, LineNumber,
};

/// The result of assembling one source line which contains an
/// instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineOutcome {
    pub line_number: LineNumber,
    pub source: String,
    pub result: Result<EncodedInstruction, LineErrorKind>,
}

/// The result of assembling a program.  Lines which failed to
/// assemble do not prevent the others from being assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembly {
    labels: LabelTable,
    outcomes: Vec<LineOutcome>,
}

impl Assembly {
    #[must_use]
    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    /// One outcome per instruction line, in source order.
    #[must_use]
    pub fn outcomes(&self) -> &[LineOutcome] {
        &self.outcomes
    }

    #[must_use]
    pub fn errors(&self) -> Vec<LineError> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match &outcome.result {
                Ok(_) => None,
                Err(kind) => Some(LineError {
                    line_number: outcome.line_number,
                    kind: kind.clone(),
                }),
            })
            .collect()
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|outcome| outcome.result.is_ok())
    }

    /// The instructions which were successfully assembled.
    pub fn encoded(&self) -> impl Iterator<Item = &EncodedInstruction> {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.result.as_ref().ok())
    }

    /// The program's output text: one line for each successfully
    /// assembled instruction.
    #[must_use]
    pub fn hex_text(&self) -> String {
        self.encoded()
            .map(|encoded| format!("{encoded}\n"))
            .collect()
    }

    #[must_use]
    pub fn listing(&self) -> Listing<'_> {
        Listing::new(self)
    }
}

/// Assemble a program held in memory.
#[must_use]
pub fn assemble_source(source: &str, options: &AssemblerOptions) -> Assembly {
    let labels = build_label_table(source.lines(), options);

    let span = span!(Level::DEBUG, "pass 2");
    let _enter = span.enter();
    let mut outcomes: Vec<LineOutcome> = Vec::new();
    for (line_number, line) in source.lines().enumerate().map(|(n, line)| (n + 1, line)) {
        let Some(instruction) = tokenize(line).instruction else {
            continue;
        };
        let result = encode_instruction(&instruction, &labels, options);
        if let Err(e) = &result {
            event!(Level::ERROR, "line {line_number}: {e}");
        }
        outcomes.push(LineOutcome {
            line_number,
            source: line.to_string(),
            result,
        });
    }
    let assembly = Assembly { labels, outcomes };
    event!(
        Level::DEBUG,
        "pass 2 assembled {} instructions ({} failed)",
        assembly.outcomes.len(),
        assembly.errors().len()
    );
    assembly
}

/// Settings which affect what the driver writes, but not the code it
/// generates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputOptions {
    /// When set, print a listing on standard output.
    pub list: bool,
}

/// Read the whole input.  A line which is not valid UTF-8 is decoded
/// with replacement characters so that it fails (or not) on its own
/// when it is assembled, rather than stopping the run.
fn read_source(input_file_name: &OsStr) -> Result<String, AssemblerFailure> {
    let read_failed = |error| {
        AssemblerFailure::Io(IoFailed {
            action: IoAction::Read,
            target: IoTarget::File(PathBuf::from(input_file_name)),
            error,
        })
    };
    let input = OpenOptions::new()
        .read(true)
        .open(input_file_name)
        .map_err(read_failed)?;
    let mut source = String::new();
    for (line_number, line) in BufReader::new(input)
        .split(b'\n')
        .enumerate()
        .map(|(n, line)| (n + 1, line))
    {
        match line {
            Ok(bytes) => {
                match String::from_utf8(bytes) {
                    Ok(line) => source.push_str(&line),
                    Err(e) => {
                        event!(
                            Level::WARN,
                            "line {line_number} of input is not valid UTF-8"
                        );
                        source.push_str(&String::from_utf8_lossy(e.as_bytes()));
                    }
                }
                source.push('\n');
            }
            Err(e) => {
                event!(Level::ERROR, "failed to read line {line_number} of input");
                return Err(read_failed(e));
            }
        }
    }
    Ok(source)
}

/// Assemble the program in `input_file_name`, writing its hex text to
/// `output_file_name`.
///
/// The output file is written even if some lines could not be
/// assembled; they are then reported together in
/// [`AssemblerFailure::LinesFailed`].
///
/// # Errors
///
/// [`AssemblerFailure::Io`] if the input cannot be read or the output
/// cannot be written, and [`AssemblerFailure::LinesFailed`] if any
/// line failed to assemble.
pub fn assemble_file(
    input_file_name: &OsStr,
    output_file_name: &Path,
    options: &AssemblerOptions,
    output_options: OutputOptions,
) -> Result<(), AssemblerFailure> {
    let span = span!(Level::INFO, "assemble file", input = ?input_file_name);
    let _enter = span.enter();

    let source = read_source(input_file_name)?;
    let assembly = assemble_source(&source, options);
    output::write_hex(output_file_name, &assembly)?;
    if output_options.list {
        output::write_listing(&assembly)?;
    }

    let errors = assembly.errors();
    if errors.is_empty() {
        event!(
            Level::INFO,
            "wrote {} instructions to {}",
            assembly.outcomes().len(),
            output_file_name.display()
        );
        Ok(())
    } else {
        Err(AssemblerFailure::LinesFailed(errors))
    }
}
