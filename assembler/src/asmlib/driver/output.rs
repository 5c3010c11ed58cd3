use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::super::types::{AssemblerFailure, IoAction, IoFailed, IoTarget};
use super::Assembly;

fn write_failed(target: IoTarget, error: std::io::Error) -> AssemblerFailure {
    AssemblerFailure::Io(IoFailed {
        action: IoAction::Write,
        target,
        error,
    })
}

/// Write the program's hex text to `output_file_name`, replacing any
/// existing contents.
pub(super) fn write_hex(output_file_name: &Path, assembly: &Assembly) -> Result<(), AssemblerFailure> {
    let target = || IoTarget::File(output_file_name.to_path_buf());
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(output_file_name)
        .map_err(|e| write_failed(target(), e))?;
    let mut writer = BufWriter::new(file);
    let mut inner = || -> Result<(), std::io::Error> {
        for encoded in assembly.encoded() {
            writeln!(writer, "{encoded}")?;
        }
        writer.flush()
    };
    inner().map_err(|e| write_failed(target(), e))
}

pub(super) fn write_listing(assembly: &Assembly) -> Result<(), AssemblerFailure> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write!(handle, "{}", assembly.listing())
        .and_then(|()| handle.flush())
        .map_err(|e| write_failed(IoTarget::Stdout, e))
}
