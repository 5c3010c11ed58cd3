use std::ffi::OsStr;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use asm8085::*;

fn get_test_input_file_name(relative_to_manifest: &str) -> PathBuf {
    let mut location = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    location.push(relative_to_manifest);
    if location.exists() {
        location
    } else {
        panic!(
            "Cannot find input {relative_to_manifest}: {} does not exist",
            location.display()
        );
    }
}

fn get_temp_output_file_name() -> tempfile::TempPath {
    tempfile::Builder::new()
        .suffix(".hex")
        .tempfile()
        .expect("should be able to create a temporary file")
        .into_temp_path()
}

fn files_are_identical(expected: &OsStr, got: &OsStr) -> Result<(), String> {
    fn must_read(name: &OsStr) -> Vec<u8> {
        let mut content = Vec::new();
        File::open(name)
            .and_then(|mut f| f.read_to_end(&mut content))
            .unwrap_or_else(|e| panic!("should be able to read test file {name:?}: {e}"));
        content
    }

    let expected_content = must_read(expected);
    let got_content = must_read(got);
    if expected_content.len() != got_content.len() {
        return Err(format!(
            "wrong file length: {:?} is {} bytes but {:?} is {} bytes",
            expected,
            expected_content.len(),
            got,
            got_content.len()
        ));
    }
    match expected_content
        .iter()
        .zip(got_content.iter())
        .position(|(e, g)| e != g)
    {
        Some(offset) => Err(format!(
            "difference at position {offset}: expected byte {} but got {}",
            expected_content[offset], got_content[offset]
        )),
        None => Ok(()),
    }
}

fn assembler_golden_output_test(
    input_relative_path: &str,
    golden_output_relative_path: &str,
    options: &AssemblerOptions,
) -> Result<(), String> {
    let input = get_test_input_file_name(input_relative_path);
    let golden = get_test_input_file_name(golden_output_relative_path);
    let actual_output = get_temp_output_file_name();

    match assemble_file(
        input.as_os_str(),
        &actual_output,
        options,
        OutputOptions::default(),
    ) {
        Ok(()) => files_are_identical(golden.as_os_str(), actual_output.as_os_str()).map_err(|e| {
            format!(
                "{} and {} are not identical: {e}",
                golden.display(),
                actual_output.display(),
            )
        }),
        Err(e) => Err(format!("failed to assemble {input_relative_path}: {e}")),
    }
}

#[test]
fn golden_output_assembling_countdown_program() {
    assembler_golden_output_test(
        "testdata/countdown.asm",
        "testdata/countdown.hex",
        &AssemblerOptions::default(),
    )
    .expect("actual and golden outputs should have been identical");
}

#[test]
fn golden_output_assembling_countdown_program_with_exact_sizes() {
    let options = AssemblerOptions {
        address_advance: AddressAdvance::EncodedSize,
        label_rendering: LabelRendering::Hexadecimal,
    };
    assembler_golden_output_test(
        "testdata/countdown.asm",
        "testdata/countdown-exact.hex",
        &options,
    )
    .expect("actual and golden outputs should have been identical");
}

#[test]
fn repeated_runs_give_identical_output() {
    let input = get_test_input_file_name("testdata/countdown.asm");
    let first = get_temp_output_file_name();
    let second = get_temp_output_file_name();
    for output in [&first, &second] {
        assemble_file(
            input.as_os_str(),
            output,
            &AssemblerOptions::default(),
            OutputOptions::default(),
        )
        .expect("countdown program should assemble");
    }
    files_are_identical(first.as_os_str(), second.as_os_str())
        .expect("two runs should produce the same output");
}
