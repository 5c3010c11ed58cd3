use std::error::Error;
use std::ffi::OsString;
use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

use clap::ArgAction::{Set, SetTrue};
use clap::Parser;
use tracing::{event, span, Level};
use tracing_subscriber::prelude::*;

use asm8085::{
    assemble_file, AddressAdvance, AssemblerFailure, AssemblerOptions, LabelRendering,
    OutputOptions,
};

/// Two-pass assembler for the Intel 8085, producing hex text
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
struct Cli {
    /// File from which assembly source is read.
    #[clap(action = Set)]
    input: OsString,

    /// File to which the hex output is written (one instruction per
    /// line).
    #[clap(action = Set, short = 'o', long)]
    output: OsString,

    /// When set, print a listing of the generated code and the label
    /// table on standard output.
    #[clap(action = SetTrue, long)]
    list: bool,

    /// Compute label addresses from the real length of each
    /// instruction, instead of assuming every instruction is three
    /// bytes long.
    #[clap(action = SetTrue, long)]
    exact_sizes: bool,

    /// Substitute label addresses as hexadecimal rather than decimal
    /// text.
    #[clap(action = SetTrue, long)]
    hex_labels: bool,
}

impl Cli {
    fn assembler_options(&self) -> AssemblerOptions {
        AssemblerOptions {
            address_advance: if self.exact_sizes {
                AddressAdvance::EncodedSize
            } else {
                AddressAdvance::default()
            },
            label_rendering: if self.hex_labels {
                LabelRendering::Hexadecimal
            } else {
                LabelRendering::Decimal
            },
        }
    }
}

#[derive(Debug)]
enum Fail {
    /// The assembler ran, but failed.
    AsmFail(AssemblerFailure),
    /// We were not able to start the assembler.
    InitialisationFailure(String),
}

impl Display for Fail {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Fail::AsmFail(assembler_failure) => assembler_failure.fmt(f),
            Fail::InitialisationFailure(msg) => f.write_str(msg.as_str()),
        }
    }
}

impl Error for Fail {}

fn run_assembler() -> Result<(), Fail> {
    let cli = Cli::parse();

    // Set RUST_LOG to choose which trace messages are printed, for
    // example RUST_LOG=debug.
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
    let filter_layer = match tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
    {
        Err(e) => {
            return Err(Fail::InitialisationFailure(format!(
                "failed to initialise tracing filter (perhaps there is a problem with environment variables): {e}"
            )));
        }
        Ok(layer) => layer,
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    let span = span!(Level::ERROR, "asm8085", input=?cli.input, output=?cli.output);
    let _enter = span.enter();
    let options = cli.assembler_options();
    let output_path = PathBuf::from(&cli.output);
    let output_options = OutputOptions { list: cli.list };
    let result =
        assemble_file(&cli.input, &output_path, &options, output_options).map_err(Fail::AsmFail);
    if let Err(e) = &result {
        event!(Level::ERROR, "assembly failed: {:?}", e);
    } else {
        event!(Level::INFO, "assembly succeeded");
    }
    result
}

fn main() {
    match run_assembler() {
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
        Ok(()) => {
            std::process::exit(0);
        }
    }
}
