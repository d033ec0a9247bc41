use std::error::Error;
use std::ffi::OsString;
use std::fmt::{self, Display, Formatter};
use std::io::{stdout, Write};

use clap::ArgAction::{Set, SetTrue};
use clap::Parser;
use tracing::{event, span, Level};
use tracing_subscriber::prelude::*;

use assembler::*;

/// Parser for SIC/XE assembly language
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
struct Cli {
    /// File from which assembly source is read.
    #[clap(action = Set, required_unless_present = "mnemonics")]
    input: Option<OsString>,

    /// When set, print a normalized listing of the parsed program.
    #[clap(action = SetTrue, long)]
    list: bool,

    /// Print the table of known mnemonics and exit.
    #[clap(action = SetTrue, long)]
    mnemonics: bool,
}

#[derive(Debug)]
enum Fail {
    /// The input could not be read or parsed.
    AsmFail(AssemblerFailure),
    /// We were not able to correctly initialise the assembler.
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

fn print_mnemonics(mnemonics: &Mnemonics) -> Result<(), Fail> {
    let mut out = stdout().lock();
    write!(out, "{mnemonics}")
        .and_then(|()| out.flush())
        .map_err(|error| Fail::AsmFail(AssemblerFailure::IoErrorOnStdout { error }))
}

fn run_assembler() -> Result<(), Fail> {
    let cli = Cli::parse();

    // Set RUST_LOG (for example RUST_LOG=debug) to select which
    // trace messages get printed.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);
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

    let mnemonics = Mnemonics::new();
    if cli.mnemonics {
        return print_mnemonics(&mnemonics);
    }
    let input = match cli.input {
        Some(input) => input,
        None => {
            return Err(Fail::InitialisationFailure(
                "no input file was specified".to_string(),
            ));
        }
    };

    let span = span!(Level::ERROR, "assemble", input=?input);
    let _enter = span.enter();
    let options = OutputOptions { list: cli.list };
    let result = assemble_file(&input, &mnemonics, options)
        .map(|_| ())
        .map_err(Fail::AsmFail);
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
