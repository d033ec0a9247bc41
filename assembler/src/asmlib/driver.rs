use std::ffi::OsStr;
use std::fs;
use std::io::Write;

use tracing::{event, Level};

use super::ast::Code;
use super::mnemonic::Mnemonics;
use super::parser::parse;
use super::types::AssemblerFailure;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputOptions {
    /// When set, write the normalized listing of the parsed program
    /// to standard output.
    pub list: bool,
}

fn write_listing<W: Write>(writer: &mut W, code: &Code) -> Result<(), AssemblerFailure> {
    write!(writer, "{code}")
        .and_then(|()| writer.flush())
        .map_err(|error| AssemblerFailure::IoErrorOnStdout { error })
}

/// Read and parse the assembly source in `input_file`.
///
/// # Errors
///
/// Fails if the file cannot be read (or is not UTF-8), if it contains
/// a syntax error, or if the listing cannot be written.
pub fn assemble_file(
    input_file: &OsStr,
    mnemonics: &Mnemonics,
    options: OutputOptions,
) -> Result<Code, AssemblerFailure> {
    let source =
        fs::read_to_string(input_file).map_err(|error| AssemblerFailure::IoErrorOnInput {
            filename: input_file.to_owned(),
            error,
        })?;
    event!(
        Level::DEBUG,
        "read {} bytes of assembly source from {}",
        source.len(),
        input_file.to_string_lossy()
    );
    let code = parse(&source, mnemonics)?;
    event!(
        Level::INFO,
        "{} records, {} labels",
        code.len(),
        code.labels().count()
    );
    if options.list {
        write_listing(&mut std::io::stdout().lock(), &code)?;
    }
    Ok(code)
}

#[test]
fn test_write_listing() {
    let mnemonics = Mnemonics::new();
    let code = parse("FIRST   LDA    #3\n", &mnemonics).expect("test program should be valid");
    let mut out: Vec<u8> = Vec::new();
    write_listing(&mut out, &code).expect("writes to a Vec should succeed");
    assert_eq!(String::from_utf8_lossy(&out), "FIRST    LDA     #3\n");
}
