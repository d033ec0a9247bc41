use std::error::Error;
use std::ffi::{OsStr, OsString};
use std::fmt::{self, Display, Formatter};
use std::io::Error as IoError;

use super::source::LineAndColumn;

/// A grammar violation.  Parsing stops at the first one; there is no
/// recovery, so the location is exactly where parsing stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub(crate) msg: String,
    pub(crate) location: LineAndColumn,
}

impl SyntaxError {
    pub(crate) fn new<S: Into<String>>(msg: S, location: LineAndColumn) -> SyntaxError {
        SyntaxError {
            msg: msg.into(),
            location,
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        self.msg.as_str()
    }

    #[must_use]
    pub fn location(&self) -> LineAndColumn {
        self.location
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}: {}", self.location, self.msg)
    }
}

impl Error for SyntaxError {}

#[derive(Debug)]
pub enum AssemblerFailure {
    IoErrorOnStdout { error: IoError },
    IoErrorOnInput { filename: OsString, error: IoError },
    SyntaxError(SyntaxError),
}

impl From<SyntaxError> for AssemblerFailure {
    fn from(e: SyntaxError) -> AssemblerFailure {
        AssemblerFailure::SyntaxError(e)
    }
}

fn write_os_string(f: &mut Formatter<'_>, s: &OsStr) -> Result<(), fmt::Error> {
    match s.to_str() {
        Some(unicode_name) => f.write_str(unicode_name),
        None => write!(
            f,
            "{} (some non-Unicode characters changed to make it printable)",
            s.to_string_lossy(),
        ),
    }
}

impl Display for AssemblerFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            AssemblerFailure::IoErrorOnStdout { error } => {
                write!(f, "error writing on stdout: {error}")
            }
            AssemblerFailure::IoErrorOnInput { filename, error } => {
                f.write_str("I/O error reading input file ")?;
                write_os_string(f, filename)?;
                write!(f, ": {error}")
            }
            AssemblerFailure::SyntaxError(e) => write!(f, "syntax error at {e}"),
        }
    }
}

impl Error for AssemblerFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AssemblerFailure::IoErrorOnStdout { error }
            | AssemblerFailure::IoErrorOnInput { error, .. } => Some(error),
            AssemblerFailure::SyntaxError(e) => Some(e),
        }
    }
}

#[test]
fn test_syntax_error_display() {
    let e = SyntaxError::new("Invalid register 'Z'", LineAndColumn::new(2, 12));
    assert_eq!(e.to_string(), "line 2, column 12: Invalid register 'Z'");
    assert_eq!(
        AssemblerFailure::from(e).to_string(),
        "syntax error at line 2, column 12: Invalid register 'Z'"
    );
}
