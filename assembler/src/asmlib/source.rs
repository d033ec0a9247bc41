//! Positions within the original input.
use std::fmt::{self, Display, Formatter};

pub(crate) const START_LINE: u32 = 1;
pub(crate) const START_COL: u32 = 1;

/// A position in the source text.  Both lines and columns are
/// counted from 1; column 1 is the start of a line.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
pub struct LineAndColumn {
    pub(crate) line: u32,
    pub(crate) column: u32,
}

impl LineAndColumn {
    #[must_use]
    pub fn new(line: u32, column: u32) -> LineAndColumn {
        LineAndColumn { line, column }
    }

    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[must_use]
    pub fn column(&self) -> u32 {
        self.column
    }
}

impl Default for LineAndColumn {
    fn default() -> LineAndColumn {
        LineAndColumn {
            line: START_LINE,
            column: START_COL,
        }
    }
}

impl Display for LineAndColumn {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[test]
fn test_display() {
    assert_eq!(LineAndColumn::new(3, 14).to_string(), "line 3, column 14");
    assert_eq!(LineAndColumn::default(), LineAndColumn::new(1, 1));
}
