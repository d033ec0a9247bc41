use std::fmt::{self, Debug, Display, Formatter};

/// The name of a symbol, as used in a label or an operand.  Symbol
/// names are case-sensitive.
#[derive(Clone, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct SymbolName {
    pub(crate) canonical: String,
}

impl SymbolName {
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.canonical.as_str()
    }
}

impl From<String> for SymbolName {
    fn from(s: String) -> SymbolName {
        SymbolName { canonical: s }
    }
}

impl From<&str> for SymbolName {
    fn from(s: &str) -> SymbolName {
        SymbolName::from(s.to_string())
    }
}

impl Display for SymbolName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.canonical, f)
    }
}

impl Debug for SymbolName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolName {{ canonical: \"{}\" }}", self.canonical)
    }
}
