//! Instruction records: the parser's output.  It's not a tree; a
//! program is a flat sequence of records, one per meaningful source
//! line, in source order.
use std::fmt::{self, Display, Formatter, Write};

use base::prelude::Register;

use super::mnemonic::Mnemonic;
use super::source::LineAndColumn;
use super::symbol::SymbolName;

/// A numeric or symbolic value.  Symbols are not resolved here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Number(u32),
    Symbol(SymbolName),
    /// `*`, the value of the location counter.
    Here,
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Symbol(name) => write!(f, "{name}"),
            Value::Here => f.write_char('*'),
        }
    }
}

/// How a format 3/4 operand is interpreted (the `n` and `i` bits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Addressing {
    #[default]
    Simple,
    /// `#`: the operand is the value itself.
    Immediate,
    /// `@`: the operand is the address of the address.
    Indirect,
}

impl Display for Addressing {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Addressing::Simple => Ok(()),
            Addressing::Immediate => f.write_char('#'),
            Addressing::Indirect => f.write_char('@'),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Value(Value),
    /// `=C'..'` or `=X'..'`; the bytes are placed in a literal pool
    /// by a later pass.
    Literal(Vec<u8>),
}

impl Display for Target {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Target::Value(v) => v.fmt(f),
            Target::Literal(data) => {
                f.write_char('=')?;
                write_hex_literal(f, data)
            }
        }
    }
}

/// The operand of a format 3 or format 4 instruction.  Whether
/// format 4 is used is recorded (`extended`) but no address or
/// displacement is computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryOperand {
    pub addressing: Addressing,
    pub target: Target,
    pub indexed: bool,
    pub extended: bool,
}

impl Display for MemoryOperand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.addressing, self.target)?;
        if self.indexed {
            f.write_str(",X")?;
        }
        Ok(())
    }
}

/// The operands of an instruction.  Which variant is used is decided
/// only by the mnemonic's [`super::mnemonic::Syntax`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    None,
    /// The operand of `START`, `BASE`, `EQU` or `ORG`.
    Value(Value),
    /// The operand of `END`, which may be omitted.
    OptionalValue(Option<Value>),
    /// The number of bytes or words reserved by `RESB` or `RESW`.
    Count(u32),
    /// The initial contents of storage defined by `BYTE` or `WORD`.
    Data(Vec<u8>),
    Number(u32),
    Register(Register),
    RegisterNumber(Register, u32),
    RegisterPair(Register, Register),
    Memory(MemoryOperand),
}

fn write_hex_literal(f: &mut Formatter<'_>, data: &[u8]) -> fmt::Result {
    f.write_str("X'")?;
    for byte in data {
        write!(f, "{byte:02X}")?;
    }
    f.write_char('\'')
}

impl Display for Operand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Operand::None | Operand::OptionalValue(None) => Ok(()),
            Operand::Value(v) | Operand::OptionalValue(Some(v)) => v.fmt(f),
            Operand::Count(n) | Operand::Number(n) => write!(f, "{n}"),
            Operand::Data(data) => write_hex_literal(f, data),
            Operand::Register(r) => write!(f, "{r}"),
            Operand::RegisterNumber(r, n) => write!(f, "{r},{n}"),
            Operand::RegisterPair(r1, r2) => write!(f, "{r1},{r2}"),
            Operand::Memory(m) => m.fmt(f),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A whole-line comment.  The text includes the leading `.`.
    Comment(String),
    Instruction {
        mnemonic: Mnemonic,
        operand: Operand,
    },
}

/// One record per source line (blank lines produce none).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) location: LineAndColumn,
    pub(crate) label: Option<SymbolName>,
    pub(crate) kind: NodeKind,
    pub(crate) comment: Option<String>,
}

impl Node {
    pub(crate) fn new(location: LineAndColumn, kind: NodeKind) -> Node {
        Node {
            location,
            label: None,
            kind,
            comment: None,
        }
    }

    /// The position of the start of the line this record came from.
    #[must_use]
    pub fn location(&self) -> LineAndColumn {
        self.location
    }

    #[must_use]
    pub fn label(&self) -> Option<&SymbolName> {
        self.label.as_ref()
    }

    #[must_use]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// The free text following the operands, if any.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    #[must_use]
    pub fn mnemonic(&self) -> Option<&Mnemonic> {
        match &self.kind {
            NodeKind::Instruction { mnemonic, .. } => Some(mnemonic),
            NodeKind::Comment(_) => None,
        }
    }

    #[must_use]
    pub fn operand(&self) -> Option<&Operand> {
        match &self.kind {
            NodeKind::Instruction { operand, .. } => Some(operand),
            NodeKind::Comment(_) => None,
        }
    }

    /// True for format 4 (`+`-prefixed) instructions.
    #[must_use]
    pub fn is_extended(&self) -> bool {
        matches!(
            self.operand(),
            Some(Operand::Memory(MemoryOperand { extended: true, .. }))
        )
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            NodeKind::Comment(text) => f.write_str(text),
            NodeKind::Instruction { mnemonic, operand } => {
                let label: &str = self.label.as_ref().map_or("", SymbolName::as_str);
                let line = format!("{label:<8} {:<7} {operand}", mnemonic.name());
                f.write_str(line.trim_end())?;
                if let Some(comment) = &self.comment {
                    write!(f, "  {comment}")?;
                }
                Ok(())
            }
        }
    }
}

/// A parsed program.  Records appear in source order.  Once parsing
/// has finished a `Code` is not modified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Code {
    nodes: Vec<Node>,
}

impl Code {
    pub(crate) fn append(&mut self, node: Node) {
        self.nodes.push(node);
    }

    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Labels in the order they are defined.  Duplicates are not
    /// detected here.
    #[must_use]
    pub fn labels(&self) -> impl Iterator<Item = &SymbolName> {
        self.nodes.iter().filter_map(Node::label)
    }
}

impl<'a> IntoIterator for &'a Code {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// Renders the program as a normalized listing, one line per record.
impl Display for Code {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            writeln!(f, "{node}")?;
        }
        Ok(())
    }
}
