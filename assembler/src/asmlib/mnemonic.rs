//! The mnemonic registry.
//!
//! Each mnemonic knows which [`Syntax`] its operands follow, and so
//! how to turn the rest of the line into an [`Operand`].  Format 4
//! variants of memory instructions are separate entries, spelled with
//! a leading `+`.
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use base::prelude::{Opcode, MAX_ADDRESS, MAX_WORD};

use super::ast::{Node, NodeKind, Operand};
use super::parser::Parser;
use super::types::SyntaxError;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    Nobase,
    Ltorg,
    Start,
    End,
    Base,
    Equ,
    Org,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Storage {
    Resb,
    Resw,
    Byte,
    Word,
}

/// What a mnemonic stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Directive(Directive),
    Storage(Storage),
    Instruction(Opcode),
}

/// The operand syntax of a mnemonic.  This follows from the
/// instruction format (or, for directives, from what the directive
/// does).  The shape of the [`Operand`] produced for a line depends
/// only on the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Syntax {
    /// A directive without operands.
    Directive,
    /// A directive taking a number (no larger than the given limit)
    /// or a symbol.
    DirectiveOperand(u32),
    /// Like `DirectiveOperand`, but the operand may be omitted
    /// (`END`).
    DirectiveOptionalOperand(u32),
    /// `RESB n`, `RESW n`.
    StorageReserve,
    /// `BYTE x`; a bare number is truncated to one byte.
    StorageByte,
    /// `WORD x`; a bare number fills a word.
    StorageWord,
    Format1,
    /// `SVC n`.
    Format2Number,
    /// `CLEAR r`.
    Format2Register,
    /// `SHIFTL r,n`.
    Format2RegisterNumber,
    /// `ADDR r1,r2`.
    Format2RegisterPair,
    /// A format 3 instruction without operands (`RSUB`).
    Format3,
    Format3Memory,
    Format4Memory,
}

const SVC_MAX: u32 = 15;
const SHIFT_MIN: u32 = 1;
const SHIFT_MAX: u32 = 16;

impl Syntax {
    fn parse_operand(self, parser: &mut Parser<'_, '_>) -> Result<Operand, SyntaxError> {
        match self {
            Syntax::Directive | Syntax::Format1 | Syntax::Format3 => Ok(Operand::None),
            Syntax::DirectiveOperand(hi) => parser.parse_value(hi).map(Operand::Value),
            Syntax::DirectiveOptionalOperand(hi) => {
                if parser.at_end_of_line() {
                    Ok(Operand::OptionalValue(None))
                } else {
                    parser
                        .parse_value(hi)
                        .map(|v| Operand::OptionalValue(Some(v)))
                }
            }
            Syntax::StorageReserve => parser
                .parse_number(0, u32::from(MAX_ADDRESS))
                .map(Operand::Count),
            Syntax::StorageByte => {
                if parser.at_digit() {
                    parser.parse_byte().map(Operand::Data)
                } else {
                    parser.parse_data().map(Operand::Data)
                }
            }
            Syntax::StorageWord => parser.parse_data().map(Operand::Data),
            Syntax::Format2Number => parser.parse_number(0, SVC_MAX).map(Operand::Number),
            Syntax::Format2Register => parser.parse_register().map(Operand::Register),
            Syntax::Format2RegisterNumber => {
                let r = parser.parse_register()?;
                parser.parse_comma()?;
                let n = parser.parse_number(SHIFT_MIN, SHIFT_MAX)?;
                Ok(Operand::RegisterNumber(r, n))
            }
            Syntax::Format2RegisterPair => {
                let r1 = parser.parse_register()?;
                parser.parse_comma()?;
                let r2 = parser.parse_register()?;
                Ok(Operand::RegisterPair(r1, r2))
            }
            Syntax::Format3Memory => parser.parse_memory_operand(false).map(Operand::Memory),
            Syntax::Format4Memory => parser.parse_memory_operand(true).map(Operand::Memory),
        }
    }
}

/// A mnemonic descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mnemonic {
    name: &'static str,
    operation: Operation,
    syntax: Syntax,
    pattern: &'static str,
    description: &'static str,
}

impl Mnemonic {
    /// The spelling, including the `+` of a format 4 mnemonic.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn operation(&self) -> Operation {
        self.operation
    }

    #[must_use]
    pub fn syntax(&self) -> Syntax {
        self.syntax
    }

    /// What the instruction does, in register-transfer notation.
    #[must_use]
    pub fn pattern(&self) -> &'static str {
        self.pattern
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Parse the operands which follow this mnemonic and build the
    /// record for the line.  The caller attaches the label and
    /// comment.
    pub(crate) fn parse(&self, parser: &mut Parser<'_, '_>) -> Result<Node, SyntaxError> {
        let operand = self.syntax.parse_operand(parser)?;
        Ok(Node::new(
            parser.line_start(),
            NodeKind::Instruction {
                mnemonic: *self,
                operand,
            },
        ))
    }
}

impl Display for Mnemonic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Memory-reference instructions: (format 3 spelling, format 4
/// spelling, opcode, pattern, description).
#[rustfmt::skip]
const MEMORY_INSTRUCTIONS: &[(&str, &str, Opcode, &str, &str)] = &[
    // Load and store
    ("LDA", "+LDA", Opcode::Lda, "A<-(m..m+2)", "Load register A from address m"),
    ("LDCH", "+LDCH", Opcode::Ldch, "A.1<-(m)", "Load byte to register A from address m"),
    ("LDB", "+LDB", Opcode::Ldb, "B<-(m..m+2)", "Load register B from address m"),
    ("LDF", "+LDF", Opcode::Ldf, "F<-(m..m+5)", "Load register F from address m"),
    ("LDL", "+LDL", Opcode::Ldl, "L<-(m..m+2)", "Load register L from address m"),
    ("LDS", "+LDS", Opcode::Lds, "S<-(m..m+2)", "Load register S from address m"),
    ("LDT", "+LDT", Opcode::Ldt, "T<-(m..m+2)", "Load register T from address m"),
    ("LDX", "+LDX", Opcode::Ldx, "X<-(m..m+2)", "Load register X from address m"),
    ("LPS", "+LPS", Opcode::Lps, "PS<-(m..m+2)", "Load processor status from address m"),
    ("STA", "+STA", Opcode::Sta, "m..m+2<-(A)", "Store register A to address m"),
    ("STCH", "+STCH", Opcode::Stch, "m<-(A.1)", "Store byte from register A to address m"),
    ("STB", "+STB", Opcode::Stb, "m..m+2<-(B)", "Store register B to address m"),
    ("STF", "+STF", Opcode::Stf, "m..m+5<-(F)", "Store register F to address m"),
    ("STL", "+STL", Opcode::Stl, "m..m+2<-(L)", "Store register L to address m"),
    ("STS", "+STS", Opcode::Sts, "m..m+2<-(S)", "Store register S to address m"),
    ("STT", "+STT", Opcode::Stt, "m..m+2<-(T)", "Store register T to address m"),
    ("STX", "+STX", Opcode::Stx, "m..m+2<-(X)", "Store register X to address m"),
    ("STI", "+STI", Opcode::Sti, "timer<-(m..m+2)", "Set interval timer"),
    ("STSW", "+STSW", Opcode::Stsw, "m..m+2<-(SW)", "Store processor status word to address m"),
    // Fixed point arithmetic
    ("ADD", "+ADD", Opcode::Add, "A<-(A)+(m..m+2)", "Add to accumulator"),
    ("SUB", "+SUB", Opcode::Sub, "A<-(A)-(m..m+2)", "Subtract from accumulator"),
    ("MUL", "+MUL", Opcode::Mul, "A<-(A)*(m..m+2)", "Multiply with accumulator"),
    ("DIV", "+DIV", Opcode::Div, "A<-(A)/(m..m+2)", "Divide accumulator"),
    ("COMP", "+COMP", Opcode::Comp, "(A):(m..m+2)", "Compare accumulator"),
    ("AND", "+AND", Opcode::And, "A<-(A)&(m..m+2)", "Bitwise and accumulator"),
    ("OR", "+OR", Opcode::Or, "A<-(A)|(m..m+2)", "Bitwise or accumulator"),
    ("TIX", "+TIX", Opcode::Tix, "X<-(X)+1;(X):(m..m+2)", "Increment and compare index register"),
    // Floating point arithmetic
    ("ADDF", "+ADDF", Opcode::Addf, "F<-(F)+(m..m+5)", "Floating point addition"),
    ("SUBF", "+SUBF", Opcode::Subf, "F<-(F)-(m..m+5)", "Floating point subtraction"),
    ("MULF", "+MULF", Opcode::Mulf, "F<-(F)*(m..m+5)", "Floating point multiplication"),
    ("DIVF", "+DIVF", Opcode::Divf, "F<-(F)/(m..m+5)", "Floating point division"),
    ("COMPF", "+COMPF", Opcode::Compf, "(F):(m..m+5)", "Floating point comparison"),
    // Jumps
    ("J", "+J", Opcode::J, "PC<-m", "Unconditional jump"),
    ("JEQ", "+JEQ", Opcode::Jeq, "PC<-m if CC is =", "Jump if equal"),
    ("JGT", "+JGT", Opcode::Jgt, "PC<-m if CC is >", "Jump if greater than"),
    ("JLT", "+JLT", Opcode::Jlt, "PC<-m if CC is <", "Jump if lower than"),
    ("JSUB", "+JSUB", Opcode::Jsub, "L<-(PC);PC<-m", "Jump to subroutine"),
    // I/O
    ("RD", "+RD", Opcode::Rd, "A.1<-readdev(m)", "Read from device"),
    ("WD", "+WD", Opcode::Wd, "writedev(m),A.1", "Write to device"),
    ("TD", "+TD", Opcode::Td, "testdev(m)", "Test device"),
    // System
    ("SSK", "+SSK", Opcode::Ssk, "m<-(A)", "Protection key for address"),
];

/// The set of all mnemonics, keyed by spelling.  It is built once and
/// never modified, so one registry can serve any number of parses.
#[derive(Debug, Clone)]
pub struct Mnemonics {
    by_name: BTreeMap<&'static str, Mnemonic>,
}

impl Default for Mnemonics {
    fn default() -> Self {
        Self::new()
    }
}

impl Mnemonics {
    #[must_use]
    #[rustfmt::skip]
    pub fn new() -> Mnemonics {
        use Operation as Op;
        use Syntax as S;

        let address = u32::from(MAX_ADDRESS);
        let word = u32::from(MAX_WORD);
        let mut m = Mnemonics {
            by_name: BTreeMap::new(),
        };
        // Directives
        m.put("NOBASE", Op::Directive(Directive::Nobase), S::Directive, "directive", "Unset base register.");
        m.put("LTORG", Op::Directive(Directive::Ltorg), S::Directive, "directive", "Flush literals.");
        m.put("START", Op::Directive(Directive::Start), S::DirectiveOperand(address), "directive", "Set code start address.");
        m.put("END", Op::Directive(Directive::End), S::DirectiveOptionalOperand(address), "directive", "End code.");
        m.put("BASE", Op::Directive(Directive::Base), S::DirectiveOperand(address), "directive", "Set base register.");
        m.put("EQU", Op::Directive(Directive::Equ), S::DirectiveOperand(word), "directive", "Equate symbol to expression.");
        m.put("ORG", Op::Directive(Directive::Org), S::DirectiveOperand(address), "directive", "Set location counter.");
        // Storage directives
        m.put("RESB", Op::Storage(Storage::Resb), S::StorageReserve, "storage", "Reserve bytes.");
        m.put("RESW", Op::Storage(Storage::Resw), S::StorageReserve, "storage", "Reserve words.");
        m.put("BYTE", Op::Storage(Storage::Byte), S::StorageByte, "storage", "Initialize bytes.");
        m.put("WORD", Op::Storage(Storage::Word), S::StorageWord, "storage", "Initialize words.");
        // Format 1, no operands
        m.put("FIX", Op::Instruction(Opcode::Fix), S::Format1, "A<-int(F)", "Convert to fixed point number.");
        m.put("FLOAT", Op::Instruction(Opcode::Float), S::Format1, "F<-float(A)", "Convert to floating point number.");
        m.put("NORM", Op::Instruction(Opcode::Norm), S::Format1, "F<-norm(F)", "Normalize.");
        m.put("SIO", Op::Instruction(Opcode::Sio), S::Format1, "Start S, A", "Start program S of I/O channel A.");
        m.put("HIO", Op::Instruction(Opcode::Hio), S::Format1, "Halt A", "Halt I/O channel (A).");
        m.put("TIO", Op::Instruction(Opcode::Tio), S::Format1, "Test A", "Test I/O channel (A).");
        // Format 2, register and number operands
        m.put("SVC", Op::Instruction(Opcode::Svc), S::Format2Number, "Interrupt n", "Generate SVC interrupt n.");
        m.put("SHIFTL", Op::Instruction(Opcode::Shiftl), S::Format2RegisterNumber, "(r1)<-(r1)<<n", "Shift left n bits.");
        m.put("SHIFTR", Op::Instruction(Opcode::Shiftr), S::Format2RegisterNumber, "(r1)<-(r1)>>n", "Shift right n bits.");
        m.put("ADDR", Op::Instruction(Opcode::Addr), S::Format2RegisterPair, "r2<-(r2)+(r1)", "Add registers.");
        m.put("SUBR", Op::Instruction(Opcode::Subr), S::Format2RegisterPair, "r2<-(r2)-(r1)", "Subtract registers.");
        m.put("MULR", Op::Instruction(Opcode::Mulr), S::Format2RegisterPair, "r2<-(r2)*(r1)", "Multiply registers.");
        m.put("DIVR", Op::Instruction(Opcode::Divr), S::Format2RegisterPair, "r2<-(r2)/(r1)", "Divide registers.");
        m.put("COMPR", Op::Instruction(Opcode::Compr), S::Format2RegisterPair, "(r1):(r2)", "Compare registers.");
        m.put("RMO", Op::Instruction(Opcode::Rmo), S::Format2RegisterPair, "r2<-(r1)", "Move register.");
        m.put("CLEAR", Op::Instruction(Opcode::Clear), S::Format2Register, "r<-0", "Clear register.");
        m.put("TIXR", Op::Instruction(Opcode::Tixr), S::Format2Register, "X<-(X)+1;(X):(r)", "Increment and compare index register.");
        // Format 3/4
        m.put("RSUB", Op::Instruction(Opcode::Rsub), S::Format3, "PC<-(L)", "Return from subroutine.");
        for &(name, extended_name, opcode, pattern, description) in MEMORY_INSTRUCTIONS {
            m.put(name, Op::Instruction(opcode), S::Format3Memory, pattern, description);
            m.put(extended_name, Op::Instruction(opcode), S::Format4Memory, pattern, description);
        }
        m
    }

    fn put(
        &mut self,
        name: &'static str,
        operation: Operation,
        syntax: Syntax,
        pattern: &'static str,
        description: &'static str,
    ) {
        let mnemonic = Mnemonic {
            name,
            operation,
            syntax,
            pattern,
            description,
        };
        if self.by_name.insert(name, mnemonic).is_some() {
            panic!("cannot insert duplicate entry for mnemonic {name}");
        }
    }

    /// Look up a mnemonic by its exact (case-sensitive) spelling.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Mnemonic> {
        self.by_name.get(name)
    }

    /// All mnemonics, ordered by spelling.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &Mnemonic> {
        self.by_name.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Used to print the registry as a reference table.
impl Display for Mnemonics {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for m in self.iter() {
            writeln!(f, "{:<8} {:<24} {}", m.name, m.pattern, m.description)?;
        }
        Ok(())
    }
}
