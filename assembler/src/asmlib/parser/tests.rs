use test_strategy::proptest;

use base::prelude::{Opcode, Register, MAX_ADDRESS};

use super::super::ast::Operand;
use super::super::mnemonic::{Directive, Operation};
use super::*;

fn parse_successfully(input: &str) -> Code {
    let mnemonics = Mnemonics::new();
    match parse(input, &mnemonics) {
        Ok(code) => code,
        Err(e) => {
            panic!("unexpected syntax error for input {input:?}: {e}");
        }
    }
}

fn parse_single(input: &str) -> Node {
    let code = parse_successfully(input);
    assert_eq!(code.len(), 1, "expected one record for {input:?}: {code:?}");
    code.nodes()[0].clone()
}

fn single_operand(input: &str) -> Operand {
    match parse_single(input).operand() {
        Some(operand) => operand.clone(),
        None => {
            panic!("{input:?} did not parse as an instruction");
        }
    }
}

fn parse_failure(input: &str) -> SyntaxError {
    let mnemonics = Mnemonics::new();
    match parse(input, &mnemonics) {
        Ok(code) => {
            panic!("expected a syntax error for input {input:?}, got {code:?}");
        }
        Err(e) => e,
    }
}

fn number(input: &str, lo: u32, hi: u32) -> Result<u32, SyntaxError> {
    let mnemonics = Mnemonics::new();
    Parser::new(&mnemonics, input).parse_number(lo, hi)
}

fn simple(name: &str, indexed: bool) -> Operand {
    Operand::Memory(MemoryOperand {
        addressing: Addressing::Simple,
        target: Target::Value(Value::Symbol(SymbolName::from(name))),
        indexed,
        extended: false,
    })
}

#[test]
fn test_number_radix_prefixes() {
    let hi = u32::from(MAX_ADDRESS);
    assert_eq!(number("0x1F", 0, hi), Ok(31));
    assert_eq!(number("0o37", 0, hi), Ok(31));
    assert_eq!(number("0b11111", 0, hi), Ok(31));
    assert_eq!(number("31", 0, hi), Ok(31));
    assert_eq!(number("0", 0, hi), Ok(0));
    // Leading zeroes do not select octal.
    assert_eq!(number("010", 0, hi), Ok(10));
}

#[proptest]
fn number_value_does_not_depend_on_radix(#[strategy(0..=0xF_FFFFu32)] n: u32) {
    let hi = u32::from(MAX_ADDRESS);
    for text in [
        format!("{n}"),
        format!("0x{n:x}"),
        format!("0x{n:X}"),
        format!("0o{n:o}"),
        format!("0b{n:b}"),
    ] {
        assert_eq!(number(&text, 0, hi), Ok(n), "failed to parse {text}");
    }
}

#[test]
fn test_number_rejects_trailing_letters() {
    let e = number("12a", 0, 100).expect_err("12a is not a number");
    assert_eq!(e.message(), "Invalid digit 'a'");
    assert_eq!(e.location(), LineAndColumn::new(1, 3));

    let e = number("0b102", 0, 100).expect_err("2 is not a binary digit");
    assert_eq!(e.message(), "Invalid digit '2'");
}

#[test]
fn test_number_range_is_inclusive() {
    assert_eq!(number("100", 0, 100), Ok(100));
    let e = number("101", 0, 100).expect_err("101 is out of range");
    assert_eq!(e.message(), "Number '101' out of range [0..100]");
    assert_eq!(e.location(), LineAndColumn::new(1, 1));
    let e = number("0", 1, 16).expect_err("0 is below the lower limit");
    assert_eq!(e.message(), "Number '0' out of range [1..16]");
}

#[test]
fn test_number_overflow_is_out_of_range() {
    let e = number("99999999999", 0, 100).expect_err("too large for u32");
    assert_eq!(e.message(), "Number '99999999999' out of range [0..100]");
}

#[test]
fn test_number_expected() {
    assert_eq!(
        number("A", 0, 100).map_err(|e| e.message().to_string()),
        Err("Number expected".to_string())
    );
    assert_eq!(
        number("0x", 0, 100).map_err(|e| e.message().to_string()),
        Err("Invalid number".to_string())
    );
}

#[test]
fn test_worked_example() {
    let node = parse_single("LOOP    LDA     BUFFER,X\n");
    assert_eq!(node.label(), Some(&SymbolName::from("LOOP")));
    assert_eq!(node.location(), LineAndColumn::new(1, 1));
    assert_eq!(node.mnemonic().map(Mnemonic::name), Some("LDA"));
    assert_eq!(node.operand(), Some(&simple("BUFFER", true)));
    assert!(!node.is_extended());
    assert_eq!(node.comment(), None);
}

#[test]
fn test_trailing_comment() {
    let node = parse_single("LOOP  LDA   BUFFER,X   comment text\n");
    assert_eq!(node.label().map(SymbolName::as_str), Some("LOOP"));
    assert_eq!(node.operand(), Some(&simple("BUFFER", true)));
    assert_eq!(node.comment(), Some("comment text"));
}

#[test]
fn test_indexed_allows_spaces() {
    assert_eq!(
        single_operand("        STCH    BUFFER , X\n"),
        simple("BUFFER", true)
    );
    let e = parse_failure("        STCH    BUFFER,A\n");
    assert_eq!(e.message(), "Expected 'X' but found 'A'");
}

#[test]
fn test_extended_instruction() {
    let node = parse_single("        +LDA    VALUE\n");
    assert!(node.is_extended());
    assert_eq!(node.mnemonic().map(Mnemonic::name), Some("+LDA"));
    assert_eq!(
        node.mnemonic().map(Mnemonic::operation),
        Some(Operation::Instruction(Opcode::Lda))
    );
    assert_eq!(
        node.operand(),
        Some(&Operand::Memory(MemoryOperand {
            addressing: Addressing::Simple,
            target: Target::Value(Value::Symbol(SymbolName::from("VALUE"))),
            indexed: false,
            extended: true,
        }))
    );
}

#[test]
fn test_label_must_start_in_column_one() {
    let node = parse_single("LOOP    LDA     ALPHA\n");
    assert_eq!(node.label().map(SymbolName::as_str), Some("LOOP"));

    // Indented, LOOP is taken to be the mnemonic.
    let e = parse_failure(" LOOP    LDA     ALPHA\n");
    assert_eq!(e.message(), "Invalid mnemonic 'LOOP'");
    assert_eq!(e.location(), LineAndColumn::new(1, 2));
}

#[test]
fn test_unknown_mnemonic_location() {
    let e = parse_failure("        FOO\n");
    assert_eq!(e.message(), "Invalid mnemonic 'FOO'");
    assert_eq!(e.location(), LineAndColumn::new(1, 9));

    let e = parse_failure("        lda     ALPHA\n");
    assert_eq!(e.message(), "Invalid mnemonic 'lda'");

    let e = parse_failure("        +RSUB\n");
    assert_eq!(e.message(), "Invalid mnemonic '+RSUB'");
}

#[test]
fn test_label_without_mnemonic() {
    let e = parse_failure("LOOP\n");
    assert_eq!(e.message(), "Invalid mnemonic ''");
    assert_eq!(e.location(), LineAndColumn::new(1, 5));
}

#[test]
fn test_blank_lines_produce_no_records() {
    assert!(parse_successfully("").is_empty());
    assert!(parse_successfully("\n\n").is_empty());
    assert!(parse_successfully("   \t \n").is_empty());

    let code = parse_successfully("\n    \n        RSUB\n\n");
    assert_eq!(code.len(), 1);
    assert_eq!(code.nodes()[0].location(), LineAndColumn::new(3, 1));
}

#[test]
fn test_last_line_needs_no_newline() {
    let node = parse_single("        RSUB");
    assert_eq!(node.operand(), Some(&Operand::None));
}

#[test]
fn test_crlf_line_endings() {
    let code = parse_successfully("FIRST   LDA     ALPHA\r\n        RSUB\r\n");
    assert_eq!(code.len(), 2);
    assert_eq!(code.nodes()[0].operand(), Some(&simple("ALPHA", false)));
    assert_eq!(code.nodes()[0].comment(), None);
    assert_eq!(code.nodes()[1].comment(), None);
    assert_eq!(code.nodes()[1].location(), LineAndColumn::new(2, 1));
}

#[test]
fn test_comments() {
    let code = parse_successfully(". Copy a file\n        RSUB            return to caller\n");
    assert_eq!(code.len(), 2);
    assert_eq!(
        code.nodes()[0].kind(),
        &NodeKind::Comment(". Copy a file".to_string())
    );
    assert!(code.nodes()[0].mnemonic().is_none());
    assert_eq!(code.nodes()[1].comment(), Some("return to caller"));
}

#[test]
fn test_registers() {
    for (letter, number) in ['A', 'X', 'L', 'B', 'S', 'T', 'F'].into_iter().zip(0u8..) {
        let input = format!("        CLEAR   {letter}\n");
        match single_operand(&input) {
            Operand::Register(r) => assert_eq!(r.number(), number),
            other => panic!("unexpected operand {other:?}"),
        }
    }
}

#[test]
fn test_invalid_register() {
    let e = parse_failure("        CLEAR   Z\n");
    assert_eq!(e.message(), "Invalid register 'Z'");
    assert_eq!(e.location(), LineAndColumn::new(1, 17));

    let e = parse_failure("        CLEAR\n");
    assert_eq!(e.message(), "Invalid register: operand is missing");

    let e = parse_failure("        TIXR    a\n");
    assert_eq!(e.message(), "Invalid register 'a'");
}

#[test]
fn test_register_pair() {
    assert_eq!(
        single_operand("        RMO     A,X\n"),
        Operand::RegisterPair(Register::A, Register::X)
    );
    assert_eq!(
        single_operand("        COMPR   S , T\n"),
        Operand::RegisterPair(Register::S, Register::T)
    );
    let e = parse_failure("        RMO A X\n");
    assert_eq!(e.message(), "Expected ',' but found 'X'");
    assert_eq!(e.location(), LineAndColumn::new(1, 15));
    let e = parse_failure("        ADDR    A\n");
    assert_eq!(e.message(), "Expected ',' but reached end of line");
}

#[test]
fn test_shift_count() {
    assert_eq!(
        single_operand("        SHIFTL  A,16\n"),
        Operand::RegisterNumber(Register::A, 16)
    );
    assert_eq!(
        single_operand("        SHIFTR  T,0x1\n"),
        Operand::RegisterNumber(Register::T, 1)
    );
    let e = parse_failure("        SHIFTL  A,0\n");
    assert_eq!(e.message(), "Number '0' out of range [1..16]");
}

#[test]
fn test_svc() {
    assert_eq!(single_operand("        SVC     15\n"), Operand::Number(15));
    let e = parse_failure("        SVC     16\n");
    assert_eq!(e.message(), "Number '16' out of range [0..15]");
}

#[test]
fn test_format1() {
    let node = parse_single("        FIX\n");
    assert_eq!(node.operand(), Some(&Operand::None));
    assert_eq!(
        node.mnemonic().map(Mnemonic::operation),
        Some(Operation::Instruction(Opcode::Fix))
    );
}

#[test]
fn test_directives() {
    let node = parse_single("COPY    START   0x1000\n");
    assert_eq!(node.label().map(SymbolName::as_str), Some("COPY"));
    assert_eq!(
        node.mnemonic().map(Mnemonic::operation),
        Some(Operation::Directive(Directive::Start))
    );
    assert_eq!(node.operand(), Some(&Operand::Value(Value::Number(4096))));

    assert_eq!(
        single_operand("        BASE    LENGTH\n"),
        Operand::Value(Value::Symbol(SymbolName::from("LENGTH")))
    );
    assert_eq!(
        single_operand("        ORG     *\n"),
        Operand::Value(Value::Here)
    );
    assert_eq!(
        single_operand("MAXLEN  EQU     0xFFFFFF\n"),
        Operand::Value(Value::Number(0xFF_FFFF))
    );
    assert_eq!(single_operand("        LTORG\n"), Operand::None);
    assert_eq!(single_operand("        NOBASE\n"), Operand::None);

    let e = parse_failure("        START   0x100000\n");
    assert_eq!(e.message(), "Number '1048576' out of range [0..1048575]");
    let e = parse_failure("        BASE    #3\n");
    assert_eq!(e.message(), "Number or symbol expected");
}

#[test]
fn test_end_operand_is_optional() {
    assert_eq!(
        single_operand("        END\n"),
        Operand::OptionalValue(None)
    );
    assert_eq!(
        single_operand("        END     FIRST\n"),
        Operand::OptionalValue(Some(Value::Symbol(SymbolName::from("FIRST"))))
    );
    assert_eq!(single_operand("        END\r\n"), Operand::OptionalValue(None));
    assert_eq!(single_operand("        END"), Operand::OptionalValue(None));
    let e = parse_failure("        END     0x100000\n");
    assert_eq!(e.message(), "Number '1048576' out of range [0..1048575]");
}

#[test]
fn test_reserve() {
    assert_eq!(single_operand("BUFFER  RESB    4096\n"), Operand::Count(4096));
    assert_eq!(single_operand("RETADR  RESW    1\n"), Operand::Count(1));
    let e = parse_failure("BUFFER  RESB    LENGTH\n");
    assert_eq!(e.message(), "Number expected");
}

#[test]
fn test_data() {
    assert_eq!(
        single_operand("        BYTE    C'AB'\n"),
        Operand::Data(vec![0x41, 0x42])
    );
    assert_eq!(
        single_operand("        BYTE    X'4142'\n"),
        Operand::Data(vec![0x41, 0x42])
    );
    assert_eq!(
        single_operand("        WORD    1\n"),
        Operand::Data(vec![0, 0, 1])
    );
    assert_eq!(
        single_operand("        WORD    C'AB'\n"),
        Operand::Data(vec![0x41, 0x42])
    );
    // A number given to BYTE keeps only its low byte.
    assert_eq!(
        single_operand("        BYTE    0x41\n"),
        Operand::Data(vec![0x41])
    );
    assert_eq!(
        single_operand("        BYTE    C'a b'  text\n"),
        Operand::Data(b"a b".to_vec())
    );
}

#[test]
fn test_bad_data() {
    let e = parse_failure("        BYTE    X'F'\n");
    assert_eq!(e.message(), "Hex literal 'F' has an odd number of digits");
    assert_eq!(e.location(), LineAndColumn::new(1, 19));

    let e = parse_failure("        BYTE    X'FG'\n");
    assert_eq!(e.message(), "Invalid hex digit 'G' in literal");
    assert_eq!(e.location(), LineAndColumn::new(1, 20));

    let e = parse_failure("        LDA     =X'0102z4'\n");
    assert_eq!(e.message(), "Invalid hex digit 'z' in literal");
    assert_eq!(e.location(), LineAndColumn::new(1, 24));

    let e = parse_failure("        BYTE    C'AB\n");
    assert_eq!(e.message(), "Unterminated literal");
    assert_eq!(e.location(), LineAndColumn::new(1, 21));

    let e = parse_failure("        WORD    Q'AB'\n");
    assert_eq!(e.message(), "Invalid storage specifier 'Q'");

    let e = parse_failure("        WORD\n");
    assert_eq!(e.message(), "Invalid storage specifier: operand is missing");
}

#[test]
fn test_addressing_modes() {
    assert_eq!(
        single_operand("        LDA     #3\n"),
        Operand::Memory(MemoryOperand {
            addressing: Addressing::Immediate,
            target: Target::Value(Value::Number(3)),
            indexed: false,
            extended: false,
        })
    );
    assert_eq!(
        single_operand("        J       @RETADR\n"),
        Operand::Memory(MemoryOperand {
            addressing: Addressing::Indirect,
            target: Target::Value(Value::Symbol(SymbolName::from("RETADR"))),
            indexed: false,
            extended: false,
        })
    );
    assert_eq!(
        single_operand("        J       *\n"),
        Operand::Memory(MemoryOperand {
            addressing: Addressing::Simple,
            target: Target::Value(Value::Here),
            indexed: false,
            extended: false,
        })
    );
    assert_eq!(
        single_operand("        LDA     =C'EOF'\n"),
        Operand::Memory(MemoryOperand {
            addressing: Addressing::Simple,
            target: Target::Literal(b"EOF".to_vec()),
            indexed: false,
            extended: false,
        })
    );
}

#[test]
fn test_immediate_range_depends_on_format() {
    let e = parse_failure("        LDA     #4096\n");
    assert_eq!(e.message(), "Number '4096' out of range [0..4095]");
    match single_operand("        +LDA    #4096\n") {
        Operand::Memory(MemoryOperand {
            addressing: Addressing::Immediate,
            target: Target::Value(Value::Number(4096)),
            extended: true,
            ..
        }) => (),
        other => panic!("unexpected operand {other:?}"),
    }
}

#[test]
fn test_parsing_stops_at_first_error() {
    let e = parse_failure("        LDA     ALPHA\n        FOO\n        BAR\n");
    assert_eq!(e.location(), LineAndColumn::new(2, 9));
    assert_eq!(e.message(), "Invalid mnemonic 'FOO'");
}

#[test]
fn test_listing() {
    let code = parse_successfully(concat!(
        "COPY    START   0x1000\n",
        ". read a record\n",
        "FIRST   STL     RETADR          save return address\n",
        "        +JSUB   RDREC\n",
        "        CLEAR   X\n",
        "        COMP    #0\n",
        "        J       @RETADR\n",
        "EOF     BYTE    C'EOF'\n",
        "RETADR  RESW    1\n",
        "        END     FIRST\n",
    ));
    assert_eq!(
        code.labels().map(SymbolName::as_str).collect::<Vec<_>>(),
        vec!["COPY", "FIRST", "EOF", "RETADR"]
    );
    assert_eq!(
        code.to_string(),
        concat!(
            "COPY     START   4096\n",
            ". read a record\n",
            "FIRST    STL     RETADR  save return address\n",
            "         +JSUB   RDREC\n",
            "         CLEAR   X\n",
            "         COMP    #0\n",
            "         J       @RETADR\n",
            "EOF      BYTE    X'454F46'\n",
            "RETADR   RESW    1\n",
            "         END     FIRST\n",
        )
    );
}

#[test]
fn test_concurrent_parses_share_one_registry() {
    let mnemonics = Mnemonics::new();
    let first = "COPY    START   0\nFIRST   STL     RETADR\n        END     FIRST\n";
    let second = ". other\n        CLEAR   X\n        +JSUB   RDREC\n        RSUB\n";
    let expected_first = parse(first, &mnemonics);
    let expected_second = parse(second, &mnemonics);

    let registry = &mnemonics;
    let (got_first, got_second) = std::thread::scope(|s| {
        let a = s.spawn(|| parse(first, registry));
        let b = s.spawn(|| parse(second, registry));
        (
            a.join().expect("first parse should not panic"),
            b.join().expect("second parse should not panic"),
        )
    });
    assert_eq!(got_first, expected_first);
    assert_eq!(got_second, expected_second);
    assert_eq!(got_first.map(|code| code.len()), Ok(3));
    assert_eq!(got_second.map(|code| code.len()), Ok(4));
}
