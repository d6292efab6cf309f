//! A small lexer on top of `RuneReader`, the kind of consumer the reader is
//! built for.
#![allow(missing_docs)]

use std::{fmt::Write, io::BufReader};

use runebuf::{BytesSource, IoSource, RuneReader, RuneSource, StrSource};

#[derive(Debug, PartialEq)]
enum Token {
    Ident(String),
    Number(String),
    Str(String),
    Arrow,
    Punct(char),
    Malformed(String),
}

fn lex<S: RuneSource>(reader: &mut RuneReader<S>) -> Vec<Token> {
    let mut tokens = Vec::new();
    loop {
        reader.skip_while(char::is_whitespace);
        let next = reader.peek_one();
        if let Some(err) = next.error() {
            if err.is_exhausted() {
                return tokens;
            }
            tokens.push(Token::Malformed(err.to_string()));
            // Consuming clears the failure; peeks keep reporting it.
            let _ = reader.skip(1);
            continue;
        }

        let ch = *next.value();
        let token = if ch.is_alphabetic() || ch == '_' {
            Token::Ident(reader.read_while(|c| c.is_alphanumeric() || c == '_'))
        } else if ch.is_ascii_digit() {
            Token::Number(reader.read_while(|c| c.is_ascii_digit() || c == '.'))
        } else if ch == '"' {
            let _ = reader.skip(1);
            let body = reader.read_while(|c| c != '"');
            let _ = reader.skip(1);
            Token::Str(body)
        } else if reader.peek(2).value() == &['-', '>'] {
            let _ = reader.skip(2);
            Token::Arrow
        } else {
            Token::Punct(*reader.read_one().value())
        };
        tokens.push(token);
    }
}

fn render(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        writeln!(out, "{token:?}").unwrap();
    }
    out
}

const SOURCE: &str = r#"fn größe(x_1) -> 3.14 { "naïve ✓" - x_1 }"#;

#[test]
fn lexes_mixed_input() {
    let mut reader = RuneReader::new(StrSource::new(SOURCE));
    insta::assert_snapshot!(render(&lex(&mut reader)), @r#"
    Ident("fn")
    Ident("größe")
    Punct('(')
    Ident("x_1")
    Punct(')')
    Arrow
    Number("3.14")
    Punct('{')
    Str("naïve ✓")
    Punct('-')
    Ident("x_1")
    Punct('}')
    "#);
    assert!(reader.at_end());
}

#[test]
fn streamed_input_lexes_the_same() {
    let mut in_memory = RuneReader::new(StrSource::new(SOURCE));
    let expected = lex(&mut in_memory);

    for capacity in [1, 2, 5, 4096] {
        let bytes = BufReader::with_capacity(capacity, SOURCE.as_bytes());
        let mut streamed = RuneReader::new(IoSource::new(bytes));
        assert_eq!(lex(&mut streamed), expected, "capacity {capacity}");
    }
}

#[test]
fn malformed_bytes_surface_between_tokens() {
    let mut reader = RuneReader::new(BytesSource::new(b"ab \xFF\xFE cd"));
    insta::assert_snapshot!(render(&lex(&mut reader)), @r#"
    Ident("ab")
    Malformed("invalid UTF-8 sequence \"\\xff\" at byte 3")
    Malformed("invalid UTF-8 sequence \"\\xfe\" at byte 4")
    Ident("cd")
    "#);
}

#[test]
fn lexer_leaves_reader_reusable_after_reset() {
    let mut reader = RuneReader::new(StrSource::new("alpha beta"));
    assert_eq!(reader.read_while(char::is_alphabetic), "alpha");
    // The space was pulled as lookahead and survives the switch.
    let _ = reader.reset(StrSource::new("gamma"));
    assert_eq!(
        lex(&mut reader),
        [Token::Ident("gamma".to_owned())]
    );
}
