//! Property tests for the lexer, covering the "determinism" and
//! "round-trip tokenization" properties from the testable-properties
//! section of the design doc.

use lingc_lex::{Lexer, TokenKind};
use lingc_util::Handler;
use proptest::prelude::*;

fn tokenize(source: &str) -> Vec<(TokenKind, String)> {
    let handler = Handler::new();
    let lexer = Lexer::new(source, &handler);
    lexer.map(|t| (t.kind, t.lexeme)).collect()
}

proptest! {
    #[test]
    fn tokenizing_is_deterministic(source in "[a-z!_(){}\\[\\];,. =<>+\\-*/^0-9\"]{0,80}") {
        let first = tokenize(&source);
        let second = tokenize(&source);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn accepted_programs_always_end_in_eof_or_error(source in "[a-z!_(){}\\[\\];,. =<>+\\-*/^0-9\"]{0,80}") {
        let tokens = tokenize(&source);
        let last = tokens.last().unwrap();
        prop_assert!(matches!(last.0, TokenKind::Eof | TokenKind::Error));
    }
}

#[test]
fn round_trip_on_a_well_formed_program() {
    let source = "principal ( ) { inteiro !x = 5 ; }";
    let handler = Handler::new();
    let lexer = Lexer::new(source, &handler);
    let lexemes: Vec<_> = lexer
        .filter(|t| !matches!(t.kind, TokenKind::Eof))
        .map(|t| t.lexeme)
        .collect();
    assert_eq!(lexemes.join(" "), "principal ( ) { inteiro !x = 5 ; }");
}
