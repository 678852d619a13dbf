//! The lexical scanner: one classified [`Token`] per call, dispatched on the
//! first non-whitespace byte.
//!
//! The language's token set is small enough that the per-concern module
//! split a larger lexer would use (identifiers in one file, operators in
//! another, and so on) is not warranted here; everything lives in this one
//! file, grouped the same way the dispatch in [`Lexer::next_token`] groups
//! it.

use crate::token::{Token, TokenKind};
use lingc_util::diagnostic::{
    L_IDENTIFIER_TOO_LONG, L_MALFORMED_FUNC_IDENT, L_MALFORMED_VAR_IDENT, L_STRAY_AMPERSAND,
    L_STRAY_PIPE, L_STRAY_UNDERSCORE, L_TEXT_LITERAL_TOO_LONG, L_UNRECOGNIZED_CHAR,
    L_UNTERMINATED_STRING,
};
use lingc_util::{DiagnosticBuilder, DiagnosticCode, Handler, Reader};

/// Variable and function identifiers, and string literals, are capped at
/// this many content bytes (section 4.B of the design doc).
const MAX_LITERAL_LEN: usize = 255;

pub struct Lexer<'a> {
    reader: Reader,
    handler: &'a Handler,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &str, handler: &'a Handler) -> Self {
        Self { reader: Reader::new(source), handler, done: false }
    }

    /// Rewinds to the start of the source. Used by the driver to run the
    /// syntactic/semantic pass over the same buffer the lexical-display
    /// pass already consumed.
    pub fn rewind(&mut self) {
        self.reader.rewind();
        self.done = false;
    }

    pub fn line(&self) -> u32 {
        self.reader.line()
    }

    /// Produces the next classified token, skipping leading whitespace.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        let line = self.reader.line();

        let c = match self.reader.next_char() {
            None => return Token::new(TokenKind::Eof, "", line),
            Some(c) => c,
        };

        match c {
            b'+' => self.lex_plus(line),
            b'-' => self.lex_minus(line),
            b'*' => Token::new(TokenKind::Star, "*", line),
            b'/' => Token::new(TokenKind::Slash, "/", line),
            b'^' => Token::new(TokenKind::Caret, "^", line),
            b'(' => Token::new(TokenKind::LParen, "(", line),
            b')' => Token::new(TokenKind::RParen, ")", line),
            b'{' => Token::new(TokenKind::LBrace, "{", line),
            b'}' => Token::new(TokenKind::RBrace, "}", line),
            b'[' => Token::new(TokenKind::LBracket, "[", line),
            b']' => Token::new(TokenKind::RBracket, "]", line),
            b';' => Token::new(TokenKind::Semicolon, ";", line),
            b',' => Token::new(TokenKind::Comma, ",", line),
            b'.' => Token::new(TokenKind::Dot, ".", line),
            b'=' => self.lex_equals(line),
            b'<' => self.lex_less(line),
            b'>' => self.lex_greater(line),
            b'&' => self.lex_ampersand(line),
            b'|' => self.lex_pipe(line),
            b'"' => self.lex_text_literal(line),
            b'!' => self.lex_variable_ident(line),
            b'_' => self.lex_function_ident(line),
            c if c.is_ascii_digit() => self.lex_number(c, line),
            c if c.is_ascii_alphabetic() => self.lex_keyword_or_error(c, line),
            other => self.lex_unrecognized(other, line),
        }
    }

    fn skip_whitespace(&mut self) {
        loop {
            match self.reader.next_char() {
                Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r') => continue,
                Some(b) => {
                    self.reader.push_back(b);
                    break;
                }
                None => break,
            }
        }
    }

    /// Consumes the next byte if it equals `expected`, leaving it unread
    /// otherwise.
    fn match_char(&mut self, expected: u8) -> bool {
        match self.reader.next_char() {
            Some(b) if b == expected => true,
            Some(b) => {
                self.reader.push_back(b);
                false
            }
            None => false,
        }
    }

    fn error_token(&self, code: DiagnosticCode, message: impl Into<String>, line: u32) -> Token {
        let message = message.into();
        DiagnosticBuilder::error(message.clone()).code(code).line(line).emit(self.handler);
        Token::new(TokenKind::Error, message, line)
    }

    // ---- multi-character operators ----

    fn lex_plus(&mut self, line: u32) -> Token {
        if self.match_char(b'+') {
            Token::new(TokenKind::Increment, "++", line)
        } else {
            Token::new(TokenKind::Plus, "+", line)
        }
    }

    fn lex_minus(&mut self, line: u32) -> Token {
        if self.match_char(b'-') {
            Token::new(TokenKind::Decrement, "--", line)
        } else {
            Token::new(TokenKind::Minus, "-", line)
        }
    }

    fn lex_equals(&mut self, line: u32) -> Token {
        if self.match_char(b'=') {
            Token::new(TokenKind::Eq, "==", line)
        } else {
            Token::new(TokenKind::Assign, "=", line)
        }
    }

    fn lex_less(&mut self, line: u32) -> Token {
        if self.match_char(b'=') {
            Token::new(TokenKind::Leq, "<=", line)
        } else if self.match_char(b'>') {
            Token::new(TokenKind::Neq, "<>", line)
        } else {
            Token::new(TokenKind::Lt, "<", line)
        }
    }

    fn lex_greater(&mut self, line: u32) -> Token {
        if self.match_char(b'=') {
            Token::new(TokenKind::Geq, ">=", line)
        } else {
            Token::new(TokenKind::Gt, ">", line)
        }
    }

    fn lex_ampersand(&mut self, line: u32) -> Token {
        if self.match_char(b'&') {
            Token::new(TokenKind::And, "&&", line)
        } else {
            self.error_token(L_STRAY_AMPERSAND, "'&' must be followed by '&'", line)
        }
    }

    fn lex_pipe(&mut self, line: u32) -> Token {
        if self.match_char(b'|') {
            Token::new(TokenKind::Or, "||", line)
        } else {
            self.error_token(L_STRAY_PIPE, "'|' must be followed by '|'", line)
        }
    }

    // ---- literals ----

    fn lex_text_literal(&mut self, line: u32) -> Token {
        let mut content = String::new();
        loop {
            match self.reader.next_char() {
                Some(b'"') => return Token::new(TokenKind::TextLiteral, content, line),
                Some(c) => {
                    if content.len() >= MAX_LITERAL_LEN {
                        return self.error_token(
                            L_TEXT_LITERAL_TOO_LONG,
                            format!("text literal exceeds {} bytes", MAX_LITERAL_LEN),
                            line,
                        );
                    }
                    content.push(c as char);
                }
                None => {
                    return self.error_token(
                        L_UNTERMINATED_STRING,
                        "unterminated text literal",
                        line,
                    );
                }
            }
        }
    }

    fn lex_number(&mut self, first: u8, line: u32) -> Token {
        let mut lexeme = String::new();
        lexeme.push(first as char);
        let mut seen_dot = false;

        loop {
            match self.reader.next_char() {
                Some(c) if c.is_ascii_digit() => lexeme.push(c as char),
                Some(b'.') if !seen_dot => {
                    seen_dot = true;
                    lexeme.push('.');
                }
                Some(c) => {
                    self.reader.push_back(c);
                    break;
                }
                None => break,
            }
        }

        Token::new(TokenKind::NumberLiteral, lexeme, line)
    }

    // `!` followed by a lowercase letter, then alphanumerics.
    fn lex_variable_ident(&mut self, line: u32) -> Token {
        let mut lexeme = String::from("!");

        match self.reader.next_char() {
            Some(c) if c.is_ascii_lowercase() => lexeme.push(c as char),
            Some(c) => {
                self.reader.push_back(c);
                return self.error_token(
                    L_MALFORMED_VAR_IDENT,
                    "'!' must be followed by a lowercase letter",
                    line,
                );
            }
            None => {
                return self.error_token(
                    L_MALFORMED_VAR_IDENT,
                    "'!' must be followed by a lowercase letter",
                    line,
                );
            }
        }

        let mut continuation_len = 0usize;
        loop {
            match self.reader.next_char() {
                Some(c) if c.is_ascii_alphanumeric() => {
                    if continuation_len >= MAX_LITERAL_LEN {
                        self.reader.push_back(c);
                        break;
                    }
                    lexeme.push(c as char);
                    continuation_len += 1;
                }
                Some(c) => {
                    self.reader.push_back(c);
                    break;
                }
                None => break,
            }
        }

        Token::new(TokenKind::VarIdent, lexeme, line)
    }

    // `_` alone is an error; `__` followed by an alphanumeric begins a
    // function identifier.
    fn lex_function_ident(&mut self, line: u32) -> Token {
        match self.reader.next_char() {
            Some(b'_') => {}
            Some(c) => {
                self.reader.push_back(c);
                return self.error_token(
                    L_STRAY_UNDERSCORE,
                    "a single '_' is not a valid token; function identifiers begin with '__'",
                    line,
                );
            }
            None => {
                return self.error_token(
                    L_STRAY_UNDERSCORE,
                    "a single '_' is not a valid token; function identifiers begin with '__'",
                    line,
                );
            }
        }

        let mut lexeme = String::from("__");
        match self.reader.next_char() {
            Some(c) if c.is_ascii_alphanumeric() => lexeme.push(c as char),
            Some(c) => {
                self.reader.push_back(c);
                return self.error_token(
                    L_MALFORMED_FUNC_IDENT,
                    "'__' must be followed by an alphanumeric character",
                    line,
                );
            }
            None => {
                return self.error_token(
                    L_MALFORMED_FUNC_IDENT,
                    "'__' must be followed by an alphanumeric character",
                    line,
                );
            }
        }

        let mut continuation_len = 0usize;
        loop {
            match self.reader.next_char() {
                Some(c) if c.is_ascii_alphanumeric() || c == b'_' => {
                    if continuation_len >= MAX_LITERAL_LEN {
                        self.reader.push_back(c);
                        break;
                    }
                    lexeme.push(c as char);
                    continuation_len += 1;
                }
                Some(c) => {
                    self.reader.push_back(c);
                    break;
                }
                None => break,
            }
        }

        Token::new(TokenKind::FuncIdent, lexeme, line)
    }

    fn lex_keyword_or_error(&mut self, first: u8, line: u32) -> Token {
        let mut lexeme = String::new();
        lexeme.push(first as char);

        loop {
            match self.reader.next_char() {
                Some(c) if c.is_ascii_alphanumeric() || c == b'_' => {
                    if lexeme.len() >= MAX_LITERAL_LEN {
                        self.reader.push_back(c);
                        return self.error_token(L_IDENTIFIER_TOO_LONG, "identifier too long", line);
                    }
                    lexeme.push(c as char);
                }
                Some(c) => {
                    self.reader.push_back(c);
                    break;
                }
                None => break,
            }
        }

        match lexeme.as_str() {
            "principal" => Token::new(TokenKind::Principal, lexeme, line),
            "funcao" => Token::new(TokenKind::Funcao, lexeme, line),
            "retorno" => Token::new(TokenKind::Retorno, lexeme, line),
            "leia" => Token::new(TokenKind::Leia, lexeme, line),
            "escreva" => Token::new(TokenKind::Escreva, lexeme, line),
            "se" => Token::new(TokenKind::Se, lexeme, line),
            "senao" => Token::new(TokenKind::Senao, lexeme, line),
            "para" => Token::new(TokenKind::Para, lexeme, line),
            "inteiro" => Token::new(TokenKind::Inteiro, lexeme, line),
            "texto" => Token::new(TokenKind::Texto, lexeme, line),
            "decimal" => Token::new(TokenKind::Decimal, lexeme, line),
            _ => self.error_token(
                L_UNRECOGNIZED_CHAR,
                format!(
                    "'{}' is not a reserved word; variables need a '!' prefix and functions a '__' prefix",
                    lexeme
                ),
                line,
            ),
        }
    }

    fn lex_unrecognized(&mut self, byte: u8, line: u32) -> Token {
        let description = if byte.is_ascii_graphic() {
            format!("unrecognized character '{}'", byte as char)
        } else {
            format!("unrecognized byte 0x{:02X}", byte)
        };
        self.error_token(L_UNRECOGNIZED_CHAR, description, line)
    }
}

/// Yields tokens in source order, ending with (and including) the `Eof` or
/// `Error` token, whichever comes first: the lexer fails fast, so scanning
/// never continues past the first `Error`.
impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }
        let token = self.next_token();
        if token.is_eof() || token.is_error() {
            self.done = true;
        }
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingc_util::Handler;

    fn tokenize(source: &str) -> Vec<Token> {
        let handler = Handler::new();
        let lexer = Lexer::new(source, &handler);
        lexer.collect()
    }

    fn single(source: &str) -> Token {
        let handler = Handler::new();
        let mut lexer = Lexer::new(source, &handler);
        lexer.next_token()
    }

    #[test]
    fn empty_input_yields_single_eof() {
        let tokens = tokenize("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
    }

    #[test]
    fn minimal_program_tokenizes_to_expected_sequence() {
        let tokens = tokenize("principal() { }");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Principal,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn keyword_principal() {
        assert_eq!(single("principal").kind, TokenKind::Principal);
    }

    #[test]
    fn keyword_funcao() {
        assert_eq!(single("funcao").kind, TokenKind::Funcao);
    }

    #[test]
    fn keyword_retorno() {
        assert_eq!(single("retorno").kind, TokenKind::Retorno);
    }

    #[test]
    fn keyword_leia() {
        assert_eq!(single("leia").kind, TokenKind::Leia);
    }

    #[test]
    fn keyword_escreva() {
        assert_eq!(single("escreva").kind, TokenKind::Escreva);
    }

    #[test]
    fn keyword_se() {
        assert_eq!(single("se").kind, TokenKind::Se);
    }

    #[test]
    fn keyword_senao() {
        assert_eq!(single("senao").kind, TokenKind::Senao);
    }

    #[test]
    fn keyword_para() {
        assert_eq!(single("para").kind, TokenKind::Para);
    }

    #[test]
    fn keyword_inteiro() {
        assert_eq!(single("inteiro").kind, TokenKind::Inteiro);
    }

    #[test]
    fn keyword_texto() {
        assert_eq!(single("texto").kind, TokenKind::Texto);
    }

    #[test]
    fn keyword_decimal() {
        assert_eq!(single("decimal").kind, TokenKind::Decimal);
    }

    #[test]
    fn bare_identifier_without_prefix_is_an_error() {
        let tok = single("abacate");
        assert_eq!(tok.kind, TokenKind::Error);
    }

    #[test]
    fn variable_identifier_requires_lowercase_start() {
        let tok = single("!x");
        assert_eq!(tok.kind, TokenKind::VarIdent);
        assert_eq!(tok.lexeme, "!x");
    }

    #[test]
    fn variable_identifier_rejects_uppercase_start() {
        let tok = single("!X");
        assert_eq!(tok.kind, TokenKind::Error);
    }

    #[test]
    fn variable_identifier_continues_with_alphanumerics() {
        let tok = single("!conta1");
        assert_eq!(tok.kind, TokenKind::VarIdent);
        assert_eq!(tok.lexeme, "!conta1");
    }

    #[test]
    fn function_identifier_requires_double_underscore() {
        let tok = single("__soma");
        assert_eq!(tok.kind, TokenKind::FuncIdent);
        assert_eq!(tok.lexeme, "__soma");
    }

    #[test]
    fn single_underscore_is_an_error() {
        let tok = single("_x");
        assert_eq!(tok.kind, TokenKind::Error);
    }

    #[test]
    fn function_identifier_allows_internal_underscores() {
        let tok = single("__soma_total");
        assert_eq!(tok.kind, TokenKind::FuncIdent);
        assert_eq!(tok.lexeme, "__soma_total");
    }

    #[test]
    fn integer_literal() {
        let tok = single("42");
        assert_eq!(tok.kind, TokenKind::NumberLiteral);
        assert_eq!(tok.lexeme, "42");
    }

    #[test]
    fn decimal_literal_with_single_dot() {
        let tok = single("10.2");
        assert_eq!(tok.kind, TokenKind::NumberLiteral);
        assert_eq!(tok.lexeme, "10.2");
    }

    #[test]
    fn second_dot_terminates_the_number_literal() {
        let tokens = tokenize("10.2.5");
        assert_eq!(tokens[0].kind, TokenKind::NumberLiteral);
        assert_eq!(tokens[0].lexeme, "10.2");
        assert_eq!(tokens[1].kind, TokenKind::Dot);
        assert_eq!(tokens[2].kind, TokenKind::NumberLiteral);
        assert_eq!(tokens[2].lexeme, "5");
    }

    #[test]
    fn decimal_split_across_three_tokens() {
        let tokens = tokenize("10 . 2");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TokenKind::NumberLiteral, TokenKind::Dot, TokenKind::NumberLiteral, TokenKind::Eof]);
    }

    #[test]
    fn text_literal_excludes_quotes() {
        let tok = single("\"hello\"");
        assert_eq!(tok.kind, TokenKind::TextLiteral);
        assert_eq!(tok.lexeme, "hello");
    }

    #[test]
    fn unterminated_text_literal_is_an_error() {
        let tok = single("\"hello");
        assert_eq!(tok.kind, TokenKind::Error);
    }

    #[test]
    fn oversized_text_literal_is_an_error() {
        let long = "\"".to_string() + &"a".repeat(300) + "\"";
        let tok = single(&long);
        assert_eq!(tok.kind, TokenKind::Error);
    }

    #[test]
    fn assign_vs_equality() {
        assert_eq!(single("=").kind, TokenKind::Assign);
        assert_eq!(single("==").kind, TokenKind::Eq);
    }

    #[test]
    fn less_family() {
        assert_eq!(single("<").kind, TokenKind::Lt);
        assert_eq!(single("<=").kind, TokenKind::Leq);
        assert_eq!(single("<>").kind, TokenKind::Neq);
    }

    #[test]
    fn greater_family() {
        assert_eq!(single(">").kind, TokenKind::Gt);
        assert_eq!(single(">=").kind, TokenKind::Geq);
    }

    #[test]
    fn ampersand_requires_pair() {
        assert_eq!(single("&&").kind, TokenKind::And);
        assert_eq!(single("&").kind, TokenKind::Error);
    }

    #[test]
    fn pipe_requires_pair() {
        assert_eq!(single("||").kind, TokenKind::Or);
        assert_eq!(single("|").kind, TokenKind::Error);
    }

    #[test]
    fn increment_and_decrement() {
        assert_eq!(single("++").kind, TokenKind::Increment);
        assert_eq!(single("--").kind, TokenKind::Decrement);
        assert_eq!(single("+").kind, TokenKind::Plus);
        assert_eq!(single("-").kind, TokenKind::Minus);
    }

    #[test]
    fn brackets_of_three_shapes() {
        let tokens = tokenize("(){}[]");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn line_numbers_track_newlines() {
        let tokens = tokenize("inteiro !x;\n!x = 5;");
        let assign_line = tokens.iter().find(|t| t.kind == TokenKind::Assign).unwrap().line;
        assert_eq!(assign_line, 2);
    }

    #[test]
    fn unrecognized_byte_is_an_error() {
        let tok = single("@");
        assert_eq!(tok.kind, TokenKind::Error);
    }

    #[test]
    fn iterator_stops_at_first_error() {
        let tokens = tokenize("!x @ !y");
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Error);
        assert!(tokens.iter().filter(|t| t.kind == TokenKind::VarIdent).count() <= 1);
    }
}
