//! lingc-par - the recursive-descent parser (component D).
//!
//! Hand-written, one-token lookahead, no backtracking. Every production is
//! a method returning `Option<()>` (or `Option<DataType>` where a value is
//! produced): `None` means the production failed, the `syntax_error_found`
//! flag is already set, and the caller should unwind via `?` without
//! attempting recovery — matching the original's `int` 0/1 convention and
//! the "no resynchronization" rule in the design doc's error-handling
//! section. The boolean flag is kept alongside the `Option` plumbing
//! because some callers (`parse_program`'s own loop) need to distinguish
//! "stopped because of an error" from "stopped because input ran out"
//! without threading a `Result` through every production.

mod expr;
mod items;
mod stmt;

use lingc_lex::{Lexer, Token, TokenKind};
use lingc_sem::{Operand, SemanticAnalyzer};
use lingc_util::diagnostic::{P_FORBIDDEN_SEMICOLON, P_MISSING_PRINCIPAL, P_UNBALANCED_DELIMITER, P_UNEXPECTED_TOKEN};
use lingc_util::{BalanceStack, Delimiter, DiagnosticBuilder, DiagnosticCode, FunctionTable, Handler, SymbolTable};

/// Builds an [`Operand`] from a token's kind and lexeme, the shape every
/// semantic check needs (section 4.E's "first-token" inference).
fn operand_from(kind: TokenKind, lexeme: &str) -> Operand<'_> {
    match kind {
        TokenKind::TextLiteral => Operand::TextLiteral(lexeme),
        TokenKind::NumberLiteral => Operand::NumberLiteral(lexeme),
        TokenKind::VarIdent => Operand::VarIdent(lexeme),
        _ => Operand::Other,
    }
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    handler: &'a Handler,
    semantic: SemanticAnalyzer<'a>,
    symtab: SymbolTable,
    funtab: FunctionTable,
    balance: BalanceStack,
    syntax_error_found: bool,
    found_principal: bool,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, handler: &'a Handler) -> Self {
        let mut lexer = Lexer::new(source, handler);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            handler,
            semantic: SemanticAnalyzer::new(handler),
            symtab: SymbolTable::new(),
            funtab: FunctionTable::new(),
            balance: BalanceStack::new(),
            syntax_error_found: false,
            found_principal: false,
        }
    }

    pub fn symbol_table(&self) -> &SymbolTable {
        &self.symtab
    }

    pub fn function_table(&self) -> &FunctionTable {
        &self.funtab
    }

    /// Runs the analyzer's end-of-run unused-function scan.
    pub fn report_unused_functions(&self) {
        self.semantic.report_unused_functions(&self.funtab);
    }

    /// `program := (functionDecl | varDecl)* (must contain exactly one principal)`
    pub fn parse_program(&mut self) -> bool {
        while self.current.kind != TokenKind::Eof && !self.syntax_error_found {
            match self.current.kind {
                TokenKind::Principal | TokenKind::Funcao => {
                    if self.parse_function_decl().is_none() {
                        return false;
                    }
                }
                TokenKind::Inteiro | TokenKind::Texto | TokenKind::Decimal => {
                    if self.parse_var_decl("global").is_none() {
                        return false;
                    }
                }
                _ => {
                    self.error_expected_code(
                        &format!(
                            "a function or a variable declaration, found '{}'",
                            self.current.lexeme
                        ),
                        P_UNEXPECTED_TOKEN,
                    );
                    return false;
                }
            }
        }

        if self.syntax_error_found {
            return false;
        }

        if !self.found_principal {
            DiagnosticBuilder::error("principal module not found")
                .code(P_MISSING_PRINCIPAL)
                .line(self.current.line)
                .emit(self.handler);
            self.syntax_error_found = true;
            return false;
        }

        if !self.balance.is_empty() {
            for item in self.balance.unclosed() {
                DiagnosticBuilder::error(format!(
                    "delimiter '{}' opened at line {} was never closed",
                    item.delimiter, item.opening_line
                ))
                .code(P_UNBALANCED_DELIMITER)
                .line(item.opening_line)
                .emit(self.handler);
            }
            self.syntax_error_found = true;
            return false;
        }

        true
    }

    // ---- token-stream plumbing ----

    /// Advances past the current token, unless it is `Eof` or `Error`: the
    /// lexer's errors bubble up by refusing to advance past them (section
    /// 4.B), so every later `expect` against an `Error` token fails
    /// immediately rather than looping.
    fn advance(&mut self) {
        if self.current.kind != TokenKind::Eof && self.current.kind != TokenKind::Error {
            self.current = self.lexer.next_token();
        }
    }

    fn error_expected_code(&mut self, expected: &str, code: DiagnosticCode) {
        DiagnosticBuilder::error(format!(
            "expected {}, found {} ('{}')",
            expected, self.current.kind, self.current.lexeme
        ))
        .code(code)
        .line(self.current.line)
        .emit(self.handler);
        self.syntax_error_found = true;
    }

    fn error_expected(&mut self, expected: &str) {
        self.error_expected_code(expected, P_UNEXPECTED_TOKEN);
    }

    fn expect(&mut self, kind: TokenKind) -> Option<()> {
        if self.current.kind == kind {
            self.advance();
            Some(())
        } else {
            self.error_expected(&format!("{kind}"));
            None
        }
    }

    /// `verificar_ausencia_token` — rejects a forbidden token (a `;`
    /// immediately after a `se(...)`/`para(...)` header) with a dedicated
    /// message naming the context.
    fn reject_semicolon(&mut self, context: &str) -> Option<()> {
        if self.current.kind == TokenKind::Semicolon {
            DiagnosticBuilder::error(format!("';' must not follow {context}"))
                .code(P_FORBIDDEN_SEMICOLON)
                .line(self.current.line)
                .emit(self.handler);
            self.syntax_error_found = true;
            None
        } else {
            Some(())
        }
    }

    /// Consumes an opening delimiter and pushes it, using the delimiter
    /// token's own line (not a recomputed `currentLine - 1`, unifying the
    /// line-reporting inconsistency the design doc flags).
    fn push_open(&mut self, delimiter: Delimiter, kind: TokenKind) -> Option<()> {
        let line = self.current.line;
        self.expect(kind)?;
        self.balance.push(delimiter, line);
        Some(())
    }

    /// Consumes a closing delimiter and pops the balance stack, verifying
    /// the shape matches.
    fn pop_close(&mut self, delimiter: Delimiter, kind: TokenKind) -> Option<()> {
        let line = self.current.line;
        self.expect(kind)?;
        match self.balance.pop(delimiter) {
            Ok(_) => Some(()),
            Err(Some(top)) => {
                DiagnosticBuilder::error(format!(
                    "delimiter '{}' at line {} does not match the '{}' opened at line {}",
                    delimiter, line, top.delimiter, top.opening_line
                ))
                .code(P_UNBALANCED_DELIMITER)
                .line(line)
                .emit(self.handler);
                self.syntax_error_found = true;
                None
            }
            Err(None) => {
                DiagnosticBuilder::error(format!(
                    "delimiter '{delimiter}' has no matching opening (line {line})"
                ))
                .code(P_UNBALANCED_DELIMITER)
                .line(line)
                .emit(self.handler);
                self.syntax_error_found = true;
                None
            }
        }
    }
}
