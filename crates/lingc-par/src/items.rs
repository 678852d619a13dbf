//! Top-level items: `functionDecl`, `varDecl`, parameter lists, and size
//! limiters.

use crate::Parser;
use lingc_lex::TokenKind;
use lingc_sem::DeclKind;
use lingc_util::diagnostic::P_MALFORMED_PARAM_LIST;
use lingc_util::funtab::InsertResult as FuncInsertResult;
use lingc_util::symtab::InsertResult as VarInsertResult;
use lingc_util::{DataType, Delimiter, SizeLimiter};

impl<'a> Parser<'a> {
    /// `functionDecl := "principal" "(" ")" block | "funcao" funcIdent "("
    /// paramList? ")" block`
    pub(crate) fn parse_function_decl(&mut self) -> Option<()> {
        let line = self.current.line;
        let (name, is_principal) = if self.current.kind == TokenKind::Principal {
            self.advance();
            ("principal".to_string(), true)
        } else {
            self.expect(TokenKind::Funcao)?;
            if self.current.kind != TokenKind::FuncIdent {
                self.error_expected("a function name");
                return None;
            }
            let name = self.current.lexeme.clone();
            self.advance();
            (name, false)
        };

        if is_principal {
            self.found_principal = true;
        }

        match self.funtab.insert(&name, line) {
            FuncInsertResult::Inserted => {}
            FuncInsertResult::Duplicate => {
                self.semantic.report_duplicate_declaration(DeclKind::Function, &name, line);
            }
        }

        self.push_open(Delimiter::Paren, TokenKind::LParen)?;
        if !is_principal && self.current.kind != TokenKind::RParen {
            self.parse_param_list(&name)?;
        }
        self.pop_close(Delimiter::Paren, TokenKind::RParen)?;

        self.parse_block(&name)?;
        Some(())
    }

    /// `paramList := typeKw varIdent ("," typeKw varIdent)*`
    fn parse_param_list(&mut self, scope: &str) -> Option<()> {
        loop {
            let ty = self.parse_type_keyword(P_MALFORMED_PARAM_LIST)?;
            if self.current.kind != TokenKind::VarIdent {
                self.error_expected_code("a parameter name", P_MALFORMED_PARAM_LIST);
                return None;
            }
            let name = self.current.lexeme.clone();
            let line = self.current.line;
            self.advance();

            match self.symtab.insert(&name, ty, scope, None) {
                VarInsertResult::Inserted => {}
                VarInsertResult::Duplicate => {
                    self.semantic.report_duplicate_declaration(DeclKind::Variable, &name, line);
                }
            }

            if self.current.kind == TokenKind::Comma {
                self.advance();
            } else {
                break;
            }
        }
        Some(())
    }

    fn parse_type_keyword(&mut self, code_on_failure: lingc_util::DiagnosticCode) -> Option<DataType> {
        let ty = match self.current.kind {
            TokenKind::Inteiro => DataType::Integer,
            TokenKind::Texto => DataType::Text,
            TokenKind::Decimal => DataType::Decimal,
            _ => {
                self.error_expected_code("a data type keyword ('inteiro', 'texto' or 'decimal')", code_on_failure);
                return None;
            }
        };
        self.advance();
        Some(ty)
    }

    /// `varDecl := typeKw varName ("," varName)* ";"`
    pub(crate) fn parse_var_decl(&mut self, scope: &str) -> Option<()> {
        let ty = self.parse_type_keyword(lingc_util::diagnostic::P_UNEXPECTED_TOKEN)?;
        loop {
            self.parse_var_name(ty, scope)?;
            if self.current.kind == TokenKind::Comma {
                self.advance();
            } else {
                break;
            }
        }
        self.expect(TokenKind::Semicolon)?;
        Some(())
    }

    /// `varName := varIdent ("[" sizeLimiter "]")? ("=" expr)?`
    fn parse_var_name(&mut self, ty: DataType, scope: &str) -> Option<()> {
        if self.current.kind != TokenKind::VarIdent {
            self.error_expected("a variable name");
            return None;
        }
        let name = self.current.lexeme.clone();
        let decl_line = self.current.line;
        self.advance();

        let mut limiter = None;
        if self.current.kind == TokenKind::LBracket {
            self.push_open(Delimiter::Bracket, TokenKind::LBracket)?;
            limiter = Some(self.parse_size_limiter(ty)?);
            self.pop_close(Delimiter::Bracket, TokenKind::RBracket)?;
        }

        match self.symtab.insert(&name, ty, scope, limiter) {
            VarInsertResult::Inserted => {}
            VarInsertResult::Duplicate => {
                self.semantic.report_duplicate_declaration(DeclKind::Variable, &name, decl_line);
            }
        }

        if self.current.kind == TokenKind::Assign {
            self.advance();
            let rhs_kind = self.current.kind;
            let rhs_lexeme = self.current.lexeme.clone();
            let assign_line = decl_line;
            self.parse_expr()?;
            let rhs = crate::operand_from(rhs_kind, &rhs_lexeme);
            self.semantic.check_assignment_types(&self.symtab, &name, rhs, assign_line);
            self.symtab.set_value(&name, rhs_lexeme);
        }

        Some(())
    }

    /// `sizeLimiter := NUMBER | NUMBER "." NUMBER`
    ///
    /// A decimal limiter may arrive as one token (the lexer accepts `.` in a
    /// number literal) or as three (`NUMBER "." NUMBER`, the dot lexed
    /// separately when whitespace splits it) — both must parse to the same
    /// [`SizeLimiter`].
    fn parse_size_limiter(&mut self, ty: DataType) -> Option<SizeLimiter> {
        if self.current.kind != TokenKind::NumberLiteral {
            self.error_expected("a number in the size limiter");
            return None;
        }
        let lexeme = self.current.lexeme.clone();

        if ty != DataType::Decimal {
            let size1 = lexeme.parse().unwrap_or(0);
            self.advance();
            return Some(SizeLimiter::text(size1));
        }

        if let Some((before, after)) = lexeme.split_once('.') {
            let size1 = before.parse().unwrap_or(0);
            let size2 = after.parse().unwrap_or(0);
            self.advance();
            return Some(SizeLimiter::decimal(size1, size2));
        }

        let size1 = lexeme.parse().unwrap_or(0);
        self.advance();
        if self.current.kind == TokenKind::Dot {
            self.advance();
            if self.current.kind != TokenKind::NumberLiteral {
                self.error_expected("a number after the point in the decimal limiter");
                return None;
            }
            let size2 = self.current.lexeme.parse().unwrap_or(0);
            self.advance();
            return Some(SizeLimiter::decimal(size1, size2));
        }

        Some(SizeLimiter::decimal(size1, 0))
    }
}
