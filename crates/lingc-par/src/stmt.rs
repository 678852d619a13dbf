//! Statements: blocks, `leia`/`escreva`, `se`/`senao`, `para`, `retorno`,
//! assignment, and call-as-statement.

use crate::Parser;
use lingc_lex::TokenKind;
use lingc_util::Delimiter;

impl<'a> Parser<'a> {
    /// `block := "{" (varDecl | stmt)* "}"`
    pub(crate) fn parse_block(&mut self, scope: &str) -> Option<()> {
        self.push_open(Delimiter::Brace, TokenKind::LBrace)?;
        while self.current.kind != TokenKind::RBrace
            && self.current.kind != TokenKind::Eof
            && !self.syntax_error_found
        {
            match self.current.kind {
                TokenKind::Inteiro | TokenKind::Texto | TokenKind::Decimal => {
                    self.parse_var_decl(scope)?;
                }
                _ => self.parse_stmt(scope)?,
            }
        }
        self.pop_close(Delimiter::Brace, TokenKind::RBrace)?;
        Some(())
    }

    fn parse_block_or_stmt(&mut self, scope: &str) -> Option<()> {
        if self.current.kind == TokenKind::LBrace {
            self.parse_block(scope)
        } else {
            self.parse_stmt(scope)
        }
    }

    /// `stmt := readStmt | writeStmt | ifStmt | forStmt | returnStmt |
    /// assignStmt | callStmt`
    fn parse_stmt(&mut self, scope: &str) -> Option<()> {
        match self.current.kind {
            TokenKind::Leia => self.parse_read_stmt(),
            TokenKind::Escreva => self.parse_write_stmt(),
            TokenKind::Se => self.parse_if_stmt(scope),
            TokenKind::Para => self.parse_for_stmt(scope),
            TokenKind::Retorno => self.parse_return_stmt(),
            TokenKind::VarIdent => self.parse_assign_stmt(),
            TokenKind::FuncIdent => self.parse_call_stmt(),
            _ => {
                self.error_expected("a statement");
                None
            }
        }
    }

    /// `readStmt := "leia" "(" varIdent ("," varIdent)* ")" ";"`
    fn parse_read_stmt(&mut self) -> Option<()> {
        self.expect(TokenKind::Leia)?;
        self.push_open(Delimiter::Paren, TokenKind::LParen)?;
        loop {
            if self.current.kind != TokenKind::VarIdent {
                self.error_expected("a variable name");
                return None;
            }
            let name = self.current.lexeme.clone();
            let line = self.current.line;
            self.advance();
            self.semantic.check_var_declared(&self.symtab, &name, line);

            if self.current.kind == TokenKind::Comma {
                self.advance();
            } else {
                break;
            }
        }
        self.pop_close(Delimiter::Paren, TokenKind::RParen)?;
        self.expect(TokenKind::Semicolon)?;
        Some(())
    }

    /// `writeStmt := "escreva" "(" expr ("," expr)* ")" ";"`
    fn parse_write_stmt(&mut self) -> Option<()> {
        self.expect(TokenKind::Escreva)?;
        self.push_open(Delimiter::Paren, TokenKind::LParen)?;
        if self.current.kind != TokenKind::RParen {
            loop {
                self.parse_expr()?;
                if self.current.kind == TokenKind::Comma {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.pop_close(Delimiter::Paren, TokenKind::RParen)?;
        self.expect(TokenKind::Semicolon)?;
        Some(())
    }

    /// `ifStmt := "se" "(" condition ")" (block | stmt) ("senao" (block |
    /// stmt))?`
    fn parse_if_stmt(&mut self, scope: &str) -> Option<()> {
        self.expect(TokenKind::Se)?;
        self.push_open(Delimiter::Paren, TokenKind::LParen)?;
        self.parse_condition()?;
        self.pop_close(Delimiter::Paren, TokenKind::RParen)?;
        self.reject_semicolon("a 'se(...)' condition")?;
        self.parse_block_or_stmt(scope)?;
        if self.current.kind == TokenKind::Senao {
            self.advance();
            self.parse_block_or_stmt(scope)?;
        }
        Some(())
    }

    /// `forStmt := "para" "(" (varIdent "=" expr)? ";" condition ";"
    /// forStep ")" (block | stmt)`
    ///
    /// `forStep` is mandatory: a `para(...)` whose third clause is absent is
    /// a syntax error here, not the silent no-op the original parser let
    /// through.
    fn parse_for_stmt(&mut self, scope: &str) -> Option<()> {
        self.expect(TokenKind::Para)?;
        self.push_open(Delimiter::Paren, TokenKind::LParen)?;

        if self.current.kind == TokenKind::VarIdent {
            let name = self.current.lexeme.clone();
            let line = self.current.line;
            self.advance();
            self.semantic.check_var_declared(&self.symtab, &name, line);
            self.expect(TokenKind::Assign)?;
            self.parse_expr()?;
        }
        self.expect(TokenKind::Semicolon)?;

        self.parse_condition()?;
        self.expect(TokenKind::Semicolon)?;

        self.parse_for_step()?;

        self.pop_close(Delimiter::Paren, TokenKind::RParen)?;
        self.reject_semicolon("a 'para(...)' header")?;
        self.parse_block_or_stmt(scope)?;
        Some(())
    }

    /// `forStep := varIdent "=" expr | varIdent ("++" | "--") | ("++" |
    /// "--") varIdent`
    fn parse_for_step(&mut self) -> Option<()> {
        match self.current.kind {
            TokenKind::VarIdent => {
                let name = self.current.lexeme.clone();
                let line = self.current.line;
                self.advance();
                self.semantic.check_var_declared(&self.symtab, &name, line);
                match self.current.kind {
                    TokenKind::Assign => {
                        self.advance();
                        self.parse_expr()?;
                    }
                    TokenKind::Increment | TokenKind::Decrement => {
                        self.advance();
                    }
                    _ => {
                        self.error_expected("'=', '++' or '--' in the 'para' step");
                        return None;
                    }
                }
            }
            TokenKind::Increment | TokenKind::Decrement => {
                self.advance();
                if self.current.kind != TokenKind::VarIdent {
                    self.error_expected("a variable name after '++'/'--'");
                    return None;
                }
                let name = self.current.lexeme.clone();
                let line = self.current.line;
                self.advance();
                self.semantic.check_var_declared(&self.symtab, &name, line);
            }
            _ => {
                self.error_expected("the 'para' step ('=', '++' or '--')");
                return None;
            }
        }
        Some(())
    }

    /// `returnStmt := "retorno" expr ";"`
    fn parse_return_stmt(&mut self) -> Option<()> {
        self.expect(TokenKind::Retorno)?;
        self.parse_expr()?;
        self.expect(TokenKind::Semicolon)?;
        Some(())
    }

    /// `assignStmt := varIdent "=" expr ";"`
    fn parse_assign_stmt(&mut self) -> Option<()> {
        let name = self.current.lexeme.clone();
        let line = self.current.line;
        self.advance();
        self.expect(TokenKind::Assign)?;

        let rhs_kind = self.current.kind;
        let rhs_lexeme = self.current.lexeme.clone();
        self.parse_expr()?;

        let rhs = crate::operand_from(rhs_kind, &rhs_lexeme);
        self.semantic.check_assignment_types(&self.symtab, &name, rhs, line);
        self.symtab.set_value(&name, rhs_lexeme);

        self.expect(TokenKind::Semicolon)?;
        Some(())
    }

    /// `callStmt := funcIdent "(" (expr ("," expr)*)? ")" ";"`
    fn parse_call_stmt(&mut self) -> Option<()> {
        let name = self.current.lexeme.clone();
        let line = self.current.line;
        self.advance();
        self.semantic.check_func_declared(&mut self.funtab, &name, line);
        self.parse_call_args()?;
        self.expect(TokenKind::Semicolon)?;
        Some(())
    }

    /// `"(" (expr ("," expr)*)? ")"` — shared by a call used as a statement
    /// and a call used as an expression factor.
    pub(crate) fn parse_call_args(&mut self) -> Option<()> {
        self.push_open(Delimiter::Paren, TokenKind::LParen)?;
        if self.current.kind != TokenKind::RParen {
            loop {
                self.parse_expr()?;
                if self.current.kind == TokenKind::Comma {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.pop_close(Delimiter::Paren, TokenKind::RParen)?;
        Some(())
    }
}
