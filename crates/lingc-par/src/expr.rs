//! Expressions and conditions: `expr`, `term`, `factor`, `condition`, and
//! `relExpr`.

use crate::{operand_from, Parser};
use lingc_lex::TokenKind;
use lingc_util::diagnostic::P_INVALID_FACTOR;
use lingc_util::{Delimiter, DiagnosticBuilder};

impl<'a> Parser<'a> {
    /// `expr := term (("+" | "-") term)*`
    ///
    /// Only the first token of each operand feeds the math-operand check
    /// (the same first-token approximation the assignment and comparison
    /// checks use); the combined expression is not re-inferred after the
    /// first operator.
    pub(crate) fn parse_expr(&mut self) -> Option<()> {
        let lhs_kind = self.current.kind;
        let lhs_lexeme = self.current.lexeme.clone();
        self.parse_term()?;

        while matches!(self.current.kind, TokenKind::Plus | TokenKind::Minus) {
            let op = if self.current.kind == TokenKind::Plus { "+" } else { "-" };
            let op_line = self.current.line;
            self.advance();

            let rhs_kind = self.current.kind;
            let rhs_lexeme = self.current.lexeme.clone();
            self.parse_term()?;

            let lhs = operand_from(lhs_kind, &lhs_lexeme);
            let rhs = operand_from(rhs_kind, &rhs_lexeme);
            self.semantic.check_math_operand_types(&self.symtab, lhs, op, rhs, op_line);
        }
        Some(())
    }

    /// `term := factor (("*" | "/" | "^") factor)*`
    fn parse_term(&mut self) -> Option<()> {
        let lhs_kind = self.current.kind;
        let lhs_lexeme = self.current.lexeme.clone();
        self.parse_factor()?;

        while matches!(self.current.kind, TokenKind::Star | TokenKind::Slash | TokenKind::Caret) {
            let op = match self.current.kind {
                TokenKind::Star => "*",
                TokenKind::Slash => "/",
                TokenKind::Caret => "^",
                _ => unreachable!(),
            };
            let op_line = self.current.line;
            self.advance();

            let rhs_kind = self.current.kind;
            let rhs_lexeme = self.current.lexeme.clone();
            self.parse_factor()?;

            let lhs = operand_from(lhs_kind, &lhs_lexeme);
            let rhs = operand_from(rhs_kind, &rhs_lexeme);
            self.semantic.check_math_operand_types(&self.symtab, lhs, op, rhs, op_line);
        }
        Some(())
    }

    /// `factor := NUMBER | TEXT | varIdent | funcIdent "(" args? ")" | "("
    /// expr ")"`
    fn parse_factor(&mut self) -> Option<()> {
        match self.current.kind {
            TokenKind::NumberLiteral | TokenKind::TextLiteral => {
                self.advance();
                Some(())
            }
            TokenKind::VarIdent => {
                let name = self.current.lexeme.clone();
                let line = self.current.line;
                self.advance();
                self.semantic.check_var_declared(&self.symtab, &name, line);
                Some(())
            }
            TokenKind::FuncIdent => {
                let name = self.current.lexeme.clone();
                let line = self.current.line;
                self.advance();
                self.semantic.check_func_declared(&mut self.funtab, &name, line);
                self.parse_call_args()?;
                Some(())
            }
            TokenKind::LParen => {
                self.push_open(Delimiter::Paren, TokenKind::LParen)?;
                self.parse_expr()?;
                self.pop_close(Delimiter::Paren, TokenKind::RParen)?;
                Some(())
            }
            _ => {
                DiagnosticBuilder::error(format!(
                    "invalid expression factor '{}' at line {}",
                    self.current.lexeme, self.current.line
                ))
                .code(P_INVALID_FACTOR)
                .line(self.current.line)
                .emit(self.handler);
                self.syntax_error_found = true;
                None
            }
        }
    }

    /// `condition := relExpr (("&&" | "||") relExpr)*`
    pub(crate) fn parse_condition(&mut self) -> Option<()> {
        self.parse_rel_expr()?;
        while matches!(self.current.kind, TokenKind::And | TokenKind::Or) {
            self.advance();
            self.parse_rel_expr()?;
        }
        Some(())
    }

    /// `relExpr := expr relOp expr`
    fn parse_rel_expr(&mut self) -> Option<()> {
        let lhs_kind = self.current.kind;
        let lhs_lexeme = self.current.lexeme.clone();
        let line = self.current.line;
        self.parse_expr()?;

        let op = match self.current.kind {
            TokenKind::Eq => "==",
            TokenKind::Neq => "<>",
            TokenKind::Lt => "<",
            TokenKind::Leq => "<=",
            TokenKind::Gt => ">",
            TokenKind::Geq => ">=",
            _ => {
                self.error_expected("a relational operator ('==', '<>', '<', '<=', '>' or '>=')");
                return None;
            }
        };
        self.advance();

        let rhs_kind = self.current.kind;
        let rhs_lexeme = self.current.lexeme.clone();
        self.parse_expr()?;

        let lhs = operand_from(lhs_kind, &lhs_lexeme);
        let rhs = operand_from(rhs_kind, &rhs_lexeme);
        self.semantic.check_comparison_types(&self.symtab, lhs, op, rhs, line);
        Some(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingc_util::Handler;

    fn parse(source: &str) -> (bool, Handler) {
        let handler = Handler::new();
        let mut parser = Parser::new(source, &handler);
        (parser.parse_program(), handler)
    }

    #[test]
    fn arithmetic_with_parens_is_accepted() {
        let (accepted, handler) = parse("principal() { inteiro !x; !x = (1 + 2) * 3 / 4 ^ 2; }");
        assert!(accepted, "{:?}", handler.diagnostics());
    }

    #[test]
    fn text_plus_number_warns_about_the_operator() {
        let (accepted, handler) = parse("principal() { escreva(\"a\" + 1); }");
        assert!(accepted);
        assert_eq!(handler.warning_count(), 1);
    }

    #[test]
    fn condition_without_relational_operator_is_a_syntax_error() {
        let (accepted, handler) = parse("principal() { inteiro !x; se(!x) { } }");
        assert!(!accepted);
        assert!(handler.has_errors());
    }

    #[test]
    fn function_call_as_factor_is_accepted() {
        let (accepted, handler) = parse(
            "funcao __dobro(inteiro !n) { retorno !n * 2; } principal() { inteiro !x; !x = __dobro(21); }",
        );
        assert!(accepted, "{:?}", handler.diagnostics());
    }

    #[test]
    fn logical_and_combines_two_conditions() {
        let (accepted, handler) =
            parse("principal() { inteiro !x; se(!x > 0 && !x < 10) { } }");
        assert!(accepted, "{:?}", handler.diagnostics());
    }
}
