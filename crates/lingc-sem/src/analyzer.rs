//! The semantic analyzer (component E): name resolution and type
//! compatibility, invoked inline by the parser at the syntactic junctures
//! section 4.E of the design doc names.
//!
//! The analyzer holds no tables of its own; the parser owns the
//! [`SymbolTable`] and [`FunctionTable`] for the run and passes references
//! in on each call. This keeps the analyzer stateless except for the
//! diagnostic sink, and lets the same checks run against whatever table
//! state the parser has built up so far.

use crate::operand::Operand;
use lingc_util::diagnostic::{
    S_ASSIGNMENT_TYPE_MISMATCH, S_COMPARISON_TYPE_MISMATCH, S_DECIMAL_LIMITER_OVERFLOW,
    S_DUPLICATE_DECLARATION, S_INVALID_MATH_OPERAND, S_INVALID_TEXT_OPERATOR,
    S_TEXT_LIMITER_OVERFLOW, S_UNDECLARED_FUNCTION, S_UNDECLARED_VARIABLE, S_UNUSED_FUNCTION,
};
use lingc_util::{DataType, DiagnosticBuilder, FunctionTable, Handler, SymbolTable};

/// What kind of declaration a duplicate-name warning is about; only
/// affects the wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Variable,
    Function,
}

pub struct SemanticAnalyzer<'a> {
    handler: &'a Handler,
}

impl<'a> SemanticAnalyzer<'a> {
    pub fn new(handler: &'a Handler) -> Self {
        Self { handler }
    }

    /// `checkVarDeclared` — emits a warning and returns `false` if `name`
    /// has no entry in `symtab`.
    pub fn check_var_declared(&self, symtab: &SymbolTable, name: &str, line: u32) -> bool {
        if symtab.find(name).is_some() {
            true
        } else {
            DiagnosticBuilder::warning(format!("variable '{name}' was not declared"))
                .code(S_UNDECLARED_VARIABLE)
                .line(line)
                .emit(self.handler);
            false
        }
    }

    /// `checkFuncDeclared` + `markFuncCalled` — looks up `name` in
    /// `funtab`, marking it called on success, warning on failure.
    pub fn check_func_declared(&self, funtab: &mut FunctionTable, name: &str, line: u32) -> bool {
        if funtab.mark_called(name) {
            true
        } else {
            DiagnosticBuilder::warning(format!("function '{name}' was not declared"))
                .code(S_UNDECLARED_FUNCTION)
                .line(line)
                .emit(self.handler);
            false
        }
    }

    /// Emits the duplicate-declaration warning a failed
    /// `SymbolTable::insert`/`FunctionTable::insert` calls for.
    pub fn report_duplicate_declaration(&self, kind: DeclKind, name: &str, line: u32) {
        let what = match kind {
            DeclKind::Variable => "variable",
            DeclKind::Function => "function",
        };
        DiagnosticBuilder::warning(format!("{what} '{name}' was already declared"))
            .code(S_DUPLICATE_DECLARATION)
            .line(line)
            .emit(self.handler);
    }

    /// Infers a [`DataType`] from the first token of an expression. Returns
    /// `None` when the operand is an undeclared variable (the
    /// undeclared-variable warning has already been emitted).
    fn infer_operand_type(&self, symtab: &SymbolTable, operand: Operand, line: u32) -> Option<DataType> {
        match operand {
            Operand::TextLiteral(_) => Some(DataType::Text),
            Operand::NumberLiteral(lexeme) => {
                Some(if lexeme.contains('.') { DataType::Decimal } else { DataType::Integer })
            }
            Operand::VarIdent(name) => match symtab.find(name) {
                Some(entry) => Some(entry.ty),
                None => {
                    self.check_var_declared(symtab, name, line);
                    None
                }
            },
            Operand::Other => Some(DataType::Integer),
        }
    }

    /// `checkAssignmentTypes` — also runs the text/decimal limiter checks
    /// when the rhs is the matching kind of literal, matching the
    /// original's call order (limiter checks first, then the type-mismatch
    /// check, both able to fire independently).
    pub fn check_assignment_types(
        &self,
        symtab: &SymbolTable,
        lhs_name: &str,
        rhs: Operand,
        line: u32,
    ) {
        let Some(entry) = symtab.find(lhs_name) else {
            self.check_var_declared(symtab, lhs_name, line);
            return;
        };

        if let Operand::TextLiteral(content) = rhs {
            self.check_text_limiter(entry.ty, entry.limiter, lhs_name, content, line);
        }
        if let Operand::NumberLiteral(lexeme) = rhs {
            if lexeme.contains('.') {
                self.check_decimal_limiter(entry.ty, entry.limiter, lhs_name, lexeme, line);
            }
        }

        let Some(rhs_ty) = self.infer_operand_type(symtab, rhs, line) else { return };
        if entry.ty != rhs_ty {
            DiagnosticBuilder::warning(format!(
                "type mismatch in assignment to '{}': declared '{}', assigned '{}'",
                lhs_name, entry.ty, rhs_ty
            ))
            .code(S_ASSIGNMENT_TYPE_MISMATCH)
            .line(line)
            .emit(self.handler);
        }
    }

    fn check_text_limiter(
        &self,
        ty: DataType,
        limiter: Option<lingc_util::SizeLimiter>,
        name: &str,
        content: &str,
        line: u32,
    ) {
        if ty != DataType::Text {
            return;
        }
        let Some(limiter) = limiter else { return };
        let len = content.chars().count() as u32;
        if len > limiter.size1 {
            DiagnosticBuilder::warning(format!(
                "text assigned to '{}' exceeds the maximum length of {} characters",
                name, limiter.size1
            ))
            .code(S_TEXT_LIMITER_OVERFLOW)
            .line(line)
            .emit(self.handler);
        }
    }

    fn check_decimal_limiter(
        &self,
        ty: DataType,
        limiter: Option<lingc_util::SizeLimiter>,
        name: &str,
        lexeme: &str,
        line: u32,
    ) {
        if ty != DataType::Decimal {
            return;
        }
        let Some(limiter) = limiter else { return };
        let (before, after) = match lexeme.split_once('.') {
            Some((before, after)) => (before.len() as u32, after.len() as u32),
            None => (lexeme.len() as u32, 0),
        };

        if before > limiter.size1 {
            DiagnosticBuilder::warning(format!(
                "decimal value for '{}' has {} digits before the point, but the limit is {}",
                name, before, limiter.size1
            ))
            .code(S_DECIMAL_LIMITER_OVERFLOW)
            .line(line)
            .emit(self.handler);
            return;
        }
        if after > limiter.size2 {
            DiagnosticBuilder::warning(format!(
                "decimal value for '{}' has {} digits after the point, but the limit is {}",
                name, after, limiter.size2
            ))
            .code(S_DECIMAL_LIMITER_OVERFLOW)
            .line(line)
            .emit(self.handler);
        }
    }

    /// `checkComparisonTypes` — text may only be compared with text, and
    /// only with `==`/`<>`; numeric types inter-compare freely under all
    /// six relational operators.
    pub fn check_comparison_types(
        &self,
        symtab: &SymbolTable,
        lhs: Operand,
        op: &str,
        rhs: Operand,
        line: u32,
    ) {
        let Some(lhs_ty) = self.infer_operand_type(symtab, lhs, line) else { return };
        let Some(rhs_ty) = self.infer_operand_type(symtab, rhs, line) else { return };

        let either_text = lhs_ty == DataType::Text || rhs_ty == DataType::Text;

        if either_text && lhs_ty != rhs_ty {
            DiagnosticBuilder::warning(format!(
                "operator '{op}' cannot compare text with a number"
            ))
            .code(S_COMPARISON_TYPE_MISMATCH)
            .line(line)
            .emit(self.handler);
            return;
        }

        if either_text && op != "==" && op != "<>" {
            DiagnosticBuilder::warning(format!(
                "operator '{op}' is not valid for text; use only '==' or '<>'"
            ))
            .code(S_INVALID_TEXT_OPERATOR)
            .line(line)
            .emit(self.handler);
        }
    }

    /// `checkMathOperationTypes` (the math-operator supplement from
    /// `original_source/compilador.h`'s dropped prototype): text operands
    /// are not valid under any arithmetic operator.
    pub fn check_math_operand_types(
        &self,
        symtab: &SymbolTable,
        lhs: Operand,
        op: &str,
        rhs: Operand,
        line: u32,
    ) {
        let Some(lhs_ty) = self.infer_operand_type(symtab, lhs, line) else { return };
        let Some(rhs_ty) = self.infer_operand_type(symtab, rhs, line) else { return };

        if lhs_ty == DataType::Text || rhs_ty == DataType::Text {
            DiagnosticBuilder::warning(format!(
                "arithmetic operator '{op}' cannot be used with text"
            ))
            .code(S_INVALID_MATH_OPERAND)
            .line(line)
            .emit(self.handler);
        }
    }

    /// Emits an unused-function warning for every declared function other
    /// than `principal` that was never called.
    pub fn report_unused_functions(&self, funtab: &FunctionTable) {
        for entry in funtab.iter() {
            if entry.name != "principal" && !entry.was_called {
                DiagnosticBuilder::warning(format!(
                    "function '{}' is declared but never used",
                    entry.name
                ))
                .code(S_UNUSED_FUNCTION)
                .line(entry.declaration_line)
                .emit(self.handler);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingc_util::types::SizeLimiter;

    fn declare(symtab: &mut SymbolTable, name: &str, ty: DataType, limiter: Option<SizeLimiter>) {
        symtab.insert(name, ty, "principal", limiter);
    }

    #[test]
    fn undeclared_variable_warns_and_reports_false() {
        let handler = Handler::new();
        let symtab = SymbolTable::new();
        let analyzer = SemanticAnalyzer::new(&handler);
        assert!(!analyzer.check_var_declared(&symtab, "!zzz", 3));
        assert_eq!(handler.warning_count(), 1);
    }

    #[test]
    fn declared_variable_is_silent() {
        let handler = Handler::new();
        let mut symtab = SymbolTable::new();
        declare(&mut symtab, "!x", DataType::Integer, None);
        let analyzer = SemanticAnalyzer::new(&handler);
        assert!(analyzer.check_var_declared(&symtab, "!x", 1));
        assert_eq!(handler.warning_count(), 0);
    }

    #[test]
    fn function_call_marks_called_and_is_silent_when_declared() {
        let handler = Handler::new();
        let mut funtab = FunctionTable::new();
        funtab.insert("__util", 1);
        let analyzer = SemanticAnalyzer::new(&handler);
        assert!(analyzer.check_func_declared(&mut funtab, "__util", 5));
        assert!(funtab.find("__util").unwrap().was_called);
        assert_eq!(handler.warning_count(), 0);
    }

    #[test]
    fn undeclared_function_call_warns() {
        let handler = Handler::new();
        let mut funtab = FunctionTable::new();
        let analyzer = SemanticAnalyzer::new(&handler);
        assert!(!analyzer.check_func_declared(&mut funtab, "__ghost", 2));
        assert_eq!(handler.warning_count(), 1);
    }

    #[test]
    fn assignment_type_mismatch_is_reported() {
        let handler = Handler::new();
        let mut symtab = SymbolTable::new();
        declare(&mut symtab, "!s", DataType::Text, None);
        let analyzer = SemanticAnalyzer::new(&handler);
        analyzer.check_assignment_types(&symtab, "!s", Operand::NumberLiteral("5"), 4);
        assert_eq!(handler.warning_count(), 1);
    }

    #[test]
    fn assignment_matching_types_is_silent() {
        let handler = Handler::new();
        let mut symtab = SymbolTable::new();
        declare(&mut symtab, "!x", DataType::Integer, None);
        let analyzer = SemanticAnalyzer::new(&handler);
        analyzer.check_assignment_types(&symtab, "!x", Operand::NumberLiteral("5"), 1);
        assert_eq!(handler.warning_count(), 0);
    }

    #[test]
    fn text_limiter_overflow_is_reported() {
        let handler = Handler::new();
        let mut symtab = SymbolTable::new();
        declare(&mut symtab, "!s", DataType::Text, Some(SizeLimiter::text(3)));
        let analyzer = SemanticAnalyzer::new(&handler);
        analyzer.check_assignment_types(&symtab, "!s", Operand::TextLiteral("hello"), 2);
        assert_eq!(handler.warning_count(), 1);
    }

    #[test]
    fn text_within_limiter_is_silent() {
        let handler = Handler::new();
        let mut symtab = SymbolTable::new();
        declare(&mut symtab, "!s", DataType::Text, Some(SizeLimiter::text(10)));
        let analyzer = SemanticAnalyzer::new(&handler);
        analyzer.check_assignment_types(&symtab, "!s", Operand::TextLiteral("hello"), 2);
        assert_eq!(handler.warning_count(), 0);
    }

    #[test]
    fn decimal_limiter_checks_both_halves() {
        let handler = Handler::new();
        let mut symtab = SymbolTable::new();
        declare(&mut symtab, "!d", DataType::Decimal, Some(SizeLimiter::decimal(2, 1)));
        let analyzer = SemanticAnalyzer::new(&handler);
        analyzer.check_assignment_types(&symtab, "!d", Operand::NumberLiteral("123.45"), 1);
        assert_eq!(handler.warning_count(), 1);
    }

    #[test]
    fn comparison_text_vs_number_warns() {
        let handler = Handler::new();
        let mut symtab = SymbolTable::new();
        declare(&mut symtab, "!s", DataType::Text, None);
        let analyzer = SemanticAnalyzer::new(&handler);
        analyzer.check_comparison_types(
            &symtab,
            Operand::VarIdent("!s"),
            "==",
            Operand::NumberLiteral("5"),
            6,
        );
        assert_eq!(handler.warning_count(), 1);
    }

    #[test]
    fn comparison_text_with_relational_operator_warns() {
        let handler = Handler::new();
        let analyzer = SemanticAnalyzer::new(&handler);
        let symtab = SymbolTable::new();
        analyzer.check_comparison_types(
            &symtab,
            Operand::TextLiteral("a"),
            "<",
            Operand::TextLiteral("b"),
            1,
        );
        assert_eq!(handler.warning_count(), 1);
    }

    #[test]
    fn comparison_text_with_equality_is_silent() {
        let handler = Handler::new();
        let analyzer = SemanticAnalyzer::new(&handler);
        let symtab = SymbolTable::new();
        analyzer.check_comparison_types(
            &symtab,
            Operand::TextLiteral("a"),
            "==",
            Operand::TextLiteral("b"),
            1,
        );
        assert_eq!(handler.warning_count(), 0);
    }

    #[test]
    fn comparison_numeric_any_operator_is_silent() {
        let handler = Handler::new();
        let analyzer = SemanticAnalyzer::new(&handler);
        let symtab = SymbolTable::new();
        analyzer.check_comparison_types(
            &symtab,
            Operand::NumberLiteral("1"),
            "<=",
            Operand::NumberLiteral("2.5"),
            1,
        );
        assert_eq!(handler.warning_count(), 0);
    }

    #[test]
    fn math_operand_text_warns() {
        let handler = Handler::new();
        let analyzer = SemanticAnalyzer::new(&handler);
        let symtab = SymbolTable::new();
        analyzer.check_math_operand_types(
            &symtab,
            Operand::TextLiteral("a"),
            "+",
            Operand::NumberLiteral("1"),
            1,
        );
        assert_eq!(handler.warning_count(), 1);
    }

    #[test]
    fn math_operand_numeric_is_silent() {
        let handler = Handler::new();
        let analyzer = SemanticAnalyzer::new(&handler);
        let symtab = SymbolTable::new();
        analyzer.check_math_operand_types(
            &symtab,
            Operand::NumberLiteral("1"),
            "+",
            Operand::NumberLiteral("2"),
            1,
        );
        assert_eq!(handler.warning_count(), 0);
    }

    #[test]
    fn unused_function_warns_except_principal() {
        let handler = Handler::new();
        let mut funtab = FunctionTable::new();
        funtab.insert("principal", 1);
        funtab.insert("__util", 2);
        let analyzer = SemanticAnalyzer::new(&handler);
        analyzer.report_unused_functions(&funtab);
        assert_eq!(handler.warning_count(), 1);
    }

    #[test]
    fn called_function_does_not_warn() {
        let handler = Handler::new();
        let mut funtab = FunctionTable::new();
        funtab.insert("principal", 1);
        funtab.insert("__util", 2);
        funtab.mark_called("__util");
        let analyzer = SemanticAnalyzer::new(&handler);
        analyzer.report_unused_functions(&funtab);
        assert_eq!(handler.warning_count(), 0);
    }

    #[test]
    fn duplicate_declaration_warning_mentions_kind() {
        let handler = Handler::new();
        let analyzer = SemanticAnalyzer::new(&handler);
        analyzer.report_duplicate_declaration(DeclKind::Variable, "!x", 3);
        analyzer.report_duplicate_declaration(DeclKind::Function, "__util", 9);
        assert_eq!(handler.warning_count(), 2);
    }
}
