//! Predefined diagnostic codes.
//!
//! Three families, one per diagnostic kind in the error-handling design:
//! `L` for lexical errors, `P` for syntactic (parser) errors, `S` for
//! semantic alerts.

/// A stable, documentable diagnostic code, e.g. `L0001`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiagnosticCode {
    prefix: &'static str,
    number: u32,
}

impl DiagnosticCode {
    pub const fn new(prefix: &'static str, number: u32) -> Self {
        Self { prefix, number }
    }

    pub fn prefix(&self) -> &'static str {
        self.prefix
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn as_str(&self) -> String {
        format!("{}{:04}", self.prefix, self.number)
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::fmt::Debug for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DiagnosticCode({})", self.as_str())
    }
}

// Lexical errors (fatal).
pub const L_UNRECOGNIZED_CHAR: DiagnosticCode = DiagnosticCode::new("L", 1);
pub const L_MALFORMED_VAR_IDENT: DiagnosticCode = DiagnosticCode::new("L", 2);
pub const L_MALFORMED_FUNC_IDENT: DiagnosticCode = DiagnosticCode::new("L", 3);
pub const L_UNTERMINATED_STRING: DiagnosticCode = DiagnosticCode::new("L", 4);
pub const L_STRAY_AMPERSAND: DiagnosticCode = DiagnosticCode::new("L", 5);
pub const L_STRAY_PIPE: DiagnosticCode = DiagnosticCode::new("L", 6);
pub const L_STRAY_UNDERSCORE: DiagnosticCode = DiagnosticCode::new("L", 7);
pub const L_TEXT_LITERAL_TOO_LONG: DiagnosticCode = DiagnosticCode::new("L", 8);
pub const L_IDENTIFIER_TOO_LONG: DiagnosticCode = DiagnosticCode::new("L", 9);

// Syntactic errors (fatal).
pub const P_UNEXPECTED_TOKEN: DiagnosticCode = DiagnosticCode::new("P", 1);
pub const P_UNBALANCED_DELIMITER: DiagnosticCode = DiagnosticCode::new("P", 2);
pub const P_MISSING_PRINCIPAL: DiagnosticCode = DiagnosticCode::new("P", 3);
pub const P_FORBIDDEN_SEMICOLON: DiagnosticCode = DiagnosticCode::new("P", 4);
pub const P_INVALID_FACTOR: DiagnosticCode = DiagnosticCode::new("P", 5);
pub const P_MALFORMED_PARAM_LIST: DiagnosticCode = DiagnosticCode::new("P", 6);

// Semantic alerts (non-fatal).
pub const S_UNDECLARED_VARIABLE: DiagnosticCode = DiagnosticCode::new("S", 1);
pub const S_UNDECLARED_FUNCTION: DiagnosticCode = DiagnosticCode::new("S", 2);
pub const S_DUPLICATE_DECLARATION: DiagnosticCode = DiagnosticCode::new("S", 3);
pub const S_ASSIGNMENT_TYPE_MISMATCH: DiagnosticCode = DiagnosticCode::new("S", 4);
pub const S_COMPARISON_TYPE_MISMATCH: DiagnosticCode = DiagnosticCode::new("S", 5);
pub const S_TEXT_LIMITER_OVERFLOW: DiagnosticCode = DiagnosticCode::new("S", 6);
pub const S_DECIMAL_LIMITER_OVERFLOW: DiagnosticCode = DiagnosticCode::new("S", 7);
pub const S_INVALID_TEXT_OPERATOR: DiagnosticCode = DiagnosticCode::new("S", 8);
pub const S_UNUSED_FUNCTION: DiagnosticCode = DiagnosticCode::new("S", 9);
pub const S_INVALID_MATH_OPERAND: DiagnosticCode = DiagnosticCode::new("S", 10);
