//! Diagnostic collection and rendering.
//!
//! Two severities only: `Error` for the fatal lexical/syntactic kinds and
//! `Warning` for the non-fatal semantic alerts (see the error-handling design
//! in the project spec). `Note` and `Help` exist as attachments on a
//! diagnostic, not as top-level severities of their own.

mod builder;
mod codes;

pub use builder::DiagnosticBuilder;
pub use codes::{
    DiagnosticCode, L_IDENTIFIER_TOO_LONG, L_MALFORMED_FUNC_IDENT, L_MALFORMED_VAR_IDENT,
    L_STRAY_AMPERSAND, L_STRAY_PIPE, L_STRAY_UNDERSCORE, L_TEXT_LITERAL_TOO_LONG,
    L_UNRECOGNIZED_CHAR, L_UNTERMINATED_STRING, P_FORBIDDEN_SEMICOLON, P_INVALID_FACTOR,
    P_MALFORMED_PARAM_LIST, P_MISSING_PRINCIPAL, P_UNBALANCED_DELIMITER, P_UNEXPECTED_TOKEN,
    S_ASSIGNMENT_TYPE_MISMATCH, S_COMPARISON_TYPE_MISMATCH, S_DECIMAL_LIMITER_OVERFLOW,
    S_DUPLICATE_DECLARATION, S_INVALID_MATH_OPERAND, S_INVALID_TEXT_OPERATOR,
    S_TEXT_LIMITER_OVERFLOW, S_UNDECLARED_FUNCTION, S_UNDECLARED_VARIABLE, S_UNUSED_FUNCTION,
};

pub use crate::span::Span;
use std::cell::RefCell;

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
        }
    }
}

/// A single diagnostic message, ready to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub span: Span,
    pub code: Option<DiagnosticCode>,
    pub notes: Vec<String>,
    pub helps: Vec<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
            span,
            code: None,
            notes: Vec::new(),
            helps: Vec::new(),
        }
    }

    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self {
            level: Level::Warning,
            message: message.into(),
            span,
            code: None,
            notes: Vec::new(),
            helps: Vec::new(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ({})", self.level, self.message, self.span)?;
        if let Some(code) = self.code {
            write!(f, " [{}]", code)?;
        }
        for note in &self.notes {
            write!(f, "\n  note: {}", note)?;
        }
        for help in &self.helps {
            write!(f, "\n  help: {}", help)?;
        }
        Ok(())
    }
}

/// Collects diagnostics for one compilation run and reports on them.
///
/// Diagnostics are kept in emission order (the ordering guarantee in the
/// resource model section of the spec: "diagnostic messages in the order
/// their offending tokens were consumed").
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler {
    pub fn new() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    pub fn emit_diagnostic(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.borrow().iter().any(|d| d.level == Level::Error)
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics.borrow().iter().any(|d| d.level == Level::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.borrow().iter().filter(|d| d.level == Level::Error).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.borrow().iter().filter(|d| d.level == Level::Warning).count()
    }

    /// A snapshot of everything collected so far, in emission order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    /// Prints every collected diagnostic to `out`, one per line, in
    /// emission order.
    pub fn render(&self, out: &mut impl std::io::Write) -> std::io::Result<()> {
        for diag in self.diagnostics.borrow().iter() {
            writeln!(out, "{}", diag)?;
        }
        Ok(())
    }
}
