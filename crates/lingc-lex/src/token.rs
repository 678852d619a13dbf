//! [`Token`] and [`TokenKind`].

/// The classifying tag of a token. Partitioned into the six families the
/// data model names: reserved words, type keywords, identifiers, literals,
/// operators, and punctuation, plus `Eof` and `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Reserved words.
    Principal,
    Funcao,
    Retorno,
    Leia,
    Escreva,
    Se,
    Senao,
    Para,

    // Type keywords.
    Inteiro,
    Texto,
    Decimal,

    // Identifiers.
    VarIdent,
    FuncIdent,

    // Literals.
    NumberLiteral,
    TextLiteral,

    // Arithmetic operators.
    Plus,
    Minus,
    Star,
    Slash,
    Caret,

    // Relational operators.
    Eq,
    Neq,
    Lt,
    Leq,
    Gt,
    Geq,

    // Logical operators.
    And,
    Or,

    // Assignment.
    Assign,

    // Increment/decrement, used in `for` steps.
    Increment,
    Decrement,

    // Punctuation.
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semicolon,
    Comma,
    Dot,

    Eof,
    Error,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// `{ kind, lexeme, line }` — the exact source substring and the 1-based
/// line it began on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: u32,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: u32) -> Self {
        Self { kind, lexeme: lexeme.into(), line }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    pub fn is_error(&self) -> bool {
        self.kind == TokenKind::Error
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:<12} | {}", format!("{}", self.kind), self.lexeme)
    }
}
