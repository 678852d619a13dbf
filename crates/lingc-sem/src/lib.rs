//! lingc-sem - the semantic analyzer (component E).
//!
//! Depends only on `lingc-util`: it never looks at raw source or at the
//! parser's own productions, only at the names, kinds, and lines the
//! parser hands it inline as it recognizes each syntactic construct. There
//! is no separate AST or later analysis pass in this design (section 10.1
//! of the design doc) — `lingc-par` depends on this crate, not the other
//! way around.

mod analyzer;
mod operand;

pub use analyzer::{DeclKind, SemanticAnalyzer};
pub use operand::Operand;
