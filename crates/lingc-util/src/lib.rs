//! lingc-util - shared foundations for the lingc compiler front end.
//!
//! Holds the pieces every other crate in the workspace needs: the source
//! reader (component A), the declaration data model (component C's tables
//! plus the type/limiter vocabulary from the data model), the delimiter
//! balance stack, and the diagnostic subsystem used to report lexical,
//! syntactic, and semantic issues alike.

pub mod balance;
pub mod diagnostic;
pub mod error;
pub mod funtab;
pub mod reader;
pub mod span;
pub mod symtab;
pub mod types;

pub use balance::{BalanceItem, BalanceStack, Delimiter};
pub use diagnostic::{Diagnostic, DiagnosticBuilder, DiagnosticCode, Handler, Level};
pub use error::SourceError;
pub use funtab::{FunctionEntry, FunctionTable};
pub use reader::Reader;
pub use span::Span;
pub use symtab::{SymbolEntry, SymbolTable};
pub use types::{DataType, SizeLimiter};
