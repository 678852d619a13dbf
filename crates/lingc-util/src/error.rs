//! Errors that can escape the compiler's own control, as opposed to the
//! diagnostics (lexical/syntactic/semantic) that are expected, routine
//! outcomes of compiling a given source file.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("could not read source file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
