//! The one error this crate can fail with: reading the source file. Every
//! lexical, syntactic, or semantic problem is a [`lingc_util::Diagnostic`],
//! not a `DriverError` — those are routine, anticipated outcomes of running
//! the front end on arbitrary input, not failures of the driver itself.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Source(#[from] lingc_util::SourceError),
}
