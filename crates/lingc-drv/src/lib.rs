//! lingc-drv - the command-line driver (section 10 of the design doc).
//!
//! Ties the four analysis crates together: opens the fixed/given source
//! file, runs the lexical-display pass then the syntactic/semantic pass,
//! renders the report sections, and resolves the process exit code.

mod config;
mod error;
mod report;
mod session;

pub use config::Config;
pub use error::DriverError;
pub use session::Session;
