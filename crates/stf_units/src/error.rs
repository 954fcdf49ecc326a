//! Error types that can be emitted from this library
//!
use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug, PartialEq, Eq)]
pub enum Error {
    /// A family name that does not match any quantity family
    #[error("Unknown quantity family: {0}")]
    #[diagnostic(help("expected a family name such as `mass`, `speed` or `pressure_default_psi`"))]
    UnknownFamily(String),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
