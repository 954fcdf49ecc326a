//! Error types that can be emitted from this library
//!
use derive_more::derive::{Constructor, Display};
use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// A root or include file could not be opened
    #[error("Unable to open {}", path.display())]
    #[diagnostic(help("include paths are resolved against the directory of the including file"))]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Two items in a row failed to match the expected token
    #[error("\"{expected}\" not found - instead found \"{found}\" in {}:line {line}", file.display())]
    Mismatch {
        file: PathBuf,
        line: usize,
        expected: String,
        found: String,
    },

    /// The file is structurally impossible to read further
    #[error("{message} in {}:line {line}", file.display())]
    Parse {
        file: PathBuf,
        line: usize,
        message: String,
    },
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;

/// A recoverable problem found in the data
#[derive(Constructor, Display, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[display("{message} in {}:line {line}", file.display())]
pub struct Warning {
    pub file: PathBuf,
    pub line: usize,
    pub message: String,
}

/// Collects warnings and forwards them to `tracing`
#[derive(Default, Debug)]
pub(crate) struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn push(&mut self, warning: Warning) {
        warn!("{warning}");
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}
