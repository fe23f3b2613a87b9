//! Errors raised by the analysis.

use std::{fmt, io};

/// An error associated with running the pTDT.
#[derive(Debug)]
pub enum Error {
    /// A 1-based column number was zero.
    InvalidColumn {
        /// The name of the column.
        column: &'static str,
    },
    /// I/O error.
    Io(io::Error),
    /// Quad mode was requested, but the structure file has no sibling column.
    MissingSiblingColumn,
    /// No proband had a usable deviation.
    ///
    /// This usually means that the columns of the score file were specified incorrectly, so
    /// that no individual could be matched with a score.
    NoUsableProbands,
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidColumn { column } => {
                write!(f, "{column} column number must be at least 1")
            }
            Error::Io(e) => write!(f, "{e}"),
            Error::MissingSiblingColumn => {
                f.write_str("quad mode invoked without full family structure")
            }
            Error::NoUsableProbands => f.write_str(
                "no probands usable in pTDT analysis, column order in PRS file is likely incorrect",
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}
