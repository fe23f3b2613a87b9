//! Analysis configuration.

use crate::{Error, Mode};

/// Configuration of a pTDT run.
///
/// A configuration is created once, before any input is read, and is then passed by reference
/// to each stage of the analysis.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Config {
    mode: Mode,
    columns: Columns,
    table: bool,
}

impl Config {
    /// Returns the columns used to read the score file.
    pub fn columns(&self) -> Columns {
        self.columns
    }

    /// Returns the family mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Sets the columns used to read the score file.
    ///
    /// If unset, [`Columns::default`] will be used.
    pub fn set_columns(mut self, columns: Columns) -> Self {
        self.columns = columns;
        self
    }

    /// Sets the family mode.
    ///
    /// If unset, families are trios without siblings.
    pub fn set_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets whether the per-family table should be produced.
    pub fn set_table(mut self, table: bool) -> Self {
        self.table = table;
        self
    }

    /// Returns `true` if the per-family table should be produced.
    pub fn table(&self) -> bool {
        self.table
    }
}

/// The 0-based columns holding individual IDs and scores in a score file.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Columns {
    /// Individual ID column.
    pub id: usize,
    /// Score column.
    pub score: usize,
}

impl Columns {
    /// Creates new columns from 1-based column numbers.
    ///
    /// # Errors
    ///
    /// If either column number is zero.
    pub fn from_one_based(id: usize, score: usize) -> Result<Self, Error> {
        match (id.checked_sub(1), score.checked_sub(1)) {
            (Some(id), Some(score)) => Ok(Self { id, score }),
            _ => Err(Error::InvalidColumn {
                column: if id == 0 { "ID" } else { "PRS" },
            }),
        }
    }
}

impl Default for Columns {
    /// The columns of a `[FID] [IID] [PHENO] [PRS]` file.
    fn default() -> Self {
        Self { id: 1, score: 3 }
    }
}
