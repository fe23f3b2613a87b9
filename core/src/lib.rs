#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Polygenic transmission disequilibrium test (pTDT).
//!
//! This serves as the core library implementation for the `ptdt` CLI, but can also be used as a
//! free-standing library for running the pTDT on family PRS data.
//!
//! # Overview
//!
//! The analysis is a short pipeline. A family [`Index`] is read from a structure file, and may be
//! restricted to a [`Subset`] of families. Individual polygenic risk scores are read into a
//! [`Scores`] table, and the two are joined into a [`Matrix`] with one row per family. Finally,
//! an [`Analysis`] computes the deviation of each offspring score from the mid-parent score in
//! units of the mid-parent standard deviation, and tests whether the mean deviation differs from
//! zero.
//!
//! # Example
//!
//! ```
//! use ptdt_core::{Analysis, Columns, Config, Index, Matrix, Scores};
//!
//! let config = Config::default();
//!
//! let structure = "FID PRO DAD MOM\nf1 p1 d1 m1\nf2 p2 d2 m2\nf3 p3 d3 m3\n";
//! let (index, _) = Index::read(&mut structure.as_bytes(), config.mode())?;
//!
//! let prs = "\
//!     f1 p1 1 2.0\nf1 d1 1 0.5\nf1 m1 1 1.5\n\
//!     f2 p2 1 4.0\nf2 d2 1 2.0\nf2 m2 1 4.0\n\
//!     f3 p3 1 2.5\nf3 d3 1 1.0\nf3 m3 1 3.0\n";
//! let (scores, _) = Scores::read(&mut prs.as_bytes(), Columns::default())?;
//!
//! let families = index.into_families().collect::<Vec<_>>();
//! let matrix = Matrix::join(&families, &scores, config.mode());
//!
//! let analysis = Analysis::run(&matrix)?;
//! assert_eq!(analysis.proband().used(), 3);
//! assert!(analysis.proband().mean() > 0.0);
//! # Ok::<(), ptdt_core::Error>(())
//! ```

#[cfg(test)]
#[macro_use]
pub(crate) mod approx;

pub mod config;
pub use config::{Columns, Config};

pub mod error;
pub use error::Error;

pub mod family;
pub use family::{Family, Index, Mode, Role, Subset};

pub mod input;

pub mod matrix;
pub use matrix::Matrix;

pub mod ptdt;
pub use ptdt::{Analysis, Deviations, Qc, Summary};

pub mod report;

pub mod score;
pub use score::Scores;

pub mod stat;

pub mod table;
