//! Polygenic risk scores by individual.
//!
//! A score file is a whitespace-delimited text file with one individual per line. By default, the
//! individual ID is read from the second column and the score from the fourth, matching the
//! `[FID] [IID] [PHENO] [PRS]` layout; other layouts are supported via [`Columns`].

use std::{
    collections::HashMap,
    io::{self, BufRead},
    path::Path,
};

use crate::{input, Columns};

/// A mapping from individual IDs to polygenic risk scores.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scores(HashMap<String, f64>);

impl Scores {
    /// Returns the score of an individual, if known.
    pub fn get(&self, id: &str) -> Option<f64> {
        self.0.get(id).copied()
    }

    /// Returns `true` if no scores are known.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of individuals with known scores.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Reads scores from a path.
    ///
    /// Gzipped files are decompressed transparently.
    pub fn from_path<P>(path: P, columns: Columns) -> io::Result<(Self, Diagnostics)>
    where
        P: AsRef<Path>,
    {
        let mut reader = input::open(path)?;
        Self::read(&mut reader, columns)
    }

    /// Reads scores from a reader.
    ///
    /// Lines without the required columns, or where the score is not a number, are skipped and
    /// counted in the returned diagnostics. In particular, this skips any header line. If an
    /// individual ID occurs more than once, the last score takes precedence.
    pub fn read<R>(reader: &mut R, columns: Columns) -> io::Result<(Self, Diagnostics)>
    where
        R: BufRead,
    {
        let mut scores = HashMap::new();
        let mut diagnostics = Diagnostics::default();

        for line in reader.lines() {
            let line = line?;
            diagnostics.lines += 1;

            match parse_line(&line, columns) {
                Some((id, score)) => {
                    scores.insert(id.to_string(), score);
                }
                None => diagnostics.skipped += 1,
            }
        }

        Ok((Self(scores), diagnostics))
    }
}

fn parse_line(line: &str, columns: Columns) -> Option<(&str, f64)> {
    let fields = line.split_ascii_whitespace().collect::<Vec<_>>();

    let score = fields.get(columns.score)?.parse::<f64>().ok()?;
    let id = *fields.get(columns.id)?;

    Some((id, score))
}

impl<S> FromIterator<(S, f64)> for Scores
where
    S: ToString,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
    {
        Self(
            iter.into_iter()
                .map(|(id, score)| (id.to_string(), score))
                .collect(),
        )
    }
}

/// Diagnostics from reading a score file.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Diagnostics {
    /// Number of lines read.
    pub lines: usize,
    /// Number of lines skipped due to a missing column or a non-numeric score.
    pub skipped: usize,
}
