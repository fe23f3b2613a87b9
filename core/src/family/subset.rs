//! Restricting the analysis to a subset of families.

use std::{
    io::{self, BufRead},
    path::Path,
};

use crate::{input, Family, Index};

/// An ordered list of family IDs to analyse.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Subset(Vec<String>);

impl Subset {
    /// Selects the families in the subset from an index.
    ///
    /// Families are returned in subset order. Family IDs not found in the index are skipped and
    /// recorded in the returned diagnostics.
    pub fn filter(&self, index: &Index) -> (Vec<Family>, Diagnostics) {
        let mut families = Vec::with_capacity(self.0.len());
        let mut missing = Vec::new();

        for id in self.0.iter() {
            match index.get_family(id) {
                Some(family) => families.push(family),
                None => missing.push(id.clone()),
            }
        }

        let diagnostics = Diagnostics {
            requested: self.0.len(),
            missing,
        };

        (families, diagnostics)
    }

    /// Returns the family IDs in the subset.
    pub fn ids(&self) -> &[String] {
        &self.0
    }

    /// Reads a subset from a path.
    ///
    /// Gzipped files are decompressed transparently.
    pub fn from_path<P>(path: P) -> io::Result<Self>
    where
        P: AsRef<Path>,
    {
        let mut reader = input::open(path)?;
        Self::read(&mut reader)
    }

    /// Reads a subset from a reader.
    ///
    /// The first whitespace-delimited token on each line is taken as a family ID, and blank lines
    /// are ignored. A header is not required; if present, it will simply not match any family.
    pub fn read<R>(reader: &mut R) -> io::Result<Self>
    where
        R: BufRead,
    {
        let mut ids = Vec::new();

        for line in reader.lines() {
            if let Some(id) = line?.split_ascii_whitespace().next() {
                ids.push(id.to_string());
            }
        }

        Ok(Self(ids))
    }
}

impl<S> FromIterator<S> for Subset
where
    S: ToString,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        Self(iter.into_iter().map(|s| s.to_string()).collect())
    }
}

/// Diagnostics from filtering an index by a subset.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Diagnostics {
    /// Number of family IDs in the subset.
    pub requested: usize,
    /// Family IDs in the subset that were not found in the index, in subset order.
    pub missing: Vec<String>,
}

impl Diagnostics {
    /// Returns the number of structure file families excluded from the analysis.
    ///
    /// The structure file is assumed to have had the provided number of families.
    pub fn excluded(&self, structure_families: usize) -> usize {
        (structure_families + self.missing.len()).saturating_sub(self.requested)
    }

    /// Returns the number of subset families found in the index.
    pub fn loaded(&self) -> usize {
        self.requested - self.missing.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::Mode;

    fn index() -> Index {
        let structure = "FID PRO DAD MOM\nf1 p1 d1 m1\nf2 p2 d2 m2\nf3 p3 d3 m3\nf4 p4 d4 m4\n";
        Index::read(&mut structure.as_bytes(), Mode::Trio).unwrap().0
    }

    #[test]
    fn test_read() {
        let subset = Subset::read(&mut "f1\n\nf3 extra\n  f2\n".as_bytes()).unwrap();

        assert_eq!(subset.ids(), &["f1", "f3", "f2"]);
    }

    #[test]
    fn test_filter_preserves_subset_order() {
        let subset = Subset::from_iter(["f3", "f1"]);

        let (families, diagnostics) = subset.filter(&index());

        assert_eq!(
            families.iter().map(Family::id).collect::<Vec<_>>(),
            vec!["f3", "f1"]
        );
        assert_eq!(diagnostics.loaded(), 2);
        assert_eq!(diagnostics.excluded(4), 2);
        assert!(diagnostics.missing.is_empty());
    }

    #[test]
    fn test_filter_missing() {
        let subset = Subset::from_iter(["f2", "f9", "f1"]);

        let (families, diagnostics) = subset.filter(&index());

        assert_eq!(families.len(), 2);
        assert_eq!(diagnostics.missing, vec!["f9"]);
        assert_eq!(diagnostics.requested, 3);
        assert_eq!(diagnostics.loaded(), 2);
        assert_eq!(diagnostics.excluded(4), 2);
    }

    #[test]
    fn test_filter_header_is_missing() {
        let subset = Subset::read(&mut "FID\nf1\n".as_bytes()).unwrap();

        let (families, diagnostics) = subset.filter(&index());

        assert_eq!(families.len(), 1);
        assert_eq!(diagnostics.missing, vec!["FID"]);
    }
}
