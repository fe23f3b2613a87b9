//! Family index built from a structure file.
//!
//! A structure file is a whitespace-delimited text file with a header line, followed by one line
//! per family containing the family ID and the individual IDs of the proband, father, mother
//! and, in quad mode, sibling. The header line is always skipped, whatever its contents.

use std::{
    io::{self, BufRead},
    path::Path,
};

use indexmap::IndexMap;

use crate::{input, Error, Family, Mode};

/// An ordered mapping from family IDs to member individual IDs.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Index(IndexMap<String, Vec<String>>);

impl Index {
    /// Returns the member individual IDs of a family, if it exists in the index.
    pub fn get(&self, id: &str) -> Option<&[String]> {
        self.0.get(id).map(Vec::as_slice)
    }

    /// Returns a family by ID, if it exists in the index.
    pub fn get_family(&self, id: &str) -> Option<Family> {
        self.get(id).map(|members| Family::new(id, members.to_vec()))
    }

    /// Returns an iterator over the families in the index, in structure file order.
    pub fn into_families(self) -> impl Iterator<Item = Family> {
        self.0
            .into_iter()
            .map(|(id, members)| Family::new(id, members))
    }

    /// Returns `true` if the index contains no families.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of families in the index.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Reads an index from a structure file path.
    ///
    /// Gzipped files are decompressed transparently.
    pub fn from_path<P>(path: P, mode: Mode) -> Result<(Self, Diagnostics), Error>
    where
        P: AsRef<Path>,
    {
        let mut reader = input::open(path)?;
        Self::read(&mut reader, mode)
    }

    /// Reads an index from a structure file reader.
    ///
    /// Members beyond those required by the mode are ignored, and rows with fewer members are
    /// kept with the trailing members absent. If a family ID occurs more than once, the last
    /// row takes precedence.
    ///
    /// # Errors
    ///
    /// If reading fails, or if quad mode is requested and the first family row does not have a
    /// sibling column. Only the first row is checked.
    pub fn read<R>(reader: &mut R, mode: Mode) -> Result<(Self, Diagnostics), Error>
    where
        R: BufRead,
    {
        let mut index = IndexMap::new();
        let mut diagnostics = Diagnostics::default();

        let mut lines = reader.lines();
        if let Some(header) = lines.next() {
            header?;
        }

        for line in lines {
            let line = line?;
            let mut fields = line.split_ascii_whitespace();

            let Some(id) = fields.next() else {
                continue;
            };

            let members = fields
                .take(mode.members())
                .map(String::from)
                .collect::<Vec<_>>();

            if diagnostics.lines == 0 && mode.has_sibling() && members.len() < mode.members() {
                return Err(Error::MissingSiblingColumn);
            }

            index.insert(id.to_string(), members);
            diagnostics.lines += 1;
        }

        Ok((Self(index), diagnostics))
    }
}

/// Diagnostics from reading a structure file.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Diagnostics {
    /// Number of family rows read, excluding the header.
    pub lines: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::Role;

    fn read(s: &str, mode: Mode) -> Result<(Index, Diagnostics), Error> {
        Index::read(&mut s.as_bytes(), mode)
    }

    #[test]
    fn test_read_trio() {
        let (index, diagnostics) = read(
            "FID PRO DAD MOM\nf1 p1 d1 m1\nf2\tp2\td2\tm2\n",
            Mode::Trio,
        )
        .unwrap();

        assert_eq!(diagnostics.lines, 2);
        assert_eq!(index.len(), 2);
        assert_eq!(
            index.get("f2"),
            Some(&["p2".to_string(), "d2".to_string(), "m2".to_string()][..])
        );
        assert_eq!(
            index.into_families().map(|f| f.id().to_string()).collect::<Vec<_>>(),
            vec!["f1", "f2"]
        );
    }

    #[test]
    fn test_read_skips_header_unconditionally() {
        let (index, _) = read("f0 p0 d0 m0\nf1 p1 d1 m1\n", Mode::Trio).unwrap();

        assert!(index.get("f0").is_none());
        assert!(index.get("f1").is_some());
    }

    #[test]
    fn test_read_trio_truncates_sibling() {
        let (index, _) = read("header\nf1 p1 d1 m1 s1\n", Mode::Trio).unwrap();

        assert_eq!(index.get_family("f1").unwrap().member(Role::Sibling), None);
    }

    #[test]
    fn test_read_quad() {
        let (index, _) = read("header\nf1 p1 d1 m1 s1\n", Mode::Quad).unwrap();

        assert_eq!(
            index.get_family("f1").unwrap().member(Role::Sibling),
            Some("s1")
        );
    }

    #[test]
    fn test_read_quad_without_sibling_column() {
        let result = read("FID PRO DAD MOM\nf1 p1 d1 m1\n", Mode::Quad);

        assert!(matches!(result, Err(Error::MissingSiblingColumn)));
    }

    #[test]
    fn test_read_quad_checks_first_row_only() {
        let (index, diagnostics) =
            read("header\nf1 p1 d1 m1 s1\nf2 p2 d2 m2\n", Mode::Quad).unwrap();

        assert_eq!(diagnostics.lines, 2);
        assert_eq!(index.get_family("f2").unwrap().member(Role::Sibling), None);
    }

    #[test]
    fn test_read_skips_blank_lines() {
        let (index, diagnostics) = read("header\n\nf1 p1 d1 m1\n   \n", Mode::Trio).unwrap();

        assert_eq!(diagnostics.lines, 1);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_read_duplicate_family_replaces() {
        let (index, diagnostics) =
            read("header\nf1 p1 d1 m1\nf2 p2 d2 m2\nf1 p3 d3 m3\n", Mode::Trio).unwrap();

        assert_eq!(diagnostics.lines, 3);
        assert_eq!(index.len(), 2);
        assert_eq!(
            index.get_family("f1").unwrap().member(Role::Proband),
            Some("p3")
        );
    }

    #[test]
    fn test_read_empty() {
        let (index, diagnostics) = read("", Mode::Quad).unwrap();

        assert!(index.is_empty());
        assert_eq!(diagnostics.lines, 0);
    }
}
