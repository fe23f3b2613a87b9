//! Joining families with scores.

use crate::{Family, Mode, Role, Scores};

/// The scores of the members of a single family.
///
/// A score is `None` if the member is absent from the family, has no score, or has a score that
/// is not a number.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    family: String,
    proband: Option<f64>,
    father: Option<f64>,
    mother: Option<f64>,
    sibling: Option<f64>,
}

impl Row {
    /// Returns the family ID.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Returns the mid-parent score, if both parents have a score.
    pub fn mid_parent(&self) -> Option<f64> {
        Some((self.father? + self.mother?) / 2.0)
    }

    /// Creates a new row.
    pub fn new<S>(family: S, scores: [Option<f64>; 4]) -> Self
    where
        S: ToString,
    {
        let [proband, father, mother, sibling] = scores;

        Self {
            family: family.to_string(),
            proband,
            father,
            mother,
            sibling,
        }
    }

    /// Returns the score of the family member with the provided role.
    pub fn score(&self, role: Role) -> Option<f64> {
        match role {
            Role::Proband => self.proband,
            Role::Father => self.father,
            Role::Mother => self.mother,
            Role::Sibling => self.sibling,
        }
    }
}

/// Family member scores, with one row per family.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    mode: Mode,
    rows: Vec<Row>,
}

impl Matrix {
    /// Returns `true` if the matrix has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Joins families with scores.
    ///
    /// Rows are in the same order as the provided families. Only the members required by the
    /// mode are looked up, so that siblings are never scored in trio mode.
    pub fn join(families: &[Family], scores: &Scores, mode: Mode) -> Self {
        let rows = families
            .iter()
            .map(|family| {
                let mut row = [None; 4];

                for (score, &role) in row.iter_mut().zip(mode.roles()) {
                    *score = family
                        .member(role)
                        .and_then(|id| scores.get(id))
                        .filter(|score| !score.is_nan());
                }

                Row::new(family.id(), row)
            })
            .collect();

        Self { mode, rows }
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns the mode used to join the matrix.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Creates a new matrix from rows.
    pub fn new(mode: Mode, rows: Vec<Row>) -> Self {
        Self { mode, rows }
    }

    /// Returns the rows of the matrix.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the number of family members without a score.
    pub fn unscored(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| self.mode.roles().iter().map(|&role| row.score(role)))
            .filter(Option::is_none)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family(id: &str, members: &[&str]) -> Family {
        Family::new(id, members.iter().map(|s| s.to_string()).collect())
    }

    fn scores() -> Scores {
        Scores::from_iter([
            ("p1", 1.0),
            ("d1", 0.5),
            ("m1", 1.5),
            ("s1", -1.0),
            ("p2", 2.0),
            ("m2", 0.0),
            ("d3", f64::NAN),
            ("m3", 1.0),
        ])
    }

    #[test]
    fn test_join_fully_scored() {
        let families = [family("f1", &["p1", "d1", "m1", "s1"])];

        let matrix = Matrix::join(&families, &scores(), Mode::Quad);

        assert_eq!(
            matrix.rows(),
            &[Row::new("f1", [Some(1.0), Some(0.5), Some(1.5), Some(-1.0)])]
        );
        assert_eq!(matrix.unscored(), 0);
    }

    #[test]
    fn test_join_missing_scores() {
        let families = [
            family("f2", &["p2", "d2", "m2"]),
            family("f3", &["p3", "d3", "m3"]),
        ];

        let matrix = Matrix::join(&families, &scores(), Mode::Trio);

        assert_eq!(
            matrix.rows(),
            &[
                Row::new("f2", [Some(2.0), None, Some(0.0), None]),
                Row::new("f3", [None, None, Some(1.0), None]),
            ]
        );
        assert_eq!(matrix.unscored(), 3);
    }

    #[test]
    fn test_join_trio_ignores_sibling() {
        let families = [family("f1", &["p1", "d1", "m1", "s1"])];

        let matrix = Matrix::join(&families, &scores(), Mode::Trio);

        assert_eq!(matrix.rows()[0].score(Role::Sibling), None);
    }

    #[test]
    fn test_join_ragged_family() {
        let families = [family("f1", &["p1", "d1", "m1"])];

        let matrix = Matrix::join(&families, &scores(), Mode::Quad);

        assert_eq!(matrix.rows()[0].score(Role::Sibling), None);
        assert_eq!(matrix.unscored(), 1);
    }

    #[test]
    fn test_join_preserves_numeric_family_id() {
        let families = [family("007", &["p1", "d1", "m1"])];

        let matrix = Matrix::join(&families, &scores(), Mode::Trio);

        assert_eq!(matrix.rows()[0].family(), "007");
    }

    #[test]
    fn test_mid_parent() {
        assert_eq!(
            Row::new("f1", [None, Some(0.5), Some(1.5), None]).mid_parent(),
            Some(1.0)
        );
        assert_eq!(
            Row::new("f1", [Some(1.0), None, Some(1.5), None]).mid_parent(),
            None
        );
    }
}
