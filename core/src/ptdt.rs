//! The polygenic transmission disequilibrium test.
//!
//! Under the null hypothesis, the PRS of an offspring is on average equal to the mean of its
//! parents' PRS, the mid-parent score. The pTDT deviation of an offspring is the difference
//! between its score and the mid-parent score, in units of the standard deviation of mid-parent
//! scores across all families. A one-sample t-test is then used to test whether the mean
//! deviation across families differs from zero.

use crate::{
    matrix::Row,
    stat::{self, TTest},
    Error, Matrix, Mode, Role,
};

/// Minimum correlation between offspring and mid-parent scores required to pass QC.
pub const QC_THRESHOLD: f64 = 0.2;

/// The score and pTDT deviation of an offspring.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Offspring {
    /// Offspring score.
    pub score: Option<f64>,
    /// pTDT deviation, missing if either the offspring or mid-parent score is missing.
    pub deviation: Option<f64>,
}

/// The pTDT values of a single family.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    id: String,
    father: Option<f64>,
    mother: Option<f64>,
    mid_parent: Option<f64>,
    proband: Offspring,
    sibling: Offspring,
}

impl Record {
    fn from_row(row: &Row, sd: f64) -> Self {
        let mid_parent = row.mid_parent();

        let offspring = |role| {
            let score = row.score(role);
            let deviation = score
                .zip(mid_parent)
                .map(|(score, mid_parent)| (score - mid_parent) / sd)
                .filter(|deviation| !deviation.is_nan());

            Offspring { score, deviation }
        };

        Self {
            id: row.family().to_string(),
            father: row.score(Role::Father),
            mother: row.score(Role::Mother),
            mid_parent,
            proband: offspring(Role::Proband),
            sibling: offspring(Role::Sibling),
        }
    }

    /// Returns the father's score.
    pub fn father(&self) -> Option<f64> {
        self.father
    }

    /// Returns the family ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the mid-parent score.
    pub fn mid_parent(&self) -> Option<f64> {
        self.mid_parent
    }

    /// Returns the mother's score.
    pub fn mother(&self) -> Option<f64> {
        self.mother
    }

    /// Returns the offspring with the provided role, which must be an offspring role.
    pub(crate) fn offspring(&self, role: Role) -> &Offspring {
        match role {
            Role::Proband => &self.proband,
            Role::Sibling => &self.sibling,
            Role::Father | Role::Mother => panic!("{role} is not an offspring"),
        }
    }

    /// Returns the proband.
    pub fn proband(&self) -> &Offspring {
        &self.proband
    }

    /// Returns the sibling.
    ///
    /// In trio mode, the sibling score and deviation are always missing.
    pub fn sibling(&self) -> &Offspring {
        &self.sibling
    }
}

/// The pTDT values of all families.
#[derive(Clone, Debug, PartialEq)]
pub struct Deviations {
    mode: Mode,
    mid_parent_sd: f64,
    families: Vec<Record>,
}

impl Deviations {
    /// Returns an iterator over the deviations of offspring with the provided role.
    pub fn deviations(&self, role: Role) -> impl Iterator<Item = Option<f64>> + '_ {
        self.families
            .iter()
            .map(move |family| family.offspring(role).deviation)
    }

    /// Returns the families, in matrix order.
    pub fn families(&self) -> &[Record] {
        &self.families
    }

    /// Calculates deviations from a matrix of family scores.
    ///
    /// The mid-parent standard deviation is estimated from all families with both parents scored,
    /// regardless of whether their offspring are scored.
    pub fn from_matrix(matrix: &Matrix) -> Self {
        let mid_parents = matrix
            .rows()
            .iter()
            .filter_map(Row::mid_parent)
            .collect::<Vec<_>>();
        let mid_parent_sd = stat::std_dev(&mid_parents);

        let families = matrix
            .rows()
            .iter()
            .map(|row| Record::from_row(row, mid_parent_sd))
            .collect();

        Self {
            mode: matrix.mode(),
            mid_parent_sd,
            families,
        }
    }

    /// Returns the standard deviation of mid-parent scores.
    pub fn mid_parent_sd(&self) -> f64 {
        self.mid_parent_sd
    }

    /// Returns the mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    fn correlation(&self, role: Role) -> f64 {
        let (offspring, mid_parents): (Vec<_>, Vec<_>) = self
            .families
            .iter()
            .filter_map(|family| family.offspring(role).score.zip(family.mid_parent))
            .unzip();

        stat::pearson(&offspring, &mid_parents)
    }
}

/// Quality control of family structure and score alignment.
///
/// Offspring scores are expected to correlate with mid-parent scores. A low correlation suggests
/// that family members or scores have been mixed up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Qc {
    /// Correlation between proband and mid-parent scores.
    pub proband: f64,
    /// Correlation between sibling and mid-parent scores, in quad mode.
    pub sibling: Option<f64>,
}

impl Qc {
    /// Calculates QC correlations from deviations.
    pub fn from_deviations(deviations: &Deviations) -> Self {
        Self {
            proband: deviations.correlation(Role::Proband),
            sibling: deviations
                .mode
                .has_sibling()
                .then(|| deviations.correlation(Role::Sibling)),
        }
    }

    /// Returns `true` if all correlations are at least [`QC_THRESHOLD`].
    ///
    /// Undefined correlations do not pass.
    pub fn passed(&self) -> bool {
        self.proband >= QC_THRESHOLD && self.sibling.unwrap_or(1.0) >= QC_THRESHOLD
    }
}

/// Summary of the pTDT deviations of a set of offspring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    used: usize,
    skipped: usize,
    test: TTest,
}

impl Summary {
    /// Summarises deviations, skipping missing values.
    pub fn from_deviations<I>(deviations: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let mut skipped = 0;
        let values = deviations
            .into_iter()
            .filter_map(|deviation| {
                if deviation.is_none() {
                    skipped += 1;
                }
                deviation
            })
            .collect::<Vec<_>>();

        Self {
            used: values.len(),
            skipped,
            test: TTest::one_sample(&values, 0.0),
        }
    }

    /// Returns the mean deviation.
    pub fn mean(&self) -> f64 {
        self.test.mean
    }

    /// Returns the p-value of the mean deviation being different from zero.
    pub fn p_value(&self) -> f64 {
        self.test.p_value
    }

    /// Returns the standard error of the mean deviation.
    pub fn se(&self) -> f64 {
        self.test.se
    }

    /// Returns the number of offspring skipped due to a missing deviation.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Returns the number of offspring used.
    pub fn used(&self) -> usize {
        self.used
    }
}

/// A complete pTDT analysis.
#[derive(Clone, Debug, PartialEq)]
pub struct Analysis {
    deviations: Deviations,
    qc: Qc,
    proband: Summary,
    sibling: Option<Summary>,
}

impl Analysis {
    /// Returns the deviations.
    pub fn deviations(&self) -> &Deviations {
        &self.deviations
    }

    /// Returns the proband summary.
    pub fn proband(&self) -> &Summary {
        &self.proband
    }

    /// Returns the QC correlations.
    pub fn qc(&self) -> &Qc {
        &self.qc
    }

    /// Summarises deviations with their QC correlations.
    ///
    /// QC failure does not stop the analysis; check [`Qc::passed`].
    ///
    /// # Errors
    ///
    /// If no proband has a usable deviation. An all-missing sibling column is not an error.
    pub fn new(deviations: Deviations, qc: Qc) -> Result<Self, Error> {
        let proband = Summary::from_deviations(deviations.deviations(Role::Proband));
        if proband.used() == 0 {
            return Err(Error::NoUsableProbands);
        }

        let sibling = deviations
            .mode()
            .has_sibling()
            .then(|| Summary::from_deviations(deviations.deviations(Role::Sibling)));

        Ok(Self {
            deviations,
            qc,
            proband,
            sibling,
        })
    }

    /// Runs the analysis on a matrix of family scores.
    ///
    /// # Errors
    ///
    /// See [`Analysis::new`].
    pub fn run(matrix: &Matrix) -> Result<Self, Error> {
        let deviations = Deviations::from_matrix(matrix);
        let qc = Qc::from_deviations(&deviations);

        Self::new(deviations, qc)
    }

    /// Returns the sibling summary, in quad mode.
    pub fn sibling(&self) -> Option<&Summary> {
        self.sibling.as_ref()
    }
}
