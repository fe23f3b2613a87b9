//! Writing per-family pTDT tables.
//!
//! The table is tab-delimited with a header line, and has one row per family with the family ID,
//! the scores of all members, the mid-parent score and the offspring deviations. Numbers are
//! rounded to four decimals, and missing values are written as `NA`.

use std::{fmt, io};

use crate::{ptdt::Record, Deviations, Role};

/// Token written for missing values.
pub const MISSING: &str = "NA";

const PRECISION: i32 = 4;

/// A table column.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Column {
    Family,
    Score(Role),
    MidParent,
    Deviation(Role),
}

impl Column {
    fn columns(deviations: &Deviations) -> Vec<Self> {
        let mut columns = vec![Column::Family, Column::Score(Role::Proband)];

        if deviations.mode().has_sibling() {
            columns.push(Column::Score(Role::Sibling));
        }

        columns.extend([
            Column::Score(Role::Father),
            Column::Score(Role::Mother),
            Column::MidParent,
            Column::Deviation(Role::Proband),
        ]);

        if deviations.mode().has_sibling() {
            columns.push(Column::Deviation(Role::Sibling));
        }

        columns
    }

    fn header_name(&self) -> &'static str {
        match self {
            Column::Family => "FID",
            Column::Score(Role::Proband) => "pro_PRS",
            Column::Score(Role::Sibling) => "sib_PRS",
            Column::Score(Role::Father) => "dad_PRS",
            Column::Score(Role::Mother) => "mom_PRS",
            Column::MidParent => "mp_PRS",
            Column::Deviation(Role::Sibling) => "sib_pTDT",
            Column::Deviation(_) => "pro_pTDT",
        }
    }

    fn value(&self, record: &Record) -> Option<f64> {
        match self {
            Column::Family => None,
            Column::Score(Role::Father) => record.father(),
            Column::Score(Role::Mother) => record.mother(),
            Column::Score(role) => record.offspring(*role).score,
            Column::MidParent => record.mid_parent(),
            Column::Deviation(role) => record.offspring(*role).deviation,
        }
    }
}

/// A value rounded to four decimals.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Rounded(Option<f64>);

impl fmt::Display for Rounded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(x) if x.is_nan() => f.write_str(MISSING),
            Some(x) => {
                let scale = 10f64.powi(PRECISION);
                let rounded = round_ties_even(x * scale) / scale;

                if rounded.is_finite() && rounded.fract() == 0.0 {
                    write!(f, "{rounded:.1}")
                } else {
                    write!(f, "{rounded}")
                }
            }
            None => f.write_str(MISSING),
        }
    }
}

/// Rounds to the nearest integer, with ties rounded to the even integer.
fn round_ties_even(x: f64) -> f64 {
    if (x - x.trunc()).abs() == 0.5 {
        2.0 * (x / 2.0).round()
    } else {
        x.round()
    }
}

/// Writes a per-family table of deviations.
pub fn write_table<W>(writer: &mut W, deviations: &Deviations) -> io::Result<()>
where
    W: io::Write,
{
    let columns = Column::columns(deviations);

    let header = columns
        .iter()
        .map(Column::header_name)
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(writer, "{header}")?;

    for record in deviations.families() {
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                write!(writer, "\t")?;
            }

            match column {
                Column::Family => write!(writer, "{}", record.id())?,
                column => write!(writer, "{}", Rounded(column.value(record)))?,
            }
        }
        writeln!(writer)?;
    }

    Ok(())
}
