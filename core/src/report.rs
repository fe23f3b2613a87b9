//! Writing analysis results.

use std::{fmt, io};

use crate::{Analysis, Summary};

/// A number formatted in scientific notation with three decimals.
///
/// The exponent is signed and has at least two digits, e.g. `7.071E-01`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scientific(pub f64);

impl fmt::Display for Scientific {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = self.0;

        if x.is_nan() {
            return f.write_str("NAN");
        } else if x.is_infinite() {
            return f.write_str(if x > 0.0 { "INF" } else { "-INF" });
        }

        let formatted = format!("{x:.3E}");
        match formatted.split_once('E') {
            Some((mantissa, exponent)) => {
                let exponent = exponent.parse::<i32>().map_err(|_| fmt::Error)?;
                let sign = if exponent < 0 { '-' } else { '+' };

                write!(f, "{mantissa}E{sign}{:02}", exponent.abs())
            }
            None => f.write_str(&formatted),
        }
    }
}

fn write_summary<W>(writer: &mut W, title: &str, summary: &Summary) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(writer, "{title}")?;
    writeln!(writer, "pTDT mean: {} SD", Scientific(summary.mean()))?;
    writeln!(writer, "pTDT SE: {} SD", Scientific(summary.se()))?;
    writeln!(writer, "pTDT pvalue: {}", Scientific(summary.p_value()))
}

/// Writes the proband and, if available, sibling results of an analysis.
pub fn write_results<W>(writer: &mut W, analysis: &Analysis) -> io::Result<()>
where
    W: io::Write,
{
    write_summary(writer, "Proband analysis", analysis.proband())?;

    if let Some(sibling) = analysis.sibling() {
        writeln!(writer)?;
        write_summary(writer, "Sibling analysis", sibling)?;
    }

    Ok(())
}
