use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Error};

use ptdt_core::{
    report, table, Analysis, Config, Deviations, Family, Index, Matrix, Qc, Scores, Subset,
};

/// Runs the pTDT pipeline and writes the outputs.
#[derive(Debug)]
pub struct Runner {
    pub config: Config,
    pub prs: PathBuf,
    pub structure: PathBuf,
    pub subset: Option<PathBuf>,
    pub out: String,
}

impl Runner {
    pub fn run(self) -> Result<(), Error> {
        let families = self.read_families()?;

        let (scores, diagnostics) = Scores::from_path(&self.prs, self.config.columns())
            .with_context(|| {
                format!("Failed to read PRS file '{}'", self.prs.display())
            })?;
        log::info!(
            "{} individuals loaded from PRS file ({} lines skipped).",
            scores.len(),
            diagnostics.skipped
        );

        log::info!("Creating pTDT matrix.");
        let matrix = Matrix::join(&families, &scores, self.config.mode());
        log::debug!("{} family members without PRS.", matrix.unscored());

        let deviations = Deviations::from_matrix(&matrix);
        let qc = Qc::from_deviations(&deviations);
        log_qc(&deviations, &qc);

        let analysis = match Analysis::new(deviations, qc) {
            Ok(analysis) => analysis,
            Err(e) => {
                log::info!(
                    "0 probands used in pTDT analysis ({} skipped due to missingness).",
                    matrix.len()
                );
                return Err(e.into());
            }
        };

        log_counts(&analysis);
        self.write_outputs(&analysis)
    }

    fn output_path(&self, extension: &str) -> PathBuf {
        PathBuf::from(format!("{}.{extension}", self.out))
    }

    fn read_families(&self) -> Result<Vec<Family>, Error> {
        let (index, diagnostics) = Index::from_path(&self.structure, self.config.mode())
            .with_context(|| {
                format!(
                    "Failed to read structure file '{}'",
                    self.structure.display()
                )
            })?;
        log::info!(
            "{} families loaded from structure file.",
            diagnostics.lines
        );

        let Some(path) = &self.subset else {
            return Ok(index.into_families().collect());
        };

        let subset = Subset::from_path(path)
            .with_context(|| format!("Failed to read subset file '{}'", path.display()))?;
        let (families, subset_diagnostics) = subset.filter(&index);

        log::info!(
            "{} families loaded from subset file ({} families excluded from analysis).",
            subset_diagnostics.loaded(),
            subset_diagnostics.excluded(diagnostics.lines)
        );

        if !subset_diagnostics.missing.is_empty() {
            log::warn!(
                "{} families not found in structure file.",
                subset_diagnostics.missing.len()
            );

            let path = self.output_path("missing");
            write_to_path(&path, |writer| {
                subset_diagnostics
                    .missing
                    .iter()
                    .try_for_each(|id| writeln!(writer, "{id}"))
            })?;
            log::info!(
                "--subset: Missing families in structure file written to {}",
                path.display()
            );
        }

        Ok(families)
    }

    fn write_outputs(&self, analysis: &Analysis) -> Result<(), Error> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "------------------------------------------")?;
        report::write_results(&mut stdout, analysis)?;
        writeln!(stdout, "------------------------------------------")?;

        if self.config.table() {
            let path = self.output_path("ptdt.table");
            write_to_path(&path, |writer| {
                table::write_table(writer, analysis.deviations())
            })?;
            log::info!("--print: Table written to {}", path.display());
        }

        let path = self.output_path("ptdt.result");
        write_to_path(&path, |writer| report::write_results(writer, analysis))?;
        log::info!("--out: Results written to {}", path.display());

        Ok(())
    }
}

fn write_to_path<F>(path: &Path, write: F) -> Result<(), Error>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let mut writer = File::create(path)
        .map(BufWriter::new)
        .with_context(|| format!("Failed to create output file '{}'", path.display()))?;

    write(&mut writer)
        .and_then(|()| writer.flush())
        .with_context(|| format!("Failed to write output file '{}'", path.display()))
}

fn log_qc(deviations: &Deviations, qc: &Qc) {
    log::debug!(
        "Mid-parent PRS SD: {}; proband QC correlation: {}",
        deviations.mid_parent_sd(),
        qc.proband
    );
    if let Some(sibling) = qc.sibling {
        log::debug!("Sibling QC correlation: {sibling}");
    }

    if qc.passed() {
        log::info!("QC pass.");
    } else {
        log::warn!("QC fail - Low correlation between mid-parent PRS and proband/sibling PRS.");
    }
}

fn log_counts(analysis: &Analysis) {
    let proband = analysis.proband();
    log::info!(
        "{} probands used in pTDT analysis ({} skipped due to missingness).",
        proband.used(),
        proband.skipped()
    );
    if let Some(sibling) = analysis.sibling() {
        log::info!(
            "{} siblings used in pTDT analysis ({} skipped due to missingness).",
            sibling.used(),
            sibling.skipped()
        );
    }
}
