use std::path::PathBuf;

use anyhow::Error;

use clap::{ArgAction, CommandFactory, Parser};

use ptdt_core::{Columns, Config, Mode};

mod log_file;
use log_file::LogFile;

mod runner;
use runner::Runner;

const NAME: &str = env!("CARGO_BIN_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");
const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");

/// Polygenic transmission disequilibrium test.
///
/// Tests whether the polygenic risk scores of probands deviate from the mean of their parents'
/// scores, using the standard deviation of mid-parent scores as unit.
#[derive(Debug, Parser)]
#[clap(name = NAME, author = AUTHOR, version = VERSION, about)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// PRS score file, optionally followed by ID and PRS column numbers.
    ///
    /// By default, the file is assumed to have columns [Family ID] [Individual ID] [PHENO] [PRS],
    /// so that individual IDs are read from column 2 and scores from column 4. Other layouts can be
    /// used by providing the 1-based column numbers of the individual ID and the score after the
    /// path. Lines where the score is not a number are skipped.
    #[arg(
        long,
        required = true,
        num_args = 1..=3,
        value_names = ["FILE", "ID_COL", "PRS_COL"]
    )]
    prs: Vec<String>,

    /// Family structure file.
    ///
    /// The file should have a header line, followed by one line per family with columns
    /// [Family ID] [Proband ID] [Father ID] [Mother ID], and [Sibling ID] if using --quad.
    #[arg(long, value_name = "FILE")]
    structure: PathBuf,

    /// Subset of families to analyse.
    ///
    /// One family ID per line. Family IDs not found in the structure file are written to
    /// <OUT>.missing.
    #[arg(long, value_name = "FILE")]
    subset: Option<PathBuf>,

    /// Include unaffected siblings.
    ///
    /// Requires a sibling column in the structure file.
    #[arg(long)]
    quad: bool,

    /// Write a table of per-family pTDT values to <OUT>.ptdt.table.
    #[arg(long = "print", visible_alias = "table")]
    table: bool,

    /// Name of output files.
    #[arg(long, value_name = "OUT")]
    out: String,

    /// Only print warnings.
    ///
    /// By default, progress is printed. By setting this flag, only warnings will be printed.
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbosity.
    ///
    /// Flag can be set multiply times to increase verbosity.
    #[clap(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,

    /// Print CLI arguments for debugging.
    #[clap(long, hide = true)]
    debug: bool,
}

impl Cli {
    fn config(&self) -> Result<Config, Error> {
        let mode = if self.quad { Mode::Quad } else { Mode::Trio };

        Ok(Config::default()
            .set_mode(mode)
            .set_columns(self.columns()?)
            .set_table(self.table))
    }

    fn columns(&self) -> Result<Columns, Error> {
        match &self.prs[..] {
            [_] => Ok(Columns::default()),
            [_, id, score] => {
                let parse = |s: &str| {
                    s.parse::<usize>().map_err(|_| {
                        Cli::command().error(
                            clap::error::ErrorKind::ValueValidation,
                            format!("--prs column number must be a positive integer (found '{s}')"),
                        )
                    })
                };

                Ok(Columns::from_one_based(parse(id)?, parse(score)?)?)
            }
            args => Err(Cli::command()
                .error(
                    clap::error::ErrorKind::WrongNumberOfValues,
                    format!(
                        "--prs takes either a file, or a file followed by ID and PRS column numbers \
                        (found {} values)",
                        args.len()
                    ),
                )
                .into()),
        }
    }

    fn level(&self) -> log::LevelFilter {
        if self.quiet {
            log::LevelFilter::Warn
        } else {
            match self.verbose {
                0 => log::LevelFilter::Info,
                1 => log::LevelFilter::Debug,
                _ => log::LevelFilter::Trace,
            }
        }
    }

    /// Returns the options invoked, as written to the log file.
    fn options(&self) -> Vec<String> {
        let mut options = vec![
            format!("--prs {}", self.prs.join(" ")),
            format!("--structure {}", self.structure.display()),
        ];

        if let Some(subset) = &self.subset {
            options.push(format!("--subset {}", subset.display()));
        }
        if self.quad {
            options.push(String::from("--quad"));
        }
        if self.table {
            options.push(String::from("--print"));
        }
        options.push(format!("--out {}", self.out));

        options
    }

    fn prs_path(&self) -> PathBuf {
        PathBuf::from(&self.prs[0])
    }

    pub fn run(self) -> Result<(), Error> {
        if self.debug {
            eprintln!("{self:#?}");
        }

        let config = self.config()?;

        let log_file = LogFile::create(&self.out, &self.options())?;

        match env_logger::Builder::new()
            .filter_level(self.level())
            .target(env_logger::Target::Pipe(Box::new(log_file.tee()?)))
            .format(|buf, record| {
                use std::io::Write;

                let level = record.level().as_str().to_lowercase();
                let args = record.args();
                writeln!(buf, "[{NAME} {level:>5}] {args}")
            })
            .try_init()
        {
            Ok(()) => (),
            Err(e) => eprintln!("failed to setup logger: {e}"),
        }

        log::info!("Writing log file to {}", log_file.path().display());

        let runner = Runner {
            config,
            prs: self.prs_path(),
            structure: self.structure,
            subset: self.subset,
            out: self.out,
        };
        let result = runner.run();

        log_file.finish(&result)?;

        result
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.run() {
        Ok(()) => (),
        Err(e) => match e.downcast::<clap::Error>() {
            Ok(clap_error) => clap_error.exit(),
            Err(e) => {
                eprintln!("{e:#}");
                std::process::exit(1);
            }
        },
    }
}
