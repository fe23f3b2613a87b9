use std::{
    env,
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Error};

use crate::{NAME, VERSION};

/// The run log, written to `<OUT>.ptdt.log`.
///
/// The log starts with a header describing the run. Log records are then appended by the logger
/// through a [`Tee`], and the log is closed by [`LogFile::finish`].
#[derive(Debug)]
pub struct LogFile {
    file: File,
    path: PathBuf,
}

impl LogFile {
    pub fn create(out: &str, options: &[String]) -> Result<Self, Error> {
        let path = PathBuf::from(format!("{out}.ptdt.log"));
        let file = File::create(&path)
            .with_context(|| format!("Failed to create log file '{}'", path.display()))?;

        let mut log_file = Self { file, path };
        log_file.write_header(options)?;

        Ok(log_file)
    }

    fn write_header(&mut self, options: &[String]) -> io::Result<()> {
        writeln!(self.file, "{NAME} v{VERSION}")?;
        writeln!(self.file, "Options invoked:")?;
        for option in options {
            writeln!(self.file, "\t{option}")?;
        }
        writeln!(self.file)?;

        let working_directory = env::current_dir()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|_| String::from("[unknown]"));

        writeln!(self.file, "Hostname: {}", hostname())?;
        writeln!(self.file, "Working directory: {working_directory}")?;
        writeln!(self.file, "Start time: {}", now())?;
        writeln!(self.file)
    }

    /// Writes a fatal error, if any, and the end time.
    pub fn finish(mut self, result: &Result<(), Error>) -> Result<(), Error> {
        if let Err(e) = result {
            writeln!(self.file, "Error: {e:#}")?;
        }

        writeln!(self.file)?;
        write!(self.file, "End time: {}", now())?;
        self.file
            .flush()
            .with_context(|| format!("Failed to write log file '{}'", self.path.display()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns a writer to both stderr and the log file.
    pub fn tee(&self) -> io::Result<Tee> {
        self.file.try_clone().map(|file| Tee { file })
    }
}

/// A writer to both stderr and the log file.
#[derive(Debug)]
pub struct Tee {
    file: File,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}

fn hostname() -> String {
    env::var("HOSTNAME")
        .ok()
        .or_else(|| fs::read_to_string("/proc/sys/kernel/hostname").ok())
        .or_else(|| fs::read_to_string("/etc/hostname").ok())
        .map(|hostname| hostname.trim().to_string())
        .filter(|hostname| !hostname.is_empty())
        .unwrap_or_else(|| String::from("[unknown]"))
}

fn now() -> String {
    chrono::Local::now().format("%c").to_string()
}
