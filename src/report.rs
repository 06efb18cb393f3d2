use std::{
    fmt,
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use color_eyre::eyre::{self, Result, WrapErr};
use log::{info, warn};
use walkdir::WalkDir;

use crate::{
    byte_size::{ByteSize, ByteUnit},
    dir_size::{Chonk, DirSizeError},
    settings::Settings,
};

/// Measurement of one top-level directory.
#[derive(Debug, Clone, PartialEq)]
pub struct DirReport {
    pub path: PathBuf,
    pub display_name: String,
    pub size: ByteSize,
    /// Unit the size is shown in.
    pub unit: ByteUnit,
}

impl DirReport {
    /// Shows `size` in `unit`, or in the largest unit that fits when `None`.
    pub fn new(
        path: PathBuf,
        display_name: String,
        size: ByteSize,
        unit: Option<ByteUnit>,
    ) -> Self {
        Self {
            path,
            display_name,
            unit: unit.unwrap_or_else(|| size.largest_unit()),
            size,
        }
    }

    pub fn shown_value(&self) -> f64 {
        self.size.converted_value(self.unit)
    }
}

impl fmt::Display for DirReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total size of {} is {}{}",
            self.display_name,
            self.shown_value(),
            self.unit
        )
    }
}

/// Log of summary lines. Any previous log is removed when it is created.
#[derive(Debug)]
pub struct LogFile {
    path: PathBuf,
}

impl LogFile {
    pub fn create(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err),
        }
        Ok(Self { path })
    }

    pub fn append(&self, line: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Immediate subdirectories of `root`, sorted by name.
pub fn top_level_dirs(root: &Path) -> Result<Vec<PathBuf>> {
    match fs::metadata(root) {
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(DirSizeError::NotFound(root.to_path_buf()).into());
        }
        Err(err) => {
            return Err(err).wrap_err_with(|| format!("Could not read {}", root.display()));
        }
        Ok(meta) if !meta.is_dir() => {
            return Err(eyre::eyre!("{} is not a directory", root.display()));
        }
        Ok(_) => {}
    }

    let entries = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .wrap_err_with(|| format!("Could not list {}", root.display()))?;

    Ok(entries
        .into_iter()
        .filter(|e| e.file_type().is_dir())
        .map(|e| e.into_path())
        .collect())
}

/// `dir` relative to `root`, with the root shown as `~`.
pub fn display_name(root: &Path, dir: &Path) -> String {
    match dir.strip_prefix(root) {
        Ok(rel) => Path::new("~").join(rel).display().to_string(),
        Err(_) => dir.display().to_string(),
    }
}

pub fn run(settings: &Settings) -> Result<Vec<DirReport>> {
    let stdout = io::stdout();
    run_with(settings, &mut stdout.lock())
}

pub fn run_with<W: Write>(settings: &Settings, out: &mut W) -> Result<Vec<DirReport>> {
    let reader = settings.method.reader();
    measure_all(settings, reader.as_ref(), out)
}

/// Measures every top-level directory with `reader`, writing each line to
/// `out` and to the log file as soon as it is known. The log is reset
/// before anything else happens.
pub fn measure_all<C, W>(settings: &Settings, reader: &C, out: &mut W) -> Result<Vec<DirReport>>
where
    C: Chonk + ?Sized,
    W: Write,
{
    let log = LogFile::create(&settings.log_file)
        .wrap_err_with(|| format!("Could not reset {}", settings.log_file.display()))?;

    let root = settings
        .root_dir()
        .ok_or_else(|| eyre::eyre!("No root directory given and no home directory found"))?;
    let dirs = top_level_dirs(&root)?;

    let mut reports = Vec::with_capacity(dirs.len());
    for dir in dirs {
        let bytes = match reader.get_dir_size(&dir) {
            Ok(bytes) => bytes,
            Err(err) => {
                // removed between listing and measuring
                warn!("Skipping {}: {err}", dir.display());
                continue;
            }
        };
        info!("{} holds {bytes} bytes", dir.display());

        let report = DirReport::new(
            dir.clone(),
            display_name(&root, &dir),
            ByteSize::new(bytes, ByteUnit::B, settings.binary),
            settings.unit,
        );
        let line = report.to_string();

        writeln!(out, "{line}")?;
        log.append(&line)
            .wrap_err_with(|| format!("Could not write to {}", log.path().display()))?;

        reports.push(report);
    }

    Ok(reports)
}
