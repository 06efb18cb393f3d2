use std::path::PathBuf;

use clap::ValueEnum;
use config::Config;
use dirs::{config_dir, home_dir};
use serde::Deserialize;

use crate::{
    byte_size::ByteUnit,
    commands::Cli,
    dir_size::{Chonk, IterativeReader, ParallelReader, RecursiveReader},
};

pub const DEFAULT_LOG_FILE: &str = "directory_sizes.txt";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Directory whose subdirectories get measured. Falls back to `$HOME`.
    pub root: Option<PathBuf>,
    pub log_file: PathBuf,
    /// 1024-based units when true, 1000-based otherwise.
    pub binary: bool,
    pub method: Method,
    /// Show every size in this unit instead of the largest one that fits.
    pub unit: Option<ByteUnit>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    #[default]
    Iterative,
    Recursive,
    Parallel,
}

impl Method {
    pub fn reader(self) -> Box<dyn Chonk + Send + Sync> {
        match self {
            Method::Iterative => Box::new(IterativeReader::new()),
            Method::Recursive => Box::new(RecursiveReader::new()),
            Method::Parallel => Box::new(ParallelReader::new()),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            binary: true,
            method: Method::default(),
            unit: None,
        }
    }
}

impl Settings {
    pub fn normalize_paths(mut self) -> Self {
        self.root = self.root.map(expand);
        self.log_file = expand(self.log_file);
        self
    }

    /// Flags given on the command line win over the config file.
    pub fn apply_cli(mut self, cli: &Cli) -> Self {
        if let Some(root) = &cli.root {
            self.root = Some(root.clone());
        }
        if let Some(log_file) = &cli.log_file {
            self.log_file = log_file.clone();
        }
        if cli.decimal {
            self.binary = false;
        }
        if let Some(method) = cli.method {
            self.method = method;
        }
        if let Some(unit) = cli.unit {
            self.unit = Some(unit);
        }
        self.normalize_paths()
    }

    pub fn root_dir(&self) -> Option<PathBuf> {
        self.root.clone().or_else(home_dir)
    }
}

fn expand(path: PathBuf) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

/// Reads `{config_dir}/dirsize/config.yaml` over the defaults.
pub fn get_config() -> Result<Settings, config::ConfigError> {
    load_from(config_dir().map(|dir| dir.join("dirsize").join("config.yaml")))
}

pub fn load_from(file: Option<PathBuf>) -> Result<Settings, config::ConfigError> {
    let settings = Config::builder()
        .set_default("root", Option::<String>::None)?
        .set_default("log_file", DEFAULT_LOG_FILE)?
        .set_default("binary", true)?
        .set_default("method", "iterative")?
        .set_default("unit", Option::<String>::None)?;

    let settings = match file {
        Some(file) => settings.add_source(config::File::from(file).required(false)),
        None => settings,
    };

    Ok(settings
        .build()?
        .try_deserialize::<Settings>()?
        .normalize_paths())
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use clap::Parser;
    use claims::{assert_err, assert_ok};
    use tempfile::tempdir;

    use crate::{byte_size::ByteUnit, commands::Cli};

    use super::{DEFAULT_LOG_FILE, Method, load_from};

    #[test]
    fn defaults_without_file() {
        let settings = assert_ok!(load_from(None));
        assert_eq!(settings.root, None);
        assert_eq!(settings.log_file, PathBuf::from(DEFAULT_LOG_FILE));
        assert!(settings.binary);
        assert_eq!(settings.method, Method::Iterative);
        assert_eq!(settings.unit, None);
    }

    #[test]
    fn missing_file_is_fine() {
        let tmp = tempdir().unwrap();
        let settings = assert_ok!(load_from(Some(tmp.path().join("config.yaml"))));
        assert_eq!(settings.method, Method::Iterative);
    }

    #[test]
    fn file_overrides_defaults() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("config.yaml");
        fs::write(
            &file,
            "root: /srv/data\nlog_file: sizes.log\nbinary: false\nmethod: parallel\nunit: MB\n",
        )
        .unwrap();

        let settings = assert_ok!(load_from(Some(file)));
        assert_eq!(settings.root, Some(PathBuf::from("/srv/data")));
        assert_eq!(settings.log_file, PathBuf::from("sizes.log"));
        assert!(!settings.binary);
        assert_eq!(settings.method, Method::Parallel);
        assert_eq!(settings.unit, Some(ByteUnit::MB));
    }

    #[test]
    fn unknown_unit_in_file_is_rejected() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("config.yaml");
        fs::write(&file, "unit: zettabytes\n").unwrap();

        assert_err!(load_from(Some(file)));
    }

    #[test]
    fn cli_wins_over_file() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("config.yaml");
        fs::write(&file, "root: /srv/data\nmethod: parallel\nunit: kb\n").unwrap();

        let cli = Cli::parse_from([
            "dirsize",
            "/tmp/other",
            "--decimal",
            "-m",
            "recursive",
            "-u",
            "GB",
        ]);
        let settings = assert_ok!(load_from(Some(file))).apply_cli(&cli);
        assert_eq!(settings.root, Some(PathBuf::from("/tmp/other")));
        assert!(!settings.binary);
        assert_eq!(settings.method, Method::Recursive);
        assert_eq!(settings.unit, Some(ByteUnit::GB));
        assert_eq!(settings.log_file, PathBuf::from(DEFAULT_LOG_FILE));
    }
}
