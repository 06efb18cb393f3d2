use std::path::PathBuf;

use clap::Parser;

use crate::{byte_size::ByteUnit, settings::Method};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about=None)]
pub struct Cli {
    /// Directory whose subdirectories are measured. Defaults to the configured root, then $HOME
    pub root: Option<PathBuf>,

    /// File every summary line is appended to. Removed at startup
    #[arg(short, long)]
    pub log_file: Option<PathBuf>,

    /// Scale units by 1000 instead of 1024
    #[arg(long)]
    pub decimal: bool,

    /// How the directory tree is walked
    #[arg(short, long, value_enum)]
    pub method: Option<Method>,

    /// Show every size in this unit (B, kB, MB, GB, TB, PB)
    #[arg(short, long)]
    pub unit: Option<ByteUnit>,

    /// Print a summary table once every directory is measured
    #[arg(short, long)]
    pub table: bool,
}
