// src/cli.rs
use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "loc_report", version, about = "ディレクトリ配下の行数を拡張子別に集計するツール")]
pub struct Args {
    /// Directory to scan
    pub path: PathBuf,

    /// Worker threads (defaults to the logical CPU count)
    #[arg(long)]
    pub jobs: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Skip writing the timestamped summary log
    #[arg(long)]
    pub no_log: bool,

    /// Directory the log file is written to (defaults to the working directory)
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}
