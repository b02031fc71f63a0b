// src/main.rs
#![allow(clippy::multiple_crate_versions)]

use anyhow::Result;
use clap::Parser;

use loc_report::{
    cli::{Args, OutputFormat},
    logfile, report,
    scanner::{ScanOptions, Scanner},
};

fn main() -> Result<()> {
    let args = Args::parse();

    let jobs = args.jobs.unwrap_or_else(num_cpus::get).max(1);
    let scanner = Scanner::new(ScanOptions { jobs });

    let scan = scanner.scan(&args.path)?;

    match args.format {
        OutputFormat::Table => print!("{}", report::render_table(&scan)),
        OutputFormat::Json => println!("{}", report::render_json(&scan)),
    }

    if !args.no_log {
        let written = match &args.log_dir {
            Some(dir) => logfile::write_log_in(dir, &scan),
            None => logfile::write_log(&scan),
        };
        // The table already reached stdout; a failed log write is worth a
        // warning but not a failed run.
        if let Err(err) = written {
            eprintln!("[warn] failed to write log file: {err}");
        }
    }

    Ok(())
}
