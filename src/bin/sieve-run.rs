//! CLI tool to filter and project delimited table files.
//!
//! Usage:
//!   sieve-run <table.csv> --columns name,salary --filter "dept=sales"
//!   sieve-run <table.csv> --filter-file query.filters -o out.csv
//!
//! If no output file is specified, writes to stdout. Validation problems
//! are printed one per line to stderr and exit with status 1.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use csvsieve::process_file;

#[derive(Parser)]
#[command(name = "sieve-run")]
#[command(about = "Filter and project delimited table files", long_about = None)]
struct Cli {
    /// Table file: a header line followed by data rows
    table: PathBuf,

    /// Comma-separated columns to keep (default: all columns)
    #[arg(short, long, default_value = "")]
    columns: String,

    /// A filter of the form <column><op><value>; repeatable
    #[arg(short, long = "filter")]
    filters: Vec<String>,

    /// File with one filter per line, appended after --filter entries
    #[arg(long)]
    filter_file: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let mut filter_lines = cli.filters.clone();
    if let Some(path) = &cli.filter_file {
        match fs::read_to_string(path) {
            Ok(content) => filter_lines.extend(content.lines().map(str::to_string)),
            Err(e) => {
                eprintln!("Error reading filter file '{}': {}", path.display(), e);
                process::exit(1);
            }
        }
    }
    let filter_spec = filter_lines.join("\n");

    match process_file(&cli.table, &cli.columns, &filter_spec) {
        Ok(output) => {
            // header line is always present; everything after it is a row
            let rows = output.lines().count().saturating_sub(1);
            if let Some(out_path) = &cli.output {
                if let Err(e) = fs::write(out_path, &output) {
                    eprintln!("Error writing output file '{}': {}", out_path.display(), e);
                    process::exit(1);
                }
                eprintln!("Processed {} matching rows, output: {}", rows, out_path.display());
            } else {
                if let Err(e) = io::stdout().write_all(output.as_bytes()) {
                    eprintln!("Error writing output: {}", e);
                    process::exit(1);
                }
                eprintln!("Processed {} matching rows", rows);
            }
        }
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}
