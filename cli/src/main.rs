//! sheetlens CLI - Excel workbook inspection tool
//!
//! A command-line tool for dumping the structure of an XLSX workbook:
//! sheet names, shapes, columns, sample rows, and column types.

use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use sheetlens::report::{self, JsonFormat};
use sheetlens::ReportOptions;
use std::path::PathBuf;

/// Excel workbook inspection
#[derive(Parser)]
#[command(
    name = "sheetlens",
    version,
    about = "Inspect Excel workbooks",
    long_about = "sheetlens - Excel workbook inspection tool.\n\n\
                  Dumps sheet names, shapes, column headers, sample rows, and\n\
                  inferred column types of an XLSX workbook to standard output."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print sheet names, shapes, columns, sample rows, and column types
    #[command(visible_alias = "dump")]
    Inspect {
        /// Input workbook path
        input: PathBuf,

        /// Maximum number of sample rows per sheet
        #[arg(long, default_value_t = 10)]
        rows: usize,

        /// Skip table interpretation and print raw cell rows
        #[arg(long)]
        raw: bool,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,

        /// Output compact JSON (no indentation)
        #[arg(long, requires = "json")]
        compact: bool,

        /// Inspect only the named sheet
        #[arg(long)]
        sheet: Option<String>,
    },

    /// List sheet names, one per line
    Sheets {
        /// Input workbook path
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Inspect {
            input,
            rows,
            raw,
            json,
            compact,
            sheet,
        } => {
            let pb = create_spinner("Reading workbook...");

            let options = ReportOptions::default()
                .with_sample_rows(rows)
                .with_raw(raw)
                .with_sheet(sheet);
            let workbook_report = sheetlens::inspect_file(&input, &options)?;

            pb.finish_and_clear();

            if json {
                let format = if compact {
                    JsonFormat::Compact
                } else {
                    JsonFormat::Pretty
                };
                println!("{}", report::to_json(&workbook_report, format)?);
            } else {
                print!("{}", report::to_text(&workbook_report));
            }
        }

        Commands::Sheets { input } => {
            let reader = sheetlens::open_workbook(&input)?;
            for name in reader.sheet_names() {
                println!("{}", name);
            }
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

fn print_version() {
    println!("{} {}", "sheetlens".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Excel workbook inspection tool");
    println!();
    println!("Supported input: XLSX workbooks");
    println!("Repository: https://github.com/iyulab/sheetlens");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
