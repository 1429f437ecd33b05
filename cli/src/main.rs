//! outpdf CLI - batch PDF outline extraction

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use outpdf::{BatchOptions, BatchReport, GuardLimits, JsonFormat};

#[derive(Parser)]
#[command(name = "outpdf")]
#[command(version)]
#[command(about = "Extract structured outlines from PDF documents", long_about = None)]
struct Cli {
    /// Directory containing input PDF files
    #[arg(value_name = "INPUT_DIR", env = "OUTPDF_INPUT", default_value = "input")]
    input: PathBuf,

    /// Directory for the per-file JSON output
    #[arg(value_name = "OUTPUT_DIR", env = "OUTPDF_OUTPUT", default_value = "output")]
    output: PathBuf,

    /// Maximum page count per document
    #[arg(long, value_name = "N", default_value_t = 50)]
    max_pages: u32,

    /// Per-document processing budget in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = 10)]
    timeout: u64,

    /// Worker pool size (0 = one per core)
    #[arg(short, long, value_name = "N", default_value_t = 0)]
    jobs: usize,

    /// Write compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,

    /// Suppress per-file status lines
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();

    let limits = GuardLimits::new()
        .with_max_pages(cli.max_pages)
        .with_timeout(Duration::from_secs(cli.timeout));
    let options = BatchOptions::new()
        .with_limits(limits)
        .with_jobs(cli.jobs)
        .with_format(if cli.compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        });

    let file_count = count_pdfs(&cli.input);
    let bar = if cli.quiet || file_count == 0 {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(file_count);
        bar.set_style(
            ProgressStyle::with_template("[{bar:30}] {pos}/{len} {msg}")
                .expect("valid progress template")
                .progress_chars("=> "),
        );
        bar
    };

    let report = outpdf::process_dir_with(&cli.input, &cli.output, &options, |result| {
        let name = result
            .input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match &result.error {
            None => {
                bar.suspend(|| {
                    if !cli.quiet {
                        println!(
                            "{} {} ({} headings)",
                            "\u{2713}".green(),
                            name,
                            result.headings
                        );
                    }
                });
            }
            Some(err) => {
                bar.suspend(|| {
                    eprintln!("{} {}: {}", "\u{2717}".red(), name, err);
                });
            }
        }
        bar.inc(1);
    });

    bar.finish_and_clear();

    match report {
        Ok(report) => {
            print_summary(&report, cli.quiet);
            // Individual document failures are recorded per file; they do
            // not affect the exit status.
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn count_pdfs(dir: &PathBuf) -> u64 {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .filter(|e| {
                    e.path()
                        .extension()
                        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
                        .unwrap_or(false)
                })
                .count() as u64
        })
        .unwrap_or(0)
}

fn print_summary(report: &BatchReport, quiet: bool) {
    if report.results.is_empty() {
        if !quiet {
            println!("No PDF files found in input directory.");
        }
        return;
    }
    if !quiet {
        let line = format!(
            "Processed {} file(s): {} succeeded, {} failed",
            report.results.len(),
            report.succeeded(),
            report.failed()
        );
        if report.failed() == 0 {
            println!("{}", line.green());
        } else {
            println!("{}", line.yellow());
        }
    }
}
