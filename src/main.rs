//! swift-buildlog CLI
//!
//! Reads a build log on standard input and prints a structured report.
//! Exit code 0 means the input was parsed, regardless of whether the
//! build it describes succeeded; a non-zero code means the invocation
//! itself was invalid.

use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use std::process;

use swift_buildlog::{parse_bytes, render, OutputFormat, RenderOptions};

#[derive(Parser)]
#[command(name = "swift-buildlog")]
#[command(about = "Parse Swift, SwiftPM, and xcodebuild output into a structured build report")]
#[command(version)]
struct Cli {
    /// Output format: text, json, summary, or compact
    #[arg(long, short = 'f', default_value = "text")]
    format: String,

    /// Include informational diagnostics in listings
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Show only error diagnostics
    #[arg(long, short = 'e')]
    errors: bool,

    /// Show only warning diagnostics
    #[arg(long, short = 'w')]
    warnings: bool,

    /// Print the one-line minimal report (overrides --format)
    #[arg(long)]
    minimal: bool,

    /// Write the rendered report to a file instead of stdout
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let format = if cli.minimal {
        OutputFormat::Minimal
    } else {
        match cli.format.parse::<OutputFormat>() {
            Ok(format) => format,
            Err(err) => {
                eprintln!("Error: {}", err);
                process::exit(2);
            }
        }
    };

    let mut input = Vec::new();
    if let Err(err) = std::io::stdin().read_to_end(&mut input) {
        eprintln!("Failed to read standard input: {}", err);
        process::exit(1);
    }
    if input.iter().all(|b| b.is_ascii_whitespace()) {
        eprintln!("No input provided. Pipe a build log into swift-buildlog.");
        process::exit(1);
    }

    let report = parse_bytes(&input);

    let options = RenderOptions {
        verbose: cli.verbose,
        errors_only: cli.errors,
        warnings_only: cli.warnings,
    };

    let rendered = match render(&report, format, &options) {
        Ok(rendered) => rendered,
        Err(err) => {
            eprintln!("Failed to serialize report: {}", err);
            process::exit(1);
        }
    };

    match cli.output {
        Some(path) => {
            if let Err(err) = std::fs::write(&path, format!("{}\n", rendered.trim_end())) {
                eprintln!("Failed to write {}: {}", path.display(), err);
                process::exit(1);
            }
        }
        None => println!("{}", rendered.trim_end()),
    }
}
