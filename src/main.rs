//! plagiarism-checker - compare text files by TF-IDF cosine similarity

mod cli;

use std::fs;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use cli::{Cli, OutputFormat};
use plagiarism_checker::error::{CheckerError, ExitCode as CheckerExitCode, Result};
use plagiarism_checker::logging;
use plagiarism_checker::report::{PairComparison, Report};
use plagiarism_checker::{CheckerConfig, PlagiarismChecker};

fn main() -> ExitCode {
    let start = Instant::now();
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::debug!(elapsed = ?start.elapsed(), "parse_args");

    match run(&cli) {
        Ok(()) => {
            tracing::debug!(elapsed = ?start.elapsed(), "done");
            ExitCode::from(u8::from(CheckerExitCode::Success))
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(u8::from(e.exit_code()))
        }
    }
}

struct InputFile {
    label: String,
    text: String,
}

fn run(cli: &Cli) -> Result<()> {
    if cli.files.len() < 2 {
        return Err(CheckerError::Usage(
            "At least 2 files are required for comparison".to_string(),
        ));
    }

    let config = load_config(cli)?;
    let threshold = config.report.threshold;
    let bands = config.bands();
    let text_output = cli.format == OutputFormat::Text;

    // every path is checked before anything is read
    if let Some(missing) = cli.files.iter().find(|path| !path.exists()) {
        return Err(CheckerError::io(
            missing,
            std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        ));
    }

    if cli.verbose && text_output {
        println!("Reading {} file(s)...", cli.files.len());
    }
    let mut inputs = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        let input = read_input(path)?;
        if cli.verbose && text_output {
            println!("  {}: {} words", input.label, input.text.split_whitespace().count());
        }
        inputs.push(input);
    }

    let mut checker = PlagiarismChecker::from_config(&config)?;

    if let [left, right] = inputs.as_slice() {
        if cli.verbose && text_output {
            println!("\nComparing documents...");
        }
        let score = checker.compare_documents(&left.text, &right.text);
        let comparison = PairComparison::new(&left.label, &right.label, score, threshold, bands);
        match cli.format {
            OutputFormat::Text => println!("\n{}", comparison),
            OutputFormat::Json => println!("{}", comparison.to_json()?),
        }
        return Ok(());
    }

    if cli.verbose && text_output {
        println!("\nComparing {} documents (pairwise)...", inputs.len());
    }
    for input in &inputs {
        checker.add_document(&input.text, Some(input.label.as_str()));
    }
    let hits = checker.check_all_pairs();
    let report = Report::new(&hits, threshold, bands);

    match cli.format {
        OutputFormat::Text => {
            print!("\n{}", report);
            if cli.verbose {
                if let Some(summary) = &report.summary {
                    println!("{}", "-".repeat(70));
                    println!("{}", summary);
                }
            }
        }
        OutputFormat::Json => println!("{}", report.to_json()?),
    }
    Ok(())
}

/// Configuration file (if any) with the command-line flags applied on top
fn load_config(cli: &Cli) -> Result<CheckerConfig> {
    let mut config = match &cli.config {
        Some(path) => CheckerConfig::load(path)?,
        None => CheckerConfig::default(),
    };
    if let Some(threshold) = cli.threshold {
        config.report.threshold = threshold;
    }
    if cli.stopwords {
        config.preprocess.stopwords = true;
    }
    if cli.lemmatize {
        config.preprocess.lemmatize = true;
    }
    if let Some(idf) = cli.idf {
        config.scoring.idf = idf;
    }
    config.validate()?;
    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}

fn read_input(path: &Path) -> Result<InputFile> {
    let text = fs::read_to_string(path).map_err(|e| CheckerError::io(path, e))?;
    Ok(InputFile {
        label: path.display().to_string(),
        text,
    })
}
