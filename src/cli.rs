//! CLI argument parsing for plagiarism-checker

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use plagiarism_checker::IdfFormula;

/// Plagiarism Checker - detect plagiarism using TF-IDF and cosine similarity
#[derive(Parser, Debug)]
#[command(name = "plagiarism-checker")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Examples:
  plagiarism-checker file1.txt file2.txt
  plagiarism-checker file1.txt file2.txt file3.txt
  plagiarism-checker file1.txt file2.txt --threshold 0.8")]
pub struct Cli {
    /// Text files to compare (at least 2 files required)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Only show results at or above this similarity (0.0 to 1.0)
    #[arg(long, short, value_parser = parse_threshold)]
    pub threshold: Option<f64>,

    /// Verbose output with word counts and summary statistics
    #[arg(long, short)]
    pub verbose: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// TOML configuration file
    #[arg(long, env = "PLAGIARISM_CHECKER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Remove English stopwords before comparing
    #[arg(long)]
    pub stopwords: bool,

    /// Reduce words to their English stem before comparing
    #[arg(long)]
    pub lemmatize: bool,

    /// IDF formula: smoothed or classic
    #[arg(long)]
    pub idf: Option<IdfFormula>,

    /// Log filter, e.g. `debug` or `plagiarism_checker=trace`
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    pub log_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn parse_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err("Threshold must be between 0.0 and 1.0".to_string())
    }
}
