//! Checker configuration
//!
//! Loaded from a TOML file; every field has a default so an empty file (or
//! no file at all) gives the plain engine: no stopwords, no lemmatization,
//! smoothed IDF.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CheckerError, Result};
use crate::report::Bands;
use crate::vectorizer::preprocess::{Preprocessor, SnowballLemmatizer, StopWords};
use crate::vectorizer::tfidf::IdfFormula;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckerConfig {
    pub preprocess: PreprocessConfig,
    pub scoring: ScoringConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreprocessConfig {
    /// remove the built-in English stopwords
    pub stopwords: bool,
    /// stopwords removed in addition to (or instead of) the built-in list
    pub extra_stopwords: Vec<String>,
    /// reduce tokens to their English stem
    pub lemmatize: bool,
    /// custom token regex, word-character runs when unset
    pub token_pattern: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    pub idf: IdfFormula,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// only report pairs scoring at least this much
    pub threshold: f64,
    /// lower bound of the HIGH band
    pub high: f64,
    /// lower bound of the MODERATE band
    pub moderate: f64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        let bands = Bands::default();
        Self {
            threshold: 0.0,
            high: bands.high,
            moderate: bands.moderate,
        }
    }
}

impl CheckerConfig {
    /// Read and validate a TOML configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| CheckerError::io(path, e))?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: CheckerConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let unit = |name: &str, value: f64| -> Result<()> {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(CheckerError::Config(format!(
                    "{name} must be between 0.0 and 1.0, got {value}"
                )))
            }
        };
        unit("report.threshold", self.report.threshold)?;
        unit("report.high", self.report.high)?;
        unit("report.moderate", self.report.moderate)?;
        if self.report.moderate > self.report.high {
            return Err(CheckerError::Config(format!(
                "report.moderate ({}) must not exceed report.high ({})",
                self.report.moderate, self.report.high
            )));
        }
        Ok(())
    }

    pub fn bands(&self) -> Bands {
        Bands {
            high: self.report.high,
            moderate: self.report.moderate,
        }
    }

    /// Preprocessor described by the `[preprocess]` table
    pub fn build_preprocessor(&self) -> Result<Preprocessor> {
        let cfg = &self.preprocess;
        let mut pre = Preprocessor::new();

        if let Some(pattern) = &cfg.token_pattern {
            pre = pre.with_token_pattern(pattern)?;
        }

        if cfg.stopwords || !cfg.extra_stopwords.is_empty() {
            let mut stop_words = if cfg.stopwords {
                StopWords::english()
            } else {
                StopWords::new()
            };
            stop_words.extend(&cfg.extra_stopwords);
            pre = pre.with_stop_words(stop_words);
        }

        if cfg.lemmatize {
            pre = pre.with_lemmatizer(SnowballLemmatizer::english());
        }

        Ok(pre)
    }
}
