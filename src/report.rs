//! Presentation of similarity scores: threshold filtering, classification
//! bands, percentages and summary statistics.
//!
//! Nothing here changes a score; it only decides how scores are shown.

use std::fmt::{self, Display};

use serde::Serialize;

use crate::vectorizer::evaluate::scoring::PairHits;

/// Lower bounds of the HIGH and MODERATE bands
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bands {
    pub high: f64,
    pub moderate: f64,
}

impl Default for Bands {
    fn default() -> Self {
        Self {
            high: 0.8,
            moderate: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Classification {
    High,
    Moderate,
    Low,
}

impl Bands {
    pub fn classify(&self, score: f64) -> Classification {
        if score >= self.high {
            Classification::High
        } else if score >= self.moderate {
            Classification::Moderate
        } else {
            Classification::Low
        }
    }
}

impl Classification {
    pub fn label(&self) -> &'static str {
        match self {
            Classification::High => "HIGH",
            Classification::Moderate => "MODERATE",
            Classification::Low => "LOW",
        }
    }

    /// Status line used for a single two-document comparison
    pub fn status(&self) -> &'static str {
        match self {
            Classification::High => "HIGH similarity - Potential plagiarism detected!",
            Classification::Moderate => "MODERATE similarity - Review recommended",
            Classification::Low => "LOW similarity",
        }
    }

    /// Tag appended to a pair line, empty for LOW
    pub fn tag(&self) -> &'static str {
        match self {
            Classification::High => " [HIGH - Potential plagiarism!]",
            Classification::Moderate => " [MODERATE]",
            Classification::Low => "",
        }
    }
}

impl Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// `0.8523` -> `"85.23%"`
pub fn format_percentage(score: f64) -> String {
    format!("{:.2}%", score * 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: f64,
    pub max: f64,
    pub min: f64,
}

impl SummaryStats {
    /// `None` for an empty result list
    pub fn from_scores<I>(scores: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut max = f64::NEG_INFINITY;
        let mut min = f64::INFINITY;
        for s in scores {
            count += 1;
            sum += s;
            max = max.max(s);
            min = min.min(s);
        }
        if count == 0 {
            return None;
        }
        Some(Self {
            count,
            mean: sum / count as f64,
            max,
            min,
        })
    }
}

/// One reported pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub left: String,
    pub right: String,
    pub score: f64,
    pub percentage: String,
    pub classification: Classification,
}

/// Pairwise report: pairs at or above the threshold plus statistics over
/// every compared pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub threshold: f64,
    pub bands: Bands,
    pub compared: usize,
    pub rows: Vec<ReportRow>,
    pub summary: Option<SummaryStats>,
}

impl Report {
    pub fn new(hits: &PairHits, threshold: f64, bands: Bands) -> Self {
        let rows = hits
            .filter_threshold(threshold)
            .into_iter()
            .map(|hit| ReportRow {
                left: hit.left.name.to_string(),
                right: hit.right.name.to_string(),
                score: hit.score,
                percentage: format_percentage(hit.score),
                classification: bands.classify(hit.score),
            })
            .collect();
        Self {
            threshold,
            bands,
            compared: hits.len(),
            rows,
            summary: SummaryStats::from_scores(hits.scores()),
        }
    }

    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pairwise similarity results:")?;
        writeln!(f, "{}", "-".repeat(70))?;
        if self.rows.is_empty() {
            writeln!(
                f,
                "No document pairs found with similarity >= {}",
                format_percentage(self.threshold)
            )?;
        }
        for row in &self.rows {
            writeln!(f, "{} <-> {}", row.left, row.right)?;
            writeln!(f, "  Similarity: {}{}", row.percentage, row.classification.tag())?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Result of a single two-document comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairComparison {
    pub left: String,
    pub right: String,
    pub score: f64,
    pub percentage: String,
    pub threshold: f64,
    /// `None` when the score is below the threshold
    pub classification: Option<Classification>,
}

impl PairComparison {
    pub fn new(
        left: impl Into<String>,
        right: impl Into<String>,
        score: f64,
        threshold: f64,
        bands: Bands,
    ) -> Self {
        let classification = (score >= threshold).then(|| bands.classify(score));
        Self {
            left: left.into(),
            right: right.into(),
            score,
            percentage: format_percentage(score),
            threshold,
            classification,
        }
    }

    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Display for PairComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Similarity between '{}' and '{}':", self.left, self.right)?;
        writeln!(f, "  Score: {}", self.percentage)?;
        match self.classification {
            Some(class) => write!(f, "  Status: {}", class.status()),
            None => write!(
                f,
                "  Status: Below threshold ({})",
                format_percentage(self.threshold)
            ),
        }
    }
}

impl Display for SummaryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary Statistics:")?;
        writeln!(f, "  Average similarity: {}", format_percentage(self.mean))?;
        writeln!(f, "  Maximum similarity: {}", format_percentage(self.max))?;
        write!(f, "  Minimum similarity: {}", format_percentage(self.min))
    }
}
