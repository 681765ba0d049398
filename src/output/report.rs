//! Score report handed to the formatters

use crate::processing::aggregator::ScoreSet;
use crate::processing::matcher::KeywordMatchReport;
use crate::processing::scorer::AlignmentAnalysis;
use crate::processing::sections::SectionReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub resume: String,
    pub job_description: String,
    pub scores: ScoreSet,
    pub keywords: KeywordMatchReport,
    pub sections: SectionReport,
    pub generated_at: DateTime<Utc>,
}

/// Qualitative band for a 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    Strong,
    Fair,
    Weak,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 75.0 {
            ScoreBand::Strong
        } else if score >= 50.0 {
            ScoreBand::Fair
        } else {
            ScoreBand::Weak
        }
    }
}

impl std::fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreBand::Strong => write!(f, "strong"),
            ScoreBand::Fair => write!(f, "fair"),
            ScoreBand::Weak => write!(f, "weak"),
        }
    }
}

impl ScoreReport {
    pub fn new(
        resume: impl Into<String>,
        job_description: impl Into<String>,
        analysis: AlignmentAnalysis,
    ) -> Self {
        Self {
            resume: resume.into(),
            job_description: job_description.into(),
            scores: analysis.scores,
            keywords: analysis.keywords,
            sections: analysis.sections,
            generated_at: Utc::now(),
        }
    }

    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.scores.overall_score)
    }
}
