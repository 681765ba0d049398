//! Scoring entry points tying the components together

use crate::error::{Result, ResumeScorerError};
use crate::processing::aggregator::{aggregate, ScoreSet, ScoreWeights};
use crate::processing::matcher::{KeywordMatchReport, KeywordMatcher, MatchOptions};
use crate::processing::sections::{detect_sections, SectionReport};
use log::debug;
use serde::{Deserialize, Serialize};

/// Everything computed for one resume/job pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentAnalysis {
    pub scores: ScoreSet,
    pub keywords: KeywordMatchReport,
    pub sections: SectionReport,
}

/// Stateless scorer configured with match options and metric weights.
///
/// Holds no per-call state, so one engine can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    matcher: KeywordMatcher,
    weights: ScoreWeights,
}

impl ScoringEngine {
    pub fn new(options: MatchOptions, weights: ScoreWeights) -> Self {
        Self {
            matcher: KeywordMatcher::new(options),
            weights,
        }
    }

    pub fn matcher(&self) -> &KeywordMatcher {
        &self.matcher
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Raw metrics with `overall_score` left at zero.
    pub fn raw_scores(&self, candidate: &str, target: &str) -> ScoreSet {
        let keywords = self.matcher.analyze(candidate, target);
        let sections = detect_sections(candidate);

        ScoreSet::new(keywords.keyword_match, sections.score, keywords.keyword_density)
    }

    /// Raw metrics aggregated with this engine's weights.
    pub fn score(&self, candidate: &str, target: &str) -> ScoreSet {
        aggregate(self.raw_scores(candidate, target), &self.weights)
    }

    pub fn analyze(&self, candidate: &str, target: &str) -> AlignmentAnalysis {
        let keywords = self.matcher.analyze(candidate, target);
        let sections = detect_sections(candidate);
        let raw = ScoreSet::new(keywords.keyword_match, sections.score, keywords.keyword_density);
        let scores = aggregate(raw, &self.weights);

        debug!(
            "Scores: keyword_match={} section_match={} keyword_density={} overall={}",
            scores.keyword_match, scores.section_match, scores.keyword_density, scores.overall_score
        );

        AlignmentAnalysis {
            scores,
            keywords,
            sections,
        }
    }
}

/// Raw metrics for a resume against a job description, with default options.
pub fn get_score(candidate: &str, target: &str) -> ScoreSet {
    ScoringEngine::default().raw_scores(candidate, target)
}

/// [`get_score`] for byte input that has not been checked for UTF-8 yet.
pub fn get_score_bytes(candidate: &[u8], target: &[u8]) -> Result<ScoreSet> {
    let candidate = decode_text(candidate, "resume")?;
    let target = decode_text(target, "job description")?;

    Ok(get_score(candidate, target))
}

fn decode_text<'a>(bytes: &'a [u8], label: &str) -> Result<&'a str> {
    std::str::from_utf8(bytes).map_err(|e| {
        ResumeScorerError::InvalidInput(format!("{} is not valid UTF-8 text: {}", label, e))
    })
}
