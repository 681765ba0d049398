//! Text matching and scoring engine

pub mod tokenizer;
pub mod keywords;
pub mod sections;
pub mod similarity;
pub mod matcher;
pub mod aggregator;
pub mod scorer;

pub use aggregator::{aggregate, calculate_final_score, ScoreSet, ScoreWeights};
pub use keywords::extract_keywords;
pub use matcher::{keyword_density, keyword_match, KeywordMatcher, MatchOptions};
pub use scorer::{get_score, get_score_bytes, AlignmentAnalysis, ScoringEngine};
pub use sections::{detect_sections, section_match, SectionCategory};
pub use tokenizer::tokenize;

/// Round to two decimal places, the precision every reported score uses.
/// Exact ties go to the even neighbour.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2_ties_to_even() {
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(42.857142), 42.86);
        assert_eq!(round2(5.0), 5.0);
    }
}
