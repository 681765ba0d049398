//! Exact and fuzzy keyword matching of a resume against a job description

use crate::processing::keywords::{extract_keywords, DEFAULT_MIN_WORD_LENGTH, DEFAULT_TOP_N};
use crate::processing::round2;
use crate::processing::similarity::FuzzyAlgorithm;
use crate::processing::tokenizer::tokenize;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Weight of the exact-match percentage in the keyword score.
pub const EXACT_WEIGHT: f64 = 0.7;
/// Weight of the lenient percentage. Exact hits count in full inside this
/// term alongside fuzzy credit; without them identical texts score 70.
pub const PARTIAL_WEIGHT: f64 = 0.3;
/// Default upper bound for keyword density, in percent.
pub const DEFAULT_DENSITY_CAP: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOptions {
    pub top_n: usize,
    pub min_word_length: usize,
    /// Minimum similarity ratio (0-100) for a fuzzy hit
    pub fuzzy_threshold: u8,
    pub fuzzy_algorithm: FuzzyAlgorithm,
    /// Credit for a fuzzy hit, relative to an exact hit
    pub partial_credit: f64,
    /// Upper bound for keyword density, in percent
    pub density_cap: f64,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
            fuzzy_threshold: 85,
            fuzzy_algorithm: FuzzyAlgorithm::Indel,
            partial_credit: 0.5,
            density_cap: DEFAULT_DENSITY_CAP,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyMatch {
    pub keyword: String,
    pub matched_token: String,
    pub similarity: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordMatchReport {
    /// Job description keywords, most frequent first
    pub keywords: Vec<String>,
    pub exact_matches: Vec<String>,
    pub fuzzy_matches: Vec<FuzzyMatch>,
    pub missing_keywords: Vec<String>,
    pub exact_score: f64,
    pub partial_score: f64,
    pub keyword_match: f64,
    pub keyword_density: f64,
}

/// Scores how well resume tokens cover the keywords of a job description.
#[derive(Debug, Clone, Default)]
pub struct KeywordMatcher {
    options: MatchOptions,
}

/// Resume tokens in first-seen order, plus a set for exact lookups.
struct CandidateTokens {
    all: usize,
    distinct: Vec<String>,
    lookup: HashSet<String>,
}

impl CandidateTokens {
    fn new(text: &str) -> Self {
        let tokens = tokenize(text);
        let all = tokens.len();
        let mut lookup = HashSet::with_capacity(tokens.len());
        let mut distinct = Vec::new();

        for token in tokens {
            if lookup.insert(token.clone()) {
                distinct.push(token);
            }
        }

        Self {
            all,
            distinct,
            lookup,
        }
    }
}

impl KeywordMatcher {
    pub fn new(options: MatchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    pub fn target_keywords(&self, target: &str) -> Vec<String> {
        extract_keywords(target, self.options.top_n, self.options.min_word_length)
    }

    /// Full breakdown of exact, fuzzy and missing keywords.
    pub fn analyze(&self, candidate: &str, target: &str) -> KeywordMatchReport {
        let keywords = self.target_keywords(target);
        let tokens = CandidateTokens::new(candidate);

        let mut exact_matches = Vec::new();
        let mut fuzzy_matches = Vec::new();
        let mut missing_keywords = Vec::new();

        for keyword in &keywords {
            if tokens.lookup.contains(keyword) {
                exact_matches.push(keyword.clone());
            } else if let Some(fuzzy) = self.best_fuzzy_match(keyword, &tokens.distinct) {
                fuzzy_matches.push(fuzzy);
            } else {
                missing_keywords.push(keyword.clone());
            }
        }

        let (exact_score, partial_score, keyword_match) =
            self.combine(keywords.len(), exact_matches.len(), fuzzy_matches.len());
        let keyword_density = self.density(exact_matches.len(), keywords.len(), tokens.all);

        debug!(
            "Keyword match: {} keywords, {} exact, {} fuzzy, {} missing",
            keywords.len(),
            exact_matches.len(),
            fuzzy_matches.len(),
            missing_keywords.len()
        );

        KeywordMatchReport {
            keywords,
            exact_matches,
            fuzzy_matches,
            missing_keywords,
            exact_score,
            partial_score,
            keyword_match,
            keyword_density,
        }
    }

    /// Keyword score in 0..=100: 70% exact coverage, 30% lenient coverage in
    /// which fuzzy hits earn partial credit.
    pub fn keyword_match(&self, candidate: &str, target: &str) -> f64 {
        self.analyze(candidate, target).keyword_match
    }

    /// Share of resume tokens covered by exactly matched keywords, in percent
    /// and capped at `density_cap`.
    pub fn keyword_density(&self, candidate: &str, target: &str) -> f64 {
        let keywords = self.target_keywords(target);
        let tokens = CandidateTokens::new(candidate);
        let matched = keywords
            .iter()
            .filter(|keyword| tokens.lookup.contains(*keyword))
            .count();

        self.density(matched, keywords.len(), tokens.all)
    }

    /// Best candidate token for `keyword`, if it clears the fuzzy threshold.
    ///
    /// Every keyword is compared against the whole candidate vocabulary, so
    /// several keywords may claim credit from the same resume token.
    fn best_fuzzy_match(&self, keyword: &str, candidates: &[String]) -> Option<FuzzyMatch> {
        let algorithm = self.options.fuzzy_algorithm;
        let threshold = self.options.fuzzy_threshold;
        let keyword_len = keyword.chars().count();
        let mut best: Option<FuzzyMatch> = None;

        for token in candidates {
            if let Some(bound) = algorithm.length_bound(keyword_len, token.chars().count()) {
                if bound < threshold {
                    continue;
                }
            }

            let similarity = algorithm.ratio(keyword, token);
            if similarity < threshold {
                continue;
            }
            if best.as_ref().map_or(true, |b| similarity > b.similarity) {
                best = Some(FuzzyMatch {
                    keyword: keyword.to_string(),
                    matched_token: token.clone(),
                    similarity,
                });
                if similarity == 100 {
                    break;
                }
            }
        }

        best
    }

    fn combine(&self, keyword_count: usize, exact: usize, fuzzy: usize) -> (f64, f64, f64) {
        if keyword_count == 0 {
            return (0.0, 0.0, 0.0);
        }

        let total = keyword_count as f64;
        let exact_score = exact as f64 / total * 100.0;
        let partial_score = fuzzy as f64 * self.options.partial_credit / total * 100.0;
        // The lenient component counts exact hits in full and fuzzy hits at partial credit
        let lenient_score = exact_score + partial_score;
        let score = (EXACT_WEIGHT * exact_score + PARTIAL_WEIGHT * lenient_score).min(100.0);

        (round2(exact_score), round2(partial_score), round2(score))
    }

    fn density(&self, matched: usize, keyword_count: usize, token_count: usize) -> f64 {
        if keyword_count == 0 || token_count == 0 {
            return 0.0;
        }

        let density = matched as f64 / token_count as f64 * 100.0;
        round2(density.min(self.options.density_cap))
    }
}

/// Keyword score with default options.
pub fn keyword_match(candidate: &str, target: &str) -> f64 {
    KeywordMatcher::default().keyword_match(candidate, target)
}

/// Keyword density with default options.
pub fn keyword_density(candidate: &str, target: &str) -> f64 {
    KeywordMatcher::default().keyword_density(candidate, target)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Experienced Python developer with AWS and Docker skills.";
    const JOB: &str = "Looking for a Python engineer skilled in AWS, Docker, and Kubernetes.";

    #[test]
    fn test_python_aws_docker_scenario() {
        let report = KeywordMatcher::default().analyze(RESUME, JOB);

        assert_eq!(report.keywords.len(), 7);
        assert_eq!(report.exact_matches, vec!["python", "aws", "docker"]);
        assert!(report.fuzzy_matches.is_empty());
        assert_eq!(
            report.missing_keywords,
            vec!["looking", "engineer", "skilled", "kubernetes"]
        );
        assert_eq!(report.exact_score, 42.86);
        assert_eq!(report.partial_score, 0.0);
        // Without fuzzy hits the score equals exact coverage
        assert_eq!(report.keyword_match, 42.86);
    }

    #[test]
    fn test_identical_texts_match_fully() {
        assert_eq!(keyword_match(JOB, JOB), 100.0);
        assert_eq!(keyword_match(RESUME, RESUME), 100.0);
    }

    #[test]
    fn test_no_target_keywords() {
        assert_eq!(keyword_match(RESUME, ""), 0.0);
        assert_eq!(keyword_match(RESUME, "the and with for you"), 0.0);
        assert_eq!(keyword_density(RESUME, ""), 0.0);
    }

    #[test]
    fn test_empty_candidate() {
        let job = "Must know Go and Rust.";

        assert_eq!(keyword_match("", job), 0.0);
        assert_eq!(keyword_density("", job), 0.0);
    }

    #[test]
    fn test_fuzzy_credit() {
        // "postgresql" vs "postgres" is 89, above the threshold
        let report = KeywordMatcher::default().analyze("postgres and redis", "postgresql redis");

        assert_eq!(report.exact_matches, vec!["redis"]);
        assert_eq!(
            report.fuzzy_matches,
            vec![FuzzyMatch {
                keyword: "postgresql".to_string(),
                matched_token: "postgres".to_string(),
                similarity: 89,
            }]
        );
        assert_eq!(report.exact_score, 50.0);
        assert_eq!(report.partial_score, 25.0);
        // 0.7 * 50 + 0.3 * (50 + 25)
        assert_eq!(report.keyword_match, 57.5);
    }

    #[test]
    fn test_fuzzy_credit_is_not_deduplicated_per_token() {
        // Both keywords lean on the single resume token "kubernetes"
        let report = KeywordMatcher::default().analyze("kubernetes", "kubernete kubernetess");

        assert!(report.exact_matches.is_empty());
        assert_eq!(report.fuzzy_matches.len(), 2);
        assert!(report
            .fuzzy_matches
            .iter()
            .all(|m| m.matched_token == "kubernetes"));
        assert_eq!(report.partial_score, 50.0);
        assert_eq!(report.keyword_match, 15.0);
    }

    #[test]
    fn test_below_threshold_gets_nothing() {
        let report = KeywordMatcher::default().analyze("skills", "skilled");

        assert!(report.fuzzy_matches.is_empty());
        assert_eq!(report.missing_keywords, vec!["skilled"]);
        assert_eq!(report.keyword_match, 0.0);
    }

    #[test]
    fn test_custom_threshold_and_algorithm() {
        let matcher = KeywordMatcher::new(MatchOptions {
            fuzzy_threshold: 75,
            ..MatchOptions::default()
        });
        assert_eq!(matcher.analyze("skills", "skilled").fuzzy_matches.len(), 1);

        let matcher = KeywordMatcher::new(MatchOptions {
            fuzzy_algorithm: FuzzyAlgorithm::JaroWinkler,
            ..MatchOptions::default()
        });
        assert_eq!(matcher.analyze("skills", "skilled").fuzzy_matches.len(), 1);
    }

    #[test]
    fn test_score_is_monotonic_in_exact_keywords() {
        let job = "Rust engineer: tokio, serde, axum, postgres, kubernetes, terraform, grpc.";
        let keywords = KeywordMatcher::default().target_keywords(job);
        let mut resume = String::from("Backend developer who enjoys distributed systems");
        let mut previous = keyword_match(&resume, job);

        for keyword in keywords {
            resume.push(' ');
            resume.push_str(&keyword);
            let score = keyword_match(&resume, job);

            assert!(score >= previous, "{keyword}: {score} < {previous}");
            assert!((0.0..=100.0).contains(&score));
            previous = score;
        }

        assert_eq!(previous, 100.0);
    }

    #[test]
    fn test_keyword_density() {
        // 3 matched keywords over 8 resume tokens = 37.5%, capped
        assert_eq!(keyword_density(RESUME, JOB), 5.0);

        let resume = "python ".repeat(40);
        // 1 matched keyword over 40 tokens
        assert_eq!(keyword_density(&resume, JOB), 2.5);
    }

    #[test]
    fn test_density_counts_keywords_not_occurrences() {
        let report = KeywordMatcher::default().analyze("aws aws aws aws", "aws");

        assert_eq!(report.keyword_density, 5.0);

        let resume = format!("aws {}", "filler ".repeat(99));
        assert_eq!(keyword_density(&resume, "aws"), 1.0);
    }

    #[test]
    fn test_density_cap_is_configurable() {
        let matcher = KeywordMatcher::new(MatchOptions {
            density_cap: 100.0,
            ..MatchOptions::default()
        });

        assert_eq!(matcher.keyword_density(RESUME, JOB), 37.5);
    }

    #[test]
    fn test_density_rounds_ties_to_even() {
        // 1 matched keyword over 800 tokens = 0.125%
        let resume = format!("aws {}", "zz ".repeat(799));

        assert_eq!(keyword_density(&resume, "aws"), 0.12);
    }
}
