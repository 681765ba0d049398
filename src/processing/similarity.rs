//! String similarity ratios on a 0-100 scale

use serde::{Deserialize, Serialize};
use strsim::{jaro_winkler, normalized_levenshtein};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuzzyAlgorithm {
    /// Insertion/deletion ratio, `2 * LCS / (|a| + |b|)`. This is the classic
    /// fuzzy-string "ratio" and the one the 85 threshold is calibrated for.
    #[default]
    Indel,
    Levenshtein,
    JaroWinkler,
}

impl FuzzyAlgorithm {
    /// Similarity between `a` and `b`, rounded to a whole number in 0..=100.
    pub fn ratio(&self, a: &str, b: &str) -> u8 {
        let similarity = match self {
            FuzzyAlgorithm::Indel => indel_similarity(a, b),
            FuzzyAlgorithm::Levenshtein => normalized_levenshtein(a, b),
            FuzzyAlgorithm::JaroWinkler => jaro_winkler(a, b),
        };

        (similarity * 100.0).round_ties_even().clamp(0.0, 100.0) as u8
    }

    /// Highest ratio any pair with these character lengths could reach, if it
    /// can be bounded from lengths alone.
    pub fn length_bound(&self, len_a: usize, len_b: usize) -> Option<u8> {
        match self {
            FuzzyAlgorithm::Indel => {
                let total = len_a + len_b;
                if total == 0 {
                    return Some(100);
                }
                let best = 2.0 * len_a.min(len_b) as f64 / total as f64;
                Some((best * 100.0).round_ties_even() as u8)
            }
            FuzzyAlgorithm::Levenshtein => {
                let longest = len_a.max(len_b);
                if longest == 0 {
                    return Some(100);
                }
                let best = len_a.min(len_b) as f64 / longest as f64;
                Some((best * 100.0).round_ties_even() as u8)
            }
            FuzzyAlgorithm::JaroWinkler => None,
        }
    }
}

impl std::fmt::Display for FuzzyAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FuzzyAlgorithm::Indel => write!(f, "indel"),
            FuzzyAlgorithm::Levenshtein => write!(f, "levenshtein"),
            FuzzyAlgorithm::JaroWinkler => write!(f, "jaro_winkler"),
        }
    }
}

/// `2 * LCS(a, b) / (|a| + |b|)`, counted in chars.
pub fn indel_similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();

    if total == 0 {
        return 1.0;
    }

    2.0 * longest_common_subsequence(&a, &b) as f64 / total as f64
}

fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    // Two rolling rows over the shorter side
    let (outer, inner) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut previous = vec![0usize; inner.len() + 1];
    let mut current = vec![0usize; inner.len() + 1];

    for &x in outer {
        for (j, &y) in inner.iter().enumerate() {
            current[j + 1] = if x == y {
                previous[j] + 1
            } else {
                previous[j + 1].max(current[j])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[inner.len()]
}
