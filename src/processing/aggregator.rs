//! Weighted aggregation of raw metrics into a bounded overall score

use crate::error::{Result, ResumeScorerError};
use crate::processing::round2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

pub const KEYWORD_MATCH: &str = "keyword_match";
pub const SECTION_MATCH: &str = "section_match";
pub const KEYWORD_DENSITY: &str = "keyword_density";

/// Sigmoid steepness; 50 is the fixed point of the transform.
const SIGMOID_SLOPE: f64 = 0.1;
const SIGMOID_MIDPOINT: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreSet {
    pub keyword_match: f64,
    pub section_match: f64,
    pub keyword_density: f64,
    /// Zero until the set has been through [`aggregate`]
    pub overall_score: f64,
}

impl ScoreSet {
    pub fn new(keyword_match: f64, section_match: f64, keyword_density: f64) -> Self {
        Self {
            keyword_match,
            section_match,
            keyword_density,
            overall_score: 0.0,
        }
    }

    /// Raw metric by name. Unknown names have no value.
    pub fn metric(&self, name: &str) -> Option<f64> {
        match name {
            KEYWORD_MATCH => Some(self.keyword_match),
            SECTION_MATCH => Some(self.section_match),
            KEYWORD_DENSITY => Some(self.keyword_density),
            _ => None,
        }
    }
}

/// Non-negative weights per metric name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct ScoreWeights {
    weights: BTreeMap<String, f64>,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            weights: BTreeMap::from([
                (KEYWORD_MATCH.to_string(), 0.6),
                (SECTION_MATCH.to_string(), 0.2),
                (KEYWORD_DENSITY.to_string(), 0.2),
            ]),
        }
    }
}

impl ScoreWeights {
    pub fn new<I, K>(weights: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let mut map = BTreeMap::new();
        for (name, weight) in weights {
            let name = name.into();
            if !weight.is_finite() || weight < 0.0 {
                return Err(ResumeScorerError::InvalidInput(format!(
                    "Weight for '{}' must be a non-negative number, got {}",
                    name, weight
                )));
            }
            map.insert(name, weight);
        }

        Ok(Self { weights: map })
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.weights.get(name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(name, weight)| (name.as_str(), *weight))
    }

    /// Weights scaled to sum to one. An all-zero map is split evenly across
    /// its keys instead.
    pub fn normalized(&self) -> BTreeMap<String, f64> {
        let total: f64 = self.weights.values().sum();
        let count = self.weights.len() as f64;

        self.weights
            .iter()
            .map(|(name, weight)| {
                let share = if total == 0.0 { 1.0 / count } else { weight / total };
                (name.clone(), share)
            })
            .collect()
    }
}

impl TryFrom<BTreeMap<String, f64>> for ScoreWeights {
    type Error = ResumeScorerError;

    fn try_from(map: BTreeMap<String, f64>) -> Result<Self> {
        Self::new(map)
    }
}

impl From<ScoreWeights> for BTreeMap<String, f64> {
    fn from(weights: ScoreWeights) -> Self {
        weights.weights
    }
}

/// Parses `name=weight` pairs separated by commas, e.g.
/// `keyword_match=0.5,section_match=0.5`.
impl FromStr for ScoreWeights {
    type Err = ResumeScorerError;

    fn from_str(s: &str) -> Result<Self> {
        let mut pairs = Vec::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (name, value) = part.split_once('=').ok_or_else(|| {
                ResumeScorerError::InvalidInput(format!("Expected name=weight, got '{}'", part))
            })?;
            let value: f64 = value.trim().parse().map_err(|_| {
                ResumeScorerError::InvalidInput(format!("Invalid weight value in '{}'", part))
            })?;
            pairs.push((name.trim().to_string(), value));
        }

        if pairs.is_empty() {
            return Err(ResumeScorerError::InvalidInput(
                "No weights given".to_string(),
            ));
        }

        Self::new(pairs)
    }
}

/// Logistic map centered on 50, bounded to (0, 100).
pub fn sigmoid(weighted: f64) -> f64 {
    100.0 / (1.0 + (-SIGMOID_SLOPE * (weighted - SIGMOID_MIDPOINT)).exp())
}

/// Combine raw metrics into `overall_score`.
///
/// Metrics named in `weights` but unknown to the score set contribute zero.
/// An empty weight map yields the sigmoid of zero.
pub fn aggregate(scores: ScoreSet, weights: &ScoreWeights) -> ScoreSet {
    let weighted: f64 = weights
        .normalized()
        .iter()
        .map(|(name, weight)| scores.metric(name).unwrap_or(0.0) * weight)
        .sum();

    ScoreSet {
        overall_score: round2(sigmoid(weighted)),
        ..scores
    }
}

/// Fill in `overall_score`, using the default weights when none are given.
pub fn calculate_final_score(scores: ScoreSet, weights: Option<&ScoreWeights>) -> ScoreSet {
    match weights {
        Some(weights) => aggregate(scores, weights),
        None => aggregate(scores, &ScoreWeights::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let total: f64 = ScoreWeights::default().normalized().values().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_midpoint_maps_to_fifty() {
        let scores = calculate_final_score(ScoreSet::new(50.0, 50.0, 50.0), None);

        assert_eq!(scores.overall_score, 50.0);
        assert_eq!(scores.keyword_match, 50.0);
    }

    #[test]
    fn test_default_weighting() {
        // weighted = 0.6 * 80 + 0.2 * 60 + 0.2 * 5 = 61
        let scores = calculate_final_score(ScoreSet::new(80.0, 60.0, 5.0), None);

        assert_eq!(scores.overall_score, round2(sigmoid(61.0)));
        assert_eq!(scores.overall_score, 75.03);
    }

    #[test]
    fn test_weights_are_normalized() {
        let scaled = ScoreWeights::new([
            (KEYWORD_MATCH, 6.0),
            (SECTION_MATCH, 2.0),
            (KEYWORD_DENSITY, 2.0),
        ])
        .unwrap();
        let raw = ScoreSet::new(72.5, 80.0, 3.1);

        assert_eq!(
            aggregate(raw, &scaled).overall_score,
            calculate_final_score(raw, None).overall_score
        );
    }

    #[test]
    fn test_zero_weights_fall_back_to_equal_split() {
        let zero = ScoreWeights::new([(KEYWORD_MATCH, 0.0), (SECTION_MATCH, 0.0)]).unwrap();
        let normalized = zero.normalized();

        assert_eq!(normalized[KEYWORD_MATCH], 0.5);
        assert_eq!(normalized[SECTION_MATCH], 0.5);

        // weighted = (40 + 60) / 2
        let scores = aggregate(ScoreSet::new(40.0, 60.0, 0.0), &zero);
        assert_eq!(scores.overall_score, 50.0);
    }

    #[test]
    fn test_unknown_metrics_contribute_zero() {
        let weights = ScoreWeights::new([(KEYWORD_MATCH, 1.0), ("readability", 1.0)]).unwrap();

        // weighted = 0.5 * 100 + 0.5 * 0
        let scores = aggregate(ScoreSet::new(100.0, 0.0, 0.0), &weights);
        assert_eq!(scores.overall_score, 50.0);
    }

    #[test]
    fn test_sigmoid_bounds() {
        assert!(sigmoid(0.0) > 0.0);
        assert!(sigmoid(100.0) < 100.0);
        assert_eq!(round2(sigmoid(0.0)), 0.67);
        assert_eq!(round2(sigmoid(100.0)), 99.33);
        assert!(sigmoid(40.0) < sigmoid(60.0));
    }

    #[test]
    fn test_rejects_negative_and_non_finite_weights() {
        assert!(ScoreWeights::new([(KEYWORD_MATCH, -0.1)]).is_err());
        assert!(ScoreWeights::new([(KEYWORD_MATCH, f64::NAN)]).is_err());
        assert!(ScoreWeights::new([(KEYWORD_MATCH, f64::INFINITY)]).is_err());
    }

    #[test]
    fn test_parse_weights() {
        let weights: ScoreWeights = "keyword_match=0.5, section_match = 0.5".parse().unwrap();

        assert_eq!(weights.get(KEYWORD_MATCH), Some(0.5));
        assert_eq!(weights.get(SECTION_MATCH), Some(0.5));
        assert_eq!(weights.get(KEYWORD_DENSITY), None);

        assert!("keyword_match".parse::<ScoreWeights>().is_err());
        assert!("keyword_match=high".parse::<ScoreWeights>().is_err());
        assert!("".parse::<ScoreWeights>().is_err());
    }

    #[test]
    fn test_serializes_with_metric_names() {
        let json = serde_json::to_value(ScoreSet::new(1.0, 2.0, 3.0)).unwrap();

        assert_eq!(json["keyword_match"], 1.0);
        assert_eq!(json["section_match"], 2.0);
        assert_eq!(json["keyword_density"], 3.0);
        assert_eq!(json["overall_score"], 0.0);
    }

    #[test]
    fn test_weights_deserialize_with_validation() {
        let weights: ScoreWeights =
            serde_json::from_str(r#"{"keyword_match": 1.0, "section_match": 3.0}"#).unwrap();
        assert_eq!(weights.normalized()[SECTION_MATCH], 0.75);

        let invalid = serde_json::from_str::<ScoreWeights>(r#"{"keyword_match": -1.0}"#);
        assert!(invalid.is_err());
    }
}
