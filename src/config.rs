//! Configuration management for the resume scorer

use crate::error::{Result, ResumeScorerError};
use crate::processing::aggregator::ScoreWeights;
use crate::processing::keywords::{DEFAULT_MIN_WORD_LENGTH, DEFAULT_TOP_N};
use crate::processing::matcher::{MatchOptions, DEFAULT_DENSITY_CAP};
use crate::processing::scorer::ScoringEngine;
use crate::processing::similarity::FuzzyAlgorithm;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub top_n: usize,
    pub min_word_length: usize,
    pub fuzzy_threshold: u8,
    pub fuzzy_algorithm: FuzzyAlgorithm,
    pub partial_credit: f64,
    pub density_cap: f64,
    pub weights: ScoreWeights,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
            fuzzy_threshold: 85,
            fuzzy_algorithm: FuzzyAlgorithm::Indel,
            partial_credit: 0.5,
            density_cap: DEFAULT_DENSITY_CAP,
            weights: ScoreWeights::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl ScoringConfig {
    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            top_n: self.top_n,
            min_word_length: self.min_word_length,
            fuzzy_threshold: self.fuzzy_threshold,
            fuzzy_algorithm: self.fuzzy_algorithm,
            partial_credit: self.partial_credit,
            density_cap: self.density_cap,
        }
    }

    pub fn engine(&self) -> ScoringEngine {
        ScoringEngine::new(self.match_options(), self.weights.clone())
    }
}

impl Config {
    /// Load from `path`, or from the default location when `None`.
    ///
    /// An explicit path must exist. The default file is created with default
    /// values on first use.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ResumeScorerError::Configuration(format!(
                        "Config file does not exist: {}",
                        path.display()
                    )));
                }
                Self::load_from(path)
            }
            None => {
                let config_path = Self::config_path();
                if config_path.exists() {
                    Self::load_from(&config_path)
                } else {
                    let config = Self::default();
                    config.save_to(&config_path)?;
                    info!("Wrote default configuration to {}", config_path.display());
                    Ok(config)
                }
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            ResumeScorerError::Configuration(format!("Failed to parse config: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Overwrite the file at `path` (or the default location) with default
    /// values. The existing file is never read.
    pub fn reset(path: Option<&Path>) -> Result<PathBuf> {
        let path = Self::resolve_path(path);
        Self::default().save_to(&path)?;
        info!("Reset configuration at {}", path.display());
        Ok(path)
    }

    pub fn resolve_path(path: Option<&Path>) -> PathBuf {
        path.map(Path::to_path_buf).unwrap_or_else(Self::config_path)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| {
            ResumeScorerError::Configuration(format!("Failed to serialize config: {}", e))
        })
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-scorer")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let scoring = &self.scoring;

        if scoring.min_word_length == 0 {
            return Err(ResumeScorerError::Configuration(
                "scoring.min_word_length must be at least 1".to_string(),
            ));
        }
        if scoring.fuzzy_threshold > 100 {
            return Err(ResumeScorerError::Configuration(format!(
                "scoring.fuzzy_threshold must be within 0-100, got {}",
                scoring.fuzzy_threshold
            )));
        }
        if !(0.0..=1.0).contains(&scoring.partial_credit) {
            return Err(ResumeScorerError::Configuration(format!(
                "scoring.partial_credit must be within 0-1, got {}",
                scoring.partial_credit
            )));
        }
        if !(scoring.density_cap.is_finite() && scoring.density_cap >= 0.0) {
            return Err(ResumeScorerError::Configuration(format!(
                "scoring.density_cap must be a non-negative number, got {}",
                scoring.density_cap
            )));
        }

        Ok(())
    }
}
