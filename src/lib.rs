//! Resume scorer library
//!
//! Scores a resume against a job description with keyword coverage, section
//! presence and keyword density, then folds the three into one overall score.
//!
//! ```
//! use resume_scorer::{calculate_final_score, get_score};
//!
//! let raw = get_score(
//!     "Experienced Python developer with AWS and Docker skills.",
//!     "Looking for a Python engineer skilled in AWS, Docker, and Kubernetes.",
//! );
//! assert_eq!(raw.overall_score, 0.0);
//!
//! let scores = calculate_final_score(raw, None);
//! assert!(scores.overall_score > 0.0 && scores.overall_score < 100.0);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;

pub use config::Config;
pub use error::{Result, ResumeScorerError};
pub use processing::{
    calculate_final_score, extract_keywords, get_score, get_score_bytes, keyword_density,
    keyword_match, section_match, tokenize, ScoreSet, ScoreWeights, ScoringEngine,
};
