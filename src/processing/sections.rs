//! Resume section presence detection

use crate::processing::round2;
use regex::RegexSet;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionCategory {
    Experience,
    Education,
    Skills,
    Projects,
    Achievements,
}

impl SectionCategory {
    pub const ALL: [SectionCategory; 5] = [
        SectionCategory::Experience,
        SectionCategory::Education,
        SectionCategory::Skills,
        SectionCategory::Projects,
        SectionCategory::Achievements,
    ];

    /// Patterns for this category, matched against lowercased text.
    pub fn patterns(&self) -> &'static [&'static str] {
        match self {
            SectionCategory::Experience => &[
                r"work\s*experience",
                r"professional\s*experience",
                r"employment\s*history",
                r"\bexperience\b",
            ],
            SectionCategory::Education => &[
                r"education",
                r"academic\s*background",
                r"degrees",
                r"qualifications",
                r"certifications",
            ],
            SectionCategory::Skills => &[
                r"technical\s*skills",
                r"key\s*skills",
                r"core\s*competencies",
                r"skills\s*summary",
                r"\bskills\b",
            ],
            SectionCategory::Projects => &[
                r"projects",
                r"personal\s*projects",
                r"academic\s*projects",
                r"selected\s*projects",
            ],
            SectionCategory::Achievements => {
                &[r"achievements", r"accomplishments", r"awards", r"honors"]
            }
        }
    }
}

impl std::fmt::Display for SectionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionCategory::Experience => write!(f, "Experience"),
            SectionCategory::Education => write!(f, "Education"),
            SectionCategory::Skills => write!(f, "Skills"),
            SectionCategory::Projects => write!(f, "Projects"),
            SectionCategory::Achievements => write!(f, "Achievements"),
        }
    }
}

static SECTION_MATCHERS: LazyLock<Vec<(SectionCategory, RegexSet)>> = LazyLock::new(|| {
    SectionCategory::ALL
        .iter()
        .map(|category| {
            let set = RegexSet::new(category.patterns()).expect("Invalid section pattern");
            (*category, set)
        })
        .collect()
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionReport {
    pub detected: Vec<SectionCategory>,
    pub missing: Vec<SectionCategory>,
    pub score: f64,
}

/// Check which section categories the text mentions.
///
/// Presence only: one hit is enough for a category and further hits add
/// nothing.
pub fn detect_sections(text: &str) -> SectionReport {
    let lowered = text.to_lowercase();
    let (detected, missing): (Vec<_>, Vec<_>) = SECTION_MATCHERS
        .iter()
        .partition(|(_, set)| set.is_match(&lowered));

    let detected: Vec<SectionCategory> = detected.into_iter().map(|(c, _)| *c).collect();
    let missing: Vec<SectionCategory> = missing.into_iter().map(|(c, _)| *c).collect();
    let score = round2(detected.len() as f64 / SectionCategory::ALL.len() as f64 * 100.0);

    SectionReport {
        detected,
        missing,
        score,
    }
}

/// Percentage of section categories present in `text`.
pub fn section_match(text: &str) -> f64 {
    detect_sections(text).score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_resume_detects_everything() {
        let text = "Jane Doe\n\nWORK EXPERIENCE\nAcme Corp\n\nEducation\nBSc\n\nTechnical Skills\nRust\n\n\
                    Selected Projects\nscorer\n\nAwards\nHackathon winner";

        let report = detect_sections(text);

        assert_eq!(report.detected, SectionCategory::ALL.to_vec());
        assert!(report.missing.is_empty());
        assert_eq!(report.score, 100.0);
    }

    #[test]
    fn test_partial_resume() {
        let report = detect_sections("Experience: 5 years. Skills: Python, AWS.");

        assert_eq!(
            report.detected,
            vec![SectionCategory::Experience, SectionCategory::Skills]
        );
        assert_eq!(
            report.missing,
            vec![
                SectionCategory::Education,
                SectionCategory::Projects,
                SectionCategory::Achievements
            ]
        );
        assert_eq!(report.score, 40.0);
    }

    #[test]
    fn test_word_boundaries() {
        // "experienced" and "skillset" do not satisfy the \b patterns
        assert_eq!(section_match("Experienced developer with a broad skillset"), 0.0);
        assert_eq!(section_match("Experienced Python developer with AWS and Docker skills."), 20.0);
    }

    #[test]
    fn test_multiple_hits_count_once() {
        assert_eq!(section_match("awards, honors, achievements, accomplishments"), 20.0);
    }

    #[test]
    fn test_scores_are_multiples_of_twenty() {
        let samples = [
            "",
            "projects",
            "education and projects",
            "key skills; employment history; degrees",
            "experience skills projects awards",
            "professional experience, qualifications, core competencies, personal projects, honors",
        ];

        for sample in samples {
            let score = section_match(sample);
            assert!([0.0, 20.0, 40.0, 60.0, 80.0, 100.0].contains(&score), "{sample}: {score}");
        }
    }

    #[test]
    fn test_empty_text() {
        let report = detect_sections("");

        assert!(report.detected.is_empty());
        assert_eq!(report.missing.len(), 5);
        assert_eq!(report.score, 0.0);
    }
}
