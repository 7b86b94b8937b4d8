use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::vetting::matcher::ExperienceRequirement;

/// Raw criteria as typed into the vetting form: four comma-separated keyword
/// lists and one free-text experience requirement such as `"2 tahun"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriteriaInput {
    pub location: String,
    pub education: String,
    pub major: String,
    pub company: String,
    pub experience: String,
}

impl Default for CriteriaInput {
    fn default() -> Self {
        Self {
            location: "semarang".to_string(),
            education: "univ,smk,sma".to_string(),
            major: "kearsipan,perpustakaan,administrasi".to_string(),
            company: "indoraj,arsip".to_string(),
            experience: "1 tahun,satu tahun".to_string(),
        }
    }
}

/// Parsed criteria, built once per run and shared read-only by every document.
#[derive(Debug, Clone, Default)]
pub struct Criteria {
    pub location: BTreeSet<String>,
    pub education: BTreeSet<String>,
    pub major: BTreeSet<String>,
    pub company: BTreeSet<String>,
    /// `None` disables experience scoring for the whole run.
    pub min_experience: Option<ExperienceRequirement>,
}

impl Criteria {
    pub fn parse(input: &CriteriaInput) -> Self {
        let experience = input.experience.trim();
        let min_experience = if experience.is_empty() {
            None
        } else {
            let parsed = ExperienceRequirement::parse(experience);
            if parsed.is_none() {
                tracing::warn!(
                    experience,
                    "Experience requirement has no '<number> <unit>' pair; experience scoring disabled"
                );
            }
            parsed
        };

        Self {
            location: split_keywords(&input.location),
            education: split_keywords(&input.education),
            major: split_keywords(&input.major),
            company: split_keywords(&input.company),
            min_experience,
        }
    }
}

/// Splits a comma-separated field into trimmed, lowercased, non-empty keywords.
pub fn split_keywords(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}
