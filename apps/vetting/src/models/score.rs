use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::document::DocumentFormat;

/// Points awarded per satisfied criterion. The sum is the maximum score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weights {
    pub location: u32,
    pub education: u32,
    pub major: u32,
    pub company: u32,
    pub experience: u32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            location: 10,
            education: 20,
            major: 20,
            company: 20,
            experience: 10,
        }
    }
}

impl Weights {
    pub fn max_score(&self) -> u32 {
        self.location + self.education + self.major + self.company + self.experience
    }
}

/// Outcome of each criterion check against one document's text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriteriaFlags {
    pub location: bool,
    pub education: bool,
    pub major: bool,
    pub company: bool,
    pub experience: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Rejected,
    Eligible,
    HighlyEligible,
}

impl Category {
    /// Output bucket for routed files. Rejected documents are never persisted.
    pub fn bucket(self) -> Option<&'static str> {
        match self {
            Category::HighlyEligible => Some("HighlyEligible"),
            Category::Eligible => Some("Eligible"),
            Category::Rejected => None,
        }
    }

    /// Label shown to reviewers in status lines.
    pub fn label(self) -> &'static str {
        match self {
            Category::HighlyEligible => "BAGUS SEKALI",
            Category::Eligible => "LAYAK",
            Category::Rejected => "Ditolak",
        }
    }

    pub fn is_accepted(self) -> bool {
        self != Category::Rejected
    }
}

/// How the document's text was obtained. Mirrors `ExtractedText` without the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum ExtractionStatus {
    Extracted,
    Unsupported,
    Failed(String),
}

/// Terminal per-document artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub file_name: String,
    pub format: DocumentFormat,
    pub extraction: ExtractionStatus,
    pub flags: CriteriaFlags,
    pub score: u32,
    pub category: Category,
    pub emails: BTreeSet<String>,
    pub phones: BTreeSet<String>,
}
