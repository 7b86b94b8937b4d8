//! Criteria predicates: keyword containment and minimum-experience detection.
//!
//! Both are pure substring/regex checks over already-normalized text. No
//! stemming, no synonyms: `"1 year"` never satisfies a `"2 tahun"` requirement.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::criteria::Criteria;
use crate::models::score::CriteriaFlags;

static EXPERIENCE_SPEC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)\s*(\w+)").unwrap());

/// True iff at least one non-empty keyword occurs in `text`, ignoring case.
pub fn matches_any(text: &str, keywords: &BTreeSet<String>) -> bool {
    if keywords.is_empty() {
        return false;
    }
    let haystack = text.to_lowercase();
    keywords
        .iter()
        .filter(|kw| !kw.is_empty())
        .any(|kw| haystack.contains(&kw.to_lowercase()))
}

/// Parses `spec` and checks it against `text`. A spec without a
/// `<number> <unit>` pair never matches.
pub fn matches_experience(text: &str, spec: &str) -> bool {
    ExperienceRequirement::parse(spec)
        .map(|req| req.is_met_by(text))
        .unwrap_or(false)
}

/// Minimum experience such as `2 tahun`: a count and a literal unit word.
#[derive(Debug, Clone)]
pub struct ExperienceRequirement {
    min_count: u64,
    unit: String,
    occurrence: Regex,
}

impl ExperienceRequirement {
    /// Takes the first `<digits><optional space><word>` in the lowercased spec.
    /// Anything after it (e.g. `",satu tahun"`) is ignored.
    pub fn parse(spec: &str) -> Option<Self> {
        let spec = spec.to_lowercase();
        let caps = EXPERIENCE_SPEC.captures(&spec)?;
        let min_count = parse_count(&caps[1]);
        let unit = caps[2].to_string();
        let occurrence = Regex::new(&format!(r"([0-9]+)\s*{}", regex::escape(&unit))).ok()?;
        Some(Self {
            min_count,
            unit,
            occurrence,
        })
    }

    pub fn min_count(&self) -> u64 {
        self.min_count
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// True iff any `<digits> <unit>` occurrence in `text` is at least the minimum.
    pub fn is_met_by(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.occurrence
            .captures_iter(&text)
            .any(|c| parse_count(&c[1]) >= self.min_count)
    }
}

// Digit runs too long for u64 are still "a lot of experience".
fn parse_count(digits: &str) -> u64 {
    digits.parse().unwrap_or(u64::MAX)
}

/// Evaluates every criterion against one document's text.
pub fn evaluate(text: &str, criteria: &Criteria) -> CriteriaFlags {
    CriteriaFlags {
        location: matches_any(text, &criteria.location),
        education: matches_any(text, &criteria.education),
        major: matches_any(text, &criteria.major),
        company: matches_any(text, &criteria.company),
        experience: criteria
            .min_experience
            .as_ref()
            .map(|req| req.is_met_by(text))
            .unwrap_or(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::criteria::{split_keywords, CriteriaInput};

    #[test]
    fn test_matches_any_empty_set_is_false() {
        assert!(!matches_any("apa saja", &BTreeSet::new()));
        assert!(!matches_any("", &BTreeSet::new()));
    }

    #[test]
    fn test_matches_any_substring_case_insensitive() {
        let kws = split_keywords("Semarang,jakarta");
        assert!(matches_any("domisili: kota semarang, jawa tengah", &kws));
        assert!(matches_any("Tinggal di SEMARANG", &kws));
        assert!(!matches_any("tinggal di surabaya", &kws));
    }

    #[test]
    fn test_matches_any_ignores_empty_keyword() {
        let kws: BTreeSet<String> = [String::new()].into_iter().collect();
        assert!(!matches_any("anything", &kws));
    }

    #[test]
    fn test_experience_above_minimum_matches() {
        assert!(matches_experience("punya pengalaman 3 tahun kerja", "2 tahun"));
    }

    #[test]
    fn test_experience_below_minimum_does_not_match() {
        assert!(!matches_experience("pengalaman 1 tahun", "2 tahun"));
    }

    #[test]
    fn test_experience_equal_to_minimum_matches() {
        assert!(matches_experience("pengalaman 2 tahun", "2 tahun"));
    }

    #[test]
    fn test_experience_any_occurrence_can_satisfy() {
        assert!(matches_experience(
            "magang 1 tahun, staf arsip 4 tahun",
            "3 tahun"
        ));
    }

    #[test]
    fn test_experience_unit_is_literal() {
        assert!(!matches_experience("5 years at indoraj", "2 tahun"));
        assert!(matches_experience("5 years at indoraj", "2 years"));
    }

    #[test]
    fn test_experience_whitespace_between_number_and_unit_is_optional() {
        assert!(matches_experience("pengalaman 3tahun", "2 tahun"));
        assert!(matches_experience("pengalaman 3 tahun", "2tahun"));
    }

    #[test]
    fn test_malformed_spec_never_matches() {
        assert!(!matches_experience("10 tahun", "lama"));
        assert!(!matches_experience("10 tahun", ""));
        assert!(ExperienceRequirement::parse("satu tahun").is_none());
    }

    #[test]
    fn test_spec_takes_first_pair_only() {
        let req = ExperienceRequirement::parse("1 Tahun,satu tahun").unwrap();
        assert_eq!(req.min_count(), 1);
        assert_eq!(req.unit(), "tahun");
    }

    #[test]
    fn test_unit_stops_at_punctuation() {
        let req = ExperienceRequirement::parse("2 thn.").unwrap();
        assert_eq!(req.unit(), "thn");
        assert!(req.is_met_by("kerja 3 thn"));
    }

    #[test]
    fn test_evaluate_sets_each_flag_independently() {
        let criteria = Criteria::parse(&CriteriaInput::default());
        let flags = evaluate(
            "lulusan smk jurusan administrasi, tinggal di semarang, 2 tahun",
            &criteria,
        );
        assert!(flags.location);
        assert!(flags.education);
        assert!(flags.major);
        assert!(!flags.company);
        assert!(flags.experience);
    }

    #[test]
    fn test_evaluate_without_experience_requirement() {
        let criteria = Criteria::parse(&CriteriaInput {
            experience: String::new(),
            ..CriteriaInput::default()
        });
        assert!(!evaluate("10 tahun di arsip", &criteria).experience);
    }
}
