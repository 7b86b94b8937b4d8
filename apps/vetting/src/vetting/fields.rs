//! Contact field extraction: allow-listed email domains and Indonesian
//! mobile numbers. Heuristic by intent, not an RFC-grade validator.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[\w.-]+@(?:gmail\.com|yahoo\.com)").unwrap());

static PHONE_SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s-]").unwrap());

/// (pattern, prefix re-attached to the captured digits)
static PHONE_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (Regex::new(r"\+62([0-9]{8,14})").unwrap(), "+62"),
        (Regex::new(r"62\+([0-9]{8,14})").unwrap(), "62+"),
        (Regex::new(r"08([0-9]{8,14})").unwrap(), "08"),
    ]
});

/// Addresses at gmail.com or yahoo.com only; every other domain is ignored.
pub fn extract_emails(text: &str) -> BTreeSet<String> {
    EMAIL
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Strips whitespace and hyphens, then unions the `+62`, `62+` and `08`
/// patterns. Each pattern runs independently, so one digit run bordering two
/// prefixes is reported under both.
pub fn extract_phone_numbers(text: &str) -> BTreeSet<String> {
    let cleaned = PHONE_SEPARATORS.replace_all(text, "");
    PHONE_PATTERNS
        .iter()
        .flat_map(|(re, prefix)| {
            re.captures_iter(&cleaned)
                .map(move |c| format!("{prefix}{}", &c[1]))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emails_only_allow_listed_domains() {
        let emails = extract_emails("kontak: budi.s@gmail.com, foo@outlook.com, sari-w@yahoo.com");
        assert!(emails.contains("budi.s@gmail.com"));
        assert!(emails.contains("sari-w@yahoo.com"));
        assert!(!emails.iter().any(|e| e.ends_with("@outlook.com")));
        assert_eq!(emails.len(), 2);
    }

    #[test]
    fn test_emails_domain_case_insensitive() {
        let emails = extract_emails("BUDI@GMAIL.COM");
        assert_eq!(emails.len(), 1);
        assert!(emails.iter().all(|e| e.to_lowercase().ends_with("@gmail.com")));
    }

    #[test]
    fn test_emails_deduplicated() {
        let emails = extract_emails("a@gmail.com a@gmail.com a@gmail.com");
        assert_eq!(emails.len(), 1);
    }

    #[test]
    fn test_no_emails_in_plain_text() {
        assert!(extract_emails("tidak ada surel di sini").is_empty());
    }

    #[test]
    fn test_phone_spaces_are_stripped() {
        let phones = extract_phone_numbers("call 0812 3456 789012");
        assert!(phones.contains("08123456789012"));
    }

    #[test]
    fn test_phone_hyphens_are_stripped() {
        let phones = extract_phone_numbers("hp: 0812-3456-7890");
        assert!(phones.contains("081234567890"));
    }

    #[test]
    fn test_phone_international_prefixes() {
        let phones = extract_phone_numbers("wa +62 812 3456 7890 / 62+81234567890");
        assert!(phones.contains("+6281234567890"));
        assert!(phones.contains("62+81234567890"));
    }

    #[test]
    fn test_phone_too_short_is_ignored() {
        assert!(extract_phone_numbers("08123").is_empty());
    }

    #[test]
    fn test_phone_overlapping_prefixes_reported_twice() {
        // "62+08..." satisfies both the 62+ and the 08 pattern.
        let phones = extract_phone_numbers("62+081234567890");
        assert!(phones.contains("62+081234567890"));
        assert!(phones.contains("081234567890"));
    }

    #[test]
    fn test_phone_digit_run_capped_at_fourteen() {
        let phones = extract_phone_numbers("0812345678901234567");
        assert_eq!(phones.len(), 1);
        assert!(phones.contains("0812345678901234"));
    }
}
