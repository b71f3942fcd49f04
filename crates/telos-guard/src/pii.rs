//! PII (Personally Identifiable Information) detection and removal
//!
//! The patterns are deliberately broad heuristics, not validators: there is
//! no Luhn check on card numbers and no range check on SSNs. Known limits:
//!
//! - the address pattern is US-centric and both over- and under-matches
//!   international formats;
//! - the passport pattern (1-2 capitals + 6-9 digits) also hits part numbers
//!   and other alphanumeric IDs;
//! - spans that match several categories are resolved purely by category
//!   order, so a later category only sees what earlier ones left behind.

use std::borrow::Cow;
use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

use crate::types::{PiiCategory, PiiFinding, PiiMatch, ScrubResult};

/// Detection patterns, indexed by [`PiiCategory::position`]
static PATTERNS: Lazy<PiiPatterns> = Lazy::new(PiiPatterns::new);

struct PiiPatterns {
    by_category: [Regex; 7],
}

impl PiiPatterns {
    fn new() -> Self {
        Self {
            by_category: [
                // Phone: optional +country code, optional (area), 10 core digits
                Regex::new(r"(?:\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").unwrap(),
                // Email addresses
                Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap(),
                // SSN: 123-45-6789 only
                Regex::new(r"\b\d{3}-\d{2}-\d{4}\b").unwrap(),
                // Credit cards: four groups of four, space or hyphen optional
                Regex::new(r"\b\d{4}[\s-]?\d{4}[\s-]?\d{4}[\s-]?\d{4}\b").unwrap(),
                // Street addresses: number, one or more words, street suffix
                Regex::new(
                    r"(?i)\b\d+\s+(?:[a-z]+\s+)+(?:street|st|avenue|ave|road|rd|highway|hwy|square|sq|trail|trl|drive|dr|court|ct|parkway|pkwy|circle|cir|boulevard|blvd)\b",
                )
                .unwrap(),
                // EIN: 12-3456789
                Regex::new(r"\b\d{2}-\d{7}\b").unwrap(),
                // Passport: one or two capitals then 6-9 digits
                Regex::new(r"\b[A-Z]{1,2}\d{6,9}\b").unwrap(),
            ],
        }
    }

    fn get(&self, category: PiiCategory) -> &Regex {
        &self.by_category[category.position()]
    }
}

/// Pattern used to detect a category
pub fn pattern(category: PiiCategory) -> &'static Regex {
    PATTERNS.get(category)
}

/// Remove every PII match from `text`.
///
/// Each category is detected against the original text and counted by
/// distinct matched substring. Replacement is a fold over the categories in
/// order, re-applying every pattern to the text left by the previous step,
/// repeated until no pattern matches: a token can open a word boundary that
/// exposes a value no pattern saw in the original. Never fails: text
/// without PII yields an empty findings list.
pub fn scrub(text: &str) -> ScrubResult {
    let findings: Vec<PiiFinding> = PiiCategory::ALL
        .iter()
        .filter_map(|&category| {
            let count = distinct_matches(category, text).len();
            (count > 0).then(|| PiiFinding::new(category, count))
        })
        .collect();

    let mut cleaned = text.to_string();
    // Terminates: every pattern needs a digit or '@', tokens carry neither
    while let Some(next) = redact_pass(&cleaned) {
        cleaned = next;
    }

    let total_removed = findings.iter().map(|f| f.count).sum();

    ScrubResult {
        cleaned,
        findings,
        total_removed,
    }
}

/// One replacement fold over all categories; `None` when nothing matched
fn redact_pass(text: &str) -> Option<String> {
    let (cleaned, changed) = PiiCategory::ALL.iter().fold(
        (text.to_string(), false),
        |(cleaned, changed), &category| {
            let replaced =
                match pattern(category).replace_all(&cleaned, NoExpand(category.token())) {
                    Cow::Borrowed(_) => None,
                    Cow::Owned(replaced) => Some(replaced),
                };
            match replaced {
                Some(replaced) => (replaced, true),
                None => (cleaned, changed),
            }
        },
    );
    changed.then_some(cleaned)
}

/// Distinct values matched per category, in category order.
///
/// Categories with no match are omitted.
pub fn detect(text: &str) -> Vec<PiiMatch> {
    PiiCategory::ALL
        .iter()
        .filter_map(|&category| {
            let values = distinct_matches(category, text);
            if values.is_empty() {
                None
            } else {
                Some(PiiMatch {
                    category,
                    values: values.into_iter().map(str::to_string).collect(),
                })
            }
        })
        .collect()
}

/// Check whether any category matches
pub fn contains_pii(text: &str) -> bool {
    PiiCategory::ALL
        .iter()
        .any(|&category| pattern(category).is_match(text))
}

fn distinct_matches(category: PiiCategory, text: &str) -> BTreeSet<&str> {
    pattern(category)
        .find_iter(text)
        .map(|m| m.as_str())
        .collect()
}

/// Stateless handle over the shared pattern table
#[derive(Debug, Clone, Copy, Default)]
pub struct PiiScrubber;

impl PiiScrubber {
    pub fn new() -> Self {
        Self
    }

    /// See [`scrub`]
    pub fn scrub(&self, text: &str) -> ScrubResult {
        scrub(text)
    }

    /// See [`detect`]
    pub fn detect(&self, text: &str) -> Vec<PiiMatch> {
        detect(text)
    }

    /// See [`contains_pii`]
    pub fn contains_pii(&self, text: &str) -> bool {
        contains_pii(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only(category: PiiCategory, text: &str) -> ScrubResult {
        let result = scrub(text);
        assert_eq!(
            result.findings.iter().map(|f| f.category).collect::<Vec<_>>(),
            vec![category],
            "unexpected categories for {:?}: {:?}",
            text,
            result.findings
        );
        result
    }

    #[test]
    fn test_phone_numbers() {
        let result = scrub("Call me at 555-123-4567 or (555) 987-6543");

        assert!(!result.cleaned.contains("555-123-4567"));
        assert!(!result.cleaned.contains("987-6543"));
        assert!(result.cleaned.contains("[PHONE_REMOVED]"));
        assert_eq!(result.count_for(PiiCategory::Phone), 2);
        assert_eq!(
            result.cleaned,
            "Call me at [PHONE_REMOVED] or [PHONE_REMOVED]"
        );
    }

    #[test]
    fn test_phone_with_country_code() {
        let result = only(PiiCategory::Phone, "Reach me on +1 415.555.0199 today");
        assert_eq!(result.cleaned, "Reach me on [PHONE_REMOVED] today");
    }

    #[test]
    fn test_email() {
        let result = only(
            PiiCategory::Email,
            "Contact john.doe@example.com for more info",
        );
        assert!(result.cleaned.contains("[EMAIL_REMOVED]"));
        assert!(!result.cleaned.contains("john.doe@example.com"));
    }

    #[test]
    fn test_ssn() {
        let result = only(PiiCategory::Ssn, "My SSN is 123-45-6789");
        assert_eq!(result.cleaned, "My SSN is [SSN_REMOVED]");
    }

    #[test]
    fn test_ssn_requires_hyphens() {
        let result = scrub("Reference 123 45 6789 is not an SSN");
        assert_eq!(result.count_for(PiiCategory::Ssn), 0);
    }

    #[test]
    fn test_credit_card_separators() {
        let result = only(
            PiiCategory::CreditCard,
            "Cards: 4111 1111 1111 1111 and 5500-0000-0000-0004.",
        );
        assert_eq!(result.count_for(PiiCategory::CreditCard), 2);
        assert_eq!(
            result.cleaned,
            "Cards: [CREDIT_CARD_REMOVED] and [CREDIT_CARD_REMOVED]."
        );
    }

    #[test]
    fn test_street_address_case_insensitive() {
        let result = only(PiiCategory::Address, "Office: 221 baker STREET, London");
        assert_eq!(result.cleaned, "Office: [ADDRESS_REMOVED], London");

        let result = only(PiiCategory::Address, "Ship to 1600 Pennsylvania Ave please");
        assert_eq!(result.cleaned, "Ship to [ADDRESS_REMOVED] please");
    }

    #[test]
    fn test_address_suffix_needs_word_boundary() {
        let result = scrub("I studied for 4 years at Stanford");
        assert_eq!(result.count_for(PiiCategory::Address), 0);
    }

    #[test]
    fn test_tax_id() {
        let result = only(PiiCategory::TaxId, "Our EIN is 12-3456789.");
        assert_eq!(result.cleaned, "Our EIN is [TAX_ID_REMOVED].");
    }

    #[test]
    fn test_passport() {
        let result = only(PiiCategory::Passport, "Passport X1234567 issued 2019");
        assert_eq!(result.cleaned, "Passport [PASSPORT_REMOVED] issued 2019");

        // Lowercase prefixes are not passports
        assert_eq!(scrub("code ab1234567").total_removed, 0);
    }

    #[test]
    fn test_clean_text_untouched() {
        let input = "This is a clean CV with no sensitive information";
        let result = scrub(input);

        assert_eq!(result.cleaned, input);
        assert_eq!(result.total_removed, 0);
        assert!(result.findings.is_empty());
        assert!(!result.is_modified());
    }

    #[test]
    fn test_empty_input() {
        let result = scrub("");
        assert_eq!(result, ScrubResult::clean(""));
    }

    #[test]
    fn test_count_is_distinct_not_occurrences() {
        let text = "a@b.io wrote to c@d.io, then a@b.io replied";
        let result = scrub(text);

        assert_eq!(result.count_for(PiiCategory::Email), 2);
        assert_eq!(result.total_removed, 2);
        // Every occurrence is still replaced
        assert_eq!(result.cleaned.matches("[EMAIL_REMOVED]").count(), 3);
    }

    #[test]
    fn test_dedup_is_case_sensitive() {
        let result = scrub("A@B.io and a@b.io");
        assert_eq!(result.count_for(PiiCategory::Email), 2);
    }

    #[test]
    fn test_findings_follow_category_order() {
        let text = "Passport AB123456, EIN 98-7654321, mail me@corp.com, call 555-222-3333, SSN 321-54-9876";
        let result = scrub(text);

        let order: Vec<_> = result.findings.iter().map(|f| f.category).collect();
        assert_eq!(
            order,
            vec![
                PiiCategory::Phone,
                PiiCategory::Email,
                PiiCategory::Ssn,
                PiiCategory::TaxId,
                PiiCategory::Passport,
            ]
        );
        assert_eq!(result.total_removed, 5);
    }

    #[test]
    fn test_rescrub_finds_nothing() {
        let text = "Jane Roe, 42 Elm Street, jane@roe.org, (212) 555-0100, SSN 078-05-1120, card 4242-4242-4242-4242, EIN 12-3456789, passport C03005988";
        let once = scrub(text);
        assert!(once.total_removed >= 7);

        let twice = scrub(&once.cleaned);
        assert_eq!(twice.total_removed, 0);
        assert_eq!(twice.cleaned, once.cleaned);
    }

    #[test]
    fn test_token_boundary_does_not_expose_adjacent_values() {
        for text in ["mail a@b.com123-45-6789 now", "mail a@b.com12-3456789 now"] {
            let once = scrub(text);
            assert_eq!(once.findings, vec![PiiFinding::new(PiiCategory::Email, 1)]);
            assert!(!once.cleaned.contains("6789"), "{:?}", once.cleaned);

            let twice = scrub(&once.cleaned);
            assert_eq!(twice.total_removed, 0);
            assert_eq!(twice.cleaned, once.cleaned);
        }
    }

    #[test]
    fn test_detect_lists_distinct_values() {
        let matches = detect("x@y.com x@y.com z@y.com");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].category, PiiCategory::Email);
        assert_eq!(matches[0].values, vec!["x@y.com", "z@y.com"]);
    }

    #[test]
    fn test_contains_pii() {
        let scrubber = PiiScrubber::new();
        assert!(scrubber.contains_pii("ssn 123-45-6789"));
        assert!(!scrubber.contains_pii("nothing to see here"));
    }
}
