use regex::Regex;
use std::collections::HashSet;

use crate::model::{PhoneCandidate, TextLine};

/// Number of subscriber digits after the country code.
pub const NATIONAL_DIGITS: usize = 10;

/// Canonicalizes phone numbers for one country code.
#[derive(Debug, Clone)]
pub struct PhoneRules {
    country_code: String,
    /// Optional `+CC`, then five digits, optional space, five digits; or a bare
    /// ten-digit run.
    pattern: Regex,
    /// The `+CC`-prefixed form alone, for stripping numbers out of name text.
    /// Matches any Unicode digit, unlike `pattern`.
    prefixed: Regex,
    /// A bare ten-digit word, any Unicode digits.
    bare: Regex,
}

impl PhoneRules {
    pub fn new(country_code: &str) -> Self {
        let cc = regex::escape(country_code);
        // Only escaped digits are interpolated into the patterns.
        PhoneRules {
            country_code: country_code.to_string(),
            pattern: Regex::new(&format!(r"(\+{cc}\s*)?[0-9]{{5}}\s*[0-9]{{5}}|\b[0-9]{{10}}\b"))
                .expect("valid phone pattern"),
            prefixed: Regex::new(&format!(r"\+{cc}\s*\d{{5}}\s*\d{{5}}"))
                .expect("valid phone pattern"),
            bare: Regex::new(r"\b\d{10}\b").expect("valid phone pattern"),
        }
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// Total digit count of a canonical number, country code included.
    pub fn canonical_digits(&self) -> usize {
        self.country_code.len() + NATIONAL_DIGITS
    }

    /// Canonicalize a matched phone substring. Returns None when it does not
    /// fit any accepted shape.
    pub fn canonicalize(&self, raw: &str) -> Option<String> {
        let raw: String = raw.chars().filter(|c| *c != ' ').collect();
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        let cc = &self.country_code;

        if digits.len() == NATIONAL_DIGITS {
            return Some(format!("+{cc}{digits}"));
        }
        if digits.len() == self.canonical_digits() && digits.starts_with(cc.as_str()) {
            return Some(format!("+{digits}"));
        }
        if raw.starts_with(&format!("+{cc}")) && digits.len() >= self.canonical_digits() {
            // A stray digit misread next to the prefix; keep the subscriber part.
            let national = &digits[digits.len() - NATIONAL_DIGITS..];
            return Some(format!("+{cc}{national}"));
        }
        None
    }

    /// Find and canonicalize the first phone number in a line of text.
    ///
    /// Whitespace is removed before matching so numbers split across OCR
    /// fragments still match.
    pub fn extract(&self, text: &str) -> Option<String> {
        let joined: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        let m = self.pattern.find(&joined)?;
        let phone = self.canonicalize(m.as_str())?;
        self.is_canonical(&phone).then_some(phone)
    }

    /// True for `+CC` followed by exactly the expected digit count.
    pub fn is_canonical(&self, phone: &str) -> bool {
        let digit_count = phone.chars().filter(|c| c.is_ascii_digit()).count();
        phone.starts_with(&format!("+{}", self.country_code))
            && digit_count == self.canonical_digits()
    }

    /// Replace phone-like substrings with a space.
    pub fn strip_phones(&self, text: &str) -> String {
        let text = self.prefixed.replace_all(text, " ");
        self.bare.replace_all(&text, " ").into_owned()
    }
}

impl Default for PhoneRules {
    fn default() -> Self {
        PhoneRules::new("91")
    }
}

/// Turn phone-column lines into unique phone candidates, top to bottom.
///
/// Lines without a valid number are dropped. When the same number appears
/// more than once, the topmost occurrence wins.
pub fn phone_candidates(lines: &[TextLine], rules: &PhoneRules) -> Vec<PhoneCandidate> {
    let mut found: Vec<PhoneCandidate> = lines
        .iter()
        .filter_map(|line| {
            rules.extract(&line.text).map(|phone| PhoneCandidate {
                center_y: line.center_y,
                phone,
            })
        })
        .collect();
    found.sort_by(|a, b| a.center_y.total_cmp(&b.center_y));

    let mut seen = HashSet::new();
    found.retain(|p| seen.insert(p.phone.clone()));
    found
}
