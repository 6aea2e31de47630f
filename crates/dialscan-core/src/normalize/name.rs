use crate::model::{NameCandidate, NameStrength, TextLine};
use crate::normalize::phone::PhoneRules;

/// Marker that precedes a display name in the contact list.
pub const NAME_MARKER: char = '~';

/// Glyphs OCR returns in place of the name marker.
const TILDE_VARIANTS: [char; 8] = [
    '\u{223C}', // ∼ tilde operator
    '\u{223D}', // ∽ reversed tilde
    '\u{301C}', // 〜 wave dash
    '\u{FF5E}', // ～ fullwidth tilde
    '\u{FE4B}', // ﹋ wavy overline
    '\u{FE4F}', // ﹏ wavy low line
    '\u{02DC}', // ˜ small tilde
    '\u{2053}', // ⁓ swung dash
];

/// Default chat status texts and other non-name phrases (lowercase).
const JUNK_MARKERS: &[&str] = &[
    "hey there",
    "i am using",
    "using wh",
    "available",
    "always happy",
    "destroy",
    "struggle",
    "online",
    "last seen",
];

/// Trim and map every tilde look-alike to [`NAME_MARKER`].
pub fn normalize_tilde(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| {
            if TILDE_VARIANTS.contains(&c) {
                NAME_MARKER
            } else {
                c
            }
        })
        .collect()
}

pub fn is_junk(s: &str) -> bool {
    let lower = s.to_lowercase();
    JUNK_MARKERS.iter().any(|k| lower.contains(k))
}

/// At least two Latin letters and not a status phrase.
fn looks_like_name(s: &str) -> bool {
    !s.is_empty() && !is_junk(s) && s.chars().filter(|c| c.is_ascii_alphabetic()).count() >= 2
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn replace_separators(s: &str) -> String {
    s.replace(&['|', '_'][..], " ").trim().to_string()
}

fn finish_name(raw: &str, rules: &PhoneRules) -> Option<String> {
    let name = collapse_whitespace(&rules.strip_phones(raw));
    looks_like_name(&name).then_some(name)
}

/// Name taken from the text after the first marker. None without a marker.
pub fn name_from_marker(text: &str, rules: &PhoneRules) -> Option<String> {
    let text = replace_separators(&normalize_tilde(text));
    let (_, after) = text.split_once(NAME_MARKER)?;
    finish_name(after.trim(), rules)
}

/// Whole-line fallback for lines where OCR lost the marker.
pub fn name_from_line(text: &str, rules: &PhoneRules) -> Option<String> {
    let text = replace_separators(&normalize_tilde(text));
    finish_name(&text, rules)
}

/// Classify one name-column line. Header rows, status text and lines with no
/// usable name yield None.
pub fn name_candidate(line: &TextLine, rules: &PhoneRules) -> Option<NameCandidate> {
    let text = normalize_tilde(&line.text);
    if text.is_empty() || text.to_lowercase().starts_with("search") || is_junk(&text) {
        return None;
    }

    let (name, strength) = match name_from_marker(&text, rules) {
        Some(name) => (name, NameStrength::Strong),
        None => (name_from_line(&text, rules)?, NameStrength::Weak),
    };

    Some(NameCandidate {
        center_y: line.center_y,
        name,
        strength,
    })
}

/// All name candidates in the column, top to bottom.
pub fn name_candidates(lines: &[TextLine], rules: &PhoneRules) -> Vec<NameCandidate> {
    let mut names: Vec<NameCandidate> = lines
        .iter()
        .filter_map(|line| name_candidate(line, rules))
        .collect();
    names.sort_by(|a, b| a.center_y.total_cmp(&b.center_y));
    names
}
