use crate::matching::{close_enough, normalize, ratio};

/// Whole-name threshold used when either side is a single word.
pub const NAME_WHOLE_THRESHOLD: f64 = 0.84;

/// Last names must be close; "Smith" vs "Smithe" passes.
pub const LAST_NAME_THRESHOLD: f64 = 0.70;

/// First names are forgiving; nicknames often fail this and fall back to the
/// initial check.
pub const FIRST_NAME_THRESHOLD: f64 = 0.65;

/// Thresholds used by [`name_match_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NameThresholds {
    pub whole: f64,
    pub last: f64,
    pub first: f64,
}

impl Default for NameThresholds {
    fn default() -> Self {
        Self {
            whole: NAME_WHOLE_THRESHOLD,
            last: LAST_NAME_THRESHOLD,
            first: FIRST_NAME_THRESHOLD,
        }
    }
}

/// Split a full name into `(first, last)` normalized words.
///
/// Middle names are ignored, a single word is a first name only, and an empty
/// name gives two empty strings.
pub fn split_name(full: &str) -> (String, String) {
    let normalized = normalize(full);
    let parts: Vec<&str> = normalized.split_whitespace().collect();
    match parts.as_slice() {
        [] => (String::new(), String::new()),
        [only] => (only.to_string(), String::new()),
        [first, .., last] => (first.to_string(), last.to_string()),
    }
}

/// Check a name answer with the default thresholds.
pub fn name_match(user: &str, truth: &str) -> bool {
    name_match_with(user, truth, &NameThresholds::default())
}

/// Check a name answer.
///
/// The last name is required and must be close; the first name may be loose
/// or reduced to its initial (`"J. Smith"`). When either side is a single word
/// the whole strings are compared instead.
pub fn name_match_with(user: &str, truth: &str, thresholds: &NameThresholds) -> bool {
    let (user_first, user_last) = split_name(user);
    let (truth_first, truth_last) = split_name(truth);

    if user_last.is_empty() || truth_last.is_empty() {
        return close_enough(user, truth, thresholds.whole);
    }

    let last_ok = ratio(&user_last, &truth_last) >= thresholds.last;
    let first_ok = ratio(&user_first, &truth_first) >= thresholds.first;
    let initial_ok = match (user_first.chars().next(), truth_first.chars().next()) {
        (Some(u), Some(t)) => u == t,
        _ => false,
    };

    tracing::trace!(last_ok, first_ok, initial_ok, "name parts");
    last_ok && (first_ok || initial_ok)
}
