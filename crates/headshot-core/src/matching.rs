use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::canonical_combining_class;

use crate::sequence;

/// Default similarity threshold for whole-string fuzzy matching.
pub const DEFAULT_THRESHOLD: f64 = 0.86;

/// Slack applied to the rapidfuzz upper bound before rejecting a pair, so
/// float rounding can never turn a boundary match into a miss.
const UPPER_BOUND_SLACK: f64 = 1e-9;

/// Normalize free text for comparison: lowercase ASCII words separated by
/// single spaces.
///
/// Steps (order matters):
/// 1. Trim and lowercase
/// 2. Unicode NFKD normalization (decomposes accents)
/// 3. Drop combining marks (`"é"` → `"e"`)
/// 4. Every run of characters outside `[a-z0-9]` becomes one space
/// 5. Trim
///
/// The result only contains `[a-z0-9 ]`, and normalizing it again is a no-op.
pub fn normalize(text: &str) -> String {
    static NON_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

    let lowered = text.trim().to_lowercase();
    let stripped: String = lowered
        .nfkd()
        .filter(|c| canonical_combining_class(*c) == 0)
        .collect();
    NON_TOKEN.replace_all(&stripped, " ").trim().to_string()
}

/// Normalize, then sort the words so that word order never affects similarity.
pub fn token_sort(text: &str) -> String {
    let normalized = normalize(text);
    let mut tokens: Vec<&str> = normalized.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Similarity of two answers in `[0, 1]`, insensitive to word order.
///
/// Both sides are token-sorted and compared with the Ratcliff/Obershelp
/// ratio `2 * M / (len(a) + len(b))`. An empty side scores `0.0`, including
/// empty against empty: no answer is never a match.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a = token_sort(a);
    let b = token_sort(b);
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    sorted_ratio(&a, &b)
}

fn sorted_ratio(a: &str, b: &str) -> f64 {
    let matches = sequence::matching_characters(a.as_bytes(), b.as_bytes());
    2.0 * matches as f64 / (a.len() + b.len()) as f64
}

/// Check whether `ratio(a, b)` reaches `threshold`.
///
/// The Indel ratio from rapidfuzz (based on the longest common subsequence)
/// is never below the matching-block ratio, so pairs that fail it are
/// rejected without running the block search.
pub fn close_enough(a: &str, b: &str, threshold: f64) -> bool {
    let a = token_sort(a);
    let b = token_sort(b);
    if a.is_empty() || b.is_empty() {
        return false;
    }

    let upper_bound = rapidfuzz::fuzz::ratio(a.chars(), b.chars());
    if upper_bound + UPPER_BOUND_SLACK < threshold {
        tracing::trace!(a = %a, b = %b, upper_bound, threshold, "rejected by upper bound");
        return false;
    }

    sorted_ratio(&a, &b) >= threshold
}
