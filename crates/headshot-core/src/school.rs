use crate::matching::{close_enough, normalize};

/// Default threshold for previous-school answers; abbreviations such as
/// "CC", "Univ." or "St." keep exact matching out of reach.
pub const PREVIOUS_SCHOOL_THRESHOLD: f64 = 0.80;

/// Answers that count as "no previous school" (compared after normalization).
const NO_SCHOOL_ANSWERS: &[&str] = &["", "none", "na", "n a", "n/a", "no", "nil"];

/// Check a previous-school answer with the default threshold.
pub fn prev_school_match(user: &str, truth: &str) -> bool {
    prev_school_match_with(user, truth, PREVIOUS_SCHOOL_THRESHOLD)
}

/// Check a previous-school answer.
///
/// Most players have no previous school; for them only a "none" style reply
/// (or nothing) is right.
pub fn prev_school_match_with(user: &str, truth: &str, threshold: f64) -> bool {
    if normalize(truth).is_empty() {
        let answer = normalize(user);
        return NO_SCHOOL_ANSWERS.contains(&answer.as_str());
    }
    close_enough(user, truth, threshold)
}
