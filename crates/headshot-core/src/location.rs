//! Hometown classification and matching.
//!
//! Roster hometowns look like `"Aurora, CO"`, `"Seattle, Wash."` or
//! `"Madrid, Spain"`. The last comma-separated segment decides whether a
//! hometown is domestic (a recognised US state) or international (anything
//! else, taken as the country).

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::matching::{close_enough, normalize};

/// Default threshold for the whole-string hometown comparison.
pub const HOMETOWN_THRESHOLD: f64 = 0.80;

/// Normalized answers that count as "no hometown" when the roster has none.
const NO_HOMETOWN_ANSWERS: &[&str] = &["", "unknown", "na", "n a"];

/// The 50 states and DC, keyed by postal code.
static STATE_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("AL", "Alabama"),
        ("AK", "Alaska"),
        ("AZ", "Arizona"),
        ("AR", "Arkansas"),
        ("CA", "California"),
        ("CO", "Colorado"),
        ("CT", "Connecticut"),
        ("DE", "Delaware"),
        ("FL", "Florida"),
        ("GA", "Georgia"),
        ("HI", "Hawaii"),
        ("ID", "Idaho"),
        ("IL", "Illinois"),
        ("IN", "Indiana"),
        ("IA", "Iowa"),
        ("KS", "Kansas"),
        ("KY", "Kentucky"),
        ("LA", "Louisiana"),
        ("ME", "Maine"),
        ("MD", "Maryland"),
        ("MA", "Massachusetts"),
        ("MI", "Michigan"),
        ("MN", "Minnesota"),
        ("MS", "Mississippi"),
        ("MO", "Missouri"),
        ("MT", "Montana"),
        ("NE", "Nebraska"),
        ("NV", "Nevada"),
        ("NH", "New Hampshire"),
        ("NJ", "New Jersey"),
        ("NM", "New Mexico"),
        ("NY", "New York"),
        ("NC", "North Carolina"),
        ("ND", "North Dakota"),
        ("OH", "Ohio"),
        ("OK", "Oklahoma"),
        ("OR", "Oregon"),
        ("PA", "Pennsylvania"),
        ("RI", "Rhode Island"),
        ("SC", "South Carolina"),
        ("SD", "South Dakota"),
        ("TN", "Tennessee"),
        ("TX", "Texas"),
        ("UT", "Utah"),
        ("VT", "Vermont"),
        ("VA", "Virginia"),
        ("WA", "Washington"),
        ("WV", "West Virginia"),
        ("WI", "Wisconsin"),
        ("WY", "Wyoming"),
        ("DC", "District of Columbia"),
    ]
    .into_iter()
    .collect()
});

/// Spelled-out and abbreviated state names seen in rosters, keyed by their
/// normalized form (`"Calif."` → `"calif"`, `"W.Va."` → `"w va"`).
///
/// "Georgia" is left out on purpose: it is also a country.
static STATE_ALIASES: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    let mut m: HashMap<String, &'static str> = [
        // AP style
        ("ala", "AL"),
        ("ariz", "AZ"),
        ("ark", "AR"),
        ("calif", "CA"),
        ("cal", "CA"),
        ("colo", "CO"),
        ("conn", "CT"),
        ("del", "DE"),
        ("fla", "FL"),
        ("ill", "IL"),
        ("ind", "IN"),
        ("kan", "KS"),
        ("kans", "KS"),
        ("mass", "MA"),
        ("mich", "MI"),
        ("minn", "MN"),
        ("miss", "MS"),
        ("mont", "MT"),
        ("neb", "NE"),
        ("nebr", "NE"),
        ("nev", "NV"),
        ("okla", "OK"),
        ("ore", "OR"),
        ("oreg", "OR"),
        ("penn", "PA"),
        ("tenn", "TN"),
        ("tex", "TX"),
        ("wash", "WA"),
        ("w va", "WV"),
        ("wis", "WI"),
        ("wisc", "WI"),
        ("wyo", "WY"),
        ("washington d c", "DC"),
    ]
    .into_iter()
    .map(|(alias, code)| (alias.to_string(), code))
    .collect();

    for (&code, &name) in STATE_NAMES.iter() {
        if code != "GA" {
            m.insert(normalize(name), code);
        }
    }
    m
});

/// Whether a hometown is in the US, abroad, or missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    National,
    International,
    Unknown,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Location::National => "national",
            Location::International => "international",
            Location::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// Non-empty, trimmed comma-separated segments of a hometown.
fn segments(hometown: &str) -> Vec<&str> {
    hometown
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Full name of a state from its postal code.
pub fn state_name(code: &str) -> Option<&'static str> {
    STATE_NAMES.get(code).copied()
}

/// Two-letter state code from the last segment of a US hometown.
///
/// Accepts postal codes (`"Seattle, WA"`, `"Washington, D.C."`) and the alias
/// table (`"Seattle, Wash."`, `"Seattle, Washington"`). Hometowns without a
/// comma never yield a state.
pub fn extract_state_code(hometown: &str) -> Option<&'static str> {
    let parts = segments(hometown);
    if parts.len() < 2 {
        return None;
    }
    let last = parts[parts.len() - 1];

    let code = last.to_uppercase().replace('.', "");
    if let Some((&known, _)) = STATE_NAMES.get_key_value(code.as_str()) {
        return Some(known);
    }

    STATE_ALIASES.get(normalize(last).as_str()).copied()
}

/// Normalized last segment of a hometown, taken as its country.
///
/// Hometowns without a comma are assumed to be just a country.
pub fn extract_country(hometown: &str) -> String {
    let parts = segments(hometown);
    match parts.as_slice() {
        [] => String::new(),
        [only] => normalize(only),
        [.., last] => normalize(last),
    }
}

/// Classify a hometown.
///
/// Anything that is not blank and has no recognisable state is
/// international, including US hometowns written without a comma
/// (`"Aurora CO"`). This is a known approximation.
pub fn classify(hometown: &str) -> Location {
    if hometown.trim().is_empty() {
        Location::Unknown
    } else if extract_state_code(hometown).is_some() {
        Location::National
    } else {
        Location::International
    }
}

/// Uppercase normalized text with the spaces removed, e.g. `"Aurora, CO"` →
/// `"AURORACO"`.
fn squash(text: &str) -> String {
    normalize(text).replace(' ', "").to_uppercase()
}

/// Check a hometown answer with the default threshold.
pub fn hometown_match(user_answer: &str, truth_hometown: &str) -> bool {
    hometown_match_with(user_answer, truth_hometown, HOMETOWN_THRESHOLD)
}

/// Check a hometown answer.
///
/// Checks in order:
/// 1. A blank roster hometown only accepts "no answer" style replies.
/// 2. Whole-string fuzzy match against the full hometown.
/// 3. US: the answer is, or contains, the state code or the state name
///    (`"CO"`, `"Colorado"`, `"Aurora CO"`, `"Colorado Springs"`).
/// 4. Abroad: the answer is, or contains, the country.
pub fn hometown_match_with(user_answer: &str, truth_hometown: &str, threshold: f64) -> bool {
    let answer = squash(user_answer);
    let truth = truth_hometown.trim();

    if truth.is_empty() {
        return NO_HOMETOWN_ANSWERS.contains(&normalize(user_answer).as_str());
    }

    if close_enough(user_answer, truth, threshold) {
        tracing::trace!(truth, "hometown: whole-string match");
        return true;
    }

    match classify(truth) {
        Location::National => {
            let Some(code) = extract_state_code(truth) else {
                return false;
            };
            let name = state_name(code)
                .map(|n| n.replace(' ', "").to_uppercase())
                .unwrap_or_default();
            if answer.is_empty() {
                return false;
            }
            let matched = answer == code
                || (!name.is_empty() && answer == name)
                || answer.contains(code)
                || (!name.is_empty() && answer.contains(name.as_str()));
            tracing::trace!(truth, code, matched, "hometown: state check");
            matched
        }
        Location::International => {
            let country = extract_country(truth).replace(' ', "").to_uppercase();
            if country.is_empty() || answer.is_empty() {
                return false;
            }
            let matched = answer == country || answer.contains(country.as_str());
            tracing::trace!(truth, %country, matched, "hometown: country check");
            matched
        }
        Location::Unknown => false,
    }
}
