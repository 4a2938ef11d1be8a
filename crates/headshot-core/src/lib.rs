//! Answer-matching engine for the headshot roster quiz.
//!
//! Every check here is a pure function of its inputs: nothing is cached
//! between calls and nothing can fail. Odd input falls through to "no match"
//! instead of an error.

use serde::{Deserialize, Serialize};

pub mod config_file;
pub mod location;
pub mod matching;
pub mod names;
pub mod school;
pub mod sequence;
pub mod verify;
pub mod year;

// Re-export for convenience
pub use location::{
    Location, classify, extract_country, extract_state_code, hometown_match, state_name,
};
pub use matching::{DEFAULT_THRESHOLD, close_enough, normalize, ratio, token_sort};
pub use names::{NameThresholds, name_match, split_name};
pub use school::prev_school_match;
pub use verify::{Field, Verdict, Verifier, score};
pub use year::{normalize_year, year_match};

use config_file::ConfigFile;

/// One player from the roster: the ground truth for a question.
///
/// Field names follow the roster's column headers. Missing columns and blank
/// cells are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRecord {
    #[serde(rename = "Full Name", default)]
    pub full_name: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Hometown", default)]
    pub hometown: String,
    #[serde(rename = "Previous School", default)]
    pub previous_school: String,
    #[serde(rename = "ImageURL", default)]
    pub image_url: String,
}

/// A user's four free-text answers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answers {
    pub name: String,
    pub year: String,
    pub hometown: String,
    pub previous_school: String,
}

/// Similarity thresholds for every fuzzy comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    /// General whole-string threshold (player lookup).
    pub default: f64,
    pub name_whole: f64,
    pub name_last: f64,
    pub name_first: f64,
    pub hometown: f64,
    pub previous_school: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            default: matching::DEFAULT_THRESHOLD,
            name_whole: names::NAME_WHOLE_THRESHOLD,
            name_last: names::LAST_NAME_THRESHOLD,
            name_first: names::FIRST_NAME_THRESHOLD,
            hometown: location::HOMETOWN_THRESHOLD,
            previous_school: school::PREVIOUS_SCHOOL_THRESHOLD,
        }
    }
}

impl Thresholds {
    /// Resolve thresholds from a config file, keeping the default for every
    /// value that is absent or outside `[0, 1]`.
    pub fn from_config(config: &ConfigFile) -> Self {
        let mut resolved = Self::default();
        let Some(t) = config.thresholds.as_ref() else {
            return resolved;
        };

        let slots: [(&str, Option<f64>, &mut f64); 6] = [
            ("default", t.default, &mut resolved.default),
            ("name_whole", t.name_whole, &mut resolved.name_whole),
            ("name_last", t.name_last, &mut resolved.name_last),
            ("name_first", t.name_first, &mut resolved.name_first),
            ("hometown", t.hometown, &mut resolved.hometown),
            (
                "previous_school",
                t.previous_school,
                &mut resolved.previous_school,
            ),
        ];
        for (key, value, slot) in slots {
            match value {
                Some(v) if (0.0..=1.0).contains(&v) => *slot = v,
                Some(v) => tracing::warn!(key, value = v, "threshold out of range, using default"),
                None => {}
            }
        }
        resolved
    }

    pub fn names(&self) -> NameThresholds {
        NameThresholds {
            whole: self.name_whole,
            last: self.name_last,
            first: self.name_first,
        }
    }
}
