//! Scoring a full set of answers against a roster record.

use serde::Serialize;
use std::fmt;

use crate::location::hometown_match_with;
use crate::names::name_match_with;
use crate::school::prev_school_match_with;
use crate::year::year_match;
use crate::{Answers, RosterRecord, Thresholds};

/// The four quiz questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Year,
    Hometown,
    PreviousSchool,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::Name,
        Field::Year,
        Field::Hometown,
        Field::PreviousSchool,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Year => "Year",
            Field::Hometown => "Hometown",
            Field::PreviousSchool => "Previous School",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-question result of one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub name: bool,
    pub year: bool,
    pub hometown: bool,
    pub previous_school: bool,
    /// Number of correct answers, 0–4.
    pub total: u8,
}

impl Verdict {
    pub fn new(name: bool, year: bool, hometown: bool, previous_school: bool) -> Self {
        let total = [name, year, hometown, previous_school]
            .into_iter()
            .filter(|ok| *ok)
            .count() as u8;
        Self {
            name,
            year,
            hometown,
            previous_school,
            total,
        }
    }

    pub fn get(&self, field: Field) -> bool {
        match field {
            Field::Name => self.name,
            Field::Year => self.year,
            Field::Hometown => self.hometown,
            Field::PreviousSchool => self.previous_school,
        }
    }

    /// Verdicts in question order.
    pub fn fields(&self) -> impl Iterator<Item = (Field, bool)> + '_ {
        Field::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    pub fn is_perfect(&self) -> bool {
        usize::from(self.total) == Field::ALL.len()
    }
}

/// Scores answers with a fixed set of thresholds.
#[derive(Debug, Clone, Default)]
pub struct Verifier {
    thresholds: Thresholds,
}

impl Verifier {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Score every answer. All four checks always run.
    pub fn score(&self, answers: &Answers, record: &RosterRecord) -> Verdict {
        let t = &self.thresholds;
        let verdict = Verdict::new(
            name_match_with(&answers.name, &record.full_name, &t.names()),
            year_match(&answers.year, &record.year),
            hometown_match_with(&answers.hometown, &record.hometown, t.hometown),
            prev_school_match_with(
                &answers.previous_school,
                &record.previous_school,
                t.previous_school,
            ),
        );
        tracing::debug!(
            player = %record.full_name,
            name = verdict.name,
            year = verdict.year,
            hometown = verdict.hometown,
            previous_school = verdict.previous_school,
            total = verdict.total,
            "scored answers"
        );
        verdict
    }
}

/// Score answers with the default thresholds.
pub fn score(answers: &Answers, record: &RosterRecord) -> Verdict {
    Verifier::default().score(answers, record)
}
