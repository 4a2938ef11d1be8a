use std::io::Read;
use std::path::Path;

use thiserror::Error;

pub mod breakdown;

// Re-export domain types for convenience
pub use breakdown::{HometownBreakdown, HometownBucket, HometownCount, pct};
pub use headshot_core::RosterRecord;

use headshot_core::{normalize, ratio};

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("roster has no players with a name")]
    Empty,
}

/// A loaded roster. Never empty, and every record has a non-blank name.
#[derive(Debug, Clone)]
pub struct Roster {
    records: Vec<RosterRecord>,
}

impl Roster {
    pub fn new(records: Vec<RosterRecord>) -> Result<Self, RosterError> {
        if records.is_empty() {
            return Err(RosterError::Empty);
        }
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RosterRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RosterRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[RosterRecord] {
        &self.records
    }

    /// Pick a uniformly random question index.
    pub fn random_index(&self, rng: &mut fastrand::Rng) -> usize {
        rng.usize(..self.records.len())
    }

    /// Find the player a name refers to.
    ///
    /// An exact match after normalization wins. Otherwise the closest name
    /// (token-order insensitive) is returned if its ratio reaches `threshold`;
    /// the earlier row wins a tie.
    pub fn find_by_name(&self, query: &str, threshold: f64) -> Option<&RosterRecord> {
        let wanted = normalize(query);
        if wanted.is_empty() {
            return None;
        }
        if let Some(exact) = self
            .records
            .iter()
            .find(|r| normalize(&r.full_name) == wanted)
        {
            return Some(exact);
        }

        let mut best: Option<(&RosterRecord, f64)> = None;
        for record in &self.records {
            let score = ratio(query, &record.full_name);
            if score >= threshold && best.is_none_or(|(_, s)| score > s) {
                best = Some((record, score));
            }
        }
        if let Some((record, score)) = best {
            tracing::debug!(query, player = %record.full_name, score, "fuzzy roster lookup");
        }
        best.map(|(record, _)| record)
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a RosterRecord;
    type IntoIter = std::slice::Iter<'a, RosterRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Load a roster CSV from disk.
pub fn load_roster(path: &Path) -> Result<Roster, RosterError> {
    let file = std::fs::File::open(path)?;
    let roster = load_roster_from_reader(file)?;
    tracing::info!(path = %path.display(), players = roster.len(), "loaded roster");
    Ok(roster)
}

/// Parse roster CSV from any reader (useful for testing).
///
/// Columns are matched by header; missing columns and short rows read as
/// empty strings and extra columns are ignored. Rows without a name are
/// skipped.
pub fn load_roster_from_reader<R: Read>(reader: R) -> Result<Roster, RosterError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for (i, row) in csv_reader.deserialize::<RosterRecord>().enumerate() {
        let record = row?;
        if record.full_name.is_empty() {
            // header is line 1
            tracing::warn!(line = i + 2, "skipping roster row without a name");
            continue;
        }
        records.push(record);
    }
    Roster::new(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROSTER: &str = "\
Full Name,Year,Hometown,Previous School,ImageURL,Jersey
Maria Garcia,R-So.,\"Madrid, Spain\",,https://img.example/garcia.jpg,4
 Jonathan Smithe , Sr. ,\"Aurora, CO\",Oregon State,,12
,Fr.,\"Fresno, CA\",,,0
Lova Lagerlid,Fr.,,,,7
";

    fn roster() -> Roster {
        load_roster_from_reader(ROSTER.as_bytes()).unwrap()
    }

    #[test]
    fn test_load_skips_nameless_rows() {
        let roster = roster();
        assert_eq!(roster.len(), 3);
        assert!(!roster.is_empty());
        let names: Vec<&str> = roster.iter().map(|r| r.full_name.as_str()).collect();
        assert_eq!(names, vec!["Maria Garcia", "Jonathan Smithe", "Lova Lagerlid"]);
    }

    #[test]
    fn test_load_trims_and_keeps_quoted_commas() {
        let roster = roster();
        let smithe = roster.get(1).unwrap();
        assert_eq!(smithe.full_name, "Jonathan Smithe");
        assert_eq!(smithe.year, "Sr.");
        assert_eq!(smithe.hometown, "Aurora, CO");
        assert_eq!(roster.get(0).unwrap().image_url, "https://img.example/garcia.jpg");
    }

    #[test]
    fn test_missing_columns_are_empty() {
        let roster = load_roster_from_reader("Full Name,Year\nAna Lee,Jr.\n".as_bytes()).unwrap();
        let record = roster.get(0).unwrap();
        assert_eq!(record.year, "Jr.");
        assert!(record.hometown.is_empty());
        assert!(record.previous_school.is_empty());
        assert!(record.image_url.is_empty());
    }

    #[test]
    fn test_empty_roster_is_error() {
        let err = load_roster_from_reader("Full Name,Year\n,Fr.\n".as_bytes()).unwrap_err();
        assert!(matches!(err, RosterError::Empty));
        assert!(matches!(
            load_roster_from_reader("".as_bytes()),
            Err(RosterError::Empty)
        ));
    }

    #[test]
    fn test_get_out_of_range() {
        assert!(roster().get(3).is_none());
    }

    #[test]
    fn test_random_index_in_range_and_seeded() {
        let roster = roster();
        let mut a = fastrand::Rng::with_seed(7);
        let mut b = fastrand::Rng::with_seed(7);
        for _ in 0..50 {
            let i = roster.random_index(&mut a);
            assert!(i < roster.len());
            assert_eq!(i, roster.random_index(&mut b));
        }
    }

    #[test]
    fn test_find_by_name_exact() {
        let roster = roster();
        let found = roster.find_by_name("  maria GARCIA ", 0.86).unwrap();
        assert_eq!(found.full_name, "Maria Garcia");
    }

    #[test]
    fn test_find_by_name_fuzzy_and_reordered() {
        let roster = roster();
        assert_eq!(
            roster.find_by_name("Smithe, Jonathan", 0.86).unwrap().full_name,
            "Jonathan Smithe"
        );
        assert_eq!(
            roster.find_by_name("Lova Lagerlidd", 0.86).unwrap().full_name,
            "Lova Lagerlid"
        );
    }

    #[test]
    fn test_find_by_name_no_match() {
        let roster = roster();
        assert!(roster.find_by_name("Nobody Here", 0.86).is_none());
        assert!(roster.find_by_name("", 0.0).is_none());
        assert!(roster.find_by_name("?!", 0.0).is_none());
    }
}
