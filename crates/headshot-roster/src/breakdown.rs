//! Where a roster's players come from: international vs American, and
//! California vs the rest of the US.

use std::collections::BTreeMap;

use serde::Serialize;

use headshot_core::{Location, RosterRecord, classify, extract_state_code};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HometownBucket {
    International,
    California,
    OtherUs,
    Unknown,
}

impl HometownBucket {
    /// Bucket a hometown using the quiz's location classifier.
    pub fn of(hometown: &str) -> Self {
        match classify(hometown) {
            Location::Unknown => Self::Unknown,
            Location::International => Self::International,
            Location::National if extract_state_code(hometown) == Some("CA") => Self::California,
            Location::National => Self::OtherUs,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::International => "International",
            Self::California => "California",
            Self::OtherUs => "Non-CA",
            Self::Unknown => "Unknown/blank",
        }
    }
}

/// Number of players sharing one hometown string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HometownCount {
    pub hometown: String,
    pub bucket: HometownBucket,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HometownBreakdown {
    pub total: usize,
    pub international: usize,
    pub california: usize,
    pub other_us: usize,
    pub unknown: usize,
    /// Non-blank hometowns, most common first, ties in text order.
    pub hometowns: Vec<HometownCount>,
}

impl HometownBreakdown {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a RosterRecord>,
    {
        let mut breakdown = Self::default();
        let mut grouped: BTreeMap<&str, usize> = BTreeMap::new();

        for record in records {
            let hometown = record.hometown.trim();
            breakdown.total += 1;
            match HometownBucket::of(hometown) {
                HometownBucket::International => breakdown.international += 1,
                HometownBucket::California => breakdown.california += 1,
                HometownBucket::OtherUs => breakdown.other_us += 1,
                HometownBucket::Unknown => {
                    breakdown.unknown += 1;
                    continue;
                }
            }
            *grouped.entry(hometown).or_default() += 1;
        }

        breakdown.hometowns = grouped
            .into_iter()
            .map(|(hometown, count)| HometownCount {
                hometown: hometown.to_string(),
                bucket: HometownBucket::of(hometown),
                count,
            })
            .collect();
        // stable: keeps text order among equal counts
        breakdown.hometowns.sort_by(|a, b| b.count.cmp(&a.count));
        breakdown
    }

    pub fn american(&self) -> usize {
        self.california + self.other_us
    }

    pub fn count(&self, bucket: HometownBucket) -> usize {
        match bucket {
            HometownBucket::International => self.international,
            HometownBucket::California => self.california,
            HometownBucket::OtherUs => self.other_us,
            HometownBucket::Unknown => self.unknown,
        }
    }

    /// Percentage of all players in `bucket`.
    pub fn share(&self, bucket: HometownBucket) -> f64 {
        pct(self.count(bucket), self.total)
    }

    /// Percentage of American players in `bucket`.
    pub fn share_of_american(&self, bucket: HometownBucket) -> f64 {
        pct(self.count(bucket), self.american())
    }

    /// The `n` most common hometowns overall.
    pub fn top(&self, n: usize) -> impl Iterator<Item = &HometownCount> {
        self.hometowns.iter().take(n)
    }

    /// The `n` most common hometowns within one bucket.
    pub fn top_in(&self, bucket: HometownBucket, n: usize) -> impl Iterator<Item = &HometownCount> {
        self.hometowns
            .iter()
            .filter(move |h| h.bucket == bucket)
            .take(n)
    }
}

/// `100 * n / d`, or 0 when `d` is 0.
pub fn pct(n: usize, d: usize) -> f64 {
    if d == 0 {
        0.0
    } else {
        100.0 * n as f64 / d as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(hometown: &str) -> RosterRecord {
        RosterRecord {
            full_name: "Player".into(),
            hometown: hometown.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_bucket_of() {
        assert_eq!(HometownBucket::of("Fresno, CA"), HometownBucket::California);
        assert_eq!(HometownBucket::of("San Diego, Calif."), HometownBucket::California);
        assert_eq!(HometownBucket::of("Aurora, CO"), HometownBucket::OtherUs);
        assert_eq!(HometownBucket::of("Spokane, Wash."), HometownBucket::OtherUs);
        assert_eq!(HometownBucket::of("Madrid, Spain"), HometownBucket::International);
        assert_eq!(HometownBucket::of("Tbilisi, Georgia"), HometownBucket::International);
        assert_eq!(HometownBucket::of(""), HometownBucket::Unknown);
        assert_eq!(HometownBucket::of("   "), HometownBucket::Unknown);
    }

    #[test]
    fn test_counts_and_shares() {
        let records: Vec<RosterRecord> = [
            "Fresno, CA",
            "Fresno, CA",
            "Aurora, CO",
            "Madrid, Spain",
            "",
        ]
        .into_iter()
        .map(record)
        .collect();
        let b = HometownBreakdown::from_records(&records);

        assert_eq!(b.total, 5);
        assert_eq!(b.california, 2);
        assert_eq!(b.other_us, 1);
        assert_eq!(b.international, 1);
        assert_eq!(b.unknown, 1);
        assert_eq!(b.american(), 3);
        assert_eq!(b.share(HometownBucket::California), 40.0);
        assert_eq!(b.share(HometownBucket::Unknown), 20.0);
        assert!((b.share_of_american(HometownBucket::California) - 66.666).abs() < 0.01);
    }

    #[test]
    fn test_top_lists_order_and_ties() {
        let records: Vec<RosterRecord> = [
            "Zagreb, Croatia",
            "Aurora, CO",
            "Fresno, CA",
            "Fresno, CA",
            "Austin, TX",
            "Belgrade, Serbia",
        ]
        .into_iter()
        .map(record)
        .collect();
        let b = HometownBreakdown::from_records(&records);

        let top: Vec<&str> = b.top(3).map(|h| h.hometown.as_str()).collect();
        assert_eq!(top, vec!["Fresno, CA", "Aurora, CO", "Austin, TX"]);

        let intl: Vec<&str> = b
            .top_in(HometownBucket::International, 10)
            .map(|h| h.hometown.as_str())
            .collect();
        assert_eq!(intl, vec!["Belgrade, Serbia", "Zagreb, Croatia"]);

        let ca: Vec<(&str, usize)> = b
            .top_in(HometownBucket::California, 10)
            .map(|h| (h.hometown.as_str(), h.count))
            .collect();
        assert_eq!(ca, vec![("Fresno, CA", 2)]);
    }

    #[test]
    fn test_blank_hometowns_not_listed() {
        let records = vec![record(""), record("")];
        let b = HometownBreakdown::from_records(&records);
        assert_eq!(b.unknown, 2);
        assert_eq!(b.top(10).count(), 0);
        assert_eq!(b.share_of_american(HometownBucket::California), 0.0);
    }

    #[test]
    fn test_pct_zero_denominator() {
        assert_eq!(pct(3, 0), 0.0);
        assert_eq!(pct(1, 4), 25.0);
    }
}
