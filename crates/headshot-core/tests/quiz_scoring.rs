//! End-to-end scoring of quiz submissions against roster records.

use headshot_core::{
    Answers, Location, RosterRecord, Thresholds, Verdict, Verifier, classify, extract_state_code,
    hometown_match, name_match, normalize, normalize_year, prev_school_match, ratio, score,
    year_match,
};

fn player(name: &str, year: &str, hometown: &str, previous_school: &str) -> RosterRecord {
    RosterRecord {
        full_name: name.to_string(),
        year: year.to_string(),
        hometown: hometown.to_string(),
        previous_school: previous_school.to_string(),
        image_url: String::new(),
    }
}

fn answers(name: &str, year: &str, hometown: &str, previous_school: &str) -> Answers {
    Answers {
        name: name.to_string(),
        year: year.to_string(),
        hometown: hometown.to_string(),
        previous_school: previous_school.to_string(),
    }
}

#[test]
fn international_redshirt_scores_four() {
    let record = player("Maria Garcia", "R-So.", "Madrid, Spain", "");
    let verdict = score(
        &answers("Maria Garcia", "redshirt sophomore", "spain", "none"),
        &record,
    );
    assert_eq!(verdict, Verdict::new(true, true, true, true));
    assert_eq!(verdict.total, 4);
}

#[test]
fn domestic_transfer_partial_credit() {
    let record = player("Jonathan Smithe", "Sr.", "Aurora, CO", "Oregon State");
    let verdict = score(&answers("Jon Smith", "Jr.", "Colorado", "Oregon St."), &record);
    assert!(verdict.name);
    assert!(!verdict.year);
    assert!(verdict.hometown);
    assert!(verdict.previous_school);
    assert_eq!(verdict.total, 3);
}

#[test]
fn player_without_hometown() {
    let record = player("Lova Lagerlid", "Fr.", "", "");
    let verdict = score(&answers("lova lagerlid", "freshman", "unknown", "n/a"), &record);
    assert!(verdict.is_perfect());

    let guessed = score(&answers("lova lagerlid", "freshman", "Sweden", ""), &record);
    assert!(!guessed.hometown);
    assert_eq!(guessed.total, 3);
}

#[test]
fn documented_properties() {
    assert_eq!(normalize(&normalize("Déjà Vu!")), normalize("Déjà Vu!"));
    assert_eq!(ratio("john smith", "smith john"), 1.0);
    assert_eq!(ratio("john", ""), 0.0);
    assert_eq!(ratio("", ""), 0.0);

    assert_eq!(normalize_year("Fr."), "fr");
    assert_eq!(normalize_year("freshman"), "fr");
    assert_eq!(normalize_year("R-Fr"), "r-fr");
    assert_eq!(normalize_year("redshirt freshman"), "r-fr");
    assert!(!year_match("So.", "Sr."));

    assert_eq!(extract_state_code("Aurora, CO"), Some("CO"));
    assert!(hometown_match("Colorado", "Aurora, CO"));
    assert!(hometown_match("CO", "Aurora, CO"));
    assert!(!hometown_match("Texas", "Aurora, CO"));

    assert_eq!(classify("Madrid, Spain"), Location::International);
    assert!(hometown_match("spain", "Madrid, Spain"));

    assert!(hometown_match("", ""));
    assert!(hometown_match("unknown", ""));
    assert!(!hometown_match("Texas", ""));

    assert!(name_match("Jon Smith", "Jonathan Smithe"));
    assert!(!name_match("Alice Jones", "Carol Jones"));

    assert!(prev_school_match("none", ""));
}

#[test]
fn verifier_is_shareable_across_threads() {
    let verifier = std::sync::Arc::new(Verifier::new(Thresholds::default()));
    let record = std::sync::Arc::new(player("Maria Garcia", "R-So.", "Madrid, Spain", ""));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let verifier = verifier.clone();
            let record = record.clone();
            std::thread::spawn(move || {
                verifier
                    .score(&answers("Garcia, Maria", "R-So", "Spain", ""), &record)
                    .total
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 4);
    }
}
