use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::matching::normalize;

/// Class-year words and abbreviations mapped to their two-letter code.
static YEAR_CODES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("fr", "fr"),
        ("freshman", "fr"),
        ("so", "so"),
        ("sophomore", "so"),
        ("jr", "jr"),
        ("junior", "jr"),
        ("sr", "sr"),
        ("senior", "sr"),
        ("gr", "gr"),
        ("grad", "gr"),
        ("graduate", "gr"),
    ]
    .into_iter()
    .collect()
});

/// Marker left in place of every redshirt spelling.
const REDSHIRT: &str = "r";

fn year_code(token: &str) -> Option<&'static str> {
    YEAR_CODES.get(token).copied()
}

/// Canonical class-year code: `fr|so|jr|sr|gr`, prefixed `r-` for redshirts.
///
/// `"Fr."`, `"freshman"` → `"fr"`; `"R-Fr"`, `"RS Fr."`, `"redshirt freshman"`,
/// `"rfr"` → `"r-fr"`. Unknown year words pass through unchanged (with the
/// `r-` prefix when a redshirt marker is present), so they can still be
/// compared for equality.
pub fn normalize_year(text: &str) -> String {
    let normalized = normalize(text);
    let tokens: Vec<&str> = normalized.split_whitespace().collect();

    let mut marked: Vec<&str> = Vec::with_capacity(tokens.len());
    let mut rest = tokens.as_slice();
    // "R.S. Jr." normalizes to "r s jr": the split abbreviation is one marker
    if let ["r", "s", tail @ ..] = rest
        && !tail.is_empty()
    {
        marked.push(REDSHIRT);
        rest = tail;
    }
    marked.extend(rest.iter().map(|t| match *t {
        "redshirt" | "rs" => REDSHIRT,
        other => other,
    }));

    let compact = marked.concat();
    if compact.starts_with(REDSHIRT) && compact.len() >= 3 {
        let base = redshirt_base(&compact);
        return format!("r-{}", year_code(base).unwrap_or(base));
    }
    year_code(&compact).unwrap_or(compact.as_str()).to_string()
}

/// Base year of a compact redshirt token such as `"rfr"` or `"rsso"`.
fn redshirt_base(compact: &str) -> &str {
    let after_r = &compact[1..];
    if year_code(after_r).is_some() {
        return after_r;
    }
    // Written together with the year, "rs" survives tokenization ("rsso")
    if let Some(after_rs) = compact.strip_prefix("rs")
        && year_code(after_rs).is_some()
    {
        return after_rs;
    }
    after_r
}

/// Exact comparison of class-year codes; a missing or extra redshirt prefix
/// is a mismatch.
pub fn year_match(user: &str, truth: &str) -> bool {
    let user_code = normalize_year(user);
    let truth_code = normalize_year(truth);
    tracing::trace!(%user_code, %truth_code, "year codes");
    user_code == truth_code
}
