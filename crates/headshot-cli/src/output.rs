use std::io::Write;

use headshot_core::{RosterRecord, Verdict};
use headshot_roster::{HometownBreakdown, HometownBucket, HometownCount, pct};
use owo_colors::OwoColorize;

use crate::session::Tally;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

fn or_none(value: &str) -> &str {
    if value.trim().is_empty() {
        "(none)"
    } else {
        value
    }
}

/// Print the header and photo link for a new question.
pub fn print_question(
    w: &mut dyn Write,
    number: usize,
    record: &RosterRecord,
    color: ColorMode,
) -> std::io::Result<()> {
    let header = format!("=== Question {} ===", number);
    if color.enabled() {
        writeln!(w, "{}", header.bold())?;
    } else {
        writeln!(w, "{}", header)?;
    }

    if record.image_url.trim().is_empty() {
        if color.enabled() {
            writeln!(w, "{}", "No ImageURL for this player.".dimmed())?;
        } else {
            writeln!(w, "No ImageURL for this player.")?;
        }
    } else {
        writeln!(w, "Photo: {}", record.image_url)?;
    }
    writeln!(w)?;
    Ok(())
}

/// Print the per-question marks and the score line.
pub fn print_verdict(w: &mut dyn Write, verdict: &Verdict, color: ColorMode) -> std::io::Result<()> {
    writeln!(w)?;
    if color.enabled() {
        writeln!(w, "{}", "Results".bold())?;
    } else {
        writeln!(w, "Results")?;
    }

    for (field, ok) in verdict.fields() {
        let mark = if ok { "✓" } else { "✗" };
        if color.enabled() {
            if ok {
                writeln!(w, "  {} {}", mark.green(), field)?;
            } else {
                writeln!(w, "  {} {}", mark.red(), field)?;
            }
        } else {
            writeln!(w, "  {} {}", mark, field)?;
        }
    }

    let score = format!("Score: {}/4", verdict.total);
    if color.enabled() {
        if verdict.is_perfect() {
            writeln!(w, "{}", score.green().bold())?;
        } else {
            writeln!(w, "{}", score.bold())?;
        }
    } else {
        writeln!(w, "{}", score)?;
    }
    Ok(())
}

/// Print the ground truth for a player.
pub fn print_answer_key(
    w: &mut dyn Write,
    record: &RosterRecord,
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w)?;
    if color.enabled() {
        writeln!(w, "{}", "Answer key".bold())?;
    } else {
        writeln!(w, "Answer key")?;
    }

    let rows = [
        ("Name", record.full_name.as_str()),
        ("Year", record.year.as_str()),
        ("Hometown", record.hometown.as_str()),
        ("Previous School", record.previous_school.as_str()),
    ];
    for (label, value) in rows {
        if color.enabled() {
            writeln!(w, "  {:<16} {}", format!("{}:", label).cyan(), or_none(value))?;
        } else {
            writeln!(w, "  {:<16} {}", format!("{}:", label), or_none(value))?;
        }
    }
    writeln!(w)?;
    Ok(())
}

/// Print the end-of-session summary.
pub fn print_tally(w: &mut dyn Write, tally: &Tally, color: ColorMode) -> std::io::Result<()> {
    let line = format!(
        "Answered {} question{}, {} of {} points.",
        tally.answered,
        if tally.answered == 1 { "" } else { "s" },
        tally.points,
        tally.possible()
    );
    writeln!(w)?;
    if color.enabled() {
        writeln!(w, "{}", line.bold())?;
    } else {
        writeln!(w, "{}", line)?;
    }
    Ok(())
}

/// Print the result of a one-shot `check`.
pub fn print_check(
    w: &mut dyn Write,
    record: &RosterRecord,
    verdict: &Verdict,
    color: ColorMode,
) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "Player: {}", record.full_name.bold())?;
    } else {
        writeln!(w, "Player: {}", record.full_name)?;
    }
    print_verdict(w, verdict, color)?;
    print_answer_key(w, record, color)
}

fn print_heading(w: &mut dyn Write, title: &str, color: ColorMode) -> std::io::Result<()> {
    writeln!(w)?;
    let heading = format!("=== {} ===", title);
    if color.enabled() {
        writeln!(w, "{}", heading.bold())
    } else {
        writeln!(w, "{}", heading)
    }
}

fn print_top<'a>(
    w: &mut dyn Write,
    rows: impl Iterator<Item = &'a HometownCount>,
) -> std::io::Result<()> {
    let mut any = false;
    for row in rows {
        writeln!(w, "  {:>4}  {}", row.count, row.hometown)?;
        any = true;
    }
    if !any {
        writeln!(w, "  (none)")?;
    }
    Ok(())
}

/// Print the hometown breakdown report.
pub fn print_breakdown(
    w: &mut dyn Write,
    breakdown: &HometownBreakdown,
    top: usize,
    color: ColorMode,
) -> std::io::Result<()> {
    print_heading(w, "International vs American", color)?;
    writeln!(w, "Total players: {}", breakdown.total)?;
    writeln!(
        w,
        "International: {} ({:.1}%)",
        breakdown.international,
        breakdown.share(HometownBucket::International)
    )?;
    writeln!(
        w,
        "American:      {} ({:.1}%)",
        breakdown.american(),
        pct(breakdown.american(), breakdown.total)
    )?;
    if breakdown.unknown > 0 {
        writeln!(
            w,
            "Unknown/blank: {} ({:.1}%)",
            breakdown.unknown,
            breakdown.share(HometownBucket::Unknown)
        )?;
    }

    print_heading(w, "Americans: California vs Non-California", color)?;
    if breakdown.american() == 0 {
        writeln!(w, "No American hometowns detected.")?;
    } else {
        for bucket in [HometownBucket::California, HometownBucket::OtherUs] {
            writeln!(
                w,
                "{:<15} {} ({:.1}% of Americans; {:.1}% of all)",
                format!("{}:", bucket.label()),
                breakdown.count(bucket),
                breakdown.share_of_american(bucket),
                breakdown.share(bucket)
            )?;
        }
    }

    print_heading(w, &format!("Top {} hometowns (overall)", top), color)?;
    print_top(w, breakdown.top(top))?;
    print_heading(w, &format!("Top {} international hometowns", top), color)?;
    print_top(w, breakdown.top_in(HometownBucket::International, top))?;
    print_heading(w, &format!("Top {} California hometowns", top), color)?;
    print_top(w, breakdown.top_in(HometownBucket::California, top))?;
    Ok(())
}
