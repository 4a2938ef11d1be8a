//! Interactive quiz state and the prompt loop that drives it.

use std::io::{BufRead, Write};

use headshot_core::{Answers, RosterRecord, Verdict, Verifier};
use headshot_roster::Roster;

use crate::output::{self, ColorMode};

/// Running totals for one quiz session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub answered: usize,
    pub points: usize,
}

impl Tally {
    pub fn possible(&self) -> usize {
        self.answered * 4
    }
}

/// The current question and whether its answers are showing.
pub struct QuizSession<'r> {
    roster: &'r Roster,
    verifier: Verifier,
    rng: fastrand::Rng,
    current: usize,
    revealed: bool,
    tally: Tally,
}

impl<'r> QuizSession<'r> {
    pub fn new(roster: &'r Roster, verifier: Verifier, mut rng: fastrand::Rng) -> Self {
        let current = roster.random_index(&mut rng);
        Self {
            roster,
            verifier,
            rng,
            current,
            revealed: false,
            tally: Tally::default(),
        }
    }

    pub fn current(&self) -> &'r RosterRecord {
        &self.roster.records()[self.current]
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    /// Score answers for the current question. Scoring also reveals it.
    pub fn submit(&mut self, answers: &Answers) -> Verdict {
        let verdict = self.verifier.score(answers, self.current());
        self.tally.answered += 1;
        self.tally.points += usize::from(verdict.total);
        self.revealed = true;
        verdict
    }

    /// Show the answer key without scoring.
    pub fn reveal(&mut self) -> &'r RosterRecord {
        self.revealed = true;
        self.current()
    }

    /// Draw a new random question. Repeats are possible.
    pub fn next_question(&mut self) {
        self.current = self.roster.random_index(&mut self.rng);
        self.revealed = false;
    }
}

const NAME_PROMPT: &str = "Name (? to reveal): ";
const YEAR_PROMPT: &str = "Year (e.g., Fr., So., R-Fr.): ";
const HOMETOWN_PROMPT: &str = "Hometown (US: state ok | Intl: country ok): ";
const PREVIOUS_SCHOOL_PROMPT: &str = "Previous School (or 'none'): ";
const CONTINUE_PROMPT: &str = "[Enter] next question, q to quit: ";

/// Print `label` and read one line. `None` at end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
) -> std::io::Result<Option<String>> {
    write!(out, "{}", label)?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Read the three answers that follow the name. `None` at end of input.
fn read_rest<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    name: String,
) -> std::io::Result<Option<Answers>> {
    let Some(year) = prompt(input, out, YEAR_PROMPT)? else {
        return Ok(None);
    };
    let Some(hometown) = prompt(input, out, HOMETOWN_PROMPT)? else {
        return Ok(None);
    };
    let Some(previous_school) = prompt(input, out, PREVIOUS_SCHOOL_PROMPT)? else {
        return Ok(None);
    };
    Ok(Some(Answers {
        name,
        year,
        hometown,
        previous_school,
    }))
}

/// Run questions until the user quits or input ends, then print the tally.
pub fn run<R: BufRead, W: Write>(
    session: &mut QuizSession<'_>,
    input: &mut R,
    out: &mut W,
    color: ColorMode,
) -> std::io::Result<Tally> {
    let mut number = 1;
    loop {
        let record = session.current();
        output::print_question(out, number, record, color)?;

        let Some(name) = prompt(input, out, NAME_PROMPT)? else {
            break;
        };
        if name.trim() == "?" {
            let record = session.reveal();
            output::print_answer_key(out, record, color)?;
        } else {
            let Some(answers) = read_rest(input, out, name)? else {
                break;
            };
            let verdict = session.submit(&answers);
            output::print_verdict(out, &verdict, color)?;
            output::print_answer_key(out, record, color)?;
        }

        match prompt(input, out, CONTINUE_PROMPT)? {
            Some(choice) if !choice.trim().eq_ignore_ascii_case("q") => {}
            _ => break,
        }
        session.next_question();
        number += 1;
        writeln!(out)?;
    }

    let tally = session.tally();
    tracing::debug!(answered = tally.answered, points = tally.points, "quiz finished");
    output::print_tally(out, &tally, color)?;
    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn roster() -> Roster {
        Roster::new(vec![RosterRecord {
            full_name: "Maria Garcia".into(),
            year: "R-So.".into(),
            hometown: "Madrid, Spain".into(),
            previous_school: String::new(),
            image_url: "https://img.example/garcia.jpg".into(),
        }])
        .unwrap()
    }

    fn play(roster: &Roster, script: &str) -> (Tally, String) {
        let mut session =
            QuizSession::new(roster, Verifier::default(), fastrand::Rng::with_seed(1));
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        let tally = run(&mut session, &mut input, &mut out, ColorMode(false)).unwrap();
        (tally, String::from_utf8(out).unwrap())
    }

    #[test]
    fn submit_scores_and_reveals() {
        let roster = roster();
        let mut session =
            QuizSession::new(&roster, Verifier::default(), fastrand::Rng::with_seed(3));
        assert!(!session.is_revealed());

        let verdict = session.submit(&Answers {
            name: "maria garcia".into(),
            year: "R-So".into(),
            hometown: "Spain".into(),
            previous_school: "none".into(),
        });
        assert_eq!(verdict.total, 4);
        assert!(session.is_revealed());
        assert_eq!(
            session.tally(),
            Tally {
                answered: 1,
                points: 4
            }
        );

        session.next_question();
        assert!(!session.is_revealed());
        assert_eq!(session.current().full_name, "Maria Garcia");
    }

    #[test]
    fn reveal_does_not_score() {
        let roster = roster();
        let mut session =
            QuizSession::new(&roster, Verifier::default(), fastrand::Rng::with_seed(3));
        assert_eq!(session.reveal().year, "R-So.");
        assert!(session.is_revealed());
        assert_eq!(session.tally(), Tally::default());
    }

    #[test]
    fn one_round_then_quit() {
        let (tally, out) = play(
            &roster(),
            "Maria Garcia\nredshirt sophomore\nspain\nnone\nq\n",
        );
        assert_eq!(
            tally,
            Tally {
                answered: 1,
                points: 4
            }
        );
        assert!(out.contains("Photo: https://img.example/garcia.jpg"));
        assert!(out.contains("Score: 4/4"));
        assert!(out.contains("Answer key"));
        assert!(out.contains("Answered 1 question, 4 of 4 points."));
    }

    #[test]
    fn reveal_then_answer_then_eof() {
        let (tally, out) = play(&roster(), "?\n\nJohn Doe\nFr.\nTexas\n\n");
        assert!(out.contains("=== Question 2 ==="));
        assert_eq!(tally.answered, 1);
        // only the blank previous school is right
        assert_eq!(tally.points, 1);
        assert!(out.contains("Score: 1/4"));
    }

    #[test]
    fn eof_mid_question_is_not_scored() {
        let (tally, out) = play(&roster(), "Maria Garcia\nSo.\n");
        assert_eq!(tally, Tally::default());
        assert!(!out.contains("Score:"));
        assert!(out.contains("Answered 0 questions, 0 of 0 points."));
    }

    #[test]
    fn empty_input_quits_immediately() {
        let (tally, out) = play(&roster(), "");
        assert_eq!(tally, Tally::default());
        assert!(out.contains("=== Question 1 ==="));
    }
}
