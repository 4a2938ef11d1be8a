use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod logging;
mod output;
mod session;

use headshot_core::config_file::{self, ConfigFile, DisplayConfig, QuizConfig, ThresholdsConfig};
use headshot_core::{Answers, Thresholds, Verifier};
use headshot_roster::{HometownBreakdown, Roster};
use output::ColorMode;
use session::QuizSession;

/// Headshot quiz - guess a player's name, year, hometown and previous school
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play the quiz interactively
    Quiz {
        /// Roster CSV (falls back to HEADSHOT_ROSTER, then the config file)
        #[arg(short, long)]
        roster: Option<PathBuf>,

        /// Seed for question order
        #[arg(long)]
        seed: Option<u64>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Score one set of answers against a roster player
    Check {
        /// Roster CSV (falls back to HEADSHOT_ROSTER, then the config file)
        #[arg(short, long)]
        roster: Option<PathBuf>,

        /// Player to score against, looked up by name
        #[arg(long)]
        player: String,

        /// Name answer
        #[arg(long, default_value = "")]
        name: String,

        /// Year answer
        #[arg(long, default_value = "")]
        year: String,

        /// Hometown answer
        #[arg(long, default_value = "")]
        hometown: String,

        /// Previous school answer
        #[arg(long, default_value = "")]
        previous_school: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Break a roster's hometowns down into international, California and other US
    Breakdown {
        /// Roster CSV (falls back to HEADSHOT_ROSTER, then the config file)
        #[arg(short, long)]
        roster: Option<PathBuf>,

        /// How many hometowns to list per table
        #[arg(long, default_value_t = 10)]
        top: usize,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Also write it to the platform config file
        #[arg(long)]
        save: bool,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let config = config_file::load_config();

    match cli.command {
        Command::Quiz {
            roster,
            seed,
            no_color,
        } => quiz(&config, roster, seed, no_color),
        Command::Check {
            roster,
            player,
            name,
            year,
            hometown,
            previous_school,
            json,
            no_color,
        } => {
            let answers = Answers {
                name,
                year,
                hometown,
                previous_school,
            };
            check(&config, roster, &player, &answers, json, no_color)
        }
        Command::Breakdown {
            roster,
            top,
            json,
            no_color,
        } => breakdown(&config, roster, top, json, no_color),
        Command::Config { save } => show_config(&config, save),
    }
}

/// Resolve the roster path: CLI flag > `HEADSHOT_ROSTER` > config file.
fn roster_path(config: &ConfigFile, flag: Option<PathBuf>) -> Option<PathBuf> {
    flag.or_else(|| std::env::var("HEADSHOT_ROSTER").ok().map(PathBuf::from))
        .or_else(|| {
            config
                .quiz
                .as_ref()
                .and_then(|q| q.roster_path.as_ref())
                .map(PathBuf::from)
        })
}

fn open_roster(config: &ConfigFile, flag: Option<PathBuf>) -> anyhow::Result<Roster> {
    let Some(path) = roster_path(config, flag) else {
        anyhow::bail!(
            "No roster given. Pass --roster, set HEADSHOT_ROSTER, or set quiz.roster_path in the config file."
        );
    };
    if !path.exists() {
        anyhow::bail!("Roster not found: {}", path.display());
    }
    Ok(headshot_roster::load_roster(&path)?)
}

fn color_mode(config: &ConfigFile, no_color: bool) -> ColorMode {
    let configured = config.display.as_ref().and_then(|d| d.color).unwrap_or(true);
    ColorMode(!no_color && configured)
}

fn quiz(
    config: &ConfigFile,
    roster: Option<PathBuf>,
    seed: Option<u64>,
    no_color: bool,
) -> anyhow::Result<()> {
    let roster = open_roster(config, roster)?;
    let verifier = Verifier::new(Thresholds::from_config(config));
    let seed = seed.or_else(|| config.quiz.as_ref().and_then(|q| q.seed));
    let rng = match seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };

    let mut session = QuizSession::new(&roster, verifier, rng);
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout();
    session::run(&mut session, &mut input, &mut out, color_mode(config, no_color))?;
    Ok(())
}

fn check(
    config: &ConfigFile,
    roster: Option<PathBuf>,
    player: &str,
    answers: &Answers,
    json: bool,
    no_color: bool,
) -> anyhow::Result<()> {
    let roster = open_roster(config, roster)?;
    let thresholds = Thresholds::from_config(config);
    let Some(record) = roster.find_by_name(player, thresholds.default) else {
        anyhow::bail!("No player on the roster matches \"{}\"", player);
    };

    let verdict = Verifier::new(thresholds).score(answers, record);
    let mut out = std::io::stdout();
    if json {
        let value = serde_json::json!({
            "player": record,
            "answers": answers,
            "verdict": verdict,
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
    } else {
        output::print_check(&mut out, record, &verdict, color_mode(config, no_color))?;
    }
    Ok(())
}

fn breakdown(
    config: &ConfigFile,
    roster: Option<PathBuf>,
    top: usize,
    json: bool,
    no_color: bool,
) -> anyhow::Result<()> {
    let roster = open_roster(config, roster)?;
    let breakdown = HometownBreakdown::from_records(&roster);
    let mut out = std::io::stdout();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&breakdown)?)?;
    } else {
        output::print_breakdown(&mut out, &breakdown, top, color_mode(config, no_color))?;
    }
    Ok(())
}

/// Every setting with defaults and the environment filled in.
fn effective_config(config: &ConfigFile) -> ConfigFile {
    let t = Thresholds::from_config(config);
    ConfigFile {
        thresholds: Some(ThresholdsConfig {
            default: Some(t.default),
            name_whole: Some(t.name_whole),
            name_last: Some(t.name_last),
            name_first: Some(t.name_first),
            hometown: Some(t.hometown),
            previous_school: Some(t.previous_school),
        }),
        quiz: Some(QuizConfig {
            roster_path: roster_path(config, None).map(|p| p.display().to_string()),
            seed: config.quiz.as_ref().and_then(|q| q.seed),
        }),
        display: Some(DisplayConfig {
            color: Some(color_mode(config, false).enabled()),
        }),
    }
}

fn show_config(config: &ConfigFile, save: bool) -> anyhow::Result<()> {
    let effective = effective_config(config);
    print!("{}", toml::to_string_pretty(&effective)?);
    if save {
        let path = config_file::save_config(&effective).map_err(anyhow::Error::msg)?;
        eprintln!("Saved config to {}", path.display());
    }
    Ok(())
}
