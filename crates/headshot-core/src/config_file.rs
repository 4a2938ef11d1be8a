use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// `config.toml` / `.headshot.toml` contents. Every key is optional; anything
/// left out keeps its built-in default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub thresholds: Option<ThresholdsConfig>,
    pub quiz: Option<QuizConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdsConfig {
    pub default: Option<f64>,
    pub name_whole: Option<f64>,
    pub name_last: Option<f64>,
    pub name_first: Option<f64>,
    pub hometown: Option<f64>,
    pub previous_school: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizConfig {
    pub roster_path: Option<String>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub color: Option<bool>,
}

/// Platform config directory path: `<config_dir>/headshot/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("headshot").join("config.toml"))
}

/// Read the platform config, then let `./.headshot.toml` override it key by
/// key.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".headshot.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Parse one config file. A missing or malformed file counts as no config.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => {
            tracing::info!(path = %path.display(), "loaded config");
            Some(config)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config");
            None
        }
    }
}

/// Combine two configs key by key, preferring `overlay`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let bt = base.thresholds.unwrap_or_default();
    let ot = overlay.thresholds.unwrap_or_default();
    let bq = base.quiz.unwrap_or_default();
    let oq = overlay.quiz.unwrap_or_default();
    let bd = base.display.unwrap_or_default();
    let od = overlay.display.unwrap_or_default();

    ConfigFile {
        thresholds: Some(ThresholdsConfig {
            default: ot.default.or(bt.default),
            name_whole: ot.name_whole.or(bt.name_whole),
            name_last: ot.name_last.or(bt.name_last),
            name_first: ot.name_first.or(bt.name_first),
            hometown: ot.hometown.or(bt.hometown),
            previous_school: ot.previous_school.or(bt.previous_school),
        }),
        quiz: Some(QuizConfig {
            roster_path: oq.roster_path.or(bq.roster_path),
            seed: oq.seed.or(bq.seed),
        }),
        display: Some(DisplayConfig {
            color: od.color.or(bd.color),
        }),
    }
}

/// Save the config to the platform config directory.
pub fn save_config(config: &ConfigFile) -> Result<PathBuf, String> {
    let path = config_path().ok_or_else(|| "No platform config directory".to_string())?;
    save_config_to(config, &path)?;
    Ok(path)
}

/// Save the config to `path`, creating parent directories as needed.
pub fn save_config_to(config: &ConfigFile, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create config directory: {}", e))?;
    }
    let content =
        toml::to_string_pretty(config).map_err(|e| format!("Failed to serialize config: {}", e))?;
    std::fs::write(path, content).map_err(|e| format!("Failed to write config: {}", e))?;
    Ok(())
}
