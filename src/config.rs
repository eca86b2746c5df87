use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::audio::playlist::Track;
use crate::paths;
use crate::timer::Durations;

/// Application configuration, loaded from config.toml.
///
/// Every struct is `#[serde(default)]`, so a missing field (or a missing
/// file) falls back to the Default implementation instead of failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub timer: TimerConfig,
    pub music: MusicConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    pub work_minutes: u32,
    pub short_break_minutes: u32,
    pub long_break_minutes: u32,
    /// A long break replaces the short one after this many work phases.
    pub long_break_every: u32,
    /// Pause between the alarm cue and the next phase.
    pub alarm_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MusicConfig {
    /// Directory relative track files are resolved against.
    /// Empty means the default data directory location.
    pub directory: String,
    pub volume: f32,
    pub tracks: Vec<TrackEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackEntry {
    pub title: String,
    pub file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Height/width ratio of one terminal cell, used to keep the ring round
    /// and to map mouse positions onto it.
    pub cell_aspect: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            timer: TimerConfig::default(),
            music: MusicConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            long_break_every: 4,
            alarm_delay_ms: 1000,
        }
    }
}

impl Default for MusicConfig {
    fn default() -> Self {
        let files = [
            "Lofi1.mp3",
            "Lofi2.m4a",
            "Lofi3.mp3",
            "Lofi4.mp3",
            "Lofi5.mp3",
            "Lofi6.mp3",
        ];
        Self {
            directory: String::new(),
            volume: 0.5,
            tracks: files
                .iter()
                .enumerate()
                .map(|(i, file)| TrackEntry {
                    title: format!("Lofi {}", i + 1),
                    file: (*file).into(),
                })
                .collect(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { cell_aspect: 2.0 }
    }
}

impl TimerConfig {
    pub fn alarm_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.alarm_delay_ms)
    }
}

/// Longest phase accepted, one day.
pub const MAX_PHASE_MINUTES: u32 = 24 * 60;

fn minutes_to_secs(minutes: u32) -> u32 {
    minutes.saturating_mul(60)
}

impl From<&TimerConfig> for Durations {
    fn from(cfg: &TimerConfig) -> Self {
        Durations {
            work_secs: minutes_to_secs(cfg.work_minutes),
            short_break_secs: minutes_to_secs(cfg.short_break_minutes),
            long_break_secs: minutes_to_secs(cfg.long_break_minutes),
            long_break_every: cfg.long_break_every,
        }
    }
}

impl MusicConfig {
    /// Directory that relative track files are resolved against.
    pub fn resolved_directory(&self) -> PathBuf {
        if self.directory.is_empty() {
            paths::music_dir()
        } else {
            PathBuf::from(&self.directory)
        }
    }

    /// Build the ordered track list, resolving each file against the music
    /// directory. Absolute paths are kept as they are.
    pub fn track_list(&self) -> Vec<Track> {
        let dir = self.resolved_directory();
        self.tracks
            .iter()
            .map(|entry| Track {
                title: entry.title.clone(),
                path: resolve_track_path(&dir, &entry.file),
            })
            .collect()
    }
}

fn resolve_track_path(dir: &Path, file: &str) -> PathBuf {
    let path = Path::new(file);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        dir.join(path)
    }
}

impl AppConfig {
    /// Reject values the timer cannot work with.
    pub fn validate(&self) -> Result<()> {
        let t = &self.timer;
        if t.work_minutes == 0 || t.short_break_minutes == 0 || t.long_break_minutes == 0 {
            anyhow::bail!("Phase durations must be at least one minute");
        }
        let longest = t.work_minutes.max(t.short_break_minutes).max(t.long_break_minutes);
        if longest > MAX_PHASE_MINUTES {
            anyhow::bail!(
                "Phase durations must be at most {MAX_PHASE_MINUTES} minutes (got {longest})"
            );
        }
        if t.long_break_every == 0 {
            anyhow::bail!("timer.long_break_every must be at least 1");
        }
        if self.music.tracks.is_empty() {
            anyhow::bail!("music.tracks must list at least one track");
        }
        if self.ui.cell_aspect.is_nan() || self.ui.cell_aspect <= 0.0 {
            anyhow::bail!("ui.cell_aspect must be positive");
        }
        Ok(())
    }
}

/// Load the application config from $XDG_CONFIG_HOME/pomolofi/config.toml.
/// If the file doesn't exist, returns defaults.
pub fn load_config() -> Result<AppConfig> {
    load_config_from(&paths::config_file())
}

pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.timer.work_minutes, 25);
        assert_eq!(cfg.timer.long_break_every, 4);
        assert_eq!(cfg.music.tracks.len(), 6);
        assert_eq!(cfg.music.tracks[1].file, "Lofi2.m4a");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn parse_partial_toml() {
        // Only some fields given; the rest come from defaults
        let toml_str = r#"
[timer]
work_minutes = 50
"#;
        let cfg: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.timer.work_minutes, 50);
        assert_eq!(cfg.timer.short_break_minutes, 5);
        assert_eq!(cfg.ui.cell_aspect, 2.0);
    }

    #[test]
    fn durations_conversion() {
        let durations: Durations = (&TimerConfig::default()).into();
        assert_eq!(durations.work_secs, 1500);
        assert_eq!(durations.short_break_secs, 300);
        assert_eq!(durations.long_break_secs, 900);
    }

    #[test]
    fn track_paths_resolve_against_directory() {
        let cfg = MusicConfig {
            directory: "/srv/lofi".into(),
            volume: 0.5,
            tracks: vec![
                TrackEntry { title: "A".into(), file: "a.mp3".into() },
                TrackEntry { title: "B".into(), file: "/abs/b.mp3".into() },
            ],
        };
        let tracks = cfg.track_list();
        assert_eq!(tracks[0].path, PathBuf::from("/srv/lofi/a.mp3"));
        assert_eq!(tracks[1].path, PathBuf::from("/abs/b.mp3"));
    }

    #[test]
    fn zero_duration_is_rejected() {
        let mut cfg = AppConfig::default();
        cfg.timer.short_break_minutes = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn oversized_duration_is_rejected() {
        let mut cfg = AppConfig::default();
        cfg.timer.work_minutes = 100_000_000;
        assert!(cfg.validate().is_err());

        cfg.timer.work_minutes = MAX_PHASE_MINUTES;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn huge_minutes_do_not_overflow_conversion() {
        let cfg = TimerConfig {
            work_minutes: u32::MAX,
            ..TimerConfig::default()
        };
        let durations: Durations = (&cfg).into();
        assert_eq!(durations.work_secs, u32::MAX);
        assert_eq!(durations.short_break_secs, 300);
    }

    #[test]
    fn empty_track_list_is_rejected() {
        let mut cfg = AppConfig::default();
        cfg.music.tracks.clear();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(cfg.timer.long_break_minutes, 15);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[timer\nwork_minutes = ").unwrap();
        assert!(load_config_from(&path).is_err());
    }
}
