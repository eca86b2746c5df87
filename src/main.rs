mod app;
mod audio;
mod cli;
mod config;
mod logging;
mod paths;
mod storage;
mod theme;
mod timer;
mod tui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, RunArgs, ThemeCommand};
use console::style;

use crate::app::App;
use crate::audio::player::PlaylistPlayer;
use crate::audio::playlist::Playlist;
use crate::storage::FileStore;
use crate::theme::{ThemePreference, ThemeStore, ThemeTarget};
use crate::tui::palette::Palette;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    match cli.command.unwrap_or(Command::Run(RunArgs::default())) {
        Command::Run(args) => run(args),
        Command::Theme { action } => theme_command(action),
        Command::Tracks => list_tracks(),
        Command::Paths => {
            print_paths();
            Ok(())
        }
    }
}

fn run(args: RunArgs) -> Result<()> {
    let mut config = config::load_config()?;
    if let Some(minutes) = args.work {
        config.timer.work_minutes = minutes;
    }
    if let Some(minutes) = args.short_break {
        config.timer.short_break_minutes = minutes;
    }
    if let Some(minutes) = args.long_break {
        config.timer.long_break_minutes = minutes;
    }
    config.validate()?;

    let playlist = Playlist::new(config.music.track_list())?;
    let output = audio::output::open_default(args.mute, config.music.volume);
    let player = PlaylistPlayer::new(playlist, output);

    let mut palette = Palette::default();
    let theme = ThemeStore::initialize(Box::new(FileStore::open_default()), &mut palette);

    let mut app = App::new(
        (&config.timer).into(),
        config.timer.alarm_delay(),
        player,
        theme,
    );
    log::info!(
        "Session started: {}m work / {}m short / {}m long",
        config.timer.work_minutes,
        config.timer.short_break_minutes,
        config.timer.long_break_minutes
    );

    let mut session = tui::Session::enter()?;
    let result = tui::screens::pomodoro::run(
        session.terminal(),
        &mut app,
        &mut palette,
        config.ui.cell_aspect,
    );
    session.leave()?;
    result?;

    let completed = app.timer().completed_work_phases();
    log::info!("Session ended after {completed} work phases");
    println!(
        "{} {} work phase{} completed.",
        style("Done.").green().bold(),
        completed,
        if completed == 1 { "" } else { "s" }
    );
    Ok(())
}

/// Prints the theme it is shown.
struct PrintTheme;

impl ThemeTarget for PrintTheme {
    fn reflect(&mut self, theme: ThemePreference) {
        println!(
            "{} {} {}",
            style("Theme:").bold(),
            style(theme).cyan(),
            theme.icon()
        );
    }
}

fn theme_command(action: Option<ThemeCommand>) -> Result<()> {
    let store = Box::new(FileStore::open_default());
    match action {
        None => {
            ThemeStore::initialize(store, &mut PrintTheme);
        }
        Some(ThemeCommand::Toggle) => {
            let mut themes = ThemeStore::initialize(store, &mut Palette::default());
            themes.toggle(&mut PrintTheme);
        }
        Some(ThemeCommand::Set { theme }) => {
            let theme: ThemePreference = theme.parse()?;
            let mut themes = ThemeStore::initialize(store, &mut Palette::default());
            themes.set(theme, &mut PrintTheme);
        }
    }
    Ok(())
}

fn list_tracks() -> Result<()> {
    let config = config::load_config()?;
    println!(
        "{} {}",
        style("Music directory:").bold(),
        config.music.resolved_directory().display()
    );
    println!();
    for (i, track) in config.music.track_list().iter().enumerate() {
        let status = if track.path.exists() {
            style("ok").green()
        } else {
            style("missing").red()
        };
        println!(
            "  {}. {:<12} {} [{}]",
            i + 1,
            track.title,
            track.path.display(),
            status
        );
    }
    Ok(())
}

fn print_paths() {
    println!("{} {}", style("Config:").bold(), paths::config_file().display());
    println!("{} {}", style("Preferences:").bold(), paths::prefs_file().display());
    println!("{} {}", style("Music:").bold(), paths::music_dir().display());
    println!("{} {}", style("Log:").bold(), paths::log_file().display());
}
