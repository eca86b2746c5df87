use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pomolofi")]
#[command(about = "Pomodoro timer with a lofi playlist, in your terminal")]
pub struct Cli {
    /// Log at debug level (see the log file path from `pomolofi paths`)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Open the timer (the default when no command is given)
    Run(RunArgs),

    /// Show or change the saved light/dark theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeCommand>,
    },

    /// List the configured tracks and whether their files exist
    Tracks,

    /// Show where config, preferences, music and logs live
    Paths,
}

#[derive(Args, Default)]
pub struct RunArgs {
    /// Work phase length in minutes (overrides config)
    #[arg(long)]
    pub work: Option<u32>,

    /// Short break length in minutes (overrides config)
    #[arg(long)]
    pub short_break: Option<u32>,

    /// Long break length in minutes (overrides config)
    #[arg(long)]
    pub long_break: Option<u32>,

    /// Run without sound
    #[arg(long)]
    pub mute: bool,
}

#[derive(Subcommand)]
pub enum ThemeCommand {
    /// Switch between light and dark
    Toggle,

    /// Set the theme explicitly
    Set {
        /// "light" or "dark"
        theme: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_run() {
        let cli = Cli::try_parse_from(["pomolofi"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn run_overrides() {
        let cli =
            Cli::try_parse_from(["pomolofi", "run", "--work", "50", "--short-break", "10", "--mute"])
                .unwrap();
        match cli.command {
            Some(Command::Run(args)) => {
                assert_eq!(args.work, Some(50));
                assert_eq!(args.short_break, Some(10));
                assert_eq!(args.long_break, None);
                assert!(args.mute);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn theme_set() {
        let cli = Cli::try_parse_from(["pomolofi", "theme", "set", "dark"]).unwrap();
        match cli.command {
            Some(Command::Theme { action: Some(ThemeCommand::Set { theme }) }) => {
                assert_eq!(theme, "dark")
            }
            _ => panic!("expected theme set"),
        }
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
