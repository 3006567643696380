use clap::{Parser, Subcommand};
use vitrinectl::appearance::{Language, Theme};
use vitrinectl::client;
use vitrinectl::protocol::Command;

#[derive(Parser, Debug)]
#[command(name = "vitrinectl", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Show the showcase window
    Show,
    /// Hide the showcase window
    Hide,
    /// Scroll the carousel to an indicator dot (0-based)
    Goto { index: usize },
    /// Switch the content language (en, ar)
    Lang { language: Language },
    /// Switch the colour theme (light, dark)
    Theme { theme: Theme },
    /// Re-read the configuration file
    Reload,
}

impl From<Commands> for Command {
    fn from(cmd: Commands) -> Self {
        match cmd {
            Commands::Show => Command::Show,
            Commands::Hide => Command::Hide,
            Commands::Goto { index } => Command::Goto(index),
            Commands::Lang { language } => Command::Language(language),
            Commands::Theme { theme } => Command::Theme(theme),
            Commands::Reload => Command::Reload,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(cmd) => {
            client::send_command(&Command::from(cmd))?;
            Ok(())
        }
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            Ok(())
        }
    }
}
