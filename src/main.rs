use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use mcprof::{
    commands,
    paths::{self, Defaults},
    ui::{ColorMode, Ui},
};

#[derive(Parser)]
#[command(name = "mcprof")]
#[command(about = "Switch Minecraft mods and options between named profiles without copying files around")]
#[command(version)]
struct Cli {
    /// Use this configuration file instead of the default location
    #[arg(short = 'c', long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// When to use colors
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// With no command, an interactive session starts
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all profiles
    List,

    /// Show the current profile and the installation's tracked items
    Current,

    /// Switch the installation to a profile
    Use {
        /// Name of the profile to activate
        name: String,
    },

    /// Create a new profile from the installation's current items
    New {
        /// Name for the new profile
        name: String,
    },

    /// Delete a profile
    Remove {
        /// Name of the profile to delete
        name: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },

    /// Copy a profile under a new name
    Copy {
        /// Profile to copy
        src: String,
        /// Name for the copy
        dest: String,
    },

    /// Rename a profile
    Rename {
        /// Profile to rename
        src: String,
        /// New name
        dest: String,
    },

    /// Print where the profiles are stored
    Location,

    /// Move the whole profile store somewhere else
    Relocate {
        /// New location; must not exist yet
        dest: PathBuf,
    },

    /// Copy the whole profile store somewhere else
    Export {
        /// Destination; must not exist yet
        dest: PathBuf,
    },

    /// Point mcprof at a different Minecraft installation
    SetMinecraftDir {
        /// The game directory to switch items in from now on
        path: PathBuf,
    },

    /// First-time setup: seed a 'default' profile from the installation
    Setup {
        /// Store profiles here instead of answering the prompt
        #[arg(long, value_name = "DIR")]
        profiles_dir: Option<PathBuf>,

        /// Seed from this installation instead of answering the prompt
        #[arg(long, value_name = "DIR")]
        minecraft_dir: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let ui = Ui::new(cli.color, cli.no_color);
    let defaults = Defaults::new()?;
    let config_path = paths::config_file_path(cli.config.as_deref(), &defaults);

    let Some(command) = cli.command else {
        return commands::interactive(&defaults, &config_path, &ui);
    };

    match command {
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "mcprof", &mut io::stdout());
            Ok(())
        }
        // Setup works even when the existing record is damaged: the fresh
        // record simply replaces it.
        Commands::Setup {
            profiles_dir,
            minecraft_dir,
        } => {
            let config = commands::setup(&defaults, profiles_dir, minecraft_dir, &ui)?;
            config.save(&config_path)?;
            ui.ok(format!("Saved configuration to {}", config_path.display()));
            Ok(())
        }
        command => {
            let mut config = commands::load_or_init(&config_path, &defaults, &ui)?;
            let record_changed = match &command {
                Commands::List => {
                    commands::list(&config, &ui)?;
                    false
                }
                Commands::Current => {
                    commands::current(&config, &ui)?;
                    false
                }
                Commands::Use { name } => {
                    commands::use_profile(&mut config, name, &ui)?;
                    true
                }
                Commands::New { name } => {
                    commands::new(&config, name, &ui)?;
                    false
                }
                Commands::Remove { name, force } => {
                    commands::remove(&config, name, *force, &ui)?;
                    false
                }
                Commands::Copy { src, dest } => {
                    commands::copy(&config, src, dest, &ui)?;
                    false
                }
                Commands::Rename { src, dest } => {
                    commands::rename(&config, src, dest, &ui)?;
                    false
                }
                Commands::Location => {
                    commands::location(&config, &ui)?;
                    false
                }
                Commands::Relocate { dest } => {
                    commands::relocate(&mut config, dest, &ui)?;
                    true
                }
                Commands::Export { dest } => {
                    commands::export(&config, dest, &ui)?;
                    false
                }
                Commands::SetMinecraftDir { path } => {
                    commands::set_minecraft_dir(&mut config, path, &ui)?;
                    true
                }
                Commands::Setup { .. } | Commands::Completions { .. } => {
                    unreachable!("handled before the record is loaded")
                }
            };
            if record_changed {
                config.save(&config_path)?;
            }
            Ok(())
        }
    }
}
