#![deny(unsafe_code)]

mod common;
mod config;
mod constants;
mod shell;

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::FmtSubscriber;
use tracing_subscriber::filter::LevelFilter;

use crate::common::types::{Position, Size};
use crate::config::{ConfigError, ConfigStore};
use crate::shell::Shell;

#[derive(Parser)]
#[command(name = "jsdr")]
#[command(version)]
#[command(about = "jSDR software defined radio", long_about = None)]
struct Cli {
    /// Log fatal and error messages
    #[arg(long, global = true)]
    error: bool,

    /// Log fatal, error, and info messages
    #[arg(long, global = true)]
    info: bool,

    /// Log fatal, error, info, and debug messages
    #[arg(long, global = true)]
    debug: bool,

    /// Log filename (defaults to jsdr.log in the home directory)
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the main window and print its geometry
    Show,
    /// Move or resize the main window, then close it to save the geometry
    Set {
        #[arg(long, allow_hyphen_values = true)]
        x: Option<i32>,
        #[arg(long, allow_hyphen_values = true)]
        y: Option<i32>,
        #[arg(long, allow_hyphen_values = true)]
        width: Option<i32>,
        #[arg(long, allow_hyphen_values = true)]
        height: Option<i32>,
    },
    /// Write default geometry to the config file
    Reset,
    /// Print the config file location
    Path,
}

impl Cli {
    /// Most verbose flag wins; with no flag only fatal messages would be logged,
    /// and there is no fatal level, so logging is off.
    fn log_level(&self) -> LevelFilter {
        if self.debug {
            LevelFilter::DEBUG
        } else if self.info {
            LevelFilter::INFO
        } else if self.error {
            LevelFilter::ERROR
        } else {
            LevelFilter::OFF
        }
    }

    fn log_file(&self) -> Option<PathBuf> {
        self.out.clone().or_else(|| {
            dirs::home_dir().map(|home| home.join(constants::logging::FILENAME))
        })
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(cli.log_level().into())
        .from_env_lossy();

    match cli.log_file() {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Error trying to open log file {:?}", path))?;
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .finish();
            tracing::subscriber::set_global_default(subscriber)
                .context("Failed to set tracing subscriber")?;
        }
        None => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
                .context("Failed to set tracing subscriber")?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;
    info!("jsdr logging initialized");

    match cli.command.unwrap_or(Command::Show) {
        Command::Show => {
            let shell = Shell::startup(ConfigStore::new());
            if let Err(e) = shell.load_status() {
                eprintln!("jsdr: config not loaded ({}), showing default geometry", e);
            }
            let frame = shell.main_frame();
            let position = if frame.position.is_specified() {
                format!("({}, {})", frame.position.x, frame.position.y)
            } else {
                "default".to_string()
            };
            println!(
                "{}: position {} size {}x{}",
                frame.title, position, frame.size.width, frame.size.height
            );
        }
        Command::Set {
            x,
            y,
            width,
            height,
        } => {
            let mut shell = Shell::startup(ConfigStore::new());
            let frame = shell.main_frame().clone();
            shell.move_to(Position::new(
                x.unwrap_or(frame.position.x),
                y.unwrap_or(frame.position.y),
            ));
            shell.resize(Size::new(
                width.unwrap_or(frame.size.width),
                height.unwrap_or(frame.size.height),
            ));
            shell.shutdown()?;
        }
        Command::Reset => {
            let mut store = ConfigStore::new();
            // Reset is the explicit repair path for an unparsable file
            match store.load() {
                Ok(_) | Err(ConfigError::Parse { .. }) => {}
                Err(e) => return Err(e).context("Failed to load config"),
            }
            store.set_default_config_values();
            store.store().context("Failed to save config")?;
            if let Some(path) = store.path() {
                println!("{}", path.display());
            }
        }
        Command::Path => {
            let shell = Shell::startup(ConfigStore::new());
            match shell.store().path() {
                Some(path) => println!("{}", path.display()),
                None => anyhow::bail!(ConfigError::NoUserContext),
            }
        }
    }

    Ok(())
}
