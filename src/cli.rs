use std::{
    fs,
    path::{Path, PathBuf},
};

mod activate;
mod add;
mod award;
mod book;
mod cancel;
mod close;
mod day;
mod init;
mod maintain;
mod next;
mod rank;
mod reschedule;
mod review;
mod terminal;

use anyhow::Context;
use clap::ArgAction;
use odin::MemoryStore;
use serde::{Deserialize, Serialize};

/// Workspace preferences, stored next to the state file as
/// `odin.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Preferences {
    /// Path of the JSON state file.
    state: PathBuf,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            state: PathBuf::from("odin.json"),
        }
    }
}

impl Preferences {
    const FILE: &str = "odin.toml";

    /// Loads preferences from `odin.toml` in the working directory,
    /// falling back to defaults when the file does not exist.
    fn load() -> anyhow::Result<Self> {
        match fs::read_to_string(Self::FILE) {
            Ok(content) => toml::from_str(&content)
                .with_context(|| format!("failed to parse {}", Self::FILE)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err).with_context(|| format!("failed to read {}", Self::FILE)),
        }
    }

    /// Writes preferences to `odin.toml` in the working directory.
    fn save(&self) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self).context("failed to serialize preferences")?;
        fs::write(Self::FILE, content).with_context(|| format!("failed to write {}", Self::FILE))
    }
}

/// Reads the store from the JSON state file.
fn load_store(path: &Path) -> anyhow::Result<MemoryStore> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read state file {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("state file {} is not valid", path.display()))
}

/// Writes the store back to the JSON state file.
fn save_store(path: &Path, store: &MemoryStore) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(store).context("failed to serialize state")?;
    fs::write(path, json).with_context(|| format!("failed to write state file {}", path.display()))
}

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the state file (overrides odin.toml)
    #[arg(short, long, global = true)]
    state: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let state = match self.state {
            Some(path) => path,
            None => Preferences::load()?.state,
        };

        self.command.run(&state)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Initialize a new workspace
    Init(init::Command),

    /// Register resources, members, templates, periods and semesters
    #[command(subcommand)]
    Add(add::Command),

    /// Book a room, an equipment item, or request an external room
    Book(book::Command),

    /// Move an existing booking to a new time
    Reschedule(reschedule::Command),

    /// Cancel a booking
    Cancel(cancel::Command),

    /// Approve or reject an external room request
    Review(review::Command),

    /// Show the day's occupancy across all resources
    Day(day::Command),

    /// Show when a resource is next available
    Next(next::Command),

    /// Change the status of an equipment item
    Maintain(maintain::Command),

    /// Award a tag to a member or to the enterprise
    Award(award::Command),

    /// Show the JR Points ranking
    Rank(rank::Command),

    /// Close a semester and snapshot all scores
    Close(close::Command),

    /// Activate a scoring period
    Activate(activate::Command),
}

impl Command {
    fn run(self, state: &Path) -> anyhow::Result<()> {
        match self {
            Self::Init(command) => command.run(state),
            Self::Add(command) => command.run(state),
            Self::Book(command) => command.run(state),
            Self::Reschedule(command) => command.run(state),
            Self::Cancel(command) => command.run(state),
            Self::Review(command) => command.run(state),
            Self::Day(command) => command.run(state),
            Self::Next(command) => command.run(state),
            Self::Maintain(command) => command.run(state),
            Self::Award(command) => command.run(state),
            Self::Rank(command) => command.run(state),
            Self::Close(command) => command.run(state),
            Self::Activate(command) => command.run(state),
        }
    }
}
