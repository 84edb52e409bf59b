//! Command-line interface for taskmap
//!
//! This module defines the CLI structure using clap derive macros.
//! Each command group is implemented in its own submodule.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::controller::{LoadReport, MapController};
use crate::debounce::SystemClock;
use crate::error::Result;
use crate::feed::Feeds;
use crate::output::OutputOptions;
use crate::shell::HeadlessSurface;
use crate::storage::FileStore;

mod graph;
mod task;
mod team;
mod view;

/// taskmap - task map view state
///
/// Inspect a task graph, pick a team to see its completed tasks, and manage
/// the persisted camera and node layout.
#[derive(Parser, Debug)]
#[command(name = "taskmap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding tasks.json, teams.json and .taskmap.toml
    #[arg(long, global = true, env = "TASKMAP_DATA", default_value = ".")]
    pub data_dir: PathBuf,

    /// View-state store file (overrides the configured location)
    #[arg(long, global = true, env = "TASKMAP_STORE")]
    pub store: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print graph elements with completion flags
    Graph,

    /// Team selection
    #[command(subcommand)]
    Team(TeamCommands),

    /// Camera and layout state
    #[command(subcommand)]
    View(ViewCommands),

    /// Node positions
    #[command(subcommand)]
    Node(NodeCommands),

    /// Task details
    #[command(subcommand)]
    Task(TaskCommands),
}

/// Team subcommands
#[derive(Subcommand, Debug)]
pub enum TeamCommands {
    /// List teams and mark the selected one
    List,

    /// Show the selected team
    Show,

    /// Select a team by id
    Select {
        /// Team id
        id: String,
    },

    /// Switch to Unaffiliated
    Clear,
}

/// View subcommands
#[derive(Subcommand, Debug)]
pub enum ViewCommands {
    /// Show the saved camera and layout state
    Show,

    /// Forget node positions and camera, then lay out again
    Reset,

    /// Zoom in, out, or to a slider value
    Zoom {
        /// "in", "out", or a slider value (e.g. 150)
        step: String,

        /// Interpret the slider value as the inverted narrow-screen slider
        #[arg(long)]
        narrow: bool,

        /// Screen width in pixels; narrow widths imply --narrow
        #[arg(long)]
        width: Option<u32>,
    },

    /// Center the camera on the start node
    Center,
}

/// Node subcommands
#[derive(Subcommand, Debug)]
pub enum NodeCommands {
    /// Move a node and save the layout
    Move {
        /// Task id
        id: String,

        #[arg(long, allow_hyphen_values = true, value_parser = parse_finite)]
        x: f64,

        #[arg(long, allow_hyphen_values = true, value_parser = parse_finite)]
        y: f64,
    },
}

/// Task subcommands
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Show a task with rewards and prerequisites
    Show {
        /// Task id
        id: String,
    },
}

/// Coordinates are persisted as JSON numbers, so NaN and infinity are refused
fn parse_finite(raw: &str) -> std::result::Result<f64, String> {
    let value: f64 = raw.trim().parse().map_err(|_| format!("'{raw}' is not a number"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("'{raw}' is not a finite number"))
    }
}

/// Controller wired to the file store and the headless surface
pub(crate) type CliController = MapController<FileStore, SystemClock, HeadlessSurface>;

/// Everything a command needs once the map is loaded
pub(crate) struct Session {
    pub map: CliController,
    pub report: LoadReport,
    pub output: OutputOptions,
    pub store_path: PathBuf,
}

impl Session {
    /// Load config, feeds and persisted state
    pub(crate) fn open(cli: &Cli) -> Result<Self> {
        let config = Config::load_from_dir(&cli.data_dir);
        let store_path = cli
            .store
            .clone()
            .unwrap_or_else(|| config.store_path(&cli.data_dir));
        let feeds = Feeds::load(&cli.data_dir)?;

        let surface = HeadlessSurface::new(
            1280.0,
            800.0,
            config.viewport.min_zoom,
            config.viewport.max_zoom,
        );
        let store =
            FileStore::new(store_path.clone()).with_lock_timeout(config.storage.lock_timeout_ms);
        let mut map = MapController::new(config, store, SystemClock, surface);
        let report = map.load(feeds.tasks, feeds.teams)?;

        Ok(Self {
            map,
            report,
            output: OutputOptions {
                json: cli.json,
                quiet: cli.quiet,
            },
            store_path,
        })
    }

    /// Write any debounced state before the process exits
    pub(crate) fn close(mut self) -> Result<()> {
        self.map.flush()?;
        Ok(())
    }
}

impl Cli {
    /// Execute the parsed command
    pub fn run(self) -> Result<()> {
        let session = Session::open(&self)?;
        match self.command {
            Commands::Graph => graph::run(session),
            Commands::Team(cmd) => team::run(session, cmd),
            Commands::View(cmd) => view::run(session, cmd),
            Commands::Node(cmd) => graph::run_node(session, cmd),
            Commands::Task(cmd) => task::run(session, cmd),
        }
    }
}
