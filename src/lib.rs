//! taskmap - task map view state
//!
//! The core of a task/skill-tree map: tasks are nodes, prerequisites are
//! edges, and a selected team decides which tasks show as completed. Camera,
//! node positions and the team choice persist in a key-value store. Drawing,
//! layout physics and hit-testing belong to an external rendering engine.
//!
//! # Module Organization
//!
//! - `model`: Task, team and view-state records
//! - `graph`: Node/edge elements built from tasks
//! - `color`: Hex parsing and brightness shifting
//! - `overlay`: Team completion flags and completed styling
//! - `storage`: Key-value backends (memory, locked JSON file)
//! - `view_state`: The three persisted slots
//! - `debounce`: Trailing-edge debouncing over an injectable clock
//! - `viewport`: Zoom controls and layout choice
//! - `shell`: Rendering engine contract and a headless engine
//! - `details`: Task detail view
//! - `feed`: Task and team feed loading
//! - `controller`: Application state and event handling
//! - `config`: Configuration loading from `.taskmap.toml`
//! - `cli`: Command-line interface using clap
//! - `output`: Human and JSON output for CLI commands
//! - `error`: Error types and exit codes
//! - `lock`: File locking and atomic writes

pub mod cli;
pub mod color;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod details;
pub mod error;
pub mod feed;
pub mod graph;
pub mod lock;
pub mod model;
pub mod output;
pub mod overlay;
pub mod shell;
pub mod storage;
pub mod view_state;
pub mod viewport;

pub use error::{Error, Result};
