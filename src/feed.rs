//! Loading the static task and team feeds
//!
//! ```text
//! <data dir>/
//!   tasks.json    # [{id, name, description, icon, rewards, predicates}]
//!   teams.json    # [{id, name, color, completedTasks}]
//! ```
//!
//! A missing or malformed feed is fatal: nothing is rendered without both.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::color::Rgb;
use crate::error::{Error, Result};
use crate::model::{Task, Team};

pub const TASKS_FILE: &str = "tasks.json";
pub const TEAMS_FILE: &str = "teams.json";

/// Both feeds, loaded together
#[derive(Debug, Clone, Default)]
pub struct Feeds {
    pub tasks: Vec<Task>,
    pub teams: Vec<Team>,
}

impl Feeds {
    /// Load `teams.json` then `tasks.json` from `data_dir`
    pub fn load(data_dir: &Path) -> Result<Self> {
        let teams = load_teams(&data_dir.join(TEAMS_FILE))?;
        let tasks = load_tasks(&data_dir.join(TASKS_FILE))?;
        tracing::debug!(tasks = tasks.len(), teams = teams.len(), "loaded feeds");
        Ok(Self { tasks, teams })
    }
}

pub fn load_tasks(path: &Path) -> Result<Vec<Task>> {
    read_feed(path)
}

/// Load teams, rejecting any whose color is not a valid hex color
pub fn load_teams(path: &Path) -> Result<Vec<Team>> {
    let teams: Vec<Team> = read_feed(path)?;
    for team in &teams {
        if let Err(err) = Rgb::parse(&team.color) {
            return Err(feed_error(path, format!("team '{}': {err}", team.id)));
        }
    }
    Ok(teams)
}

fn read_feed<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = fs::read_to_string(path).map_err(|err| feed_error(path, err.to_string()))?;
    serde_json::from_str(&content).map_err(|err| feed_error(path, err.to_string()))
}

fn feed_error(path: &Path, reason: String) -> Error {
    tracing::error!(path = %path.display(), %reason, "failed to load map data");
    Error::FeedLoad {
        path: PathBuf::from(path),
        reason,
    }
}
