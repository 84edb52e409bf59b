#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

use taskmap::model::{Task, Team};

pub const TASKS_JSON: &str = r#"[
  {"id": "t1_intro", "name": "Intro", "description": "Start here", "icon": "intro.png",
   "rewards": [{"name": "Badge", "description": "First steps"}], "predicates": []},
  {"id": "t2", "name": "Next", "description": "Second step", "predicates": ["t1_intro"]},
  {"id": "t3", "name": "Later", "description": "Third step", "predicates": ["t2"]}
]"#;

pub const TEAMS_JSON: &str = r##"[
  {"id": "red", "name": "Red", "color": "#ff0000", "completedTasks": ["t1_intro"]},
  {"id": "blue", "name": "Blue", "color": "#00f", "completedTasks": ["t1_intro", "t2"]}
]"##;

/// Scratch data directory with both feeds and a private store file
pub struct TestData {
    dir: TempDir,
}

impl TestData {
    pub fn new() -> std::io::Result<Self> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("tasks.json"), TASKS_JSON)?;
        fs::write(dir.path().join("teams.json"), TEAMS_JSON)?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn store_path(&self) -> PathBuf {
        self.dir.path().join("store.json")
    }

    pub fn read_store(&self) -> serde_json::Value {
        let content = fs::read_to_string(self.store_path()).expect("read store");
        serde_json::from_str(&content).expect("store json")
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("taskmap").expect("binary");
        cmd.env_remove("RUST_LOG")
            .env_remove("TASKMAP_DATA")
            .env_remove("TASKMAP_STORE")
            .arg("--data-dir")
            .arg(self.path())
            .arg("--store")
            .arg(self.store_path());
        cmd
    }
}

pub fn tasks() -> Vec<Task> {
    serde_json::from_str(TASKS_JSON).expect("tasks fixture")
}

pub fn teams() -> Vec<Team> {
    serde_json::from_str(TEAMS_JSON).expect("teams fixture")
}
