//! Task, team and view-state records
//!
//! Tasks and teams come from static JSON feeds and are never mutated after
//! load. Positions and viewports are the persisted view state.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

/// A reward granted by completing a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// One node of the task map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub rewards: Vec<Reward>,
    /// Ids of tasks that must be completed first
    #[serde(default)]
    pub predicates: Vec<String>,
}

impl Task {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            icon: None,
            rewards: Vec::new(),
            predicates: Vec::new(),
        }
    }

    pub fn with_predicates<I, S>(mut self, predicates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.predicates = predicates.into_iter().map(Into::into).collect();
        self
    }
}

/// A team affiliation and the tasks it has completed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub completed_tasks: HashSet<String>,
}

impl Team {
    pub fn has_completed(&self, task_id: &str) -> bool {
        self.completed_tasks.contains(task_id)
    }
}

/// A 2D graph coordinate
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// JSON has no NaN or infinity; such coordinates cannot be persisted
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Node positions keyed by task id
pub type NodePositions = BTreeMap<String, Position>;

/// Camera zoom and pan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub zoom: f64,
    pub pan: Position,
}

impl ViewportState {
    pub fn is_finite(&self) -> bool {
        self.zoom.is_finite() && self.pan.is_finite()
    }
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Position::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_feed_defaults_missing_arrays() {
        let task: Task =
            serde_json::from_str(r#"{"id":"t1","name":"Intro"}"#).expect("parse task");
        assert!(task.rewards.is_empty());
        assert!(task.predicates.is_empty());
        assert_eq!(task.description, "");
        assert!(task.icon.is_none());
    }

    #[test]
    fn team_uses_camel_case_fields() {
        let team: Team = serde_json::from_str(
            r##"{"id":"red","name":"Red","color":"#ff0000","completedTasks":["t1"]}"##,
        )
        .expect("parse team");
        assert!(team.has_completed("t1"));
        assert!(!team.has_completed("t2"));
    }
}
