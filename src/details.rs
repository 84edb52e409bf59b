//! Task detail view
//!
//! Everything the details panel shows for one task, with icons resolved and
//! colors derived up front.

use serde::Serialize;

use crate::color::{self, COMPLETED_NAME_DELTA};
use crate::error::{Error, Result};
use crate::graph::{icon_url, placeholder_url, GraphElements};
use crate::model::{Task, Team};

const DEFAULT_NAME_COLOR: &str = "#ffffff";
const NO_BORDER: &str = "transparent";
const TASK_ICON_PLACEHOLDER: &str = "https://placehold.co/64x64/eee/999?text=";
const REWARD_ICON_PLACEHOLDER: &str = "https://placehold.co/32x32/6b7280/ffffff?text=";
const PREREQUISITE_ICON_PLACEHOLDER: &str = "https://placehold.co/32x32/eee/999?text=";

/// Generic image shown when an icon fails to load
pub const BROKEN_ICON_URL: &str = "https://placehold.co/64x64/eee/999?text=ICON";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewardView {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub icon: String,
    /// Fallback for a broken `icon`
    pub fallback_icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrerequisiteView {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskDetails {
    pub id: String,
    pub name: String,
    pub description: String,
    pub completed: bool,
    pub name_color: String,
    pub border_color: String,
    pub icon: String,
    pub fallback_icon: String,
    pub rewards: Vec<RewardView>,
    pub prerequisites: Vec<PrerequisiteView>,
}

/// Build the details for `task_id` from the current graph and selection
pub fn task_details(
    tasks: &[Task],
    graph: &GraphElements,
    team: Option<&Team>,
    task_id: &str,
) -> Result<TaskDetails> {
    let task = tasks
        .iter()
        .find(|task| task.id == task_id)
        .ok_or_else(|| Error::TaskNotFound(task_id.to_string()))?;
    let completed = graph.is_node_completed(task_id);

    let (name_color, border_color) = match team {
        Some(team) if completed => (
            color::derive_color(&team.color, COMPLETED_NAME_DELTA)?,
            color::Rgb::parse(&team.color)?.to_hex(),
        ),
        _ => (DEFAULT_NAME_COLOR.to_string(), NO_BORDER.to_string()),
    };

    let icon = match task.icon.as_deref().filter(|icon| !icon.trim().is_empty()) {
        Some(icon) => icon_url(icon),
        None => placeholder_url(TASK_ICON_PLACEHOLDER, &task.name, 2),
    };

    let rewards = task
        .rewards
        .iter()
        .map(|reward| {
            let fallback_icon = placeholder_url(REWARD_ICON_PLACEHOLDER, &reward.name, 1);
            RewardView {
                name: reward.name.clone(),
                description: reward.description.clone(),
                icon: reward
                    .icon
                    .as_deref()
                    .map(icon_url)
                    .unwrap_or_else(|| fallback_icon.clone()),
                fallback_icon,
            }
        })
        .collect();

    let prerequisites = graph
        .incoming(task_id)
        .map(|edge| {
            // Dangling predicates still get listed under their raw id.
            let name = graph
                .node(&edge.source)
                .map(|node| node.name.clone())
                .unwrap_or_else(|| edge.source.clone());
            PrerequisiteView {
                id: edge.source.clone(),
                icon: placeholder_url(PREREQUISITE_ICON_PLACEHOLDER, &name, 2),
                name,
                completed: graph.is_node_completed(&edge.source),
            }
        })
        .collect();

    Ok(TaskDetails {
        id: task.id.clone(),
        name: task.name.clone(),
        description: task.description.clone(),
        completed,
        name_color,
        border_color,
        icon,
        fallback_icon: BROKEN_ICON_URL.to_string(),
        rewards,
        prerequisites,
    })
}
