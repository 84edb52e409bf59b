//! Team completion overlay
//!
//! A node is completed when the selected team lists it in `completedTasks`.
//! An edge is completed when its source node is; target state and longer
//! chains play no part.

use std::collections::HashSet;

use serde::Serialize;

use crate::color::{self, COMPLETED_FILL_DELTA};
use crate::error::Result;
use crate::graph::GraphElements;
use crate::model::Team;

/// Style rule applied to every element carrying the `completed` class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionStyle {
    pub background_color: String,
    pub border_color: String,
    pub line_color: String,
    pub target_arrow_color: String,
}

impl CompletionStyle {
    /// Derive the completed style from a team color (or the neutral gray)
    pub fn for_team(team: Option<&Team>) -> Result<Self> {
        let base = team
            .map(|team| team.color.as_str())
            .unwrap_or(color::NEUTRAL_COLOR);
        let base_hex = color::Rgb::parse(base)?.to_hex();
        Ok(Self {
            background_color: color::derive_color(base, COMPLETED_FILL_DELTA)?,
            border_color: base_hex.clone(),
            line_color: base_hex.clone(),
            target_arrow_color: base_hex,
        })
    }
}

/// Counts from one overlay pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CompletionSummary {
    pub completed_nodes: usize,
    pub completed_edges: usize,
}

/// Recompute every completed flag in `graph` for `team`.
pub fn apply_completion(graph: &mut GraphElements, team: Option<&Team>) -> CompletionSummary {
    let mut summary = CompletionSummary::default();
    let mut completed: HashSet<String> = HashSet::new();

    for node in &mut graph.nodes {
        node.completed = team.map(|team| team.has_completed(&node.id)).unwrap_or(false);
        if node.completed {
            completed.insert(node.id.clone());
            summary.completed_nodes += 1;
        }
    }

    for edge in &mut graph.edges {
        edge.completed = completed.contains(&edge.source);
        if edge.completed {
            summary.completed_edges += 1;
        }
    }

    tracing::debug!(
        team = team.map(|team| team.id.as_str()).unwrap_or("<none>"),
        nodes = summary.completed_nodes,
        edges = summary.completed_edges,
        "applied completion overlay"
    );
    summary
}
