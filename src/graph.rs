//! Node/edge elements handed to the rendering engine
//!
//! Each task becomes a node and each predicate reference becomes a directed
//! edge `predicate -> task`. Derived styling (the completed flag) lives on the
//! elements so the renderer only ever reads explicit state.

use serde::Serialize;

use crate::model::{NodePositions, Position, Reward, Task};

/// Separator joining source and target ids into an edge id
pub const EDGE_ID_SEPARATOR: char = '>';

/// Directory prefix for task and reward icons
pub const ICON_DIR: &str = "icons/";

const NODE_PLACEHOLDER_BASE: &str = "https://placehold.co/100x100/4b5563/ffffff?text=";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeElement {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Resolved icon URL, or a generated placeholder
    pub image: String,
    pub rewards: Vec<Reward>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeElement {
    pub id: String,
    pub source: String,
    pub target: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphElements {
    pub nodes: Vec<NodeElement>,
    pub edges: Vec<EdgeElement>,
}

/// Build the element list for `tasks`, attaching any cached positions.
///
/// Predicate ids are not checked against the task list; dangling edges are
/// passed through as-is.
pub fn build_graph(tasks: &[Task], cached_positions: Option<&NodePositions>) -> GraphElements {
    let mut graph = GraphElements::default();

    for task in tasks {
        let position = cached_positions.and_then(|positions| positions.get(&task.id).copied());
        graph.nodes.push(NodeElement {
            id: task.id.clone(),
            name: task.name.clone(),
            description: task.description.clone(),
            image: node_image(task),
            rewards: task.rewards.clone(),
            position,
            completed: false,
        });

        for predicate in &task.predicates {
            graph.edges.push(EdgeElement {
                id: edge_id(predicate, &task.id),
                source: predicate.clone(),
                target: task.id.clone(),
                completed: false,
            });
        }
    }

    graph
}

pub fn edge_id(source: &str, target: &str) -> String {
    format!("{source}{EDGE_ID_SEPARATOR}{target}")
}

/// Resolve a relative icon path under the icon directory
pub fn icon_url(icon: &str) -> String {
    format!("{ICON_DIR}{icon}")
}

/// Placeholder image URL labelled with the first `chars` characters of `name`
pub fn placeholder_url(base: &str, name: &str, chars: usize) -> String {
    let label: String = name.chars().take(chars).collect();
    format!("{base}{label}")
}

fn node_image(task: &Task) -> String {
    match task.icon.as_deref().filter(|icon| !icon.trim().is_empty()) {
        Some(icon) => icon_url(icon),
        None => placeholder_url(NODE_PLACEHOLDER_BASE, &task.name, 2),
    }
}

impl GraphElements {
    pub fn node(&self, id: &str) -> Option<&NodeElement> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut NodeElement> {
        self.nodes.iter_mut().find(|node| node.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&EdgeElement> {
        self.edges.iter().find(|edge| edge.id == id)
    }

    /// Edges pointing at `id`, in feed order
    pub fn incoming(&self, id: &str) -> impl Iterator<Item = &EdgeElement> + '_ {
        let id = id.to_string();
        self.edges.iter().filter(move |edge| edge.target == id)
    }

    /// True when every node carries a position
    pub fn has_positions(&self) -> bool {
        !self.nodes.is_empty() && self.nodes.iter().all(|node| node.position.is_some())
    }

    /// Snapshot of every positioned node
    pub fn positions(&self) -> NodePositions {
        self.nodes
            .iter()
            .filter_map(|node| node.position.map(|pos| (node.id.clone(), pos)))
            .collect()
    }

    pub fn is_node_completed(&self, id: &str) -> bool {
        self.node(id).map(|node| node.completed).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_prefers_feed_path() {
        let mut task = Task::new("t1", "Intro");
        task.icon = Some("intro.png".to_string());
        let graph = build_graph(&[task], None);
        assert_eq!(graph.nodes[0].image, "icons/intro.png");
    }

    #[test]
    fn missing_icon_uses_placeholder() {
        let graph = build_graph(&[Task::new("t1", "Intro")], None);
        assert_eq!(
            graph.nodes[0].image,
            "https://placehold.co/100x100/4b5563/ffffff?text=In"
        );
    }

    #[test]
    fn incoming_lists_predicate_edges() {
        let tasks = vec![
            Task::new("a", "A"),
            Task::new("b", "B"),
            Task::new("c", "C").with_predicates(["a", "b"]),
        ];
        let graph = build_graph(&tasks, None);
        let sources: Vec<&str> = graph.incoming("c").map(|e| e.source.as_str()).collect();
        assert_eq!(sources, vec!["a", "b"]);
        assert_eq!(graph.incoming("a").count(), 0);
    }
}
