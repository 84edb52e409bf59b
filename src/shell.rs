//! Contract with the external graph-rendering engine
//!
//! The engine owns drawing, layout physics and hit-testing. The controller
//! only mounts elements, reads and sets the camera, toggles the `completed`
//! class, installs the completed style rule and asks for layouts. Engines
//! report interaction back through the controller's event methods.

use std::collections::BTreeSet;

use crate::graph::GraphElements;
use crate::model::{NodePositions, Position, ViewportState};
use crate::overlay::CompletionStyle;
use crate::viewport::Layout;

/// Outcome of asking the engine to lay out the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutRun {
    /// Finished before returning; positions are readable now
    Completed,
    /// Running; the host reports completion via `layout_finished`
    Pending,
}

pub trait RenderSurface {
    /// Replace the displayed elements and lay them out
    fn mount(&mut self, graph: &GraphElements, layout: &Layout) -> LayoutRun;

    fn viewport(&self) -> ViewportState;

    fn set_viewport(&mut self, viewport: ViewportState);

    /// Toggle the `completed` class on a node or edge
    fn set_completed(&mut self, element_id: &str, completed: bool);

    fn is_completed(&self, element_id: &str) -> bool;

    fn apply_completion_style(&mut self, style: &CompletionStyle);

    /// Current position of every node
    fn node_positions(&self) -> NodePositions;

    fn run_layout(&mut self, layout: &Layout) -> LayoutRun;

    /// Fit the camera around one node; false when the node is not mounted
    fn fit_to_node(&mut self, node_id: &str, padding: f64) -> bool;
}

/// Rendered node edge length used when fitting the camera
const NODE_SIZE: f64 = 80.0;

/// Grid spacing used by the headless force layout stand-in
const HEADLESS_SPACING: f64 = 200.0;

/// Engine stand-in that keeps all state in memory
///
/// Layouts place nodes on a square grid in feed order, so results are
/// deterministic.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    width: f64,
    height: f64,
    min_zoom: f64,
    max_zoom: f64,
    viewport: ViewportState,
    node_ids: Vec<String>,
    positions: NodePositions,
    completed: BTreeSet<String>,
    style: Option<CompletionStyle>,
    layouts_run: usize,
}

impl HeadlessSurface {
    pub fn new(width: f64, height: f64, min_zoom: f64, max_zoom: f64) -> Self {
        Self {
            width,
            height,
            min_zoom,
            max_zoom,
            viewport: ViewportState::default(),
            node_ids: Vec::new(),
            positions: NodePositions::new(),
            completed: BTreeSet::new(),
            style: None,
            layouts_run: 0,
        }
    }

    pub fn completion_style(&self) -> Option<&CompletionStyle> {
        self.style.as_ref()
    }

    pub fn layouts_run(&self) -> usize {
        self.layouts_run
    }

    fn grid_layout(&mut self) {
        let columns = (self.node_ids.len() as f64).sqrt().ceil().max(1.0) as usize;
        for (idx, id) in self.node_ids.iter().enumerate() {
            let position = Position::new(
                (idx % columns) as f64 * HEADLESS_SPACING,
                (idx / columns) as f64 * HEADLESS_SPACING,
            );
            self.positions.insert(id.clone(), position);
        }
        self.layouts_run += 1;
    }
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new(1280.0, 800.0, 0.25, 2.0)
    }
}

impl RenderSurface for HeadlessSurface {
    fn mount(&mut self, graph: &GraphElements, layout: &Layout) -> LayoutRun {
        self.node_ids = graph.nodes.iter().map(|node| node.id.clone()).collect();
        self.positions = graph
            .nodes
            .iter()
            .map(|node| (node.id.clone(), node.position.unwrap_or_default()))
            .collect();
        self.completed.clear();
        self.run_layout(layout)
    }

    fn viewport(&self) -> ViewportState {
        self.viewport
    }

    fn set_viewport(&mut self, viewport: ViewportState) {
        self.viewport = ViewportState {
            zoom: viewport.zoom.clamp(self.min_zoom, self.max_zoom),
            pan: viewport.pan,
        };
    }

    fn set_completed(&mut self, element_id: &str, completed: bool) {
        if completed {
            self.completed.insert(element_id.to_string());
        } else {
            self.completed.remove(element_id);
        }
    }

    fn is_completed(&self, element_id: &str) -> bool {
        self.completed.contains(element_id)
    }

    fn apply_completion_style(&mut self, style: &CompletionStyle) {
        self.style = Some(style.clone());
    }

    fn node_positions(&self) -> NodePositions {
        self.positions.clone()
    }

    fn run_layout(&mut self, layout: &Layout) -> LayoutRun {
        match layout {
            Layout::Preset => {}
            Layout::Force(_) => self.grid_layout(),
        }
        LayoutRun::Completed
    }

    fn fit_to_node(&mut self, node_id: &str, padding: f64) -> bool {
        let Some(position) = self.positions.get(node_id).copied() else {
            return false;
        };
        let fit_w = (self.width - 2.0 * padding) / NODE_SIZE;
        let fit_h = (self.height - 2.0 * padding) / NODE_SIZE;
        let zoom = fit_w.min(fit_h).clamp(self.min_zoom, self.max_zoom);
        self.viewport = ViewportState {
            zoom,
            pan: Position::new(
                self.width / 2.0 - position.x * zoom,
                self.height / 2.0 - position.y * zoom,
            ),
        };
        true
    }
}
