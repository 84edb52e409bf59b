//! Map controller
//!
//! Owns all mutable application state: the loaded feeds, the element graph,
//! the team selection, the persisted view store and the autosave debouncers.
//! Hosts forward engine events (`node_moved`, `viewport_changed`,
//! `window_resized`, `layout_finished`) and call [`MapController::tick`] from
//! their event loop so debounced work can run.

use serde::Serialize;

use crate::config::Config;
use crate::debounce::{Clock, Debouncer};
use crate::details::{self, TaskDetails};
use crate::error::{Error, Result};
use crate::graph::{build_graph, GraphElements};
use crate::model::{Position, Task, Team, ViewportState};
use crate::overlay::{apply_completion, CompletionStyle, CompletionSummary};
use crate::shell::{LayoutRun, RenderSurface};
use crate::storage::KeyValueStore;
use crate::view_state::ViewStore;
use crate::viewport::{Layout, ZoomControls};

/// What happened during [`MapController::load`]
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub nodes: usize,
    pub edges: usize,
    pub restored_positions: bool,
    pub restored_viewport: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_team: Option<String>,
    pub completion: CompletionSummary,
}

/// Debounced work that ran during one [`MapController::tick`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TickReport {
    pub positions_saved: bool,
    pub viewport_saved: bool,
    pub recentered: bool,
}

impl TickReport {
    pub fn is_idle(&self) -> bool {
        !(self.positions_saved || self.viewport_saved || self.recentered)
    }
}

pub struct MapController<S, C, R> {
    config: Config,
    zoom: ZoomControls,
    view: ViewStore<S>,
    clock: C,
    surface: R,
    tasks: Vec<Task>,
    teams: Vec<Team>,
    graph: GraphElements,
    selected_team: Option<usize>,
    save_positions: Debouncer<()>,
    save_viewport: Debouncer<ViewportState>,
    recenter: Debouncer<()>,
}

impl<S, C, R> MapController<S, C, R>
where
    S: KeyValueStore,
    C: Clock,
    R: RenderSurface,
{
    pub fn new(config: Config, store: S, clock: C, surface: R) -> Self {
        let autosave = &config.autosave;
        Self {
            zoom: ZoomControls::new(config.viewport.clone()),
            save_positions: Debouncer::from_millis(autosave.positions_ms),
            save_viewport: Debouncer::from_millis(autosave.viewport_ms),
            recenter: Debouncer::from_millis(autosave.resize_ms),
            view: ViewStore::new(store),
            clock,
            surface,
            tasks: Vec::new(),
            teams: Vec::new(),
            graph: GraphElements::default(),
            selected_team: None,
            config,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn graph(&self) -> &GraphElements {
        &self.graph
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn selected_team(&self) -> Option<&Team> {
        self.selected_team.and_then(|idx| self.teams.get(idx))
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut R {
        &mut self.surface
    }

    pub fn view(&self) -> &ViewStore<S> {
        &self.view
    }

    pub fn zoom_controls(&self) -> &ZoomControls {
        &self.zoom
    }

    /// Task the camera centers on after a resize
    pub fn start_node(&self) -> &str {
        &self.config.viewport.start_node
    }

    pub fn has_pending_saves(&self) -> bool {
        self.save_positions.is_pending()
            || self.save_viewport.is_pending()
            || self.recenter.is_pending()
    }

    // =========================================================================
    // Startup
    // =========================================================================

    /// Build the graph from the feeds and restore persisted view state.
    pub fn load(&mut self, tasks: Vec<Task>, teams: Vec<Team>) -> Result<LoadReport> {
        for team in &teams {
            crate::color::Rgb::parse(&team.color)?;
        }
        self.tasks = tasks;
        self.teams = teams;

        let cached_positions = self.view.node_positions();
        let cached_viewport = self.view.viewport();
        self.graph = build_graph(&self.tasks, cached_positions.as_ref());
        let layout = Layout::choose(cached_positions.is_some(), &self.config.layout);

        let run = self.surface.mount(&self.graph, &layout);
        let laid_out = run == LayoutRun::Completed && matches!(layout, Layout::Force(_));
        if laid_out {
            self.layout_finished()?;
        }

        if let Some(viewport) = cached_viewport {
            self.surface
                .set_viewport(self.zoom.with_zoom(viewport, viewport.zoom));
            if laid_out {
                // layout_finished saved the engine's camera over the cached one
                self.view.set_viewport(&self.surface.viewport())?;
            }
        }

        let stored_team = self.view.selected_team_id();
        let team_idx = stored_team
            .as_deref()
            .and_then(|id| self.teams.iter().position(|team| team.id == id));
        if stored_team.is_some() && team_idx.is_none() {
            tracing::debug!(team = ?stored_team, "stored team no longer exists; using Unaffiliated");
        }
        let completion = self.apply_selection(team_idx)?;

        let report = LoadReport {
            nodes: self.graph.nodes.len(),
            edges: self.graph.edges.len(),
            restored_positions: cached_positions.is_some(),
            restored_viewport: cached_viewport.is_some(),
            selected_team: self.selected_team().map(|team| team.id.clone()),
            completion,
        };
        tracing::info!(
            nodes = report.nodes,
            edges = report.edges,
            restored_positions = report.restored_positions,
            restored_viewport = report.restored_viewport,
            "task map loaded"
        );
        Ok(report)
    }

    // =========================================================================
    // Team selection
    // =========================================================================

    /// Select a team by id, or `None` for Unaffiliated
    pub fn select_team(&mut self, team_id: Option<&str>) -> Result<CompletionSummary> {
        let idx = match team_id {
            Some(id) => Some(
                self.teams
                    .iter()
                    .position(|team| team.id == id)
                    .ok_or_else(|| Error::TeamNotFound(id.to_string()))?,
            ),
            None => None,
        };
        self.apply_selection(idx)
    }

    fn apply_selection(&mut self, idx: Option<usize>) -> Result<CompletionSummary> {
        self.selected_team = idx;
        let summary = self.refresh_completion()?;
        match self.selected_team().map(|team| team.id.clone()) {
            Some(id) => self.view.set_selected_team_id(&id)?,
            None => self.view.clear_selected_team_id()?,
        }
        Ok(summary)
    }

    /// Recompute completion for the current team and push it to the surface
    pub fn refresh_completion(&mut self) -> Result<CompletionSummary> {
        let team = self.selected_team.and_then(|idx| self.teams.get(idx));
        let summary = apply_completion(&mut self.graph, team);
        let style = CompletionStyle::for_team(team)?;

        for node in &self.graph.nodes {
            self.surface.set_completed(&node.id, node.completed);
        }
        for edge in &self.graph.edges {
            self.surface.set_completed(&edge.id, edge.completed);
        }
        self.surface.apply_completion_style(&style);
        Ok(summary)
    }

    // =========================================================================
    // Interaction events
    // =========================================================================

    /// A node was dropped at `position`; persistence is debounced
    pub fn node_moved(&mut self, node_id: &str, position: Position) -> Result<()> {
        if !position.is_finite() {
            return Err(Error::InvalidArgument(format!(
                "position of '{node_id}' must be finite, got ({}, {})",
                position.x, position.y
            )));
        }
        let node = self
            .graph
            .node_mut(node_id)
            .ok_or_else(|| Error::TaskNotFound(node_id.to_string()))?;
        node.position = Some(position);
        self.save_positions.call(self.clock.now(), ());
        tracing::debug!(node = node_id, x = position.x, y = position.y, "node moved");
        Ok(())
    }

    /// The camera panned or zoomed; persistence is debounced
    pub fn viewport_changed(&mut self, viewport: ViewportState) -> Result<()> {
        if !viewport.is_finite() {
            return Err(Error::InvalidArgument(format!(
                "viewport must be finite, got zoom {} pan ({}, {})",
                viewport.zoom, viewport.pan.x, viewport.pan.y
            )));
        }
        self.save_viewport.call(self.clock.now(), viewport);
        Ok(())
    }

    /// The window was resized; re-centering on the start node is debounced
    pub fn window_resized(&mut self) {
        self.recenter.call(self.clock.now(), ());
    }

    /// The engine finished a layout: persist positions and camera immediately
    pub fn layout_finished(&mut self) -> Result<()> {
        let positions = self.surface.node_positions();
        for node in &mut self.graph.nodes {
            if let Some(position) = positions.get(&node.id) {
                node.position = Some(*position);
            }
        }
        self.view.set_node_positions(&self.graph.positions())?;
        self.view.set_viewport(&self.surface.viewport())?;
        tracing::debug!(nodes = positions.len(), "layout finished; view state saved");
        Ok(())
    }

    /// Run every debounced action whose quiet period has elapsed
    pub fn tick(&mut self) -> Result<TickReport> {
        self.run_debounced(false)
    }

    /// Run every pending debounced action now; for hosts about to exit
    pub fn flush(&mut self) -> Result<TickReport> {
        self.run_debounced(true)
    }

    fn run_debounced(&mut self, force: bool) -> Result<TickReport> {
        let now = self.clock.now();
        let mut report = TickReport::default();

        let positions_due = if force {
            self.save_positions.flush()
        } else {
            self.save_positions.poll(now)
        };
        if positions_due.is_some() {
            self.view.set_node_positions(&self.graph.positions())?;
            report.positions_saved = true;
        }

        let viewport_due = if force {
            self.save_viewport.flush()
        } else {
            self.save_viewport.poll(now)
        };
        if let Some(viewport) = viewport_due {
            self.view.set_viewport(&viewport)?;
            report.viewport_saved = true;
        }

        let recenter_due = if force {
            self.recenter.flush()
        } else {
            self.recenter.poll(now)
        };
        if recenter_due.is_some() {
            report.recentered = self.center_on_start_node()?;
        }

        if !report.is_idle() {
            tracing::debug!(?report, "autosave tick");
        }
        Ok(report)
    }

    /// Fit the camera on the configured start node and save the result
    pub fn center_on_start_node(&mut self) -> Result<bool> {
        let start = self.config.viewport.start_node.clone();
        if !self
            .surface
            .fit_to_node(&start, self.config.viewport.center_padding)
        {
            tracing::debug!(node = %start, "start node not mounted; skipping recenter");
            return Ok(false);
        }
        self.view.set_viewport(&self.surface.viewport())?;
        Ok(true)
    }

    // =========================================================================
    // Controls
    // =========================================================================

    /// Forget saved positions and camera, then re-run the force layout
    pub fn reset_layout(&mut self) -> Result<LayoutRun> {
        // Pending saves hold pre-reset state
        self.save_positions.cancel();
        self.save_viewport.cancel();
        self.view.clear_all()?;
        let layout = Layout::Force(self.config.layout.clone());
        let run = self.surface.run_layout(&layout);
        if run == LayoutRun::Completed {
            self.layout_finished()?;
        }
        Ok(run)
    }

    pub fn zoom_in(&mut self) -> ViewportState {
        let current = self.surface.viewport();
        self.set_zoom(current.zoom, self.zoom.zoom_in(current.zoom))
    }

    pub fn zoom_out(&mut self) -> ViewportState {
        let current = self.surface.viewport();
        self.set_zoom(current.zoom, self.zoom.zoom_out(current.zoom))
    }

    /// Apply a zoom slider position and save the camera right away
    pub fn set_zoom_from_slider(&mut self, value: f64, narrow: bool) -> Result<ViewportState> {
        if !value.is_finite() {
            return Err(Error::InvalidArgument(format!(
                "zoom slider value must be finite, got {value}"
            )));
        }
        let current = self.surface.viewport();
        let zoom = self.zoom.zoom_from_slider(value, narrow);
        let viewport = self.set_zoom(current.zoom, zoom);
        self.view.set_viewport(&viewport)?;
        Ok(viewport)
    }

    /// Slider position matching the current zoom
    pub fn slider_value(&self, narrow: bool) -> i64 {
        self.zoom.slider_value(self.surface.viewport().zoom, narrow)
    }

    fn set_zoom(&mut self, previous: f64, zoom: f64) -> ViewportState {
        let viewport = self.zoom.with_zoom(self.surface.viewport(), zoom);
        self.surface.set_viewport(viewport);
        if (viewport.zoom - previous).abs() > f64::EPSILON {
            self.save_viewport.call(self.clock.now(), viewport);
        }
        viewport
    }

    // =========================================================================
    // Details
    // =========================================================================

    pub fn task_details(&self, task_id: &str) -> Result<TaskDetails> {
        details::task_details(&self.tasks, &self.graph, self.selected_team(), task_id)
    }
}
