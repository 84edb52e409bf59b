//! taskmap team command implementations

use serde::Serialize;

use crate::error::Result;
use crate::output::{emit_success, HumanOutput};

use super::{Session, TeamCommands};

const UNAFFILIATED: &str = "Unaffiliated";

#[derive(Serialize)]
struct TeamRow<'a> {
    id: &'a str,
    name: &'a str,
    color: &'a str,
    completed_tasks: usize,
    selected: bool,
}

#[derive(Serialize)]
struct Selection {
    #[serde(skip_serializing_if = "Option::is_none")]
    team: Option<String>,
    completed_nodes: usize,
    completed_edges: usize,
}

pub fn run(mut session: Session, cmd: TeamCommands) -> Result<()> {
    match cmd {
        TeamCommands::List => {
            let selected = session.map.selected_team().map(|team| team.id.clone());
            let rows: Vec<TeamRow> = session
                .map
                .teams()
                .iter()
                .map(|team| TeamRow {
                    id: &team.id,
                    name: &team.name,
                    color: &team.color,
                    completed_tasks: team.completed_tasks.len(),
                    selected: selected.as_deref() == Some(team.id.as_str()),
                })
                .collect();

            let mut human = HumanOutput::new(format!("taskmap team list: {} teams", rows.len()));
            for row in &rows {
                let mark = if row.selected { "*" } else { " " };
                human.push_detail(format!(
                    "{mark} {} ({}, {}) {} completed",
                    row.name, row.id, row.color, row.completed_tasks
                ));
            }
            if selected.is_none() {
                human.push_summary("selected", UNAFFILIATED);
            }
            emit_success(session.output, "team list", &rows, Some(&human))?;
            session.close()
        }
        TeamCommands::Show => {
            let selection = Selection {
                team: session.map.selected_team().map(|team| team.id.clone()),
                completed_nodes: session.report.completion.completed_nodes,
                completed_edges: session.report.completion.completed_edges,
            };
            let human = selection_output("taskmap team show", &session, &selection);
            emit_success(session.output, "team show", &selection, Some(&human))?;
            session.close()
        }
        TeamCommands::Select { id } => {
            let summary = session.map.select_team(Some(&id))?;
            let selection = Selection {
                team: Some(id),
                completed_nodes: summary.completed_nodes,
                completed_edges: summary.completed_edges,
            };
            let human = selection_output("taskmap team select", &session, &selection);
            emit_success(session.output, "team select", &selection, Some(&human))?;
            session.close()
        }
        TeamCommands::Clear => {
            let summary = session.map.select_team(None)?;
            let selection = Selection {
                team: None,
                completed_nodes: summary.completed_nodes,
                completed_edges: summary.completed_edges,
            };
            let human = selection_output("taskmap team clear", &session, &selection);
            emit_success(session.output, "team clear", &selection, Some(&human))?;
            session.close()
        }
    }
}

fn selection_output(header: &str, session: &Session, selection: &Selection) -> HumanOutput {
    let name = session
        .map
        .selected_team()
        .map(|team| format!("{} ({})", team.name, team.id))
        .unwrap_or_else(|| UNAFFILIATED.to_string());
    let mut human = HumanOutput::new(format!("{header}: {name}"));
    human.push_summary("completed tasks", selection.completed_nodes.to_string());
    human.push_summary("completed edges", selection.completed_edges.to_string());
    if selection.team.is_none() {
        human.push_next_step("taskmap team list");
    }
    human
}
