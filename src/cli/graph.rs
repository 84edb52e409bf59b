//! taskmap graph / node command implementations

use crate::error::Result;
use crate::model::Position;
use crate::output::{emit_success, HumanOutput};

use super::{NodeCommands, Session};

pub fn run(session: Session) -> Result<()> {
    let graph = session.map.graph();
    let team = session
        .map
        .selected_team()
        .map(|team| team.name.clone())
        .unwrap_or_else(|| "Unaffiliated".to_string());

    let mut human = HumanOutput::new(format!(
        "taskmap graph: {} nodes, {} edges",
        graph.nodes.len(),
        graph.edges.len()
    ));
    human.push_summary("team", team);
    human.push_summary(
        "completed",
        format!(
            "{} nodes, {} edges",
            session.report.completion.completed_nodes, session.report.completion.completed_edges
        ),
    );
    for node in &graph.nodes {
        let mark = if node.completed { "x" } else { " " };
        human.push_detail(format!("[{mark}] {} ({})", node.name, node.id));
    }
    for edge in &graph.edges {
        let mark = if edge.completed { "x" } else { " " };
        human.push_detail(format!("[{mark}] {}", edge.id));
        if graph.node(&edge.source).is_none() {
            human.push_warning(format!(
                "{} requires unknown task '{}'",
                edge.target, edge.source
            ));
        }
    }

    emit_success(session.output, "graph", graph, Some(&human))?;
    session.close()
}

pub fn run_node(mut session: Session, cmd: NodeCommands) -> Result<()> {
    match cmd {
        NodeCommands::Move { id, x, y } => {
            session.map.node_moved(&id, Position::new(x, y))?;
            session.map.flush()?;

            #[derive(serde::Serialize)]
            struct Moved<'a> {
                id: &'a str,
                position: Position,
            }

            let mut human = HumanOutput::new(format!("taskmap node move: {id}"));
            human.push_summary("position", format!("({x}, {y})"));
            human.push_summary("store", session.store_path.display().to_string());
            emit_success(
                session.output,
                "node move",
                &Moved {
                    id: &id,
                    position: Position::new(x, y),
                },
                Some(&human),
            )?;
            session.close()
        }
    }
}
