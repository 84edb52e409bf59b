//! taskmap task command implementations

use crate::error::Result;
use crate::output::{emit_success, HumanOutput};

use super::{Session, TaskCommands};

pub fn run(session: Session, cmd: TaskCommands) -> Result<()> {
    match cmd {
        TaskCommands::Show { id } => {
            let details = session.map.task_details(&id)?;

            let status = if details.completed {
                "completed"
            } else {
                "open"
            };
            let mut human = HumanOutput::new(format!("{} ({})", details.name, details.id));
            human.push_summary("status", status);
            human.push_summary("name color", details.name_color.clone());
            human.push_summary("icon", details.icon.clone());
            if !details.description.is_empty() {
                human.push_detail(details.description.clone());
            }
            for reward in &details.rewards {
                match &reward.description {
                    Some(description) => {
                        human.push_detail(format!("reward: {} - {description}", reward.name))
                    }
                    None => human.push_detail(format!("reward: {}", reward.name)),
                }
            }
            for prerequisite in &details.prerequisites {
                let mark = if prerequisite.completed { "x" } else { " " };
                human.push_detail(format!(
                    "requires [{mark}] {} ({})",
                    prerequisite.name, prerequisite.id
                ));
            }

            emit_success(session.output, "task show", &details, Some(&human))?;
            session.close()
        }
    }
}
