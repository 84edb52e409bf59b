//! taskmap view command implementations

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::ViewportState;
use crate::output::{emit_success, HumanOutput};
use crate::shell::RenderSurface;

use super::{Session, ViewCommands};

#[derive(Serialize)]
struct ViewReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    viewport: Option<ViewportState>,
    saved_positions: usize,
    slider: i64,
}

pub fn run(mut session: Session, cmd: ViewCommands) -> Result<()> {
    let mut narrow_slider = false;
    let command = match cmd {
        ViewCommands::Show => "view show",
        ViewCommands::Reset => {
            session.map.reset_layout()?;
            "view reset"
        }
        ViewCommands::Zoom {
            step,
            narrow,
            width,
        } => {
            narrow_slider = narrow
                || width
                    .map(|width| session.map.zoom_controls().is_narrow(width))
                    .unwrap_or(false);
            match step.trim() {
                "in" => {
                    session.map.zoom_in();
                }
                "out" => {
                    session.map.zoom_out();
                }
                raw => {
                    let value = raw
                        .parse::<f64>()
                        .ok()
                        .filter(|value| value.is_finite())
                        .ok_or_else(|| {
                            Error::InvalidArgument(format!(
                                "zoom step must be 'in', 'out' or a number, got '{raw}'"
                            ))
                        })?;
                    session.map.set_zoom_from_slider(value, narrow_slider)?;
                }
            }
            session.map.flush()?;
            "view zoom"
        }
        ViewCommands::Center => {
            if !session.map.center_on_start_node()? {
                return Err(Error::TaskNotFound(
                    session.map.start_node().to_string(),
                ));
            }
            "view center"
        }
    };

    let report = ViewReport {
        viewport: session.map.view().viewport(),
        saved_positions: session
            .map
            .view()
            .node_positions()
            .map(|positions| positions.len())
            .unwrap_or(0),
        slider: session.map.slider_value(narrow_slider),
    };

    let mut human = HumanOutput::new(format!("taskmap {command}"));
    match report.viewport {
        Some(viewport) => {
            human.push_summary("zoom", format!("{:.2}", viewport.zoom));
            human.push_summary(
                "pan",
                format!("({:.1}, {:.1})", viewport.pan.x, viewport.pan.y),
            );
        }
        None => human.push_summary("viewport", "not saved"),
    }
    human.push_summary("saved positions", report.saved_positions.to_string());
    human.push_summary(
        "camera",
        format!("zoom {:.2}", session.map.surface().viewport().zoom),
    );
    human.push_summary("store", session.store_path.display().to_string());

    emit_success(session.output, command, &report, Some(&human))?;
    session.close()
}
