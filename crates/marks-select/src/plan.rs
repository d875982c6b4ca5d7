//! Replays a selection plan through the session API.
//!
//! Every step goes through the public toggle operations, so a scripted
//! session propagates masters exactly like an interactive one. Names are
//! resolved against the sheet rosters; the first occurrence wins when a
//! name is duplicated.

use marks_model::{PlanStep, SelectionPlan};
use thiserror::Error;
use tracing::debug;

use crate::session::SelectionSession;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("plan step {step}: unknown student {name:?}")]
    UnknownStudent { step: usize, name: String },
    #[error("plan step {step}: unknown topic {name:?}")]
    UnknownTopic { step: usize, name: String },
    #[error("plan step {step}: {target} is not selectable")]
    NotSelectable { step: usize, target: String },
}

/// Applies the plan in document order.
///
/// Fails fast on the first unresolvable name or on a step aiming at a
/// control that does not exist in the interactive surface (an unfilled
/// cell, an empty-header row or column); the session is left as of the
/// failing step.
pub fn apply_plan(
    session: &mut SelectionSession<'_>,
    plan: &SelectionPlan,
) -> Result<(), PlanError> {
    for (index, step) in plan.steps.iter().enumerate() {
        let step_no = index + 1;
        match step {
            PlanStep::SelectAll => session.select_all(),
            PlanStep::Reset => session.reset(),
            PlanStep::ToggleCell { student, topic } => {
                let student_index = resolve_student(session, step_no, student)?;
                let topic_index = resolve_topic(session, step_no, topic)?;
                if !session.toggle_cell(student_index, topic_index) {
                    return Err(PlanError::NotSelectable {
                        step: step_no,
                        target: format!("cell ({student}, {topic})"),
                    });
                }
            }
            PlanStep::ToggleStudent { student } => {
                let student_index = resolve_student(session, step_no, student)?;
                if !session.toggle_student(student_index) {
                    return Err(PlanError::NotSelectable {
                        step: step_no,
                        target: format!("student {student}"),
                    });
                }
            }
            PlanStep::ToggleTopic { topic } => {
                let topic_index = resolve_topic(session, step_no, topic)?;
                if !session.toggle_topic(topic_index) {
                    return Err(PlanError::NotSelectable {
                        step: step_no,
                        target: format!("topic {topic}"),
                    });
                }
            }
        }
    }
    debug!(steps = plan.steps.len(), "applied selection plan");
    Ok(())
}

fn resolve_student(
    session: &SelectionSession<'_>,
    step: usize,
    name: &str,
) -> Result<usize, PlanError> {
    session
        .sheet()
        .student_index(name)
        .ok_or_else(|| PlanError::UnknownStudent {
            step,
            name: name.to_string(),
        })
}

fn resolve_topic(
    session: &SelectionSession<'_>,
    step: usize,
    name: &str,
) -> Result<usize, PlanError> {
    session
        .sheet()
        .topic_index(name)
        .ok_or_else(|| PlanError::UnknownTopic {
            step,
            name: name.to_string(),
        })
}
