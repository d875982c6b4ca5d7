//! Selection plan documents for scripted (non-interactive) sessions.
//!
//! A plan is an ordered list of steps replayed through the selection
//! engine's public API, so every step gets the same propagation semantics a
//! checkbox click would. Students and topics are referenced by name and
//! resolved against the sheet rosters at apply time.

use serde::{Deserialize, Serialize};

/// One selection action, applied in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum PlanStep {
    /// Set every cell and master, unconditionally.
    SelectAll,
    /// Clear every cell and master, unconditionally.
    Reset,
    /// Toggle a single (student, topic) cell.
    ToggleCell { student: String, topic: String },
    /// Toggle a student's master control.
    ToggleStudent { student: String },
    /// Toggle a topic's master control.
    ToggleTopic { topic: String },
}

/// An ordered selection script, serialized as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionPlan {
    pub steps: Vec<PlanStep>,
}

impl SelectionPlan {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
