//! Selection state engine: tri-level checkbox state, propagation, and
//! scripted plan replay.

pub mod plan;
pub mod session;

pub use plan::{PlanError, apply_plan};
pub use session::{Selection, SelectionSession};
