//! Selection plan file loading.

use std::path::Path;

use marks_model::SelectionPlan;
use tracing::debug;

use crate::error::IngestError;

/// Loads a JSON selection plan; see [`marks_model::plan`] for the format.
pub fn load_plan(path: &Path) -> Result<SelectionPlan, IngestError> {
    let contents = std::fs::read_to_string(path).map_err(|source| IngestError::PlanOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let plan: SelectionPlan =
        serde_json::from_str(&contents).map_err(|source| IngestError::PlanFormat {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), steps = plan.steps.len(), "loaded selection plan");
    Ok(plan)
}
