use std::path::PathBuf;

use marks_model::SheetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("csv parse error: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Sheet(#[from] SheetError),
    #[error("cannot read selection plan {path}: {source}")]
    PlanOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed selection plan {path}: {source}")]
    PlanFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
