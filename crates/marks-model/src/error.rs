use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SheetError {
    #[error("sheet has {found} rows but the 4 reserved header rows are required")]
    TooFewRows { found: usize },
    #[error("header row has {found} columns but the 3 reserved info columns are required")]
    TooFewColumns { found: usize },
    #[error("row {row} has {found} columns, expected {expected} (ragged sheet)")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, SheetError>;
