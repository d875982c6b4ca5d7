//! Semicolon-separated grade sheet loading.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use marks_model::MarkSheet;
use tracing::{debug, info};

use crate::error::IngestError;

/// Loader behavior flags, mapped from the CLI sort switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Alphabetically sort student rows after loading.
    pub sort_students: bool,
    /// Alphabetically sort topic columns after loading.
    pub sort_topics: bool,
}

/// Reads a grade sheet from a `;`-separated file.
///
/// # Errors
///
/// [`IngestError::Open`] when the file cannot be opened (the CLI maps this
/// to exit code 1), [`IngestError::Csv`] on unparseable input, and
/// [`IngestError::Sheet`] when the parsed grid fails the shape checks.
pub fn read_sheet(path: &Path, options: LoadOptions) -> Result<MarkSheet, IngestError> {
    let file = File::open(path).map_err(|source| IngestError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let sheet = read_sheet_from(file, options)?;
    info!(
        path = %path.display(),
        students = sheet.student_count(),
        topics = sheet.topic_count(),
        "loaded grade sheet"
    );
    Ok(sheet)
}

/// Reads a grade sheet from any reader; see [`read_sheet`].
///
/// The csv reader runs with `flexible(true)`: width mismatches are reported
/// by the sheet shape check, which names the offending line, instead of as
/// csv-level errors.
pub fn read_sheet_from<R: Read>(input: R, options: LoadOptions) -> Result<MarkSheet, IngestError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .from_reader(input);
    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(ToString::to_string).collect());
    }
    debug!(rows = rows.len(), "parsed raw csv rows");
    let mut sheet = MarkSheet::from_rows(rows)?;
    if options.sort_students {
        sheet.sort_students();
    }
    if options.sort_topics {
        sheet.sort_topics();
    }
    Ok(sheet)
}
