use std::path::PathBuf;

use marks_notify::BatchReport;

#[derive(Debug)]
pub struct NotifyResult {
    pub dry_run: bool,
    /// Set when messages were written to an outbox directory.
    pub outbox: Option<PathBuf>,
    pub students: Vec<StudentSummary>,
    pub report: BatchReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStatus {
    Sent,
    Failed,
    Skipped,
}

#[derive(Debug)]
pub struct StudentSummary {
    pub name: String,
    pub surname: String,
    pub email: String,
    /// Topics that will appear in the message: selected and marked.
    pub announced: usize,
    /// Topics with a recorded mark for this student.
    pub marked: usize,
    pub status: DispatchStatus,
}
