//! Batch dispatch over the final selection.

use marks_model::MarkSheet;
use marks_select::Selection;
use serde::Serialize;
use tracing::{info, warn};

use crate::body::{MessageTemplate, build_body};
use crate::mailer::Mailer;

/// One successfully dispatched message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dispatch {
    /// Roster index of the student.
    pub student: usize,
    pub address: String,
}

/// One failed dispatch; the batch carried on past it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchFailure {
    pub student: usize,
    pub address: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub sent: Vec<Dispatch>,
    /// Students with nothing to send: empty body, empty name, or no address.
    pub skipped: usize,
    pub failures: Vec<DispatchFailure>,
}

impl BatchReport {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Sends every student their selected marks: one pass, at most one attempt
/// per student, no retries. Failures are collected, never fatal — the
/// remaining recipients still get their mail.
pub fn send_batch<M: Mailer>(
    sheet: &MarkSheet,
    selection: &Selection,
    mailer: &mut M,
    template: &MessageTemplate,
) -> BatchReport {
    let mut report = BatchReport::default();
    for student in 0..sheet.student_count() {
        if sheet.student(student).is_empty() {
            report.skipped += 1;
            continue;
        }
        let body = build_body(student, sheet, selection, template);
        if body.is_empty() {
            report.skipped += 1;
            continue;
        }
        let address = sheet.email(student);
        if address.is_empty() {
            warn!(student, "student has marks to send but no email address");
            report.skipped += 1;
            continue;
        }
        match mailer.send(address, &body) {
            Ok(()) => report.sent.push(Dispatch {
                student,
                address: address.to_string(),
            }),
            Err(error) => {
                warn!(student, address, %error, "mail dispatch failed");
                report.failures.push(DispatchFailure {
                    student,
                    address: address.to_string(),
                    message: error.to_string(),
                });
            }
        }
    }
    info!(
        sent = report.sent.len(),
        skipped = report.skipped,
        failures = report.failures.len(),
        "dispatch complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mailer::MailError;
    use marks_select::SelectionSession;
    use std::collections::BTreeMap;

    /// Counts attempts per address and fails where told to.
    #[derive(Debug, Default)]
    struct ScriptedMailer {
        attempts: BTreeMap<String, usize>,
        fail_for: Option<String>,
    }

    impl Mailer for ScriptedMailer {
        fn send(&mut self, address: &str, _body: &str) -> Result<(), MailError> {
            *self.attempts.entry(address.to_string()).or_default() += 1;
            if self.fail_for.as_deref() == Some(address) {
                return Err(MailError::Transport {
                    address: address.to_string(),
                    source: std::io::Error::other("mailbox on fire"),
                });
            }
            Ok(())
        }
    }

    fn sheet() -> MarkSheet {
        let rows = [
            ["Name", "Surname", "Email", "GR", "QFT"],
            ["Mean", "", "", "12", "11"],
            ["Highest", "", "", "18", "17"],
            ["Lowest", "", "", "5", "4"],
            ["Curie", "Marie", "marie@example.org", "16", "13"],
            ["", "", "", "9", ""],
            ["Bohr", "Niels", "niels@example.org", "14", "12"],
            ["Fermi", "Enrico", "enrico@example.org", "", ""],
        ];
        MarkSheet::from_rows(
            rows.iter()
                .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
                .collect(),
        )
        .expect("well-formed test sheet")
    }

    fn full_selection(sheet: &MarkSheet) -> Selection {
        let mut session = SelectionSession::new(sheet);
        session.select_all();
        session.validate()
    }

    #[test]
    fn sends_once_per_student_with_a_body() {
        let sheet = sheet();
        let selection = full_selection(&sheet);
        let mut mailer = ScriptedMailer::default();
        let report = send_batch(&sheet, &selection, &mut mailer, &MessageTemplate::default());
        assert_eq!(report.sent.len(), 2);
        // The nameless row and the markless student are skipped silently.
        assert_eq!(report.skipped, 2);
        assert!(report.failures.is_empty());
        assert_eq!(mailer.attempts.get("marie@example.org"), Some(&1));
        assert_eq!(mailer.attempts.get("niels@example.org"), Some(&1));
        assert_eq!(mailer.attempts.get("enrico@example.org"), None);
    }

    #[test]
    fn a_failed_recipient_does_not_abort_the_batch() {
        let sheet = sheet();
        let selection = full_selection(&sheet);
        let mut mailer = ScriptedMailer {
            fail_for: Some("marie@example.org".to_string()),
            ..ScriptedMailer::default()
        };
        let report = send_batch(&sheet, &selection, &mut mailer, &MessageTemplate::default());
        assert_eq!(report.sent.len(), 1);
        assert_eq!(report.sent[0].address, "niels@example.org");
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].student, 0);
        // The failing recipient got exactly one attempt, no retry.
        assert_eq!(mailer.attempts.get("marie@example.org"), Some(&1));
        assert!(report.has_failures());
    }

    #[test]
    fn empty_selection_sends_nothing() {
        let sheet = sheet();
        let selection = SelectionSession::new(&sheet).validate();
        let mut mailer = ScriptedMailer::default();
        let report = send_batch(&sheet, &selection, &mut mailer, &MessageTemplate::default());
        assert!(report.sent.is_empty());
        assert!(mailer.attempts.is_empty());
        assert_eq!(report.skipped, 4);
    }

    #[test]
    fn report_serializes() {
        let report = BatchReport {
            sent: vec![Dispatch {
                student: 0,
                address: "marie@example.org".to_string(),
            }],
            skipped: 1,
            failures: vec![],
        };
        let json = serde_json::to_string(&report).expect("serialize report");
        assert!(json.contains("marie@example.org"));
    }
}
