//! Per-student notification bodies.

use std::fmt::Write;

use marks_model::MarkSheet;
use marks_select::Selection;

/// Fixed wording around the per-topic mark lines.
#[derive(Debug, Clone)]
pub struct MessageTemplate {
    pub greeting: String,
    pub signoff: String,
    pub signature: String,
}

impl Default for MessageTemplate {
    fn default() -> Self {
        Self {
            greeting: "Hello,\n".to_string(),
            signoff: "Have a good day,\n".to_string(),
            signature: "The teaching team".to_string(),
        }
    }
}

/// Builds the message body for one student.
///
/// Topics appear in roster order; a topic is included when it is selected
/// and a mark is recorded. Returns the empty string when nothing qualifies:
/// the "do not send" sentinel the batch sender honors.
pub fn build_body(
    student: usize,
    sheet: &MarkSheet,
    selection: &Selection,
    template: &MessageTemplate,
) -> String {
    let mut lines = String::new();
    let mut included = 0usize;
    for topic in 0..sheet.topic_count() {
        if !selection.is_selected(student, topic) || !sheet.has_mark(student, topic) {
            continue;
        }
        included += 1;
        let _ = writeln!(
            lines,
            "Your mark for {} is {}. Mean is {}, highest grade is {}, lowest grade is {}.",
            sheet.topic(topic),
            sheet.mark(student, topic),
            sheet.mean(topic),
            sheet.highest(topic),
            sheet.lowest(topic),
        );
    }
    if included == 0 {
        return String::new();
    }
    format!(
        "{}{}{}{}",
        template.greeting, lines, template.signoff, template.signature
    )
}
