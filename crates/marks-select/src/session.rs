//! The tri-level selection session.
//!
//! Three boolean tiers are kept mutually consistent: one flag per
//! (student, topic) cell, one master flag per student, one master flag per
//! topic. A master being set asserts that every eligible cell in its lane is
//! set; the toggle operations re-establish that assertion after every
//! mutation.
//!
//! The two toggle directions are deliberately asymmetric. Ticking never
//! forces a master on blindly: the master is re-derived from lane
//! completeness. Unticking is a destructive cascade: removing any piece of a
//! lane invalidates every master that counted on it.
//!
//! Cells with an empty student name, an empty topic header, or no recorded
//! mark are not selectable, but count as satisfied when a lane is checked
//! for completeness.

use marks_model::MarkSheet;
use tracing::trace;

/// One interactive (or scripted) selection over a borrowed grade sheet.
///
/// The sheet is read-only for the lifetime of the session; all mutable
/// state lives here, zero-initialized at construction. Indices are roster
/// indices; passing an out-of-range index is a programming error and
/// panics.
#[derive(Debug, Clone)]
pub struct SelectionSession<'a> {
    sheet: &'a MarkSheet,
    single: Vec<Vec<bool>>,
    student_master: Vec<bool>,
    topic_master: Vec<bool>,
}

impl<'a> SelectionSession<'a> {
    pub fn new(sheet: &'a MarkSheet) -> Self {
        Self {
            sheet,
            single: vec![vec![false; sheet.topic_count()]; sheet.student_count()],
            student_master: vec![false; sheet.student_count()],
            topic_master: vec![false; sheet.topic_count()],
        }
    }

    pub fn sheet(&self) -> &'a MarkSheet {
        self.sheet
    }

    /// A cell is selectable iff both headers are present and a mark was
    /// recorded.
    pub fn is_eligible(&self, student: usize, topic: usize) -> bool {
        !self.sheet.student(student).is_empty()
            && !self.sheet.topic(topic).is_empty()
            && self.sheet.has_mark(student, topic)
    }

    pub fn is_selected(&self, student: usize, topic: usize) -> bool {
        self.single[student][topic]
    }

    pub fn student_master(&self, student: usize) -> bool {
        self.student_master[student]
    }

    pub fn topic_master(&self, topic: usize) -> bool {
        self.topic_master[topic]
    }

    /// True when every cell in the student's row is selected or ineligible.
    pub fn student_is_complete(&self, student: usize) -> bool {
        (0..self.sheet.topic_count()).all(|topic| {
            self.single[student][topic]
                || self.sheet.topic(topic).is_empty()
                || !self.sheet.has_mark(student, topic)
        })
    }

    /// True when every cell in the topic's column is selected or ineligible.
    pub fn topic_is_complete(&self, topic: usize) -> bool {
        (0..self.sheet.student_count()).all(|student| {
            self.single[student][topic]
                || self.sheet.student(student).is_empty()
                || !self.sheet.has_mark(student, topic)
        })
    }

    /// Toggles a single cell. Returns `false` without touching any state
    /// when the cell is not selectable (a disabled checkbox).
    pub fn toggle_cell(&mut self, student: usize, topic: usize) -> bool {
        if !self.is_eligible(student, topic) {
            return false;
        }
        let selected = !self.single[student][topic];
        self.single[student][topic] = selected;
        if selected {
            // Ticking can only raise a master, and only via completeness.
            if self.student_is_complete(student) {
                self.student_master[student] = true;
            }
            if self.topic_is_complete(topic) {
                self.topic_master[topic] = true;
            }
        } else {
            // Removing one piece always invalidates both crossing masters.
            self.student_master[student] = false;
            self.topic_master[topic] = false;
        }
        trace!(student, topic, selected, "toggled cell");
        true
    }

    /// Toggles a student's master control. Returns `false` without touching
    /// any state for an empty-name row, which has no control.
    pub fn toggle_student(&mut self, student: usize) -> bool {
        if self.sheet.student(student).is_empty() {
            return false;
        }
        let selected = !self.student_master[student];
        self.student_master[student] = selected;
        for topic in 0..self.sheet.topic_count() {
            if !self.is_eligible(student, topic) {
                continue;
            }
            self.single[student][topic] = selected;
            if selected {
                // Only the (student, topic) cell changed in this column, so
                // checking right after setting it is exact.
                if self.topic_is_complete(topic) {
                    self.topic_master[topic] = true;
                }
            } else {
                self.topic_master[topic] = false;
            }
        }
        trace!(student, selected, "toggled student master");
        true
    }

    /// Toggles a topic's master control. Returns `false` without touching
    /// any state for an empty-header column, which has no control.
    pub fn toggle_topic(&mut self, topic: usize) -> bool {
        if self.sheet.topic(topic).is_empty() {
            return false;
        }
        let selected = !self.topic_master[topic];
        self.topic_master[topic] = selected;
        for student in 0..self.sheet.student_count() {
            if !self.is_eligible(student, topic) {
                continue;
            }
            self.single[student][topic] = selected;
            if selected {
                if self.student_is_complete(student) {
                    self.student_master[student] = true;
                }
            } else {
                self.student_master[student] = false;
            }
        }
        trace!(topic, selected, "toggled topic master");
        true
    }

    /// Sets every flag, bypassing eligibility: the target state is uniform.
    pub fn select_all(&mut self) {
        for row in &mut self.single {
            row.fill(true);
        }
        self.student_master.fill(true);
        self.topic_master.fill(true);
    }

    /// Clears every flag, bypassing eligibility.
    pub fn reset(&mut self) {
        for row in &mut self.single {
            row.fill(false);
        }
        self.student_master.fill(false);
        self.topic_master.fill(false);
    }

    /// Ends the session, keeping the current selection.
    pub fn validate(self) -> Selection {
        Selection {
            single: self.single,
        }
    }

    /// Ends the session, discarding everything: caller-visible as "no
    /// selection".
    pub fn abort(mut self) -> Selection {
        self.reset();
        self.validate()
    }
}

/// The final per-cell selection matrix handed to the formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    single: Vec<Vec<bool>>,
}

impl Selection {
    pub fn student_count(&self) -> usize {
        self.single.len()
    }

    pub fn is_selected(&self, student: usize, topic: usize) -> bool {
        self.single[student][topic]
    }

    pub fn selected_count(&self, student: usize) -> usize {
        self.single[student].iter().filter(|flag| **flag).count()
    }

    pub fn is_empty(&self) -> bool {
        self.single.iter().flatten().all(|flag| !flag)
    }
}
