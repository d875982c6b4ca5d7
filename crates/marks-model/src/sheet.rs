//! In-memory representation of a loaded grade sheet.
//!
//! The sheet keeps the raw grid exactly as parsed and derives the topic and
//! student rosters from the reserved regions. All `+4`/`+3` offset
//! arithmetic lives behind the accessors here so the selection engine and
//! the formatter never index the grid directly.
//!
//! # Sheet layout
//!
//! Row 0 holds `Name;Surname;Email` followed by one topic name per column.
//! Rows 1-3 hold the per-topic mean, highest, and lowest aggregates. Every
//! later row is one student: name, surname, email, then one mark per topic.
//! A topic header, a student name, or a mark cell may be empty; emptiness is
//! meaningful (the pair is not selectable) and is preserved verbatim.

use crate::error::SheetError;

/// Rows reserved at the top of the sheet: the topic header row plus the
/// mean/highest/lowest aggregate rows.
pub const STAT_ROWS: usize = 4;
/// Columns reserved at the left of the sheet: name, surname, email.
pub const INFO_COLS: usize = 3;

/// Grid row carrying the per-topic mean values.
pub const MEAN_ROW: usize = 1;
/// Grid row carrying the per-topic highest marks.
pub const HIGHEST_ROW: usize = 2;
/// Grid row carrying the per-topic lowest marks.
pub const LOWEST_ROW: usize = 3;

/// Grid column carrying student names.
pub const NAME_COL: usize = 0;
/// Grid column carrying student surnames.
pub const SURNAME_COL: usize = 1;
/// Grid column carrying student email addresses.
pub const EMAIL_COL: usize = 2;

/// A rectangular grade sheet with its derived rosters.
///
/// Immutable after construction apart from the lock-step sort operations;
/// the selection engine borrows it read-only for a whole session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkSheet {
    grid: Vec<Vec<String>>,
    topics: Vec<String>,
    students: Vec<String>,
}

impl MarkSheet {
    /// Builds a sheet from raw grid rows, validating the shape.
    ///
    /// # Errors
    ///
    /// - [`SheetError::TooFewRows`] when the reserved header rows are missing.
    /// - [`SheetError::TooFewColumns`] when the header row lacks the info columns.
    /// - [`SheetError::RaggedRow`] when any row's width differs from row 0.
    ///   The reported row number is 1-based, matching the input file line.
    pub fn from_rows(grid: Vec<Vec<String>>) -> Result<Self, SheetError> {
        if grid.len() < STAT_ROWS {
            return Err(SheetError::TooFewRows { found: grid.len() });
        }
        let width = grid[0].len();
        if width < INFO_COLS {
            return Err(SheetError::TooFewColumns { found: width });
        }
        for (index, row) in grid.iter().enumerate().skip(1) {
            if row.len() != width {
                return Err(SheetError::RaggedRow {
                    row: index + 1,
                    expected: width,
                    found: row.len(),
                });
            }
        }
        let topics = grid[0][INFO_COLS..].to_vec();
        let students = grid[STAT_ROWS..]
            .iter()
            .map(|row| row[NAME_COL].clone())
            .collect();
        Ok(Self {
            grid,
            topics,
            students,
        })
    }

    /// Topic names in column order. An empty entry is a column with no header.
    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    /// Student names in row order. An empty entry is a row with no student.
    pub fn students(&self) -> &[String] {
        &self.students
    }

    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    pub fn topic(&self, topic: usize) -> &str {
        &self.topics[topic]
    }

    pub fn student(&self, student: usize) -> &str {
        &self.students[student]
    }

    /// The recorded mark for a (student, topic) pair; empty when unfilled.
    pub fn mark(&self, student: usize, topic: usize) -> &str {
        &self.grid[student + STAT_ROWS][topic + INFO_COLS]
    }

    pub fn has_mark(&self, student: usize, topic: usize) -> bool {
        !self.mark(student, topic).is_empty()
    }

    pub fn mean(&self, topic: usize) -> &str {
        &self.grid[MEAN_ROW][topic + INFO_COLS]
    }

    pub fn highest(&self, topic: usize) -> &str {
        &self.grid[HIGHEST_ROW][topic + INFO_COLS]
    }

    pub fn lowest(&self, topic: usize) -> &str {
        &self.grid[LOWEST_ROW][topic + INFO_COLS]
    }

    pub fn surname(&self, student: usize) -> &str {
        &self.grid[student + STAT_ROWS][SURNAME_COL]
    }

    pub fn email(&self, student: usize) -> &str {
        &self.grid[student + STAT_ROWS][EMAIL_COL]
    }

    /// Roster index of the first student with this exact name.
    pub fn student_index(&self, name: &str) -> Option<usize> {
        self.students.iter().position(|student| student == name)
    }

    /// Roster index of the first topic with this exact name.
    pub fn topic_index(&self, name: &str) -> Option<usize> {
        self.topics.iter().position(|topic| topic == name)
    }

    /// Sorts student rows by name, ascending and stable.
    ///
    /// Whole grid rows move together, so every mark stays aligned with its
    /// student; the reserved rows never move.
    pub fn sort_students(&mut self) {
        let mut body = self.grid.split_off(STAT_ROWS);
        body.sort_by(|left, right| left[NAME_COL].cmp(&right[NAME_COL]));
        self.grid.append(&mut body);
        self.students = self.grid[STAT_ROWS..]
            .iter()
            .map(|row| row[NAME_COL].clone())
            .collect();
    }

    /// Sorts topic columns by header, ascending and stable.
    ///
    /// The same column permutation is applied to every grid row, so the
    /// aggregate rows and every mark stay aligned with their topic; the
    /// reserved columns never move.
    pub fn sort_topics(&mut self) {
        let mut order: Vec<usize> = (INFO_COLS..self.grid[0].len()).collect();
        order.sort_by(|&left, &right| self.grid[0][left].cmp(&self.grid[0][right]));
        for row in &mut self.grid {
            let mut tail = Vec::with_capacity(order.len());
            for &col in &order {
                tail.push(std::mem::take(&mut row[col]));
            }
            row.truncate(INFO_COLS);
            row.extend(tail);
        }
        self.topics = self.grid[0][INFO_COLS..].to_vec();
    }
}
