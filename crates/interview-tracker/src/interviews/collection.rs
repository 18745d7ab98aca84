use super::domain::InterviewRecord;
use serde::Serialize;

/// Canonical column order used for storage, export, and empty tables.
pub const COLUMNS: [&str; 8] = [
    "Name",
    "Position",
    "Status",
    "Interviewer Name",
    "Date of Interview",
    "Round",
    "Interview Questions",
    "Interview Answers",
];

/// Every interview recorded in a session, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecordCollection {
    records: Vec<InterviewRecord>,
}

impl RecordCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: InterviewRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[InterviewRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InterviewRecord> {
        self.records.iter()
    }
}

impl FromIterator<InterviewRecord> for RecordCollection {
    fn from_iter<I: IntoIterator<Item = InterviewRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RecordCollection {
    type Item = &'a InterviewRecord;
    type IntoIter = std::slice::Iter<'a, InterviewRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Table payload handed to presentation layers.
#[derive(Debug, Clone, Serialize)]
pub struct RecordTableView<'a> {
    pub columns: [&'static str; 8],
    pub records: &'a RecordCollection,
}

impl RecordCollection {
    pub fn table_view(&self) -> RecordTableView<'_> {
        RecordTableView {
            columns: COLUMNS,
            records: self,
        }
    }
}
