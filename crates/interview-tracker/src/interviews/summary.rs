use super::collection::RecordCollection;
use super::domain::InterviewStatus;
use serde::Serialize;

/// Entry counts for the status chart.
///
/// Records whose status is unset or unrecognized contribute to
/// `total_entries` only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub total_entries: usize,
    pub cleared: usize,
    pub rejected: usize,
    pub noshow: usize,
}

impl StatusCounts {
    /// Entries that fall outside the three charted outcomes.
    pub fn unclassified(&self) -> usize {
        self.total_entries - (self.cleared + self.rejected + self.noshow)
    }

    /// Series for a categorical bar chart, one bar per outcome.
    pub fn chart(&self) -> [StatusCountEntry; 3] {
        [
            StatusCountEntry {
                status: InterviewStatus::Cleared,
                label: "Cleared",
                count: self.cleared,
            },
            StatusCountEntry {
                status: InterviewStatus::Rejected,
                label: "Rejected",
                count: self.rejected,
            },
            StatusCountEntry {
                status: InterviewStatus::Noshow,
                label: "No-Show",
                count: self.noshow,
            },
        ]
    }

    pub fn view(&self) -> StatusSummaryView {
        StatusSummaryView {
            total_entries: self.total_entries,
            cleared: self.cleared,
            rejected: self.rejected,
            noshow: self.noshow,
            unclassified: self.unclassified(),
            chart: self.chart(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCountEntry {
    pub status: InterviewStatus,
    pub label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusSummaryView {
    pub total_entries: usize,
    pub cleared: usize,
    pub rejected: usize,
    pub noshow: usize,
    /// Unset or unrecognized outcomes; not charted.
    pub unclassified: usize,
    pub chart: [StatusCountEntry; 3],
}

/// Counts entries per outcome. Recomputed from scratch on every call.
pub fn status_counts(collection: &RecordCollection) -> StatusCounts {
    collection
        .iter()
        .fold(StatusCounts::default(), |mut counts, record| {
            counts.total_entries += 1;
            match record.status {
                InterviewStatus::Cleared => counts.cleared += 1,
                InterviewStatus::Rejected => counts.rejected += 1,
                InterviewStatus::Noshow => counts.noshow += 1,
                InterviewStatus::Unset | InterviewStatus::Other(_) => {}
            }
            counts
        })
}
