//! Interview outcome tracking: the record table, its flat-file storage, the
//! submission form, and the per-status summary shown next to the table.

pub mod codec;
pub mod collection;
pub mod domain;
pub mod intake;
pub mod router;
pub mod session;
pub mod store;
pub mod summary;

pub use codec::{read_collection, to_csv_string, write_collection};
pub use collection::{RecordCollection, RecordTableView, COLUMNS};
pub use domain::{InterviewRecord, InterviewStatus, JoinedText, Position};
pub use intake::{FormAction, FormInput, InterviewForm, QuestionAnswer};
pub use router::{interview_router, SharedSession, EXPORT_FILE_NAME};
pub use session::{InterviewSession, SessionError};
pub use store::{CsvRecordStore, MemoryRecordStore, RecordStore, StoreError};
pub use summary::{status_counts, StatusCountEntry, StatusCounts, StatusSummaryView};
