use super::codec::to_csv_string;
use super::collection::RecordCollection;
use super::domain::InterviewRecord;
use super::intake::{FormAction, FormInput, InterviewForm};
use super::store::{RecordStore, StoreError};
use super::summary::{status_counts, StatusCounts};
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tracing::{info, warn};

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// State for one user working with the dashboard: the loaded table and the
/// form being filled in. Every mutation is persisted before returning.
pub struct InterviewSession<S> {
    store: Arc<S>,
    records: RecordCollection,
    form: InterviewForm,
    clock: fn() -> NaiveDate,
}

impl<S> InterviewSession<S>
where
    S: RecordStore,
{
    /// Loads the stored table. A missing file starts an empty session.
    pub fn start(store: Arc<S>) -> Result<Self, SessionError> {
        Self::start_with_clock(store, local_today)
    }

    pub fn start_with_clock(
        store: Arc<S>,
        clock: fn() -> NaiveDate,
    ) -> Result<Self, SessionError> {
        let records = store.load()?;
        info!(rows = records.len(), "interview session started");
        Ok(Self {
            store,
            records,
            form: InterviewForm::new(clock()),
            clock,
        })
    }

    pub fn records(&self) -> &RecordCollection {
        &self.records
    }

    pub fn form(&self) -> &InterviewForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut InterviewForm {
        &mut self.form
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Applies a form interaction. Only `Submit` produces a record.
    pub fn handle(&mut self, action: FormAction) -> Result<Option<InterviewRecord>, SessionError> {
        match action {
            FormAction::Submit => {
                let record = self.form.to_record();
                let mut next = self.records.clone();
                next.push(record.clone());
                if let Err(err) = self.store.save(&next) {
                    warn!(error = %err, "failed to persist submitted interview");
                    return Err(err.into());
                }
                self.records = next;
                info!(
                    name = %record.name,
                    status = %record.status,
                    rows = self.records.len(),
                    "interview details added"
                );
                self.form.reset((self.clock)());
                Ok(Some(record))
            }
            FormAction::ClearForm => {
                self.form.reset((self.clock)());
                Ok(None)
            }
            FormAction::Idle => Ok(None),
        }
    }

    /// Loads a raw payload into the form and submits it.
    pub fn submit(&mut self, input: FormInput) -> Result<InterviewRecord, SessionError> {
        input.apply_to(&mut self.form);
        self.handle(FormAction::Submit)?
            .ok_or(SessionError::NothingSubmitted)
    }

    /// Empties the table and persists the empty schema.
    pub fn clear_data(&mut self) -> Result<&RecordCollection, SessionError> {
        self.records = self.store.clear()?;
        info!("interview data cleared");
        Ok(&self.records)
    }

    pub fn summary(&self) -> StatusCounts {
        status_counts(&self.records)
    }

    /// Current table in the stored text format, for downloads.
    pub fn export_csv(&self) -> Result<String, SessionError> {
        Ok(to_csv_string(&self.records)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("form submission produced no record")]
    NothingSubmitted,
    #[error("interview session unavailable")]
    Poisoned,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interviews::domain::{InterviewStatus, Position};
    use crate::interviews::intake::QuestionAnswer;
    use crate::interviews::store::MemoryRecordStore;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).expect("valid date")
    }

    fn session() -> InterviewSession<MemoryRecordStore> {
        InterviewSession::start_with_clock(Arc::new(MemoryRecordStore::default()), fixed_today)
            .expect("session starts")
    }

    struct FailingStore;

    impl RecordStore for FailingStore {
        fn load(&self) -> Result<RecordCollection, StoreError> {
            Ok(RecordCollection::new())
        }

        fn save(&self, _collection: &RecordCollection) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("disk full".to_string()))
        }
    }

    #[test]
    fn idle_and_clear_form_never_touch_the_store() {
        let mut session = session();
        session.form_mut().name = "Asha".to_string();

        assert!(session.handle(FormAction::Idle).expect("idle").is_none());
        assert_eq!(session.form().name, "Asha");
        assert!(session.handle(FormAction::ClearForm).expect("clear form").is_none());
        assert_eq!(session.form(), &InterviewForm::new(fixed_today()));

        assert!(session.records().is_empty());
        assert_eq!(session.store().contents().expect("readable"), None);
    }

    #[test]
    fn submit_appends_persists_and_resets_form() {
        let mut session = session();
        let record = session
            .submit(FormInput {
                name: "Asha".to_string(),
                position: Position::CloudEngineer,
                status: InterviewStatus::Cleared,
                interviewer_name: "Ravi".to_string(),
                interview_date: None,
                round: Some(2),
                entries: vec![QuestionAnswer {
                    question: "Explain IAM roles".to_string(),
                    answer: "...".to_string(),
                }],
            })
            .expect("submit succeeds");

        assert_eq!(record.round, 2);
        assert_eq!(session.records().len(), 1);
        assert_eq!(session.form(), &InterviewForm::new(fixed_today()));

        let stored = session.store().load().expect("stored table parses");
        assert_eq!(stored, *session.records());
        assert_eq!(session.summary().cleared, 1);
    }

    #[test]
    fn clear_data_persists_empty_table() {
        let mut session = session();
        session.handle(FormAction::Submit).expect("blank submit accepted");
        assert_eq!(session.records().len(), 1);

        assert!(session.clear_data().expect("clear").is_empty());
        assert!(session.store().load().expect("reload").is_empty());
        let saved = session
            .store()
            .contents()
            .expect("readable")
            .expect("saved");
        assert_eq!(session.export_csv().expect("export"), saved);
    }

    #[test]
    fn failed_save_surfaces_store_error() {
        let mut session = InterviewSession::start_with_clock(Arc::new(FailingStore), fixed_today)
            .expect("session starts");
        assert!(matches!(
            session.handle(FormAction::Submit),
            Err(SessionError::Store(StoreError::Unavailable(_)))
        ));
        assert!(session.records().is_empty());
    }
}
