use super::collection::{RecordCollection, COLUMNS};
use super::domain::{InterviewRecord, InterviewStatus, JoinedText, Position};
use super::store::StoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// One stored row. Field order must match [`COLUMNS`].
#[derive(Debug, Serialize, Deserialize)]
struct StoredRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Position")]
    position: Position,
    #[serde(rename = "Status")]
    status: InterviewStatus,
    #[serde(rename = "Interviewer Name")]
    interviewer_name: String,
    #[serde(rename = "Date of Interview")]
    interview_date: NaiveDate,
    #[serde(rename = "Round")]
    round: u32,
    #[serde(rename = "Interview Questions")]
    questions: String,
    #[serde(rename = "Interview Answers")]
    answers: String,
}

impl From<&InterviewRecord> for StoredRow {
    fn from(record: &InterviewRecord) -> Self {
        Self {
            name: record.name.clone(),
            position: record.position.clone(),
            status: record.status.clone(),
            interviewer_name: record.interviewer_name.clone(),
            interview_date: record.interview_date,
            round: record.round,
            questions: record.questions.as_str().to_string(),
            answers: record.answers.as_str().to_string(),
        }
    }
}

impl From<StoredRow> for InterviewRecord {
    fn from(row: StoredRow) -> Self {
        Self {
            name: row.name,
            position: row.position,
            status: row.status,
            interviewer_name: row.interviewer_name,
            interview_date: row.interview_date,
            round: row.round,
            questions: JoinedText::from_stored(row.questions),
            answers: JoinedText::from_stored(row.answers),
        }
    }
}

/// Writes the header row followed by one row per record.
pub fn write_collection<W: Write>(
    writer: W,
    collection: &RecordCollection,
) -> Result<(), StoreError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(COLUMNS)?;
    for record in collection {
        csv_writer.serialize(StoredRow::from(record))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Parses a stored table, rejecting files whose header is not the canonical schema.
pub fn read_collection<R: Read>(reader: R) -> Result<RecordCollection, StoreError> {
    let mut csv_reader = csv::ReaderBuilder::new().from_reader(reader);

    let headers = csv_reader.headers()?;
    if !headers.iter().eq(COLUMNS.iter().copied()) {
        return Err(StoreError::Schema {
            found: headers.iter().map(str::to_string).collect(),
        });
    }

    let mut collection = RecordCollection::new();
    for row in csv_reader.deserialize::<StoredRow>() {
        collection.push(row?.into());
    }

    Ok(collection)
}

/// Serializes the collection to the same text written to storage.
pub fn to_csv_string(collection: &RecordCollection) -> Result<String, StoreError> {
    let mut buffer = Vec::new();
    write_collection(&mut buffer, collection)?;
    String::from_utf8(buffer).map_err(|err| StoreError::Unavailable(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Name,Position,Status,Interviewer Name,Date of Interview,Round,Interview Questions,Interview Answers\n";

    fn record(name: &str, status: InterviewStatus) -> InterviewRecord {
        InterviewRecord {
            name: name.to_string(),
            position: Position::CloudEngineer,
            status,
            interviewer_name: "Ravi".to_string(),
            interview_date: NaiveDate::from_ymd_opt(2024, 1, 10).expect("valid date"),
            round: 2,
            questions: JoinedText::join(&["Explain IAM roles", "What is a VPC?"]),
            answers: JoinedText::join(&["Policies attached to identities", "A private network"]),
        }
    }

    #[test]
    fn empty_collection_still_writes_header() {
        let text = to_csv_string(&RecordCollection::new()).expect("serializes");
        assert_eq!(text, HEADER);
    }

    #[test]
    fn joined_fields_are_quoted_once() {
        let collection: RecordCollection =
            std::iter::once(record("Asha", InterviewStatus::Cleared)).collect();
        let text = to_csv_string(&collection).expect("serializes");
        let expected = format!(
            "{HEADER}Asha,Cloud Engineer,Cleared,Ravi,2024-01-10,2,\"Explain IAM roles, What is a VPC?\",\"Policies attached to identities, A private network\"\n"
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn read_accepts_written_output() {
        let collection: RecordCollection = vec![
            record("Asha", InterviewStatus::Cleared),
            record("Kiran", InterviewStatus::Unset),
        ]
        .into_iter()
        .collect();
        let text = to_csv_string(&collection).expect("serializes");

        let parsed = read_collection(text.as_bytes()).expect("parses");
        assert_eq!(parsed, collection);
        assert_eq!(parsed.records()[1].status, InterviewStatus::Unset);
    }

    #[test]
    fn read_rejects_foreign_headers() {
        let text = "Name,Status\nAsha,Cleared\n";
        match read_collection(text.as_bytes()) {
            Err(StoreError::Schema { found }) => assert_eq!(found, vec!["Name", "Status"]),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn read_rejects_unparseable_dates() {
        let text = format!("{HEADER}Asha,Cloud Engineer,Cleared,Ravi,tomorrow,1,q,a\n");
        assert!(matches!(
            read_collection(text.as_bytes()),
            Err(StoreError::Csv(_))
        ));
    }
}
