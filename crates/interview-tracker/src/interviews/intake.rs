use super::domain::{InterviewRecord, InterviewStatus, JoinedText, Position};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// One question asked during an interview and the candidate's answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

/// What the presentation layer asks the form to do on this interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Submit,
    ClearForm,
    Idle,
}

/// Transient form input held by a session between interactions.
///
/// Values are coerced the way the form controls would coerce them: the round
/// and the number of question slots never drop below one. Nothing else is
/// validated, so empty names and answers are accepted as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewForm {
    pub name: String,
    pub position: Position,
    pub status: InterviewStatus,
    pub interviewer_name: String,
    pub interview_date: NaiveDate,
    round: u32,
    entries: Vec<QuestionAnswer>,
}

impl InterviewForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            name: String::new(),
            position: Position::Unset,
            status: InterviewStatus::Unset,
            interviewer_name: String::new(),
            interview_date: today,
            round: 1,
            entries: vec![QuestionAnswer::default()],
        }
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn set_round(&mut self, round: u32) {
        self.round = round.max(1);
    }

    pub fn entries(&self) -> &[QuestionAnswer] {
        &self.entries
    }

    pub fn question_count(&self) -> usize {
        self.entries.len()
    }

    pub fn set_question_count(&mut self, count: usize) {
        self.entries.resize_with(count.max(1), QuestionAnswer::default);
    }

    /// Fills the slot at `index`, growing the form if needed.
    pub fn set_entry(
        &mut self,
        index: usize,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) {
        if index >= self.entries.len() {
            self.set_question_count(index + 1);
        }
        self.entries[index] = QuestionAnswer {
            question: question.into(),
            answer: answer.into(),
        };
    }

    pub fn set_entries(&mut self, entries: Vec<QuestionAnswer>) {
        self.entries = entries;
        if self.entries.is_empty() {
            self.entries.push(QuestionAnswer::default());
        }
    }

    /// Builds the single record a submission produces.
    pub fn to_record(&self) -> InterviewRecord {
        let questions: Vec<&str> = self.entries.iter().map(|e| e.question.as_str()).collect();
        let answers: Vec<&str> = self.entries.iter().map(|e| e.answer.as_str()).collect();

        InterviewRecord {
            name: self.name.clone(),
            position: self.position.clone(),
            status: self.status.clone(),
            interviewer_name: self.interviewer_name.clone(),
            interview_date: self.interview_date,
            round: self.round,
            questions: JoinedText::join(&questions),
            answers: JoinedText::join(&answers),
        }
    }

    pub fn reset(&mut self, today: NaiveDate) {
        *self = Self::new(today);
    }
}

/// Raw submission payload sent by a presentation layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormInput {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "selectable_position")]
    pub position: Position,
    #[serde(default, deserialize_with = "selectable_status")]
    pub status: InterviewStatus,
    #[serde(default)]
    pub interviewer_name: String,
    #[serde(default)]
    pub interview_date: Option<NaiveDate>,
    #[serde(default)]
    pub round: Option<u32>,
    #[serde(default)]
    pub entries: Vec<QuestionAnswer>,
}

fn selectable_position<'de, D>(deserializer: D) -> Result<Position, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Position::from_option(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unknown position '{raw}'")))
}

fn selectable_status<'de, D>(deserializer: D) -> Result<InterviewStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    InterviewStatus::from_option(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unknown status '{raw}'")))
}

impl FormInput {
    /// Copies the payload into the form buffer, applying the control coercions.
    pub fn apply_to(self, form: &mut InterviewForm) {
        form.name = self.name;
        form.position = self.position;
        form.status = self.status;
        form.interviewer_name = self.interviewer_name;
        if let Some(date) = self.interview_date {
            form.interview_date = date;
        }
        form.set_round(self.round.unwrap_or(1));
        form.set_entries(self.entries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).expect("valid date")
    }

    #[test]
    fn new_form_has_one_blank_pair_and_round_one() {
        let form = InterviewForm::new(today());
        assert_eq!(form.round(), 1);
        assert_eq!(form.question_count(), 1);

        let record = form.to_record();
        assert_eq!(record.questions.as_str(), "");
        assert_eq!(record.answers.as_str(), "");
        assert_eq!(record.status, InterviewStatus::Unset);
        assert_eq!(record.position, Position::Unset);
        assert_eq!(record.interview_date, today());
    }

    #[test]
    fn round_and_question_count_never_drop_below_one() {
        let mut form = InterviewForm::new(today());
        form.set_round(0);
        assert_eq!(form.round(), 1);

        form.set_question_count(3);
        assert_eq!(form.question_count(), 3);
        form.set_question_count(0);
        assert_eq!(form.question_count(), 1);

        form.set_entries(Vec::new());
        assert_eq!(form.question_count(), 1);
    }

    #[test]
    fn to_record_joins_pairs_in_order() {
        let mut form = InterviewForm::new(today());
        form.set_entry(0, "Explain IAM roles", "Identity policies");
        form.set_entry(2, "Autoscaling?", "");

        let record = form.to_record();
        assert_eq!(record.questions.as_str(), "Explain IAM roles, , Autoscaling?");
        assert_eq!(record.answers.as_str(), "Identity policies, , ");
        assert_eq!(record.questions.items().len(), record.answers.items().len());
    }

    #[test]
    fn form_input_applies_coercions() {
        let input: FormInput = serde_json::from_str(
            r#"{"name":"Asha","position":"Cloud Engineer","status":"Cleared","round":0}"#,
        )
        .expect("payload parses");

        let mut form = InterviewForm::new(today());
        input.apply_to(&mut form);

        assert_eq!(form.name, "Asha");
        assert_eq!(form.position, Position::CloudEngineer);
        assert_eq!(form.status, InterviewStatus::Cleared);
        assert_eq!(form.round(), 1);
        assert_eq!(form.question_count(), 1);
        assert_eq!(form.interview_date, today());
    }

    #[test]
    fn form_input_rejects_labels_outside_the_options() {
        let lowercase = serde_json::from_str::<FormInput>(r#"{"status":"cleared"}"#);
        assert!(lowercase.is_err());
        let unknown_role = serde_json::from_str::<FormInput>(r#"{"position":"Janitor"}"#);
        assert!(unknown_role.is_err());
    }

    #[test]
    fn reset_discards_input() {
        let mut form = InterviewForm::new(today());
        form.name = "Asha".to_string();
        form.set_question_count(4);
        form.reset(today());
        assert_eq!(form, InterviewForm::new(today()));
    }
}
