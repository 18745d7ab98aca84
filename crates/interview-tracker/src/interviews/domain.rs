use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label shown by selection controls before the user has picked a value.
pub const UNSET_LABEL: &str = "...";

/// Separator placed between items of a flattened multi-value field.
pub const LIST_SEPARATOR: &str = ", ";

/// Role a candidate interviewed for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Position {
    #[default]
    Unset,
    CloudEngineer,
    SrCloudEngineer,
    /// Label read back from storage that is not one of the selectable roles.
    Other(String),
}

impl Position {
    pub fn options() -> [Self; 3] {
        [Self::Unset, Self::CloudEngineer, Self::SrCloudEngineer]
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Unset => UNSET_LABEL,
            Self::CloudEngineer => "Cloud Engineer",
            Self::SrCloudEngineer => "Sr Cloud Engineer",
            Self::Other(label) => label,
        }
    }

    pub fn from_label(value: &str) -> Self {
        match value {
            UNSET_LABEL => Self::Unset,
            "Cloud Engineer" => Self::CloudEngineer,
            "Sr Cloud Engineer" => Self::SrCloudEngineer,
            other => Self::Other(other.to_string()),
        }
    }

    /// Looks up a selectable role by its exact label.
    pub fn from_option(value: &str) -> Option<Self> {
        Self::options()
            .into_iter()
            .find(|option| option.label() == value)
    }
}

impl From<String> for Position {
    fn from(value: String) -> Self {
        Self::from_label(&value)
    }
}

impl From<Position> for String {
    fn from(value: Position) -> Self {
        match value {
            Position::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of an interview.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InterviewStatus {
    #[default]
    Unset,
    Cleared,
    Rejected,
    Noshow,
    /// Label read back from storage that is not a known outcome.
    Other(String),
}

impl InterviewStatus {
    pub fn options() -> [Self; 4] {
        [Self::Unset, Self::Cleared, Self::Rejected, Self::Noshow]
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Unset => UNSET_LABEL,
            Self::Cleared => "Cleared",
            Self::Rejected => "Rejected",
            Self::Noshow => "Noshow",
            Self::Other(label) => label,
        }
    }

    pub fn from_label(value: &str) -> Self {
        match value {
            UNSET_LABEL => Self::Unset,
            "Cleared" => Self::Cleared,
            "Rejected" => Self::Rejected,
            "Noshow" => Self::Noshow,
            other => Self::Other(other.to_string()),
        }
    }

    /// Looks up a selectable outcome by its exact label.
    pub fn from_option(value: &str) -> Option<Self> {
        Self::options()
            .into_iter()
            .find(|option| option.label() == value)
    }

    /// True for the three outcomes that are counted per status.
    pub fn is_recognized(&self) -> bool {
        matches!(self, Self::Cleared | Self::Rejected | Self::Noshow)
    }
}

impl From<String> for InterviewStatus {
    fn from(value: String) -> Self {
        Self::from_label(&value)
    }
}

impl From<InterviewStatus> for String {
    fn from(value: InterviewStatus) -> Self {
        match value {
            InterviewStatus::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for InterviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A list of texts flattened into one field by joining with [`LIST_SEPARATOR`].
///
/// The stored text is kept verbatim so repeated load/save cycles never drift.
/// Splitting it back is best effort: an item that itself contains the
/// separator cannot be told apart from two items.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JoinedText(String);

impl JoinedText {
    pub fn join<S: AsRef<str>>(items: &[S]) -> Self {
        let joined = items
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(LIST_SEPARATOR);
        Self(joined)
    }

    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn items(&self) -> Vec<&str> {
        self.0.split(LIST_SEPARATOR).collect()
    }
}

impl fmt::Display for JoinedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One candidate interview event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewRecord {
    pub name: String,
    pub position: Position,
    pub status: InterviewStatus,
    pub interviewer_name: String,
    pub interview_date: NaiveDate,
    pub round: u32,
    pub questions: JoinedText,
    pub answers: JoinedText,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_strings() {
        for position in Position::options() {
            assert_eq!(Position::from_label(position.label()), position);
        }
        for status in InterviewStatus::options() {
            assert_eq!(InterviewStatus::from_label(status.label()), status);
        }
    }

    #[test]
    fn unknown_labels_are_preserved() {
        let status = InterviewStatus::from_label("On Hold");
        assert_eq!(status, InterviewStatus::Other("On Hold".to_string()));
        assert_eq!(String::from(status.clone()), "On Hold");
        assert!(!status.is_recognized());
        assert!(!InterviewStatus::Unset.is_recognized());
        assert!(InterviewStatus::Noshow.is_recognized());

        let position = Position::from_label("Data Engineer");
        assert_eq!(position.label(), "Data Engineer");
    }

    #[test]
    fn from_option_only_matches_selectable_labels() {
        assert_eq!(InterviewStatus::from_option("Cleared"), Some(InterviewStatus::Cleared));
        assert_eq!(InterviewStatus::from_option("..."), Some(InterviewStatus::Unset));
        assert_eq!(InterviewStatus::from_option("cleared"), None);
        assert_eq!(Position::from_option("Sr Cloud Engineer"), Some(Position::SrCloudEngineer));
        assert_eq!(Position::from_option("Janitor"), None);
    }

    #[test]
    fn statuses_serialize_as_labels() {
        let json = serde_json::to_string(&InterviewStatus::Cleared).expect("serializes");
        assert_eq!(json, "\"Cleared\"");
        let unset: InterviewStatus = serde_json::from_str("\"...\"").expect("deserializes");
        assert_eq!(unset, InterviewStatus::Unset);
    }

    #[test]
    fn join_has_no_trailing_separator() {
        assert_eq!(JoinedText::join(&["Explain IAM roles"]).as_str(), "Explain IAM roles");
        assert_eq!(JoinedText::join(&["a", "b", "c"]).as_str(), "a, b, c");
        assert_eq!(JoinedText::join(&[""]).as_str(), "");
        assert_eq!(JoinedText::join(&["", ""]).as_str(), ", ");
    }

    #[test]
    fn items_split_is_lossy_for_embedded_separators() {
        let joined = JoinedText::join(&["VPC, subnets", "NAT"]);
        assert_eq!(joined.items(), vec!["VPC", "subnets", "NAT"]);
    }
}
