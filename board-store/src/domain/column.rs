//! Column Entity
//!
//! A named lane on the board. Column order is the order of the board's
//! `columns` sequence; there is no position field.

use serde::{Deserialize, Serialize};

pub type ColumnId = u32;

/// Column type, chosen when the column is created
///
/// Known treatment categories get their own variant. Any other text is kept
/// verbatim so boards written by older clients load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColumnKind {
    Medicines,
    Scanning,
    ScreeningSchedule,
    Other,
    Custom(String),
}

impl ColumnKind {
    /// Suggested kinds, in the order they are offered when adding a column
    pub const SUGGESTED: [ColumnKind; 4] = [
        ColumnKind::Medicines,
        ColumnKind::Scanning,
        ColumnKind::ScreeningSchedule,
        ColumnKind::Other,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ColumnKind::Medicines => "Medicines",
            ColumnKind::Scanning => "Scanning",
            ColumnKind::ScreeningSchedule => "Screening Schedule",
            ColumnKind::Other => "Other",
            ColumnKind::Custom(s) => s,
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Medicines" => ColumnKind::Medicines,
            "Scanning" => ColumnKind::Scanning,
            "Screening Schedule" => ColumnKind::ScreeningSchedule,
            "Other" => ColumnKind::Other,
            _ => ColumnKind::Custom(s.to_string()),
        }
    }
}

impl From<String> for ColumnKind {
    fn from(s: String) -> Self {
        match ColumnKind::from_str(&s) {
            ColumnKind::Custom(_) => ColumnKind::Custom(s),
            kind => kind,
        }
    }
}

impl From<ColumnKind> for String {
    fn from(kind: ColumnKind) -> Self {
        match kind {
            ColumnKind::Custom(s) => s,
            kind => kind.as_str().to_string(),
        }
    }
}

/// A board column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Unique identifier within the board
    pub id: ColumnId,
    /// Display title, editable after creation
    pub title: String,
    /// Kind the column was created as
    #[serde(rename = "type")]
    pub kind: ColumnKind,
}

impl Column {
    /// Create a column whose kind is derived from its title
    pub fn new(id: ColumnId, title: String) -> Self {
        let kind = ColumnKind::from_str(&title);
        Self { id, title, kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_kind_from_title() {
        assert_eq!(Column::new(1, "Medicines".into()).kind, ColumnKind::Medicines);
        assert_eq!(
            Column::new(2, "Screening Schedule".into()).kind,
            ColumnKind::ScreeningSchedule
        );
        assert_eq!(
            Column::new(3, "Todo".into()).kind,
            ColumnKind::Custom("Todo".into())
        );
    }

    #[test]
    fn test_column_serializes_type_as_string() {
        let column = Column::new(4, "Scanning".into());
        let json = serde_json::to_value(&column).unwrap();
        assert_eq!(json["type"], "Scanning");
        assert_eq!(json["title"], "Scanning");
        assert_eq!(json["id"], 4);
    }

    #[test]
    fn test_custom_kind_survives_json() {
        let json = r#"{"id":9,"title":"Physio","type":"Physio"}"#;
        let column: Column = serde_json::from_str(json).unwrap();
        assert_eq!(column.kind, ColumnKind::Custom("Physio".into()));
        assert_eq!(serde_json::to_string(&column).unwrap(), json);
    }
}
