//! Payload types returned by the homework API.
//!
//! Only the fields the poller needs are modelled.  Everything else the server
//! sends (ids, reviewer comments, dates) is ignored.

use serde_json::{Map, Value};

/// A validated poll response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// Server time of the response; the next poll window starts here.
    pub current_date: i64,
    /// Records changed since the requested `from_date`, newest first.
    pub homeworks: Vec<HomeworkRecord>,
}

/// One homework entry.
///
/// Both fields are optional at this level so that a record missing one of
/// them still reaches the translator, which reports it as an error instead
/// of it being dropped silently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeworkRecord {
    pub homework_name: Option<String>,
    pub status: Option<String>,
}

impl HomeworkRecord {
    #[cfg(test)]
    pub fn new(name: &str, status: &str) -> Self {
        Self {
            homework_name: Some(name.to_string()),
            status: Some(status.to_string()),
        }
    }

    /// Pick the known fields out of a JSON object.  A field that is present
    /// but not a string is treated as absent.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        let text = |key: &str| object.get(key).and_then(Value::as_str).map(String::from);
        Self {
            homework_name: text("homework_name"),
            status: text("status"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ignores_unknown_fields() {
        let value = json!({
            "id": 124,
            "status": "rejected",
            "homework_name": "hw2.zip",
            "reviewer_comment": "Код не по PEP8",
            "date_updated": "2020-02-13T16:42:47Z",
        });
        let record = HomeworkRecord::from_object(value.as_object().unwrap());
        assert_eq!(record, HomeworkRecord::new("hw2.zip", "rejected"));
    }

    #[test]
    fn missing_or_non_string_fields_become_none() {
        let value = json!({"lesson_name": "x", "status": 3});
        let record = HomeworkRecord::from_object(value.as_object().unwrap());
        assert!(record.homework_name.is_none());
        assert!(record.status.is_none());
    }
}
