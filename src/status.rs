//! Review status codes and the chat message for a status change.

use crate::api::HomeworkRecord;
use crate::error::StatusError;

/// The closed set of review outcomes the API reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Approved,
    Reviewing,
    Rejected,
}

impl Verdict {
    /// Look up a status code.  Unknown codes have no verdict.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "approved" => Some(Self::Approved),
            "reviewing" => Some(Self::Reviewing),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

/// Build the status-change message for `record`.
pub fn translate(record: &HomeworkRecord) -> Result<String, StatusError> {
    let name = record
        .homework_name
        .as_deref()
        .ok_or(StatusError::MissingField("homework_name"))?;
    let verdict = record
        .status
        .as_deref()
        .and_then(Verdict::from_code)
        .ok_or_else(|| StatusError::UnknownStatus(record.status.clone()))?;

    Ok(format!(
        "Изменился статус проверки работы \"{name}\". {}",
        verdict.text()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approved_message_matches_template() {
        let msg = translate(&HomeworkRecord::new("hw1", "approved")).unwrap();
        assert_eq!(
            msg,
            "Изменился статус проверки работы \"hw1\". Работа проверена: ревьюеру всё понравилось. Ура!"
        );
    }

    #[test]
    fn every_verdict_is_rendered_with_name() {
        for (code, verdict) in [
            ("approved", Verdict::Approved),
            ("reviewing", Verdict::Reviewing),
            ("rejected", Verdict::Rejected),
        ] {
            let msg = translate(&HomeworkRecord::new("project_sprint", code)).unwrap();
            assert_eq!(
                msg,
                format!(
                    "Изменился статус проверки работы \"project_sprint\". {}",
                    verdict.text()
                )
            );
        }
    }

    #[test]
    fn missing_name_is_reported_first() {
        let record = HomeworkRecord {
            homework_name: None,
            status: Some("pending".into()),
        };
        assert_eq!(
            translate(&record),
            Err(StatusError::MissingField("homework_name"))
        );
    }

    #[test]
    fn unknown_status_fails() {
        assert_eq!(
            translate(&HomeworkRecord::new("hw1", "pending")),
            Err(StatusError::UnknownStatus(Some("pending".into())))
        );
    }

    #[test]
    fn missing_status_fails() {
        let record = HomeworkRecord {
            homework_name: Some("hw1".into()),
            status: None,
        };
        assert_eq!(translate(&record), Err(StatusError::UnknownStatus(None)));
    }

    #[test]
    fn codes_are_case_sensitive() {
        assert_eq!(Verdict::from_code("Approved"), None);
        assert_eq!(Verdict::from_code("approved"), Some(Verdict::Approved));
    }
}
