//! Shape checks for the decoded poll response.
//!
//! [`validate`] is a pure function over [`serde_json::Value`] so the checks
//! can be exercised without any I/O.  It does not look at record contents
//! beyond "is the newest one an object"; missing names and unknown statuses
//! are the translator's business.

use serde_json::Value;

use super::{ApiResponse, HomeworkRecord};
use crate::error::ShapeError;

const CURRENT_DATE: &str = "current_date";
const HOMEWORKS: &str = "homeworks";

/// Check `raw` against the documented `{current_date, homeworks}` shape.
///
/// An empty `homeworks` list is valid: nothing changed in the window.
pub fn validate(raw: &Value) -> Result<ApiResponse, ShapeError> {
    let object = raw.as_object().ok_or(ShapeError::NotAnObject)?;

    let current_date = object
        .get(CURRENT_DATE)
        .ok_or(ShapeError::MissingKey(CURRENT_DATE))?
        .as_i64()
        .ok_or(ShapeError::NotAnInteger(CURRENT_DATE))?;

    let items = object
        .get(HOMEWORKS)
        .ok_or(ShapeError::MissingKey(HOMEWORKS))?
        .as_array()
        .ok_or(ShapeError::NotAnArray(HOMEWORKS))?;

    // Only the newest record is ever reported, so only its shape matters.
    if items.first().is_some_and(|first| !first.is_object()) {
        return Err(ShapeError::NewestRecordNotAnObject);
    }

    let homeworks = items
        .iter()
        .map(|item| {
            item.as_object()
                .map(HomeworkRecord::from_object)
                .unwrap_or_default()
        })
        .collect();

    Ok(ApiResponse {
        current_date,
        homeworks,
    })
}

/// The server-reported timestamp, if `raw` carries a usable one.
///
/// Used to advance the poll window even when the rest of the payload fails
/// validation.
pub fn current_date(raw: &Value) -> Option<i64> {
    raw.get(CURRENT_DATE).and_then(Value::as_i64)
}
