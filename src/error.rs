//! Error types shared by the poller's components.
//!
//! Each component returns its own error enum so the poll loop can tell them
//! apart when logging.  All of them render to the text that ends up in the
//! chat, so the `Display` strings must stay free of timestamps and other
//! per-cycle values: the loop deduplicates on that text.

use thiserror::Error;

/// Startup configuration is incomplete.  The only fatal error.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("missing required configuration: {}", .0.join(", "))]
pub struct ConfigError(pub Vec<&'static str>);

/// A network call could not be completed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    /// Render `err` followed by each of its causes, joined with `": "`.
    pub fn from_chain(err: &dyn std::error::Error) -> Self {
        let mut text = err.to_string();
        let mut cause = err.source();
        while let Some(inner) = cause {
            text.push_str(": ");
            text.push_str(&inner.to_string());
            cause = inner.source();
        }
        Self(text)
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        // Strip the URL: for Telegram it contains the bot token.
        Self::from_chain(&err.without_url())
    }
}

/// Failure to obtain a decoded body from the homework API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("ошибка при запросе к {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: TransportError,
    },

    #[error("эндпоинт {endpoint} недоступен, код ответа {status}")]
    Status { endpoint: String, status: u16 },

    #[error("ответ {endpoint} не является JSON: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The decoded payload does not have the documented shape.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    #[error("ответ API должен быть словарём")]
    NotAnObject,

    #[error("в ответе API отсутствует ключ `{0}`")]
    MissingKey(&'static str),

    #[error("значение `{0}` должно быть списком")]
    NotAnArray(&'static str),

    #[error("значение `{0}` должно быть целым числом")]
    NotAnInteger(&'static str),

    #[error("первый элемент списка homeworks должен быть словарём")]
    NewestRecordNotAnObject,
}

/// A homework record cannot be turned into a message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatusError {
    #[error("отсутствует поле `{0}` в записи о работе")]
    MissingField(&'static str),

    #[error("неизвестный статус работы: {}", .0.as_deref().unwrap_or("<нет>"))]
    UnknownStatus(Option<String>),
}

/// Anything that can go wrong inside one poll cycle.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Status(#[from] StatusError),
}

impl CycleError {
    /// Short label used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Api(ApiError::Transport { .. }) => "transport",
            Self::Api(ApiError::Status { .. }) => "http-status",
            Self::Api(ApiError::Decode { .. }) => "decode",
            Self::Shape(_) => "shape",
            Self::Status(_) => "status",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_lists_every_missing_name() {
        let err = ConfigError(vec!["PRACTICUM_TOKEN", "ENDPOINT"]);
        assert_eq!(
            err.to_string(),
            "missing required configuration: PRACTICUM_TOKEN, ENDPOINT"
        );
    }

    #[derive(Debug, Error)]
    #[error("error sending request")]
    struct SendFailed(#[source] std::io::Error);

    #[test]
    fn transport_error_keeps_every_cause() {
        let refused = SendFailed(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        ));
        let timed_out = SendFailed(std::io::Error::new(
            std::io::ErrorKind::TimedOut,
            "operation timed out",
        ));

        let refused = TransportError::from_chain(&refused);
        let timed_out = TransportError::from_chain(&timed_out);
        assert_eq!(refused.0, "error sending request: connection refused");
        assert_eq!(timed_out.0, "error sending request: operation timed out");
        assert_ne!(refused, timed_out);
    }

    #[test]
    fn reqwest_error_keeps_cause() {
        let err = reqwest::blocking::Client::new()
            .get("not a url")
            .send()
            .unwrap_err();
        let text = TransportError::from(err).0;
        assert!(text.starts_with("builder error: "), "{text}");
        assert!(text.contains("relative URL without a base"), "{text}");
    }

    #[test]
    fn unknown_status_renders_code_or_placeholder() {
        assert_eq!(
            StatusError::UnknownStatus(Some("pending".into())).to_string(),
            "неизвестный статус работы: pending"
        );
        assert_eq!(
            StatusError::UnknownStatus(None).to_string(),
            "неизвестный статус работы: <нет>"
        );
    }

    #[test]
    fn cycle_error_is_transparent_and_classified() {
        let err = CycleError::from(ApiError::Status {
            endpoint: "https://example.com/api".into(),
            status: 503,
        });
        assert_eq!(err.kind(), "http-status");
        assert_eq!(
            err.to_string(),
            "эндпоинт https://example.com/api недоступен, код ответа 503"
        );

        let err = CycleError::from(ShapeError::MissingKey("current_date"));
        assert_eq!(err.kind(), "shape");
        assert_eq!(err.to_string(), "в ответе API отсутствует ключ `current_date`");
    }
}
