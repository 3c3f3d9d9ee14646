use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while decoding filter state.
///
/// None of these are fatal: callers at the binder boundary log them and fall
/// back to "no filter" for the affected column.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("malformed filter token {token:?}: {reason}")]
    MalformedToken { token: String, reason: String },

    #[error("malformed persisted state: {0}")]
    MalformedPersistedState(String),

    #[error("inconsistent date range: {from} is after {to}")]
    InconsistentDateRange { from: NaiveDate, to: NaiveDate },

    #[error("invalid date format {0:?}")]
    InvalidDateFormat(String),

    #[error("no filter bound to column {0}")]
    UnknownColumn(usize),

    #[error("{event} cannot be applied to {kind} column {column}")]
    UnexpectedEvent {
        column: usize,
        kind: String,
        event: String,
    },
}

impl FilterError {
    pub(crate) fn malformed(token: &str, reason: impl Into<String>) -> Self {
        Self::MalformedToken {
            token: token.to_string(),
            reason: reason.into(),
        }
    }
}
