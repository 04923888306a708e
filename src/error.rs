use thiserror::Error;

/// Protocol-level failures. Store-level misses (unknown ids) are not errors:
/// they surface as `false`/`null` results.
#[derive(Debug, Error)]
pub enum LmsError {
    #[error("missing params.{0}")]
    MissingParam(&'static str),

    #[error("{0}")]
    BadParams(String),

    #[error("unknown index: {0}")]
    UnknownIndex(String),

    #[error("unknown role: {0}")]
    UnknownRole(String),

    #[error("no pending action with ticket {0}")]
    UnknownTicket(String),

    #[error("{0} cannot be deferred")]
    NotDeferrable(String),

    #[error("unknown method: {0}")]
    UnknownMethod(String),
}

impl LmsError {
    pub fn code(&self) -> &'static str {
        match self {
            LmsError::MissingParam(_)
            | LmsError::BadParams(_)
            | LmsError::UnknownIndex(_)
            | LmsError::UnknownRole(_)
            | LmsError::NotDeferrable(_) => "bad_params",
            LmsError::UnknownTicket(_) => "not_found",
            LmsError::UnknownMethod(_) => "not_implemented",
        }
    }
}
