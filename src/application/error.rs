//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add payload/fetch context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("malformed JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed XML payload: {message}")]
    Xml { message: String },

    #[error("fetch failed: {locator}")]
    Fetch {
        locator: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config error: {message}")]
    Config { message: String },
}

impl From<quick_xml::Error> for ApplicationError {
    fn from(e: quick_xml::Error) -> Self {
        Self::Xml {
            message: e.to_string(),
        }
    }
}

impl From<quick_xml::events::attributes::AttrError> for ApplicationError {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        Self::Xml {
            message: e.to_string(),
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
