

use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};
use thiserror::Error;

use crate::llm::providers::LlmProviderError;
use crate::search::SearchProviderError;

pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to analyze. Please try again.";


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    NoEvidenceFound,
    CompletionProviderError,
    UnparseableCompletion,
    ScoreOutOfRange,
    UnexpectedFailure,
}

/// Terminal failure of one analysis request. `Display` is the caller-facing message;
/// `detail()` carries what only belongs in logs.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Please provide a valid name")]
    InvalidInput,

    #[error("No information found about this person")]
    NoEvidenceFound,

    #[error("AI analysis failed")]
    CompletionProvider { status: u16, detail: String },

    #[error("Invalid AI response format")]
    UnparseableCompletion { detail: String },

    #[error("Scammer score out of range: {0}")]
    ScoreOutOfRange(f64),

    #[error("{}", unexpected_message(.0))]
    Unexpected(String),
}

fn unexpected_message(message: &str) -> &str {
    if message.trim().is_empty() {
        GENERIC_FAILURE_MESSAGE
    } else {
        message
    }
}

impl AnalysisError {
    pub fn unparseable(detail: impl Into<String>) -> Self {
        Self::UnparseableCompletion {
            detail: detail.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput => ErrorKind::InvalidInput,
            Self::NoEvidenceFound => ErrorKind::NoEvidenceFound,
            Self::CompletionProvider { .. } => ErrorKind::CompletionProviderError,
            Self::UnparseableCompletion { .. } => ErrorKind::UnparseableCompletion,
            Self::ScoreOutOfRange(_) => ErrorKind::ScoreOutOfRange,
            Self::Unexpected(_) => ErrorKind::UnexpectedFailure,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput => 400,
            Self::NoEvidenceFound => 404,
            _ => 500,
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::CompletionProvider { detail, .. } | Self::UnparseableCompletion { detail } => {
                Some(detail)
            }
            _ => None,
        }
    }
}

impl From<SearchProviderError> for AnalysisError {
    fn from(err: SearchProviderError) -> Self {
        Self::Unexpected(err.to_string())
    }
}

impl From<LlmProviderError> for AnalysisError {
    fn from(err: LlmProviderError) -> Self {
        match err {
            LlmProviderError::Status { status, body } => Self::CompletionProvider {
                status,
                detail: body,
            },
            LlmProviderError::EmptyResponse => {
                Self::unparseable(LlmProviderError::EmptyResponse.to_string())
            }
            other => Self::Unexpected(other.to_string()),
        }
    }
}
