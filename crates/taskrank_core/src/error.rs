use crate::client::ResponseBody;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    #[error("validation - {0}")]
    Validation(String),
    #[error("network - {message} ({detail})")]
    Network { message: String, detail: String },
    #[error("http - server responded with status {status}: {}", .body.pretty())]
    Http { status: u16, body: ResponseBody },
    #[error("unexpected - {0}")]
    Unexpected(String),
    #[error("invalid_data - {0}")]
    InvalidData(String),
    #[error("io_error - {0}")]
    Io(String),
}

impl AppError {
    pub fn validation<M: Into<String>>(message: M) -> Self {
        Self::Validation(message.into())
    }

    pub fn network<M: Into<String>, D: Into<String>>(message: M, detail: D) -> Self {
        Self::Network {
            message: message.into(),
            detail: detail.into(),
        }
    }

    pub fn http(status: u16, body: ResponseBody) -> Self {
        Self::Http { status, body }
    }

    pub fn unexpected<M: Into<String>>(message: M) -> Self {
        Self::Unexpected(message.into())
    }

    pub fn invalid_data<M: Into<String>>(message: M) -> Self {
        Self::InvalidData(message.into())
    }

    pub fn io<M: Into<String>>(message: M) -> Self {
        Self::Io(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Network { .. } => "network",
            Self::Http { .. } => "http",
            Self::Unexpected(_) => "unexpected",
            Self::InvalidData(_) => "invalid_data",
            Self::Io(_) => "io_error",
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
