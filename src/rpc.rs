//! Call outcome classification at the RPC boundary.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::omdb::OmdbError;

/// Status codes the proxy can answer with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Code {
    InvalidArgument,
    Internal,
}

impl Code {
    /// HTTP status carrying this code on the JSON surface
    #[must_use]
    pub const fn http_status(self) -> StatusCode {
        match self {
            Self::InvalidArgument => StatusCode::BAD_REQUEST,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed call: code plus human readable message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub code: Code,
    pub message: String,
}

impl Status {
    pub fn new(code: Code, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(Code::InvalidArgument, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(Code::Internal, message)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for Status {}

impl From<OmdbError> for Status {
    fn from(err: OmdbError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

/// Body of a failed call on the JSON surface
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: u16,
    pub status: Code,
    pub message: String,
    pub data: Option<()>,
}

impl IntoResponse for Status {
    fn into_response(self) -> Response {
        let http = self.code.http_status();
        let body = ErrorBody {
            code: http.as_u16(),
            status: self.code,
            message: self.message,
            data: None,
        };
        (http, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::omdb::Operation;

    #[test]
    fn test_only_invalid_argument_stays_invalid_argument() {
        let status: Status = OmdbError::InvalidArgument("please provide a movie id".into()).into();
        assert_eq!(status, Status::invalid_argument("please provide a movie id"));

        let status: Status = OmdbError::UpstreamReported {
            operation: Operation::GetMovieById,
            message: "Movie not found!".into(),
        }
        .into();
        assert_eq!(status, Status::internal("error GetMovieByID: Movie not found!"));

        let status: Status = OmdbError::UpstreamStatus { status: 503 }.into();
        assert_eq!(status, Status::internal("OMDB responded with HTTP 503"));
    }

    #[test]
    fn test_http_mapping() {
        assert_eq!(Code::InvalidArgument.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(Code::Internal.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            serde_json::to_string(&Code::InvalidArgument).unwrap(),
            "\"INVALID_ARGUMENT\""
        );
    }
}
