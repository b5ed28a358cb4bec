mod decode;
mod http;
mod query;
mod schema;
mod service;
mod types;
mod validate;


pub use decode::{DecodedPayload, decode};
pub use http::{HttpTransport, OmdbTransport};
pub use query::{ApiKey, QueryBuilder, QueryParams};
pub use schema::{FieldSpec, Shape, translate_movie_detail, translate_search_result};
pub use service::OmdbService;
pub use types::{
    GetMovieByIdRequest, MovieDetail, MovieKind, MovieSummary, Operation, SearchMoviesRequest,
    SearchResult,
};
pub use validate::{validate_get_movie_by_id, validate_search_movies};

use crate::rpc::Code;

/// OMDb proxy result type
pub type Result<T> = std::result::Result<T, OmdbError>;

/// Everything that can go wrong between an inbound call and a typed response
#[derive(Debug, thiserror::Error)]
pub enum OmdbError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("error {operation}: {message}")]
    UpstreamReported {
        operation: Operation,
        message: String,
    },

    #[error("non-existent {field} field in OMDB {operation} proxy")]
    MissingField { operation: Operation, field: String },

    #[error("unexpected value for {field} field in OMDB {operation} proxy: {value}")]
    UnexpectedFieldType {
        operation: Operation,
        field: String,
        value: String,
    },

    #[error("can't parse {field} field into number in OMDB {operation} proxy: {value}")]
    UnparseableNumericField {
        operation: Operation,
        field: String,
        value: String,
    },

    /// Never holds a request URL; those carry the API key
    #[error("OMDB request failed: {0}")]
    Transport(reqwest::Error),

    #[error("OMDB responded with HTTP {status}")]
    UpstreamStatus { status: u16 },
}

impl OmdbError {
    /// Status code this error surfaces as at the RPC boundary
    #[must_use]
    pub const fn code(&self) -> Code {
        match self {
            Self::InvalidArgument(_) => Code::InvalidArgument,
            _ => Code::Internal,
        }
    }

    /// Whether the failure came from the shape of the OMDb payload
    #[must_use]
    pub const fn is_schema_drift(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. }
                | Self::UnexpectedFieldType { .. }
                | Self::UnparseableNumericField { .. }
        )
    }
}
