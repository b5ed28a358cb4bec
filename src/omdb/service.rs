use super::{
    OmdbError, Result,
    decode::decode,
    http::OmdbTransport,
    query::QueryBuilder,
    schema::{translate_movie_detail, translate_search_result},
    types::{GetMovieByIdRequest, MovieDetail, Operation, SearchMoviesRequest, SearchResult},
    validate::{validate_get_movie_by_id, validate_search_movies},
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Runs the validate, query, fetch, decode, translate pipeline for each call.
///
/// Holds no per-request state; one instance serves every concurrent call.
#[derive(Clone)]
pub struct OmdbService {
    queries: QueryBuilder,
    transport: Arc<dyn OmdbTransport>,
}

impl OmdbService {
    #[must_use]
    pub fn new(queries: QueryBuilder, transport: Arc<dyn OmdbTransport>) -> Self {
        Self { queries, transport }
    }

    /// SearchMovies
    pub async fn search_movies(&self, req: &SearchMoviesRequest) -> Result<SearchResult> {
        validate_search_movies(req)?;
        info!(
            "SearchMovies: query={:?} type={:?} page={}",
            req.query, req.kind, req.page
        );

        let params = self.queries.search_movies(req);
        let body = self.transport.fetch(&params).await.inspect_err(|e| {
            report(Operation::SearchMovies, e);
        })?;

        let result = translate_search_result(decode(&body)).inspect_err(|e| {
            report(Operation::SearchMovies, e);
        })?;

        debug!(
            "SearchMovies: {} of {} results",
            result.movies.len(),
            result.total_results
        );
        Ok(result)
    }

    /// GetMovieByID
    pub async fn get_movie_by_id(&self, req: &GetMovieByIdRequest) -> Result<MovieDetail> {
        validate_get_movie_by_id(req)?;
        info!("GetMovieByID: id={:?}", req.id);

        let params = self.queries.get_movie_by_id(req);
        let body = self.transport.fetch(&params).await.inspect_err(|e| {
            report(Operation::GetMovieById, e);
        })?;

        translate_movie_detail(&req.id, decode(&body)).inspect_err(|e| {
            report(Operation::GetMovieById, e);
        })
    }
}

fn report(operation: Operation, err: &OmdbError) {
    if err.is_schema_drift() {
        warn!("{operation}: OMDb payload no longer matches the expected schema: {err}");
    } else {
        warn!("{operation} failed: {err}");
    }
}
