use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    routing::get,
};

use crate::{
    ApiResponse, ApiResult, Ctx,
    omdb::{GetMovieByIdRequest, MovieDetail, SearchMoviesRequest, SearchResult},
    rpc::Status,
};

/// GetMovieByID
/// GET /api/movies?id=...
async fn get_movie_by_id(
    State(ctx): State<Ctx>,
    query: Result<Query<GetMovieByIdRequest>, QueryRejection>,
) -> ApiResult<MovieDetail> {
    let Query(req) = query.map_err(|e| Status::invalid_argument(e.body_text()))?;
    let movie = ctx.omdb.get_movie_by_id(&req).await?;

    Ok(Json(ApiResponse::ok("Movie retrieved", movie)))
}

/// SearchMovies
/// GET /api/movies/search?query=...&type=...&page=...
async fn search_movies(
    State(ctx): State<Ctx>,
    query: Result<Query<SearchMoviesRequest>, QueryRejection>,
) -> ApiResult<SearchResult> {
    let Query(req) = query.map_err(|e| Status::invalid_argument(e.body_text()))?;
    let result = ctx.omdb.search_movies(&req).await?;

    Ok(Json(ApiResponse::ok("Search completed", result)))
}

pub fn mount() -> Router<Ctx> {
    Router::new()
        .route("/movies", get(get_movie_by_id))
        .route("/movies/search", get(search_movies))
}
