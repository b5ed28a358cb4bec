//! Structural checks on inbound requests, run before anything touches the network.
//!
//! Rules are evaluated in a fixed order and the first failure wins, so a
//! request that breaks several rules always reports the same one.

use super::{
    OmdbError, Result,
    types::{GetMovieByIdRequest, MovieKind, SearchMoviesRequest},
};
use std::ops::RangeInclusive;

pub const MIN_QUERY_LEN: usize = 3;
pub const PAGE_RANGE: RangeInclusive<u64> = 1..=100;

pub fn validate_search_movies(req: &SearchMoviesRequest) -> Result<()> {
    if req.query.is_empty() {
        return Err(invalid("please provide a movie title to query"));
    }
    // Counted in bytes, not chars.
    if req.query.len() < MIN_QUERY_LEN {
        return Err(invalid(
            "please provide at least 3 characters of movie title to query",
        ));
    }
    if !req.kind.is_empty() && MovieKind::from_wire(&req.kind).is_none() {
        return Err(invalid(
            "allowed movie types you can search are: movie, series, episode",
        ));
    }
    if !PAGE_RANGE.contains(&req.page) {
        return Err(invalid("page value can only be 1-100"));
    }
    Ok(())
}

pub fn validate_get_movie_by_id(req: &GetMovieByIdRequest) -> Result<()> {
    if req.id.is_empty() {
        return Err(invalid("please provide a movie id"));
    }
    Ok(())
}

fn invalid(message: &str) -> OmdbError {
    OmdbError::InvalidArgument(message.to_string())
}
