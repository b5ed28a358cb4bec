use serde::{Deserialize, Serialize};
use std::fmt;

/// The two calls this proxy exposes, named as they appear on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    SearchMovies,
    GetMovieById,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SearchMovies => write!(f, "SearchMovies"),
            Self::GetMovieById => write!(f, "GetMovieByID"),
        }
    }
}

/// Media type filter accepted by OMDb search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovieKind {
    Movie,
    Series,
    Episode,
}

impl MovieKind {
    pub const ALL: [Self; 3] = [Self::Movie, Self::Series, Self::Episode];

    /// Parse the lowercase wire name
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "series",
            Self::Episode => "episode",
        }
    }
}

impl fmt::Display for MovieKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// GetMovieByID request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetMovieByIdRequest {
    /// IMDb identifier, e.g. `tt4853102`
    pub id: String,
}

impl GetMovieByIdRequest {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// SearchMovies request
///
/// Unset fields default the way an unset protobuf field would: empty query,
/// no type filter and page `0`, which validation rejects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchMoviesRequest {
    /// Title to search for
    pub query: String,
    /// Optional filter: movie, series or episode. Empty means no filter.
    #[serde(rename = "type")]
    pub kind: String,
    /// Result page, 1-100
    pub page: u64,
}

impl SearchMoviesRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            kind: String::new(),
            page: 1,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub const fn with_page(mut self, page: u64) -> Self {
        self.page = page;
        self
    }
}

/// One hit from a title search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: String,
    pub title: String,
    /// Kept as OMDb sends it; ranges such as `2005–2008` are common for series
    pub year: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub poster_url: String,
}

/// Full record for a single title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub id: String,
    pub title: String,
    pub year: String,
    pub rated: String,
    /// Comma separated, exactly as OMDb sends it
    pub genre: String,
    pub plot: String,
    pub director: String,
    pub actors: Vec<String>,
    pub language: String,
    pub country: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub poster_url: String,
}

/// A page of search hits
///
/// `total_results` is whatever OMDb reported for the whole query and is not
/// reconciled with `movies.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub total_results: u64,
    pub movies: Vec<MovieSummary>,
}
