use super::types::{GetMovieByIdRequest, SearchMoviesRequest};
use std::fmt;

/// OMDb API key. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Ordered query string parameters for one OMDb call
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    fn push(&mut self, key: &'static str, value: impl Into<String>) {
        self.pairs.push((key, value.into()));
    }

    /// Look up the first value for `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    /// Percent-encoded `k=v&k=v` form
    #[must_use]
    pub fn encode(&self) -> String {
        Self::join(self.pairs.iter().map(|(k, v)| (*k, v.as_str())))
    }

    /// Same as [`encode`](Self::encode) with the API key masked, for logs
    #[must_use]
    pub fn redacted(&self) -> String {
        Self::join(self.pairs.iter().map(|(k, v)| {
            if *k == QueryBuilder::API_KEY_PARAM {
                (*k, "***")
            } else {
                (*k, v.as_str())
            }
        }))
    }

    fn join<'a>(pairs: impl Iterator<Item = (&'a str, &'a str)>) -> String {
        pairs
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Turns validated requests into OMDb query parameters
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    api_key: ApiKey,
}

impl QueryBuilder {
    pub const API_KEY_PARAM: &'static str = "apikey";

    #[must_use]
    pub const fn new(api_key: ApiKey) -> Self {
        Self { api_key }
    }

    /// `apikey`, `s`, optional `type`, `page`
    #[must_use]
    pub fn search_movies(&self, req: &SearchMoviesRequest) -> QueryParams {
        let mut params = self.base();
        params.push("s", req.query.as_str());
        if !req.kind.is_empty() {
            params.push("type", req.kind.as_str());
        }
        params.push("page", req.page.to_string());
        params
    }

    /// `apikey`, `i`
    #[must_use]
    pub fn get_movie_by_id(&self, req: &GetMovieByIdRequest) -> QueryParams {
        let mut params = self.base();
        params.push("i", req.id.as_str());
        params
    }

    fn base(&self) -> QueryParams {
        let mut params = QueryParams::default();
        params.push(Self::API_KEY_PARAM, self.api_key.expose());
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> QueryBuilder {
        QueryBuilder::new(ApiKey::new("fake_key"))
    }

    #[test]
    fn test_search_params_without_kind() {
        let params = builder().search_movies(&SearchMoviesRequest::new("Bat").with_page(3));
        assert_eq!(params.encode(), "apikey=fake_key&s=Bat&page=3");
        assert_eq!(params.get("type"), None);
    }

    #[test]
    fn test_search_params_with_kind_keep_order() {
        let req = SearchMoviesRequest::new("Bat").with_kind("series");
        let keys: Vec<_> = builder()
            .search_movies(&req)
            .pairs()
            .iter()
            .map(|(k, _)| *k)
            .collect();
        assert_eq!(keys, ["apikey", "s", "type", "page"]);
    }

    #[test]
    fn test_get_by_id_params() {
        let params = builder().get_movie_by_id(&GetMovieByIdRequest::new("tt4853102"));
        assert_eq!(params.encode(), "apikey=fake_key&i=tt4853102");
    }

    #[test]
    fn test_values_are_percent_encoded() {
        let params = builder().search_movies(&SearchMoviesRequest::new("Mad Max: Fury&Road"));
        assert_eq!(params.get("s"), Some("Mad Max: Fury&Road"));
        assert!(params.encode().contains("s=Mad%20Max%3A%20Fury%26Road"));
    }

    #[test]
    fn test_redacted_hides_key() {
        let params = builder().get_movie_by_id(&GetMovieByIdRequest::new("tt1"));
        assert_eq!(params.redacted(), "apikey=%2A%2A%2A&i=tt1");
        assert!(!format!("{:?}", builder()).contains("fake_key"));
    }
}
