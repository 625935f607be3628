use seed::prelude::*;
use shared::LocationRecord;
use thiserror::Error;

/// Queries shorter than this never reach the search service.
pub const MIN_QUERY_CHARS: usize = 3;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error("failed to reach search service: {0}")]
    Transport(String),
    #[error("search service rejected the query: {0}")]
    Status(String),
    #[error("invalid search payload: {0}")]
    Decode(String),
}

pub fn is_searchable(query: &str) -> bool {
    query.chars().count() >= MIN_QUERY_CHARS
}

/// `GET <root>?q=<query>` with the query form-encoded.
pub fn search_url(root: &str, query: &str) -> String {
    let encoded = form_urlencoded::Serializer::new(String::new())
        .append_pair("q", query)
        .finish();
    format!("{root}?{encoded}")
}

pub async fn search_bases(root: &str, query: &str) -> Result<Vec<LocationRecord>, SearchError> {
    let url = search_url(root, query);
    tracing::debug!("searching bases: {url}");

    let raw = Request::new(url)
        .method(Method::Get)
        .fetch()
        .await
        .map_err(|err| SearchError::Transport(format!("{err:?}")))?;
    let response = raw
        .check_status()
        .map_err(|err| SearchError::Status(format!("{err:?}")))?;
    response
        .json::<Vec<LocationRecord>>()
        .await
        .map_err(|err| SearchError::Decode(format!("{err:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold() {
        assert!(!is_searchable(""));
        assert!(!is_searchable("ab"));
        assert!(is_searchable("abc"));
        // counts characters, not bytes
        assert!(!is_searchable("éé"));
    }

    #[test]
    fn test_search_url_encodes_query() {
        assert_eq!(
            search_url("http://127.0.0.1:5000/search", "fort bragg"),
            "http://127.0.0.1:5000/search?q=fort+bragg"
        );
        assert_eq!(
            search_url("http://127.0.0.1:5000/search", "a&b=c"),
            "http://127.0.0.1:5000/search?q=a%26b%3Dc"
        );
    }

    #[test]
    fn test_error_messages() {
        let err = SearchError::Decode("expected array".into());
        assert_eq!(err.to_string(), "invalid search payload: expected array");
    }
}
