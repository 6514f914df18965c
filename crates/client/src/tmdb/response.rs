//! TMDB search response types.

use serde::{Deserialize, Serialize};

/// Raw search response from TMDB.
///
/// Only the fields the gateway forwards are kept; the rest of TMDB's payload
/// is dropped on deserialization.
#[derive(Debug, Deserialize)]
pub struct TmdbSearchResponse {
    #[serde(default)]
    pub results: Vec<ScreenItem>,
    #[serde(default)]
    pub total_results: u32,
}

/// One movie or TV result.
///
/// TMDB names the title `title` for movies and `name` for TV, and the date
/// `release_date` vs `first_air_date`; the aliases fold both shapes into one
/// item so the two endpoints serialize identically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenItem {
    pub id: u64,
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default, alias = "first_air_date")]
    pub release_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOVIE_FIXTURE: &str = r#"{
        "page": 1,
        "results": [
            {
                "id": 438631,
                "title": "Dune",
                "poster_path": "/d5NXSklXo0qyIYkgV94XAgMIckC.jpg",
                "release_date": "2021-09-15",
                "overview": "Paul Atreides, a brilliant and gifted young man..."
            }
        ],
        "total_pages": 3,
        "total_results": 47
    }"#;

    const TV_FIXTURE: &str = r#"{
        "page": 1,
        "results": [
            {
                "id": 90228,
                "name": "Dune: Prophecy",
                "poster_path": "/5B8Cf7S1vyrT8rBq9iT4jCBEqpy.jpg",
                "first_air_date": "2024-11-17",
                "overview": "Sisters Valya and Tula Harkonnen..."
            }
        ],
        "total_pages": 1,
        "total_results": 2
    }"#;

    #[test]
    fn test_deserialize_movie_result() {
        let response: TmdbSearchResponse = serde_json::from_str(MOVIE_FIXTURE).unwrap();
        assert_eq!(response.total_results, 47);
        assert_eq!(response.results.len(), 1);

        let item = &response.results[0];
        assert_eq!(item.id, 438631);
        assert_eq!(item.title, "Dune");
        assert_eq!(item.release_date.as_deref(), Some("2021-09-15"));
    }

    #[test]
    fn test_tv_aliases_fold_into_same_shape() {
        let response: TmdbSearchResponse = serde_json::from_str(TV_FIXTURE).unwrap();
        let item = &response.results[0];
        assert_eq!(item.title, "Dune: Prophecy");
        assert_eq!(item.release_date.as_deref(), Some("2024-11-17"));

        let json = serde_json::to_value(item).unwrap();
        assert_eq!(json["title"], "Dune: Prophecy");
        assert_eq!(json["release_date"], "2024-11-17");
    }

    #[test]
    fn test_missing_optional_fields() {
        let json = r#"{"results": [{"id": 1, "title": "Untitled"}], "total_results": 1}"#;
        let response: TmdbSearchResponse = serde_json::from_str(json).unwrap();
        let item = &response.results[0];
        assert!(item.poster_path.is_none());
        assert!(item.release_date.is_none());
        assert!(item.overview.is_none());
    }

    #[test]
    fn test_empty_response() {
        let response: TmdbSearchResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(response.results.is_empty());
        assert_eq!(response.total_results, 0);
    }
}
