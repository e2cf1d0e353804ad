//! Movie search result model.
//!
//! These types mirror the JSON returned by the TMDB search endpoint. They are
//! immutable once decoded and are replaced wholesale on every completed fetch.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One movie from a search result page.
///
/// TMDB omits or nulls several fields for obscure titles, so textual fields
/// default to empty strings and image paths are optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub overview: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
}

impl Movie {
    /// Returns the four-digit release year, if the release date parses.
    ///
    /// ```
    /// use zinema::Movie;
    ///
    /// let movie: Movie = serde_json::from_str(
    ///     r#"{"id": 1, "title": "Heat", "release_date": "1995-12-15"}"#,
    /// ).unwrap();
    /// assert_eq!(movie.release_year(), Some(1995));
    /// ```
    #[must_use]
    pub fn release_year(&self) -> Option<i32> {
        use chrono::Datelike;

        NaiveDate::parse_from_str(&self.release_date, "%Y-%m-%d")
            .ok()
            .map(|date| date.year())
    }

    /// Formats the rating the way the detail view shows it, e.g. `7.3/10`.
    #[must_use]
    pub fn rating_label(&self) -> String {
        format!("{:.1}/10", self.vote_average)
    }

    /// Full poster URL for the given image base and size segment.
    #[must_use]
    pub fn poster_url(&self, image_base_url: &str, size: &str) -> Option<String> {
        self.poster_path
            .as_deref()
            .map(|path| image_url(image_base_url, size, path))
    }

    /// Full backdrop URL at original resolution.
    #[must_use]
    pub fn backdrop_url(&self, image_base_url: &str) -> Option<String> {
        self.backdrop_path
            .as_deref()
            .map(|path| image_url(image_base_url, "original", path))
    }
}

fn image_url(base: &str, size: &str, path: &str) -> String {
    format!(
        "{}/{}/{}",
        base.trim_end_matches('/'),
        size,
        path.trim_start_matches('/')
    )
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// One page of search results plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPage {
    pub page: u32,
    #[serde(default)]
    pub results: Vec<Movie>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

impl ResultPage {
    /// Returns `true` if the page carries no movies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_nulls_and_missing_fields() {
        let movie: Movie = serde_json::from_str(
            r#"{"id": 42, "title": "Obscure", "overview": null, "poster_path": null}"#,
        )
        .unwrap();

        assert_eq!(movie.overview, "");
        assert_eq!(movie.release_date, "");
        assert_eq!(movie.release_year(), None);
        assert!(movie.poster_path.is_none());
        assert_eq!(movie.vote_average, 0.0);
    }

    #[test]
    fn builds_image_urls_without_double_slashes() {
        let movie = Movie {
            id: 1,
            title: "Batman".into(),
            overview: String::new(),
            release_date: "1989-06-23".into(),
            vote_average: 7.23,
            poster_path: Some("/poster.jpg".into()),
            backdrop_path: Some("/backdrop.jpg".into()),
        };

        assert_eq!(
            movie.poster_url("https://image.tmdb.org/t/p/", "w500").as_deref(),
            Some("https://image.tmdb.org/t/p/w500/poster.jpg")
        );
        assert_eq!(
            movie.backdrop_url("https://image.tmdb.org/t/p").as_deref(),
            Some("https://image.tmdb.org/t/p/original/backdrop.jpg")
        );
        assert_eq!(movie.rating_label(), "7.2/10");
    }
}
