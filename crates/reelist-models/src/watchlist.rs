use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogItem, MovieDetails};

/// One saved catalog item in a watchlist.
///
/// The id is kept as a string: catalog payloads deliver ids as numbers, but
/// older persisted lists may carry them as strings, so membership checks go
/// through [`normalize_id`] instead of comparing raw values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchlistEntry {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backdrop_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    pub date_added: DateTime<Utc>,
}

impl From<&MovieDetails> for WatchlistEntry {
    fn from(details: &MovieDetails) -> Self {
        Self {
            id: details.id.to_string(),
            title: details.display_title().to_string(),
            backdrop_path: details.backdrop_path.clone(),
            vote_average: details.vote_average,
            overview: details.overview.clone(),
            date_added: Utc::now(),
        }
    }
}

impl From<&CatalogItem> for WatchlistEntry {
    fn from(item: &CatalogItem) -> Self {
        Self {
            id: item.id.to_string(),
            title: item.display_title().to_string(),
            backdrop_path: item.backdrop_path.clone(),
            vote_average: item.vote_average,
            overview: item.overview.clone(),
            date_added: Utc::now(),
        }
    }
}

/// Canonical form of a catalog id for membership comparison.
///
/// Numeric ids collapse to their decimal form so `"042"`, `" 42 "` and `42`
/// all compare equal; anything non-numeric falls back to a trimmed,
/// lowercased string.
pub fn normalize_id(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.parse::<u64>() {
        Ok(n) => n.to_string(),
        Err(_) => trimmed.to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_id_numeric_forms() {
        assert_eq!(normalize_id("42"), "42");
        assert_eq!(normalize_id(" 42 "), "42");
        assert_eq!(normalize_id("042"), "42");
    }

    #[test]
    fn test_normalize_id_non_numeric() {
        assert_eq!(normalize_id(" TT0137523 "), "tt0137523");
    }

    #[test]
    fn test_entry_from_details() {
        let details: MovieDetails = serde_json::from_str(
            r#"{"id": 42, "title": "Blade Runner", "vote_average": 8.1}"#,
        )
        .unwrap();
        let entry = WatchlistEntry::from(&details);
        assert_eq!(entry.id, "42");
        assert_eq!(entry.title, "Blade Runner");
        assert_eq!(entry.vote_average, Some(8.1));
    }
}
