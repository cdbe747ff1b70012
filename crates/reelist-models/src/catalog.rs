use serde::{Deserialize, Serialize};

/// One row of a catalog listing (shelf, trending, or search results).
///
/// The catalog API omits most of these fields freely, so everything except
/// the id is optional and absent values deserialize to `None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogItem {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>, // TV listings use `name` instead of `title`
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
}

impl CatalogItem {
    /// Best available display title across the movie/TV field split.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .or(self.original_title.as_deref())
            .unwrap_or("(untitled)")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// Full detail record for a single catalog item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl MovieDetails {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("(untitled)")
    }

    pub fn release_year(&self) -> Option<&str> {
        self.release_date.as_deref().and_then(|d| d.get(..4))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CastMember {
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// A video attached to a catalog item (trailer, teaser, clip).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VideoClip {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub clip_type: String,
    #[serde(default)]
    pub published_at: Option<String>,
}

impl VideoClip {
    /// Watch URL for the clip. Only YouTube-hosted clips have one.
    pub fn watch_url(&self) -> Option<String> {
        if self.site.eq_ignore_ascii_case("youtube") && !self.key.is_empty() {
            Some(format!("https://www.youtube.com/watch?v={}", self.key))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_title_falls_back_to_tv_name() {
        let item: CatalogItem =
            serde_json::from_str(r#"{"id": 1, "name": "Some Show"}"#).unwrap();
        assert_eq!(item.display_title(), "Some Show");
    }

    #[test]
    fn test_catalog_item_tolerates_sparse_payloads() {
        let item: CatalogItem = serde_json::from_str(r#"{"id": 99}"#).unwrap();
        assert_eq!(item.id, 99);
        assert_eq!(item.vote_average, None);
        assert_eq!(item.display_title(), "(untitled)");
    }

    #[test]
    fn test_release_year() {
        let details: MovieDetails =
            serde_json::from_str(r#"{"id": 1, "release_date": "2019-07-12"}"#).unwrap();
        assert_eq!(details.release_year(), Some("2019"));
    }

    #[test]
    fn test_watch_url_only_for_youtube() {
        let yt = VideoClip {
            name: "Official Trailer".to_string(),
            key: "abc123".to_string(),
            site: "YouTube".to_string(),
            clip_type: "Trailer".to_string(),
            published_at: None,
        };
        assert_eq!(
            yt.watch_url().as_deref(),
            Some("https://www.youtube.com/watch?v=abc123")
        );

        let vimeo = VideoClip { site: "Vimeo".to_string(), ..yt };
        assert_eq!(vimeo.watch_url(), None);
    }
}
