use serde::Deserialize;

use reelist_models::CatalogItem;

/// Catalog API base URL
pub const API_BASE: &str = "https://api.themoviedb.org/3";
/// Image CDN prefix for shelf-sized backdrops
pub const IMAGE_BASE_W500: &str = "https://image.tmdb.org/t/p/w500";

/// A browsable shelf of the catalog.
///
/// These map one-to-one onto the category tokens the routes use: plain
/// tokens hit the movie endpoints, `tv_`-prefixed tokens hit the TV
/// variants, and `trending` on either side is a special-cased endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    NowPlaying,
    Popular,
    TopRated,
    Upcoming,
    Trending,
    TvPopular,
    TvTopRated,
    TvOnTheAir,
    TvAiringToday,
    TvTrending,
}

impl Category {
    /// Request path relative to [`API_BASE`].
    pub fn path(&self) -> &'static str {
        match self {
            Category::NowPlaying => "/movie/now_playing",
            Category::Popular => "/movie/popular",
            Category::TopRated => "/movie/top_rated",
            Category::Upcoming => "/movie/upcoming",
            Category::Trending => "/trending/movie/week",
            Category::TvPopular => "/tv/popular",
            Category::TvTopRated => "/tv/top_rated",
            Category::TvOnTheAir => "/tv/on_the_air",
            Category::TvAiringToday => "/tv/airing_today",
            Category::TvTrending => "/trending/tv/week",
        }
    }

    /// The route token naming this shelf.
    pub fn token(&self) -> &'static str {
        match self {
            Category::NowPlaying => "now_playing",
            Category::Popular => "popular",
            Category::TopRated => "top_rated",
            Category::Upcoming => "upcoming",
            Category::Trending => "trending",
            Category::TvPopular => "tv_popular",
            Category::TvTopRated => "tv_top_rated",
            Category::TvOnTheAir => "tv_on_the_air",
            Category::TvAiringToday => "tv_airing_today",
            Category::TvTrending => "tv_trending",
        }
    }

    /// The trending endpoints take no language/page query parameters.
    pub fn is_trending(&self) -> bool {
        matches!(self, Category::Trending | Category::TvTrending)
    }

    /// The shelf set of the home view, with display headings.
    pub fn home_shelves() -> [(&'static str, Category); 5] {
        [
            ("Now Playing", Category::NowPlaying),
            ("Blockbuster Movies", Category::Popular),
            ("Popular TV Shows", Category::TvPopular),
            ("New Releases", Category::Upcoming),
            ("Trending Now", Category::Trending),
        ]
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "now_playing" => Ok(Category::NowPlaying),
            "popular" => Ok(Category::Popular),
            "top_rated" => Ok(Category::TopRated),
            "upcoming" => Ok(Category::Upcoming),
            "trending" => Ok(Category::Trending),
            "tv_popular" => Ok(Category::TvPopular),
            "tv_top_rated" => Ok(Category::TvTopRated),
            "tv_on_the_air" => Ok(Category::TvOnTheAir),
            "tv_airing_today" => Ok(Category::TvAiringToday),
            "tv_trending" => Ok(Category::TvTrending),
            _ => Err(format!(
                "Unknown category: {}. Known categories: now_playing, popular, top_rated, \
                 upcoming, trending, tv_popular, tv_top_rated, tv_on_the_air, \
                 tv_airing_today, tv_trending",
                s
            )),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// Listing responses wrap the items in a `results` array; an absent array
/// degrades to an empty shelf.
#[derive(Debug, Deserialize)]
pub struct ListingResponse {
    #[serde(default)]
    pub results: Vec<CatalogItem>,
}

#[derive(Debug, Deserialize)]
pub struct CreditsResponse {
    #[serde(default)]
    pub cast: Vec<reelist_models::CastMember>,
}

#[derive(Debug, Deserialize)]
pub struct VideosResponse {
    #[serde(default)]
    pub results: Vec<reelist_models::VideoClip>,
}

/// Full image URL for a backdrop/poster path, if any.
pub fn image_url(path: Option<&str>) -> Option<String> {
    path.map(|p| format!("{}{}", IMAGE_BASE_W500, p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_tokens_roundtrip() {
        for (_, category) in Category::home_shelves() {
            assert_eq!(category.token().parse::<Category>().unwrap(), category);
        }
        assert_eq!("tv_trending".parse::<Category>().unwrap(), Category::TvTrending);
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        assert!("tv_".parse::<Category>().is_err());
        assert!("watchlist".parse::<Category>().is_err());
    }

    #[test]
    fn test_trending_uses_special_paths() {
        assert_eq!(Category::Trending.path(), "/trending/movie/week");
        assert_eq!(Category::TvTrending.path(), "/trending/tv/week");
        assert!(Category::Trending.is_trending());
        assert!(!Category::Popular.is_trending());
    }

    #[test]
    fn test_listing_without_results_degrades_to_empty() {
        let resp: ListingResponse =
            serde_json::from_str(r#"{"status_message": "rate limited"}"#).unwrap();
        assert!(resp.results.is_empty());
    }

    #[test]
    fn test_image_url() {
        assert_eq!(
            image_url(Some("/abc.jpg")).as_deref(),
            Some("https://image.tmdb.org/t/p/w500/abc.jpg")
        );
        assert_eq!(image_url(None), None);
    }
}
