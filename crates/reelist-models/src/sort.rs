use serde::{Deserialize, Serialize};

/// Presentation order for a watchlist view. Sorting never mutates the
/// stored list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SortBy {
    /// Insertion order, newest additions last.
    #[default]
    Added,
    /// Rating descending; ties keep insertion order, unrated items sort last.
    Rating,
}

impl std::str::FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "added" | "recent" => Ok(SortBy::Added),
            "rating" => Ok(SortBy::Rating),
            _ => Err(format!("Invalid sort order: {}. Use 'added' or 'rating'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("rating".parse::<SortBy>().unwrap(), SortBy::Rating);
        assert_eq!("recent".parse::<SortBy>().unwrap(), SortBy::Added);
        assert!("alphabetical".parse::<SortBy>().is_err());
    }
}
