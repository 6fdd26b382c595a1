//! Filter controls shared by the management pages.

/// Active/inactive filter over managed records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 3] = [StatusFilter::All, StatusFilter::Active, StatusFilter::Inactive];

    pub fn key(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Active => "active",
            StatusFilter::Inactive => "inactive",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All Status",
            StatusFilter::Active => "Active",
            StatusFilter::Inactive => "Inactive",
        }
    }

    pub fn from_key(key: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|f| f.key() == key)
            .unwrap_or_default()
    }

    pub fn matches(self, active: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => active,
            StatusFilter::Inactive => !active,
        }
    }

    pub fn options() -> Vec<(String, String)> {
        Self::ALL
            .into_iter()
            .map(|f| (f.key().to_string(), f.label().to_string()))
            .collect()
    }
}

/// Case-insensitive substring match over any of `fields`. A blank query
/// matches everything.
pub fn matches_query(query: &str, fields: &[&str]) -> bool {
    let query = query.trim().to_lowercase();
    query.is_empty() || fields.iter().any(|f| f.to_lowercase().contains(&query))
}

/// Parse an `<select>` value holding an id, where `"all"` or anything else
/// non-numeric means no selection.
pub fn parse_id(value: &str) -> Option<i64> {
    value.parse().ok().filter(|id| *id > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_filter() {
        assert!(StatusFilter::All.matches(false));
        assert!(StatusFilter::Active.matches(true));
        assert!(!StatusFilter::Active.matches(false));
        assert!(StatusFilter::Inactive.matches(false));
        assert_eq!(StatusFilter::from_key("inactive"), StatusFilter::Inactive);
        assert_eq!(StatusFilter::from_key("bogus"), StatusFilter::All);
    }

    #[test]
    fn test_query_matching() {
        assert!(matches_query("", &["anything"]));
        assert!(matches_query("  ", &[]));
        assert!(matches_query("RUST", &["Intro", "learning rust"]));
        assert!(!matches_query("go", &["Rust", "C"]));
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("12"), Some(12));
        assert_eq!(parse_id("all"), None);
        assert_eq!(parse_id("0"), None);
    }
}
