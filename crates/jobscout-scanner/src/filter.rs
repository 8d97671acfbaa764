use jobscout_core::RoleFilter;
use std::ops::Range;

/// Accepted character count of a generic listing's visible text.
pub const GENERIC_TEXT_LEN: Range<usize> = 4..150;

/// Accepted character count of a Netflix listing's text, strictly between 5 and 100.
pub const NETFLIX_TEXT_LEN: Range<usize> = 6..100;

/// Case-insensitive substring match against the active role keywords.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordFilter {
    keywords: Vec<String>,
    lowered: Vec<String>,
}

impl KeywordFilter {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(Into::into)
            .filter(|k| !k.trim().is_empty())
            .collect();
        let lowered = keywords.iter().map(|k| k.trim().to_lowercase()).collect();
        Self { keywords, lowered }
    }

    /// Keywords of the active role filters, in stored order.
    pub fn from_roles(roles: &[RoleFilter]) -> Self {
        Self::new(
            roles
                .iter()
                .filter(|role| role.active)
                .map(|role| role.keyword.clone()),
        )
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// The first keyword, in list order, contained in `text`.
    pub fn first_match(&self, text: &str) -> Option<&str> {
        let haystack = text.to_lowercase();
        self.lowered
            .iter()
            .position(|needle| haystack.contains(needle.as_str()))
            .map(|index| self.keywords[index].as_str())
    }

    pub fn matches(&self, text: &str) -> bool {
        self.first_match(text).is_some()
    }
}

/// Whether `text` has a character count inside `bounds`.
pub fn length_within(text: &str, bounds: &Range<usize>) -> bool {
    bounds.contains(&text.chars().count())
}
