use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::ALL_LANGUAGES;
use crate::utils::DevhubError;

/// Ordering applied to the filtered repository list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Most recently updated first
    #[default]
    #[serde(alias = "recency", alias = "by-recency")]
    Updated,
    /// Most stars first
    #[serde(alias = "by-stars")]
    Stars,
    /// Most forks first
    #[serde(alias = "by-forks")]
    Forks,
    /// Name A-Z
    #[serde(alias = "by-name")]
    Name,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [Self::Updated, Self::Stars, Self::Forks, Self::Name];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Updated => "updated",
            Self::Stars => "stars",
            Self::Forks => "forks",
            Self::Name => "name",
        }
    }

    /// Human-readable label for menus and summaries
    pub fn label(&self) -> &'static str {
        match self {
            Self::Updated => "Recently Updated",
            Self::Stars => "Most Stars",
            Self::Forks => "Most Forks",
            Self::Name => "Name A-Z",
        }
    }
}

impl FromStr for SortKey {
    type Err = DevhubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "updated" | "recency" | "by-recency" => Ok(Self::Updated),
            "stars" | "by-stars" => Ok(Self::Stars),
            "forks" | "by-forks" => Ok(Self::Forks),
            "name" | "by-name" => Ok(Self::Name),
            _ => Err(DevhubError::InvalidSortKey(s.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which repositories to keep by primary language
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum LanguageFilter {
    #[default]
    All,
    /// Exact, case-sensitive language match
    Only(String),
}

impl LanguageFilter {
    pub fn parse(value: &str) -> Self {
        if value.is_empty() || value == ALL_LANGUAGES {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_LANGUAGES,
            Self::Only(language) => language,
        }
    }

    /// An unclassified repository never matches a concrete language
    pub fn matches(&self, language: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => language == Some(wanted.as_str()),
        }
    }
}

impl fmt::Display for LanguageFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for LanguageFilter {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

/// Snapshot of the user's search/sort/filter choices
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewParameters {
    pub search: String,
    pub language: LanguageFilter,
    pub sort: SortKey,
}

impl ViewParameters {
    /// Build parameters from raw user input, rejecting unknown sort keys
    pub fn new(search: &str, language: &str, sort: &str) -> Result<Self, DevhubError> {
        Ok(Self {
            search: search.to_string(),
            language: LanguageFilter::parse(language),
            sort: sort.parse()?,
        })
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<LanguageFilter>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn has_search(&self) -> bool {
        !self.search.is_empty()
    }
}
