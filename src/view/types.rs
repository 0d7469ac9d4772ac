use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A GitHub repository as handed to the view pipeline.
///
/// Built once by a [`crate::source::RepositorySource`] and never modified
/// afterwards; the pipeline only ever borrows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// GitHub's numeric repository id, unique within a collection
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    /// Link to the repository on github.com
    pub url: String,
    pub stars: u64,
    pub forks: u64,
    /// Primary language; `None` means GitHub could not classify it
    pub language: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub topics: Vec<String>,
}

impl Repository {
    /// Create a repository with only the required fields set
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            url: String::new(),
            stars: 0,
            forks: 0,
            language: None,
            updated_at: None,
            topics: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_stars(mut self, stars: u64) -> Self {
        self.stars = stars;
        self
    }

    pub fn with_forks(mut self, forks: u64) -> Self {
        self.forks = forks;
        self
    }

    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    pub fn with_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topics = topics.into_iter().map(Into::into).collect();
        self
    }

    /// The language label, treating an empty string like a missing one
    pub fn language_label(&self) -> Option<&str> {
        self.language.as_deref().filter(|l| !l.is_empty())
    }

    /// Case-insensitive substring match against name or description.
    /// `needle` must already be lowercased.
    pub(crate) fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
    }
}
