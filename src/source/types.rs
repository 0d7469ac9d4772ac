use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::{DevhubError, Result};
use crate::view::Repository;

/// Public GitHub profile fields shown above the repository list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    #[serde(default)]
    pub html_url: Option<String>,
}

impl Profile {
    /// Display name, falling back to the login
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(self.login.as_str())
    }
}

/// A user's profile (when known) and their repositories
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileSnapshot {
    pub profile: Option<Profile>,
    pub repositories: Vec<Repository>,
}

/// A repository entry exactly as the GitHub REST API returns it.
///
/// Every field is optional here so validation can say which one is
/// missing instead of failing the whole document.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawRepository {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "url")]
    pub html_url: Option<String>,
    #[serde(default)]
    pub stargazers_count: Option<u64>,
    #[serde(default)]
    pub forks_count: Option<u64>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub topics: Option<Vec<String>>,
}

impl RawRepository {
    /// Check required fields and convert. `index` is only used for errors.
    pub fn validate(self, index: usize) -> Result<Repository> {
        let id = self
            .id
            .ok_or_else(|| DevhubError::invalid_repository(index, "missing field `id`"))?;

        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| DevhubError::invalid_repository(index, "missing field `name`"))?;

        let updated_at = self
            .updated_at
            .map(|ts| {
                DateTime::parse_from_rfc3339(&ts)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|e| {
                        DevhubError::invalid_repository(
                            index,
                            format!("`updated_at` '{}' of '{}' is not a timestamp: {}", ts, name, e),
                        )
                    })
            })
            .transpose()?;

        Ok(Repository {
            id,
            name,
            description: self.description,
            url: self.html_url.unwrap_or_default(),
            stars: self.stargazers_count.unwrap_or(0),
            forks: self.forks_count.unwrap_or(0),
            language: self.language.filter(|l| !l.is_empty()),
            updated_at,
            topics: self.topics.unwrap_or_default(),
        })
    }
}
