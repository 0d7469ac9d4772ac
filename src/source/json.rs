use serde_json::Value;
use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::types::{Profile, ProfileSnapshot, RawRepository};
use super::RepositorySource;
use crate::constants::STDIN_PATH;
use crate::utils::{DevhubError, Result};
use crate::view::Repository;

/// Where a [`JsonSource`] reads its document from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonInput {
    Stdin,
    File(PathBuf),
    /// An in-memory document, mostly for embedding and tests
    Inline(String),
}

impl JsonInput {
    /// `-` selects stdin, anything else is a file path
    pub fn from_arg(arg: Option<&Path>) -> Self {
        match arg {
            None => Self::Stdin,
            Some(p) if p.as_os_str() == STDIN_PATH => Self::Stdin,
            Some(p) => Self::File(p.to_path_buf()),
        }
    }
}

/// Reads an already fetched GitHub document.
///
/// Accepts either the repository array from `GET /users/{user}/repos` or
/// an object `{ "user": {...}, "repos": [...] }`.
#[derive(Debug, Clone)]
pub struct JsonSource {
    input: JsonInput,
}

impl JsonSource {
    pub fn new(input: JsonInput) -> Self {
        Self { input }
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(JsonInput::File(path.into()))
    }

    pub fn from_document(document: impl Into<String>) -> Self {
        Self::new(JsonInput::Inline(document.into()))
    }

    fn read_document(&self) -> Result<String> {
        match &self.input {
            JsonInput::Stdin => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                Ok(buf)
            }
            JsonInput::File(path) => {
                info!("Reading repositories from {}", path.display());
                Ok(std::fs::read_to_string(path)?)
            }
            JsonInput::Inline(document) => Ok(document.clone()),
        }
    }
}

impl RepositorySource for JsonSource {
    fn load(&self) -> Result<ProfileSnapshot> {
        let document = self.read_document()?;
        parse_snapshot(&document)
    }
}

/// Parse and validate a snapshot document
pub fn parse_snapshot(document: &str) -> Result<ProfileSnapshot> {
    let value: Value = serde_json::from_str(document)?;

    let (profile, entries) = match value {
        Value::Array(entries) => (None, entries),
        Value::Object(mut map) => {
            let profile = match map.remove("user") {
                Some(Value::Null) | None => None,
                Some(user) => Some(serde_json::from_value::<Profile>(user)?),
            };
            let entries = match map.remove("repos") {
                Some(Value::Array(entries)) => entries,
                Some(Value::Null) | None => Vec::new(),
                Some(_) => {
                    return Err(DevhubError::InvalidDocument(
                        "`repos` must be an array of repositories".to_string(),
                    ))
                }
            };
            (profile, entries)
        }
        _ => {
            return Err(DevhubError::InvalidDocument(
                "expected a repository array or an object with `user` and `repos`".to_string(),
            ))
        }
    };

    let repositories = validate_repositories(entries)?;
    debug!(
        repositories = repositories.len(),
        has_profile = profile.is_some(),
        "parsed profile snapshot"
    );

    Ok(ProfileSnapshot {
        profile,
        repositories,
    })
}

/// Decode each entry on its own so errors can name the offending index
fn validate_repositories(entries: Vec<Value>) -> Result<Vec<Repository>> {
    let mut seen = HashSet::with_capacity(entries.len());
    let mut repositories = Vec::with_capacity(entries.len());

    for (index, entry) in entries.into_iter().enumerate() {
        let raw: RawRepository = serde_json::from_value(entry)
            .map_err(|e| DevhubError::invalid_repository(index, e.to_string()))?;
        let repo = raw.validate(index)?;

        if !seen.insert(repo.id) {
            return Err(DevhubError::invalid_repository(
                index,
                format!("duplicate id {} ('{}')", repo.id, repo.name),
            ));
        }
        repositories.push(repo);
    }

    Ok(repositories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const REPOS: &str = r#"[
        {
            "id": 1,
            "name": "alpha",
            "description": "First project",
            "html_url": "https://github.com/octocat/alpha",
            "stargazers_count": 10,
            "forks_count": 2,
            "language": "Go",
            "updated_at": "2024-01-01T00:00:00Z",
            "topics": ["cli", "tools"]
        },
        {
            "id": 2,
            "name": "gamma",
            "description": null,
            "html_url": "https://github.com/octocat/gamma",
            "stargazers_count": 5,
            "forks_count": 0,
            "language": null,
            "updated_at": "2024-03-01T12:30:00+02:00"
        }
    ]"#;

    #[test]
    fn test_parse_repository_array() {
        let snapshot = JsonSource::from_document(REPOS).load().unwrap();
        assert!(snapshot.profile.is_none());
        assert_eq!(snapshot.repositories.len(), 2);

        let alpha = &snapshot.repositories[0];
        assert_eq!(alpha.name, "alpha");
        assert_eq!(alpha.url, "https://github.com/octocat/alpha");
        assert_eq!(alpha.stars, 10);
        assert_eq!(alpha.language.as_deref(), Some("Go"));
        assert_eq!(alpha.topics, vec!["cli", "tools"]);

        let gamma = &snapshot.repositories[1];
        assert_eq!(gamma.language, None);
        assert!(gamma.topics.is_empty());
        assert_eq!(
            gamma.updated_at.map(|t| t.to_rfc3339()),
            Some("2024-03-01T10:30:00+00:00".to_string())
        );
    }

    #[test]
    fn test_parse_profile_document() {
        let document = format!(
            r#"{{ "user": {{ "login": "octocat", "name": "The Octocat", "followers": 42 }}, "repos": {} }}"#,
            REPOS
        );
        let snapshot = JsonSource::from_document(document).load().unwrap();
        let profile = snapshot.profile.unwrap();
        assert_eq!(profile.login, "octocat");
        assert_eq!(profile.display_name(), "The Octocat");
        assert_eq!(profile.followers, 42);
        assert_eq!(snapshot.repositories.len(), 2);
    }

    #[test]
    fn test_optional_fields_default() {
        let snapshot = parse_snapshot(r#"[{ "id": 7, "name": "bare", "language": "" }]"#).unwrap();
        let repo = &snapshot.repositories[0];
        assert_eq!(repo, &Repository::new(7, "bare"));
    }

    #[test]
    fn test_missing_name_names_the_entry() {
        let err = parse_snapshot(r#"[{ "id": 1, "name": "ok" }, { "id": 2 }]"#).unwrap_err();
        match err {
            DevhubError::InvalidRepository { index, reason } => {
                assert_eq!(index, 1);
                assert!(reason.contains("name"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_id_is_rejected() {
        let err = parse_snapshot(r#"[{ "name": "no-id" }]"#).unwrap_err();
        assert!(matches!(err, DevhubError::InvalidRepository { index: 0, .. }));
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let err = parse_snapshot(r#"[{ "id": 1, "name": "a", "stargazers_count": -3 }]"#).unwrap_err();
        assert!(matches!(err, DevhubError::InvalidRepository { index: 0, .. }));
    }

    #[test]
    fn test_bad_timestamp_is_rejected() {
        let err = parse_snapshot(r#"[{ "id": 1, "name": "a", "updated_at": "yesterday" }]"#)
            .unwrap_err();
        assert!(err.to_string().contains("updated_at"));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let err = parse_snapshot(r#"[{ "id": 1, "name": "a" }, { "id": 1, "name": "b" }]"#)
            .unwrap_err();
        assert!(matches!(err, DevhubError::InvalidRepository { index: 1, .. }));
    }

    #[test]
    fn test_non_collection_document() {
        assert!(parse_snapshot("42").is_err());
        assert!(parse_snapshot(r#"{ "repos": "nope" }"#).is_err());
        assert!(parse_snapshot("not json").is_err());
    }

    #[test]
    fn test_empty_collection() {
        let snapshot = parse_snapshot("[]").unwrap();
        assert_eq!(snapshot, ProfileSnapshot::default());
    }

    #[test]
    fn test_json_source_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(REPOS.as_bytes()).unwrap();

        let source = JsonSource::from_path(file.path());
        let snapshot = source.load().unwrap();
        assert_eq!(snapshot.repositories.len(), 2);
    }

    #[test]
    fn test_json_source_missing_file() {
        let source = JsonSource::from_path("/definitely/not/here.json");
        assert!(matches!(source.load(), Err(DevhubError::IoError(_))));
    }

    #[test]
    fn test_inline_document_errors_surface() {
        let source = JsonSource::from_document(r#"[{ "id": 3 }]"#);
        assert!(matches!(
            source.load(),
            Err(DevhubError::InvalidRepository { index: 0, .. })
        ));
    }

    #[test]
    fn test_json_input_from_arg() {
        assert_eq!(JsonInput::from_arg(None), JsonInput::Stdin);
        assert_eq!(JsonInput::from_arg(Some(Path::new("-"))), JsonInput::Stdin);
        assert_eq!(
            JsonInput::from_arg(Some(Path::new("repos.json"))),
            JsonInput::File(PathBuf::from("repos.json"))
        );
    }
}
