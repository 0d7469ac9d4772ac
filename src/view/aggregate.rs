use serde::Serialize;

use super::types::Repository;
use crate::constants::UNKNOWN_LANGUAGE;

/// One slice of the language chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageBucket {
    pub language: String,
    pub count: usize,
    /// Share of the whole collection, rounded to one decimal place
    pub percentage: f64,
}

/// Repository counts grouped by primary language.
///
/// Buckets are ordered by count, largest first. Equal counts keep the
/// order in which their language was first seen in the input.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct LanguageAggregate {
    buckets: Vec<LanguageBucket>,
}

impl LanguageAggregate {
    /// Count languages across every repository in `repositories`
    pub fn from_repositories(repositories: &[Repository]) -> Self {
        // Vec keeps first-seen order for the stable sort below; language
        // counts per profile are small enough that a linear lookup is fine
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for repo in repositories {
            let label = repo.language_label().unwrap_or(UNKNOWN_LANGUAGE);
            match counts.iter_mut().find(|(l, _)| *l == label) {
                Some((_, count)) => *count += 1,
                None => counts.push((label, 1)),
            }
        }

        counts.sort_by(|a, b| b.1.cmp(&a.1));

        let total = repositories.len();
        let buckets = counts
            .into_iter()
            .map(|(language, count)| LanguageBucket {
                language: language.to_string(),
                count,
                percentage: percentage(count, total),
            })
            .collect();

        Self { buckets }
    }

    pub fn buckets(&self) -> &[LanguageBucket] {
        &self.buckets
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Number of repositories counted across all buckets
    pub fn total(&self) -> usize {
        self.buckets.iter().map(|b| b.count).sum()
    }

    pub fn get(&self, language: &str) -> Option<&LanguageBucket> {
        self.buckets.iter().find(|b| b.language == language)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LanguageBucket> {
        self.buckets.iter()
    }
}

impl<'a> IntoIterator for &'a LanguageAggregate {
    type Item = &'a LanguageBucket;
    type IntoIter = std::slice::Iter<'a, LanguageBucket>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.iter()
    }
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let exact = count as f64 / total as f64 * 100.0;
    (exact * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn repo(id: u64, language: Option<&str>) -> Repository {
        let repo = Repository::new(id, format!("repo-{id}"));
        match language {
            Some(l) => repo.with_language(l),
            None => repo,
        }
    }

    #[test]
    fn test_empty_collection() {
        let aggregate = LanguageAggregate::from_repositories(&[]);
        assert!(aggregate.is_empty());
        assert_eq!(aggregate.total(), 0);
    }

    #[test]
    fn test_counts_and_percentages() {
        let repos = vec![repo(1, Some("Go")), repo(2, Some("Go")), repo(3, None)];
        let aggregate = LanguageAggregate::from_repositories(&repos);

        assert_eq!(
            aggregate.buckets(),
            &[
                LanguageBucket {
                    language: "Go".to_string(),
                    count: 2,
                    percentage: 66.7,
                },
                LanguageBucket {
                    language: "Unknown".to_string(),
                    count: 1,
                    percentage: 33.3,
                },
            ]
        );
    }

    #[test]
    fn test_empty_language_is_unknown() {
        let repos = vec![repo(1, Some("")), repo(2, None)];
        let aggregate = LanguageAggregate::from_repositories(&repos);
        assert_eq!(aggregate.len(), 1);
        assert_eq!(aggregate.get("Unknown").map(|b| b.count), Some(2));
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let repos = vec![
            repo(1, Some("Rust")),
            repo(2, Some("Python")),
            repo(3, Some("Go")),
            repo(4, Some("Go")),
            repo(5, Some("Python")),
        ];
        let aggregate = LanguageAggregate::from_repositories(&repos);
        let order: Vec<&str> = aggregate.iter().map(|b| b.language.as_str()).collect();
        assert_eq!(order, vec!["Python", "Go", "Rust"]);
    }

    #[test]
    fn test_every_repository_counted_once() {
        let languages = [Some("C"), None, Some("Rust"), Some("C"), Some("Zig"), None, Some("")];
        let repos: Vec<Repository> = languages
            .iter()
            .enumerate()
            .map(|(i, l)| repo(i as u64, *l))
            .collect();
        let aggregate = LanguageAggregate::from_repositories(&repos);

        assert_eq!(aggregate.total(), repos.len());
        let sum: f64 = aggregate.iter().map(|b| b.percentage).sum();
        assert!((sum - 100.0).abs() <= 0.05 * aggregate.len() as f64);
    }
}
