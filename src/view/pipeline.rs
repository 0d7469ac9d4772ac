use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use icu_collator::{Collator, CollatorOptions, Strength};
use tracing::{debug, warn};

use super::aggregate::LanguageAggregate;
use super::params::{SortKey, ViewParameters};
use super::types::Repository;
use crate::constants::ALL_LANGUAGES;

/// Render-ready result of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedView<'a> {
    /// Filtered and sorted repositories, borrowed from the input
    pub repositories: Vec<&'a Repository>,
    /// Language breakdown of the whole input, ignoring filters
    pub languages: LanguageAggregate,
    /// Size of the input collection
    pub total: usize,
}

impl DerivedView<'_> {
    /// Number of repositories left after filtering
    pub fn shown(&self) -> usize {
        self.repositories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }
}

/// Filter, sort and aggregate `repositories` for display.
///
/// Pure: the input is only borrowed and equal inputs always give equal
/// output.
pub fn derive_view<'a>(repositories: &'a [Repository], params: &ViewParameters) -> DerivedView<'a> {
    let mut ordered = filter_repositories(repositories, params);
    sort_repositories(&mut ordered, params.sort);

    debug!(
        total = repositories.len(),
        shown = ordered.len(),
        sort = %params.sort,
        language = %params.language,
        "derived repository view"
    );

    DerivedView {
        repositories: ordered,
        languages: LanguageAggregate::from_repositories(repositories),
        total: repositories.len(),
    }
}

/// Keep repositories passing both the language filter and the search text.
/// Input order is preserved.
pub fn filter_repositories<'a, I>(repositories: I, params: &ViewParameters) -> Vec<&'a Repository>
where
    I: IntoIterator<Item = &'a Repository>,
{
    let needle = params.search.to_lowercase();
    repositories
        .into_iter()
        .filter(|repo| params.language.matches(repo.language_label()))
        .filter(|repo| needle.is_empty() || repo.matches_search(&needle))
        .collect()
}

/// Stable sort by `key`; ties keep their current relative order
pub fn sort_repositories(repositories: &mut [&Repository], key: SortKey) {
    match key {
        // None < Some, so reversing puts undated repositories last
        SortKey::Updated => repositories.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
        SortKey::Stars => repositories.sort_by(|a, b| b.stars.cmp(&a.stars)),
        SortKey::Forks => repositories.sort_by(|a, b| b.forks.cmp(&a.forks)),
        SortKey::Name => repositories.sort_by(|a, b| compare_names(&a.name, &b.name)),
    }
}

thread_local! {
    static NAME_COLLATOR: Option<Collator> = root_collator();
}

fn root_collator() -> Option<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Tertiary);
    match Collator::try_new(&Default::default(), options) {
        Ok(collator) => Some(collator),
        Err(e) => {
            warn!("Collation data unavailable ({}), ordering names case-insensitively", e);
            None
        }
    }
}

/// Locale-aware name ordering using the root (CLDR) collation: letters
/// compare case-insensitively first, lowercase sorts before uppercase, and
/// punctuation sorts before digits and letters.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    NAME_COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(a, b),
        None => a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| b.cmp(a)),
    })
}

/// Choices for the language dropdown: "All" then every distinct language
/// in ascending order
pub fn language_options(repositories: &[Repository]) -> Vec<String> {
    let distinct: BTreeSet<&str> = repositories
        .iter()
        .filter_map(Repository::language_label)
        .collect();

    std::iter::once(ALL_LANGUAGES)
        .chain(distinct)
        .map(str::to_string)
        .collect()
}
