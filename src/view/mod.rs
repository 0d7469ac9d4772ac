// Gateway module for the repository view pipeline
// Pure derivation from (repositories, parameters) to a render-ready view

mod aggregate;
mod params;
mod pipeline;
mod types;

pub use aggregate::{LanguageAggregate, LanguageBucket};
pub use params::{LanguageFilter, SortKey, ViewParameters};
pub use pipeline::{
    compare_names, derive_view, filter_repositories, language_options,
    sort_repositories, DerivedView,
};
pub use types::Repository;
