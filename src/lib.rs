pub mod app;
pub mod cli;
pub mod constants;
pub mod render;
pub mod source;
pub mod utils;
pub mod view;

pub use app::{load_config, Config};
pub use source::{JsonSource, ProfileSnapshot, RepositorySource};
pub use utils::DevhubError;
pub use view::{derive_view, DerivedView, LanguageAggregate, Repository, SortKey, ViewParameters};
