//! Repository sources - Gateway
//!
//! Fetching from GitHub happens elsewhere; sources here hand over data
//! that has already been fetched.
mod json;
mod types;

pub use json::{parse_snapshot, JsonInput, JsonSource};
pub use types::{Profile, ProfileSnapshot};

use crate::utils::Result;

/// Supplies a validated repository collection to the view pipeline
pub trait RepositorySource {
    fn load(&self) -> Result<ProfileSnapshot>;
}
