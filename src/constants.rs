//! Constants module to avoid magic numbers in the codebase

// Sentinels
pub const ALL_LANGUAGES: &str = "All";
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

// Input
pub const STDIN_PATH: &str = "-";

// Presentation
pub const DEFAULT_TOPIC_PREVIEW: usize = 3;
pub const NO_DESCRIPTION: &str = "No description provided";
pub const UNKNOWN_LOCATION: &str = "Unknown";
pub const DATE_FORMAT: &str = "%b %-d, %Y";
pub const CHART_BAR_WIDTH: usize = 30;

// Empty-state messages
pub const EMPTY_TITLE: &str = "No repositories found";
pub const EMPTY_HINT_SEARCH: &str = "Try adjusting your search terms";
pub const EMPTY_HINT_FILTERS: &str = "No repositories match your current filters";

// Configuration
pub const APP_NAME: &str = "devhub";
pub const ENV_PREFIX: &str = "DEVHUB_";
pub const LOCAL_CONFIG_PATH: &str = ".devhub/config.toml";
