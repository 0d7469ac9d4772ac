//! Output rendering - Gateway
//!
//! Turns a derived view into text, Markdown or JSON. All display
//! formatting (dates, thousands separators, topic previews) lives here.
mod json;
mod markdown;
mod text;

use crate::cli::OutputFormat;
use crate::constants::{DATE_FORMAT, DEFAULT_TOPIC_PREVIEW};
use crate::source::Profile;
use crate::utils::Result;
use crate::view::{DerivedView, Repository, ViewParameters};

/// Everything shown for one lookup
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    pub profile: Option<&'a Profile>,
    pub view: &'a DerivedView<'a>,
    pub params: &'a ViewParameters,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub format: OutputFormat,
    pub color: bool,
    /// Topics listed per repository before collapsing into "+N"
    pub topic_preview: usize,
    /// List at most this many repositories; counts are unaffected
    pub limit: Option<usize>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: true,
            topic_preview: DEFAULT_TOPIC_PREVIEW,
            limit: None,
        }
    }
}

impl RenderOptions {
    fn listed<'v>(&self, view: &'v DerivedView<'_>) -> &'v [&'v Repository] {
        let end = self
            .limit
            .map_or(view.repositories.len(), |limit| limit.min(view.repositories.len()));
        &view.repositories[..end]
    }
}

/// Render `report` in the requested format
pub fn render(report: &Report<'_>, options: &RenderOptions) -> Result<String> {
    match options.format {
        OutputFormat::Text => Ok(text::render(report, options)),
        OutputFormat::Markdown => Ok(markdown::render(report, options)),
        OutputFormat::Json => json::render(report, options),
    }
}

/// Render the language filter options and the breakdown
pub fn render_languages(
    options_list: &[String],
    view: &DerivedView<'_>,
    options: &RenderOptions,
) -> Result<String> {
    match options.format {
        OutputFormat::Text => Ok(text::render_languages(options_list, view, options)),
        OutputFormat::Markdown => Ok(markdown::render_languages(options_list, view)),
        OutputFormat::Json => json::render_languages(options_list, view),
    }
}

/// `1234567` -> `1,234,567`
pub(crate) fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub(crate) fn format_date(repo: &Repository) -> Option<String> {
    repo.updated_at.map(|t| t.format(DATE_FORMAT).to_string())
}

/// First `preview` topics plus a "+N" marker for the rest
pub(crate) fn topic_preview(topics: &[String], preview: usize) -> (Vec<&str>, usize) {
    let shown: Vec<&str> = topics.iter().take(preview).map(String::as_str).collect();
    let rest = topics.len().saturating_sub(preview);
    (shown, rest)
}

/// "Showing N of M repositories"
pub(crate) fn summary_line(view: &DerivedView<'_>) -> String {
    format!(
        "Showing {} of {} repositories",
        view.shown(),
        view.total
    )
}
