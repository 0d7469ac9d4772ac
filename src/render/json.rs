use serde::Serialize;

use super::{RenderOptions, Report};
use crate::source::Profile;
use crate::utils::{DevhubError, Result};
use crate::view::{DerivedView, LanguageAggregate, Repository, SortKey};

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    profile: Option<&'a Profile>,
    sort: SortKey,
    language: &'a str,
    search: &'a str,
    total: usize,
    shown: usize,
    repositories: &'a [&'a Repository],
    languages: &'a LanguageAggregate,
}

#[derive(Serialize)]
struct JsonLanguages<'a> {
    options: &'a [String],
    languages: &'a LanguageAggregate,
}

pub(super) fn render(report: &Report<'_>, options: &RenderOptions) -> Result<String> {
    let view = report.view;
    let document = JsonReport {
        profile: report.profile,
        sort: report.params.sort,
        language: report.params.language.as_str(),
        search: &report.params.search,
        total: view.total,
        shown: view.shown(),
        repositories: options.listed(view),
        languages: &view.languages,
    };
    to_json(&document)
}

pub(super) fn render_languages(languages: &[String], view: &DerivedView<'_>) -> Result<String> {
    to_json(&JsonLanguages {
        options: languages,
        languages: &view.languages,
    })
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| DevhubError::RenderError(format!("Failed to serialize output: {}", e)))
}
