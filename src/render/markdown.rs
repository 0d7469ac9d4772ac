use super::{format_count, format_date, summary_line, topic_preview, RenderOptions, Report};
use crate::constants::{EMPTY_HINT_FILTERS, EMPTY_HINT_SEARCH, EMPTY_TITLE, NO_DESCRIPTION, UNKNOWN_LOCATION};
use crate::source::Profile;
use crate::view::{DerivedView, LanguageAggregate, Repository};

pub(super) fn render(report: &Report<'_>, options: &RenderOptions) -> String {
    let mut out = String::new();

    if let Some(profile) = report.profile {
        out.push_str(&profile_section(profile));
    }

    let view = report.view;
    out.push_str("## Repositories\n\n");
    out.push_str(&format!(
        "_{} (sorted by {})_\n\n",
        summary_line(view),
        report.params.sort.label()
    ));

    if view.is_empty() {
        let hint = if report.params.has_search() {
            EMPTY_HINT_SEARCH
        } else {
            EMPTY_HINT_FILTERS
        };
        out.push_str(&format!("**{}**. {}.\n\n", EMPTY_TITLE, hint));
    } else {
        out.push_str("| Repository | Description | Topics | Stars | Forks | Language | Updated |\n");
        out.push_str("|---|---|---|---:|---:|---|---|\n");
        for repo in options.listed(view) {
            out.push_str(&repository_row(repo, options));
        }
        out.push('\n');
    }

    out.push_str(&language_chart(&view.languages));
    out
}

pub(super) fn render_languages(languages: &[String], view: &DerivedView<'_>) -> String {
    let mut out = String::from("## Language filters\n\n");
    for language in languages {
        out.push_str(&format!("- {}\n", escape(language)));
    }
    out.push('\n');
    out.push_str(&language_chart(&view.languages));
    out
}

fn profile_section(profile: &Profile) -> String {
    let mut out = format!(
        "# {} (@{})\n\n",
        escape(profile.display_name()),
        escape(&profile.login)
    );
    if let Some(bio) = profile.bio.as_deref().filter(|b| !b.is_empty()) {
        out.push_str(&format!("{}\n\n", escape(bio)));
    }
    let location = profile
        .location
        .as_deref()
        .filter(|l| !l.is_empty())
        .unwrap_or(UNKNOWN_LOCATION);
    out.push_str(&format!("- **Location:** {}\n", escape(location)));
    out.push_str(&format!("- **Followers:** {}\n", format_count(profile.followers)));
    out.push_str(&format!("- **Repositories:** {}\n", format_count(profile.public_repos)));
    out.push_str(&format!("- **Following:** {}\n", format_count(profile.following)));
    if let Some(url) = &profile.html_url {
        out.push_str(&format!("- [View on GitHub]({})\n", escape_url(url)));
    }
    out.push('\n');
    out
}

fn repository_row(repo: &Repository, options: &RenderOptions) -> String {
    let name = if repo.url.is_empty() {
        escape(&repo.name)
    } else {
        format!("[{}]({})", escape(&repo.name), escape_url(&repo.url))
    };
    let (topics, rest) = topic_preview(&repo.topics, options.topic_preview);
    let mut topics: Vec<String> = topics.iter().map(|t| code_span(t)).collect();
    if rest > 0 {
        topics.push(format!("+{}", rest));
    }
    format!(
        "| {} | {} | {} | {} | {} | {} | {} |\n",
        name,
        escape(repo.description.as_deref().filter(|d| !d.is_empty()).unwrap_or(NO_DESCRIPTION)),
        topics.join(" "),
        format_count(repo.stars),
        format_count(repo.forks),
        repo.language_label().map(escape).unwrap_or_default(),
        format_date(repo).unwrap_or_default()
    )
}

fn language_chart(languages: &LanguageAggregate) -> String {
    let mut out = String::from("## Language Breakdown\n\n");
    if languages.is_empty() {
        out.push_str("_No repositories._\n");
        return out;
    }
    out.push_str("| Language | Repositories | Share |\n|---|---:|---:|\n");
    for bucket in languages {
        out.push_str(&format!(
            "| {} | {} | {:.1}% |\n",
            escape(&bucket.language),
            bucket.count,
            bucket.percentage
        ));
    }
    out
}

/// Backslash-escape inline Markdown and table pipes; newlines become spaces
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>' | '|' => {
                out.push('\\');
                out.push(c);
            }
            '\n' | '\r' => out.push(' '),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encode characters that would end a link destination or a cell
fn escape_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        match c {
            ' ' => out.push_str("%20"),
            '(' => out.push_str("%28"),
            ')' => out.push_str("%29"),
            '<' => out.push_str("%3C"),
            '>' => out.push_str("%3E"),
            '|' => out.push_str("%7C"),
            '\n' | '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

/// Code span whose fence is longer than any backtick run inside it
fn code_span(text: &str) -> String {
    let text = text.replace('|', "\\|").replace(['\n', '\r'], " ");
    let longest_run = text
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest_run + 1);
    if longest_run == 0 {
        format!("{fence}{text}{fence}")
    } else {
        format!("{fence} {text} {fence}")
    }
}
