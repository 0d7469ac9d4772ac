use colored::{ColoredString, Colorize};

use super::{format_count, format_date, summary_line, topic_preview, RenderOptions, Report};
use crate::constants::{
    CHART_BAR_WIDTH, EMPTY_HINT_FILTERS, EMPTY_HINT_SEARCH, EMPTY_TITLE, NO_DESCRIPTION,
    UNKNOWN_LOCATION,
};
use crate::source::Profile;
use crate::view::{DerivedView, LanguageAggregate, Repository};

/// Applies a style only when color is enabled
struct Painter {
    color: bool,
}

impl Painter {
    fn paint<F>(&self, text: &str, style: F) -> String
    where
        F: FnOnce(&str) -> ColoredString,
    {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }
}

pub(super) fn render(report: &Report<'_>, options: &RenderOptions) -> String {
    let painter = Painter {
        color: options.color,
    };
    let mut out = String::new();

    if let Some(profile) = report.profile {
        out.push_str(&profile_section(profile, &painter));
        out.push('\n');
    }

    let view = report.view;
    out.push_str(&format!(
        "{}  (sorted by {})\n",
        painter.paint(&summary_line(view), |s| s.bold()),
        report.params.sort.label()
    ));
    if report.params.has_search() {
        out.push_str(&format!("Search: \"{}\"\n", report.params.search));
    }
    out.push('\n');

    if view.is_empty() {
        let hint = if report.params.has_search() {
            EMPTY_HINT_SEARCH
        } else {
            EMPTY_HINT_FILTERS
        };
        out.push_str(&format!(
            "{}\n{}\n",
            painter.paint(EMPTY_TITLE, |s| s.yellow().bold()),
            hint
        ));
    } else {
        let listed = options.listed(view);
        for repo in listed {
            out.push_str(&repository_entry(repo, options, &painter));
            out.push('\n');
        }
        if listed.len() < view.shown() {
            let more = format!("... and {} more", view.shown() - listed.len());
            out.push_str(&format!("{}\n\n", painter.paint(&more, |s| s.dimmed())));
        }
    }

    out.push_str(&language_chart(&view.languages, &painter));
    out
}

pub(super) fn render_languages(
    languages: &[String],
    view: &DerivedView<'_>,
    options: &RenderOptions,
) -> String {
    let painter = Painter {
        color: options.color,
    };
    let mut out = format!("{}\n", painter.paint("Language filters:", |s| s.bold()));
    for language in languages {
        out.push_str(&format!("  • {}\n", language));
    }
    out.push('\n');
    out.push_str(&language_chart(&view.languages, &painter));
    out
}

fn profile_section(profile: &Profile, painter: &Painter) -> String {
    let mut out = format!(
        "{} {}\n",
        painter.paint(profile.display_name(), |s| s.bold().blue()),
        painter.paint(&format!("(@{})", profile.login), |s| s.dimmed())
    );
    if let Some(bio) = profile.bio.as_deref().filter(|b| !b.is_empty()) {
        out.push_str(&format!("  {}\n", bio));
    }
    let location = profile
        .location
        .as_deref()
        .filter(|l| !l.is_empty())
        .unwrap_or(UNKNOWN_LOCATION);
    out.push_str(&format!("  📍 {}\n", location));
    out.push_str(&format!(
        "  👥 Followers: {}  📦 Repos: {}  🔁 Following: {}\n",
        format_count(profile.followers),
        format_count(profile.public_repos),
        format_count(profile.following)
    ));
    if let Some(url) = &profile.html_url {
        out.push_str(&format!("  {}\n", painter.paint(url, |s| s.underline())));
    }
    out
}

fn repository_entry(repo: &Repository, options: &RenderOptions, painter: &Painter) -> String {
    let mut out = painter.paint(&repo.name, |s| s.bold().blue());
    if !repo.url.is_empty() {
        out.push_str(&format!("  {}", painter.paint(&repo.url, |s| s.dimmed())));
    }
    out.push('\n');

    let description = repo
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or(NO_DESCRIPTION);
    out.push_str(&format!("  {}\n", description));

    let (topics, rest) = topic_preview(&repo.topics, options.topic_preview);
    if !topics.is_empty() {
        let mut line: Vec<String> = topics
            .iter()
            .map(|t| painter.paint(&format!("[{}]", t), |s| s.cyan()))
            .collect();
        if rest > 0 {
            line.push(painter.paint(&format!("+{}", rest), |s| s.dimmed()));
        }
        out.push_str(&format!("  {}\n", line.join(" ")));
    }

    out.push_str(&format!(
        "  ⭐ {}  🍴 {}",
        format_count(repo.stars),
        format_count(repo.forks)
    ));
    if let Some(language) = repo.language_label() {
        out.push_str(&format!("  {}", painter.paint(language, |s| s.green())));
    }
    if let Some(date) = format_date(repo) {
        out.push_str(&format!(
            "  {}",
            painter.paint(&format!("updated {}", date), |s| s.dimmed())
        ));
    }
    out.push('\n');
    out
}

fn language_chart(languages: &LanguageAggregate, painter: &Painter) -> String {
    let mut out = format!("{}\n", painter.paint("Language Breakdown", |s| s.bold()));
    if languages.is_empty() {
        out.push_str("  (no repositories)\n");
        return out;
    }

    let width = languages
        .iter()
        .map(|b| b.language.chars().count())
        .max()
        .unwrap_or(0);
    for bucket in languages {
        let filled = ((bucket.percentage / 100.0) * CHART_BAR_WIDTH as f64).round() as usize;
        let bar = "█".repeat(filled.max(1));
        out.push_str(&format!(
            "  {:<width$}  {} {} ({:.1}%)\n",
            bucket.language,
            painter.paint(&bar, |s| s.magenta()),
            bucket.count,
            bucket.percentage,
            width = width
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{derive_view, SortKey, ViewParameters};
    use chrono::{TimeZone, Utc};

    fn plain() -> RenderOptions {
        RenderOptions {
            color: false,
            ..RenderOptions::default()
        }
    }

    fn repos() -> Vec<Repository> {
        vec![
            Repository::new(1, "alpha")
                .with_language("Go")
                .with_stars(1200)
                .with_forks(3)
                .with_topics(["cli", "tools", "go", "terminal", "tui"])
                .with_updated_at(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            Repository::new(2, "gamma").with_description("Notes and scratch"),
        ]
    }

    #[test]
    fn test_render_list() {
        let repos = repos();
        let params = ViewParameters::default().with_sort(SortKey::Stars);
        let view = derive_view(&repos, &params);
        let report = Report {
            profile: None,
            view: &view,
            params: &params,
        };
        let out = render(&report, &plain());

        assert!(out.contains("Showing 2 of 2 repositories"));
        assert!(out.contains("(sorted by Most Stars)"));
        assert!(out.contains("⭐ 1,200  🍴 3  Go  updated Jan 1, 2024"));
        assert!(out.contains("[cli] [tools] [go] +2"));
        assert!(out.contains(NO_DESCRIPTION));
        assert!(out.contains("Notes and scratch"));
        assert!(out.contains("Go       "));
        assert!(out.contains("1 (50.0%)"));
    }

    #[test]
    fn test_render_empty_with_search() {
        let repos = repos();
        let params = ViewParameters::default().with_search("zzz");
        let view = derive_view(&repos, &params);
        let report = Report {
            profile: None,
            view: &view,
            params: &params,
        };
        let out = render(&report, &plain());
        assert!(out.contains("Showing 0 of 2 repositories"));
        assert!(out.contains(EMPTY_TITLE));
        assert!(out.contains(EMPTY_HINT_SEARCH));
        // the chart still covers the whole profile
        assert!(out.contains("Unknown"));
    }

    #[test]
    fn test_render_empty_with_filter() {
        let repos = repos();
        let params = ViewParameters::default().with_language("Rust");
        let view = derive_view(&repos, &params);
        let report = Report {
            profile: None,
            view: &view,
            params: &params,
        };
        assert!(render(&report, &plain()).contains(EMPTY_HINT_FILTERS));
    }

    #[test]
    fn test_render_limit() {
        let repos = repos();
        let params = ViewParameters::default();
        let view = derive_view(&repos, &params);
        let report = Report {
            profile: None,
            view: &view,
            params: &params,
        };
        let options = RenderOptions {
            limit: Some(1),
            ..plain()
        };
        let out = render(&report, &options);
        assert!(out.contains("Showing 2 of 2 repositories"));
        assert!(out.contains("... and 1 more"));
        assert!(!out.contains("gamma"));
    }

    #[test]
    fn test_render_profile() {
        let profile = Profile {
            login: "octocat".to_string(),
            name: None,
            avatar_url: None,
            bio: Some("Mascot".to_string()),
            location: None,
            public_repos: 8,
            followers: 12345,
            following: 9,
            html_url: Some("https://github.com/octocat".to_string()),
        };
        let view = derive_view(&[], &ViewParameters::default());
        let params = ViewParameters::default();
        let report = Report {
            profile: Some(&profile),
            view: &view,
            params: &params,
        };
        let out = render(&report, &plain());
        assert!(out.starts_with("octocat (@octocat)"));
        assert!(out.contains("📍 Unknown"));
        assert!(out.contains("Followers: 12,345"));
        assert!(out.contains("(no repositories)"));
    }
}
