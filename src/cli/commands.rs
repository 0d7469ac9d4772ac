use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::{
    app::{init_config, load_config, load_config_from, Config},
    render::{render, render_languages, Report},
    source::{JsonInput, JsonSource, ProfileSnapshot, RepositorySource},
    view::{derive_view, language_options},
};

use super::{Cli, Commands};

/// Handle CLI subcommands
pub fn handle_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Some(Commands::Init) => {
            println!("Initializing DevHub configuration...");
            init_config()?;
            println!("Configuration initialized successfully!");
            Ok(())
        }
        Some(Commands::Version) => {
            show_version();
            Ok(())
        }
        Some(Commands::Languages { .. }) => list_languages(cli),
        Some(Commands::View { .. }) | None => show_view(cli),
    }
}

/// Render the filtered, sorted repository list with its language chart
pub fn show_view(cli: &Cli) -> Result<()> {
    println!("{}", view_output(cli)?.trim_end());
    Ok(())
}

/// Print the language filter choices and the breakdown
pub fn list_languages(cli: &Cli) -> Result<()> {
    println!("{}", languages_output(cli)?.trim_end());
    Ok(())
}

fn view_output(cli: &Cli) -> Result<String> {
    let config = resolve_config(cli)?;
    let params = config.view_parameters(
        cli.search.as_deref(),
        cli.language.as_deref(),
        cli.sort.as_deref(),
    )?;
    let options = config.render_options(cli.output_format, cli.limit, cli.no_color);

    let snapshot = load_snapshot(cli)?;
    let view = derive_view(&snapshot.repositories, &params);
    let report = Report {
        profile: snapshot.profile.as_ref(),
        view: &view,
        params: &params,
    };

    Ok(render(&report, &options)?)
}

fn languages_output(cli: &Cli) -> Result<String> {
    let config = resolve_config(cli)?;
    let options = config.render_options(cli.output_format, cli.limit, cli.no_color);

    let snapshot = load_snapshot(cli)?;
    let choices = language_options(&snapshot.repositories);
    let view = derive_view(&snapshot.repositories, &Default::default());

    Ok(render_languages(&choices, &view, &options)?)
}

/// Show version information
pub fn show_version() {
    println!("DevHub v{}", env!("CARGO_PKG_VERSION"));
    println!("   Search, sort and chart GitHub repositories");
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    if let Some(path) = &cli.config {
        // An explicit config file must load
        return load_config_from(path);
    }
    match load_config() {
        Ok(config) => Ok(config),
        Err(e) => {
            warn!("Failed to load config: {:#}. Using defaults.", e);
            Ok(Config::default())
        }
    }
}

fn load_snapshot(cli: &Cli) -> Result<ProfileSnapshot> {
    let input = JsonInput::from_arg(cli.input_path());
    debug!(?input, "loading repositories");
    let source = JsonSource::new(input.clone());
    source.load().with_context(|| match input {
        JsonInput::File(path) => format!("Failed to load repositories from {}", path.display()),
        JsonInput::Stdin => "Failed to load repositories from stdin".to_string(),
        JsonInput::Inline(_) => "Failed to load repositories".to_string(),
    })
}
