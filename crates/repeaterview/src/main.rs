//! `rptview` - CLI for repeaterview
//!
//! Fills the repeater containers of the site's HTML pages from the repeater
//! JSON document, or prints the rendered fragments on their own.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use repeaterview::cli::{
    Cli, Command, ConfigCommand, FragmentsCommand, ListCommand, OutputFormat, RenderCommand,
};
use repeaterview::format::{format_frequency, link_type_display, short_location, status_display};
use repeaterview::render::render_html_document;
use repeaterview::{
    init_logging, load_repeater_data, render_page, Config, FileSource, FragmentSink, LinkType,
    Page, RepeaterData,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    // The config subcommands load (or refuse to load) the file themselves
    match cli.command {
        Command::Render(cmd) => handle_render(&load_config(cli.config)?, cmd).await,
        Command::Fragments(cmd) => handle_fragments(&load_config(cli.config)?, cmd).await,
        Command::List(cmd) => handle_list(&load_config(cli.config)?, &cmd).await,
        Command::Config(cmd) => handle_config(cli.config, cmd),
    }
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<Config> {
    Config::load_from(path).context("loading configuration")
}

async fn load(config: &Config, data: Option<PathBuf>) -> Option<RepeaterData> {
    let path = data.unwrap_or_else(|| config.data.path.clone());
    load_repeater_data(&FileSource::new(path)).await
}

/// Explicit `--page` wins, then the configured page, then the input's name.
fn resolve_page(explicit: Option<&str>, config: &Config, input: &Path) -> anyhow::Result<Page> {
    if let Some(name) = explicit {
        return Ok(name.parse()?);
    }
    if let Some(page) = config.page()? {
        return Ok(page);
    }
    let file_name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Page::from_path(&file_name))
}

async fn handle_render(config: &Config, cmd: RenderCommand) -> anyhow::Result<()> {
    let page = resolve_page(cmd.page.as_deref(), config, &cmd.input)?;
    debug!("Rendering {} as {page}", cmd.input.display());

    let html = tokio::fs::read_to_string(&cmd.input)
        .await
        .with_context(|| format!("reading {}", cmd.input.display()))?;

    let data = load(config, cmd.data).await;
    let rendered = render_html_document(&page, data.as_ref(), &html);

    match cmd.output.or_else(|| config.render.output.clone()) {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            tokio::fs::write(&path, rendered)
                .await
                .with_context(|| format!("writing {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

/// Render the requested page (both when none is given or configured) into
/// a sink that accepts every container.
async fn collect_fragments(
    config: &Config,
    page: Option<&str>,
    data: Option<PathBuf>,
) -> anyhow::Result<FragmentSink> {
    let pages = match page {
        Some(name) => vec![name.parse::<Page>()?],
        None => match config.page()? {
            Some(page) => vec![page],
            None => vec![Page::Index, Page::Repeaters],
        },
    };

    let data = load(config, data).await;
    let mut sink = FragmentSink::accept_all();
    for page in &pages {
        render_page(page, data.as_ref(), &mut sink);
    }
    Ok(sink)
}

async fn handle_fragments(config: &Config, cmd: FragmentsCommand) -> anyhow::Result<()> {
    let sink = collect_fragments(config, cmd.page.as_deref(), cmd.data).await?;

    match cmd.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(sink.fragments())?),
        OutputFormat::Plain => {
            for (container, markup) in sink.fragments() {
                println!("<!-- {container} -->");
                println!("{markup}");
            }
        }
    }
    Ok(())
}

async fn handle_list(config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let Some(data) = load(config, cmd.data.clone()).await else {
        return Ok(());
    };
    let filter = cmd.link_type.map(LinkType::from);
    let rows = data
        .repeaters
        .iter()
        .filter(|r| filter.map_or(true, |lt| r.is_link_type(lt)));

    match cmd.format {
        OutputFormat::Json => {
            let rows: Vec<_> = rows.collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Plain => {
            for r in rows {
                println!(
                    "{:<28} {:<32} {:<10} {}",
                    short_location(r),
                    format_frequency(r),
                    status_display(r).text,
                    link_type_display(r).text
                );
            }
        }
    }
    Ok(())
}

/// Load `path` and report whether it is usable.
fn validate_config_file(path: &Path) -> anyhow::Result<Config> {
    Config::load_from(Some(path.to_path_buf()))
        .with_context(|| format!("configuration {} is invalid", path.display()))
}

fn handle_config(config_path: Option<PathBuf>, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = load_config(config_path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Data]");
                println!("  Path:    {}", config.data.path.display());
                println!();
                println!("[Render]");
                println!(
                    "  Page:    {}",
                    config.render.page.as_deref().unwrap_or("(from input file name)")
                );
                println!(
                    "  Output:  {}",
                    config
                        .render
                        .output
                        .as_ref()
                        .map_or_else(|| "(stdout)".to_string(), |p| p.display().to_string())
                );
            }
        }
        ConfigCommand::Path => {
            let path = config_path.unwrap_or_else(Config::default_config_path);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            validate_config_file(&path)?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}
