use std::env;
use std::fs;
use std::path::PathBuf;

use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::commands::GlobalArgs;
use crate::config::Config;
use crate::content::{ContentService, ListFilter};
use crate::entity::{ContentItem, ContentKind};
use crate::error::{FolioError, Result};
use crate::server;
use crate::sitemap::generate_sitemap;
use crate::warnings::{check_collection, format_warning};

/// Resolve config from `--config` / `./folio.yaml`, then apply flag overrides.
fn load_config(global: &GlobalArgs) -> Result<Config> {
    let cwd = env::current_dir()?;
    let mut config = Config::load(global.config.as_deref(), &cwd)?;
    if let Some(dir) = &global.content_dir {
        config.content_dir = dir.clone();
    }
    Ok(config)
}

fn runtime() -> Result<Runtime> {
    Ok(tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?)
}

fn parse_kind(raw: &str) -> Result<ContentKind> {
    raw.parse()
        .map_err(|_| FolioError::InvalidKind(raw.to_string()))
}

fn heading(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Project => "Projects",
        ContentKind::Article => "Articles",
    }
}

fn print_line(item: &ContentItem) {
    let date = if item.date.is_empty() { "-" } else { item.date.as_str() };
    let featured = if item.featured { " *" } else { "" };
    println!("  {:<10} {} - {}{}", date, item.slug, item.title, featured);
    if !item.tags.is_empty() {
        println!("      tags: {}", item.tags.join(", "));
    }
}

fn print_neighbour(label: &str, item: Option<&ContentItem>) {
    match item {
        Some(item) => println!("{}: {} - {}", label, item.slug, item.title),
        None => println!("{}: (none)", label),
    }
}

pub fn handle_list(
    global: &GlobalArgs,
    kind: String,
    tag: Option<String>,
    featured: bool,
    json: bool,
) -> Result<()> {
    let config = load_config(global)?;
    let kind = parse_kind(&kind)?;
    let service = ContentService::from_config(&config);

    let filter = ListFilter {
        tag,
        featured,
        limit: None,
    };
    let items = runtime()?.block_on(service.list(kind, &filter))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else if items.is_empty() {
        println!("No {} items found.", kind);
    } else {
        println!("{}:\n", heading(kind));
        for item in &items {
            print_line(item);
        }
    }

    Ok(())
}

pub fn handle_get(global: &GlobalArgs, kind: String, slug: String, json: bool) -> Result<()> {
    let config = load_config(global)?;
    let kind = parse_kind(&kind)?;
    let service = ContentService::from_config(&config);

    let item = runtime()?.block_on(service.require(kind, &slug))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&item)?);
        return Ok(());
    }

    println!("{} {}", heading(kind).trim_end_matches('s'), item.slug);
    println!("Title: {}", item.title);
    if !item.date.is_empty() {
        println!("Date: {}", item.date);
    }
    println!("Reading time: {} min", item.reading_time);
    if item.featured {
        println!("Featured: yes");
    }
    if !item.tags.is_empty() {
        println!("Tags: {}", item.tags.join(", "));
    }
    if !item.summary.is_empty() {
        println!("Summary: {}", item.summary);
    }
    for metric in &item.metrics {
        println!("{}: {}", metric.label, metric.value);
    }
    if !item.body.trim().is_empty() {
        println!("\n{}", item.body.trim_end());
    }

    Ok(())
}

pub fn handle_nav(global: &GlobalArgs, kind: String, slug: String, json: bool) -> Result<()> {
    let config = load_config(global)?;
    let kind = parse_kind(&kind)?;
    let service = ContentService::from_config(&config);

    let nav = runtime()?
        .block_on(service.navigation(kind, &slug))?
        .ok_or_else(|| FolioError::not_found(kind, slug.clone()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&nav)?);
    } else {
        print_neighbour("Previous", nav.previous.as_ref());
        print_neighbour("Next", nav.next.as_ref());
    }

    Ok(())
}

pub fn handle_related(
    global: &GlobalArgs,
    kind: String,
    slug: String,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let config = load_config(global)?;
    let kind = parse_kind(&kind)?;
    let service = ContentService::from_config(&config);

    let related = runtime()?
        .block_on(service.related(kind, &slug, limit))?
        .ok_or_else(|| FolioError::not_found(kind, slug.clone()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&related)?);
    } else if related.is_empty() {
        println!("No related {} items for {}.", kind, slug);
    } else {
        println!("Related to {}:\n", slug);
        for item in &related {
            print_line(item);
        }
    }

    Ok(())
}

pub fn handle_check(global: &GlobalArgs, strict: bool) -> Result<()> {
    let config = load_config(global)?;
    let service = ContentService::from_config(&config);
    let rt = runtime()?;

    let mut checked = 0;
    let mut warnings = Vec::new();
    for kind in ContentKind::ALL {
        let items = rt.block_on(service.all(kind))?;
        checked += items.len();
        warnings.extend(check_collection(kind, &items));
    }

    for warning in &warnings {
        println!("{}", format_warning(warning));
    }
    println!("Checked {} items, {} warning(s)", checked, warnings.len());

    if strict && !warnings.is_empty() {
        return Err(FolioError::CheckFailed(warnings.len()));
    }

    Ok(())
}

pub fn handle_sitemap(global: &GlobalArgs, output: Option<PathBuf>) -> Result<()> {
    let config = load_config(global)?;
    let service = ContentService::from_config(&config);

    let xml = runtime()?.block_on(generate_sitemap(&config, &service));

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, &xml)?;
            println!(
                "Wrote sitemap ({} urls) to {}",
                xml.matches("<url>").count(),
                path.display()
            );
        }
        None => print!("{}", xml),
    }

    Ok(())
}

pub fn handle_serve(global: &GlobalArgs, bind: Option<String>) -> Result<()> {
    let mut config = load_config(global)?;
    if let Some(bind) = bind {
        config.bind = bind;
    }

    runtime()?.block_on(async move {
        let shutdown = CancellationToken::new();
        let signal = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("shutdown requested");
            }
            signal.cancel();
        });

        server::serve(config, shutdown).await
    })
}
