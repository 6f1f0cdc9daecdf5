//! Render command - render a partial from disk and substitute its markers

use crate::cli::RenderArgs;
use crate::context::Context;
use crate::output::{print_json, print_raw};
use anyhow::{Context as _, Result, bail};
use cache_replace_core::marker::find_markers;
use cache_replace_core::renderer::DirectoryRenderer;
use cache_replace_core::{
    CacheReplaceError, CollectionMap, Instruction, Locals, RenderOptions, Replacements,
    TrustedHtml, render_cached,
};
use colored::Colorize;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::path::{Path, PathBuf};

/// Collection item paired with its position
type IndexedItem = (usize, JsonValue);

#[derive(Serialize)]
struct RenderOutput<'a> {
    partial: &'a str,
    html: &'a str,
    unreplaced: Vec<&'a str>,
}

/// Render a partial with the instruction built from the arguments
///
/// # Arguments
///
/// * `args` - Parsed `render` arguments
/// * `config` - Optional explicit config path
/// * `verbose` - Print progress to stderr if true
pub fn run(args: RenderArgs, config: Option<PathBuf>, verbose: bool) -> Result<()> {
    let ctx = Context::new(config, verbose)?;

    let mut partials = ctx.config.partials.clone();
    if let Some(dir) = args.dir.clone() {
        partials.dir = dir;
    }
    let renderer = DirectoryRenderer::from_config(&partials);

    let mut locals = ctx.config.locals.clone();
    for (key, value) in parse_pairs(&args.locals, "--local")? {
        locals.insert(key, toml::Value::String(value));
    }

    if ctx.verbose {
        if let Some(source) = &ctx.source {
            eprintln!("{} Using config {}", "→".cyan(), source.display());
        }
        eprintln!(
            "{} Rendering '{}' from {}",
            "→".cyan(),
            args.partial,
            renderer.root().display()
        );
    }

    let html = match &args.collection {
        Some(path) => render_collection(&renderer, &args, locals, path)?,
        None => render_single(&renderer, &args, locals)?,
    };

    if args.json {
        let output = RenderOutput {
            partial: &args.partial,
            html: html.as_str(),
            unreplaced: find_markers(html.as_str()),
        };
        print_json(&serde_json::to_string_pretty(&output)?)?;
    } else {
        print_raw(html.as_str())?;
    }

    if ctx.verbose {
        eprintln!("{} Rendered '{}'", "✓".green().bold(), args.partial);
    }

    Ok(())
}

fn render_single(
    renderer: &DirectoryRenderer,
    args: &RenderArgs,
    locals: Locals,
) -> Result<TrustedHtml> {
    let mut options = RenderOptions::new().locals(locals);

    if !args.replace.is_empty() {
        options = options.replace(Instruction::List(args.replace.clone()));
    } else if !args.set.is_empty() {
        let map: Replacements = parse_pairs(&args.set, "--set")?.into_iter().collect();
        options = options.replace(map);
    }

    Ok(render_cached(renderer, &args.partial, options)?)
}

fn render_collection(
    renderer: &DirectoryRenderer,
    args: &RenderArgs,
    locals: Locals,
    path: &Path,
) -> Result<TrustedHtml> {
    let items = load_collection(path)?;

    let mut map: CollectionMap<IndexedItem> = CollectionMap::new();
    for (name, pointer) in parse_pairs(&args.each, "--each")? {
        if !pointer.is_empty() && !pointer.starts_with('/') {
            bail!("--each '{}': JSON pointer must be empty or start with '/'", name);
        }
        let key = name.clone();
        map.try_insert(name, move |(index, item): &IndexedItem| {
            item_text(item, &pointer).ok_or_else(|| CacheReplaceError::ItemReplace {
                key: key.clone(),
                index: *index,
                reason: format!("no value at '{}'", pointer),
            })
        });
    }

    let options = RenderOptions::for_collection(items)
        .locals(locals)
        .replace(map);

    Ok(render_cached(renderer, &args.partial, options)?)
}

/// Read a JSON array of items
fn load_collection(path: &Path) -> Result<Vec<IndexedItem>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read collection {}", path.display()))?;
    let value: JsonValue = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse collection {}", path.display()))?;

    match value {
        JsonValue::Array(items) => Ok(items.into_iter().enumerate().collect()),
        _ => bail!("Collection {} must be a JSON array", path.display()),
    }
}

/// Text for the value at `pointer`; strings are inserted without quotes
fn item_text(item: &JsonValue, pointer: &str) -> Option<String> {
    match item.pointer(pointer)? {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Null => Some(String::new()),
        other => Some(other.to_string()),
    }
}

/// Split repeated `key=value` arguments
fn parse_pairs(raw: &[String], flag: &str) -> Result<Vec<(String, String)>> {
    raw.iter()
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
            _ => bail!("{} expects KEY=VALUE, got '{}'", flag, pair),
        })
        .collect()
}
