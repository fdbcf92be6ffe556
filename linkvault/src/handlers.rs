use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use linkvault_core::{
    HostScope, PatternConfig, UrlClassifier, UrlFilter, UrlImporter, UrlMatch, UrlStore,
};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const DEFAULT_PATTERNS: &str = include_str!("../patterns/default.toml");

// Helper functions shared by the command handlers

/// Expand a user-supplied database location (tilde included) to a concrete
/// file path.
pub fn resolve_db_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

/// Read newline-delimited URL candidates, dropping blank lines. Validation
/// belongs to the classifier; every other non-empty line is kept as-is.
pub fn read_url_lines(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read URL list {}", path.display()))?;

    let lines: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if lines.is_empty() {
        bail!("no URL candidates found in {}", path.display());
    }

    Ok(lines)
}

fn print_divider() {
    println!("{}", "═".repeat(60).bright_blue().bold());
}

fn print_prompt(msg: &str) -> String {
    print!("{} ", msg.bright_cyan().bold());
    io::stdout().flush().unwrap();
    let mut response = String::new();
    io::stdin().read_line(&mut response).unwrap();
    response.trim().to_lowercase()
}

fn open_store(args: &ArgMatches) -> Result<(PathBuf, UrlStore)> {
    let db_path = resolve_db_path(args.get_one::<String>("db").unwrap());
    let store = UrlStore::open(&db_path)
        .with_context(|| format!("failed to open database {}", db_path.display()))?;
    Ok((db_path, store))
}

/// Patterns live next to the database (installed by `init`); a missing file
/// means built-in defaults.
fn load_classifier(db_path: &Path) -> Result<UrlClassifier> {
    let patterns_path = db_path.parent().map(|dir| dir.join("patterns.toml"));
    let config = match patterns_path {
        Some(path) if path.exists() => PatternConfig::load(&path)
            .with_context(|| format!("failed to load patterns from {}", path.display()))?,
        _ => PatternConfig::default(),
    };
    Ok(UrlClassifier::from_config(&config)?)
}

pub fn handle_init(args: &ArgMatches) -> Result<()> {
    print_divider();
    println!("{}", "  LINKVAULT INITIALIZATION".bright_white().bold());
    print_divider();
    println!();

    let raw_path = args.get_one::<String>("PATH").unwrap();
    let force = args.get_flag("force");
    let expanded = shellexpand::tilde(raw_path);
    let config_dir = Path::new(expanded.as_ref());
    let db_path = config_dir.join("linkvault.db");
    let patterns_path = config_dir.join("patterns.toml");

    println!("{} Parsed arguments", "✓".green().bold());
    println!(
        "{} Target: {}",
        "→".blue(),
        config_dir.display().to_string().bright_white()
    );
    println!();

    // Check for an existing installation
    if (UrlStore::exists(&db_path) || patterns_path.exists()) && !force {
        println!("{}", "⚠ WARNING".yellow().bold());
        println!("Existing installation found:");
        if UrlStore::exists(&db_path) {
            println!(
                "  {} {}",
                "•".yellow(),
                db_path.display().to_string().bright_white()
            );
        }
        if patterns_path.exists() {
            println!(
                "  {} {}",
                "•".yellow(),
                patterns_path.display().to_string().bright_white()
            );
        }
        println!();
        println!("{}", "This operation will overwrite existing files.".yellow());

        let response = print_prompt("Do you want to continue? [y/N]:");
        println!();

        if response != "y" && response != "yes" {
            println!("{} Initialization cancelled.", "✗".red().bold());
            return Ok(());
        }
        println!("{} Proceeding with overwrite", "→".yellow().bold());
        println!();
    }

    println!("{} Creating directory structure...", "→".blue());
    fs::create_dir_all(config_dir)
        .with_context(|| format!("failed to create {}", config_dir.display()))?;

    println!("{} Installing default patterns...", "→".blue());
    fs::write(&patterns_path, DEFAULT_PATTERNS)
        .with_context(|| format!("failed to write {}", patterns_path.display()))?;

    if force && UrlStore::exists(&db_path) {
        println!("{} Deleting existing database (force mode)", "→".yellow().bold());
        fs::remove_file(&db_path)
            .with_context(|| format!("failed to remove {}", db_path.display()))?;
    }

    UrlStore::open(&db_path)
        .with_context(|| format!("failed to create database {}", db_path.display()))?;

    println!();
    print_divider();
    println!("{}", "  INITIALIZATION COMPLETE".green().bold());
    print_divider();
    println!();
    println!(
        "{} Database: {}",
        "✓".green().bold(),
        db_path.display().to_string().bright_white()
    );
    println!(
        "{} Patterns: {}",
        "✓".green().bold(),
        patterns_path.display().to_string().bright_white()
    );
    println!();

    Ok(())
}

pub fn handle_add(args: &ArgMatches) -> Result<()> {
    let target = args.get_one::<String>("target").unwrap();
    let url = args.get_one::<String>("url").unwrap();
    let found = args.get_flag("found");

    let (db_path, store) = open_store(args)?;
    let classifier = load_classifier(&db_path)?;
    let scope = HostScope::single(target);
    let importer = UrlImporter::new(&store, &classifier, &scope);

    let stored = importer.add_url(target, url, if found { Some(true) } else { None })?;
    if stored {
        println!(
            "{} Stored {} for {}",
            "✓".green().bold(),
            url.bright_white(),
            target.cyan()
        );
    } else {
        println!("{} Rejected {} (not a URL)", "→".yellow(), url);
    }

    Ok(())
}

pub fn handle_import(args: &ArgMatches) -> Result<()> {
    let target = args.get_one::<String>("target").unwrap();
    let file = args.get_one::<PathBuf>("file").unwrap();

    let candidates = read_url_lines(file)?;

    let (db_path, store) = open_store(args)?;
    let classifier = load_classifier(&db_path)?;
    let scope = HostScope::single(target);
    let importer = UrlImporter::new(&store, &classifier, &scope);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message(format!("Importing {} candidates...", candidates.len()));

    let outcome = importer.import_urls(target, &candidates)?;
    spinner.finish_and_clear();

    let rejected = candidates.len() - outcome.accepted.len();
    println!(
        "{} {} accepted, {} new, {} rejected",
        "✓".green().bold(),
        outcome.accepted.len().to_string().bright_white(),
        outcome.new_records.to_string().bright_white(),
        rejected.to_string().yellow()
    );

    Ok(())
}

pub fn handle_urls(args: &ArgMatches) -> Result<()> {
    let target = args.get_one::<String>("target").unwrap();
    let format = args.get_one::<String>("format").unwrap();

    let mut filter = UrlFilter {
        visited: args.get_one::<bool>("visited").copied(),
        scope: args.get_one::<bool>("scope").copied(),
        offset: args.get_one::<u64>("offset").copied(),
        limit: args.get_one::<u64>("limit").copied(),
        ..UrlFilter::default()
    };

    if let Some(needle) = args.get_one::<String>("search") {
        filter.search = true;
        filter.url = Some(UrlMatch::Exact(needle.clone()));
    } else {
        let urls: Vec<String> = args
            .get_many::<String>("url")
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        filter.url = match urls.len() {
            0 => None,
            1 => Some(UrlMatch::Exact(urls.into_iter().next().unwrap())),
            _ => Some(UrlMatch::AnyOf(urls)),
        };
    }

    let (_db_path, store) = open_store(args)?;
    let outcome = store.search_all(target, &filter)?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!(
        "{} {} of {} URLs match",
        "→".blue(),
        outcome.records_filtered.to_string().bright_white(),
        outcome.records_total
    );
    for record in &outcome.data {
        let visited = if record.visited {
            "✓".green().bold()
        } else {
            "·".bright_black()
        };
        let scope = if record.scope {
            "in-scope ".bright_green()
        } else {
            "out      ".bright_black()
        };
        println!("  {} {} {}", visited, scope, record.url.bright_white());
    }

    Ok(())
}

pub fn handle_pending(args: &ArgMatches) -> Result<()> {
    let target = args.get_one::<String>("target").unwrap();
    let (_db_path, store) = open_store(args)?;

    let pending = store.unvisited(target)?;
    println!(
        "{} {} URLs awaiting a visit",
        "→".blue(),
        pending.len().to_string().bright_white()
    );
    for url in pending {
        println!("  {}", url);
    }

    Ok(())
}

pub fn handle_count(args: &ArgMatches) -> Result<()> {
    let target = args.get_one::<String>("target").unwrap();
    let (_db_path, store) = open_store(args)?;

    let count = store.count_all(target)?;
    println!(
        "{} {} URLs stored for {}",
        "→".blue(),
        count.to_string().bright_white(),
        target.cyan()
    );

    Ok(())
}
