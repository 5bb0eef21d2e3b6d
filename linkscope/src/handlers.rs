use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, Utc};
use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use linkscope_core::config::TierPolicy;
use linkscope_core::prefs::{OptimizationArea, PrimaryGoal, Timeline};
use linkscope_core::preview::preview_score;
use linkscope_core::report::{ReportFormat, render, report_file_name, save_report};
use linkscope_core::score::{Priority, ScoredPage};
use linkscope_core::{AnalysisConfig, BusinessPreferences, PageStore, SiteAnalysis, analyze_site};
use linkscope_ingest::ExportReader;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

// Helper functions shared by the handlers

/// Load the analysis configuration, then apply a `--policy` override.
pub fn load_config(config_path: Option<&PathBuf>, policy: Option<&str>) -> Result<AnalysisConfig> {
    let mut config = match config_path {
        Some(path) => {
            let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
            AnalysisConfig::load(Path::new(&expanded))
                .with_context(|| format!("Failed to load configuration {}", path.display()))?
        }
        None => AnalysisConfig::default(),
    };

    if let Some(policy) = policy {
        let policy =
            TierPolicy::from_str(policy).ok_or_else(|| anyhow!("Unknown tier policy '{}'", policy))?;
        config = config.with_policy(policy);
    }

    Ok(config)
}

/// Parse `--format` values, dropping duplicates but keeping their order.
pub fn parse_formats<'a, I>(values: I) -> Result<Vec<ReportFormat>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut formats = Vec::new();
    for value in values {
        let format =
            ReportFormat::from_str(value).ok_or_else(|| anyhow!("Unknown report format '{}'", value))?;
        if !formats.contains(&format) {
            formats.push(format);
        }
    }
    Ok(formats)
}

pub fn build_preferences(args: &ArgMatches) -> Result<BusinessPreferences> {
    let goal = args.get_one::<String>("goal").map(String::as_str).unwrap_or("balanced");
    let goal = PrimaryGoal::from_str(goal).ok_or_else(|| anyhow!("Unknown goal '{}'", goal))?;

    let timeline = args
        .get_one::<String>("timeline")
        .map(String::as_str)
        .unwrap_or("moderate");
    let timeline =
        Timeline::from_str(timeline).ok_or_else(|| anyhow!("Unknown timeline '{}'", timeline))?;

    let mut prefs = BusinessPreferences::new(goal)
        .with_timeline(timeline)
        .with_action_plan(args.get_flag("action-plan"));

    if let Some(areas) = args.get_many::<String>("areas") {
        for area in areas.filter(|a| !a.trim().is_empty()) {
            let parsed = OptimizationArea::from_str(area)
                .ok_or_else(|| anyhow!("Unknown optimization area '{}'", area.trim()))?;
            prefs = prefs.with_area(parsed);
        }
    }

    Ok(prefs)
}

/// Read a crawl export into a page store, reporting row progress on `spinner`.
pub fn load_store(path: &Path, config: &AnalysisConfig, spinner: Option<&ProgressBar>) -> Result<PageStore> {
    let mut reader = ExportReader::new();
    if let Some(spinner) = spinner {
        let spinner = spinner.clone();
        reader = reader.with_progress_callback(Arc::new(move |rows: usize| {
            spinner.set_message(format!("Reading crawl export... {} rows", rows));
        }));
    }

    let rows = reader
        .read_path(path)
        .with_context(|| format!("Failed to read crawl export {}", path.display()))?;
    let store = PageStore::from_rows(&rows, &config.classifier);
    info!("Loaded {} pages from {}", store.len(), path.display());
    Ok(store)
}

/// Render and save every non-text format, returning the written paths.
pub fn write_reports(
    analysis: &SiteAnalysis,
    prefs: &BusinessPreferences,
    formats: &[ReportFormat],
    output_dir: &Path,
    timestamp: DateTime<Utc>,
) -> Result<Vec<(ReportFormat, PathBuf)>> {
    let mut written = Vec::new();
    for format in formats.iter().filter(|f| **f != ReportFormat::Text) {
        let content = render(*format, analysis, prefs)
            .with_context(|| format!("Failed to render {} report", format.as_str()))?;
        let path = output_dir.join(report_file_name(*format, timestamp));
        save_report(&content, &path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        debug!("Wrote {} report to {}", format.as_str(), path.display());
        written.push((*format, path));
    }
    Ok(written)
}

/// Open a file with the platform's default handler.
pub fn open_in_browser(path: &Path) -> Result<()> {
    let opener = if cfg!(target_os = "macos") {
        Command::new("open").arg(path).status()
    } else if cfg!(target_os = "windows") {
        Command::new("cmd").args(["/C", "start", ""]).arg(path).status()
    } else {
        Command::new("xdg-open").arg(path).status()
    };

    let status = opener.with_context(|| format!("Failed to open {}", path.display()))?;
    if !status.success() {
        bail!("Browser launcher exited with {}", status);
    }
    Ok(())
}

fn new_spinner(message: &str, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(message.to_string());
    spinner
}

fn print_divider() {
    println!("{}", "═".repeat(60).bright_blue().bold());
}

fn priority_tag(priority: Priority) -> colored::ColoredString {
    match priority {
        Priority::High => "HIGH".red().bold(),
        Priority::Medium => "MEDIUM".yellow().bold(),
        Priority::Low => "LOW".green().bold(),
    }
}

fn export_path(args: &ArgMatches) -> Result<&PathBuf> {
    args.get_one::<PathBuf>("CSV")
        .ok_or_else(|| anyhow!("A crawl export CSV is required"))
}

fn config_from_args(args: &ArgMatches) -> Result<AnalysisConfig> {
    load_config(
        args.get_one::<PathBuf>("config"),
        args.get_one::<String>("policy").map(String::as_str),
    )
}

pub fn handle_analyze(args: &ArgMatches, quiet: bool) -> Result<()> {
    let csv_path = export_path(args)?;
    let config = config_from_args(args)?;
    let prefs = build_preferences(args)?;
    let formats = parse_formats(
        args.get_many::<String>("format")
            .into_iter()
            .flatten()
            .map(String::as_str),
    )?;
    let output_dir = args
        .get_one::<String>("output-dir")
        .map(String::as_str)
        .unwrap_or("./reports");
    let output_dir = PathBuf::from(shellexpand::tilde(output_dir).into_owned());

    let spinner = new_spinner("Reading crawl export...", quiet);
    let store = match load_store(csv_path, &config, Some(&spinner)) {
        Ok(store) => store,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e);
        }
    };
    if store.is_empty() {
        warn!("{} contains no pages", csv_path.display());
    }

    spinner.set_message(format!("Analyzing {} pages...", store.len()));
    let analysis = analyze_site(&store, &prefs, &config);
    spinner.finish_and_clear();

    if formats.contains(&ReportFormat::Text) {
        print!("{}", render(ReportFormat::Text, &analysis, &prefs)?);
    }

    let written = write_reports(&analysis, &prefs, &formats, &output_dir, Utc::now())?;
    if !quiet {
        for (format, path) in &written {
            println!(
                "{} {} report: {}",
                "✓".green().bold(),
                format.as_str(),
                path.display().to_string().bright_white()
            );
        }
    }

    if args.get_flag("open") {
        match written.iter().find(|(format, _)| *format == ReportFormat::Html) {
            Some((_, path)) => open_in_browser(path)?,
            None => warn!("--open ignored: no HTML report was requested"),
        }
    }

    Ok(())
}

pub fn handle_search(args: &ArgMatches) -> Result<()> {
    let csv_path = export_path(args)?;
    let query = args
        .get_one::<String>("QUERY")
        .ok_or_else(|| anyhow!("A search query is required"))?;
    let limit = *args.get_one::<usize>("limit").unwrap_or(&10);
    let config = config_from_args(args)?;
    let store = load_store(csv_path, &config, None)?;

    let suggestions = store.suggestions(query, limit);
    if suggestions.is_empty() {
        println!("{} No pages match '{}'", "✗".red().bold(), query);
        return Ok(());
    }

    println!(
        "{} {} page(s) matching '{}'",
        "→".blue(),
        suggestions.len(),
        query.bright_white()
    );
    println!();
    for page in suggestions {
        println!(
            "  {:>6}  {}",
            format!("{:.1}", page.ilr).cyan(),
            page.display_title().bright_white()
        );
        println!("          {}", page.url.dimmed());
    }
    Ok(())
}

pub fn handle_page(args: &ArgMatches) -> Result<()> {
    let csv_path = export_path(args)?;
    let url = args
        .get_one::<String>("URL")
        .ok_or_else(|| anyhow!("A page URL is required"))?;
    let config = config_from_args(args)?;
    let goal = args.get_one::<String>("goal").map(String::as_str).unwrap_or("balanced");
    let goal = PrimaryGoal::from_str(goal).ok_or_else(|| anyhow!("Unknown goal '{}'", goal))?;

    let store = load_store(csv_path, &config, None)?;
    if store.page_by_url(url).is_none() {
        let hint = store
            .suggestions(url, 3)
            .iter()
            .map(|p| p.url.clone())
            .collect::<Vec<_>>();
        if hint.is_empty() {
            bail!("No page with URL {} in {}", url, csv_path.display());
        }
        bail!("No page with URL {}. Did you mean: {}", url, hint.join(", "));
    }

    let analysis = analyze_site(&store, &BusinessPreferences::new(goal), &config);
    let scored = analysis
        .page_scores
        .iter()
        .find(|s| &s.page.url == url)
        .ok_or_else(|| anyhow!("Page {} was not scored", url))?;

    print_page_details(scored, preview_score(&scored.page, goal), goal);
    Ok(())
}

fn print_page_details(scored: &ScoredPage, preview: u8, goal: PrimaryGoal) {
    let page = &scored.page;
    print_divider();
    println!("  {}", page.display_title().bright_white().bold());
    print_divider();
    println!("{} {}", "URL:".blue(), page.url);
    println!(
        "{} {}",
        "Tier:".blue(),
        page.tier.map(|t| t.label()).unwrap_or("Unclassified")
    );
    println!("{} {}", "Type:".blue(), page.page_type.as_str());
    println!(
        "{} ILR {:.1}, {} incoming, {} outgoing, depth {}",
        "Links:".blue(),
        page.ilr,
        page.incoming_links,
        page.outgoing_links,
        page.crawl_depth
    );
    println!();
    println!(
        "{} {}/100 ({})",
        "Score:".bright_white().bold(),
        scored.total.to_string().cyan().bold(),
        scored.grade.as_str()
    );
    let breakdown = &scored.breakdown;
    for (label, value) in [
        ("Links", breakdown.link_score),
        ("Tier", breakdown.tier_score),
        ("Technical", breakdown.technical_score),
        ("Content", breakdown.content_score),
        ("Clusters", breakdown.cluster_score),
    ] {
        println!("  {:<10} {:>3}", label, value);
    }
    println!(
        "  {:<10} {:>3} ({} goal)",
        "Preview",
        preview,
        goal.as_str()
    );

    println!();
    if scored.recommendations.is_empty() {
        println!("{} No recommendations", "✓".green().bold());
        return;
    }
    println!("{}", "RECOMMENDATIONS".bright_blue().bold());
    for rec in &scored.recommendations {
        println!("  [{}] {}", priority_tag(rec.priority), rec.action);
        println!("         {}", rec.impact.dimmed());
    }
}

pub fn handle_clusters(args: &ArgMatches) -> Result<()> {
    let csv_path = export_path(args)?;
    let config = config_from_args(args)?;
    let store = load_store(csv_path, &config, None)?;
    let analysis = analyze_site(&store, &BusinessPreferences::default(), &config);

    if analysis.clusters.is_empty() {
        println!("{} No topic clusters detected", "ℹ".blue());
        return Ok(());
    }

    for cluster in &analysis.clusters {
        println!(
            "{} {} ({}, {} pages)",
            "●".cyan(),
            cluster.name.bright_white().bold(),
            cluster.kind.as_str(),
            cluster.size()
        );
        println!("  {} {}", "hub".green().bold(), cluster.hub.url);
        for spoke in &cluster.spokes {
            println!("    {} {}", "→".blue(), spoke.url);
        }
        println!();
    }
    Ok(())
}

pub fn handle_config() -> Result<()> {
    let json = AnalysisConfig::default()
        .to_json()
        .context("Failed to serialize the default configuration")?;
    println!("{}", json);
    Ok(())
}
