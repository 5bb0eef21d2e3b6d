// Tests for report rendering and saving

use chrono::{TimeZone, Utc};
use linkscope_core::analysis::analyze_pages;
use linkscope_core::config::AnalysisConfig;
use linkscope_core::page::{PageRecord, PageType};
use linkscope_core::prefs::{BusinessPreferences, PrimaryGoal, Timeline};
use linkscope_core::report::{
    ActionPlan, ReportFormat, escape_html, generate_csv_report, generate_html_report,
    generate_json_report, generate_markdown_report, generate_text_report, render,
    report_file_name, save_report,
};
use linkscope_core::SiteAnalysis;
use tempfile::TempDir;

fn page(slug: &str, title: &str, page_type: PageType, ilr: f64, incoming: u32) -> PageRecord {
    let mut page = PageRecord::new(&format!("https://example.com/{}/", slug));
    page.title = title.to_string();
    page.page_type = page_type;
    page.ilr = ilr;
    page.incoming_links = incoming;
    page.outgoing_links = 15;
    page.http_status = 200;
    page.load_time = 1.2;
    page.in_sitemap = true;
    page
}

fn sample_analysis(prefs: &BusinessPreferences) -> SiteAnalysis {
    let pages = vec![
        page(
            "office-building-cleaning",
            "Office Building Cleaning",
            PageType::Service,
            99.0,
            70,
        ),
        page("about", "About <Us> & \"Team\"", PageType::Supporting, 80.0, 30),
        page("blog/floor-tips", "Floor Tips", PageType::Blog, 40.0, 1),
    ];
    analyze_pages(&pages, prefs, &AnalysisConfig::default())
}

// ============================================================================
// Format Tests
// ============================================================================

#[test]
fn test_report_format_from_str() {
    assert_eq!(ReportFormat::from_str("text"), Some(ReportFormat::Text));
    assert_eq!(ReportFormat::from_str("console"), Some(ReportFormat::Text));
    assert_eq!(ReportFormat::from_str("MD"), Some(ReportFormat::Markdown));
    assert_eq!(ReportFormat::from_str("markdown"), Some(ReportFormat::Markdown));
    assert_eq!(ReportFormat::from_str("Html"), Some(ReportFormat::Html));
    assert_eq!(ReportFormat::from_str("csv"), Some(ReportFormat::Csv));
    assert_eq!(ReportFormat::from_str("json"), Some(ReportFormat::Json));
    assert_eq!(ReportFormat::from_str("pdf"), None);
}

#[test]
fn test_report_file_name() {
    let timestamp = Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap();

    assert_eq!(
        report_file_name(ReportFormat::Markdown, timestamp),
        "internal-linking-report-2025-03-14T09-26-53.md"
    );
    assert_eq!(
        report_file_name(ReportFormat::Csv, timestamp),
        "internal-linking-data-2025-03-14T09-26-53.csv"
    );
    assert_eq!(
        report_file_name(ReportFormat::Html, timestamp),
        "internal-linking-report-2025-03-14T09-26-53.html"
    );
}

// ============================================================================
// Action Plan Tests
// ============================================================================

#[test]
fn test_action_plan_timelines() {
    let aggressive = ActionPlan::for_timeline(Timeline::Aggressive);
    assert_eq!((aggressive.weeks, aggressive.tasks_per_week), (4, 8));

    let moderate = ActionPlan::for_timeline(Timeline::Moderate);
    assert_eq!((moderate.weeks, moderate.tasks_per_week), (12, 4));

    let gradual = ActionPlan::for_timeline(Timeline::Gradual);
    assert_eq!((gradual.weeks, gradual.tasks_per_week), (24, 2));
}

#[test]
fn test_action_plan_phases_mention_orphans() {
    let phases = ActionPlan::for_timeline(Timeline::Moderate).phases(7);

    assert_eq!(phases.len(), 3);
    assert!(phases[0].tasks[0].contains("Fix 7 orphaned pages"));
    assert_eq!(phases[1].title, "Phase 2: Content Optimization (Weeks 3-8)");
}

// ============================================================================
// Text Report Tests
// ============================================================================

#[test]
fn test_text_report_sections() {
    let prefs = BusinessPreferences::default();
    let report = generate_text_report(&sample_analysis(&prefs), &prefs);

    assert!(report.contains("INTERNAL LINKING REPORT CARD"));
    assert!(report.contains("OVERALL SITE SCORE"));
    assert!(report.contains("TIER DISTRIBUTION"));
    assert!(report.contains("KEY METRICS"));
    assert!(report.contains("TOP OPTIMIZATION OPPORTUNITIES"));
    assert!(report.contains("PAGES NEEDING ATTENTION"));
    assert!(report.contains("Total Pages Analyzed: 3"));
    assert!(!report.contains("IMPLEMENTATION ACTION PLAN"));
}

#[test]
fn test_text_report_action_plan() {
    let prefs = BusinessPreferences::default()
        .with_timeline(Timeline::Aggressive)
        .with_action_plan(true);
    let report = generate_text_report(&sample_analysis(&prefs), &prefs);

    assert!(report.contains("IMPLEMENTATION ACTION PLAN"));
    assert!(report.contains("Timeline: aggressive (4 weeks)"));
    assert!(report.contains("Recommended Tasks Per Week: 8"));
}

// ============================================================================
// Markdown Report Tests
// ============================================================================

#[test]
fn test_markdown_report_content() {
    let prefs = BusinessPreferences::new(PrimaryGoal::Conversions);
    let analysis = sample_analysis(&prefs);
    let report = generate_markdown_report(&analysis, &prefs);

    assert!(report.starts_with("# Internal Linking Optimization Report"));
    assert!(report.contains(&format!(
        "### Overall Site Score: {}/100 ({})",
        analysis.overall.score,
        analysis.overall.grade.as_str()
    )));
    assert!(report.contains("Optimize Money Pages for Conversions"));
    assert!(report.contains("**Affected Page:** [Floor Tips](https://example.com/blog/floor-tips/)"));
    assert!(report.contains("## Implementation Timeline"));
}

// ============================================================================
// HTML Report Tests
// ============================================================================

#[test]
fn test_html_report_escapes_titles() {
    let prefs = BusinessPreferences::default();
    let report = generate_html_report(&sample_analysis(&prefs), &prefs);

    assert!(report.starts_with("<!DOCTYPE html>"));
    assert!(report.contains("About &lt;Us&gt; &amp; &quot;Team&quot;"));
    assert!(!report.contains("About <Us>"));
    assert!(report.trim_end().ends_with("</html>"));
}

#[test]
fn test_html_report_action_plan_optional() {
    let prefs = BusinessPreferences::default();
    let without = generate_html_report(&sample_analysis(&prefs), &prefs);
    assert!(!without.contains("Implementation Action Plan"));

    let prefs = prefs.with_action_plan(true);
    let with = generate_html_report(&sample_analysis(&prefs), &prefs);
    assert!(with.contains("Implementation Action Plan"));
}

#[test]
fn test_escape_html() {
    assert_eq!(escape_html("a < b && c > 'd'"), "a &lt; b &amp;&amp; c &gt; &#39;d&#39;");
    assert_eq!(escape_html("plain"), "plain");
}

// ============================================================================
// CSV Report Tests
// ============================================================================

#[test]
fn test_csv_report_rows() {
    let prefs = BusinessPreferences::default();
    let analysis = sample_analysis(&prefs);
    let report = generate_csv_report(&analysis).unwrap();

    let mut reader = csv::Reader::from_reader(report.as_bytes());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.len(), 11);
    assert_eq!(&headers[0], "URL");
    assert_eq!(&headers[10], "Top Recommendation");

    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 3);
    assert_eq!(&records[0][0], analysis.page_scores[0].page.url);
    assert_eq!(&records[0][6], analysis.page_scores[0].total.to_string());
}

#[test]
fn test_csv_report_quotes_titles() {
    let prefs = BusinessPreferences::default();
    let report = generate_csv_report(&sample_analysis(&prefs)).unwrap();

    let mut reader = csv::Reader::from_reader(report.as_bytes());
    let titles: Vec<String> = reader
        .records()
        .map(|r| r.unwrap()[1].to_string())
        .collect();
    assert!(titles.contains(&"About <Us> & \"Team\"".to_string()));
}

// ============================================================================
// JSON Report Tests
// ============================================================================

#[test]
fn test_json_report_structure() {
    let prefs = BusinessPreferences::new(PrimaryGoal::Traffic);
    let analysis = sample_analysis(&prefs);
    let report = generate_json_report(&analysis, &prefs).unwrap();

    let value: serde_json::Value = serde_json::from_str(&report).unwrap();
    assert_eq!(value["report"]["metadata"]["generator"], "Linkscope");
    assert_eq!(value["report"]["preferences"]["primary_goal"], "traffic");
    assert_eq!(
        value["report"]["analysis"]["overall"]["total_pages"],
        serde_json::json!(3)
    );
    assert_eq!(
        value["report"]["analysis"]["page_scores"]
            .as_array()
            .map(|a| a.len()),
        Some(3)
    );
}

#[test]
fn test_render_dispatches_on_format() {
    let prefs = BusinessPreferences::default();
    let analysis = sample_analysis(&prefs);

    let html = render(ReportFormat::Html, &analysis, &prefs).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));

    let csv = render(ReportFormat::Csv, &analysis, &prefs).unwrap();
    assert!(csv.starts_with("URL,Page Title"));
}

// ============================================================================
// Save Tests
// ============================================================================

#[test]
fn test_save_report_creates_directories() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("reports").join("report.md");

    save_report("# Report\n", &path).unwrap();

    assert!(path.exists());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Report\n");
}

#[test]
fn test_save_report_overwrites() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("report.txt");

    save_report("first", &path).unwrap();
    save_report("second", &path).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
}
