// Report rendering for a finished site analysis

use crate::analysis::{DistributionStatus, SiteAnalysis};
use crate::error::{CoreError, Result};
use crate::page::Tier;
use crate::prefs::{BusinessPreferences, Timeline};
use crate::preview::ScoreBand;
use crate::score::{Priority, ScoredPage};
use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Markdown,
    Html,
    Csv,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "console" => Some(ReportFormat::Text),
            "markdown" | "md" => Some(ReportFormat::Markdown),
            "html" => Some(ReportFormat::Html),
            "csv" => Some(ReportFormat::Csv),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Text => "text",
            ReportFormat::Markdown => "markdown",
            ReportFormat::Html => "html",
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Markdown => "md",
            ReportFormat::Html => "html",
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
        }
    }

    /// File name prefix; the CSV export is page data rather than a report.
    pub fn file_stem(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "internal-linking-data",
            _ => "internal-linking-report",
        }
    }
}

/// Render `analysis` in the given format.
pub fn render(
    format: ReportFormat,
    analysis: &SiteAnalysis,
    prefs: &BusinessPreferences,
) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(generate_text_report(analysis, prefs)),
        ReportFormat::Markdown => Ok(generate_markdown_report(analysis, prefs)),
        ReportFormat::Html => Ok(generate_html_report(analysis, prefs)),
        ReportFormat::Csv => generate_csv_report(analysis),
        ReportFormat::Json => generate_json_report(analysis, prefs),
    }
}

/// Pace of the implementation plan for a timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionPlan {
    pub timeline: Timeline,
    pub weeks: u32,
    pub tasks_per_week: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionPhase {
    pub title: String,
    pub tasks: Vec<String>,
}

impl ActionPlan {
    pub fn for_timeline(timeline: Timeline) -> Self {
        let (weeks, tasks_per_week) = match timeline {
            Timeline::Aggressive => (4, 8),
            Timeline::Moderate => (12, 4),
            Timeline::Gradual => (24, 2),
        };
        Self {
            timeline,
            weeks,
            tasks_per_week,
        }
    }

    pub fn phases(&self, orphaned_pages: usize) -> Vec<ActionPhase> {
        vec![
            ActionPhase {
                title: "Phase 1: Quick Wins (Weeks 1-2)".to_string(),
                tasks: vec![
                    format!("Fix {} orphaned pages with minimal internal links", orphaned_pages),
                    "Add strategic internal links to top money pages".to_string(),
                    "Resolve technical issues (404s, slow loading pages)".to_string(),
                ],
            },
            ActionPhase {
                title: format!(
                    "Phase 2: Content Optimization (Weeks 3-{})",
                    (self.weeks * 2 / 3).max(3)
                ),
                tasks: vec![
                    "Optimize supporting page internal link structure".to_string(),
                    "Create topic cluster connections".to_string(),
                    "Balance link distribution across tiers".to_string(),
                ],
            },
            ActionPhase {
                title: "Phase 3: Monitoring & Refinement (Ongoing)".to_string(),
                tasks: vec![
                    "Track ILR improvements weekly".to_string(),
                    "Monitor traffic and conversion impacts".to_string(),
                    "Adjust strategy based on results".to_string(),
                ],
            },
        ]
    }
}

pub fn generate_text_report(analysis: &SiteAnalysis, prefs: &BusinessPreferences) -> String {
    let mut report = String::new();
    let overall = &analysis.overall;

    report.push_str(&format!("{}\n", RULE.blue()));
    report.push_str(&format!(
        "{}\n",
        "                        INTERNAL LINKING REPORT CARD".blue().bold()
    ));
    report.push_str(&format!(
        "                     Generated: {}\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    report.push_str(&format!("{}\n\n", RULE.blue()));

    report.push_str(&section("OVERALL SITE SCORE"));
    let stars = "⭐".repeat((overall.score as usize).div_ceil(20));
    report.push_str(&format!(
        "{}\n",
        paint(
            format!(
                "Score: {}/100 {} (Grade: {})",
                overall.score,
                stars,
                overall.grade.as_str()
            ),
            overall.score
        )
        .bold()
    ));
    report.push_str(&format!("Total Pages Analyzed: {}\n\n", overall.total_pages));

    report.push_str(&section("TIER DISTRIBUTION"));
    for tier in Tier::ALL {
        let share = analysis.distribution.get(tier);
        report.push_str(&format!(
            "• {}: {} ({}%) - {} {} (ideal {})\n",
            tier.label(),
            share.count,
            share.percentage,
            status_emoji(share.status),
            share.status.as_str(),
            share.ideal
        ));
    }
    report.push('\n');

    report.push_str(&section("TIER PERFORMANCE ANALYSIS"));
    for tier in Tier::ALL {
        report.push_str(&format!(
            "• {} Average Score: {}/100\n",
            tier.label(),
            analysis.tier_scores.get(tier)
        ));
    }
    report.push('\n');

    let analytics = &analysis.analytics;
    report.push_str(&section("KEY METRICS"));
    report.push_str(&format!("• Average ILR: {}\n", analytics.averages.ilr));
    report.push_str(&format!(
        "• Average Incoming Links: {}\n",
        analytics.averages.incoming_links
    ));
    report.push_str(&format!("• Average Load Time: {}s\n", analytics.averages.load_time));
    report.push_str(&format!("• Orphaned Pages: {}\n", analytics.orphaned_pages));
    report.push_str(&format!(
        "• High Performers (ILR >= 90): {}\n",
        analytics.high_performing_pages
    ));
    report.push_str(&format!(
        "• Under Performers (ILR < 50): {}\n",
        analytics.low_performing_pages
    ));
    report.push_str(&format!(
        "• Link Equity Flow: {}/100 ({})\n\n",
        analysis.link_equity_flow.score,
        analysis.link_equity_flow.status.as_str()
    ));

    report.push_str(&section("TOP OPTIMIZATION OPPORTUNITIES"));
    if analysis.opportunities.is_empty() {
        report.push_str("  No optimization opportunities found.\n");
    }
    for (idx, opp) in analysis.opportunities.iter().take(5).enumerate() {
        report.push_str(&format!(
            "{}. [{}] {}\n",
            idx + 1,
            priority_label(opp.priority),
            opp.issue
        ));
        report.push_str(&wrap_text(&format!("→ {}", opp.recommendation), 80, "   "));
        report.push_str(&wrap_text(&opp.impact, 80, "   ").dimmed().to_string());
        report.push('\n');
    }
    report.push('\n');

    report.push_str(&section("STRATEGIC RECOMMENDATIONS"));
    for (idx, rec) in analysis.recommendations.iter().take(3).enumerate() {
        report.push_str(&format!(
            "{}. [{}] {}\n",
            idx + 1,
            priority_label(rec.priority),
            rec.title
        ));
        report.push_str(&wrap_text(&rec.action, 80, "   "));
        report.push_str(&wrap_text(&rec.impact, 80, "   ").dimmed().to_string());
        report.push('\n');
    }
    report.push('\n');

    if !analysis.clusters.is_empty() {
        report.push_str(&section("TOPIC CLUSTERS"));
        for cluster in &analysis.clusters {
            report.push_str(&format!(
                "• {} [{}]: hub {} + {} spokes\n",
                cluster.name,
                cluster.kind.as_str(),
                cluster.hub.display_title(),
                cluster.spokes.len()
            ));
        }
        report.push('\n');
    }

    report.push_str(&section("TOP PERFORMING PAGES"));
    for (idx, scored) in analysis.top_pages(5).iter().enumerate() {
        report.push_str(&performer_line(idx, scored));
    }
    report.push('\n');

    report.push_str(&section("PAGES NEEDING ATTENTION"));
    for (idx, scored) in analysis.bottom_pages(5).into_iter().enumerate() {
        report.push_str(&performer_line(idx, scored));
    }
    report.push('\n');

    if prefs.create_action_plan {
        let plan = ActionPlan::for_timeline(prefs.timeline);
        report.push_str(&section("IMPLEMENTATION ACTION PLAN"));
        report.push_str(&format!(
            "Timeline: {} ({} weeks)\n",
            plan.timeline.as_str(),
            plan.weeks
        ));
        report.push_str(&format!(
            "Recommended Tasks Per Week: {}\n\n",
            plan.tasks_per_week
        ));
        for phase in plan.phases(analytics.orphaned_pages) {
            report.push_str(&format!("{}\n", phase.title.to_uppercase().yellow().bold()));
            for task in &phase.tasks {
                report.push_str(&format!("• {}\n", task));
            }
            report.push('\n');
        }
    }

    report
}

pub fn generate_markdown_report(analysis: &SiteAnalysis, prefs: &BusinessPreferences) -> String {
    let overall = &analysis.overall;
    let analytics = &analysis.analytics;
    let mut md = String::new();

    md.push_str("# Internal Linking Optimization Report\n\n");
    md.push_str(&format!(
        "Generated: {}\n\n---\n\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));

    md.push_str("## Executive Summary\n\n");
    md.push_str(&format!(
        "### Overall Site Score: {}/100 ({})\n\n",
        overall.score,
        overall.grade.as_str()
    ));
    md.push_str(&format!(
        "Based on {} pages analyzed, here are the key findings:\n\n",
        overall.total_pages
    ));

    md.push_str("**Tier Distribution:**\n");
    for tier in Tier::ALL {
        let share = analysis.distribution.get(tier);
        md.push_str(&format!(
            "- {}: {} pages ({}%) - Status: {} (ideal {}), average score {}/100\n",
            tier.label(),
            share.count,
            share.percentage,
            share.status.as_str(),
            share.ideal,
            analysis.tier_scores.get(tier)
        ));
    }
    md.push('\n');

    md.push_str("**Key Metrics:**\n");
    md.push_str(&format!("- Average ILR Score: {}\n", analytics.averages.ilr));
    md.push_str(&format!(
        "- Average Incoming Links: {}\n",
        analytics.averages.incoming_links
    ));
    md.push_str(&format!("- Average Load Time: {}s\n", analytics.averages.load_time));
    md.push_str(&format!("- Orphaned Pages: {}\n", analytics.orphaned_pages));
    md.push_str(&format!(
        "- High Performers (ILR >= 90): {}\n",
        analytics.high_performing_pages
    ));
    md.push_str(&format!(
        "- Under Performers (ILR < 50): {}\n",
        analytics.low_performing_pages
    ));
    md.push_str(&format!(
        "- Link Equity Flow: {}/100 ({})\n\n---\n\n",
        analysis.link_equity_flow.score,
        analysis.link_equity_flow.status.as_str()
    ));

    md.push_str("## Top Optimization Opportunities\n\n");
    for (idx, opp) in analysis.opportunities.iter().enumerate() {
        md.push_str(&format!(
            "### {}. {} [{} Priority]\n\n",
            idx + 1,
            opp.issue,
            opp.priority.as_str().to_uppercase()
        ));
        md.push_str(&format!("**Recommendation:** {}\n\n", opp.recommendation));
        md.push_str(&format!("**Impact:** {}\n\n", opp.impact));
        if let Some(ref page) = opp.page {
            md.push_str(&format!(
                "**Affected Page:** [{}]({})\n\n",
                page.display_title(),
                page.url
            ));
        }
    }
    md.push_str("---\n\n");

    md.push_str("## Strategic Recommendations\n\n");
    for (idx, rec) in analysis.recommendations.iter().take(5).enumerate() {
        md.push_str(&format!(
            "### {}. {} [{} Priority]\n\n",
            idx + 1,
            rec.title,
            rec.priority.as_str().to_uppercase()
        ));
        md.push_str(&format!("**Action:** {}\n\n", rec.action));
        md.push_str(&format!("**Impact:** {}\n\n", rec.impact));
        md.push_str(&format!("**Category:** {}\n\n", rec.category.as_str()));
        for page in &rec.pages {
            md.push_str(&format!("- [{}]({})\n", page.display_title(), page.url));
        }
        if !rec.pages.is_empty() {
            md.push('\n');
        }
    }
    md.push_str("---\n\n");

    if !analysis.clusters.is_empty() {
        md.push_str("## Topic Clusters\n\n");
        for cluster in &analysis.clusters {
            md.push_str(&format!(
                "### {} ({})\n\n",
                cluster.name,
                cluster.kind.as_str()
            ));
            md.push_str(&format!(
                "- **Hub:** [{}]({})\n",
                cluster.hub.display_title(),
                cluster.hub.url
            ));
            for spoke in &cluster.spokes {
                md.push_str(&format!(
                    "- Spoke: [{}]({})\n",
                    spoke.display_title(),
                    spoke.url
                ));
            }
            md.push('\n');
        }
        md.push_str("---\n\n");
    }

    md.push_str("## Page Performance Analysis\n\n### Top Performing Pages\n\n");
    for (idx, scored) in analysis.top_pages(10).iter().enumerate() {
        md.push_str(&format!(
            "{}. **{}** - Score: {}/100 ({})\n",
            idx + 1,
            scored.page.display_title(),
            scored.total,
            scored.grade.as_str()
        ));
        md.push_str(&format!(
            "   - Link Score: {}/100\n   - Technical Score: {}/100\n   - Content Score: {}/100\n",
            scored.breakdown.link_score,
            scored.breakdown.technical_score,
            scored.breakdown.content_score
        ));
    }

    md.push_str("\n### Pages Needing Attention\n\n");
    for (idx, scored) in analysis.bottom_pages(10).into_iter().enumerate() {
        let issues: Vec<&str> = scored
            .recommendations
            .iter()
            .take(2)
            .map(|r| r.action.as_str())
            .collect();
        md.push_str(&format!(
            "{}. **{}** - Score: {}/100 ({})\n",
            idx + 1,
            scored.page.display_title(),
            scored.total,
            scored.grade.as_str()
        ));
        if !issues.is_empty() {
            md.push_str(&format!("   - Primary Issues: {}\n", issues.join(", ")));
        }
    }
    md.push_str("\n---\n\n");

    let plan = ActionPlan::for_timeline(prefs.timeline);
    md.push_str("## Implementation Timeline\n\n");
    md.push_str(&format!(
        "Selected timeline: **{}** ({} weeks, about {} tasks per week)\n\n",
        plan.timeline.as_str(),
        plan.weeks,
        plan.tasks_per_week
    ));
    for phase in plan.phases(analytics.orphaned_pages) {
        md.push_str(&format!("### {}\n", phase.title));
        for task in &phase.tasks {
            md.push_str(&format!("- {}\n", task));
        }
        md.push('\n');
    }

    md.push_str("---\n\n*Report generated by Linkscope*\n");
    md
}

pub fn generate_html_report(analysis: &SiteAnalysis, prefs: &BusinessPreferences) -> String {
    let overall = &analysis.overall;
    let analytics = &analysis.analytics;
    let mut html = String::new();

    html.push_str(HTML_HEAD);
    html.push_str("<div class=\"container\">\n");

    html.push_str("<div class=\"report-card\">\n<div class=\"header\">\n");
    html.push_str("<h1>Internal Linking Report</h1>\n");
    html.push_str(&format!(
        "<div class=\"subtitle\">Generated: {}</div>\n</div>\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str(&format!(
        "<div class=\"score-section\">\n<div class=\"overall-score\" style=\"background: {}\">\n<div>{}</div>\n<div class=\"grade\">{}</div>\n</div>\n",
        ScoreBand::from_score(overall.score as f64).hex(),
        overall.score,
        overall.grade.as_str()
    ));
    html.push_str(&format!(
        "<h2>Overall Optimization Score</h2>\n<p>Based on analysis of {} pages</p>\n</div>\n</div>\n",
        overall.total_pages
    ));

    html.push_str("<div class=\"report-card\">\n<div class=\"metrics-grid\">\n");
    for (label, value, note) in [
        ("Average ILR", analytics.averages.ilr.to_string(), "Internal Link Ratio"),
        (
            "Avg Links",
            analytics.averages.incoming_links.to_string(),
            "Incoming Internal Links",
        ),
        (
            "Orphaned Pages",
            analytics.orphaned_pages.to_string(),
            "Pages with ≤2 links",
        ),
        (
            "Avg Load Time",
            format!("{}s", analytics.averages.load_time),
            "Page Load Speed",
        ),
    ] {
        html.push_str(&format!(
            "<div class=\"metric-card\"><h3>{}</h3><div class=\"metric-value\">{}</div><div class=\"metric-label\">{}</div></div>\n",
            label, value, note
        ));
    }
    html.push_str("</div>\n</div>\n");

    html.push_str("<div class=\"report-card\">\n<div class=\"section\">\n");
    html.push_str("<h2 class=\"section-title\">Tier Distribution Analysis</h2>\n");
    for tier in Tier::ALL {
        let share = analysis.distribution.get(tier);
        html.push_str(&format!(
            "<div class=\"tier-card tier-{}\">\n<h3>{} ({}%)</h3>\n<p><strong>{} pages</strong> - Average Score: {}/100</p>\n<p>Status: {} (Ideal: {})</p>\n</div>\n",
            tier.as_str(),
            tier.label(),
            share.percentage,
            share.count,
            analysis.tier_scores.get(tier),
            share.status.description(),
            escape_html(&share.ideal)
        ));
    }
    html.push_str("</div>\n</div>\n");

    html.push_str("<div class=\"report-card\">\n<div class=\"section\">\n");
    html.push_str("<h2 class=\"section-title\">Top Optimization Opportunities</h2>\n");
    for opp in analysis.opportunities.iter().take(8) {
        html.push_str(&format!(
            "<div class=\"item priority-{p}\">\n<div class=\"priority-badge badge-{p}\">{p} Priority</div>\n<h3>{}</h3>\n<p><strong>Recommendation:</strong> {}</p>\n<p><strong>Impact:</strong> {}</p>\n</div>\n",
            escape_html(&opp.issue),
            escape_html(&opp.recommendation),
            escape_html(&opp.impact),
            p = opp.priority.as_str()
        ));
    }
    html.push_str("</div>\n</div>\n");

    html.push_str("<div class=\"report-card\">\n<div class=\"section\">\n");
    html.push_str("<h2 class=\"section-title\">Strategic Recommendations</h2>\n");
    for rec in analysis.recommendations.iter().take(5) {
        html.push_str(&format!(
            "<div class=\"item priority-{p}\">\n<div class=\"priority-badge badge-{p}\">{p} Priority</div>\n<h3>{}</h3>\n<p><strong>Action:</strong> {}</p>\n<p><strong>Impact:</strong> {}</p>\n</div>\n",
            escape_html(&rec.title),
            escape_html(&rec.action),
            escape_html(&rec.impact),
            p = rec.priority.as_str()
        ));
    }
    html.push_str("</div>\n</div>\n");

    html.push_str("<div class=\"report-card\">\n<div class=\"section\">\n");
    html.push_str("<h2 class=\"section-title\">Page Performance Analysis</h2>\n");
    html.push_str("<div class=\"performers-grid\">\n");
    html.push_str("<div class=\"performer-list\">\n<h3>Top Performers</h3>\n");
    for scored in analysis.top_pages(8) {
        html.push_str(&performer_html(scored));
    }
    html.push_str("</div>\n<div class=\"performer-list\">\n<h3>Needs Attention</h3>\n");
    for scored in analysis.bottom_pages(8) {
        html.push_str(&performer_html(scored));
    }
    html.push_str("</div>\n</div>\n</div>\n</div>\n");

    if prefs.create_action_plan {
        let plan = ActionPlan::for_timeline(prefs.timeline);
        html.push_str("<div class=\"report-card\">\n<div class=\"section action-plan\">\n");
        html.push_str("<h2 class=\"section-title\">Implementation Action Plan</h2>\n");
        html.push_str(&format!(
            "<p class=\"plan-summary\">Timeline: <strong>{}</strong> approach ({} weeks, {} tasks per week)</p>\n",
            plan.timeline.as_str(),
            plan.weeks,
            plan.tasks_per_week
        ));
        for phase in plan.phases(analytics.orphaned_pages) {
            html.push_str(&format!(
                "<div class=\"timeline-phase\">\n<div class=\"phase-title\">{}</div>\n<ul class=\"task-list\">\n",
                escape_html(&phase.title)
            ));
            for task in &phase.tasks {
                html.push_str(&format!("<li>{}</li>\n", escape_html(task)));
            }
            html.push_str("</ul>\n</div>\n");
        }
        html.push_str("</div>\n</div>\n");
    }

    html.push_str("<div class=\"footer\">Report generated by Linkscope</div>\n");
    html.push_str("</div>\n</body>\n</html>\n");
    html
}

/// One row per scored page, best first.
pub fn generate_csv_report(analysis: &SiteAnalysis) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record([
        "URL",
        "Page Title",
        "Tier",
        "ILR Score",
        "Incoming Links",
        "Outgoing Links",
        "Optimization Score",
        "Grade",
        "Load Time",
        "Issues",
        "Top Recommendation",
    ])?;

    for scored in &analysis.page_scores {
        let page = &scored.page;
        let top_recommendation = scored
            .recommendations
            .first()
            .map(|r| r.action.as_str())
            .unwrap_or("No specific recommendation");

        writer.write_record([
            page.url.clone(),
            page.title.clone(),
            page.tier.map(|t| t.as_str()).unwrap_or_default().to_string(),
            page.ilr.to_string(),
            page.incoming_links.to_string(),
            page.outgoing_links.to_string(),
            scored.total.to_string(),
            scored.grade.as_str().to_string(),
            page.load_time.to_string(),
            page.issues.to_string(),
            top_recommendation.to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CoreError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn generate_json_report(
    analysis: &SiteAnalysis,
    prefs: &BusinessPreferences,
) -> Result<String> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "Linkscope",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": Utc::now().to_rfc3339(),
                "format": "json"
            },
            "preferences": prefs,
            "analysis": analysis
        }
    });

    Ok(serde_json::to_string_pretty(&json_report)?)
}

/// `<stem>-<YYYY-MM-DDTHH-MM-SS>.<ext>`, safe on every filesystem.
pub fn report_file_name(format: ReportFormat, timestamp: DateTime<Utc>) -> String {
    format!(
        "{}-{}.{}",
        format.file_stem(),
        timestamp.format("%Y-%m-%dT%H-%M-%S"),
        format.extension()
    )
}

/// Write a report, creating missing parent directories.
pub fn save_report(content: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn section(title: &str) -> String {
    format!("{}\n", title.cyan().bold())
}

fn paint(text: String, score: u8) -> ColoredString {
    match ScoreBand::from_score(score as f64) {
        ScoreBand::Good => text.green(),
        ScoreBand::Fair => text.yellow(),
        ScoreBand::Poor => text.red(),
    }
}

fn priority_label(priority: Priority) -> ColoredString {
    let label = priority.as_str().to_uppercase();
    match priority {
        Priority::High => label.red(),
        Priority::Medium => label.yellow(),
        Priority::Low => label.green(),
    }
}

fn status_emoji(status: DistributionStatus) -> &'static str {
    match status {
        DistributionStatus::Good => "✅",
        DistributionStatus::TooFew => "⬇️",
        DistributionStatus::TooMany => "⬆️",
    }
}

fn performer_line(idx: usize, scored: &ScoredPage) -> String {
    format!(
        "{}. {} - {}\n",
        idx + 1,
        scored.page.display_title(),
        paint(
            format!("{}/100 ({})", scored.total, scored.grade.as_str()),
            scored.total
        )
    )
}

fn performer_html(scored: &ScoredPage) -> String {
    format!(
        "<div class=\"performer-item\"><div class=\"performer-name\">{}</div><div class=\"performer-score\" style=\"background: {}\">{}</div></div>\n",
        escape_html(&truncate(scored.page.display_title(), 40)),
        ScoreBand::from_score(scored.total as f64).hex(),
        scored.total
    )
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}

fn wrap_text(text: &str, width: usize, indent: &str) -> String {
    let mut result = String::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        if !current_line.is_empty()
            && current_line.chars().count() + word.chars().count() + 1 > width - indent.len()
        {
            result.push_str(indent);
            result.push_str(&current_line);
            result.push('\n');
            current_line.clear();
        }

        if !current_line.is_empty() {
            current_line.push(' ');
        }
        current_line.push_str(word);
    }

    if !current_line.is_empty() {
        result.push_str(indent);
        result.push_str(&current_line);
        result.push('\n');
    }

    result
}

const HTML_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Internal Linking Optimization Report</title>
<style>
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #333; background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); min-height: 100vh; }
.container { max-width: 1200px; margin: 0 auto; padding: 20px; }
.report-card { background: white; border-radius: 20px; box-shadow: 0 20px 40px rgba(0,0,0,0.1); overflow: hidden; margin-bottom: 30px; }
.header { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 40px; text-align: center; }
.header h1 { font-size: 2.5em; margin-bottom: 10px; }
.score-section { padding: 40px; text-align: center; background: #f8f9fa; }
.overall-score { display: inline-flex; flex-direction: column; align-items: center; justify-content: center; color: white; padding: 30px; border-radius: 10px; font-size: 3em; font-weight: bold; min-width: 150px; min-height: 150px; margin-bottom: 20px; }
.grade { font-size: 0.4em; margin-top: 10px; }
.metrics-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(250px, 1fr)); gap: 20px; padding: 40px; }
.metric-card { padding: 25px; border-radius: 15px; box-shadow: 0 5px 15px rgba(0,0,0,0.08); text-align: center; border-left: 5px solid #667eea; }
.metric-value { font-size: 2.5em; font-weight: bold; }
.metric-label { color: #666; font-size: 0.9em; }
.section { padding: 40px; }
.section-title { font-size: 2em; margin-bottom: 30px; text-align: center; }
.tier-card, .item { background: #f8f9fa; padding: 25px; border-radius: 15px; margin-bottom: 20px; border-left: 5px solid; }
.tier-money { border-left-color: #28a745; }
.tier-supporting { border-left-color: #ffc107; }
.tier-traffic { border-left-color: #17a2b8; }
.priority-high { border-left-color: #dc3545; }
.priority-medium { border-left-color: #ffc107; }
.priority-low { border-left-color: #28a745; }
.priority-badge { display: inline-block; padding: 5px 12px; border-radius: 20px; font-size: 0.8em; font-weight: bold; text-transform: uppercase; margin-bottom: 10px; }
.badge-high { background: #dc3545; color: white; }
.badge-medium { background: #ffc107; color: #333; }
.badge-low { background: #28a745; color: white; }
.performers-grid { display: grid; grid-template-columns: 1fr 1fr; gap: 30px; }
.performer-list { background: #f8f9fa; padding: 25px; border-radius: 15px; }
.performer-item { display: flex; justify-content: space-between; align-items: center; padding: 15px 0; border-bottom: 1px solid #dee2e6; }
.performer-score { font-weight: bold; padding: 5px 10px; border-radius: 10px; color: white; }
.plan-summary { text-align: center; margin-bottom: 30px; }
.timeline-phase { background: white; padding: 25px; border-radius: 15px; margin-bottom: 20px; box-shadow: 0 5px 15px rgba(0,0,0,0.08); }
.phase-title { color: #667eea; font-size: 1.3em; font-weight: bold; margin-bottom: 15px; }
.task-list { list-style: none; }
.task-list li:before { content: "✓ "; color: #28a745; font-weight: bold; }
.footer { text-align: center; padding: 40px; background: #333; color: white; border-radius: 20px; }
@media (max-width: 768px) { .performers-grid, .metrics-grid { grid-template-columns: 1fr; } }
</style>
</head>
<body>
"#;
