// Site-level aggregation: distribution, analytics, opportunities and
// recommendations over one scored export.

use crate::classify::{TierPartition, classify};
use crate::cluster::{TopicCluster, detect_clusters};
use crate::config::{AnalysisConfig, Band, DistributionBands};
use crate::page::{PageRecord, PageStore, PageType, Tier};
use crate::prefs::{BusinessPreferences, OptimizationArea, PrimaryGoal};
use crate::score::{Grade, Priority, ScoredPage, Scorer, rank_pages};
use serde::Serialize;
use tracing::{debug, info};

const HIGH_PERFORMER_ILR: f64 = 90.0;
const LOW_PERFORMER_ILR: f64 = 50.0;
const HIGH_AUTHORITY_ILR: f64 = 80.0;
const LOW_SERVICE_ILR: f64 = 70.0;
const OVER_LINKED: u32 = 50;
const UNDER_LINKED: u32 = 10;
const EQUITY_LINK_CAP: u32 = 10;
const EQUITY_GOOD_RATIO: f64 = 0.6;
const MAX_OPPORTUNITIES: usize = 10;
const MAX_PERFORMERS: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub struct SiteAnalysis {
    pub overall: OverallScore,
    pub distribution: TierDistribution,
    pub tier_scores: TierScores,
    pub analytics: SiteAnalytics,
    /// Highest priority first, at most ten.
    pub opportunities: Vec<Opportunity>,
    pub link_equity_flow: LinkEquityFlow,
    pub recommendations: Vec<SiteRecommendation>,
    pub clusters: Vec<TopicCluster>,
    /// Every page, best total first.
    pub page_scores: Vec<ScoredPage>,
}

impl SiteAnalysis {
    pub fn top_pages(&self, n: usize) -> &[ScoredPage] {
        &self.page_scores[..n.min(self.page_scores.len())]
    }

    /// The `n` lowest scoring pages, worst first.
    pub fn bottom_pages(&self, n: usize) -> Vec<&ScoredPage> {
        self.page_scores.iter().rev().take(n).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverallScore {
    pub score: u8,
    pub grade: Grade,
    pub total_pages: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DistributionStatus {
    Good,
    TooFew,
    TooMany,
}

impl DistributionStatus {
    /// Compare a raw fraction of the site against the ideal band.
    pub fn for_fraction(fraction: f64, band: &Band) -> Self {
        if fraction >= band.min && fraction <= band.max {
            DistributionStatus::Good
        } else if fraction < band.min {
            DistributionStatus::TooFew
        } else {
            DistributionStatus::TooMany
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DistributionStatus::Good => "good",
            DistributionStatus::TooFew => "too-few",
            DistributionStatus::TooMany => "too-many",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DistributionStatus::Good => "Optimal Distribution",
            DistributionStatus::TooFew => "Need More Pages",
            DistributionStatus::TooMany => "Too Many Pages",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierShare {
    pub count: usize,
    pub percentage: u8,
    pub ideal: String,
    pub status: DistributionStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierDistribution {
    pub money: TierShare,
    pub supporting: TierShare,
    pub traffic: TierShare,
}

impl TierDistribution {
    pub fn get(&self, tier: Tier) -> &TierShare {
        match tier {
            Tier::Money => &self.money,
            Tier::Supporting => &self.supporting,
            Tier::Traffic => &self.traffic,
        }
    }

    pub fn percentage_sum(&self) -> u32 {
        Tier::ALL
            .iter()
            .map(|tier| self.get(*tier).percentage as u32)
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TierScores {
    pub money: u8,
    pub supporting: u8,
    pub traffic: u8,
}

impl TierScores {
    pub fn get(&self, tier: Tier) -> u8 {
        match tier {
            Tier::Money => self.money,
            Tier::Supporting => self.supporting,
            Tier::Traffic => self.traffic,
        }
    }
}

/// Means rounded to two decimals; zero for an empty site.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Averages {
    pub ilr: f64,
    pub incoming_links: f64,
    pub load_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteAnalytics {
    pub total_pages: usize,
    pub orphaned_pages: usize,
    pub high_performing_pages: usize,
    pub low_performing_pages: usize,
    pub averages: Averages,
    /// Up to ten pages with ILR of 90 or more, in input order.
    pub top_performers: Vec<PageRecord>,
    /// Up to ten pages with ILR below 50, in input order.
    pub under_performers: Vec<PageRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EquityStatus {
    Good,
    NeedsImprovement,
}

impl EquityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquityStatus::Good => "good",
            EquityStatus::NeedsImprovement => "needs-improvement",
        }
    }
}

/// Rough proxy for how much authority the strongest pages pass on, based
/// only on their outgoing link counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinkEquityFlow {
    pub score: u8,
    pub high_authority_pages: usize,
    pub low_authority_pages: usize,
    pub status: EquityStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OpportunityKind {
    Orphaned,
    LowIlr,
    Distribution,
}

impl OpportunityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpportunityKind::Orphaned => "orphaned",
            OpportunityKind::LowIlr => "low-ilr",
            OpportunityKind::Distribution => "distribution",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LinkImbalance {
    pub over_linked: usize,
    pub under_linked: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Opportunity {
    pub kind: OpportunityKind,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<PageRecord>,
    pub issue: String,
    pub recommendation: String,
    pub impact: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<LinkImbalance>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationCategory {
    Conversions,
    Traffic,
    Technical,
    Optimization,
    Architecture,
}

impl RecommendationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationCategory::Conversions => "conversions",
            RecommendationCategory::Traffic => "traffic",
            RecommendationCategory::Technical => "technical",
            RecommendationCategory::Optimization => "optimization",
            RecommendationCategory::Architecture => "architecture",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteRecommendation {
    pub priority: Priority,
    pub category: RecommendationCategory,
    pub title: String,
    pub action: String,
    pub impact: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pages: Vec<PageRecord>,
}

/// Run the full pipeline over a page store.
pub fn analyze_site(
    store: &PageStore,
    prefs: &BusinessPreferences,
    config: &AnalysisConfig,
) -> SiteAnalysis {
    analyze_pages(store.pages(), prefs, config)
}

/// Classify, cluster, score and aggregate `pages`. The input is not modified;
/// the analysis owns clones of every record it reports.
pub fn analyze_pages(
    pages: &[PageRecord],
    prefs: &BusinessPreferences,
    config: &AnalysisConfig,
) -> SiteAnalysis {
    let classified = classify(pages, &config.classifier);
    let clusters = detect_clusters(&classified.pages, &classified.partition, &config.clusters);
    debug!("Detected {} topic clusters", clusters.len());

    let scorer = Scorer::new(config, &clusters);
    let scored: Vec<ScoredPage> = classified
        .pages
        .iter()
        .map(|page| scorer.score_page(page))
        .collect();

    let overall = overall_score(&scored);
    let tier_scores = tier_scores(&scored);
    let distribution = tier_distribution(
        &classified.partition,
        classified.pages.len(),
        &config.distribution_bands,
    );
    let analytics = site_analytics(&classified.pages, config);
    let link_equity_flow = link_equity_flow(&classified.pages);

    let mut opportunities = find_opportunities(&classified.pages, config);
    let recommendations = site_recommendations(
        &classified.pages,
        &classified.partition,
        &scored,
        &opportunities,
        &clusters,
        prefs,
        config,
    );
    opportunities.truncate(MAX_OPPORTUNITIES);

    info!(
        "Site score {}/100 ({}) across {} pages",
        overall.score,
        overall.grade.as_str(),
        overall.total_pages
    );

    SiteAnalysis {
        overall,
        distribution,
        tier_scores,
        analytics,
        opportunities,
        link_equity_flow,
        recommendations,
        clusters,
        page_scores: rank_pages(scored),
    }
}

pub fn overall_score(scored: &[ScoredPage]) -> OverallScore {
    let score = round_score(mean(scored.iter().map(|s| s.total as f64)));
    OverallScore {
        score,
        grade: Grade::from_score(score as f64),
        total_pages: scored.len(),
    }
}

/// Mean total per tier, rounded; zero for an empty tier.
pub fn tier_scores(scored: &[ScoredPage]) -> TierScores {
    let average = |tier: Tier| {
        round_score(mean(
            scored
                .iter()
                .filter(|s| s.page.tier == Some(tier))
                .map(|s| s.total as f64),
        ))
    };

    TierScores {
        money: average(Tier::Money),
        supporting: average(Tier::Supporting),
        traffic: average(Tier::Traffic),
    }
}

pub fn tier_distribution(
    partition: &TierPartition,
    total: usize,
    bands: &DistributionBands,
) -> TierDistribution {
    let share = |tier: Tier| {
        let count = partition.count(tier);
        let fraction = if total == 0 {
            0.0
        } else {
            count as f64 / total as f64
        };
        let band = bands.for_tier(tier);

        TierShare {
            count,
            percentage: round_score(fraction * 100.0),
            ideal: band.label(),
            status: DistributionStatus::for_fraction(fraction, band),
        }
    };

    TierDistribution {
        money: share(Tier::Money),
        supporting: share(Tier::Supporting),
        traffic: share(Tier::Traffic),
    }
}

pub fn site_analytics(pages: &[PageRecord], config: &AnalysisConfig) -> SiteAnalytics {
    let high: Vec<&PageRecord> = pages
        .iter()
        .filter(|p| p.ilr >= HIGH_PERFORMER_ILR)
        .collect();
    let low: Vec<&PageRecord> = pages
        .iter()
        .filter(|p| p.ilr < LOW_PERFORMER_ILR)
        .collect();

    SiteAnalytics {
        total_pages: pages.len(),
        orphaned_pages: pages
            .iter()
            .filter(|p| is_orphaned(p, config))
            .count(),
        high_performing_pages: high.len(),
        low_performing_pages: low.len(),
        averages: Averages {
            ilr: round2(mean(pages.iter().map(|p| p.ilr))),
            incoming_links: round2(mean(pages.iter().map(|p| p.incoming_links as f64))),
            load_time: round2(mean(pages.iter().map(|p| p.load_time))),
        },
        top_performers: high.into_iter().take(MAX_PERFORMERS).cloned().collect(),
        under_performers: low.into_iter().take(MAX_PERFORMERS).cloned().collect(),
    }
}

pub fn link_equity_flow(pages: &[PageRecord]) -> LinkEquityFlow {
    let high_authority: Vec<&PageRecord> = pages
        .iter()
        .filter(|p| p.ilr > HIGH_AUTHORITY_ILR)
        .collect();

    let passed: u32 = high_authority
        .iter()
        .map(|p| p.outgoing_links.min(EQUITY_LINK_CAP))
        .sum();
    let capacity = EQUITY_LINK_CAP as f64 * high_authority.len() as f64;
    let ratio = if capacity > 0.0 {
        passed as f64 / capacity
    } else {
        0.0
    };

    LinkEquityFlow {
        score: round_score(ratio * 100.0),
        high_authority_pages: high_authority.len(),
        low_authority_pages: pages.iter().filter(|p| p.ilr < LOW_PERFORMER_ILR).count(),
        status: if ratio > EQUITY_GOOD_RATIO {
            EquityStatus::Good
        } else {
            EquityStatus::NeedsImprovement
        },
    }
}

/// Every opportunity found, highest priority first. Within a priority,
/// orphaned pages come before low-ILR service pages, each in input order.
pub fn find_opportunities(pages: &[PageRecord], config: &AnalysisConfig) -> Vec<Opportunity> {
    let mut opportunities = Vec::new();

    for page in pages.iter().filter(|p| is_orphaned(p, config)) {
        opportunities.push(Opportunity {
            kind: OpportunityKind::Orphaned,
            priority: Priority::High,
            issue: "Page has very few internal links".to_string(),
            recommendation: format!(
                "Add 5-10 internal links from related pages to {}",
                page.display_title()
            ),
            impact: "High - Will significantly improve page authority".to_string(),
            page: Some(page.clone()),
            details: None,
        });
    }

    for page in pages
        .iter()
        .filter(|p| p.page_type == PageType::Service && p.ilr < LOW_SERVICE_ILR)
    {
        opportunities.push(Opportunity {
            kind: OpportunityKind::LowIlr,
            priority: Priority::Medium,
            issue: "Service page with low internal link ratio".to_string(),
            recommendation: format!(
                "Increase internal links to {} from blog posts and supporting pages",
                page.display_title()
            ),
            impact: "Medium - Will improve service page authority".to_string(),
            page: Some(page.clone()),
            details: None,
        });
    }

    let over_linked = pages
        .iter()
        .filter(|p| p.incoming_links > OVER_LINKED)
        .count();
    let under_linked = pages
        .iter()
        .filter(|p| p.incoming_links < UNDER_LINKED && p.tier != Some(Tier::Traffic))
        .count();

    if over_linked > 0 && under_linked > 0 {
        opportunities.push(Opportunity {
            kind: OpportunityKind::Distribution,
            priority: Priority::Medium,
            page: None,
            issue: "Uneven link distribution across tiers".to_string(),
            recommendation:
                "Redistribute some links from over-linked pages to under-linked pages".to_string(),
            impact: "Medium - Will improve overall site architecture".to_string(),
            details: Some(LinkImbalance {
                over_linked,
                under_linked,
            }),
        });
    }

    opportunities.sort_by_key(|o| o.priority);
    opportunities
}

/// Site-wide advice driven by the primary goal, the chosen optimization
/// areas and what the analysis found. Highest priority first.
pub fn site_recommendations(
    pages: &[PageRecord],
    partition: &TierPartition,
    scored: &[ScoredPage],
    opportunities: &[Opportunity],
    clusters: &[TopicCluster],
    prefs: &BusinessPreferences,
    config: &AnalysisConfig,
) -> Vec<SiteRecommendation> {
    let mut recommendations = Vec::new();

    match prefs.primary_goal {
        PrimaryGoal::Conversions => recommendations.push(SiteRecommendation {
            priority: Priority::High,
            category: RecommendationCategory::Conversions,
            title: "Optimize Money Pages for Conversions".to_string(),
            action: "Focus internal linking on your highest-converting service pages".to_string(),
            impact: "Direct impact on business revenue".to_string(),
            pages: partition.money.iter().take(5).cloned().collect(),
        }),
        PrimaryGoal::Traffic => recommendations.push(SiteRecommendation {
            priority: Priority::High,
            category: RecommendationCategory::Traffic,
            title: "Boost Content Page Authority".to_string(),
            action: "Add more internal links to your blog posts and informational content"
                .to_string(),
            impact: "Will improve organic search rankings and traffic".to_string(),
            pages: partition
                .traffic
                .iter()
                .filter(|p| p.ilr < LOW_PERFORMER_ILR)
                .take(10)
                .cloned()
                .collect(),
        }),
        PrimaryGoal::Authority | PrimaryGoal::Balanced => {}
    }

    let orphaned: Vec<&Opportunity> = opportunities
        .iter()
        .filter(|o| o.kind == OpportunityKind::Orphaned)
        .collect();
    if !orphaned.is_empty() {
        recommendations.push(SiteRecommendation {
            priority: Priority::High,
            category: RecommendationCategory::Technical,
            title: "Fix Orphaned Pages".to_string(),
            action: format!("Add internal links to {} orphaned pages", orphaned.len()),
            impact: "Will improve overall site structure and SEO".to_string(),
            pages: orphaned
                .iter()
                .filter_map(|o| o.page.clone())
                .take(5)
                .collect(),
        });
    }

    let low_scores = scored
        .iter()
        .filter(|s| s.total < config.low_score_threshold)
        .count();
    if low_scores > 0 {
        recommendations.push(SiteRecommendation {
            priority: Priority::Medium,
            category: RecommendationCategory::Optimization,
            title: "Improve Low-Scoring Pages".to_string(),
            action: format!(
                "Optimize {} pages with scores below {}",
                low_scores, config.low_score_threshold
            ),
            impact: "Will raise overall site quality and search performance".to_string(),
            pages: Vec::new(),
        });
    }

    if prefs.wants(OptimizationArea::Technical) {
        let failing: Vec<&PageRecord> = pages
            .iter()
            .filter(|p| p.http_status != 200 || p.issues > 0)
            .collect();
        if !failing.is_empty() {
            recommendations.push(SiteRecommendation {
                priority: Priority::Medium,
                category: RecommendationCategory::Technical,
                title: "Resolve Technical Issues".to_string(),
                action: format!(
                    "Fix {} pages with non-200 status codes or reported issues",
                    failing.len()
                ),
                impact: "Will stop link equity leaking into broken or flagged pages".to_string(),
                pages: failing.into_iter().take(5).cloned().collect(),
            });
        }
    }

    if prefs.wants(OptimizationArea::Clusters) && clusters.is_empty() {
        recommendations.push(SiteRecommendation {
            priority: Priority::Low,
            category: RecommendationCategory::Architecture,
            title: "Build Topic Clusters".to_string(),
            action: "Group related service, supporting and blog pages around a hub page"
                .to_string(),
            impact: "Will improve topical authority and internal link structure".to_string(),
            pages: Vec::new(),
        });
    }

    recommendations.sort_by_key(|r| r.priority);
    recommendations
}

fn is_orphaned(page: &PageRecord, config: &AnalysisConfig) -> bool {
    page.incoming_links <= config.orphan_threshold
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}
