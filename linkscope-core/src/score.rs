// Per-page optimization scoring

use crate::cluster::{ClusterMembership, TopicCluster};
use crate::config::AnalysisConfig;
use crate::page::PageRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Grade::APlus
        } else if score >= 80.0 {
            Grade::A
        } else if score >= 70.0 {
            Grade::B
        } else if score >= 60.0 {
            Grade::C
        } else if score >= 50.0 {
            Grade::D
        } else {
            Grade::F
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

/// Ordered so that sorting ascending puts `High` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Links,
    Tier,
    Technical,
    Content,
    Cluster,
}

impl RecommendationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationKind::Links => "links",
            RecommendationKind::Tier => "tier",
            RecommendationKind::Technical => "technical",
            RecommendationKind::Content => "content",
            RecommendationKind::Cluster => "cluster",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecommendation {
    pub kind: RecommendationKind,
    pub priority: Priority,
    pub action: String,
    pub impact: String,
}

impl PageRecommendation {
    fn new(kind: RecommendationKind, priority: Priority, action: impl Into<String>, impact: &str) -> Self {
        Self {
            kind,
            priority,
            action: action.into(),
            impact: impact.to_string(),
        }
    }
}

/// Unrounded sub-scores, each in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    pub link: f64,
    pub tier: f64,
    pub technical: f64,
    pub content: f64,
    pub cluster: f64,
}

/// Sub-scores as reported, rounded to whole points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub link_score: u8,
    pub tier_score: u8,
    pub technical_score: u8,
    pub content_score: u8,
    pub cluster_score: u8,
}

impl From<&SubScores> for ScoreBreakdown {
    fn from(scores: &SubScores) -> Self {
        Self {
            link_score: to_points(scores.link),
            tier_score: to_points(scores.tier),
            technical_score: to_points(scores.technical),
            content_score: to_points(scores.content),
            cluster_score: to_points(scores.cluster),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPage {
    pub page: PageRecord,
    pub total: u8,
    pub breakdown: ScoreBreakdown,
    pub grade: Grade,
    pub recommendations: Vec<PageRecommendation>,
}

/// Scores pages against one configuration and one set of topic clusters.
pub struct Scorer<'a> {
    config: &'a AnalysisConfig,
    membership: ClusterMembership,
}

impl<'a> Scorer<'a> {
    pub fn new(config: &'a AnalysisConfig, clusters: &[TopicCluster]) -> Self {
        Self {
            config,
            membership: ClusterMembership::from_clusters(clusters),
        }
    }

    pub fn score_page(&self, page: &PageRecord) -> ScoredPage {
        let scores = self.sub_scores(page);
        let w = &self.config.weights;

        let weighted = scores.link * w.link
            + scores.tier * w.tier
            + scores.technical * w.technical
            + scores.content * w.content
            + scores.cluster * w.cluster;
        let total = to_points(weighted.round());

        ScoredPage {
            page: page.clone(),
            total,
            breakdown: ScoreBreakdown::from(&scores),
            grade: Grade::from_score(total as f64),
            recommendations: page_recommendations(page, &scores),
        }
    }

    /// Score every page, best first. Equal totals keep input order.
    pub fn score_all(&self, pages: &[PageRecord]) -> Vec<ScoredPage> {
        rank_pages(pages.iter().map(|page| self.score_page(page)).collect())
    }

    pub fn sub_scores(&self, page: &PageRecord) -> SubScores {
        SubScores {
            link: self.link_score(page),
            tier: self.tier_score(page),
            technical: technical_score(page),
            content: content_score(page),
            cluster: self.cluster_score(page),
        }
    }

    pub fn link_score(&self, page: &PageRecord) -> f64 {
        let incoming = (page.incoming_links as f64 / 2.0).min(40.0);
        let ilr = page.ilr * 0.4;
        (incoming + ilr + self.outgoing_balance(page)).min(100.0)
    }

    /// Up to 20 points for staying near the tier's ideal outgoing link count.
    pub fn outgoing_balance(&self, page: &PageRecord) -> f64 {
        let ideal = self.config.ideal_outgoing.for_tier(page.tier);
        let difference = (page.outgoing_links as f64 - ideal).abs();
        (20.0 - difference * 0.5).max(0.0)
    }

    pub fn tier_score(&self, page: &PageRecord) -> f64 {
        let Some(tier) = page.tier else {
            return 50.0;
        };
        let expectation = self.config.tier_expectations.for_tier(tier);
        let links = page.incoming_links as f64;
        let min_links = expectation.min_links as f64;
        let max_links = expectation.max_links as f64;

        let ilr_points = if page.ilr >= expectation.min_ilr {
            50.0
        } else {
            page.ilr / expectation.min_ilr * 50.0
        };

        let link_points = if links >= min_links && links <= max_links {
            50.0
        } else if links < min_links {
            links / min_links * 50.0
        } else {
            (50.0 - (links - max_links) * 0.5).max(25.0)
        };

        (ilr_points + link_points).min(100.0)
    }

    pub fn cluster_score(&self, page: &PageRecord) -> f64 {
        let mut score: f64 = 50.0;
        if self.membership.is_member(&page.url) {
            score += 30.0;
            if self.membership.is_hub(&page.url) {
                score += 20.0;
            }
        }
        score.min(100.0)
    }
}

pub fn technical_score(page: &PageRecord) -> f64 {
    let mut score: f64 = 100.0;

    if page.http_status != 200 {
        score -= 25.0;
    }
    if page.load_time > 3.0 {
        score -= ((page.load_time - 3.0) * 5.0).min(25.0);
    }
    if page.issues > 0 {
        score -= (page.issues as f64 * 2.0).min(25.0);
    }
    if !page.in_sitemap {
        score -= 25.0;
    }

    score.max(0.0)
}

pub fn content_score(page: &PageRecord) -> f64 {
    let mut score: f64 = 0.0;

    let title_len = page.title.chars().count();
    if title_len > 10 {
        score += 30.0;
        if title_len > 30 && title_len < 60 {
            score += 10.0;
        }
    }

    let description_len = page.description.chars().count();
    if description_len > 50 {
        score += 30.0;
        if description_len > 100 {
            score += 10.0;
        }
    }

    if page.slug.contains('-') {
        score += 20.0;
    }

    score += (20.0 - page.crawl_depth as f64 * 5.0).max(0.0);

    score.min(100.0)
}

/// Fixed-template advice for every weak sub-score, highest priority first.
pub fn page_recommendations(page: &PageRecord, scores: &SubScores) -> Vec<PageRecommendation> {
    use RecommendationKind::*;

    let mut recommendations = Vec::new();

    if scores.link < 60.0 {
        if page.incoming_links < 10 {
            recommendations.push(PageRecommendation::new(
                Links,
                Priority::High,
                format!(
                    "Add {} more internal links to this page",
                    10 - page.incoming_links
                ),
                "Will significantly improve page authority and rankings",
            ));
        }
        if page.ilr < 70.0 {
            recommendations.push(PageRecommendation::new(
                Links,
                Priority::High,
                "Focus on getting high-quality internal links from authoritative pages",
                "Will improve Internal Link Ratio and overall page strength",
            ));
        }
    }

    if scores.tier < 70.0 {
        let advice = match page.tier {
            Some(crate::page::Tier::Money) => "This money page needs more internal links to reach its potential",
            Some(crate::page::Tier::Supporting) => "This supporting page should link to more relevant content",
            Some(crate::page::Tier::Traffic) => {
                "This content page needs better integration with your site structure"
            }
            None => "Improve page positioning in site hierarchy",
        };
        recommendations.push(PageRecommendation::new(
            Tier,
            Priority::Medium,
            advice,
            "Will better align page with its intended role in site architecture",
        ));
    }

    if scores.technical < 80.0 {
        if page.load_time > 3.0 {
            recommendations.push(PageRecommendation::new(
                Technical,
                Priority::High,
                format!(
                    "Optimize page load time (currently {:.2}s)",
                    page.load_time
                ),
                "Will improve user experience and search rankings",
            ));
        }
        if page.issues > 0 {
            recommendations.push(PageRecommendation::new(
                Technical,
                Priority::High,
                format!("Fix {} technical issues on this page", page.issues),
                "Will resolve SEO and user experience problems",
            ));
        }
        if !page.in_sitemap {
            recommendations.push(PageRecommendation::new(
                Technical,
                Priority::Medium,
                "Add this page to your XML sitemap",
                "Will help search engines discover and index this page",
            ));
        }
    }

    if scores.content < 70.0 {
        if page.title.chars().count() < 30 {
            recommendations.push(PageRecommendation::new(
                Content,
                Priority::Medium,
                "Improve page title - make it more descriptive and keyword-rich",
                "Will improve click-through rates and search rankings",
            ));
        }
        if page.description.chars().count() < 100 {
            recommendations.push(PageRecommendation::new(
                Content,
                Priority::Medium,
                "Add or improve meta description to better describe page content",
                "Will improve search result appearance and click-through rates",
            ));
        }
    }

    if scores.cluster < 70.0 {
        recommendations.push(PageRecommendation::new(
            Cluster,
            Priority::Low,
            "Consider creating topic clusters around this page's main theme",
            "Will improve topical authority and internal link structure",
        ));
    }

    recommendations.sort_by_key(|r| r.priority);
    recommendations
}

/// Stable sort by total, highest first.
pub fn rank_pages(mut scored: Vec<ScoredPage>) -> Vec<ScoredPage> {
    scored.sort_by(|a, b| b.total.cmp(&a.total));
    scored
}

fn to_points(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}
