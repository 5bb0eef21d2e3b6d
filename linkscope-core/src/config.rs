// Analysis configuration: keyword tables, weights and thresholds

use crate::error::{CoreError, Result};
use crate::page::Tier;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// How a classified page is assigned to a tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TierPolicy {
    /// Tier follows the page type, with ILR bands for everything else.
    #[default]
    PageType,
    /// URL keyword match wins, ILR bands are the fallback.
    Keyword,
}

impl TierPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "page-type" | "pagetype" | "type" => Some(TierPolicy::PageType),
            "keyword" | "keywords" => Some(TierPolicy::Keyword),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TierPolicy::PageType => "page-type",
            TierPolicy::Keyword => "keyword",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub policy: TierPolicy,
    pub service_keywords: Vec<String>,
    pub supporting_keywords: Vec<String>,
    pub blog_path_markers: Vec<String>,
    pub blog_title_markers: Vec<String>,
    pub money_min_ilr: f64,
    pub supporting_min_ilr: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            policy: TierPolicy::PageType,
            service_keywords: strings(&[
                "cleaning-services",
                "bank-cleaning",
                "medical-facility",
                "office-building",
                "school-cleaning",
                "church-cleaning",
                "auto-dealership",
                "warehouse-cleaning",
            ]),
            supporting_keywords: strings(&[
                "about",
                "contact",
                "day-porter",
                "carpet-cleaning",
                "floor-cleaning",
            ]),
            blog_path_markers: strings(&["/blog/", "/recent-blog/"]),
            blog_title_markers: strings(&["tips", "guide"]),
            money_min_ilr: 95.0,
            supporting_min_ilr: 70.0,
        }
    }
}

/// Weights of the five sub-scores in a page total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub link: f64,
    pub tier: f64,
    pub technical: f64,
    pub content: f64,
    pub cluster: f64,
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.link + self.tier + self.technical + self.content + self.cluster
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            link: 0.30,
            tier: 0.20,
            technical: 0.20,
            content: 0.15,
            cluster: 0.15,
        }
    }
}

/// Ideal number of outgoing internal links per tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdealOutgoing {
    pub money: f64,
    pub supporting: f64,
    pub traffic: f64,
    pub default: f64,
}

impl IdealOutgoing {
    pub fn for_tier(&self, tier: Option<Tier>) -> f64 {
        match tier {
            Some(Tier::Money) => self.money,
            Some(Tier::Supporting) => self.supporting,
            Some(Tier::Traffic) => self.traffic,
            None => self.default,
        }
    }
}

impl Default for IdealOutgoing {
    fn default() -> Self {
        Self {
            money: 15.0,
            supporting: 25.0,
            traffic: 35.0,
            default: 25.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierExpectation {
    pub min_ilr: f64,
    pub min_links: u32,
    pub max_links: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierExpectations {
    pub money: TierExpectation,
    pub supporting: TierExpectation,
    pub traffic: TierExpectation,
}

impl TierExpectations {
    pub fn for_tier(&self, tier: Tier) -> &TierExpectation {
        match tier {
            Tier::Money => &self.money,
            Tier::Supporting => &self.supporting,
            Tier::Traffic => &self.traffic,
        }
    }
}

impl Default for TierExpectations {
    fn default() -> Self {
        Self {
            money: TierExpectation {
                min_ilr: 95.0,
                min_links: 50,
                max_links: 100,
            },
            supporting: TierExpectation {
                min_ilr: 70.0,
                min_links: 30,
                max_links: 80,
            },
            traffic: TierExpectation {
                min_ilr: 30.0,
                min_links: 5,
                max_links: 50,
            },
        }
    }
}

/// Ideal share of the site, as fractions in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    pub fn label(&self) -> String {
        format!(
            "{}-{}%",
            (self.min * 100.0).round(),
            (self.max * 100.0).round()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistributionBands {
    pub money: Band,
    pub supporting: Band,
    pub traffic: Band,
}

impl DistributionBands {
    pub fn for_tier(&self, tier: Tier) -> &Band {
        match tier {
            Tier::Money => &self.money,
            Tier::Supporting => &self.supporting,
            Tier::Traffic => &self.traffic,
        }
    }
}

impl Default for DistributionBands {
    fn default() -> Self {
        Self {
            money: Band {
                min: 0.05,
                max: 0.15,
            },
            supporting: Band {
                min: 0.25,
                max: 0.35,
            },
            traffic: Band {
                min: 0.50,
                max: 0.70,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClusterKind {
    ServiceCluster,
    SupportingCluster,
    ContentCluster,
}

impl ClusterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClusterKind::ServiceCluster => "service-cluster",
            ClusterKind::SupportingCluster => "supporting-cluster",
            ClusterKind::ContentCluster => "content-cluster",
        }
    }
}

/// Which pages a cluster rule draws its candidates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClusterSource {
    /// Service-type pages, in input order.
    ServicePages,
    /// The supporting tier, highest ILR first.
    SupportingTier,
    /// Blog-type pages of the traffic tier, highest ILR first.
    TrafficBlogPages,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterRule {
    pub name: String,
    pub kind: ClusterKind,
    pub source: ClusterSource,
    /// Slug fragments; an empty list accepts every candidate.
    #[serde(default)]
    pub slug_keywords: Vec<String>,
    #[serde(default)]
    pub preferred_hub: Option<String>,
    /// Candidates need an ILR strictly above this.
    #[serde(default)]
    pub min_ilr: Option<f64>,
    #[serde(default)]
    pub max_spokes: Option<usize>,
}

pub fn default_cluster_rules() -> Vec<ClusterRule> {
    vec![
        ClusterRule {
            name: "Commercial Cleaning Services".to_string(),
            kind: ClusterKind::ServiceCluster,
            source: ClusterSource::ServicePages,
            slug_keywords: strings(&[
                "office-building",
                "bank-cleaning",
                "medical-facility",
                "school-cleaning",
            ]),
            preferred_hub: Some("office-building".to_string()),
            min_ilr: None,
            max_spokes: None,
        },
        ClusterRule {
            name: "Specialized Cleaning Solutions".to_string(),
            kind: ClusterKind::ServiceCluster,
            source: ClusterSource::ServicePages,
            slug_keywords: strings(&["auto-dealership", "warehouse", "church"]),
            preferred_hub: None,
            min_ilr: None,
            max_spokes: None,
        },
        ClusterRule {
            name: "Supporting Services & Solutions".to_string(),
            kind: ClusterKind::SupportingCluster,
            source: ClusterSource::SupportingTier,
            slug_keywords: strings(&["day-porter", "carpet-cleaning", "floor-cleaning"]),
            preferred_hub: None,
            min_ilr: None,
            max_spokes: None,
        },
        ClusterRule {
            name: "Cleaning Tips & Education".to_string(),
            kind: ClusterKind::ContentCluster,
            source: ClusterSource::TrafficBlogPages,
            slug_keywords: Vec::new(),
            preferred_hub: None,
            min_ilr: Some(30.0),
            max_spokes: Some(5),
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub classifier: ClassifierConfig,
    pub weights: ScoringWeights,
    pub ideal_outgoing: IdealOutgoing,
    pub tier_expectations: TierExpectations,
    pub distribution_bands: DistributionBands,
    pub clusters: Vec<ClusterRule>,
    /// Pages with at most this many incoming links count as orphaned.
    pub orphan_threshold: u32,
    pub low_score_threshold: u8,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            weights: ScoringWeights::default(),
            ideal_outgoing: IdealOutgoing::default(),
            tier_expectations: TierExpectations::default(),
            distribution_bands: DistributionBands::default(),
            clusters: default_cluster_rules(),
            orphan_threshold: 2,
            low_score_threshold: 50,
        }
    }
}

impl AnalysisConfig {
    /// Load a JSON configuration file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_json(&content)?;
        debug!("Loaded analysis configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: AnalysisConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_policy(mut self, policy: TierPolicy) -> Self {
        self.classifier.policy = policy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let w = &self.weights;
        if [w.link, w.tier, w.technical, w.content, w.cluster]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(CoreError::InvalidConfig(
                "weights must be non-negative numbers".to_string(),
            ));
        }
        if (w.sum() - 1.0).abs() > 0.001 {
            return Err(CoreError::InvalidConfig(format!(
                "weights must sum to 1.0 (got {:.3})",
                w.sum()
            )));
        }

        let c = &self.classifier;
        if c.supporting_min_ilr > c.money_min_ilr {
            return Err(CoreError::InvalidConfig(format!(
                "supporting_min_ilr ({}) exceeds money_min_ilr ({})",
                c.supporting_min_ilr, c.money_min_ilr
            )));
        }

        for tier in Tier::ALL {
            let expectation = self.tier_expectations.for_tier(tier);
            if expectation.min_ilr <= 0.0 {
                return Err(CoreError::InvalidConfig(format!(
                    "{} tier min_ilr must be positive",
                    tier.as_str()
                )));
            }
            if expectation.min_links == 0 || expectation.min_links > expectation.max_links {
                return Err(CoreError::InvalidConfig(format!(
                    "{} tier link range {}..{} is invalid",
                    tier.as_str(),
                    expectation.min_links,
                    expectation.max_links
                )));
            }

            let band = self.distribution_bands.for_tier(tier);
            if !(0.0..=1.0).contains(&band.min) || !(0.0..=1.0).contains(&band.max) || band.min > band.max
            {
                return Err(CoreError::InvalidConfig(format!(
                    "{} distribution band {}..{} is invalid",
                    tier.as_str(),
                    band.min,
                    band.max
                )));
            }
        }

        Ok(())
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
