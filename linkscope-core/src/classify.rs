// Page type and tier classification

use crate::config::{ClassifierConfig, TierPolicy};
use crate::page::{PageRecord, PageType, Tier};
use serde::Serialize;
use tracing::debug;

/// Derive the page type from URL and title keywords.
pub fn determine_page_type(url: &str, title: &str, config: &ClassifierConfig) -> PageType {
    if url.is_empty() || title.is_empty() {
        return PageType::Other;
    }

    let url = url.to_lowercase();
    let title = title.to_lowercase();

    if contains_any(&url, &config.service_keywords) {
        return PageType::Service;
    }

    if contains_any(&url, &config.supporting_keywords) {
        return PageType::Supporting;
    }

    if contains_any(&url, &config.blog_path_markers) || contains_any(&title, &config.blog_title_markers)
    {
        return PageType::Blog;
    }

    PageType::Other
}

/// Assign a tier according to the configured policy.
pub fn categorize_tier(page: &PageRecord, config: &ClassifierConfig) -> Tier {
    match config.policy {
        TierPolicy::PageType => tier_by_page_type(page, config),
        TierPolicy::Keyword => tier_by_keyword(page, config),
    }
}

fn tier_by_page_type(page: &PageRecord, config: &ClassifierConfig) -> Tier {
    if page.page_type == PageType::Service && page.ilr >= config.money_min_ilr {
        Tier::Money
    } else if page.page_type == PageType::Supporting
        || (page.ilr >= config.supporting_min_ilr && page.ilr < config.money_min_ilr)
    {
        Tier::Supporting
    } else {
        Tier::Traffic
    }
}

fn tier_by_keyword(page: &PageRecord, config: &ClassifierConfig) -> Tier {
    let url = page.url.to_lowercase();

    if contains_any(&url, &config.service_keywords) {
        Tier::Money
    } else if contains_any(&url, &config.supporting_keywords) {
        Tier::Supporting
    } else if page.ilr >= config.money_min_ilr {
        Tier::Money
    } else if page.ilr >= config.supporting_min_ilr {
        Tier::Supporting
    } else {
        Tier::Traffic
    }
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles
        .iter()
        .any(|needle| !needle.is_empty() && haystack.contains(&needle.to_lowercase()))
}

/// Pages split by tier. Each list is ordered by ILR, highest first, with
/// ties kept in input order; cluster hub selection depends on this.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TierPartition {
    pub money: Vec<PageRecord>,
    pub supporting: Vec<PageRecord>,
    pub traffic: Vec<PageRecord>,
}

impl TierPartition {
    pub fn get(&self, tier: Tier) -> &[PageRecord] {
        match tier {
            Tier::Money => &self.money,
            Tier::Supporting => &self.supporting,
            Tier::Traffic => &self.traffic,
        }
    }

    pub fn count(&self, tier: Tier) -> usize {
        self.get(tier).len()
    }

    pub fn total(&self) -> usize {
        self.money.len() + self.supporting.len() + self.traffic.len()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Classified {
    /// Every input page with its tier set, in input order.
    pub pages: Vec<PageRecord>,
    pub partition: TierPartition,
}

/// Assign tiers to all pages and partition them. The input is left untouched.
pub fn classify(pages: &[PageRecord], config: &ClassifierConfig) -> Classified {
    let classified: Vec<PageRecord> = pages
        .iter()
        .map(|page| {
            let tier = categorize_tier(page, config);
            page.clone().with_tier(tier)
        })
        .collect();

    let mut partition = TierPartition::default();
    for page in &classified {
        match page.tier {
            Some(Tier::Money) => partition.money.push(page.clone()),
            Some(Tier::Supporting) => partition.supporting.push(page.clone()),
            _ => partition.traffic.push(page.clone()),
        }
    }

    for list in [
        &mut partition.money,
        &mut partition.supporting,
        &mut partition.traffic,
    ] {
        list.sort_by(|a, b| b.ilr.total_cmp(&a.ilr));
    }

    debug!(
        "Classified {} pages ({} money, {} supporting, {} traffic) using {} policy",
        classified.len(),
        partition.money.len(),
        partition.supporting.len(),
        partition.traffic.len(),
        config.policy.as_str()
    );

    Classified {
        pages: classified,
        partition,
    }
}
