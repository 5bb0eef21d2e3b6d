// Topic cluster detection

use crate::classify::TierPartition;
use crate::config::{ClusterKind, ClusterRule, ClusterSource};
use crate::page::{PageRecord, PageType};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicCluster {
    pub name: String,
    pub kind: ClusterKind,
    pub hub: PageRecord,
    /// Related pages, never including the hub.
    pub spokes: Vec<PageRecord>,
}

impl TopicCluster {
    pub fn is_hub(&self, url: &str) -> bool {
        self.hub.url == url
    }

    pub fn contains(&self, url: &str) -> bool {
        self.is_hub(url) || self.spokes.iter().any(|spoke| spoke.url == url)
    }

    /// Hub plus spokes.
    pub fn size(&self) -> usize {
        1 + self.spokes.len()
    }
}

/// Group pages into topic clusters.
///
/// `pages` is the classified page list in input order. `partition` must come
/// from `classify`, whose lists are sorted by ILR descending: rules without a
/// preferred hub pick the first candidate, which is then the strongest page.
/// Every rule is applied independently, so a page may land in more than one
/// cluster if the keyword tables overlap.
pub fn detect_clusters(
    pages: &[PageRecord],
    partition: &TierPartition,
    rules: &[ClusterRule],
) -> Vec<TopicCluster> {
    rules
        .iter()
        .filter_map(|rule| build_cluster(rule, pages, partition))
        .collect()
}

fn build_cluster(
    rule: &ClusterRule,
    pages: &[PageRecord],
    partition: &TierPartition,
) -> Option<TopicCluster> {
    let candidates: Vec<&PageRecord> = match rule.source {
        ClusterSource::ServicePages => pages
            .iter()
            .filter(|p| p.page_type == PageType::Service)
            .collect(),
        ClusterSource::SupportingTier => partition.supporting.iter().collect(),
        ClusterSource::TrafficBlogPages => partition
            .traffic
            .iter()
            .filter(|p| p.page_type == PageType::Blog)
            .collect(),
    };

    let members: Vec<&PageRecord> = candidates
        .into_iter()
        .filter(|p| slug_matches(&p.slug, &rule.slug_keywords))
        .filter(|p| rule.min_ilr.is_none_or(|min| p.ilr > min))
        .collect();

    let first = *members.first()?;
    let hub = rule
        .preferred_hub
        .as_deref()
        .and_then(|keyword| members.iter().copied().find(|p| p.slug.contains(keyword)))
        .unwrap_or(first);

    let mut spokes: Vec<PageRecord> = members
        .iter()
        .filter(|p| p.url != hub.url)
        .map(|p| (*p).clone())
        .collect();

    if let Some(max) = rule.max_spokes {
        spokes.truncate(max);
    }

    Some(TopicCluster {
        name: rule.name.clone(),
        kind: rule.kind,
        hub: hub.clone(),
        spokes,
    })
}

fn slug_matches(slug: &str, keywords: &[String]) -> bool {
    keywords.is_empty() || keywords.iter().any(|k| slug.contains(k.as_str()))
}

/// URL lookup over a set of clusters.
#[derive(Debug, Clone, Default)]
pub struct ClusterMembership {
    hubs: HashSet<String>,
    members: HashSet<String>,
}

impl ClusterMembership {
    pub fn from_clusters(clusters: &[TopicCluster]) -> Self {
        let mut membership = Self::default();
        for cluster in clusters {
            membership.hubs.insert(cluster.hub.url.clone());
            membership.members.insert(cluster.hub.url.clone());
            for spoke in &cluster.spokes {
                membership.members.insert(spoke.url.clone());
            }
        }
        membership
    }

    pub fn is_member(&self, url: &str) -> bool {
        self.members.contains(url)
    }

    pub fn is_hub(&self, url: &str) -> bool {
        self.hubs.contains(url)
    }
}
