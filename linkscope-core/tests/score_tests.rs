// Tests for page scoring and recommendations

use linkscope_core::cluster::TopicCluster;
use linkscope_core::config::{AnalysisConfig, ClusterKind, ScoringWeights};
use linkscope_core::page::{PageRecord, PageType, Tier};
use linkscope_core::score::{
    Grade, Priority, RecommendationKind, Scorer, content_score, rank_pages, technical_score,
};

const LONG_DESCRIPTION: &str = "Professional commercial cleaning for office buildings, \
    including nightly janitorial service, restroom care and floor maintenance plans.";

/// The reference money page: every sub-score except clusters is maxed out.
fn reference_page() -> PageRecord {
    let mut page = PageRecord::new("https://example.com/some-page");
    page.title = "30+ char descriptive title here".to_string();
    page.description = LONG_DESCRIPTION.to_string();
    page.ilr = 95.0;
    page.incoming_links = 50;
    page.outgoing_links = 15;
    page.http_status = 200;
    page.load_time = 1.0;
    page.issues = 0;
    page.in_sitemap = true;
    page.crawl_depth = 1;
    page.page_type = PageType::Service;
    page.with_tier(Tier::Money)
}

fn weak_page() -> PageRecord {
    let mut page = PageRecord::new("https://example.com/page");
    page.title = "Short".to_string();
    page.ilr = 20.0;
    page.incoming_links = 2;
    page.outgoing_links = 0;
    page.http_status = 200;
    page.load_time = 5.0;
    page.issues = 3;
    page.in_sitemap = false;
    page.with_tier(Tier::Traffic)
}

fn cluster_of(hub: &PageRecord, spokes: &[PageRecord]) -> TopicCluster {
    TopicCluster {
        name: "Test Cluster".to_string(),
        kind: ClusterKind::ServiceCluster,
        hub: hub.clone(),
        spokes: spokes.to_vec(),
    }
}

// ============================================================================
// Reference Scenario Tests
// ============================================================================

#[test]
fn test_reference_page_scores_87_grade_a() {
    let config = AnalysisConfig::default();
    let scorer = Scorer::new(&config, &[]);

    let scored = scorer.score_page(&reference_page());

    assert_eq!(scored.breakdown.link_score, 83);
    assert_eq!(scored.breakdown.tier_score, 100);
    assert_eq!(scored.breakdown.technical_score, 100);
    assert_eq!(scored.breakdown.content_score, 100);
    assert_eq!(scored.breakdown.cluster_score, 50);
    assert_eq!(scored.total, 87);
    assert_eq!(scored.grade, Grade::A);
}

#[test]
fn test_reference_page_only_cluster_recommendation() {
    let config = AnalysisConfig::default();
    let scorer = Scorer::new(&config, &[]);

    let scored = scorer.score_page(&reference_page());

    assert_eq!(scored.recommendations.len(), 1);
    assert_eq!(scored.recommendations[0].kind, RecommendationKind::Cluster);
    assert_eq!(scored.recommendations[0].priority, Priority::Low);
}

#[test]
fn test_reference_page_as_hub_scores_higher() {
    let config = AnalysisConfig::default();
    let page = reference_page();
    let clusters = vec![cluster_of(&page, &[])];
    let scorer = Scorer::new(&config, &clusters);

    let scored = scorer.score_page(&page);

    assert_eq!(scored.breakdown.cluster_score, 100);
    // 24.9 + 20 + 20 + 15 + 15
    assert_eq!(scored.total, 95);
    assert_eq!(scored.grade, Grade::APlus);
    assert!(scored.recommendations.is_empty());
}

// ============================================================================
// Link Score Tests
// ============================================================================

#[test]
fn test_link_score_caps_incoming_contribution() {
    let config = AnalysisConfig::default();
    let scorer = Scorer::new(&config, &[]);
    let mut page = reference_page();
    page.incoming_links = 500;
    page.ilr = 100.0;

    assert_eq!(scorer.link_score(&page), 100.0);
}

#[test]
fn test_outgoing_balance_uses_tier_ideal() {
    let config = AnalysisConfig::default();
    let scorer = Scorer::new(&config, &[]);
    let mut page = reference_page().with_tier(Tier::Traffic);
    page.outgoing_links = 35;
    assert_eq!(scorer.outgoing_balance(&page), 20.0);

    page.outgoing_links = 15;
    assert_eq!(scorer.outgoing_balance(&page), 10.0);

    page.outgoing_links = 100;
    assert_eq!(scorer.outgoing_balance(&page), 0.0);
}

#[test]
fn test_outgoing_balance_unclassified_uses_default() {
    let config = AnalysisConfig::default();
    let scorer = Scorer::new(&config, &[]);
    let mut page = PageRecord::new("https://example.com/x");
    page.outgoing_links = 25;

    assert_eq!(scorer.outgoing_balance(&page), 20.0);
}

// ============================================================================
// Tier Score Tests
// ============================================================================

#[test]
fn test_tier_score_under_expectations() {
    let config = AnalysisConfig::default();
    let scorer = Scorer::new(&config, &[]);
    let mut page = reference_page();
    page.ilr = 47.5;
    page.incoming_links = 25;

    assert_eq!(scorer.tier_score(&page), 50.0);
}

#[test]
fn test_tier_score_over_max_links() {
    let config = AnalysisConfig::default();
    let scorer = Scorer::new(&config, &[]);
    let mut page = reference_page();

    page.incoming_links = 110;
    assert_eq!(scorer.tier_score(&page), 95.0);

    page.incoming_links = 500;
    assert_eq!(scorer.tier_score(&page), 75.0);
}

#[test]
fn test_tier_score_unclassified_is_flat() {
    let config = AnalysisConfig::default();
    let scorer = Scorer::new(&config, &[]);
    let page = PageRecord::new("https://example.com/unclassified");

    assert_eq!(scorer.tier_score(&page), 50.0);
    let scored = scorer.score_page(&page);
    assert_eq!(scored.breakdown.tier_score, 50);
}

// ============================================================================
// Technical Score Tests
// ============================================================================

#[test]
fn test_technical_score_perfect() {
    assert_eq!(technical_score(&reference_page()), 100.0);
}

#[test]
fn test_technical_score_penalties() {
    let mut page = reference_page();
    page.http_status = 404;
    page.load_time = 6.0;
    page.issues = 20;
    page.in_sitemap = false;

    assert_eq!(technical_score(&page), 10.0);
}

#[test]
fn test_technical_score_floors_at_zero() {
    let mut page = reference_page();
    page.http_status = 500;
    page.load_time = 30.0;
    page.issues = 100;
    page.in_sitemap = false;

    assert_eq!(technical_score(&page), 0.0);
}

#[test]
fn test_technical_score_load_time_boundary() {
    let mut page = reference_page();
    page.load_time = 3.0;
    assert_eq!(technical_score(&page), 100.0);
}

// ============================================================================
// Content Score Tests
// ============================================================================

#[test]
fn test_content_score_empty_page() {
    let page = PageRecord::new("https://example.com/");
    // Depth bonus only: the homepage slug has no hyphen.
    assert_eq!(content_score(&page), 20.0);
}

#[test]
fn test_content_score_title_bands() {
    let mut page = PageRecord::new("https://example.com/x");
    page.crawl_depth = 4;

    page.title = "A title over ten".to_string();
    assert_eq!(content_score(&page), 30.0);

    page.title = "A title that is comfortably over thirty chars".to_string();
    assert_eq!(content_score(&page), 40.0);

    page.title = "x".repeat(60);
    assert_eq!(content_score(&page), 30.0);
}

#[test]
fn test_content_score_depth_bonus() {
    let mut page = PageRecord::new("https://example.com/x");
    page.crawl_depth = 2;
    assert_eq!(content_score(&page), 10.0);
}

// ============================================================================
// Cluster Score Tests
// ============================================================================

#[test]
fn test_cluster_score_spoke_and_hub() {
    let config = AnalysisConfig::default();
    let hub = reference_page();
    let spoke = PageRecord::new("https://example.com/spoke");
    let outsider = PageRecord::new("https://example.com/outsider");
    let clusters = vec![cluster_of(&hub, std::slice::from_ref(&spoke))];
    let scorer = Scorer::new(&config, &clusters);

    assert_eq!(scorer.cluster_score(&hub), 100.0);
    assert_eq!(scorer.cluster_score(&spoke), 80.0);
    assert_eq!(scorer.cluster_score(&outsider), 50.0);
}

// ============================================================================
// Recommendation Tests
// ============================================================================

#[test]
fn test_weak_page_recommendations() {
    let config = AnalysisConfig::default();
    let scorer = Scorer::new(&config, &[]);

    let scored = scorer.score_page(&weak_page());
    let actions: Vec<&str> = scored
        .recommendations
        .iter()
        .map(|r| r.action.as_str())
        .collect();

    assert_eq!(scored.recommendations.len(), 9);
    assert_eq!(actions[0], "Add 8 more internal links to this page");
    assert_eq!(
        actions[1],
        "Focus on getting high-quality internal links from authoritative pages"
    );
    assert_eq!(actions[2], "Optimize page load time (currently 5.00s)");
    assert_eq!(actions[3], "Fix 3 technical issues on this page");
    assert_eq!(
        actions[4],
        "This content page needs better integration with your site structure"
    );
    assert_eq!(actions[5], "Add this page to your XML sitemap");
    assert_eq!(scored.recommendations[8].kind, RecommendationKind::Cluster);
}

#[test]
fn test_recommendations_sorted_by_priority() {
    let config = AnalysisConfig::default();
    let scorer = Scorer::new(&config, &[]);

    let scored = scorer.score_page(&weak_page());
    let priorities: Vec<Priority> = scored.recommendations.iter().map(|r| r.priority).collect();

    let mut sorted = priorities.clone();
    sorted.sort();
    assert_eq!(priorities, sorted);
    assert_eq!(priorities.first(), Some(&Priority::High));
    assert_eq!(priorities.last(), Some(&Priority::Low));
}

#[test]
fn test_tier_advice_depends_on_tier() {
    let config = AnalysisConfig::default();
    let scorer = Scorer::new(&config, &[]);
    let page = weak_page().with_tier(Tier::Money);

    let scored = scorer.score_page(&page);

    assert!(scored.recommendations.iter().any(|r| r.kind == RecommendationKind::Tier
        && r.action == "This money page needs more internal links to reach its potential"));
}

// ============================================================================
// Grade and Ranking Tests
// ============================================================================

#[test]
fn test_grade_table() {
    assert_eq!(Grade::from_score(100.0), Grade::APlus);
    assert_eq!(Grade::from_score(90.0), Grade::APlus);
    assert_eq!(Grade::from_score(89.0), Grade::A);
    assert_eq!(Grade::from_score(70.0), Grade::B);
    assert_eq!(Grade::from_score(60.0), Grade::C);
    assert_eq!(Grade::from_score(50.0), Grade::D);
    assert_eq!(Grade::from_score(49.0), Grade::F);
    assert_eq!(Grade::from_score(0.0), Grade::F);
    assert_eq!(Grade::APlus.as_str(), "A+");
}

#[test]
fn test_rank_pages_stable() {
    let config = AnalysisConfig::default();
    let scorer = Scorer::new(&config, &[]);

    let mut twin = reference_page();
    twin.url = "https://example.com/twin-page".to_string();
    let pages = vec![weak_page(), reference_page(), twin];

    let ranked = scorer.score_all(&pages);

    assert_eq!(ranked[0].page.url, "https://example.com/some-page");
    assert_eq!(ranked[1].page.url, "https://example.com/twin-page");
    assert_eq!(ranked[2].page.url, "https://example.com/page");

    let reranked = rank_pages(ranked.clone());
    assert_eq!(reranked, ranked);
}

#[test]
fn test_custom_weights_change_total() {
    let config = AnalysisConfig {
        weights: ScoringWeights {
            link: 0.0,
            tier: 0.0,
            technical: 1.0,
            content: 0.0,
            cluster: 0.0,
        },
        ..Default::default()
    };
    let scorer = Scorer::new(&config, &[]);

    assert_eq!(scorer.score_page(&reference_page()).total, 100);
}
