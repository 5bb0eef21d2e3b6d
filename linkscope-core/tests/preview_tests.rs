// Tests for the report-preview scorer

use linkscope_core::page::{PageRecord, Tier};
use linkscope_core::prefs::PrimaryGoal;
use linkscope_core::preview::{ScoreBand, goal_tier_bonus, preview_score};

fn page(ilr: f64, incoming: u32, tier: Option<Tier>) -> PageRecord {
    let mut page = PageRecord::new("https://example.com/preview/");
    page.ilr = ilr;
    page.incoming_links = incoming;
    page.tier = tier;
    page
}

#[test]
fn test_goal_tier_bonus() {
    assert_eq!(goal_tier_bonus(Some(Tier::Money), PrimaryGoal::Conversions), 20.0);
    assert_eq!(goal_tier_bonus(Some(Tier::Supporting), PrimaryGoal::Conversions), 10.0);
    assert_eq!(goal_tier_bonus(Some(Tier::Traffic), PrimaryGoal::Conversions), 5.0);
    assert_eq!(goal_tier_bonus(Some(Tier::Traffic), PrimaryGoal::Traffic), 20.0);
    assert_eq!(goal_tier_bonus(Some(Tier::Supporting), PrimaryGoal::Authority), 20.0);
    assert_eq!(goal_tier_bonus(Some(Tier::Money), PrimaryGoal::Authority), 10.0);
    assert_eq!(goal_tier_bonus(None, PrimaryGoal::Authority), 5.0);
    assert_eq!(goal_tier_bonus(None, PrimaryGoal::Balanced), 10.0);
}

#[test]
fn test_preview_score_balanced() {
    // 5 link points + 20 ILR points + 50 flat + 10 goal bonus
    let page = page(50.0, 10, Some(Tier::Traffic));
    assert_eq!(preview_score(&page, PrimaryGoal::Balanced), 85);
    assert_eq!(preview_score(&page, PrimaryGoal::Conversions), 80);
}

#[test]
fn test_preview_score_caps_link_points() {
    let few = page(0.0, 80, None);
    let many = page(0.0, 500, None);
    assert_eq!(
        preview_score(&few, PrimaryGoal::Balanced),
        preview_score(&many, PrimaryGoal::Balanced)
    );
    assert_eq!(preview_score(&few, PrimaryGoal::Balanced), 100);
}

#[test]
fn test_preview_score_clamped() {
    let page = page(100.0, 200, Some(Tier::Money));
    assert_eq!(preview_score(&page, PrimaryGoal::Conversions), 100);
}

#[test]
fn test_score_bands() {
    assert_eq!(ScoreBand::from_score(80.0), ScoreBand::Good);
    assert_eq!(ScoreBand::from_score(79.9), ScoreBand::Fair);
    assert_eq!(ScoreBand::from_score(60.0), ScoreBand::Fair);
    assert_eq!(ScoreBand::from_score(12.0), ScoreBand::Poor);
    assert_eq!(ScoreBand::Good.hex(), "#28a745");
    assert_eq!(ScoreBand::Poor.hex(), "#dc3545");
}
