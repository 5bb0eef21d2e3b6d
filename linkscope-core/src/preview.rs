// Lightweight page score shown in report previews. Unlike `score::Scorer`
// it grants flat technical, content and cluster credit.

use crate::page::{PageRecord, Tier};
use crate::prefs::PrimaryGoal;
use serde::Serialize;

/// Flat bonus for how well a tier lines up with the primary goal.
pub fn goal_tier_bonus(tier: Option<Tier>, goal: PrimaryGoal) -> f64 {
    match goal {
        PrimaryGoal::Conversions => match tier {
            Some(Tier::Money) => 20.0,
            Some(Tier::Supporting) => 10.0,
            _ => 5.0,
        },
        PrimaryGoal::Traffic => match tier {
            Some(Tier::Traffic) => 20.0,
            Some(Tier::Supporting) => 10.0,
            _ => 5.0,
        },
        PrimaryGoal::Authority => match tier {
            Some(Tier::Supporting) => 20.0,
            Some(Tier::Money) => 10.0,
            _ => 5.0,
        },
        PrimaryGoal::Balanced => 10.0,
    }
}

pub fn preview_score(page: &PageRecord, goal: PrimaryGoal) -> u8 {
    let links = (page.incoming_links as f64 / 2.0).min(40.0);
    let score = links + page.ilr * 0.4 + 20.0 + 15.0 + 15.0 + goal_tier_bonus(page.tier, goal);
    score.round().clamp(0.0, 100.0) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            ScoreBand::Good
        } else if score >= 60.0 {
            ScoreBand::Fair
        } else {
            ScoreBand::Poor
        }
    }

    /// Background color used by the HTML report.
    pub fn hex(&self) -> &'static str {
        match self {
            ScoreBand::Good => "#28a745",
            ScoreBand::Fair => "#ffc107",
            ScoreBand::Poor => "#dc3545",
        }
    }
}
