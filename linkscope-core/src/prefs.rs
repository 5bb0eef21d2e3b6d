// Business preferences that steer recommendations

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimaryGoal {
    Conversions,
    Traffic,
    Authority,
    #[default]
    Balanced,
}

impl PrimaryGoal {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "conversions" => Some(PrimaryGoal::Conversions),
            "traffic" => Some(PrimaryGoal::Traffic),
            "authority" => Some(PrimaryGoal::Authority),
            "balanced" => Some(PrimaryGoal::Balanced),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PrimaryGoal::Conversions => "conversions",
            PrimaryGoal::Traffic => "traffic",
            PrimaryGoal::Authority => "authority",
            PrimaryGoal::Balanced => "balanced",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizationArea {
    Orphaned,
    Distribution,
    Clusters,
    Anchors,
    Technical,
    Architecture,
}

impl OptimizationArea {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "orphaned" => Some(OptimizationArea::Orphaned),
            "distribution" => Some(OptimizationArea::Distribution),
            "clusters" => Some(OptimizationArea::Clusters),
            "anchors" => Some(OptimizationArea::Anchors),
            "technical" => Some(OptimizationArea::Technical),
            "architecture" => Some(OptimizationArea::Architecture),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OptimizationArea::Orphaned => "orphaned",
            OptimizationArea::Distribution => "distribution",
            OptimizationArea::Clusters => "clusters",
            OptimizationArea::Anchors => "anchors",
            OptimizationArea::Technical => "technical",
            OptimizationArea::Architecture => "architecture",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeline {
    Aggressive,
    #[default]
    Moderate,
    Gradual,
}

impl Timeline {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "aggressive" => Some(Timeline::Aggressive),
            "moderate" => Some(Timeline::Moderate),
            "gradual" => Some(Timeline::Gradual),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeline::Aggressive => "aggressive",
            Timeline::Moderate => "moderate",
            Timeline::Gradual => "gradual",
        }
    }
}

/// Answers that shape site recommendations and the action plan. Never used
/// by classification or the page sub-scores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessPreferences {
    pub primary_goal: PrimaryGoal,
    pub optimization_areas: BTreeSet<OptimizationArea>,
    pub timeline: Timeline,
    pub create_action_plan: bool,
}

impl BusinessPreferences {
    pub fn new(primary_goal: PrimaryGoal) -> Self {
        Self {
            primary_goal,
            ..Default::default()
        }
    }

    pub fn with_area(mut self, area: OptimizationArea) -> Self {
        self.optimization_areas.insert(area);
        self
    }

    pub fn with_timeline(mut self, timeline: Timeline) -> Self {
        self.timeline = timeline;
        self
    }

    pub fn with_action_plan(mut self, enabled: bool) -> Self {
        self.create_action_plan = enabled;
        self
    }

    pub fn wants(&self, area: OptimizationArea) -> bool {
        self.optimization_areas.contains(&area)
    }
}
