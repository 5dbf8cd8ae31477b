//! Planner tuning knobs.

use std::time::Duration;

/// Configuration shared by the planner, the default strategy and the
/// sandbox.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    /// A cell within `vision_range × vision_factor` Manhattan distance of
    /// the agent counts as visible.
    pub vision_factor: f64,
    /// How many of the best-scored frontier cells are tried, in order,
    /// before falling back to a single adjacent step.
    pub frontier_candidates: usize,
    /// Weight of the goal-direction alignment term of a frontier score.
    pub alignment_weight: f64,
    /// Weight of the `1 / (1 + distance)` proximity term of a frontier score.
    pub proximity_weight: f64,
    /// Wall-clock budget for one external solver call. `None` runs the
    /// solver inline on the caller's thread with no limit.
    pub time_budget: Option<Duration>,
    /// When the goal is visible but no known route reaches it, explore
    /// instead of staying put.
    pub explore_when_blocked: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            vision_factor: 1.5,
            frontier_candidates: 3,
            alignment_weight: 0.7,
            proximity_weight: 0.3,
            time_budget: Some(Duration::from_millis(250)),
            explore_when_blocked: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = PlannerConfig::default();
        assert_eq!(c.frontier_candidates, 3);
        assert!((c.alignment_weight + c.proximity_weight - 1.0).abs() < 1e-12);
        assert!(!c.explore_when_blocked);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_fills_defaults() {
        let c: PlannerConfig = serde_json::from_str(r#"{"frontier_candidates": 5}"#).unwrap();
        assert_eq!(c.frontier_candidates, 5);
        assert_eq!(c.vision_factor, 1.5);
    }
}
