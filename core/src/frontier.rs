//! Efficient-frontier generator.
//!
//! A fixed base curve scaled by the risk multiplier, with small noise on
//! the return axis only. Risk values are never perturbed, so the x-axis
//! stays non-decreasing. Constraints subtract a flat penalty.

use crate::{
    config::FrontierConfig,
    generator::Generator,
    rng::{GeneratorSlot, SimRng},
    types::{clamp_pct, ConstraintSummary, RiskLevel},
};
use serde::{Deserialize, Serialize};

pub const MIN_POINTS: usize = 5;
pub const MAX_POINTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrontierPoint {
    pub risk:   f64,
    #[serde(rename = "return")]
    pub ret:    f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontierParams {
    pub risk_level:  RiskLevel,
    pub constraints: ConstraintSummary,
    /// Candidate selection threshold (0–100), if the caller has one.
    pub threshold:   Option<f64>,
}

pub struct FrontierGenerator {
    config: FrontierConfig,
}

impl FrontierGenerator {
    pub fn new(config: FrontierConfig) -> Self {
        Self { config }
    }

    fn penalty(&self, constraints: &ConstraintSummary) -> f64 {
        let mut penalty = constraints.total_cap_pct() * self.config.sector_cap_penalty_per_pct;
        if constraints.esg_exclude {
            penalty += self.config.esg_penalty;
        }
        penalty
    }
}

impl Generator for FrontierGenerator {
    type Params = FrontierParams;
    type Output = Vec<FrontierPoint>;

    const SLOT: GeneratorSlot = GeneratorSlot::Frontier;

    fn seed_offset(params: &FrontierParams) -> i32 {
        let threshold = params.threshold.map(clamp_pct).unwrap_or(0.0).round() as i32;
        params
            .risk_level
            .index()
            .wrapping_mul(17)
            .wrapping_add(i32::from(params.constraints.esg_exclude).wrapping_mul(101))
            .wrapping_add((params.constraints.sector_caps.len() as i32).wrapping_mul(7))
            .wrapping_add(threshold)
    }

    fn generate(&self, params: &FrontierParams, rng: &mut SimRng) -> Vec<FrontierPoint> {
        let cfg = &self.config;
        let m = params.risk_level.multiplier();
        let n = cfg.points.clamp(MIN_POINTS, MAX_POINTS);
        let penalty = self.penalty(&params.constraints);

        let points: Vec<FrontierPoint> = (0..n)
            .map(|i| {
                let i = i as f64;
                let risk = cfg.base_risk * m + cfg.risk_step * i;
                let noise = rng.centered() * cfg.noise_amplitude;
                let ret = cfg.base_return * m + cfg.return_step * i + noise - penalty;
                FrontierPoint { risk, ret }
            })
            .collect();

        log::debug!(
            "frontier: risk={} points={} penalty={penalty:.3}",
            params.risk_level.id(),
            points.len()
        );
        points
    }
}
