//! QAOA-style candidate selector.
//!
//! One candidate per configured bit pattern. Raw scores come from the
//! stream and are normalised to sum to 1 before display rounding.
//! Compliance tags are a second draw per candidate, not a real check.
//!
//! Output is sorted by probability, highest first. Consumers treat the
//! first element as the best candidate.

use crate::{
    config::SelectorConfig,
    generator::Generator,
    rng::{GeneratorSlot, SimRng},
    types::{clamp_pct, ComplianceTag, ConstraintSummary},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub bits:            String,
    pub probability:     f64,
    pub expected_return: f64,
    pub risk:            f64,
    pub compliance:      ComplianceTag,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectorParams {
    pub constraints: ConstraintSummary,
    /// Selection threshold in percent (0–100).
    pub threshold:   f64,
}

pub struct CandidateSelector {
    config: SelectorConfig,
}

impl CandidateSelector {
    pub fn new(config: SelectorConfig) -> Self {
        Self { config }
    }

    fn draw_compliance(&self, rng: &mut SimRng) -> ComplianceTag {
        let roll = rng.next_f64();
        if roll < self.config.esg_excluded_probability {
            ComplianceTag::EsgExcluded
        } else if roll < self.config.esg_excluded_probability + self.config.sector_cap_probability {
            ComplianceTag::SectorCapExceeded
        } else {
            ComplianceTag::Ok
        }
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

impl Generator for CandidateSelector {
    type Params = SelectorParams;
    type Output = Vec<Candidate>;

    const SLOT: GeneratorSlot = GeneratorSlot::Selector;

    fn seed_offset(params: &SelectorParams) -> i32 {
        // The ESG flag is mixed in so compliance draws move with it.
        i32::from(params.constraints.esg_exclude)
            .wrapping_mul(1_009)
            .wrapping_add(params.constraints.total_cap_pct().round() as i32)
            .wrapping_add((clamp_pct(params.threshold).round() as i32).wrapping_mul(3))
    }

    fn generate(&self, _params: &SelectorParams, rng: &mut SimRng) -> Vec<Candidate> {
        let cfg = &self.config;

        let drafts: Vec<(f64, Candidate)> = cfg
            .bit_patterns
            .iter()
            .map(|bits| {
                let raw = rng.range(cfg.raw_score_min, cfg.raw_score_max).max(f64::MIN_POSITIVE);
                let expected_return = rng.range(cfg.expected_return_min, cfg.expected_return_max);
                let risk = rng.range(cfg.risk_min, cfg.risk_max);
                let compliance = self.draw_compliance(rng);
                (raw, Candidate {
                    bits: bits.clone(),
                    probability: 0.0,
                    expected_return,
                    risk,
                    compliance,
                })
            })
            .collect();

        let total: f64 = drafts.iter().map(|(raw, _)| raw).sum();
        let mut candidates: Vec<Candidate> = drafts
            .into_iter()
            .map(|(raw, mut c)| {
                let p = if total > 0.0 { raw / total } else { 0.0 };
                c.probability = round_to(p, cfg.probability_decimals).clamp(0.0, 1.0);
                c.expected_return = round_to(c.expected_return, 4);
                c.risk = round_to(c.risk, 4);
                c
            })
            .collect();

        // Stable sort: ties keep configured pattern order.
        candidates.sort_by(|a, b| b.probability.total_cmp(&a.probability));

        log::debug!(
            "selector: {} candidates, best={} p={:.3}",
            candidates.len(),
            candidates.first().map_or("-", |c| c.bits.as_str()),
            candidates.first().map_or(0.0, |c| c.probability),
        );
        candidates
    }
}

/// Keep candidates whose probability, in percent, reaches `threshold_pct`.
/// Order is preserved.
pub fn above_threshold(candidates: &[Candidate], threshold_pct: f64) -> Vec<Candidate> {
    let threshold = clamp_pct(threshold_pct);
    candidates
        .iter()
        .filter(|c| c.probability * 100.0 >= threshold)
        .cloned()
        .collect()
}
