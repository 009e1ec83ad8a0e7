//! Sharpe-ratio comparator.
//!
//! Classical is the baseline; Quantum sits a strictly positive margin
//! above it and Hybrid (optional) a further margin above Quantum.

use crate::{
    config::RatioConfig,
    generator::Generator,
    rng::{GeneratorSlot, SimRng},
    types::{Dataset, NamedScore, RiskLevel},
};
use serde::{Deserialize, Serialize};

pub const CLASSICAL: &str = "Classical";
pub const QUANTUM: &str = "Quantum";
pub const HYBRID: &str = "Hybrid";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatioParams {
    pub dataset:        Option<Dataset>,
    pub risk_level:     Option<RiskLevel>,
    pub include_hybrid: bool,
}

pub struct RatioComparator {
    config: RatioConfig,
}

impl RatioComparator {
    pub fn new(config: RatioConfig) -> Self {
        Self { config }
    }
}

impl Generator for RatioComparator {
    type Params = RatioParams;
    type Output = Vec<NamedScore>;

    const SLOT: GeneratorSlot = GeneratorSlot::Ratio;

    fn seed_offset(params: &RatioParams) -> i32 {
        params.dataset.map_or(0, |d| 1 + d.index()) * 13
            + params.risk_level.map_or(0, |r| 1 + r.index()) * 5
            + i32::from(params.include_hybrid)
    }

    fn generate(&self, params: &RatioParams, rng: &mut SimRng) -> Vec<NamedScore> {
        let cfg = &self.config;
        let classical = (cfg.baseline + rng.centered() * cfg.baseline_spread).max(cfg.floor);
        let quantum = classical + rng.range(cfg.quantum_margin_min, cfg.quantum_margin_max);

        let mut scores = vec![
            NamedScore::new(CLASSICAL, classical),
            NamedScore::new(QUANTUM, quantum.max(cfg.floor)),
        ];
        if params.include_hybrid {
            let hybrid = quantum + rng.range(cfg.hybrid_margin_min, cfg.hybrid_margin_max);
            scores.push(NamedScore::new(HYBRID, hybrid.max(cfg.floor)));
        }

        log::debug!("ratio: classical={classical:.3} quantum={quantum:.3}");
        scores
    }
}
