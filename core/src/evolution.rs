//! Backtest evolution simulator.
//!
//! Two independent multiplicative random walks, Quantum vs Classical:
//!   value *= 1 + drift + volatility * noise,   noise in [-0.5, 0.5)
//! then clamped to floor_ratio * initial equity. Hybrid mode nudges the
//! Quantum walk's drift up and its volatility down.
//!
//! The floor keeps the demo curves from collapsing; it is not a claim
//! about real portfolio behaviour.

use crate::{
    config::{EvolutionConfig, WalkParams},
    generator::Generator,
    rng::{GeneratorSlot, SimRng},
    types::RebalanceFreq,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub label:     String,
    pub quantum:   f64,
    pub classical: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionParams {
    pub freq:           RebalanceFreq,
    pub hybrid:         bool,
    pub initial_equity: f64,
    /// Number of steps. 0 is lifted to 1; values above the configured max are capped.
    pub time_horizon:   u32,
}

pub struct EvolutionSimulator {
    config: EvolutionConfig,
}

impl EvolutionSimulator {
    pub fn new(config: EvolutionConfig) -> Self {
        Self { config }
    }

    fn walk_params(&self, freq: RebalanceFreq) -> WalkParams {
        match freq {
            RebalanceFreq::Monthly   => self.config.monthly,
            RebalanceFreq::Quarterly => self.config.quarterly,
        }
    }

    /// Coerce the initial equity: non-finite or non-positive uses the default.
    pub fn effective_equity(&self, initial_equity: f64) -> f64 {
        if initial_equity.is_finite() && initial_equity > 0.0 {
            initial_equity
        } else {
            log::warn!(
                "initial equity {initial_equity} invalid, using {}",
                self.config.default_initial_equity
            );
            self.config.default_initial_equity
        }
    }

    pub fn effective_horizon(&self, time_horizon: u32) -> u32 {
        time_horizon.clamp(1, self.config.max_horizon.max(1))
    }
}

impl Generator for EvolutionSimulator {
    type Params = EvolutionParams;
    type Output = Vec<EquityPoint>;

    const SLOT: GeneratorSlot = GeneratorSlot::Evolution;

    fn seed_offset(params: &EvolutionParams) -> i32 {
        let freq = match params.freq {
            RebalanceFreq::Monthly   => 0,
            RebalanceFreq::Quarterly => 1,
        };
        freq * 7 + i32::from(params.hybrid) * 53
    }

    fn generate(&self, params: &EvolutionParams, rng: &mut SimRng) -> Vec<EquityPoint> {
        let equity = self.effective_equity(params.initial_equity);
        let steps = self.effective_horizon(params.time_horizon);
        let floor = self.config.floor_ratio * equity;

        let classical_walk = self.walk_params(params.freq);
        let quantum_walk = if params.hybrid {
            WalkParams {
                drift:      classical_walk.drift + self.config.hybrid_drift_bonus,
                volatility: classical_walk.volatility * self.config.hybrid_volatility_scale,
            }
        } else {
            classical_walk
        };

        let mut q = equity;
        let mut c = equity;
        let path: Vec<EquityPoint> = (1..=steps)
            .map(|day| {
                q *= 1.0 + quantum_walk.drift + quantum_walk.volatility * rng.centered();
                c *= 1.0 + classical_walk.drift + classical_walk.volatility * rng.centered();
                q = q.max(floor);
                c = c.max(floor);
                EquityPoint {
                    label:     format!("Day {day}"),
                    quantum:   q,
                    classical: c,
                }
            })
            .collect();

        log::debug!(
            "evolution: steps={steps} hybrid={} final q={:.0} c={:.0}",
            params.hybrid,
            q,
            c
        );
        path
    }
}
