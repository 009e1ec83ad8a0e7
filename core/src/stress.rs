//! Stress simulator.
//!
//! Two policies:
//!   - SectorBased (canonical): every allocation entry is classified into a
//!     sector by keyword, takes that sector's base hit plus shock-weighted
//!     add-ons, clamped to [factor_min, factor_max]. Equity after the hit is
//!     initial_equity * weight * (1 - factor), never negative.
//!   - LinearImpact: one linear combination of the shocks plus noise,
//!     clamped to ±linear_clamp, applied to each strategy's last equity.
//!
//! Both return bars alongside a ruin line = threshold% of initial equity.

use crate::{
    config::StressConfig,
    generator::Generator,
    rng::{GeneratorSlot, RngBank, SimRng},
    types::{clamp_pct, NamedScore, Sector},
};
use serde::{Deserialize, Serialize};

/// Shock sliders. Rates in basis points, the rest in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ShockVector {
    #[serde(default)]
    pub rates_bps: f64,
    #[serde(default)]
    pub oil_pct:   f64,
    #[serde(default)]
    pub tech_pct:  f64,
    #[serde(default)]
    pub fx_pct:    f64,
}

impl ShockVector {
    /// Replace non-finite components with 0 and negative rate shocks with 0.
    fn sanitized(&self) -> ShockVector {
        let f = |v: f64| if v.is_finite() { v } else { 0.0 };
        ShockVector {
            rates_bps: f(self.rates_bps).max(0.0),
            oil_pct:   f(self.oil_pct),
            tech_pct:  f(self.tech_pct),
            fx_pct:    f(self.fx_pct),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressPolicy {
    #[default]
    SectorBased,
    LinearImpact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressResult {
    pub bars:      Vec<NamedScore>,
    pub ruin_line: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorStressParams {
    /// Name + weight-percent pairs.
    pub allocation:     Vec<NamedScore>,
    pub initial_equity: f64,
    pub threshold_pct:  f64,
    pub shock:          ShockVector,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearStressParams {
    /// Last-period equity per strategy, e.g. Quantum and Classical.
    pub last_values:    Vec<NamedScore>,
    pub initial_equity: f64,
    pub threshold_pct:  f64,
    pub shock:          ShockVector,
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

/// threshold% of initial equity. Threshold is clamped to [0, 100].
pub fn ruin_line(threshold_pct: f64, initial_equity: f64) -> f64 {
    clamp_pct(threshold_pct) * finite_or_zero(initial_equity).max(0.0) / 100.0
}

fn shock_offset(shock: &ShockVector) -> i32 {
    let s = shock.sanitized();
    let bucket = |v: f64| v.clamp(-10_000.0, 10_000.0).round() as i32;
    bucket(s.rates_bps / 25.0) + bucket(s.oil_pct) * 3 + bucket(s.tech_pct) * 5 + bucket(s.fx_pct) * 7
}

pub struct StressSimulator {
    config: StressConfig,
}

impl StressSimulator {
    pub fn new(config: StressConfig) -> Self {
        Self { config }
    }

    /// Case-insensitive substring match against the keyword table.
    /// First matching keyword wins; no match is `Other`.
    pub fn classify(&self, name: &str) -> Sector {
        let lower = name.to_lowercase();
        self.config
            .keywords
            .iter()
            .find(|k| lower.contains(&k.keyword.to_lowercase()))
            .map_or(Sector::Other, |k| k.sector)
    }

    fn base_factor(&self, sector: Sector) -> f64 {
        match sector {
            Sector::Energy  => self.config.base_energy,
            Sector::Tech    => self.config.base_tech,
            Sector::Finance => self.config.base_finance,
            Sector::Auto    => self.config.base_auto,
            Sector::Health  => self.config.base_health,
            Sector::Other   => self.config.base_other,
        }
    }

    /// Combined stress factor for one sector, clamped to the configured range.
    pub fn stress_factor(&self, sector: Sector, shock: &ShockVector) -> f64 {
        let s = shock.sanitized();
        let rates = s.rates_bps / 10_000.0; // 200 bps -> 0.02
        let oil = s.oil_pct / 100.0;
        let tech = s.tech_pct / 100.0;
        let fx = s.fx_pct.abs() / 100.0 * self.config.fx_scale;

        let add_on = match sector {
            Sector::Finance => rates * 0.8 + fx * 0.2,
            Sector::Tech    => rates * 0.3 + (-tech).max(0.0) * 0.6 + fx * 0.1,
            Sector::Energy  => oil.max(0.0) * 0.7 + fx * 0.1,
            Sector::Auto    => rates * 0.2 + fx * 0.2,
            Sector::Health  => rates * 0.1,
            Sector::Other   => 0.0,
        };
        (self.base_factor(sector) + add_on).clamp(self.config.factor_min, self.config.factor_max)
    }

    /// Linear-impact policy. Pure given the stream.
    pub fn linear(&self, params: &LinearStressParams, rng: &mut SimRng) -> StressResult {
        let cfg = &self.config;
        let s = params.shock.sanitized();
        let shock_sum = s.rates_bps / 10_000.0 + s.oil_pct / 100.0 + s.tech_pct / 100.0 + s.fx_pct / 100.0;

        let bars = params
            .last_values
            .iter()
            .map(|last| {
                let impact = (-shock_sum * cfg.linear_weight + rng.centered() * cfg.linear_noise)
                    .clamp(-cfg.linear_clamp, cfg.linear_clamp);
                let value = (finite_or_zero(last.value) * (1.0 + impact)).round().max(0.0);
                NamedScore::new(last.name.clone(), value)
            })
            .collect();

        StressResult {
            bars,
            ruin_line: ruin_line(params.threshold_pct, params.initial_equity),
        }
    }

    /// Run the linear policy from a bank, on the stress slot.
    pub fn run_linear(&self, bank: &RngBank, params: &LinearStressParams) -> StressResult {
        let mut rng = bank.for_slot(GeneratorSlot::Stress, shock_offset(&params.shock) + 1);
        self.linear(params, &mut rng)
    }
}

impl Generator for StressSimulator {
    type Params = SectorStressParams;
    type Output = StressResult;

    const SLOT: GeneratorSlot = GeneratorSlot::Stress;

    fn seed_offset(params: &SectorStressParams) -> i32 {
        shock_offset(&params.shock)
    }

    /// Sector-based policy. Draws nothing from the stream.
    fn generate(&self, params: &SectorStressParams, _rng: &mut SimRng) -> StressResult {
        let equity = finite_or_zero(params.initial_equity).max(0.0);
        let bars: Vec<NamedScore> = params
            .allocation
            .iter()
            .map(|entry| {
                let name = if entry.name.is_empty() { "Asset" } else { entry.name.as_str() };
                let weight = finite_or_zero(entry.value) / 100.0;
                let sector = self.classify(name);
                let factor = self.stress_factor(sector, &params.shock);
                let after = (equity * weight * (1.0 - factor)).round().max(0.0);
                NamedScore::new(name, after)
            })
            .collect();

        let ruin = ruin_line(params.threshold_pct, params.initial_equity);
        log::debug!("stress: {} bars, ruin line {ruin:.0}", bars.len());
        StressResult { bars, ruin_line: ruin }
    }
}
