//! Allocation generator.
//!
//! Draws positive raw weights, normalises them to 100, rounds each entry
//! to a whole percent and lets the last entry absorb the rounding error so
//! the total is exactly 100.

use crate::{
    config::AllocationConfig,
    generator::Generator,
    rng::{GeneratorSlot, SimRng},
    types::{clamp_pct, Dataset, NamedScore},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationVariant {
    /// Top-N assets of the dataset's universe.
    TopAssets,
    /// Fixed strategy mix (QAOA-based, Classical Max-Sharpe, ...).
    StrategyMix,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationParams {
    /// Bit string of the chosen candidate, if any.
    pub top_bits:  Option<String>,
    pub hybrid:    bool,
    pub dataset:   Dataset,
    pub threshold: f64,
    pub variant:   AllocationVariant,
}

pub struct AllocationGenerator {
    config: AllocationConfig,
}

impl AllocationGenerator {
    pub fn new(config: AllocationConfig) -> Self {
        Self { config }
    }

    fn names(&self, params: &AllocationParams) -> Vec<String> {
        match params.variant {
            AllocationVariant::TopAssets => params
                .dataset
                .top_assets(self.config.top_n)
                .iter()
                .map(|s| s.to_string())
                .collect(),
            AllocationVariant::StrategyMix => self.config.strategy_names.clone(),
        }
    }
}

/// Round `raw` shares to whole percents summing to exactly 100.
/// The last entry takes up the rounding slack.
fn round_to_hundred(raw: &[f64]) -> Vec<i64> {
    let total: f64 = raw.iter().sum();
    if raw.is_empty() || total <= 0.0 {
        return vec![0; raw.len()];
    }
    let mut rounded: Vec<i64> = raw.iter().map(|w| (w / total * 100.0).round() as i64).collect();
    let head: i64 = rounded[..rounded.len() - 1].iter().sum();
    if let Some(last) = rounded.last_mut() {
        *last = 100 - head;
    }
    rounded
}

/// Lift entries below `floor` by taking single points from the largest entry.
/// Leaves the total unchanged. No-op when the floor cannot be met for everyone.
fn enforce_floor(weights: &mut [i64], floor: i64) {
    if floor <= 0 || floor * weights.len() as i64 > 100 {
        return;
    }
    for i in 0..weights.len() {
        while weights[i] < floor {
            let Some((j, &max)) = weights.iter().enumerate().max_by_key(|(_, w)| **w) else {
                return;
            };
            if max <= floor {
                return;
            }
            weights[j] -= 1;
            weights[i] += 1;
        }
    }
}

impl Generator for AllocationGenerator {
    type Params = AllocationParams;
    type Output = Vec<NamedScore>;

    const SLOT: GeneratorSlot = GeneratorSlot::Allocation;

    fn seed_offset(params: &AllocationParams) -> i32 {
        let bits = params
            .top_bits
            .as_deref()
            .and_then(|b| u32::from_str_radix(b, 2).ok())
            .map_or(0, |b| (b % 10_007) as i32);
        bits.wrapping_mul(3)
            .wrapping_add(i32::from(params.hybrid).wrapping_mul(31))
            .wrapping_add(params.dataset.index().wrapping_mul(11))
            .wrapping_add(clamp_pct(params.threshold).round() as i32)
    }

    fn generate(&self, params: &AllocationParams, rng: &mut SimRng) -> Vec<NamedScore> {
        let names = self.names(params);
        let raw: Vec<f64> = names
            .iter()
            .map(|_| (rng.next_f64() * self.config.raw_ceiling).max(self.config.raw_floor))
            .collect();

        let mut weights = round_to_hundred(&raw);
        enforce_floor(&mut weights, self.config.min_weight_pct);

        let alloc: Vec<NamedScore> = names
            .into_iter()
            .zip(weights)
            .map(|(name, w)| NamedScore::new(name, w as f64))
            .collect();

        log::debug!(
            "allocation: dataset={} variant={:?} entries={}",
            params.dataset.id(),
            params.variant,
            alloc.len()
        );
        alloc
    }
}
