use crate::{
    error::{SimError, SimResult},
    types::Sector,
};
use serde::{Deserialize, Serialize};

// ── Frontier ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontierConfig {
    /// Number of points on the curve. Clamped to 5..=8.
    pub points: usize,
    /// Risk of the first point at multiplier 1.
    pub base_risk: f64,
    /// Return of the first point at multiplier 1.
    pub base_return: f64,
    pub risk_step: f64,
    pub return_step: f64,
    /// Peak-to-peak amplitude of the return noise.
    pub noise_amplitude: f64,
    /// Return penalty per percentage point of summed sector caps.
    pub sector_cap_penalty_per_pct: f64,
    pub esg_penalty: f64,
}

impl Default for FrontierConfig {
    fn default() -> Self {
        Self {
            points: 8,
            base_risk: 5.0,
            base_return: 2.5,
            risk_step: 2.0,
            return_step: 1.5,
            noise_amplitude: 0.6,
            sector_cap_penalty_per_pct: 0.005,
            esg_penalty: 0.3,
        }
    }
}

// ── Ratio comparator ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RatioConfig {
    pub baseline: f64,
    /// Peak-to-peak spread of the baseline around `baseline`.
    pub baseline_spread: f64,
    /// Quantum margin over Classical is drawn from [min, max).
    pub quantum_margin_min: f64,
    pub quantum_margin_max: f64,
    /// Hybrid margin over Quantum is drawn from [min, max).
    pub hybrid_margin_min: f64,
    pub hybrid_margin_max: f64,
    pub floor: f64,
}

impl Default for RatioConfig {
    fn default() -> Self {
        Self {
            baseline: 1.1,
            baseline_spread: 0.3,
            quantum_margin_min: 0.05,
            quantum_margin_max: 0.35,
            hybrid_margin_min: 0.02,
            hybrid_margin_max: 0.12,
            floor: 0.05,
        }
    }
}

// ── Candidate selector ─────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Distinct, equal-length bit patterns. One candidate per pattern.
    pub bit_patterns: Vec<String>,
    /// Raw scores are drawn from [min, max) before normalisation.
    pub raw_score_min: f64,
    pub raw_score_max: f64,
    pub expected_return_min: f64,
    pub expected_return_max: f64,
    pub risk_min: f64,
    pub risk_max: f64,
    pub esg_excluded_probability: f64,
    pub sector_cap_probability: f64,
    /// Probabilities are rounded to this many decimals for display.
    pub probability_decimals: u32,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            bit_patterns: ["10101", "11100", "11010", "10011", "01101", "00111"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            raw_score_min: 0.5,
            raw_score_max: 1.5,
            expected_return_min: 0.085,
            expected_return_max: 0.100,
            risk_min: 0.090,
            risk_max: 0.120,
            esg_excluded_probability: 0.20,
            sector_cap_probability: 0.10,
            probability_decimals: 3,
        }
    }
}

// ── Allocation ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationConfig {
    /// Raw weights are max(raw_floor, u * raw_ceiling).
    pub raw_floor: f64,
    pub raw_ceiling: f64,
    /// Guaranteed minimum rounded weight in percent.
    pub min_weight_pct: i64,
    pub top_n: usize,
    pub strategy_names: Vec<String>,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            raw_floor: 5.0,
            raw_ceiling: 40.0,
            min_weight_pct: 2,
            top_n: 5,
            strategy_names: ["QAOA-based", "Classical Max-Sharpe", "Equal-Weight", "Benchmark Index"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

// ── Evolution ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WalkParams {
    pub drift:      f64,
    pub volatility: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub monthly:   WalkParams,
    pub quarterly: WalkParams,
    /// Added to the Quantum drift when hybrid mode is on.
    pub hybrid_drift_bonus: f64,
    /// Quantum volatility is multiplied by this when hybrid mode is on.
    pub hybrid_volatility_scale: f64,
    /// Equity never drops below floor_ratio * initial equity.
    pub floor_ratio: f64,
    pub default_initial_equity: f64,
    pub max_horizon: u32,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            monthly:   WalkParams { drift: 0.0015, volatility: 0.030 },
            quarterly: WalkParams { drift: 0.0010, volatility: 0.022 },
            hybrid_drift_bonus: 0.0005,
            hybrid_volatility_scale: 0.85,
            floor_ratio: 0.6,
            default_initial_equity: 100_000.0,
            max_horizon: 365,
        }
    }
}

// ── Stress ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectorKeyword {
    pub keyword: String,
    pub sector:  Sector,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StressConfig {
    /// Checked in order; the first keyword found in the name wins.
    pub keywords: Vec<SectorKeyword>,
    pub base_energy:  f64,
    pub base_tech:    f64,
    pub base_finance: f64,
    pub base_auto:    f64,
    pub base_health:  f64,
    pub base_other:   f64,
    pub factor_min: f64,
    pub factor_max: f64,
    /// FX shocks are scaled by this before sector weights apply.
    pub fx_scale: f64,
    /// Linear policy: weight applied to the summed shocks.
    pub linear_weight: f64,
    /// Linear policy: peak-to-peak noise amplitude.
    pub linear_noise: f64,
    /// Linear policy: impact is clamped to ±this.
    pub linear_clamp: f64,
}

impl Default for StressConfig {
    fn default() -> Self {
        use Sector::*;
        let table: &[(&str, Sector)] = &[
            ("oil", Energy), ("coal", Energy), ("petro", Energy), ("energy", Energy),
            ("tech", Tech), ("it", Tech), ("software", Tech), ("airtel", Tech),
            ("bank", Finance), ("finance", Finance),
            ("auto", Auto),
            ("pharma", Health), ("lab", Health), ("health", Health),
        ];
        Self {
            keywords: table
                .iter()
                .map(|(k, s)| SectorKeyword { keyword: k.to_string(), sector: *s })
                .collect(),
            base_energy:  0.10,
            base_tech:    0.12,
            base_finance: 0.08,
            base_auto:    0.07,
            base_health:  0.05,
            base_other:   0.06,
            factor_min: 0.02,
            factor_max: 0.35,
            fx_scale: 0.3,
            linear_weight: 0.5,
            linear_noise: 0.02,
            linear_clamp: 0.20,
        }
    }
}

// ── Top level ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub frontier:   FrontierConfig,
    pub ratio:      RatioConfig,
    pub selector:   SelectorConfig,
    pub allocation: AllocationConfig,
    pub evolution:  EvolutionConfig,
    pub stress:     StressConfig,
}

impl SimConfig {
    /// Load from a JSON file. Missing sections and fields keep their defaults.
    /// In tests, use SimConfig::default().
    pub fn load(path: &str) -> SimResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SimError::Config {
            path:   path.to_string(),
            reason: e.to_string(),
        })?;
        let config: SimConfig = serde_json::from_str(&content).map_err(|e| SimError::Config {
            path:   path.to_string(),
            reason: e.to_string(),
        })?;
        config.validate(path)?;
        log::info!("Loaded config from {path}");
        Ok(config)
    }

    fn validate(&self, path: &str) -> SimResult<()> {
        let bad = |reason: &str| SimError::Config {
            path:   path.to_string(),
            reason: reason.to_string(),
        };
        let patterns = &self.selector.bit_patterns;
        if patterns.is_empty() {
            return Err(bad("selector.bit_patterns is empty"));
        }
        let width = patterns[0].len();
        if patterns.iter().any(|p| p.len() != width || !p.chars().all(|c| c == '0' || c == '1')) {
            return Err(bad("selector.bit_patterns must be equal-length binary strings"));
        }
        let mut seen = patterns.clone();
        seen.sort();
        seen.dedup();
        if seen.len() != patterns.len() {
            return Err(bad("selector.bit_patterns must be distinct"));
        }
        if self.allocation.strategy_names.is_empty() {
            return Err(bad("allocation.strategy_names is empty"));
        }
        if !(self.allocation.raw_floor > 0.0) {
            return Err(bad("allocation.raw_floor must be positive"));
        }
        if self.stress.factor_min > self.stress.factor_max {
            return Err(bad("stress.factor_min exceeds stress.factor_max"));
        }
        Ok(())
    }
}
