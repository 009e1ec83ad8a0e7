//! The simulation engine: one entry point per generator.
//!
//! RULES:
//!   - Generators never call each other. The engine is the caller: when one
//!     generator's input is another's output (allocation takes the best
//!     candidate, stress takes the allocation), the engine passes it along.
//!   - All randomness flows through the RngBank.
//!   - Same seed + same inputs = identical ResultSet.

use crate::{
    allocation::{AllocationGenerator, AllocationParams, AllocationVariant},
    config::SimConfig,
    evolution::{EquityPoint, EvolutionParams, EvolutionSimulator},
    frontier::{FrontierGenerator, FrontierParams, FrontierPoint},
    generator::Generator,
    insights,
    ratio::{RatioComparator, RatioParams, CLASSICAL, QUANTUM},
    rng::RngBank,
    selector::{Candidate, CandidateSelector, SelectorParams},
    snapshot::ResultSet,
    stress::{
        LinearStressParams, SectorStressParams, ShockVector, StressPolicy, StressResult,
        StressSimulator,
    },
    types::{ConstraintSummary, Dataset, NamedScore, RebalanceFreq, RiskLevel, Seed},
};
use serde::{Deserialize, Serialize};

/// Everything the dashboard collects from its controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardInputs {
    pub dataset:        Dataset,
    pub risk_level:     RiskLevel,
    pub constraints:    ConstraintSummary,
    pub threshold:      f64,
    pub hybrid:         bool,
    pub freq:           RebalanceFreq,
    pub initial_equity: f64,
    pub time_horizon:   u32,
    pub shock:          ShockVector,
    pub variant:        AllocationVariant,
    pub stress_policy:  StressPolicy,
}

impl Default for DashboardInputs {
    fn default() -> Self {
        Self {
            dataset:        Dataset::Nifty50,
            risk_level:     RiskLevel::Medium,
            constraints:    ConstraintSummary::default(),
            threshold:      0.0,
            hybrid:         false,
            freq:           RebalanceFreq::Monthly,
            initial_equity: 100_000.0,
            time_horizon:   12,
            shock:          ShockVector::default(),
            variant:        AllocationVariant::TopAssets,
            stress_policy:  StressPolicy::SectorBased,
        }
    }
}

pub struct SimEngine {
    pub rng_bank: RngBank,
    frontier:     FrontierGenerator,
    ratio:        RatioComparator,
    selector:     CandidateSelector,
    allocation:   AllocationGenerator,
    evolution:    EvolutionSimulator,
    stress:       StressSimulator,
}

impl SimEngine {
    pub fn new(seed: Seed) -> Self {
        Self::with_config(seed, SimConfig::default())
    }

    pub fn with_config(seed: Seed, config: SimConfig) -> Self {
        Self {
            rng_bank:   RngBank::new(seed),
            frontier:   FrontierGenerator::new(config.frontier),
            ratio:      RatioComparator::new(config.ratio),
            selector:   CandidateSelector::new(config.selector),
            allocation: AllocationGenerator::new(config.allocation),
            evolution:  EvolutionSimulator::new(config.evolution),
            stress:     StressSimulator::new(config.stress),
        }
    }

    pub fn seed(&self) -> Seed {
        self.rng_bank.seed()
    }

    pub fn frontier(&self, params: &FrontierParams) -> Vec<FrontierPoint> {
        self.frontier.run(&self.rng_bank, params)
    }

    pub fn ratios(&self, params: &RatioParams) -> Vec<NamedScore> {
        self.ratio.run(&self.rng_bank, params)
    }

    pub fn candidates(&self, params: &SelectorParams) -> Vec<Candidate> {
        self.selector.run(&self.rng_bank, params)
    }

    pub fn allocation(&self, params: &AllocationParams) -> Vec<NamedScore> {
        self.allocation.run(&self.rng_bank, params)
    }

    pub fn evolution(&self, params: &EvolutionParams) -> Vec<EquityPoint> {
        self.evolution.run(&self.rng_bank, params)
    }

    pub fn stress(&self, params: &SectorStressParams) -> StressResult {
        self.stress.run(&self.rng_bank, params)
    }

    pub fn stress_linear(&self, params: &LinearStressParams) -> StressResult {
        self.stress.run_linear(&self.rng_bank, params)
    }

    /// Run every generator for one set of dashboard inputs.
    ///
    /// Initial equity is coerced once, so the walk, the stress bars and the
    /// ruin line all measure against the same amount.
    pub fn run(&self, inputs: &DashboardInputs) -> ResultSet {
        let equity = self.evolution.effective_equity(inputs.initial_equity);

        let frontier = self.frontier(&FrontierParams {
            risk_level:  inputs.risk_level,
            constraints: inputs.constraints.clone(),
            threshold:   Some(inputs.threshold),
        });

        let ratios = self.ratios(&RatioParams {
            dataset:        Some(inputs.dataset),
            risk_level:     Some(inputs.risk_level),
            include_hybrid: inputs.hybrid,
        });

        let candidates = self.candidates(&SelectorParams {
            constraints: inputs.constraints.clone(),
            threshold:   inputs.threshold,
        });

        let allocation = self.allocation(&AllocationParams {
            top_bits:  candidates.first().map(|c| c.bits.clone()),
            hybrid:    inputs.hybrid,
            dataset:   inputs.dataset,
            threshold: inputs.threshold,
            variant:   inputs.variant,
        });

        let evolution = self.evolution(&EvolutionParams {
            freq:           inputs.freq,
            hybrid:         inputs.hybrid,
            initial_equity: equity,
            time_horizon:   inputs.time_horizon,
        });

        let stress = match inputs.stress_policy {
            StressPolicy::SectorBased => self.stress(&SectorStressParams {
                allocation:     allocation.clone(),
                initial_equity: equity,
                threshold_pct:  inputs.threshold,
                shock:          inputs.shock,
            }),
            StressPolicy::LinearImpact => {
                let last_values = evolution
                    .last()
                    .map(|p| {
                        vec![
                            NamedScore::new(QUANTUM, p.quantum),
                            NamedScore::new(CLASSICAL, p.classical),
                        ]
                    })
                    .unwrap_or_default();
                self.stress_linear(&LinearStressParams {
                    last_values,
                    initial_equity: equity,
                    threshold_pct:  inputs.threshold,
                    shock:          inputs.shock,
                })
            }
        };

        let insights = insights::summarize(&evolution, &ratios, &allocation, &candidates, inputs.hybrid);

        log::info!(
            "run complete: seed={} dataset={} risk={} candidates={} steps={}",
            self.seed().0,
            inputs.dataset.id(),
            inputs.risk_level.id(),
            candidates.len(),
            evolution.len()
        );

        ResultSet {
            seed: self.seed(),
            inputs: inputs.clone(),
            frontier,
            ratios,
            candidates,
            allocation,
            evolution,
            stress,
            insights,
        }
    }
}
