//! Insights aggregator.
//!
//! Pure function of the other generators' outputs; draws no randomness.
//! Produces numeric and boolean facts only. Turning them into sentences
//! is the caller's job.

use crate::{
    evolution::EquityPoint,
    selector::Candidate,
    types::{clamp_pct, NamedScore},
};
use serde::{Deserialize, Serialize};

/// HHI index above which an allocation reads as concentrated.
pub const CONCENTRATION_CUTOFF: f64 = 25.0;
pub const TOP_WEIGHTS: usize = 5;
pub const TOP_CANDIDATES: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionSummary {
    pub quantum_start:   f64,
    pub quantum_end:     f64,
    pub quantum_pct:     f64,
    pub classical_start: f64,
    pub classical_end:   f64,
    pub classical_pct:   f64,
    /// quantum_pct - classical_pct.
    pub advantage_pct:   f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateShare {
    pub bits:        String,
    /// Probability in percent.
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightSummary {
    pub evolution:           Option<EvolutionSummary>,
    pub best_sharpe:         Option<NamedScore>,
    /// HHI × 100, in [0, 100]. None when there is no allocation.
    pub concentration_index: Option<f64>,
    /// Share of candidates tagged ESG-excluded, in [0, 100].
    pub esg_violation_rate:  f64,
    pub is_concentrated:     bool,
    pub all_esg_compliant:   bool,
    pub top_weights:         Vec<NamedScore>,
    pub top_candidates:      Vec<CandidateShare>,
    pub hybrid:              bool,
}

impl InsightSummary {
    pub fn advantage_pct(&self) -> Option<f64> {
        self.evolution.as_ref().map(|e| e.advantage_pct)
    }
}

fn pct_gain(start: f64, end: f64) -> f64 {
    if start == 0.0 || !start.is_finite() || !end.is_finite() {
        return 0.0;
    }
    (end - start) / start * 100.0
}

/// Percentage gain of each curve from its first to its last point.
/// Needs at least two points.
pub fn evolution_summary(path: &[EquityPoint]) -> Option<EvolutionSummary> {
    if path.len() < 2 {
        return None;
    }
    let first = path.first()?;
    let last = path.last()?;
    let quantum_pct = pct_gain(first.quantum, last.quantum);
    let classical_pct = pct_gain(first.classical, last.classical);
    Some(EvolutionSummary {
        quantum_start: first.quantum,
        quantum_end: last.quantum,
        quantum_pct,
        classical_start: first.classical,
        classical_end: last.classical,
        classical_pct,
        advantage_pct: quantum_pct - classical_pct,
    })
}

/// Highest score; on ties the first one in input order wins.
pub fn best_score(scores: &[NamedScore]) -> Option<NamedScore> {
    scores
        .iter()
        .fold(None::<&NamedScore>, |best, s| match best {
            Some(b) if s.value > b.value => Some(s),
            Some(b) => Some(b),
            None => Some(s),
        })
        .cloned()
}

/// Σ(weight_fraction²) × 100 over percent weights, clamped to [0, 100].
/// An empty allocation or an all-zero one is 0.
pub fn concentration_index(alloc: &[NamedScore]) -> f64 {
    let total: f64 = alloc.iter().map(|a| a.value).filter(|v| v.is_finite()).sum();
    if total == 0.0 {
        return 0.0;
    }
    let hhi: f64 = alloc
        .iter()
        .map(|a| if a.value.is_finite() { a.value / 100.0 } else { 0.0 })
        .map(|w| w * w)
        .sum();
    clamp_pct(hhi * 100.0)
}

/// Percent of candidates that violate the ESG filter. 0 for no candidates.
pub fn esg_violation_rate(candidates: &[Candidate]) -> f64 {
    if candidates.is_empty() {
        return 0.0;
    }
    let violations = candidates.iter().filter(|c| c.compliance.is_esg_violation()).count();
    clamp_pct(violations as f64 / candidates.len() as f64 * 100.0)
}

fn top_weights(alloc: &[NamedScore]) -> Vec<NamedScore> {
    let mut sorted = alloc.to_vec();
    sorted.sort_by(|a, b| b.value.total_cmp(&a.value));
    sorted.truncate(TOP_WEIGHTS);
    sorted
}

fn top_candidates(candidates: &[Candidate]) -> Vec<CandidateShare> {
    let mut sorted = candidates.to_vec();
    sorted.sort_by(|a, b| b.probability.total_cmp(&a.probability));
    sorted
        .into_iter()
        .take(TOP_CANDIDATES)
        .map(|c| CandidateShare {
            bits: c.bits,
            probability: (c.probability * 1000.0).round() / 10.0,
        })
        .collect()
}

/// Aggregate the latest outputs into one summary.
pub fn summarize(
    evolution:  &[EquityPoint],
    ratios:     &[NamedScore],
    allocation: &[NamedScore],
    candidates: &[Candidate],
    hybrid:     bool,
) -> InsightSummary {
    let concentration = (!allocation.is_empty()).then(|| concentration_index(allocation));
    let esg_rate = esg_violation_rate(candidates);
    InsightSummary {
        evolution: evolution_summary(evolution),
        best_sharpe: best_score(ratios),
        concentration_index: concentration,
        esg_violation_rate: esg_rate,
        is_concentrated: concentration.is_some_and(|c| c > CONCENTRATION_CUTOFF),
        all_esg_compliant: !candidates.is_empty() && esg_rate == 0.0,
        top_weights: top_weights(allocation),
        top_candidates: top_candidates(candidates),
        hybrid,
    }
}
