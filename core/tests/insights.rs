//! Insights aggregator tests.

use qfolio_core::{
    engine::{DashboardInputs, SimEngine},
    evolution::EquityPoint,
    insights::{self, best_score, concentration_index, esg_violation_rate, evolution_summary},
    selector::Candidate,
    types::{ComplianceTag, NamedScore, Seed},
};

fn point(day: u32, quantum: f64, classical: f64) -> EquityPoint {
    EquityPoint { label: format!("Day {day}"), quantum, classical }
}

fn candidate(bits: &str, probability: f64, compliance: ComplianceTag) -> Candidate {
    Candidate {
        bits: bits.into(),
        probability,
        expected_return: 0.09,
        risk: 0.1,
        compliance,
    }
}

#[test]
fn single_holding_is_fully_concentrated() {
    assert_eq!(concentration_index(&[NamedScore::new("Only", 100.0)]), 100.0);
}

#[test]
fn four_equal_holdings_index_at_twenty_five() {
    let alloc: Vec<NamedScore> = ["A", "B", "C", "D"].iter().map(|n| NamedScore::new(*n, 25.0)).collect();
    assert_eq!(concentration_index(&alloc), 25.0);
}

#[test]
fn empty_or_zero_allocation_index_is_zero() {
    assert_eq!(concentration_index(&[]), 0.0);
    assert_eq!(concentration_index(&[NamedScore::new("A", 0.0), NamedScore::new("B", 0.0)]), 0.0);
}

#[test]
fn best_score_ties_go_to_the_first() {
    let scores = vec![
        NamedScore::new("Classical", 1.2),
        NamedScore::new("Quantum", 1.5),
        NamedScore::new("Hybrid", 1.5),
    ];
    assert_eq!(best_score(&scores).map(|s| s.name), Some("Quantum".to_string()));
    assert_eq!(best_score(&[]), None);
}

#[test]
fn esg_violation_rate_counts_excluded_only() {
    assert_eq!(esg_violation_rate(&[]), 0.0);
    let candidates = vec![
        candidate("10101", 0.3, ComplianceTag::EsgExcluded),
        candidate("11100", 0.2, ComplianceTag::SectorCapExceeded),
        candidate("11010", 0.2, ComplianceTag::Ok),
        candidate("10011", 0.2, ComplianceTag::EsgExcluded),
        candidate("01101", 0.1, ComplianceTag::Ok),
    ];
    let rate = esg_violation_rate(&candidates);
    assert!((rate - 40.0).abs() < 1e-9, "rate {rate}");
}

#[test]
fn evolution_summary_needs_two_points() {
    assert!(evolution_summary(&[]).is_none());
    assert!(evolution_summary(&[point(1, 100.0, 100.0)]).is_none());

    let summary = evolution_summary(&[point(1, 100.0, 100.0), point(2, 110.0, 105.0)])
        .expect("two points summarise");
    assert!((summary.quantum_pct - 10.0).abs() < 1e-9, "quantum {}", summary.quantum_pct);
    assert!((summary.classical_pct - 5.0).abs() < 1e-9, "classical {}", summary.classical_pct);
    assert!((summary.advantage_pct - 5.0).abs() < 1e-9, "advantage {}", summary.advantage_pct);
}

#[test]
fn summarize_flags_concentration_and_compliance() {
    let alloc = vec![NamedScore::new("A", 70.0), NamedScore::new("B", 30.0)];
    let candidates = vec![
        candidate("10101", 0.6, ComplianceTag::Ok),
        candidate("11100", 0.4, ComplianceTag::Ok),
    ];
    let summary = insights::summarize(&[], &[], &alloc, &candidates, true);

    assert!(summary.is_concentrated, "HHI {:?}", summary.concentration_index);
    assert!(summary.all_esg_compliant);
    assert!(summary.hybrid);
    assert!(summary.evolution.is_none());
    assert!(summary.best_sharpe.is_none());
    assert_eq!(summary.top_weights[0].name, "A");
    assert_eq!(summary.top_candidates[0].probability, 60.0);
}

#[test]
fn summarize_with_nothing_to_report() {
    let summary = insights::summarize(&[], &[], &[], &[], false);
    assert_eq!(summary.concentration_index, None);
    assert!(!summary.is_concentrated);
    assert!(!summary.all_esg_compliant, "no candidates is not a compliance claim");
    assert_eq!(summary.esg_violation_rate, 0.0);
    assert!(summary.top_weights.is_empty());
}

#[test]
fn engine_run_carries_a_summary() {
    let results = SimEngine::new(Seed(42)).run(&DashboardInputs::default());
    let insights = &results.insights;
    assert!(insights.evolution.is_some(), "12-step run should summarise");
    assert_eq!(insights.best_sharpe.as_ref().map(|s| s.name.as_str()), Some("Quantum"));
    let hhi = insights.concentration_index.expect("allocation present");
    assert!((20.0..=100.0).contains(&hhi), "five holdings give HHI {hhi}");
    assert!(insights.top_candidates.len() <= 6);
}
