//! Stress simulator tests.

use qfolio_core::{
    config::StressConfig,
    engine::{DashboardInputs, SimEngine},
    stress::{ruin_line, LinearStressParams, SectorStressParams, ShockVector, StressSimulator},
    types::{NamedScore, Sector, Seed},
};

fn sector_params(allocation: Vec<NamedScore>, shock: ShockVector) -> SectorStressParams {
    SectorStressParams {
        allocation,
        initial_equity: 100_000.0,
        threshold_pct: 60.0,
        shock,
    }
}

/// A single bank holding with no shock takes only the finance base hit.
#[test]
fn single_bank_holding_without_shock() {
    let result = SimEngine::new(Seed(42)).stress(&sector_params(
        vec![NamedScore::new("HDFC Bank", 100.0)],
        ShockVector::default(),
    ));
    assert_eq!(result.ruin_line, 60_000.0);
    assert_eq!(result.bars.len(), 1);
    let bar = &result.bars[0];
    assert_eq!(bar.name, "HDFC Bank");
    assert!((65_000.0..=100_000.0).contains(&bar.value), "bar {}", bar.value);
    assert_eq!(bar.value, 92_000.0);
}

#[test]
fn names_are_classified_by_keyword() {
    let sim = StressSimulator::new(StressConfig::default());
    let cases = [
        ("HDFC Bank", Sector::Finance),
        ("ICICI Bank", Sector::Finance),
        ("Coal India", Sector::Energy),
        ("ONGC Oil", Sector::Energy),
        ("Bharti Airtel", Sector::Tech),
        ("Maruti Auto", Sector::Auto),
        ("Sun Pharma", Sector::Health),
        ("Reliance", Sector::Other),
        ("HUL", Sector::Other),
    ];
    for (name, expected) in cases {
        assert_eq!(sim.classify(name), expected, "{name}");
    }
    assert_eq!(sim.classify("BANK OF BARODA"), Sector::Finance, "matching ignores case");
}

#[test]
fn stress_factor_stays_in_range() {
    let sim = StressSimulator::new(StressConfig::default());
    let extreme = ShockVector { rates_bps: 10_000.0, oil_pct: 500.0, tech_pct: -500.0, fx_pct: -300.0 };
    let calm = ShockVector { rates_bps: -400.0, oil_pct: -80.0, tech_pct: 80.0, fx_pct: 0.0 };
    for sector in [Sector::Energy, Sector::Tech, Sector::Finance, Sector::Auto, Sector::Health, Sector::Other] {
        for shock in [extreme, calm, ShockVector::default()] {
            let f = sim.stress_factor(sector, &shock);
            assert!((0.02..=0.35).contains(&f), "{sector:?} {shock:?}: factor {f}");
        }
    }
    assert_eq!(sim.stress_factor(Sector::Finance, &extreme), 0.35);
}

#[test]
fn rate_shock_hits_finance_harder_than_health() {
    let sim = StressSimulator::new(StressConfig::default());
    let shock = ShockVector { rates_bps: 200.0, ..ShockVector::default() };
    let finance = sim.stress_factor(Sector::Finance, &shock) - sim.stress_factor(Sector::Finance, &ShockVector::default());
    let health = sim.stress_factor(Sector::Health, &shock) - sim.stress_factor(Sector::Health, &ShockVector::default());
    assert!(finance > health, "finance +{finance} vs health +{health}");
}

#[test]
fn bars_are_never_negative() {
    let allocation = vec![
        NamedScore::new("Infosys", -40.0),
        NamedScore::new("", 30.0),
        NamedScore::new("TCS", f64::NAN),
        NamedScore::new("Reliance", 110.0),
    ];
    let result = SimEngine::new(Seed(1)).stress(&sector_params(allocation, ShockVector::default()));
    assert_eq!(result.bars.len(), 4);
    for b in &result.bars {
        assert!(b.value >= 0.0, "{} went negative: {}", b.name, b.value);
    }
    assert_eq!(result.bars[1].name, "Asset", "blank names get a placeholder");
}

#[test]
fn ruin_line_is_threshold_share_of_equity() {
    assert_eq!(ruin_line(60.0, 100_000.0), 60_000.0);
    assert_eq!(ruin_line(0.0, 100_000.0), 0.0);
    assert_eq!(ruin_line(150.0, 100_000.0), 100_000.0, "threshold clamps to 100");
    assert_eq!(ruin_line(-10.0, 100_000.0), 0.0);
    assert_eq!(ruin_line(50.0, -1.0), 0.0);
}

// ── Linear policy ──────────────────────────────────────────────────

fn linear_params(shock: ShockVector) -> LinearStressParams {
    LinearStressParams {
        last_values: vec![
            NamedScore::new("Quantum", 120_000.0),
            NamedScore::new("Classical", 110_000.0),
        ],
        initial_equity: 100_000.0,
        threshold_pct: 50.0,
        shock,
    }
}

#[test]
fn linear_policy_without_shock_is_only_noise() {
    let result = SimEngine::new(Seed(42)).stress_linear(&linear_params(ShockVector::default()));
    assert_eq!(result.ruin_line, 50_000.0);
    let q = result.bars[0].value;
    let c = result.bars[1].value;
    assert!((118_800.0..=121_200.0).contains(&q), "quantum {q}");
    assert!((108_900.0..=111_100.0).contains(&c), "classical {c}");
}

#[test]
fn linear_policy_impact_is_clamped() {
    let shock = ShockVector { rates_bps: 100_000.0, oil_pct: 100.0, tech_pct: 100.0, fx_pct: 100.0 };
    let result = SimEngine::new(Seed(42)).stress_linear(&linear_params(shock));
    assert_eq!(result.bars[0].value, 96_000.0, "120000 less the 20% cap");
    assert_eq!(result.bars[1].value, 88_000.0, "110000 less the 20% cap");
}

#[test]
fn linear_policy_never_goes_negative() {
    let mut params = linear_params(ShockVector::default());
    params.last_values.push(NamedScore::new("Broken", -5_000.0));
    let result = SimEngine::new(Seed(3)).stress_linear(&params);
    assert!(result.bars.iter().all(|b| b.value >= 0.0), "{:?}", result.bars);
}

// ── Engine wiring ──────────────────────────────────────────────────

/// Bad equity is coerced once per run: the walk, the bars and the ruin
/// line all use the same fallback amount.
#[test]
fn invalid_equity_is_coerced_once_per_run() {
    let engine = SimEngine::new(Seed(42));
    for bad in [0.0, -25_000.0, f64::NAN] {
        let results = engine.run(&DashboardInputs {
            initial_equity: bad,
            threshold: 50.0,
            ..DashboardInputs::default()
        });
        assert_eq!(results.stress.ruin_line, 50_000.0, "equity {bad}");
        let total: f64 = results.stress.bars.iter().map(|b| b.value).sum();
        assert!(
            (65_000.0..=100_000.0).contains(&total),
            "equity {bad}: bars total {total}"
        );
        assert!(results.evolution.iter().all(|p| p.quantum >= 60_000.0));

        let reference = engine.run(&DashboardInputs {
            initial_equity: 100_000.0,
            threshold: 50.0,
            ..DashboardInputs::default()
        });
        assert_eq!(results.stress, reference.stress, "equity {bad}");
        assert_eq!(results.evolution, reference.evolution, "equity {bad}");
    }
}
