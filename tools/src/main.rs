//! qfolio-runner: headless stand-in for the portfolio dashboard.
//!
//! Usage:
//!   qfolio-runner --seed 42 --dataset crypto --risk high --horizon 30
//!   qfolio-runner --db ui.db --hybrid --export-json out.json --export-csv top.csv
//!   qfolio-runner --risk 7.5            (legacy 0-10 scale)

use anyhow::Result;
use qfolio_core::{
    allocation::AllocationVariant,
    app_state::{AppState, Tab, ToastKind},
    config::SimConfig,
    engine::{DashboardInputs, SimEngine},
    export,
    insights::InsightSummary,
    snapshot::ResultSet,
    store::SimStore,
    stress::StressPolicy,
    types::{Dataset, RebalanceFreq, RiskLevel, Seed},
};
use std::env;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = Seed(parse_arg(&args, "--seed", 42i32));
    let db = str_arg(&args, "--db").unwrap_or(":memory:");

    let config = match str_arg(&args, "--config") {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };

    let store = SimStore::open(db)?;
    store.migrate()?;

    // Startup: restore the last session, then apply any flags on top.
    let mut state = store.load_app_state()?;
    apply_overrides(&mut state, &args);
    store.save_app_state(&state)?;

    let inputs = build_inputs(&state, &args);

    println!("qfolio-runner");
    println!("  seed:      {}", seed.0);
    println!("  db:        {db}");
    println!("  dataset:   {}", inputs.dataset.id());
    println!("  risk:      {}", inputs.risk_level.id());
    println!("  horizon:   {} days", inputs.time_horizon);
    println!("  equity:    {:.0}", inputs.initial_equity);
    println!("  threshold: {:.0}%", inputs.threshold);
    println!();

    let engine = SimEngine::with_config(seed, config);
    let results = engine.run(&inputs);

    print_results(&results);
    println!();
    println!("=== KEY TAKEAWAYS ===");
    let lines = narrative(&results.insights);
    if lines.is_empty() {
        println!("  Tune risk, rebalancing, and constraints to see a summary.");
    }
    for line in lines {
        println!("  - {line}");
    }

    let run_id = store.save_result_set(&results)?;
    state.add_toast(ToastKind::Success, format!("Saved run {run_id}"));

    if let Some(path) = str_arg(&args, "--export-json") {
        match export::write_json(&results, Path::new(path)) {
            Ok(()) => state.add_toast(ToastKind::Success, format!("Exported JSON to {path}")),
            Err(e) => state.add_toast(ToastKind::Error, format!("JSON export failed: {e}")),
        };
    }
    if let Some(path) = str_arg(&args, "--export-csv") {
        match export::write_candidates_csv(&results.candidates, Path::new(path)) {
            Ok(()) => state.add_toast(ToastKind::Success, format!("Exported CSV to {path}")),
            Err(e) => state.add_toast(ToastKind::Error, format!("CSV export failed: {e}")),
        };
    }

    println!();
    for toast in state.notifications.active() {
        println!("[{:?} #{}] {}", toast.kind, toast.id, toast.msg);
    }
    Ok(())
}

/// Flags map onto the same setters the dashboard controls use.
/// Unparsable values leave the stored value alone.
fn apply_overrides(state: &mut AppState, args: &[String]) {
    if let Some(d) = str_arg(args, "--dataset") {
        let dataset = Dataset::parse(d);
        if dataset == Dataset::Default && d != "default" {
            log::warn!("unknown dataset '{d}', using the default universe");
        }
        state.set_dataset(dataset);
    }
    if let Some(r) = str_arg(args, "--risk").and_then(RiskLevel::from_input) {
        state.set_risk_level(r);
    }
    if let Some(h) = opt_arg::<i64>(args, "--horizon") {
        state.set_time_horizon(h);
    }
    if let Some(e) = opt_arg::<f64>(args, "--equity") {
        state.set_initial_equity(e);
    }
    if let Some(t) = opt_arg::<f64>(args, "--threshold") {
        state.set_threshold(t);
    }
    if let Some(f) = str_arg(args, "--freq").and_then(RebalanceFreq::parse) {
        state.set_freq(f);
    }
    if args.iter().any(|a| a == "--hybrid") {
        state.set_hybrid(true);
    }
    if let Some(tab) = str_arg(args, "--tab").and_then(Tab::parse) {
        state.set_active_tab(tab);
    }
}

fn build_inputs(state: &AppState, args: &[String]) -> DashboardInputs {
    let mut inputs = state.to_inputs();
    inputs.constraints.esg_exclude = args.iter().any(|a| a == "--esg");
    inputs.shock.rates_bps = parse_arg(args, "--rates", 0.0);
    inputs.shock.oil_pct = parse_arg(args, "--oil", 0.0);
    inputs.shock.tech_pct = parse_arg(args, "--tech", 0.0);
    inputs.shock.fx_pct = parse_arg(args, "--fx", 0.0);
    inputs.stress_policy = match str_arg(args, "--stress-policy") {
        Some("linear") => StressPolicy::LinearImpact,
        _ => StressPolicy::SectorBased,
    };
    inputs.variant = match str_arg(args, "--variant") {
        Some("strategies") => AllocationVariant::StrategyMix,
        _ => AllocationVariant::TopAssets,
    };
    inputs
}

fn print_results(r: &ResultSet) {
    println!("=== EFFICIENT FRONTIER ===");
    for p in &r.frontier {
        println!("  risk {:>6.2} | return {:>6.2}", p.risk, p.ret);
    }

    println!();
    println!("=== SHARPE COMPARISON ===");
    for s in &r.ratios {
        println!("  {:<10} {:.2}", s.name, s.value);
    }

    println!();
    println!("=== QAOA CANDIDATES ===");
    for c in &r.candidates {
        println!(
            "  {} | p {:.3} | ret {:.3} | risk {:.3} | {}",
            c.bits, c.probability, c.expected_return, c.risk, c.compliance.label()
        );
    }
    if let Some(best) = r.best_candidate() {
        println!("  best: {} (p {:.3})", best.bits, best.probability);
    }

    println!();
    println!("=== ALLOCATION ===");
    for w in &r.allocation {
        println!("  {:<22} {:>3.0}%", w.name, w.value);
    }

    println!();
    println!("=== EVOLUTION ===");
    for p in &r.evolution {
        println!("  {:<8} | Quantum {:>10.0} | Classical {:>10.0}", p.label, p.quantum, p.classical);
    }

    println!();
    println!("=== STRESS TEST (ruin line {:.0}) ===", r.stress.ruin_line);
    for b in &r.stress.bars {
        let flag = if b.value < r.stress.ruin_line { "  below ruin line" } else { "" };
        println!("  {:<22} {:>10.0}{flag}", b.name, b.value);
    }
}

/// Sentences for the takeaway list. Formatting lives here, not in the core.
fn narrative(i: &InsightSummary) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(adv) = i.advantage_pct() {
        let verb = if adv >= 0.0 { "outperformed" } else { "underperformed" };
        lines.push(format!("Over this backtest, Quantum {verb} Classical by {:.1}%.", adv.abs()));
    }
    if let Some(best) = &i.best_sharpe {
        lines.push(format!("The best Sharpe among models is {} at {:.2}.", best.name, best.value));
    }
    if let Some(c) = i.concentration_index {
        let reading = if i.is_concentrated { "fairly concentrated" } else { "well diversified" };
        lines.push(format!("Allocation concentration (HHI) is about {c:.1}, {reading}."));
    }
    if i.esg_violation_rate > 0.0 {
        lines.push(format!(
            "{:.1}% of top measured portfolios violate the ESG filter.",
            i.esg_violation_rate
        ));
    } else if i.all_esg_compliant {
        lines.push("All top measured portfolios satisfy the ESG constraint.".to_string());
    }
    if i.hybrid {
        lines.push("Hybrid mode is ON: subset by QAOA, weights by a classical solver.".to_string());
    }
    lines
}

fn str_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2).find(|w| w[0] == flag).map(|w| w[1].as_str())
}

fn opt_arg<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    str_arg(args, flag).and_then(|v| v.parse().ok())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    opt_arg(args, flag).unwrap_or(default)
}
