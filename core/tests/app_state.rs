//! Application state tests: setters, coercions and notifications.

use qfolio_core::{
    app_state::{AppState, DashOption, PersistedState, Tab, ToastKind},
    types::{Dataset, RebalanceFreq, RiskLevel},
};

#[test]
fn defaults_match_first_launch() {
    let state = AppState::default();
    let saved = state.persisted();
    assert_eq!(saved.dataset, Dataset::Nifty50);
    assert_eq!(saved.risk_level, RiskLevel::Medium);
    assert_eq!(saved.initial_equity, 108_000.0);
    assert_eq!(saved.time_horizon, 15);
    assert_eq!(saved.threshold, 0.0);
    assert_eq!(saved.active_tab, None);
    assert!(!saved.hybrid);
    assert_eq!(saved.freq, RebalanceFreq::Monthly);
    assert!(!state.about_open);
    assert!(state.notifications.active().is_empty());
}

#[test]
fn selecting_the_open_tab_returns_home() {
    let mut state = AppState::default();
    state.set_active_tab(Tab::Stress);
    assert_eq!(state.saved.active_tab, Some(Tab::Stress));
    state.set_active_tab(Tab::Insights);
    assert_eq!(state.saved.active_tab, Some(Tab::Insights));
    state.set_active_tab(Tab::Insights);
    assert_eq!(state.saved.active_tab, None);
}

#[test]
fn numeric_setters_coerce() {
    let mut state = AppState::default();

    state.set_time_horizon(0);
    assert_eq!(state.saved.time_horizon, 1);
    state.set_time_horizon(10_000);
    assert_eq!(state.saved.time_horizon, 365);
    state.set_time_horizon(-3);
    assert_eq!(state.saved.time_horizon, 1);

    state.set_initial_equity(-500.0);
    assert_eq!(state.saved.initial_equity, 0.0);
    state.set_initial_equity(f64::NAN);
    assert_eq!(state.saved.initial_equity, 0.0);
    state.set_initial_equity(250_000.0);
    assert_eq!(state.saved.initial_equity, 250_000.0);

    state.set_threshold(140.0);
    assert_eq!(state.saved.threshold, 100.0);
    state.set_threshold(-1.0);
    assert_eq!(state.saved.threshold, 0.0);
}

#[test]
fn options_stay_unique() {
    let mut state = AppState::default();
    state.set_options(vec![
        DashOption::SharpeRatio,
        DashOption::StressTesting,
        DashOption::SharpeRatio,
    ]);
    assert_eq!(state.saved.options, vec![DashOption::SharpeRatio, DashOption::StressTesting]);

    state.toggle_option(DashOption::SharpeRatio);
    assert_eq!(state.saved.options, vec![DashOption::StressTesting]);
    state.toggle_option(DashOption::ClassicalComparison);
    assert_eq!(state.saved.options, vec![DashOption::StressTesting, DashOption::ClassicalComparison]);
}

#[test]
fn toast_ids_increase_and_are_not_reused() {
    let mut state = AppState::default();
    let a = state.add_toast(ToastKind::Info, "first");
    let b = state.add_toast(ToastKind::Success, "second");
    assert_eq!((a, b), (1, 2));

    assert!(state.remove_toast(b));
    assert!(!state.remove_toast(b), "second removal finds nothing");
    let c = state.add_toast(ToastKind::Error, "third");
    assert_eq!(c, 3, "removed id must not be handed out again");

    let ids: Vec<u64> = state.notifications.active().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn about_dialog_opens_and_closes() {
    let mut state = AppState::default();
    state.open_about();
    assert!(state.about_open);
    state.close_about();
    assert!(!state.about_open);
}

#[test]
fn malformed_record_yields_defaults() {
    assert_eq!(PersistedState::from_json("{not json"), PersistedState::default());
    assert_eq!(PersistedState::from_json(""), PersistedState::default());
}

#[test]
fn partial_record_fills_in_defaults() {
    let saved = PersistedState::from_json(r#"{ "dataset": "crypto", "time_horizon": 900 }"#);
    assert_eq!(saved.dataset, Dataset::Crypto);
    assert_eq!(saved.time_horizon, 365, "stored values are clamped on load");
    assert_eq!(saved.risk_level, RiskLevel::Medium);
    assert_eq!(saved.initial_equity, 108_000.0);
}

#[test]
fn inputs_follow_the_controls() {
    let mut state = AppState::default();
    state.set_dataset(Dataset::Nasdaq);
    state.set_risk_level(RiskLevel::High);
    state.set_hybrid(true);
    state.set_freq(RebalanceFreq::Quarterly);
    state.set_time_horizon(90);

    let inputs = state.to_inputs();
    assert_eq!(inputs.dataset, Dataset::Nasdaq);
    assert_eq!(inputs.risk_level, RiskLevel::High);
    assert!(inputs.hybrid);
    assert_eq!(inputs.freq, RebalanceFreq::Quarterly);
    assert_eq!(inputs.time_horizon, 90);
    assert_eq!(inputs.initial_equity, 108_000.0);
}
