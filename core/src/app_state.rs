//! Application state — the dashboard's controls as an explicit value.
//!
//! RULE: Generators never read this. The caller turns it into
//! DashboardInputs and hands those to the engine.
//!
//! Lifecycle: load once at startup (SimStore::load_app_state), mutate
//! through the setters below, save after every change
//! (SimStore::save_app_state). Only the PersistedState subset survives a
//! restart; notifications and the about dialog do not.

use crate::{
    engine::DashboardInputs,
    types::{clamp_pct, Dataset, RebalanceFreq, RiskLevel},
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_INITIAL_EQUITY: f64 = 108_000.0;
pub const DEFAULT_TIME_HORIZON: u32 = 15;
pub const MAX_TIME_HORIZON: u32 = 365;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    Compare,
    Evolution,
    Insights,
    Stress,
    Explain,
}

impl Tab {
    pub fn parse(id: &str) -> Option<Self> {
        match id.trim().to_ascii_lowercase().as_str() {
            "compare"   => Some(Self::Compare),
            "evolution" => Some(Self::Evolution),
            "insights"  => Some(Self::Insights),
            "stress"    => Some(Self::Stress),
            "explain"   => Some(Self::Explain),
            _           => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashOption {
    SharpeRatio,
    StressTesting,
    ClassicalComparison,
}

// ── Notifications ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub id:   u64,
    pub kind: ToastKind,
    pub msg:  String,
}

/// Toast queue. Ids come from a counter owned by the queue: they start at 1,
/// only ever increase, and are never reused after removal. A fresh queue
/// (process restart) starts the counter over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notifications {
    next_id: u64,
    toasts:  Vec<Toast>,
}

impl Default for Notifications {
    fn default() -> Self {
        Self { next_id: 1, toasts: Vec::new() }
    }
}

impl Notifications {
    pub fn push(&mut self, kind: ToastKind, msg: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast { id, kind, msg: msg.into() });
        id
    }

    /// Remove a toast by id. Returns false if no such toast is showing.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    pub fn active(&self) -> &[Toast] {
        &self.toasts
    }
}

// ── Persisted subset ───────────────────────────────────────────────

fn default_dataset() -> Dataset { Dataset::Nifty50 }
fn default_risk() -> RiskLevel { RiskLevel::Medium }
fn default_equity() -> f64 { DEFAULT_INITIAL_EQUITY }
fn default_horizon() -> u32 { DEFAULT_TIME_HORIZON }
fn default_freq() -> RebalanceFreq { RebalanceFreq::Monthly }

/// The fields saved across sessions. Every field falls back to its own
/// default, so a record written by an older build still loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default = "default_dataset")]
    pub dataset:        Dataset,
    #[serde(default = "default_risk")]
    pub risk_level:     RiskLevel,
    #[serde(default)]
    pub options:        Vec<DashOption>,
    #[serde(default = "default_equity")]
    pub initial_equity: f64,
    #[serde(default = "default_horizon")]
    pub time_horizon:   u32,
    #[serde(default)]
    pub threshold:      f64,
    #[serde(default)]
    pub active_tab:     Option<Tab>,
    #[serde(default)]
    pub hybrid:         bool,
    #[serde(default = "default_freq")]
    pub freq:           RebalanceFreq,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            dataset:        default_dataset(),
            risk_level:     default_risk(),
            options:        Vec::new(),
            initial_equity: default_equity(),
            time_horizon:   default_horizon(),
            threshold:      0.0,
            active_tab:     None,
            hybrid:         false,
            freq:           default_freq(),
        }
    }
}

impl PersistedState {
    /// Parse a stored record. Malformed JSON yields defaults.
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str::<PersistedState>(raw) {
            Ok(state) => state.sanitized(),
            Err(e) => {
                log::warn!("discarding unreadable saved state: {e}");
                Self::default()
            }
        }
    }

    /// Re-apply the setter coercions to values read from storage.
    fn sanitized(mut self) -> Self {
        self.initial_equity = coerce_equity(self.initial_equity);
        self.time_horizon = self.time_horizon.clamp(1, MAX_TIME_HORIZON);
        self.threshold = clamp_pct(self.threshold);
        self.options = unique_options(self.options);
        self
    }
}

fn unique_options(options: Vec<DashOption>) -> Vec<DashOption> {
    let mut unique = Vec::with_capacity(options.len());
    for opt in options {
        if !unique.contains(&opt) {
            unique.push(opt);
        }
    }
    unique
}

fn coerce_equity(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

// ── AppState ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub saved:         PersistedState,
    pub about_open:    bool,
    pub notifications: Notifications,
}

impl AppState {
    pub fn from_persisted(saved: PersistedState) -> Self {
        Self { saved, ..Self::default() }
    }

    pub fn persisted(&self) -> &PersistedState {
        &self.saved
    }

    /// Selecting the open tab again returns to Home (None).
    pub fn set_active_tab(&mut self, tab: Tab) {
        self.saved.active_tab = if self.saved.active_tab == Some(tab) { None } else { Some(tab) };
    }

    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.saved.dataset = dataset;
    }

    pub fn set_risk_level(&mut self, risk: RiskLevel) {
        self.saved.risk_level = risk;
    }

    pub fn set_options(&mut self, options: Vec<DashOption>) {
        self.saved.options = unique_options(options);
    }

    pub fn toggle_option(&mut self, option: DashOption) {
        if let Some(pos) = self.saved.options.iter().position(|o| *o == option) {
            self.saved.options.remove(pos);
        } else {
            self.saved.options.push(option);
        }
    }

    /// Negative or non-finite equity becomes 0.
    pub fn set_initial_equity(&mut self, value: f64) {
        self.saved.initial_equity = coerce_equity(value);
    }

    /// Clamped to 1..=365.
    pub fn set_time_horizon(&mut self, days: i64) {
        self.saved.time_horizon = days.clamp(1, MAX_TIME_HORIZON as i64) as u32;
    }

    /// Clamped to 0..=100.
    pub fn set_threshold(&mut self, pct: f64) {
        self.saved.threshold = clamp_pct(pct);
    }

    pub fn set_hybrid(&mut self, hybrid: bool) {
        self.saved.hybrid = hybrid;
    }

    pub fn set_freq(&mut self, freq: RebalanceFreq) {
        self.saved.freq = freq;
    }

    pub fn open_about(&mut self) {
        self.about_open = true;
    }

    pub fn close_about(&mut self) {
        self.about_open = false;
    }

    pub fn add_toast(&mut self, kind: ToastKind, msg: impl Into<String>) -> u64 {
        self.notifications.push(kind, msg)
    }

    pub fn remove_toast(&mut self, id: u64) -> bool {
        self.notifications.remove(id)
    }

    /// Engine inputs for the current controls. Fields the state does not
    /// track (constraints, shocks, variant, policy) take their defaults.
    pub fn to_inputs(&self) -> DashboardInputs {
        let s = &self.saved;
        DashboardInputs {
            dataset:        s.dataset,
            risk_level:     s.risk_level,
            threshold:      s.threshold,
            hybrid:         s.hybrid,
            freq:           s.freq,
            initial_equity: s.initial_equity,
            time_horizon:   s.time_horizon,
            ..DashboardInputs::default()
        }
    }
}
