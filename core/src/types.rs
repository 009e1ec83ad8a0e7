//! Shared primitive types used across every generator.

use serde::{Deserialize, Serialize};

/// Base seed for a dashboard session. Generators derive their own
/// stream from this plus a small offset taken from their inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seed(pub i32);

impl Seed {
    /// Shift the seed by a parameter-derived offset. Wraps on overflow.
    pub fn offset(self, delta: i32) -> Seed {
        Seed(self.0.wrapping_add(delta))
    }
}

impl Default for Seed {
    fn default() -> Self {
        Seed(42)
    }
}

/// The canonical identifier of one engine run / export.
pub type RunId = String;

/// A (name, value) pair. Ratio scores, allocation weights and stress
/// bars all share this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedScore {
    pub name:  String,
    pub value: f64,
}

impl NamedScore {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self { name: name.into(), value }
    }
}

// ── Dataset ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    Nifty50,
    Nasdaq,
    Crypto,
    Default,
}

impl Dataset {
    /// Parse a dataset identifier. Anything unknown maps to `Default`.
    pub fn parse(id: &str) -> Self {
        match id.trim().to_ascii_lowercase().as_str() {
            "nifty50" | "nifty" => Self::Nifty50,
            "nasdaq"            => Self::Nasdaq,
            "crypto"            => Self::Crypto,
            _                   => Self::Default,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::Nifty50 => "nifty50",
            Self::Nasdaq  => "nasdaq",
            Self::Crypto  => "crypto",
            Self::Default => "default",
        }
    }

    /// Named asset universe, most heavily weighted first.
    pub fn universe(&self) -> &'static [&'static str] {
        match self {
            Self::Nifty50 => &[
                "Reliance", "HDFC Bank", "Infosys", "TCS", "ICICI Bank", "HUL", "Bharti Airtel",
            ],
            Self::Nasdaq => &[
                "Apple", "Microsoft", "Amazon", "Google", "Tesla", "Nvidia", "Meta",
            ],
            Self::Crypto => &[
                "Bitcoin", "Ethereum", "Solana", "Cardano", "Polkadot", "BNB", "XRP",
            ],
            Self::Default => &["Alpha", "Beta", "Gamma", "Delta", "Epsilon", "Zeta"],
        }
    }

    /// The first `n` names of the universe (fewer if the universe is smaller).
    pub fn top_assets(&self, n: usize) -> &'static [&'static str] {
        let universe = self.universe();
        &universe[..n.min(universe.len())]
    }

    /// Stable small integer used in seed offsets.
    pub fn index(&self) -> i32 {
        match self {
            Self::Nifty50 => 0,
            Self::Nasdaq  => 1,
            Self::Crypto  => 2,
            Self::Default => 3,
        }
    }
}

// ── Risk level ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn parse(id: &str) -> Option<Self> {
        match id.trim().to_ascii_lowercase().as_str() {
            "low"    => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high"   => Some(Self::High),
            _        => None,
        }
    }

    /// Accept either a level name or a number on the legacy 0–10 scale.
    pub fn from_input(input: &str) -> Option<Self> {
        Self::parse(input).or_else(|| input.trim().parse::<f64>().ok().map(Self::from_scale))
    }

    /// Map the legacy 0–10 slider onto the three levels.
    /// Non-finite input falls back to `Medium`.
    pub fn from_scale(scale: f64) -> Self {
        if !scale.is_finite() {
            log::warn!("non-finite risk scale {scale}, using medium");
            return Self::Medium;
        }
        let s = scale.clamp(0.0, 10.0);
        if s < 10.0 / 3.0 {
            Self::Low
        } else if s < 20.0 / 3.0 {
            Self::Medium
        } else {
            Self::High
        }
    }

    /// Frontier scale factor. Strictly increasing with risk.
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Low    => 1.0,
            Self::Medium => 2.0,
            Self::High   => 4.0,
        }
    }

    pub fn index(&self) -> i32 {
        match self {
            Self::Low    => 0,
            Self::Medium => 1,
            Self::High   => 2,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::Low    => "low",
            Self::Medium => "medium",
            Self::High   => "high",
        }
    }
}

// ── Rebalancing ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RebalanceFreq {
    Monthly,
    Quarterly,
}

impl RebalanceFreq {
    pub fn parse(id: &str) -> Option<Self> {
        match id.trim().to_ascii_lowercase().as_str() {
            "monthly"   => Some(Self::Monthly),
            "quarterly" => Some(Self::Quarterly),
            _           => None,
        }
    }
}

// ── Constraints ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorCap {
    pub sector:  String,
    /// Maximum sector weight in percent (0–100).
    pub cap_pct: f64,
}

/// The constraint panel, summarised.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstraintSummary {
    #[serde(default)]
    pub sector_caps: Vec<SectorCap>,
    #[serde(default)]
    pub esg_exclude: bool,
}

impl ConstraintSummary {
    /// Sum of all sector caps in percent. Each cap is clamped to [0, 100]
    /// first; non-finite caps count as 0.
    pub fn total_cap_pct(&self) -> f64 {
        self.sector_caps.iter().map(|c| clamp_pct(c.cap_pct)).sum()
    }
}

// ── Sectors ────────────────────────────────────────────────────────

/// Coarse sector used by the stress heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    Energy,
    Tech,
    Finance,
    Auto,
    Health,
    Other,
}

// ── Compliance ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceTag {
    Ok,
    SectorCapExceeded,
    EsgExcluded,
}

impl ComplianceTag {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ok                => "OK",
            Self::SectorCapExceeded => "Sector cap exceeded",
            Self::EsgExcluded       => "ESG excluded",
        }
    }

    pub fn is_esg_violation(&self) -> bool {
        matches!(self, Self::EsgExcluded)
    }
}

/// Clamp a percentage-like input to [0, 100]. Non-finite becomes 0.
pub fn clamp_pct(value: f64) -> f64 {
    if value.is_finite() { value.clamp(0.0, 100.0) } else { 0.0 }
}
