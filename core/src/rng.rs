//! Deterministic random number generation.
//!
//! RULE: No generator may call a platform RNG.
//! All randomness flows through SimRng instances derived from the
//! caller's base seed.
//!
//! Each generator gets its own stream, seeded from
//! (base_seed + param_offset) XOR (slot_index * golden ratio). This means:
//!   - Changing one generator's inputs never shifts another's stream.
//!   - Each generator's output is fully reproducible in isolation.

use crate::types::Seed;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

const SLOT_MIX: u64 = 0x9e37_79b9_7f4a_7c15;

/// A named, deterministic RNG for a single generator call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl SimRng {
    /// Build a stream from a seed and a stable slot index.
    /// The index must never change once assigned.
    pub fn new(seed: Seed, slot_index: u64) -> Self {
        // Full 32-bit seed space: reinterpret, don't sign-extend.
        let base = seed.0 as u32 as u64;
        let derived_seed = base ^ slot_index.wrapping_mul(SLOT_MIX);
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a float in [lo, hi).
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Symmetric noise in [-0.5, 0.5).
    pub fn centered(&mut self) -> f64 {
        self.next_f64() - 0.5
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// State-passing form of [`SimRng::next_f64`]: the prior state goes in,
/// the draw and the successor state come out.
pub fn next_uniform(mut state: SimRng) -> (f64, SimRng) {
    let value = state.next_f64();
    (value, state)
}

/// Hands out per-generator streams for one base seed.
#[derive(Debug, Clone, Copy)]
pub struct RngBank {
    seed: Seed,
}

impl RngBank {
    pub fn new(seed: Seed) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> Seed {
        self.seed
    }

    /// Stream for `slot`, shifted by an offset derived from the generator's inputs.
    pub fn for_slot(&self, slot: GeneratorSlot, param_offset: i32) -> SimRng {
        SimRng::new(self.seed.offset(param_offset), slot as u64).with_name(slot.name())
    }
}

/// Stable generator slot assignments.
/// NEVER reorder or remove entries — only append.
/// Reordering changes every generator's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum GeneratorSlot {
    Frontier   = 0,
    Ratio      = 1,
    Selector   = 2,
    Allocation = 3,
    Evolution  = 4,
    Stress     = 5,
}

impl GeneratorSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Frontier   => "frontier",
            Self::Ratio      => "ratio",
            Self::Selector   => "selector",
            Self::Allocation => "allocation",
            Self::Evolution  => "evolution",
            Self::Stress     => "stress",
        }
    }
}
