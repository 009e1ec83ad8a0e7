//! Seeded simulation core for the quantum-inspired portfolio dashboard.
//!
//! Every generator is a pure function of its parameters and a seed.
//! Nothing here performs real optimisation; "Quantum" is a label on one
//! side of a seeded random walk.

pub mod allocation;
pub mod app_state;
pub mod config;
pub mod engine;
pub mod error;
pub mod evolution;
pub mod export;
pub mod frontier;
pub mod generator;
pub mod insights;
pub mod ratio;
pub mod rng;
pub mod selector;
pub mod snapshot;
pub mod store;
pub mod stress;
pub mod types;
