//! Result set — every generator output for one set of inputs.
//!
//! This is what gets persisted by the store and dumped by the JSON export.
//! It is a plain bundle of the data records; it carries no behaviour.

use crate::{
    engine::DashboardInputs,
    evolution::EquityPoint,
    frontier::FrontierPoint,
    insights::InsightSummary,
    selector::Candidate,
    stress::StressResult,
    types::{NamedScore, RunId, Seed},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    pub seed:       Seed,
    pub inputs:     DashboardInputs,
    pub frontier:   Vec<FrontierPoint>,
    pub ratios:     Vec<NamedScore>,
    pub candidates: Vec<Candidate>,
    pub allocation: Vec<NamedScore>,
    pub evolution:  Vec<EquityPoint>,
    pub stress:     StressResult,
    pub insights:   InsightSummary,
}

impl ResultSet {
    /// First candidate is the best one; output order is by probability.
    pub fn best_candidate(&self) -> Option<&Candidate> {
        self.candidates.first()
    }
}

/// A persisted result set with its run id and creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredResultSet {
    pub run_id:     RunId,
    pub created_at: String,
    pub results:    ResultSet,
}
