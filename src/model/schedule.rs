use serde::{Deserialize, Serialize};

use super::ledger::DayLedger;
use super::plan::HORIZON_DAYS;

/// A fully-concrete 30-day action vector plus its lexicographic objective
/// and the ledger it produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub actions: Vec<String>,
    /// `(workdays, adjacent_work_pairs, abs_distance_from_target)`.
    pub objective: (i64, i64, i64),
    pub final_closing_cents: i64,
    pub ledger: Vec<DayLedger>,
}

impl Schedule {
    pub fn workdays(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| !crate::model::actions::is_off(a))
            .count()
    }

    pub fn assert_horizon(&self) {
        debug_assert_eq!(self.actions.len(), HORIZON_DAYS);
        debug_assert_eq!(self.ledger.len(), HORIZON_DAYS);
    }
}

/// Which solver produced a [`Schedule`], and what happened along the way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub solver_name: SolverName,
    pub stage_statuses: Vec<String>,
    pub seconds: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverName {
    Primary,
    Fallback,
}
