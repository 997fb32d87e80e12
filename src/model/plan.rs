use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::CashflowError;

pub const HORIZON_DAYS: usize = 30;

/// A deposit landing on a specific day. `amount_cents` is non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Deposit {
    pub day: u8,
    pub amount_cents: i64,
}

/// A bill due on a specific day. `amount_cents` is non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Bill {
    pub day: u8,
    pub name: String,
    pub amount_cents: i64,
}

/// A manual, signed correction applied like a deposit on `day`. Used by
/// [`crate::resume::resume`] to splice a corrective adjustment into a
/// re-solved tail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Adjustment {
    pub day: u8,
    pub amount_cents: i64,
    #[serde(default)]
    pub note: String,
}

/// An inclusive day range whose actions are locked; a superset of the
/// per-slot locks carried in [`Plan::actions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Lock {
    pub start_day: u8,
    pub end_day: u8,
}

/// Immutable input to a solve. All monetary fields are integer cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Plan {
    pub start_balance_cents: i64,
    pub target_end_cents: i64,
    pub band_cents: i64,
    pub rent_guard_cents: i64,
    #[serde(default)]
    pub deposits: Vec<Deposit>,
    #[serde(default)]
    pub bills: Vec<Bill>,
    #[serde(default)]
    pub manual_adjustments: Vec<Adjustment>,
    /// Length-30 slots; `Some(symbol)` locks that day to the named action.
    #[serde(default = "default_actions")]
    pub actions: Vec<Option<String>>,
    #[serde(default)]
    pub locks: Vec<Lock>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

fn default_actions() -> Vec<Option<String>> {
    vec![None; HORIZON_DAYS]
}

impl Plan {
    /// Structural validation: field lengths, ranges, and monetary bounds.
    /// Does not check feasibility — that is the solver's job.
    pub fn validate_shape(&self) -> Result<(), CashflowError> {
        use crate::money::MAX_AMOUNT_CENTS;

        if self.actions.len() != HORIZON_DAYS {
            return Err(CashflowError::InvalidPlan(format!(
                "actions must have exactly {HORIZON_DAYS} entries, got {}",
                self.actions.len()
            )));
        }
        if self.start_balance_cents < 0 {
            return Err(CashflowError::InvalidPlan(
                "start_balance_cents must be non-negative".into(),
            ));
        }
        if self.target_end_cents < 0 || self.band_cents < 0 || self.rent_guard_cents < 0 {
            return Err(CashflowError::InvalidPlan(
                "target_end_cents, band_cents, and rent_guard_cents must be non-negative".into(),
            ));
        }

        let check_amount = |label: &str, v: i64| -> Result<(), CashflowError> {
            if v.abs() > MAX_AMOUNT_CENTS {
                return Err(CashflowError::InvalidPlan(format!(
                    "{label} magnitude {v} exceeds MAX_AMOUNT_CENTS"
                )));
            }
            Ok(())
        };
        check_amount("start_balance_cents", self.start_balance_cents)?;
        check_amount("target_end_cents", self.target_end_cents)?;
        check_amount("band_cents", self.band_cents)?;
        check_amount("rent_guard_cents", self.rent_guard_cents)?;

        for d in &self.deposits {
            if !(1..=HORIZON_DAYS as u8).contains(&d.day) {
                return Err(CashflowError::InvalidPlan(format!(
                    "deposit day {} out of range 1..={HORIZON_DAYS}",
                    d.day
                )));
            }
            if d.amount_cents < 0 {
                return Err(CashflowError::InvalidPlan("deposit amount must be non-negative".into()));
            }
            check_amount("deposit amount_cents", d.amount_cents)?;
        }
        for b in &self.bills {
            if !(1..=HORIZON_DAYS as u8).contains(&b.day) {
                return Err(CashflowError::InvalidPlan(format!(
                    "bill day {} out of range 1..={HORIZON_DAYS}",
                    b.day
                )));
            }
            if b.amount_cents < 0 {
                return Err(CashflowError::InvalidPlan("bill amount must be non-negative".into()));
            }
            check_amount("bill amount_cents", b.amount_cents)?;
        }
        for a in &self.manual_adjustments {
            if !(1..=HORIZON_DAYS as u8).contains(&a.day) {
                return Err(CashflowError::InvalidPlan(format!(
                    "adjustment day {} out of range 1..={HORIZON_DAYS}",
                    a.day
                )));
            }
            check_amount("adjustment amount_cents", a.amount_cents)?;
        }
        for lock in &self.locks {
            if lock.start_day < 1 || lock.end_day > HORIZON_DAYS as u8 || lock.start_day > lock.end_day
            {
                return Err(CashflowError::InvalidPlan(format!(
                    "lock range {}..={} is invalid",
                    lock.start_day, lock.end_day
                )));
            }
            // `locks` is a superset annotation over the per-slot locks in
            // `actions`: every day in a declared range must itself carry a
            // per-slot lock, or the plan is contradictory.
            for day in lock.start_day..=lock.end_day {
                if self.locked_action(day).is_none() {
                    return Err(CashflowError::InvalidPlan(format!(
                        "lock range {}..={} covers day {day} which has no per-slot locked action",
                        lock.start_day, lock.end_day
                    )));
                }
            }
        }
        for slot in &self.actions {
            if let Some(sym) = slot
                && crate::model::actions::index_of(sym).is_none()
            {
                return Err(CashflowError::InvalidPlan(format!(
                    "locked action `{sym}` is not in the action alphabet"
                )));
            }
        }

        Ok(())
    }

    /// The locked action for 1-indexed `day`, if any, honoring both the
    /// per-slot lock and any `locks` range that happens to name it — but a
    /// range lock alone carries no action symbol, so only per-slot locks
    /// constrain the solver directly.
    pub fn locked_action(&self, day: u8) -> Option<&str> {
        self.actions
            .get((day - 1) as usize)
            .and_then(|o| o.as_deref())
    }
}
