//! Pure day-by-day balance projection. Never fails — callers that
//! need feasibility checking reach for [`crate::validate::validate`].

use crate::model::actions;
use crate::model::ledger::DayLedger;
use crate::model::plan::{HORIZON_DAYS, Plan};
use crate::model::prefix::{self, PrefixArrays};

/// Build the 30-day ledger for a concrete action vector. `O(30)`.
pub fn build_ledger(plan: &Plan, actions_vec: &[String]) -> Vec<DayLedger> {
    assert_eq!(actions_vec.len(), HORIZON_DAYS, "actions must have exactly 30 entries");

    let PrefixArrays { deposits_by_day, bills_by_day, base } = prefix::prefix_arrays(plan);

    let mut ledger = Vec::with_capacity(HORIZON_DAYS);
    let mut net_so_far: i64 = 0;

    for t in 1..=HORIZON_DAYS {
        let opening = base[t - 1] + net_so_far;
        let symbol = &actions_vec[t - 1];
        let net_today = actions::net_cents_of(symbol).unwrap_or(0);
        let closing = base[t] + net_so_far + net_today;

        ledger.push(DayLedger {
            day: t as u8,
            opening_cents: opening,
            deposit_cents: deposits_by_day[t],
            action: symbol.clone(),
            net_cents: net_today,
            bills_cents: bills_by_day[t],
            closing_cents: closing,
        });

        net_so_far += net_today;
    }

    ledger
}
