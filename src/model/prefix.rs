//! Deterministic, action-independent cashflow prefix arrays.

use super::plan::{HORIZON_DAYS, Plan};

/// `(deposits_by_day[1..=30], bills_by_day[1..=30], base[0..=30])`.
///
/// `base[t] = start + sum(deposits+adjustments up to t) - sum(bills up to t)`,
/// indices 1-based with a leading 0 sentinel at index 0 so `base[0] == start`.
pub struct PrefixArrays {
    pub deposits_by_day: [i64; HORIZON_DAYS + 1],
    pub bills_by_day: [i64; HORIZON_DAYS + 1],
    pub base: [i64; HORIZON_DAYS + 1],
}

pub fn prefix_arrays(plan: &Plan) -> PrefixArrays {
    let mut deposits_by_day = [0i64; HORIZON_DAYS + 1];
    let mut bills_by_day = [0i64; HORIZON_DAYS + 1];

    for d in &plan.deposits {
        deposits_by_day[d.day as usize] += d.amount_cents;
    }
    for adj in &plan.manual_adjustments {
        deposits_by_day[adj.day as usize] += adj.amount_cents;
    }
    for b in &plan.bills {
        bills_by_day[b.day as usize] += b.amount_cents;
    }

    let mut base = [0i64; HORIZON_DAYS + 1];
    base[0] = plan.start_balance_cents;
    let mut running = plan.start_balance_cents;
    for t in 1..=HORIZON_DAYS {
        running += deposits_by_day[t] - bills_by_day[t];
        base[t] = running;
    }

    PrefixArrays { deposits_by_day, bills_by_day, base }
}

/// Pre-rent balance on day 30, before that day's bills are paid:
/// `start + sum(deposits[1..=30]) - sum(bills[1..=29])`.
pub fn pre_rent_base_day30(plan: &Plan, prefix: &PrefixArrays) -> i64 {
    let deposits_total: i64 = prefix.deposits_by_day[1..=HORIZON_DAYS].iter().sum();
    let bills_through_29: i64 = prefix.bills_by_day[1..HORIZON_DAYS].iter().sum();
    plan.start_balance_cents + deposits_total - bills_through_29
}
