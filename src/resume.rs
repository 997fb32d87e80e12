//! Locks a prefix, injects a correcting adjustment, and re-solves the tail
//! Mirrors the `set_eod` handler in the reference implementation:
//! solve a baseline, lock days `1..=day_d` to the baseline's own actions,
//! append a corrective `Adjustment` on day `day_d`, and re-solve end to end.

use crate::engine::dispatcher::{self, Mode};
use crate::error::CashflowError;
use crate::model::plan::{Adjustment, HORIZON_DAYS, Plan};
use crate::model::schedule::Schedule;

/// Re-solve `plan` so that day `day_d`'s closing balance becomes exactly
/// `desired_closing_cents`, holding days `1..=day_d` fixed to the baseline
/// solve and re-optimizing `day_d+1..=30` under the original rules.
pub fn resume(plan: &Plan, day_d: u8, desired_closing_cents: i64) -> Result<Schedule, CashflowError> {
    if !(1..=HORIZON_DAYS as u8).contains(&day_d) {
        return Err(CashflowError::InvalidPlan(format!(
            "day_d must be in 1..={HORIZON_DAYS}, got {day_d}"
        )));
    }

    let (baseline, _) = dispatcher::solve(plan, Mode::Auto)?;
    let baseline_closing = baseline.ledger[(day_d - 1) as usize].closing_cents;

    let mut plan2 = plan.clone();
    for day in 1..=day_d {
        plan2.actions[(day - 1) as usize] = Some(baseline.actions[(day - 1) as usize].clone());
    }
    for day in (day_d + 1)..=(HORIZON_DAYS as u8) {
        plan2.actions[(day - 1) as usize] = None;
    }
    plan2.locks.retain(|l| l.end_day <= day_d);

    plan2.manual_adjustments.push(Adjustment {
        day: day_d,
        amount_cents: desired_closing_cents - baseline_closing,
        note: "resume".to_string(),
    });

    let (resumed, _) = dispatcher::solve(&plan2, Mode::Auto)?;

    debug_assert_eq!(resumed.ledger[(day_d - 1) as usize].closing_cents, desired_closing_cents);
    Ok(resumed)
}
