//! Independent re-check of all feasibility rules on a schedule.
//! Never consults solver internals — only the plan and the schedule's ledger.

use serde::{Deserialize, Serialize};

use crate::model::actions;
use crate::model::plan::{HORIZON_DAYS, Plan};
use crate::model::prefix;
use crate::model::schedule::Schedule;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Check {
    pub name: String,
    pub pass: bool,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub ok: bool,
    pub checks: Vec<Check>,
}

fn has_off_off(window: &[bool]) -> bool {
    window.windows(2).any(|w| w[0] && w[1])
}

/// Run all seven checks and return the conjunction plus the
/// per-check detail, in check order, for deterministic reporting.
pub fn validate(plan: &Plan, schedule: &Schedule) -> Report {
    let mut checks = Vec::with_capacity(7);

    // 1. Action alphabet membership.
    let mut unknown: Vec<&str> = schedule
        .actions
        .iter()
        .filter(|a| actions::index_of(a).is_none())
        .map(|s| s.as_str())
        .collect();
    unknown.sort_unstable();
    unknown.dedup();
    checks.push(Check {
        name: "Actions valid".into(),
        pass: unknown.is_empty(),
        detail: format!("unknown symbols: {:?}", unknown),
    });

    // 2. Non-negative closing on every day.
    let first_negative = schedule.ledger.iter().find(|d| d.closing_cents < 0);
    checks.push(Check {
        name: "Non-negative balances".into(),
        pass: first_negative.is_none(),
        detail: match first_negative {
            Some(d) => format!("day {} closing {} < 0", d.day, d.closing_cents),
            None => "closing >= 0 for all days".into(),
        },
    });

    // 3. Final closing within band.
    let lo = plan.target_end_cents - plan.band_cents;
    let hi = plan.target_end_cents + plan.band_cents;
    let final_closing = schedule.final_closing_cents;
    checks.push(Check {
        name: "Final within band".into(),
        pass: (lo..=hi).contains(&final_closing),
        detail: format!("{final_closing} in [{lo},{hi}]"),
    });

    // 4. Day-30 pre-rent guard.
    let prefix_arr = prefix::prefix_arrays(plan);
    let pre30 = prefix::pre_rent_base_day30(plan, &prefix_arr);
    let net_total: i64 = schedule
        .actions
        .iter()
        .map(|a| actions::net_cents_of(a).unwrap_or(0))
        .sum();
    let pre_rent_balance = pre30 + net_total;
    checks.push(Check {
        name: "Day-30 pre-rent guard".into(),
        pass: pre_rent_balance >= plan.rent_guard_cents,
        detail: format!("{pre_rent_balance} >= {}", plan.rent_guard_cents),
    });

    // 5. Off-off adjacency in every rolling 7-day window (s = 0..24).
    let off: Vec<bool> = schedule.actions.iter().map(|a| actions::is_off(a)).collect();
    let mut first_bad_window = None;
    for s in 0..(HORIZON_DAYS - 6) {
        if !has_off_off(&off[s..s + 7]) {
            first_bad_window = Some(s);
            break;
        }
    }
    checks.push(Check {
        name: "7-day Off,Off present".into(),
        pass: first_bad_window.is_none(),
        detail: match first_bad_window {
            Some(s) => format!("window starting at day {} has no off-off pair", s + 1),
            None => "every rolling 7-day window has an off-off pair".into(),
        },
    });

    // 6. Day-1 working-action rule, unless overridden by a lock.
    let day1_locked = plan.locked_action(1);
    let day1_ok = match day1_locked {
        Some(sym) => schedule.actions.first().map(|a| a.as_str()) == Some(sym),
        None => schedule
            .actions
            .first()
            .is_some_and(|a| !actions::is_off(a)),
    };
    checks.push(Check {
        name: "Day-1 working action".into(),
        pass: day1_ok,
        detail: format!("day 1 action = {:?}, lock = {:?}", schedule.actions.first(), day1_locked),
    });

    // 7. Every lock honored.
    let mut lock_violations = Vec::new();
    for day in 1..=(HORIZON_DAYS as u8) {
        if let Some(locked) = plan.locked_action(day) {
            let actual = schedule.actions.get((day - 1) as usize).map(|s| s.as_str());
            if actual != Some(locked) {
                lock_violations.push(format!("day {day}: expected {locked}, got {actual:?}"));
            }
        }
    }
    checks.push(Check {
        name: "Locks honored".into(),
        pass: lock_violations.is_empty(),
        detail: if lock_violations.is_empty() {
            "all locks honored".into()
        } else {
            lock_violations.join("; ")
        },
    });

    let ok = checks.iter().all(|c| c.pass);
    Report { ok, checks }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger_builder::build_ledger;
    use crate::model::plan::Plan;

    fn plan_with(band: i64, rent_guard: i64) -> Plan {
        Plan {
            start_balance_cents: 0,
            target_end_cents: 0,
            band_cents: band,
            rent_guard_cents: rent_guard,
            deposits: vec![],
            bills: vec![],
            manual_adjustments: vec![],
            actions: vec![None; HORIZON_DAYS],
            locks: vec![],
            metadata: Default::default(),
        }
    }

    #[test]
    fn all_off_fails_day1_and_off_off_rules_pass_but_band_may_fail() {
        let plan = plan_with(0, 0);
        let actions_vec: Vec<String> = vec!["Off".to_string(); HORIZON_DAYS];
        let ledger = build_ledger(&plan, &actions_vec);
        let schedule = Schedule {
            actions: actions_vec,
            objective: (0, 0, 0),
            final_closing_cents: ledger.last().unwrap().closing_cents,
            ledger,
        };
        let report = validate(&plan, &schedule);
        let day1 = report.checks.iter().find(|c| c.name == "Day-1 working action").unwrap();
        assert!(!day1.pass);
    }

    #[test]
    fn alternating_off_work_satisfies_off_off_rule_when_locked_pair_present() {
        // Off,Work repeating never has two off days adjacent -> must fail rule 5.
        let plan = plan_with(1_000_000, 0);
        let mut actions_vec = Vec::with_capacity(HORIZON_DAYS);
        for i in 0..HORIZON_DAYS {
            actions_vec.push(if i % 2 == 0 { "Work".to_string() } else { "Off".to_string() });
        }
        let ledger = build_ledger(&plan, &actions_vec);
        let schedule = Schedule {
            actions: actions_vec,
            objective: (0, 0, 0),
            final_closing_cents: ledger.last().unwrap().closing_cents,
            ledger,
        };
        let report = validate(&plan, &schedule);
        let rule5 = report.checks.iter().find(|c| c.name == "7-day Off,Off present").unwrap();
        assert!(!rule5.pass);
    }
}
