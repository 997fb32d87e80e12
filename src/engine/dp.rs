//! Primary optimizer: constrained DP with state compression and
//! reconstruction.
//!
//! State at the end of day `t`: `(off_history[t-5..t], prev_worked, workdays_used,
//! prefix_net)`. `off_history` packs into 6 bits (oldest -> newest); the
//! off-off window rule only ever needs to look at the most recent 6 days plus
//! today, so 6 bits is exactly enough memory to check it incrementally
//! instead of via a retrospective scan.

use std::collections::HashMap;

use crate::error::CashflowError;
use crate::ledger_builder::build_ledger;
use crate::model::actions::{self, ACTIONS};
use crate::model::plan::{HORIZON_DAYS, Plan};
use crate::model::prefix::{self, PrefixArrays};
use crate::model::schedule::Schedule;

/// Scenario-exploration knob: when set, only `Off` is permitted on unlocked
/// days after day 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct DpOptions {
    pub forbid_work_after_day1: bool,
}

/// `(off_history: 6 bits, prev_worked: 1 bit, workdays_used, net_cents)`.
/// Packed so the layer map can use a primitive key type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct StateKey {
    off_history: u8, // low 6 bits used, oldest->newest
    prev_worked: bool,
    workdays_used: u8,
    net_cents: i64,
}

#[derive(Debug, Clone)]
struct StateVal {
    adj_work_pairs: i64,
    back: Option<(StateKey, usize)>, // (predecessor key, chosen action index)
}

/// Solve `plan` via layered dynamic programming. Returns the lexicographically
/// optimal schedule or [`CashflowError::Infeasible`] naming the last
/// constraint that pruned every surviving branch.
pub fn solve(plan: &Plan, opts: DpOptions) -> Result<Schedule, CashflowError> {
    plan.validate_shape()?;

    let prefix_arr = prefix::prefix_arrays(plan);
    let base = &prefix_arr.base;
    let base_end = base[HORIZON_DAYS];
    let min_net = (plan.target_end_cents - plan.band_cents) - base_end;
    let max_net = (plan.target_end_cents + plan.band_cents) - base_end;
    let max_day_net = actions::max_net_cents();
    let pre30 = prefix::pre_rent_base_day30(plan, &prefix_arr);

    let mut constraint_tally = ConstraintTally::default();

    let mut layers: Vec<HashMap<StateKey, StateVal>> = Vec::with_capacity(HORIZON_DAYS + 1);
    let mut layer0 = HashMap::new();
    layer0.insert(
        StateKey { off_history: 0, prev_worked: false, workdays_used: 0, net_cents: 0 },
        StateVal { adj_work_pairs: 0, back: None },
    );
    layers.push(layer0);

    for day in 1..=HORIZON_DAYS {
        let mut cur: HashMap<StateKey, StateVal> = HashMap::new();
        let locked = plan.locked_action(day as u8);
        let allowed = allowed_action_indices(day, locked, opts.forbid_work_after_day1)?;

        for (key, val) in layers.last().unwrap() {
            for &a_idx in &allowed {
                let spec = ACTIONS[a_idx];
                let net_new = key.net_cents + spec.net_cents;
                let days_left = (HORIZON_DAYS - day) as i64;

                if net_new > max_net {
                    constraint_tally.band += 1;
                    continue;
                }
                if net_new + max_day_net * days_left < min_net {
                    constraint_tally.band += 1;
                    continue;
                }

                // Off-off window check against today + the last 6 days.
                let today_off = spec.is_off;
                let window7 = append_window(key.off_history, day, today_off);
                if day >= 7 && !window7.has_off_off() {
                    constraint_tally.off_off += 1;
                    continue;
                }
                let off_history_new = pack_last6(&window7);

                let closing_t = base[day] + net_new;
                if closing_t < 0 {
                    constraint_tally.non_negative += 1;
                    continue;
                }

                if day == HORIZON_DAYS && pre30 + net_new < plan.rent_guard_cents {
                    constraint_tally.rent_guard += 1;
                    continue;
                }

                let will_work = !spec.is_off;
                let adj_pairs_new = val.adj_work_pairs + i64::from(key.prev_worked && will_work);
                let workdays_used_new = key.workdays_used + u8::from(will_work);

                let new_key = StateKey {
                    off_history: off_history_new,
                    prev_worked: will_work,
                    workdays_used: workdays_used_new,
                    net_cents: net_new,
                };
                let new_val = StateVal {
                    adj_work_pairs: adj_pairs_new,
                    back: Some((*key, a_idx)),
                };

                match cur.get(&new_key) {
                    None => {
                        cur.insert(new_key, new_val);
                    }
                    Some(existing) => {
                        let incumbent = (new_key.workdays_used, existing.adj_work_pairs);
                        let candidate = (new_key.workdays_used, new_val.adj_work_pairs);
                        if candidate < incumbent {
                            cur.insert(new_key, new_val);
                        }
                        // ties keep the incumbent, for determinism.
                    }
                }
            }
        }

        layers.push(cur);
    }

    let final_layer = layers.last().unwrap();
    let mut best: Option<((u8, i64, i64), StateKey)> = None;
    for (key, val) in final_layer {
        let final_closing = base[HORIZON_DAYS] + key.net_cents;
        let lo = plan.target_end_cents - plan.band_cents;
        let hi = plan.target_end_cents + plan.band_cents;
        if !(lo..=hi).contains(&final_closing) {
            continue;
        }
        let abs_delta = (final_closing - plan.target_end_cents).abs();
        let obj = (key.workdays_used, val.adj_work_pairs, abs_delta);
        match &best {
            None => best = Some((obj, *key)),
            Some((best_obj, best_key)) => {
                if obj < *best_obj || (obj == *best_obj && state_key_order(key) < state_key_order(best_key))
                {
                    best = Some((obj, *key));
                }
            }
        }
    }

    let Some((objective, final_key)) = best else {
        return Err(CashflowError::Infeasible {
            last_active_constraint: constraint_tally.dominant_reason(),
        });
    };

    let actions_vec = reconstruct(&layers, final_key);

    let ledger = build_ledger(plan, &actions_vec);
    let final_closing = ledger.last().unwrap().closing_cents;

    let schedule = Schedule {
        actions: actions_vec,
        objective: (objective.0 as i64, objective.1, objective.2),
        final_closing_cents: final_closing,
        ledger,
    };
    Ok(schedule)
}

pub(crate) fn allowed_action_indices(
    day: usize,
    locked: Option<&str>,
    forbid_work_after_day1: bool,
) -> Result<Vec<usize>, CashflowError> {
    if let Some(sym) = locked {
        let idx = actions::index_of(sym).ok_or_else(|| {
            CashflowError::InvalidPlan(format!("locked action `{sym}` is not in the alphabet"))
        })?;
        return Ok(vec![idx]);
    }
    if day == 1 {
        return Ok(vec![actions::WORK_IDX]);
    }
    if forbid_work_after_day1 {
        return Ok(vec![actions::OFF_IDX]);
    }
    Ok((0..ACTIONS.len()).collect())
}

/// A fixed-size boolean window (oldest at index 0, today last), with a
/// cheap "contains an adjacent off-off pair" check.
struct Window7 {
    bits: [bool; 7],
    len: usize,
}

impl Window7 {
    fn has_off_off(&self) -> bool {
        self.bits[..self.len].windows(2).any(|w| w[0] && w[1])
    }
}

/// `off_history`'s packed bits run oldest-kept-day (MSB of the used bits) to
/// most-recent-day (LSB), covering at most the last 6 days. Unpack those,
/// append today, and return the chronological window.
fn append_window(off_history: u8, day: usize, today_off: bool) -> Window7 {
    let history_len = (day - 1).min(6);
    let mut bits = [false; 7];
    for i in 0..history_len {
        let shift = history_len - 1 - i;
        bits[i] = (off_history >> shift) & 1 == 1;
    }
    bits[history_len] = today_off;
    Window7 { bits, len: history_len + 1 }
}

/// Keep only the trailing (most recent) up to 6 entries of the window,
/// chronological order, packed MSB=oldest .. LSB=newest.
fn pack_last6(window: &Window7) -> u8 {
    let start = window.len.saturating_sub(6);
    let mut packed = 0u8;
    for &b in &window.bits[start..window.len] {
        packed = (packed << 1) | u8::from(b);
    }
    packed
}

fn state_key_order(k: &StateKey) -> (u8, bool, u8, i64) {
    (k.off_history, k.prev_worked, k.workdays_used, k.net_cents)
}

fn reconstruct(layers: &[HashMap<StateKey, StateVal>], final_key: StateKey) -> Vec<String> {
    let mut actions_rev: Vec<String> = Vec::with_capacity(HORIZON_DAYS);
    let mut cur_key = final_key;
    for day in (1..=HORIZON_DAYS).rev() {
        let val = layers[day].get(&cur_key).expect("back-pointer chain must be intact");
        let (prev_key, action_idx) = val.back.expect("non-zero day always has a predecessor");
        actions_rev.push(ACTIONS[action_idx].symbol.to_string());
        cur_key = prev_key;
    }
    actions_rev.reverse();
    actions_rev
}

#[derive(Debug, Default)]
struct ConstraintTally {
    band: u64,
    off_off: u64,
    non_negative: u64,
    rent_guard: u64,
}

impl ConstraintTally {
    fn dominant_reason(&self) -> String {
        let mut entries = [
            ("band", self.band),
            ("off-off rest rule", self.off_off),
            ("non-negativity", self.non_negative),
            ("day-30 rent guard", self.rent_guard),
        ];
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        let (name, count) = entries[0];
        if count == 0 {
            "no transitions were attempted; plan may be degenerate".to_string()
        } else {
            format!("{name} pruned the most candidate transitions ({count})")
        }
    }
}
