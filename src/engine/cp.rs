//! Secondary/verifier solver: an independent constraint model,
//! solved by sequential lexicographic branch-and-bound rather than DP
//! layering, so it can genuinely cross-check the primary solver.
//!
//! Compiled in only behind the `cp-solver` feature; when that feature is
//! off, the backend is "not installed" and callers get
//! [`CashflowError::BackendUnavailable`].

use crate::engine::dp::allowed_action_indices;
use crate::error::CashflowError;
use crate::ledger_builder::build_ledger;
use crate::model::actions::{self, ACTIONS};
use crate::model::plan::{HORIZON_DAYS, Plan};
use crate::model::prefix::{self, PrefixArrays};
use crate::model::schedule::Schedule;

/// Per-stage solver status, recorded for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    Optimal,
    Infeasible,
}

impl StageStatus {
    fn as_str(self) -> &'static str {
        match self {
            StageStatus::Optimal => "OPTIMAL",
            StageStatus::Infeasible => "INFEASIBLE",
        }
    }
}

pub struct CpSolution {
    pub actions: Vec<String>,
    pub objective: (i64, i64, i64),
    pub final_closing_cents: i64,
    pub stage_statuses: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
enum Goal {
    MinWorkdays,
    MinAdjPairs { fixed_workdays: i64 },
    MinAbsDist { fixed_workdays: i64, fixed_adjpairs: i64 },
}

struct Ctx<'a> {
    plan: &'a Plan,
    base: [i64; HORIZON_DAYS + 1],
    min_net: i64,
    max_net: i64,
    max_day_net: i64,
    pre30: i64,
}

struct Search<'a> {
    ctx: &'a Ctx<'a>,
    goal: Goal,
    best_metric: Option<i64>,
    best_actions: Option<Vec<usize>>,
    limit: Option<usize>,
    collected: Vec<Vec<usize>>,
}

/// Run the sequential lexicographic stages and return the optimal schedule,
/// or an error if any stage is infeasible (with stage statuses describing
/// where it failed).
pub fn solve_lex(plan: &Plan) -> Result<CpSolution, CashflowError> {
    plan.validate_shape()?;

    let prefix_arr = prefix::prefix_arrays(plan);
    let ctx = Ctx {
        plan,
        base: prefix_arr.base,
        min_net: (plan.target_end_cents - plan.band_cents) - prefix_arr.base[HORIZON_DAYS],
        max_net: (plan.target_end_cents + plan.band_cents) - prefix_arr.base[HORIZON_DAYS],
        max_day_net: actions::max_net_cents(),
        pre30: prefix::pre_rent_base_day30(plan, &prefix_arr),
    };

    let mut statuses = Vec::with_capacity(3);

    // Stage 1: minimize workdays.
    let Some((workdays, _)) = run_search(&ctx, Goal::MinWorkdays, None) else {
        statuses.push(StageStatus::Infeasible.as_str().to_string());
        return Err(CashflowError::Infeasible {
            last_active_constraint: "stage 1 (minimize workdays) found no feasible assignment"
                .into(),
        });
    };
    statuses.push(StageStatus::Optimal.as_str().to_string());

    // Stage 2: minimize adjacent-work pairs, workdays fixed.
    let Some((adjpairs, _)) = run_search(&ctx, Goal::MinAdjPairs { fixed_workdays: workdays }, None)
    else {
        statuses.push(StageStatus::Infeasible.as_str().to_string());
        return Err(CashflowError::Infeasible {
            last_active_constraint: "stage 2 (minimize adjacent workdays) found no feasible assignment"
                .into(),
        });
    };
    statuses.push(StageStatus::Optimal.as_str().to_string());

    // Stage 3: minimize |final - target|, workdays and adjpairs fixed.
    let goal3 = Goal::MinAbsDist { fixed_workdays: workdays, fixed_adjpairs: adjpairs };
    let Some((abs_dist, winning_actions)) = run_search(&ctx, goal3, None) else {
        statuses.push(StageStatus::Infeasible.as_str().to_string());
        return Err(CashflowError::Infeasible {
            last_active_constraint: "stage 3 (minimize distance from target) found no feasible assignment"
                .into(),
        });
    };
    statuses.push(StageStatus::Optimal.as_str().to_string());

    let symbols: Vec<String> = winning_actions
        .iter()
        .map(|&idx| ACTIONS[idx].symbol.to_string())
        .collect();
    let ledger = build_ledger(plan, &symbols);
    let final_closing = ledger.last().unwrap().closing_cents;

    Ok(CpSolution {
        actions: symbols,
        objective: (workdays, adjpairs, abs_dist),
        final_closing_cents: final_closing,
        stage_statuses: statuses,
    })
}

/// Cross-checks the primary DP solver against this module's independent
/// search and reports whether their objectives agree, plus how many distinct
/// optimal action vectors the tie search turned up (capped at `tie_limit`).
pub struct VerificationReport {
    pub dp_objective: (i64, i64, i64),
    pub cp_objective: (i64, i64, i64),
    pub objectives_match: bool,
    pub tie_count: usize,
}

/// Independently re-solves `plan` with both engines and enumerates ties on
/// the CP side, producing a single pass/fail report instead of leaving the
/// comparison to be reassembled by hand from two separate `solve` calls.
pub fn verify_against_dp(plan: &Plan, tie_limit: usize) -> Result<VerificationReport, CashflowError> {
    let dp_schedule = crate::engine::dp::solve(plan, crate::engine::dp::DpOptions::default())?;
    let cp_solution = solve_lex(plan)?;
    let ties = enumerate_ties(plan, tie_limit)?;

    Ok(VerificationReport {
        dp_objective: dp_schedule.objective,
        cp_objective: cp_solution.objective,
        objectives_match: dp_schedule.objective == cp_solution.objective,
        tie_count: ties.len(),
    })
}

/// Drop the objective, fix each part to its optimum, and enumerate up to
/// `limit` distinct action vectors (tie enumeration).
pub fn enumerate_ties(plan: &Plan, limit: usize) -> Result<Vec<Schedule>, CashflowError> {
    let solved = solve_lex(plan)?;
    let prefix_arr = prefix::prefix_arrays(plan);
    let ctx = Ctx {
        plan,
        base: prefix_arr.base,
        min_net: (plan.target_end_cents - plan.band_cents) - prefix_arr.base[HORIZON_DAYS],
        max_net: (plan.target_end_cents + plan.band_cents) - prefix_arr.base[HORIZON_DAYS],
        max_day_net: actions::max_net_cents(),
        pre30: prefix::pre_rent_base_day30(plan, &prefix_arr),
    };
    let (workdays, adjpairs, abs_dist) = solved.objective;
    let goal = Goal::MinAbsDist { fixed_workdays: workdays, fixed_adjpairs: adjpairs };
    let mut search = Search {
        ctx: &ctx,
        goal,
        best_metric: Some(abs_dist),
        best_actions: None,
        limit: Some(limit),
        collected: Vec::new(),
    };
    let mut off_window = Vec::with_capacity(6);
    let mut path = Vec::with_capacity(HORIZON_DAYS);
    dfs(&mut search, 1, 0, 0, 0, false, &mut off_window, &mut path);

    Ok(search
        .collected
        .into_iter()
        .map(|idxs| {
            let symbols: Vec<String> = idxs.iter().map(|&i| ACTIONS[i].symbol.to_string()).collect();
            let ledger = build_ledger(plan, &symbols);
            let final_closing = ledger.last().unwrap().closing_cents;
            Schedule {
                actions: symbols,
                objective: (workdays, adjpairs, abs_dist),
                final_closing_cents: final_closing,
                ledger,
            }
        })
        .collect())
}

fn run_search(ctx: &Ctx, goal: Goal, limit: Option<usize>) -> Option<(i64, Vec<usize>)> {
    let mut search = Search {
        ctx,
        goal,
        best_metric: None,
        best_actions: None,
        limit,
        collected: Vec::new(),
    };
    let mut off_window = Vec::with_capacity(6);
    let mut path = Vec::with_capacity(HORIZON_DAYS);
    dfs(&mut search, 1, 0, 0, 0, false, &mut off_window, &mut path);
    search.best_metric.map(|m| (m, search.best_actions.unwrap()))
}

#[allow(clippy::too_many_arguments)]
fn dfs(
    search: &mut Search,
    day: usize,
    net: i64,
    workdays: i64,
    adjpairs: i64,
    prev_worked: bool,
    off_window: &mut Vec<bool>,
    path: &mut Vec<usize>,
) {
    if day > HORIZON_DAYS {
        let final_closing = search.ctx.base[HORIZON_DAYS] + net;
        let lo = search.ctx.plan.target_end_cents - search.ctx.plan.band_cents;
        let hi = search.ctx.plan.target_end_cents + search.ctx.plan.band_cents;
        if !(lo..=hi).contains(&final_closing) {
            return;
        }
        let abs_dist = (final_closing - search.ctx.plan.target_end_cents).abs();

        let metric = match search.goal {
            Goal::MinWorkdays => workdays,
            Goal::MinAdjPairs { fixed_workdays } => {
                if workdays != fixed_workdays {
                    return;
                }
                adjpairs
            }
            Goal::MinAbsDist { fixed_workdays, fixed_adjpairs } => {
                if workdays != fixed_workdays || adjpairs != fixed_adjpairs {
                    return;
                }
                abs_dist
            }
        };

        if let Some(target) = search.best_metric
            && matches!(search.goal, Goal::MinAbsDist { .. })
            && metric == target
        {
            if let Some(limit) = search.limit
                && search.collected.len() < limit
            {
                let key: Vec<usize> = path.clone();
                if !search.collected.contains(&key) {
                    search.collected.push(key);
                }
            }
        }

        match search.best_metric {
            None => {
                search.best_metric = Some(metric);
                search.best_actions = Some(path.clone());
            }
            Some(best) if metric < best => {
                search.best_metric = Some(metric);
                search.best_actions = Some(path.clone());
            }
            _ => {}
        }
        return;
    }

    let locked = search.ctx.plan.locked_action(day as u8);
    let Ok(allowed) = allowed_action_indices(day, locked, false) else { return };

    for &a_idx in &allowed {
        let spec = ACTIONS[a_idx];
        let net_new = net + spec.net_cents;
        let days_left = (HORIZON_DAYS - day) as i64;

        if net_new > search.ctx.max_net {
            continue;
        }
        if net_new + search.ctx.max_day_net * days_left < search.ctx.min_net {
            continue;
        }

        let today_off = spec.is_off;
        if day >= 7 {
            let last6 = &off_window[off_window.len().saturating_sub(6)..];
            let has_pair = last6.windows(2).any(|w| w[0] && w[1])
                || last6.last().is_some_and(|&b| b && today_off);
            if !has_pair {
                continue;
            }
        }

        let closing_t = search.ctx.base[day] + net_new;
        if closing_t < 0 {
            continue;
        }
        if day == HORIZON_DAYS && search.ctx.pre30 + net_new < search.ctx.plan.rent_guard_cents {
            continue;
        }

        let will_work = !spec.is_off;
        let workdays_new = workdays + i64::from(will_work);
        let adjpairs_new = adjpairs + i64::from(prev_worked && will_work);

        match search.goal {
            Goal::MinWorkdays => {
                if let Some(best) = search.best_metric
                    && workdays_new >= best
                {
                    continue;
                }
            }
            Goal::MinAdjPairs { fixed_workdays } => {
                let remaining = (HORIZON_DAYS - day) as i64;
                if workdays_new > fixed_workdays || workdays_new + remaining < fixed_workdays {
                    continue;
                }
                if let Some(best) = search.best_metric
                    && adjpairs_new >= best
                {
                    continue;
                }
            }
            Goal::MinAbsDist { fixed_workdays, fixed_adjpairs } => {
                let remaining = (HORIZON_DAYS - day) as i64;
                if workdays_new > fixed_workdays || workdays_new + remaining < fixed_workdays {
                    continue;
                }
                if adjpairs_new > fixed_adjpairs {
                    continue;
                }
            }
        }

        off_window.push(today_off);
        path.push(a_idx);
        dfs(search, day + 1, net_new, workdays_new, adjpairs_new, will_work, off_window, path);
        path.pop();
        off_window.pop();
    }
}
