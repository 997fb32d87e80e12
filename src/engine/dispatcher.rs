//! Unified entry point: chooses a solver, falls back, and attaches
//! diagnostics. Always re-runs the ledger builder and validator before
//! returning — a validator failure here is a [`CashflowError::SolverBug`]
//! hard fault, never a recovered infeasibility.

use std::time::Instant;

use crate::error::CashflowError;
use crate::ledger_builder::build_ledger;
use crate::model::plan::Plan;
use crate::model::schedule::{Diagnostics, Schedule, SolverName};
use crate::validate;

use super::dp::{self, DpOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Auto,
    Primary,
    Secondary,
}

/// Solve `plan` per `mode` and return the chosen schedule plus diagnostics.
pub fn solve(plan: &Plan, mode: Mode) -> Result<(Schedule, Diagnostics), CashflowError> {
    let start = Instant::now();

    let (schedule, solver_name, stage_statuses, fallback_reason) = match mode {
        Mode::Primary => {
            let schedule = dp::solve(plan, DpOptions::default())?;
            (schedule, SolverName::Primary, vec!["OPTIMAL".to_string()], None)
        }
        Mode::Secondary => {
            let (schedule, stage_statuses) = solve_secondary(plan)?;
            (schedule, SolverName::Primary, stage_statuses, None)
        }
        Mode::Auto => match solve_secondary(plan) {
            Ok((schedule, statuses)) => (schedule, SolverName::Primary, statuses, None),
            Err(CashflowError::Infeasible { last_active_constraint }) => {
                return Err(CashflowError::Infeasible { last_active_constraint });
            }
            Err(backend_err) => {
                let reason = backend_err.to_string();
                let schedule = dp::solve(plan, DpOptions::default())?;
                (schedule, SolverName::Fallback, vec!["OPTIMAL".to_string()], Some(reason))
            }
        },
    };

    // Re-derive the ledger deterministically (defense against any solver
    // internally constructing one a different way) and validate independently.
    let rebuilt_ledger = build_ledger(plan, &schedule.actions);
    let schedule = Schedule { ledger: rebuilt_ledger, ..schedule };

    let report = validate::validate(plan, &schedule);
    if !report.ok {
        let failing: Vec<String> = report
            .checks
            .iter()
            .filter(|c| !c.pass)
            .map(|c| format!("{}: {}", c.name, c.detail))
            .collect();
        return Err(CashflowError::SolverBug(failing.join("; ")));
    }

    let diagnostics = Diagnostics {
        solver_name,
        stage_statuses,
        seconds: start.elapsed().as_secs_f64(),
        fallback_reason,
    };

    Ok((schedule, diagnostics))
}

#[cfg(feature = "cp-solver")]
fn solve_secondary(plan: &Plan) -> Result<(Schedule, Vec<String>), CashflowError> {
    let sol = super::cp::solve_lex(plan)?;
    let ledger = build_ledger(plan, &sol.actions);
    let schedule = Schedule {
        actions: sol.actions,
        objective: sol.objective,
        final_closing_cents: sol.final_closing_cents,
        ledger,
    };
    Ok((schedule, sol.stage_statuses))
}

#[cfg(not(feature = "cp-solver"))]
fn solve_secondary(_plan: &Plan) -> Result<(Schedule, Vec<String>), CashflowError> {
    Err(CashflowError::BackendUnavailable)
}

/// Cross-checks the DP solver against the independent CP search and reports
/// whether they agree, plus the number of distinct tied optima the CP side
/// found (capped at `tie_limit`). Only meaningful when the `cp-solver`
/// backend is compiled in — there's nothing to cross-check against otherwise.
#[cfg(feature = "cp-solver")]
pub fn verify(plan: &Plan, tie_limit: usize) -> Result<super::cp::VerificationReport, CashflowError> {
    super::cp::verify_against_dp(plan, tie_limit)
}
