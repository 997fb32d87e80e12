use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{LedgerRow, SolveRequest, SolveResponse, SolverInfo};
use crate::engine::dispatcher::{self, Mode};
use crate::export::checks_as_triples;
use crate::money::cents_to_str;
use crate::model::schedule::SolverName;
use crate::validate;

pub async fn solve(Json(req): Json<SolveRequest>) -> Result<Json<SolveResponse>, ApiError> {
    req.plan.validate_shape().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let mode: Mode = req.solver.unwrap_or(crate::api::types::SolverParam::Auto).into();
    let (schedule, diagnostics) = dispatcher::solve(&req.plan, mode)?;
    let report = validate::validate(&req.plan, &schedule);

    let ledger = schedule
        .ledger
        .iter()
        .map(|r| LedgerRow {
            day: r.day,
            opening: cents_to_str(r.opening_cents),
            deposits: cents_to_str(r.deposit_cents),
            action: r.action.clone(),
            net: cents_to_str(r.net_cents),
            bills: cents_to_str(r.bills_cents),
            closing: cents_to_str(r.closing_cents),
        })
        .collect();

    Ok(Json(SolveResponse {
        actions: schedule.actions,
        objective: [schedule.objective.0, schedule.objective.1, schedule.objective.2],
        final_closing: cents_to_str(schedule.final_closing_cents),
        ledger,
        checks: checks_as_triples(&report.checks),
        solver: SolverInfo {
            name: match diagnostics.solver_name {
                SolverName::Primary => "primary".to_string(),
                SolverName::Fallback => "fallback".to_string(),
            },
            statuses: diagnostics.stage_statuses,
            seconds: diagnostics.seconds,
            fallback_reason: diagnostics.fallback_reason,
        },
    }))
}
