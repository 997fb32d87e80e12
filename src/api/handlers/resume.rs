use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{LedgerRow, ResumeRequest, SolveResponse, SolverInfo};
use crate::money::{cents_to_str, to_cents};
use crate::resume;
use crate::validate;

pub async fn resume(Json(req): Json<ResumeRequest>) -> Result<Json<SolveResponse>, ApiError> {
    req.plan.validate_shape().map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let desired_cents = to_cents(req.eod_amount).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let schedule = resume::resume(&req.plan, req.day, desired_cents)?;
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
        checks: crate::export::checks_as_triples(&report.checks),
        solver: SolverInfo {
            name: "primary".to_string(),
            statuses: vec!["OPTIMAL".to_string()],
            seconds: 0.0,
            fallback_reason: None,
        },
    }))
}
