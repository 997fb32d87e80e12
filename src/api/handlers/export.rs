use axum::Json;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::api::error::ApiError;
use crate::api::types::SolveRequest;
use crate::engine::dispatcher::{self, Mode};
use crate::export::{self, ExportFormat};

pub async fn export(
    Path(format): Path<String>,
    Json(req): Json<SolveRequest>,
) -> Result<Response, ApiError> {
    let format = ExportFormat::parse(&format)
        .ok_or_else(|| ApiError::BadRequest(format!("unknown export format `{format}`")))?;

    req.plan.validate_shape().map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let mode: Mode = req.solver.unwrap_or(crate::api::types::SolverParam::Auto).into();
    let (schedule, _diagnostics) = dispatcher::solve(&req.plan, mode)?;

    let body = export::render(&schedule, format);
    let content_type = match format {
        ExportFormat::Markdown => "text/markdown",
        ExportFormat::Csv => "text/csv",
        ExportFormat::Json => "application/json",
    };
    Ok((StatusCode::OK, [("content-type", content_type)], body).into_response())
}
