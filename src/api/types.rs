use serde::{Deserialize, Serialize};

use crate::model::plan::Plan;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverParam {
    Auto,
    Primary,
    Secondary,
}

impl From<SolverParam> for crate::engine::dispatcher::Mode {
    fn from(p: SolverParam) -> Self {
        match p {
            SolverParam::Auto => Self::Auto,
            SolverParam::Primary => Self::Primary,
            SolverParam::Secondary => Self::Secondary,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SolveRequest {
    #[serde(default)]
    pub solver: Option<SolverParam>,
    pub plan: Plan,
}

#[derive(Debug, Serialize)]
pub struct SolveResponse {
    pub actions: Vec<String>,
    pub objective: [i64; 3],
    pub final_closing: String,
    pub ledger: Vec<LedgerRow>,
    pub checks: Vec<(String, bool, String)>,
    pub solver: SolverInfo,
}

#[derive(Debug, Serialize)]
pub struct LedgerRow {
    pub day: u8,
    pub opening: String,
    pub deposits: String,
    pub action: String,
    pub net: String,
    pub bills: String,
    pub closing: String,
}

#[derive(Debug, Serialize)]
pub struct SolverInfo {
    pub name: String,
    pub statuses: Vec<String>,
    pub seconds: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResumeRequest {
    pub day: u8,
    pub eod_amount: f64,
    pub plan: Plan,
}
