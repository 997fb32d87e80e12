use thiserror::Error;

/// The six error kinds a caller of this crate can observe.
///
/// `InvalidAmount` and `InvalidPlan` come from parsing/normalizing a `Plan`;
/// everything else comes from solving one. `SolverBug` is never recovered —
/// it means the chosen action vector failed its own validator.
#[derive(Debug, Error)]
pub enum CashflowError {
    #[error("invalid monetary amount `{value}`: {reason}")]
    InvalidAmount { value: String, reason: String },

    #[error("invalid plan: {0}")]
    InvalidPlan(String),

    #[error("no feasible schedule found: {last_active_constraint}")]
    Infeasible { last_active_constraint: String },

    #[error("secondary (CP) solver backend unavailable")]
    BackendUnavailable,

    #[error("secondary solver exceeded its {stage} time cap of {cap_secs}s")]
    SolverTimeout { stage: String, cap_secs: f64 },

    #[error("solver produced an invalid schedule (validator failed: {0})")]
    SolverBug(String),
}

pub type Result<T> = std::result::Result<T, CashflowError>;
