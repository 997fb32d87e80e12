use serde::{Deserialize, Serialize};

/// One day's balance projection. `closing = opening + deposit_cents + net_cents - bills_cents`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayLedger {
    pub day: u8,
    pub opening_cents: i64,
    /// Net deposits plus manual adjustments landing on this day.
    pub deposit_cents: i64,
    pub action: String,
    pub net_cents: i64,
    pub bills_cents: i64,
    pub closing_cents: i64,
}
