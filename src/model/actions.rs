//! The action alphabet as a data table, not a type hierarchy.
//!
//! This deployment wires the two-symbol alphabet `{Off, Work}`. A five-symbol
//! historical variant (`O, S, M, L, SS`) exists in the reference sources, but
//! the alphabet is chosen per deployment, not switched at runtime, so only
//! one table ships here.

use serde::{Deserialize, Serialize};

/// One entry in the action table: a symbol and its net cent delta for a
/// single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionSpec {
    pub symbol: &'static str,
    pub net_cents: i64,
    pub is_off: bool,
}

/// `Off` nets zero; `Work` deposits a fixed per-workday payout.
pub const WORK_NET_CENTS: i64 = 10_000;

pub const ACTIONS: [ActionSpec; 2] = [
    ActionSpec { symbol: "Off", net_cents: 0, is_off: true },
    ActionSpec { symbol: "Work", net_cents: WORK_NET_CENTS, is_off: false },
];

pub const OFF_IDX: usize = 0;
pub const WORK_IDX: usize = 1;

/// Look up an action's index in [`ACTIONS`] by symbol.
pub fn index_of(symbol: &str) -> Option<usize> {
    ACTIONS.iter().position(|a| a.symbol == symbol)
}

pub fn net_cents_of(symbol: &str) -> Option<i64> {
    index_of(symbol).map(|i| ACTIONS[i].net_cents)
}

pub fn is_off(symbol: &str) -> bool {
    index_of(symbol).is_some_and(|i| ACTIONS[i].is_off)
}

pub fn max_net_cents() -> i64 {
    ACTIONS.iter().map(|a| a.net_cents).max().unwrap_or(0)
}

/// The symbol for a locked/forced working day (day 1, absent an overriding lock).
pub const WORK_SYMBOL: &str = "Work";
pub const OFF_SYMBOL: &str = "Off";
