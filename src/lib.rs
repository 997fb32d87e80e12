//! Computes an optimal 30-day work-and-cashflow schedule: given a starting
//! balance, dated deposits and bills, a target end-of-month balance and
//! band, a rent-guard threshold, and optional locks/adjustments, picks one
//! action per day so that daily closing balances never go negative, the
//! day-30 pre-rent balance clears the guard, and the final balance lands
//! within the band — lexicographically minimizing workdays, then adjacent
//! workday pairs, then distance from target.
//!
//! The programmatic surface is [`engine::solve`], [`resume::resume`],
//! [`validate::validate`], and [`ledger_builder::build_ledger`]. Everything
//! else (`cli`, `api`, `export`) is a thin adapter over those four.

pub mod engine;
pub mod error;
pub mod export;
pub mod ledger_builder;
pub mod model;
pub mod money;
pub mod resume;
pub mod validate;

#[cfg(feature = "full")]
pub mod api;
