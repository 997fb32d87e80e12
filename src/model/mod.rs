pub mod actions;
pub mod ledger;
pub mod plan;
pub mod prefix;
pub mod schedule;

pub use ledger::DayLedger;
pub use plan::{Adjustment, Bill, Deposit, Lock, Plan, HORIZON_DAYS};
pub use schedule::{Diagnostics, Schedule, SolverName};
