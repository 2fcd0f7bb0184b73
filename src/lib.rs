//! # split-engine
//!
//! Group expense splitting and debt settlement planning engine.
//!
//! Given groups of members and the shared expenses they log, this engine
//! computes each member's signed net balance and then a short list of
//! member-to-member payments that settles every balance.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: members, groups, expenses, currency tags
//! - **balance** — The balance engine: expenses → per-member net balances
//! - **settlement** — Greedy settlement planning over one group's balances
//! - **query** — Display-side expense filtering
//! - **report** — Derived per-group spending summaries
//! - **store** — In-memory workspace with validated CRUD
//! - **simulation** — Random scenario generation for tests and benches

pub mod balance;
pub mod core;
pub mod query;
pub mod report;
pub mod settlement;
pub mod simulation;
pub mod store;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::balance::engine::BalanceEngine;
    pub use crate::balance::sheet::{BalanceSheet, GroupBalances, BALANCE_TOLERANCE};
    pub use crate::core::currency::CurrencyCode;
    pub use crate::core::expense::{Expense, ExpenseSet, SplitType};
    pub use crate::core::group::{Group, GroupId};
    pub use crate::core::member::MemberName;
    pub use crate::query::filter::ExpenseFilter;
    pub use crate::report::summary::GroupSummary;
    pub use crate::settlement::plan::{Settlement, SettlementPlan};
    pub use crate::settlement::planner::{SettlementPlanner, SETTLEMENT_EPSILON};
    pub use crate::store::workspace::{Workspace, WorkspaceError};
}
