//! Settlement planning: one group's balances in, a short payment list out.

pub mod plan;
pub mod planner;
