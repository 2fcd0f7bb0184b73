//! Foundational data types: members, groups, expenses, currency tags.

pub mod currency;
pub mod expense;
pub mod group;
pub mod member;
