//! Basic expense splitting example.
//!
//! Demonstrates how the engine turns a handful of shared expenses into
//! net balances and a settlement plan.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use split_engine::balance::engine::BalanceEngine;
use split_engine::core::expense::{Expense, ExpenseSet};
use split_engine::core::group::{Group, GroupId};
use split_engine::core::member::MemberName;
use split_engine::settlement::planner::SettlementPlanner;

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║   split-engine: Basic Splitting Example  ║");
    println!("╚══════════════════════════════════════════╝\n");

    let john = MemberName::new("John");
    let sara = MemberName::new("Sara");
    let miguel = MemberName::new("Miguel");

    let roommates = Group::new(
        GroupId::new("g1"),
        "Roommates",
        vec![john.clone(), sara.clone(), miguel.clone()],
    )
    .with_description("Apartment expenses");

    let mut expenses = ExpenseSet::new();
    expenses.add(Expense::equal_split(
        "Groceries",
        dec!(89.75),
        john.clone(),
        &roommates,
        NaiveDate::from_ymd_opt(2023, 11, 15).unwrap(),
        "Food",
    ));
    expenses.add(Expense::equal_split(
        "Electricity Bill",
        dec!(142.30),
        sara.clone(),
        &roommates,
        NaiveDate::from_ymd_opt(2023, 11, 18).unwrap(),
        "Utilities",
    ));

    println!("━━━ Expenses ━━━\n");
    for expense in expenses.expenses() {
        println!(
            "  {:<20} {:>8}  paid by {}  ({} per person)",
            expense.description(),
            expense.amount(),
            expense.paid_by(),
            expense.per_person_amount().round_dp(2),
        );
    }

    let sheet = BalanceEngine::compute(std::slice::from_ref(&roommates), &expenses);
    let balances = sheet
        .group(roommates.id())
        .expect("group was in the input");

    println!("\n━━━ Balances ━━━\n");
    for (member, balance) in balances.iter() {
        let status = if balance > dec!(0.01) {
            "is owed"
        } else if balance < dec!(-0.01) {
            "owes"
        } else {
            "is settled"
        };
        println!("  {:<10} {:>10}  [{}]", member.to_string(), balance.round_dp(2), status);
    }

    let plan = SettlementPlanner::plan(balances);
    println!("\n{}", plan);

    println!("Plan verifies: {}", plan.settles(balances));
}
