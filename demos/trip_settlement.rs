//! Multi-group walkthrough: trip expenses, filtering, and reporting.
//!
//! Shows two groups tracked side by side, a filtered view of the
//! expense list, the spending summary, and each group's settlement
//! plan.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use split_engine::core::group::GroupId;
use split_engine::core::member::MemberName;
use split_engine::query::filter::ExpenseFilter;
use split_engine::report::summary::GroupSummary;
use split_engine::settlement::planner::SettlementPlanner;
use split_engine::store::workspace::Workspace;

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║  split-engine: Trip Settlement Example   ║");
    println!("╚══════════════════════════════════════════╝\n");

    let mut workspace = Workspace::new();

    workspace
        .add_group(
            GroupId::new("g1"),
            "Roommates",
            Some("Apartment expenses"),
            vec![
                MemberName::new("John"),
                MemberName::new("Sara"),
                MemberName::new("Miguel"),
            ],
        )
        .expect("valid group");

    workspace
        .add_group(
            GroupId::new("g2"),
            "Trip to Paris",
            Some("Summer vacation"),
            vec![
                MemberName::new("John"),
                MemberName::new("Lisa"),
                MemberName::new("Tom"),
                MemberName::new("Emily"),
            ],
        )
        .expect("valid group");

    let expense_rows = [
        ("g1", "Groceries", dec!(89.75), "John", "Food", (2023, 11, 15)),
        ("g1", "Electricity Bill", dec!(142.30), "Sara", "Utilities", (2023, 11, 18)),
        ("g2", "Hotel Room", dec!(850.00), "Lisa", "Accommodation", (2023, 8, 12)),
        ("g2", "Museum Tickets", dec!(96.00), "Tom", "Entertainment", (2023, 8, 13)),
        ("g2", "Dinner Cruise", dec!(240.00), "Lisa", "Food", (2023, 8, 14)),
    ];
    for (group_id, description, amount, payer, category, (y, m, d)) in expense_rows {
        workspace
            .add_expense(
                &GroupId::new(group_id),
                description,
                amount,
                MemberName::new(payer),
                NaiveDate::from_ymd_opt(y, m, d).expect("valid date"),
                category,
            )
            .expect("valid expense");
    }

    // --- Scenario 1: filtered expense view ---
    println!("━━━ Scenario 1: Lisa's trip expenses ━━━\n");

    let filter = ExpenseFilter::new()
        .with_group(GroupId::new("g2"))
        .with_paid_by(MemberName::new("Lisa"));
    for expense in filter.apply(workspace.expenses()) {
        println!(
            "  {}  {:<16} {:>8}",
            expense.date(),
            expense.description(),
            expense.amount()
        );
    }

    // --- Scenario 2: spending summary ---
    println!("\n━━━ Scenario 2: Trip summary ━━━\n");

    let trip = workspace
        .group(&GroupId::new("g2"))
        .expect("group exists");
    println!("{}", GroupSummary::for_group(trip, workspace.expenses()));

    // --- Scenario 3: settlement plans ---
    println!("━━━ Scenario 3: Who pays whom ━━━\n");

    let sheet = workspace.balances();
    for group in workspace.groups() {
        let balances = sheet.group(group.id()).expect("group was in the input");
        println!("--- {} ---", group.name());
        for (member, balance) in balances.iter() {
            println!("  {:<10} {:>10}", member.to_string(), balance.round_dp(2));
        }
        println!("{}", SettlementPlanner::plan(balances));
    }
}
