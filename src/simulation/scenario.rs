//! Random scenario generation.
//!
//! Produces well-formed groups and equal-split expenses for exercising
//! the balance engine and settlement planner at various sizes.

use crate::core::expense::{Expense, ExpenseSet};
use crate::core::group::{Group, GroupId};
use crate::core::member::MemberName;
use chrono::{Days, NaiveDate};
use rand::Rng;
use rust_decimal::Decimal;

/// Configuration for generating a random expense scenario.
#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    /// Number of groups.
    pub group_count: usize,
    /// Members per group.
    pub members_per_group: usize,
    /// Expenses logged per group.
    pub expenses_per_group: usize,
    /// Minimum expense amount.
    pub min_amount: Decimal,
    /// Maximum expense amount.
    pub max_amount: Decimal,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            group_count: 2,
            members_per_group: 4,
            expenses_per_group: 10,
            min_amount: Decimal::from(5),
            max_amount: Decimal::from(500),
        }
    }
}

/// A generated set of groups and the expenses logged against them.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub groups: Vec<Group>,
    pub expenses: ExpenseSet,
}

const CATEGORIES: [&str; 6] = [
    "Food",
    "Utilities",
    "Transportation",
    "Accommodation",
    "Entertainment",
    "Other",
];

/// Generate a random scenario for testing.
///
/// Every expense is a valid equal split paid by a member of its group,
/// with a 2-decimal amount inside the configured range.
pub fn generate_random_scenario(config: &ScenarioConfig) -> Scenario {
    let mut rng = rand::thread_rng();
    let base_date = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid calendar date");

    let mut groups = Vec::with_capacity(config.group_count);
    let mut expenses = ExpenseSet::new();

    for g in 0..config.group_count {
        let members: Vec<MemberName> = (0..config.members_per_group.max(1))
            .map(|m| MemberName::new(format!("member-{:02}-{:02}", g, m)))
            .collect();
        let group = Group::new(
            GroupId::new(format!("group-{:02}", g)),
            format!("Group {}", g),
            members,
        );

        for _ in 0..config.expenses_per_group {
            let payer_idx = rng.gen_range(0..group.member_count());
            let payer = group.members()[payer_idx].clone();

            let min_f64: f64 = config.min_amount.to_string().parse().unwrap_or(5.0);
            let max_f64: f64 = config.max_amount.to_string().parse().unwrap_or(500.0);
            let amount_f64 = rng.gen_range(min_f64..max_f64);
            let amount = Decimal::from_f64_retain(amount_f64)
                .unwrap_or(Decimal::from(10))
                .round_dp(2);

            let date = base_date
                .checked_add_days(Days::new(rng.gen_range(0..365)))
                .unwrap_or(base_date);
            let category = CATEGORIES[rng.gen_range(0..CATEGORIES.len())];

            if amount > Decimal::ZERO {
                expenses.add(Expense::equal_split(
                    format!("Expense {}", expenses.len() + 1),
                    amount,
                    payer,
                    &group,
                    date,
                    category,
                ));
            }
        }

        groups.push(group);
    }

    Scenario { groups, expenses }
}
