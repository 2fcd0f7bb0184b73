use crate::core::expense::ExpenseSet;
use crate::core::group::{Group, GroupId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Spending summary for one group.
///
/// A pure derivation over the group's own expenses; recomputed on
/// demand, never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub group_id: GroupId,
    pub group_name: String,
    /// Total spent across the group's expenses.
    pub total_spent: Decimal,
    /// Number of expenses counted.
    pub expense_count: usize,
    /// Number of members sharing the spending.
    pub member_count: usize,
    /// Total divided by member count, rounded to cents.
    pub average_per_member: Decimal,
    /// Total spent per category label.
    pub category_totals: HashMap<String, Decimal>,
}

impl GroupSummary {
    /// Build the summary for `group` from the full expense set; only
    /// expenses logged against the group are counted.
    pub fn for_group(group: &Group, expenses: &ExpenseSet) -> Self {
        let mut total_spent = Decimal::ZERO;
        let mut expense_count = 0;
        let mut category_totals: HashMap<String, Decimal> = HashMap::new();

        for expense in expenses.for_group(group.id()) {
            total_spent += expense.amount();
            expense_count += 1;
            *category_totals
                .entry(expense.category().to_string())
                .or_insert(Decimal::ZERO) += expense.amount();
        }

        let average_per_member =
            (total_spent / Decimal::from(group.member_count() as u64)).round_dp(2);

        GroupSummary {
            group_id: group.id().clone(),
            group_name: group.name().to_string(),
            total_spent,
            expense_count,
            member_count: group.member_count(),
            average_per_member,
            category_totals,
        }
    }

    /// Share of spending in `category`, as a percentage of the total.
    pub fn category_percent(&self, category: &str) -> f64 {
        if self.total_spent == Decimal::ZERO {
            return 0.0;
        }
        let Some(amount) = self.category_totals.get(category) else {
            return 0.0;
        };
        let pct = *amount * Decimal::from(100) / self.total_spent;
        pct.to_string().parse::<f64>().unwrap_or(0.0)
    }

    /// Category labels ordered by descending spend, ties alphabetical.
    pub fn top_categories(&self) -> Vec<(&str, Decimal)> {
        let mut categories: Vec<(&str, Decimal)> = self
            .category_totals
            .iter()
            .map(|(c, amount)| (c.as_str(), *amount))
            .collect();
        categories.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        categories
    }
}

impl std::fmt::Display for GroupSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Group Summary: {} ===", self.group_name)?;
        writeln!(f, "Total Expenses:     {}", self.total_spent)?;
        writeln!(f, "Expense Count:      {}", self.expense_count)?;
        writeln!(f, "Average per Member: {}", self.average_per_member)?;

        for (category, amount) in self.top_categories() {
            writeln!(
                f,
                "  {:<16} {:>10}  ({:.1}%)",
                category,
                amount,
                self.category_percent(category)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::expense::Expense;
    use crate::core::member::MemberName;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn fixture() -> (Group, ExpenseSet) {
        let group = Group::new(
            GroupId::new("g1"),
            "Roommates",
            vec![
                MemberName::new("John"),
                MemberName::new("Sara"),
                MemberName::new("Miguel"),
            ],
        );
        let date = NaiveDate::from_ymd_opt(2023, 11, 15).unwrap();
        let mut set = ExpenseSet::new();
        set.add(Expense::equal_split(
            "Groceries",
            dec!(60),
            MemberName::new("John"),
            &group,
            date,
            "Food",
        ));
        set.add(Expense::equal_split(
            "Takeout",
            dec!(30),
            MemberName::new("Sara"),
            &group,
            date,
            "Food",
        ));
        set.add(Expense::equal_split(
            "Electricity Bill",
            dec!(90),
            MemberName::new("Sara"),
            &group,
            date,
            "Utilities",
        ));
        (group, set)
    }

    #[test]
    fn test_summary_totals() {
        let (group, set) = fixture();
        let summary = GroupSummary::for_group(&group, &set);

        assert_eq!(summary.total_spent, dec!(180));
        assert_eq!(summary.expense_count, 3);
        assert_eq!(summary.member_count, 3);
        assert_eq!(summary.average_per_member, dec!(60));
    }

    #[test]
    fn test_category_breakdown() {
        let (group, set) = fixture();
        let summary = GroupSummary::for_group(&group, &set);

        assert_eq!(summary.category_totals["Food"], dec!(90));
        assert_eq!(summary.category_totals["Utilities"], dec!(90));
        assert_relative_eq!(summary.category_percent("Food"), 50.0, epsilon = 0.01);
        assert_relative_eq!(summary.category_percent("Missing"), 0.0);
    }

    #[test]
    fn test_top_categories_deterministic() {
        let (group, set) = fixture();
        let summary = GroupSummary::for_group(&group, &set);
        // Equal spend ties break alphabetically.
        let top = summary.top_categories();
        assert_eq!(top[0].0, "Food");
        assert_eq!(top[1].0, "Utilities");
    }

    #[test]
    fn test_other_groups_excluded() {
        let (group, mut set) = fixture();
        let trip = Group::new(
            GroupId::new("g2"),
            "Trip to Paris",
            vec![MemberName::new("John"), MemberName::new("Lisa")],
        );
        set.add(Expense::equal_split(
            "Hotel Room",
            dec!(850),
            MemberName::new("Lisa"),
            &trip,
            NaiveDate::from_ymd_opt(2023, 8, 12).unwrap(),
            "Accommodation",
        ));

        let summary = GroupSummary::for_group(&group, &set);
        assert_eq!(summary.total_spent, dec!(180));
        assert!(!summary.category_totals.contains_key("Accommodation"));
    }

    #[test]
    fn test_empty_group_summary() {
        let group = Group::new(
            GroupId::new("g3"),
            "Quiet",
            vec![MemberName::new("X")],
        );
        let summary = GroupSummary::for_group(&group, &ExpenseSet::new());
        assert_eq!(summary.total_spent, Decimal::ZERO);
        assert_eq!(summary.expense_count, 0);
        assert_eq!(summary.average_per_member, Decimal::ZERO);
        assert_relative_eq!(summary.category_percent("Food"), 0.0);
    }
}
