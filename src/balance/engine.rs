use crate::balance::sheet::{BalanceSheet, GroupBalances};
use crate::core::expense::ExpenseSet;
use crate::core::group::{Group, GroupId};
use std::collections::HashMap;

/// The balance computation engine.
///
/// Turns an immutable snapshot of groups and expenses into per-group net
/// balances. Stateless: every call computes from scratch, so callers
/// rerun it after any change to the expense set.
pub struct BalanceEngine;

impl BalanceEngine {
    /// Compute net balances for every group.
    ///
    /// # Algorithm
    ///
    /// 1. Start every member of every group at zero.
    /// 2. For each expense: credit the payer `amount - per-person share`
    ///    (their net contribution after their own share) and debit every
    ///    other member of the group by the share.
    /// 3. An expense whose group id is unknown is skipped; stale
    ///    references are tolerated rather than fatal.
    ///
    /// The stored per-person share is applied as-is; keeping it
    /// consistent with `amount / member count` is the creation layer's
    /// job. Only equal split is produced today, but nothing here assumes
    /// equality beyond trusting the share.
    ///
    /// The result does not depend on expense order, and each group's
    /// balances sum to zero within tolerance whenever every share times
    /// its group's member count equals the expense amount.
    pub fn compute(groups: &[Group], expenses: &ExpenseSet) -> BalanceSheet {
        let mut sheet = BalanceSheet::new();
        let mut by_id: HashMap<&GroupId, &Group> = HashMap::with_capacity(groups.len());
        for group in groups {
            by_id.insert(group.id(), group);
            sheet.insert(group.id().clone(), GroupBalances::for_group(group));
        }

        for expense in expenses.expenses() {
            let Some(group) = by_id.get(expense.group_id()) else {
                log::debug!(
                    "skipping expense {} referencing unknown group {}",
                    expense.id(),
                    expense.group_id()
                );
                continue;
            };
            let Some(balances) = sheet.group_mut(expense.group_id()) else {
                continue;
            };

            let share = expense.per_person_amount();
            balances.credit(expense.paid_by(), expense.amount() - share);
            for member in group.members() {
                if member != expense.paid_by() {
                    balances.debit(member, share);
                }
            }
        }

        sheet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::expense::Expense;
    use crate::core::member::MemberName;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 11, 15).unwrap()
    }

    fn abc_group() -> Group {
        Group::new(
            GroupId::new("g1"),
            "Trio",
            vec![
                MemberName::new("A"),
                MemberName::new("B"),
                MemberName::new("C"),
            ],
        )
    }

    #[test]
    fn test_single_expense() {
        let group = abc_group();
        let mut expenses = ExpenseSet::new();
        expenses.add(Expense::equal_split(
            "Dinner",
            dec!(90),
            MemberName::new("A"),
            &group,
            date(),
            "Food",
        ));

        let sheet = BalanceEngine::compute(&[group], &expenses);
        let balances = sheet.group(&GroupId::new("g1")).unwrap();

        assert_eq!(balances.balance(&MemberName::new("A")), dec!(60));
        assert_eq!(balances.balance(&MemberName::new("B")), dec!(-30));
        assert_eq!(balances.balance(&MemberName::new("C")), dec!(-30));
        assert!(balances.is_balanced());
    }

    #[test]
    fn test_mutual_expenses_cancel() {
        let group = Group::new(
            GroupId::new("g1"),
            "Pair",
            vec![MemberName::new("A"), MemberName::new("B")],
        );
        let mut expenses = ExpenseSet::new();
        expenses.add(Expense::equal_split(
            "First",
            dec!(100),
            MemberName::new("A"),
            &group,
            date(),
            "Other",
        ));
        expenses.add(Expense::equal_split(
            "Second",
            dec!(100),
            MemberName::new("B"),
            &group,
            date(),
            "Other",
        ));

        let sheet = BalanceEngine::compute(&[group], &expenses);
        let balances = sheet.group(&GroupId::new("g1")).unwrap();
        assert_eq!(balances.balance(&MemberName::new("A")), Decimal::ZERO);
        assert_eq!(balances.balance(&MemberName::new("B")), Decimal::ZERO);
    }

    #[test]
    fn test_orphaned_expense_skipped() {
        let group = abc_group();
        let ghost = Group::new(
            GroupId::new("ghost"),
            "Deleted",
            vec![MemberName::new("A")],
        );
        let mut expenses = ExpenseSet::new();
        expenses.add(Expense::equal_split(
            "Dinner",
            dec!(90),
            MemberName::new("A"),
            &group,
            date(),
            "Food",
        ));
        // Logged against a group that is absent from the snapshot.
        expenses.add(Expense::equal_split(
            "Stale",
            dec!(50),
            MemberName::new("A"),
            &ghost,
            date(),
            "Other",
        ));

        let sheet = BalanceEngine::compute(&[group], &expenses);
        assert_eq!(sheet.len(), 1);
        let balances = sheet.group(&GroupId::new("g1")).unwrap();
        assert_eq!(balances.balance(&MemberName::new("A")), dec!(60));
    }

    #[test]
    fn test_group_without_expenses_is_all_zero() {
        let active = abc_group();
        let idle = Group::new(
            GroupId::new("g2"),
            "Quiet",
            vec![MemberName::new("X"), MemberName::new("Y")],
        );
        let mut expenses = ExpenseSet::new();
        expenses.add(Expense::equal_split(
            "Dinner",
            dec!(90),
            MemberName::new("A"),
            &active,
            date(),
            "Food",
        ));

        let sheet = BalanceEngine::compute(&[active, idle], &expenses);
        let balances = sheet.group(&GroupId::new("g2")).unwrap();
        assert_eq!(balances.len(), 2);
        assert_eq!(balances.total(), Decimal::ZERO);
    }

    #[test]
    fn test_order_independence() {
        let group = abc_group();
        let a = Expense::equal_split(
            "Dinner",
            dec!(90),
            MemberName::new("A"),
            &group,
            date(),
            "Food",
        );
        let b = Expense::equal_split(
            "Taxi",
            dec!(45),
            MemberName::new("B"),
            &group,
            date(),
            "Transportation",
        );

        let forward: ExpenseSet = vec![a.clone(), b.clone()].into_iter().collect();
        let reversed: ExpenseSet = vec![b, a].into_iter().collect();

        let first = BalanceEngine::compute(std::slice::from_ref(&group), &forward);
        let second = BalanceEngine::compute(std::slice::from_ref(&group), &reversed);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_inputs() {
        let sheet = BalanceEngine::compute(&[], &ExpenseSet::new());
        assert!(sheet.is_empty());
        assert!(sheet.is_balanced());
    }

    #[test]
    fn test_fractional_share_stays_within_tolerance() {
        let group = abc_group();
        let mut expenses = ExpenseSet::new();
        // 100 split three ways leaves division residue.
        expenses.add(Expense::equal_split(
            "Groceries",
            dec!(100),
            MemberName::new("A"),
            &group,
            date(),
            "Food",
        ));

        let sheet = BalanceEngine::compute(&[group], &expenses);
        assert!(sheet.group(&GroupId::new("g1")).unwrap().is_balanced());
    }
}
