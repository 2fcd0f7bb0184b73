use crate::balance::sheet::GroupBalances;
use crate::core::member::MemberName;
use crate::settlement::plan::{Settlement, SettlementPlan};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Residue below this threshold counts as settled.
///
/// One cent. Draining the debtor and creditor queues against this
/// threshold keeps division residue from looping forever.
pub const SETTLEMENT_EPSILON: Decimal = dec!(0.01);

/// The settlement planning engine.
///
/// Produces a short list of member-to-member payments that returns every
/// balance in a group to zero.
///
/// The matching strategy is greedy: always pair the largest outstanding
/// debt with the largest outstanding credit. That bounds the plan at
/// `non-zero members - 1` transfers but does not always reach the
/// theoretical minimum (exact minimization is a subset-matching search,
/// feasible for small groups). An exact solver can replace this one
/// behind the same input/output contract.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
/// use split_engine::prelude::*;
///
/// let group = Group::new(
///     GroupId::new("g1"),
///     "Trio",
///     vec![MemberName::new("A"), MemberName::new("B"), MemberName::new("C")],
/// );
/// let mut expenses = ExpenseSet::new();
/// expenses.add(Expense::equal_split(
///     "Dinner",
///     dec!(90),
///     MemberName::new("A"),
///     &group,
///     NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
///     "Food",
/// ));
///
/// let sheet = BalanceEngine::compute(std::slice::from_ref(&group), &expenses);
/// let balances = sheet.group(group.id()).unwrap();
/// let plan = SettlementPlanner::plan(balances);
///
/// assert_eq!(plan.transfer_count(), 2);
/// assert!(plan.settles(balances));
/// ```
pub struct SettlementPlanner;

impl SettlementPlanner {
    /// Plan settlements for one group's balances.
    ///
    /// # Algorithm
    ///
    /// 1. Partition members holding at least one cent into debtors
    ///    (owed amount stored positive) and creditors. Members at zero
    ///    produce nothing.
    /// 2. Sort both sides descending by amount. The sort is stable, so
    ///    equal amounts keep the group's member order and a given input
    ///    always yields the same plan.
    /// 3. Pair the largest debtor with the largest creditor, settle
    ///    `min(debt, credit)`, reduce both sides, and drop a side once
    ///    its remainder falls under [`SETTLEMENT_EPSILON`].
    ///
    /// Emitted amounts are rounded to two decimals, half away from zero.
    ///
    /// A balance map holding only debtors or only creditors yields an
    /// empty plan: no valid pairing exists. That input violates the
    /// zero-sum contract of the balance engine and is the caller's to
    /// guard against, not something the planner can repair.
    pub fn plan(balances: &GroupBalances) -> SettlementPlan {
        let mut debts: Vec<(MemberName, Decimal)> = Vec::new();
        let mut credits: Vec<(MemberName, Decimal)> = Vec::new();

        for (member, balance) in balances.iter() {
            if balance <= -SETTLEMENT_EPSILON {
                debts.push((member.clone(), -balance));
            } else if balance >= SETTLEMENT_EPSILON {
                credits.push((member.clone(), balance));
            }
        }

        debts.sort_by(|a, b| b.1.cmp(&a.1));
        credits.sort_by(|a, b| b.1.cmp(&a.1));

        let mut settlements = Vec::new();
        while !debts.is_empty() && !credits.is_empty() {
            let amount = debts[0].1.min(credits[0].1);

            settlements.push(Settlement {
                from: debts[0].0.clone(),
                to: credits[0].0.clone(),
                amount: amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            });

            debts[0].1 -= amount;
            credits[0].1 -= amount;

            if debts[0].1 < SETTLEMENT_EPSILON {
                debts.remove(0);
            }
            if credits[0].1 < SETTLEMENT_EPSILON {
                credits.remove(0);
            }
        }

        SettlementPlan::new(settlements)
    }
}
