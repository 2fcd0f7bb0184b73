use crate::core::currency::CurrencyCode;
use crate::core::group::{Group, GroupId};
use crate::core::member::MemberName;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How an expense is divided among the members of its group.
///
/// Only equal division is implemented. The enum is the extension point
/// for future strategies (percentage shares, exact amounts): a new
/// variant must come with its own share computation at expense-creation
/// time, because the balance engine trusts the stored per-person share
/// and never recomputes it.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitType {
    /// The amount is divided evenly across all current group members.
    #[default]
    Equal,
}

/// A shared expense paid by one member on behalf of a group.
///
/// Expenses are immutable once created. The balance engine operates on
/// collections of expenses to compute each member's net position.
///
/// The per-person share is derived when the expense is created, from the
/// member count of the owning group at that moment. Later membership
/// changes do not rewrite history: the stored share is what the engine
/// applies.
///
/// # Examples
///
/// ```
/// use split_engine::core::expense::Expense;
/// use split_engine::core::group::{Group, GroupId};
/// use split_engine::core::member::MemberName;
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let group = Group::new(
///     GroupId::new("g1"),
///     "Roommates",
///     vec![MemberName::new("John"), MemberName::new("Sara"), MemberName::new("Miguel")],
/// );
/// let expense = Expense::equal_split(
///     "Groceries",
///     dec!(89.75),
///     MemberName::new("John"),
///     &group,
///     NaiveDate::from_ymd_opt(2023, 11, 15).unwrap(),
///     "Food",
/// );
///
/// assert_eq!(expense.amount(), dec!(89.75));
/// let reconstructed = expense.per_person_amount() * dec!(3);
/// assert!((reconstructed - expense.amount()).abs() < dec!(0.000001));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier for this expense.
    id: Uuid,
    /// What the money was spent on.
    description: String,
    /// The full amount paid. Must be positive.
    amount: Decimal,
    /// Display tag only; arithmetic assumes one implicit unit.
    currency: CurrencyCode,
    /// The member who fronted the payment.
    paid_by: MemberName,
    /// The group this expense belongs to.
    group_id: GroupId,
    /// When the expense happened.
    date: NaiveDate,
    /// Category label for filtering and reporting.
    category: String,
    /// Division strategy used to derive the per-person share.
    split: SplitType,
    /// Share owed by each member, derived at creation time.
    per_person_amount: Decimal,
}

impl Expense {
    /// Create an equally split expense for `group`.
    ///
    /// The per-person share is `amount / member count`, using the
    /// group's membership at this moment.
    ///
    /// # Panics
    ///
    /// Panics if `amount` is not positive.
    pub fn equal_split(
        description: impl Into<String>,
        amount: Decimal,
        paid_by: MemberName,
        group: &Group,
        date: NaiveDate,
        category: impl Into<String>,
    ) -> Self {
        assert!(
            amount > Decimal::ZERO,
            "expense amount must be positive, got {}",
            amount
        );
        let per_person_amount = amount / Decimal::from(group.member_count() as u64);
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            amount,
            currency: CurrencyCode::default(),
            paid_by,
            group_id: group.id().clone(),
            date,
            category: category.into(),
            split: SplitType::Equal,
            per_person_amount,
        }
    }

    /// Create an expense with an explicit id and stored share.
    ///
    /// Useful for deterministic tests and for callers that carry their
    /// own pre-computed shares. The share is stored as given; keeping
    /// `per_person_amount * member_count` equal to `amount` is the
    /// caller's responsibility.
    ///
    /// # Panics
    ///
    /// Panics if `amount` is not positive.
    #[allow(clippy::too_many_arguments)]
    pub fn with_parts(
        id: Uuid,
        description: impl Into<String>,
        amount: Decimal,
        paid_by: MemberName,
        group_id: GroupId,
        date: NaiveDate,
        category: impl Into<String>,
        per_person_amount: Decimal,
    ) -> Self {
        assert!(amount > Decimal::ZERO);
        Self {
            id,
            description: description.into(),
            amount,
            currency: CurrencyCode::default(),
            paid_by,
            group_id,
            date,
            category: category.into(),
            split: SplitType::Equal,
            per_person_amount,
        }
    }

    /// Set the currency tag.
    pub fn with_currency(mut self, currency: CurrencyCode) -> Self {
        self.currency = currency;
        self
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    pub fn paid_by(&self) -> &MemberName {
        &self.paid_by
    }

    pub fn group_id(&self) -> &GroupId {
        &self.group_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn split(&self) -> SplitType {
        self.split
    }

    pub fn per_person_amount(&self) -> Decimal {
        self.per_person_amount
    }
}

/// A collection of expenses that can be handed to the balance engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSet {
    expenses: Vec<Expense>,
}

impl ExpenseSet {
    pub fn new() -> Self {
        Self {
            expenses: Vec::new(),
        }
    }

    pub fn add(&mut self, expense: Expense) {
        self.expenses.push(expense);
    }

    /// Remove an expense by id, returning it if present.
    pub fn remove(&mut self, id: Uuid) -> Option<Expense> {
        let index = self.expenses.iter().position(|e| e.id() == id)?;
        Some(self.expenses.remove(index))
    }

    /// Keep only the expenses matching the predicate.
    pub fn retain<F: FnMut(&Expense) -> bool>(&mut self, f: F) {
        self.expenses.retain(f);
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Total amount across all expenses.
    pub fn gross_total(&self) -> Decimal {
        self.expenses.iter().map(|e| e.amount()).sum()
    }

    /// The expenses logged against one group, in insertion order.
    pub fn for_group<'a>(&'a self, group_id: &'a GroupId) -> impl Iterator<Item = &'a Expense> {
        self.expenses.iter().filter(move |e| e.group_id() == group_id)
    }

    /// All unique category labels in this set.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self
            .expenses
            .iter()
            .map(|e| e.category().to_string())
            .collect();
        categories.sort();
        categories.dedup();
        categories
    }
}

impl FromIterator<Expense> for ExpenseSet {
    fn from_iter<T: IntoIterator<Item = Expense>>(iter: T) -> Self {
        Self {
            expenses: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_group() -> Group {
        Group::new(
            GroupId::new("g1"),
            "Roommates",
            vec![
                MemberName::new("John"),
                MemberName::new("Sara"),
                MemberName::new("Miguel"),
            ],
        )
    }

    fn sample_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 11, 15).unwrap()
    }

    #[test]
    fn test_equal_split_share() {
        let group = sample_group();
        let expense = Expense::equal_split(
            "Electricity Bill",
            dec!(142.30),
            MemberName::new("Sara"),
            &group,
            sample_date(),
            "Utilities",
        );
        assert_eq!(expense.group_id().as_str(), "g1");
        assert_eq!(expense.split(), SplitType::Equal);
        // Share times member count reconstructs the amount.
        let reconstructed = expense.per_person_amount() * dec!(3);
        assert!((reconstructed - dec!(142.30)).abs() < dec!(0.000001));
    }

    #[test]
    #[should_panic(expected = "must be positive")]
    fn test_zero_amount() {
        let group = sample_group();
        Expense::equal_split(
            "Nothing",
            Decimal::ZERO,
            MemberName::new("John"),
            &group,
            sample_date(),
            "Other",
        );
    }

    #[test]
    #[should_panic(expected = "must be positive")]
    fn test_negative_amount() {
        let group = sample_group();
        Expense::equal_split(
            "Refund",
            dec!(-10),
            MemberName::new("John"),
            &group,
            sample_date(),
            "Other",
        );
    }

    #[test]
    fn test_expense_set_totals() {
        let group = sample_group();
        let mut set = ExpenseSet::new();
        set.add(Expense::equal_split(
            "Groceries",
            dec!(89.75),
            MemberName::new("John"),
            &group,
            sample_date(),
            "Food",
        ));
        set.add(Expense::equal_split(
            "Electricity Bill",
            dec!(142.30),
            MemberName::new("Sara"),
            &group,
            sample_date(),
            "Utilities",
        ));
        assert_eq!(set.len(), 2);
        assert_eq!(set.gross_total(), dec!(232.05));
        assert_eq!(set.categories(), vec!["Food", "Utilities"]);
    }

    #[test]
    fn test_expense_set_remove() {
        let group = sample_group();
        let mut set = ExpenseSet::new();
        let expense = Expense::equal_split(
            "Groceries",
            dec!(30),
            MemberName::new("John"),
            &group,
            sample_date(),
            "Food",
        );
        let id = expense.id();
        set.add(expense);

        assert!(set.remove(id).is_some());
        assert!(set.remove(id).is_none());
        assert!(set.is_empty());
    }

    #[test]
    fn test_for_group_filters() {
        let roommates = sample_group();
        let trip = Group::new(
            GroupId::new("g2"),
            "Trip to Paris",
            vec![MemberName::new("John"), MemberName::new("Lisa")],
        );
        let mut set = ExpenseSet::new();
        set.add(Expense::equal_split(
            "Groceries",
            dec!(30),
            MemberName::new("John"),
            &roommates,
            sample_date(),
            "Food",
        ));
        set.add(Expense::equal_split(
            "Hotel Room",
            dec!(850),
            MemberName::new("Lisa"),
            &trip,
            sample_date(),
            "Accommodation",
        ));

        let g2 = GroupId::new("g2");
        let trip_expenses: Vec<_> = set.for_group(&g2).collect();
        assert_eq!(trip_expenses.len(), 1);
        assert_eq!(trip_expenses[0].description(), "Hotel Room");
    }
}
