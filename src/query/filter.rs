use crate::core::expense::{Expense, ExpenseSet};
use crate::core::group::GroupId;
use crate::core::member::MemberName;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Display-side filter over an expense list.
///
/// All criteria are optional and combine with AND; an empty filter
/// matches every expense. Filtering is a presentation concern applied
/// before or after balance computation, never inside it: the engine
/// always sees the full expense set.
///
/// # Examples
///
/// ```
/// use split_engine::core::group::GroupId;
/// use split_engine::query::filter::ExpenseFilter;
///
/// let filter = ExpenseFilter::new()
///     .with_group(GroupId::new("g1"))
///     .with_category("Food")
///     .with_search_term("groceries");
/// assert!(!filter.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseFilter {
    group_id: Option<GroupId>,
    /// Inclusive lower bound on the expense date.
    start_date: Option<NaiveDate>,
    /// Inclusive upper bound on the expense date.
    end_date: Option<NaiveDate>,
    category: Option<String>,
    paid_by: Option<MemberName>,
    /// Case-insensitive needle matched against description, payer, and
    /// category.
    search_term: Option<String>,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group(mut self, group_id: GroupId) -> Self {
        self.group_id = Some(group_id);
        self
    }

    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn with_end_date(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_paid_by(mut self, member: MemberName) -> Self {
        self.paid_by = Some(member);
        self
    }

    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.group_id.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.category.is_none()
            && self.paid_by.is_none()
            && self.search_term.is_none()
    }

    /// Does this expense pass every set criterion?
    pub fn matches(&self, expense: &Expense) -> bool {
        if let Some(group_id) = &self.group_id {
            if expense.group_id() != group_id {
                return false;
            }
        }
        if let Some(start) = self.start_date {
            if expense.date() < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if expense.date() > end {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if expense.category() != category.as_str() {
                return false;
            }
        }
        if let Some(paid_by) = &self.paid_by {
            if expense.paid_by() != paid_by {
                return false;
            }
        }
        if let Some(term) = &self.search_term {
            let needle = term.to_lowercase();
            let haystack = format!(
                "{} {} {}",
                expense.description(),
                expense.paid_by(),
                expense.category()
            )
            .to_lowercase();
            if !haystack.contains(&needle) {
                return false;
            }
        }
        true
    }

    /// The matching expenses, in their original order.
    pub fn apply<'a>(&self, expenses: &'a ExpenseSet) -> Vec<&'a Expense> {
        expenses
            .expenses()
            .iter()
            .filter(|e| self.matches(e))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::group::Group;
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
        let mut set = ExpenseSet::new();
        set.add(Expense::equal_split(
            "Groceries",
            dec!(89.75),
            MemberName::new("John"),
            &group,
            NaiveDate::from_ymd_opt(2023, 11, 15).unwrap(),
            "Food",
        ));
        set.add(Expense::equal_split(
            "Electricity Bill",
            dec!(142.30),
            MemberName::new("Sara"),
            &group,
            NaiveDate::from_ymd_opt(2023, 11, 18).unwrap(),
            "Utilities",
        ));
        (group, set)
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let (_, set) = fixture();
        let filter = ExpenseFilter::new();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&set).len(), 2);
    }

    #[test]
    fn test_category_filter() {
        let (_, set) = fixture();
        let filter = ExpenseFilter::new().with_category("Food");
        let matched = filter.apply(&set);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].description(), "Groceries");
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let (_, set) = fixture();
        let filter = ExpenseFilter::new()
            .with_start_date(NaiveDate::from_ymd_opt(2023, 11, 15).unwrap())
            .with_end_date(NaiveDate::from_ymd_opt(2023, 11, 15).unwrap());
        let matched = filter.apply(&set);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].description(), "Groceries");
    }

    #[test]
    fn test_paid_by_filter() {
        let (_, set) = fixture();
        let filter = ExpenseFilter::new().with_paid_by(MemberName::new("Sara"));
        let matched = filter.apply(&set);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].description(), "Electricity Bill");
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let (_, set) = fixture();
        let filter = ExpenseFilter::new().with_search_term("GROCER");
        assert_eq!(filter.apply(&set).len(), 1);

        // Payer names are searchable too.
        let filter = ExpenseFilter::new().with_search_term("sara");
        assert_eq!(filter.apply(&set).len(), 1);
    }

    #[test]
    fn test_combined_criteria() {
        let (_, set) = fixture();
        let filter = ExpenseFilter::new()
            .with_group(GroupId::new("g1"))
            .with_category("Food")
            .with_paid_by(MemberName::new("Sara"));
        assert!(filter.apply(&set).is_empty());
    }

    #[test]
    fn test_group_filter() {
        let (_, set) = fixture();
        let filter = ExpenseFilter::new().with_group(GroupId::new("g2"));
        assert!(filter.apply(&set).is_empty());
    }
}
