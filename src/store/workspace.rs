use crate::balance::engine::BalanceEngine;
use crate::balance::sheet::BalanceSheet;
use crate::core::expense::{Expense, ExpenseSet};
use crate::core::group::{Group, GroupId};
use crate::core::member::MemberName;
use crate::settlement::plan::SettlementPlan;
use crate::settlement::planner::SettlementPlanner;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Errors from workspace mutations.
///
/// Validation lives here, at the creation layer. The balance engine and
/// settlement planner assume their inputs already passed these checks
/// and do not re-validate.
#[derive(Debug, Error, PartialEq)]
pub enum WorkspaceError {
    #[error("group name is required")]
    EmptyGroupName,
    #[error("a group needs at least one member")]
    NoMembers,
    #[error("no group with id {0}")]
    UnknownGroup(GroupId),
    #[error("a group with id {0} already exists")]
    DuplicateGroup(GroupId),
    #[error("{payer} is not a member of group {group_id}")]
    PayerNotInGroup {
        payer: MemberName,
        group_id: GroupId,
    },
    #[error("expense amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),
    #[error("expense description is required")]
    EmptyDescription,
    #[error("no expense with id {0}")]
    UnknownExpense(Uuid),
}

/// In-memory session state: the groups and expenses the engines compute
/// over.
///
/// The workspace is the mutation serialization point the engines rely
/// on. Balances and settlement plans are recomputed from scratch on
/// every read; nothing here caches a derivation, so a read after a
/// mutation always reflects it.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    groups: Vec<Group>,
    expenses: ExpenseSet,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Snapshot access ---

    /// The groups, in creation order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn expenses(&self) -> &ExpenseSet {
        &self.expenses
    }

    pub fn group(&self, id: &GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| g.id() == id)
    }

    // --- Group mutations ---

    /// Add a group after validating name and members.
    ///
    /// Blank member names are discarded and duplicates collapse to their
    /// first occurrence, so "John, , John, Sara" becomes "John, Sara".
    pub fn add_group(
        &mut self,
        id: GroupId,
        name: &str,
        description: Option<&str>,
        members: Vec<MemberName>,
    ) -> Result<(), WorkspaceError> {
        if self.group(&id).is_some() {
            return Err(WorkspaceError::DuplicateGroup(id));
        }
        let group = Self::build_group(id, name, description, members)?;
        log::info!("created group {} ({})", group.name(), group.id());
        self.groups.push(group);
        Ok(())
    }

    /// Replace a group's name, description, and member list.
    ///
    /// Expenses already logged keep their stored shares; membership
    /// changes only affect expenses created afterwards.
    pub fn update_group(
        &mut self,
        id: &GroupId,
        name: &str,
        description: Option<&str>,
        members: Vec<MemberName>,
    ) -> Result<(), WorkspaceError> {
        let index = self
            .groups
            .iter()
            .position(|g| g.id() == id)
            .ok_or_else(|| WorkspaceError::UnknownGroup(id.clone()))?;
        let group = Self::build_group(id.clone(), name, description, members)?;
        self.groups[index] = group;
        Ok(())
    }

    /// Remove a group and every expense logged against it.
    pub fn remove_group(&mut self, id: &GroupId) -> Result<(), WorkspaceError> {
        let index = self
            .groups
            .iter()
            .position(|g| g.id() == id)
            .ok_or_else(|| WorkspaceError::UnknownGroup(id.clone()))?;
        self.groups.remove(index);
        let before = self.expenses.len();
        self.expenses.retain(|e| e.group_id() != id);
        log::info!(
            "removed group {} and {} associated expenses",
            id,
            before - self.expenses.len()
        );
        Ok(())
    }

    fn build_group(
        id: GroupId,
        name: &str,
        description: Option<&str>,
        members: Vec<MemberName>,
    ) -> Result<Group, WorkspaceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(WorkspaceError::EmptyGroupName);
        }
        let members: Vec<MemberName> = members
            .into_iter()
            .filter(|m| !m.as_str().trim().is_empty())
            .collect();
        if members.is_empty() {
            return Err(WorkspaceError::NoMembers);
        }
        let mut group = Group::new(id, name, members);
        if let Some(description) = description {
            group = group.with_description(description);
        }
        Ok(group)
    }

    // --- Expense mutations ---

    /// Log an equally split expense against a group, returning its id.
    pub fn add_expense(
        &mut self,
        group_id: &GroupId,
        description: &str,
        amount: Decimal,
        paid_by: MemberName,
        date: NaiveDate,
        category: &str,
    ) -> Result<Uuid, WorkspaceError> {
        let group = self
            .group(group_id)
            .ok_or_else(|| WorkspaceError::UnknownGroup(group_id.clone()))?;
        if description.trim().is_empty() {
            return Err(WorkspaceError::EmptyDescription);
        }
        if amount <= Decimal::ZERO {
            return Err(WorkspaceError::NonPositiveAmount(amount));
        }
        if !group.is_member(&paid_by) {
            return Err(WorkspaceError::PayerNotInGroup {
                payer: paid_by,
                group_id: group_id.clone(),
            });
        }

        let expense = Expense::equal_split(
            description.trim(),
            amount,
            paid_by,
            group,
            date,
            category,
        );
        let id = expense.id();
        self.expenses.add(expense);
        Ok(id)
    }

    pub fn remove_expense(&mut self, id: Uuid) -> Result<(), WorkspaceError> {
        self.expenses
            .remove(id)
            .map(|_| ())
            .ok_or(WorkspaceError::UnknownExpense(id))
    }

    // --- Derivations, recomputed on every call ---

    /// Net balances for the current snapshot.
    pub fn balances(&self) -> BalanceSheet {
        BalanceEngine::compute(&self.groups, &self.expenses)
    }

    /// Settlement plan for one group's current balances.
    pub fn settlement_plan(&self, group_id: &GroupId) -> Result<SettlementPlan, WorkspaceError> {
        let sheet = self.balances();
        let balances = sheet
            .group(group_id)
            .ok_or_else(|| WorkspaceError::UnknownGroup(group_id.clone()))?;
        Ok(SettlementPlanner::plan(balances))
    }
}
