use crate::core::group::{Group, GroupId};
use crate::core::member::MemberName;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Tolerance for the zero-sum invariant check.
///
/// Equal-split shares carry division residue in their last digits, so a
/// group's balances sum to something vanishingly close to zero rather
/// than exactly zero.
pub const BALANCE_TOLERANCE: Decimal = dec!(0.000001);

/// Signed net balances for the members of one group.
///
/// A positive balance means the group owes the member (net creditor).
/// A negative balance means the member owes the group (net debtor).
///
/// Entries keep the group's member order. Settlement planning sorts with
/// stable sorts, so that order is what breaks ties between members with
/// equal amounts, and a given group always produces the same plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupBalances {
    #[serde(with = "entries_serde")]
    entries: Vec<(MemberName, Decimal)>,
}

mod entries_serde {
    use super::*;
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;

    pub fn serialize<S: serde::Serializer>(
        entries: &[(MemberName, Decimal)],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (member, amount) in entries {
            map.serialize_entry(member, amount)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<(MemberName, Decimal)>, D::Error> {
        struct V;
        impl<'de> Visitor<'de> for V {
            type Value = Vec<(MemberName, Decimal)>;
            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a map of member name to balance")
            }
            fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((member, amount)) = access.next_entry::<MemberName, Decimal>()? {
                    entries.push((member, amount));
                }
                Ok(entries)
            }
        }
        deserializer.deserialize_map(V)
    }
}

impl GroupBalances {
    /// Zero balance for every member of `group`, in member order.
    pub fn for_group(group: &Group) -> Self {
        Self {
            entries: group
                .members()
                .iter()
                .map(|m| (m.clone(), Decimal::ZERO))
                .collect(),
        }
    }

    /// Add `amount` to a member's balance. Unknown members are ignored;
    /// the creation layer guarantees payers belong to their group.
    pub fn credit(&mut self, member: &MemberName, amount: Decimal) {
        if let Some(entry) = self.entries.iter_mut().find(|(m, _)| m == member) {
            entry.1 += amount;
        }
    }

    /// Subtract `amount` from a member's balance.
    pub fn debit(&mut self, member: &MemberName, amount: Decimal) {
        self.credit(member, -amount);
    }

    /// The member's current balance, zero if the member is unknown.
    pub fn balance(&self, member: &MemberName) -> Decimal {
        self.entries
            .iter()
            .find(|(m, _)| m == member)
            .map(|(_, b)| *b)
            .unwrap_or(Decimal::ZERO)
    }

    /// Iterate over `(member, balance)` pairs in member order.
    pub fn iter(&self) -> impl Iterator<Item = (&MemberName, Decimal)> {
        self.entries.iter().map(|(m, b)| (m, *b))
    }

    /// The members covered by this balance map, in member order.
    pub fn members(&self) -> impl Iterator<Item = &MemberName> {
        self.entries.iter().map(|(m, _)| m)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all balances. Zero (within tolerance) for well-formed input.
    pub fn total(&self) -> Decimal {
        self.entries.iter().map(|(_, b)| *b).sum()
    }

    /// Verify the zero-sum invariant: every credit is someone's debit.
    pub fn is_balanced(&self) -> bool {
        self.total().abs() <= BALANCE_TOLERANCE
    }

    /// True when no member holds a meaningful balance.
    pub fn is_settled(&self, epsilon: Decimal) -> bool {
        self.entries.iter().all(|(_, b)| b.abs() < epsilon)
    }
}

/// Per-group balances derived from a snapshot of groups and expenses.
///
/// This is the output of the balance engine: one `GroupBalances` per
/// input group, including groups with no expenses (all zeros).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheet {
    groups: HashMap<GroupId, GroupBalances>,
}

impl BalanceSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, group_id: GroupId, balances: GroupBalances) {
        self.groups.insert(group_id, balances);
    }

    pub(crate) fn group_mut(&mut self, group_id: &GroupId) -> Option<&mut GroupBalances> {
        self.groups.get_mut(group_id)
    }

    /// The balances for one group, if the group was in the input.
    pub fn group(&self, group_id: &GroupId) -> Option<&GroupBalances> {
        self.groups.get(group_id)
    }

    /// All group ids with balances.
    pub fn group_ids(&self) -> impl Iterator<Item = &GroupId> {
        self.groups.keys()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Verify the zero-sum invariant across every group.
    pub fn is_balanced(&self) -> bool {
        self.groups.values().all(|g| g.is_balanced())
    }
}
