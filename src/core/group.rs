use crate::core::member::MemberName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an expense group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    /// Create a new group identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation of this group ID.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for GroupId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A group of members who share expenses.
///
/// The member list is ordered and distinct. Member order matters: it is
/// the tie-breaking order used when settlement plans sort members with
/// equal balances, so two runs over the same group always agree.
///
/// # Examples
///
/// ```
/// use split_engine::core::group::{Group, GroupId};
/// use split_engine::core::member::MemberName;
///
/// let group = Group::new(
///     GroupId::new("g1"),
///     "Roommates",
///     vec![
///         MemberName::new("John"),
///         MemberName::new("Sara"),
///         MemberName::new("Miguel"),
///     ],
/// )
/// .with_description("Apartment expenses");
///
/// assert_eq!(group.member_count(), 3);
/// assert!(group.is_member(&MemberName::new("Sara")));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Unique identifier for this group.
    id: GroupId,
    /// Display name.
    name: String,
    /// Optional free-form description.
    description: Option<String>,
    /// Ordered, distinct member names. Never empty.
    members: Vec<MemberName>,
}

impl Group {
    /// Create a new group.
    ///
    /// Duplicate member names are dropped, keeping the first occurrence,
    /// so the stored list is distinct while preserving its order.
    ///
    /// # Panics
    ///
    /// Panics if `members` is empty after de-duplication.
    pub fn new(id: GroupId, name: impl Into<String>, members: Vec<MemberName>) -> Self {
        let mut distinct: Vec<MemberName> = Vec::with_capacity(members.len());
        for member in members {
            if !distinct.contains(&member) {
                distinct.push(member);
            }
        }
        assert!(
            !distinct.is_empty(),
            "a group needs at least one member"
        );
        Self {
            id,
            name: name.into(),
            description: None,
            members: distinct,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    // --- Accessors ---

    pub fn id(&self) -> &GroupId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The member list, in its declared order.
    pub fn members(&self) -> &[MemberName] {
        &self.members
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_member(&self, member: &MemberName) -> bool {
        self.members.contains(member)
    }
}
