use serde::{Deserialize, Serialize};
use std::fmt;

/// A group member, identified by display name.
///
/// There is no separate identity system: two values carrying the same
/// display string refer to the same member. Callers that need identities
/// that survive renames must substitute stable ids of their own before
/// handing data to the engine.
///
/// # Examples
///
/// ```
/// use split_engine::core::member::MemberName;
///
/// let john = MemberName::new("John");
/// let sara = MemberName::new("Sara");
/// assert_ne!(john, sara);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberName(String);

impl MemberName {
    /// Create a new member name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the string representation of this member name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MemberName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
