use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque group identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Group state as supplied by the external group-formation collaborator for
/// one assignment.
///
/// Read exactly once at authorization time; the engine never mutates or
/// caches it. Absence of a `GroupState` for a group-type assignment means the
/// actor is not in any group for that assignment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupState {
    pub id: GroupId,
    pub name: String,
    /// Member names in join order.
    pub members: Vec<String>,
    pub leader_id: String,
    pub is_leader_for_current_actor: bool,
}

impl GroupState {
    /// Collapse the leadership flag into a tagged membership variant, so the
    /// engine's authorization branch is an exhaustive match instead of a pair
    /// of boolean checks.
    pub fn membership(&self) -> GroupMembership {
        if self.is_leader_for_current_actor {
            GroupMembership::Leader
        } else {
            GroupMembership::Member {
                leader_id: self.leader_id.clone(),
            }
        }
    }
}

/// The current actor's standing within a resolved group.
///
/// "Not in any group" is represented by the absence of a [`GroupState`]
/// (`Option::None` at the resolver seam), not by a variant here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GroupMembership {
    /// A member who must wait for the named leader to acknowledge.
    Member { leader_id: String },
    /// The leader, authorized to acknowledge for the whole group.
    Leader,
}
