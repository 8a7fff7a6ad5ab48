//! Participant identities and the member records they resolve to.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Opaque participant identifier (typically a trip member id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A trip member as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: ParticipantId,
    pub name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    /// First day of this member's stay (local trip date).
    #[serde(default)]
    pub stay_start: Option<NaiveDate>,
    /// Last day of this member's stay (local trip date).
    #[serde(default)]
    pub stay_end: Option<NaiveDate>,
}

/// Display-ready identity attached to a schedule item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantRef {
    pub id: ParticipantId,
    pub name: String,
    pub avatar_url: Option<String>,
    pub color: Option<String>,
}

impl From<&Member> for ParticipantRef {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id.clone(),
            name: member.name.clone(),
            avatar_url: member.avatar_url.clone(),
            color: member.color.clone(),
        }
    }
}

/// Resolve ids to display refs in the order given, dropping ids with no member.
pub(crate) fn resolve(ids: &[ParticipantId], members: &[Member]) -> Vec<ParticipantRef> {
    ids.iter()
        .filter_map(|id| match members.iter().find(|m| &m.id == id) {
            Some(member) => Some(ParticipantRef::from(member)),
            None => {
                tracing::debug!(participant = %id, "dropping unknown participant");
                None
            }
        })
        .collect()
}
