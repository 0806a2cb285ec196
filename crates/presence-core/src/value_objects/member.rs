//! Member - opaque identifier of a tracked client or session

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PresenceError, PresenceResult};

/// Non-empty identifier of one client/session in a presence set
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Member(String);

impl Member {
    /// Create a member, rejecting empty identifiers
    pub fn new(id: impl Into<String>) -> PresenceResult<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(PresenceError::InvalidArgument(
                "member identifier must not be empty".to_string(),
            ));
        }
        Ok(Self(id))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Member {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Member {
    type Error = PresenceError;

    fn try_from(id: String) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl TryFrom<&str> for Member {
    type Error = PresenceError;

    fn try_from(id: &str) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<Member> for String {
    fn from(member: Member) -> Self {
        member.0
    }
}

impl std::str::FromStr for Member {
    type Err = PresenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
