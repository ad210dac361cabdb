//! Variation identity: server-assigned vs locally staged.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::id::VariationId;

/// Identity of a variation in the editing workflow.
///
/// A variation staged locally (typically before its parent product exists
/// remotely) carries a `Local` identity. Once the server has assigned it a
/// numeric id it carries a `Remote` identity. Code that branches on "is this
/// saved yet?" pattern-matches on this enum instead of sniffing id formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum VariationIdentity {
    /// Server-assigned numeric id.
    Remote(VariationId),
    /// Locally generated id for a staged variation.
    Local(Uuid),
}

impl VariationIdentity {
    /// Generate a fresh local identity for a newly staged variation.
    #[must_use]
    pub fn local() -> Self {
        Self::Local(Uuid::new_v4())
    }

    /// True if the variation exists on the server.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }

    /// The remote id, if the server has assigned one.
    #[must_use]
    pub const fn remote_id(&self) -> Option<VariationId> {
        match self {
            Self::Remote(id) => Some(*id),
            Self::Local(_) => None,
        }
    }
}

impl From<VariationId> for VariationIdentity {
    fn from(id: VariationId) -> Self {
        Self::Remote(id)
    }
}

impl std::fmt::Display for VariationIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remote(id) => write!(f, "{id}"),
            Self::Local(uuid) => write!(f, "{uuid}"),
        }
    }
}
