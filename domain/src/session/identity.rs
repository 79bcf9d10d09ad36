//! Identity variants

use serde::{Deserialize, Serialize};

/// Who the current session belongs to.
///
/// A signed-out state is the absence of a session, not a variant here.
/// Guest identities are synthesized locally and never persisted remotely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Identity {
    /// An account backed by the identity provider.
    Authenticated {
        uid: String,
        email: String,
        display_name: String,
    },
    /// A local-only guest identity.
    Guest { uid: String, display_name: String },
}

impl Identity {
    /// Create a guest identity with a locally unique uid.
    pub fn guest(uid: impl Into<String>) -> Self {
        Self::Guest {
            uid: uid.into(),
            display_name: "Guest User".to_string(),
        }
    }

    pub fn uid(&self) -> &str {
        match self {
            Self::Authenticated { uid, .. } | Self::Guest { uid, .. } => uid,
        }
    }

    /// Name shown on the display surface.
    ///
    /// Authenticated accounts without a display name fall back to the
    /// local part of their email address.
    pub fn display_name(&self) -> &str {
        match self {
            Self::Authenticated {
                display_name,
                email,
                ..
            } => {
                if display_name.is_empty() {
                    email.split('@').next().unwrap_or(email)
                } else {
                    display_name
                }
            }
            Self::Guest { display_name, .. } => display_name,
        }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, Self::Guest { .. })
    }
}
