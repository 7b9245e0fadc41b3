//! Signup value types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::SignupId;

/// Eligibility attributes carried by a signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupAttributes {
    /// Class/role tag, e.g. `"tank"`.
    pub class_tag: String,
    /// Sponsor flag.
    #[serde(default)]
    pub sponsor: bool,
}

impl SignupAttributes {
    /// Attributes of a regular (non-sponsor) signup.
    pub fn member(class_tag: impl Into<String>) -> Self {
        Self {
            class_tag: class_tag.into(),
            sponsor: false,
        }
    }

    /// Attributes of a sponsor signup.
    pub fn sponsor(class_tag: impl Into<String>) -> Self {
        Self {
            class_tag: class_tag.into(),
            sponsor: true,
        }
    }
}

/// Creation order of a signup. Ties on the timestamp fall back to the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ArrivalKey {
    /// When the signup was persisted.
    pub created_at: DateTime<Utc>,
    /// Store-assigned sequence (the signup id).
    pub sequence: i64,
}

/// An active signup as seen by the allocation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signup {
    /// Signup id.
    pub id: SignupId,
    /// Eligibility attributes.
    pub attributes: SignupAttributes,
    /// Arrival key.
    pub arrival: ArrivalKey,
    /// Name shown by the API/bot layer.
    #[serde(default)]
    pub display_name: Option<String>,
}

/// A signup about to be recorded by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSignup {
    /// Eligibility attributes.
    pub attributes: SignupAttributes,
    /// Name shown by the API/bot layer.
    #[serde(default)]
    pub display_name: Option<String>,
}
