//! Per-seat eligibility rules.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::signup::SignupAttributes;
use crate::error::AppError;

/// Eligibility predicate for one seat.
///
/// A sponsor is judged only by `allow_sponsor`; anyone else is accepted
/// iff their class tag is listed in `allowed_classes`. The default rule
/// (no classes, no sponsor) accepts no one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatRule {
    /// Whether sponsor signups may take this seat.
    #[serde(default)]
    pub allow_sponsor: bool,
    /// Class tags accepted for non-sponsor signups.
    #[serde(default)]
    pub allowed_classes: BTreeSet<String>,
}

impl SeatRule {
    /// A rule that accepts no one.
    pub fn reject_all() -> Self {
        Self::default()
    }

    /// A rule accepting the given class tags.
    pub fn classes<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allow_sponsor: false,
            allowed_classes: classes.into_iter().map(Into::into).collect(),
        }
    }

    /// A rule accepting sponsors only.
    pub fn sponsor() -> Self {
        Self {
            allow_sponsor: true,
            allowed_classes: BTreeSet::new(),
        }
    }

    /// Also accept sponsors.
    pub fn with_sponsor(mut self) -> Self {
        self.allow_sponsor = true;
        self
    }

    /// Whether a signup with these attributes may occupy the seat.
    pub fn accepts(&self, attributes: &SignupAttributes) -> bool {
        if attributes.sponsor {
            return self.allow_sponsor;
        }
        self.allowed_classes.contains(&attributes.class_tag)
    }

    /// Reject blank class tags.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.allowed_classes.iter().any(|c| c.trim().is_empty()) {
            return Err(AppError::invalid_argument(
                "Seat rule contains an empty class tag",
            ));
        }
        Ok(())
    }
}

/// Pad with reject-all rules or truncate so exactly `capacity` rules remain.
pub fn normalize_rules(mut rules: Vec<SeatRule>, capacity: usize) -> Vec<SeatRule> {
    rules.resize_with(capacity, SeatRule::reject_all);
    rules
}
