//! # Lifecycle Actions
//!
//! The four decisions an actor can take on a resource.

use serde::{Deserialize, Serialize};

/// A lifecycle decision on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LifecycleAction {
    /// User declares a pending resource unused and requests its deletion.
    ApproveForDeletion,
    /// User keeps a pending resource; requires a RITM number.
    RejectForDeletion,
    /// Administrator confirms a requested deletion.
    #[serde(rename = "confirm-delete")]
    ConfirmDeletion,
    /// Administrator refuses a requested deletion.
    #[serde(rename = "reject-delete")]
    RejectDeletion,
}

impl LifecycleAction {
    /// Every action.
    pub const ALL: [LifecycleAction; 4] = [
        Self::ApproveForDeletion,
        Self::RejectForDeletion,
        Self::ConfirmDeletion,
        Self::RejectDeletion,
    ];

    /// Whether the action needs a RITM number as input.
    pub fn requires_ritm(&self) -> bool {
        matches!(self, Self::RejectForDeletion)
    }

    /// The kebab-case name of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApproveForDeletion => "approve-for-deletion",
            Self::RejectForDeletion => "reject-for-deletion",
            Self::ConfirmDeletion => "confirm-delete",
            Self::RejectDeletion => "reject-delete",
        }
    }
}

impl std::fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_as_str() {
        for action in LifecycleAction::ALL {
            let json = serde_json::to_string(&action).unwrap();
            assert_eq!(json, format!("\"{}\"", action.as_str()));
        }
    }

    #[test]
    fn only_keeping_requires_ritm() {
        let needing: Vec<_> = LifecycleAction::ALL
            .into_iter()
            .filter(|a| a.requires_ritm())
            .collect();
        assert_eq!(needing, vec![LifecycleAction::RejectForDeletion]);
    }
}
