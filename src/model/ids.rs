// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of caex-links and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// `ID` attribute of a CAEX element, usually a GUID such as `{6e5c-41}`.
///
/// The format is not enforced beyond being non-empty and free of whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ElementId(SmolStr);

impl ElementId {
    pub fn new(value: impl AsRef<str>) -> Result<Self, IdError> {
        let value = value.as_ref();
        if value.is_empty() {
            return Err(IdError::Empty);
        }
        if value.chars().any(char::is_whitespace) {
            return Err(IdError::ContainsWhitespace(value.to_owned()));
        }
        Ok(Self(SmolStr::new(value)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ElementId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ElementId> for String {
    fn from(id: ElementId) -> Self {
        id.0.into()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    #[error("element id must not be empty")]
    Empty,
    #[error("element id {0:?} contains whitespace")]
    ContainsWhitespace(String),
}

/// Handle for one row of the hosting tree view.
///
/// Handles are opaque to the routing engine; a host may hand out a new handle for the same
/// document position (for example after undo), see [`TreeHost::canonical`](super::TreeHost::canonical).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeKey(pub u64);

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{ElementId, IdError, NodeKey};

    #[test]
    fn element_id_rejects_empty_and_whitespace() {
        assert_eq!(ElementId::new(""), Err(IdError::Empty));
        assert_eq!(ElementId::new("a b"), Err(IdError::ContainsWhitespace("a b".to_owned())));
    }

    #[test]
    fn element_id_deserializes_through_validation() {
        let id: ElementId = serde_json::from_str(r#""{6e5c-41}""#).expect("id");
        assert_eq!(id.as_str(), "{6e5c-41}");
        assert_eq!(serde_json::to_string(&id).expect("json"), r#""{6e5c-41}""#);
        assert!(serde_json::from_str::<ElementId>(r#""""#).is_err());
        let spaced = serde_json::from_str::<ElementId>(r#""6e5c 41""#).expect_err("whitespace");
        assert!(spaced.to_string().contains("contains whitespace"));
    }

    #[test]
    fn node_key_displays_with_hash() {
        assert_eq!(NodeKey(12).to_string(), "#12");
    }
}
