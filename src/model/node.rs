// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of caex-links and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::ids::ElementId;

/// The document facts a tree row is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaexElement {
    pub id: ElementId,
    #[serde(default)]
    pub name: Option<String>,
    /// Path of the referenced class, e.g. `AutomationMLInterfaceClassLib/AutomationMLBaseInterface`.
    #[serde(default)]
    pub class_path: Option<SmolStr>,
    #[serde(default)]
    pub role: Option<SmolStr>,
}

impl CaexElement {
    pub fn new(id: ElementId, name: impl Into<String>) -> Self {
        Self { id, name: Some(name.into()), class_path: None, role: None }
    }

    pub fn with_class(mut self, class_path: impl Into<SmolStr>) -> Self {
        self.class_path = Some(class_path.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<SmolStr>) -> Self {
        self.role = Some(role.into());
        self
    }
}

/// How a tree row presents its element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Base { name: String },
    WithClassRef { name: String, class_path: SmolStr },
    WithClassAndRoleRef { name: String, class_path: SmolStr, role: SmolStr },
    WithoutName { id: ElementId },
}

impl NodeKind {
    pub fn from_element(element: &CaexElement) -> Self {
        let Some(name) = element.name.as_ref().filter(|name| !name.is_empty()) else {
            return Self::WithoutName { id: element.id.clone() };
        };
        match (&element.class_path, &element.role) {
            (Some(class_path), Some(role)) => Self::WithClassAndRoleRef {
                name: name.clone(),
                class_path: class_path.clone(),
                role: role.clone(),
            },
            (Some(class_path), None) => {
                Self::WithClassRef { name: name.clone(), class_path: class_path.clone() }
            }
            _ => Self::Base { name: name.clone() },
        }
    }

    /// Re-reads the element after a document change. The variant follows the element, so a row
    /// that gains a class reference becomes `WithClassRef`.
    pub fn refresh(&mut self, element: &CaexElement) -> bool {
        let next = Self::from_element(element);
        if *self == next {
            return false;
        }
        *self = next;
        true
    }

    pub fn display_name(&self) -> String {
        match self {
            Self::Base { name } => name.clone(),
            Self::WithClassRef { name, class_path } => {
                format!("{name}: {}", class_leaf(class_path))
            }
            Self::WithClassAndRoleRef { name, class_path, role } => {
                format!("{name}: {} [{}]", class_leaf(class_path), class_leaf(role))
            }
            Self::WithoutName { id } => format!("{{{id}}}"),
        }
    }

    pub fn class_path(&self) -> Option<&str> {
        match self {
            Self::WithClassRef { class_path, .. }
            | Self::WithClassAndRoleRef { class_path, .. } => Some(class_path.as_str()),
            Self::Base { .. } | Self::WithoutName { .. } => None,
        }
    }
}

fn class_leaf(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::{CaexElement, NodeKind};
    use crate::model::ElementId;

    fn element(name: &str) -> CaexElement {
        CaexElement::new(ElementId::new("e1").unwrap(), name)
    }

    #[test]
    fn variant_follows_available_references() {
        assert_eq!(NodeKind::from_element(&element("Robot")).display_name(), "Robot");

        let with_class = element("Port").with_class("Lib/Interfaces/SignalInterface");
        let kind = NodeKind::from_element(&with_class);
        assert_eq!(kind.display_name(), "Port: SignalInterface");
        assert_eq!(kind.class_path(), Some("Lib/Interfaces/SignalInterface"));

        let with_role = with_class.with_role("RoleLib/Resource");
        assert_eq!(
            NodeKind::from_element(&with_role).display_name(),
            "Port: SignalInterface [Resource]"
        );
    }

    #[test]
    fn unnamed_elements_show_their_id() {
        let mut unnamed = element("");
        unnamed.name = None;
        assert_eq!(NodeKind::from_element(&unnamed).display_name(), "{e1}");
    }

    #[test]
    fn refresh_reports_changes_only() {
        let mut kind = NodeKind::from_element(&element("Robot"));
        assert!(!kind.refresh(&element("Robot")));
        assert!(kind.refresh(&element("Robot").with_class("Lib/Drive")));
        assert!(matches!(kind, NodeKind::WithClassRef { .. }));
    }
}
