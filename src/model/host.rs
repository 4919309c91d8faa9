// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of caex-links and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::geometry::Rect;

use super::ids::NodeKey;

/// Why a row's header position could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    #[error("node {0} has no realized header")]
    Unrealized(NodeKey),
    #[error("node {0} has not been measured yet")]
    NotMeasured(NodeKey),
    #[error("node {0} is unknown to the tree")]
    UnknownNode(NodeKey),
}

/// The tree view that hosts the link lines.
///
/// The routing engine only reads through this trait. Coordinates are in the tree view's own space
/// with y growing downwards and the top of the viewport at `y = 0`.
pub trait TreeHost {
    fn roots(&self) -> Vec<NodeKey>;

    fn parent(&self, node: NodeKey) -> Option<NodeKey>;

    fn children(&self, node: NodeKey) -> Vec<NodeKey>;

    /// False once the node has been removed from the document.
    fn is_attached(&self, node: NodeKey) -> bool;

    /// The handle currently representing `node`'s document position.
    ///
    /// Returns a different handle when the host rebuilt the row (undo/redo), `None` when the
    /// position no longer exists.
    fn canonical(&self, node: NodeKey) -> Option<NodeKey> {
        self.is_attached(node).then_some(node)
    }

    fn is_expanded(&self, node: NodeKey) -> bool;

    /// A row is visible when every ancestor is expanded.
    fn is_visible(&self, node: NodeKey) -> bool {
        if !self.is_attached(node) {
            return false;
        }
        let mut cursor = self.parent(node);
        while let Some(parent) = cursor {
            if !self.is_expanded(parent) {
                return false;
            }
            cursor = self.parent(parent);
        }
        true
    }

    /// A visible row that intersects the viewport.
    fn is_on_screen(&self, node: NodeKey) -> bool;

    fn header_bounds(&self, node: NodeKey) -> Result<Rect, TransformError>;

    /// Whichever of `a` and `b` comes first in document order.
    fn first_node(&self, a: NodeKey, b: NodeKey) -> NodeKey;

    fn viewport_height(&self) -> f64;
}
