// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of caex-links and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;

use super::VertexIndex;
use crate::model::{NodeKey, TreeHost};

/// A tree row taking part in at least one internal link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vertex {
    node: NodeKey,
    index: VertexIndex,
    neighbors: BTreeSet<VertexIndex>,
    visited: bool,
    visible: bool,
}

impl Vertex {
    pub(crate) fn new(node: NodeKey, index: VertexIndex) -> Self {
        Self { node, index, neighbors: BTreeSet::new(), visited: false, visible: false }
    }

    pub fn node(&self) -> NodeKey {
        self.node
    }

    pub fn index(&self) -> VertexIndex {
        self.index
    }

    pub fn neighbors(&self) -> impl Iterator<Item = VertexIndex> + '_ {
        self.neighbors.iter().copied()
    }

    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }

    pub fn has_links(&self) -> bool {
        !self.neighbors.is_empty()
    }

    /// Whether the row is realized in the tree. Asked of the host once per pass.
    pub fn is_visible(&mut self, host: &dyn TreeHost) -> bool {
        if !self.visited {
            self.visible = host.is_visible(self.node);
            self.visited = true;
        }
        self.visible
    }

    /// The row that stands in for this vertex on screen: the row itself when visible, otherwise
    /// the nearest visible ancestor. `None` when no ancestor is visible either.
    pub fn effective_node(&mut self, host: &dyn TreeHost) -> Option<NodeKey> {
        if self.is_visible(host) {
            return Some(self.node);
        }
        let mut cursor = host.parent(self.node);
        while let Some(parent) = cursor {
            if host.is_visible(parent) {
                return Some(parent);
            }
            cursor = host.parent(parent);
        }
        None
    }

    pub(crate) fn reset(&mut self) {
        self.visited = false;
        self.visible = false;
    }

    pub(crate) fn set_node(&mut self, node: NodeKey) {
        self.node = node;
        self.reset();
    }

    pub(crate) fn link(&mut self, other: VertexIndex) -> bool {
        self.neighbors.insert(other)
    }

    pub(crate) fn unlink(&mut self, other: VertexIndex) -> bool {
        self.neighbors.remove(&other)
    }

    pub(crate) fn neighbor_snapshot(&self) -> Vec<VertexIndex> {
        self.neighbors.iter().copied().collect()
    }
}
