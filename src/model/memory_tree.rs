// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of caex-links and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! In-memory tree host.
//!
//! `MemoryTree` models just enough of a tree view for the routing engine: rows laid out top to
//! bottom with a fixed height, indentation per depth, header widths derived from the display name,
//! a scrollable viewport, expand/collapse, detaching subtrees and re-identifying rows.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::host::{TransformError, TreeHost};
use super::ids::NodeKey;
use super::node::{CaexElement, NodeKind};
use crate::geometry::Rect;
use crate::graph::LinksChanged;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowMetrics {
    pub row_height: f64,
    pub indent: f64,
    pub char_width: f64,
    /// Horizontal padding on both sides of the header text.
    pub header_padding: f64,
    pub viewport_height: f64,
    pub scroll_offset: f64,
}

impl Default for RowMetrics {
    fn default() -> Self {
        Self {
            row_height: 20.0,
            indent: 16.0,
            char_width: 7.0,
            header_padding: 4.0,
            viewport_height: 400.0,
            scroll_offset: 0.0,
        }
    }
}

/// Serialized form of a tree plus the internal links between its rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeScene {
    #[serde(default)]
    pub metrics: RowMetrics,
    pub nodes: Vec<SceneNode>,
    #[serde(default)]
    pub links: Vec<SceneLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub key: NodeKey,
    #[serde(default)]
    pub parent: Option<NodeKey>,
    #[serde(default)]
    pub expanded: bool,
    pub element: CaexElement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneLink {
    pub a: NodeKey,
    pub b: NodeKey,
    #[serde(default)]
    pub class_path: Option<SmolStr>,
}

impl TreeScene {
    pub fn from_json_str(input: &str) -> Result<Self, TreeError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, TreeError> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path)
            .map_err(|source| TreeError::Io { path: path.to_path_buf(), source })?;
        Self::from_json_str(&input)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    #[error("node {0} is defined twice")]
    DuplicateNode(NodeKey),
    #[error("node {node} references unknown parent {parent}")]
    UnknownParent { node: NodeKey, parent: NodeKey },
    #[error("link references unknown node {0}")]
    UnknownLinkEndpoint(NodeKey),
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scene: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
struct TreeRow {
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
    expanded: bool,
    attached: bool,
    element: CaexElement,
    kind: NodeKind,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryTree {
    metrics: RowMetrics,
    nodes: BTreeMap<NodeKey, TreeRow>,
    roots: Vec<NodeKey>,
    replaced: BTreeMap<NodeKey, NodeKey>,
    unmeasured: BTreeSet<NodeKey>,
    badges: BTreeSet<NodeKey>,
    next_key: u64,
    // Derived by `relayout`.
    rows: BTreeMap<NodeKey, usize>,
    depths: BTreeMap<NodeKey, usize>,
    order: BTreeMap<NodeKey, usize>,
}

impl MemoryTree {
    pub fn new(metrics: RowMetrics) -> Self {
        Self { metrics, ..Self::default() }
    }

    /// Builds the tree part of a scene. Links are left to the caller's graph.
    pub fn from_scene(scene: &TreeScene) -> Result<Self, TreeError> {
        let mut tree = Self::new(scene.metrics);
        for node in &scene.nodes {
            if tree.nodes.contains_key(&node.key) {
                return Err(TreeError::DuplicateNode(node.key));
            }
            tree.nodes.insert(
                node.key,
                TreeRow {
                    parent: node.parent,
                    children: Vec::new(),
                    expanded: node.expanded,
                    attached: true,
                    kind: NodeKind::from_element(&node.element),
                    element: node.element.clone(),
                },
            );
            tree.next_key = tree.next_key.max(node.key.0 + 1);
        }
        for node in &scene.nodes {
            match node.parent {
                Some(parent) => {
                    let row = tree
                        .nodes
                        .get_mut(&parent)
                        .ok_or(TreeError::UnknownParent { node: node.key, parent })?;
                    row.children.push(node.key);
                }
                None => tree.roots.push(node.key),
            }
        }
        for link in &scene.links {
            for endpoint in [link.a, link.b] {
                if !tree.nodes.contains_key(&endpoint) {
                    return Err(TreeError::UnknownLinkEndpoint(endpoint));
                }
            }
        }
        tree.relayout();
        Ok(tree)
    }

    pub fn metrics(&self) -> &RowMetrics {
        &self.metrics
    }

    /// Appends a new row below `parent` (or as a root) and returns its handle.
    pub fn insert(
        &mut self,
        parent: Option<NodeKey>,
        element: CaexElement,
    ) -> Result<NodeKey, TreeError> {
        let key = NodeKey(self.next_key);
        match parent {
            Some(parent_key) => {
                let row = self
                    .nodes
                    .get_mut(&parent_key)
                    .ok_or(TreeError::UnknownParent { node: key, parent: parent_key })?;
                row.children.push(key);
            }
            None => self.roots.push(key),
        }
        self.next_key += 1;
        self.nodes.insert(
            key,
            TreeRow {
                parent,
                children: Vec::new(),
                expanded: false,
                attached: true,
                kind: NodeKind::from_element(&element),
                element,
            },
        );
        self.relayout();
        Ok(key)
    }

    pub fn set_expanded(&mut self, node: NodeKey, expanded: bool) -> bool {
        let Some(row) = self.nodes.get_mut(&node) else {
            return false;
        };
        row.expanded = expanded;
        self.relayout();
        true
    }

    pub fn expand_all(&mut self) {
        for row in self.nodes.values_mut() {
            row.expanded = true;
        }
        self.relayout();
    }

    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.metrics.scroll_offset = offset.max(0.0);
    }

    pub fn set_viewport_height(&mut self, height: f64) {
        self.metrics.viewport_height = height.max(0.0);
    }

    /// Removes `node` and its subtree from the document.
    pub fn detach(&mut self, node: NodeKey) -> bool {
        let Some(parent) = self.nodes.get(&node).filter(|row| row.attached).map(|row| row.parent)
        else {
            return false;
        };
        match parent {
            Some(parent) => {
                if let Some(row) = self.nodes.get_mut(&parent) {
                    row.children.retain(|child| *child != node);
                }
            }
            None => self.roots.retain(|root| *root != node),
        }

        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if let Some(row) = self.nodes.get_mut(&current) {
                row.attached = false;
                stack.extend(row.children.iter().copied());
            }
        }
        self.relayout();
        true
    }

    /// Replaces the handle of `node` with a fresh one at the same document position, the way a
    /// tree view rebuilds a row after undo. Returns the new handle.
    pub fn reidentify(&mut self, node: NodeKey) -> Option<NodeKey> {
        let old = self.nodes.get(&node).filter(|row| row.attached)?.clone();
        let key = NodeKey(self.next_key);
        self.next_key += 1;

        let siblings = match old.parent {
            Some(parent) => &mut self.nodes.get_mut(&parent)?.children,
            None => &mut self.roots,
        };
        for sibling in siblings.iter_mut() {
            if *sibling == node {
                *sibling = key;
            }
        }
        for child in &old.children {
            if let Some(row) = self.nodes.get_mut(child) {
                row.parent = Some(key);
            }
        }

        if let Some(row) = self.nodes.get_mut(&node) {
            row.attached = false;
            row.children.clear();
        }
        self.nodes.insert(key, old);
        self.replaced.insert(node, key);
        self.relayout();
        Some(key)
    }

    /// Makes `header_bounds` fail for `node`, like a row whose visual has not been measured.
    pub fn mark_unmeasured(&mut self, node: NodeKey) {
        self.unmeasured.insert(node);
    }

    pub fn refresh_element(&mut self, node: NodeKey, element: CaexElement) -> bool {
        let Some(row) = self.nodes.get_mut(&node) else {
            return false;
        };
        let changed = row.kind.refresh(&element);
        row.element = element;
        changed
    }

    pub fn element(&self, node: NodeKey) -> Option<&CaexElement> {
        self.nodes.get(&node).map(|row| &row.element)
    }

    pub fn display_name(&self, node: NodeKey) -> Option<String> {
        self.nodes.get(&node).map(|row| row.kind.display_name())
    }

    pub fn apply_links_changed(&mut self, changes: &[LinksChanged]) {
        for change in changes {
            if change.has_links {
                self.badges.insert(change.node);
            } else {
                self.badges.remove(&change.node);
            }
        }
    }

    pub fn has_link_badge(&self, node: NodeKey) -> bool {
        self.badges.contains(&node)
    }

    /// Visible rows in display order.
    pub fn visible_rows(&self) -> Vec<NodeKey> {
        let mut rows = self.rows.iter().map(|(key, row)| (*row, *key)).collect::<Vec<_>>();
        rows.sort_unstable();
        rows.into_iter().map(|(_, key)| key).collect()
    }

    fn relayout(&mut self) {
        self.rows.clear();
        self.depths.clear();
        self.order.clear();

        // (node, depth, shown)
        let mut stack = self.roots.iter().rev().map(|root| (*root, 0usize, true)).collect::<Vec<_>>();
        while let Some((node, depth, shown)) = stack.pop() {
            let Some(row) = self.nodes.get(&node) else {
                continue;
            };
            self.order.insert(node, self.order.len());
            self.depths.insert(node, depth);
            if shown {
                self.rows.insert(node, self.rows.len());
            }
            let children_shown = shown && row.expanded;
            for child in row.children.iter().rev() {
                stack.push((*child, depth + 1, children_shown));
            }
        }
    }

    fn header_width(&self, row: &TreeRow) -> f64 {
        let chars = row.kind.display_name().chars().count() as f64;
        chars * self.metrics.char_width + 2.0 * self.metrics.header_padding
    }
}

impl TreeHost for MemoryTree {
    fn roots(&self) -> Vec<NodeKey> {
        self.roots.clone()
    }

    fn parent(&self, node: NodeKey) -> Option<NodeKey> {
        self.nodes.get(&node).and_then(|row| row.parent)
    }

    fn children(&self, node: NodeKey) -> Vec<NodeKey> {
        self.nodes.get(&node).map(|row| row.children.clone()).unwrap_or_default()
    }

    fn is_attached(&self, node: NodeKey) -> bool {
        self.nodes.get(&node).is_some_and(|row| row.attached)
    }

    fn canonical(&self, node: NodeKey) -> Option<NodeKey> {
        let mut cursor = node;
        // Bounded so a cyclic replacement map cannot loop forever.
        for _ in 0..=self.replaced.len() {
            if self.is_attached(cursor) {
                return Some(cursor);
            }
            cursor = *self.replaced.get(&cursor)?;
        }
        None
    }

    fn is_expanded(&self, node: NodeKey) -> bool {
        self.nodes.get(&node).is_some_and(|row| row.expanded)
    }

    fn is_visible(&self, node: NodeKey) -> bool {
        self.rows.contains_key(&node)
    }

    fn is_on_screen(&self, node: NodeKey) -> bool {
        match self.header_bounds(node) {
            Ok(bounds) => bounds.bottom() > 0.0 && bounds.y < self.metrics.viewport_height,
            Err(TransformError::NotMeasured(_)) => self.rows.get(&node).is_some_and(|row| {
                let y = *row as f64 * self.metrics.row_height - self.metrics.scroll_offset;
                y + self.metrics.row_height > 0.0 && y < self.metrics.viewport_height
            }),
            Err(_) => false,
        }
    }

    fn header_bounds(&self, node: NodeKey) -> Result<Rect, TransformError> {
        let row = self.nodes.get(&node).ok_or(TransformError::UnknownNode(node))?;
        if self.unmeasured.contains(&node) {
            return Err(TransformError::NotMeasured(node));
        }
        let index = *self.rows.get(&node).ok_or(TransformError::Unrealized(node))?;
        let depth = self.depths.get(&node).copied().unwrap_or(0);
        Ok(Rect::new(
            depth as f64 * self.metrics.indent,
            index as f64 * self.metrics.row_height - self.metrics.scroll_offset,
            self.header_width(row),
            self.metrics.row_height,
        ))
    }

    fn first_node(&self, a: NodeKey, b: NodeKey) -> NodeKey {
        match (self.order.get(&a), self.order.get(&b)) {
            (Some(order_a), Some(order_b)) if order_b < order_a => b,
            (None, Some(_)) => b,
            _ => a,
        }
    }

    fn viewport_height(&self) -> f64 {
        self.metrics.viewport_height
    }
}
