// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of caex-links and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Link graph over tree rows.
//!
//! One vertex per row that takes part in an internal link, one edge per link. Edges live in a
//! sparse map keyed by the unordered vertex pair, so `(a, b)` and `(b, a)` always resolve to the
//! same [`Edge`]. Vertex indices come from a monotonic counter and are never reused, which keeps
//! iteration order (and therefore layout) stable across insertions and removals.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::Serialize;
use smol_str::SmolStr;

use crate::config::{ClassFilter, LinkLayoutOptions};
use crate::geometry::Range;
use crate::model::{NodeKey, SceneLink};
use crate::render::ColorCache;

mod edge;
mod pass;
mod vertex;

pub use edge::{Edge, EdgeKey};
pub use vertex::Vertex;

pub type VertexIndex = usize;

/// Raised when a row gains its first link or loses its last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LinksChanged {
    pub node: NodeKey,
    pub has_links: bool,
}

#[derive(Debug)]
pub struct Graph {
    vertices: BTreeMap<VertexIndex, Vertex>,
    by_node: HashMap<NodeKey, VertexIndex>,
    edges: BTreeMap<EdgeKey, Edge>,
    next_index: VertexIndex,
    // Rebuilt by every pass.
    ranges: BTreeMap<EdgeKey, Range<f64>>,
    max_width: f64,
    notifications: Vec<LinksChanged>,
    options: LinkLayoutOptions,
    class_filter: Option<ClassFilter>,
    colors: Arc<ColorCache>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    /// A graph using the process-wide colour cache.
    pub fn new() -> Self {
        Self::with_color_cache(ColorCache::global())
    }

    pub fn with_color_cache(colors: Arc<ColorCache>) -> Self {
        Self {
            vertices: BTreeMap::new(),
            by_node: HashMap::new(),
            edges: BTreeMap::new(),
            next_index: 0,
            ranges: BTreeMap::new(),
            max_width: 0.0,
            notifications: Vec::new(),
            options: LinkLayoutOptions::default(),
            class_filter: None,
            colors,
        }
    }

    pub fn options(&self) -> &LinkLayoutOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: LinkLayoutOptions) {
        self.options = options;
    }

    pub fn set_class_filter(&mut self, filter: Option<ClassFilter>) {
        self.class_filter = filter;
    }

    pub fn color_cache(&self) -> &Arc<ColorCache> {
        &self.colors
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.vertices.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.values()
    }

    pub fn vertex(&self, index: VertexIndex) -> Option<&Vertex> {
        self.vertices.get(&index)
    }

    pub fn vertex_for(&self, node: NodeKey) -> Option<&Vertex> {
        self.by_node.get(&node).and_then(|index| self.vertices.get(index))
    }

    pub fn edge(&self, a: VertexIndex, b: VertexIndex) -> Option<&Edge> {
        self.edges.get(&EdgeKey::new(a, b))
    }

    pub fn edge_by_key(&self, key: EdgeKey) -> Option<&Edge> {
        self.edges.get(&key)
    }

    pub fn edge_between(&self, a: NodeKey, b: NodeKey) -> Option<&Edge> {
        let a = *self.by_node.get(&a)?;
        let b = *self.by_node.get(&b)?;
        self.edge(a, b)
    }

    /// Vertical ranges of the edges routed by the last pass.
    pub fn ranges(&self) -> &BTreeMap<EdgeKey, Range<f64>> {
        &self.ranges
    }

    /// Widest header seen by the last pass, before the rail offset.
    pub fn max_width(&self) -> f64 {
        self.max_width
    }

    /// Returns the vertex for `node`, creating it on first reference.
    pub fn add_vertex(&mut self, node: NodeKey) -> VertexIndex {
        if let Some(index) = self.by_node.get(&node) {
            return *index;
        }
        let index = self.next_index;
        self.next_index += 1;
        self.vertices.insert(index, Vertex::new(node, index));
        self.by_node.insert(node, index);
        index
    }

    pub fn add_edge(&mut self, a: VertexIndex, b: VertexIndex) -> bool {
        self.add_edge_with(a, b, None)
    }

    /// Links two vertices. Returns `false`, changing nothing, when the pair is already linked, an
    /// index is unknown, or both indices are the same.
    pub fn add_edge_with(
        &mut self,
        a: VertexIndex,
        b: VertexIndex,
        class_path: Option<SmolStr>,
    ) -> bool {
        let key = EdgeKey::new(a, b);
        if a == b
            || self.edges.contains_key(&key)
            || !self.vertices.contains_key(&a)
            || !self.vertices.contains_key(&b)
        {
            return false;
        }

        self.edges.insert(key, Edge::new(a, b, class_path));
        for (index, other) in [(a, b), (b, a)] {
            if let Some(vertex) = self.vertices.get_mut(&index) {
                vertex.link(other);
                if vertex.degree() == 1 {
                    let node = vertex.node();
                    self.notifications.push(LinksChanged { node, has_links: true });
                }
            }
        }
        true
    }

    /// Links two rows, creating their vertices on first reference.
    pub fn add_link(&mut self, a: NodeKey, b: NodeKey, class_path: Option<SmolStr>) -> bool {
        if a == b {
            return false;
        }
        let a = self.add_vertex(a);
        let b = self.add_vertex(b);
        self.add_edge_with(a, b, class_path)
    }

    /// Adds every scene link, returning how many were new.
    pub fn add_scene_links<'a>(&mut self, links: impl IntoIterator<Item = &'a SceneLink>) -> usize {
        links
            .into_iter()
            .filter(|link| self.add_link(link.a, link.b, link.class_path.clone()))
            .count()
    }

    /// Unlinks two vertices. Each endpoint whose last link this was raises [`LinksChanged`].
    pub fn remove_edge(&mut self, a: VertexIndex, b: VertexIndex) -> bool {
        let key = EdgeKey::new(a, b);
        if self.edges.remove(&key).is_none() {
            return false;
        }
        self.ranges.remove(&key);
        for (index, other) in [(a, b), (b, a)] {
            if let Some(vertex) = self.vertices.get_mut(&index) {
                vertex.unlink(other);
                if !vertex.has_links() {
                    let node = vertex.node();
                    self.notifications.push(LinksChanged { node, has_links: false });
                }
            }
        }
        true
    }

    pub fn remove_link(&mut self, a: NodeKey, b: NodeKey) -> bool {
        match (self.by_node.get(&a).copied(), self.by_node.get(&b).copied()) {
            (Some(a), Some(b)) => self.remove_edge(a, b),
            _ => false,
        }
    }

    /// Removes the vertex bound to `node` together with all of its edges. Other vertices keep
    /// their indices.
    pub fn remove_vertex(&mut self, node: NodeKey) -> bool {
        let Some(index) = self.by_node.get(&node).copied() else {
            return false;
        };
        self.remove_vertex_at(index);
        true
    }

    pub(crate) fn remove_vertex_at(&mut self, index: VertexIndex) {
        let neighbors =
            self.vertices.get(&index).map(Vertex::neighbor_snapshot).unwrap_or_default();
        for other in neighbors {
            self.remove_edge(index, other);
        }
        if let Some(vertex) = self.vertices.remove(&index) {
            self.by_node.remove(&vertex.node());
        }
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.by_node.clear();
        self.edges.clear();
        self.ranges.clear();
        self.max_width = 0.0;
    }

    /// Drains the pending [`LinksChanged`] notifications, oldest first.
    pub fn take_notifications(&mut self) -> Vec<LinksChanged> {
        std::mem::take(&mut self.notifications)
    }
}
