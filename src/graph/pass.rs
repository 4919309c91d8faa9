// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of caex-links and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;

use super::{EdgeKey, Graph, LinksChanged, VertexIndex};
use crate::geometry::{Range, Vector2D};
use crate::layout::{anchor_point, assign_lanes, calculate_max_width, staple, PendingEdge};
use crate::model::{NodeKey, TreeHost};
use crate::render::{draw_segments, LinkDrawing, Pen, PlacedLink, Segment};

impl Graph {
    /// Routes every drawable link against the current state of `host` and places it on a lane.
    ///
    /// With `clip` only rows intersecting the viewport are considered, and links whose other end
    /// is scrolled away are drawn towards the nearest viewport edge.
    pub fn layout_pass(&mut self, host: &dyn TreeHost, clip: bool) -> LinkDrawing {
        self.calculate_visible_ranges(host, clip);
        self.draw()
    }

    /// First half of a pass: drops stale vertices, follows rebuilt rows, then computes each
    /// drawable edge's route and vertical range.
    pub fn calculate_visible_ranges(&mut self, host: &dyn TreeHost, clip: bool) {
        for vertex in self.vertices.values_mut() {
            vertex.reset();
        }
        for edge in self.edges.values_mut() {
            edge.reset();
        }
        self.ranges.clear();
        self.max_width = 0.0;

        self.sweep_stale(host);
        self.follow_rebuilt_rows(host);

        let order = self.vertices.keys().copied().collect::<Vec<_>>();
        let mut routed = Vec::new();
        for index in order {
            let Some(vertex) = self.vertices.get_mut(&index) else {
                continue;
            };
            let own_node = vertex.node();
            let shown = vertex.effective_node(host);
            if clip && !shown.is_some_and(|node| host.is_on_screen(node)) {
                continue;
            }

            for other in vertex.neighbor_snapshot() {
                let key = EdgeKey::new(index, other);
                match self.edges.get_mut(&key) {
                    Some(edge) if !edge.visited => edge.visited = true,
                    _ => continue,
                }

                if clip && shown != Some(own_node) {
                    let other_on_screen = self
                        .vertices
                        .get_mut(&other)
                        .and_then(|vertex| vertex.effective_node(host))
                        .is_some_and(|node| host.is_on_screen(node));
                    if !other_on_screen {
                        tracing::debug!(edge = %key, "collapsed end with off-screen partner");
                        continue;
                    }
                }

                let Some(width) = self.calculate_link_line(key, host, clip) else {
                    continue;
                };
                self.max_width = self.max_width.max(width);
                if let Some(edge) = self.edges.get_mut(&key) {
                    let range = Range::new(edge.points[0].y, edge.points[3].y);
                    edge.range = Some(range);
                    self.ranges.insert(key, range);
                    routed.push(key);
                }
            }
        }

        let rail = self.max_width + self.options.rail_offset;
        for key in routed {
            if let Some(edge) = self.edges.get_mut(&key) {
                edge.points[1].x = rail;
                edge.points[2].x = rail;
            }
        }
        tracing::debug!(
            routed = self.ranges.len(),
            max_width = self.max_width,
            "visible ranges calculated"
        );
    }

    /// Routes a single edge. Returns the rail x the route needs, or `None` when the edge is not
    /// drawable in the current view.
    pub(crate) fn calculate_link_line(
        &mut self,
        key: EdgeKey,
        host: &dyn TreeHost,
        clip: bool,
    ) -> Option<f64> {
        let edge = self.edges.get(&key)?;
        let (start, end) = (edge.start, edge.end);
        let class_path = edge.class_path.clone();
        if let Some(filter) = &self.class_filter {
            if !filter.allows(class_path.as_deref()) {
                tracing::debug!(edge = %key, "class filtered out");
                return None;
            }
        }

        let (start_node, start_shown) = self.shown_row(start, host, clip)?;
        let (end_node, end_shown) = self.shown_row(end, host, clip)?;
        let first = host.first_node(start_node, end_node);

        let (a, b, from, to) = match (start_shown, end_shown) {
            (Some(start_row), Some(end_row)) => {
                if start_row == end_row {
                    tracing::debug!(edge = %key, row = %start_row, "both ends share a row");
                    return None;
                }
                let (from, to) = if host.first_node(start_row, end_row) == start_row {
                    (start_row, end_row)
                } else {
                    (end_row, start_row)
                };
                (anchor_point(host, start_row), anchor_point(host, end_row), Some(from), Some(to))
            }
            (Some(row), None) | (None, Some(row)) => {
                let missing = if start_shown.is_some() { end_node } else { start_node };
                let anchor = anchor_point(host, row);
                let missing_above = missing == first;
                let synthetic = self.offscreen_anchor(host, missing_above, anchor.x);
                if missing_above {
                    (synthetic, anchor, None, Some(row))
                } else {
                    (anchor, synthetic, Some(row), None)
                }
            }
            (None, None) => return None,
        };

        let width = calculate_max_width(host, from, to, clip).max(a.x).max(b.x);
        let (points, length) = staple(a, b, width, self.options.anchor_inset);
        let pen = self.pen_for(class_path.as_deref());

        let edge = self.edges.get_mut(&key)?;
        edge.points = points;
        edge.length = length;
        edge.pen = pen;
        Some(width)
    }

    /// Second half of a pass: lanes, anchor staggering, and line crossings.
    ///
    /// Works on copies of the routed points, so drawing twice yields the same result.
    pub fn draw(&self) -> LinkDrawing {
        let pending = self
            .ranges
            .iter()
            .filter_map(|(key, range)| {
                let edge = self.edges.get(key)?;
                Some(PendingEdge { key: *key, range: *range, length: edge.length })
            })
            .collect::<Vec<_>>();
        let lanes = assign_lanes(pending, self.options.separate_nested_links);

        let mut anchor_uses = HashMap::<u64, usize>::new();
        let mut links = Vec::with_capacity(self.ranges.len());
        let mut verticals = Vec::with_capacity(self.ranges.len());
        let mut horizontals = Vec::with_capacity(self.ranges.len() * 2);
        for (lane, keys) in lanes.iter().enumerate() {
            tracing::trace!(lane, links = keys.len(), "placing lane");
            let x_offset = lane as f64 * self.options.lane_spacing;
            for key in keys {
                let Some(edge) = self.edges.get(key) else {
                    continue;
                };
                let (Some(start), Some(end)) =
                    (self.vertices.get(&edge.start), self.vertices.get(&edge.end))
                else {
                    continue;
                };
                let mut points = edge.points;
                let top = self.stagger(&mut anchor_uses, points[0].y);
                let bottom = self.stagger(&mut anchor_uses, points[3].y);
                points[0].y += top;
                points[1].y += top;
                points[2].y += bottom;
                points[3].y += bottom;
                points[1].x += x_offset;
                points[2].x += x_offset;

                horizontals.push(Segment::new(points[0], points[1], edge.pen));
                verticals.push(Segment::new(points[1], points[2], edge.pen));
                horizontals.push(Segment::new(points[3], points[2], edge.pen));
                links.push(PlacedLink {
                    key: *key,
                    start: start.node(),
                    end: end.node(),
                    lane,
                    points,
                });
            }
        }

        let commands = draw_segments(verticals, horizontals, &self.options);
        LinkDrawing { lanes, links, commands }
    }

    /// Drops vertices whose row left the document and vertices without links.
    fn sweep_stale(&mut self, host: &dyn TreeHost) {
        let stale = self
            .vertices
            .values()
            .filter(|vertex| !vertex.has_links() || host.canonical(vertex.node()).is_none())
            .map(|vertex| vertex.index())
            .collect::<Vec<_>>();
        for index in stale {
            tracing::debug!(vertex = index, "sweeping stale vertex");
            self.remove_vertex_at(index);
        }
    }

    /// Rebinds vertices whose row was rebuilt under a new handle.
    fn follow_rebuilt_rows(&mut self, host: &dyn TreeHost) {
        let moved = self
            .vertices
            .values()
            .filter_map(|vertex| {
                let node = host.canonical(vertex.node())?;
                (node != vertex.node()).then_some((vertex.index(), node))
            })
            .collect::<Vec<_>>();
        for (index, node) in moved {
            self.rebind(index, node);
        }
    }

    fn rebind(&mut self, index: VertexIndex, node: NodeKey) {
        match self.by_node.get(&node).copied() {
            Some(existing) if existing != index => {
                tracing::debug!(vertex = index, into = existing, %node, "merging rebuilt row");
                let links = self
                    .vertices
                    .get(&index)
                    .map(|vertex| vertex.neighbor_snapshot())
                    .unwrap_or_default()
                    .into_iter()
                    .map(|other| {
                        let class_path = self
                            .edges
                            .get(&EdgeKey::new(index, other))
                            .and_then(|edge| edge.class_path.clone());
                        (other, class_path)
                    })
                    .collect::<Vec<_>>();
                self.remove_vertex_at(index);
                for (other, class_path) in links {
                    self.add_edge_with(existing, other, class_path);
                }
            }
            _ => {
                let Some(vertex) = self.vertices.get_mut(&index) else {
                    return;
                };
                let previous = vertex.node();
                tracing::debug!(vertex = index, from = %previous, to = %node, "rekeying vertex");
                self.by_node.remove(&previous);
                vertex.set_node(node);
                self.by_node.insert(node, index);
                // The badge belongs to the row handle, so it moves with the vertex.
                if vertex.has_links() {
                    self.notifications.push(LinksChanged { node: previous, has_links: false });
                    self.notifications.push(LinksChanged { node, has_links: true });
                }
            }
        }
    }

    /// The vertex's row and, when drawable, the row standing in for it.
    fn shown_row(
        &mut self,
        index: VertexIndex,
        host: &dyn TreeHost,
        clip: bool,
    ) -> Option<(NodeKey, Option<NodeKey>)> {
        let vertex = self.vertices.get_mut(&index)?;
        let shown = vertex.effective_node(host).filter(|node| !clip || host.is_on_screen(*node));
        Some((vertex.node(), shown))
    }

    fn offscreen_anchor(&self, host: &dyn TreeHost, above: bool, x: f64) -> Vector2D {
        let y = if above { self.options.offscreen_top } else { host.viewport_height() };
        Vector2D::new(x, y)
    }

    fn pen_for(&self, class_path: Option<&str>) -> Pen {
        let color = if self.options.colored_lines {
            self.colors.color_for(class_path)
        } else {
            self.colors.default_color()
        };
        Pen { color, dashed: self.options.dashed_lines, thickness: self.options.line_thickness }
    }

    fn stagger(&self, uses: &mut HashMap<u64, usize>, y: f64) -> f64 {
        let count = uses.entry(y.to_bits()).or_insert(0);
        *count += 1;
        (*count - 1) as f64 * self.options.y_dedup_offset
    }
}
