// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of caex-links and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashSet;

use crate::geometry::Vector2D;
use crate::model::{NodeKey, TreeHost};

/// Where a link leaves `node`'s header: the midpoint of its right edge.
///
/// A header that cannot be transformed anchors at the origin instead of failing the pass.
pub fn anchor_point(host: &dyn TreeHost, node: NodeKey) -> Vector2D {
    match host.header_bounds(node) {
        Ok(bounds) => bounds.right_center(),
        Err(error) => {
            tracing::debug!(%node, %error, "header transform failed, anchoring at origin");
            Vector2D::default()
        }
    }
}

pub fn lowest_common_ancestor(host: &dyn TreeHost, a: NodeKey, b: NodeKey) -> Option<NodeKey> {
    let mut ancestors = HashSet::new();
    let mut cursor = Some(a);
    while let Some(node) = cursor {
        ancestors.insert(node);
        cursor = host.parent(node);
    }

    let mut cursor = Some(b);
    while let Some(node) = cursor {
        if ancestors.contains(&node) {
            return Some(node);
        }
        cursor = host.parent(node);
    }
    None
}

/// Visible rows from `from` to `to`, both inclusive, in display order.
///
/// `from` must not come after `to`. A missing bound extends the walk to the first or last visible
/// row. With both bounds the walk starts at their lowest common ancestor, so only the subtrees
/// between the two rows are visited.
pub fn rows_between(
    host: &dyn TreeHost,
    from: Option<NodeKey>,
    to: Option<NodeKey>,
) -> Vec<NodeKey> {
    let scope = match (from, to) {
        (Some(a), Some(b)) => match lowest_common_ancestor(host, a, b) {
            Some(ancestor) => vec![ancestor],
            None => host.roots(),
        },
        _ => host.roots(),
    };

    let mut rows = Vec::new();
    let mut collecting = from.is_none();
    let mut stack = scope.into_iter().rev().collect::<Vec<_>>();
    while let Some(node) = stack.pop() {
        if Some(node) == from {
            collecting = true;
        }
        if collecting {
            rows.push(node);
            if Some(node) == to {
                break;
            }
        }
        if host.is_expanded(node) {
            stack.extend(host.children(node).into_iter().rev());
        }
    }
    rows
}

/// Right edge of the widest header among the visible rows between `from` and `to`.
///
/// With `clip` only rows inside the viewport count. Rows whose header cannot be measured are
/// skipped.
pub fn calculate_max_width(
    host: &dyn TreeHost,
    from: Option<NodeKey>,
    to: Option<NodeKey>,
    clip: bool,
) -> f64 {
    rows_between(host, from, to)
        .into_iter()
        .filter(|node| !clip || host.is_on_screen(*node))
        .filter_map(|node| match host.header_bounds(node) {
            Ok(bounds) => Some(bounds.right()),
            Err(error) => {
                tracing::debug!(%node, %error, "skipping unmeasured row");
                None
            }
        })
        .fold(0.0, f64::max)
}

/// Orthogonal route between two anchors through a vertical rail at `rail_x`.
///
/// Point 0 is always the upper anchor. `inset` pulls both anchors towards each other, never past
/// their midpoint. Returns the points and the vertical length.
pub fn staple(a: Vector2D, b: Vector2D, rail_x: f64, inset: f64) -> ([Vector2D; 4], f64) {
    let (mut upper, mut lower) = if a.y <= b.y { (a, b) } else { (b, a) };
    let inset = inset.min((lower.y - upper.y) / 2.0).max(0.0);
    upper.y += inset;
    lower.y -= inset;
    ([upper, upper.with_x(rail_x), lower.with_x(rail_x), lower], lower.y - upper.y)
}
