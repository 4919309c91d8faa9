// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of caex-links and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rayon::prelude::*;

use crate::geometry::Range;
use crate::graph::EdgeKey;

/// A routed edge waiting for a lane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingEdge {
    pub key: EdgeKey,
    pub range: Range<f64>,
    pub length: f64,
}

/// Whether `other` must be placed before `edge` can share its lane.
///
/// Partially overlapping spans conflict and the shorter link goes first (ties block both ways).
/// With `separate_nested` a span enclosing another also conflicts.
fn blocks(other: &PendingEdge, edge: &PendingEdge, separate_nested: bool) -> bool {
    let nested = separate_nested
        && other.range.intersects(&edge.range)
        && (other.range.contains_range(&edge.range) || edge.range.contains_range(&other.range));
    (other.range.is_overlapped(&edge.range) || nested) && other.length <= edge.length
}

/// Greedy lane assignment.
///
/// Each round takes every pending edge no remaining edge blocks, so lane 0 holds the shortest
/// links and longer ones move outward. When every edge is blocked the shortest one is placed on
/// its own. Keys keep their input order inside a lane.
pub fn assign_lanes(mut pending: Vec<PendingEdge>, separate_nested: bool) -> Vec<Vec<EdgeKey>> {
    let mut lanes = Vec::new();
    while !pending.is_empty() {
        let mut free = pending
            .par_iter()
            .enumerate()
            .map(|(index, edge)| {
                !pending.iter().enumerate().any(|(other_index, other)| {
                    other_index != index && blocks(other, edge, separate_nested)
                })
            })
            .collect::<Vec<_>>();

        if !free.contains(&true) {
            let shortest = pending
                .iter()
                .enumerate()
                .min_by(|(_, a), (_, b)| a.length.total_cmp(&b.length))
                .map(|(index, _)| index)
                .unwrap_or(0);
            free[shortest] = true;
        }

        let mut lane = Vec::new();
        let mut rest = Vec::with_capacity(pending.len());
        for (edge, free) in pending.into_iter().zip(free) {
            if free {
                lane.push(edge.key);
            } else {
                rest.push(edge);
            }
        }
        lanes.push(lane);
        pending = rest;
    }
    lanes
}
