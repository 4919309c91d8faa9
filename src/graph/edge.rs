// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of caex-links and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde::Serialize;
use smol_str::SmolStr;

use super::VertexIndex;
use crate::geometry::{Range, Vector2D};
use crate::render::Pen;

/// Unordered pair of vertex indices; `(a, b)` and `(b, a)` name the same edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EdgeKey {
    lo: VertexIndex,
    hi: VertexIndex,
}

impl EdgeKey {
    pub fn new(a: VertexIndex, b: VertexIndex) -> Self {
        Self { lo: a.min(b), hi: a.max(b) }
    }

    pub fn lo(&self) -> VertexIndex {
        self.lo
    }

    pub fn hi(&self) -> VertexIndex {
        self.hi
    }

    /// The endpoint opposite `index`, if `index` is an endpoint at all.
    pub fn other(&self, index: VertexIndex) -> Option<VertexIndex> {
        if index == self.lo {
            Some(self.hi)
        } else if index == self.hi {
            Some(self.lo)
        } else {
            None
        }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.lo, self.hi)
    }
}

/// One internal link and its most recent route.
///
/// `points` is the orthogonal staple `[upper anchor, upper bend, lower bend, lower anchor]`; the two
/// bends share the rail x coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub(crate) start: VertexIndex,
    pub(crate) end: VertexIndex,
    pub(crate) points: [Vector2D; 4],
    pub(crate) pen: Pen,
    pub(crate) length: f64,
    pub(crate) range: Option<Range<f64>>,
    pub(crate) class_path: Option<SmolStr>,
    pub(crate) visited: bool,
}

impl Edge {
    pub(crate) fn new(start: VertexIndex, end: VertexIndex, class_path: Option<SmolStr>) -> Self {
        Self {
            start,
            end,
            points: [Vector2D::default(); 4],
            pen: Pen::default(),
            length: 0.0,
            range: None,
            class_path,
            visited: false,
        }
    }

    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.start, self.end)
    }

    pub fn start(&self) -> VertexIndex {
        self.start
    }

    pub fn end(&self) -> VertexIndex {
        self.end
    }

    pub fn points(&self) -> &[Vector2D; 4] {
        &self.points
    }

    pub fn pen(&self) -> &Pen {
        &self.pen
    }

    /// Vertical span of the route; used to order lane placement.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Vertical extent from the last pass, `None` when the edge was not routed.
    pub fn range(&self) -> Option<Range<f64>> {
        self.range
    }

    pub fn class_path(&self) -> Option<&str> {
        self.class_path.as_deref()
    }

    pub fn visited(&self) -> bool {
        self.visited
    }

    pub(crate) fn reset(&mut self) {
        self.visited = false;
        self.range = None;
    }
}
