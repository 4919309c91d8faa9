// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of caex-links and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::vector::{is_zero, Vector2D};

/// Outcome of [`line_segments_intersect`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentIntersection {
    None,
    Point(Vector2D),
    /// The segments lie on one line and share at least one point. Only reported when the caller
    /// asks for collinear overlap; there is no single intersection point in that case.
    CollinearOverlap,
}

impl SegmentIntersection {
    pub fn intersects(&self) -> bool {
        !matches!(self, Self::None)
    }

    pub fn point(&self) -> Option<Vector2D> {
        match self {
            Self::Point(point) => Some(*point),
            _ => None,
        }
    }
}

/// Parametric intersection test of segment `p..p2` against `q..q2`.
///
/// With `r = p2 - p` and `s = q2 - q` the segments meet where `p + t*r == q + u*s` for
/// `t, u` in `[0, 1]`.
pub fn line_segments_intersect(
    p: Vector2D,
    p2: Vector2D,
    q: Vector2D,
    q2: Vector2D,
    consider_collinear_overlap: bool,
) -> SegmentIntersection {
    let r = p2 - p;
    let s = q2 - q;
    let rxs = r.cross(s);
    let qpxr = (q - p).cross(r);

    if is_zero(rxs) && is_zero(qpxr) {
        if consider_collinear_overlap {
            let qp_r = (q - p) * r;
            let pq_s = (p - q) * s;
            if (0.0..=r * r).contains(&qp_r) || (0.0..=s * s).contains(&pq_s) {
                return SegmentIntersection::CollinearOverlap;
            }
        }
        return SegmentIntersection::None;
    }

    // Parallel, never meeting.
    if is_zero(rxs) && !is_zero(qpxr) {
        return SegmentIntersection::None;
    }

    let t = (q - p).cross(s) / rxs;
    let u = (q - p).cross(r) / rxs;

    // `rxs` cannot be zero here; the guard is kept so the branch reads as a complete predicate.
    if is_zero(rxs) || !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
        return SegmentIntersection::None;
    }

    SegmentIntersection::Point(p + r * t)
}
