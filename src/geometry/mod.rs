// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of caex-links and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Geometry primitives for link routing: points, header rectangles, segment intersection and
//! numeric ranges.

mod range;
mod segment;
mod vector;

pub use range::Range;
pub use segment::{line_segments_intersect, SegmentIntersection};
pub use vector::{is_zero, Rect, Vector2D, EPSILON};
