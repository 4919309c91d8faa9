// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of caex-links and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

/// Closed interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range<T> {
    min: T,
    max: T,
}

impl<T: PartialOrd + Copy> Range<T> {
    /// Builds the interval spanned by `a` and `b`, in either order.
    pub fn new(a: T, b: T) -> Self {
        if b < a {
            Self { min: b, max: a }
        } else {
            Self { min: a, max: b }
        }
    }

    pub fn min(&self) -> T {
        self.min
    }

    pub fn max(&self) -> T {
        self.max
    }

    pub fn contains_value(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn contains_range(&self, other: &Self) -> bool {
        self.contains_value(other.min) && self.contains_value(other.max)
    }

    /// True when the open interiors of both ranges intersect; touching at a bound does not count.
    pub fn intersects(&self, other: &Self) -> bool {
        self.min < other.max && self.max > other.min
    }

    /// Strict partial overlap.
    ///
    /// The interiors must intersect and neither range may contain the other: `[0, 10]` and
    /// `[5, 15]` overlap, `[0, 10]` and `[2, 8]` do not, and neither do `[0, 10]` and `[10, 20]`.
    pub fn is_overlapped(&self, other: &Self) -> bool {
        self.intersects(other) && !self.contains_range(other) && !other.contains_range(self)
    }
}
