// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of caex-links and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// Tolerance for every approximate comparison in this module.
pub const EPSILON: f64 = 1e-10;

pub fn is_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

/// A point or direction in tree-view coordinates (x to the right, y downwards).
///
/// Equality is approximate: two vectors compare equal when both coordinate differences are below
/// [`EPSILON`]. Crossing suppression relies on this to recognise segments that share an endpoint.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// 2D cross product `x1*y2 - y1*x2`.
    pub fn cross(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn with_x(self, x: f64) -> Self {
        Self { x, y: self.y }
    }

    pub fn with_y(self, y: f64) -> Self {
        Self { x: self.x, y }
    }
}

impl PartialEq for Vector2D {
    fn eq(&self, other: &Self) -> bool {
        is_zero(self.x - other.x) && is_zero(self.y - other.y)
    }
}

impl Add for Vector2D {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2D {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2D {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// Dot product.
impl Mul for Vector2D {
    type Output = f64;

    fn mul(self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y
    }
}

/// Axis-aligned rectangle, used for row header bounds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Midpoint of the right edge; link lines leave a row header here.
    pub fn right_center(&self) -> Vector2D {
        Vector2D::new(self.right(), self.center_y())
    }
}

#[cfg(test)]
mod tests {
    use super::{Rect, Vector2D};

    #[test]
    fn equality_tolerates_rounding_noise() {
        let a = Vector2D::new(0.1 + 0.2, 1.0);
        let b = Vector2D::new(0.3, 1.0);
        assert_eq!(a, b);
        assert_ne!(a, Vector2D::new(0.3, 1.0 + 1e-6));
    }

    #[test]
    fn products() {
        let a = Vector2D::new(2.0, 3.0);
        let b = Vector2D::new(4.0, -1.0);
        assert_eq!(a * b, 5.0);
        assert_eq!(a.cross(b), -14.0);
        assert_eq!(a * 2.0, Vector2D::new(4.0, 6.0));
        assert_eq!(b - a, Vector2D::new(2.0, -4.0));
    }

    #[test]
    fn rect_anchor_is_right_edge_midpoint() {
        let rect = Rect::new(10.0, 20.0, 30.0, 16.0);
        assert_eq!(rect.right_center(), Vector2D::new(40.0, 28.0));
        assert_eq!(rect.bottom(), 36.0);
    }
}
