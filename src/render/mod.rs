// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of caex-links and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Drawing output for link lines.
//!
//! The engine does not paint; it emits an ordered list of [`DrawCommand`]s that the host replays on
//! its own immediate-mode surface.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Vector2D;
use crate::graph::EdgeKey;
use crate::model::NodeKey;

pub mod palette;
mod segments;

pub use palette::{ColorCache, LinkPalette, PaletteError, PALETTE_ENV};
pub(crate) use segments::{draw_segments, Segment};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::rgb(0, 0, 0)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 0xFF {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pen {
    pub color: Rgba,
    pub dashed: bool,
    pub thickness: f64,
}

impl Default for Pen {
    fn default() -> Self {
        Self { color: Rgba::default(), dashed: false, thickness: 1.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Line { from: Vector2D, to: Vector2D, pen: Pen },
    /// Half circle from `from` to `to`, bulging upwards (towards smaller y).
    Arc { from: Vector2D, to: Vector2D, radius: f64, pen: Pen },
}

impl DrawCommand {
    pub fn pen(&self) -> &Pen {
        match self {
            Self::Line { pen, .. } | Self::Arc { pen, .. } => pen,
        }
    }
}

/// Final geometry of one link after lane placement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedLink {
    pub key: EdgeKey,
    pub start: NodeKey,
    pub end: NodeKey,
    pub lane: usize,
    pub points: [Vector2D; 4],
}

/// Result of one layout pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LinkDrawing {
    pub lanes: Vec<Vec<EdgeKey>>,
    pub links: Vec<PlacedLink>,
    pub commands: Vec<DrawCommand>,
}

impl LinkDrawing {
    pub fn link(&self, key: EdgeKey) -> Option<&PlacedLink> {
        self.links.iter().find(|link| link.key == key)
    }

    pub fn lane_of(&self, key: EdgeKey) -> Option<usize> {
        self.link(key).map(|link| link.lane)
    }
}
