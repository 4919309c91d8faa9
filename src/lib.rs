// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of caex-links and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Internal-link routing for CAEX tree views.
//!
//! Rows of an AutomationML tree that are connected by internal links get an orthogonal line
//! running right of the row headers. [`graph::Graph`] keeps the link graph in sync with the
//! document, [`layout`] computes routes and lanes, and [`render`] turns them into
//! [`render::DrawCommand`]s for the host to paint.

pub mod config;
pub mod geometry;
pub mod graph;
pub mod layout;
pub mod model;
pub mod render;

pub use config::{ClassFilter, JumpMode, LinkLayoutOptions};
pub use graph::{Graph, LinksChanged};
pub use model::{MemoryTree, NodeKey, TreeHost};
pub use render::LinkDrawing;
