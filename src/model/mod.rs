// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of caex-links and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The hosting tree as seen by the routing engine.
//!
//! Rows are addressed by [`NodeKey`] handles and queried through [`TreeHost`]. [`MemoryTree`] is a
//! self-contained host used by the demo binary, tests and benchmarks.

pub mod host;
pub mod ids;
pub mod memory_tree;
pub mod node;

pub use host::{TransformError, TreeHost};
pub use ids::{ElementId, IdError, NodeKey};
pub use memory_tree::{MemoryTree, RowMetrics, SceneLink, SceneNode, TreeError, TreeScene};
pub use node::{CaexElement, NodeKind};
