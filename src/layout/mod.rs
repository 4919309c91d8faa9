// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of caex-links and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Geometry of link lines.
//!
//! [`link_line`] turns two tree rows into an orthogonal route hugging the right edge of the
//! headers between them; [`lanes`] spreads overlapping routes over parallel rails.

pub mod lanes;
pub mod link_line;

pub use lanes::{assign_lanes, PendingEdge};
pub use link_line::{
    anchor_point, calculate_max_width, lowest_common_ancestor, rows_between, staple,
};
