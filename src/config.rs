// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of caex-links and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Layout options recognised by the link renderer.
//!
//! Options are plain data (`serde`), so a host can persist them next to its own view settings.
//! The class-reference filter is a predicate and therefore lives outside the serialized struct.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// How a horizontal link segment is drawn where it crosses a vertical one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JumpMode {
    /// Draw straight through.
    None,
    /// Leave a small gap in the horizontal segment.
    PlainGap,
    /// Leave a gap and bridge it with a semicircular arc.
    #[default]
    JumpOver,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkLayoutOptions {
    /// Colour each link by its referenced interface class.
    pub colored_lines: bool,
    pub dashed_lines: bool,
    pub line_thickness: f64,
    /// Distance between the widest intervening header and the first rail.
    pub rail_offset: f64,
    /// Horizontal distance between neighbouring lanes.
    pub lane_spacing: f64,
    /// Vertical stagger applied to anchors that share a y coordinate.
    pub y_dedup_offset: f64,
    /// Vertical inset applied to both anchors, towards each other.
    pub anchor_inset: f64,
    /// Y coordinate used for endpoints scrolled off above the viewport.
    pub offscreen_top: f64,
    pub jump_mode: JumpMode,
    pub jump_gap: f64,
    /// Treat a link whose vertical span contains another's as conflicting with it, so nested links
    /// never share a rail.
    pub separate_nested_links: bool,
}

impl Default for LinkLayoutOptions {
    fn default() -> Self {
        Self {
            colored_lines: true,
            dashed_lines: false,
            line_thickness: 1.0,
            rail_offset: 10.0,
            lane_spacing: 6.0,
            y_dedup_offset: 2.0,
            anchor_inset: 1.0,
            offscreen_top: -10.0,
            jump_mode: JumpMode::JumpOver,
            jump_gap: 4.0,
            separate_nested_links: false,
        }
    }
}

impl LinkLayoutOptions {
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_json_str(&input)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid layout options: {0}")]
    Json(#[from] serde_json::Error),
}

/// Predicate deciding which referenced interface classes get a link line.
#[derive(Clone)]
pub struct ClassFilter(Arc<dyn Fn(&str) -> bool + Send + Sync>);

impl ClassFilter {
    pub fn new(predicate: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(predicate))
    }

    /// Links without a class reference are never filtered out.
    pub fn allows(&self, class_path: Option<&str>) -> bool {
        class_path.map_or(true, |path| (self.0)(path))
    }
}

impl fmt::Debug for ClassFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClassFilter(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::{ClassFilter, ConfigError, JumpMode, LinkLayoutOptions};

    #[test]
    fn partial_json_keeps_defaults() {
        let options =
            LinkLayoutOptions::from_json_str(r#"{"jump_mode":"plain_gap","lane_spacing":8.5}"#)
                .expect("options");
        assert_eq!(options.jump_mode, JumpMode::PlainGap);
        assert_eq!(options.lane_spacing, 8.5);
        assert_eq!(options.rail_offset, LinkLayoutOptions::default().rail_offset);
        assert!(options.colored_lines);
    }

    #[test]
    fn invalid_json_is_reported() {
        let err = LinkLayoutOptions::from_json_str(r#"{"jump_mode":"sideways"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = LinkLayoutOptions::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("not/here.json"));
    }

    #[test]
    fn class_filter_lets_unclassified_links_through() {
        let filter = ClassFilter::new(|path| path.starts_with("AutomationMLInterfaceClassLib/"));
        assert!(filter.allows(None));
        assert!(filter.allows(Some("AutomationMLInterfaceClassLib/SignalInterface")));
        assert!(!filter.allows(Some("MyLib/Port")));
    }
}
