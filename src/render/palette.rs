// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of caex-links and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;
use std::env;
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use smol_str::SmolStr;

use super::Rgba;

pub const PALETTE_ENV: &str = "CAEX_LINKS_PALETTE";

/// Ordered link colours. Slot 0 doubles as the fallback colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkPalette {
    colors: Vec<Rgba>,
}

impl Default for LinkPalette {
    fn default() -> Self {
        Self {
            colors: vec![
                Rgba::rgb(0x1f, 0x77, 0xb4),
                Rgba::rgb(0xff, 0x7f, 0x0e),
                Rgba::rgb(0x2c, 0xa0, 0x2c),
                Rgba::rgb(0xd6, 0x27, 0x28),
                Rgba::rgb(0x94, 0x67, 0xbd),
                Rgba::rgb(0x8c, 0x56, 0x4b),
                Rgba::rgb(0xe3, 0x77, 0xc2),
                Rgba::rgb(0x17, 0xbe, 0xcf),
            ],
        }
    }
}

impl LinkPalette {
    pub fn new(colors: Vec<Rgba>) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::Empty);
        }
        Ok(Self { colors })
    }

    /// Parses comma-separated `#RRGGBB` / `rgb:RR/GG/BB` colours.
    pub fn parse_csv(value: &str) -> Result<Self, PaletteError> {
        let colors = value
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(parse_palette_color)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    /// Reads [`PALETTE_ENV`]; `Ok(None)` when unset or blank.
    pub fn from_env() -> Result<Option<Self>, PaletteError> {
        let value = match env::var(PALETTE_ENV) {
            Ok(value) => value,
            Err(env::VarError::NotPresent) => return Ok(None),
            Err(env::VarError::NotUnicode(_)) => {
                return Err(PaletteError::InvalidEnv {
                    name: PALETTE_ENV.to_string(),
                    value: "<non-unicode>".to_string(),
                });
            }
        };

        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        Self::parse_csv(trimmed).map(Some).map_err(|error| PaletteError::InvalidEnv {
            name: PALETTE_ENV.to_string(),
            value: format!("{trimmed} ({error})"),
        })
    }

    pub fn from_env_or_default() -> Self {
        match Self::from_env() {
            Ok(Some(palette)) => palette,
            Ok(None) => Self::default(),
            Err(error) => {
                tracing::warn!(%error, "ignoring link palette override");
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn color(&self, slot: usize) -> Rgba {
        self.colors.get(slot).or_else(|| self.colors.first()).copied().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaletteError {
    #[error("palette must contain at least one colour")]
    Empty,
    #[error("{0}")]
    InvalidColor(String),
    #[error("invalid env {name}={value}")]
    InvalidEnv { name: String, value: String },
}

/// Accepts `#rrggbb`, `0xrrggbb` and the X11 form `rgb:r/g/b` with 2 or 4 hex digits per channel.
fn parse_palette_color(value: &str) -> Result<Rgba, PaletteError> {
    let spec = value.trim();
    let rejected = || PaletteError::InvalidColor(format!("unrecognised colour `{spec}`"));

    let channels: [u8; 3] = match spec.get(..4) {
        Some(scheme) if scheme.eq_ignore_ascii_case("rgb:") => {
            let mut parts = spec[4..].splitn(3, '/').map(x11_channel);
            match (parts.next(), parts.next(), parts.next()) {
                (Some(Some(r)), Some(Some(g)), Some(Some(b))) => [r, g, b],
                _ => return Err(rejected()),
            }
        }
        _ => {
            let digits = spec
                .strip_prefix('#')
                .or_else(|| spec.strip_prefix("0x"))
                .or_else(|| spec.strip_prefix("0X"))
                .unwrap_or(spec);
            if digits.len() != 6 {
                return Err(rejected());
            }
            let mut out = [0u8; 3];
            for (slot, at) in out.iter_mut().zip([0, 2, 4]) {
                *slot = digits.get(at..at + 2).and_then(hex_byte).ok_or_else(rejected)?;
            }
            out
        }
    };
    Ok(Rgba::rgb(channels[0], channels[1], channels[2]))
}

/// X11 channels are scaled to 8 bits by keeping the high byte.
fn x11_channel(part: &str) -> Option<u8> {
    match part.len() {
        2 => hex_byte(part),
        4 => {
            let low = part.get(2..).and_then(hex_byte);
            part.get(..2).and_then(hex_byte).filter(|_| low.is_some())
        }
        _ => None,
    }
}

fn hex_byte(pair: &str) -> Option<u8> {
    if !pair.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u8::from_str_radix(pair, 16).ok()
}

/// Stable class-path → colour assignment.
///
/// The first class path seen takes the next unused palette slot; slots wrap around once the
/// palette is exhausted. One process-wide instance ([`ColorCache::global`]) keeps colours stable
/// across every graph, tests inject their own.
#[derive(Debug)]
pub struct ColorCache {
    state: Mutex<ColorCacheState>,
}

#[derive(Debug)]
struct ColorCacheState {
    palette: LinkPalette,
    slots: HashMap<SmolStr, usize>,
    next_slot: usize,
}

impl ColorCache {
    pub fn new(palette: LinkPalette) -> Self {
        Self {
            state: Mutex::new(ColorCacheState { palette, slots: HashMap::new(), next_slot: 0 }),
        }
    }

    pub fn global() -> Arc<ColorCache> {
        static GLOBAL: OnceLock<Arc<ColorCache>> = OnceLock::new();
        GLOBAL
            .get_or_init(|| Arc::new(ColorCache::new(LinkPalette::from_env_or_default())))
            .clone()
    }

    /// Palette slot for `class_path`; slot 0 when there is no class path.
    pub fn slot_for(&self, class_path: Option<&str>) -> usize {
        let Some(class_path) = class_path else {
            return 0;
        };
        let mut state = self.state.lock();
        if let Some(slot) = state.slots.get(class_path) {
            return *slot;
        }
        let len = state.palette.len().max(1);
        let slot = state.next_slot % len;
        state.next_slot += 1;
        state.slots.insert(SmolStr::new(class_path), slot);
        slot
    }

    pub fn color_for(&self, class_path: Option<&str>) -> Rgba {
        let slot = self.slot_for(class_path);
        self.state.lock().palette.color(slot)
    }

    pub fn default_color(&self) -> Rgba {
        self.state.lock().palette.color(0)
    }

    /// Swaps the palette, keeping already assigned slots.
    pub fn set_palette(&self, palette: LinkPalette) {
        self.state.lock().palette = palette;
    }

    pub fn assigned(&self) -> usize {
        self.state.lock().slots.len()
    }
}

impl Default for ColorCache {
    fn default() -> Self {
        Self::new(LinkPalette::default())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::rstest;

    use super::{parse_palette_color, ColorCache, LinkPalette, PaletteError};
    use crate::render::Rgba;

    #[rstest]
    #[case("#1f77b4", Rgba::rgb(0x1f, 0x77, 0xb4))]
    #[case("0x1F77B4", Rgba::rgb(0x1f, 0x77, 0xb4))]
    #[case("  #FFfF00 ", Rgba::rgb(0xff, 0xff, 0))]
    #[case("RGB:ff/80/00", Rgba::rgb(0xff, 0x80, 0))]
    #[case("rgb:ffff/8000/0000", Rgba::rgb(0xff, 0x80, 0))]
    fn accepted_colour_forms(#[case] input: &str, #[case] expected: Rgba) {
        assert_eq!(parse_palette_color(input), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("#fff")]
    #[case("#1f77b4ff")]
    #[case("#+f77b4")]
    #[case("#1f77bé")]
    #[case("rgb:ff/80")]
    #[case("rgb:ff/80/00/00")]
    #[case("rgb:fff/80/00")]
    #[case("rgb:ffzz/80/00")]
    fn rejected_colour_forms(#[case] input: &str) {
        assert!(matches!(parse_palette_color(input), Err(PaletteError::InvalidColor(_))));
    }

    #[test]
    fn palette_parses_hex_and_xterm_forms() {
        let palette = LinkPalette::parse_csv("#111111, rgb:ff/00/00 ,0x00ff00,rgb:ffff/8000/0000")
            .expect("palette");
        assert_eq!(palette.len(), 4);
        assert_eq!(palette.color(0), Rgba::rgb(0x11, 0x11, 0x11));
        assert_eq!(palette.color(1), Rgba::rgb(0xff, 0, 0));
        assert_eq!(palette.color(2), Rgba::rgb(0, 0xff, 0));
        assert_eq!(palette.color(3), Rgba::rgb(0xff, 0x80, 0));
        assert_eq!(palette.color(99), Rgba::rgb(0x11, 0x11, 0x11));
    }

    #[test]
    fn palette_rejects_garbage() {
        assert!(matches!(LinkPalette::parse_csv("nope"), Err(PaletteError::InvalidColor(_))));
        assert_eq!(LinkPalette::parse_csv(" , "), Err(PaletteError::Empty));
    }

    #[test]
    fn class_paths_keep_their_first_slot() {
        let cache = ColorCache::new(LinkPalette::parse_csv("#000001,#000002,#000003").unwrap());
        assert_eq!(cache.slot_for(Some("Lib/A")), 0);
        assert_eq!(cache.slot_for(Some("Lib/B")), 1);
        assert_eq!(cache.slot_for(Some("Lib/A")), 0);
        assert_eq!(cache.slot_for(Some("Lib/C")), 2);
        assert_eq!(cache.slot_for(Some("Lib/D")), 0);
        assert_eq!(cache.slot_for(None), 0);
        assert_eq!(cache.color_for(Some("Lib/B")), Rgba::rgb(0, 0, 2));
        assert_eq!(cache.assigned(), 4);
    }

    #[test]
    fn global_cache_is_shared() {
        assert!(Arc::ptr_eq(&ColorCache::global(), &ColorCache::global()));
    }
}
