//! Color primitives shared by chart and heatmap rendering.
//!
//! 1. **Rgb** - an sRGB color, serialized as `#RRGGBB`
//! 2. **Palette** - categorical colors assigned round-robin by series index
//! 3. **ColorRamp** - ordered stops for mapping a normalized value onto a color

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_object::ValueObject;

// ============================================================================
// Rgb
// ============================================================================

/// An 8-bit sRGB color.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ValueObject for Rgb {}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }
}

impl core::fmt::Display for Rgb {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(DomainError::validation(format!("color must be #RRGGBB, got {s:?}")));
        }
        let hex = u32::from_str_radix(digits, 16)
            .map_err(|e| DomainError::validation(format!("color {s:?}: {e}")))?;
        Ok(Self::from_hex(hex))
    }
}

impl TryFrom<String> for Rgb {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

// ============================================================================
// Palette
// ============================================================================

/// Named palette/theme selection supplied by the view layer.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaletteId {
    #[default]
    Default,
    Dark,
    HighContrast,
}

const DEFAULT_COLORS: [Rgb; 8] = [
    Rgb::from_hex(0x3B82F6),
    Rgb::from_hex(0x10B981),
    Rgb::from_hex(0xF59E0B),
    Rgb::from_hex(0xEF4444),
    Rgb::from_hex(0x8B5CF6),
    Rgb::from_hex(0xEC4899),
    Rgb::from_hex(0x06B6D4),
    Rgb::from_hex(0x84CC16),
];

const DARK_COLORS: [Rgb; 8] = [
    Rgb::from_hex(0x60A5FA),
    Rgb::from_hex(0x34D399),
    Rgb::from_hex(0xFBBF24),
    Rgb::from_hex(0xF87171),
    Rgb::from_hex(0xA78BFA),
    Rgb::from_hex(0xF472B6),
    Rgb::from_hex(0x22D3EE),
    Rgb::from_hex(0xA3E635),
];

const HIGH_CONTRAST_COLORS: [Rgb; 6] = [
    Rgb::from_hex(0x000000),
    Rgb::from_hex(0xE69F00),
    Rgb::from_hex(0x56B4E9),
    Rgb::from_hex(0x009E73),
    Rgb::from_hex(0xD55E00),
    Rgb::from_hex(0xCC79A7),
];

/// Fixed categorical palette.
///
/// Colors are assigned by `index mod len`, so the same series in the same
/// order always yields the same colors.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: &'static [Rgb],
}

impl Palette {
    pub fn for_id(id: PaletteId) -> Self {
        let colors: &'static [Rgb] = match id {
            PaletteId::Default => &DEFAULT_COLORS,
            PaletteId::Dark => &DARK_COLORS,
            PaletteId::HighContrast => &HIGH_CONTRAST_COLORS,
        };
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Round-robin color for the `index`-th series entry.
    pub fn color_at(&self, index: usize) -> Rgb {
        self.colors[index % self.colors.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::for_id(PaletteId::Default)
    }
}

// ============================================================================
// Color ramp
// ============================================================================

/// Blue -> Cyan -> Green -> Yellow -> Red
const THERMAL_STOPS: [Rgb; 5] = [
    Rgb::from_hex(0x1E40AF),
    Rgb::from_hex(0x06B6D4),
    Rgb::from_hex(0x22C55E),
    Rgb::from_hex(0xFACC15),
    Rgb::from_hex(0xDC2626),
];

/// Ordered color stops indexed by a normalized value in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorRamp {
    stops: Vec<Rgb>,
}

impl ColorRamp {
    /// A ramp needs at least one stop.
    pub fn new(stops: Vec<Rgb>) -> Result<Self, DomainError> {
        if stops.is_empty() {
            return Err(DomainError::validation("color ramp needs at least one stop"));
        }
        Ok(Self { stops })
    }

    pub fn thermal() -> Self {
        Self {
            stops: THERMAL_STOPS.to_vec(),
        }
    }

    /// Number of stops (`K`).
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn stops(&self) -> &[Rgb] {
        &self.stops
    }

    /// `clamp(floor(normalized * (K - 1)), 0, K - 1)`.
    ///
    /// NaN maps to 0; values outside `[0, 1]` land on the nearest end.
    pub fn index_for(&self, normalized: f64) -> usize {
        let last = self.stops.len() - 1;
        if !normalized.is_finite() {
            return if normalized == f64::INFINITY { last } else { 0 };
        }
        let raw = (normalized * last as f64).floor();
        if raw <= 0.0 {
            0
        } else {
            (raw as usize).min(last)
        }
    }

    pub fn color_for(&self, normalized: f64) -> Rgb {
        self.stops[self.index_for(normalized)]
    }
}

impl Default for ColorRamp {
    fn default() -> Self {
        Self::thermal()
    }
}
