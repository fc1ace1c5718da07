//! Integer font metrics in em units.

/// Layout metrics recovered from a font, expressed in font units.
///
/// Values are scaled by `units_per_em` at use time; a zero `units_per_em`
/// marks metrics that could not be recovered and must not be divided by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FontMetrics {
    /// Font design units per em square. Zero means "unknown".
    pub units_per_em: u16,
    /// Typographic ascender, font units (positive, above baseline)
    pub ascender: i16,
    /// Typographic descender, font units (typically negative)
    pub descender: i16,
    /// Extra spacing between lines, font units
    pub line_gap: i16,
    /// Height of flat capital letters
    pub cap_height: i16,
    /// Height of lowercase letters without ascenders
    pub x_height: i16,
    /// Average character advance width
    pub avg_char_width: i16,
}

impl FontMetrics {
    /// Whether the metrics carry a usable em scale.
    pub fn is_usable(&self) -> bool {
        self.units_per_em > 0
    }

    /// Recommended baseline-to-baseline distance at `font_size` points.
    ///
    /// Falls back to a conventional 1.2x multiple when the em scale is
    /// unknown, so callers never divide by zero.
    pub fn line_height(&self, font_size: f64) -> f64 {
        if !self.is_usable() {
            return font_size * 1.2;
        }
        let span = self.ascender as f64 - self.descender as f64 + self.line_gap as f64;
        span / self.units_per_em as f64 * font_size
    }
}
