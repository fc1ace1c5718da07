//! Fonts known to a document.
//!
//! Two kinds exist: the built-in standard fonts every reader ships, and
//! TrueType/OpenType fonts loaded from raw bytes for future embedding. Only
//! standard fonts are referenced from serialized page resources; custom font
//! embedding is not wired into the writer.

mod metrics;
mod sfnt;

pub use metrics::FontMetrics;

/// The standard fonts the writer names in every page's resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    TimesRoman,
    Courier,
}

impl StandardFont {
    /// The BaseFont name used in the PDF.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::TimesRoman => "Times-Roman",
            StandardFont::Courier => "Courier",
        }
    }

    /// All standard fonts, in resource-dictionary order.
    pub fn all() -> [StandardFont; 4] {
        [
            StandardFont::Helvetica,
            StandardFont::HelveticaBold,
            StandardFont::TimesRoman,
            StandardFont::Courier,
        ]
    }

    /// Built-in metrics on a 1000-unit em, from the published AFM data.
    fn builtin_metrics(&self) -> FontMetrics {
        match self {
            StandardFont::Helvetica => FontMetrics {
                units_per_em: 1000,
                ascender: 718,
                descender: -207,
                line_gap: 0,
                cap_height: 718,
                x_height: 523,
                avg_char_width: 513,
            },
            StandardFont::HelveticaBold => FontMetrics {
                units_per_em: 1000,
                ascender: 718,
                descender: -207,
                line_gap: 0,
                cap_height: 718,
                x_height: 532,
                avg_char_width: 536,
            },
            StandardFont::TimesRoman => FontMetrics {
                units_per_em: 1000,
                ascender: 683,
                descender: -217,
                line_gap: 0,
                cap_height: 662,
                x_height: 450,
                avg_char_width: 495,
            },
            StandardFont::Courier => FontMetrics {
                units_per_em: 1000,
                ascender: 753,
                descender: -250,
                line_gap: 0,
                cap_height: 562,
                x_height: 426,
                avg_char_width: 600,
            },
        }
    }
}

#[derive(Debug, Clone)]
enum FontKind {
    Standard(StandardFont),
    TrueType { data: Vec<u8> },
}

/// A font owned by a document.
#[derive(Debug, Clone)]
pub struct Font {
    name: String,
    kind: FontKind,
    metrics: FontMetrics,
}

impl Font {
    /// Creates one of the built-in standard fonts.
    pub fn standard(font: StandardFont) -> Self {
        Self {
            name: font.pdf_name().to_string(),
            kind: FontKind::Standard(font),
            metrics: font.builtin_metrics(),
        }
    }

    /// Loads a TrueType/OpenType font from raw bytes.
    ///
    /// The bytes are copied, so the caller may free its buffer immediately.
    /// Metrics extraction is best-effort: unreadable data leaves the metrics
    /// at their defaults instead of failing. When the font's `name` table
    /// yields a usable name it replaces `name`.
    pub fn from_truetype_bytes(name: impl Into<String>, data: &[u8]) -> Self {
        let info = sfnt::read(data);
        Self {
            name: info.full_name.unwrap_or_else(|| name.into()),
            kind: FontKind::TrueType {
                data: data.to_vec(),
            },
            metrics: info.metrics,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this is one of the built-in standard fonts.
    pub fn is_standard(&self) -> bool {
        matches!(self.kind, FontKind::Standard(_))
    }

    /// The embedded font bytes, for TrueType fonts.
    pub fn data(&self) -> Option<&[u8]> {
        match &self.kind {
            FontKind::Standard(_) => None,
            FontKind::TrueType { data } => Some(data),
        }
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    /// Recommended line height at `font_size` points.
    pub fn line_height(&self, font_size: f64) -> f64 {
        self.metrics.line_height(font_size)
    }
}
