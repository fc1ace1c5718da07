//! PDF version identifiers
//!
//! Versions compare numerically: `major * 10 + minor`.

use std::fmt;

/// A PDF specification version, 1.0 through 2.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PdfVersion {
    V1_0,
    V1_1,
    V1_2,
    V1_3,
    V1_4,
    V1_5,
    V1_6,
    V1_7,
    V2_0,
}

impl PdfVersion {
    /// The newest version this engine knows about.
    pub fn latest() -> Self {
        PdfVersion::V2_0
    }

    /// Numeric value used for ordering: `major * 10 + minor`.
    pub fn as_number(&self) -> u8 {
        self.major() * 10 + self.minor()
    }

    pub fn major(&self) -> u8 {
        match self {
            PdfVersion::V2_0 => 2,
            _ => 1,
        }
    }

    pub fn minor(&self) -> u8 {
        match self {
            PdfVersion::V1_0 => 0,
            PdfVersion::V1_1 => 1,
            PdfVersion::V1_2 => 2,
            PdfVersion::V1_3 => 3,
            PdfVersion::V1_4 => 4,
            PdfVersion::V1_5 => 5,
            PdfVersion::V1_6 => 6,
            PdfVersion::V1_7 => 7,
            PdfVersion::V2_0 => 0,
        }
    }

    /// The three-character token that follows `%PDF-` in the file header.
    pub fn header_token(&self) -> &'static str {
        match self {
            PdfVersion::V1_0 => "1.0",
            PdfVersion::V1_1 => "1.1",
            PdfVersion::V1_2 => "1.2",
            PdfVersion::V1_3 => "1.3",
            PdfVersion::V1_4 => "1.4",
            PdfVersion::V1_5 => "1.5",
            PdfVersion::V1_6 => "1.6",
            PdfVersion::V1_7 => "1.7",
            PdfVersion::V2_0 => "2.0",
        }
    }

    /// Map a header token to a version.
    ///
    /// Unrecognized tokens fall back to the newest supported version rather
    /// than failing; files claiming a future version are still indexable.
    pub fn from_header_token(token: &[u8]) -> Self {
        match token {
            b"1.0" => PdfVersion::V1_0,
            b"1.1" => PdfVersion::V1_1,
            b"1.2" => PdfVersion::V1_2,
            b"1.3" => PdfVersion::V1_3,
            b"1.4" => PdfVersion::V1_4,
            b"1.5" => PdfVersion::V1_5,
            b"1.6" => PdfVersion::V1_6,
            b"1.7" => PdfVersion::V1_7,
            b"2.0" => PdfVersion::V2_0,
            _ => PdfVersion::latest(),
        }
    }
}

impl Default for PdfVersion {
    fn default() -> Self {
        Self::latest()
    }
}

impl fmt::Display for PdfVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major(), self.minor())
    }
}
