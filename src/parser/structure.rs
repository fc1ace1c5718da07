//! Structural indexing of an existing PDF.
//!
//! One forward read of the header, one backward scan for `startxref`, one
//! pass over the classic cross-reference table. No object graph is
//! materialized; callers that need field values scan raw bytes near the
//! offsets this index hands out. Cross-reference streams, object streams,
//! `/Prev` chains and encryption are out of scope: files using them parse as
//! far as the classic structure goes and simply yield an incomplete index.

use crate::error::{PdfError, Result};
use crate::parser::{XrefEntry, XrefTable};
use crate::version::PdfVersion;
use tracing::debug;

/// The fixed header magic every PDF starts with.
const HEADER_MAGIC: &[u8] = b"%PDF-";
/// Fixed width of one classic cross-reference row.
const XREF_ROW_LEN: usize = 20;

/// What one structural pass recovers from a byte buffer.
#[derive(Debug, Clone)]
pub struct PdfStructure {
    /// Version from the header line.
    pub version: PdfVersion,
    /// Cross-reference index from the last `startxref` in the file.
    pub xref: XrefTable,
    /// Byte position of the last `trailer` keyword, when present. The
    /// trailer dictionary itself is located, not parsed.
    pub trailer_pos: Option<usize>,
}

/// Read-only structural parser over an in-memory buffer.
///
/// Transient: borrow a buffer, call [`parse`](StructuralParser::parse) once,
/// drop it.
pub struct StructuralParser<'a> {
    data: &'a [u8],
}

impl<'a> StructuralParser<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Build the structural index.
    pub fn parse(&self) -> Result<PdfStructure> {
        let version = self.parse_header()?;

        let mut xref = XrefTable::new();
        let xref_offset = self.find_startxref()?;
        self.parse_xref_at(xref_offset, &mut xref)?;

        let trailer_pos = rfind(self.data, b"trailer");
        debug!(
            version = %version,
            entries = xref.len(),
            "structural parse complete"
        );

        Ok(PdfStructure {
            version,
            xref,
            trailer_pos,
        })
    }

    /// Require the `%PDF-` magic and read the 3-character version token.
    ///
    /// Unknown tokens are tolerated and map to the newest supported version;
    /// a missing or truncated magic is an error.
    fn parse_header(&self) -> Result<PdfVersion> {
        if self.data.len() < HEADER_MAGIC.len() + 3 || !self.data.starts_with(HEADER_MAGIC) {
            return Err(PdfError::InvalidPdf("missing %PDF- header".to_string()));
        }
        let token = &self.data[HEADER_MAGIC.len()..HEADER_MAGIC.len() + 3];
        Ok(PdfVersion::from_header_token(token))
    }

    /// Locate the last `startxref` keyword and parse the offset after it.
    ///
    /// Only the final occurrence is honored; earlier revisions and `/Prev`
    /// chains are ignored.
    fn find_startxref(&self) -> Result<u64> {
        let keyword_pos = rfind(self.data, b"startxref")
            .ok_or_else(|| PdfError::InvalidPdf("missing startxref".to_string()))?;

        let mut pos = keyword_pos + b"startxref".len();
        skip_whitespace(self.data, &mut pos);
        parse_integer(self.data, &mut pos)
    }

    /// Parse the classic cross-reference table at `offset`, if one is there.
    ///
    /// A non-`xref` token at the offset (e.g. a cross-reference stream) is
    /// not an error; the index just stays empty.
    fn parse_xref_at(&self, offset: u64, xref: &mut XrefTable) -> Result<()> {
        let mut pos = usize::try_from(offset)
            .ok()
            .filter(|&p| p < self.data.len())
            .ok_or_else(|| PdfError::InvalidPdf("startxref offset out of bounds".to_string()))?;

        skip_whitespace(self.data, &mut pos);
        if !self.data[pos..].starts_with(b"xref") {
            debug!(offset, "no classic xref keyword at startxref target");
            return Ok(());
        }
        pos += b"xref".len();

        loop {
            skip_whitespace(self.data, &mut pos);
            if pos >= self.data.len() || self.data[pos..].starts_with(b"trailer") {
                break;
            }

            let first_object = u32::try_from(parse_integer(self.data, &mut pos)?)
                .map_err(|_| PdfError::InvalidPdf("xref subsection start too large".to_string()))?;
            skip_whitespace(self.data, &mut pos);
            let count = parse_integer(self.data, &mut pos)?;
            skip_whitespace(self.data, &mut pos);

            for i in 0..count {
                let row_start = pos + (i as usize) * XREF_ROW_LEN;
                let row = self
                    .data
                    .get(row_start..row_start + XREF_ROW_LEN)
                    .ok_or_else(|| PdfError::InvalidPdf("truncated xref row".to_string()))?;
                let entry = parse_xref_row(row)?;
                let number = first_object.checked_add(i as u32).ok_or_else(|| {
                    PdfError::InvalidPdf("xref object number overflow".to_string())
                })?;
                xref.insert(number, entry);
            }
            pos += count as usize * XREF_ROW_LEN;
        }

        Ok(())
    }
}

/// Parse one fixed 20-byte row: 10-digit offset, 5-digit generation, flag.
fn parse_xref_row(row: &[u8]) -> Result<XrefEntry> {
    let offset = parse_fixed_digits(&row[0..10])?;
    let generation = parse_fixed_digits(&row[11..16])? as u16;
    let in_use = match row[17] {
        b'n' => true,
        b'f' => false,
        other => {
            return Err(PdfError::InvalidPdf(format!(
                "bad xref entry flag: {:?}",
                other as char
            )))
        }
    };

    Ok(XrefEntry {
        offset,
        generation,
        in_use,
    })
}

fn parse_fixed_digits(bytes: &[u8]) -> Result<u64> {
    let mut value: u64 = 0;
    for &byte in bytes {
        if !byte.is_ascii_digit() {
            return Err(PdfError::InvalidPdf("malformed xref entry".to_string()));
        }
        value = value * 10 + u64::from(byte - b'0');
    }
    Ok(value)
}

/// Parse an unsigned decimal integer at `*pos`, advancing past it.
pub(crate) fn parse_integer(data: &[u8], pos: &mut usize) -> Result<u64> {
    let start = *pos;
    let mut value: u64 = 0;
    while let Some(byte) = data.get(*pos) {
        if !byte.is_ascii_digit() {
            break;
        }
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(byte - b'0')))
            .ok_or_else(|| PdfError::InvalidPdf("integer overflow".to_string()))?;
        *pos += 1;
    }
    if *pos == start {
        return Err(PdfError::InvalidPdf("expected integer".to_string()));
    }
    Ok(value)
}

pub(crate) fn skip_whitespace(data: &[u8], pos: &mut usize) {
    while let Some(byte) = data.get(*pos) {
        if !matches!(byte, b' ' | b'\t' | b'\r' | b'\n' | b'\x0C' | b'\0') {
            break;
        }
        *pos += 1;
    }
}

/// Last occurrence of `needle` in `haystack`.
pub(crate) fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    (0..=haystack.len() - needle.len())
        .rev()
        .find(|&i| &haystack[i..i + needle.len()] == needle)
}

/// First occurrence of `needle` in `haystack`.
pub(crate) fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    (0..=haystack.len() - needle.len()).find(|&i| &haystack[i..i + needle.len()] == needle)
}
