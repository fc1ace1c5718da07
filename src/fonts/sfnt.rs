//! Best-effort sfnt table reader for TrueType/OpenType font data.
//!
//! Recovers layout metrics and a display name without touching glyph
//! outlines. Extraction never fails: any malformed or truncated input leaves
//! the affected fields at their defaults. This is a deliberate policy choice;
//! a font with unreadable metrics still renders, just with generic spacing.

use super::FontMetrics;

/// sfnt version tag for TrueType outlines.
const TRUETYPE_MAGIC: u32 = 0x0001_0000;
/// sfnt version tag for CFF (OpenType) outlines, `OTTO`.
const OPENTYPE_MAGIC: u32 = 0x4F54_544F;

/// Windows platform id in the `name` table.
const PLATFORM_WINDOWS: u16 = 3;
/// `name` table ids: full font name, then font family as a fallback.
const NAME_ID_FULL: u16 = 4;
const NAME_ID_FAMILY: u16 = 1;

/// Everything the reader can recover from one font.
#[derive(Debug, Clone, Default)]
pub(crate) struct SfntInfo {
    pub metrics: FontMetrics,
    pub full_name: Option<String>,
}

/// Read metrics and name from raw font bytes.
///
/// Invalid signatures, missing tables and truncated records all degrade to
/// default values rather than erroring.
pub(crate) fn read(data: &[u8]) -> SfntInfo {
    let mut info = SfntInfo::default();

    let Some(signature) = read_u32(data, 0) else {
        return info;
    };
    if signature != TRUETYPE_MAGIC && signature != OPENTYPE_MAGIC {
        return info;
    }
    let Some(num_tables) = read_u16(data, 4) else {
        return info;
    };

    let mut head = None;
    let mut hhea = None;
    let mut os2 = None;
    let mut name = None;

    for i in 0..num_tables as usize {
        let record = 12 + i * 16;
        let Some(tag) = data.get(record..record + 4) else {
            break;
        };
        let (Some(offset), Some(length)) = (read_u32(data, record + 8), read_u32(data, record + 12))
        else {
            break;
        };
        let table = table_slice(data, offset, length);
        match tag {
            b"head" => head = table,
            b"hhea" => hhea = table,
            b"OS/2" => os2 = table,
            b"name" => name = table,
            _ => {}
        }
    }

    if let Some(head) = head {
        if let Some(units_per_em) = read_u16(head, 18) {
            if units_per_em > 0 {
                info.metrics.units_per_em = units_per_em;
            }
        }
    }

    if let Some(hhea) = hhea {
        if let (Some(ascender), Some(descender), Some(line_gap)) = (
            read_i16(hhea, 4),
            read_i16(hhea, 6),
            read_i16(hhea, 8),
        ) {
            info.metrics.ascender = ascender;
            info.metrics.descender = descender;
            info.metrics.line_gap = line_gap;
        }
    }

    if let Some(os2) = os2 {
        // sxHeight/sCapHeight only exist from OS/2 version 2 on.
        if read_u16(os2, 0).is_some_and(|version| version >= 2) && os2.len() >= 90 {
            if let Some(x_height) = read_i16(os2, 86) {
                info.metrics.x_height = x_height;
            }
            if let Some(cap_height) = read_i16(os2, 88) {
                info.metrics.cap_height = cap_height;
            }
            if let Some(avg_width) = read_i16(os2, 2) {
                if avg_width > 0 {
                    info.metrics.avg_char_width = avg_width;
                }
            }
        }
    }

    if let Some(name) = name {
        info.full_name = read_font_name(name);
    }

    info
}

/// Scan the `name` table for a Windows-platform full name (id 4), falling
/// back to the family name (id 1).
fn read_font_name(table: &[u8]) -> Option<String> {
    let count = read_u16(table, 2)?;
    let string_storage = read_u16(table, 4)? as usize;

    let mut family = None;
    for i in 0..count as usize {
        let record = 6 + i * 12;
        let Some(platform) = read_u16(table, record) else {
            break;
        };
        let (Some(name_id), Some(length), Some(offset)) = (
            read_u16(table, record + 6),
            read_u16(table, record + 8),
            read_u16(table, record + 10),
        ) else {
            break;
        };
        if platform != PLATFORM_WINDOWS || (name_id != NAME_ID_FULL && name_id != NAME_ID_FAMILY) {
            continue;
        }

        let start = string_storage + offset as usize;
        let Some(bytes) = table.get(start..start + length as usize) else {
            continue;
        };
        let decoded = decode_utf16be_ascii(bytes);
        if decoded.is_empty() {
            continue;
        }
        if name_id == NAME_ID_FULL {
            return Some(decoded);
        }
        family.get_or_insert(decoded);
    }
    family
}

/// Keep the low byte of each UTF-16BE code unit that lands in printable
/// ASCII. Lossy on purpose: non-Latin names come back empty.
fn decode_utf16be_ascii(bytes: &[u8]) -> String {
    bytes
        .chunks_exact(2)
        .filter(|unit| unit[0] == 0 && (0x20..=0x7E).contains(&unit[1]))
        .map(|unit| unit[1] as char)
        .collect()
}

fn table_slice(data: &[u8], offset: u32, length: u32) -> Option<&[u8]> {
    let start = offset as usize;
    let end = start.checked_add(length as usize)?;
    data.get(start..end)
}

fn read_u16(data: &[u8], offset: usize) -> Option<u16> {
    let bytes = data.get(offset..offset + 2)?;
    Some(u16::from_be_bytes([bytes[0], bytes[1]]))
}

fn read_i16(data: &[u8], offset: usize) -> Option<i16> {
    read_u16(data, offset).map(|v| v as i16)
}

fn read_u32(data: &[u8], offset: usize) -> Option<u32> {
    let bytes = data.get(offset..offset + 4)?;
    Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a minimal sfnt with the given tables appended after the
    /// directory, returning the full byte buffer.
    fn build_sfnt(tables: &[(&[u8; 4], Vec<u8>)]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&TRUETYPE_MAGIC.to_be_bytes());
        data.extend_from_slice(&(tables.len() as u16).to_be_bytes());
        data.extend_from_slice(&[0u8; 6]); // searchRange/entrySelector/rangeShift

        let mut offset = 12 + tables.len() * 16;
        for (tag, body) in tables {
            data.extend_from_slice(*tag);
            data.extend_from_slice(&[0u8; 4]); // checksum, unchecked
            data.extend_from_slice(&(offset as u32).to_be_bytes());
            data.extend_from_slice(&(body.len() as u32).to_be_bytes());
            offset += body.len();
        }
        for (_, body) in tables {
            data.extend_from_slice(body);
        }
        data
    }

    fn head_table(units_per_em: u16) -> Vec<u8> {
        let mut body = vec![0u8; 54];
        body[18..20].copy_from_slice(&units_per_em.to_be_bytes());
        body
    }

    fn hhea_table(ascender: i16, descender: i16, line_gap: i16) -> Vec<u8> {
        let mut body = vec![0u8; 36];
        body[4..6].copy_from_slice(&ascender.to_be_bytes());
        body[6..8].copy_from_slice(&descender.to_be_bytes());
        body[8..10].copy_from_slice(&line_gap.to_be_bytes());
        body
    }

    #[test]
    fn test_invalid_signature_leaves_defaults() {
        let info = read(b"not a font at all");
        assert_eq!(info.metrics, FontMetrics::default());
        assert!(info.full_name.is_none());
    }

    #[test]
    fn test_too_short_buffer_leaves_defaults() {
        assert_eq!(read(&[]).metrics, FontMetrics::default());
        assert_eq!(read(&[0x00, 0x01]).metrics, FontMetrics::default());
    }

    #[test]
    fn test_head_and_hhea_extraction() {
        let data = build_sfnt(&[
            (b"head", head_table(2048)),
            (b"hhea", hhea_table(1638, -410, 67)),
        ]);
        let info = read(&data);

        assert_eq!(info.metrics.units_per_em, 2048);
        assert_eq!(info.metrics.ascender, 1638);
        assert_eq!(info.metrics.descender, -410);
        assert_eq!(info.metrics.line_gap, 67);
        assert!(info.metrics.is_usable());
    }

    #[test]
    fn test_missing_tables_are_skipped() {
        let data = build_sfnt(&[(b"hhea", hhea_table(700, -200, 0))]);
        let info = read(&data);

        // head absent: no em scale, but hhea still read
        assert_eq!(info.metrics.units_per_em, 0);
        assert_eq!(info.metrics.ascender, 700);
    }

    #[test]
    fn test_os2_version_gate() {
        let mut os2_v1 = vec![0u8; 96];
        os2_v1[0..2].copy_from_slice(&1u16.to_be_bytes());
        os2_v1[86..88].copy_from_slice(&500i16.to_be_bytes());
        let data = build_sfnt(&[(b"OS/2", os2_v1)]);
        // version 1 carries no sxHeight, field stays default
        assert_eq!(read(&data).metrics.x_height, 0);

        let mut os2_v4 = vec![0u8; 96];
        os2_v4[0..2].copy_from_slice(&4u16.to_be_bytes());
        os2_v4[2..4].copy_from_slice(&521i16.to_be_bytes());
        os2_v4[86..88].copy_from_slice(&519i16.to_be_bytes());
        os2_v4[88..90].copy_from_slice(&714i16.to_be_bytes());
        let data = build_sfnt(&[(b"OS/2", os2_v4)]);
        let metrics = read(&data).metrics;
        assert_eq!(metrics.x_height, 519);
        assert_eq!(metrics.cap_height, 714);
        assert_eq!(metrics.avg_char_width, 521);
    }

    #[test]
    fn test_negative_avg_width_ignored() {
        let mut os2 = vec![0u8; 96];
        os2[0..2].copy_from_slice(&4u16.to_be_bytes());
        os2[2..4].copy_from_slice(&(-5i16).to_be_bytes());
        let data = build_sfnt(&[(b"OS/2", os2)]);
        assert_eq!(read(&data).metrics.avg_char_width, 0);
    }

    #[test]
    fn test_name_table_full_name() {
        // One Windows record with name id 4, UTF-16BE "Demo Sans"
        let text = "Demo Sans";
        let mut strings = Vec::new();
        for byte in text.bytes() {
            strings.push(0);
            strings.push(byte);
        }

        let mut body = Vec::new();
        body.extend_from_slice(&0u16.to_be_bytes()); // format
        body.extend_from_slice(&1u16.to_be_bytes()); // count
        body.extend_from_slice(&18u16.to_be_bytes()); // string storage offset
        body.extend_from_slice(&PLATFORM_WINDOWS.to_be_bytes());
        body.extend_from_slice(&1u16.to_be_bytes()); // encoding
        body.extend_from_slice(&0x0409u16.to_be_bytes()); // language
        body.extend_from_slice(&NAME_ID_FULL.to_be_bytes());
        body.extend_from_slice(&(strings.len() as u16).to_be_bytes());
        body.extend_from_slice(&0u16.to_be_bytes()); // offset in storage
        body.extend_from_slice(&strings);

        let data = build_sfnt(&[(b"name", body)]);
        assert_eq!(read(&data).full_name.as_deref(), Some("Demo Sans"));
    }

    #[test]
    fn test_truncated_directory_keeps_partial_results() {
        let mut data = build_sfnt(&[(b"head", head_table(1000))]);
        // Claim more tables than the directory holds
        data[4..6].copy_from_slice(&9u16.to_be_bytes());
        let info = read(&data);
        assert_eq!(info.metrics.units_per_em, 1000);
    }
}
