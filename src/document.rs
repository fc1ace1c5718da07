//! The document aggregate: pages, fonts, metadata, identifiers.

use crate::error::{PdfError, Result};
use crate::fonts::Font;
use crate::objects::ObjectId;
use crate::page::Page;
use crate::parser::{find, parse_integer, skip_whitespace, PdfStructure, StructuralParser};
use crate::version::PdfVersion;
use crate::writer::PdfWriter;
use chrono::{DateTime, Utc};
use tracing::debug;

/// How far past the Info object's offset the metadata scan looks.
const INFO_SCAN_WINDOW: usize = 2048;

/// Document information dictionary fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,
    /// Document author
    pub author: Option<String>,
    /// Document subject
    pub subject: Option<String>,
    /// Document keywords
    pub keywords: Option<String>,
    /// Software that created the original document
    pub creator: Option<String>,
    /// Software that produced the PDF
    pub producer: Option<String>,
    /// Date and time the document was created
    pub creation_date: Option<DateTime<Utc>>,
    /// Date and time the document was last modified
    pub modification_date: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Metadata for a freshly created document: this library as producer,
    /// both dates stamped now.
    pub fn for_new_document() -> Self {
        let now = Utc::now();
        Self {
            creator: Some("vellum_pdf".to_string()),
            producer: Some(format!("vellum_pdf v{}", env!("CARGO_PKG_VERSION"))),
            creation_date: Some(now),
            modification_date: Some(now),
            ..Default::default()
        }
    }
}

/// Compression method recorded on a document.
///
/// Recorded only: the writer never actually compresses stream bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    #[default]
    None,
    Flate,
}

/// A PDF document that can contain multiple pages and metadata.
///
/// The document exclusively owns its pages and fonts; dropping it drops
/// them. All mutation assumes a single caller at a time.
///
/// # Example
///
/// ```rust
/// use vellum_pdf::{Document, Page, Result};
///
/// # fn main() -> Result<()> {
/// let mut doc = Document::new();
/// doc.set_title("My Document");
///
/// let mut page = Page::a4();
/// page.set_content(b"BT /Helvetica 12 Tf 72 720 Td (Hi) Tj ET".to_vec());
/// doc.add_page(page);
///
/// let bytes = doc.to_bytes()?;
/// assert!(bytes.starts_with(b"%PDF-"));
/// # Ok(())
/// # }
/// ```
pub struct Document {
    version: PdfVersion,
    pages: Vec<Page>,
    fonts: Vec<Font>,
    metadata: Metadata,
    compression: Compression,
    next_object_id: u32,
}

impl Document {
    /// Creates a new empty document at the newest supported version.
    pub fn new() -> Self {
        Self {
            version: PdfVersion::latest(),
            pages: Vec::new(),
            fonts: Vec::new(),
            metadata: Metadata::for_new_document(),
            compression: Compression::default(),
            next_object_id: 1,
        }
    }

    /// Builds a document from the bytes of an existing PDF.
    ///
    /// Parses the structural index (version, cross-reference table, trailer
    /// location) and recovers Info metadata by scanning raw bytes near the
    /// resolved `/Info` offset. Success means "index built": files using
    /// cross-reference streams, object streams or encryption are not
    /// detected and simply yield an incomplete index. Page content is not
    /// reconstructed.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let structure = StructuralParser::new(data).parse()?;

        let mut doc = Self::new();
        doc.version = structure.version;
        doc.metadata = recover_metadata(data, &structure);
        debug!(version = %doc.version, "opened document");
        Ok(doc)
    }

    /// Reads and parses a PDF file.
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Appends a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Inserts a page at `index`, shifting later pages.
    pub fn insert_page(&mut self, index: usize, page: Page) -> Result<()> {
        if index > self.pages.len() {
            return Err(PdfError::InvalidPageIndex(index));
        }
        self.pages.insert(index, page);
        Ok(())
    }

    /// Removes and returns the page at `index`.
    ///
    /// On an out-of-range index the page list is left untouched.
    pub fn remove_page(&mut self, index: usize) -> Result<Page> {
        if index >= self.pages.len() {
            return Err(PdfError::InvalidPageIndex(index));
        }
        Ok(self.pages.remove(index))
    }

    pub fn get_page(&self, index: usize) -> Result<&Page> {
        self.pages
            .get(index)
            .ok_or(PdfError::InvalidPageIndex(index))
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub(crate) fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Replaces the document metadata, stamping the modification date now.
    pub fn set_metadata(&mut self, metadata: Metadata) {
        self.metadata = metadata;
        self.metadata.modification_date = Some(Utc::now());
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Sets the document title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.metadata.title = Some(title.into());
    }

    /// Sets the document author.
    pub fn set_author(&mut self, author: impl Into<String>) {
        self.metadata.author = Some(author.into());
    }

    /// Sets the document subject.
    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.metadata.subject = Some(subject.into());
    }

    /// Sets the document keywords.
    pub fn set_keywords(&mut self, keywords: impl Into<String>) {
        self.metadata.keywords = Some(keywords.into());
    }

    pub fn set_version(&mut self, version: PdfVersion) {
        self.version = version;
    }

    pub fn version(&self) -> PdfVersion {
        self.version
    }

    /// Records a compression method. Recorded only; stream bytes are always
    /// written uncompressed.
    pub fn set_compression(&mut self, compression: Compression) {
        self.compression = compression;
    }

    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Adds a font to the document's font list.
    pub fn add_font(&mut self, font: Font) {
        self.fonts.push(font);
    }

    /// Looks up a font by name.
    pub fn font(&self, name: &str) -> Result<&Font> {
        self.fonts
            .iter()
            .find(|font| font.name() == name)
            .ok_or_else(|| PdfError::FontNotFound(name.to_string()))
    }

    pub fn fonts(&self) -> &[Font] {
        &self.fonts
    }

    /// Hands out the next object identifier.
    ///
    /// Identifiers are strictly increasing for the lifetime of the document
    /// and never reused, merges included.
    pub fn allocate_object_id(&mut self) -> ObjectId {
        let id = ObjectId::new(self.next_object_id, 0);
        self.next_object_id += 1;
        id
    }

    /// Deep-clones every page of `other` into this document.
    ///
    /// Identifier space stays this document's own: fresh ids are reserved
    /// for the incoming pages and their content streams, so ids keep
    /// strictly increasing across merges.
    pub fn merge(&mut self, other: &Document) {
        for page in &other.pages {
            // one id for the page object, one for its content stream
            self.allocate_object_id();
            self.allocate_object_id();
            self.pages.push(page.clone());
        }
    }

    /// Produces one standalone single-page document per page.
    ///
    /// Each clone carries this document's version, metadata and compression
    /// setting.
    pub fn split(&self) -> Vec<Document> {
        self.pages
            .iter()
            .map(|page| {
                let mut doc = Document::new();
                doc.version = self.version;
                doc.metadata = self.metadata.clone();
                doc.compression = self.compression;
                doc.add_page(page.clone());
                doc
            })
            .collect()
    }

    /// Serializes the document into a byte buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let mut writer = PdfWriter::new_with_writer(&mut buffer);
        writer.write_document(self)?;
        Ok(buffer)
    }

    /// Serializes the document to a file.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let mut writer = PdfWriter::new(path)?;
        writer.write_document(self)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Recover Info metadata from raw bytes.
///
/// Resolves the trailer's `/Info N G R` reference through the
/// cross-reference index, then scans a bounded window past that offset for
/// literal key tokens. Deliberately a byte heuristic, not a dictionary
/// parse; values past the window or in exotic encodings are missed.
fn recover_metadata(data: &[u8], structure: &PdfStructure) -> Metadata {
    let mut metadata = Metadata::default();

    let Some(info_offset) = resolve_info_offset(data, structure) else {
        return metadata;
    };
    let end = (info_offset + INFO_SCAN_WINDOW).min(data.len());
    let window = &data[info_offset..end];

    metadata.title = find_pdf_string(window, "/Title");
    metadata.author = find_pdf_string(window, "/Author");
    metadata.subject = find_pdf_string(window, "/Subject");
    metadata.keywords = find_pdf_string(window, "/Keywords");
    metadata.creator = find_pdf_string(window, "/Creator");
    metadata.producer = find_pdf_string(window, "/Producer");
    metadata
}

/// Find the trailer's `/Info N G R` reference and map it to a byte offset
/// through the cross-reference index.
fn resolve_info_offset(data: &[u8], structure: &PdfStructure) -> Option<usize> {
    let trailer_pos = structure.trailer_pos?;
    let tail = &data[trailer_pos..];
    let key = find(tail, b"/Info")?;

    let mut pos = key + b"/Info".len();
    skip_whitespace(tail, &mut pos);
    let object_number = parse_integer(tail, &mut pos).ok()? as u32;

    let offset = structure.xref.offset_of(object_number)?;
    usize::try_from(offset).ok().filter(|&o| o < data.len())
}

/// Scan `window` for `key` followed by a string value.
///
/// Handles parenthesized literals (balanced nesting, backslash escapes) and
/// `<..>` hex strings. First match wins. Returns `None` when the key is
/// absent or no string follows it.
pub(crate) fn find_pdf_string(window: &[u8], key: &str) -> Option<String> {
    let key_pos = find(window, key.as_bytes())?;
    let mut pos = key_pos + key.len();
    skip_whitespace(window, &mut pos);

    match window.get(pos)? {
        b'(' => parse_literal_string(window, pos + 1),
        b'<' => parse_hex_string(window, pos + 1),
        _ => None,
    }
}

fn parse_literal_string(window: &[u8], mut pos: usize) -> Option<String> {
    let mut depth = 1u32;
    let mut out = Vec::new();

    while let Some(&byte) = window.get(pos) {
        match byte {
            b'\\' => {
                pos += 1;
                let &escaped = window.get(pos)?;
                match escaped {
                    b'n' => out.push(b'\n'),
                    b'r' => out.push(b'\r'),
                    b't' => out.push(b'\t'),
                    // up to three octal digits, high bits discarded
                    b'0'..=b'7' => {
                        let mut value = u16::from(escaped - b'0');
                        for _ in 1..3 {
                            match window.get(pos + 1) {
                                Some(&digit @ b'0'..=b'7') => {
                                    value = value * 8 + u16::from(digit - b'0');
                                    pos += 1;
                                }
                                _ => break,
                            }
                        }
                        out.push(value as u8);
                    }
                    other => out.push(other),
                }
            }
            b'(' => {
                depth += 1;
                out.push(byte);
            }
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(String::from_utf8_lossy(&out).into_owned());
                }
                out.push(byte);
            }
            other => out.push(other),
        }
        pos += 1;
    }
    // ran off the window before the string closed
    None
}

fn parse_hex_string(window: &[u8], mut pos: usize) -> Option<String> {
    let mut digits = Vec::new();
    loop {
        let &byte = window.get(pos)?;
        match byte {
            b'>' => break,
            b if b.is_ascii_hexdigit() => digits.push(b),
            b' ' | b'\t' | b'\r' | b'\n' => {}
            _ => return None,
        }
        pos += 1;
    }
    // odd digit counts get an implicit trailing zero
    if digits.len() % 2 == 1 {
        digits.push(b'0');
    }

    let bytes: Vec<u8> = digits
        .chunks_exact(2)
        .map(|pair| {
            let hi = (pair[0] as char).to_digit(16).unwrap_or(0) as u8;
            let lo = (pair[1] as char).to_digit(16).unwrap_or(0) as u8;
            (hi << 4) | lo
        })
        .collect();
    Some(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document() {
        let doc = Document::new();
        assert_eq!(doc.page_count(), 0);
        assert_eq!(doc.version(), PdfVersion::latest());
        assert_eq!(doc.compression(), Compression::None);
        assert_eq!(doc.metadata().creator, Some("vellum_pdf".to_string()));
        assert!(doc.metadata().creation_date.is_some());
    }

    #[test]
    fn test_add_insert_remove_pages() {
        let mut doc = Document::new();
        doc.add_page(Page::a4());
        doc.add_page(Page::letter());
        assert_eq!(doc.page_count(), 2);

        doc.insert_page(1, Page::legal()).unwrap();
        assert_eq!(doc.page_count(), 3);
        assert_eq!(doc.get_page(1).unwrap().height(), 1008.0);

        let removed = doc.remove_page(1).unwrap();
        assert_eq!(removed.height(), 1008.0);
        assert_eq!(doc.page_count(), 2);
    }

    #[test]
    fn test_remove_page_out_of_range_leaves_pages_untouched() {
        let mut doc = Document::new();
        doc.add_page(Page::a4());

        let result = doc.remove_page(1);
        assert!(matches!(result, Err(PdfError::InvalidPageIndex(1))));
        assert_eq!(doc.page_count(), 1);

        let result = doc.remove_page(usize::MAX);
        assert!(matches!(result, Err(PdfError::InvalidPageIndex(_))));
        assert_eq!(doc.page_count(), 1);
    }

    #[test]
    fn test_insert_page_out_of_range() {
        let mut doc = Document::new();
        let result = doc.insert_page(1, Page::a4());
        assert!(matches!(result, Err(PdfError::InvalidPageIndex(1))));
        assert_eq!(doc.page_count(), 0);
    }

    #[test]
    fn test_get_page_out_of_range() {
        let doc = Document::new();
        assert!(matches!(
            doc.get_page(0),
            Err(PdfError::InvalidPageIndex(0))
        ));
    }

    #[test]
    fn test_set_metadata_stamps_modification_date() {
        let mut doc = Document::new();
        let metadata = Metadata {
            title: Some("Stamped".to_string()),
            ..Default::default()
        };
        doc.set_metadata(metadata);

        assert_eq!(doc.metadata().title, Some("Stamped".to_string()));
        assert!(doc.metadata().modification_date.is_some());
    }

    #[test]
    fn test_allocate_object_id_strictly_increasing() {
        let mut doc = Document::new();
        let a = doc.allocate_object_id();
        let b = doc.allocate_object_id();
        assert_eq!(a.number(), 1);
        assert_eq!(b.number(), 2);
        assert_eq!(a.generation(), 0);
    }

    #[test]
    fn test_merge_clones_pages_and_advances_ids() {
        let mut target = Document::new();
        target.add_page(Page::a4());
        let before = target.allocate_object_id().number();

        let mut source = Document::new();
        source.add_page(Page::letter());
        source.add_page(Page::legal());

        target.merge(&source);
        assert_eq!(target.page_count(), 3);
        assert_eq!(source.page_count(), 2);

        let after = target.allocate_object_id().number();
        assert!(after > before + 2 * source.page_count() as u32);
    }

    #[test]
    fn test_split_produces_standalone_documents() {
        let mut doc = Document::new();
        doc.set_version(PdfVersion::V1_5);
        doc.set_title("Split Me");
        doc.add_page(Page::a4());
        doc.add_page(Page::letter());

        let parts = doc.split();
        assert_eq!(parts.len(), 2);
        for part in &parts {
            assert_eq!(part.page_count(), 1);
            assert_eq!(part.version(), PdfVersion::V1_5);
            assert_eq!(part.metadata().title, Some("Split Me".to_string()));
        }
        assert_eq!(parts[0].get_page(0).unwrap().width(), 595.0);
        assert_eq!(parts[1].get_page(0).unwrap().width(), 612.0);
    }

    #[test]
    fn test_font_lookup() {
        use crate::fonts::{Font, StandardFont};

        let mut doc = Document::new();
        doc.add_font(Font::standard(StandardFont::Courier));

        assert!(doc.font("Courier").is_ok());
        assert!(matches!(
            doc.font("Garamond"),
            Err(PdfError::FontNotFound(_))
        ));
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        assert!(matches!(
            Document::from_bytes(b"not a pdf"),
            Err(PdfError::InvalidPdf(_))
        ));
        assert!(matches!(
            Document::from_bytes(b""),
            Err(PdfError::InvalidPdf(_))
        ));
    }

    #[test]
    fn test_find_pdf_string_balanced_nesting() {
        let window = b"/Title (Test (Nested) Document)";
        assert_eq!(
            find_pdf_string(window, "/Title"),
            Some("Test (Nested) Document".to_string())
        );
    }

    #[test]
    fn test_find_pdf_string_missing_key() {
        assert_eq!(find_pdf_string(b"/Author (Someone)", "/Title"), None);
    }

    #[test]
    fn test_find_pdf_string_escapes() {
        let window = br"/Title (Paren \(deep\) \\ done)";
        assert_eq!(
            find_pdf_string(window, "/Title"),
            Some(r"Paren (deep) \ done".to_string())
        );
    }

    #[test]
    fn test_find_pdf_string_octal_escapes() {
        let window = br"/Title (tab\011sep\012line)";
        assert_eq!(
            find_pdf_string(window, "/Title"),
            Some("tab\tsep\nline".to_string())
        );

        // short octal run ends at the first non-octal byte
        let window = br"/Title (\08)";
        assert_eq!(find_pdf_string(window, "/Title"), Some("\08".to_string()));
    }

    #[test]
    fn test_control_bytes_in_title_round_trip() {
        let mut doc = Document::new();
        doc.set_title("a\tb\nc");
        doc.add_page(Page::a4());

        let bytes = doc.to_bytes().unwrap();
        let reopened = Document::from_bytes(&bytes).unwrap();
        assert_eq!(reopened.metadata().title, Some("a\tb\nc".to_string()));
    }

    #[test]
    fn test_find_pdf_string_hex() {
        // "Hi!" = 48 69 21
        let window = b"/Title <486921>";
        assert_eq!(find_pdf_string(window, "/Title"), Some("Hi!".to_string()));

        // odd digit count pads with zero: "H" then 0x20
        let window = b"/Title <4869210>";
        assert_eq!(find_pdf_string(window, "/Title"), Some("Hi!\0".to_string()));
    }

    #[test]
    fn test_find_pdf_string_unterminated() {
        assert_eq!(find_pdf_string(b"/Title (never closes", "/Title"), None);
        assert_eq!(find_pdf_string(b"/Title <4869", "/Title"), None);
    }

    #[test]
    fn test_find_pdf_string_no_string_value() {
        assert_eq!(find_pdf_string(b"/Title 42", "/Title"), None);
    }

    #[test]
    fn test_open_written_document_recovers_metadata() {
        let mut doc = Document::new();
        doc.set_version(PdfVersion::V1_6);
        doc.set_title("Round Trip");
        doc.set_author("An Author");
        doc.set_subject("Byte scanning");
        doc.add_page(Page::a4());

        let bytes = doc.to_bytes().unwrap();
        let reopened = Document::from_bytes(&bytes).unwrap();

        assert_eq!(reopened.version(), PdfVersion::V1_6);
        assert_eq!(reopened.metadata().title, Some("Round Trip".to_string()));
        assert_eq!(reopened.metadata().author, Some("An Author".to_string()));
        assert_eq!(
            reopened.metadata().subject,
            Some("Byte scanning".to_string())
        );
    }
}
