//! Serialization of a document into one classic single-revision PDF.
//!
//! The output layout is: header, catalog, page/content pairs, page tree,
//! info, cross-reference table, trailer. Object numbers are contiguous from
//! 1 and assigned per save; each save is a full stateless rewrite, so the
//! numbering owes nothing to the document's own id counter.

use crate::document::{Document, Metadata};
use crate::error::Result;
use crate::fonts::StandardFont;
use crate::objects::{Dictionary, Object, ObjectId};
use crate::page::Page;
use crate::version::PdfVersion;
use chrono::{DateTime, Utc};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Serializes one document into one output sink.
///
/// Transient: create, call [`write_document`](PdfWriter::write_document)
/// once, drop. A failed write leaves the sink in an undefined state; callers
/// discard it.
pub struct PdfWriter<W: Write> {
    writer: W,
    /// Offsets in emission order, appended the instant each object's
    /// `N 0 obj` token begins.
    offsets: Vec<(ObjectId, u64)>,
    current_position: u64,
}

impl PdfWriter<BufWriter<std::fs::File>> {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::create(path)?;
        Ok(Self::new_with_writer(BufWriter::new(file)))
    }
}

impl<W: Write> PdfWriter<W> {
    pub fn new_with_writer(writer: W) -> Self {
        Self {
            writer,
            offsets: Vec::new(),
            current_position: 0,
        }
    }

    pub fn write_document(&mut self, document: &Document) -> Result<()> {
        self.write_header(document.version())?;

        let catalog_id = ObjectId::new(1, 0);
        let pages_id = ObjectId::new(2, 0);
        self.write_catalog(catalog_id, pages_id)?;

        // Page and content-stream objects come in pairs: 3/4, 5/6, ...
        let mut kids = Vec::new();
        for (i, page) in document.pages().iter().enumerate() {
            let page_id = ObjectId::new(3 + i as u32 * 2, 0);
            let content_id = ObjectId::new(4 + i as u32 * 2, 0);
            self.write_page(page_id, pages_id, content_id, page)?;
            self.write_content_stream(content_id, page)?;
            kids.push(Object::Reference(page_id));
        }

        self.write_page_tree(pages_id, kids)?;

        let info_id = ObjectId::new(3 + document.page_count() as u32 * 2, 0);
        self.write_info(info_id, document.metadata())?;

        let xref_position = self.current_position;
        self.write_xref()?;
        self.write_trailer(catalog_id, info_id, xref_position)?;

        self.writer.flush()?;
        debug!(
            objects = self.offsets.len(),
            xref_position, "document serialized"
        );
        Ok(())
    }

    fn write_header(&mut self, version: PdfVersion) -> Result<()> {
        self.write_bytes(format!("%PDF-{}\n", version.header_token()).as_bytes())?;
        // Binary comment so transports treat the file as binary
        self.write_bytes(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n'])?;
        Ok(())
    }

    fn write_catalog(&mut self, catalog_id: ObjectId, pages_id: ObjectId) -> Result<()> {
        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name("Catalog".to_string()));
        catalog.set("Pages", Object::Reference(pages_id));
        self.write_object(catalog_id, Object::Dictionary(catalog))
    }

    fn write_page(
        &mut self,
        page_id: ObjectId,
        parent_id: ObjectId,
        content_id: ObjectId,
        page: &Page,
    ) -> Result<()> {
        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name("Page".to_string()));
        page_dict.set("Parent", Object::Reference(parent_id));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(page.width()),
                Object::Real(page.height()),
            ]),
        );
        page_dict.set("Contents", Object::Reference(content_id));

        let mut font_dict = Dictionary::new();
        for font in StandardFont::all() {
            let mut font_entry = Dictionary::new();
            font_entry.set("Type", Object::Name("Font".to_string()));
            font_entry.set("Subtype", Object::Name("Type1".to_string()));
            font_entry.set("BaseFont", Object::Name(font.pdf_name().to_string()));
            font_dict.set(font.pdf_name(), Object::Dictionary(font_entry));
        }
        let mut resources = Dictionary::new();
        resources.set("Font", Object::Dictionary(font_dict));
        page_dict.set("Resources", Object::Dictionary(resources));

        self.write_object(page_id, Object::Dictionary(page_dict))
    }

    fn write_content_stream(&mut self, content_id: ObjectId, page: &Page) -> Result<()> {
        let content = page.content().to_vec();
        let mut stream_dict = Dictionary::new();
        stream_dict.set("Length", Object::Integer(content.len() as i64));
        self.write_object(content_id, Object::Stream(stream_dict, content))
    }

    fn write_page_tree(&mut self, pages_id: ObjectId, kids: Vec<Object>) -> Result<()> {
        let mut pages_dict = Dictionary::new();
        pages_dict.set("Type", Object::Name("Pages".to_string()));
        pages_dict.set("Count", Object::Integer(kids.len() as i64));
        pages_dict.set("Kids", Object::Array(kids));
        self.write_object(pages_id, Object::Dictionary(pages_dict))
    }

    fn write_info(&mut self, info_id: ObjectId, metadata: &Metadata) -> Result<()> {
        let mut info_dict = Dictionary::new();

        if let Some(ref title) = metadata.title {
            info_dict.set("Title", Object::String(title.clone()));
        }
        if let Some(ref author) = metadata.author {
            info_dict.set("Author", Object::String(author.clone()));
        }
        if let Some(ref subject) = metadata.subject {
            info_dict.set("Subject", Object::String(subject.clone()));
        }
        if let Some(ref keywords) = metadata.keywords {
            info_dict.set("Keywords", Object::String(keywords.clone()));
        }
        if let Some(ref creator) = metadata.creator {
            info_dict.set("Creator", Object::String(creator.clone()));
        }
        if let Some(ref producer) = metadata.producer {
            info_dict.set("Producer", Object::String(producer.clone()));
        }
        if let Some(creation_date) = metadata.creation_date {
            info_dict.set("CreationDate", Object::String(format_pdf_date(creation_date)));
        }
        if let Some(modification_date) = metadata.modification_date {
            info_dict.set("ModDate", Object::String(format_pdf_date(modification_date)));
        }

        self.write_object(info_id, Object::Dictionary(info_dict))
    }

    /// Emit one indirect object, capturing its offset before any body bytes.
    fn write_object(&mut self, id: ObjectId, object: Object) -> Result<()> {
        self.offsets.push((id, self.current_position));

        let header = format!("{} {} obj\n", id.number(), id.generation());
        self.write_bytes(header.as_bytes())?;
        self.write_object_value(&object)?;
        self.write_bytes(b"\nendobj\n")?;
        Ok(())
    }

    fn write_object_value(&mut self, object: &Object) -> Result<()> {
        match object {
            Object::Null => self.write_bytes(b"null")?,
            Object::Boolean(b) => self.write_bytes(if *b { b"true" } else { b"false" })?,
            Object::Integer(i) => self.write_bytes(i.to_string().as_bytes())?,
            Object::Real(f) => self.write_bytes(
                format!("{f:.6}")
                    .trim_end_matches('0')
                    .trim_end_matches('.')
                    .as_bytes(),
            )?,
            Object::String(s) => {
                self.write_bytes(b"(")?;
                self.write_bytes(&escape_pdf_string(s))?;
                self.write_bytes(b")")?;
            }
            Object::Name(n) => {
                self.write_bytes(b"/")?;
                self.write_bytes(n.as_bytes())?;
            }
            Object::Array(arr) => {
                self.write_bytes(b"[")?;
                for (i, obj) in arr.iter().enumerate() {
                    if i > 0 {
                        self.write_bytes(b" ")?;
                    }
                    self.write_object_value(obj)?;
                }
                self.write_bytes(b"]")?;
            }
            Object::Dictionary(dict) => {
                self.write_bytes(b"<<")?;
                for (key, value) in dict.entries() {
                    self.write_bytes(b"\n/")?;
                    self.write_bytes(key.as_bytes())?;
                    self.write_bytes(b" ")?;
                    self.write_object_value(value)?;
                }
                self.write_bytes(b"\n>>")?;
            }
            Object::Stream(dict, data) => {
                self.write_object_value(&Object::Dictionary(dict.clone()))?;
                self.write_bytes(b"\nstream\n")?;
                self.write_bytes(data)?;
                self.write_bytes(b"\nendstream")?;
            }
            Object::Reference(id) => {
                self.write_bytes(format!("{} {} R", id.number(), id.generation()).as_bytes())?;
            }
        }
        Ok(())
    }

    /// Emit the cross-reference section: one fixed 20-byte row per allocated
    /// object, plus the reserved free entry at slot 0.
    fn write_xref(&mut self) -> Result<()> {
        let mut entries = self.offsets.clone();
        entries.sort_by_key(|(id, _)| id.number());
        debug_assert!(entries
            .iter()
            .enumerate()
            .all(|(i, (id, _))| id.number() == i as u32 + 1));

        self.write_bytes(b"xref\n")?;
        self.write_bytes(format!("0 {}\n", entries.len() + 1).as_bytes())?;
        self.write_bytes(b"0000000000 65535 f \n")?;
        for (id, position) in entries {
            let row = format!("{:010} {:05} n \n", position, id.generation());
            self.write_bytes(row.as_bytes())?;
        }
        Ok(())
    }

    fn write_trailer(
        &mut self,
        catalog_id: ObjectId,
        info_id: ObjectId,
        xref_position: u64,
    ) -> Result<()> {
        let mut trailer = Dictionary::new();
        trailer.set("Size", Object::Integer(self.offsets.len() as i64 + 1));
        trailer.set("Root", Object::Reference(catalog_id));
        trailer.set("Info", Object::Reference(info_id));

        self.write_bytes(b"trailer\n")?;
        self.write_object_value(&Object::Dictionary(trailer))?;
        self.write_bytes(b"\nstartxref\n")?;
        self.write_bytes(xref_position.to_string().as_bytes())?;
        self.write_bytes(b"\n%%EOF\n")?;
        Ok(())
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.current_position += data.len() as u64;
        Ok(())
    }
}

/// Escape `(`, `)`, `\` and control bytes in a literal string.
fn escape_pdf_string(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len() + 8);
    for byte in s.bytes() {
        match byte {
            b'(' | b')' | b'\\' => {
                out.push(b'\\');
                out.push(byte);
            }
            0x00..=0x1F => out.extend_from_slice(format!("\\{byte:03o}").as_bytes()),
            _ => out.push(byte),
        }
    }
    out
}

/// Format a date as a PDF date string: `D:YYYYMMDDHHmmSS+00'00`.
fn format_pdf_date(date: DateTime<Utc>) -> String {
    format!("{}+00'00", date.format("D:%Y%m%d%H%M%S"))
}
