//! A pure-Rust PDF document engine.
//!
//! Provides an in-memory document model, a byte-exact serializer for
//! PDF 1.0 through 2.0, a tolerant structural parser for existing files,
//! and best-effort font-metrics extraction from TrueType and OpenType
//! data. No external PDF libraries, no C dependencies.
//!
//! # Quick start
//!
//! ```rust
//! use vellum_pdf::{Document, Page, Result};
//!
//! fn main() -> Result<()> {
//!     let mut doc = Document::new();
//!     doc.set_title("Hello");
//!
//!     let mut page = Page::a4();
//!     page.set_content(b"BT /Helvetica 24 Tf 72 720 Td (Hello, PDF!) Tj ET".to_vec());
//!     doc.add_page(page);
//!
//!     let bytes = doc.to_bytes()?;
//!     assert!(bytes.starts_with(b"%PDF-2.0"));
//!     assert!(bytes.ends_with(b"%%EOF\n"));
//!     Ok(())
//! }
//! ```

pub mod color;
pub mod document;
pub mod error;
pub mod fonts;
pub mod geometry;
pub mod objects;
pub mod page;
pub mod parser;
pub mod version;
pub mod writer;

pub use color::Color;
pub use document::{Compression, Document, Metadata};
pub use error::{PdfError, Result};
pub use fonts::{Font, FontMetrics, StandardFont};
pub use geometry::{Point, Rectangle};
pub use objects::{Dictionary, Object, ObjectId};
pub use page::Page;
pub use parser::{PdfStructure, StructuralParser, XrefEntry, XrefTable};
pub use version::PdfVersion;
pub use writer::PdfWriter;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
