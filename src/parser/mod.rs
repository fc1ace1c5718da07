//! Structural PDF parsing: header, cross-reference table, trailer location.

mod structure;
mod xref;

pub use structure::{PdfStructure, StructuralParser};
pub use xref::{XrefEntry, XrefTable};

pub(crate) use structure::{find, parse_integer, skip_whitespace};
