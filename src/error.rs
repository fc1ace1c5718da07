use thiserror::Error;

/// Errors produced while building, writing or parsing PDF documents.
#[derive(Error, Debug)]
pub enum PdfError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid PDF: {0}")]
    InvalidPdf(String),

    #[error("Invalid page index: {0}")]
    InvalidPageIndex(usize),

    #[error("Font error: {0}")]
    FontError(String),

    #[error("Font not found: {0}")]
    FontNotFound(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

pub type Result<T> = std::result::Result<T, PdfError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_error_display() {
        let error = PdfError::InvalidPdf("missing header".to_string());
        assert_eq!(error.to_string(), "Invalid PDF: missing header");

        let error = PdfError::InvalidPageIndex(7);
        assert_eq!(error.to_string(), "Invalid page index: 7");

        let error = PdfError::FontNotFound("Garamond".to_string());
        assert_eq!(error.to_string(), "Font not found: Garamond");
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = IoError::new(ErrorKind::NotFound, "file not found");
        let pdf_error = PdfError::from(io_error);

        match pdf_error {
            PdfError::Io(ref err) => assert_eq!(err.kind(), ErrorKind::NotFound),
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_error_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PdfError>();
    }

    #[test]
    fn test_all_variants_display() {
        let errors = vec![
            PdfError::InvalidPdf("bad xref".to_string()),
            PdfError::InvalidPageIndex(0),
            PdfError::FontError("truncated table".to_string()),
            PdfError::FontNotFound("missing".to_string()),
            PdfError::InvalidOperation("empty range".to_string()),
        ];

        for error in errors {
            assert!(!error.to_string().is_empty());
        }
    }
}
