use crate::geometry::Rectangle;

/// A single page in a PDF document.
///
/// A page is a size in points plus its already-rendered content-stream bytes.
/// How those bytes were produced (text operators, graphics, ...) is opaque to
/// this engine; the writer serializes them verbatim.
///
/// # Example
///
/// ```rust
/// use vellum_pdf::Page;
///
/// let mut page = Page::a4();
/// page.set_content(b"BT /Helvetica 12 Tf 72 720 Td (Hello) Tj ET".to_vec());
/// assert_eq!(page.width(), 595.0);
/// ```
#[derive(Debug, Clone)]
pub struct Page {
    width: f64,
    height: f64,
    content: Vec<u8>,
}

impl Page {
    /// Creates a new page with the specified width and height in points.
    ///
    /// Points are 1/72 of an inch.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            content: Vec::new(),
        }
    }

    /// Creates a new A4 page (595 x 842 points).
    pub fn a4() -> Self {
        Self::new(595.0, 842.0)
    }

    /// Creates a new US Letter page (612 x 792 points).
    pub fn letter() -> Self {
        Self::new(612.0, 792.0)
    }

    /// Creates a new US Legal page (612 x 1008 points).
    pub fn legal() -> Self {
        Self::new(612.0, 1008.0)
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// The page media box: `[0 0 width height]`.
    pub fn media_box(&self) -> Rectangle {
        Rectangle::from_position_and_size(0.0, 0.0, self.width, self.height)
    }

    /// Replaces the page's content-stream bytes.
    pub fn set_content(&mut self, content: Vec<u8>) {
        self.content = content;
    }

    /// The pre-rendered content-stream bytes for this page.
    pub fn content(&self) -> &[u8] {
        &self.content
    }
}
