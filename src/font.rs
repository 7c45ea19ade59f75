use euclid::default::{Rect, Size2D, Vector2D};

/// Metrics and atlas placement for one glyph at a given size/weight/outline.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Glyph {
    /// Bounding rectangle relative to the baseline pen position. The origin
    /// usually sits above the baseline (negative y) and may be negative-x.
    pub bounds: Rect<f32>,
    /// Region of the glyph atlas texture holding the rasterized glyph.
    pub texture_rect: Rect<i32>,
    /// Horizontal distance the pen moves after placing this glyph.
    pub advance: f32,
}

/// Per-size font metrics consumed by the layout engine.
///
/// Providers are shared and read-mostly: the engine only queries, so one
/// provider instance may serve many text objects at once. Every method takes
/// `&self`; providers that cache internally use interior mutability.
pub trait FontMetrics {
    /// Glyph for a codepoint at a size/weight. A non-zero `outline_thickness`
    /// selects the outline variant, whose bounds and texture region cover the
    /// stroked border.
    fn glyph(&self, codepoint: char, size: u32, bold: bool, outline_thickness: f32) -> Glyph;

    /// Horizontal adjustment between two codepoints. Zero when the font has
    /// no entry for the pair.
    fn kerning(&self, prev: char, cur: char, size: u32, bold: bool) -> f32;

    /// Vertical distance between two consecutive baselines.
    fn line_spacing(&self, size: u32) -> f32;

    /// Offset of the underline below the baseline.
    fn underline_position(&self, size: u32) -> f32;

    /// Thickness of underline and strikethrough lines.
    fn underline_thickness(&self, size: u32) -> f32;

    /// Font-wide pixel offset at [`reference_size`](Self::reference_size).
    /// The engine scales it by `size / reference_size`.
    fn offset(&self) -> Vector2D<f32> {
        Vector2D::zero()
    }

    /// Character size the [`offset`](Self::offset) is expressed at.
    fn reference_size(&self) -> f32 {
        20.0
    }

    /// Dimensions of the glyph atlas texture for a character size.
    fn texture_size(&self, size: u32) -> Size2D<u32>;

    /// Bitmap fonts have a fixed appearance; outline thickness and color
    /// mutations are ignored for them.
    fn is_bitmap(&self) -> bool {
        false
    }
}
