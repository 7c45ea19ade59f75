//! The lazily-recomputed text object.

use std::sync::Arc;

use euclid::default::{Point2D, Rect, Size2D, Transform2D};

use crate::codepoint;
use crate::color::Color;
use crate::font::FontMetrics;
use crate::layout::{self, LayoutInput, LayoutOutput};
use crate::style::{Overflow, Style};

const DEFAULT_CHARACTER_SIZE: u32 = 20;

/// A string with layout parameters and a cached mesh.
///
/// Every setter compares against the stored value and drops the cached
/// geometry only on a real change; changing only a color rewrites the
/// existing vertex colors in place instead of relaying out. Accessors
/// recompute on demand, so repeated queries between mutations are cheap.
///
/// A `Text` is single-writer: the cached buffers are owned exclusively by
/// this object and are not safe for concurrent mutation. The font provider
/// is only ever queried, never mutated, so one provider may back many text
/// objects.
///
/// Drawing: when the outline thickness is non-zero the outline buffer is
/// drawn first, then the fill buffer, both with the same transform and the
/// glyph atlas texture for the current character size.
pub struct Text {
    string: String,
    chars: Vec<char>,
    font: Option<Arc<dyn FontMetrics>>,
    character_size: u32,
    style: Style,
    overflow: Overflow,
    fill_color: Color,
    outline_color: Color,
    outline_thickness: f32,
    max_size: Size2D<f32>,
    line_spacing_offset: f32,
    cache: Option<LayoutOutput>,
}

impl Default for Text {
    fn default() -> Self {
        Self::empty()
    }
}

impl Text {
    pub fn new(string: impl Into<String>, character_size: u32, font: Arc<dyn FontMetrics>) -> Self {
        let mut text = Self::empty();
        text.string = string.into();
        text.chars = codepoint::decode_str(&text.string);
        text.character_size = character_size;
        text.font = Some(font);
        text
    }

    /// A text with no font attached; nothing is laid out until one is set.
    pub fn empty() -> Self {
        Self {
            string: String::new(),
            chars: Vec::new(),
            font: None,
            character_size: DEFAULT_CHARACTER_SIZE,
            style: Style::REGULAR,
            overflow: Overflow::Clamp,
            fill_color: Color::WHITE,
            outline_color: Color::BLACK,
            outline_thickness: 0.0,
            max_size: Size2D::zero(),
            line_spacing_offset: 0.0,
            cache: None,
        }
    }
}

/// Setters. Each one invalidates the cached geometry only when the stored
/// value actually changes.
impl Text {
    pub fn set_string(&mut self, string: impl Into<String>) {
        let string = string.into();
        if self.string != string {
            self.chars = codepoint::decode_str(&string);
            self.string = string;
            self.cache = None;
        }
    }

    /// Replaces the string from raw bytes, substituting ill-formed
    /// sequences deterministically.
    pub fn set_bytes(&mut self, bytes: &[u8]) {
        let chars = codepoint::decode_lossy(bytes);
        if self.chars != chars {
            self.string = chars.iter().collect();
            self.chars = chars;
            self.cache = None;
        }
    }

    pub fn set_font(&mut self, font: Arc<dyn FontMetrics>) {
        let changed = match &self.font {
            Some(current) => !Arc::ptr_eq(current, &font),
            None => true,
        };
        if changed {
            self.font = Some(font);
            self.cache = None;
        }
    }

    pub fn set_character_size(&mut self, size: u32) {
        if self.character_size != size {
            self.character_size = size;
            self.cache = None;
        }
    }

    pub fn set_style(&mut self, style: Style) {
        if self.style != style {
            self.style = style;
            self.cache = None;
        }
    }

    pub fn set_overflow(&mut self, overflow: Overflow) {
        if self.overflow != overflow {
            self.overflow = overflow;
            self.cache = None;
        }
    }

    pub fn set_fill_color(&mut self, color: Color) {
        if self.fill_color != color {
            self.fill_color = color;
            if let Some(cache) = &mut self.cache {
                cache.fill.set_color(color);
            }
        }
    }

    pub fn set_outline_color(&mut self, color: Color) {
        if self.is_bitmap_font() {
            log::warn!("outline color change ignored for bitmap font");
            return;
        }
        if self.outline_color != color {
            self.outline_color = color;
            if let Some(cache) = &mut self.cache {
                cache.outline.set_color(color);
            }
        }
    }

    pub fn set_outline_thickness(&mut self, thickness: f32) {
        if self.is_bitmap_font() {
            log::warn!("outline thickness change ignored for bitmap font");
            return;
        }
        if self.outline_thickness != thickness {
            self.outline_thickness = thickness;
            self.cache = None;
        }
    }

    /// Maximum box size; zero on an axis leaves it unconstrained.
    pub fn set_max_size(&mut self, size: Size2D<f32>) {
        if self.max_size != size {
            self.max_size = size;
            self.cache = None;
        }
    }

    /// Additive adjustment to the font's line spacing.
    pub fn set_line_spacing_offset(&mut self, offset: f32) {
        if self.line_spacing_offset != offset {
            self.line_spacing_offset = offset;
            self.cache = None;
        }
    }
}

/// Getters.
impl Text {
    pub fn string(&self) -> &str {
        &self.string
    }

    pub fn font(&self) -> Option<&Arc<dyn FontMetrics>> {
        self.font.as_ref()
    }

    pub fn character_size(&self) -> u32 {
        self.character_size
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn overflow(&self) -> Overflow {
        self.overflow
    }

    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    pub fn outline_color(&self) -> Color {
        self.outline_color
    }

    pub fn outline_thickness(&self) -> f32 {
        self.outline_thickness
    }

    pub fn max_size(&self) -> Size2D<f32> {
        self.max_size
    }

    pub fn line_spacing_offset(&self) -> f32 {
        self.line_spacing_offset
    }
}

/// Accessors. Each recomputes the geometry first if any input changed since
/// the last pass.
impl Text {
    /// The cached geometry, recomputed if dirty.
    pub fn geometry(&mut self) -> &LayoutOutput {
        if self.cache.is_none() {
            let output = self.compute_layout();
            self.cache = Some(output);
        }
        self.cache.as_ref().expect("geometry computed above")
    }

    /// Bounding rectangle of the laid-out text in local coordinates.
    pub fn local_bounds(&mut self) -> Rect<f32> {
        self.geometry().bounds
    }

    /// Local bounds mapped through the caller's composed transform.
    pub fn global_bounds(&mut self, transform: &Transform2D<f32>) -> Rect<f32> {
        let bounds = self.local_bounds();
        transform.outer_transformed_rect(&bounds)
    }

    /// Measured size of the laid-out text.
    pub fn size(&mut self) -> Size2D<f32> {
        self.geometry().size()
    }

    /// Whether the last layout hit a width/height budget and cut the text.
    pub fn truncated(&mut self) -> bool {
        self.geometry().truncated
    }

    /// Local pen position immediately before the codepoint at `index`.
    ///
    /// The index is clamped to the decoded length; indices count Unicode
    /// scalar values, not bytes. Returns the zero position when no font is
    /// set.
    pub fn find_character_pos(&self, index: usize) -> Point2D<f32> {
        let Some(font) = &self.font else {
            return Point2D::zero();
        };
        if self.character_size == 0 {
            return Point2D::zero();
        }
        layout::caret_position(
            &self.chars,
            font.as_ref(),
            self.character_size,
            self.style,
            self.line_spacing_offset,
            index,
        )
    }

    fn compute_layout(&self) -> LayoutOutput {
        let Some(font) = &self.font else {
            return LayoutOutput::empty();
        };
        if self.chars.is_empty() || self.character_size == 0 {
            return LayoutOutput::empty();
        }
        layout::layout(&LayoutInput {
            chars: &self.chars,
            font: font.as_ref(),
            character_size: self.character_size,
            style: self.style,
            overflow: self.overflow,
            fill_color: self.fill_color,
            outline_color: self.outline_color,
            outline_thickness: self.outline_thickness,
            max_size: self.max_size,
            // The box is rebuilt from scratch every pass, so no earlier
            // bounds constrain this one.
            known_size: Size2D::zero(),
            line_spacing_offset: self.line_spacing_offset,
        })
    }

    fn is_bitmap_font(&self) -> bool {
        self.font.as_ref().is_some_and(|font| font.is_bitmap())
    }
}
