//! Bundled [`FontMetrics`] provider over a fontdue face pair.

use std::collections::HashMap;
use std::sync::Arc;

use euclid::default::{Rect, Size2D, Vector2D};
use euclid::{point2, size2};
use parking_lot::Mutex;

use crate::font::{FontMetrics, Glyph};
use crate::font_book::FontBook;
use crate::glyph_key::GlyphKey;

/// Side length of one atlas page.
const TEXTURE_PAGE: u32 = 1024;
/// Blank pixels kept between neighboring atlas tiles.
const ATLAS_MARGIN: u32 = 2;

/// A regular/bold face pair exposing per-size metrics to the layout engine.
///
/// Glyph lookups are cached per (codepoint, size, weight, outline) key;
/// texture rectangles are assigned from a per-size tile grid, so every glyph
/// of one size receives a stable, non-overlapping atlas region. Rasterizing
/// into those regions is the renderer's concern.
///
/// fontdue exposes no underline table, so underline position and thickness
/// are derived from the character size (12% and 6% respectively).
///
/// All state behind `&self` is mutex-guarded, so one face may be shared by
/// many text objects.
pub struct FontFace {
    regular: Arc<fontdue::Font>,
    bold: Option<Arc<fontdue::Font>>,
    offset: Vector2D<f32>,
    glyphs: Mutex<HashMap<GlyphKey, Glyph, fxhash::FxBuildHasher>>,
    atlases: Mutex<HashMap<u32, AtlasPage, fxhash::FxBuildHasher>>,
}

impl FontFace {
    /// Builds a face pair from already-loaded fonts.
    ///
    /// When no bold face is supplied, bold lookups fall back to the regular
    /// face.
    pub fn new(regular: Arc<fontdue::Font>, bold: Option<Arc<fontdue::Font>>) -> Self {
        Self {
            regular,
            bold,
            offset: Vector2D::zero(),
            glyphs: Mutex::new(HashMap::with_hasher(fxhash::FxBuildHasher::default())),
            atlases: Mutex::new(HashMap::with_hasher(fxhash::FxBuildHasher::default())),
        }
    }

    /// Resolves a regular/bold face pair for a family from a font book.
    ///
    /// Returns `None` when the family has no face at normal weight.
    pub fn from_book(book: &mut FontBook, family: fontdb::Family<'_>) -> Option<Self> {
        let (_, regular) = book.query(&fontdb::Query {
            families: &[family],
            weight: fontdb::Weight::NORMAL,
            ..fontdb::Query::default()
        })?;
        let bold = book
            .query(&fontdb::Query {
                families: &[family],
                weight: fontdb::Weight::BOLD,
                ..fontdb::Query::default()
            })
            .map(|(_, font)| font);
        Some(Self::new(regular, bold))
    }

    /// Overrides the font-wide pixel offset reported to the layout engine,
    /// expressed at [`reference_size`](FontMetrics::reference_size).
    pub fn set_offset(&mut self, offset: Vector2D<f32>) {
        self.offset = offset;
    }

    fn face(&self, bold: bool) -> &Arc<fontdue::Font> {
        if bold {
            self.bold.as_ref().unwrap_or(&self.regular)
        } else {
            &self.regular
        }
    }
}

impl FontMetrics for FontFace {
    fn glyph(&self, codepoint: char, size: u32, bold: bool, outline_thickness: f32) -> Glyph {
        let key = GlyphKey::new(codepoint, size as f32, bold, outline_thickness);
        let mut glyphs = self.glyphs.lock();
        if let Some(glyph) = glyphs.get(&key) {
            return *glyph;
        }

        let face = self.face(bold);
        let index = face.lookup_glyph_index(codepoint);
        let metrics = face.metrics_indexed(index, size as f32);

        let (tile_x, tile_y) = self
            .atlases
            .lock()
            .entry(size)
            .or_insert_with(|| AtlasPage::new(size))
            .allocate();

        // Glyph bounds are baseline-relative: the origin sits above the
        // baseline for ascending shapes and xmin may be negative.
        let mut bounds = Rect::new(
            point2(
                metrics.xmin as f32,
                -(metrics.ymin as f32 + metrics.height as f32),
            ),
            size2(metrics.width as f32, metrics.height as f32),
        );
        let mut texture_rect = Rect::new(
            point2(tile_x, tile_y),
            size2(metrics.width as i32, metrics.height as i32),
        );
        if outline_thickness != 0.0 {
            bounds = bounds.inflate(outline_thickness, outline_thickness);
            let expansion = outline_thickness.round() as i32;
            texture_rect = texture_rect.inflate(expansion, expansion);
        }

        let glyph = Glyph {
            bounds,
            texture_rect,
            advance: metrics.advance_width,
        };
        glyphs.insert(key, glyph);
        glyph
    }

    fn kerning(&self, prev: char, cur: char, size: u32, bold: bool) -> f32 {
        let face = self.face(bold);
        let left = face.lookup_glyph_index(prev);
        let right = face.lookup_glyph_index(cur);
        face.horizontal_kern_indexed(left, right, size as f32)
            .unwrap_or(0.0)
    }

    fn line_spacing(&self, size: u32) -> f32 {
        self.face(false)
            .horizontal_line_metrics(size as f32)
            .map(|metrics| metrics.new_line_size)
            .unwrap_or(size as f32)
    }

    fn underline_position(&self, size: u32) -> f32 {
        size as f32 * 0.12
    }

    fn underline_thickness(&self, size: u32) -> f32 {
        size as f32 * 0.06
    }

    fn offset(&self) -> Vector2D<f32> {
        self.offset
    }

    fn texture_size(&self, _size: u32) -> Size2D<u32> {
        size2(TEXTURE_PAGE, TEXTURE_PAGE)
    }
}

/// Tile-grid placement state for one character size.
struct AtlasPage {
    tile: u32,
    per_axis: u32,
    next: u32,
}

impl AtlasPage {
    fn new(size: u32) -> Self {
        let tile = size + 2 * ATLAS_MARGIN;
        Self {
            tile,
            per_axis: (TEXTURE_PAGE / tile).max(1),
            next: 0,
        }
    }

    /// Origin of the next tile in row-major grid order.
    ///
    /// When the page is exhausted the allocation wraps around and stale
    /// placements are overwritten; callers are warned once.
    fn allocate(&mut self) -> (i32, i32) {
        let capacity = self.per_axis * self.per_axis;
        if self.next == capacity {
            log::warn!(
                "glyph atlas page exhausted ({}px tiles), reusing tiles",
                self.tile
            );
        }
        let index = self.next % capacity;
        self.next = self.next.wrapping_add(1);

        let x = (index % self.per_axis) * self.tile + ATLAS_MARGIN;
        let y = (index / self.per_axis) * self.tile + ATLAS_MARGIN;
        (x as i32, y as i32)
    }
}
