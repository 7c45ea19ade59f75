//! The glyph layout engine: decoded codepoints in, vertex meshes and an
//! exact bounding box out.
//!
//! One pass walks the sequence once, threading a pen and a bounds tracker
//! through every placement decision. Truncation sites all converge on a
//! single finalization path that handles ellipsis emission, decoration
//! lines, and bounds conversion.

use euclid::default::{Point2D, Rect, Size2D};
use euclid::point2;

use crate::bounds::BoundsTracker;
use crate::color::Color;
use crate::font::{FontMetrics, Glyph};
use crate::mesh::VertexBuffer;
use crate::style::{Overflow, Style};

/// Horizontal shear factor applied to italic glyph corners, proportional to
/// their vertical offset from the baseline.
pub const ITALIC_SHEAR: f32 = 0.208;

/// Immutable snapshot of everything one layout pass depends on.
pub struct LayoutInput<'a> {
    pub chars: &'a [char],
    pub font: &'a dyn FontMetrics,
    pub character_size: u32,
    pub style: Style,
    pub overflow: Overflow,
    pub fill_color: Color,
    pub outline_color: Color,
    pub outline_thickness: f32,
    /// Maximum box size; zero on an axis leaves it unconstrained.
    pub max_size: Size2D<f32>,
    /// Bounding box size known before this pass, if any. A positive
    /// component participates in the budget on that axis exactly like
    /// `max_size`; callers that reset their box per pass supply zero.
    pub known_size: Size2D<f32>,
    /// Additive adjustment to the provider's line spacing.
    pub line_spacing_offset: f32,
}

/// Geometry produced by one layout pass.
///
/// Replaced wholesale on every recompute; read-only to the renderer in
/// between. When `outline` is non-empty it is drawn first, then `fill`.
#[derive(Debug)]
pub struct LayoutOutput {
    pub fill: VertexBuffer,
    pub outline: VertexBuffer,
    pub bounds: Rect<f32>,
    pub truncated: bool,
    pub lines: usize,
}

impl Default for LayoutOutput {
    fn default() -> Self {
        Self::empty()
    }
}

impl LayoutOutput {
    /// Zero-size result used by the empty-string and absent-font short
    /// circuits.
    pub fn empty() -> Self {
        Self {
            fill: VertexBuffer::new(),
            outline: VertexBuffer::new(),
            bounds: Rect::zero(),
            truncated: false,
            lines: 0,
        }
    }

    /// Measured size of the laid-out text.
    pub fn size(&self) -> Size2D<f32> {
        self.bounds.size
    }
}

/// Mutable cursor threaded through a layout pass.
struct PenState {
    position: Point2D<f32>,
    prev: Option<char>,
    line: usize,
}

/// Character class evaluated once per codepoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CharClass {
    Space,
    Tab,
    Newline,
    Regular(char),
}

impl CharClass {
    fn of(ch: char) -> Self {
        match ch {
            ' ' => Self::Space,
            '\t' => Self::Tab,
            '\n' => Self::Newline,
            _ => Self::Regular(ch),
        }
    }
}

/// Budget on one axis: the smaller positive constraint, or infinity when
/// neither is set.
fn budget(max: f32, known: f32) -> f32 {
    let mut available = f32::INFINITY;
    if max > 0.0 {
        available = max;
    }
    if known > 0.0 && known < available {
        available = known;
    }
    available
}

/// Lays out a decoded codepoint sequence.
///
/// An empty sequence (or a zero character size) short-circuits to
/// [`LayoutOutput::empty`] without issuing a single glyph or kerning query.
pub fn layout(input: &LayoutInput<'_>) -> LayoutOutput {
    if input.chars.is_empty() || input.character_size == 0 {
        return LayoutOutput::empty();
    }
    LayoutPass::new(input).run()
}

/// Replays the advance, kerning, and whitespace rules of [`layout`] without
/// emitting geometry, returning the local pen position immediately before
/// the codepoint at `index`.
///
/// The index is clamped to the sequence length. The same advance sources
/// drive both this query and [`layout`], so caret placement cannot diverge
/// from rendered glyph placement. Width and height budgets do not apply
/// here; newlines always break.
pub fn caret_position(
    chars: &[char],
    font: &dyn FontMetrics,
    character_size: u32,
    style: Style,
    line_spacing_offset: f32,
    index: usize,
) -> Point2D<f32> {
    let index = index.min(chars.len());
    let bold = style.contains(Style::BOLD);
    let hspace = font.glyph(' ', character_size, bold, 0.0).advance;
    let vspace = font.line_spacing(character_size) + line_spacing_offset;

    let mut position = Point2D::zero();
    let mut prev: Option<char> = None;
    for &ch in &chars[..index] {
        if let Some(previous) = prev {
            position.x += font.kerning(previous, ch, character_size, bold);
        }
        prev = Some(ch);

        match CharClass::of(ch) {
            CharClass::Space => position.x += hspace,
            CharClass::Tab => position.x += hspace * 4.0,
            CharClass::Newline => {
                position.y += vspace;
                position.x = 0.0;
            }
            CharClass::Regular(ch) => {
                position.x += font.glyph(ch, character_size, bold, 0.0).advance;
            }
        }
    }
    position
}

/// State of one in-flight layout pass.
struct LayoutPass<'a> {
    input: &'a LayoutInput<'a>,

    bold: bool,
    shear: f32,
    single_line: bool,
    available_width: f32,
    available_height: f32,
    hspace: f32,
    vspace: f32,
    ellipsis_width: f32,
    line_start_x: f32,
    texture_size: Size2D<u32>,

    pen: PenState,
    bounds: BoundsTracker,
    fill: VertexBuffer,
    outline: VertexBuffer,
    truncated: bool,
}

impl<'a> LayoutPass<'a> {
    fn new(input: &'a LayoutInput<'a>) -> Self {
        let font = input.font;
        let size = input.character_size;
        let bold = input.style.contains(Style::BOLD);
        let shear = if input.style.contains(Style::ITALIC) {
            ITALIC_SHEAR
        } else {
            0.0
        };

        // The pen starts one character size below the local origin (the
        // first baseline), shifted by the font's scaled pixel offset.
        let scale = size as f32 / font.reference_size();
        let offset = font.offset() * scale;
        let start = point2(offset.x, size as f32 + offset.y);

        Self {
            input,
            bold,
            shear,
            single_line: input.overflow == Overflow::Clamp,
            available_width: budget(input.max_size.width, input.known_size.width),
            available_height: budget(input.max_size.height, input.known_size.height),
            hspace: font.glyph(' ', size, bold, 0.0).advance,
            vspace: font.line_spacing(size) + input.line_spacing_offset,
            ellipsis_width: font.glyph('.', size, bold, 0.0).advance * 3.0,
            line_start_x: offset.x,
            texture_size: font.texture_size(size),
            pen: PenState {
                position: start,
                prev: None,
                line: 0,
            },
            bounds: BoundsTracker::starting_at(start),
            fill: VertexBuffer::new(),
            outline: VertexBuffer::new(),
            truncated: false,
        }
    }

    fn run(mut self) -> LayoutOutput {
        for &ch in self.input.chars {
            if let Some(previous) = self.pen.prev {
                self.pen.position.x +=
                    self.input
                        .font
                        .kerning(previous, ch, self.input.character_size, self.bold);
            }
            self.pen.prev = Some(ch);

            match CharClass::of(ch) {
                CharClass::Space => self.bounded_advance(self.hspace),
                CharClass::Tab => self.bounded_advance(self.hspace * 4.0),
                CharClass::Newline => {
                    if self.single_line {
                        // Text stays on one visual line; the break advances
                        // like a space instead.
                        self.bounded_advance(self.hspace);
                    } else {
                        self.break_line();
                        if self.pen.position.y > self.available_height {
                            self.truncated = true;
                            return self.finish();
                        }
                    }
                }
                CharClass::Regular(ch) => {
                    let glyph =
                        self.input
                            .font
                            .glyph(ch, self.input.character_size, self.bold, 0.0);
                    let mut new_x = self.pen.position.x + glyph.advance;

                    if self.single_line {
                        if new_x + self.ellipsis_width > self.available_width {
                            self.truncated = true;
                            if self.pen.position.x + self.ellipsis_width <= self.available_width {
                                return self.finish();
                            }
                            // Not even the ellipsis fits: hard cut.
                            break;
                        }
                    } else if new_x > self.available_width {
                        self.break_line();
                        new_x = self.pen.position.x + glyph.advance;
                        if self.pen.position.y > self.available_height {
                            self.truncated = true;
                            return self.finish();
                        }
                    }

                    self.emit_glyph(ch, &glyph);
                    self.pen.position.x = new_x;
                }
            }
        }
        self.finish()
    }

    /// Whitespace advance, capped at the width budget in single-line mode
    /// and unbounded otherwise. Pure whitespace never triggers truncation.
    fn bounded_advance(&mut self, advance: f32) {
        let new_x = self.pen.position.x + advance;
        if !self.single_line || new_x <= self.available_width {
            self.pen.position.x = new_x;
        }
    }

    fn break_line(&mut self) {
        self.pen.position.y += self.vspace;
        self.pen.position.x = self.line_start_x;
        self.pen.line += 1;
    }

    /// Appends the outline quad (when stroked) and the fill quad for one
    /// glyph, feeding the bounds tracker per emitted quad so outline
    /// expansion dominates the final box.
    fn emit_glyph(&mut self, ch: char, glyph: &Glyph) {
        let thickness = self.input.outline_thickness;
        if thickness != 0.0 {
            let outline_glyph =
                self.input
                    .font
                    .glyph(ch, self.input.character_size, self.bold, thickness);
            self.outline.add_glyph_quad(
                self.pen.position,
                self.input.outline_color,
                &outline_glyph,
                self.shear,
                self.texture_size,
            );
            let expanded = outline_glyph.bounds.inflate(thickness, thickness);
            self.bounds.track(self.pen.position, &expanded, self.shear);
        }

        self.fill.add_glyph_quad(
            self.pen.position,
            self.input.fill_color,
            glyph,
            self.shear,
            self.texture_size,
        );
        self.bounds.track(self.pen.position, &glyph.bounds, self.shear);
    }

    /// Shared finalization reached from every exit: ellipsis emission when a
    /// single-line truncation left room for it, decoration lines for the
    /// terminal line, one upload signal per buffer, bounds conversion.
    fn finish(mut self) -> LayoutOutput {
        if self.truncated
            && self.single_line
            && self.pen.position.x + self.ellipsis_width <= self.available_width
        {
            for _ in 0..3 {
                let dot = self
                    .input
                    .font
                    .glyph('.', self.input.character_size, self.bold, 0.0);
                self.emit_glyph('.', &dot);
                self.pen.position.x += dot.advance;
            }
        }

        let size = self.input.character_size;
        let line_length = self.pen.position.x;

        if self.input.style.contains(Style::UNDERLINED) && line_length > 0.0 {
            let offset = self.input.font.underline_position(size);
            let thickness = self.input.font.underline_thickness(size);
            self.add_decoration(line_length, offset, thickness);
        }

        if self.input.style.contains(Style::STRIKETHROUGH) && line_length > 0.0 {
            let x_bounds = self.input.font.glyph('x', size, self.bold, 0.0).bounds;
            let offset = x_bounds.origin.y + x_bounds.size.height / 2.0;
            let thickness = self.input.font.underline_thickness(size);
            self.add_decoration(line_length, offset, thickness);
        }

        self.fill.mark_changed();
        self.outline.mark_changed();

        LayoutOutput {
            fill: self.fill,
            outline: self.outline,
            bounds: self.bounds.finish(),
            truncated: self.truncated,
            lines: self.pen.line + 1,
        }
    }

    /// Decoration line for the terminal line only, with an outline copy when
    /// stroking is active.
    fn add_decoration(&mut self, length: f32, offset: f32, thickness: f32) {
        let baseline = self.pen.position.y;
        let covered = self.fill.add_line(
            length,
            baseline,
            offset,
            thickness,
            self.input.fill_color,
            0.0,
            self.texture_size,
        );
        self.bounds.include(&covered);

        let outline_thickness = self.input.outline_thickness;
        if outline_thickness != 0.0 {
            let covered = self.outline.add_line(
                length,
                baseline,
                offset,
                thickness,
                self.input.outline_color,
                outline_thickness,
                self.texture_size,
            );
            self.bounds.include(&covered);
        }
    }
}
