//! Triangle-list vertex emission for glyph quads and decoration lines.

use bytemuck::{Pod, Zeroable};
use euclid::default::{Point2D, Rect, Size2D};
use euclid::{point2, size2};

use crate::color::Color;
use crate::font::Glyph;

/// Position/UV padding added around each glyph quad so bilinear sampling
/// never bleeds into neighboring atlas entries.
const GLYPH_PADDING: f32 = 1.0;

/// One vertex of the produced triangle lists.
///
/// `Pod` so renderer integrations can cast whole buffers to bytes for upload.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
    pub color: [f32; 4],
}

/// Growable triangle list with an upload-generation counter.
///
/// The generation bumps once per recompute (or per in-place color rewrite),
/// never per vertex; renderers compare it against the generation of their
/// last upload to decide whether the buffer contents changed.
#[derive(Clone, Debug, Default)]
pub struct VertexBuffer {
    vertices: Vec<Vertex>,
    generation: u64,
}

impl VertexBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Raw vertex bytes for upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Signals that the buffer contents changed and need a re-upload.
    pub fn mark_changed(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Rewrites every vertex color in place and signals the change.
    pub fn set_color(&mut self, color: Color) {
        let color = color.to_array();
        for vertex in &mut self.vertices {
            vertex.color = color;
        }
        self.mark_changed();
    }

    /// Appends a glyph quad at a pen position.
    ///
    /// The quad is padded by one pixel on every side, in both positions and
    /// texture coordinates. A non-zero `shear` shifts corners left in
    /// proportion to their vertical offset, the top and bottom edges
    /// independently.
    pub fn add_glyph_quad(
        &mut self,
        position: Point2D<f32>,
        color: Color,
        glyph: &Glyph,
        shear: f32,
        texture_size: Size2D<u32>,
    ) {
        let left = glyph.bounds.origin.x - GLYPH_PADDING;
        let top = glyph.bounds.origin.y - GLYPH_PADDING;
        let right = glyph.bounds.origin.x + glyph.bounds.size.width + GLYPH_PADDING;
        let bottom = glyph.bounds.origin.y + glyph.bounds.size.height + GLYPH_PADDING;

        let tex = texture_size.to_f32();
        let u1 = (glyph.texture_rect.origin.x as f32 - GLYPH_PADDING) / tex.width;
        let v1 = (glyph.texture_rect.origin.y as f32 - GLYPH_PADDING) / tex.height;
        let u2 = ((glyph.texture_rect.origin.x + glyph.texture_rect.size.width) as f32
            + GLYPH_PADDING)
            / tex.width;
        let v2 = ((glyph.texture_rect.origin.y + glyph.texture_rect.size.height) as f32
            + GLYPH_PADDING)
            / tex.height;

        self.push_quad(
            [
                [position.x + left - shear * top, position.y + top],
                [position.x + right - shear * top, position.y + top],
                [position.x + left - shear * bottom, position.y + bottom],
                [position.x + right - shear * bottom, position.y + bottom],
            ],
            [[u1, v1], [u2, v1], [u1, v2], [u2, v2]],
            color.to_array(),
        );
    }

    /// Appends an underline/strikethrough quad and returns the rectangle it
    /// covers.
    ///
    /// The top edge snaps to `floor(baseline + offset - thickness/2 + 0.5)`
    /// and the bottom to `top + floor(thickness + 0.5)`, replicating hinted
    /// line placement. The quad grows by `outline_expansion` on every side.
    /// Texture coordinates are a fixed single texel.
    pub fn add_line(
        &mut self,
        length: f32,
        baseline: f32,
        offset: f32,
        thickness: f32,
        color: Color,
        outline_expansion: f32,
        texture_size: Size2D<u32>,
    ) -> Rect<f32> {
        let top = (baseline + offset - thickness / 2.0 + 0.5).floor();
        let bottom = top + (thickness + 0.5).floor();

        let tex = texture_size.to_f32();
        let uv = [1.0 / tex.width, 1.0 / tex.height];

        let x0 = -outline_expansion;
        let x1 = length + outline_expansion;
        let y0 = top - outline_expansion;
        let y1 = bottom + outline_expansion;

        self.push_quad(
            [[x0, y0], [x1, y0], [x0, y1], [x1, y1]],
            [uv, uv, uv, uv],
            color.to_array(),
        );

        Rect::new(point2(x0, y0), size2(x1 - x0, y1 - y0))
    }

    /// Emits the two triangles of a quad given its [TL, TR, BL, BR] corners,
    /// sharing the BL-TR diagonal.
    fn push_quad(&mut self, corners: [[f32; 2]; 4], uvs: [[f32; 2]; 4], color: [f32; 4]) {
        for i in [0, 1, 2, 2, 1, 3] {
            self.vertices.push(Vertex {
                position: corners[i],
                tex_coords: uvs[i],
                color,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use euclid::{point2, rect, size2};

    fn glyph() -> Glyph {
        Glyph {
            bounds: rect(1.0, -14.0, 10.0, 14.0),
            texture_rect: rect(0, 0, 10, 14),
            advance: 12.0,
        }
    }

    #[test]
    fn test_quad_vertex_order_and_padding() {
        let mut buffer = VertexBuffer::new();
        buffer.add_glyph_quad(point2(5.0, 20.0), Color::WHITE, &glyph(), 0.0, size2(256, 256));

        let v = buffer.vertices();
        assert_eq!(v.len(), 6);
        // TL, TR, BL, BL, TR, BR with one pixel of padding on every side.
        assert_eq!(v[0].position, [5.0, 5.0]);
        assert_eq!(v[1].position, [16.0, 5.0]);
        assert_eq!(v[2].position, [5.0, 21.0]);
        assert_eq!(v[3], v[2]);
        assert_eq!(v[4], v[1]);
        assert_eq!(v[5].position, [16.0, 21.0]);
    }

    #[test]
    fn test_quad_texture_coordinates_padded() {
        let mut buffer = VertexBuffer::new();
        buffer.add_glyph_quad(point2(0.0, 0.0), Color::WHITE, &glyph(), 0.0, size2(256, 256));

        let v = buffer.vertices();
        assert_eq!(v[0].tex_coords, [-1.0 / 256.0, -1.0 / 256.0]);
        assert_eq!(v[5].tex_coords, [11.0 / 256.0, 15.0 / 256.0]);
    }

    #[test]
    fn test_shear_shifts_top_and_bottom_independently() {
        let mut buffer = VertexBuffer::new();
        buffer.add_glyph_quad(point2(10.0, 20.0), Color::WHITE, &glyph(), 0.208, size2(256, 256));

        let v = buffer.vertices();
        // Padded top edge sits at -15, bottom at +1 relative to the pen, so
        // the top corners lean right of the bottom corners.
        assert!((v[0].position[0] - (10.0 + 0.0 + 0.208 * 15.0)).abs() < 1e-5);
        assert!((v[2].position[0] - (10.0 + 0.0 - 0.208 * 1.0)).abs() < 1e-5);
        assert!(v[0].position[0] > v[2].position[0]);
    }

    #[test]
    fn test_line_hinting_and_degenerate_uv() {
        let mut buffer = VertexBuffer::new();
        let covered = buffer.add_line(24.0, 20.0, 2.4, 1.2, Color::WHITE, 0.0, size2(256, 256));

        // top = floor(20 + 2.4 - 0.6 + 0.5) = 22, bottom = 22 + floor(1.7) = 23.
        let v = buffer.vertices();
        assert_eq!(v[0].position, [0.0, 22.0]);
        assert_eq!(v[1].position, [24.0, 22.0]);
        assert_eq!(v[5].position, [24.0, 23.0]);
        for vertex in v {
            assert_eq!(vertex.tex_coords, [1.0 / 256.0, 1.0 / 256.0]);
        }
        assert_eq!(covered, rect(0.0, 22.0, 24.0, 1.0));
    }

    #[test]
    fn test_line_outline_expansion_grows_every_side() {
        let mut buffer = VertexBuffer::new();
        let covered = buffer.add_line(24.0, 20.0, 2.4, 1.2, Color::BLACK, 2.0, size2(256, 256));

        assert_eq!(covered, rect(-2.0, 20.0, 28.0, 5.0));
        assert_eq!(buffer.vertices()[0].position, [-2.0, 20.0]);
        assert_eq!(buffer.vertices()[5].position, [26.0, 25.0]);
    }

    #[test]
    fn test_generation_bumps_on_signal_not_on_append() {
        let mut buffer = VertexBuffer::new();
        assert_eq!(buffer.generation(), 0);

        buffer.add_glyph_quad(point2(0.0, 0.0), Color::WHITE, &glyph(), 0.0, size2(256, 256));
        assert_eq!(buffer.generation(), 0);

        buffer.mark_changed();
        assert_eq!(buffer.generation(), 1);
    }

    #[test]
    fn test_set_color_rewrites_in_place() {
        let mut buffer = VertexBuffer::new();
        buffer.add_glyph_quad(point2(0.0, 0.0), Color::WHITE, &glyph(), 0.0, size2(256, 256));
        buffer.mark_changed();
        let positions: Vec<_> = buffer.vertices().iter().map(|v| v.position).collect();

        buffer.set_color(Color::new(255, 0, 0, 255));

        assert_eq!(buffer.generation(), 2);
        for (vertex, position) in buffer.vertices().iter().zip(positions) {
            assert_eq!(vertex.color, [1.0, 0.0, 0.0, 1.0]);
            assert_eq!(vertex.position, position);
        }
    }

    #[test]
    fn test_as_bytes_length() {
        let mut buffer = VertexBuffer::new();
        buffer.add_glyph_quad(point2(0.0, 0.0), Color::WHITE, &glyph(), 0.0, size2(256, 256));
        assert_eq!(buffer.as_bytes().len(), 6 * std::mem::size_of::<Vertex>());
    }
}
