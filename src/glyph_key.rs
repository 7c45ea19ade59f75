pub const SUB_PIXEL_QUANTIZE: f32 = 256f32;

/// Cache key for per-glyph metric lookups.
///
/// Fractional inputs are quantized to 1/256 px so equal-looking floats hash
/// and compare exactly. Keys are only meaningful within one provider
/// instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GlyphKey {
    codepoint: char,
    font_size: u32, // font size * SUB_PIXEL_QUANTIZE as u32
    bold: bool,
    outline_thickness: i32, // thickness * SUB_PIXEL_QUANTIZE as i32
}

impl GlyphKey {
    pub fn new(codepoint: char, font_size: f32, bold: bool, outline_thickness: f32) -> Self {
        Self {
            codepoint,
            font_size: (font_size * SUB_PIXEL_QUANTIZE).round() as u32,
            bold,
            outline_thickness: (outline_thickness * SUB_PIXEL_QUANTIZE).round() as i32,
        }
    }

    pub fn codepoint(&self) -> char {
        self.codepoint
    }

    pub fn font_size(&self) -> f32 {
        self.font_size as f32 / SUB_PIXEL_QUANTIZE
    }

    pub fn bold(&self) -> bool {
        self.bold
    }

    pub fn outline_thickness(&self) -> f32 {
        self.outline_thickness as f32 / SUB_PIXEL_QUANTIZE
    }
}
