//! # Glyphmesh
//!
//! A text layout and vertex mesh generation library for Rust.
//!
//! ## Overview
//!
//! `glyphmesh` turns a string, a font's per-glyph metrics, and a set of
//! layout constraints (character size, maximum box size, overflow policy,
//! style flags) into triangulated, colored, UV-mapped vertex buffers ready
//! for rasterization, plus an exact bounding box. The central type is
//! [`Text`], which owns its geometry and recomputes it lazily when an input
//! changes.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use glyphmesh::{FontBook, FontFace, Text};
//!
//! // 1. Discover fonts
//! let mut book = FontBook::new();
//! book.load_system_fonts();
//!
//! // 2. Resolve a regular/bold face pair for a family
//! let face = FontFace::from_book(&mut book, glyphmesh::fontdb::Family::SansSerif)
//!     .expect("no sans-serif face installed");
//!
//! // 3. Lay out text lazily
//! let mut text = Text::new("Hello, world", 24, Arc::new(face));
//! let _bounds = text.local_bounds();
//! let mesh = text.geometry();
//! // upload mesh.outline / mesh.fill when their generation changes,
//! // then draw outline first, fill second
//! ```
//!
//! ## Features
//!
//! *   **Incremental layout**: kerning-aware advance accumulation,
//!     whitespace and tab handling, clamp-with-ellipsis and wrap overflow
//!     policies, underline/strikethrough synthesis.
//! *   **Mesh output**: independent fill and outline triangle lists of
//!     `bytemuck`-castable vertices with upload-generation counters.
//! *   **Font management**: `fontdb`-backed discovery with lazily parsed
//!     `fontdue` faces.
//! *   **Pluggable metrics**: the engine consumes the [`FontMetrics`] trait,
//!     so custom providers (bitmap fonts, test fixtures) slot in unchanged.

pub mod bounds;
pub mod codepoint;
pub mod color;
pub mod font;
pub mod font_book;
pub mod font_face;
pub mod glyph_key;
pub mod layout;
pub mod mesh;
pub mod style;
pub mod text;

// common re-exports
pub use color::Color;
pub use font::{FontMetrics, Glyph};
pub use font_book::FontBook;
pub use font_face::FontFace;
pub use layout::{LayoutInput, LayoutOutput};
pub use mesh::{Vertex, VertexBuffer};
pub use style::{Overflow, Style};
pub use text::Text;

// re-export dependencies
pub use euclid;
pub use fontdb;
pub use fontdue;
pub use parking_lot;
