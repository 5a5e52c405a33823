//! _Glyph Pack_ bakes scalable fonts into bitmap fonts: a single grayscale canvas holding every
//! requested character, plus a glyph table recording where each character sits on the canvas and
//! how to lay it out.
//!
//! Glyphs are packed into a grid of equally sized cells. Every cell is as large as the largest
//! glyph plus a one pixel gutter, and the grid is chosen to waste as few cells as possible without
//! becoming more than twice as wide as it is tall. Cells are assigned in the order characters are
//! given, so baking the same characters from the same font always produces the same atlas.
//!
//! # Usage
//!
//! ```no_run
//! use glyph_pack::{AtlasBuilder, BitmapFont, FontRasterizer};
//!
//! fn main() -> glyph_pack::Result<()> {
//!     let rasterizer = FontRasterizer::open("DejaVuSans.ttf", 16, 0)?;
//!     let chars: Vec<char> = ('!'..='~').collect();
//!     let font = AtlasBuilder::new().build(rasterizer, &chars)?;
//!
//!     // Writes DejaVuSans_16.json and DejaVuSans_16.png
//!     font.save("DejaVuSans_16")?;
//!
//!     let font = BitmapFont::load("DejaVuSans_16.json")?;
//!     let (descent, ascent) = font.vertical_extremes();
//!
//!     println!("{} is {}px tall", font.family_name(), ascent - descent);
//!
//!     Ok(())
//! }
//! ```
//!
//! The `glyph-pack` binary wraps the same steps; see the [`bake`] module for its asset file
//! format.

#![allow(clippy::needless_doctest_main)]

#[macro_use]
extern crate log;

pub mod bake;
pub mod codec;
pub mod math;
pub mod raster;

mod atlas;
mod canvas;
mod error;
mod font;
mod grid;

pub use self::{
    atlas::{AtlasBuilder, GUTTER},
    canvas::{align_width, Canvas, ROW_ALIGNMENT},
    codec::{load, save, sibling_paths},
    error::{Error, Result},
    font::{BitmapFont, Glyph, Glyphs},
    grid::grid_size,
    raster::{FontRasterizer, Rasterizer, RenderedGlyph},
};
