use {
    crate::{
        error::{Error, Result},
        math::{Extent, Rect},
    },
    std::fmt::{Debug, Formatter, Result as FmtResult},
};

/// Width of a canvas row is always padded to a multiple of this many pixels.
pub const ROW_ALIGNMENT: u32 = 8;

/// Rounds a pixel width up to the next multiple of [`ROW_ALIGNMENT`].
pub const fn align_width(width: u32) -> u32 {
    match width % ROW_ALIGNMENT {
        0 => width,
        n => width + ROW_ALIGNMENT - n,
    }
}

/// A single channel, 8 bits per pixel bitmap holding the packed glyph coverage.
#[derive(Clone, Default, Eq, PartialEq)]
pub struct Canvas {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl Canvas {
    /// Allocates a zero-filled canvas; `width` is padded up to the row alignment.
    pub fn new(width: u32, height: u32) -> Self {
        let width = align_width(width);

        Self {
            pixels: vec![0; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Wraps existing pixel data, which must be exactly `width * height` bytes with an aligned
    /// `width`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        if width % ROW_ALIGNMENT != 0 {
            return Err(Error::Format(format!(
                "canvas width {width} is not a multiple of {ROW_ALIGNMENT}"
            )));
        }

        if pixels.len() != width as usize * height as usize {
            return Err(Error::Format(format!(
                "canvas of {width}x{height} requires {} bytes, found {}",
                width as usize * height as usize,
                pixels.len()
            )));
        }

        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    pub fn dims(&self) -> Extent {
        Extent::new(self.width, self.height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `true` for the degenerate canvas of an atlas with no glyphs.
    pub fn is_empty(&self) -> bool {
        self.dims().is_empty()
    }

    /// Row-major pixel data, `width` bytes per row.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x < self.width && y < self.height {
            Some(self.pixels[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    /// Copies a tightly packed `src` bitmap of `src_dims` onto this canvas with its top-left corner
    /// at `dst.pos`. At most `dst.dims` pixels are copied and anything falling outside the canvas
    /// is clipped; nothing else is written. Returns the rectangle actually written.
    pub fn paste(&mut self, src: &[u8], src_dims: Extent, dst: Rect) -> Rect {
        debug_assert!(src.len() >= src_dims.area());

        let pos = dst.pos;
        let width = src_dims
            .x
            .min(dst.dims.x)
            .min(self.width.saturating_sub(pos.x));
        let height = src_dims
            .y
            .min(dst.dims.y)
            .min(self.height.saturating_sub(pos.y));
        if width == 0 || height == 0 {
            return Rect::new(pos.x, pos.y, 0, 0);
        }

        for row in 0..height as usize {
            let src_start = row * src_dims.x as usize;
            let dst_start = (pos.y as usize + row) * self.width as usize + pos.x as usize;
            self.pixels[dst_start..dst_start + width as usize]
                .copy_from_slice(&src[src_start..src_start + width as usize]);
        }

        Rect::new(pos.x, pos.y, width, height)
    }
}

impl Debug for Canvas {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}
