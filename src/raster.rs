//! Glyph rasterization backends.
//!
//! The atlas builder only needs two things from a font: the size of each glyph bitmap, and the
//! bitmap itself along with its layout metrics. [`Rasterizer`] captures exactly that, and
//! [`FontRasterizer`] provides it for `.ttf` and `.otf` files using `fontdue`.

use {
    crate::{
        error::{Error, Result},
        math::{Coord, Extent},
    },
    fontdue::{Font, FontSettings, Metrics},
    std::{fs::read, io::ErrorKind, path::Path},
};

/// Status reported when a font has no glyph for the requested character.
pub const STATUS_MISSING_GLYPH: i32 = 1;

/// Status reported when a glyph bitmap is too large to address.
pub const STATUS_GLYPH_TOO_LARGE: i32 = 2;

/// Status reported when a backend returns less coverage data than its glyph dimensions require.
pub const STATUS_SHORT_BITMAP: i32 = 3;

/// A rendered glyph bitmap plus the metrics needed to lay it out.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderedGlyph {
    /// Tightly packed, row-major 8-bit coverage; `size.x * size.y` bytes.
    pub coverage: Vec<u8>,
    pub size: Extent,
    /// Offset from the pen position to the top-left corner of the bitmap, `y` up.
    pub bearing: Coord,
    /// Horizontal pen advance in 26.6 fixed point.
    pub advance: i32,
}

/// Something which turns characters into monochrome bitmaps.
///
/// Methods take `&mut self` because backends commonly keep the most recently loaded glyph as
/// internal state.
pub trait Rasterizer {
    /// The family name of the underlying font, when known.
    fn family_name(&self) -> Option<&str> {
        None
    }

    /// Returns the bitmap dimensions of `ch` without rendering it.
    fn measure(&mut self, ch: char) -> Result<Extent>;

    /// Renders `ch`.
    fn render(&mut self, ch: char) -> Result<RenderedGlyph>;
}

impl<R> Rasterizer for &mut R
where
    R: Rasterizer + ?Sized,
{
    fn family_name(&self) -> Option<&str> {
        (**self).family_name()
    }

    fn measure(&mut self, ch: char) -> Result<Extent> {
        (**self).measure(ch)
    }

    fn render(&mut self, ch: char) -> Result<RenderedGlyph> {
        (**self).render(ch)
    }
}

/// Rasterizes glyphs from a scalable font at a fixed pixel size.
pub struct FontRasterizer {
    font: Font,
    px: f32,
    require_glyphs: bool,
}

impl FontRasterizer {
    /// Parses a font from memory. `size` is the pixel height of the em square.
    pub fn from_bytes(bytes: &[u8], size: u32, collection_index: u32) -> Result<Self> {
        let px = size as f32;
        let font = Font::from_bytes(
            bytes,
            FontSettings {
                collection_index,
                scale: px,
                ..Default::default()
            },
        )
        .map_err(|err| Error::FontLoad(err.to_owned()))?;

        debug!(
            "Loaded font `{}` ({} glyphs) at {size}px",
            font.name().unwrap_or_default(),
            font.glyph_count()
        );

        Ok(Self {
            font,
            px,
            require_glyphs: false,
        })
    }

    /// Reads and parses a font file.
    pub fn open(path: impl AsRef<Path>, size: u32, collection_index: u32) -> Result<Self> {
        let path = path.as_ref();
        let bytes = read(path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => Error::NotFound(path.to_path_buf()),
            _ => Error::Io(err),
        })?;

        Self::from_bytes(&bytes, size, collection_index)
    }

    /// When set, characters the font has no glyph for fail with
    /// [`Error::Rasterization`] instead of rendering the font's fallback glyph.
    ///
    /// The default is `false`.
    pub fn with_require_glyphs(mut self, require_glyphs: bool) -> Self {
        self.require_glyphs = require_glyphs;
        self
    }

    fn check_glyph(&self, ch: char) -> Result<()> {
        if self.require_glyphs && self.font.lookup_glyph_index(ch) == 0 {
            return Err(Error::Rasterization {
                ch,
                status: STATUS_MISSING_GLYPH,
            });
        }

        Ok(())
    }
}

fn bitmap_size(ch: char, metrics: &Metrics) -> Result<Extent> {
    let too_large = |_| Error::Rasterization {
        ch,
        status: STATUS_GLYPH_TOO_LARGE,
    };

    Ok(Extent::new(
        u32::try_from(metrics.width).map_err(too_large)?,
        u32::try_from(metrics.height).map_err(too_large)?,
    ))
}

impl Rasterizer for FontRasterizer {
    fn family_name(&self) -> Option<&str> {
        self.font.name()
    }

    fn measure(&mut self, ch: char) -> Result<Extent> {
        self.check_glyph(ch)?;

        bitmap_size(ch, &self.font.metrics(ch, self.px))
    }

    fn render(&mut self, ch: char) -> Result<RenderedGlyph> {
        self.check_glyph(ch)?;

        let (metrics, coverage) = self.font.rasterize(ch, self.px);

        rendered_glyph(ch, &metrics, coverage)
    }
}

fn rendered_glyph(ch: char, metrics: &Metrics, coverage: Vec<u8>) -> Result<RenderedGlyph> {
    let size = bitmap_size(ch, metrics)?;
    let top = i32::try_from(size.y)
        .ok()
        .and_then(|height| metrics.ymin.checked_add(height))
        .ok_or(Error::Rasterization {
            ch,
            status: STATUS_GLYPH_TOO_LARGE,
        })?;

    Ok(RenderedGlyph {
        coverage,
        size,
        // fontdue reports the bottom edge of the bitmap; the top edge is what we store
        bearing: Coord::new(metrics.xmin, top),
        advance: (metrics.advance_width * 64.0).round() as i32,
    })
}
