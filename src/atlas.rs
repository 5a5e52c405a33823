use {
    crate::{
        canvas::Canvas,
        error::{Error, Result},
        font::{BitmapFont, Glyph},
        grid::grid_size,
        math::{Extent, Rect},
        raster::{Rasterizer, STATUS_SHORT_BITMAP},
    },
    std::collections::BTreeMap,
};

/// Pixels reserved to the right of and below every glyph so neighbours never bleed together when
/// the canvas is sampled.
pub const GUTTER: u32 = 1;

/// Packs rasterized glyphs onto a single canvas using a grid of equally sized cells.
///
/// Cells are assigned in input order, left to right and then top to bottom, so the same
/// characters and font always produce the same atlas.
#[derive(Clone, Debug, Default)]
pub struct AtlasBuilder {
    family_name: Option<String>,
}

impl AtlasBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the family name recorded in the atlas; by default the rasterizer's own family
    /// name is used.
    pub fn family_name(mut self, family_name: impl Into<String>) -> Self {
        self.family_name = Some(family_name.into());
        self
    }

    /// Measures and renders every character and packs the results.
    ///
    /// Characters should be unique: a repeated character is placed again and only its last
    /// placement is kept, leaving the earlier cell unreferenced.
    pub fn build<R>(&self, mut rasterizer: R, chars: &[char]) -> Result<BitmapFont>
    where
        R: Rasterizer,
    {
        // Every glyph must be measured before anything is allocated
        let mut max_size = Extent::ZERO;
        for &ch in chars {
            let size = rasterizer.measure(ch)?;
            max_size.x = max_size.x.max(size.x);
            max_size.y = max_size.y.max(size.y);
        }

        let cell = Extent::new(max_size.x + GUTTER, max_size.y + GUTTER);
        let (columns, rows) = grid_size(chars.len());
        let grid = Extent::new(grid_dim(columns)?, grid_dim(rows)?);
        let canvas_dims = cell
            .x
            .checked_mul(grid.x)
            .zip(cell.y.checked_mul(grid.y))
            .ok_or_else(|| {
                Error::Format(format!(
                    "a {columns}x{rows} grid of {}x{} cells is too large",
                    cell.x, cell.y
                ))
            })?;
        let mut canvas = Canvas::new(canvas_dims.0, canvas_dims.1);

        debug!(
            "Packing {} glyphs into {columns}x{rows} cells of {}x{} ({}x{} canvas)",
            chars.len(),
            cell.x,
            cell.y,
            canvas.width(),
            canvas.height()
        );

        let mut glyphs = BTreeMap::new();
        for (idx, &ch) in chars.iter().enumerate() {
            let index = Extent::new((idx % columns) as u32, (idx / columns) as u32);
            let position = cell * index;
            let rendered = rasterizer.render(ch)?;

            if rendered.coverage.len() < rendered.size.area() {
                return Err(Error::Rasterization {
                    ch,
                    status: STATUS_SHORT_BITMAP,
                });
            }

            // A glyph may not exceed the measured maximum or it would spill into its neighbours
            let size = Extent::new(
                rendered.size.x.min(max_size.x),
                rendered.size.y.min(max_size.y),
            );
            if size != rendered.size {
                warn!(
                    "Glyph {ch:?} rendered at {}x{} but measured smaller; clipped to {}x{}",
                    rendered.size.x, rendered.size.y, size.x, size.y
                );
            }

            canvas.paste(
                &rendered.coverage,
                rendered.size,
                Rect {
                    dims: size,
                    pos: position,
                },
            );

            let glyph = Glyph::new(position, size, rendered.bearing, rendered.advance);

            trace!(
                "Placed {ch:?} at {},{} ({}x{})",
                position.x,
                position.y,
                size.x,
                size.y
            );

            if glyphs.insert(ch, glyph).is_some() {
                warn!("Duplicate character {ch:?}; keeping the last placement");
            }
        }

        let family_name = self
            .family_name
            .as_deref()
            .or_else(|| rasterizer.family_name())
            .unwrap_or_default()
            .to_owned();

        Ok(BitmapFont::new(family_name, glyphs, canvas))
    }
}

fn grid_dim(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::Format(format!("{len} cells do not fit a canvas")))
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{math::Coord, raster::RenderedGlyph},
        std::collections::HashMap,
    };

    /// Renders solid blocks whose size depends on the character.
    #[derive(Default)]
    struct Blocks {
        calls: Vec<(&'static str, char)>,
        fail: Option<char>,
        sizes: HashMap<char, Extent>,
    }

    impl Blocks {
        fn new(sizes: impl IntoIterator<Item = (char, (u32, u32))>) -> Self {
            Self {
                sizes: sizes
                    .into_iter()
                    .map(|(ch, size)| (ch, size.into()))
                    .collect(),
                ..Default::default()
            }
        }

        fn size(&self, ch: char) -> Extent {
            self.sizes.get(&ch).copied().unwrap_or(Extent::new(3, 5))
        }
    }

    impl Rasterizer for Blocks {
        fn family_name(&self) -> Option<&str> {
            Some("Blocks")
        }

        fn measure(&mut self, ch: char) -> Result<Extent> {
            self.calls.push(("measure", ch));

            if self.fail == Some(ch) {
                return Err(Error::Rasterization { ch, status: 42 });
            }

            Ok(self.size(ch))
        }

        fn render(&mut self, ch: char) -> Result<RenderedGlyph> {
            self.calls.push(("render", ch));

            let size = self.size(ch);

            Ok(RenderedGlyph {
                coverage: vec![ch as u8; size.area()],
                size,
                bearing: Coord::new(1, size.y as i32),
                advance: (size.x as i32 + 1) << 6,
            })
        }
    }

    #[test]
    fn empty_atlas() {
        let font = AtlasBuilder::new().build(Blocks::default(), &[]).unwrap();

        assert!(font.is_empty());
        assert_eq!(font.canvas().unwrap().dims(), Extent::ZERO);
        assert_eq!(font.family_name(), "Blocks");
    }

    #[test]
    fn cells_follow_input_order() {
        let chars: Vec<_> = "abcdefg".chars().collect();
        let font = AtlasBuilder::new().build(Blocks::default(), &chars).unwrap();

        // 7 glyphs -> 4x2 grid of 4x6 cells
        let canvas = font.canvas().unwrap();

        assert_eq!(canvas.dims(), Extent::new(16, 12));
        assert_eq!(font.glyph('a').unwrap().position(), Extent::new(0, 0));
        assert_eq!(font.glyph('d').unwrap().position(), Extent::new(12, 0));
        assert_eq!(font.glyph('e').unwrap().position(), Extent::new(0, 6));
        assert_eq!(font.glyph('g').unwrap().position(), Extent::new(8, 6));
    }

    #[test]
    fn canvas_width_is_padded() {
        let chars: Vec<_> = "abcde".chars().collect();
        let font = AtlasBuilder::new()
            .build(Blocks::new([('a', (6, 2))]), &chars)
            .unwrap();

        // 3x2 grid of 7x6 cells is 21 pixels wide
        assert_eq!(font.canvas().unwrap().dims(), Extent::new(24, 12));
    }

    #[test]
    fn glyph_metrics_are_kept() {
        let font = AtlasBuilder::new()
            .family_name("Override")
            .build(Blocks::new([('x', (2, 7)), (' ', (0, 0))]), &['x', ' '])
            .unwrap();
        let x = font.glyph('x').unwrap();
        let space = font.glyph(' ').unwrap();

        assert_eq!(font.family_name(), "Override");
        assert_eq!(x.size(), Extent::new(2, 7));
        assert_eq!(x.bearing(), Coord::new(1, 7));
        assert_eq!(x.advance(), 3 << 6);
        assert_eq!(space.size(), Extent::ZERO);
        assert_eq!(space.position(), Extent::new(3, 0));
    }

    #[test]
    fn glyphs_are_blitted_without_touching_the_gutter() {
        let font = AtlasBuilder::new()
            .build(Blocks::new([('A', (2, 2)), ('B', (2, 2))]), &['A', 'B'])
            .unwrap();
        let canvas = font.canvas().unwrap();

        // 2x1 grid of 3x3 cells
        assert_eq!(canvas.dims(), Extent::new(8, 3));
        assert_eq!(&canvas.pixels()[0..8], &[65, 65, 0, 66, 66, 0, 0, 0]);
        assert_eq!(&canvas.pixels()[8..16], &[65, 65, 0, 66, 66, 0, 0, 0]);
        assert!(canvas.pixels()[16..].iter().all(|&px| px == 0));
    }

    #[test]
    fn placements_never_overlap() {
        let chars: Vec<_> = ('!'..='~').collect();
        let sizes = chars
            .iter()
            .map(|&ch| (ch, ((ch as u32 % 7), (ch as u32 % 11))));
        let font = AtlasBuilder::new()
            .build(Blocks::new(sizes), &chars)
            .unwrap();
        let canvas = font.canvas().unwrap();
        let rects: Vec<Rect> = font.glyphs().map(|(_, glyph)| glyph.rect()).collect();

        assert_eq!(rects.len(), chars.len());
        assert_eq!(canvas.width() % 8, 0);

        for (idx, rect) in rects.iter().enumerate() {
            assert!(rect.fits_within(canvas.dims()));

            for other in &rects[idx + 1..] {
                assert!(!rect.intersects(other), "{rect:?} overlaps {other:?}");
            }
        }
    }

    #[test]
    fn measures_everything_before_rendering() {
        let mut blocks = Blocks::default();
        AtlasBuilder::new().build(&mut blocks, &['a', 'b']).unwrap();

        assert_eq!(
            blocks.calls,
            [
                ("measure", 'a'),
                ("measure", 'b'),
                ("render", 'a'),
                ("render", 'b')
            ]
        );
    }

    #[test]
    fn rasterization_errors_propagate() {
        let mut blocks = Blocks {
            fail: Some('b'),
            ..Default::default()
        };
        let res = AtlasBuilder::new().build(&mut blocks, &['a', 'b', 'c']);

        assert!(matches!(
            res,
            Err(Error::Rasterization {
                ch: 'b',
                status: 42
            })
        ));
        assert!(!blocks.calls.iter().any(|(call, _)| *call == "render"));
    }

    #[test]
    fn duplicates_keep_last_placement() {
        let font = AtlasBuilder::new()
            .build(Blocks::default(), &['a', 'b', 'a'])
            .unwrap();

        assert_eq!(font.len(), 2);
        assert_eq!(font.glyph('a').unwrap().position(), Extent::new(0, 6));
    }

    /// Reports small glyphs while measuring, then renders large ones.
    struct Liar;

    impl Rasterizer for Liar {
        fn measure(&mut self, _: char) -> Result<Extent> {
            Ok(Extent::new(2, 2))
        }

        fn render(&mut self, _: char) -> Result<RenderedGlyph> {
            Ok(RenderedGlyph {
                coverage: vec![0xff; 25],
                size: Extent::new(5, 5),
                ..Default::default()
            })
        }
    }

    #[test]
    fn oversized_glyphs_are_clipped_to_their_cell() {
        let font = AtlasBuilder::new().build(Liar, &['a', 'b']).unwrap();

        for (_, glyph) in font.glyphs() {
            assert_eq!(glyph.size(), Extent::new(2, 2));
        }

        assert_eq!(font.family_name(), "");
    }
}
