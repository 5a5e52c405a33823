use {
    crate::{
        canvas::Canvas,
        math::{Coord, Extent, Rect},
    },
    std::collections::{btree_map, BTreeMap},
};

/// Placement and layout metrics of a single character within a [`BitmapFont`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Glyph {
    position: Extent,
    size: Extent,
    bearing: Coord,
    advance: i32,
}

impl Glyph {
    pub fn new(position: Extent, size: Extent, bearing: Coord, advance: i32) -> Self {
        Self {
            position,
            size,
            bearing,
            advance,
        }
    }

    /// Top-left corner of the glyph bitmap within the canvas.
    pub fn position(&self) -> Extent {
        self.position
    }

    /// Dimensions of the glyph bitmap; zero for blank glyphs such as a space.
    pub fn size(&self) -> Extent {
        self.size
    }

    /// Offset from the pen position to the top-left corner of the glyph bitmap. The `y` component
    /// points up from the baseline.
    pub fn bearing(&self) -> Coord {
        self.bearing
    }

    /// Horizontal pen advance in 26.6 fixed point (1/64th pixel) units.
    pub fn advance(&self) -> i32 {
        self.advance
    }

    /// Horizontal pen advance rounded to whole pixels.
    pub fn advance_px(&self) -> i32 {
        (self.advance + 32) >> 6
    }

    /// The canvas region holding this glyph.
    pub fn rect(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.size.x, self.size.y)
    }

    /// Distance below the baseline reached by the glyph bitmap; negative for descenders. Widened
    /// since a loaded bearing may sit anywhere in `i32`.
    fn bottom(&self) -> i64 {
        self.bearing.y as i64 - self.size.y as i64
    }
}

/// A packed bitmap font: one shared canvas plus the glyph table describing where each character
/// lives on it.
#[derive(Debug, Default)]
pub struct BitmapFont {
    canvas: Option<Canvas>,
    family_name: String,
    glyphs: BTreeMap<char, Glyph>,
}

impl BitmapFont {
    pub(crate) fn new(
        family_name: impl Into<String>,
        glyphs: BTreeMap<char, Glyph>,
        canvas: Canvas,
    ) -> Self {
        Self {
            canvas: Some(canvas),
            family_name: family_name.into(),
            glyphs,
        }
    }

    /// The family name of the source font, which may be empty.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Gets the glyph for a character, if the font contains one.
    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch)
    }

    /// Iterates over all glyphs in code point order.
    pub fn glyphs(&self) -> Glyphs<'_> {
        Glyphs(self.glyphs.iter())
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Returns `(min_descent, max_ascent)` relative to the baseline over every glyph.
    ///
    /// `max_ascent` is never negative and `min_descent` is never positive, so the pair always
    /// includes the baseline itself. A descent below `i32::MIN` saturates.
    pub fn vertical_extremes(&self) -> (i32, i32) {
        let (min_descent, max_ascent) =
            self.glyphs
                .values()
                .fold((0, 0), |(min_descent, max_ascent), glyph| {
                    (
                        min_descent.min(glyph.bottom()),
                        max_ascent.max(glyph.bearing.y),
                    )
                });

        (i32::try_from(min_descent).unwrap_or(i32::MIN), max_ascent)
    }

    /// Pixel distance between the lowest descender and the highest ascender.
    pub fn line_height(&self) -> u32 {
        let (min_descent, max_ascent) = self.vertical_extremes();

        max_ascent.abs_diff(min_descent)
    }

    /// The packed glyph canvas, or `None` once it has been released.
    pub fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }

    /// Moves the canvas out of this font. Only the first call returns it.
    pub fn release_canvas(&mut self) -> Option<Canvas> {
        self.canvas.take()
    }
}

/// Iterator returned by [`BitmapFont::glyphs`].
#[derive(Clone, Debug)]
pub struct Glyphs<'a>(btree_map::Iter<'a, char, Glyph>);

impl<'a> Iterator for Glyphs<'a> {
    type Item = (char, &'a Glyph);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(&ch, glyph)| (ch, glyph))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for Glyphs<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(height: u32, bearing_y: i32) -> Glyph {
        Glyph::new(
            Extent::ZERO,
            Extent::new(4, height),
            Coord::new(0, bearing_y),
            0,
        )
    }

    fn bitmap_font(glyphs: impl IntoIterator<Item = (char, Glyph)>) -> BitmapFont {
        BitmapFont::new("Test", glyphs.into_iter().collect(), Canvas::new(8, 8))
    }

    #[test]
    fn vertical_extremes() {
        let font = bitmap_font([('A', glyph(12, 10)), ('_', glyph(3, -2))]);

        assert_eq!(font.vertical_extremes(), (-5, 10));
        assert_eq!(font.line_height(), 15);
    }

    #[test]
    fn vertical_extremes_include_baseline() {
        // Everything floats above the baseline
        let font = bitmap_font([('^', glyph(2, 9))]);

        assert_eq!(font.vertical_extremes(), (0, 9));

        // Everything sinks below it
        let font = bitmap_font([('_', glyph(2, -3))]);

        assert_eq!(font.vertical_extremes(), (-5, 0));
        assert_eq!(BitmapFont::default().vertical_extremes(), (0, 0));
    }

    #[test]
    fn lookup() {
        let font = bitmap_font([('a', glyph(5, 5))]);

        assert_eq!(font.glyph('a'), Some(&glyph(5, 5)));
        assert_eq!(font.glyph('b'), None);
        assert_eq!(font.len(), 1);
    }

    #[test]
    fn glyphs_iterate_in_code_point_order() {
        let font = bitmap_font([('c', glyph(1, 1)), ('a', glyph(2, 2)), ('b', glyph(3, 3))]);
        let chars: String = font.glyphs().map(|(ch, _)| ch).collect();

        assert_eq!(chars, "abc");
        assert_eq!(font.glyphs().len(), 3);
    }

    #[test]
    fn canvas_is_released_once() {
        let mut font = bitmap_font([]);

        assert!(font.canvas().is_some());

        let canvas = font.release_canvas();

        assert_eq!(canvas.map(|canvas| canvas.dims()), Some(Extent::new(8, 8)));
        assert!(font.canvas().is_none());
        assert!(font.release_canvas().is_none());
    }

    #[test]
    fn extreme_bearings_saturate() {
        let font = bitmap_font([('a', glyph(1, i32::MIN)), ('b', glyph(0, i32::MAX))]);

        assert_eq!(font.vertical_extremes(), (i32::MIN, i32::MAX));
        assert_eq!(font.line_height(), u32::MAX);

        let font = bitmap_font([('a', glyph(u32::MAX, 0))]);

        assert_eq!(font.vertical_extremes(), (i32::MIN, 0));
        assert_eq!(font.line_height(), 1 << 31);
    }

    #[test]
    fn advance_rounds_to_pixels() {
        let glyph = Glyph::new(Extent::ZERO, Extent::ZERO, Coord::ZERO, 7 * 64 + 40);

        assert_eq!(glyph.advance_px(), 8);
    }
}
