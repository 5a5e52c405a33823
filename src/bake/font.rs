use {
    super::{asset::BitmapFont as BitmapFontAsset, get_path},
    crate::{atlas::AtlasBuilder, error::Result, raster::FontRasterizer},
    std::{
        collections::HashSet,
        fs::create_dir_all,
        ops::RangeInclusive,
        path::{Path, PathBuf},
    },
};

/// Characters baked when no text is given: printable ASCII, excluding the space.
pub const DEFAULT_CHARS: RangeInclusive<char> = '!'..='~';

/// Returns the characters of `text` in first-seen order without repeats, or [`DEFAULT_CHARS`] if
/// `text` is empty.
pub fn unique_chars(text: &str) -> Vec<char> {
    if text.is_empty() {
        return DEFAULT_CHARS.collect();
    }

    let mut seen = HashSet::new();
    text.chars().filter(|&ch| seen.insert(ch)).collect()
}

/// Rasterizes, packs and writes the bitmap font described by an asset. Relative paths within the
/// asset are resolved against `asset_dir`.
///
/// Returns the base path the `.json` and `.png` pair was written to.
pub fn bake_bitmap_font<P: AsRef<Path>>(
    asset_dir: P,
    bitmap_font_asset: &BitmapFontAsset,
) -> Result<PathBuf> {
    let src_filename = get_path(&asset_dir, bitmap_font_asset.src());
    let dst_filename = get_path(&asset_dir, bitmap_font_asset.output());

    info!(
        "Processing font: {} at {}px",
        src_filename.display(),
        bitmap_font_asset.size()
    );

    let rasterizer = FontRasterizer::open(
        &src_filename,
        bitmap_font_asset.size(),
        bitmap_font_asset.collection_index(),
    )?
    .with_require_glyphs(bitmap_font_asset.require_glyphs());

    let text = bitmap_font_asset.text();
    let chars = unique_chars(text);
    if !text.is_empty() && chars.len() != text.chars().count() {
        debug!("Ignoring repeated characters in text");
    }

    let font = AtlasBuilder::new().build(rasterizer, &chars)?;

    if let Some(parent) = dst_filename.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            create_dir_all(parent)?;
        }
    }

    font.save(&dst_filename)?;

    Ok(dst_filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_chars_are_printable_ascii() {
        let chars = unique_chars("");

        assert_eq!(chars.len(), 94);
        assert_eq!(chars.first(), Some(&'!'));
        assert_eq!(chars.last(), Some(&'~'));
        assert!(!chars.contains(&' '));
    }

    #[test]
    fn repeats_are_dropped_in_order() {
        assert_eq!(
            unique_chars("hello, world"),
            ['h', 'e', 'l', 'o', ',', ' ', 'w', 'r', 'd']
        );
    }

    #[test]
    fn missing_font() {
        let dir = tempfile::tempdir().unwrap();
        let asset = BitmapFontAsset::new("missing.ttf");

        assert!(bake_bitmap_font(dir.path(), &asset)
            .unwrap_err()
            .is_not_found());
        assert!(!dir.path().join("missing_12.json").exists());
    }
}
