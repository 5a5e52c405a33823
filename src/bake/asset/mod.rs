//! Contains deserializable types which represent all supported asset file types.

mod bitmap_font;

pub use self::bitmap_font::{BitmapFont, DEFAULT_SIZE};

use {
    crate::error::{Error, Result},
    serde::Deserialize,
    std::{fs::read_to_string, io::ErrorKind, path::Path},
    toml::from_str,
};

/// A collection type containing all supported asset file types.
#[derive(Clone, Debug, PartialEq)]
pub enum Asset {
    /// Scalable fonts baked into a packed bitmap font.
    BitmapFont(BitmapFont),
}

impl Asset {
    /// Reads an asset file from disk.
    pub fn read<P: AsRef<Path>>(filename: P) -> Result<Self> {
        let filename = filename.as_ref();
        let toml = read_to_string(filename).map_err(|err| match err.kind() {
            ErrorKind::NotFound => Error::NotFound(filename.to_path_buf()),
            _ => Error::Io(err),
        })?;

        Self::parse(&toml).map_err(|err| match err {
            Error::Format(msg) => Error::Format(format!("{}: {msg}", filename.display())),
            err => err,
        })
    }

    fn parse(toml: &str) -> Result<Self> {
        let val: Schema = from_str(toml)?;

        if let Some(val) = val.bitmap_font {
            Ok(Self::BitmapFont(val))
        } else {
            Err(Error::format("expected a [bitmap-font] table"))
        }
    }

    /// Attempts to extract a `BitmapFont` asset from this collection type.
    pub fn into_bitmap_font(self) -> Option<BitmapFont> {
        match self {
            Self::BitmapFont(bitmap_font) => Some(bitmap_font),
        }
    }
}

#[derive(Deserialize)]
struct Schema {
    #[serde(rename = "bitmap-font")]
    bitmap_font: Option<BitmapFont>,
}

#[cfg(test)]
mod tests {
    use {super::*, std::path::PathBuf};

    #[test]
    fn parse_bitmap_font() {
        let asset = Asset::parse(
            r#"
            [bitmap-font]
            src = "../fonts/DejaVuSans.ttf"
            size = 16
            text = "0123456789"
            collection-index = 1
            require-glyphs = true
            output = "out/digits"
            "#,
        )
        .unwrap()
        .into_bitmap_font()
        .unwrap();

        assert_eq!(asset.src(), Path::new("../fonts/DejaVuSans.ttf"));
        assert_eq!(asset.size(), 16);
        assert_eq!(asset.text(), "0123456789");
        assert_eq!(asset.collection_index(), 1);
        assert!(asset.require_glyphs());
        assert_eq!(asset.output(), PathBuf::from("out/digits"));
    }

    #[test]
    fn minimal_bitmap_font() {
        let asset = Asset::parse("[bitmap-font]\nsrc = 'mono.ttf'\n")
            .unwrap()
            .into_bitmap_font()
            .unwrap();

        assert_eq!(asset, BitmapFont::new("mono.ttf"));
    }

    #[test]
    fn unknown_asset() {
        assert!(matches!(
            Asset::parse("[bitmap]\nsrc = 'a.png'\n"),
            Err(Error::Format(_))
        ));
        assert!(matches!(
            Asset::parse("[bitmap-font]\nsize = 12\n"),
            Err(Error::Toml(_))
        ));
    }

    #[test]
    fn missing_asset_file() {
        assert!(Asset::read("/no/such/asset.toml").unwrap_err().is_not_found());
    }
}
