//! Contains functions and types used to bake scalable fonts into bitmap fonts.
//!
//! A bitmap font is described either on the command line or by a `.toml` asset file:
//!
//! ```text
//! [bitmap-font]
//! src = '../fonts/DejaVuSans.ttf'
//! size = 16
//! text = 'ABCDEFGHIJKLMNOPQRSTUVWXYZ'
//! ```
//!
//! Optional fields:
//! - `size`: Pixel height of the em square. Default is `12`.
//! - `text`: The characters to bake. Default is printable ASCII.
//! - `collection-index`: Face to use within a font collection. Default is `0`.
//! - `require-glyphs`: Fail on characters missing from the font. Default is `false`.
//! - `output`: Base path of the `.json`/`.png` pair. Default is `<font name>_<size>`.
//!
//! Relative paths are resolved against the directory containing the asset file.

pub mod asset;

mod font;

pub use self::font::{bake_bitmap_font, unique_chars, DEFAULT_CHARS};

use std::path::{Path, PathBuf};

/// Gets the asset path from a given path. If path is relative, then dir is used to determine the
/// relative parent.
pub fn get_path<P1: AsRef<Path>, P2: AsRef<Path>>(dir: P1, path: P2) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        dir.as_ref().join(path)
    }
}
