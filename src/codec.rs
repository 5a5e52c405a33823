//! Reading and writing bitmap fonts as a `.json` glyph table next to a `.png` canvas.
//!
//! The glyph table is always written as:
//!
//! ```text
//! {
//!   "family": "DejaVu Sans",
//!   "glyphs": {
//!     "A": {
//!       "position": [0, 0],
//!       "size": [9, 9],
//!       "bearing": [0, 9],
//!       "advance": 576
//!     }
//!   }
//! }
//! ```
//!
//! Older tables without the `family` field, which hold the glyph records at the top level, are
//! still read.

use {
    crate::{
        canvas::Canvas,
        error::{Error, Result},
        font::{BitmapFont, Glyph},
        math::{Coord, Extent},
    },
    image::{
        load_from_memory_with_format, save_buffer_with_format, ColorType, DynamicImage,
        ImageError, ImageFormat,
    },
    serde::Serialize,
    serde_json::{to_writer_pretty, Value},
    std::{
        collections::BTreeMap,
        ffi::OsString,
        fs::{read, remove_file, File},
        io::{BufWriter, ErrorKind, Write},
        path::{Path, PathBuf},
    },
};

const JSON_EXT: &str = "json";
const PNG_EXT: &str = "png";

/// Returns the `(json, png)` pair of files for a bitmap font.
///
/// A path ending in either extension (in any letter case) names its sibling by swapping the
/// extension; any other path gets both extensions appended.
pub fn sibling_paths(path: impl AsRef<Path>) -> (PathBuf, PathBuf) {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some(JSON_EXT) => (path.to_path_buf(), path.with_extension(PNG_EXT)),
        Some(PNG_EXT) => (path.with_extension(JSON_EXT), path.to_path_buf()),
        _ => (append_ext(path, JSON_EXT), append_ext(path, PNG_EXT)),
    }
}

fn append_ext(path: &Path, ext: &str) -> PathBuf {
    let mut res = OsString::from(path.as_os_str());
    res.push(".");
    res.push(ext);

    res.into()
}

/// Writes the glyph table and then the canvas.
///
/// A font without glyphs has no canvas pixels to encode, so only its glyph table is written and
/// any stale canvas file is removed.
pub fn save(font: &BitmapFont, path: impl AsRef<Path>) -> Result<()> {
    let (json_path, png_path) = sibling_paths(path);
    let canvas = font
        .canvas()
        .ok_or_else(|| Error::format("the canvas has already been released"))?;

    let mut writer = BufWriter::new(File::create(&json_path)?);
    to_writer_pretty(&mut writer, &Document::new(font))?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    if canvas.is_empty() {
        match remove_file(&png_path) {
            Err(err) if err.kind() != ErrorKind::NotFound => return Err(err.into()),
            _ => (),
        }
    } else {
        save_buffer_with_format(
            &png_path,
            canvas.pixels(),
            canvas.width(),
            canvas.height(),
            ColorType::L8,
            ImageFormat::Png,
        )?;
    }

    info!(
        "Wrote {} glyphs to `{}` and `{}`",
        font.len(),
        json_path.display(),
        png_path.display()
    );

    Ok(())
}

/// Reads a bitmap font written by [`save`], from either of its two files.
pub fn load(path: impl AsRef<Path>) -> Result<BitmapFont> {
    let (json_path, png_path) = sibling_paths(path);
    let json = read_file(&json_path)?;
    let json = std::str::from_utf8(&json)
        .map_err(|err| Error::Format(format!("{}: {err}", json_path.display())))?;
    let (family_name, glyphs) =
        parse_document(json).map_err(|err| with_path(err, &json_path))?;

    let canvas = match read_file(&png_path) {
        Ok(png) => decode_canvas(&png).map_err(|err| with_path(err, &png_path))?,
        Err(Error::NotFound(_)) if glyphs.is_empty() => Canvas::default(),
        Err(err) => return Err(err),
    };

    check_layout(&glyphs, &canvas)?;

    info!(
        "Read {} glyphs from `{}` and `{}`",
        glyphs.len(),
        json_path.display(),
        png_path.display()
    );

    Ok(BitmapFont::new(family_name, glyphs, canvas))
}

impl BitmapFont {
    /// Reads a bitmap font; see [`load`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        load(path)
    }

    /// Writes this bitmap font; see [`save`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        save(self, path)
    }
}

fn with_path(err: Error, path: &Path) -> Error {
    match err {
        Error::Format(msg) => Error::Format(format!("{}: {msg}", path.display())),
        err => err,
    }
}

/// Every glyph must lie within the canvas and no two glyphs may share a pixel.
fn check_layout(glyphs: &BTreeMap<char, Glyph>, canvas: &Canvas) -> Result<()> {
    let mut rects = Vec::with_capacity(glyphs.len());
    for (&ch, glyph) in glyphs {
        let rect = glyph.rect();
        if !rect.fits_within(canvas.dims()) {
            return Err(Error::Format(format!(
                "glyph {ch:?} at {rect:?} lies outside the {}x{} canvas",
                canvas.width(),
                canvas.height()
            )));
        }

        if !rect.is_empty() {
            rects.push((ch, rect));
        }
    }

    // Sweep top to bottom; only rects starting above the current bottom edge can overlap it
    rects.sort_unstable_by_key(|(_, rect)| (rect.pos.y, rect.pos.x));

    for (idx, (ch, rect)) in rects.iter().enumerate() {
        for (other_ch, other) in &rects[idx + 1..] {
            if other.pos.y as u64 >= rect.bottom() {
                break;
            }

            if rect.intersects(other) {
                return Err(Error::Format(format!("glyphs {ch:?} and {other_ch:?} overlap")));
            }
        }
    }

    Ok(())
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    read(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => Error::NotFound(path.to_path_buf()),
        _ => Error::Io(err),
    })
}

fn decode_canvas(png: &[u8]) -> Result<Canvas> {
    let image = load_from_memory_with_format(png, ImageFormat::Png).map_err(|err| match err {
        ImageError::Decoding(_) | ImageError::Limits(_) | ImageError::Unsupported(_) => {
            Error::Format(format!("undecodable canvas: {err}"))
        }
        err => Error::Image(err),
    })?;

    match image {
        DynamicImage::ImageLuma8(image) => {
            let (width, height) = image.dimensions();

            Canvas::from_pixels(width, height, image.into_raw())
        }
        image => Err(Error::Format(format!(
            "canvas must be 8-bit grayscale, found {:?}",
            image.color()
        ))),
    }
}

#[derive(Serialize)]
struct Document<'a> {
    family: &'a str,
    glyphs: BTreeMap<String, Record>,
}

impl<'a> Document<'a> {
    fn new(font: &'a BitmapFont) -> Self {
        Self {
            family: font.family_name(),
            glyphs: font
                .glyphs()
                .map(|(ch, glyph)| (ch.to_string(), Record::from(glyph)))
                .collect(),
        }
    }
}

#[derive(Serialize)]
struct Record {
    position: [u32; 2],
    size: [u32; 2],
    bearing: [i32; 2],
    advance: i32,
}

impl From<&Glyph> for Record {
    fn from(glyph: &Glyph) -> Self {
        Self {
            position: glyph.position().into(),
            size: glyph.size().into(),
            bearing: glyph.bearing().into(),
            advance: glyph.advance(),
        }
    }
}

/// Decodes a glyph table in either the nested or the older flat layout.
fn parse_document(json: &str) -> Result<(String, BTreeMap<char, Glyph>)> {
    let root: Value =
        serde_json::from_str(json).map_err(|err| Error::Format(format!("invalid JSON: {err}")))?;
    let root = root
        .as_object()
        .ok_or_else(|| Error::format("glyph table must be an object"))?;

    let (family_name, records) = match root.get("glyphs") {
        Some(glyphs) => {
            let family_name = match root.get("family") {
                None | Some(Value::Null) => String::new(),
                Some(Value::String(family)) => family.clone(),
                Some(_) => return Err(Error::format("`family` must be a string")),
            };
            let glyphs = glyphs
                .as_object()
                .ok_or_else(|| Error::format("`glyphs` must be an object"))?;

            (family_name, glyphs)
        }
        None => {
            debug!("Reading flat glyph table");

            (String::new(), root)
        }
    };

    let mut glyphs = BTreeMap::new();
    for (key, record) in records {
        let ch = parse_key(key)?;
        glyphs.insert(ch, parse_record(ch, record)?);
    }

    Ok((family_name, glyphs))
}

fn parse_key(key: &str) -> Result<char> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => Err(Error::Format(format!(
            "glyph key {key:?} must be exactly one character"
        ))),
    }
}

fn parse_record(ch: char, record: &Value) -> Result<Glyph> {
    let record = record
        .as_object()
        .ok_or_else(|| Error::Format(format!("glyph {ch:?} must be an object")))?;
    let field = |name: &str| {
        record
            .get(name)
            .ok_or_else(|| Error::Format(format!("glyph {ch:?} is missing `{name}`")))
    };

    let position: [u32; 2] = expect_pair(ch, "position", field("position")?)?;
    let size: [u32; 2] = expect_pair(ch, "size", field("size")?)?;
    let bearing: [i32; 2] = expect_pair(ch, "bearing", field("bearing")?)?;
    let advance = expect_int(ch, "advance", field("advance")?)?;

    Ok(Glyph::new(
        Extent::from(position),
        Extent::from(size),
        Coord::from(bearing),
        advance,
    ))
}

fn expect_pair<T>(ch: char, name: &str, val: &Value) -> Result<[T; 2]>
where
    T: TryFrom<i64>,
{
    match val.as_array().map(Vec::as_slice) {
        Some([x, y]) => Ok([expect_int(ch, name, x)?, expect_int(ch, name, y)?]),
        _ => Err(Error::Format(format!(
            "glyph {ch:?} `{name}` must be an array of two integers"
        ))),
    }
}

fn expect_int<T>(ch: char, name: &str, val: &Value) -> Result<T>
where
    T: TryFrom<i64>,
{
    val.as_i64()
        .and_then(|val| T::try_from(val).ok())
        .ok_or_else(|| Error::Format(format!("glyph {ch:?} `{name}` has invalid value {val}")))
}
