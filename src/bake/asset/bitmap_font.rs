use {
    serde::Deserialize,
    std::path::{Path, PathBuf},
};

/// The pixel size used when none is specified.
pub const DEFAULT_SIZE: u32 = 12;

/// Holds a description of a bitmap font baked from an `.otf` or `.ttf` scalable font.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct BitmapFont {
    collection_index: Option<u32>,
    output: Option<PathBuf>,
    require_glyphs: Option<bool>,
    size: Option<u32>,
    src: PathBuf,
    text: Option<String>,
}

impl BitmapFont {
    pub fn new<S>(src: S) -> Self
    where
        S: AsRef<Path>,
    {
        Self {
            collection_index: None,
            output: None,
            require_glyphs: None,
            size: None,
            src: src.as_ref().to_path_buf(),
            text: None,
        }
    }

    pub fn with_collection_index_is(mut self, collection_index: Option<u32>) -> Self {
        if collection_index.is_some() {
            self.collection_index = collection_index;
        }

        self
    }

    pub fn with_output_is<P>(mut self, output: Option<P>) -> Self
    where
        P: AsRef<Path>,
    {
        if let Some(output) = output {
            self.output = Some(output.as_ref().to_path_buf());
        }

        self
    }

    pub fn with_require_glyphs(mut self, require_glyphs: bool) -> Self {
        self.require_glyphs = Some(require_glyphs);
        self
    }

    pub fn with_size_is(mut self, size: Option<u32>) -> Self {
        if size.is_some() {
            self.size = size;
        }

        self
    }

    pub fn with_text_is(mut self, text: Option<String>) -> Self {
        if text.is_some() {
            self.text = text;
        }

        self
    }

    /// The index of the font to use if parsing a font collection.
    ///
    /// The default is `0`.
    pub fn collection_index(&self) -> u32 {
        self.collection_index.unwrap_or_default()
    }

    /// Base path of the `.json` and `.png` pair to write, relative to the asset file.
    ///
    /// The default is the font file name, without extension, followed by `_` and the size.
    pub fn output(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let stem = self
                .src
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();

            PathBuf::from(format!("{stem}_{}", self.size()))
        })
    }

    /// Fail instead of baking the font's fallback glyph for characters it does not contain.
    ///
    /// The default is `false`.
    pub fn require_glyphs(&self) -> bool {
        self.require_glyphs.unwrap_or_default()
    }

    /// Pixel height of the em square.
    ///
    /// The default is `12`.
    pub fn size(&self) -> u32 {
        self.size.unwrap_or(DEFAULT_SIZE)
    }

    /// The font file source.
    pub fn src(&self) -> &Path {
        self.src.as_path()
    }

    /// The characters to bake. An empty or missing value bakes printable ASCII.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }
}
