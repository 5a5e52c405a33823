#[macro_use]
extern crate log;

use {
    anyhow::{bail, Context},
    clap::Parser,
    glyph_pack::bake::{
        asset::{Asset, BitmapFont as BitmapFontAsset},
        bake_bitmap_font,
    },
    pretty_env_logger::init,
    std::{env::current_dir, path::PathBuf},
};

/// Bakes a scalable font into a bitmap font: a `.png` canvas of packed glyphs and a `.json` table
/// describing where each glyph is and how to lay it out.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Path to a font file (any format fontdue reads) or to a `.toml` bitmap font asset file.
    font: PathBuf,

    /// The characters (UTF-8) to include in the font. Printable ASCII is used if TEXT is not
    /// given.
    text: Option<String>,

    /// Set the font size (height) in pixels [default: 12]
    #[arg(short, long, value_name = "PIXELS")]
    size: Option<u32>,

    /// Base path of the output files [default: <FONT name>_<size>]
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Index of the face to use within a font collection [default: 0]
    #[arg(long, value_name = "N")]
    collection_index: Option<u32>,

    /// Fail if the font has no glyph for one of the characters
    #[arg(long)]
    require_glyphs: bool,
}

fn main() -> anyhow::Result<()> {
    // Enable logging
    init();

    let args = Args::parse();
    let cwd = current_dir().context("Unable to get current directory")?;
    let is_asset = args
        .font
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("toml"))
        .unwrap_or_default();

    // Asset files resolve their paths relative to themselves; command line paths (including
    // --output) resolve relative to the working directory
    let (asset_dir, asset) = if is_asset {
        let asset = Asset::read(&args.font)
            .with_context(|| format!("Unable to read asset `{}`", args.font.display()))?;
        let Some(asset) = asset.into_bitmap_font() else {
            bail!("`{}` is not a bitmap font asset", args.font.display());
        };
        let asset_dir = args
            .font
            .parent()
            .map(PathBuf::from)
            .unwrap_or_default();

        (asset_dir, asset)
    } else {
        (cwd.clone(), BitmapFontAsset::new(&args.font))
    };

    let mut asset = asset
        .with_collection_index_is(args.collection_index)
        .with_output_is(args.output.map(|output| cwd.join(output)))
        .with_size_is(args.size)
        .with_text_is(args.text);
    if args.require_glyphs {
        asset = asset.with_require_glyphs(true);
    }

    debug!("Baking {:?}", asset);

    let output = bake_bitmap_font(&asset_dir, &asset)
        .with_context(|| format!("Unable to bake `{}`", args.font.display()))?;

    info!("Baked `{}`", output.display());

    Ok(())
}
