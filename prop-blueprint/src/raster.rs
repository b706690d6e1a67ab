//! SVG document → PNG / PDF bytes.

use std::path::Path;
use std::sync::Arc;

use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("failed to parse SVG: {0}")]
    SvgParse(String),
    #[error("failed to load font {path}: {source}")]
    Font {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid raster scale {0}")]
    Scale(f32),
    #[error("failed to allocate {0}x{1} pixmap")]
    PixmapAlloc(u32, u32),
    #[error("failed to encode PNG: {0}")]
    PngEncode(#[from] png::EncodingError),
    #[error("failed to convert SVG to PDF: {0}")]
    PdfConvert(String),
}

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Clone, Debug)]
pub struct RasterOptions {
    /// Output pixels per SVG user unit.
    pub scale: f32,
    /// Extra font file; its first family becomes the monospace face.
    pub font: Option<String>,
}

impl Default for RasterOptions {
    fn default() -> Self {
        RasterOptions {
            scale: 1.0,
            font: None,
        }
    }
}

fn load_fonts(db: &mut usvg::fontdb::Database, font: Option<&str>) -> Result<()> {
    db.load_system_fonts();
    let Some(path) = font else {
        return Ok(());
    };
    let before = db.len();
    db.load_font_file(Path::new(path))
        .map_err(|source| RasterError::Font {
            path: path.to_string(),
            source,
        })?;
    // Label text is monospace; route that generic family to the supplied face.
    let family = db
        .faces()
        .skip(before)
        .find_map(|face| face.families.first().map(|(n, _)| n.clone()));
    if let Some(name) = family {
        debug!(family = %name, "using supplied font for labels");
        db.set_monospace_family(name.clone());
        db.set_sans_serif_family(name);
    }
    Ok(())
}

pub fn svg_to_pixmap(svg: &str, options: &RasterOptions) -> Result<tiny_skia::Pixmap> {
    if !(options.scale.is_finite() && options.scale > 0.0) {
        return Err(RasterError::Scale(options.scale));
    }
    let mut opt = usvg::Options::default();
    let mut fontdb = usvg::fontdb::Database::new();
    load_fonts(&mut fontdb, options.font.as_deref())?;
    opt.fontdb = Arc::new(fontdb);

    let tree =
        usvg::Tree::from_str(svg, &opt).map_err(|e| RasterError::SvgParse(format!("{e:?}")))?;
    let size = tree.size();
    let w = (size.width() * options.scale).ceil().max(1.0) as u32;
    let h = (size.height() * options.scale).ceil().max(1.0) as u32;
    let mut pixmap = tiny_skia::Pixmap::new(w, h).ok_or(RasterError::PixmapAlloc(w, h))?;
    let mut pm = pixmap.as_mut();
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(options.scale, options.scale),
        &mut pm,
    );
    Ok(pixmap)
}

/// Fixed filter and compression so identical drawings give identical files.
pub fn encode_png_deterministic(pixmap: &tiny_skia::Pixmap) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    {
        let mut enc = Encoder::new(&mut out, pixmap.width(), pixmap.height());
        enc.set_color(ColorType::Rgba);
        enc.set_depth(BitDepth::Eight);
        enc.set_filter(FilterType::NoFilter);
        enc.set_compression(Compression::Default);
        let mut writer = enc.write_header()?;
        writer.write_image_data(pixmap.data())?;
        writer.finish()?;
    }
    Ok(out)
}

pub fn svg_to_png(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let pixmap = svg_to_pixmap(svg, options)?;
    encode_png_deterministic(&pixmap)
}

pub fn svg_to_pdf(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let mut opt = svg2pdf::usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    if let Some(path) = options.font.as_deref() {
        opt.fontdb_mut()
            .load_font_file(Path::new(path))
            .map_err(|source| RasterError::Font {
                path: path.to_string(),
                source,
            })?;
    }
    let tree = svg2pdf::usvg::Tree::from_str(svg, &opt)
        .map_err(|e| RasterError::SvgParse(format!("{e:?}")))?;
    svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|e| RasterError::PdfConvert(format!("{e:?}")))
}
