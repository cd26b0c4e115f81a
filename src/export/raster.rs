use std::{
    path::Path,
    sync::{Arc, OnceLock},
};

use anyhow::Context;

use crate::{
    export::svg::to_svg,
    foundation::error::{GearersError, GearersResult},
    scene::tree::VisualTree,
};

/// Straight-alpha RGBA8 pixels, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.data.get(i..i + 4).and_then(|p| p.try_into().ok())
    }
}

// Scanning system fonts is slow; share one database per process.
fn system_fontdb() -> Arc<usvg::fontdb::Database> {
    static DB: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "loaded system fonts");
        Arc::new(db)
    })
    .clone()
}

/// Rasterize SVG text into a `width` x `height` frame, scaling the document to fit.
pub fn rasterize_svg(svg: &str, width: u32, height: u32) -> GearersResult<FrameRGBA> {
    let opts = usvg::Options {
        fontdb: system_fontdb(),
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(svg, &opts).context("parse svg tree")?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| GearersError::evaluation("failed to allocate svg pixmap"))?;
    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    let data = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    Ok(FrameRGBA {
        width,
        height,
        data,
    })
}

/// Rasterize a visual tree at its canvas size.
#[tracing::instrument(skip(tree), fields(composition = %tree.composition, frame = tree.frame.0))]
pub fn rasterize(tree: &VisualTree) -> GearersResult<FrameRGBA> {
    rasterize_svg(&to_svg(tree), tree.canvas.width, tree.canvas.height)
}

/// Encode `frame` as PNG at `path`.
pub fn write_png(frame: &FrameRGBA, path: &Path) -> GearersResult<()> {
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/export/raster.rs"]
mod tests;
