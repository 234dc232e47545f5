//! The rendering sink seam.
//!
//! Rasterization is an external collaborator: the engine hands it
//! fully-resolved scalar parameters for one card at a time and treats any
//! failure as a synchronous command error. Backends implement [`RenderSink`];
//! the engine ships only [`NullSink`], a no-op used for dry runs and tests.

use std::path::Path;

use crate::error::Result;
use crate::options::{BlendMode, PixelBox, TextAlign};

/// Fully-resolved parameters for placing one image on one card.
#[derive(Clone, Debug)]
pub struct ImageParams<'a> {
    /// Source image path, already joined with the image directory.
    pub file: &'a Path,
    /// Placement rectangle in pixels.
    pub area: PixelBox,
    /// Rotation angle in radians.
    pub angle: f64,
    /// Horizontal flip.
    pub flip_x: bool,
    /// Vertical flip.
    pub flip_y: bool,
    /// Compositing blend mode.
    pub blend: BlendMode,
}

/// Fully-resolved parameters for drawing one rectangle on one card.
#[derive(Clone, Debug)]
pub struct ShapeParams<'a> {
    /// Shape rectangle in pixels.
    pub area: PixelBox,
    /// Fill color spec (opaque to the engine).
    pub fill: &'a str,
    /// Stroke color spec.
    pub stroke: &'a str,
    /// Stroke width in pixels.
    pub stroke_width: f64,
    /// Rotation angle in radians.
    pub angle: f64,
    /// Compositing blend mode.
    pub blend: BlendMode,
}

/// Fully-resolved parameters for drawing one text block on one card.
#[derive(Clone, Debug)]
pub struct TextParams<'a> {
    /// The string to draw.
    pub text: &'a str,
    /// Layout rectangle in pixels.
    pub area: PixelBox,
    /// Font description (family + style, backend-interpreted).
    pub font: &'a str,
    /// Font size in points.
    pub font_size: f64,
    /// Text color spec.
    pub color: &'a str,
    /// Horizontal alignment.
    pub align: TextAlign,
    /// Rotation angle in radians.
    pub angle: f64,
}

/// Rendering backend for one deck.
///
/// Implementations receive one call per selected card, after the whole
/// command has resolved. Failures propagate synchronously to the caller of
/// the drawing command. A future parallel renderer may invoke these
/// concurrently with distinct card indices; implementations relying on that
/// must be safe for it.
pub trait RenderSink {
    /// Place an image on a card.
    fn place_image(&mut self, card: usize, params: &ImageParams) -> Result<()>;

    /// Draw a rectangle on a card.
    fn draw_shape(&mut self, card: usize, params: &ShapeParams) -> Result<()>;

    /// Draw a text block on a card.
    fn draw_text(&mut self, card: usize, params: &TextParams) -> Result<()>;

    /// The intrinsic (width, height) of an image, if the backend can tell.
    ///
    /// Consulted by the geometry kind to resolve `native` and `scale`
    /// dimensions. The default says "unknown", which makes those sentinels
    /// an error.
    fn intrinsic_size(&self, file: &Path) -> Option<(i32, i32)> {
        let _ = file;
        None
    }
}

/// A sink that renders nothing.
///
/// Useful for validating a script's resolution without a backend.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn place_image(&mut self, _card: usize, _params: &ImageParams) -> Result<()> {
        Ok(())
    }

    fn draw_shape(&mut self, _card: usize, _params: &ShapeParams) -> Result<()> {
        Ok(())
    }

    fn draw_text(&mut self, _card: usize, _params: &TextParams) -> Result<()> {
        Ok(())
    }
}
