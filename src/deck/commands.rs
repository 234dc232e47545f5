//! Drawing commands.
//!
//! Every command follows the same thin-driver shape:
//!
//! 1. Resolve the range into explicit card indices.
//! 2. Resolve every option table the command needs, eagerly.
//! 3. Concretize any per-card geometry (the one step that consults data
//!    outside the option bag: image intrinsic sizes).
//! 4. Only then iterate the range, invoking the sink once per index.
//!
//! Any error in steps 1-3 aborts before the sink sees a single card, so a
//! command either applies to its whole range or not at all.

use log::{debug, warn};

use crate::error::Result;
use crate::options::{
    GeometryArgs, InputFileArgs, OptionBag, PaintArgs, PixelBox, ResolveContext, TextArgs,
    TransformArgs,
};
use crate::range::{CardRange, RangeIndices};

use super::sink::{ImageParams, RenderSink, ShapeParams, TextParams};
use super::Deck;

impl Deck {
    /// Place an image on each card in range.
    ///
    /// Recognized keys: `range`, `layout`, `file` (required), `x`, `y`,
    /// `width`, `height` (default `native`), `angle`, `flip_x`, `flip_y`,
    /// `blend`.
    pub fn png(&self, sink: &mut dyn RenderSink, opts: &OptionBag) -> Result<()> {
        let indices = self.range_for(opts)?;
        let ctx = self.resolve_ctx(opts);

        let files = InputFileArgs::load(&ctx, opts)?;
        let geom = GeometryArgs::load(&ctx, opts, "native")?;
        let tf = TransformArgs::load(&ctx, opts)?;

        // Frames are concretized for the whole range up front; a bad
        // sentinel on the last card must abort before the first renders.
        let mut frames = Vec::with_capacity(indices.len());
        for &i in &indices {
            let intrinsic = sink.intrinsic_size(&files.file[i]);
            frames.push(geom.frame_for(i, intrinsic)?);
        }

        debug!("png: rendering {} of {} cards", indices.len(), self.size());
        for (&i, frame) in indices.iter().zip(&frames) {
            let params = ImageParams {
                file: &files.file[i],
                area: *frame,
                angle: tf.angle[i],
                flip_x: tf.flip_x[i],
                flip_y: tf.flip_y[i],
                blend: tf.blend[i],
            };
            sink.place_image(i, &params)?;
        }
        Ok(())
    }

    /// Draw a rectangle on each card in range.
    ///
    /// Recognized keys: `range`, `layout`, `x`, `y`, `width`, `height`
    /// (default `deck`), `fill`, `stroke`, `stroke_width`, `angle`,
    /// `blend`.
    pub fn rect(&self, sink: &mut dyn RenderSink, opts: &OptionBag) -> Result<()> {
        let indices = self.range_for(opts)?;
        let ctx = self.resolve_ctx(opts);

        let geom = GeometryArgs::load(&ctx, opts, "deck")?;
        let paint = PaintArgs::load(&ctx, opts)?;
        let tf = TransformArgs::load(&ctx, opts)?;

        let frames = self.frames_for(&geom, &indices)?;

        debug!("rect: rendering {} of {} cards", indices.len(), self.size());
        for (&i, frame) in indices.iter().zip(&frames) {
            let params = ShapeParams {
                area: *frame,
                fill: &paint.fill[i],
                stroke: &paint.stroke[i],
                stroke_width: paint.stroke_width[i],
                angle: tf.angle[i],
                blend: tf.blend[i],
            };
            sink.draw_shape(i, &params)?;
        }
        Ok(())
    }

    /// Draw a text block on each card in range.
    ///
    /// Recognized keys: `range`, `layout`, `text`, `font`, `font_size`,
    /// `color`, `align`, `x`, `y`, `width`, `height` (default `deck`),
    /// `angle`.
    pub fn text(&self, sink: &mut dyn RenderSink, opts: &OptionBag) -> Result<()> {
        let indices = self.range_for(opts)?;
        let ctx = self.resolve_ctx(opts);

        let text = TextArgs::load(&ctx, opts)?;
        let geom = GeometryArgs::load(&ctx, opts, "deck")?;
        let tf = TransformArgs::load(&ctx, opts)?;

        let frames = self.frames_for(&geom, &indices)?;

        debug!("text: rendering {} of {} cards", indices.len(), self.size());
        for (&i, frame) in indices.iter().zip(&frames) {
            let params = TextParams {
                text: &text.text[i],
                area: *frame,
                font: &text.font[i],
                font_size: text.font_size[i],
                color: &text.color[i],
                align: text.align[i],
                angle: tf.angle[i],
            };
            sink.draw_text(i, &params)?;
        }
        Ok(())
    }

    /// Resolve the `range` key (default: all cards).
    fn range_for(&self, opts: &OptionBag) -> Result<RangeIndices> {
        let range = match opts.get("range") {
            Some(value) => CardRange::from_value(value)?,
            None => CardRange::All,
        };
        range.resolve(self.size())
    }

    /// Build the resolution context, looking up the `layout` reference.
    ///
    /// A `layout:` key naming a missing entry degrades to built-in
    /// defaults only.
    fn resolve_ctx(&self, opts: &OptionBag) -> ResolveContext<'_> {
        let layout = opts
            .get("layout")
            .and_then(|v| v.as_text())
            .and_then(|name| {
                let entry = self.layouts().lookup(name);
                if entry.is_none() {
                    warn!("layout entry `{}` not found; using built-in defaults", name);
                }
                entry
            });

        ResolveContext {
            deck_size: self.size(),
            dpi: self.dpi(),
            deck_width: self.width(),
            deck_height: self.height(),
            layout,
            config: self.config(),
        }
    }

    /// Concretize geometry for every index in range (no intrinsic source).
    fn frames_for(&self, geom: &GeometryArgs, indices: &RangeIndices) -> Result<Vec<PixelBox>> {
        indices.iter().map(|&i| geom.frame_for(i, None)).collect()
    }
}
