//! Per-option-kind specializations.
//!
//! Each drawing command assembles its parameters from a handful of shared
//! kinds, all layered on the generic broadcast in [`resolver`]:
//!
//! - **Geometry box**: x/y/width/height with unit conversion and the
//!   `native`/`deck`/`scale` sentinels.
//! - **Paint**: fill/stroke color specs with palette substitution.
//! - **Transform**: rotation angle, flips, blend mode.
//! - **Input file**: image paths, resolved against the configured image dir.
//! - **Text**: string content, font, size, alignment.
//!
//! All loading is eager: a command resolves every kind it needs before it
//! renders anything.
//!
//! [`resolver`]: super::resolver

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::options::bag::OptionBag;
use crate::options::resolver::{resolve_key, ResolveContext};
use crate::options::spread::Resolved;
use crate::options::value::OptionValue;
use crate::units::{self, Converted};

/// A width or height after unit conversion, possibly still symbolic.
///
/// `deck` is resolved at load time (the deck's dimensions are known);
/// `native` and `scale` need the image's intrinsic size and are resolved
/// per card by [`GeometryArgs::frame_for`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dimension {
    /// Concrete pixel count.
    Px(i32),
    /// The image's intrinsic dimension.
    Native,
    /// Derived from the other dimension, preserving aspect ratio.
    Scale,
}

/// A fully-concrete placement rectangle for one card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelBox {
    /// Left edge in pixels (may be negative, e.g. into the bleed).
    pub x: i32,
    /// Top edge in pixels.
    pub y: i32,
    /// Width in pixels, always positive.
    pub width: i32,
    /// Height in pixels, always positive.
    pub height: i32,
}

/// Resolved geometry tables for one drawing command.
#[derive(Clone, Debug)]
pub struct GeometryArgs {
    x: Resolved<i32>,
    y: Resolved<i32>,
    width: Resolved<Dimension>,
    height: Resolved<Dimension>,
}

impl GeometryArgs {
    /// Resolve `x`, `y`, `width`, `height` from an option bag.
    ///
    /// `default_dim` is the command's built-in width/height default:
    /// `native` for image placement, the deck's own dimension for shapes
    /// and text boxes.
    pub fn load(ctx: &ResolveContext, opts: &OptionBag, default_dim: &str) -> Result<Self> {
        Ok(Self {
            x: resolve_key(ctx, opts, "x", 0i64.into(), coord)?,
            y: resolve_key(ctx, opts, "y", 0i64.into(), coord)?,
            width: resolve_key(ctx, opts, "width", default_dim.into(), dimension)?,
            height: resolve_key(ctx, opts, "height", default_dim.into(), dimension)?,
        })
    }

    /// Concretize the box for one card.
    ///
    /// `intrinsic` is the image's natural (width, height) when the command
    /// has one; `native` and `scale` fail without it.
    pub fn frame_for(&self, card: usize, intrinsic: Option<(i32, i32)>) -> Result<PixelBox> {
        let width = match (self.width[card], self.height[card]) {
            (Dimension::Px(w), _) => w,
            (Dimension::Native, _) => intrinsic_dim(intrinsic, "width")?.0,
            (Dimension::Scale, Dimension::Px(h)) => {
                let (iw, ih) = intrinsic_dim(intrinsic, "width")?;
                scale_dim(h, iw, ih)
            }
            (Dimension::Scale, Dimension::Native) => intrinsic_dim(intrinsic, "width")?.0,
            (Dimension::Scale, Dimension::Scale) => {
                return Err(Error::invalid_option(
                    "width",
                    "`scale` requires the other dimension to be concrete",
                ));
            }
        };
        let height = match (self.height[card], self.width[card]) {
            (Dimension::Px(h), _) => h,
            (Dimension::Native, _) => intrinsic_dim(intrinsic, "height")?.1,
            (Dimension::Scale, Dimension::Px(w)) => {
                let (iw, ih) = intrinsic_dim(intrinsic, "height")?;
                scale_dim(w, ih, iw)
            }
            (Dimension::Scale, Dimension::Native) => intrinsic_dim(intrinsic, "height")?.1,
            // Both `scale` already rejected above.
            (Dimension::Scale, Dimension::Scale) => unreachable!(),
        };

        Ok(PixelBox {
            x: self.x[card],
            y: self.y[card],
            width,
            height,
        })
    }
}

fn intrinsic_dim(intrinsic: Option<(i32, i32)>, key: &str) -> Result<(i32, i32)> {
    intrinsic.ok_or_else(|| {
        Error::invalid_option(key, "`native`/`scale` requires an image with known dimensions")
    })
}

/// Derive one dimension from the other via the intrinsic aspect ratio.
fn scale_dim(other: i32, num: i32, den: i32) -> i32 {
    (f64::from(other) * f64::from(num) / f64::from(den)).round() as i32
}

/// x/y converter: any measure, negatives allowed, sentinels rejected.
fn coord(key: &str, value: &OptionValue, ctx: &ResolveContext) -> Result<i32> {
    units::expect_pixels(key, value, ctx.dpi)
}

/// width/height converter: positive measure, `native`/`deck`/`scale`
/// sentinels recognized. `deck` resolves immediately against the deck's
/// own dimensions.
fn dimension(key: &str, value: &OptionValue, ctx: &ResolveContext) -> Result<Dimension> {
    match units::to_pixels(value, ctx.dpi)? {
        Converted::Pixels(px) => {
            if px <= 0 {
                return Err(Error::invalid_option(key, format!("must be positive, got {}", px)));
            }
            Ok(Dimension::Px(px))
        }
        Converted::Sentinel(s) => match s.as_str() {
            "native" => Ok(Dimension::Native),
            "scale" => Ok(Dimension::Scale),
            "deck" => Ok(Dimension::Px(if key == "height" {
                ctx.deck_height
            } else {
                ctx.deck_width
            })),
            other => Err(Error::invalid_option(key, format!("unknown sentinel `{}`", other))),
        },
    }
}

/// Resolved paint tables: color specs are opaque strings to the engine,
/// already run through the configured palette.
#[derive(Clone, Debug)]
pub struct PaintArgs {
    /// Fill color spec per card.
    pub fill: Resolved<String>,
    /// Stroke color spec per card.
    pub stroke: Resolved<String>,
    /// Stroke width in pixels per card.
    pub stroke_width: Resolved<f64>,
}

impl PaintArgs {
    /// Resolve `fill`, `stroke`, `stroke_width` from an option bag.
    pub fn load(ctx: &ResolveContext, opts: &OptionBag) -> Result<Self> {
        Ok(Self {
            fill: resolve_key(ctx, opts, "fill", "#00000000".into(), color)?,
            stroke: resolve_key(ctx, opts, "stroke", "#000000".into(), color)?,
            stroke_width: resolve_key(ctx, opts, "stroke_width", 2.0.into(), float)?,
        })
    }
}

/// Color converter: text only, palette names substituted from the
/// configuration before the spec reaches the sink.
fn color(key: &str, value: &OptionValue, ctx: &ResolveContext) -> Result<String> {
    let spec = value
        .as_text()
        .ok_or_else(|| Error::invalid_option(key, "expected a color spec string"))?;
    Ok(ctx.config.resolve_color(spec).to_string())
}

fn float(key: &str, value: &OptionValue, _ctx: &ResolveContext) -> Result<f64> {
    value
        .as_float()
        .filter(|f| f.is_finite())
        .ok_or_else(|| Error::invalid_option(key, "expected a finite number"))
}

fn boolean(key: &str, value: &OptionValue, _ctx: &ResolveContext) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| Error::invalid_option(key, "expected a boolean"))
}

fn text(key: &str, value: &OptionValue, _ctx: &ResolveContext) -> Result<String> {
    match value {
        OptionValue::Text(s) => Ok(s.clone()),
        OptionValue::Int(i) => Ok(i.to_string()),
        OptionValue::Float(f) => Ok(f.to_string()),
        _ => Err(Error::invalid_option(key, "expected text")),
    }
}

/// Compositing blend mode, passed through to the sink.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlendMode {
    /// Source-over compositing.
    #[default]
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
}

impl BlendMode {
    fn parse(key: &str, s: &str) -> Result<Self> {
        match s {
            "normal" => Ok(BlendMode::Normal),
            "multiply" => Ok(BlendMode::Multiply),
            "screen" => Ok(BlendMode::Screen),
            "overlay" => Ok(BlendMode::Overlay),
            "darken" => Ok(BlendMode::Darken),
            "lighten" => Ok(BlendMode::Lighten),
            other => Err(Error::invalid_option(key, format!("unknown blend mode `{}`", other))),
        }
    }
}

/// Resolved affine-transform tables.
#[derive(Clone, Debug)]
pub struct TransformArgs {
    /// Rotation angle in radians per card.
    pub angle: Resolved<f64>,
    /// Horizontal flip per card.
    pub flip_x: Resolved<bool>,
    /// Vertical flip per card.
    pub flip_y: Resolved<bool>,
    /// Blend mode per card.
    pub blend: Resolved<BlendMode>,
}

impl TransformArgs {
    /// Resolve `angle`, `flip_x`, `flip_y`, `blend` from an option bag.
    pub fn load(ctx: &ResolveContext, opts: &OptionBag) -> Result<Self> {
        Ok(Self {
            angle: resolve_key(ctx, opts, "angle", 0.0.into(), float)?,
            flip_x: resolve_key(ctx, opts, "flip_x", false.into(), boolean)?,
            flip_y: resolve_key(ctx, opts, "flip_y", false.into(), boolean)?,
            blend: resolve_key(ctx, opts, "blend", "normal".into(), |k: &str, v: &OptionValue, _: &ResolveContext| {
                let s = v
                    .as_text()
                    .ok_or_else(|| Error::invalid_option(k, "expected a blend mode name"))?;
                BlendMode::parse(k, s)
            })?,
        })
    }
}

/// Resolved input-file table.
#[derive(Clone, Debug)]
pub struct InputFileArgs {
    /// Path per card, already joined with the configured image directory.
    pub file: Resolved<PathBuf>,
}

impl InputFileArgs {
    /// Resolve the required `file` key from an option bag.
    ///
    /// There is no built-in default: a command that places images fails
    /// when neither the opts nor the layout entry supplies a file.
    pub fn load(ctx: &ResolveContext, opts: &OptionBag) -> Result<Self> {
        if !opts.contains("file") && !ctx.layout.is_some_and(|entry| entry.contains("file")) {
            return Err(Error::invalid_option("file", "required"));
        }
        let file = resolve_key(ctx, opts, "file", "".into(), |key: &str, value: &OptionValue, ctx: &ResolveContext| {
            let name = value
                .as_text()
                .ok_or_else(|| Error::invalid_option(key, "expected a file name"))?;
            if name.is_empty() {
                return Err(Error::invalid_option(key, "file name is empty"));
            }
            let path = PathBuf::from(name);
            if path.is_absolute() {
                Ok(path)
            } else {
                Ok(ctx.config.img_dir().join(path))
            }
        })?;
        Ok(Self { file })
    }
}

/// Horizontal text alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    fn parse(key: &str, s: &str) -> Result<Self> {
        match s {
            "left" => Ok(TextAlign::Left),
            "center" => Ok(TextAlign::Center),
            "right" => Ok(TextAlign::Right),
            other => Err(Error::invalid_option(key, format!("unknown alignment `{}`", other))),
        }
    }
}

/// Resolved text tables.
#[derive(Clone, Debug)]
pub struct TextArgs {
    /// String content per card. Numbers are stringified.
    pub text: Resolved<String>,
    /// Font description per card (family + style, sink-interpreted).
    pub font: Resolved<String>,
    /// Font size in points per card.
    pub font_size: Resolved<f64>,
    /// Text color spec per card, palette-substituted.
    pub color: Resolved<String>,
    /// Horizontal alignment per card.
    pub align: Resolved<TextAlign>,
}

impl TextArgs {
    /// Resolve `text`, `font`, `font_size`, `color`, `align`.
    pub fn load(ctx: &ResolveContext, opts: &OptionBag) -> Result<Self> {
        Ok(Self {
            text: resolve_key(ctx, opts, "text", "".into(), text)?,
            font: resolve_key(ctx, opts, "font", "Sans".into(), text)?,
            font_size: resolve_key(ctx, opts, "font_size", 12.0.into(), float)?,
            color: resolve_key(ctx, opts, "color", "#000000".into(), color)?,
            align: resolve_key(ctx, opts, "align", "left".into(), |k: &str, v: &OptionValue, _: &ResolveContext| {
                let s = v
                    .as_text()
                    .ok_or_else(|| Error::invalid_option(k, "expected an alignment name"))?;
                TextAlign::parse(k, s)
            })?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Configuration;

    fn ctx(config: &Configuration) -> ResolveContext<'_> {
        ResolveContext {
            deck_size: 2,
            dpi: 300,
            deck_width: 825,
            deck_height: 1125,
            layout: None,
            config,
        }
    }

    #[test]
    fn test_geometry_units_and_defaults() {
        let config = Configuration::default();
        let opts = OptionBag::new().with("x", "1in").with("y", -30i64);
        let geom = GeometryArgs::load(&ctx(&config), &opts, "deck").unwrap();

        let frame = geom.frame_for(0, None).unwrap();
        assert_eq!(frame.x, 300);
        assert_eq!(frame.y, -30);
        assert_eq!(frame.width, 825);
        assert_eq!(frame.height, 1125);
    }

    #[test]
    fn test_geometry_native_needs_intrinsic() {
        let config = Configuration::default();
        let geom = GeometryArgs::load(&ctx(&config), &OptionBag::new(), "native").unwrap();

        assert!(geom.frame_for(0, None).is_err());
        let frame = geom.frame_for(0, Some((200, 100))).unwrap();
        assert_eq!((frame.width, frame.height), (200, 100));
    }

    #[test]
    fn test_geometry_scale_preserves_aspect() {
        let config = Configuration::default();
        let opts = OptionBag::new().with("width", "scale").with("height", 50i64);
        let geom = GeometryArgs::load(&ctx(&config), &opts, "native").unwrap();

        let frame = geom.frame_for(0, Some((200, 100))).unwrap();
        assert_eq!((frame.width, frame.height), (100, 50));
    }

    #[test]
    fn test_geometry_both_scale_rejected() {
        let config = Configuration::default();
        let opts = OptionBag::new().with("width", "scale").with("height", "scale");
        let geom = GeometryArgs::load(&ctx(&config), &opts, "native").unwrap();
        assert!(geom.frame_for(0, Some((200, 100))).is_err());
    }

    #[test]
    fn test_geometry_rejects_non_positive_dims() {
        let config = Configuration::default();
        let opts = OptionBag::new().with("width", 0i64);
        let err = GeometryArgs::load(&ctx(&config), &opts, "deck").unwrap_err();
        assert!(matches!(err, Error::InvalidOption { ref key, .. } if key == "width"));
    }

    #[test]
    fn test_paint_palette_substitution() {
        let config = Configuration::default().with_color("brand", "#ff8800");
        let opts = OptionBag::new().with("fill", "brand").with("stroke", "#00ff00");
        let paint = PaintArgs::load(&ctx(&config), &opts).unwrap();

        assert_eq!(paint.fill[0], "#ff8800");
        assert_eq!(paint.stroke[1], "#00ff00");
        assert_eq!(paint.stroke_width[0], 2.0);
    }

    #[test]
    fn test_transform_defaults_and_blend() {
        let config = Configuration::default();
        let opts = OptionBag::new().with("angle", 0.5).with("blend", "multiply");
        let tf = TransformArgs::load(&ctx(&config), &opts).unwrap();

        assert_eq!(tf.angle[0], 0.5);
        assert!(!tf.flip_x[0]);
        assert_eq!(tf.blend[1], BlendMode::Multiply);
    }

    #[test]
    fn test_transform_unknown_blend_fails() {
        let config = Configuration::default();
        let opts = OptionBag::new().with("blend", "dissolve");
        assert!(TransformArgs::load(&ctx(&config), &opts).is_err());
    }

    #[test]
    fn test_input_file_required() {
        let config = Configuration::default();
        let err = InputFileArgs::load(&ctx(&config), &OptionBag::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidOption { ref key, .. } if key == "file"));
    }

    #[test]
    fn test_input_file_joins_img_dir() {
        let config = Configuration::default().with_img_dir("art");
        let opts = OptionBag::new().with("file", vec!["a.png", "b.png"]);
        let files = InputFileArgs::load(&ctx(&config), &opts).unwrap();

        assert_eq!(files.file[0], PathBuf::from("art/a.png"));
        assert_eq!(files.file[1], PathBuf::from("art/b.png"));
    }

    #[test]
    fn test_text_args() {
        let config = Configuration::default();
        let opts = OptionBag::new()
            .with("text", vec![OptionValue::Text("Ace".into()), OptionValue::Int(2)])
            .with("align", "center");
        let text = TextArgs::load(&ctx(&config), &opts).unwrap();

        assert_eq!(text.text[0], "Ace");
        assert_eq!(text.text[1], "2");
        assert_eq!(text.align[0], TextAlign::Center);
        assert_eq!(text.font[0], "Sans");
    }
}
