//! End-to-end option resolution tests.
//!
//! These exercise the whole pipeline through a recording sink:
//! - Scalar broadcast vs. per-card sequences
//! - Arity validation against deck size (not range size)
//! - Precedence: explicit opts > layout entry > built-in default
//! - Eager, atomic resolution (no partial rendering on error)

use std::path::Path;

use cardpress::{
    Configuration, Deck, Error, ImageParams, LayoutRegistry, OptionBag, RenderSink, Result,
    ShapeParams, TextParams,
};

/// Records every sink invocation, with a switch to fail on demand.
#[derive(Default)]
struct RecordingSink {
    shapes: Vec<(usize, i32, i32, String)>,
    texts: Vec<(usize, String, f64)>,
    images: Vec<(usize, String, i32, i32)>,
    fail_on_card: Option<usize>,
}

impl RenderSink for RecordingSink {
    fn place_image(&mut self, card: usize, params: &ImageParams) -> Result<()> {
        self.check(card)?;
        self.images.push((
            card,
            params.file.display().to_string(),
            params.area.width,
            params.area.height,
        ));
        Ok(())
    }

    fn draw_shape(&mut self, card: usize, params: &ShapeParams) -> Result<()> {
        self.check(card)?;
        self.shapes
            .push((card, params.area.x, params.area.y, params.fill.to_string()));
        Ok(())
    }

    fn draw_text(&mut self, card: usize, params: &TextParams) -> Result<()> {
        self.check(card)?;
        self.texts
            .push((card, params.text.to_string(), params.font_size));
        Ok(())
    }

    fn intrinsic_size(&self, _file: &Path) -> Option<(i32, i32)> {
        Some((400, 200))
    }
}

impl RecordingSink {
    fn check(&self, card: usize) -> Result<()> {
        if self.fail_on_card == Some(card) {
            return Err(Error::Render(format!("backend refused card {}", card)));
        }
        Ok(())
    }
}

fn deck3() -> Deck {
    Deck::builder()
        .cards(3)
        .width(750i64)
        .height(1050i64)
        .build()
        .expect("deck")
}

#[test]
fn test_scalar_x_broadcasts_to_every_card() {
    let deck = deck3();
    let mut sink = RecordingSink::default();
    let opts = OptionBag::new().with("range", "all").with("x", 10i64);
    deck.rect(&mut sink, &opts).unwrap();

    let xs: Vec<_> = sink.shapes.iter().map(|(_, x, _, _)| *x).collect();
    assert_eq!(xs, vec![10, 10, 10]);
}

#[test]
fn test_sequence_x_applies_positionally() {
    let deck = deck3();
    let mut sink = RecordingSink::default();
    let opts = OptionBag::new()
        .with("range", "all")
        .with("x", vec![0i64, 100, 200]);
    deck.rect(&mut sink, &opts).unwrap();

    let per_card: Vec<_> = sink.shapes.iter().map(|(c, x, _, _)| (*c, *x)).collect();
    assert_eq!(per_card, vec![(0, 0), (1, 100), (2, 200)]);
}

#[test]
fn test_short_sequence_fails_naming_key_and_counts() {
    let deck = deck3();
    let mut sink = RecordingSink::default();
    let opts = OptionBag::new().with("x", vec![0i64, 100]);
    let err = deck.rect(&mut sink, &opts).unwrap_err();

    match err {
        Error::ArityMismatch {
            key,
            expected,
            actual,
        } => {
            assert_eq!(key, "x");
            assert_eq!(expected, 3);
            assert_eq!(actual, 2);
        }
        other => panic!("expected arity error, got {:?}", other),
    }
    assert!(sink.shapes.is_empty());
}

#[test]
fn test_sequence_arity_checked_against_deck_not_range() {
    let deck = deck3();
    let mut sink = RecordingSink::default();
    // Range selects one card, but the sequence must still be deck-sized.
    let opts = OptionBag::new().with("range", 0i64).with("x", vec![1i64]);
    let err = deck.rect(&mut sink, &opts).unwrap_err();
    assert!(matches!(err, Error::ArityMismatch { expected: 3, actual: 1, .. }));
}

#[test]
fn test_unit_expressions_convert_at_deck_dpi() {
    let deck = Deck::builder()
        .cards(1)
        .width(750i64)
        .height(1050i64)
        .dpi(100)
        .build()
        .unwrap();
    let mut sink = RecordingSink::default();
    let opts = OptionBag::new().with("x", "1in").with("y", "25.4mm");
    deck.rect(&mut sink, &opts).unwrap();

    assert_eq!(sink.shapes[0].1, 100);
    assert_eq!(sink.shapes[0].2, 100);
}

#[test]
fn test_precedence_explicit_layout_default() {
    let mut layouts = LayoutRegistry::new();
    layouts.add_source(
        [(
            "title".to_string(),
            OptionBag::new().with("font_size", 20i64).with("text", "layout"),
        )]
        .into_iter()
        .collect(),
    );
    let deck = Deck::builder()
        .cards(1)
        .width(100i64)
        .height(100i64)
        .layouts(layouts)
        .build()
        .unwrap();

    // Explicit font_size wins; text falls back to the layout entry.
    let mut sink = RecordingSink::default();
    let opts = OptionBag::new()
        .with("layout", "title")
        .with("font_size", 30i64);
    deck.text(&mut sink, &opts).unwrap();
    assert_eq!(sink.texts[0].1, "layout");
    assert_eq!(sink.texts[0].2, 30.0);

    // Without the layout reference both fall back to built-in defaults.
    let mut sink = RecordingSink::default();
    deck.text(&mut sink, &OptionBag::new()).unwrap();
    assert_eq!(sink.texts[0].1, "");
    assert_eq!(sink.texts[0].2, 12.0);
}

#[test]
fn test_missing_layout_reference_degrades_gracefully() {
    let deck = deck3();
    let mut sink = RecordingSink::default();
    let opts = OptionBag::new().with("layout", "nonexistent").with("text", "hi");
    deck.text(&mut sink, &opts).unwrap();
    assert_eq!(sink.texts.len(), 3);
}

#[test]
fn test_empty_range_is_a_valid_noop() {
    let deck = deck3();
    let mut sink = RecordingSink::default();
    let opts = OptionBag::new().with("range", Vec::<i64>::new());
    deck.text(&mut sink, &opts).unwrap();
    assert!(sink.texts.is_empty());
}

#[test]
fn test_out_of_bounds_range_fails_before_rendering() {
    let deck = deck3();
    let mut sink = RecordingSink::default();
    let opts = OptionBag::new().with("range", vec![0i64, 7]);
    let err = deck.rect(&mut sink, &opts).unwrap_err();
    assert!(matches!(err, Error::RangeOutOfBounds { index: 7, deck_size: 3 }));
    assert!(sink.shapes.is_empty());
}

#[test]
fn test_duplicate_range_renders_twice() {
    let deck = deck3();
    let mut sink = RecordingSink::default();
    let opts = OptionBag::new().with("range", vec![1i64, 1]);
    deck.rect(&mut sink, &opts).unwrap();

    let cards: Vec<_> = sink.shapes.iter().map(|(c, _, _, _)| *c).collect();
    assert_eq!(cards, vec![1, 1]);
}

#[test]
fn test_png_scale_keeps_aspect_ratio() {
    let deck = deck3();
    let mut sink = RecordingSink::default();
    let opts = OptionBag::new()
        .with("file", "art.png")
        .with("width", "scale")
        .with("height", 100i64);
    deck.png(&mut sink, &opts).unwrap();

    // Intrinsic 400x200, so width = 100 * 2.
    assert_eq!(sink.images[0].2, 200);
    assert_eq!(sink.images[0].3, 100);
}

#[test]
fn test_per_card_files_resolve_against_img_dir() {
    let deck = Deck::builder()
        .cards(2)
        .width(100i64)
        .height(100i64)
        .config(Configuration::default().with_img_dir("art"))
        .build()
        .unwrap();
    let mut sink = RecordingSink::default();
    let opts = OptionBag::new().with("file", vec!["a.png", "b.png"]);
    deck.png(&mut sink, &opts).unwrap();

    assert_eq!(sink.images[0].1, "art/a.png");
    assert_eq!(sink.images[1].1, "art/b.png");
}

#[test]
fn test_palette_colors_substitute_before_sink() {
    let deck = Deck::builder()
        .cards(1)
        .width(100i64)
        .height(100i64)
        .config(Configuration::default().with_color("brand", "#ff8800"))
        .build()
        .unwrap();
    let mut sink = RecordingSink::default();
    deck.rect(&mut sink, &OptionBag::new().with("fill", "brand"))
        .unwrap();
    assert_eq!(sink.shapes[0].3, "#ff8800");
}

#[test]
fn test_sink_failure_propagates_synchronously() {
    let deck = deck3();
    let mut sink = RecordingSink {
        fail_on_card: Some(1),
        ..RecordingSink::default()
    };
    let err = deck.rect(&mut sink, &OptionBag::new()).unwrap_err();

    assert!(matches!(err, Error::Render(_)));
    // Card 0 rendered before the failure; resolution itself was complete.
    assert_eq!(sink.shapes.len(), 1);
}
