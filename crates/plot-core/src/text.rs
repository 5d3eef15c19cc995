// File: crates/plot-core/src/text.rs
// Summary: Font resolution with per-render caching, text measurement, and Unicode-safe text drawing.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use skia_safe as skia;

use crate::error::{PlotError, Result};

/// Resolves `(font path, size)` to drawable fonts. `None` selects the default typeface.
pub struct FontBook {
    mgr: skia::FontMgr,
    cache: HashMap<(Option<PathBuf>, u32), skia::Font>,
}

impl Default for FontBook {
    fn default() -> Self {
        Self::new()
    }
}

impl FontBook {
    pub fn new() -> Self {
        Self { mgr: skia::FontMgr::new(), cache: HashMap::new() }
    }

    pub fn font(&mut self, path: Option<&Path>, size: f32) -> Result<skia::Font> {
        let key = (path.map(Path::to_path_buf), size.to_bits());
        if let Some(font) = self.cache.get(&key) {
            return Ok(font.clone());
        }
        let typeface = match path {
            Some(p) => {
                let bytes = std::fs::read(p)
                    .map_err(|source| PlotError::FontLoad { path: p.to_path_buf(), source })?;
                let tf = self
                    .mgr
                    .new_from_data(skia::Data::new_copy(&bytes), None::<u32>)
                    .ok_or_else(|| PlotError::FontDecode { path: p.to_path_buf() })?;
                Some(tf)
            }
            None => self.mgr.legacy_make_typeface(None::<&str>, skia::FontStyle::default()),
        };
        let font = match typeface {
            Some(tf) => skia::Font::from_typeface(tf, size),
            None => {
                let mut f = skia::Font::default();
                f.set_size(size);
                f
            }
        };
        self.cache.insert(key, font.clone());
        Ok(font)
    }
}

/// Where the `y` of a text origin sits relative to the glyphs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    /// `y` is the top of the font's ascender.
    Ascender,
    /// `y` is the top of the inked glyph bounds, independent of font metrics.
    InkTop,
}

/// Advance width of `text`.
pub fn text_width(font: &skia::Font, text: &str) -> f32 {
    font.measure_str(text, None).0
}

/// Width and height of the inked bounds of `text`.
pub fn ink_size(font: &skia::Font, text: &str) -> (f32, f32) {
    let (_, bounds) = font.measure_str(text, None);
    (bounds.width(), bounds.height())
}

/// Baseline for a text whose anchor point is at `y`.
pub fn baseline(font: &skia::Font, text: &str, y: f32, anchor: TextAnchor) -> f32 {
    match anchor {
        TextAnchor::Ascender => y - font.metrics().1.ascent,
        TextAnchor::InkTop => y - font.measure_str(text, None).1.top,
    }
}

/// The font cannot encode a character of the text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Unencodable {
    pub ch: char,
}

/// Anything text can be drawn onto.
pub trait GlyphSink {
    /// Draw `text` with `font`'s own glyphs, failing if any character has none.
    fn draw_glyphs(
        &self,
        text: &str,
        origin: (f32, f32),
        font: &skia::Font,
        color: skia::Color,
    ) -> std::result::Result<(), Unencodable>;

    /// Draw the UTF-8 byte encoding of a text, letting the backend substitute glyphs.
    fn draw_utf8(&self, bytes: &[u8], origin: (f32, f32), font: &skia::Font, color: skia::Color);
}

/// Draw `text` with its baseline at `origin`, retrying through the UTF-8 path when the
/// font rejects a character. Every text draw in the crate goes through here.
pub fn draw_text<S: GlyphSink + ?Sized>(
    sink: &S,
    text: &str,
    origin: (f32, f32),
    font: &skia::Font,
    color: skia::Color,
) {
    if text.is_empty() {
        return;
    }
    if let Err(Unencodable { ch }) = sink.draw_glyphs(text, origin, font, color) {
        tracing::debug!(%ch, text, "font cannot encode text; retrying as UTF-8");
        sink.draw_utf8(text.as_bytes(), origin, font, color);
    }
}

fn text_paint(color: skia::Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_color(color);
    paint.set_anti_alias(true);
    paint
}

impl GlyphSink for skia::Canvas {
    fn draw_glyphs(
        &self,
        text: &str,
        origin: (f32, f32),
        font: &skia::Font,
        color: skia::Color,
    ) -> std::result::Result<(), Unencodable> {
        let glyphs = font.str_to_glyphs_vec(text);
        if let Some((ch, _)) = text.chars().zip(glyphs.iter()).find(|(c, g)| **g == 0 && !c.is_control()) {
            return Err(Unencodable { ch });
        }
        self.draw_str(text, origin, font, &text_paint(color));
        Ok(())
    }

    fn draw_utf8(&self, bytes: &[u8], origin: (f32, f32), font: &skia::Font, color: skia::Color) {
        let text = String::from_utf8_lossy(bytes);
        let missing = text.chars().zip(font.str_to_glyphs_vec(&*text)).find(|(_, g)| *g == 0);
        let fallback = missing.and_then(|(ch, _)| {
            skia::FontMgr::new().match_family_style_character("", skia::FontStyle::default(), &[], ch as i32)
        });
        let font = match fallback {
            Some(tf) => skia::Font::from_typeface(tf, font.size()),
            None => font.clone(),
        };
        self.draw_str(&*text, origin, &font, &text_paint(color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Accepts ASCII only on the glyph path; records what was drawn and how.
    #[derive(Default)]
    struct AsciiOnly {
        glyphs: RefCell<Vec<String>>,
        utf8: RefCell<Vec<Vec<u8>>>,
    }

    impl GlyphSink for AsciiOnly {
        fn draw_glyphs(
            &self,
            text: &str,
            _origin: (f32, f32),
            _font: &skia::Font,
            _color: skia::Color,
        ) -> std::result::Result<(), Unencodable> {
            if let Some(ch) = text.chars().find(|c| !c.is_ascii()) {
                return Err(Unencodable { ch });
            }
            self.glyphs.borrow_mut().push(text.to_string());
            Ok(())
        }

        fn draw_utf8(&self, bytes: &[u8], _origin: (f32, f32), _font: &skia::Font, _color: skia::Color) {
            self.utf8.borrow_mut().push(bytes.to_vec());
        }
    }

    #[test]
    fn ascii_draws_directly() {
        let sink = AsciiOnly::default();
        draw_text(&sink, "Temp", (0.0, 0.0), &skia::Font::default(), skia::Color::BLACK);
        assert_eq!(*sink.glyphs.borrow(), vec!["Temp".to_string()]);
        assert!(sink.utf8.borrow().is_empty());
    }

    #[test]
    fn rejected_text_is_retried_as_utf8() {
        let sink = AsciiOnly::default();
        draw_text(&sink, "°C", (0.0, 0.0), &skia::Font::default(), skia::Color::BLACK);
        assert!(sink.glyphs.borrow().is_empty());
        assert_eq!(*sink.utf8.borrow(), vec!["°C".as_bytes().to_vec()]);
    }

    #[test]
    fn empty_text_draws_nothing() {
        let sink = AsciiOnly::default();
        draw_text(&sink, "", (0.0, 0.0), &skia::Font::default(), skia::Color::BLACK);
        assert!(sink.glyphs.borrow().is_empty() && sink.utf8.borrow().is_empty());
    }

    #[test]
    fn missing_font_file_is_an_error() {
        let mut book = FontBook::new();
        let err = book.font(Some(Path::new("/nonexistent/font.ttf")), 10.0).unwrap_err();
        assert!(matches!(err, PlotError::FontLoad { .. }));
    }

    #[test]
    fn default_font_is_cached_by_size() {
        let mut book = FontBook::new();
        let a = book.font(None, 12.0).unwrap();
        let b = book.font(None, 12.0).unwrap();
        assert_eq!(a.size(), b.size());
        assert_eq!(book.cache.len(), 1);
        book.font(None, 14.0).unwrap();
        assert_eq!(book.cache.len(), 2);
    }
}
