//! Immediate-mode drawing seam.
//!
//! Game code draws through the [`Canvas`] trait only. The browser build
//! implements it over `CanvasRenderingContext2d` (see `web.rs`); tests and
//! headless runs use [`RecordingCanvas`].

/// Images the game knows how to draw. The backend decides what to show when an
/// image has not finished loading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sprite {
    Player,
    Boss,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_css(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// Font size, alignment and color for one `fill_text` call.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub font_size: f64,
    pub align: TextAlign,
    pub color: &'static str,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self { font_size: 20.0, align: TextAlign::Center, color: "black" }
    }
}

impl TextStyle {
    pub fn sized(font_size: f64) -> Self {
        Self { font_size, ..Self::default() }
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn color(mut self, color: &'static str) -> Self {
        self.color = color;
        self
    }

    pub fn font(&self) -> String {
        format!("{}px sans-serif", self.font_size)
    }
}

pub trait Canvas {
    /// Drawable size in pixels (width, height).
    fn size(&self) -> (f64, f64);
    fn clear(&mut self);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str);
    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str);
    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle);
    fn draw_sprite(&mut self, sprite: Sprite, x: f64, y: f64, w: f64, h: f64);
}

/// Write `text` centered and black at the given font size.
pub fn write_text(canvas: &mut dyn Canvas, text: &str, font_size: f64, x: f64, y: f64) {
    canvas.fill_text(text, x, y, &TextStyle::sized(font_size));
}

/// Full-canvas colored overlay with a large centered caption.
pub fn overlay(canvas: &mut dyn Canvas, color: &str, caption: &str) {
    let (w, h) = canvas.size();
    canvas.fill_rect(0.0, 0.0, w, h, color);
    write_text(canvas, caption, 100.0, w / 2.0, h / 2.0);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Clear,
    FillRect { x: f64, y: f64, w: f64, h: f64, color: String },
    StrokeRect { x: f64, y: f64, w: f64, h: f64, color: String },
    Text { text: String, x: f64, y: f64, style: TextStyle },
    Sprite { sprite: Sprite, x: f64, y: f64, w: f64, h: f64 },
}

/// Canvas that records every call instead of rasterizing.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub width: f64,
    pub height: f64,
    pub calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, calls: Vec::new() }
    }

    /// Calls recorded since the last `clear`.
    pub fn frame(&self) -> &[DrawCall] {
        let start = self
            .calls
            .iter()
            .rposition(|c| matches!(c, DrawCall::Clear))
            .map(|i| i + 1)
            .unwrap_or(0);
        &self.calls[start..]
    }

    pub fn texts(&self) -> Vec<&str> {
        self.frame()
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| *t == needle)
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str) {
        self.calls.push(DrawCall::FillRect { x, y, w, h, color: color.to_string() });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str) {
        self.calls.push(DrawCall::StrokeRect { x, y, w, h, color: color.to_string() });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        self.calls.push(DrawCall::Text { text: text.to_string(), x, y, style: style.clone() });
    }

    fn draw_sprite(&mut self, sprite: Sprite, x: f64, y: f64, w: f64, h: f64) {
        self.calls.push(DrawCall::Sprite { sprite, x, y, w, h });
    }
}
