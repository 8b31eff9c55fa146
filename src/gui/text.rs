//! Text widget
//!
//! A line of text drawn with the built-in bitmap font. Its size always
//! follows its content, so it cannot be resized directly; change the value or
//! the scale instead.

use super::item::{Item, Widget};
use crate::error::ItemError;
use crate::font;
use crate::render::Surface;
use sdl2::pixels::Color;

pub struct Text {
    base: Item,
    value: String,
    color: Color,
    scale: u32,
}

impl Text {
    /// Creates text at (0, 0); position it with [`Widget::set_position`]
    pub fn new(value: impl Into<String>, scale: u32, color: Color) -> Self {
        let value = value.into();
        let scale = scale.max(1);
        Text {
            base: Item::new((0, 0), font::text_size(&value, scale)),
            value,
            color,
            scale,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the text, keeping the top-left corner in place
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.refresh_size();
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: u32) {
        self.scale = scale.max(1);
        self.refresh_size();
    }

    fn refresh_size(&mut self) {
        let (width, height) = font::text_size(&self.value, self.scale);
        self.base.resize(width, height);
    }
}

impl Widget for Text {
    fn item(&self) -> &Item {
        &self.base
    }

    fn item_mut(&mut self) -> &mut Item {
        &mut self.base
    }

    fn draw(&self, surface: &mut dyn Surface) -> Result<(), String> {
        if !self.base.visible {
            return Ok(());
        }
        let (x, y) = self.base.position();
        surface.draw_text(&self.value, x, y, self.color, self.scale)?;
        self.base.draw(surface)
    }

    fn resize(&mut self, _width: u32, _height: u32) -> Result<(), ItemError> {
        Err(ItemError::NotResizable("text"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::{DrawCall, RecordingSurface, TextRecordingSurface};

    #[test]
    fn test_size_follows_value() {
        let mut text = Text::new("HI", 2, Color::RGB(255, 255, 255));
        assert_eq!(text.size(), (22, 14));

        text.set_position(5, 5);
        text.set_value("HELLO");
        assert_eq!(text.size(), (58, 14));
        assert_eq!(text.position(), (5, 5));

        text.set_scale(1);
        assert_eq!(text.size(), (29, 7));
    }

    #[test]
    fn test_text_is_not_resizable() {
        let mut text = Text::new("HI", 1, Color::RGB(0, 0, 0));
        assert_eq!(text.resize(100, 100), Err(ItemError::NotResizable("text")));
        assert_eq!(text.size(), (11, 7));
    }

    #[test]
    fn test_draw() {
        let mut text = Text::new("OK", 3, Color::RGB(1, 2, 3));
        text.set_position(7, 9);

        let mut surface = TextRecordingSurface(RecordingSurface::new(100, 100));
        text.draw(&mut surface).unwrap();
        assert_eq!(
            surface.0.calls,
            vec![DrawCall::Text("OK".to_string(), 7, 9, Color::RGB(1, 2, 3))]
        );

        text.base.visible = false;
        let mut surface = TextRecordingSurface(RecordingSurface::new(100, 100));
        text.draw(&mut surface).unwrap();
        assert!(surface.0.calls.is_empty());
    }
}
