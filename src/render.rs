/// Drawing surface abstraction
///
/// Widgets and pages never talk to SDL2 directly. They draw through the
/// [`Surface`] trait, which the SDL2 window canvas implements. This keeps the
/// widget tree testable with a recording surface and lets a host plug in a
/// different backend.
///
/// # Architecture
///
/// - `Surface` trait: the primitive operations a widget may use
/// - `CanvasSurface`: the SDL2 backend, drawing to the window canvas and
///   loading each image once through a `TextureCache`
/// - `draw_text` has a default implementation using the bitmap font in
///   [`crate::font`], so backends only provide rectangles and images
///
/// # Usage Example
///
/// ```ignore
/// surface.fill_rect(Rect::new(10, 10, 100, 40), Color::RGB(0, 0, 0))?;
/// surface.draw_text("START", 20, 20, Color::RGB(255, 255, 255), 2)?;
/// ```
use crate::font;
use sdl2::image::LoadTexture;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Drawing capability handed to pages and widgets during the draw phase.
///
/// All operations return SDL2-style `Result<(), String>` errors.
pub trait Surface {
    /// Logical size of the drawable area in pixels.
    fn size(&self) -> (u32, u32);

    /// Fill a rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), String>;

    /// Draw a one pixel rectangle outline.
    fn draw_rect(&mut self, rect: Rect, color: Color) -> Result<(), String>;

    /// Blit the image at `path`, stretched into `rect`.
    fn draw_image(&mut self, path: &Path, rect: Rect) -> Result<(), String>;

    /// Draw text with the built-in bitmap font, top-left at (`x`, `y`).
    fn draw_text(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        color: Color,
        scale: u32,
    ) -> Result<(), String> {
        font::draw_text(self, text, x, y, color, scale)
    }
}

/// Textures loaded from disk, each path loaded once
///
/// Lives as long as the texture creator of the window canvas. Failed loads
/// are not remembered and are retried on the next draw.
pub struct TextureCache<'a> {
    creator: &'a TextureCreator<WindowContext>,
    textures: HashMap<PathBuf, Texture<'a>>,
}

impl<'a> TextureCache<'a> {
    pub fn new(creator: &'a TextureCreator<WindowContext>) -> Self {
        TextureCache {
            creator,
            textures: HashMap::new(),
        }
    }

    /// Texture for `path`, loading it on first use
    pub fn get(&mut self, path: &Path) -> Result<&Texture<'a>, String> {
        let creator = self.creator;
        load_once(&mut self.textures, path, |path| {
            creator
                .load_texture(path)
                .map_err(|e| format!("Failed to load {}: {}", path.display(), e))
        })
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

fn load_once<'m, V, E>(
    cache: &'m mut HashMap<PathBuf, V>,
    path: &Path,
    load: impl FnOnce(&Path) -> Result<V, E>,
) -> Result<&'m V, E> {
    match cache.entry(path.to_path_buf()) {
        Entry::Occupied(entry) => Ok(entry.into_mut()),
        Entry::Vacant(entry) => {
            let value = load(path)?;
            debug!(target: "render", path = %path.display(), "texture_loaded");
            Ok(entry.insert(value))
        }
    }
}

/// SDL2 backend: the window canvas plus its texture cache
pub struct CanvasSurface<'s, 'a> {
    canvas: &'s mut Canvas<Window>,
    textures: &'s mut TextureCache<'a>,
}

impl<'s, 'a> CanvasSurface<'s, 'a> {
    pub fn new(canvas: &'s mut Canvas<Window>, textures: &'s mut TextureCache<'a>) -> Self {
        CanvasSurface { canvas, textures }
    }
}

impl Surface for CanvasSurface<'_, '_> {
    fn size(&self) -> (u32, u32) {
        // Logical size is (0, 0) unless the host set one
        match self.canvas.logical_size() {
            (0, 0) => self.canvas.output_size().unwrap_or((0, 0)),
            size => size,
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), String> {
        self.canvas.set_draw_color(color);
        self.canvas.fill_rect(rect)
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) -> Result<(), String> {
        self.canvas.set_draw_color(color);
        self.canvas.draw_rect(rect)
    }

    fn draw_image(&mut self, path: &Path, rect: Rect) -> Result<(), String> {
        let texture = self.textures.get(path)?;
        self.canvas.copy(texture, None, rect)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording surface used by widget and page tests

    use super::*;
    use std::path::PathBuf;

    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawCall {
        Fill(Rect, Color),
        Outline(Rect, Color),
        Image(PathBuf, Rect),
        Text(String, i32, i32, Color),
    }

    pub struct RecordingSurface {
        pub width: u32,
        pub height: u32,
        pub calls: Vec<DrawCall>,
    }

    impl RecordingSurface {
        pub fn new(width: u32, height: u32) -> Self {
            RecordingSurface {
                width,
                height,
                calls: Vec::new(),
            }
        }

        /// Text draw calls only, in order
        pub fn texts(&self) -> Vec<String> {
            self.calls
                .iter()
                .filter_map(|call| match call {
                    DrawCall::Text(value, ..) => Some(value.clone()),
                    _ => None,
                })
                .collect()
        }
    }

    impl Surface for RecordingSurface {
        fn size(&self) -> (u32, u32) {
            (self.width, self.height)
        }

        fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), String> {
            self.calls.push(DrawCall::Fill(rect, color));
            Ok(())
        }

        fn draw_rect(&mut self, rect: Rect, color: Color) -> Result<(), String> {
            self.calls.push(DrawCall::Outline(rect, color));
            Ok(())
        }

        fn draw_image(&mut self, path: &Path, rect: Rect) -> Result<(), String> {
            self.calls.push(DrawCall::Image(path.to_path_buf(), rect));
            Ok(())
        }
    }

    /// Records text as a single call instead of glyph pixels
    pub struct TextRecordingSurface(pub RecordingSurface);

    impl Surface for TextRecordingSurface {
        fn size(&self) -> (u32, u32) {
            self.0.size()
        }

        fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), String> {
            self.0.fill_rect(rect, color)
        }

        fn draw_rect(&mut self, rect: Rect, color: Color) -> Result<(), String> {
            self.0.draw_rect(rect, color)
        }

        fn draw_image(&mut self, path: &Path, rect: Rect) -> Result<(), String> {
            self.0.draw_image(path, rect)
        }

        fn draw_text(
            &mut self,
            text: &str,
            x: i32,
            y: i32,
            color: Color,
            _scale: u32,
        ) -> Result<(), String> {
            self.0.calls.push(DrawCall::Text(text.to_string(), x, y, color));
            Ok(())
        }
    }
}
