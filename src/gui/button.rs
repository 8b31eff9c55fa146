//! Button Component
//!
//! A button comes in two variants, chosen once when it is built:
//!
//! - **Default**: solid fill, border and centred text. Fill and border colors
//!   swap while hovered.
//! - **Image**: built when a directory path is supplied. The directory holds
//!   the button images:
//!
//! ```text
//! button/
//!     normal.png        required
//!     on_hover.png      optional, or a directory of frames
//!     on_click/         optional, or a single file
//!         0.png
//!         1.png
//! ```
//!
//! Frame directories are played in file name order at `animation_speed`
//! frames per second.
//!
//! # Example
//!
//! ```ignore
//! let start = Button::new(ButtonOptions::new("START"), |ctx| {
//!     ctx.redirect_to_page("level", &[]);
//! })?;
//!
//! let fancy = Button::new(
//!     ButtonOptions::new("").with_directory("assets/buttons/start"),
//!     |ctx| ctx.redirect_to_page("level", &[]),
//! )?;
//! ```

use super::item::{Item, Widget};
use super::text::Text;
use crate::assets::Directory;
use crate::controller::Context;
use crate::error::{AssetError, ItemError};
use crate::render::Surface;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration for default button appearance
#[derive(Debug, Clone)]
pub struct ButtonStyle {
    /// Inside color
    pub fill_color: Color,

    /// Border color, also used for the text
    pub border_color: Color,

    /// Border thickness in pixels
    pub border_thickness: u32,

    /// Bitmap font scale of the label
    pub text_scale: u32,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        ButtonStyle {
            fill_color: Color::RGB(0, 0, 0),
            border_color: Color::RGB(255, 255, 255),
            border_thickness: 3,
            text_scale: 2,
        }
    }
}

/// Everything needed to build a [`Button`]
#[derive(Debug, Clone)]
pub struct ButtonOptions {
    pub position: (i32, i32),
    /// Defaults to 100x40 for default buttons, 150x60 for image buttons
    pub size: Option<(u32, u32)>,
    pub text: String,
    pub style: ButtonStyle,
    pub movable: bool,
    /// Image directory; selects the image variant when set
    pub directory: Option<PathBuf>,
    /// Frames per second for frame directories
    pub animation_speed: f32,
}

impl ButtonOptions {
    pub fn new(text: impl Into<String>) -> Self {
        ButtonOptions {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.position = (x, y);
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = Some((width, height));
        self
    }

    pub fn with_style(mut self, style: ButtonStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    /// Frames per second for frame directories
    pub fn with_animation_speed(mut self, frames_per_second: f32) -> Self {
        self.animation_speed = frames_per_second;
        self
    }

    pub fn movable(mut self) -> Self {
        self.movable = true;
        self
    }
}

impl Default for ButtonOptions {
    fn default() -> Self {
        ButtonOptions {
            position: (0, 0),
            size: None,
            text: "Button".to_string(),
            style: ButtonStyle::default(),
            movable: false,
            directory: None,
            animation_speed: 1.0,
        }
    }
}

/// Visual state of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Normal,
    Hovered,
    /// Hovered with the button held; only image buttons show it
    Pressed,
}

/// Solid button with centred text
pub struct DefaultButton {
    base: Item,
    text: Text,
    style: ButtonStyle,
    state: ButtonState,
}

impl DefaultButton {
    pub fn new<F>(options: ButtonOptions, on_click: F) -> Self
    where
        F: FnMut(&mut Context) + 'static,
    {
        let base = Item::new(options.position, options.size.unwrap_or((100, 40)))
            .with_on_click(on_click)
            .with_movable(options.movable);
        let text = Text::new(options.text, options.style.text_scale, options.style.border_color);

        let mut button = DefaultButton {
            base,
            text,
            style: options.style,
            state: ButtonState::Normal,
        };
        button.center_text();
        button
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    pub fn text(&self) -> &Text {
        &self.text
    }

    /// Change the label; it is re-centred immediately
    pub fn set_text(&mut self, value: impl Into<String>) {
        self.text.set_value(value);
        self.center_text();
    }

    /// (fill, border) for the current state
    pub fn colors(&self) -> (Color, Color) {
        match self.state {
            ButtonState::Normal => (self.style.fill_color, self.style.border_color),
            ButtonState::Hovered | ButtonState::Pressed => {
                (self.style.border_color, self.style.fill_color)
            }
        }
    }

    fn center_text(&mut self) {
        let (x, y) = self.base.position();
        let (width, height) = self.base.size();
        let (text_width, text_height) = self.text.size();
        self.text.set_position(
            x + (width as i32 - text_width as i32) / 2,
            y + (height as i32 - text_height as i32) / 2,
        );
    }
}

impl Widget for DefaultButton {
    fn item(&self) -> &Item {
        &self.base
    }

    fn item_mut(&mut self) -> &mut Item {
        &mut self.base
    }

    fn update(&mut self, ctx: &mut Context) {
        self.base.update(ctx);
        if !self.base.visible {
            return;
        }

        self.state = if self.base.hovered() {
            ButtonState::Hovered
        } else {
            ButtonState::Normal
        };
        let (_, border) = self.colors();
        self.text.set_color(border);
        self.center_text();
    }

    fn draw(&self, surface: &mut dyn Surface) -> Result<(), String> {
        if !self.base.visible {
            return Ok(());
        }
        let (fill, border) = self.colors();
        let rect = self.base.rect();

        surface.fill_rect(rect, fill)?;
        for inset in 0..self.style.border_thickness {
            let inset_i = inset as i32;
            let width = rect.width().saturating_sub(2 * inset);
            let height = rect.height().saturating_sub(2 * inset);
            if width == 0 || height == 0 {
                break;
            }
            surface.draw_rect(
                Rect::new(rect.x() + inset_i, rect.y() + inset_i, width, height),
                border,
            )?;
        }

        self.text.draw(surface)?;
        self.base.draw(surface)
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.base.translate(dx, dy);
        self.center_text();
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), ItemError> {
        self.base.resize(width, height);
        self.center_text();
        Ok(())
    }
}

/// Button drawn from an image directory
pub struct ImageButton {
    base: Item,
    directory: Directory,
    normal: PathBuf,
    hover_frames: Vec<PathBuf>,
    click_frames: Vec<PathBuf>,
    animation_speed: f32,
    frame: usize,
    frame_time: f32,
    state: ButtonState,
}

impl ImageButton {
    /// Scans `options.directory`; fails when it is missing, unset or has no
    /// `normal` image
    pub fn new<F>(options: ButtonOptions, on_click: F) -> Result<Self, AssetError>
    where
        F: FnMut(&mut Context) + 'static,
    {
        let root = options.directory.ok_or(AssetError::DirectoryNotDefined)?;
        let directory = Directory::scan(&root)?;
        let normal = directory.lookup(&["normal"])?.to_path_buf();
        let hover_frames = frames(&directory, "on_hover");
        let click_frames = frames(&directory, "on_click");

        debug!(
            target: "gui",
            directory = %root.display(),
            hover_frames = hover_frames.len(),
            click_frames = click_frames.len(),
            "image_button_loaded"
        );

        let base = Item::new(options.position, options.size.unwrap_or((150, 60)))
            .with_on_click(on_click)
            .with_movable(options.movable);

        Ok(ImageButton {
            base,
            directory,
            normal,
            hover_frames,
            click_frames,
            animation_speed: options.animation_speed,
            frame: 0,
            frame_time: 0.0,
            state: ButtonState::Normal,
        })
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    fn frames_for_state(&self) -> &[PathBuf] {
        match self.state {
            ButtonState::Pressed if !self.click_frames.is_empty() => self.click_frames.as_slice(),
            ButtonState::Pressed | ButtonState::Hovered => self.hover_frames.as_slice(),
            ButtonState::Normal => &[],
        }
    }

    /// Image shown for the current state and animation frame
    pub fn current_image(&self) -> &Path {
        let frames = self.frames_for_state();
        if frames.is_empty() {
            return &self.normal;
        }
        &frames[self.frame % frames.len()]
    }

    fn advance_animation(&mut self, dt_s: f32) {
        let frame_count = self.frames_for_state().len();
        if frame_count < 2 || !self.animation_speed.is_finite() || self.animation_speed <= 0.0 {
            return;
        }
        let period = 1.0 / self.animation_speed;
        self.frame_time += dt_s;
        // Float to int casts saturate
        let steps = (self.frame_time / period) as usize;
        if steps > 0 {
            self.frame = (self.frame + steps % frame_count) % frame_count;
            self.frame_time %= period;
        }
    }
}

/// Frames for `name`: every file of a directory, or a single file
fn frames(directory: &Directory, name: &str) -> Vec<PathBuf> {
    if let Ok(frames) = directory.directory(&[name]) {
        return frames.files().into_iter().map(Path::to_path_buf).collect();
    }
    directory
        .file(name)
        .map(|file| vec![file.path.clone()])
        .unwrap_or_default()
}

impl Widget for ImageButton {
    fn item(&self) -> &Item {
        &self.base
    }

    fn item_mut(&mut self) -> &mut Item {
        &mut self.base
    }

    fn update(&mut self, ctx: &mut Context) {
        self.base.update(ctx);
        if !self.base.visible {
            return;
        }

        let state = match (self.base.hovered(), ctx.input().pointer_down()) {
            (true, true) => ButtonState::Pressed,
            (true, false) => ButtonState::Hovered,
            (false, _) => ButtonState::Normal,
        };
        if state != self.state {
            self.state = state;
            self.frame = 0;
            self.frame_time = 0.0;
        } else {
            self.advance_animation(ctx.dt_s());
        }
    }

    fn draw(&self, surface: &mut dyn Surface) -> Result<(), String> {
        if !self.base.visible {
            return Ok(());
        }
        surface.draw_image(self.current_image(), self.base.rect())?;
        self.base.draw(surface)
    }

    fn resize(&mut self, _width: u32, _height: u32) -> Result<(), ItemError> {
        Err(ItemError::NotResizable("image button"))
    }
}

/// Button variant, fixed at construction
pub enum ButtonVariant {
    Default(DefaultButton),
    Image(ImageButton),
}

pub struct Button {
    variant: ButtonVariant,
}

impl Button {
    /// Builds an image button when `options.directory` is set, a default
    /// button otherwise
    pub fn new<F>(options: ButtonOptions, on_click: F) -> Result<Self, AssetError>
    where
        F: FnMut(&mut Context) + 'static,
    {
        let variant = if options.directory.is_some() {
            ButtonVariant::Image(ImageButton::new(options, on_click)?)
        } else {
            ButtonVariant::Default(DefaultButton::new(options, on_click))
        };
        Ok(Button { variant })
    }

    pub fn variant(&self) -> &ButtonVariant {
        &self.variant
    }

    pub fn is_image(&self) -> bool {
        matches!(self.variant, ButtonVariant::Image(_))
    }

    pub fn state(&self) -> ButtonState {
        match &self.variant {
            ButtonVariant::Default(button) => button.state(),
            ButtonVariant::Image(button) => button.state(),
        }
    }

    fn widget(&self) -> &dyn Widget {
        match &self.variant {
            ButtonVariant::Default(button) => button,
            ButtonVariant::Image(button) => button,
        }
    }

    fn widget_mut(&mut self) -> &mut dyn Widget {
        match &mut self.variant {
            ButtonVariant::Default(button) => button,
            ButtonVariant::Image(button) => button,
        }
    }
}

impl From<DefaultButton> for Button {
    fn from(button: DefaultButton) -> Self {
        Button {
            variant: ButtonVariant::Default(button),
        }
    }
}

impl From<ImageButton> for Button {
    fn from(button: ImageButton) -> Self {
        Button {
            variant: ButtonVariant::Image(button),
        }
    }
}

impl Widget for Button {
    fn item(&self) -> &Item {
        self.widget().item()
    }

    fn item_mut(&mut self) -> &mut Item {
        self.widget_mut().item_mut()
    }

    fn update(&mut self, ctx: &mut Context) {
        self.widget_mut().update(ctx);
    }

    fn draw(&self, surface: &mut dyn Surface) -> Result<(), String> {
        self.widget().draw(surface)
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.widget_mut().translate(dx, dy);
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), ItemError> {
        self.widget_mut().resize(width, height)
    }
}
