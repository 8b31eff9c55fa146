//! Game loop
//!
//! [`Game`] owns the configuration, the asset tree and the [`Controller`],
//! and drives them from an SDL2 window once per frame:
//!
//! 1. measure the delta time and reset per-frame input
//! 2. translate SDL events and feed them to the controller
//! 3. update the current page (and apply its navigation requests)
//! 4. clear, draw the current page, present (images are loaded once and
//!    cached for the whole run)
//! 5. sleep off the rest of the frame when a frame rate cap is set

use crate::assets::Assets;
use crate::config::GameConfig;
use crate::controller::{Controller, PageRegistry};
use crate::error::GameError;
use crate::input::InputEvent;
use crate::render::{CanvasSurface, TextureCache};
use sdl2::pixels::Color;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

pub struct Game {
    config: GameConfig,
    assets: Assets,
    controller: Controller,
}

impl Game {
    /// Scans the configured asset directory and activates the entry page
    pub fn new(config: GameConfig, pages: PageRegistry) -> Result<Self, GameError> {
        let assets = Assets::build(config.assets_directory.as_deref())?;
        let controller = Controller::new(pages, &config.entry_page, config.display_size);

        Ok(Game {
            config,
            assets,
            controller,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }

    /// Open the window and run until the window is closed
    pub fn run(&mut self) -> Result<(), GameError> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let _image_context = sdl2::image::init(sdl2::image::InitFlag::PNG)?;

        let (width, height) = self.config.display_size;
        let window_scale = calculate_window_scale(&video_subsystem, self.config.display_size);

        let window = video_subsystem
            .window(&self.config.title, width * window_scale, height * window_scale)
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;

        let mut canvas = window.into_canvas().build().map_err(|e| e.to_string())?;

        // Pages draw in display coordinates, SDL scales to the window
        canvas.set_logical_size(width, height).map_err(|e| e.to_string())?;

        let texture_creator = canvas.texture_creator();
        let mut textures = TextureCache::new(&texture_creator);
        let mut event_pump = sdl_context.event_pump()?;

        let frame_budget = match self.config.fps {
            0 => None,
            fps => Some(Duration::from_secs(1) / fps),
        };
        let (r, g, b) = self.config.background_color;
        let background = Color::RGB(r, g, b);

        info!(
            target: "game",
            title = self.config.title.as_str(),
            width,
            height,
            window_scale,
            fps = self.config.fps,
            "game_started"
        );

        let mut last_frame = Instant::now();
        loop {
            let frame_start = Instant::now();
            let dt = frame_start.duration_since(last_frame);
            last_frame = frame_start;

            // Input
            self.controller.begin_frame(dt.as_secs_f32() * 1000.0);
            for event in event_pump.poll_iter() {
                if let Some(event) = InputEvent::from_sdl(&event) {
                    self.controller.process_event(event);
                }
            }
            if self.controller.input().quit_requested() {
                break;
            }

            // Update
            self.controller.update();

            // Draw
            canvas.set_draw_color(background);
            canvas.clear();
            {
                let mut surface = CanvasSurface::new(&mut canvas, &mut textures);
                if let Err(err) = self.controller.draw(&mut surface) {
                    error!(target: "game", %err, "draw_failed");
                }
            }
            canvas.present();

            if let Some(budget) = frame_budget {
                let elapsed = frame_start.elapsed();
                if elapsed < budget {
                    thread::sleep(budget - elapsed);
                }
            }
        }

        info!(target: "game", "game_stopped");
        Ok(())
    }
}

/// Largest integer scale that fits the display size on the desktop
fn calculate_window_scale(video_subsystem: &sdl2::VideoSubsystem, display_size: (u32, u32)) -> u32 {
    let (width, height) = display_size;
    match video_subsystem.desktop_display_mode(0) {
        Ok(display_mode) => {
            // Leave 10% margin for taskbars/decorations
            let usable_w = (display_mode.w as f32 * 0.9) as u32;
            let usable_h = (display_mode.h as f32 * 0.9) as u32;

            let scale_w = usable_w / width.max(1);
            let scale_h = usable_h / height.max(1);
            scale_w.min(scale_h).clamp(1, 6)
        }
        Err(err) => {
            warn!(target: "game", %err, "desktop_display_mode_unavailable");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{Context, DEFAULT_PAGE};
    use crate::page::Page;
    use crate::render::Surface;
    use serde_json::Value;
    use std::fs;

    struct Menu;

    impl Page for Menu {
        fn update(&mut self, _ctx: &mut Context) {}

        fn draw(&self, _surface: &mut dyn Surface) -> Result<(), String> {
            Ok(())
        }
    }

    fn menu(_ctx: &mut Context, _args: &[Value]) -> Menu {
        Menu
    }

    #[test]
    fn test_new_uses_configured_entry_page() {
        let mut pages = PageRegistry::new();
        pages.register_page("menu", menu).unwrap();
        let config = GameConfig {
            entry_page: "menu".to_string(),
            ..Default::default()
        };

        let game = Game::new(config, pages).unwrap();
        assert_eq!(game.controller().current_page_name(), Some("menu"));
        assert_eq!(game.assets(), &Assets::NotDefined);
    }

    #[test]
    fn test_new_defaults_to_welcome() {
        let game = Game::new(GameConfig::default(), PageRegistry::new()).unwrap();
        assert_eq!(game.controller().current_page_name(), Some(DEFAULT_PAGE));
    }

    #[test]
    fn test_new_scans_assets() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("logo.png"), b"").unwrap();
        let config = GameConfig {
            assets_directory: Some(dir.path().to_path_buf()),
            ..Default::default()
        };

        let game = Game::new(config, PageRegistry::new()).unwrap();
        assert_eq!(
            game.assets().lookup(&["logo"]).unwrap(),
            dir.path().join("logo.png")
        );
    }

    #[test]
    fn test_missing_asset_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = GameConfig {
            assets_directory: Some(dir.path().join("missing")),
            ..Default::default()
        };

        assert!(matches!(
            Game::new(config, PageRegistry::new()),
            Err(GameError::Asset(_))
        ));
    }
}
