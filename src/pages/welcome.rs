//! Welcome page
//!
//! Shown when a game has no pages of its own, or when its configured entry
//! page is `"welcome"` or unknown. It is also a small working demo of a
//! grid layout with a clickable button.

use crate::controller::Context;
use crate::error::GridError;
use crate::gui::{Button, ButtonOptions, DefaultButton, Grid, Sizes, Text, Widget};
use crate::page::Page;
use crate::render::Surface;
use sdl2::pixels::Color;
use serde_json::Value;
use tracing::error;

const TITLE: &str = "FRAMEKIT";
const HINT: &str = "REGISTER A PAGE TO GET STARTED";
const WHITE: Color = Color::RGB(255, 255, 255);

pub struct WelcomePage {
    layout: Option<Grid>,
    status: Text,
}

impl WelcomePage {
    pub fn new(ctx: &mut Context, _args: &[Value]) -> Self {
        let layout = match build_layout(ctx.display_size()) {
            Ok(grid) => Some(grid),
            Err(err) => {
                error!(target: "controller", %err, "welcome_layout_failed");
                None
            }
        };

        let mut status = Text::new("PAUSED", 2, WHITE);
        status.set_position(10, 10);
        status.item_mut().set_visible(ctx.paused());

        WelcomePage { layout, status }
    }

    pub fn layout(&self) -> Option<&Grid> {
        self.layout.as_ref()
    }
}

/// Title, hint and pause button stacked in a 2:1:1 grid
fn build_layout(display_size: (u32, u32)) -> Result<Grid, GridError> {
    let mut grid = Grid::with_sizes(
        (0, 0),
        display_size,
        3,
        1,
        Some(Sizes::Proportional(vec![2.0, 1.0, 1.0])),
        None,
    )?;

    grid.add_item(Text::new(TITLE, 6, WHITE), 0, 0, Some("centre bottom"), None)?;
    grid.add_item(Text::new(HINT, 2, WHITE), 1, 0, None, None)?;

    let pause = DefaultButton::new(ButtonOptions::new("PAUSE"), |ctx: &mut Context| {
        ctx.pause_game();
    });
    grid.add_item(Button::from(pause), 2, 0, Some("centre top"), None)?;

    Ok(grid)
}

impl Page for WelcomePage {
    fn update(&mut self, ctx: &mut Context) {
        if let Some(layout) = self.layout.as_mut() {
            layout.update(ctx);
        }
        self.status.item_mut().set_visible(ctx.paused());
    }

    fn draw(&self, surface: &mut dyn Surface) -> Result<(), String> {
        if let Some(layout) = &self.layout {
            layout.draw(surface)?;
        }
        self.status.draw(surface)
    }
}
