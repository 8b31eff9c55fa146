//! Page trait
//!
//! A page is one navigable screen of the game. Pages own their items and are
//! driven by the [`Controller`](crate::controller::Controller):
//!
//! - constructed when pushed (through its registry constructor)
//! - `update` / `draw` every frame while it is the top of the stack
//! - `on_exit` right before another page is pushed over it, or before it is
//!   popped
//! - `on_appearance` when it becomes the top again after a pop (never on
//!   first construction)
//!
//! # Example
//!
//! ```ignore
//! struct MenuPage {
//!     root: Item,
//! }
//!
//! impl Page for MenuPage {
//!     fn update(&mut self, ctx: &mut Context) {
//!         self.root.update(ctx);
//!     }
//!
//!     fn draw(&self, surface: &mut dyn Surface) -> Result<(), String> {
//!         self.root.draw(surface)
//!     }
//! }
//! ```

use crate::controller::Context;
use crate::render::Surface;

pub trait Page {
    /// Called once, right before the page stops being current
    fn on_exit(&mut self, _ctx: &mut Context) {}

    /// Called when the page becomes current again after a pop
    fn on_appearance(&mut self, _ctx: &mut Context) {}

    fn update(&mut self, ctx: &mut Context);

    fn draw(&self, surface: &mut dyn Surface) -> Result<(), String>;
}
