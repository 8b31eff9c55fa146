//! Widget hierarchy
//!
//! Every widget embeds an [`Item`] and implements [`Widget`]:
//!
//! - [`Text`] - bitmap-font label sized to its content
//! - [`Button`] - default (fill + border + text) or image button
//! - [`Grid`] - fixed rows/columns of [`Cell`]s with alignment and padding
//!
//! Widgets use screen coordinates and are updated and drawn by the page that
//! owns them.
//!
//! # Example Usage
//!
//! ```ignore
//! use framekit::gui::{Button, ButtonOptions, Grid, Text};
//!
//! let mut grid = Grid::new((0, 0), (640, 360), 2, 1)?;
//! grid.add_item(Text::new("MENU", 4, Color::RGB(255, 255, 255)), 0, 0, None, None)?;
//! grid.add_item(
//!     Button::new(ButtonOptions::new("PLAY"), |ctx| ctx.redirect_to_page("level", &[]))?,
//!     1,
//!     0,
//!     Some("top"),
//!     Some("top 10"),
//! )?;
//! ```

pub mod button;
pub mod grid;
pub mod item;
pub mod text;

pub use button::{Button, ButtonOptions, ButtonState, ButtonStyle, ButtonVariant, DefaultButton, ImageButton};
pub use grid::{Alignment, Cell, Grid, Row, Side, Sizes};
pub use item::{ClickHandler, Item, Widget};
pub use text::Text;
