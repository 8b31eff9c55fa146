//! framekit
//!
//! A small scaffolding layer for SDL2 games: a page navigation controller
//! with a page stack, a widget hierarchy (items, text, buttons, grids) and an
//! asset directory tree.
//!
//! ```ignore
//! use framekit::{Game, GameConfig, PageRegistry};
//!
//! let mut pages = PageRegistry::new();
//! pages.register_page("menu", MenuPage::new)?;
//!
//! let config = GameConfig {
//!     entry_page: "menu".to_string(),
//!     ..Default::default()
//! };
//! Game::new(config, pages)?.run()?;
//! ```

pub mod assets;
pub mod config;
pub mod controller;
pub mod error;
pub mod font;
pub mod game;
pub mod gui;
pub mod input;
pub mod logging;
pub mod page;
pub mod pages;
pub mod render;
pub mod stack;

pub use assets::{Assets, Directory};
pub use config::GameConfig;
pub use controller::{Context, Controller, PageRegistry, DEFAULT_PAGE};
pub use error::{
    AssetError, ConfigError, ControllerError, EmptyStackError, GameError, GridError, ItemError,
    RegistryError,
};
pub use game::Game;
pub use page::Page;
pub use render::Surface;
pub use stack::Stack;
