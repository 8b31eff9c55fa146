//! Error types shared across the crate
//!
//! Navigation and stack errors are reported by the controller and logged;
//! they never stop the frame loop. Asset errors propagate to the caller since
//! they point at missing content or configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Returned when popping or peeking an empty [`Stack`](crate::stack::Stack)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("stack is empty")]
pub struct EmptyStackError;

/// Errors raised by page navigation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    /// Redirect target is not a registered page
    #[error("redirection error to page {0}: page does not exist")]
    Redirection(String),

    /// `go_back` or `current_page` on an empty page stack
    #[error("redirection error: page stack is empty")]
    EmptyStack(#[from] EmptyStackError),
}

/// Errors raised while filling a [`PageRegistry`](crate::controller::PageRegistry)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("page '{0}' already registered")]
    Duplicate(String),
}

/// Errors raised by asset lookups
#[derive(Debug, Error)]
pub enum AssetError {
    /// Name is absent from the scanned directory
    #[error("the asset {0} does not exist in the defined assets directory")]
    DoesNotExist(PathBuf),

    /// No asset root was configured
    #[error("the assets directory was not defined, set `assets_directory` in the game config")]
    DirectoryNotDefined,

    /// Directory scan failed
    #[error("failed to scan assets directory {path}: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Errors raised by item geometry changes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    #[error("{0} cannot be resized")]
    NotResizable(&'static str),
}

/// Which grid axis a [`GridError`] refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Rows,
    Columns,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Rows => write!(f, "rows"),
            Axis::Columns => write!(f, "columns"),
        }
    }
}

/// Errors raised while building or filling a [`Grid`](crate::gui::Grid)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("grid needs at least one row and one column")]
    ZeroDimension,

    #[error("{axis}: expected {expected} sizes, got {found}")]
    SizeCount {
        axis: Axis,
        expected: usize,
        found: usize,
    },

    #[error("{axis}: absolute sizes sum to {found}px but the grid extent is {expected}px")]
    SizeSum { axis: Axis, expected: u32, found: u64 },

    #[error("{axis}: proportional sizes must be positive and finite")]
    InvalidProportion { axis: Axis },

    #[error("no cell at row {row}, column {column}")]
    OutOfBounds { row: usize, column: usize },
}

/// Errors raised while loading a [`GameConfig`](crate::config::GameConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised while starting or running a [`Game`](crate::game::Game)
#[derive(Debug, Error)]
pub enum GameError {
    /// SDL2 reports its failures as plain strings
    #[error("SDL error: {0}")]
    Sdl(String),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<String> for GameError {
    fn from(error: String) -> Self {
        GameError::Sdl(error)
    }
}
