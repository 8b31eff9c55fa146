//! Built-in pages

pub mod welcome;

pub use welcome::WelcomePage;
