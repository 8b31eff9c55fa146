use framekit::{Game, GameConfig, GameError, PageRegistry, logging};
use std::path::PathBuf;
use tracing::error;

/// Runs the built-in welcome page
///
/// Usage: `framekit [config.json]`. Without an argument the config is read
/// from the platform config directory, or defaults are used.
fn main() -> Result<(), GameError> {
    logging::init();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = GameConfig::load_or_default(config_path.as_deref()).inspect_err(|err| {
        error!(target: "game", %err, "config_load_failed");
    })?;

    let mut game = Game::new(config, PageRegistry::new())?;
    game.run()
}
