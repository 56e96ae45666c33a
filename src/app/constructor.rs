use tokio::sync::mpsc;

use super::App;
use crate::app::binds::KeyBinds;
use crate::app::config::Config;
use crate::deck::{DeckController, DeckGenerator, DeckSettings};
use crate::fetch::HttpFetcher;

/// Trait for App construction
pub trait AppConstructor {
    fn new(config: Config, config_warnings: Vec<String>) -> color_eyre::Result<Self>
    where
        Self: Sized;
}

impl AppConstructor for App {
    /// Construct a new instance of [`App`]. No deck is installed until the main loop starts.
    fn new(config: Config, mut config_warnings: Vec<String>) -> color_eyre::Result<Self> {
        let (key_binds, bind_warnings) = KeyBinds::from_config(&config.binds);
        for warning in &bind_warnings {
            log::warn!("{}", warning);
        }
        config_warnings.extend(bind_warnings);

        let fetcher = HttpFetcher::new(&config.network)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to build HTTP client: {}", e))?;

        let (settle_tx, settlements) = mpsc::unbounded_channel();
        let controller = DeckController::new(
            DeckSettings::from_config(&config.deck),
            DeckGenerator::from_config(&config.deck),
            fetcher,
            settle_tx,
        );

        Ok(Self {
            running: false,
            config,
            key_binds,
            controller,
            settlements,
            config_warnings,
        })
    }
}
