use crate::app::binds::KeyBinds;
use crate::app::config::Config;
use crate::deck::{DeckController, SettlementReceiver};
use crate::fetch::HttpFetcher;

pub use constructor::AppConstructor;
pub use main_loop::AppMainLoop;

// Module declarations
pub mod binds;
pub mod cli;
pub mod config;
pub mod constructor;
pub mod event_handlers;
pub mod logging;
pub mod main_loop;
pub mod terminal;

/// Application state
pub struct App {
    /// Is the application running?
    pub running: bool,
    pub config: Config,
    pub key_binds: KeyBinds,
    pub controller: DeckController<HttpFetcher>,
    /// Prefetch results waiting to be applied by the main loop
    pub settlements: SettlementReceiver,
    /// Config and key binding problems shown in the footer
    pub config_warnings: Vec<String>,
}
