pub mod binds;
pub mod deck;
pub mod format;
pub mod logging;
pub mod network;

pub use binds::BindsConfig;
pub use deck::DeckConfig;
pub use format::Config;
pub use logging::LoggingConfig;
pub use network::NetworkConfig;
