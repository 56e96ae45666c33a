use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DeckConfig {
    /// Number of cards per deck
    #[serde(default = "DeckConfig::default_size")]
    pub size: usize,
    /// Settled images needed before browsing starts
    #[serde(default = "DeckConfig::default_early_threshold")]
    pub early_threshold: usize,
    /// Delay between a swipe and its commit, in milliseconds
    #[serde(default = "DeckConfig::default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    #[serde(default = "DeckConfig::default_image_width")]
    pub image_width: u32,
    #[serde(default = "DeckConfig::default_image_height")]
    pub image_height: u32,
    /// Image URL template; `{seed}`, `{width}` and `{height}` are substituted per card
    #[serde(default = "DeckConfig::default_source")]
    pub source: String,
}

impl DeckConfig {
    fn default_size() -> usize {
        12
    }

    fn default_early_threshold() -> usize {
        3
    }

    fn default_settle_delay_ms() -> u64 {
        250
    }

    fn default_image_width() -> u32 {
        600
    }

    fn default_image_height() -> u32 {
        800
    }

    fn default_source() -> String {
        "https://picsum.photos/seed/{seed}/{width}/{height}".to_string()
    }
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            size: Self::default_size(),
            early_threshold: Self::default_early_threshold(),
            settle_delay_ms: Self::default_settle_delay_ms(),
            image_width: Self::default_image_width(),
            image_height: Self::default_image_height(),
            source: Self::default_source(),
        }
    }
}
