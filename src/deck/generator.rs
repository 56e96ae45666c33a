//! Deck generation.
//!
//! Every deck gets a fresh random identifier so that card ids never repeat within a
//! process and card URLs point at new images after each reset.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};

use super::card::{Card, Deck};
use crate::app::config::DeckConfig;

/// Placeholder replaced with the card id when building a URL
const SEED_PLACEHOLDER: &str = "{seed}";

/// Distinguishes fallback identifiers drawn within the same clock tick
static FALLBACK_COUNTER: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone)]
pub struct DeckGenerator {
    size: usize,
    source: String,
    width: u32,
    height: u32,
}

impl DeckGenerator {
    pub fn new(size: usize, source: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            size,
            source: source.into(),
            width,
            height,
        }
    }

    pub fn from_config(config: &DeckConfig) -> Self {
        Self::new(
            config.size,
            config.source.clone(),
            config.image_width,
            config.image_height,
        )
    }

    /// Number of cards `generate` produces
    pub fn size(&self) -> usize {
        self.size
    }

    /// Generate a deck of the configured size
    pub fn generate(&self) -> Deck {
        self.generate_deck(self.size)
    }

    /// Generate `count` cards under a freshly drawn deck identifier
    pub fn generate_deck(&self, count: usize) -> Deck {
        let deck_id = session_id();
        let cards = (0..count)
            .map(|index| {
                let id = format!("{}-{}", deck_id, index);
                let url = self.card_url(&id);
                Card { id, url }
            })
            .collect();

        log::debug!("Generated deck {} with {} cards", deck_id, count);
        Deck::new(deck_id, cards)
    }

    fn card_url(&self, card_id: &str) -> String {
        let url = self
            .source
            .replace("{width}", &self.width.to_string())
            .replace("{height}", &self.height.to_string());

        if url.contains(SEED_PLACEHOLDER) {
            url.replace(SEED_PLACEHOLDER, card_id)
        } else {
            let separator = if url.contains('?') { '&' } else { '?' };
            format!("{}{}seed={}", url, separator, card_id)
        }
    }
}

/// Draw a random deck identifier, degrading to a time-based composite when the OS
/// random source is unavailable
pub fn session_id() -> String {
    let mut bytes = [0u8; 16];
    match OsRng.try_fill_bytes(&mut bytes) {
        Ok(()) => uuid::Builder::from_random_bytes(bytes)
            .into_uuid()
            .simple()
            .to_string(),
        Err(e) => {
            log::warn!("OS random source unavailable, using fallback id: {}", e);
            fallback_session_id()
        }
    }
}

fn fallback_session_id() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let counter = FALLBACK_COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut rng = StdRng::seed_from_u64((nanos as u64) ^ counter.rotate_left(32));
    format!("{:x}-{:x}-{:08x}", nanos, counter, rng.next_u32())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn generator() -> DeckGenerator {
        DeckGenerator::new(12, "https://img.test/seed/{seed}/{width}/{height}", 600, 800)
    }

    #[test]
    fn test_generate_uses_configured_size() {
        let deck = generator().generate();
        assert_eq!(deck.len(), 12);
    }

    #[test]
    fn test_card_ids_derive_from_deck_id_and_index() {
        let deck = generator().generate_deck(3);

        for (index, card) in deck.iter().enumerate() {
            assert_eq!(card.id, format!("{}-{}", deck.id(), index));
            assert_eq!(
                card.url,
                format!("https://img.test/seed/{}/600/800", card.id)
            );
        }
    }

    #[test]
    fn test_two_decks_never_share_urls() {
        let generator = generator();
        let first = generator.generate_deck(5);
        let second = generator.generate_deck(5);

        assert_ne!(first.id(), second.id());
        let urls: HashSet<&str> = first
            .iter()
            .chain(second.iter())
            .map(|c| c.url.as_str())
            .collect();
        assert_eq!(urls.len(), 10);
    }

    #[test]
    fn test_zero_cards() {
        assert!(generator().generate_deck(0).is_empty());
    }

    #[test]
    fn test_template_without_seed_gets_query_param() {
        let generator = DeckGenerator::new(1, "https://img.test/random", 10, 10);
        let deck = generator.generate();
        let card = &deck.cards()[0];
        assert_eq!(card.url, format!("https://img.test/random?seed={}", card.id));

        let generator = DeckGenerator::new(1, "https://img.test/random?w={width}", 10, 10);
        let deck = generator.generate();
        let card = &deck.cards()[0];
        assert_eq!(
            card.url,
            format!("https://img.test/random?w=10&seed={}", card.id)
        );
    }

    #[test]
    fn test_fallback_ids_are_distinct() {
        let a = fallback_session_id();
        let b = fallback_session_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_session_id_is_uuid_shaped() {
        let id = session_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
