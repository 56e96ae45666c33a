//! Deck lifecycle: generation, prefetch, readiness, classification and reset.
//!
//! The controller exclusively owns the image cache, the readiness counters, the
//! liked list and the pending classification. Prefetch tasks only perform network
//! I/O and report back through a channel; their results are applied here on the
//! event loop, so no state is shared across tasks. Every prefetch pass carries a
//! generation. A settlement from an older generation only clears its in-flight mark;
//! the cache entries and counters of the current pass are left alone.

use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use super::card::{Card, Deck};
use super::generator::DeckGenerator;
use super::readiness::{Progress, ReadinessTracker};
use crate::app::config::DeckConfig;
use crate::cache::{FetchStart, ImageCache, ImageRef};
use crate::fetch::{FetchError, ImageFetcher};

/// Number of cards after the current one exposed for stacking
const UPCOMING_CARDS: usize = 2;

/// Outcome of one prefetch task, tagged with the pass it belongs to
#[derive(Debug)]
pub struct Settlement {
    pub generation: u64,
    pub index: usize,
    pub url: String,
    pub outcome: Result<Vec<u8>, FetchError>,
}

pub type SettlementSender = mpsc::UnboundedSender<Settlement>;
pub type SettlementReceiver = mpsc::UnboundedReceiver<Settlement>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckState {
    Loading,
    Browsing,
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Accept,
    Reject,
}

/// A committed classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub direction: Direction,
    pub card: Card,
}

#[derive(Debug, Clone, Copy)]
struct PendingClassification {
    direction: Direction,
    index: usize,
    due: Instant,
}

#[derive(Debug, Clone, Copy)]
pub struct DeckSettings {
    /// Settled items needed before browsing can start
    pub early_threshold: usize,
    /// Delay between a classification and its commit
    pub settle_delay: Duration,
}

impl DeckSettings {
    pub fn from_config(config: &DeckConfig) -> Self {
        Self {
            early_threshold: config.early_threshold,
            settle_delay: Duration::from_millis(config.settle_delay_ms),
        }
    }
}

/// Read-only view of the deck for rendering
#[derive(Debug, Clone)]
pub struct DeckSnapshot<'a> {
    pub state: DeckState,
    pub current_card: Option<&'a Card>,
    pub upcoming_cards: &'a [Card],
    pub liked_cards: &'a [Card],
    pub progress: Progress,
    pub active_index: usize,
    pub pending: Option<Direction>,
}

impl DeckSnapshot<'_> {
    pub fn rejected_count(&self) -> usize {
        self.active_index.saturating_sub(self.liked_cards.len())
    }
}

pub struct DeckController<F: ImageFetcher> {
    settings: DeckSettings,
    generator: DeckGenerator,
    fetcher: F,
    cache: ImageCache,
    readiness: ReadinessTracker,
    deck: Deck,
    active_index: usize,
    liked: Vec<Card>,
    pending: Option<PendingClassification>,
    settle_tx: SettlementSender,
}

impl<F: ImageFetcher> DeckController<F> {
    /// Create a controller with no deck installed; call [`DeckController::start`] from
    /// within the tokio runtime to begin the first pass
    pub fn new(
        settings: DeckSettings,
        generator: DeckGenerator,
        fetcher: F,
        settle_tx: SettlementSender,
    ) -> Self {
        Self {
            readiness: ReadinessTracker::new(settings.early_threshold),
            settings,
            generator,
            fetcher,
            cache: ImageCache::new(),
            deck: Deck::default(),
            active_index: 0,
            liked: Vec::new(),
            pending: None,
            settle_tx,
        }
    }

    /// Install the first generated deck
    pub fn start(&mut self) {
        let deck = self.generator.generate();
        self.install_deck(deck);
    }

    /// Make `deck` the active deck and prefetch every card concurrently
    pub fn install_deck(&mut self, deck: Deck) {
        self.deck = deck;
        self.active_index = 0;
        self.liked.clear();
        self.pending = None;

        let generation = self.readiness.begin(self.deck.len());
        log::info!(
            "Prefetching {} images for deck {} (generation {})",
            self.deck.len(),
            self.deck.id(),
            generation
        );

        for (index, card) in self.deck.iter().enumerate() {
            match self.cache.begin_fetch(&card.url, generation) {
                FetchStart::Hit(_) => {
                    self.readiness.record(generation, index);
                }
                FetchStart::Issued => spawn_prefetch(
                    self.fetcher.clone(),
                    self.settle_tx.clone(),
                    generation,
                    index,
                    card.url.clone(),
                ),
            }
        }
    }

    /// Apply a prefetch result. Returns false when it belongs to a superseded pass
    /// or its card had already settled.
    pub fn apply_settlement(&mut self, settlement: Settlement) -> bool {
        let Settlement {
            generation,
            index,
            url,
            outcome,
        } = settlement;

        if generation != self.readiness.generation() {
            log::debug!(
                "Discarding stale settlement for {} (generation {}, current {})",
                url,
                generation,
                self.readiness.generation()
            );
            self.cache.abandon_fetch(&url, generation);
            return false;
        }

        self.cache.complete_fetch(&url, outcome);
        let counted = self.readiness.record(generation, index);

        if counted && self.readiness.is_complete() {
            log::info!("All {} images settled", self.readiness.total());
            self.cache.log_stats();
        }
        counted
    }

    pub fn state(&self) -> DeckState {
        if !self.readiness.is_ready() {
            DeckState::Loading
        } else if self.active_index >= self.deck.len() {
            DeckState::Summary
        } else {
            DeckState::Browsing
        }
    }

    /// Request a classification of the current card. Ignored unless browsing with
    /// no classification already pending.
    pub fn classify(&mut self, direction: Direction, now: Instant) -> bool {
        if self.pending.is_some() {
            log::debug!("Ignoring {:?}: a classification is already pending", direction);
            return false;
        }
        if self.state() != DeckState::Browsing {
            log::debug!("Ignoring {:?} while {:?}", direction, self.state());
            return false;
        }

        self.pending = Some(PendingClassification {
            direction,
            index: self.active_index,
            due: now + self.settings.settle_delay,
        });
        true
    }

    /// Commit the pending classification once its settle delay has elapsed
    pub fn tick(&mut self, now: Instant) -> Option<Classification> {
        if now < self.pending.as_ref()?.due {
            return None;
        }
        let pending = self.pending.take()?;
        let card = self.deck.get(pending.index)?.clone();

        if pending.direction == Direction::Accept {
            self.liked.push(card.clone());
        }
        self.active_index = pending.index + 1;

        log::debug!(
            "Committed {:?} for {} ({}/{})",
            pending.direction,
            card.id,
            self.active_index,
            self.deck.len()
        );
        Some(Classification {
            direction: pending.direction,
            card,
        })
    }

    /// Discard the current deck and its cached images and start over with a new one
    pub fn reset(&mut self) {
        log::info!(
            "Resetting deck {} at {}/{} ({} liked)",
            self.deck.id(),
            self.active_index,
            self.deck.len(),
            self.liked.len()
        );
        self.pending = None;
        self.cache.release_all();

        let deck = self.generator.generate();
        self.install_deck(deck);
    }

    /// Stop honoring outstanding settlements and free every cached image.
    ///
    /// The deck is dropped as well, so afterwards the controller reports an empty deck in
    /// Summary and ignores classifications until `start` or `reset` installs a new one.
    pub fn shutdown(&mut self) {
        self.pending = None;
        self.readiness.cancel();
        self.cache.release_all();
        self.deck = Deck::default();
        self.active_index = 0;
        self.liked.clear();
    }

    pub fn snapshot(&self) -> DeckSnapshot<'_> {
        let cards = self.deck.cards();
        let start = (self.active_index + 1).min(cards.len());
        let end = (start + UPCOMING_CARDS).min(cards.len());

        DeckSnapshot {
            state: self.state(),
            current_card: self.deck.get(self.active_index),
            upcoming_cards: &cards[start..end],
            liked_cards: &self.liked,
            progress: self.readiness.progress(),
            active_index: self.active_index,
            pending: self.pending.map(|p| p.direction),
        }
    }

    /// Cached image for a card of the active deck
    pub fn image_for(&self, card_id: &str) -> Option<&ImageRef> {
        let card = self.deck.find(card_id)?;
        self.cache.get(&card.url)
    }

    pub fn image_bytes(&self, image: &ImageRef) -> Option<&[u8]> {
        self.cache.bytes(image)
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn settings(&self) -> &DeckSettings {
        &self.settings
    }

    pub fn cache(&self) -> &ImageCache {
        &self.cache
    }

    pub fn readiness(&self) -> &ReadinessTracker {
        &self.readiness
    }

    pub fn generation(&self) -> u64 {
        self.readiness.generation()
    }
}

/// Spawn a background task fetching one card's image
fn spawn_prefetch<F: ImageFetcher>(
    fetcher: F,
    tx: SettlementSender,
    generation: u64,
    index: usize,
    url: String,
) {
    tokio::spawn(async move {
        let outcome = fetcher.fetch(&url).await;

        // Send result back (ignore error if receiver dropped)
        let _ = tx.send(Settlement {
            generation,
            index,
            url,
            outcome,
        });
    });
}
