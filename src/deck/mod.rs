pub mod card;
pub mod controller;
pub mod generator;
pub mod readiness;

pub use card::{Card, Deck};
pub use controller::{
    Classification, DeckController, DeckSettings, DeckSnapshot, DeckState, Direction, Settlement,
    SettlementReceiver, SettlementSender,
};
pub use generator::DeckGenerator;
pub use readiness::{Progress, ReadinessTracker};
