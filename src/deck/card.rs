/// One deck item: a session-unique identifier and the locator its image is fetched from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: String,
    pub url: String,
}

impl Card {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
        }
    }
}

/// Ordered cards for one session. Insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    id: String,
    cards: Vec<Card>,
}

impl Deck {
    pub fn new(id: impl Into<String>, cards: Vec<Card>) -> Self {
        Self {
            id: id.into(),
            cards,
        }
    }

    /// The random identifier shared by every card id in this deck
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    pub fn find(&self, card_id: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == card_id)
    }
}
