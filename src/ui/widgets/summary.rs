use ratatui::{
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
};

use crate::deck::Card;
use crate::ui::utils::truncate_by_width;

/// List of liked cards shown once the deck is exhausted
pub fn create_summary_widget(liked: &[Card], rejected: usize, width: u16) -> List<'static> {
    let title = format!(" Summary: {} liked, {} rejected ", liked.len(), rejected);
    let block = Block::default()
        .border_type(BorderType::Rounded)
        .borders(Borders::ALL)
        .title(Span::styled(title, Style::default().bold()))
        .border_style(Style::default().dark_gray());

    // Borders plus the id column
    let url_width = (width as usize).saturating_sub(4 + id_column_width(liked));

    let items: Vec<ListItem> = if liked.is_empty() {
        vec![ListItem::new(Line::styled(
            "Nothing liked this round. Press reset for a new deck.",
            Style::default().dark_gray(),
        ))]
    } else {
        liked
            .iter()
            .map(|card| {
                ListItem::new(Line::from(vec![
                    Span::styled("♥ ", Style::default().red()),
                    Span::styled(
                        format!("{:<w$} ", card.id, w = id_column_width(liked).saturating_sub(3)),
                        Style::default().bold(),
                    ),
                    Span::styled(
                        truncate_by_width(&card.url, url_width),
                        Style::default().dark_gray(),
                    ),
                ]))
            })
            .collect()
    };

    List::new(items).block(block)
}

/// Width taken by the heart, the longest id and a separating space
fn id_column_width(cards: &[Card]) -> usize {
    cards.iter().map(|card| card.id.len()).max().unwrap_or(0) + 3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_column_width() {
        let cards = vec![Card::new("a", "u"), Card::new("card-10", "u")];
        assert_eq!(id_column_width(&cards), 10);
        assert_eq!(id_column_width(&[]), 3);
    }

    #[test]
    fn test_summary_lists_each_liked_card() {
        let cards = vec![Card::new("a", "https://x/1"), Card::new("b", "https://x/2")];
        let list = create_summary_widget(&cards, 3, 60);
        assert_eq!(list.len(), 2);
    }
}
