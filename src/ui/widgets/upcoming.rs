use ratatui::{
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
};

use crate::cache::ImageRef;
use crate::deck::Card;

/// Cards stacked behind the current one, with the load state of each image
pub fn create_upcoming_widget(upcoming: &[(Card, Option<ImageRef>)]) -> List<'static> {
    let block = Block::default()
        .border_type(BorderType::Rounded)
        .borders(Borders::ALL)
        .title(Span::styled(" Up next ", Style::default().bold()))
        .border_style(Style::default().dark_gray());

    let items: Vec<ListItem> = if upcoming.is_empty() {
        vec![ListItem::new(Line::styled(
            "Last card",
            Style::default().dark_gray(),
        ))]
    } else {
        upcoming
            .iter()
            .map(|(card, image)| {
                let (marker, style) = status_marker(image.as_ref());
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{} ", marker), style),
                    Span::raw(card.id.clone()),
                ]))
            })
            .collect()
    };

    List::new(items).block(block)
}

fn status_marker(image: Option<&ImageRef>) -> (&'static str, Style) {
    match image {
        Some(ImageRef::Local(_)) => ("✓", Style::default().green()),
        Some(ImageRef::Remote(_)) => ("!", Style::default().yellow()),
        None => ("…", Style::default().dark_gray()),
    }
}
