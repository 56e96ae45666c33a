use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::app::config::BindsConfig;
use crate::deck::{DeckController, DeckSnapshot, DeckState, Direction};
use crate::fetch::ImageFetcher;
use crate::ui::utils::{CardView, center_area, truncate_by_width};
use crate::ui::widgets::*;

/// Renders the user interface.
pub fn render<F: ImageFetcher>(
    frame: &mut Frame<'_>,
    card_view: &mut CardView,
    controller: &DeckController<F>,
    binds: &BindsConfig,
    config_warnings: &[String],
) {
    let area = frame.area();
    let snapshot = controller.snapshot();

    let [header_area, body_area, progress_area, footer_area] = Layout::vertical([
        Constraint::Length(1), // Deck info
        Constraint::Min(0),    // Card, loading message or summary
        Constraint::Length(3), // Prefetch gauge
        Constraint::Length(1), // Key hints or warnings
    ])
    .areas(area);

    frame.render_widget(header_line(&snapshot, controller.deck().len()), header_area);

    match snapshot.state {
        DeckState::Loading => render_loading(frame, &snapshot, controller, body_area),
        DeckState::Browsing => render_browsing(frame, card_view, &snapshot, controller, body_area),
        DeckState::Summary => frame.render_widget(
            create_summary_widget(
                snapshot.liked_cards,
                snapshot.rejected_count(),
                body_area.width,
            ),
            body_area,
        ),
    }

    frame.render_widget(
        create_progress_gauge(snapshot.progress, snapshot.state),
        progress_area,
    );
    frame.render_widget(footer_line(binds, config_warnings, footer_area.width), footer_area);
}

fn header_line(snapshot: &DeckSnapshot<'_>, deck_len: usize) -> Line<'static> {
    let position = match snapshot.state {
        DeckState::Summary => "done".to_string(),
        _ => format!("card {}/{}", (snapshot.active_index + 1).min(deck_len), deck_len),
    };

    Line::from(vec![
        Span::styled(" swipedeck ", Style::default().bold().reversed()),
        Span::raw("  "),
        Span::raw(position),
        Span::raw("  "),
        Span::styled(format!("♥ {}", snapshot.liked_cards.len()), Style::default().red()),
        Span::raw("  "),
        Span::styled(
            format!("✕ {}", snapshot.rejected_count()),
            Style::default().dark_gray(),
        ),
    ])
}

fn render_loading<F: ImageFetcher>(
    frame: &mut Frame<'_>,
    snapshot: &DeckSnapshot<'_>,
    controller: &DeckController<F>,
    area: Rect,
) {
    let needed = controller
        .readiness()
        .progress()
        .total
        .min(controller.settings().early_threshold);
    let lines = vec![
        Line::styled("Preparing deck…", Style::default().bold()),
        Line::styled(
            format!(
                "{} of {} images needed to start",
                snapshot.progress.ready_count.min(needed),
                needed
            ),
            Style::default().dark_gray(),
        ),
    ];

    let message_area = center_area(area, Constraint::Length(area.width), Constraint::Length(2));
    frame.render_widget(Paragraph::new(lines).centered(), message_area);
}

fn render_browsing<F: ImageFetcher>(
    frame: &mut Frame<'_>,
    card_view: &mut CardView,
    snapshot: &DeckSnapshot<'_>,
    controller: &DeckController<F>,
    area: Rect,
) {
    let [card_area, side_area] =
        Layout::horizontal([Constraint::Percentage(70), Constraint::Percentage(30)]).areas(area);

    // The border shows a classification that is waiting to commit
    let (border_style, verdict) = match snapshot.pending {
        Some(Direction::Accept) => (Style::default().green(), " ♥ liked "),
        Some(Direction::Reject) => (Style::default().red(), " ✕ rejected "),
        None => (Style::default().dark_gray(), ""),
    };
    let title = snapshot
        .current_card
        .map(|card| format!(" {} ", card.id))
        .unwrap_or_default();

    let block = Block::default()
        .border_type(BorderType::Rounded)
        .borders(Borders::ALL)
        .title(Span::styled(title, Style::default().bold()))
        .title_bottom(Line::styled(verdict, border_style.bold()).right_aligned())
        .border_style(border_style);
    let image_area = block.inner(card_area);
    frame.render_widget(block, card_area);
    render_image_widget(frame, card_view, image_area);

    let upcoming: Vec<_> = snapshot
        .upcoming_cards
        .iter()
        .map(|card| (card.clone(), controller.image_for(&card.id).cloned()))
        .collect();
    frame.render_widget(create_upcoming_widget(&upcoming), side_area);
}

fn footer_line(binds: &BindsConfig, config_warnings: &[String], width: u16) -> Line<'static> {
    if let Some(first) = config_warnings.first() {
        let text = match config_warnings.len() {
            1 => format!(" ⚠ {}", first),
            n => format!(" ⚠ {} (+{} more, see log)", first, n - 1),
        };
        return Line::styled(
            truncate_by_width(&text, width as usize),
            Style::default().yellow(),
        );
    }

    let hints = [
        ("accept", &binds.accept),
        ("reject", &binds.reject),
        ("new deck", &binds.reset),
        ("quit", &binds.quit),
    ]
    .iter()
    .filter_map(|(label, keys)| keys.first().map(|key| format!("{} {}", key, label)))
    .collect::<Vec<_>>()
    .join("  ·  ");

    Line::styled(
        truncate_by_width(&format!(" {}", hints), width as usize),
        Style::default().dark_gray(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footer_shows_key_hints() {
        let line = footer_line(&BindsConfig::default(), &[], 120);
        assert_eq!(
            line.to_string(),
            " right accept  ·  left reject  ·  r new deck  ·  q quit"
        );
    }

    #[test]
    fn test_footer_prefers_warnings() {
        let warnings = vec!["Unknown option in [deck]: siez".to_string(), "x".to_string()];
        let line = footer_line(&BindsConfig::default(), &warnings, 120);
        assert_eq!(
            line.to_string(),
            " ⚠ Unknown option in [deck]: siez (+1 more, see log)"
        );
    }
}
