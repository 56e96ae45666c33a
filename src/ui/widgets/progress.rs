use ratatui::{
    style::{Style, Stylize},
    text::Span,
    widgets::{Block, BorderType, Borders, Gauge},
};

use crate::deck::{DeckState, Progress};

/// Bordered gauge of settled prefetches
pub fn create_progress_gauge(progress: Progress, state: DeckState) -> Gauge<'static> {
    let filled = match state {
        DeckState::Loading => Style::default().yellow(),
        DeckState::Browsing | DeckState::Summary => Style::default().green(),
    };

    Gauge::default()
        .block(
            Block::default()
                .border_type(BorderType::Rounded)
                .borders(Borders::ALL)
                .title(Span::styled(" Prefetch ", Style::default().bold()))
                .border_style(Style::default().dark_gray()),
        )
        .gauge_style(filled)
        .ratio(progress.ratio().clamp(0.0, 1.0))
        .label(progress_label(progress))
}

fn progress_label(progress: Progress) -> String {
    if progress.total == 0 {
        "empty deck".to_string()
    } else {
        format!("{}/{} images ready", progress.ready_count, progress.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_label() {
        let progress = Progress {
            ready_count: 2,
            total: 12,
        };
        assert_eq!(progress_label(progress), "2/12 images ready");
        assert_eq!(
            progress_label(Progress {
                ready_count: 0,
                total: 0
            }),
            "empty deck"
        );
    }
}
