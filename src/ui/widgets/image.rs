use image::imageops::FilterType;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Style, Stylize},
    text::Line,
    widgets::Paragraph,
};
use ratatui_image::{Resize, StatefulImage};

use crate::cache::ImageRef;
use crate::ui::utils::*;

/// Draw the current card's image, or a placeholder explaining why there is none
pub fn render_image_widget(frame: &mut ratatui::Frame<'_>, card_view: &mut CardView, image_area: Rect) {
    if let Some(ref mut img) = card_view.image {
        let resize = Resize::Scale(Some(FilterType::Lanczos3));
        let img_rect = img.size_for(resize.clone(), image_area);

        let centered_area = center_image(img_rect, image_area);

        let image = StatefulImage::default().resize(resize);
        frame.render_stateful_widget(image, centered_area, img);
        return;
    }

    let lines = placeholder_lines(card_view.image_ref(), image_area.width as usize);
    let placeholder_area = center_area(
        image_area,
        Constraint::Length(image_area.width),
        Constraint::Length(lines.len() as u16),
    );
    let placeholder = Paragraph::new(lines).centered();
    frame.render_widget(placeholder, placeholder_area);
}

fn placeholder_lines(image: Option<&ImageRef>, width: usize) -> Vec<Line<'static>> {
    match image {
        None => vec![Line::styled("Loading image…", Style::default().dark_gray())],
        Some(ImageRef::Local(_)) => vec![Line::styled(
            "Could not decode image",
            Style::default().yellow(),
        )],
        // The fetch failed; name the remote locator so it can be opened elsewhere
        Some(ImageRef::Remote(url)) => vec![
            Line::styled("Image unavailable", Style::default().yellow()),
            Line::styled(
                truncate_by_width(url, width.saturating_sub(2)),
                Style::default().dark_gray(),
            ),
        ],
    }
}
