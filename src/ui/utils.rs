use std::io::Cursor;

use image::DynamicImage;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui_image::{picker::Picker, protocol::StatefulProtocol};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::cache::ImageRef;
use crate::deck::DeckController;
use crate::fetch::ImageFetcher;

/// Truncate a string to fit within the given display width, marking the cut with an ellipsis
pub fn truncate_by_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for ch in s.chars() {
        let char_width = ch.width().unwrap_or(0);
        // Leave one cell for the ellipsis
        if current_width + char_width > max_width - 1 {
            break;
        }
        result.push(ch);
        current_width += char_width;
    }

    result.push('…');
    result
}

/// Helper function to center a rect within another rect
pub fn center_area(area: Rect, horizontal: Constraint, vertical: Constraint) -> Rect {
    let [area] = Layout::horizontal([horizontal])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([vertical]).flex(Flex::Center).areas(area);
    area
}

/// Place an image of the given size in the middle of the available area
pub fn center_image(image_dimensions: Rect, available_area: Rect) -> Rect {
    let width = image_dimensions.width.min(available_area.width);
    let height = image_dimensions.height.min(available_area.height);
    Rect {
        x: available_area.x + (available_area.width - width) / 2,
        y: available_area.y + (available_area.height - height) / 2,
        width,
        height,
    }
}

/// Decoded image for the card on screen.
///
/// Decoding is only redone when the current card or its cached reference changes.
#[derive(Default)]
pub struct CardView {
    pub image: Option<StatefulProtocol>,
    shown: Option<(String, Option<ImageRef>)>,
}

impl CardView {
    pub fn sync<F: ImageFetcher>(&mut self, controller: &DeckController<F>, picker: &Picker) {
        let current = controller
            .snapshot()
            .current_card
            .map(|card| (card.id.clone(), controller.image_for(&card.id).cloned()));

        if current == self.shown {
            return;
        }

        self.image = current
            .as_ref()
            .and_then(|(_, image)| image.as_ref())
            .and_then(|image| controller.image_bytes(image))
            .and_then(decode_image)
            .map(|dyn_img| picker.new_resize_protocol(dyn_img));

        if let Some((card_id, image)) = &current {
            log::debug!("Showing card {} ({:?})", card_id, image);
        }
        self.shown = current;
    }

    /// Cached reference of the card currently shown, if it has settled
    pub fn image_ref(&self) -> Option<&ImageRef> {
        self.shown.as_ref().and_then(|(_, image)| image.as_ref())
    }
}

fn decode_image(bytes: &[u8]) -> Option<DynamicImage> {
    let decoded = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .decode();

    match decoded {
        Ok(image) => Some(image),
        Err(e) => {
            log::warn!("Failed to decode image ({} bytes): {}", bytes.len(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate_by_width("card-1", 10), "card-1");
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate_by_width("https://example.com", 8), "https:/…");
    }

    #[test]
    fn test_truncate_respects_wide_chars() {
        // Each CJK character is two cells wide
        assert_eq!(truncate_by_width("画像画像画像", 5), "画像…");
        assert_eq!(truncate_by_width("abc", 0), "");
    }

    #[test]
    fn test_center_image_clamps_to_area() {
        let area = Rect::new(0, 0, 10, 10);
        let centered = center_image(Rect::new(0, 0, 4, 20), area);
        assert_eq!(centered, Rect::new(3, 0, 4, 10));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_image(&[1, 2, 3]).is_none());
    }
}
