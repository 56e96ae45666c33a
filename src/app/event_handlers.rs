use std::time::Instant;

use crossterm::event::{Event, KeyEvent, KeyEventKind};

use super::App;
use crate::app::binds::DeckAction;
use crate::app::logging::log_user_interaction;
use crate::deck::Direction;

/// Trait for event handling
pub trait EventHandlers {
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()>;
    fn on_key_event(&mut self, key: KeyEvent);
    fn quit(&mut self);
}

impl EventHandlers for App {
    /// Reads one pending crossterm event and updates the state of [`App`].
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        match crossterm::event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
            Event::Resize(_, _) => {}
            _ => {}
        }
        Ok(())
    }

    fn on_key_event(&mut self, key: KeyEvent) {
        let Some(action) = self.key_binds.handle_key(key) else {
            return;
        };

        match action {
            DeckAction::Accept | DeckAction::Reject => {
                let direction = if action == DeckAction::Accept {
                    Direction::Accept
                } else {
                    Direction::Reject
                };
                let accepted = self.controller.classify(direction, Instant::now());
                let card = self
                    .controller
                    .snapshot()
                    .current_card
                    .map(|card| card.id.clone());
                log_user_interaction(
                    &format!("{:?}", direction),
                    Some(&format!(
                        "card {} ({})",
                        card.as_deref().unwrap_or("-"),
                        if accepted { "queued" } else { "ignored" }
                    )),
                );
            }
            DeckAction::Reset => {
                log_user_interaction("Reset", None);
                self.controller.reset();
            }
            DeckAction::Quit => self.quit(),
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        log_user_interaction("Quit", None);
        self.running = false;
    }
}
