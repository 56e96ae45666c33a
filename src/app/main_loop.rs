use std::time::{Duration, Instant};

use ratatui::DefaultTerminal;
use ratatui_image::picker::Picker;

use super::App;
use crate::app::event_handlers::EventHandlers;
use crate::deck::Direction;
use crate::ui::CardView;

/// Fallback cell size when the terminal cannot be queried for one
const DEFAULT_FONT_SIZE: (u16, u16) = (8, 16);

/// Trait for main application loop
pub trait AppMainLoop {
    async fn run(self, terminal: DefaultTerminal) -> color_eyre::Result<()>
    where
        Self: Sized;
}

impl AppMainLoop for App {
    /// Run the application's main loop.
    async fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;

        // Set up the image picker
        let mut picker = Picker::from_query_stdio().unwrap_or_else(|e| {
            log::warn!("Could not query terminal graphics support: {}", e);
            Picker::from_fontsize(DEFAULT_FONT_SIZE)
        });
        picker.set_background_color([0, 0, 0, 0]);

        let mut card_view = CardView::default();

        self.controller.start();

        // Set up signal handlers for graceful shutdown (Unix only)
        #[cfg(unix)]
        let mut sigint =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())?;
        #[cfg(unix)]
        let mut sigterm =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;

        log::info!("Entering event-driven main loop");

        while self.running {
            card_view.sync(&self.controller, &picker);

            terminal.draw(|frame| {
                crate::ui::render(
                    frame,
                    &mut card_view,
                    &self.controller,
                    &self.config.binds,
                    &self.config_warnings,
                )
            })?;

            if let Some(ref mut img) = card_view.image {
                img.last_encoding_result();
            }

            tokio::select! {
                // Keyboard events (with short timeout so pending classifications commit on time)
                _ = tokio::time::sleep(Duration::from_millis(10)) => {
                    if crossterm::event::poll(Duration::from_millis(0))? {
                        self.handle_crossterm_events()?;
                    }
                }

                // Prefetch results
                Some(settlement) = self.settlements.recv() => {
                    self.controller.apply_settlement(settlement);
                }
            }

            if let Some(classification) = self.controller.tick(Instant::now()) {
                match classification.direction {
                    Direction::Accept => log::info!("Liked {}", classification.card.url),
                    Direction::Reject => log::debug!("Rejected {}", classification.card.url),
                }
            }

            // Check for Unix signals outside of select! to avoid conditional compilation issues
            #[cfg(unix)]
            {
                use std::pin::Pin;
                use std::task::Poll;

                let waker = futures::task::noop_waker();
                let mut cx = std::task::Context::from_waker(&waker);

                if let Poll::Ready(Some(())) = Pin::new(&mut sigint).poll_recv(&mut cx) {
                    log::info!("Received SIGINT, shutting down gracefully");
                    self.quit();
                }

                if let Poll::Ready(Some(())) = Pin::new(&mut sigterm).poll_recv(&mut cx) {
                    log::info!("Received SIGTERM, shutting down gracefully");
                    self.quit();
                }
            }
        }

        log::info!("Exiting main loop");
        self.controller.shutdown();

        Ok(())
    }
}
