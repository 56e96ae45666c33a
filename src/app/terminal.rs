use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::DefaultTerminal;

/// Switch to the alternate screen in raw mode
pub fn init_terminal() -> color_eyre::Result<DefaultTerminal> {
    install_panic_restore();

    execute!(std::io::stdout(), EnterAlternateScreen, Hide)?;
    enable_raw_mode()?;

    let terminal =
        ratatui::Terminal::new(ratatui::backend::CrosstermBackend::new(std::io::stdout()))?;

    Ok(terminal)
}

/// Leave the alternate screen and give the cursor back
pub fn restore_terminal() -> color_eyre::Result<()> {
    execute!(std::io::stdout(), LeaveAlternateScreen, Show)?;
    disable_raw_mode()?;
    Ok(())
}

/// A panic inside the event loop would otherwise leave the shell in raw mode
fn install_panic_restore() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        previous(info);
    }));
}
