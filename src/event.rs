use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

/// Drains ready terminal events without blocking and returns the first key
/// press. Releases and repeats are skipped.
pub fn try_next_key() -> color_eyre::Result<Option<KeyEvent>> {
    while event::poll(Duration::ZERO)? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(Some(key));
            }
        }
    }
    Ok(None)
}
