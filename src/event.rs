use crossterm::event::KeyEvent;

/// Application events.
#[derive(Debug)]
pub enum Event {
    /// A tick event, sent at a regular interval.
    Tick,
    /// A key press event.
    Key(KeyEvent),
    /// The terminal was resized; the next draw picks up the new size.
    Resize,
}
