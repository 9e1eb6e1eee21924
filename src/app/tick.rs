use std::time::Instant;

use super::App;

impl App {
    /// Called on every tick of the event loop: applies whatever the backend
    /// has answered since the last tick and expires timed banners.
    pub fn on_tick(&mut self) {
        while let Some(event) = self.dispatcher.poll_event() {
            self.apply_api_event(event);
        }
        self.agents.expire_banner(Instant::now());
    }
}
