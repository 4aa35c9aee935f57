mod reducer;
mod runtime;
mod shortcuts;

pub(super) use runtime::install_interrupt_handler;

use super::messages::Message;
use super::state::App;
use iced::event;
use iced::time;
use iced::{Subscription, Task};
use std::time::Duration;

const SPEECH_POLL: Duration = Duration::from_millis(50);
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Side effects the reducer asks the runtime to perform.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Effect {
    ScrollToTop,
    Quit,
}

impl App {
    pub fn subscription(app: &App) -> Subscription<Message> {
        // Speaking needs a fast tick to drain engine events; idle only polls for Ctrl+C.
        let poll = if app.snapshot.show_pause_icon {
            SPEECH_POLL
        } else {
            IDLE_POLL
        };

        Subscription::batch([
            event::listen_with(runtime::runtime_event_to_message),
            time::every(poll).map(|_| Message::Tick),
        ])
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let effects = self.reduce(message);
        if effects.is_empty() {
            Task::none()
        } else {
            Task::batch(effects.into_iter().map(|effect| self.run_effect(effect)))
        }
    }
}
