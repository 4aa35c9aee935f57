use super::super::messages::Message;
use super::super::state::{App, TEXT_SCROLL_ID};
use super::Effect;
use chapter_reader_core::ReaderCommand;
use iced::Event;
use iced::Task;
use iced::event;
use iced::keyboard;
use iced::widget::scrollable::{self, RelativeOffset};
use iced::window;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Route Ctrl+C into the next tick so speech is cancelled before exit.
pub(in crate::app) fn install_interrupt_handler() {
    if let Err(err) = ctrlc::set_handler(|| INTERRUPTED.store(true, Ordering::SeqCst)) {
        warn!("Failed to install Ctrl+C signal handler: {err}");
    }
}

pub(super) fn interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

impl App {
    pub(super) fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::ScrollToTop => scrollable::snap_to(TEXT_SCROLL_ID.clone(), RelativeOffset::START),
            Effect::Quit => {
                if self.reader.is_speaking() {
                    if let Err(err) = self.reader.apply_command(ReaderCommand::StopSpeech) {
                        warn!("Failed to stop speech during shutdown: {err}");
                    }
                }
                info!("Shutting down reader");
                iced::exit()
            }
        }
    }
}

pub(super) fn runtime_event_to_message(
    event: Event,
    status: event::Status,
    _window_id: window::Id,
) -> Option<Message> {
    if status == event::Status::Captured {
        return None;
    }
    match event {
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            Some(Message::KeyPressed { key, modifiers })
        }
        _ => None,
    }
}
