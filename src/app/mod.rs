mod messages;
mod state;
mod update;
mod view;

use state::App;

use crate::config::AppConfig;
use chapter_reader_core::chapters::ChapterCatalog;
use iced::{Size, window};

/// Helper to launch the reader window with the loaded chapters.
pub fn run_app(config: AppConfig, catalog: ChapterCatalog) -> iced::Result {
    let window_settings = window::Settings {
        size: Size::new(config.window_width, config.window_height),
        ..window::Settings::default()
    };

    update::install_interrupt_handler();

    iced::application(App::title, App::update, App::view)
        .window(window_settings)
        .subscription(App::subscription)
        .theme(App::theme)
        .run_with(move || App::bootstrap(config, catalog))
}
