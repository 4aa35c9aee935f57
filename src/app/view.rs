use super::messages::Message;
use super::state::{
    App, FONT_CHOICES, MAX_FONT_SIZE, MAX_LINE_HEIGHT, MAX_SPEECH_RATE, MIN_FONT_SIZE,
    MIN_LINE_HEIGHT, MIN_SPEECH_RATE, TEXT_SCROLL_ID, font_choice_for_stack, voice_choices,
};
use chapter_reader_core::overlay::{ClickTarget, Overlay};
use iced::alignment::{Horizontal, Vertical};
use iced::widget::text::{LineHeight, Wrapping};
use iced::widget::{
    Column, button, center, column, container, horizontal_space, mouse_area, opaque, pick_list,
    row, scrollable, slider, stack, text,
};
use iced::{Element, Length};

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let snapshot = &self.snapshot;

        let play_label = if snapshot.show_pause_icon {
            "Pause"
        } else {
            "Play"
        };
        let header = row![
            text(&snapshot.chapter_title).size(22.0),
            horizontal_space(),
            button(text(format!("Theme: {}", snapshot.settings.theme))).on_press(Message::CycleTheme),
            button("Chapters").on_press(Message::OpenChapterIndex),
            button(play_label).on_press(Message::TogglePlay),
            button(if snapshot.overlays.settings {
                "Hide Settings"
            } else {
                "Settings"
            })
            .on_press(Message::ToggleSettings),
        ]
        .spacing(10)
        .align_y(Vertical::Center)
        .width(Length::Fill);

        let settings = &snapshot.settings;
        let chapter_text = text(&snapshot.chapter_text)
            .size(settings.font_size as f32)
            .line_height(LineHeight::Relative(settings.line_height))
            .font(self.current_font())
            .width(Length::Fill)
            .wrapping(Wrapping::Word)
            .align_x(Horizontal::Left);

        let text_view = scrollable(container(chapter_text).width(Length::Fill).padding([12, 24]))
            .id(TEXT_SCROLL_ID.clone())
            .height(Length::Fill);

        let previous = button("Previous")
            .on_press_maybe(snapshot.can_go_previous.then_some(Message::PreviousChapter));
        let next =
            button("Next").on_press_maybe(snapshot.can_go_next.then_some(Message::NextChapter));
        let footer = row![
            previous,
            horizontal_space(),
            text(format!(
                "Chapter {} of {}",
                settings.current_chapter,
                snapshot.chapters.len()
            )),
            horizontal_space(),
            next
        ]
        .align_y(Vertical::Center)
        .width(Length::Fill);

        let mut content: Column<'_, Message> = column![header];
        if snapshot.overlays.settings {
            content = content.push(self.settings_panel());
        }
        let content = content
            .push(text_view)
            .push(footer)
            .padding(16)
            .spacing(12)
            .height(Length::Fill);

        let page = mouse_area(container(content).width(Length::Fill).height(Length::Fill))
            .on_press(Message::Clicked(ClickTarget::Page));

        if snapshot.overlays.chapter_index {
            self.chapter_index_modal(page.into())
        } else {
            page.into()
        }
    }
}

impl App {
    fn settings_panel(&self) -> Element<'_, Message> {
        let snapshot = &self.snapshot;
        let settings = &snapshot.settings;

        let font_size_slider = slider(
            MIN_FONT_SIZE as f32..=MAX_FONT_SIZE as f32,
            settings.font_size as f32,
            |value| Message::FontSizeChanged(value.round() as u32),
        )
        .step(1.0);
        let family_picker = pick_list(
            FONT_CHOICES,
            font_choice_for_stack(&settings.font_family),
            Message::FontFamilyChanged,
        )
        .placeholder(settings.font_family.clone());
        let line_height_slider = slider(
            MIN_LINE_HEIGHT..=MAX_LINE_HEIGHT,
            settings.line_height,
            Message::LineHeightChanged,
        )
        .step(0.1);
        let rate_slider = slider(
            MIN_SPEECH_RATE..=MAX_SPEECH_RATE,
            settings.speech_rate,
            Message::SpeechRateChanged,
        )
        .step(0.1);

        let choices = voice_choices(&snapshot.voices);
        let selected = snapshot
            .selected_voice
            .and_then(|index| choices.get(index).cloned());
        let voice_picker = pick_list(choices, selected, Message::VoiceSelected)
            .placeholder("Default voice");

        let panel = column![
            text("Reader Settings").size(18.0),
            row![text(format!("Font size: {}", snapshot.font_size_label)), font_size_slider]
                .spacing(8)
                .align_y(Vertical::Center),
            row![text("Font family"), family_picker]
                .spacing(8)
                .align_y(Vertical::Center),
            row![
                text(format!("Line height: {}", snapshot.line_height_label)),
                line_height_slider
            ]
            .spacing(8)
            .align_y(Vertical::Center),
            row![
                text(format!("Speech rate: {}", snapshot.speech_rate_label)),
                rate_slider
            ]
            .spacing(8)
            .align_y(Vertical::Center),
            row![text("Voice"), voice_picker]
                .spacing(8)
                .align_y(Vertical::Center),
        ]
        .spacing(10);

        // Clicks inside the panel must not reach the page's outside-click handler.
        opaque(
            container(panel)
                .padding(12)
                .width(Length::Fill)
                .style(container::rounded_box),
        )
    }

    fn chapter_index_modal<'a>(&'a self, base: Element<'a, Message>) -> Element<'a, Message> {
        let entries = self.snapshot.chapters.iter().fold(
            column![text("Chapters").size(20.0)].spacing(6),
            |list, entry| {
                let label = if entry.current {
                    format!("> {}", entry.title)
                } else {
                    entry.title.clone()
                };
                list.push(
                    button(text(label))
                        .width(Length::Fill)
                        .on_press(Message::GoToChapter(entry.number)),
                )
            },
        );
        let dialog = container(entries.push(button("Close").on_press(Message::CloseChapterIndex)))
            .padding(20)
            .width(Length::Fixed(320.0))
            .style(container::rounded_box);

        let backdrop = crate::theme::backdrop(self.snapshot.settings.theme);
        stack![
            base,
            opaque(
                mouse_area(center(opaque(dialog)).style(move |_theme| container::Style {
                    background: Some(backdrop.into()),
                    ..container::Style::default()
                }))
                .on_press(Message::Clicked(ClickTarget::Backdrop(Overlay::ChapterIndex)))
            )
        ]
        .into()
    }
}
