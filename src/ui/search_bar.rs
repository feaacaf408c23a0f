//! Research question input

use iced::widget::{button, column, container, text, text_input};
use iced::{Element, Length, Padding};

use super::layout::loading_dots;
use super::theme::LightTheme;

/// Search bar component
///
/// While `loading` the input is read-only and the button becomes the
/// loading indicator.
pub fn view<'a, Message: Clone + 'a>(
    value: &str,
    on_input: impl Fn(String) -> Message + 'a,
    on_submit: Message,
    loading: bool,
    frame: usize,
) -> Element<'a, Message> {
    let input = text_input(
        "e.g. What is the limitation of the current large language models?",
        value,
    )
    .padding(14)
    .size(16);
    let input = if loading {
        input
    } else {
        input.on_input(on_input).on_submit(on_submit.clone())
    };

    let action = if loading {
        button(container(loading_dots(frame)).center_x(Length::Fill))
    } else {
        button(container(text("Search →").size(16)).center_x(Length::Fill)).on_press(on_submit)
    };

    column![
        text("Type your research question")
            .size(16)
            .color(LightTheme::TEXT),
        input,
        action
            .width(Length::Fill)
            .padding(Padding::from([10.0, 16.0]))
            .style(button::primary),
    ]
    .spacing(12)
    .into()
}
