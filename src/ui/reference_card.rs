//! A cited paper with its inline chat panel

use iced::widget::{button, column, container, row, text, text_input};
use iced::{Alignment, Background, Border, Element, Length, Padding, Theme};

use super::layout::loading_dots;
use super::theme::LightTheme;
use crate::app::{ChatPanel, Message};
use crate::backend::types::Reference;

pub fn view<'a>(
    index: usize,
    reference: &'a Reference,
    panel: Option<&'a ChatPanel>,
    frame: usize,
) -> Element<'a, Message> {
    let mut details = column![text(display_title(reference))
        .size(18)
        .color(LightTheme::TEXT)]
    .spacing(6);

    if !reference.authors.is_empty() {
        details = details.push(
            text(reference.authors.to_string())
                .size(13)
                .color(LightTheme::TEXT_MUTED),
        );
    }
    if let Some(journal) = reference.journal.as_deref().filter(|j| !j.trim().is_empty()) {
        details = details.push(text(journal).size(13).color(LightTheme::TEXT_MUTED));
    }
    if !reference.llm_summary.is_empty() {
        details = details.push(text(&reference.llm_summary).size(14).color(LightTheme::TEXT));
    }
    if !reference.url.is_empty() {
        details = details.push(text(&reference.url).size(12).color(LightTheme::LINK));
    }

    let open = panel.is_some();
    let toggle_style: fn(&Theme, button::Status) -> button::Style = if open {
        button::secondary
    } else {
        button::primary
    };
    let toggle = button(text(if open { "Close chat" } else { "Chat with this paper" }).size(14))
        .on_press(Message::ReferenceToggled(index))
        .padding(Padding::from([6.0, 12.0]))
        .style(toggle_style);

    let mut card = column![details, toggle].spacing(12);
    if let Some(panel) = panel {
        card = card.push(view_panel(panel, frame));
    }

    container(card)
        .padding(16)
        .width(Length::Fill)
        .style(|_theme| container::Style {
            background: Some(Background::Color(LightTheme::SURFACE)),
            border: Border {
                color: LightTheme::BORDER,
                width: 1.0,
                radius: 12.0.into(),
            },
            ..Default::default()
        })
        .into()
}

fn view_panel(panel: &ChatPanel, frame: usize) -> Element<'_, Message> {
    let loading = panel.is_loading();

    let input = text_input("Ask a follow-up question about this paper", &panel.question)
        .padding(10)
        .size(14)
        .width(Length::Fill);
    let input = if loading {
        input
    } else {
        input
            .on_input(Message::ChatQuestionChanged)
            .on_submit(Message::ChatSubmitted)
    };

    let ask: Element<'_, Message> = if loading {
        loading_dots(frame)
    } else {
        button(text("Ask").size(14))
            .on_press(Message::ChatSubmitted)
            .padding(Padding::from([8.0, 16.0]))
            .style(button::primary)
            .into()
    };

    let mut content = column![row![input, ask].spacing(8).align_y(Alignment::Center)].spacing(10);

    if let Some(answer) = &panel.answer {
        content = content.push(
            container(text(answer).size(14).color(LightTheme::TEXT))
                .padding(12)
                .width(Length::Fill)
                .style(|_theme| container::Style {
                    background: Some(Background::Color(LightTheme::SURFACE)),
                    border: Border::default().rounded(8),
                    ..Default::default()
                }),
        );
    }
    if let Some(error) = &panel.error {
        content = content.push(text(error).size(13).color(LightTheme::ERROR));
    }

    container(content)
        .padding(12)
        .width(Length::Fill)
        .style(|_theme| container::Style {
            background: Some(Background::Color(LightTheme::SURFACE_MUTED)),
            border: Border::default().rounded(8),
            ..Default::default()
        })
        .into()
}

/// Title to show, falling back to the URL when the backend sent none
pub fn display_title(reference: &Reference) -> &str {
    let title = reference.title.trim();
    if title.is_empty() {
        reference.url.as_str()
    } else {
        title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_title_falls_back_to_url() {
        let untitled = Reference {
            url: "http://arxiv.org/abs/2301.00001v1".into(),
            ..Reference::default()
        };
        assert_eq!(display_title(&untitled), "http://arxiv.org/abs/2301.00001v1");

        let titled = Reference {
            title: "  Attention Is All You Need ".into(),
            ..untitled
        };
        assert_eq!(display_title(&titled), "Attention Is All You Need");
    }
}
