//! Page shell: header, footer and loading indicator

use iced::widget::{column, container, horizontal_rule, row, text, Space};
use iced::{Alignment, Background, Border, Element, Length, Padding};

use super::theme::LightTheme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendStatus {
    #[default]
    Unknown,
    Online,
    Offline,
}

impl BackendStatus {
    pub fn label(self) -> &'static str {
        match self {
            BackendStatus::Unknown => "Connecting",
            BackendStatus::Online => "Backend online",
            BackendStatus::Offline => "Backend offline",
        }
    }
}

pub fn header<'a, Message: 'a>(status: BackendStatus, backend_url: &'a str) -> Element<'a, Message> {
    let badge_color = match status {
        BackendStatus::Online => LightTheme::ONLINE,
        BackendStatus::Offline => LightTheme::ERROR,
        BackendStatus::Unknown => LightTheme::TEXT_MUTED,
    };

    let badge = container(
        column![
            text(status.label()).size(13).color(badge_color),
            text(backend_url).size(11).color(LightTheme::TEXT_MUTED),
        ]
        .spacing(2)
        .align_x(Alignment::End),
    )
    .padding(Padding::from([6.0, 14.0]))
    .style(|_theme| container::Style {
        background: Some(Background::Color(LightTheme::SURFACE)),
        border: Border {
            color: LightTheme::BORDER,
            width: 1.0,
            radius: 16.0.into(),
        },
        ..Default::default()
    });

    column![
        row![
            text("ArXiv Agent").size(30).color(LightTheme::TEXT),
            Space::with_width(Length::Fill),
            badge,
        ]
        .align_y(Alignment::Center)
        .padding(Padding::from([18.0, 24.0])),
        horizontal_rule(2),
    ]
    .into()
}

pub fn footer<'a, Message: 'a>() -> Element<'a, Message> {
    column![
        horizontal_rule(1),
        container(
            text("Answers are generated from arXiv papers and may be inaccurate. Check the references.")
                .size(12)
                .color(LightTheme::TEXT_MUTED),
        )
        .padding(Padding::from([10.0, 24.0]))
        .center_x(Length::Fill),
    ]
    .into()
}

/// Animated dots shown while a request is in flight
pub fn loading_dots<'a, Message: 'a>(frame: usize) -> Element<'a, Message> {
    text(dots_label(frame))
        .size(18)
        .color(LightTheme::TEXT_MUTED)
        .into()
}

/// One to three dots, padded so the width stays put between frames.
pub fn dots_label(frame: usize) -> String {
    let dots = vec!["●"; frame % 3 + 1].join(" ");
    format!("{:<5}", dots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dots_cycle() {
        assert_eq!(dots_label(0).matches('●').count(), 1);
        assert_eq!(dots_label(1).matches('●').count(), 2);
        assert_eq!(dots_label(2).matches('●').count(), 3);
        assert_eq!(dots_label(3), dots_label(0));
    }

    #[test]
    fn test_dots_width_is_stable() {
        let widths: Vec<usize> = (0..3).map(|f| dots_label(f).chars().count()).collect();
        assert!(widths.iter().all(|w| *w == widths[0]));
    }
}
