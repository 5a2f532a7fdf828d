use iced::widget::container::Appearance;
use iced::widget::{Button, Container, Row, Space, Text};
use iced::{Element, Length};

use crate::client::models::messages::Message;

#[derive(Debug, Clone)]
pub enum LogLevel {
    Success,
    Error,
    Info,
    Warning,
}

#[derive(Debug, Clone)]
pub struct LogMessage {
    pub level: LogLevel,
    pub message: String,
}

impl LogMessage {
    pub fn color(&self) -> iced::Color {
        match self.level {
            LogLevel::Success => iced::Color::from_rgb(0.2, 0.8, 0.4),
            LogLevel::Error => iced::Color::from_rgb(0.9, 0.25, 0.25),
            LogLevel::Info => iced::Color::from_rgb(0.2, 0.6, 1.0),
            LogLevel::Warning => iced::Color::from_rgb(1.0, 0.8, 0.0),
        }
    }
}

/// Dismissible alert bar showing the latest log entry. Every failure in
/// the app ends up here instead of propagating.
pub fn logger_view(messages: &[LogMessage]) -> Element<'_, Message> {
    if let Some(log) = messages.iter().next_back() {
        let bg_color = log.color();
        Container::new(
            Row::new()
                .spacing(12)
                .align_items(iced::Alignment::Center)
                .push(Text::new(&log.message).size(16).style(iced::Color::WHITE))
                .push(Space::new(Length::Fill, Length::Fixed(0.0)))
                .push(
                    Button::new(Text::new("✕").size(14))
                        .on_press(Message::ClearLog)
                        .style(iced::theme::Button::Text)
                        .padding(4),
                ),
        )
        .padding([10, 14])
        .width(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(
            move |_: &iced::Theme| Appearance {
                background: Some(iced::Background::Color(bg_color)),
                text_color: Some(iced::Color::WHITE),
                border: iced::Border {
                    radius: 8.0.into(),
                    ..Default::default()
                },
                ..Default::default()
            },
        )))
        .into()
    } else {
        Space::new(Length::Fill, Length::Fixed(0.0)).into()
    }
}
