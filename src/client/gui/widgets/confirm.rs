use iced::widget::container::Appearance;
use iced::widget::{Button, Container, Row, Space, Text};
use iced::{Color, Element, Length};

use crate::client::models::messages::Message;

const BAR_BG: Color = Color::from_rgb(0.25, 0.12, 0.12);

/// Yes/no gate shown before any destructive call is issued. Nothing is
/// ever deleted on a single click.
pub fn confirm_bar<'a>(prompt: &'a str, confirm: Message, cancel: Message) -> Element<'a, Message> {
    Container::new(
        Row::new()
            .spacing(12)
            .align_items(iced::Alignment::Center)
            .push(Text::new(prompt).size(14).style(Color::WHITE))
            .push(Space::new(Length::Fill, Length::Fixed(0.0)))
            .push(
                Button::new(Text::new("Delete").size(14))
                    .on_press(confirm)
                    .style(iced::theme::Button::Destructive)
                    .padding([6, 12]),
            )
            .push(
                Button::new(Text::new("Cancel").size(14))
                    .on_press(cancel)
                    .style(iced::theme::Button::Secondary)
                    .padding([6, 12]),
            ),
    )
    .padding([10, 14])
    .width(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(
        |_: &iced::Theme| Appearance {
            background: Some(iced::Background::Color(BAR_BG)),
            text_color: Some(Color::WHITE),
            border: iced::Border {
                radius: 8.0.into(),
                ..Default::default()
            },
            ..Default::default()
        },
    )))
    .into()
}
