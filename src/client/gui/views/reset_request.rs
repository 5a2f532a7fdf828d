use iced::widget::{Button, Column, Container, Text, TextInput};
use iced::{Color, Element, Font, Length};

use crate::client::gui::views::logger::logger_view;
use crate::client::gui::widgets::nav;
use crate::client::models::app_state::LnfAppState;
use crate::client::models::messages::Message;

const BG_MAIN: Color = Color::from_rgb(0.06, 0.07, 0.13);
const CARD_BG: Color = Color::from_rgb(0.11, 0.13, 0.20);
const TEXT_PRIMARY: Color = Color::WHITE;
const TEXT_SECONDARY: Color = Color::from_rgb(0.7, 0.7, 0.7);

const BOLD_FONT: Font = Font {
    family: iced::font::Family::SansSerif,
    weight: iced::font::Weight::Bold,
    ..Font::DEFAULT
};

fn card_appearance(_: &iced::Theme) -> iced::widget::container::Appearance {
    iced::widget::container::Appearance {
        background: Some(iced::Background::Color(CARD_BG)),
        text_color: Some(TEXT_PRIMARY),
        border: iced::Border {
            radius: 16.0.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Step one of the reset flow: ask the server to mail an OTP.
pub fn view(state: &LnfAppState) -> Element<'_, Message> {
    let username_input = TextInput::new("Username", &state.reset_username)
        .on_input(Message::ResetUsernameChanged)
        .padding(12)
        .size(14);
    let email_input = TextInput::new("Email", &state.reset_email)
        .on_input(Message::ResetEmailChanged)
        .on_submit(Message::SubmitResetRequest)
        .padding(12)
        .size(14);

    let enabled =
        !state.reset_username.is_empty() && !state.reset_email.is_empty() && !state.reset_loading;
    let mut submit = Button::new(
        Text::new(if state.reset_loading {
            "Sending OTP..."
        } else {
            "Send OTP"
        })
        .size(15),
    )
    .style(iced::theme::Button::Primary)
    .padding([12, 16])
    .width(Length::Fill);
    if enabled {
        submit = submit.on_press(Message::SubmitResetRequest);
    }

    let card = Container::new(
        Column::new()
            .spacing(16)
            .push(
                Text::new("Reset password")
                    .font(BOLD_FONT)
                    .size(24)
                    .style(TEXT_PRIMARY),
            )
            .push(
                Text::new("We'll email a one-time code to verify it's you.")
                    .size(13)
                    .style(TEXT_SECONDARY),
            )
            .push(username_input)
            .push(email_input)
            .push(submit)
            .push(
                Button::new(Text::new("Remember your password? Login").size(13))
                    .on_press(Message::OpenLogin)
                    .style(iced::theme::Button::Text),
            ),
    )
    .padding(28)
    .width(Length::Fixed(420.0))
    .style(iced::theme::Container::Custom(Box::new(card_appearance)));

    let content = Column::new()
        .push(nav::view(state))
        .push(logger_view(&state.logger))
        .push(
            Container::new(card)
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x()
                .center_y(),
        );

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(
            |_: &iced::Theme| iced::widget::container::Appearance {
                background: Some(iced::Background::Color(BG_MAIN)),
                text_color: Some(TEXT_PRIMARY),
                ..Default::default()
            },
        )))
        .into()
}
