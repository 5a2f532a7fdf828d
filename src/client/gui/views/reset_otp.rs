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

/// Step two of the reset flow: verify the emailed one-time code.
pub fn view(state: &LnfAppState) -> Element<'_, Message> {
    let otp_input = TextInput::new("6-digit code", &state.reset_otp)
        .on_input(Message::ResetOtpChanged)
        .on_submit(Message::SubmitResetOtp)
        .padding(12)
        .size(18);

    let enabled = !state.reset_otp.trim().is_empty() && !state.reset_loading;
    let mut submit = Button::new(
        Text::new(if state.reset_loading {
            "Verifying..."
        } else {
            "Verify"
        })
        .size(15),
    )
    .style(iced::theme::Button::Primary)
    .padding([12, 16])
    .width(Length::Fill);
    if enabled {
        submit = submit.on_press(Message::SubmitResetOtp);
    }

    let card = Container::new(
        Column::new()
            .spacing(16)
            .push(Text::new("Enter OTP").font(BOLD_FONT).size(24).style(TEXT_PRIMARY))
            .push(
                Text::new(format!("We sent a code to {}", state.reset_email))
                    .size(13)
                    .style(TEXT_SECONDARY),
            )
            .push(otp_input)
            .push(submit),
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
