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

fn bg_main_appearance(_: &iced::Theme) -> iced::widget::container::Appearance {
    iced::widget::container::Appearance {
        background: Some(iced::Background::Color(BG_MAIN)),
        text_color: Some(TEXT_PRIMARY),
        ..Default::default()
    }
}

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

fn labeled<'a>(label: &'a str, input: TextInput<'a, Message>) -> Column<'a, Message> {
    Column::new()
        .spacing(6)
        .push(Text::new(label).size(13).style(TEXT_SECONDARY))
        .push(input)
}

pub fn view(state: &LnfAppState) -> Element<'_, Message> {
    let username_valid = state.reg_username.len() >= 3
        && state.reg_username.chars().all(|c| c.is_alphanumeric());
    let email_valid = state.reg_email.contains('@');
    let password_valid = state.reg_password.len() >= 6;
    let submit_enabled = username_valid && email_valid && password_valid && !state.reg_loading;

    let username_input = TextInput::new("At least 3 alphanumeric characters", &state.reg_username)
        .on_input(Message::RegisterUsernameChanged)
        .padding(12)
        .size(14);
    let email_input = TextInput::new("you@example.com", &state.reg_email)
        .on_input(Message::RegisterEmailChanged)
        .padding(12)
        .size(14);
    let password_input = TextInput::new("At least 6 characters", &state.reg_password)
        .on_input(Message::RegisterPasswordChanged)
        .on_submit(Message::SubmitRegister)
        .secure(true)
        .padding(12)
        .size(14);

    let mut submit = Button::new(
        Text::new(if state.reg_loading {
            "Registering..."
        } else {
            "Register"
        })
        .size(15),
    )
    .style(iced::theme::Button::Primary)
    .padding([12, 16])
    .width(Length::Fill);
    if submit_enabled {
        submit = submit.on_press(Message::SubmitRegister);
    }

    let card = Container::new(
        Column::new()
            .spacing(16)
            .push(
                Text::new("Create account")
                    .font(BOLD_FONT)
                    .size(24)
                    .style(TEXT_PRIMARY),
            )
            .push(labeled("Username", username_input))
            .push(labeled("Email", email_input))
            .push(labeled("Password", password_input))
            .push(submit)
            .push(
                Button::new(Text::new("Already have an account? Login").size(13))
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
        .style(iced::theme::Container::Custom(Box::new(bg_main_appearance)))
        .into()
}
