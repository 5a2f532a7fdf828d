use iced::widget::{Button, Checkbox, Column, Container, Row, Space, Text, TextInput};
use iced::{Color, Element, Font, Length};

use crate::client::gui::views::logger::logger_view;
use crate::client::gui::widgets::nav;
use crate::client::models::app_state::LnfAppState;
use crate::client::models::lockout::LockoutCountdown;
use crate::client::models::messages::Message;

const BG_MAIN: Color = Color::from_rgb(0.06, 0.07, 0.13);
const CARD_BG: Color = Color::from_rgb(0.11, 0.13, 0.20);
const LOCK_BG: Color = Color::from_rgb(0.35, 0.16, 0.16);
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

fn lock_banner_appearance(_: &iced::Theme) -> iced::widget::container::Appearance {
    iced::widget::container::Appearance {
        background: Some(iced::Background::Color(LOCK_BG)),
        text_color: Some(TEXT_PRIMARY),
        border: iced::Border {
            radius: 8.0.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn view(state: &LnfAppState) -> Element<'_, Message> {
    let locked_remaining = state.lockout_remaining_now();
    let loading = state.login_loading;

    let username_input = TextInput::new("Username", &state.login_username)
        .on_input(Message::LoginUsernameChanged)
        .on_submit(Message::SubmitLogin)
        .padding(12)
        .size(14)
        .width(Length::Fill);

    let mut password_input = TextInput::new("Password", &state.login_password)
        .on_input(Message::LoginPasswordChanged)
        .on_submit(Message::SubmitLogin)
        .padding(12)
        .size(14)
        .width(Length::Fill);
    if !state.show_password {
        password_input = password_input.secure(true);
    }

    let show_toggle = Checkbox::new("Show password", state.show_password)
        .on_toggle(|_| Message::ToggleShowPassword)
        .size(16)
        .text_size(13);

    // While locked every submission affordance is disabled; the banner
    // shows the live countdown and re-renders on each tick.
    let lock_banner: Element<Message> = match locked_remaining {
        Some(secs) => Container::new(
            Text::new(format!(
                "Too many failed attempts. Try again in {}",
                LockoutCountdown::format_remaining(secs)
            ))
            .size(14)
            .style(TEXT_PRIMARY),
        )
        .padding([10, 14])
        .width(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(
            lock_banner_appearance,
        )))
        .into(),
        None => Space::new(Length::Fill, Length::Fixed(0.0)).into(),
    };

    let submit_enabled = !loading
        && locked_remaining.is_none()
        && !state.login_username.is_empty()
        && !state.login_password.is_empty();
    let mut submit = Button::new(
        Text::new(if loading { "Logging in..." } else { "Login" }).size(15),
    )
    .style(iced::theme::Button::Primary)
    .padding([12, 16])
    .width(Length::Fill);
    if submit_enabled {
        submit = submit.on_press(Message::SubmitLogin);
    }

    let links = Row::new()
        .spacing(8)
        .push(
            Button::new(Text::new("Don't have an account? Register").size(13))
                .on_press(Message::OpenRegister)
                .style(iced::theme::Button::Text),
        )
        .push(Space::new(Length::Fill, Length::Fixed(0.0)))
        .push(
            Button::new(Text::new("Forgot password?").size(13))
                .on_press(Message::OpenResetRequest)
                .style(iced::theme::Button::Text),
        );

    let card = Container::new(
        Column::new()
            .spacing(16)
            .push(Text::new("Login").font(BOLD_FONT).size(24).style(TEXT_PRIMARY))
            .push(lock_banner)
            .push(
                Column::new()
                    .spacing(6)
                    .push(Text::new("Username").size(13).style(TEXT_SECONDARY))
                    .push(username_input),
            )
            .push(
                Column::new()
                    .spacing(6)
                    .push(Text::new("Password").size(13).style(TEXT_SECONDARY))
                    .push(password_input),
            )
            .push(show_toggle)
            .push(submit)
            .push(links),
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
