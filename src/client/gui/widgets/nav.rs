use iced::widget::container::Appearance;
use iced::widget::{Button, Container, Row, Space, Text};
use iced::{Color, Element, Font, Length};

use crate::client::models::app_state::LnfAppState;
use crate::client::models::messages::Message;

const NAV_BG: Color = Color::from_rgb(0.07, 0.09, 0.15);
const ACCENT: Color = Color::from_rgb(0.98, 0.75, 0.14);

const BOLD_FONT: Font = Font {
    family: iced::font::Family::SansSerif,
    weight: iced::font::Weight::Bold,
    ..Font::DEFAULT
};

fn nav_button(label: &str, msg: Message) -> Button<'_, Message> {
    Button::new(Text::new(label).size(14))
        .on_press(msg)
        .style(iced::theme::Button::Text)
        .padding([6, 10])
}

/// Top navigation bar. The entries follow the signed-in state: guests
/// see Login/Register, users see Chats and Logout, admins also get the
/// dashboard entry.
pub fn view(state: &LnfAppState) -> Element<'_, Message> {
    let mut row = Row::new()
        .spacing(4)
        .align_items(iced::Alignment::Center)
        .push(Text::new("L&F").font(BOLD_FONT).size(18).style(ACCENT))
        .push(Space::new(Length::Fixed(10.0), Length::Fixed(0.0)))
        .push(nav_button("Report", Message::OpenUpload))
        .push(nav_button("Lost", Message::OpenLostItems))
        .push(nav_button("Found", Message::OpenFoundItems));

    match &state.current_user {
        Some(user) => {
            row = row.push(nav_button("Chats", Message::OpenChatList));
            if user.is_admin() {
                row = row.push(nav_button("Dashboard", Message::OpenAdmin));
            }
            row = row
                .push(Space::new(Length::Fill, Length::Fixed(0.0)))
                .push(
                    Text::new(user.username.as_str())
                        .size(14)
                        .style(Color::from_rgb(0.7, 0.7, 0.7)),
                )
                .push(nav_button("Logout", Message::Logout));
        }
        None => {
            row = row
                .push(Space::new(Length::Fill, Length::Fixed(0.0)))
                .push(nav_button("Login", Message::OpenLogin))
                .push(nav_button("Register", Message::OpenRegister));
        }
    }

    Container::new(row)
        .padding([8, 16])
        .width(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(
            |_: &iced::Theme| Appearance {
                background: Some(iced::Background::Color(NAV_BG)),
                text_color: Some(Color::WHITE),
                ..Default::default()
            },
        )))
        .into()
}
