use iced::widget::{Button, Column, Container, Image, Row, Scrollable, Space, Text};
use iced::{Color, Element, Font, Length};

use crate::client::gui::views::logger::logger_view;
use crate::client::gui::widgets::nav;
use crate::client::models::app_state::LnfAppState;
use crate::client::models::messages::Message;
use crate::client::utils::media;

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
            radius: 12.0.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn view(state: &LnfAppState) -> Element<'_, Message> {
    let my_id = state.current_user.as_ref().map_or(0, |u| u.id);

    let mut list = Column::new().spacing(10).padding([12, 16]);
    if state.chats_loading {
        list = list.push(Text::new("Loading chats...").size(14).style(TEXT_SECONDARY));
    } else if state.chats.is_empty() {
        list = list.push(
            Text::new("No chats yet. Contact a reporter from the item lists.")
                .size(14)
                .style(TEXT_SECONDARY),
        );
    } else {
        for chat in &state.chats {
            let (_, partner) = chat.partner(my_id);

            let thumb: Element<Message> = match chat
                .item_image
                .as_deref()
                .and_then(media::image_handle)
            {
                Some(handle) => Image::new(handle)
                    .width(Length::Fixed(48.0))
                    .height(Length::Fixed(48.0))
                    .into(),
                None => Text::new("💬").size(28).into(),
            };

            let mut info = Column::new().spacing(2).push(
                Text::new(partner.clone())
                    .font(BOLD_FONT)
                    .size(16)
                    .style(TEXT_PRIMARY),
            );
            if let Some(title) = &chat.item_title {
                info = info.push(
                    Text::new(format!("About: {}", title))
                        .size(12)
                        .style(TEXT_SECONDARY),
                );
            }

            let open = Button::new(Text::new("Open").size(13))
                .on_press(Message::OpenChat {
                    chat_id: chat.chat_id,
                    partner,
                })
                .style(iced::theme::Button::Primary)
                .padding([6, 12]);

            list = list.push(
                Container::new(
                    Row::new()
                        .spacing(12)
                        .align_items(iced::Alignment::Center)
                        .push(thumb)
                        .push(info)
                        .push(Space::new(Length::Fill, Length::Fixed(0.0)))
                        .push(open),
                )
                .padding(12)
                .width(Length::Fill)
                .style(iced::theme::Container::Custom(Box::new(card_appearance))),
            );
        }
    }

    let content = Column::new()
        .push(nav::view(state))
        .push(logger_view(&state.logger))
        .push(
            Container::new(
                Text::new("Your chats")
                    .font(BOLD_FONT)
                    .size(22)
                    .style(TEXT_PRIMARY),
            )
            .padding([16, 16, 0, 16]),
        )
        .push(Scrollable::new(list).width(Length::Fill).height(Length::Fill));

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
