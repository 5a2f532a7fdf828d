use iced::widget::{Button, Column, Container, Image, Row, Scrollable, Space, Text};
use iced::{Color, Element, Font, Length};

use crate::client::gui::views::logger::logger_view;
use crate::client::gui::widgets::nav;
use crate::client::models::app_state::LnfAppState;
use crate::client::models::item::ItemKind;
use crate::client::models::messages::Message;
use crate::client::services::api_client::ItemRecord;
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

/// Browsable list of reported items; one view serves both the lost and
/// the found page.
pub fn view(state: &LnfAppState, kind: ItemKind) -> Element<'_, Message> {
    let (title, items) = match kind {
        ItemKind::Lost => ("Reported lost items", &state.lost_items),
        ItemKind::Found => ("Reported found items", &state.found_items),
    };

    let mut list = Column::new().spacing(10).padding([12, 16]);
    if state.items_loading {
        list = list.push(Text::new("Loading items...").size(14).style(TEXT_SECONDARY));
    } else if items.is_empty() {
        list = list.push(
            Text::new("Nothing reported yet.")
                .size(14)
                .style(TEXT_SECONDARY),
        );
    } else {
        for item in items {
            list = list.push(item_card(state, item));
        }
    }

    let content = Column::new()
        .push(nav::view(state))
        .push(logger_view(&state.logger))
        .push(
            Container::new(Text::new(title).font(BOLD_FONT).size(22).style(TEXT_PRIMARY))
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

fn item_card<'a>(state: &'a LnfAppState, item: &'a ItemRecord) -> Element<'a, Message> {
    let picture: Element<Message> = match item
        .image_data
        .as_deref()
        .and_then(media::image_handle)
    {
        Some(handle) => Image::new(handle)
            .width(Length::Fixed(96.0))
            .height(Length::Fixed(96.0))
            .into(),
        None => Text::new("📦").size(40).into(),
    };

    let mut info = Column::new()
        .spacing(4)
        .push(
            Text::new(item.title.as_str())
                .font(BOLD_FONT)
                .size(16)
                .style(TEXT_PRIMARY),
        )
        .push(
            Text::new(format!("Category: {}", item.category))
                .size(13)
                .style(TEXT_SECONDARY),
        );
    if let Some(username) = &item.username {
        info = info.push(
            Text::new(format!("Reported by: {}", username))
                .size(13)
                .style(TEXT_SECONDARY),
        );
    }

    let mut row = Row::new()
        .spacing(16)
        .align_items(iced::Alignment::Center)
        .push(picture)
        .push(info)
        .push(Space::new(Length::Fill, Length::Fixed(0.0)));

    // Contacting the reporter opens (or reuses) the chat bound to this
    // item. Hidden for guests and for the reporter's own cards.
    let my_id = state.current_user.as_ref().map(|u| u.id);
    if let (Some(owner_id), Some(owner_name)) = (item.user_id, item.username.clone()) {
        if state.current_user.is_some() && my_id != Some(owner_id) {
            row = row.push(
                Button::new(Text::new("Contact").size(13))
                    .on_press(Message::ContactOwner {
                        owner_id,
                        owner_name,
                        item_id: item.id,
                    })
                    .style(iced::theme::Button::Primary)
                    .padding([6, 12]),
            );
        }
    }

    Container::new(row)
        .padding(12)
        .width(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(card_appearance)))
        .into()
}
