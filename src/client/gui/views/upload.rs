use iced::widget::{Button, Column, Container, Image, PickList, Row, Text, TextInput};
use iced::{Color, Element, Font, Length};

use crate::client::gui::views::logger::logger_view;
use crate::client::gui::widgets::nav;
use crate::client::models::app_state::LnfAppState;
use crate::client::models::item::{Category, ItemKind};
use crate::client::models::messages::Message;
use crate::client::utils::media;

const BG_MAIN: Color = Color::from_rgb(0.06, 0.07, 0.13);
const CARD_BG: Color = Color::from_rgb(0.11, 0.13, 0.20);
const TEXT_PRIMARY: Color = Color::WHITE;
const TEXT_SECONDARY: Color = Color::from_rgb(0.7, 0.7, 0.7);
const ACCENT: Color = Color::from_rgb(0.98, 0.75, 0.14);

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

pub fn view(state: &LnfAppState) -> Element<'_, Message> {
    let category_row = Row::new()
        .spacing(8)
        .align_items(iced::Alignment::Center)
        .push(Text::new("Item type:").size(14).style(TEXT_SECONDARY))
        .push(
            PickList::new(
                Category::all(),
                state.upload_category,
                Message::UploadCategorySelected,
            )
            .placeholder("-- SELECT --")
            .width(Length::Fixed(180.0)),
        );

    let kind_row = Row::new()
        .spacing(8)
        .push(kind_button(state, ItemKind::Lost))
        .push(kind_button(state, ItemKind::Found));

    let description = TextInput::new(
        "Please describe the item...",
        &state.upload_description,
    )
    .on_input(Message::UploadDescriptionChanged)
    .padding(12)
    .size(14)
    .width(Length::Fill);

    // Attachment entry. Validation (type + 5 MiB ceiling) runs when the
    // file is attached, before anything touches the network.
    let attach_row: Element<Message> = match &state.upload_attachment {
        Some(att) => Row::new()
            .spacing(8)
            .align_items(iced::Alignment::Center)
            .push(
                Text::new(format!("📎 {} ({})", att.filename, att.content_type))
                    .size(13)
                    .style(ACCENT),
            )
            .into(),
        None => Row::new()
            .spacing(8)
            .push(
                TextInput::new("Path to a photo of the item...", &state.upload_image_path)
                    .on_input(Message::UploadImagePathChanged)
                    .on_submit(Message::UploadAttachImage)
                    .padding(10)
                    .size(13)
                    .width(Length::Fill),
            )
            .push(
                Button::new(Text::new("Attach").size(13))
                    .on_press(Message::UploadAttachImage)
                    .style(iced::theme::Button::Secondary)
                    .padding([10, 14]),
            )
            .into(),
    };

    let ready = state.upload_attachment.is_some()
        && state.upload_category.is_some()
        && state.upload_kind.is_some()
        && !state.upload_description.trim().is_empty()
        && !state.upload_loading;
    let mut submit = Button::new(
        Text::new(if state.upload_loading {
            "Uploading..."
        } else {
            "Confirm"
        })
        .size(15),
    )
    .style(iced::theme::Button::Primary)
    .padding([12, 24]);
    if ready {
        submit = submit.on_press(Message::SubmitUpload);
    }

    let mut card_body = Column::new()
        .spacing(16)
        .push(
            Text::new("Report an item")
                .font(BOLD_FONT)
                .size(24)
                .style(TEXT_PRIMARY),
        )
        .push(category_row)
        .push(description)
        .push(attach_row)
        .push(kind_row)
        .push(Container::new(submit).width(Length::Fill).center_x());

    // Echo of the record the server stored, original picture included.
    if let Some(item) = &state.uploaded_item {
        let mut echo = Column::new()
            .spacing(6)
            .push(Text::new("Upload complete").font(BOLD_FONT).size(16).style(ACCENT))
            .push(Text::new(item.title.as_str()).size(14).style(TEXT_PRIMARY))
            .push(
                Text::new(format!("{} — {}", item.kind, item.category))
                    .size(12)
                    .style(TEXT_SECONDARY),
            );
        if let Some(handle) = item.image_data.as_deref().and_then(media::image_handle) {
            echo = echo.push(Image::new(handle).width(Length::Fixed(160.0)));
        }
        card_body = card_body.push(echo);
    }

    let card = Container::new(card_body)
        .padding(28)
        .width(Length::Fixed(560.0))
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

fn kind_button(state: &LnfAppState, kind: ItemKind) -> Element<'_, Message> {
    let selected = state.upload_kind == Some(kind);
    let style = if selected {
        iced::theme::Button::Primary
    } else {
        iced::theme::Button::Secondary
    };
    Button::new(Text::new(kind.label()).size(14))
        .on_press(Message::UploadKindSelected(kind))
        .style(style)
        .padding([10, 16])
        .width(Length::Fill)
        .into()
}
