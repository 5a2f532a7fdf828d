use iced::widget::{scrollable, Button, Column, Container, Image, Row, Scrollable, Space, Text, TextInput};
use iced::{Color, Element, Font, Length};

use crate::client::gui::views::logger::logger_view;
use crate::client::gui::widgets::confirm::confirm_bar;
use crate::client::models::app_state::LnfAppState;
use crate::client::models::messages::Message;
use crate::client::models::timeline::{ChatMessage, ImageRef};
use crate::client::utils::media;

const BG_MAIN: Color = Color::from_rgb(0.06, 0.07, 0.13);
const CHAT_BG: Color = Color::from_rgb(0.08, 0.09, 0.16);
const MY_MESSAGE_BG: Color = Color::from_rgb(0.0, 0.55, 0.3);
const PENDING_MESSAGE_BG: Color = Color::from_rgb(0.0, 0.4, 0.24);
const OTHER_MESSAGE_BG: Color = Color::from_rgb(0.2, 0.35, 0.65);
const INPUT_BG: Color = Color::from_rgb(0.11, 0.13, 0.20);
const TEXT_PRIMARY: Color = Color::WHITE;
const TEXT_SECONDARY: Color = Color::from_rgb(0.7, 0.7, 0.7);

const BOLD_FONT: Font = Font {
    family: iced::font::Family::SansSerif,
    weight: iced::font::Weight::Bold,
    ..Font::DEFAULT
};

pub fn view<'a>(state: &'a LnfAppState, chat_id: i64, partner: &'a str) -> Element<'a, Message> {
    let back_btn = Button::new(Text::new("← Back").size(16))
        .on_press(Message::OpenChatList)
        .style(iced::theme::Button::Secondary)
        .padding(8);

    let header = Container::new(
        Row::new()
            .spacing(12)
            .align_items(iced::Alignment::Center)
            .push(back_btn)
            .push(
                Column::new()
                    .spacing(2)
                    .push(
                        Text::new(partner)
                            .font(BOLD_FONT)
                            .size(20)
                            .style(TEXT_PRIMARY),
                    )
                    .push(
                        Text::new(format!("Chat #{}", chat_id))
                            .size(12)
                            .style(TEXT_SECONDARY),
                    ),
            ),
    )
    .padding([12, 16])
    .width(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(
        |_: &iced::Theme| iced::widget::container::Appearance {
            background: Some(iced::Background::Color(INPUT_BG)),
            ..Default::default()
        },
    )));

    // The yes/no gate for a pending message delete.
    let delete_gate: Element<Message> = if state.pending_delete.is_some() {
        confirm_bar(
            "Delete this message?",
            Message::ConfirmDeleteMessage,
            Message::CancelDeleteMessage,
        )
    } else {
        Space::new(Length::Fill, Length::Fixed(0.0)).into()
    };

    let content = Column::new()
        .push(header)
        .push(logger_view(&state.logger))
        .push(delete_gate)
        .push(messages_area(state))
        .push(input_area(state))
        .width(Length::Fill)
        .height(Length::Fill);

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(
            |_: &iced::Theme| iced::widget::container::Appearance {
                background: Some(iced::Background::Color(BG_MAIN)),
                ..Default::default()
            },
        )))
        .into()
}

fn messages_area(state: &LnfAppState) -> Element<'_, Message> {
    let mut messages_column = Column::new().spacing(8).padding([12, 16]);

    if state.messages_loading {
        messages_column = messages_column.push(
            Container::new(Text::new("Loading messages...").size(14).style(TEXT_SECONDARY))
                .width(Length::Fill)
                .center_x()
                .padding(20),
        );
    } else if state.timeline.is_empty() {
        messages_column = messages_column.push(
            Container::new(
                Text::new("No messages yet. Start the conversation!")
                    .size(14)
                    .style(TEXT_SECONDARY),
            )
            .width(Length::Fill)
            .center_x()
            .padding(20),
        );
    } else {
        for msg in state.timeline.messages() {
            messages_column = messages_column.push(message_bubble(msg));
        }
    }

    messages_column = messages_column.push(Space::new(Length::Fixed(0.0), Length::Fixed(20.0)));

    let scrollable_messages = Scrollable::new(messages_column)
        .width(Length::Fill)
        .height(Length::Fill)
        .id(scrollable::Id::new("messages_scroll"));

    Container::new(scrollable_messages)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(
            |_: &iced::Theme| iced::widget::container::Appearance {
                background: Some(iced::Background::Color(CHAT_BG)),
                ..Default::default()
            },
        )))
        .into()
}

fn message_bubble(msg: &ChatMessage) -> Element<'_, Message> {
    let pending = msg.id.is_temp();
    let bubble_color = if pending {
        PENDING_MESSAGE_BG
    } else if msg.is_mine {
        MY_MESSAGE_BG
    } else {
        OTHER_MESSAGE_BG
    };

    let mut body = Column::new().spacing(4);
    if !msg.is_mine && !msg.display_name.is_empty() {
        body = body.push(
            Text::new(msg.display_name.as_str())
                .font(BOLD_FONT)
                .size(12)
                .style(TEXT_SECONDARY),
        );
    }
    if !msg.text.is_empty() {
        body = body.push(Text::new(msg.text.as_str()).size(14).style(TEXT_PRIMARY));
    }
    match &msg.image {
        Some(ImageRef::Remote(url)) => match media::image_handle(url) {
            Some(handle) => {
                body = body.push(Image::new(handle).width(Length::Fixed(220.0)));
            }
            None => {
                body = body.push(Text::new("[image]").size(12).style(TEXT_SECONDARY));
            }
        },
        Some(ImageRef::Pending { filename }) => {
            body = body.push(
                Text::new(format!("📎 {}", filename))
                    .size(12)
                    .style(TEXT_SECONDARY),
            );
        }
        None => {}
    }
    let footer = if pending {
        "sending...".to_string()
    } else {
        msg.created_at
            .with_timezone(&chrono::Local)
            .format("%H:%M")
            .to_string()
    };
    body = body.push(Text::new(footer).size(10).style(TEXT_SECONDARY));

    let bubble = Container::new(body)
        .padding([8, 12])
        .style(iced::theme::Container::Custom(Box::new(
            move |_: &iced::Theme| iced::widget::container::Appearance {
                background: Some(iced::Background::Color(bubble_color)),
                border: iced::Border {
                    radius: 12.0.into(),
                    ..Default::default()
                },
                ..Default::default()
            },
        )))
        .width(Length::Fixed(280.0));

    // Only own, server-confirmed messages expose the delete affordance;
    // the server remains the authority either way.
    let mut row = Row::new().spacing(6).align_items(iced::Alignment::End);
    if msg.is_mine {
        row = row.push(Space::new(Length::Fill, Length::Fixed(0.0)));
        if !pending {
            row = row.push(
                Button::new(Text::new("🗑").size(13))
                    .on_press(Message::RequestDeleteMessage(msg.id.clone()))
                    .style(iced::theme::Button::Text)
                    .padding(2),
            );
        }
        row = row.push(bubble);
    } else {
        row = row.push(bubble);
        row = row.push(Space::new(Length::Fill, Length::Fixed(0.0)));
    }

    Container::new(row).width(Length::Fill).into()
}

fn input_area(state: &LnfAppState) -> Element<'_, Message> {
    // Attachment chip: validation already ran when the file was attached.
    let attachment_row: Element<Message> = match &state.chat_attachment {
        Some(att) => Row::new()
            .spacing(8)
            .align_items(iced::Alignment::Center)
            .push(
                Text::new(format!("📎 {} ({})", att.filename, att.content_type))
                    .size(12)
                    .style(TEXT_SECONDARY),
            )
            .push(
                Button::new(Text::new("✕").size(12))
                    .on_press(Message::ClearChatAttachment)
                    .style(iced::theme::Button::Text)
                    .padding(2),
            )
            .into(),
        None => Row::new()
            .spacing(8)
            .push(
                TextInput::new("Path of an image to attach...", &state.chat_image_path)
                    .on_input(Message::ChatImagePathChanged)
                    .on_submit(Message::ChatAttachImage)
                    .padding(6)
                    .size(12)
                    .width(Length::Fill),
            )
            .push(
                Button::new(Text::new("Attach").size(12))
                    .on_press(Message::ChatAttachImage)
                    .style(iced::theme::Button::Secondary)
                    .padding([6, 10]),
            )
            .into(),
    };

    let message_input = TextInput::new("Type a message...", &state.message_input)
        .on_input(Message::MessageInputChanged)
        .on_submit(Message::SendChatMessage)
        .padding(12)
        .size(14)
        .width(Length::Fill);

    let can_send =
        !state.message_input.trim().is_empty() || state.chat_attachment.is_some();
    let mut send_button = Button::new(Text::new("Send").size(14))
        .style(iced::theme::Button::Primary)
        .padding([12, 16]);
    if can_send {
        send_button = send_button.on_press(Message::SendChatMessage);
    }

    Container::new(
        Column::new()
            .spacing(8)
            .push(attachment_row)
            .push(
                Row::new()
                    .spacing(8)
                    .align_items(iced::Alignment::Center)
                    .push(message_input)
                    .push(send_button),
            ),
    )
    .padding([12, 16])
    .width(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(
        |_: &iced::Theme| iced::widget::container::Appearance {
            background: Some(iced::Background::Color(INPUT_BG)),
            ..Default::default()
        },
    )))
    .into()
}
