use iced::widget::{Button, Column, Container, Row, Scrollable, Space, Text};
use iced::{Color, Element, Font, Length};

use crate::client::gui::views::logger::logger_view;
use crate::client::gui::widgets::confirm::confirm_bar;
use crate::client::gui::widgets::nav;
use crate::client::models::app_state::LnfAppState;
use crate::client::models::messages::Message;
use crate::client::services::api_client::AdminResource;

const BG_MAIN: Color = Color::from_rgb(0.06, 0.07, 0.13);
const ROW_BG: Color = Color::from_rgb(0.11, 0.13, 0.20);
const TEXT_PRIMARY: Color = Color::WHITE;
const TEXT_SECONDARY: Color = Color::from_rgb(0.7, 0.7, 0.7);
const ACCENT: Color = Color::from_rgb(0.98, 0.75, 0.14);

const BOLD_FONT: Font = Font {
    family: iced::font::Family::SansSerif,
    weight: iced::font::Weight::Bold,
    ..Font::DEFAULT
};

const ALL_TABS: [AdminResource; 4] = [
    AdminResource::Users,
    AdminResource::Items,
    AdminResource::Reports,
    AdminResource::Logs,
];

fn row_appearance(_: &iced::Theme) -> iced::widget::container::Appearance {
    iced::widget::container::Appearance {
        background: Some(iced::Background::Color(ROW_BG)),
        text_color: Some(TEXT_PRIMARY),
        border: iced::Border {
            radius: 8.0.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn view(state: &LnfAppState) -> Element<'_, Message> {
    let mut tabs = Row::new().spacing(8);
    for tab in ALL_TABS {
        let style = if state.admin_tab == tab {
            iced::theme::Button::Primary
        } else {
            iced::theme::Button::Secondary
        };
        tabs = tabs.push(
            Button::new(Text::new(tab.label()).size(14))
                .on_press(Message::AdminTabSelected(tab))
                .style(style)
                .padding([8, 14]),
        );
    }

    let delete_gate: Element<Message> = match state.admin_pending_delete {
        Some((resource, _)) => confirm_bar(
            match resource {
                AdminResource::Users => "Delete this user and everything they posted?",
                AdminResource::Items => "Delete this item?",
                AdminResource::Reports => "Delete this message?",
                AdminResource::Logs => "Delete this log entry?",
            },
            Message::AdminDeleteConfirmed,
            Message::AdminDeleteCancelled,
        ),
        None => Space::new(Length::Fill, Length::Fixed(0.0)).into(),
    };

    let body: Element<Message> = if state.admin_loading {
        Container::new(Text::new("Loading...").size(14).style(TEXT_SECONDARY))
            .padding(20)
            .into()
    } else {
        match state.admin_tab {
            AdminResource::Users => users_table(state),
            AdminResource::Items => items_table(state),
            AdminResource::Reports => reports_table(state),
            AdminResource::Logs => logs_table(state),
        }
    };

    let content = Column::new()
        .push(nav::view(state))
        .push(logger_view(&state.logger))
        .push(
            Container::new(
                Column::new()
                    .spacing(12)
                    .push(
                        Text::new("Admin dashboard")
                            .font(BOLD_FONT)
                            .size(24)
                            .style(ACCENT),
                    )
                    .push(tabs)
                    .push(delete_gate),
            )
            .padding([16, 16, 0, 16]),
        )
        .push(
            Scrollable::new(Container::new(body).padding([8, 16]))
                .width(Length::Fill)
                .height(Length::Fill),
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

fn users_table(state: &LnfAppState) -> Element<'_, Message> {
    let mut col = Column::new().spacing(8);
    if state.admin_users.is_empty() {
        col = col.push(Text::new("No users").size(14).style(TEXT_SECONDARY));
    }
    for user in &state.admin_users {
        let is_admin = user.role == "admin";
        let role_action = if is_admin {
            Button::new(Text::new("Remove admin").size(12))
                .on_press(Message::AdminSetRole {
                    user_id: user.id,
                    make_admin: false,
                })
                .style(iced::theme::Button::Secondary)
                .padding([6, 10])
        } else {
            Button::new(Text::new("Make admin").size(12))
                .on_press(Message::AdminSetRole {
                    user_id: user.id,
                    make_admin: true,
                })
                .style(iced::theme::Button::Secondary)
                .padding([6, 10])
        };
        col = col.push(
            Container::new(
                Row::new()
                    .spacing(12)
                    .align_items(iced::Alignment::Center)
                    .push(Text::new(format!("#{}", user.id)).size(13).style(TEXT_SECONDARY))
                    .push(
                        Text::new(user.username.as_str())
                            .font(BOLD_FONT)
                            .size(14)
                            .style(TEXT_PRIMARY),
                    )
                    .push(
                        Text::new(user.role.as_str())
                            .size(12)
                            .style(if is_admin { ACCENT } else { TEXT_SECONDARY }),
                    )
                    .push(Space::new(Length::Fill, Length::Fixed(0.0)))
                    .push(role_action)
                    .push(delete_button(AdminResource::Users, user.id)),
            )
            .padding(10)
            .width(Length::Fill)
            .style(iced::theme::Container::Custom(Box::new(row_appearance))),
        );
    }
    col.into()
}

fn items_table(state: &LnfAppState) -> Element<'_, Message> {
    let mut col = Column::new().spacing(8);
    if state.admin_items.is_empty() {
        col = col.push(Text::new("No items").size(14).style(TEXT_SECONDARY));
    }
    for item in &state.admin_items {
        col = col.push(
            Container::new(
                Row::new()
                    .spacing(12)
                    .align_items(iced::Alignment::Center)
                    .push(Text::new(format!("#{}", item.id)).size(13).style(TEXT_SECONDARY))
                    .push(
                        Text::new(item.title.as_str())
                            .font(BOLD_FONT)
                            .size(14)
                            .style(TEXT_PRIMARY),
                    )
                    .push(
                        Text::new(format!("{} / {}", item.kind, item.category))
                            .size(12)
                            .style(TEXT_SECONDARY),
                    )
                    .push(Space::new(Length::Fill, Length::Fixed(0.0)))
                    .push(delete_button(AdminResource::Items, item.id)),
            )
            .padding(10)
            .width(Length::Fill)
            .style(iced::theme::Container::Custom(Box::new(row_appearance))),
        );
    }
    col.into()
}

fn reports_table(state: &LnfAppState) -> Element<'_, Message> {
    let mut col = Column::new().spacing(8);
    if state.admin_reports.is_empty() {
        col = col.push(Text::new("No reported messages").size(14).style(TEXT_SECONDARY));
    }
    for report in &state.admin_reports {
        col = col.push(
            Container::new(
                Row::new()
                    .spacing(12)
                    .align_items(iced::Alignment::Center)
                    .push(
                        Text::new(format!("#{}", report.id))
                            .size(13)
                            .style(TEXT_SECONDARY),
                    )
                    .push(Text::new(report.message.as_str()).size(14).style(TEXT_PRIMARY))
                    .push(
                        Text::new(format!("chat {}", report.chat_id))
                            .size(12)
                            .style(TEXT_SECONDARY),
                    )
                    .push(Space::new(Length::Fill, Length::Fixed(0.0)))
                    .push(delete_button(AdminResource::Reports, report.id)),
            )
            .padding(10)
            .width(Length::Fill)
            .style(iced::theme::Container::Custom(Box::new(row_appearance))),
        );
    }
    col.into()
}

fn logs_table(state: &LnfAppState) -> Element<'_, Message> {
    let mut col = Column::new().spacing(8);
    if state.admin_logs.is_empty() {
        col = col.push(Text::new("No admin actions yet").size(14).style(TEXT_SECONDARY));
    }
    for log in &state.admin_logs {
        col = col.push(
            Container::new(
                Row::new()
                    .spacing(12)
                    .push(
                        Text::new(log.admin_username.as_str())
                            .font(BOLD_FONT)
                            .size(13)
                            .style(TEXT_PRIMARY),
                    )
                    .push(Text::new(log.action.as_str()).size(13).style(TEXT_PRIMARY))
                    .push(Space::new(Length::Fill, Length::Fixed(0.0)))
                    .push(Text::new(log.timestamp.as_str()).size(12).style(TEXT_SECONDARY)),
            )
            .padding(10)
            .width(Length::Fill)
            .style(iced::theme::Container::Custom(Box::new(row_appearance))),
        );
    }
    col.into()
}

fn delete_button<'a>(resource: AdminResource, id: i64) -> Button<'a, Message> {
    Button::new(Text::new("Delete").size(12))
        .on_press(Message::AdminDeleteRequested { resource, id })
        .style(iced::theme::Button::Destructive)
        .padding([6, 10])
}
