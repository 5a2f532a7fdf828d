use chrono::Utc;
use iced::Command;

use crate::client::gui::views::logger::{LogLevel, LogMessage};
use crate::client::models::attachment::Attachment;
use crate::client::models::item::{Category, ItemKind};
use crate::client::models::lockout::LockoutCountdown;
use crate::client::models::messages::Message;
use crate::client::models::timeline::{ChatMessage, ChatTimeline, ImageRef, MessageId};
use crate::client::services::api_client::{
    AdminLogRecord, AdminResource, AdminUserRecord, ChatSummary, ItemRecord, MessageRecord,
    SessionUser,
};

/// Which page is on screen.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AppState {
    #[default]
    CheckingSession,
    Login,
    Register,
    Upload,
    LostItems,
    FoundItems,
    ChatList,
    ChatRoom { chat_id: i64, partner: String },
    Admin,
    ResetRequest,
    ResetOtp,
    ResetPassword,
}

/// Central mutable state of the client. Owned by the application; the
/// view functions only borrow it.
#[derive(Debug, Clone)]
pub struct LnfAppState {
    pub app_state: AppState,
    pub current_user: Option<SessionUser>,
    pub logger: Vec<LogMessage>,

    // Login page
    pub login_username: String,
    pub login_password: String,
    pub show_password: bool,
    pub login_loading: bool,
    pub lockout: LockoutCountdown,

    // Register page
    pub reg_username: String,
    pub reg_email: String,
    pub reg_password: String,
    pub reg_loading: bool,

    // Upload page
    pub upload_description: String,
    pub upload_category: Option<Category>,
    pub upload_kind: Option<ItemKind>,
    pub upload_image_path: String,
    pub upload_attachment: Option<Attachment>,
    pub upload_loading: bool,
    pub uploaded_item: Option<ItemRecord>,

    // Lost/found browsing
    pub lost_items: Vec<ItemRecord>,
    pub found_items: Vec<ItemRecord>,
    pub items_loading: bool,

    // Chat list
    pub chats: Vec<ChatSummary>,
    pub chats_loading: bool,

    // Open chat room
    pub timeline: ChatTimeline,
    pub messages_loading: bool,
    pub message_input: String,
    pub chat_image_path: String,
    pub chat_attachment: Option<Attachment>,
    pub pending_delete: Option<MessageId>,

    // Admin dashboard
    pub admin_tab: AdminResource,
    pub admin_users: Vec<AdminUserRecord>,
    pub admin_items: Vec<ItemRecord>,
    pub admin_reports: Vec<MessageRecord>,
    pub admin_logs: Vec<AdminLogRecord>,
    pub admin_loading: bool,
    pub admin_pending_delete: Option<(AdminResource, i64)>,

    // Password reset flow
    pub reset_username: String,
    pub reset_email: String,
    pub reset_otp: String,
    pub reset_new_password: String,
    pub reset_confirm_password: String,
    pub reset_loading: bool,
}

impl Default for LnfAppState {
    fn default() -> Self {
        Self {
            app_state: AppState::default(),
            current_user: None,
            logger: Vec::new(),
            login_username: String::new(),
            login_password: String::new(),
            show_password: false,
            login_loading: false,
            lockout: LockoutCountdown::new(),
            reg_username: String::new(),
            reg_email: String::new(),
            reg_password: String::new(),
            reg_loading: false,
            upload_description: String::new(),
            upload_category: None,
            upload_kind: None,
            upload_image_path: String::new(),
            upload_attachment: None,
            upload_loading: false,
            uploaded_item: None,
            lost_items: Vec::new(),
            found_items: Vec::new(),
            items_loading: false,
            chats: Vec::new(),
            chats_loading: false,
            timeline: ChatTimeline::new(),
            messages_loading: false,
            message_input: String::new(),
            chat_image_path: String::new(),
            chat_attachment: None,
            pending_delete: None,
            admin_tab: AdminResource::Users,
            admin_users: Vec::new(),
            admin_items: Vec::new(),
            admin_reports: Vec::new(),
            admin_logs: Vec::new(),
            admin_loading: false,
            admin_pending_delete: None,
            reset_username: String::new(),
            reset_email: String::new(),
            reset_otp: String::new(),
            reset_new_password: String::new(),
            reset_confirm_password: String::new(),
            reset_loading: false,
        }
    }
}

impl LnfAppState {
    pub fn log_info(&mut self, message: impl Into<String>) {
        self.logger.push(LogMessage {
            level: LogLevel::Info,
            message: message.into(),
        });
    }

    pub fn log_success(&mut self, message: impl Into<String>) {
        self.logger.push(LogMessage {
            level: LogLevel::Success,
            message: message.into(),
        });
    }

    pub fn log_error(&mut self, message: impl Into<String>) {
        self.logger.push(LogMessage {
            level: LogLevel::Error,
            message: message.into(),
        });
    }

    pub fn log_warning(&mut self, message: impl Into<String>) {
        self.logger.push(LogMessage {
            level: LogLevel::Warning,
            message: message.into(),
        });
    }

    /// Wipe everything tied to the old identity and land on the login page.
    pub fn reset_to_login(&mut self) {
        *self = LnfAppState {
            app_state: AppState::Login,
            ..LnfAppState::default()
        };
    }

    /// Convert a server message record into the local view model.
    pub fn to_chat_message(&self, record: MessageRecord) -> ChatMessage {
        let my_id = self.current_user.as_ref().map(|u| u.id);
        let is_mine = Some(record.sender_id) == my_id;
        let display_name = record.username.clone().unwrap_or_else(|| {
            if is_mine {
                self.current_user
                    .as_ref()
                    .map(|u| u.username.clone())
                    .unwrap_or_default()
            } else {
                String::new()
            }
        });
        ChatMessage {
            id: MessageId::Server(record.id),
            chat_id: record.chat_id,
            sender_id: record.sender_id,
            text: record.message,
            created_at: crate::client::services::api_client::parse_timestamp(&record.created_at)
                .unwrap_or_default(),
            display_name,
            image: record.image.map(ImageRef::Remote),
            is_mine,
        }
    }

    /// Handle the messages that only touch local state; the application
    /// handles everything that needs the API client.
    pub fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::NoOp => {}

            // Field edits
            Message::LoginUsernameChanged(v) => self.login_username = v,
            Message::LoginPasswordChanged(v) => self.login_password = v,
            Message::ToggleShowPassword => self.show_password = !self.show_password,
            Message::RegisterUsernameChanged(v) => self.reg_username = v,
            Message::RegisterEmailChanged(v) => self.reg_email = v,
            Message::RegisterPasswordChanged(v) => self.reg_password = v,
            Message::UploadDescriptionChanged(v) => self.upload_description = v,
            Message::UploadCategorySelected(c) => self.upload_category = Some(c),
            Message::UploadKindSelected(k) => self.upload_kind = Some(k),
            Message::UploadImagePathChanged(v) => self.upload_image_path = v,
            Message::MessageInputChanged(v) => self.message_input = v,
            Message::ChatImagePathChanged(v) => self.chat_image_path = v,
            Message::ResetUsernameChanged(v) => self.reset_username = v,
            Message::ResetEmailChanged(v) => self.reset_email = v,
            Message::ResetOtpChanged(v) => self.reset_otp = v,
            Message::ResetNewPasswordChanged(v) => self.reset_new_password = v,
            Message::ResetConfirmPasswordChanged(v) => self.reset_confirm_password = v,

            // Attachment results (validation ran before any network call)
            Message::UploadAttachmentLoaded(Ok(att)) => {
                self.log_success(format!("attached {}", att.filename));
                self.upload_attachment = Some(att);
            }
            Message::UploadAttachmentLoaded(Err(e)) => {
                self.upload_attachment = None;
                self.log_error(e.to_string());
            }
            Message::ChatAttachmentLoaded(Ok(att)) => {
                self.log_success(format!("attached {}", att.filename));
                self.chat_attachment = Some(att);
            }
            Message::ChatAttachmentLoaded(Err(e)) => {
                self.chat_attachment = None;
                self.log_error(e.to_string());
            }
            Message::ClearChatAttachment => {
                self.chat_attachment = None;
                self.chat_image_path.clear();
            }

            // Delete confirmation gates (the destructive call is issued by
            // the application layer only after the explicit confirm)
            Message::RequestDeleteMessage(id) => {
                let deletable = self
                    .timeline
                    .messages()
                    .iter()
                    .any(|m| m.id == id && m.is_mine && !m.id.is_temp());
                if deletable {
                    self.pending_delete = Some(id);
                }
            }
            Message::CancelDeleteMessage => self.pending_delete = None,
            Message::AdminDeleteRequested { resource, id } => {
                self.admin_pending_delete = Some((resource, id));
            }
            Message::AdminDeleteCancelled => self.admin_pending_delete = None,

            Message::SessionMissing => {
                self.app_state = AppState::Login;
            }

            Message::ClearLog => self.logger.clear(),

            // Everything else is the application layer's business.
            _ => {
                log::debug!("message not handled by state layer");
            }
        }
        Command::none()
    }

    /// Remaining lockout seconds right now, if the login page is locked.
    pub fn lockout_remaining_now(&self) -> Option<i64> {
        let secs = self.lockout.remaining_secs(Utc::now())?;
        (secs > 0).then_some(secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logged_in_state() -> LnfAppState {
        LnfAppState {
            current_user: Some(SessionUser {
                id: 42,
                username: "mario".to_string(),
                email: None,
                role: "user".to_string(),
            }),
            ..LnfAppState::default()
        }
    }

    fn record(id: i64, sender_id: i64) -> MessageRecord {
        MessageRecord {
            id,
            chat_id: 7,
            sender_id,
            message: "ciao".to_string(),
            created_at: "2026-08-06T10:00:00".to_string(),
            username: Some("mario".to_string()),
            image: None,
        }
    }

    #[test]
    fn record_conversion_sets_provenance() {
        let state = logged_in_state();
        let mine = state.to_chat_message(record(1, 42));
        assert!(mine.is_mine);
        let theirs = state.to_chat_message(record(2, 99));
        assert!(!theirs.is_mine);
    }

    #[test]
    fn delete_gate_only_arms_for_own_confirmed_messages() {
        let mut state = logged_in_state();
        let theirs = state.to_chat_message(record(1, 99));
        let mine = state.to_chat_message(record(2, 42));
        state.timeline.replace_all(vec![theirs, mine]);
        let pending =
            state
                .timeline
                .push_pending(7, 42, "mario", "in flight", None, Utc::now());

        state.update(Message::RequestDeleteMessage(MessageId::Server(1)));
        assert_eq!(state.pending_delete, None);

        state.update(Message::RequestDeleteMessage(pending.clone()));
        assert_eq!(state.pending_delete, None);

        state.update(Message::RequestDeleteMessage(MessageId::Server(2)));
        assert_eq!(state.pending_delete, Some(MessageId::Server(2)));

        state.update(Message::CancelDeleteMessage);
        assert_eq!(state.pending_delete, None);
    }
}
