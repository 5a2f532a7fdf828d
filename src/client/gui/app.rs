use iced::{Application, Command, Element, Theme};

use crate::client::models::app_state::{AppState, LnfAppState};
use crate::client::models::attachment;
use crate::client::models::item::ItemKind;
use crate::client::models::lockout::{LockoutCountdown, Tick};
use crate::client::models::messages::Message;
use crate::client::models::timeline::{ImageRef, MessageId};
use crate::client::services::api_client::{AdminResource, ApiClient, ApiError, SessionUser};
use crate::client::utils::session_store;

pub struct AppFlags {
    pub api: ApiClient,
}

/// The Lost & Found desktop client.
pub struct LnfApp {
    pub state: LnfAppState,
    pub api: ApiClient,
}

impl Application for LnfApp {
    type Message = Message;
    type Theme = Theme;
    type Executor = iced::executor::Default;
    type Flags = AppFlags;

    fn new(flags: AppFlags) -> (Self, Command<Message>) {
        let app = LnfApp {
            state: LnfAppState::default(),
            api: flags.api.clone(),
        };
        // Revalidate the cached identity against the server before
        // trusting it. No cache, or a dead session, lands on the login
        // page.
        let cmd = match session_store::load_session() {
            Some(cached) => {
                log::info!("found cached session for '{}', revalidating", cached.username);
                let api = flags.api;
                Command::perform(
                    async move { api.check_session().await },
                    Message::SessionChecked,
                )
            }
            None => Command::perform(async { Message::SessionMissing }, |m| m),
        };
        (app, cmd)
    }

    fn title(&self) -> String {
        "Lost & Found".to_string()
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            // ---- session lifecycle -------------------------------------
            Message::SessionChecked(Ok(user)) => {
                log::info!("session valid for '{}'", user.username);
                self.enter_signed_in(user, false)
            }
            Message::SessionChecked(Err(e)) => {
                log::info!("cached session rejected: {}", e);
                let _ = session_store::clear_session();
                self.state.app_state = AppState::Login;
                Command::none()
            }
            Message::Logout => {
                let _ = session_store::clear_session();
                let api = self.api.clone();
                Command::perform(
                    async move {
                        if let Err(e) = api.logout().await {
                            log::warn!("logout call failed: {}", e);
                        }
                        Message::LogoutCompleted
                    },
                    |m| m,
                )
            }
            Message::LogoutCompleted => {
                self.state.reset_to_login();
                Command::none()
            }

            // ---- navigation --------------------------------------------
            Message::OpenLogin => {
                self.state.logger.clear();
                self.state.app_state = AppState::Login;
                Command::none()
            }
            Message::OpenRegister => {
                self.state.logger.clear();
                self.state.app_state = AppState::Register;
                Command::none()
            }
            Message::OpenResetRequest => {
                self.state.logger.clear();
                self.state.app_state = AppState::ResetRequest;
                Command::none()
            }
            Message::OpenUpload => {
                self.state.app_state = AppState::Upload;
                Command::none()
            }
            Message::OpenLostItems => {
                self.state.app_state = AppState::LostItems;
                self.fetch_items(ItemKind::Lost)
            }
            Message::OpenFoundItems => {
                self.state.app_state = AppState::FoundItems;
                self.fetch_items(ItemKind::Found)
            }
            Message::OpenChatList => match self.state.current_user.clone() {
                Some(user) => {
                    self.state.app_state = AppState::ChatList;
                    self.state.chats_loading = true;
                    let api = self.api.clone();
                    Command::perform(
                        async move { api.fetch_chats(user.id).await },
                        Message::ChatsLoaded,
                    )
                }
                None => {
                    self.state.app_state = AppState::Login;
                    Command::none()
                }
            },
            Message::OpenChat { chat_id, partner } => self.open_chat(chat_id, partner),
            Message::OpenAdmin => {
                let is_admin = self
                    .state
                    .current_user
                    .as_ref()
                    .is_some_and(SessionUser::is_admin);
                if is_admin {
                    self.state.app_state = AppState::Admin;
                    self.load_admin_tab(self.state.admin_tab)
                } else {
                    self.state.log_error("Access denied: admin only");
                    Command::none()
                }
            }

            // ---- login -------------------------------------------------
            Message::SubmitLogin => self.submit_login(),
            Message::LoginResult(Ok(user)) => {
                self.state.login_loading = false;
                self.state.lockout.disarm();
                self.state.login_password.clear();
                if let Err(e) = session_store::save_session(&user) {
                    log::warn!("could not persist session: {}", e);
                }
                self.enter_signed_in(user, true)
            }
            Message::LoginResult(Err(ApiError::Locked { detail, lock_until })) => {
                self.state.login_loading = false;
                match lock_until {
                    Some(unlock_at) => {
                        let generation = self.state.lockout.arm(unlock_at);
                        if let Some(secs) = self.state.lockout_remaining_now() {
                            self.state.log_error(format!(
                                "{} (try again in {})",
                                detail,
                                LockoutCountdown::format_remaining(secs)
                            ));
                        }
                        Self::schedule_lockout_tick(generation)
                    }
                    None => {
                        self.state.log_error(detail);
                        Command::none()
                    }
                }
            }
            Message::LoginResult(Err(e)) => {
                self.state.login_loading = false;
                self.state.lockout.disarm();
                self.state.log_error(e.to_string());
                Command::none()
            }
            Message::LockoutTick { generation } => {
                match self.state.lockout.tick(generation, chrono::Utc::now()) {
                    // A superseded loop dies here; only the newest arming
                    // keeps a tick chain alive.
                    Tick::Stale => Command::none(),
                    Tick::Remaining(_) => Self::schedule_lockout_tick(generation),
                    Tick::Expired => {
                        self.state.logger.clear();
                        self.state
                            .log_info("The lockout has expired, you can try again");
                        Command::none()
                    }
                }
            }

            // ---- register ----------------------------------------------
            Message::SubmitRegister => {
                if self.state.reg_username.is_empty()
                    || self.state.reg_email.is_empty()
                    || self.state.reg_password.is_empty()
                {
                    self.state.log_error("All fields are required");
                    return Command::none();
                }
                self.state.reg_loading = true;
                let api = self.api.clone();
                let username = self.state.reg_username.clone();
                let email = self.state.reg_email.clone();
                let password = self.state.reg_password.clone();
                Command::perform(
                    async move { api.register(&username, &email, &password).await },
                    Message::RegisterResult,
                )
            }
            Message::RegisterResult(Ok(user)) => {
                self.state.reg_loading = false;
                self.state.login_username = user.username.clone();
                self.state
                    .log_success(format!("Registered as {}, please log in", user.username));
                self.state.app_state = AppState::Login;
                Command::none()
            }
            Message::RegisterResult(Err(e)) => {
                self.state.reg_loading = false;
                self.state.log_error(e.to_string());
                Command::none()
            }

            // ---- item upload -------------------------------------------
            Message::UploadAttachImage => {
                let path = self.state.upload_image_path.trim().to_string();
                if path.is_empty() {
                    self.state.log_error("Enter the path of an image first");
                    return Command::none();
                }
                Command::perform(
                    async move { attachment::load(std::path::Path::new(&path)).await },
                    Message::UploadAttachmentLoaded,
                )
            }
            Message::SubmitUpload => self.submit_upload(),
            Message::UploadResult(Ok(item)) => {
                self.state.upload_loading = false;
                self.state.log_success(format!("Uploaded '{}'", item.title));
                self.state.uploaded_item = Some(item);
                self.state.upload_description.clear();
                self.state.upload_image_path.clear();
                self.state.upload_attachment = None;
                Command::none()
            }
            Message::UploadResult(Err(e)) => {
                self.state.upload_loading = false;
                self.state.log_error(e.to_string());
                Command::none()
            }

            // ---- lost/found browsing -----------------------------------
            Message::ItemsLoaded { kind, result } => {
                self.state.items_loading = false;
                match result {
                    Ok(items) => match kind {
                        ItemKind::Lost => self.state.lost_items = items,
                        ItemKind::Found => self.state.found_items = items,
                    },
                    Err(e) => self.state.log_error(e.to_string()),
                }
                Command::none()
            }
            Message::ContactOwner {
                owner_id,
                owner_name,
                item_id,
            } => match self.state.current_user.clone() {
                Some(user) if user.id != owner_id => {
                    log::info!("opening chat with '{}' about item {}", owner_name, item_id);
                    let api = self.api.clone();
                    Command::perform(
                        async move {
                            api.get_or_create_chat(user.id, owner_id, Some(item_id))
                                .await
                        },
                        Message::ChatReady,
                    )
                }
                Some(_) => {
                    self.state.log_info("This is your own report");
                    Command::none()
                }
                None => {
                    self.state.log_warning("Log in to contact the reporter");
                    self.state.app_state = AppState::Login;
                    Command::none()
                }
            },
            Message::ChatReady(Ok(chat)) => {
                let my_id = self.state.current_user.as_ref().map_or(0, |u| u.id);
                let (_, partner) = chat.partner(my_id);
                self.open_chat(chat.chat_id, partner)
            }
            Message::ChatReady(Err(e)) => {
                self.state.log_error(e.to_string());
                Command::none()
            }

            // ---- chat list ---------------------------------------------
            Message::ChatsLoaded(result) => {
                self.state.chats_loading = false;
                match result {
                    Ok(chats) => self.state.chats = chats,
                    Err(e) => self.state.log_error(e.to_string()),
                }
                Command::none()
            }

            // ---- chat room ---------------------------------------------
            Message::ChatMessagesLoaded { chat_id, result } => {
                // Ignore late responses for a room we already left.
                let current = matches!(
                    &self.state.app_state,
                    AppState::ChatRoom { chat_id: open, .. } if *open == chat_id
                );
                if !current {
                    return Command::none();
                }
                self.state.messages_loading = false;
                match result {
                    Ok(records) => {
                        let messages = records
                            .into_iter()
                            .map(|r| self.state.to_chat_message(r))
                            .collect();
                        self.state.timeline.replace_all(messages);
                    }
                    Err(e) => self.state.log_error(e.to_string()),
                }
                Command::none()
            }
            Message::ChatAttachImage => {
                let path = self.state.chat_image_path.trim().to_string();
                if path.is_empty() {
                    self.state.log_error("Enter the path of an image first");
                    return Command::none();
                }
                Command::perform(
                    async move { attachment::load(std::path::Path::new(&path)).await },
                    Message::ChatAttachmentLoaded,
                )
            }
            Message::SendChatMessage => self.send_chat_message(),
            Message::MessageSendResult { temp_id, result } => {
                match result {
                    Ok(record) => {
                        let confirmed = self.state.to_chat_message(record);
                        if !self.state.timeline.resolve(&temp_id, confirmed) {
                            log::debug!("send settled after the room was reloaded");
                        }
                    }
                    Err(e) => {
                        // Roll the optimistic entry back. The content is
                        // not restored: a failed send is retried by
                        // re-entering it.
                        self.state.timeline.reject(&temp_id);
                        self.state.log_error(format!("Message not sent: {}", e));
                    }
                }
                Command::none()
            }
            Message::ConfirmDeleteMessage => match self.state.pending_delete.take() {
                Some(id) => {
                    let MessageId::Server(message_id) = id else {
                        return Command::none();
                    };
                    let api = self.api.clone();
                    Command::perform(
                        async move { api.delete_message(message_id).await },
                        move |result| Message::MessageDeleteResult {
                            id: MessageId::Server(message_id),
                            result,
                        },
                    )
                }
                None => Command::none(),
            },
            Message::MessageDeleteResult { id, result } => {
                match result {
                    Ok(()) => {
                        self.state.timeline.remove(&id);
                    }
                    Err(e) => self.state.log_error(format!("Delete failed: {}", e)),
                }
                Command::none()
            }

            // ---- admin dashboard ---------------------------------------
            Message::AdminTabSelected(resource) => {
                self.state.admin_tab = resource;
                self.load_admin_tab(resource)
            }
            Message::AdminUsersLoaded(result) => {
                self.state.admin_loading = false;
                match result {
                    Ok(users) => self.state.admin_users = users,
                    Err(e) => self.state.log_error(e.to_string()),
                }
                Command::none()
            }
            Message::AdminItemsLoaded(result) => {
                self.state.admin_loading = false;
                match result {
                    Ok(items) => self.state.admin_items = items,
                    Err(e) => self.state.log_error(e.to_string()),
                }
                Command::none()
            }
            Message::AdminReportsLoaded(result) => {
                self.state.admin_loading = false;
                match result {
                    Ok(reports) => self.state.admin_reports = reports,
                    Err(e) => self.state.log_error(e.to_string()),
                }
                Command::none()
            }
            Message::AdminLogsLoaded(result) => {
                self.state.admin_loading = false;
                match result {
                    Ok(logs) => self.state.admin_logs = logs,
                    Err(e) => self.state.log_error(e.to_string()),
                }
                Command::none()
            }
            Message::AdminDeleteConfirmed => match self.state.admin_pending_delete.take() {
                Some((resource, id)) => {
                    let api = self.api.clone();
                    Command::perform(
                        async move { api.admin_delete(resource, id).await },
                        move |result| Message::AdminDeleteResult {
                            resource,
                            id,
                            result,
                        },
                    )
                }
                None => Command::none(),
            },
            Message::AdminDeleteResult {
                resource,
                id,
                result,
            } => {
                match result {
                    Ok(()) => {
                        match resource {
                            AdminResource::Users => {
                                self.state.admin_users.retain(|u| u.id != id);
                            }
                            AdminResource::Items => {
                                self.state.admin_items.retain(|i| i.id != id);
                            }
                            AdminResource::Reports => {
                                self.state.admin_reports.retain(|m| m.id != id);
                            }
                            AdminResource::Logs => {}
                        }
                        self.state
                            .log_success(format!("Deleted {} #{}", resource.path(), id));
                    }
                    Err(e) => self.state.log_error(e.to_string()),
                }
                Command::none()
            }
            Message::AdminSetRole {
                user_id,
                make_admin,
            } => {
                let api = self.api.clone();
                Command::perform(
                    async move { api.admin_set_role(user_id, make_admin).await },
                    move |result| Message::AdminSetRoleResult {
                        user_id,
                        make_admin,
                        result,
                    },
                )
            }
            Message::AdminSetRoleResult {
                user_id,
                make_admin,
                result,
            } => {
                match result {
                    Ok(()) => {
                        if let Some(user) =
                            self.state.admin_users.iter_mut().find(|u| u.id == user_id)
                        {
                            let role = if make_admin { "admin" } else { "user" };
                            user.role = role.to_string();
                        }
                    }
                    Err(e) => self.state.log_error(e.to_string()),
                }
                Command::none()
            }

            // ---- password reset ----------------------------------------
            Message::SubmitResetRequest => {
                if self.state.reset_username.is_empty() || self.state.reset_email.is_empty() {
                    self.state.log_error("Username and email are required");
                    return Command::none();
                }
                self.state.reset_loading = true;
                let api = self.api.clone();
                let username = self.state.reset_username.clone();
                let email = self.state.reset_email.clone();
                Command::perform(
                    async move { api.request_reset(&username, &email).await },
                    Message::ResetRequestResult,
                )
            }
            Message::ResetRequestResult(result) => {
                self.state.reset_loading = false;
                match result {
                    Ok(()) => {
                        self.state.log_success("OTP has been sent to your email");
                        self.state.app_state = AppState::ResetOtp;
                    }
                    Err(e) => self.state.log_error(e.to_string()),
                }
                Command::none()
            }
            Message::SubmitResetOtp => {
                if self.state.reset_otp.trim().is_empty() {
                    self.state.log_error("Enter the OTP from your email");
                    return Command::none();
                }
                self.state.reset_loading = true;
                let api = self.api.clone();
                let email = self.state.reset_email.clone();
                let otp = self.state.reset_otp.trim().to_string();
                Command::perform(
                    async move { api.verify_reset_otp(&email, &otp).await },
                    Message::ResetOtpResult,
                )
            }
            Message::ResetOtpResult(result) => {
                self.state.reset_loading = false;
                match result {
                    Ok(()) => {
                        self.state.log_success("OTP verified");
                        self.state.app_state = AppState::ResetPassword;
                    }
                    Err(e) => self.state.log_error(e.to_string()),
                }
                Command::none()
            }
            Message::SubmitNewPassword => {
                if self.state.reset_new_password != self.state.reset_confirm_password {
                    self.state.log_error("Passwords do not match");
                    return Command::none();
                }
                if !is_strong_password(&self.state.reset_new_password) {
                    self.state.log_error(
                        "Password must be at least 8 characters and include uppercase, \
                         lowercase, number and special character",
                    );
                    return Command::none();
                }
                self.state.reset_loading = true;
                let api = self.api.clone();
                let email = self.state.reset_email.clone();
                let password = self.state.reset_new_password.clone();
                Command::perform(
                    async move { api.update_password(&email, &password).await },
                    Message::PasswordUpdateResult,
                )
            }
            Message::PasswordUpdateResult(result) => {
                self.state.reset_loading = false;
                match result {
                    Ok(()) => {
                        self.state
                            .log_success("Password changed successfully, please log in");
                        self.state.app_state = AppState::Login;
                    }
                    Err(e) => self.state.log_error(e.to_string()),
                }
                Command::none()
            }

            // Everything else only touches local state.
            other => self.state.update(other),
        }
    }

    fn view(&self) -> Element<Message> {
        use crate::client::gui::views;
        match &self.state.app_state {
            AppState::CheckingSession => iced::widget::Text::new("Checking session...").into(),
            AppState::Login => views::login::view(&self.state),
            AppState::Register => views::register::view(&self.state),
            AppState::Upload => views::upload::view(&self.state),
            AppState::LostItems => views::items::view(&self.state, ItemKind::Lost),
            AppState::FoundItems => views::items::view(&self.state, ItemKind::Found),
            AppState::ChatList => views::chat_list::view(&self.state),
            AppState::ChatRoom { chat_id, partner } => {
                views::chat::view(&self.state, *chat_id, partner)
            }
            AppState::Admin => views::admin::view(&self.state),
            AppState::ResetRequest => views::reset_request::view(&self.state),
            AppState::ResetOtp => views::reset_otp::view(&self.state),
            AppState::ResetPassword => views::reset_password::view(&self.state),
        }
    }
}

impl LnfApp {
    /// Post-authentication landing: admins go to the dashboard, everyone
    /// else to the upload page.
    fn enter_signed_in(&mut self, user: SessionUser, announce: bool) -> Command<Message> {
        if announce {
            self.state.log_success(format!("Welcome {}!", user.username));
        }
        let is_admin = user.is_admin();
        self.state.current_user = Some(user);
        if is_admin {
            self.state.app_state = AppState::Admin;
            self.load_admin_tab(self.state.admin_tab)
        } else {
            self.state.app_state = AppState::Upload;
            Command::none()
        }
    }

    fn submit_login(&mut self) -> Command<Message> {
        // Locked submissions (button or keyboard) are short-circuited
        // client side with the current remaining time; the server stays
        // the real enforcer.
        if let Some(secs) = self.state.lockout_remaining_now() {
            self.state.log_warning(format!(
                "Account locked, try again in {}",
                LockoutCountdown::format_remaining(secs)
            ));
            return Command::none();
        }
        if self.state.login_username.is_empty() || self.state.login_password.is_empty() {
            return Command::none();
        }
        self.state.logger.clear();
        self.state.login_loading = true;
        let api = self.api.clone();
        let username = self.state.login_username.clone();
        let password = self.state.login_password.clone();
        Command::perform(
            async move { api.login(&username, &password).await },
            Message::LoginResult,
        )
    }

    fn submit_upload(&mut self) -> Command<Message> {
        let description = self.state.upload_description.trim().to_string();
        let (Some(category), Some(kind), Some(att)) = (
            self.state.upload_category,
            self.state.upload_kind,
            self.state.upload_attachment.clone(),
        ) else {
            self.state
                .log_error("Pick a category, a report type and an image");
            return Command::none();
        };
        if description.is_empty() {
            self.state.log_error("Describe the item first");
            return Command::none();
        }
        self.state.upload_loading = true;
        let api = self.api.clone();
        Command::perform(
            async move {
                api.upload_item(&description, kind.as_str(), category.as_str(), att)
                    .await
            },
            Message::UploadResult,
        )
    }

    fn open_chat(&mut self, chat_id: i64, partner: String) -> Command<Message> {
        self.state.app_state = AppState::ChatRoom { chat_id, partner };
        self.state.timeline.replace_all(Vec::new());
        self.state.message_input.clear();
        self.state.chat_attachment = None;
        self.state.chat_image_path.clear();
        self.state.pending_delete = None;
        self.state.messages_loading = true;
        let api = self.api.clone();
        Command::perform(
            async move {
                let result = api.fetch_messages(chat_id).await;
                Message::ChatMessagesLoaded { chat_id, result }
            },
            |m| m,
        )
    }

    /// Optimistic send: the pending entry is appended before the upload
    /// request is even built, and reconciled by its temp token when the
    /// round-trip settles.
    fn send_chat_message(&mut self) -> Command<Message> {
        let chat_id = match &self.state.app_state {
            AppState::ChatRoom { chat_id, .. } => *chat_id,
            _ => return Command::none(),
        };
        let Some(user) = self.state.current_user.clone() else {
            return Command::none();
        };
        let text = self.state.message_input.trim().to_string();
        let attachment = self.state.chat_attachment.take();
        if text.is_empty() && attachment.is_none() {
            return Command::none();
        }
        let preview = attachment.as_ref().map(|a| ImageRef::Pending {
            filename: a.filename.clone(),
        });
        let temp_id = self.state.timeline.push_pending(
            chat_id,
            user.id,
            &user.username,
            &text,
            preview,
            chrono::Utc::now(),
        );
        self.state.message_input.clear();
        self.state.chat_image_path.clear();

        let api = self.api.clone();
        Command::perform(
            async move { api.send_message(chat_id, &text, attachment).await },
            move |result| Message::MessageSendResult {
                temp_id: temp_id.clone(),
                result,
            },
        )
    }

    fn fetch_items(&mut self, kind: ItemKind) -> Command<Message> {
        self.state.items_loading = true;
        let api = self.api.clone();
        Command::perform(
            async move {
                let result = match kind {
                    ItemKind::Lost => api.lost_items().await,
                    ItemKind::Found => api.found_items().await,
                };
                Message::ItemsLoaded { kind, result }
            },
            |m| m,
        )
    }

    fn load_admin_tab(&mut self, resource: AdminResource) -> Command<Message> {
        self.state.admin_loading = true;
        let api = self.api.clone();
        match resource {
            AdminResource::Users => Command::perform(
                async move { api.admin_users().await },
                Message::AdminUsersLoaded,
            ),
            AdminResource::Items => Command::perform(
                async move { api.admin_items().await },
                Message::AdminItemsLoaded,
            ),
            AdminResource::Reports => Command::perform(
                async move { api.admin_reports().await },
                Message::AdminReportsLoaded,
            ),
            AdminResource::Logs => Command::perform(
                async move { api.admin_logs().await },
                Message::AdminLogsLoaded,
            ),
        }
    }

    /// One-second re-arm of the countdown loop. Ticks carry their
    /// generation so a superseded loop cannot outlive its lockout.
    fn schedule_lockout_tick(generation: u64) -> Command<Message> {
        Command::perform(
            async move {
                tokio::time::sleep(std::time::Duration::from_secs(1)).await;
                Message::LockoutTick { generation }
            },
            |m| m,
        )
    }
}

/// The reset flow's strength rule: at least 8 characters with uppercase,
/// lowercase, digit and a symbol.
fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_strength_rule_matches_the_reset_form() {
        assert!(is_strong_password("Str0ng!pass"));
        assert!(!is_strong_password("short1!"));
        assert!(!is_strong_password("alllowercase1!"));
        assert!(!is_strong_password("NoDigits!!"));
        assert!(!is_strong_password("NoSymbols123"));
    }
}
