use crate::client::models::attachment::{Attachment, AttachmentError};
use crate::client::models::item::{Category, ItemKind};
use crate::client::models::timeline::MessageId;
use crate::client::services::api_client::{
    AdminLogRecord, AdminResource, AdminUserRecord, ApiError, ChatSummary, ItemRecord,
    MessageRecord, SessionUser,
};

#[derive(Debug, Clone)]
pub enum Message {
    NoOp,

    // Session lifecycle
    SessionChecked(Result<SessionUser, ApiError>),
    SessionMissing,
    Logout,
    LogoutCompleted,

    // Navigation
    OpenLogin,
    OpenRegister,
    OpenUpload,
    OpenLostItems,
    OpenFoundItems,
    OpenChatList,
    OpenChat { chat_id: i64, partner: String },
    OpenAdmin,
    OpenResetRequest,

    // Login
    LoginUsernameChanged(String),
    LoginPasswordChanged(String),
    ToggleShowPassword,
    SubmitLogin,
    LoginResult(Result<SessionUser, ApiError>),
    LockoutTick { generation: u64 },

    // Register
    RegisterUsernameChanged(String),
    RegisterEmailChanged(String),
    RegisterPasswordChanged(String),
    SubmitRegister,
    RegisterResult(Result<SessionUser, ApiError>),

    // Item upload
    UploadDescriptionChanged(String),
    UploadCategorySelected(Category),
    UploadKindSelected(ItemKind),
    UploadImagePathChanged(String),
    UploadAttachImage,
    UploadAttachmentLoaded(Result<Attachment, AttachmentError>),
    SubmitUpload,
    UploadResult(Result<ItemRecord, ApiError>),

    // Lost/found browsing
    ItemsLoaded { kind: ItemKind, result: Result<Vec<ItemRecord>, ApiError> },
    ContactOwner { owner_id: i64, owner_name: String, item_id: i64 },
    ChatReady(Result<ChatSummary, ApiError>),

    // Chat list
    ChatsLoaded(Result<Vec<ChatSummary>, ApiError>),

    // Chat room
    ChatMessagesLoaded { chat_id: i64, result: Result<Vec<MessageRecord>, ApiError> },
    MessageInputChanged(String),
    ChatImagePathChanged(String),
    ChatAttachImage,
    ChatAttachmentLoaded(Result<Attachment, AttachmentError>),
    ClearChatAttachment,
    SendChatMessage,
    MessageSendResult { temp_id: MessageId, result: Result<MessageRecord, ApiError> },
    RequestDeleteMessage(MessageId),
    ConfirmDeleteMessage,
    CancelDeleteMessage,
    MessageDeleteResult { id: MessageId, result: Result<(), ApiError> },

    // Admin dashboard
    AdminTabSelected(AdminResource),
    AdminUsersLoaded(Result<Vec<AdminUserRecord>, ApiError>),
    AdminItemsLoaded(Result<Vec<ItemRecord>, ApiError>),
    AdminReportsLoaded(Result<Vec<MessageRecord>, ApiError>),
    AdminLogsLoaded(Result<Vec<AdminLogRecord>, ApiError>),
    AdminDeleteRequested { resource: AdminResource, id: i64 },
    AdminDeleteConfirmed,
    AdminDeleteCancelled,
    AdminDeleteResult { resource: AdminResource, id: i64, result: Result<(), ApiError> },
    AdminSetRole { user_id: i64, make_admin: bool },
    AdminSetRoleResult { user_id: i64, make_admin: bool, result: Result<(), ApiError> },

    // Password reset flow
    ResetUsernameChanged(String),
    ResetEmailChanged(String),
    SubmitResetRequest,
    ResetRequestResult(Result<(), ApiError>),
    ResetOtpChanged(String),
    SubmitResetOtp,
    ResetOtpResult(Result<(), ApiError>),
    ResetNewPasswordChanged(String),
    ResetConfirmPasswordChanged(String),
    SubmitNewPassword,
    PasswordUpdateResult(Result<(), ApiError>),

    // Logger bar
    ClearLog,
}
