use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::multipart;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::client::config::ClientConfig;
use crate::client::models::attachment::Attachment;

/// Failure taxonomy for every call against the Lost & Found API.
///
/// Any non-2xx response is a failure regardless of body shape; the
/// server's `{detail}` string is surfaced verbatim where present.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// The request never reached the server, or the connection died.
    #[error("connection failed: {0}")]
    Network(String),
    /// 401 from the auth endpoints.
    #[error("{0}")]
    InvalidCredentials(String),
    /// 403 carrying an unlock timestamp.
    #[error("{detail}")]
    Locked {
        detail: String,
        lock_until: Option<DateTime<Utc>>,
    },
    /// 403 without a lockout payload.
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    /// Any other non-2xx status.
    #[error("request failed ({code}): {detail}")]
    Status { code: u16, detail: String },
    /// 2xx with a body this client cannot parse.
    #[error("malformed response: {0}")]
    Decode(String),
}

/// The authenticated user's profile as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "user".to_string()
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// One chat message as the server records it.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageRecord {
    pub id: i64,
    pub chat_id: i64,
    pub sender_id: i64,
    #[serde(default)]
    pub message: String,
    pub created_at: String,
    #[serde(default)]
    pub username: Option<String>,
    /// Base64 `data:` URL of the attached image, when present.
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct MessagesBody {
    messages: Vec<MessageRecord>,
}

/// One entry of the user's chat list.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatSummary {
    pub chat_id: i64,
    pub user1_id: i64,
    #[serde(default)]
    pub user1_username: Option<String>,
    pub user2_id: i64,
    #[serde(default)]
    pub user2_username: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub item_image: Option<String>,
    #[serde(default)]
    pub item_title: Option<String>,
}

impl ChatSummary {
    /// The other participant, as seen by `current_user_id`.
    pub fn partner(&self, current_user_id: i64) -> (i64, String) {
        if self.user1_id == current_user_id {
            (
                self.user2_id,
                self.user2_username.clone().unwrap_or_default(),
            )
        } else {
            (
                self.user1_id,
                self.user1_username.clone().unwrap_or_default(),
            )
        }
    }
}

/// A reported lost or found item.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemRecord {
    pub id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    #[serde(default)]
    pub image_data: Option<String>,
    #[serde(default)]
    pub boxed_image_data: Option<String>,
    #[serde(default)]
    pub image_filename: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminUserRecord {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default = "default_role")]
    pub role: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminLogRecord {
    #[serde(default)]
    pub id: Option<i64>,
    pub admin_username: String,
    pub action: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Deserialize)]
struct CheckSessionBody {
    user: SessionUser,
}

/// Moderation resources of the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminResource {
    Users,
    Items,
    Reports,
    Logs,
}

impl AdminResource {
    pub fn path(self) -> &'static str {
        match self {
            AdminResource::Users => "users",
            AdminResource::Items => "items",
            AdminResource::Reports => "reports",
            AdminResource::Logs => "logs",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AdminResource::Users => "Users",
            AdminResource::Items => "Items",
            AdminResource::Reports => "Reports",
            AdminResource::Logs => "Logs",
        }
    }
}

// ---- error body parsing ------------------------------------------------

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Text(String),
    Lockout {
        message: String,
        #[serde(default)]
        lock_until: Option<String>,
    },
}

/// Parse the timestamps the API emits: RFC 3339, or the naive
/// `YYYY-MM-DDTHH:MM:SS[.ffffff]` form, taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    None
}

/// Map a non-2xx response to the error taxonomy.
///
/// The canonical lock-until transport is the `detail.lock_until` body
/// field; the `x-lock-until` header is still honored as a deprecated
/// fallback from older server builds.
fn classify_failure(status: u16, header_lock_until: Option<&str>, body: &str) -> ApiError {
    let mut detail = String::new();
    let mut lock_until = None;

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        match parsed.detail {
            Some(ErrorDetail::Text(text)) => detail = text,
            Some(ErrorDetail::Lockout {
                message,
                lock_until: raw,
            }) => {
                detail = message;
                lock_until = raw.as_deref().and_then(parse_timestamp);
            }
            None => {}
        }
    }
    if detail.is_empty() {
        detail = format!("request failed with status {}", status);
    }
    if lock_until.is_none() {
        if let Some(raw) = header_lock_until {
            lock_until = parse_timestamp(raw);
            if lock_until.is_some() {
                log::warn!(
                    "lock-until arrived via the deprecated x-lock-until header; \
                     expected detail.lock_until in the body"
                );
            }
        }
    }

    match status {
        401 => ApiError::InvalidCredentials(detail),
        403 => match lock_until {
            Some(_) => ApiError::Locked { detail, lock_until },
            None => ApiError::Forbidden(detail),
        },
        404 => ApiError::NotFound(detail),
        code => ApiError::Status { code, detail },
    }
}

// ---- client ------------------------------------------------------------

/// HTTP client for the Lost & Found API.
///
/// One `reqwest::Client` with a cookie store, so the session cookie set
/// by `/auth/login` rides on every subsequent call. Cloning is cheap and
/// every method takes `&self`, so concurrent requests from the UI are
/// fine. No request timeout is configured: a hung request leaves its
/// optimistic placeholder until it settles.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self {
            http,
            base_url: config.api_url.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn ensure_success(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status().as_u16();
        let header_lock = resp
            .headers()
            .get("x-lock-until")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = resp.text().await.unwrap_or_default();
        Err(classify_failure(status, header_lock.as_deref(), &body))
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<T, ApiError> {
        let resp = Self::ensure_success(resp).await?;
        resp.json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    // ---- auth ----------------------------------------------------------

    pub async fn login(&self, username: &str, password: &str) -> Result<SessionUser, ApiError> {
        let form = [("username", username), ("password", password)];
        let resp = self
            .http
            .post(self.url("/auth/login"))
            .form(&form)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(resp).await
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<SessionUser, ApiError> {
        let body = serde_json::json!({
            "username": username,
            "email": email,
            "password": password,
        });
        let resp = self
            .http
            .post(self.url("/auth/register"))
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(resp).await
    }

    /// Revalidate the persisted session against the server.
    pub async fn check_session(&self) -> Result<SessionUser, ApiError> {
        let resp = self
            .http
            .get(self.url("/auth/check-session"))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let body: CheckSessionBody = Self::decode(resp).await?;
        Ok(body.user)
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        let resp = self
            .http
            .post(self.url("/auth/logout"))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::ensure_success(resp).await.map(|_| ())
    }

    // ---- chats ---------------------------------------------------------

    pub async fn fetch_chats(&self, user_id: i64) -> Result<Vec<ChatSummary>, ApiError> {
        let resp = self
            .http
            .get(self.url(&format!("/api/chats/{}", user_id)))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(resp).await
    }

    pub async fn get_or_create_chat(
        &self,
        user1_id: i64,
        user2_id: i64,
        item_id: Option<i64>,
    ) -> Result<ChatSummary, ApiError> {
        let body = serde_json::json!({
            "user1_id": user1_id,
            "user2_id": user2_id,
            "item_id": item_id,
        });
        let resp = self
            .http
            .post(self.url("/api/chats/get-or-create"))
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(resp).await
    }

    pub async fn fetch_messages(&self, chat_id: i64) -> Result<Vec<MessageRecord>, ApiError> {
        let resp = self
            .http
            .get(self.url(&format!("/api/chats/{}/messages", chat_id)))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let body: MessagesBody = Self::decode(resp).await?;
        Ok(body.messages)
    }

    /// Upload one message with its optional attachment as multipart form
    /// data. The attachment must already have passed validation.
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        attachment: Option<Attachment>,
    ) -> Result<MessageRecord, ApiError> {
        let mut form = multipart::Form::new()
            .text("chat_id", chat_id.to_string())
            .text("message", text.to_string());
        if let Some(att) = attachment {
            let part = multipart::Part::bytes(att.bytes)
                .file_name(att.filename)
                .mime_str(att.content_type)
                .map_err(|e| ApiError::Decode(format!("invalid content type: {}", e)))?;
            form = form.part("image", part);
        }
        let resp = self
            .http
            .post(self.url("/api/chats/messages/send"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(resp).await
    }

    pub async fn delete_message(&self, message_id: i64) -> Result<(), ApiError> {
        let resp = self
            .http
            .delete(self.url(&format!("/api/chats/messages/{}/delete", message_id)))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::ensure_success(resp).await.map(|_| ())
    }

    // ---- items ---------------------------------------------------------

    pub async fn upload_item(
        &self,
        title: &str,
        kind: &str,
        category: &str,
        attachment: Attachment,
    ) -> Result<ItemRecord, ApiError> {
        let part = multipart::Part::bytes(attachment.bytes)
            .file_name(attachment.filename)
            .mime_str(attachment.content_type)
            .map_err(|e| ApiError::Decode(format!("invalid content type: {}", e)))?;
        let form = multipart::Form::new()
            .text("title", title.to_string())
            .text("type", kind.to_string())
            .text("category", category.to_string())
            .part("image", part);
        let resp = self
            .http
            .post(self.url("/api/upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(resp).await
    }

    pub async fn lost_items(&self) -> Result<Vec<ItemRecord>, ApiError> {
        let resp = self
            .http
            .get(self.url("/api/lost-items"))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(resp).await
    }

    pub async fn found_items(&self) -> Result<Vec<ItemRecord>, ApiError> {
        let resp = self
            .http
            .get(self.url("/api/found-items"))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(resp).await
    }

    // ---- password reset ------------------------------------------------

    pub async fn request_reset(&self, username: &str, email: &str) -> Result<(), ApiError> {
        let body = serde_json::json!({ "username": username, "email": email });
        let resp = self
            .http
            .post(self.url("/auth/reset-password/request"))
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::ensure_success(resp).await.map(|_| ())
    }

    pub async fn verify_reset_otp(&self, email: &str, otp: &str) -> Result<(), ApiError> {
        let body = serde_json::json!({ "email": email, "otp": otp });
        let resp = self
            .http
            .post(self.url("/auth/reset-password/verify-otp"))
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::ensure_success(resp).await.map(|_| ())
    }

    pub async fn update_password(&self, email: &str, new_password: &str) -> Result<(), ApiError> {
        let body = serde_json::json!({ "email": email, "new_password": new_password });
        let resp = self
            .http
            .put(self.url("/auth/reset-password/update"))
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::ensure_success(resp).await.map(|_| ())
    }

    // ---- admin ---------------------------------------------------------

    pub async fn admin_users(&self) -> Result<Vec<AdminUserRecord>, ApiError> {
        let resp = self
            .http
            .get(self.url("/admin/users"))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(resp).await
    }

    pub async fn admin_items(&self) -> Result<Vec<ItemRecord>, ApiError> {
        let resp = self
            .http
            .get(self.url("/admin/items"))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(resp).await
    }

    pub async fn admin_reports(&self) -> Result<Vec<MessageRecord>, ApiError> {
        let resp = self
            .http
            .get(self.url("/admin/reports"))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(resp).await
    }

    pub async fn admin_logs(&self) -> Result<Vec<AdminLogRecord>, ApiError> {
        let resp = self
            .http
            .get(self.url("/admin/logs"))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(resp).await
    }

    pub async fn admin_delete(&self, resource: AdminResource, id: i64) -> Result<(), ApiError> {
        let resp = self
            .http
            .delete(self.url(&format!("/admin/{}/{}", resource.path(), id)))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::ensure_success(resp).await.map(|_| ())
    }

    pub async fn admin_set_role(&self, user_id: i64, make_admin: bool) -> Result<(), ApiError> {
        let action = if make_admin { "make-admin" } else { "remove-admin" };
        let resp = self
            .http
            .patch(self.url(&format!("/admin/users/{}/{}", user_id, action)))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::ensure_success(resp).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn plain_detail_string_maps_by_status() {
        let err = classify_failure(401, None, r#"{"detail": "Invalid credentials"}"#);
        assert_eq!(err, ApiError::InvalidCredentials("Invalid credentials".into()));

        let err = classify_failure(404, None, r#"{"detail": "no such chat"}"#);
        assert_eq!(err, ApiError::NotFound("no such chat".into()));

        let err = classify_failure(500, None, "not even json");
        assert_eq!(
            err,
            ApiError::Status {
                code: 500,
                detail: "request failed with status 500".into()
            }
        );
    }

    #[test]
    fn lockout_body_field_is_canonical() {
        let body = r#"{"detail": {"message": "Account locked", "lock_until": "2026-08-06T12:00:00Z"}}"#;
        let err = classify_failure(403, None, body);
        assert_eq!(
            err,
            ApiError::Locked {
                detail: "Account locked".into(),
                lock_until: Some(Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap()),
            }
        );
    }

    #[test]
    fn deprecated_header_still_yields_a_lockout() {
        let err = classify_failure(
            403,
            Some("2026-08-06T12:00:00Z"),
            r#"{"detail": "Account locked"}"#,
        );
        match err {
            ApiError::Locked { detail, lock_until } => {
                assert_eq!(detail, "Account locked");
                assert!(lock_until.is_some());
            }
            other => panic!("expected Locked, got {:?}", other),
        }
    }

    #[test]
    fn forbidden_without_timestamp_is_not_a_lockout() {
        let err = classify_failure(403, None, r#"{"detail": "Admin access required"}"#);
        assert_eq!(err, ApiError::Forbidden("Admin access required".into()));
    }

    #[test]
    fn timestamps_parse_in_both_server_shapes() {
        assert!(parse_timestamp("2026-08-06T12:00:00Z").is_some());
        assert!(parse_timestamp("2026-08-06T12:00:00.123456").is_some());
        assert!(parse_timestamp("2026-08-06 12:00:00").is_some());
        assert!(parse_timestamp("noon-ish").is_none());
    }
}
