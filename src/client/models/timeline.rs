use chrono::{DateTime, Utc};

/// Identifier of a chat message as seen by this client.
///
/// A message starts life with a client-generated `Temp` token and is
/// rewritten to the `Server` id once the send round-trip settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageId {
    Server(i64),
    Temp(String),
}

impl MessageId {
    pub fn is_temp(&self) -> bool {
        matches!(self, MessageId::Temp(_))
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageId::Server(id) => write!(f, "{}", id),
            MessageId::Temp(token) => write!(f, "{}", token),
        }
    }
}

/// Displayable image reference carried by a message.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageRef {
    /// Local preview for an attachment whose upload has not settled yet.
    Pending { filename: String },
    /// Server-hosted payload, shipped as a base64 `data:` URL.
    Remote(String),
}

/// Client-local view model of one chat message.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub id: MessageId,
    pub chat_id: i64,
    pub sender_id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub display_name: String,
    pub image: Option<ImageRef>,
    pub is_mine: bool,
}

/// Ordered message buffer for one open chat, with optimistic sends.
///
/// List order is send order: a pending message is appended synchronously
/// before its upload request is issued, then either rewritten in place
/// (`resolve`) or dropped (`reject`) when the request settles. Every
/// pending entry is correlated by its temp token, never by position, so
/// concurrent sends may settle in any order.
#[derive(Debug, Clone, Default)]
pub struct ChatTimeline {
    messages: Vec<ChatMessage>,
    next_seq: u64,
}

impl ChatTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn contains(&self, id: &MessageId) -> bool {
        self.messages.iter().any(|m| &m.id == id)
    }

    /// Replace the whole buffer with the server's history (initial load).
    /// Pending entries are intentionally discarded: a reload only happens
    /// when the view is (re)opened and no send is in flight.
    pub fn replace_all(&mut self, messages: Vec<ChatMessage>) {
        self.messages = messages;
    }

    /// Append an optimistic message and hand back its correlation token.
    ///
    /// The token is `temp-{millis}-{seq}`; the sequence counter keeps two
    /// sends inside the same millisecond distinct.
    pub fn push_pending(
        &mut self,
        chat_id: i64,
        sender_id: i64,
        display_name: &str,
        text: &str,
        image: Option<ImageRef>,
        now: DateTime<Utc>,
    ) -> MessageId {
        let token = format!("temp-{}-{}", now.timestamp_millis(), self.next_seq);
        self.next_seq += 1;
        let id = MessageId::Temp(token);
        self.messages.push(ChatMessage {
            id: id.clone(),
            chat_id,
            sender_id,
            text: text.to_string(),
            created_at: now,
            display_name: display_name.to_string(),
            image,
            is_mine: true,
        });
        id
    }

    /// Rewrite the pending entry matching `temp_id` with the server's
    /// canonical record, preserving its position in the list.
    ///
    /// Returns `false` when no entry carries the token (the view was
    /// reloaded while the send was in flight).
    pub fn resolve(&mut self, temp_id: &MessageId, record: ChatMessage) -> bool {
        match self.messages.iter_mut().find(|m| &m.id == temp_id) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    /// Roll back a failed send by dropping its pending entry.
    pub fn reject(&mut self, temp_id: &MessageId) -> bool {
        let before = self.messages.len();
        self.messages.retain(|m| &m.id != temp_id);
        self.messages.len() != before
    }

    /// Remove a confirmed message (after a successful delete call).
    pub fn remove(&mut self, id: &MessageId) -> bool {
        let before = self.messages.len();
        self.messages.retain(|m| &m.id != id);
        self.messages.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    fn server_record(id: i64, text: &str) -> ChatMessage {
        ChatMessage {
            id: MessageId::Server(id),
            chat_id: 7,
            sender_id: 42,
            text: text.to_string(),
            created_at: at(1_700_000_000_500),
            display_name: "mario".to_string(),
            image: Some(ImageRef::Remote("data:image/png;base64,AA==".to_string())),
            is_mine: true,
        }
    }

    #[test]
    fn resolve_replaces_pending_in_place() {
        let mut timeline = ChatTimeline::new();
        timeline.replace_all(vec![server_record(1, "older")]);
        let temp = timeline.push_pending(7, 42, "mario", "hello", None, at(1_700_000_000_000));

        assert!(timeline.resolve(&temp, server_record(2, "hello")));

        // Exactly one record with the server id, zero with the temp token.
        assert_eq!(timeline.len(), 2);
        assert!(!timeline.contains(&temp));
        assert_eq!(timeline.messages()[1].id, MessageId::Server(2));
        assert_eq!(timeline.messages()[1].text, "hello");
    }

    #[test]
    fn reject_restores_pre_send_list() {
        let mut timeline = ChatTimeline::new();
        timeline.replace_all(vec![server_record(1, "a"), server_record(2, "b")]);
        let before: Vec<MessageId> = timeline.messages().iter().map(|m| m.id.clone()).collect();

        let temp = timeline.push_pending(7, 42, "mario", "doomed", None, at(1_700_000_001_000));
        assert_eq!(timeline.len(), 3);

        assert!(timeline.reject(&temp));
        let after: Vec<MessageId> = timeline.messages().iter().map(|m| m.id.clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn concurrent_sends_resolve_out_of_order_without_cross_assignment() {
        let mut timeline = ChatTimeline::new();
        let first = timeline.push_pending(7, 42, "mario", "first", None, at(1_700_000_000_000));
        let second = timeline.push_pending(7, 42, "mario", "second", None, at(1_700_000_000_000));
        assert_ne!(first, second);

        // Second round-trip settles before the first.
        assert!(timeline.resolve(&second, server_record(11, "second")));
        assert!(timeline.resolve(&first, server_record(10, "first")));

        assert_eq!(timeline.messages()[0].id, MessageId::Server(10));
        assert_eq!(timeline.messages()[0].text, "first");
        assert_eq!(timeline.messages()[1].id, MessageId::Server(11));
        assert_eq!(timeline.messages()[1].text, "second");
    }

    #[test]
    fn temp_tokens_stay_unique_within_a_millisecond() {
        let mut timeline = ChatTimeline::new();
        let a = timeline.push_pending(7, 42, "mario", "x", None, at(5));
        let b = timeline.push_pending(7, 42, "mario", "y", None, at(5));
        assert_ne!(a, b);
    }

    #[test]
    fn resolve_of_unknown_token_is_a_noop() {
        let mut timeline = ChatTimeline::new();
        timeline.replace_all(vec![server_record(1, "a")]);
        let ghost = MessageId::Temp("temp-0-99".to_string());
        assert!(!timeline.resolve(&ghost, server_record(2, "b")));
        assert_eq!(timeline.len(), 1);
    }

    #[test]
    fn remove_drops_only_the_requested_message() {
        let mut timeline = ChatTimeline::new();
        timeline.replace_all(vec![server_record(1, "a"), server_record(2, "b")]);
        assert!(timeline.remove(&MessageId::Server(1)));
        assert!(!timeline.remove(&MessageId::Server(1)));
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline.messages()[0].id, MessageId::Server(2));
    }

    #[test]
    fn pending_messages_carry_a_local_preview() {
        let mut timeline = ChatTimeline::new();
        let image = ImageRef::Pending {
            filename: "receipt.jpg".to_string(),
        };
        let temp = timeline.push_pending(7, 42, "mario", "", Some(image.clone()), at(0));
        assert!(temp.is_temp());
        assert_eq!(timeline.messages()[0].image, Some(image));
        assert!(timeline.messages()[0].is_mine);
    }
}
