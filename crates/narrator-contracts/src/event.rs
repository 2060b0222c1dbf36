//! Host event envelope and permission notices.
//!
//! The host delivers either a bare event (`{type, properties}`) or a global
//! envelope (`{directory, payload: {type, properties}}`). `HostEvent::into_event`
//! is the one place that difference is resolved.

use serde::{Deserialize, Serialize};

use crate::action::{ActionKind, PendingAction};

/// Event types that announce a permission gate.
pub const PERMISSION_EVENT_TYPES: [&str; 2] = ["permission.updated", "permission.asked"];

/// A host event as received, wrapped or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HostEvent {
    Envelope {
        #[serde(default)]
        directory: Option<String>,
        payload: Event,
    },
    Bare(Event),
}

impl HostEvent {
    pub fn into_event(self) -> Event {
        match self {
            HostEvent::Envelope { payload, .. } => payload,
            HostEvent::Bare(event) => event,
        }
    }
}

impl From<Event> for HostEvent {
    fn from(event: Event) -> Self {
        HostEvent::Bare(event)
    }
}

/// A typed lifecycle event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub properties: serde_json::Value,
}

impl Event {
    pub fn is_permission(&self) -> bool {
        PERMISSION_EVENT_TYPES.contains(&self.kind.as_str())
    }

    /// Decode the permission record carried by this event.
    ///
    /// The record lives under `properties.info` on newer hosts and directly in
    /// `properties` on older ones. Returns `None` for non-permission events and
    /// for records that do not decode.
    pub fn permission_notice(&self) -> Option<PermissionNotice> {
        if !self.is_permission() {
            return None;
        }
        let record = self
            .properties
            .get("info")
            .filter(|info| info.is_object())
            .unwrap_or(&self.properties);
        serde_json::from_value(record.clone()).ok()
    }
}

/// The permission record exactly as the host reports it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PermissionNotice {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "sessionID")]
    pub session_id: Option<String>,
    #[serde(default, rename = "messageID")]
    pub message_id: Option<String>,
    #[serde(default, rename = "callID")]
    pub call_id: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// Why a notice cannot become a `PendingAction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeRejection {
    /// `id`, `sessionID` or `messageID` is missing or empty.
    Incomplete,
    /// The permission is for something other than an edit or a shell command.
    Ungated { kind: String },
}

impl PermissionNotice {
    /// Validate the notice and lift it into a `PendingAction`.
    pub fn into_pending(self) -> Result<PendingAction, NoticeRejection> {
        let (action_id, session_id, message_id) =
            match (non_empty(self.id), non_empty(self.session_id), non_empty(self.message_id)) {
                (Some(a), Some(s), Some(m)) => (a, s, m),
                _ => return Err(NoticeRejection::Incomplete),
            };

        let wire_kind = self.kind.unwrap_or_default();
        let kind = ActionKind::from_wire(&wire_kind)
            .ok_or(NoticeRejection::Ungated { kind: wire_kind })?;

        Ok(PendingAction {
            action_id,
            session_id,
            message_id,
            call_id: non_empty(self.call_id),
            kind,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
