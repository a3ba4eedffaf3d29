use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Directory payload as returned by the remote, envelope fields removed
pub type UserProfile = Map<String, Value>;

/// Message body kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MsgType {
    #[default]
    Text,
    Markdown,
}

impl MsgType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MsgType::Text => "text",
            MsgType::Markdown => "markdown",
        }
    }
}

/// Outbound message as callers describe it
#[derive(Debug, Clone, Default)]
pub struct OutgoingMessage {
    pub to_user: Option<String>,
    pub to_party: Option<String>,
    pub to_tag: Option<String>,
    pub content: String,
    pub msg_type: MsgType,
    /// Overrides the configured `safe_mode` default when set
    pub safe: Option<bool>,
}

/// Wire payload for message/send. Unset selectors serialize as empty
/// strings and `safe` as 0/1, the convention the endpoint expects.
/// Exactly one content block is present, matching `msgtype`.
#[derive(Debug, Serialize)]
pub struct SendMessageRequest {
    pub touser: String,
    pub toparty: String,
    pub totag: String,
    pub agentid: i64,
    pub msgtype: &'static str,
    pub safe: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<ContentBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown: Option<ContentBlock>,
}

#[derive(Debug, Serialize)]
pub struct ContentBlock {
    pub content: String,
}

impl SendMessageRequest {
    pub fn build(message: &OutgoingMessage, agent_id: i64, safe_default: bool) -> Self {
        let safe = message.safe.unwrap_or(safe_default);
        let block = ContentBlock {
            content: message.content.clone(),
        };
        let (text, markdown) = match message.msg_type {
            MsgType::Text => (Some(block), None),
            MsgType::Markdown => (None, Some(block)),
        };
        Self {
            touser: message.to_user.clone().unwrap_or_default(),
            toparty: message.to_party.clone().unwrap_or_default(),
            totag: message.to_tag.clone().unwrap_or_default(),
            agentid: agent_id,
            msgtype: message.msg_type.as_str(),
            safe: if safe { 1 } else { 0 },
            text,
            markdown,
        }
    }
}

/// Delivery result. Rejected selectors are reported here, they do not
/// fail the call; wire empty strings come back as `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeliveryReceipt {
    #[serde(default, rename = "invaliduser", deserialize_with = "empty_as_none")]
    pub invalid_user: Option<String>,
    #[serde(default, rename = "invalidparty", deserialize_with = "empty_as_none")]
    pub invalid_party: Option<String>,
    #[serde(default, rename = "invalidtag", deserialize_with = "empty_as_none")]
    pub invalid_tag: Option<String>,
    #[serde(default, rename = "msgid")]
    pub msg_id: Option<String>,
}

impl DeliveryReceipt {
    /// True when every selector was accepted
    pub fn fully_delivered(&self) -> bool {
        self.invalid_user.is_none() && self.invalid_party.is_none() && self.invalid_tag.is_none()
    }
}

/// Reachability probe result
#[derive(Debug, Clone, Deserialize)]
pub struct DomainIpList {
    #[serde(default)]
    pub ip_list: Vec<String>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
