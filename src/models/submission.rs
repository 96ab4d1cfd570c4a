//! Creation-form submission models

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::error::ClientResult;

/// Entities that can be created from the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Book,
    User,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Book => "book",
            EntityKind::User => "user",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response as read off the wire, before any interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl RawResponse {
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.to_ascii_lowercase().contains("application/json"))
            .unwrap_or(false)
    }
}

/// `{ ok, error?, message?, ... }` envelope returned by the creation endpoints
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CreationReply {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Entity fields (`isbn`, `title`, `user_id`, `name`, ...)
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl CreationReply {
    /// Server-supplied reason for a rejection, `error` first then `message`
    pub fn failure_reason(&self) -> Option<&str> {
        [self.error.as_deref(), self.message.as_deref()]
            .into_iter()
            .flatten()
            .find(|reason| !reason.is_empty())
    }

    /// Decode the entity carried by a successful reply
    pub fn created<E: CreatedEntity>(&self) -> ClientResult<E> {
        Ok(serde_json::from_value(Value::Object(self.payload.clone()))?)
    }
}

/// Tagged view of a submission response.
///
/// Transport failures never reach this type; they are the `Err` side of the
/// request.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionResponse {
    Decoded(CreationReply),
    /// Valid JSON without the `ok` envelope
    Unrecognized(Value),
    Opaque { status: u16, body: String },
}

impl SubmissionResponse {
    /// Classify a raw response by its declared content type.
    ///
    /// A body that claims to be JSON but does not parse is a decoding error.
    pub fn from_raw(raw: RawResponse) -> ClientResult<Self> {
        if raw.is_json() {
            let value: Value = serde_json::from_str(&raw.body)?;
            match serde_json::from_value::<CreationReply>(value.clone()) {
                Ok(reply) => Ok(SubmissionResponse::Decoded(reply)),
                Err(_) => Ok(SubmissionResponse::Unrecognized(value)),
            }
        } else {
            Ok(SubmissionResponse::Opaque {
                status: raw.status,
                body: raw.body,
            })
        }
    }
}

/// Entity decoded from a successful creation reply
pub trait CreatedEntity: DeserializeOwned + fmt::Debug + Send {
    const KIND: EntityKind;

    /// Value of the option in the companion select
    fn id(&self) -> String;

    /// Text of the option in the companion select
    fn label(&self) -> String;

    /// Name shown in the success notification
    fn display_name(&self) -> String;
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookCreated {
    pub isbn: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub category_name: Option<String>,
}

impl CreatedEntity for BookCreated {
    const KIND: EntityKind = EntityKind::Book;

    fn id(&self) -> String {
        self.isbn.clone()
    }

    fn label(&self) -> String {
        format!("{} — {}", self.display_name(), self.isbn)
    }

    fn display_name(&self) -> String {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.isbn)
            .to_string()
    }
}

/// User identifier, sent by the server either as a number or as text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{}", n),
            UserId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserCreated {
    pub user_id: UserId,
    pub name: String,
}

impl CreatedEntity for UserCreated {
    const KIND: EntityKind = EntityKind::User;

    fn id(&self) -> String {
        self.user_id.to_string()
    }

    fn label(&self) -> String {
        format!("{} (ID: {})", self.name, self.user_id)
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }
}
