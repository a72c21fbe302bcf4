use serde::{Deserialize, Serialize};

mod admission;
mod keeper;
mod store;

pub use admission::{Admission, AdmissionGate};
pub use keeper::SessionKeeper;
pub use store::{HttpSessionClient, SessionStore};

/// A session record as the coordination service reports it.
///
/// The create response, the renew response, and the list entries all share
/// this shape, though bodies may be partial (a create answer can carry the
/// ID alone), so every field falls back to its default on decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Session {
    #[serde(rename = "ID")]
    pub id: String,
    /// Resource/group key the admission count is taken over.
    pub name: String,
    pub node: String,
    pub checks: Vec<String>,
    /// Reported by the service in nanoseconds.
    pub lock_delay: i64,
    pub behavior: String,
    #[serde(rename = "TTL")]
    pub ttl: String,
    pub create_index: i64,
    pub modify_index: i64,
}

/// Payload for a session create call.
///
/// Unset fields are dropped from the JSON entirely; the service fills in
/// its own defaults for anything absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SessionRequest {
    /// Duration string on the write side, unlike the nanosecond integer
    /// the service reports back.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock_delay: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<Vec<String>>,
    #[serde(rename = "TTL", skip_serializing_if = "Option::is_none")]
    pub ttl: Option<String>,
}
