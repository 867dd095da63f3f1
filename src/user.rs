use anyhow::Context;
use serde::{Deserialize, Serialize};

/// A user, as the backend describes it. \
/// Every field may be absent until it is populated by a server response.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: Option<u64>,
    /// The display name
    pub name: Option<String>,
    pub username: Option<String>,
    /// The session token of this user. Only sent back to the user it belongs to
    pub token: Option<String>,
    /// Status label, e.g. `ONLINE`
    pub status: Option<String>,
    /// Opaque, never interpreted by the client
    pub games: Option<serde_json::Value>,
    /// Opaque, never interpreted by the client
    pub moves: Option<serde_json::Value>,
    /// Kept as the server formats it
    pub creation_date: Option<String>,
    /// Kept as the server formats it
    pub birth_date: Option<String>,
}

impl User {

    /// Constructs a [`User`] from a partial JSON object. \
    /// Keys that are missing stay empty, unknown keys are ignored.
    pub fn from_partial(data: serde_json::Value) -> anyhow::Result<Self> {
        serde_json::from_value(data).context("Could not parse user")
    }

}

/// Body of a profile update. This always replaces the whole editable part of the record.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub username: Option<String>,
    pub birth_date: Option<String>,
    /// Token of the session that requests the update
    pub token: Option<String>,
}

/// Body of a registration request
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub username: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub birth_date: Option<String>,
}
