//! `SET_ACTIVITY` request model.

use nxrpc_common::{new_nonce, ActivityKind};
use serde::Serialize;

pub const SET_ACTIVITY: &str = "SET_ACTIVITY";

/// Everything the presence service needs to render one activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityPayload {
    pub pid: u32,
    pub kind: ActivityKind,
    pub name: String,
    pub state: String,
    /// Start time in Unix milliseconds.
    pub start_timestamp: Option<i64>,
    pub large_image: String,
    pub large_text: String,
    pub nonce: String,
}

impl ActivityPayload {
    /// Build a payload for the current process with a fresh nonce.
    pub fn new(
        kind: ActivityKind,
        name: impl Into<String>,
        state: impl Into<String>,
        start_timestamp: Option<i64>,
        large_image: impl Into<String>,
    ) -> Self {
        let name = name.into();
        Self {
            pid: std::process::id(),
            kind,
            large_text: name.clone(),
            name,
            state: state.into(),
            start_timestamp,
            large_image: large_image.into(),
            nonce: new_nonce(),
        }
    }

    /// Serialize into the `SET_ACTIVITY` command body.
    pub fn to_command(&self) -> serde_json::Value {
        let activity = WireActivity {
            kind: self.kind.wire_value(),
            name: &self.name,
            state: &self.state,
            timestamps: self.start_timestamp.map(|start| WireTimestamps { start }),
            assets: WireAssets {
                large_image: &self.large_image,
                large_text: &self.large_text,
            },
        };
        serde_json::json!({
            "cmd": SET_ACTIVITY,
            "args": {
                "pid": self.pid,
                "activity": activity,
            },
            "nonce": self.nonce,
        })
    }
}

/// `SET_ACTIVITY` with a null activity clears the displayed status.
pub fn clear_activity_command(pid: u32) -> serde_json::Value {
    serde_json::json!({
        "cmd": SET_ACTIVITY,
        "args": {
            "pid": pid,
            "activity": null,
        },
        "nonce": new_nonce(),
    })
}

#[derive(Serialize)]
struct WireActivity<'a> {
    #[serde(rename = "type")]
    kind: u8,
    name: &'a str,
    state: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamps: Option<WireTimestamps>,
    assets: WireAssets<'a>,
}

#[derive(Serialize)]
struct WireTimestamps {
    start: i64,
}

#[derive(Serialize)]
struct WireAssets<'a> {
    large_image: &'a str,
    large_text: &'a str,
}
