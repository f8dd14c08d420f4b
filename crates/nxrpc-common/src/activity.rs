use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display name used for the system menu.
pub const HOME_MENU_NAME: &str = "Home Menu";

/// A console title identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TitleId(pub u64);

impl TitleId {
    /// Reserved identifier of the home menu application.
    pub const HOME_MENU: TitleId = TitleId(0x0100_0000_0000_1000);

    /// The console reports `0` when nothing is running.
    pub fn is_unset(self) -> bool {
        self.0 == 0
    }

    pub fn is_home_menu(self) -> bool {
        self == Self::HOME_MENU
    }

    /// The id as tracked by the bridge: an unset id means the home menu.
    pub fn or_home_menu(self) -> TitleId {
        if self.is_unset() {
            Self::HOME_MENU
        } else {
            self
        }
    }

    /// Zero-padded, upper-case, 16 digit hex form used by artwork services.
    pub fn hex(self) -> String {
        format!("{:016X}", self.0)
    }
}

impl fmt::Display for TitleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl From<u64> for TitleId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    #[default]
    Playing,
    Watching,
}

impl ActivityKind {
    /// Numeric activity type understood by the presence endpoint.
    pub fn wire_value(self) -> u8 {
        match self {
            ActivityKind::Playing => 0,
            ActivityKind::Watching => 3,
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityKind::Playing => write!(f, "playing"),
            ActivityKind::Watching => write!(f, "watching"),
        }
    }
}

/// Normalized "currently doing" record handed to the presence publisher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRecord {
    pub title_id: TitleId,
    pub display_name: String,
    pub kind: ActivityKind,
    /// When the title was first seen; `None` for the home menu.
    pub started_at: Option<DateTime<Utc>>,
    /// Resolved large-image reference, filled in once per title change.
    pub artwork: Option<String>,
}

impl ActivityRecord {
    pub fn is_home_menu(&self) -> bool {
        self.title_id.is_home_menu()
    }

    /// Start time as Unix milliseconds.
    pub fn started_at_millis(&self) -> Option<i64> {
        self.started_at.map(|t| t.timestamp_millis())
    }
}
