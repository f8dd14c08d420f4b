//! Cover art lookup configuration.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Placeholder substituted into `probe_url`.
pub const TITLE_ID_PLACEHOLDER: &str = "{id}";

/// A fixed image used when the display name contains `pattern`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtworkOverride {
    pub pattern: String,
    pub image: String,
}

impl ArtworkOverride {
    pub fn new(pattern: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            image: image.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtworkConfig {
    /// URL template probed with a HEAD request; `{id}` is the 16 digit hex title id.
    pub probe_url: String,
    /// Image key used when no artwork could be confirmed.
    pub default_image: String,
    /// Per-request probe timeout in seconds (valid range: 1-60).
    pub probe_timeout_secs: u64,
    /// Update/DLC title ids rewritten to their base title before probing.
    pub title_remap: BTreeMap<String, String>,
    /// Checked in order before any network lookup; first match wins.
    pub overrides: Vec<ArtworkOverride>,
}

impl Default for ArtworkConfig {
    fn default() -> Self {
        let mut title_remap = BTreeMap::new();
        title_remap.insert("05003A400C3DA000".into(), "01003A400C3DA000".into());

        Self {
            probe_url: "https://tinfoil.media/ti/{id}/256/256/".into(),
            default_image: "nintendo_switch_default".into(),
            probe_timeout_secs: 5,
            title_remap,
            overrides: vec![
                ArtworkOverride::new(
                    "Switchfin",
                    "https://raw.githubusercontent.com/dragonflylee/switchfin/refs/heads/dev/resources/icon/icon.jpg",
                ),
                ArtworkOverride::new(
                    "nx-hbmenu",
                    "https://raw.githubusercontent.com/switchbrew/nx-hbmenu/refs/heads/master/icon.jpg",
                ),
                ArtworkOverride::new(
                    "Homebrew Menu",
                    "https://raw.githubusercontent.com/switchbrew/nx-hbmenu/refs/heads/master/icon.jpg",
                ),
                ArtworkOverride::new(
                    "RetroArch",
                    "https://gbatemp.net/attachments/retroarch-jpg.266593/",
                ),
            ],
        }
    }
}

impl ArtworkConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    /// Expand `probe_url` for a title id in hex form.
    pub fn probe_url_for(&self, hex_id: &str) -> String {
        self.probe_url.replace(TITLE_ID_PLACEHOLDER, hex_id)
    }
}
