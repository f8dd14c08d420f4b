//! Raw title notifications to presentation records.

use std::sync::Arc;

use chrono::Utc;
use nxrpc_common::{ActivityKind, ActivityRecord, TitleId, HOME_MENU_NAME};
use nxrpc_config::schema::{ArtworkConfig, ClassificationRule};
use nxrpc_config::NxrpcConfig;
use tracing::{debug, info};

use crate::artwork::ArtworkProbe;

/// Status code that confirms artwork exists.
const HTTP_OK: u16 = 200;

/// Case-folded `(pattern, value)` pair; matching is substring on lowercase.
#[derive(Debug, Clone)]
struct Matcher<T> {
    needle: String,
    value: T,
}

impl<T> Matcher<T> {
    fn new(pattern: &str, value: T) -> Self {
        Self {
            needle: pattern.to_lowercase(),
            value,
        }
    }
}

fn first_match<'a, T>(matchers: &'a [Matcher<T>], name: &str) -> Option<&'a T> {
    let haystack = name.to_lowercase();
    matchers
        .iter()
        .find(|m| haystack.contains(&m.needle))
        .map(|m| &m.value)
}

/// Builds [`ActivityRecord`]s and resolves their artwork.
pub struct ActivityNormalizer {
    classification: Vec<Matcher<ActivityKind>>,
    overrides: Vec<Matcher<String>>,
    artwork: ArtworkConfig,
    probe: Arc<dyn ArtworkProbe>,
}

impl ActivityNormalizer {
    pub fn new(
        classification: &[ClassificationRule],
        artwork: ArtworkConfig,
        probe: Arc<dyn ArtworkProbe>,
    ) -> Self {
        Self {
            classification: classification
                .iter()
                .map(|rule| Matcher::new(&rule.pattern, rule.kind))
                .collect(),
            overrides: artwork
                .overrides
                .iter()
                .map(|o| Matcher::new(&o.pattern, o.image.clone()))
                .collect(),
            artwork,
            probe,
        }
    }

    pub fn from_config(config: &NxrpcConfig, probe: Arc<dyn ArtworkProbe>) -> Self {
        Self::new(&config.classification, config.artwork.clone(), probe)
    }

    /// First matching rule wins; no match means playing.
    pub fn classify(&self, display_name: &str) -> ActivityKind {
        first_match(&self.classification, display_name)
            .copied()
            .unwrap_or(ActivityKind::Playing)
    }

    /// Build the record for a title that just became current.
    ///
    /// The start time is captured here, so callers only normalize on a
    /// title change.
    pub fn normalize(&self, title_id: TitleId, raw_name: &str) -> ActivityRecord {
        if title_id.or_home_menu().is_home_menu() {
            return ActivityRecord {
                title_id: TitleId::HOME_MENU,
                display_name: HOME_MENU_NAME.to_string(),
                kind: ActivityKind::Playing,
                started_at: None,
                artwork: None,
            };
        }

        ActivityRecord {
            title_id,
            display_name: raw_name.to_string(),
            kind: self.classify(raw_name),
            started_at: Some(Utc::now()),
            artwork: None,
        }
    }

    /// Hex id used for artwork lookup, after update/DLC remapping.
    pub fn canonical_title(&self, title_id: TitleId) -> String {
        let hex = title_id.hex();
        self.artwork.title_remap.get(&hex).cloned().unwrap_or(hex)
    }

    /// Fixed image for a display name, if one is configured.
    pub fn artwork_override(&self, display_name: &str) -> Option<&str> {
        first_match(&self.overrides, display_name).map(String::as_str)
    }

    /// Resolve the large-image reference for a record. Never fails: every
    /// miss resolves to the configured default image.
    pub async fn resolve_artwork(&self, record: &ActivityRecord) -> String {
        if let Some(image) = self.artwork_override(&record.display_name) {
            debug!(name = %record.display_name, "Using artwork override");
            return image.to_string();
        }

        let hex = self.canonical_title(record.title_id);
        let url = self.artwork.probe_url_for(&hex);
        info!(url = %url, "Checking artwork");

        match self.probe.probe(&url).await {
            Ok(HTTP_OK) => url,
            Ok(status) => {
                info!(title = %hex, status, "No artwork found, using default");
                self.artwork.default_image.clone()
            }
            Err(e) => {
                info!(title = %hex, error = %e, "Artwork check failed, using default");
                self.artwork.default_image.clone()
            }
        }
    }
}
