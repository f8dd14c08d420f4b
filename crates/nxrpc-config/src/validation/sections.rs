//! Per-section validators: console, discord, artwork, classification.

use crate::schema::{NxrpcConfig, TITLE_ID_PLACEHOLDER};

use super::helpers::{validate_non_empty, validate_range, validate_title_hex};

/// Validate console connection settings.
pub(crate) fn validate_console(errors: &mut Vec<String>, config: &NxrpcConfig) {
    if config.console.port == 0 {
        errors.push("console.port must not be 0".into());
    }
    validate_range(
        errors,
        "console.connect_timeout_secs",
        config.console.connect_timeout_secs,
        1,
        120,
    );
    validate_range(
        errors,
        "console.heartbeat_timeout_secs",
        config.console.heartbeat_timeout_secs,
        1,
        300,
    );
    validate_range(
        errors,
        "console.retry_delay_secs",
        config.console.retry_delay_secs,
        1,
        300,
    );
}

/// Validate presence session settings.
pub(crate) fn validate_discord(errors: &mut Vec<String>, config: &NxrpcConfig) {
    let client_id = &config.discord.client_id;
    if client_id.is_empty() || !client_id.chars().all(|c| c.is_ascii_digit()) {
        errors.push(format!("discord.client_id = {client_id:?} must be numeric"));
    }
    validate_range(
        errors,
        "discord.login_attempts",
        u64::from(config.discord.login_attempts),
        1,
        100,
    );
    validate_range(
        errors,
        "discord.login_backoff_secs",
        config.discord.login_backoff_secs,
        0,
        60,
    );
    validate_range(
        errors,
        "discord.refresh_interval_secs",
        config.discord.refresh_interval_secs,
        1,
        600,
    );
}

/// Validate artwork lookup settings.
pub(crate) fn validate_artwork(errors: &mut Vec<String>, config: &NxrpcConfig) {
    let artwork = &config.artwork;
    if !artwork.probe_url.contains(TITLE_ID_PLACEHOLDER) {
        errors.push(format!(
            "artwork.probe_url must contain {TITLE_ID_PLACEHOLDER}"
        ));
    }
    validate_non_empty(errors, "artwork.default_image", &artwork.default_image);
    validate_range(
        errors,
        "artwork.probe_timeout_secs",
        artwork.probe_timeout_secs,
        1,
        60,
    );
    for (from, to) in &artwork.title_remap {
        validate_title_hex(errors, "artwork.title_remap key", from);
        validate_title_hex(errors, &format!("artwork.title_remap[{from}]"), to);
    }
    for (i, entry) in artwork.overrides.iter().enumerate() {
        validate_non_empty(errors, &format!("artwork.overrides[{i}].pattern"), &entry.pattern);
        validate_non_empty(errors, &format!("artwork.overrides[{i}].image"), &entry.image);
    }
}

/// Validate classification rules.
pub(crate) fn validate_classification(errors: &mut Vec<String>, config: &NxrpcConfig) {
    for (i, rule) in config.classification.iter().enumerate() {
        validate_non_empty(errors, &format!("classification[{i}].pattern"), &rule.pattern);
    }
}
