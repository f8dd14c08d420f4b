//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# nxrpc configuration
# Only override what you want to change -- missing fields use defaults.

[console]
# IP address of the console running the presence sysmodule.
host = ""
# port = 51966                 # 0xCAFE
# connect_timeout_secs = 10    # 1-120
# heartbeat_timeout_secs = 10  # 1-300
# retry_delay_secs = 5         # 1-300

[discord]
# client_id = "831528990439243806"
# login_attempts = 10          # 1-100
# login_backoff_secs = 3       # 0-60
# status_text = "on Nintendo Switch"
# refresh_interval_secs = 15   # 1-600

[artwork]
# probe_url = "https://tinfoil.media/ti/{id}/256/256/"
# default_image = "nintendo_switch_default"
# probe_timeout_secs = 5       # 1-60

# Update/DLC ids rewritten to the base title before probing.
# [artwork.title_remap]
# "05003A400C3DA000" = "01003A400C3DA000"

# Fixed images by display name (case-insensitive substring, first match wins).
# Setting any entry replaces the built-in list.
# [[artwork.overrides]]
# pattern = "RetroArch"
# image = "https://gbatemp.net/attachments/retroarch-jpg.266593/"

# Activity classification (case-insensitive substring, first match wins).
# Unmatched titles are shown as "playing".
# [[classification]]
# pattern = "YouTube"
# kind = "watching"

[logging]
# level = "info"               # trace, debug, info, warn, error
"##
    .to_string()
}
