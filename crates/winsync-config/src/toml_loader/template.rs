//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# winsync Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[registry]
# Every participant that should see the others must use the same keys.
# Letters, digits, '_', '-' and '.' only.
# counter_key = "count"
# windows_key = "windows"

[medium]
# "file" shares a directory between processes; "memory" is in-process only.
kind = "file"
# directory = "/tmp/winsync"   # default: platform data dir/winsync/medium

[polling]
# tick_interval_ms = 16        # 1-1000

[logging]
# level = "INFO"               # DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
