//! Config serialization to TOML
//!
//! Single source of truth for the config file format: the template written
//! on first run and by `stockpit config --reset` is generated from the
//! default `Config`, so it never drifts from the fields the code reads.

use super::Config;

impl Config {
    /// Render the config as a commented TOML template
    pub fn to_toml(&self) -> String {
        format!(
            r#"# stockpit configuration
# Environment variables (STOCKPIT_API_URL, STOCKPIT_EXPORT_DIR,
# STOCKPIT_PAGE_SIZE, STOCKPIT_THEME) take precedence over this file.

# Base URL of the remote catalog API
api_url = "{api_url}"

# Directory CSV exports are written to
export_dir = "{export_dir}"

# Initial rows per page (cycle at runtime with + / -)
page_size = {page_size}

# Theme: "dark", "light" or "terminal"
theme = "{theme}"

[logging]
# Log level: trace, debug, info, warn, error
level = "{level}"
# Also write logs to rotating files (logs always go to the in-app buffer)
file_enabled = {file_enabled}
file_dir = "{file_dir}"
# Rotation: "hourly", "daily" or "never"
file_rotation = "{file_rotation}"
file_prefix = "{file_prefix}"

[audit]
# JSONL session trail of loads, edits and exports
enabled = {audit_enabled}
dir = "{audit_dir}"
"#,
            api_url = self.api_url,
            export_dir = self.export_dir.display(),
            page_size = self.page_size,
            theme = self.theme,
            level = self.logging.level,
            file_enabled = self.logging.file_enabled,
            file_dir = self.logging.file_dir.display(),
            file_rotation = self.logging.file_rotation.as_str(),
            file_prefix = self.logging.file_prefix,
            audit_enabled = self.audit.enabled,
            audit_dir = self.audit.dir.display(),
        )
    }
}
