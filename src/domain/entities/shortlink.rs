//! Shortlink read model used by analytics.

/// The fields of a shortlink that reporting needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortlinkSummary {
    pub id: i64,
    pub short_code: String,
    pub custom_alias: Option<String>,
    pub clicks: i64,
    pub is_active: bool,
}

impl ShortlinkSummary {
    /// Display name: the custom alias when set, otherwise the short code.
    pub fn display_name(&self) -> &str {
        match self.custom_alias.as_deref() {
            Some(alias) if !alias.is_empty() => alias,
            _ => &self.short_code,
        }
    }
}
