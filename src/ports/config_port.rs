//! Configuration access port trait.

use crate::domain::error::DashboardError;

/// Sectioned key/value configuration.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool;

    /// Trimmed value, with blank entries treated as absent.
    fn get_trimmed(&self, section: &str, key: &str) -> Option<String> {
        self.get_string(section, key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn get_or(&self, section: &str, key: &str, default: &str) -> String {
        self.get_trimmed(section, key)
            .unwrap_or_else(|| default.to_string())
    }

    fn require(&self, section: &str, key: &str) -> Result<String, DashboardError> {
        self.get_trimmed(section, key)
            .ok_or_else(|| DashboardError::ConfigMissing {
                section: section.into(),
                key: key.into(),
            })
    }
}
