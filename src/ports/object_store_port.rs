//! Object store port trait.

use crate::domain::error::DashboardError;

/// Raw byte access to objects addressed by key.
pub trait ObjectStorePort {
    /// Returns `ObjectNotFound` when the key has no backing object.
    fn get_object(&self, key: &str) -> Result<Vec<u8>, DashboardError>;

    /// Human-readable location, used in log lines.
    fn describe(&self) -> String;
}
