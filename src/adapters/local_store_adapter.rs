//! Object store backed by a local directory.

use crate::domain::error::DashboardError;
use crate::ports::object_store_port::ObjectStorePort;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

pub struct LocalStoreAdapter {
    root: PathBuf,
}

impl LocalStoreAdapter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Keys are relative paths; absolute keys and `..` segments are rejected.
    fn object_path(&self, key: &str) -> Result<PathBuf, DashboardError> {
        let relative = std::path::Path::new(key);
        let escapes = relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, std::path::Component::ParentDir));
        if escapes {
            return Err(DashboardError::Storage {
                reason: format!("object key {key:?} escapes the store root"),
            });
        }
        Ok(self.root.join(relative))
    }
}

impl ObjectStorePort for LocalStoreAdapter {
    fn get_object(&self, key: &str) -> Result<Vec<u8>, DashboardError> {
        let path = self.object_path(key)?;
        fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => DashboardError::ObjectNotFound {
                key: key.to_string(),
            },
            _ => DashboardError::Storage {
                reason: format!("failed to read {}: {}", path.display(), e),
            },
        })
    }

    fn describe(&self) -> String {
        format!("dir:{}", self.root.display())
    }
}
