//! Object store reached over HTTP(S), e.g. a public or presigned bucket URL.

use crate::domain::error::DashboardError;
use crate::ports::object_store_port::ObjectStorePort;
use reqwest::StatusCode;
use std::time::Duration;

pub struct HttpStoreAdapter {
    client: reqwest::blocking::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl HttpStoreAdapter {
    pub fn new(
        base_url: &str,
        bearer_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, DashboardError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("sectorboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DashboardError::Storage {
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer_token,
        })
    }

    pub fn object_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key.trim_start_matches('/'))
    }
}

impl ObjectStorePort for HttpStoreAdapter {
    fn get_object(&self, key: &str) -> Result<Vec<u8>, DashboardError> {
        let url = self.object_url(key);
        let mut request = self.client.get(&url);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().map_err(|e| DashboardError::Storage {
            reason: format!("GET {url}: {e}"),
        })?;

        match response.status() {
            // S3 answers 403 for missing keys when listing is not allowed.
            StatusCode::NOT_FOUND | StatusCode::FORBIDDEN => Err(DashboardError::ObjectNotFound {
                key: key.to_string(),
            }),
            status if !status.is_success() => Err(DashboardError::Storage {
                reason: format!("GET {url}: HTTP {status}"),
            }),
            _ => response
                .bytes()
                .map(|b| b.to_vec())
                .map_err(|e| DashboardError::Storage {
                    reason: format!("GET {url}: {e}"),
                }),
        }
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_url_joins_without_double_slash() {
        let store =
            HttpStoreAdapter::new("https://investpy.s3.amazonaws.com/", None, Duration::from_secs(5))
                .unwrap();
        assert_eq!(
            store.object_url("APER/data.feather"),
            "https://investpy.s3.amazonaws.com/APER/data.feather"
        );
        assert_eq!(
            store.object_url("/lookup.feather"),
            "https://investpy.s3.amazonaws.com/lookup.feather"
        );
    }

    #[test]
    fn unreachable_host_is_storage_error() {
        let store =
            HttpStoreAdapter::new("http://127.0.0.1:9", None, Duration::from_millis(500)).unwrap();
        let err = store.get_object("lookup.feather").unwrap_err();
        assert!(matches!(err, DashboardError::Storage { .. }));
    }
}
