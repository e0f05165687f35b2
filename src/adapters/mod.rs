//! Concrete adapter implementations for ports.

pub mod csv_codec;
pub mod feather_codec;
pub mod file_config_adapter;
#[cfg(feature = "remote")]
pub mod http_store_adapter;
pub mod local_store_adapter;
pub mod snapshot_adapter;
#[cfg(feature = "web")]
pub mod web;
