//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.trim().to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_deref()
            .and_then(Self::parse_bool)
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
[storage]
backend = local
path = /srv/investpy
series_key = {ticker}/data.feather
timeout_secs = 12

[dashboard]
title = Malaysian Stocks by Sector
default_sector =   Pharmaceuticals

[logging]
ansi = off
"#;

    #[test]
    fn from_string_parses_sections() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(
            adapter.get_string("storage", "path"),
            Some("/srv/investpy".to_string())
        );
        assert_eq!(
            adapter.get_string("storage", "series_key"),
            Some("{ticker}/data.feather".to_string())
        );
        assert_eq!(
            adapter.get_string("dashboard", "title"),
            Some("Malaysian Stocks by Sector".to_string())
        );
    }

    #[test]
    fn missing_keys_are_none() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.get_string("storage", "base_url"), None);
        assert_eq!(adapter.get_string("web", "listen"), None);
    }

    #[test]
    fn get_int_parses_and_defaults() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.get_int("storage", "timeout_secs", 30), 12);
        assert_eq!(adapter.get_int("storage", "missing", 30), 30);
        let bad = FileConfigAdapter::from_string("[storage]\ntimeout_secs = soon\n").unwrap();
        assert_eq!(bad.get_int("storage", "timeout_secs", 30), 30);
    }

    #[test]
    fn get_bool_understands_on_off() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert!(!adapter.get_bool("logging", "ansi", true));
        assert!(adapter.get_bool("logging", "missing", true));
        let weird = FileConfigAdapter::from_string("[logging]\nansi = maybe\n").unwrap();
        assert!(weird.get_bool("logging", "ansi", true));
    }

    #[test]
    fn provided_helpers_trim_and_require() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(
            adapter.get_or("dashboard", "default_sector", "All"),
            "Pharmaceuticals"
        );
        assert_eq!(adapter.get_or("web", "listen", "127.0.0.1:8050"), "127.0.0.1:8050");
        assert!(adapter.require("storage", "backend").is_ok());
        assert!(adapter.require("storage", "base_url").is_err());
    }

    #[test]
    fn from_file_reads_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[web]\nlisten = 0.0.0.0:9000\n").unwrap();
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("web", "listen"),
            Some("0.0.0.0:9000".to_string())
        );
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        assert!(FileConfigAdapter::from_file("/nonexistent/sectorboard.ini").is_err());
    }
}
