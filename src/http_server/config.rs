//! HTTP Server Configuration
//!
//! Bind address, collection file locations and CORS settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::storage::CollectionKind;

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 5000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the collection files (default: "data")
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Users collection file name, relative to `data_dir`
    #[serde(default = "default_users_file")]
    pub users_file: String,

    /// Posts collection file name, relative to `data_dir`
    #[serde(default = "default_posts_file")]
    pub posts_file: String,

    /// CORS allowed origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_users_file() -> String {
    "users.json".to_string()
}

fn default_posts_file() -> String {
    "posts.json".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_dir: default_data_dir(),
            users_file: default_users_file(),
            posts_file: default_posts_file(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Create a config rooted at `data_dir` with every other value defaulted
    pub fn with_data_dir(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(&self.users_file)
    }

    pub fn posts_path(&self) -> PathBuf {
        self.data_dir.join(&self.posts_file)
    }

    /// File backing the given collection
    pub fn collection_path(&self, kind: CollectionKind) -> PathBuf {
        match kind {
            CollectionKind::Users => self.users_path(),
            CollectionKind::Posts => self.posts_path(),
        }
    }

    /// Check the values that cannot be defaulted away
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("port must be > 0".to_string());
        }
        if self.users_file.trim().is_empty() {
            return Err("users_file must not be empty".to_string());
        }
        if self.posts_file.trim().is_empty() {
            return Err("posts_file must not be empty".to_string());
        }
        if self.users_path() == self.posts_path() {
            return Err("users_file and posts_file must differ".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.users_path(), PathBuf::from("data/users.json"));
        assert_eq!(config.posts_path(), PathBuf::from("data/posts.json"));
        assert!(config.cors_origins.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            port: 8080,
            ..Default::default()
        };
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ServerConfig =
            serde_json::from_str(r#"{"port": 7000, "data_dir": "/srv/flat"}"#).unwrap();
        assert_eq!(config.port, 7000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(
            config.collection_path(CollectionKind::Posts),
            PathBuf::from("/srv/flat/posts.json")
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_port = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert!(zero_port.validate().is_err());

        let same_file = ServerConfig {
            posts_file: "users.json".to_string(),
            ..Default::default()
        };
        assert!(same_file.validate().is_err());

        let empty_file = ServerConfig {
            users_file: " ".to_string(),
            ..Default::default()
        };
        assert!(empty_file.validate().is_err());
    }
}
