//! Common types used across chbridge

use crate::error::BridgeError;
use serde::{Deserialize, Serialize};

/// Direction of a transfer operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// ClickHouse table to flat file
    Export,
    /// Flat file to ClickHouse table
    Import,
}

impl Direction {
    /// The source type string the ingestion service expects
    pub fn source_type(&self) -> &'static str {
        match self {
            Direction::Export => "ClickHouse",
            Direction::Import => "FlatFile",
        }
    }

    /// Verb for user-facing messages ("export" / "import")
    pub fn verb(&self) -> &'static str {
        match self {
            Direction::Export => "export",
            Direction::Import => "import",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.verb())
    }
}

impl std::str::FromStr for Direction {
    type Err = BridgeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "export" => Ok(Direction::Export),
            "import" => Ok(Direction::Import),
            _ => Err(BridgeError::parse(format!("Invalid direction: {}", s))),
        }
    }
}

/// ClickHouse connection parameters
///
/// Serialized camelCase to match the ingestion service wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    /// JWT token or password; empty means unauthenticated
    #[serde(default)]
    pub jwt_token: String,
}

impl ConnectionConfig {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        database: impl Into<String>,
        user: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            database: database.into(),
            user: user.into(),
            jwt_token: String::new(),
        }
    }

    /// Set the JWT token / password
    pub fn with_jwt_token(mut self, token: impl Into<String>) -> Self {
        self.jwt_token = token.into();
        self
    }
}

impl std::fmt::Display for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print credentials
        write!(f, "{}:{}/{}", self.host, self.port, self.database)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_source_type() {
        assert_eq!(Direction::Export.source_type(), "ClickHouse");
        assert_eq!(Direction::Import.source_type(), "FlatFile");
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("export".parse::<Direction>().unwrap(), Direction::Export);
        assert_eq!("Import".parse::<Direction>().unwrap(), Direction::Import);

        let err = "sideways".parse::<Direction>().unwrap_err();
        assert!(matches!(err, BridgeError::Parse(_)));
    }

    #[test]
    fn test_connection_config_wire_format() {
        let config = ConnectionConfig::new("localhost", 8123, "default", "default")
            .with_jwt_token("secret");

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"jwtToken\":\"secret\""));
        assert!(json.contains("\"host\":\"localhost\""));
    }

    #[test]
    fn test_connection_config_display_hides_credentials() {
        let config = ConnectionConfig::new("db.internal", 8123, "analytics", "reader")
            .with_jwt_token("secret");

        let shown = config.to_string();
        assert_eq!(shown, "db.internal:8123/analytics");
        assert!(!shown.contains("secret"));
    }
}
