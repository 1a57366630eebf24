//! HTTP server configuration from environment variables.
//!
//! - `HOST`: bind address (default: 0.0.0.0)
//! - `PORT`: bind port (default: 8080)
//! - `ALLOWED_ORIGINS`: comma-separated CORS allow-list; permissive when
//!   unset or empty

use std::env;
use std::net::SocketAddr;

/// Configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Origins allowed by the CORS policy; empty means any origin
    pub allowed_origins: Vec<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            allowed_origins: Vec::new(),
        }
    }
}

impl HttpConfig {
    /// Build configuration from environment variables.
    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8080);
        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_default();

        Self {
            host,
            port,
            allowed_origins,
        }
    }

    /// Socket address to bind, or an error when host/port do not parse.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
