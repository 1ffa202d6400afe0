//! Configuration module
//!
//! Handles CLI configuration including the server URL and operator identity.

use anyhow::Result;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the pausegate server
    pub server_url: String,

    /// Operator name recorded on pause events
    pub who: Option<String>,
}

impl Config {
    /// Operator name, required by commands that change pause state
    pub fn who(&self) -> Result<&str> {
        match self.who.as_deref().map(str::trim) {
            Some(who) if !who.is_empty() => Ok(who),
            _ => anyhow::bail!("No operator name: pass --who or set USER"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(who: Option<&str>) -> Config {
        Config {
            server_url: "http://localhost:8080".to_string(),
            who: who.map(String::from),
        }
    }

    #[test]
    fn test_who() {
        assert_eq!(config(Some("alice")).who().unwrap(), "alice");
        assert!(config(Some("  ")).who().is_err());
        assert!(config(None).who().is_err());
    }
}
