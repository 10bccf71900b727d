//! Cloud provider definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Supported cloud providers. Only AWS ships a template set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudProvider {
    Aws,
}

impl CloudProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "aws",
        }
    }

    /// Get default region for the provider.
    pub fn default_region(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "us-east-1",
        }
    }
}

impl FromStr for CloudProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "aws" => Ok(CloudProvider::Aws),
            _ => Err(s.to_string()),
        }
    }
}

impl fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("AWS".parse::<CloudProvider>(), Ok(CloudProvider::Aws));
        assert_eq!("Aws".parse::<CloudProvider>(), Ok(CloudProvider::Aws));
        assert_eq!("gcp".parse::<CloudProvider>(), Err("gcp".to_string()));
    }

    #[test]
    fn test_defaults() {
        assert_eq!(CloudProvider::Aws.default_region(), "us-east-1");
        assert_eq!(CloudProvider::Aws.to_string(), "aws");
    }
}
