//! TOML configuration for the splitter front end.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use smssplit_core::Encoding;

/// Parts addressable by the one-byte counter of the concatenation header.
pub const MAX_CONCATENATED_PARTS: usize = 255;

/// Splitter configuration for the `smssplit` front end.
///
/// This configuration includes:
/// - The default `Encoding` messages are split with
/// - The largest part count a message may need before it is refused
/// - How split results are printed
///
/// Every field has a default, so a TOML file only needs the keys it changes.
///
/// # Example
///
/// ```rust
/// use smssplit::{Encoding, SplitConfig};
///
/// let config = SplitConfig::from_toml_str("encoding = \"unicode\"").unwrap();
/// assert_eq!(config.encoding, Encoding::Unicode);
/// assert_eq!(config.max_parts, 255);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Encoding used when none is given on the command line
    pub encoding: Encoding,

    /// Refuse messages that need more parts than this
    pub max_parts: usize,

    /// Output format for split results
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One part per line, prefixed with its index
    #[default]
    Plain,
    /// The full segmentation as a JSON document
    Json,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            encoding: Encoding::Gsm,
            max_parts: MAX_CONCATENATED_PARTS,
            format: OutputFormat::Plain,
        }
    }
}

impl SplitConfig {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        std::fs::write(path, content)
            .with_context(|| format!("failed to write config {}", path.display()))?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_parts == 0 || self.max_parts > MAX_CONCATENATED_PARTS {
            bail!(
                "max_parts must be between 1 and {}, got {}",
                MAX_CONCATENATED_PARTS,
                self.max_parts
            );
        }
        Ok(())
    }

    /// Fail if a message split into `parts` parts exceeds `max_parts`.
    pub fn check_part_count(&self, parts: usize) -> Result<()> {
        if parts > self.max_parts {
            bail!(
                "message needs {} parts but at most {} are allowed",
                parts,
                self.max_parts
            );
        }
        Ok(())
    }
}
