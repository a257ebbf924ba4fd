use gray_codec::{HuffmanDecoder, Scheme};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Application configuration loaded from a YAML file
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Schemes to benchmark, in run order
    #[serde(default = "default_schemes", deserialize_with = "deserialize_schemes")]
    pub schemes: Vec<Scheme>,

    /// Decoding strategy for Huffman artifacts
    #[serde(default)]
    pub huffman_decoder: DecoderChoice,

    /// Compare every decoded image against its source
    #[serde(default = "default_verify")]
    pub verify: bool,
}

fn default_schemes() -> Vec<Scheme> {
    Scheme::ALL.to_vec()
}

fn default_verify() -> bool {
    true
}

fn deserialize_schemes<'de, D>(deserializer: D) -> Result<Vec<Scheme>, D::Error>
where
    D: Deserializer<'de>,
{
    let names = Vec::<String>::deserialize(deserializer)?;
    names
        .iter()
        .map(|name| name.parse().map_err(serde::de::Error::custom))
        .collect()
}

/// Config-file spelling of [`HuffmanDecoder`]
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DecoderChoice {
    #[default]
    LengthScan,
    TreeWalk,
}

impl DecoderChoice {
    pub fn name(&self) -> &'static str {
        match self {
            DecoderChoice::LengthScan => "length-scan",
            DecoderChoice::TreeWalk => "tree-walk",
        }
    }
}

impl fmt::Display for DecoderChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DecoderChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "length-scan" => Ok(DecoderChoice::LengthScan),
            "tree-walk" => Ok(DecoderChoice::TreeWalk),
            other => Err(format!(
                "unknown Huffman decoder '{other}' (expected length-scan or tree-walk)"
            )),
        }
    }
}

impl From<DecoderChoice> for HuffmanDecoder {
    fn from(choice: DecoderChoice) -> Self {
        match choice {
            DecoderChoice::LengthScan => HuffmanDecoder::LengthScan,
            DecoderChoice::TreeWalk => HuffmanDecoder::TreeWalk,
        }
    }
}

impl AppConfig {
    /// Load configuration from an optional YAML file.
    ///
    /// A missing path yields the defaults. An unreadable or invalid file is
    /// logged and also yields the defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::debug!("No config file given, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        schemes = config.schemes.len(),
                        decoder = %config.huffman_decoder,
                        verify = config.verify,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), %e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), %e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Parse a YAML document. An empty scheme list falls back to every scheme.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        let mut config: Self = serde_yaml::from_str(content)?;
        if config.schemes.is_empty() {
            config.schemes = default_schemes();
        }
        Ok(config)
    }

    /// Replace the scheme list unless `schemes` is empty.
    pub fn with_schemes(mut self, schemes: Vec<Scheme>) -> Self {
        if !schemes.is_empty() {
            self.schemes = schemes;
        }
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            schemes: default_schemes(),
            huffman_decoder: DecoderChoice::default(),
            verify: default_verify(),
        }
    }
}
