//! Configuration for the Mimic client and provider

use serde::{Deserialize, Serialize};

use crate::capabilities::{Codec, EffectSpec, InputFormat, is_supported_locale};
use crate::error::MimicError;

/// Connection parameters of a [`MimicClient`](crate::MimicClient)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server host name or address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Audio codec requested from the server
    pub codec: Codec,
    /// Locale code
    pub locale: String,
    /// Voice name
    pub voice: String,
    /// Input type of the text
    pub input_format: InputFormat,
    /// Optional bound on one HTTP exchange in milliseconds
    pub timeout_ms: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ProviderConfig::default().client_config()
    }
}

impl ClientConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `MimicError::UnsupportedLocale` for a locale outside the
    /// locale table and `MimicError::Configuration` for other invalid values.
    pub fn validate(&self) -> Result<(), MimicError> {
        if self.host.trim().is_empty() {
            return Err(MimicError::Configuration("Host must not be empty".to_string()));
        }

        if self.port == 0 {
            return Err(MimicError::Configuration(
                "Port must be between 1 and 65535".to_string(),
            ));
        }

        if !is_supported_locale(&self.locale) {
            return Err(MimicError::UnsupportedLocale(self.locale.clone()));
        }

        if self.voice.trim().is_empty() {
            return Err(MimicError::Configuration("Voice must not be empty".to_string()));
        }

        if self.timeout_ms == Some(0) {
            return Err(MimicError::Configuration(
                "Timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Provider configuration as supplied by the host
///
/// Field names follow the host's configuration keys, so a TOML table like
///
/// ```toml
/// host = "mimic.local"
/// language = "de_DE"
///
/// [effect]
/// Volume = "amount:2.0;"
/// ```
///
/// deserializes directly, with every omitted key taking its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Server host name or address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Locale code
    #[serde(rename = "language", default = "default_locale")]
    pub locale: String,

    /// Voice name
    #[serde(default = "default_voice")]
    pub voice: String,

    /// Audio codec
    #[serde(default)]
    pub codec: Codec,

    /// Default effects, keys restricted to the effect table
    #[serde(rename = "effect", default)]
    pub effects: EffectSpec,

    /// Optional request timeout in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

fn default_host() -> String {
    "localhost".to_string()
}

const fn default_port() -> u16 {
    59125
}

fn default_locale() -> String {
    "en_US".to_string()
}

fn default_voice() -> String {
    "cmu-slt-hsmm".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            locale: default_locale(),
            voice: default_voice(),
            codec: Codec::default(),
            effects: EffectSpec::default(),
            timeout_ms: None,
        }
    }
}

impl ProviderConfig {
    /// Client parameters derived from this configuration
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            host: self.host.clone(),
            port: self.port,
            codec: self.codec,
            locale: self.locale.clone(),
            voice: self.voice.clone(),
            input_format: InputFormat::Text,
            timeout_ms: self.timeout_ms,
        }
    }

    /// Validate the configuration
    ///
    /// Effect names and codecs are already constrained by their types.
    ///
    /// # Errors
    ///
    /// Returns an error if any connection parameter is invalid.
    pub fn validate(&self) -> Result<(), MimicError> {
        self.client_config().validate()
    }
}
