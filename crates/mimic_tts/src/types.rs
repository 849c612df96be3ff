//! Types handed to the host
//!
//! Container format tags and synthesized audio.

use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::capabilities::EffectSpec;

/// Audio container the host receives, as opposed to the server-side codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerFormat {
    /// WAV format
    Wav,
    /// AIFF format
    Aiff,
    /// AU format
    Au,
}

impl ContainerFormat {
    /// Tag used by the host (also the file extension)
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Aiff => "aiff",
            Self::Au => "au",
        }
    }

    /// Get the MIME type for this container
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::Aiff => "audio/aiff",
            Self::Au => "audio/basic",
        }
    }
}

impl fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key of the effects option
pub const EFFECT_OPTION: &str = "effect";

/// Per-call options passed by the host
///
/// Whatever the host passes here is used as is; provider defaults are not
/// merged in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderOptions {
    /// Effects to apply, required by the Mimic provider
    #[serde(rename = "effect", default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<EffectSpec>,
}

impl ProviderOptions {
    /// Options carrying the given effects
    #[must_use]
    pub const fn with_effects(effects: EffectSpec) -> Self {
        Self {
            effects: Some(effects),
        }
    }
}

/// Audio returned by one synthesis
#[derive(Debug, Clone)]
pub struct SynthesizedAudio {
    format: ContainerFormat,
    data: Bytes,
}

impl SynthesizedAudio {
    /// Create new synthesized audio
    #[must_use]
    pub const fn new(format: ContainerFormat, data: Bytes) -> Self {
        Self { format, data }
    }

    /// Get the container format
    #[must_use]
    pub const fn format(&self) -> ContainerFormat {
        self.format
    }

    /// Get the raw audio bytes
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Split into `(format, bytes)`
    #[must_use]
    pub fn into_parts(self) -> (ContainerFormat, Bytes) {
        (self.format, self.data)
    }

    /// Get the size of the audio data in bytes
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Check if the audio data is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Generate a filename with appropriate extension
    #[must_use]
    pub fn filename(&self, base: &str) -> String {
        format!("{}.{}", base, self.format.as_str())
    }
}
