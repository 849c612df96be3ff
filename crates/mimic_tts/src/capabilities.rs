//! Capability tables of a Mimic speech server
//!
//! Fixed sets of locales, codecs and audio effects the server understands,
//! plus the codec → container mapping used when handing audio to a host.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MimicError;
use crate::types::ContainerFormat;

/// Locale codes accepted by the server
pub const SUPPORTED_LOCALES: [&str; 25] = [
    "af_ZA", "bn", "de_DE", "el_GR", "en_UK", "en_US", "es_ES", "fa", "fi_FI", "fr_FR", "gu_IN",
    "ha_NE", "hu_HU", "it_IT", "jv_ID", "ko_KO", "ne_NP", "nl", "pl_PL", "ru_RU", "sw", "te_IN",
    "tn_ZA", "uk_UA", "vi_VN",
];

/// Check whether a locale code is in [`SUPPORTED_LOCALES`]
#[must_use]
pub fn is_supported_locale(locale: &str) -> bool {
    SUPPORTED_LOCALES.contains(&locale)
}

/// Audio codec requested from the server (`AUDIO` form field)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Codec {
    /// RIFF WAVE container
    #[default]
    WaveFile,
    /// Sun/NeXT AU container
    AuFile,
    /// Apple AIFF container
    AiffFile,
}

impl Codec {
    /// All codecs, in table order
    pub const ALL: [Self; 3] = [Self::WaveFile, Self::AuFile, Self::AiffFile];

    /// Wire name sent to the server
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WaveFile => "WAVE_FILE",
            Self::AuFile => "AU_FILE",
            Self::AiffFile => "AIFF_FILE",
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Codec {
    type Err = MimicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|codec| codec.as_str() == s)
            .ok_or_else(|| MimicError::UnsupportedCodec(s.to_string()))
    }
}

/// Input type of the text sent to the server (`INPUT_TYPE` form field)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InputFormat {
    /// Plain text
    #[default]
    Text,
}

impl InputFormat {
    /// Wire name sent to the server
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "TEXT",
        }
    }
}

/// Codec → container format table
///
/// Kept apart from [`Codec`] so a host-facing tag is only ever produced by
/// looking it up here.
const CODEC_CONTAINERS: [(Codec, ContainerFormat); 3] = [
    (Codec::WaveFile, ContainerFormat::Wav),
    (Codec::AiffFile, ContainerFormat::Aiff),
    (Codec::AuFile, ContainerFormat::Au),
];

/// Look up the container format produced by a codec
///
/// # Errors
///
/// Returns `MimicError::Configuration` if the codec has no table entry.
pub fn container_for(codec: Codec) -> Result<ContainerFormat, MimicError> {
    CODEC_CONTAINERS
        .iter()
        .find(|(c, _)| *c == codec)
        .map(|(_, container)| *container)
        .ok_or_else(|| {
            MimicError::Configuration(format!("no container format mapped for codec {codec}"))
        })
}

/// Server-side audio effect
///
/// Ordering follows declaration order, which is also the order effects are
/// written into a request.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Effect {
    /// Amplitude scaling
    Volume,
    /// Vocal tract length scaling
    TractScaler,
    /// Pitch scaling
    F0Scale,
    /// Pitch offset in Hz
    F0Add,
    /// Speaking rate
    Rate,
    /// Robotic voice
    Robot,
    /// Whispered voice
    Whisper,
    /// Stadium reverb
    Stadium,
    /// Multi-tap chorus
    Chorus,
    /// FIR filter
    #[serde(rename = "FIRFilter")]
    FirFilter,
    /// Jet pilot radio
    JetPilot,
}

impl Effect {
    /// All effects, in table order
    pub const ALL: [Self; 11] = [
        Self::Volume,
        Self::TractScaler,
        Self::F0Scale,
        Self::F0Add,
        Self::Rate,
        Self::Robot,
        Self::Whisper,
        Self::Stadium,
        Self::Chorus,
        Self::FirFilter,
        Self::JetPilot,
    ];

    /// Name used in `effect_<name>_*` form fields
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Volume => "Volume",
            Self::TractScaler => "TractScaler",
            Self::F0Scale => "F0Scale",
            Self::F0Add => "F0Add",
            Self::Rate => "Rate",
            Self::Robot => "Robot",
            Self::Whisper => "Whisper",
            Self::Stadium => "Stadium",
            Self::Chorus => "Chorus",
            Self::FirFilter => "FIRFilter",
            Self::JetPilot => "JetPilot",
        }
    }

    /// Parameter string the server documents as the default for this effect
    #[must_use]
    pub const fn default_parameters(&self) -> &'static str {
        match self {
            Self::Volume => "amount:2.0;",
            Self::TractScaler => "amount:1.5;",
            Self::F0Scale => "f0Scale:2.0;",
            Self::F0Add => "f0Add:50.0;",
            Self::Rate => "durScale:1.5;",
            Self::Robot | Self::Whisper => "amount:100.0;",
            Self::Stadium => "amount:100.0",
            Self::Chorus => "delay1:466;amp1:0.54;delay2:600;amp2:-0.10;delay3:250;amp3:0.30",
            Self::FirFilter => "type:3;fc1:500.0;fc2:2000.0",
            Self::JetPilot => "",
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Effect {
    type Err = MimicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|effect| effect.name() == s)
            .ok_or_else(|| MimicError::UnknownEffect(s.to_string()))
    }
}

/// Effects to apply to one synthesis, keyed by effect
///
/// Parameter strings are passed to the server untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectSpec(BTreeMap<Effect, String>);

impl EffectSpec {
    /// Create an empty effect set
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Build an effect set from name/parameter pairs
    ///
    /// # Errors
    ///
    /// Returns `MimicError::UnknownEffect` for the first name outside the
    /// effect table.
    pub fn from_named<I, K, V>(entries: I) -> Result<Self, MimicError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        entries
            .into_iter()
            .map(|(name, params)| {
                let effect = name.as_ref().parse::<Effect>()?;
                let params: String = params.into();
                Ok((effect, params))
            })
            .collect::<Result<Self, MimicError>>()
    }

    /// Add or replace an effect
    #[must_use]
    pub fn with(mut self, effect: Effect, parameters: impl Into<String>) -> Self {
        self.insert(effect, parameters);
        self
    }

    /// Add or replace an effect, returning the previous parameters
    pub fn insert(&mut self, effect: Effect, parameters: impl Into<String>) -> Option<String> {
        self.0.insert(effect, parameters.into())
    }

    /// Parameters for an effect, if selected
    #[must_use]
    pub fn get(&self, effect: Effect) -> Option<&str> {
        self.0.get(&effect).map(String::as_str)
    }

    /// Iterate selected effects in table order
    pub fn iter(&self) -> impl Iterator<Item = (Effect, &str)> {
        self.0.iter().map(|(effect, params)| (*effect, params.as_str()))
    }

    /// Number of selected effects
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no effect is selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy entries of `other` over this set
    pub fn extend_from(&mut self, other: &Self) {
        self.0
            .extend(other.0.iter().map(|(effect, params)| (*effect, params.clone())));
    }
}

impl FromIterator<(Effect, String)> for EffectSpec {
    fn from_iter<T: IntoIterator<Item = (Effect, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Every effect with its default parameter string
#[must_use]
pub fn supported_effects() -> BTreeMap<Effect, &'static str> {
    Effect::ALL
        .into_iter()
        .map(|effect| (effect, effect.default_parameters()))
        .collect()
}
