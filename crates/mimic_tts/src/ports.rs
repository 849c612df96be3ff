//! Port definitions for speech providers
//!
//! Defines the contract a host application uses to drive a text-to-speech
//! provider without knowing which backend implements it.

use async_trait::async_trait;

use crate::error::MimicError;
use crate::types::{ProviderOptions, SynthesizedAudio};

/// Port for pluggable text-to-speech providers
///
/// # Example
///
/// ```ignore
/// use mimic_tts::{ProviderOptions, TextToSpeechProvider};
///
/// async fn say(
///     tts: &impl TextToSpeechProvider,
///     text: &str,
/// ) -> Result<Vec<u8>, MimicError> {
///     let options = tts.default_options();
///     let audio = tts.synthesize(text, tts.default_language(), &options).await?;
///     Ok(audio.data().to_vec())
/// }
/// ```
#[async_trait]
pub trait TextToSpeechProvider: Send + Sync {
    /// Human-readable provider name
    fn name(&self) -> &str;

    /// Language used when the host does not pick one
    fn default_language(&self) -> &str;

    /// Languages the provider accepts
    fn supported_languages(&self) -> &'static [&'static str];

    /// Options applied when the host does not pass its own
    fn default_options(&self) -> ProviderOptions;

    /// Option keys a host may pass per call
    fn supported_options(&self) -> &'static [&'static str];

    /// Synthesize `text` into audio
    ///
    /// # Arguments
    ///
    /// * `text` - Text to synthesize
    /// * `language` - Language requested by the host
    /// * `options` - Per-call options
    ///
    /// # Errors
    ///
    /// Returns `MimicError` if synthesis fails.
    async fn synthesize(
        &self,
        text: &str,
        language: &str,
        options: &ProviderOptions,
    ) -> Result<SynthesizedAudio, MimicError>;
}
