//! Mimic provider adapter
//!
//! Implements `TextToSpeechProvider` on top of a [`MimicClient`]: host
//! configuration becomes client parameters, host speak calls become
//! [`MimicClient::speak`] calls, and the configured codec becomes the
//! container tag handed back.

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::capabilities::{EffectSpec, SUPPORTED_LOCALES, container_for};
use crate::client::MimicClient;
use crate::config::ProviderConfig;
use crate::error::MimicError;
use crate::ports::TextToSpeechProvider;
use crate::types::{EFFECT_OPTION, ProviderOptions, SynthesizedAudio};

/// Option keys accepted per call
const SUPPORTED_OPTIONS: [&str; 1] = [EFFECT_OPTION];

/// Text-to-speech provider backed by a Mimic server
#[derive(Debug, Clone)]
pub struct MimicProvider {
    client: MimicClient,
    effects: EffectSpec,
}

impl MimicProvider {
    /// Provider name reported to the host
    pub const NAME: &'static str = "MimicTTS";

    /// Create a new provider
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: ProviderConfig) -> Result<Self, MimicError> {
        let client = MimicClient::new(config.client_config())?;

        debug!(
            host = client.host(),
            port = client.port(),
            codec = %client.codec(),
            default_effects = config.effects.len(),
            "Mimic provider configured"
        );

        Ok(Self {
            client,
            effects: config.effects,
        })
    }

    /// Underlying client
    #[must_use]
    pub const fn client(&self) -> &MimicClient {
        &self.client
    }

    /// Effects retained from the configuration
    #[must_use]
    pub const fn default_effects(&self) -> &EffectSpec {
        &self.effects
    }
}

#[async_trait]
impl TextToSpeechProvider for MimicProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn default_language(&self) -> &str {
        self.client.locale()
    }

    fn supported_languages(&self) -> &'static [&'static str] {
        &SUPPORTED_LOCALES
    }

    fn default_options(&self) -> ProviderOptions {
        ProviderOptions::with_effects(self.effects.clone())
    }

    fn supported_options(&self) -> &'static [&'static str] {
        &SUPPORTED_OPTIONS
    }

    /// The configured locale is always used; `language` does not override it.
    #[instrument(skip(self, text, options), fields(text_len = text.len(), language = %language))]
    async fn synthesize(
        &self,
        text: &str,
        language: &str,
        options: &ProviderOptions,
    ) -> Result<SynthesizedAudio, MimicError> {
        let effects = options
            .effects
            .as_ref()
            .ok_or_else(|| MimicError::MissingOption(EFFECT_OPTION.to_string()))?;

        if language != self.client.locale() {
            debug!(
                configured = self.client.locale(),
                "Requested language ignored, using configured locale"
            );
        }

        let data = self.client.speak(text, effects).await?;
        let format = container_for(self.client.codec())?;

        Ok(SynthesizedAudio::new(format, data))
    }
}
