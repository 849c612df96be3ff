//! Mimic server client
//!
//! Speaks the MaryTTS-compatible `/process` protocol: a form-encoded POST
//! carrying text, voice, locale, codec and optional effects, answered with raw
//! audio bytes in the requested codec.

use std::collections::BTreeMap;
use std::net::Ipv6Addr;
use std::time::Duration;

use bytes::Bytes;
use reqwest::{Client, Response, Url};
use tracing::{debug, instrument, warn};

use crate::capabilities::{Codec, Effect, EffectSpec, InputFormat, SUPPORTED_LOCALES};
use crate::config::ClientConfig;
use crate::error::MimicError;

/// Path of the synthesis endpoint
const PROCESS_PATH: &str = "/process";

/// Constant `OUTPUT_TYPE` value
const OUTPUT_TYPE_AUDIO: &str = "AUDIO";

/// Client for one Mimic server
///
/// Configuration is fixed at construction. Each [`speak`](Self::speak) call
/// uses its own connection; idle connections are never kept for reuse.
#[derive(Debug, Clone)]
pub struct MimicClient {
    client: Client,
    config: ClientConfig,
    process_url: Url,
}

impl MimicClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, MimicError> {
        config.validate()?;
        let process_url = process_url(&config.host, config.port)?;

        let mut builder = Client::builder().pool_max_idle_per_host(0);
        if let Some(timeout_ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }

        let client = builder.build().map_err(|e| {
            MimicError::Configuration(format!("Failed to create HTTP client: {e}"))
        })?;

        Ok(Self {
            client,
            config,
            process_url,
        })
    }

    /// Server host
    #[must_use]
    pub fn host(&self) -> &str {
        &self.config.host
    }

    /// Server port
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.config.port
    }

    /// Configured locale
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.config.locale
    }

    /// Configured voice
    #[must_use]
    pub fn voice(&self) -> &str {
        &self.config.voice
    }

    /// Configured codec
    #[must_use]
    pub const fn codec(&self) -> Codec {
        self.config.codec
    }

    /// Configured input format
    #[must_use]
    pub const fn input_format(&self) -> InputFormat {
        self.config.input_format
    }

    /// Codecs the server can produce
    #[must_use]
    pub const fn supported_codecs() -> [Codec; 3] {
        Codec::ALL
    }

    /// Locales the server understands
    #[must_use]
    pub const fn supported_locales() -> &'static [&'static str] {
        &SUPPORTED_LOCALES
    }

    /// Effects with their default parameter strings
    #[must_use]
    pub fn supported_effects() -> BTreeMap<Effect, &'static str> {
        crate::capabilities::supported_effects()
    }

    /// Form parameters for one synthesis request, in wire order
    #[must_use]
    pub fn form_params(&self, text: &str, effects: &EffectSpec) -> Vec<(String, String)> {
        let mut params = vec![
            ("INPUT_TEXT".to_string(), text.to_string()),
            (
                "INPUT_TYPE".to_string(),
                self.config.input_format.as_str().to_string(),
            ),
            ("OUTPUT_TYPE".to_string(), OUTPUT_TYPE_AUDIO.to_string()),
            ("LOCALE".to_string(), self.config.locale.clone()),
            ("AUDIO".to_string(), self.config.codec.as_str().to_string()),
            ("VOICE".to_string(), self.config.voice.clone()),
        ];

        for (effect, parameters) in effects.iter() {
            let name = effect.name();
            params.push((format!("effect_{name}_selected"), "on".to_string()));
            params.push((format!("effect_{name}_parameters"), parameters.to_string()));
        }

        params
    }

    /// Synthesize `text` and return the raw audio bytes
    ///
    /// The body is encoded in the configured codec. Empty text is sent as is.
    ///
    /// # Errors
    ///
    /// Returns `MimicError::RemoteSynthesis` for any non-200 response and a
    /// transport error (`ConnectionFailed`, `Timeout`, `RequestFailed`) when the
    /// server cannot be reached.
    #[instrument(
        skip(self, text, effects),
        fields(
            text_len = text.len(),
            codec = %self.config.codec,
            locale = %self.config.locale,
            voice = %self.config.voice,
            effects = effects.len(),
        )
    )]
    pub async fn speak(&self, text: &str, effects: &EffectSpec) -> Result<Bytes, MimicError> {
        debug!(url = %self.process_url, "Sending synthesis request");

        let response = self
            .client
            .post(self.process_url.clone())
            .form(&self.form_params(text, effects))
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let reason = reason_phrase(&response);
            let body = match response.bytes().await {
                Ok(body) => body,
                Err(e) => {
                    debug!(error = %e, "Failed to read error body");
                    Bytes::new()
                },
            };
            let detail = first_line(&body);

            warn!(status = status.as_u16(), %reason, %detail, "Mimic server rejected request");

            return Err(MimicError::RemoteSynthesis {
                status: status.as_u16(),
                reason,
                detail,
            });
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| MimicError::InvalidResponse(format!("Failed to read audio: {e}")))?;

        debug!(audio_size = audio.len(), "Speech synthesis complete");

        Ok(audio)
    }
}

/// Synthesis endpoint for `host:port`
///
/// IPv6 literals are bracketed so they can stand in the authority.
fn process_url(host: &str, port: u16) -> Result<Url, MimicError> {
    let authority = match host.parse::<Ipv6Addr>() {
        Ok(ip) => format!("[{ip}]:{port}"),
        Err(_) => format!("{host}:{port}"),
    };

    Url::parse(&format!("http://{authority}{PROCESS_PATH}"))
        .map_err(|e| MimicError::Configuration(format!("Invalid server address {host}: {e}")))
}

/// Reason phrase as sent by the server, or the canonical one for the status
fn reason_phrase(response: &Response) -> String {
    response
        .extensions()
        .get::<hyper::ext::ReasonPhrase>()
        .and_then(|reason| std::str::from_utf8(reason.as_bytes()).ok())
        .or_else(|| response.status().canonical_reason())
        .unwrap_or_default()
        .to_string()
}

fn first_line(body: &[u8]) -> String {
    String::from_utf8_lossy(body)
        .lines()
        .next()
        .unwrap_or_default()
        .trim_end()
        .to_string()
}
