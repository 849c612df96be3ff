//! Mimic TTS - client and provider adapter for Mimic speech servers
//!
//! Converts text to speech by delegating to a MaryTTS-compatible Mimic server:
//! - `MimicClient` - one form-encoded POST to `/process` per synthesis
//! - `MimicProvider` - binds a client to the `TextToSpeechProvider` port
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the host-facing trait (port)
//! - `provider` module adapts `MimicClient` to it
//! - `capabilities` module holds the fixed locale, codec and effect tables
//!
//! # Example
//!
//! ```ignore
//! use mimic_tts::{MimicProvider, ProviderConfig, TextToSpeechProvider};
//!
//! let provider = MimicProvider::new(ProviderConfig::default())?;
//!
//! let options = provider.default_options();
//! let audio = provider.synthesize("Hello, world!", "en_US", &options).await?;
//! std::fs::write(audio.filename("hello"), audio.data())?;
//! ```

pub mod capabilities;
pub mod client;
pub mod config;
pub mod error;
pub mod ports;
pub mod provider;
pub mod types;

pub use capabilities::{Codec, Effect, EffectSpec, InputFormat, SUPPORTED_LOCALES};
pub use client::MimicClient;
pub use config::{ClientConfig, ProviderConfig};
pub use error::MimicError;
pub use ports::TextToSpeechProvider;
pub use provider::MimicProvider;
pub use types::{ContainerFormat, EFFECT_OPTION, ProviderOptions, SynthesizedAudio};
