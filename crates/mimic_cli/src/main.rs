//! mimic-say
//!
//! Command-line interface for synthesizing speech with a Mimic server.

#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use mimic_cli::settings;
use mimic_cli::{Cli, Commands};
use mimic_tts::{
    Codec, EffectSpec, MimicClient, MimicProvider, ProviderOptions, TextToSpeechProvider,
    capabilities::container_for,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = mimic_cli::cli::log_filter_from_verbosity(cli.verbose);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Speak {
            text,
            output,
            effects,
            defaults,
        } => {
            let mut config = settings::load(cli.config.as_deref())?;
            cli.connection.apply_to(&mut config);

            let provider = MimicProvider::new(config).context("Invalid provider configuration")?;

            let mut selected = if defaults {
                provider.default_effects().clone()
            } else {
                EffectSpec::new()
            };
            selected.extend_from(&effects.into_iter().collect());

            info!(
                host = provider.client().host(),
                port = provider.client().port(),
                effects = selected.len(),
                "Synthesizing"
            );

            let language = provider.default_language().to_string();
            let audio = provider
                .synthesize(&text, &language, &ProviderOptions::with_effects(selected))
                .await
                .context("Speech synthesis failed")?;

            let output = output.unwrap_or_else(|| PathBuf::from(audio.filename("speech")));
            tokio::fs::write(&output, audio.data())
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;

            println!(
                "🔊 Wrote {} bytes ({}) to {}",
                audio.size_bytes(),
                audio.format(),
                output.display()
            );
        },

        Commands::Languages => {
            for locale in MimicClient::supported_locales() {
                println!("{locale}");
            }
        },

        Commands::Codecs => {
            for codec in MimicClient::supported_codecs() {
                println!("{:<10} {}", codec.as_str(), container_for(codec)?);
            }
            println!("\nDefault: {}", Codec::default());
        },

        Commands::Effects => {
            for (effect, parameters) in MimicClient::supported_effects() {
                println!("{:<12} {parameters}", effect.name());
            }
        },
    }

    Ok(())
}
