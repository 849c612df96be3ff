//! Command-line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use mimic_tts::{Codec, Effect, ProviderConfig};

/// Mimic speech CLI
#[derive(Debug, Parser)]
#[command(name = "mimic-say")]
#[command(author, version, about = "Synthesize speech with a Mimic server", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Provider configuration file (TOML)
    #[arg(short, long, global = true, env = "MIMIC_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Overrides for values from the configuration file
#[derive(Debug, Default, Args)]
pub struct ConnectionArgs {
    /// Server host
    #[arg(long, global = true, env = "MIMIC_HOST")]
    pub host: Option<String>,

    /// Server port
    #[arg(long, global = true, env = "MIMIC_PORT")]
    pub port: Option<u16>,

    /// Locale code (e.g. en_US)
    #[arg(long, global = true, env = "MIMIC_LANGUAGE")]
    pub language: Option<String>,

    /// Voice name
    #[arg(long, global = true, env = "MIMIC_VOICE")]
    pub voice: Option<String>,

    /// Audio codec (WAVE_FILE, AU_FILE, AIFF_FILE)
    #[arg(long, global = true, env = "MIMIC_CODEC")]
    pub codec: Option<Codec>,

    /// Request timeout in milliseconds
    #[arg(long, global = true, env = "MIMIC_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,
}

impl ConnectionArgs {
    /// Overwrite config values with every argument that was given
    pub fn apply_to(&self, config: &mut ProviderConfig) {
        if let Some(host) = &self.host {
            config.host.clone_from(host);
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(language) = &self.language {
            config.locale.clone_from(language);
        }
        if let Some(voice) = &self.voice {
            config.voice.clone_from(voice);
        }
        if let Some(codec) = self.codec {
            config.codec = codec;
        }
        if self.timeout_ms.is_some() {
            config.timeout_ms = self.timeout_ms;
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Synthesize text and write the audio to a file
    ///
    /// Example: mimic-say speak "Hello world" -o hello.wav --effect Volume=amount:2.0;
    Speak {
        /// Text to synthesize
        text: String,

        /// Output file (defaults to speech.<container>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Effect as NAME=PARAMETERS, repeatable
        #[arg(short, long = "effect", value_parser = parse_effect)]
        effects: Vec<(Effect, String)>,

        /// Start from the effects in the configuration file
        #[arg(long)]
        defaults: bool,
    },

    /// List supported locales
    Languages,

    /// List supported codecs and their containers
    Codecs,

    /// List effects with their default parameters
    Effects,
}

/// Parse `NAME=PARAMETERS` into an effect entry
///
/// A bare `NAME` selects the effect with its default parameters.
pub fn parse_effect(arg: &str) -> Result<(Effect, String), String> {
    let (name, parameters) = match arg.split_once('=') {
        Some((name, parameters)) => (name, Some(parameters)),
        None => (arg, None),
    };

    let effect = name.trim().parse::<Effect>().map_err(|e| e.to_string())?;
    let parameters = parameters.map_or_else(
        || effect.default_parameters().to_string(),
        str::to_string,
    );

    Ok((effect, parameters))
}

/// Determine log filter level from verbosity count
pub const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
