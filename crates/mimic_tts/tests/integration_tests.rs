//! Integration tests for mimic_tts crate
//!
//! Drives the provider end to end against mocked Mimic servers.

#![allow(clippy::panic)] // Allow panic! in tests for clear failure messages

use std::net::SocketAddr;

use mimic_tts::{
    ClientConfig, Codec, ContainerFormat, Effect, EffectSpec, MimicClient, MimicError,
    MimicProvider, ProviderConfig, ProviderOptions, TextToSpeechProvider,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Create a provider configuration pointing to mock server
fn test_config(mock_server: &MockServer) -> ProviderConfig {
    let address = mock_server.address();
    ProviderConfig {
        host: address.ip().to_string(),
        port: address.port(),
        locale: "en_US".to_string(),
        voice: "cmu-slt-hsmm".to_string(),
        codec: Codec::WaveFile,
        timeout_ms: Some(5000),
        ..Default::default()
    }
}

/// Answer exactly one HTTP request with a raw status line and body
///
/// Lets a test send a reason phrase that differs from the canonical one.
async fn serve_once(status_line: &'static str, body: &'static [u8]) -> (SocketAddr, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    serve_once_on(listener, status_line, body)
}

fn serve_once_on(
    listener: TcpListener,
    status_line: &'static str,
    body: &'static [u8],
) -> (SocketAddr, JoinHandle<String>) {
    let address = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;

        let head = format!(
            "{status_line}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        socket.write_all(head.as_bytes()).await.unwrap();
        socket.write_all(body).await.unwrap();
        socket.shutdown().await.unwrap();

        request
    });

    (address, handle)
}

/// Answer `requests` requests with 200, one per accepted connection
///
/// Connections are kept open afterwards, so a client that reused one would
/// wait on it instead of connecting again. Resolves to the number of accepted
/// connections.
async fn serve_keep_alive(requests: usize) -> (SocketAddr, JoinHandle<usize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let mut open = Vec::new();

        while open.len() < requests {
            let (mut socket, _) = listener.accept().await.unwrap();
            read_request(&mut socket).await;

            let body = b"RIFF";
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: audio/wav\r\nContent-Length: {}\r\nConnection: keep-alive\r\n\r\n",
                body.len()
            );
            socket.write_all(head.as_bytes()).await.unwrap();
            socket.write_all(body).await.unwrap();
            open.push(socket);
        }

        open.len()
    });

    (address, handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}

fn no_effects() -> ProviderOptions {
    ProviderOptions::with_effects(EffectSpec::new())
}

// ============ Synthesis ============

#[tokio::test]
async fn synthesize_hello_world_returns_wav() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/process"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("INPUT_TEXT=Hello+world"))
        .and(body_string_contains("INPUT_TYPE=TEXT"))
        .and(body_string_contains("OUTPUT_TYPE=AUDIO"))
        .and(body_string_contains("LOCALE=en_US"))
        .and(body_string_contains("AUDIO=WAVE_FILE"))
        .and(body_string_contains("VOICE=cmu-slt-hsmm"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"RIFF...audio...".to_vec()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = MimicProvider::new(test_config(&mock_server)).expect("Failed to create provider");

    let audio = provider
        .synthesize("Hello world", "en_US", &no_effects())
        .await
        .expect("Synthesis should succeed");

    let (format, data) = audio.into_parts();
    assert_eq!(format.as_str(), "wav");
    assert_eq!(&data[..], b"RIFF...audio...");
}

#[tokio::test]
async fn synthesize_without_effects_sends_no_effect_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/process"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 8]))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = MimicProvider::new(test_config(&mock_server)).unwrap();
    provider.synthesize("Plain", "en_US", &no_effects()).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(!body.contains("effect_"));
    assert_eq!(body.split('&').count(), 6);
}

#[tokio::test]
async fn synthesize_with_configured_default_effects() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/process"))
        .and(body_string_contains("effect_Volume_selected=on"))
        .and(body_string_contains("effect_Volume_parameters=amount%3A2.0%3B"))
        .and(body_string_contains("effect_Chorus_selected=on"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 8]))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ProviderConfig {
        effects: EffectSpec::new()
            .with(Effect::Volume, Effect::Volume.default_parameters())
            .with(Effect::Chorus, Effect::Chorus.default_parameters()),
        ..test_config(&mock_server)
    };
    let provider = MimicProvider::new(config).unwrap();

    let options = provider.default_options();
    provider.synthesize("Loud", "en_US", &options).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert_eq!(body.split('&').count(), 6 + 2 * 2);
}

#[tokio::test]
async fn aiff_codec_yields_aiff_container() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/process"))
        .and(body_string_contains("AUDIO=AIFF_FILE"))
        .and(body_string_contains("LOCALE=fr_FR"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"FORM....AIFF".to_vec()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ProviderConfig {
        codec: Codec::AiffFile,
        locale: "fr_FR".to_string(),
        ..test_config(&mock_server)
    };
    let provider = MimicProvider::new(config).unwrap();

    let audio = provider.synthesize("Bonjour", "fr_FR", &no_effects()).await.unwrap();

    assert_eq!(audio.format(), ContainerFormat::Aiff);
    assert_eq!(audio.format().mime_type(), "audio/aiff");
}

// ============ Errors ============

#[tokio::test]
async fn speak_reports_server_reason_phrase_and_first_body_line() {
    let (address, server) = serve_once("HTTP/1.1 500 Internal Error", b"bad voice").await;

    let client = MimicClient::new(ClientConfig {
        host: address.ip().to_string(),
        port: address.port(),
        ..Default::default()
    })
    .unwrap();

    let err = client.speak("Hello", &EffectSpec::new()).await.unwrap_err();

    match err {
        MimicError::RemoteSynthesis {
            status,
            reason,
            detail,
        } => {
            assert_eq!((status, reason.as_str(), detail.as_str()), (500, "Internal Error", "bad voice"));
        },
        other => panic!("Expected RemoteSynthesis, got: {other:?}"),
    }

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /process HTTP/1.1"));
    assert!(request.contains("INPUT_TEXT=Hello"));
}

#[tokio::test]
async fn truncated_error_body_still_reports_status() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        read_request(&mut socket).await;
        socket
            .write_all(b"HTTP/1.1 503 Busy\r\nContent-Length: 100\r\n\r\nshort")
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
    });

    let client = MimicClient::new(ClientConfig {
        host: address.ip().to_string(),
        port: address.port(),
        ..Default::default()
    })
    .unwrap();

    let err = client.speak("Hello", &EffectSpec::new()).await.unwrap_err();

    match err {
        MimicError::RemoteSynthesis {
            status,
            reason,
            detail,
        } => {
            assert_eq!((status, reason.as_str()), (503, "Busy"));
            assert!(detail.is_empty(), "Unreadable body must leave detail empty, got: {detail}");
        },
        other => panic!("Expected RemoteSynthesis, got: {other:?}"),
    }

    server.await.unwrap();
}

#[tokio::test]
async fn speak_reaches_ipv6_literal_host() {
    // Hosts without IPv6 loopback cannot run this test
    let Ok(listener) = TcpListener::bind("[::1]:0").await else {
        return;
    };
    let (address, server) = serve_once_on(listener, "HTTP/1.1 200 OK", b"RIFF");

    let client = MimicClient::new(ClientConfig {
        host: "::1".to_string(),
        port: address.port(),
        ..Default::default()
    })
    .unwrap();

    let audio = client.speak("Hello", &EffectSpec::new()).await.unwrap();
    assert_eq!(&audio[..], b"RIFF");

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /process HTTP/1.1"));
}

#[tokio::test]
async fn each_speak_call_opens_its_own_connection() {
    let (address, server) = serve_keep_alive(2).await;

    let client = MimicClient::new(ClientConfig {
        host: address.ip().to_string(),
        port: address.port(),
        timeout_ms: Some(2000),
        ..Default::default()
    })
    .unwrap();

    client.speak("First", &EffectSpec::new()).await.unwrap();
    client.speak("Second", &EffectSpec::new()).await.unwrap();

    assert_eq!(server.await.unwrap(), 2);
}

#[tokio::test]
async fn unreachable_server_is_not_a_remote_rejection() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let provider = MimicProvider::new(ProviderConfig {
        host: address.ip().to_string(),
        port: address.port(),
        ..Default::default()
    })
    .unwrap();

    let err = provider
        .synthesize("Hello", "en_US", &no_effects())
        .await
        .unwrap_err();

    assert!(
        matches!(err, MimicError::ConnectionFailed(_)),
        "Expected ConnectionFailed, got: {err:?}"
    );
}

#[tokio::test]
async fn unknown_effect_in_config_is_rejected_before_any_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let address = mock_server.address();
    let toml = format!(
        r#"
            host = "{}"
            port = {}

            [effect]
            Volume = "amount:2.0;"
            Distortion = "amount:9;"
        "#,
        address.ip(),
        address.port()
    );

    let result = toml::from_str::<ProviderConfig>(&toml);
    assert!(result.is_err(), "Unknown effect must fail configuration");

    let named = EffectSpec::from_named([("Volume", "amount:2.0;"), ("Distortion", "amount:9;")]);
    assert!(matches!(named, Err(MimicError::UnknownEffect(n)) if n == "Distortion"));
}

// ============ Configuration ============

#[test]
fn client_accessors_round_trip_without_normalization() {
    let client = MimicClient::new(ClientConfig {
        voice: "cmu-slt-hsmm".to_string(),
        codec: "AIFF_FILE".parse().unwrap(),
        locale: "fr_FR".to_string(),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(client.voice(), "cmu-slt-hsmm");
    assert_eq!(client.codec().as_str(), "AIFF_FILE");
    assert_eq!(client.locale(), "fr_FR");
}

#[test]
fn supported_languages_are_fixed_across_instances() {
    let configs = [
        ProviderConfig::default(),
        ProviderConfig {
            locale: "ru_RU".to_string(),
            codec: Codec::AuFile,
            ..Default::default()
        },
    ];

    let first = MimicProvider::new(configs[0].clone()).unwrap();
    let second = MimicProvider::new(configs[1].clone()).unwrap();

    assert_eq!(first.supported_languages().len(), 25);
    assert_eq!(first.supported_languages(), second.supported_languages());
    assert_eq!(first.supported_languages(), MimicClient::supported_locales());
}

#[test]
fn provider_loads_from_toml_config() {
    let config: ProviderConfig = toml::from_str(
        r#"
            host = "speech.lan"
            language = "de_DE"
            codec = "AU_FILE"

            [effect]
            Rate = "durScale:1.5;"
        "#,
    )
    .unwrap();

    let provider = MimicProvider::new(config).unwrap();

    assert_eq!(provider.client().host(), "speech.lan");
    assert_eq!(provider.client().port(), 59125);
    assert_eq!(provider.default_language(), "de_DE");
    assert_eq!(provider.client().codec(), Codec::AuFile);
    assert_eq!(
        provider
            .default_options()
            .effects
            .and_then(|e| e.get(Effect::Rate).map(str::to_string)),
        Some("durScale:1.5;".to_string())
    );
}
