// Tests for layered configuration loading
//
// The well-known LiveKit variables are supplied through a lookup map so the
// tests never touch the process environment.

use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;
use voxgate::config::{Config, DEFAULT_ENDPOINT};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn test_defaults_without_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("missing");

    let cfg = Config::load_with(path.to_str().unwrap(), lookup(&[]))?;

    assert_eq!(cfg.server.bind, "0.0.0.0");
    assert_eq!(cfg.server.port, 3000);
    assert_eq!(cfg.livekit.url, None);
    assert_eq!(cfg.livekit.api_key, None);
    assert_eq!(cfg.livekit.api_secret, None);
    assert_eq!(cfg.livekit.token_ttl_secs, 900);
    assert_eq!(cfg.client.endpoint, DEFAULT_ENDPOINT);

    Ok(())
}

#[test]
fn test_file_values() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("voxgate.toml");
    fs::write(
        &path,
        r#"
[server]
bind = "127.0.0.1"
port = 8080

[livekit]
url = "wss://file.example.com"
api_key = "file-key"
api_secret = "file-secret"
token_ttl_secs = 300

[client]
origin = "https://voice.example.com"
"#,
    )?;

    let cfg = Config::load_with(path.to_str().unwrap(), lookup(&[]))?;

    assert_eq!(cfg.server.bind, "127.0.0.1");
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.livekit.url.as_deref(), Some("wss://file.example.com"));
    assert_eq!(cfg.livekit.api_key.as_deref(), Some("file-key"));
    assert_eq!(cfg.livekit.api_secret.as_deref(), Some("file-secret"));
    assert_eq!(cfg.livekit.token_ttl_secs, 300);
    assert_eq!(cfg.client.origin, "https://voice.example.com");
    assert_eq!(cfg.client.endpoint, DEFAULT_ENDPOINT);

    Ok(())
}

#[test]
fn test_livekit_variables_override_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("voxgate.toml");
    fs::write(
        &path,
        r#"
[livekit]
url = "wss://file.example.com"
api_key = "file-key"
"#,
    )?;

    let cfg = Config::load_with(
        path.to_str().unwrap(),
        lookup(&[
            ("LIVEKIT_URL", "wss://env.example.com"),
            ("LIVEKIT_API_SECRET", "env-secret"),
            ("CONN_DETAILS_ENDPOINT", "/token"),
        ]),
    )?;

    assert_eq!(cfg.livekit.url.as_deref(), Some("wss://env.example.com"));
    assert_eq!(cfg.livekit.api_key.as_deref(), Some("file-key"));
    assert_eq!(cfg.livekit.api_secret.as_deref(), Some("env-secret"));
    assert_eq!(cfg.client.endpoint, "/token");

    Ok(())
}

#[test]
fn test_next_public_fallbacks() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("missing");

    let cfg = Config::load_with(
        path.to_str().unwrap(),
        lookup(&[
            ("NEXT_PUBLIC_LIVEKIT_URL", "wss://public.example.com"),
            ("NEXT_PUBLIC_CONN_DETAILS_ENDPOINT", "/api/other"),
        ]),
    )?;

    assert_eq!(cfg.livekit.url.as_deref(), Some("wss://public.example.com"));
    assert_eq!(cfg.client.endpoint, "/api/other");

    Ok(())
}

#[test]
fn test_debug_redacts_secret() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("missing");

    let cfg = Config::load_with(
        path.to_str().unwrap(),
        lookup(&[("LIVEKIT_API_SECRET", "hunter2")]),
    )?;

    let debug = format!("{:?}", cfg);
    assert!(!debug.contains("hunter2"));
    assert!(debug.contains("[REDACTED]"));

    Ok(())
}
