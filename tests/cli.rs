//! Tests for CLI parsing and exit codes of the binary.

mod helpers;

use clap::Parser;
use tokio::process::Command;

use cert_inspector::{Config, OutputFormat, VerificationPolicy};
use helpers::{closed_port, spawn_tls_server, TEST_DOMAIN};

fn inspector() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cert_inspector"));
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_config_parsing_defaults_to_trust_all() {
    let config = Config::try_parse_from(["cert_inspector", "www.example.com"]).unwrap();
    assert_eq!(config.policy(), VerificationPolicy::TrustAll);
    assert_eq!(config.output, OutputFormat::Plain);
    assert_eq!(config.port, 443);
}

#[test]
fn test_config_parsing_rejects_unknown_output() {
    let result = Config::try_parse_from(["cert_inspector", "www.example.com", "--output", "xml"]);
    assert!(result.is_err());
}

#[tokio::test]
async fn test_invalid_domain_exits_with_two() {
    let output = inspector()
        .arg("not-a-domain")
        .output()
        .await
        .expect("Failed to run binary");
    assert_eq!(output.status.code(), Some(2));
}

#[tokio::test]
async fn test_invalid_override_address_exits_with_two() {
    let output = inspector()
        .args(["www.example.com", "--ip", "300.1.1.1"])
        .output()
        .await
        .expect("Failed to run binary");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("300.1.1.1"), "stderr was: {stderr}");
}

#[tokio::test]
async fn test_refused_connection_exits_with_one() {
    let port = closed_port().await;
    let output = inspector()
        .args([TEST_DOMAIN, "--ip", "127.0.0.1", "--port", &port.to_string()])
        .output()
        .await
        .expect("Failed to run binary");
    assert_eq!(output.status.code(), Some(1));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_json_report_for_local_server() {
    let server = spawn_tls_server().await;
    let output = inspector()
        .args([
            TEST_DOMAIN,
            "--ip",
            "127.0.0.1",
            "--port",
            &server.port().to_string(),
            "--output",
            "json",
            "--log-level",
            "error",
        ])
        .output()
        .await
        .expect("Failed to run binary");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be one JSON document");
    assert_eq!(report["domain"], TEST_DOMAIN);
    assert_eq!(report["certificates"].as_array().map(Vec::len), Some(1));
    assert_eq!(report["leaf_match"]["matched_by"], "subject_alt_name");
    assert_eq!(report["leaf_match"]["pattern"], TEST_DOMAIN);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_strict_flag_fails_against_self_signed_server() {
    let server = spawn_tls_server().await;
    let output = inspector()
        .args([
            TEST_DOMAIN,
            "--ip",
            "127.0.0.1",
            "--port",
            &server.port().to_string(),
            "--strict",
        ])
        .output()
        .await
        .expect("Failed to run binary");
    assert_eq!(output.status.code(), Some(1));
}
