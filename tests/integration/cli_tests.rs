//! Integration tests for the CLI binary.
//!
//! Drives the `aidv` binary against a temporary on-disk store and checks
//! output and exit codes. Registered as a [[test]] in the aid-verify-cli
//! crate so that CARGO_BIN_EXE_aidv is available.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

use aid_verify::store::FileStore;
use aid_verify::{Aid, Credential, CredentialSchema, Event, Seal};

/// Get a Command pointing to the `aidv` binary.
fn aidv_binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_aidv"))
}

/// Write a valid delegation world into `dir` and return (agent, holder).
fn seed_store(dir: &Path, with_credentials: bool) -> (Aid, Aid) {
    let store = FileStore::new(dir).expect("store opens");

    let agent = Aid::derive(b"cli-agent");
    let holder = Aid::derive(b"cli-holder");
    let legal_entity = Aid::derive(b"cli-le");
    let qvi = Aid::derive(b"cli-qvi");
    let root = Aid::derive(b"cli-root");

    let icp = Event::delegated_inception(agent.clone(), holder.clone());
    let seal = Seal::committing_to(&icp);
    store.save_kel(&agent, &[icp]).expect("agent KEL saves");
    store
        .save_kel(
            &holder,
            &[
                Event::inception(holder.clone()),
                Event::interaction(holder.clone(), 1, vec![seal]),
            ],
        )
        .expect("holder KEL saves");

    if with_credentials {
        store
            .save_credential(&Credential::new(
                legal_entity.clone(),
                holder.clone(),
                CredentialSchema::Oor,
            ))
            .expect("OOR saves");
        store
            .save_credential(&Credential::new(qvi.clone(), legal_entity, CredentialSchema::Le))
            .expect("LE saves");
        store
            .save_credential(&Credential::new(root, qvi, CredentialSchema::Qvi))
            .expect("QVI saves");
    }

    (agent, holder)
}

#[test]
fn cli_responds_to_help() {
    let output = aidv_binary()
        .arg("--help")
        .output()
        .expect("failed to execute aidv --help");

    assert!(
        output.status.success(),
        "aidv --help should exit with success, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("aidv") || stdout.contains("Usage"),
        "aidv --help output should contain usage information, got: {stdout}"
    );
    assert!(
        stdout.contains("verify"),
        "help should list the verify subcommand"
    );
}

#[test]
fn cli_responds_to_version() {
    let output = aidv_binary()
        .arg("--version")
        .output()
        .expect("failed to execute aidv --version");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains(env!("CARGO_PKG_VERSION")),
        "version output should contain the crate version, got: {stdout}"
    );
}

#[test]
fn cli_rejects_unknown_subcommand() {
    let output = aidv_binary()
        .arg("frobnicate")
        .output()
        .expect("failed to execute aidv frobnicate");

    assert!(
        !output.status.success(),
        "an unknown subcommand should not exit with success"
    );
}

#[test]
fn cli_verify_valid_world_exits_zero() {
    let dir = TempDir::new().expect("tempdir");
    let (agent, holder) = seed_store(dir.path(), true);

    let output = aidv_binary()
        .arg("--store")
        .arg(dir.path())
        .arg("--json")
        .arg("verify")
        .arg(agent.as_str())
        .arg(holder.as_str())
        .output()
        .expect("failed to execute aidv verify");

    assert!(
        output.status.success(),
        "a valid world should exit 0, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("--json output should parse as JSON");
    assert_eq!(json["valid"], serde_json::Value::Bool(true));
    assert_eq!(json["subject_aid"], agent.as_str());
    assert_eq!(json["chain"].as_array().map(|c| c.len()), Some(3));
}

#[test]
fn cli_verify_invalid_world_exits_two() {
    let dir = TempDir::new().expect("tempdir");
    let (agent, holder) = seed_store(dir.path(), false);

    let output = aidv_binary()
        .arg("--store")
        .arg(dir.path())
        .arg("--json")
        .arg("verify")
        .arg(agent.as_str())
        .arg(holder.as_str())
        .output()
        .expect("failed to execute aidv verify");

    assert_eq!(
        output.status.code(),
        Some(2),
        "an invalid verdict should exit 2, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("--json output should parse as JSON");
    assert_eq!(json["valid"], serde_json::Value::Bool(false));
    assert!(json["failure_reason"]["kind"].is_string());
}

#[test]
fn cli_verify_missing_kel_text_output() {
    let dir = TempDir::new().expect("tempdir");
    // Store exists but holds nothing.
    FileStore::new(dir.path()).expect("store opens");

    let agent = Aid::derive(b"cli-ghost-agent");
    let holder = Aid::derive(b"cli-ghost-holder");

    let output = aidv_binary()
        .arg("--store")
        .arg(dir.path())
        .arg("verify")
        .arg(agent.as_str())
        .arg(holder.as_str())
        .output()
        .expect("failed to execute aidv verify");

    assert_eq!(output.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("INVALID"),
        "text output should flag the verdict, got: {stdout}"
    );
}

#[test]
fn cli_kel_shows_delegation() {
    let dir = TempDir::new().expect("tempdir");
    let (agent, holder) = seed_store(dir.path(), false);

    let output = aidv_binary()
        .arg("--store")
        .arg(dir.path())
        .arg("kel")
        .arg(agent.as_str())
        .output()
        .expect("failed to execute aidv kel");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("icp") && stdout.contains("di="),
        "the agent KEL starts with a delegated inception, got: {stdout}"
    );
    assert!(
        stdout.contains(holder.as_str()),
        "the delegator should appear in the key state"
    );
    assert!(stdout.contains("Delegated:       true"));
}

#[test]
fn cli_chain_resolves_three_links() {
    let dir = TempDir::new().expect("tempdir");
    let (_, holder) = seed_store(dir.path(), true);

    let output = aidv_binary()
        .arg("--store")
        .arg(dir.path())
        .arg("chain")
        .arg(holder.as_str())
        .output()
        .expect("failed to execute aidv chain");

    assert!(
        output.status.success(),
        "chain resolution should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("3 links"));
    assert!(stdout.contains("OOR"));
    assert!(stdout.contains("LE"));
    assert!(stdout.contains("QVI"));
}

#[test]
fn cli_kel_unknown_identifier_exits_one() {
    let dir = TempDir::new().expect("tempdir");
    FileStore::new(dir.path()).expect("store opens");

    let output = aidv_binary()
        .arg("--store")
        .arg(dir.path())
        .arg("kel")
        .arg(Aid::derive(b"nobody").as_str())
        .output()
        .expect("failed to execute aidv kel");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("no key event log"),
        "stderr should name the failure, got: {stderr}"
    );
}
